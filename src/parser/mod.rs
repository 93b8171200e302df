use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::types::CanonicalAddress;

pub mod delimited;
pub mod free_text;
pub mod markup;

pub use delimited::DelimitedRecordParser;
pub use free_text::FreeTextBlockParser;
pub use markup::StructuredMarkupParser;

/// Turns the full contents of one input file into canonical records,
/// sorted ascending by zip.
pub trait AddressParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<CanonicalAddress>>;

    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Read the whole file, release the handle, then parse.
    fn parse_file(&self, path: &Path) -> Result<Vec<CanonicalAddress>> {
        let bytes = fs::read(path)?;
        debug!(
            "{}: read {} bytes from {}",
            self.name(),
            bytes.len(),
            path.display()
        );
        self.parse(&bytes)
    }
}

/// Decode input as UTF-8 text with `\r\n` line endings folded to `\n`.
/// Invalid UTF-8 is an error for the whole file.
pub(crate) fn decode_text(bytes: &[u8]) -> Result<String> {
    Ok(std::str::from_utf8(bytes)?.replace("\r\n", "\n"))
}
