use std::io::Write;

use crate::error::Result;
use crate::types::CanonicalAddress;

/// Write each record as a 2-space indented JSON object followed by a newline.
pub fn write_records<W: Write>(writer: &mut W, records: &[CanonicalAddress]) -> Result<()> {
    for record in records {
        serde_json::to_writer_pretty(&mut *writer, record)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
