pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod registry;
pub mod types;

pub use error::{FormatError, NormalizeError};
pub use parser::{AddressParser, DelimitedRecordParser, FreeTextBlockParser, StructuredMarkupParser};
pub use pipeline::{Normalizer, RunSummary};
pub use registry::ParserRegistry;
pub use types::CanonicalAddress;
