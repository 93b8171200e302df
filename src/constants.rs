/// Sentinel values and dispatch keys shared by the parsers.
/// Every comparison against these is an exact string match.

// Delimited input
/// Organization column value meaning "no organization name"; falls back to `last`.
pub const NO_ORGANIZATION: &str = "N/A";
/// Middle-name column value meaning "no middle name"; omitted from the assembled name.
pub const NO_MIDDLE_NAME: &str = "N/M/N";

// Markup input
/// A COMPANY element holding exactly one space marks a person entity.
pub const BLANK_COMPANY: &str = " ";
pub const STREET_SEPARATOR: &str = ";";

// Free-text input
pub const COUNTY_MARKER: &str = "COUNTY";
pub const BLOCK_SEPARATOR: &str = "\n\n";

// File extensions (without the leading dot)
pub const FREE_TEXT_EXTENSION: &str = "txt";
pub const DELIMITED_EXTENSION: &str = "tsv";
pub const MARKUP_EXTENSION: &str = "xml";
