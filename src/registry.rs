use std::collections::HashMap;
use std::path::Path;

use crate::constants::{DELIMITED_EXTENSION, FREE_TEXT_EXTENSION, MARKUP_EXTENSION};
use crate::parser::{AddressParser, DelimitedRecordParser, FreeTextBlockParser, StructuredMarkupParser};

/// Registry mapping file extensions to format-specific parsers
pub struct ParserRegistry {
    parsers: HashMap<String, Box<dyn AddressParser>>,
}

impl ParserRegistry {
    /// Create a registry with the built-in `.txt`, `.tsv` and `.xml` parsers
    pub fn new() -> Self {
        let mut registry = Self {
            parsers: HashMap::new(),
        };

        registry.register(FREE_TEXT_EXTENSION.to_string(), Box::new(FreeTextBlockParser::new()));
        registry.register(DELIMITED_EXTENSION.to_string(), Box::new(DelimitedRecordParser::new()));
        registry.register(MARKUP_EXTENSION.to_string(), Box::new(StructuredMarkupParser::new()));

        registry
    }

    /// Register a parser for an extension (without the leading dot), replacing
    /// any parser already registered for it
    pub fn register(&mut self, extension: String, parser: Box<dyn AddressParser>) {
        self.parsers.insert(extension, parser);
    }

    /// Look up a parser by extension
    pub fn get_parser(&self, extension: &str) -> Option<&dyn AddressParser> {
        self.parsers.get(extension).map(|p| p.as_ref())
    }

    /// Select the parser for a path by its suffix. Matching is case-sensitive.
    pub fn for_path(&self, path: &Path) -> Option<&dyn AddressParser> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.get_parser(ext))
    }

    /// List all registered extensions
    pub fn list_extensions(&self) -> Vec<&str> {
        self.parsers.keys().map(|k| k.as_str()).collect()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
