use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use super::{decode_text, AddressParser};
use crate::constants::{BLOCK_SEPARATOR, COUNTY_MARKER};
use crate::error::{FormatError, Result};
use crate::types::{sort_by_zip, CanonicalAddress};

/// Five-digit zip with optional `-NNNN` extension, as a whole token
static ZIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{5}(?:-\d{4})?\b").expect("zip pattern is valid"));

/// City, state and zip pulled out of a location line such as
/// `Anytown, CA 94016`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Location {
    pub fn parse(line: &str) -> std::result::Result<Self, FormatError> {
        let line = line.trim();

        let zip = ZIP_PATTERN
            .find(line)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| FormatError::MissingZip(line.to_string()))?;

        let without_zip = line.replace(&zip, "");
        let state = without_zip
            .split(',')
            .nth(1)
            .ok_or_else(|| FormatError::MissingState(line.to_string()))?
            .replace('-', "")
            .trim()
            .to_string();

        let city = line.split(',').next().unwrap_or_default().trim().to_string();

        Ok(Self { city, state, zip })
    }
}

/// Parser for blank-line separated blocks of name, street, optional county
/// and a location line.
#[derive(Debug, Default)]
pub struct FreeTextBlockParser;

impl FreeTextBlockParser {
    pub fn new() -> Self {
        Self
    }

    fn normalize_block(lines: &[&str], block: usize) -> Result<CanonicalAddress> {
        let (county, location_line) = match lines {
            [_, _, location] => (String::new(), *location),
            [_, _, county, location] => (county.replace(COUNTY_MARKER, "").trim().to_string(), *location),
            _ => {
                return Err(FormatError::UnexpectedLineCount {
                    block,
                    lines: lines.len(),
                }
                .into())
            }
        };

        let Location { city, state, zip } = Location::parse(location_line)?;

        Ok(CanonicalAddress::Person {
            name: lines[0].to_string(),
            street: lines[1].to_string(),
            city,
            county,
            state,
            zip,
        })
    }
}

impl AddressParser for FreeTextBlockParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<CanonicalAddress>> {
        debug!("FreeTextBlockParser: start bytes_len={}", bytes.len());
        let text = decode_text(bytes)?;

        let mut out = Vec::new();
        for (index, block) in text.split(BLOCK_SEPARATOR).enumerate() {
            let lines: Vec<&str> = block
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();

            if lines.len() <= 1 {
                debug!("FreeTextBlockParser: skipping block #{} with {} lines", index + 1, lines.len());
                continue;
            }

            let address = Self::normalize_block(&lines, index + 1)?;
            debug!(
                "FreeTextBlockParser: block #{} name='{}' zip={}",
                index + 1,
                address.display_name(),
                address.zip()
            );
            out.push(address);
        }

        sort_by_zip(&mut out);
        info!("FreeTextBlockParser: extracted records count={}", out.len());
        Ok(out)
    }

    fn name(&self) -> &str {
        "FreeTextBlockParser"
    }
}
