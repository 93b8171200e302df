use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use super::AddressParser;
use crate::constants::{NO_MIDDLE_NAME, NO_ORGANIZATION};
use crate::error::{FormatError, Result};
use crate::types::{sort_by_zip, CanonicalAddress};

const REQUIRED_COLUMNS: [&str; 9] = [
    "first",
    "middle",
    "last",
    "organization",
    "address",
    "city",
    "state",
    "zip",
    "zip4",
];

/// Column positions resolved once from the header row.
/// A repeated header name resolves to its last occurrence.
struct ColumnIndex {
    positions: [usize; REQUIRED_COLUMNS.len()],
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .enumerate()
                .filter(|(_, h)| *h == column)
                .map(|(index, _)| index)
                .last()
                .ok_or(FormatError::MissingColumn(column))?;
        }
        Ok(Self { positions })
    }

    fn row<'r>(&self, record: &'r StringRecord) -> Result<Row<'r>> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let mut values = [""; REQUIRED_COLUMNS.len()];
        for ((value, &position), column) in values.iter_mut().zip(&self.positions).zip(REQUIRED_COLUMNS) {
            *value = record
                .get(position)
                .ok_or(FormatError::MissingField { line, column })?;
        }
        let [first, middle, last, organization, address, city, state, zip, zip4] = values;
        Ok(Row {
            first,
            middle,
            last,
            organization,
            address,
            city,
            state,
            zip,
            zip4,
        })
    }
}

/// One data row, borrowed from the CSV record
#[derive(Debug)]
struct Row<'r> {
    first: &'r str,
    middle: &'r str,
    last: &'r str,
    organization: &'r str,
    address: &'r str,
    city: &'r str,
    state: &'r str,
    zip: &'r str,
    zip4: &'r str,
}

impl Row<'_> {
    fn is_organization(&self) -> bool {
        self.first.is_empty() && self.middle.is_empty()
    }

    fn into_organization(self) -> CanonicalAddress {
        let mut organization = String::new();
        if !self.last.is_empty() {
            organization = self.last.to_string();
        }
        if self.organization != NO_ORGANIZATION {
            organization = self.organization.to_string();
        }

        CanonicalAddress::Organization {
            organization,
            street: self.address.to_string(),
            city: self.city.to_string(),
            state: self.state.to_string(),
            zip: compose_zip(self.zip, self.zip4),
        }
    }

    fn into_person(self) -> CanonicalAddress {
        CanonicalAddress::Person {
            name: assemble_name(self.first, self.middle, self.last),
            street: self.address.to_string(),
            city: self.city.to_string(),
            county: String::new(),
            state: self.state.to_string(),
            zip: self.zip.to_string(),
        }
    }
}

/// `zip` followed by `-zip4` when the extension is present
pub fn compose_zip(zip: &str, zip4: &str) -> String {
    if zip4.is_empty() {
        zip.to_string()
    } else {
        format!("{}-{}", zip, zip4)
    }
}

/// `first middle last`, skipping the middle-name sentinel, trimmed
pub fn assemble_name(first: &str, middle: &str, last: &str) -> String {
    let mut name = format!("{} ", first);
    if middle != NO_MIDDLE_NAME {
        name.push_str(middle);
        name.push(' ');
    }
    name.push_str(last);
    name.trim().to_string()
}

/// Parser for tab-separated person/organization rows with a header line
#[derive(Debug, Default)]
pub struct DelimitedRecordParser;

impl DelimitedRecordParser {
    pub fn new() -> Self {
        Self
    }
}

impl AddressParser for DelimitedRecordParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<CanonicalAddress>> {
        debug!("DelimitedRecordParser: start bytes_len={}", bytes.len());
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let columns = ColumnIndex::from_headers(reader.headers()?)?;

        let mut out = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row = columns.row(&record)?;
            let address = if row.is_organization() {
                row.into_organization()
            } else {
                row.into_person()
            };
            debug!(
                "DelimitedRecordParser: row organization={} name='{}'",
                address.is_organization(),
                address.display_name()
            );
            out.push(address);
        }

        sort_by_zip(&mut out);
        info!("DelimitedRecordParser: extracted records count={}", out.len());
        Ok(out)
    }

    fn name(&self) -> &str {
        "DelimitedRecordParser"
    }
}
