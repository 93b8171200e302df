use serde::{Deserialize, Serialize};

/// The normalized address shape produced by every parser.
///
/// Serialized without a tag, so each variant's JSON object carries exactly
/// its own keys in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalAddress {
    Organization {
        organization: String,
        street: String,
        city: String,
        state: String,
        zip: String,
    },
    Person {
        name: String,
        street: String,
        city: String,
        county: String,
        state: String,
        zip: String,
    },
}

impl CanonicalAddress {
    /// The sort key shared by both shapes
    pub fn zip(&self) -> &str {
        match self {
            CanonicalAddress::Organization { zip, .. } | CanonicalAddress::Person { zip, .. } => zip,
        }
    }

    pub fn street(&self) -> &str {
        match self {
            CanonicalAddress::Organization { street, .. }
            | CanonicalAddress::Person { street, .. } => street,
        }
    }

    pub fn is_organization(&self) -> bool {
        matches!(self, CanonicalAddress::Organization { .. })
    }

    /// Organization name or person name, whichever this record carries
    pub fn display_name(&self) -> &str {
        match self {
            CanonicalAddress::Organization { organization, .. } => organization,
            CanonicalAddress::Person { name, .. } => name,
        }
    }
}

/// Stable ascending sort on the zip string; ties keep encounter order.
pub fn sort_by_zip(records: &mut [CanonicalAddress]) {
    records.sort_by(|a, b| a.zip().cmp(b.zip()));
}
