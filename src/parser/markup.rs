use roxmltree::{Document, Node};
use tracing::{debug, info};

use super::{decode_text, AddressParser};
use crate::constants::{BLANK_COMPANY, STREET_SEPARATOR};
use crate::error::{FormatError, Result};
use crate::types::{sort_by_zip, CanonicalAddress};

const ENTITY_COLLECTION: &str = "ENTITY";
const ENTITY: &str = "ENT";
const STREET_LINES: [&str; 3] = ["STREET", "STREET_2", "STREET_3"];

/// Parser for XML documents holding an `ENTITY` list of `ENT` elements
#[derive(Debug, Default)]
pub struct StructuredMarkupParser;

impl StructuredMarkupParser {
    pub fn new() -> Self {
        Self
    }

    fn normalize_entity(entity: Node, position: usize) -> Result<CanonicalAddress> {
        let context = || format!("<{}> #{}", ENTITY, position);
        let required = |element: &'static str| -> Result<String> {
            child(entity, element)
                .map(|node| node.text().unwrap_or_default().to_string())
                .ok_or_else(|| {
                    FormatError::MissingElement {
                        element,
                        context: context(),
                    }
                    .into()
                })
        };

        let name = required("NAME")?;
        let company = required("COMPANY")?;
        let city = required("CITY")?;
        let state = required("STATE")?;
        let zip = required("POSTAL_CODE")?;
        let street = join_street_lines(entity);

        if company != BLANK_COMPANY {
            Ok(CanonicalAddress::Organization {
                organization: company,
                street,
                city,
                state,
                zip,
            })
        } else {
            Ok(CanonicalAddress::Person {
                name,
                street,
                city,
                county: String::new(),
                state,
                zip,
            })
        }
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == tag)
}

/// Non-empty trimmed street lines in order, joined by `;`.
/// Absent elements and elements without text count as empty.
fn join_street_lines(entity: Node) -> String {
    STREET_LINES
        .iter()
        .filter_map(|tag| child(entity, tag))
        .filter_map(|node| node.text())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(STREET_SEPARATOR)
}

impl AddressParser for StructuredMarkupParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<CanonicalAddress>> {
        debug!("StructuredMarkupParser: start bytes_len={}", bytes.len());
        let text = decode_text(bytes)?;
        let document = Document::parse(&text)?;

        let collection = child(document.root_element(), ENTITY_COLLECTION).ok_or_else(|| {
            FormatError::MissingElement {
                element: ENTITY_COLLECTION,
                context: format!("root <{}>", document.root_element().tag_name().name()),
            }
        })?;

        let mut out = Vec::new();
        for (position, entity) in collection
            .children()
            .filter(|c| c.is_element() && c.tag_name().name() == ENTITY)
            .enumerate()
        {
            let address = Self::normalize_entity(entity, position + 1)?;
            debug!(
                "StructuredMarkupParser: entity #{} organization={} name='{}'",
                position + 1,
                address.is_organization(),
                address.display_name()
            );
            out.push(address);
        }

        sort_by_zip(&mut out);
        info!("StructuredMarkupParser: extracted records count={}", out.len());
        Ok(out)
    }

    fn name(&self) -> &str {
        "StructuredMarkupParser"
    }
}
