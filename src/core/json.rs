use crate::core::errors::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

/// Field names that may hold the service tag list, tried in order. The weekly download uses
/// `values`; the Service Tag Discovery API uses `value`.
pub const TAG_LIST_FIELDS: &[&str] = &["values", "value"];

/// Parse a raw Service Tags JSON document. The bytes must be valid UTF-8 and the root object
/// must carry the tag list under one of the [TAG_LIST_FIELDS].
///
/// The first candidate holding a non-empty value is used and must be a list; an empty or
/// null candidate falls through to the next one. When every candidate is empty, the last
/// one is used, so `{"value": []}` is an empty document while `{"values": []}` is
/// malformed.
pub fn parse(raw: &[u8]) -> Result<ServiceTagDocument> {
    let text = std::str::from_utf8(raw)
        .map_err(|error| Error::MalformedDocument(format!("invalid UTF-8: {error}")))?;
    let root: Value = serde_json::from_str(text)
        .map_err(|error| Error::MalformedDocument(format!("invalid JSON: {error}")))?;

    let tag_list = TAG_LIST_FIELDS
        .iter()
        .filter_map(|field| root.get(field))
        .find(|value| !is_empty_value(value))
        .or_else(|| TAG_LIST_FIELDS.last().and_then(|field| root.get(field)))
        .filter(|value| value.is_array())
        .ok_or_else(|| {
            Error::MalformedDocument(format!(
                "no {} list found",
                TAG_LIST_FIELDS
                    .iter()
                    .map(|field| format!("'{field}'"))
                    .collect::<Vec<_>>()
                    .join(" or ")
            ))
        })?;

    let records = Vec::<JsonTagRecord>::deserialize(tag_list)
        .map_err(|error| Error::MalformedDocument(format!("invalid service tag entry: {error}")))?
        .into_iter()
        .map(TagRecord::from)
        .collect();

    Ok(ServiceTagDocument {
        change_number: root.get("changeNumber").and_then(Value::as_i64),
        cloud: root.get("cloud").and_then(Value::as_str).map(str::to_string),
        records,
    })
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.is_empty(),
    }
}

/*-------------------------------------------------------------------------------------------------
  Service Tag Document
-------------------------------------------------------------------------------------------------*/

/// Parsed Service Tags document.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ServiceTagDocument {
    /// Document revision, when present.
    pub change_number: Option<i64>,

    /// Cloud the document describes (e.g. `Public`), when present.
    pub cloud: Option<String>,

    /// Service tag records in document order.
    pub records: Vec<TagRecord>,
}

/// A service tag and its address prefixes. Missing names or prefix lists are represented
/// as empty values.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TagRecord {
    pub name: String,
    pub address_prefixes: Vec<String>,
}

impl TagRecord {
    pub fn new<S: AsRef<str>>(name: &str, address_prefixes: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.to_string(),
            address_prefixes: address_prefixes
                .into_iter()
                .map(|prefix| prefix.as_ref().to_string())
                .collect(),
        }
    }

    /// A record is written only when it has a name and at least one prefix.
    pub fn is_writable(&self) -> bool {
        !self.name.is_empty() && !self.address_prefixes.is_empty()
    }
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

#[derive(Debug, Deserialize)]
struct JsonTagRecord {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    properties: Option<JsonTagProperties>,
}

#[derive(Debug, Deserialize)]
struct JsonTagProperties {
    #[serde(rename = "addressPrefixes", default)]
    address_prefixes: Option<Vec<String>>,
}

impl From<JsonTagRecord> for TagRecord {
    fn from(record: JsonTagRecord) -> Self {
        Self {
            name: record.name.unwrap_or_default(),
            address_prefixes: record
                .properties
                .and_then(|properties| properties.address_prefixes)
                .unwrap_or_default(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
