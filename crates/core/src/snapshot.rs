//! The `products.json` snapshot document model.
//!
//! The snapshot is a flat JSON document of the shape
//! `{"items": [ {..}, {..} ]}` that mirrors the authoritative store. It is
//! regenerated wholesale after every admin mutation and consumed by the
//! batch tools and the statically served catalog copy.
//!
//! # Field names
//!
//! The canonical external field names are `type`, `lwc`, `partner`,
//! `insulation`, `length`, `bladeSize`, `layers`, `qtyPerPallet`,
//! `boxPallet`, and `partNumber`. Older documents spelled the first field
//! `Type` and stored numbers as bare integers or numeric strings
//! interchangeably; deserialization accepts all of those, serialization
//! always emits the canonical form.

use serde::{Deserialize, Deserializer, Serialize};

/// A single catalog item as it appears in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Category code, e.g. `A`. Uncleaned prefix of the part number.
    #[serde(rename = "type", alias = "Type", default)]
    pub product_type: String,
    /// Line code.
    #[serde(default, deserialize_with = "de_stringish")]
    pub lwc: String,
    /// Optional partner line code; absent for single-line products.
    #[serde(default, deserialize_with = "de_optional_stringish", skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
    /// Insulation code.
    #[serde(default, deserialize_with = "de_stringish")]
    pub insulation: String,
    /// Display length; may encode a range (`15-35`) or a pair (`80/82`).
    #[serde(default, deserialize_with = "de_stringish")]
    pub length: String,
    /// Blade size, often fractional (`1/4`).
    #[serde(rename = "bladeSize", default, deserialize_with = "de_stringish")]
    pub blade_size: String,
    /// Layer count, kept as a display string.
    #[serde(default, deserialize_with = "de_stringish")]
    pub layers: String,
    /// Quantity per pallet.
    #[serde(rename = "qtyPerPallet", default, deserialize_with = "de_intish")]
    pub qty_per_pallet: i64,
    /// Boxes per pallet.
    #[serde(rename = "boxPallet", default, deserialize_with = "de_intish")]
    pub box_pallet: i64,
    /// Derived part number, when one has been computed.
    #[serde(rename = "partNumber", default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
}

/// The whole snapshot document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Snapshot {
    /// Catalog items in store order.
    pub items: Vec<ProductRecord>,
}

impl Snapshot {
    /// Parse a snapshot from JSON text.
    ///
    /// A UTF-8 byte-order mark is tolerated; some historical exports of
    /// this document carried one.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the document is not valid JSON or
    /// any item fails to deserialize.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text.trim_start_matches('\u{feff}'))
    }

    /// Serialize the snapshot with one item per line.
    ///
    /// The `items` array is pretty-printed but each item stays compact on
    /// its own line, which keeps diffs of the regenerated file readable:
    ///
    /// ```text
    /// {
    ///   "items": [
    ///     {"type":"A","lwc":"X1",...},
    ///     {"type":"A","lwc":"X2",...}
    ///   ]
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if an item fails to serialize.
    pub fn to_row_json(&self) -> Result<String, serde_json::Error> {
        let mut out = String::from("{\n  \"items\": [\n");

        for (i, item) in self.items.iter().enumerate() {
            out.push_str("    ");
            out.push_str(&serde_json::to_string(item)?);
            if i + 1 < self.items.len() {
                out.push(',');
            }
            out.push('\n');
        }

        out.push_str("  ]\n}\n");
        Ok(out)
    }
}

/// String-or-number helper for fields that older documents stored loosely.
#[derive(Deserialize)]
#[serde(untagged)]
enum Stringish {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Stringish {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
        }
    }
}

fn de_stringish<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Stringish::deserialize(deserializer)?.into_string())
}

fn de_optional_stringish<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Stringish>::deserialize(deserializer)?;
    // An empty partner means no partner.
    Ok(value.map(Stringish::into_string).filter(|s| !s.is_empty()))
}

fn de_intish<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Intish {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Intish::deserialize(deserializer)? {
        Intish::Int(n) => Ok(n),
        #[allow(clippy::cast_possible_truncation)]
        Intish::Float(f) => Ok(f as i64),
        Intish::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid integer value: {s:?}"))),
    }
}
