//! Part-number derivation rules.
//!
//! A part number is built by concatenating the product type with the
//! cleaned line, partner, and insulation codes, followed by the cleaned,
//! zero-padded length:
//!
//! ```text
//! type + clean(lwc) + clean(partner) + clean(insulation) + clean(pad3(length))
//! ```
//!
//! `clean` strips `/`, `-`, and spaces; a missing partner contributes an
//! empty segment. Purely numeric lengths are zero-padded to three digits in
//! the part number but displayed without leading zeros; non-numeric lengths
//! (ranges such as `15-35`) pass through unpadded.
//!
//! One catalog quirk lives here too: a record whose length is the literal
//! pair `80/82` stands for two products. [`derive_records`] expands it into
//! two records with lengths `80` and `82`, each with its own part number.

use crate::snapshot::ProductRecord;

/// The length value that encodes a pair of products in one record.
pub const PAIR_LENGTH: &str = "80/82";

/// The two lengths a [`PAIR_LENGTH`] record expands into.
const PAIR_SPLIT: [&str; 2] = ["80", "82"];

/// Width the numeric length is zero-padded to inside a part number.
const LENGTH_PAD_WIDTH: usize = 3;

/// Strip the characters that never appear in a part number segment.
///
/// Removes `/`, `-`, and spaces; everything else passes through unchanged.
///
/// ```
/// use partfinder_core::part_number::clean_segment;
///
/// assert_eq!(clean_segment("P/1"), "P1");
/// assert_eq!(clean_segment("B-M 2"), "BM2");
/// assert_eq!(clean_segment("FOIL"), "FOIL");
/// ```
#[must_use]
pub fn clean_segment(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '/' | '-' | ' '))
        .collect()
}

/// Returns true if the value consists solely of ASCII digits.
fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Zero-pad a purely numeric length to three digits for part-number use.
///
/// Non-numeric lengths (ranges like `15-35`) are returned unchanged; so are
/// numeric lengths already three or more digits wide.
///
/// ```
/// use partfinder_core::part_number::padded_length;
///
/// assert_eq!(padded_length("30"), "030");
/// assert_eq!(padded_length("100"), "100");
/// assert_eq!(padded_length("15-35"), "15-35");
/// ```
#[must_use]
pub fn padded_length(raw: &str) -> String {
    if is_numeric(raw) {
        format!("{raw:0>width$}", width = LENGTH_PAD_WIDTH)
    } else {
        raw.to_owned()
    }
}

/// Normalize a length for display.
///
/// Numeric lengths lose their leading zeros (`030` becomes `30`); the
/// literal zero survives as `0`. Non-numeric lengths are displayed verbatim.
///
/// ```
/// use partfinder_core::part_number::display_length;
///
/// assert_eq!(display_length("030"), "30");
/// assert_eq!(display_length("0"), "0");
/// assert_eq!(display_length("15-35"), "15-35");
/// ```
#[must_use]
pub fn display_length(raw: &str) -> String {
    if is_numeric(raw) {
        let stripped = raw.trim_start_matches('0');
        if stripped.is_empty() {
            "0".to_owned()
        } else {
            stripped.to_owned()
        }
    } else {
        raw.to_owned()
    }
}

/// Derive a part number from raw product fields.
///
/// The type segment is used as-is; the remaining segments are cleaned. The
/// length is padded before cleaning, so `30` contributes `030` while a
/// range like `15-35` contributes `1535`.
#[must_use]
pub fn derive(
    product_type: &str,
    lwc: &str,
    partner: Option<&str>,
    insulation: &str,
    raw_length: &str,
) -> String {
    let padded = padded_length(raw_length);
    format!(
        "{}{}{}{}{}",
        product_type,
        clean_segment(lwc),
        partner.map(clean_segment).unwrap_or_default(),
        clean_segment(insulation),
        clean_segment(&padded),
    )
}

/// Derive part numbers for a whole snapshot's worth of records.
///
/// Input order is preserved. Each record gets a freshly computed
/// `partNumber` and a normalized display length; a [`PAIR_LENGTH`] record
/// is expanded in place into its two halves, and the combined record does
/// not appear in the output.
#[must_use]
pub fn derive_records(items: &[ProductRecord]) -> Vec<ProductRecord> {
    let mut out = Vec::with_capacity(items.len());

    for item in items {
        if item.length == PAIR_LENGTH {
            for half in PAIR_SPLIT {
                let mut record = item.clone();
                record.part_number = Some(derive(
                    &record.product_type,
                    &record.lwc,
                    record.partner.as_deref(),
                    &record.insulation,
                    half,
                ));
                // The split halves are displayed as-is, without padding.
                record.length = half.to_owned();
                out.push(record);
            }
        } else {
            let mut record = item.clone();
            record.part_number = Some(derive(
                &record.product_type,
                &record.lwc,
                record.partner.as_deref(),
                &record.insulation,
                &record.length,
            ));
            record.length = display_length(&record.length);
            out.push(record);
        }
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(
        product_type: &str,
        lwc: &str,
        partner: Option<&str>,
        insulation: &str,
        length: &str,
    ) -> ProductRecord {
        ProductRecord {
            product_type: product_type.to_owned(),
            lwc: lwc.to_owned(),
            partner: partner.map(str::to_owned),
            insulation: insulation.to_owned(),
            length: length.to_owned(),
            blade_size: "1/4".to_owned(),
            layers: "2".to_owned(),
            qty_per_pallet: 10,
            box_pallet: 5,
            part_number: None,
        }
    }

    #[test]
    fn test_clean_segment() {
        assert_eq!(clean_segment("P/1"), "P1");
        assert_eq!(clean_segment("B-M 2"), "BM2");
        assert_eq!(clean_segment(""), "");
        assert_eq!(clean_segment("///"), "");
    }

    #[test]
    fn test_padded_length_numeric() {
        assert_eq!(padded_length("5"), "005");
        assert_eq!(padded_length("30"), "030");
        assert_eq!(padded_length("100"), "100");
        assert_eq!(padded_length("1234"), "1234");
    }

    #[test]
    fn test_padded_length_non_numeric() {
        assert_eq!(padded_length("15-35"), "15-35");
        assert_eq!(padded_length("80/82"), "80/82");
        assert_eq!(padded_length(""), "");
    }

    #[test]
    fn test_display_length() {
        assert_eq!(display_length("030"), "30");
        assert_eq!(display_length("005"), "5");
        assert_eq!(display_length("100"), "100");
        assert_eq!(display_length("0"), "0");
        assert_eq!(display_length("000"), "0");
        assert_eq!(display_length("15-35"), "15-35");
    }

    #[test]
    fn test_derive_concrete_scenario() {
        // {"Type":"A","lwc":"X1","partner":"P/1","insulation":"FOIL","length":"30"}
        let part = derive("A", "X1", Some("P/1"), "FOIL", "30");
        assert_eq!(part, "AX1P1FOIL030");
    }

    #[test]
    fn test_derive_missing_partner_contributes_empty_segment() {
        let with = derive("A", "X1", Some("P1"), "FOIL", "30");
        let without = derive("A", "X1", None, "FOIL", "30");
        assert_eq!(without, "AX1FOIL030");
        assert_eq!(with.len(), without.len() + 2);
    }

    #[test]
    fn test_derive_range_length_is_cleaned_not_padded() {
        let part = derive("A", "X1", None, "FOIL", "15-35");
        assert_eq!(part, "AX1FOIL1535");
    }

    #[test]
    fn test_derive_records_standard_item() {
        let items = vec![record("A", "X1", Some("P/1"), "FOIL", "30")];
        let out = derive_records(&items);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].part_number.as_deref(), Some("AX1P1FOIL030"));
        assert_eq!(out[0].length, "30");
    }

    #[test]
    fn test_derive_records_strips_padded_display_length() {
        let items = vec![record("A", "X1", None, "FOIL", "030")];
        let out = derive_records(&items);

        assert_eq!(out[0].length, "30");
        assert_eq!(out[0].part_number.as_deref(), Some("AX1FOIL030"));
    }

    #[test]
    fn test_derive_records_pair_split() {
        let items = vec![record("A", "X1", None, "FOIL", "80/82")];
        let out = derive_records(&items);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].length, "80");
        assert_eq!(out[1].length, "82");
        assert_eq!(out[0].part_number.as_deref(), Some("AX1FOIL080"));
        assert_eq!(out[1].part_number.as_deref(), Some("AX1FOIL082"));
        assert!(out.iter().all(|r| r.length != PAIR_LENGTH));
        assert_ne!(out[0].part_number, out[1].part_number);
    }

    #[test]
    fn test_derive_records_preserves_order_around_split() {
        let items = vec![
            record("A", "X1", None, "FOIL", "60"),
            record("A", "X2", None, "FOIL", "80/82"),
            record("A", "X3", None, "FOIL", "90"),
        ];
        let out = derive_records(&items);

        let lwcs: Vec<&str> = out.iter().map(|r| r.lwc.as_str()).collect();
        assert_eq!(lwcs, ["X1", "X2", "X2", "X3"]);
    }

    #[test]
    fn test_derive_records_replaces_stale_part_number() {
        let mut item = record("A", "X1", None, "FOIL", "30");
        item.part_number = Some("STALE".to_owned());
        let out = derive_records(&[item]);

        assert_eq!(out[0].part_number.as_deref(), Some("AX1FOIL030"));
    }
}
