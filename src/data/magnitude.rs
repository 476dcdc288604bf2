//! Damage Magnitude Decoding
//! Converts `(amount, unit-suffix)` pairs into dollar figures.

use crate::data::{DecodedRecord, EventRecord};

/// Order-of-magnitude multiplier carried by a damage unit suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    Thousand,
    Million,
    Billion,
}

impl Magnitude {
    /// Look up a single suffix character, case-insensitively.
    pub fn from_char(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'K' => Some(Magnitude::Thousand),
            'M' => Some(Magnitude::Million),
            'B' => Some(Magnitude::Billion),
            _ => None,
        }
    }

    /// Look up a suffix cell. Anything other than exactly one of K/M/B
    /// (after trimming) is unrecognized, including empty cells and digits.
    pub fn from_code(code: &str) -> Option<Self> {
        recognized_suffix(code).and_then(Self::from_char)
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Magnitude::Thousand => 1e3,
            Magnitude::Million => 1e6,
            Magnitude::Billion => 1e9,
        }
    }
}

/// Scale `raw_amount` by its suffix; `None` means the suffix is unrecognized
/// and the value must be excluded, not defaulted.
pub fn decode_amount(raw_amount: f64, suffix: char) -> Option<f64> {
    Magnitude::from_char(suffix).map(|m| raw_amount * m.multiplier())
}

/// The suffix character of a cell, if it is exactly one recognized code.
fn recognized_suffix(code: &str) -> Option<char> {
    let mut chars = code.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Magnitude::from_char(c).map(|_| c),
        _ => None,
    }
}

/// Keep only records whose property and crop suffixes are both recognized,
/// then convert both amounts to dollars.
///
/// Filtering happens on the raw suffixes before any amount is scaled.
pub fn decode_records(records: &[EventRecord]) -> Vec<DecodedRecord> {
    let decoded: Vec<DecodedRecord> = records
        .iter()
        .filter_map(|r| {
            let prop = recognized_suffix(&r.prop_code)?;
            let crop = recognized_suffix(&r.crop_code)?;
            Some((r, prop, crop))
        })
        .map(|(r, prop, crop)| DecodedRecord {
            category: r.category.clone(),
            prop_damage: r.prop_amount.and_then(|a| decode_amount(a, prop)),
            crop_damage: r.crop_amount.and_then(|a| decode_amount(a, crop)),
        })
        .collect();

    tracing::debug!(
        input = records.len(),
        kept = decoded.len(),
        "decoded damage magnitudes"
    );

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(prop: (f64, &str), crop: (f64, &str)) -> EventRecord {
        EventRecord {
            category: "flood".to_string(),
            date: None,
            fatalities: None,
            injuries: None,
            prop_amount: Some(prop.0),
            prop_code: prop.1.to_string(),
            crop_amount: Some(crop.0),
            crop_code: crop.1.to_string(),
        }
    }

    #[test]
    fn test_decode_amount() {
        assert_eq!(decode_amount(2.5, 'K'), Some(2500.0));
        assert_eq!(decode_amount(3.0, 'm'), Some(3_000_000.0));
        assert_eq!(decode_amount(1.0, 'B'), Some(1e9));
        assert_eq!(decode_amount(1.0, 'X'), None);
        assert_eq!(decode_amount(1.0, '5'), None);
        assert_eq!(decode_amount(1.0, '+'), None);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Magnitude::from_code(" k "), Some(Magnitude::Thousand));
        assert_eq!(Magnitude::from_code("b"), Some(Magnitude::Billion));
        assert_eq!(Magnitude::from_code(""), None);
        assert_eq!(Magnitude::from_code("0"), None);
        assert_eq!(Magnitude::from_code("h"), None);
        assert_eq!(Magnitude::from_code("KM"), None);
    }

    #[test]
    fn test_decode_records_requires_both_suffixes() {
        let records = vec![
            record((2.5, "K"), (1.0, "m")),
            record((5.0, "X"), (1.0, "K")),
            record((5.0, "K"), (1.0, "")),
        ];

        let decoded = decode_records(&records);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].prop_damage, Some(2500.0));
        assert_eq!(decoded[0].crop_damage, Some(1e6));
        assert_eq!(decoded[0].total_damage(), Some(1_002_500.0));
    }

    #[test]
    fn test_decode_records_keeps_missing_amounts_missing() {
        let mut r = record((0.0, "K"), (0.0, "K"));
        r.prop_amount = None;

        let decoded = decode_records(&[r]);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].prop_damage, None);
        assert_eq!(decoded[0].crop_damage, Some(0.0));
        assert_eq!(decoded[0].total_damage(), None);
    }

    #[test]
    fn test_decode_records_scales_like_decode_amount() {
        let decoded = decode_records(&[record((1.5, " b "), (4.0, "k"))]);
        assert_eq!(decoded[0].prop_damage, decode_amount(1.5, 'b'));
        assert_eq!(decoded[0].crop_damage, decode_amount(4.0, 'k'));
        assert_eq!(decoded[0].prop_damage, Some(1.5e9));
    }
}
