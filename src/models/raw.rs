//! The raw transaction row as supplied by the record-source collaborator.

use serde::{Deserialize, Serialize};

/// A field that may arrive as either a number or a string.
///
/// Spreadsheet exports are inconsistent about this: the same column can
/// hold `45762` in one row and `"01/05/2025"` in the next, or `200000` next
/// to `"1,000,000"`. The untagged representation lets both decode without
/// the source having to care.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// The field arrived as a JSON/CSV number.
    Number(f64),
    /// The field arrived as text.
    Text(String),
}

impl RawValue {
    /// The field as text, for parsers that work on strings.
    ///
    /// Whole numbers render without a fractional part so that a numeric
    /// `45762` and a textual `"45762"` are indistinguishable downstream.
    pub fn to_text(&self) -> String {
        match self {
            RawValue::Number(value) if value.fract() == 0.0 => format!("{}", *value as i64),
            RawValue::Number(value) => value.to_string(),
            RawValue::Text(text) => text.clone(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_owned())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// An unvalidated transaction row, exactly as the record source supplied it.
///
/// Every field is optional: the normalizer decides what a missing field
/// means (a missing `date` or `amount` rejects the record, everything else
/// defaults). Field names follow the collaborator contract, so a JSON
/// export of the source spreadsheet deserializes directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawRecord {
    /// The transaction date in any of the supported encodings: a
    /// spreadsheet serial number, `DD/MM/YYYY`, an ISO date, or an ISO
    /// date-time.
    pub date: Option<RawValue>,
    /// The free-text category.
    pub category: Option<String>,
    /// The free-text description, kept as the transaction note.
    pub description: Option<String>,
    /// The amount, as a number or a formatted string ("1,000,000").
    pub amount: Option<RawValue>,
    /// The transaction type, matched against the income synonym table.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// The optional free-text sub-category.
    pub sub_category: Option<String>,
    /// The optional quantity (fuel litres).
    pub quantity: Option<RawValue>,
    /// The free-text payment method, matched against the cash synonym
    /// table.
    pub payment_method: Option<String>,
    /// When the source system recorded the row, as an RFC 3339 instant.
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod raw_value_tests {
    use crate::models::RawValue;

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(RawValue::Number(45762.0).to_text(), "45762");
    }

    #[test]
    fn fractional_numbers_keep_their_fraction() {
        assert_eq!(RawValue::Number(25.5).to_text(), "25.5");
    }

    #[test]
    fn text_passes_through() {
        assert_eq!(RawValue::from("01/05/2025").to_text(), "01/05/2025");
    }
}

#[cfg(test)]
mod raw_record_tests {
    use crate::models::{RawRecord, RawValue};

    #[test]
    fn deserializes_mixed_field_types_from_json() {
        let json = r#"{
            "date": 45762,
            "category": "Transportasi",
            "amount": "1,000,000",
            "type": "expense",
            "subCategory": "Bensin",
            "quantity": 25.5,
            "paymentMethod": "tunai"
        }"#;

        let record: RawRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.date, Some(RawValue::Number(45762.0)));
        assert_eq!(record.amount, Some(RawValue::from("1,000,000")));
        assert_eq!(record.quantity, Some(RawValue::Number(25.5)));
        assert_eq!(record.sub_category.as_deref(), Some("Bensin"));
        assert_eq!(record.payment_method.as_deref(), Some("tunai"));
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let record: RawRecord = serde_json::from_str("{}").unwrap();

        assert_eq!(record, RawRecord::default());
    }
}
