//! Synonym tables and the fuel-tracking rule.
//!
//! The engine buckets free-text fields by matching them against these
//! lists, so locale-specific labels live here rather than in the replay or
//! aggregation logic. The defaults carry the English and Indonesian labels
//! the source spreadsheets actually use; a TOML file can override any of
//! them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, models::Transaction};

/// Configuration for classifying free-text record fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Type strings that resolve to [TransactionKind::Income]
    /// (case-insensitive). Everything else is an expense.
    ///
    /// [TransactionKind::Income]: crate::TransactionKind::Income
    pub income_synonyms: Vec<String>,
    /// Substrings of the payment method that resolve to the cash channel
    /// (case-insensitive). Anything else, including an unknown or empty
    /// method, resolves to the bank account so it stays visible in totals.
    pub cash_synonyms: Vec<String>,
    /// The rule for recognising fuel purchases.
    pub fuel: FuelConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            income_synonyms: vec!["income".to_owned(), "pemasukan".to_owned()],
            cash_synonyms: vec!["cash".to_owned(), "tunai".to_owned()],
            fuel: FuelConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load the configuration from a TOML file.
    ///
    /// A missing file is not an error: the defaults apply, matching how the
    /// engine behaves when no configuration was ever written.
    ///
    /// # Errors
    /// Returns [Error::InvalidConfig] if the file exists but cannot be read
    /// or parsed.
    pub fn load(path: &Path) -> Result<EngineConfig, Error> {
        if !path.is_file() {
            return Ok(EngineConfig::default());
        }

        let text = std::fs::read_to_string(path)
            .map_err(|error| Error::InvalidConfig(error.to_string()))?;

        toml::from_str(&text).map_err(|error| Error::InvalidConfig(error.to_string()))
    }
}

/// The rule that recognises a fuel purchase for litre tracking.
///
/// A transaction matches when its category contains one of the vehicle
/// keywords and its sub-category equals the fuel marker, both
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelConfig {
    /// Substrings identifying a vehicle-expense category.
    pub category_keywords: Vec<String>,
    /// The sub-category label marking a fuel purchase.
    pub sub_category: String,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            category_keywords: vec!["transport".to_owned(), "kendaraan".to_owned()],
            sub_category: "bensin".to_owned(),
        }
    }
}

impl FuelConfig {
    /// Build the fuel predicate injected into the aggregator.
    pub fn matcher(&self) -> impl Fn(&Transaction) -> bool + '_ {
        move |transaction: &Transaction| {
            let category = transaction.category.to_lowercase();
            let category_matches = self
                .category_keywords
                .iter()
                .any(|keyword| category.contains(&keyword.to_lowercase()));

            let sub_category_matches = transaction
                .sub_category
                .as_deref()
                .is_some_and(|sub| sub.eq_ignore_ascii_case(&self.sub_category));

            category_matches && sub_category_matches
        }
    }
}

#[cfg(test)]
mod engine_config_tests {
    use std::path::Path;

    use crate::config::EngineConfig;

    #[test]
    fn default_carries_english_and_indonesian_synonyms() {
        let config = EngineConfig::default();

        assert!(config.income_synonyms.contains(&"income".to_owned()));
        assert!(config.income_synonyms.contains(&"pemasukan".to_owned()));
        assert!(config.cash_synonyms.contains(&"cash".to_owned()));
        assert!(config.cash_synonyms.contains(&"tunai".to_owned()));
    }

    #[test]
    fn load_returns_defaults_for_missing_file() {
        let config = EngineConfig::load(Path::new("/nonexistent/dompet.toml")).unwrap();

        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_other_fields() {
        let config: EngineConfig = toml::from_str(
            r#"
            income_synonyms = ["masuk"]
            "#,
        )
        .unwrap();

        assert_eq!(config.income_synonyms, vec!["masuk".to_owned()]);
        assert_eq!(config.cash_synonyms, EngineConfig::default().cash_synonyms);
    }

    #[test]
    fn fuel_table_overrides_parse() {
        let config: EngineConfig = toml::from_str(
            r#"
            [fuel]
            category_keywords = ["vehicle"]
            sub_category = "petrol"
            "#,
        )
        .unwrap();

        assert_eq!(config.fuel.category_keywords, vec!["vehicle".to_owned()]);
        assert_eq!(config.fuel.sub_category, "petrol");
    }
}
