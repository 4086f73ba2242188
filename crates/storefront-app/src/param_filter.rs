//! # Sensitive Parameter Filtering
//!
//! Request parameters are logged for debugging, but passwords and card data must never
//! reach the logs. The `storefront.params.filter` initializer seeds
//! [`DEFAULT_FILTER_PARAMETERS`] into the configuration; boot compiles the final list
//! into a [`ParamFilter`].
//!
//! Keys are dotted paths (`order.payments_attributes.0.source_attributes.number`). A
//! pattern filters a key when it matches either the full path or its last segment.

use regex::Regex;
use std::collections::BTreeMap;

/// Replacement written in place of a filtered value.
pub const FILTERED: &str = "[FILTERED]";

/// Patterns seeded by the engine.
pub const DEFAULT_FILTER_PARAMETERS: &[&str] = &[
    r"^password$",
    r"^password_confirmation$",
    r"payment.*source.*\.number$",
    r"payment.*source.*\.verification_value$",
];

/// Compiled set of sensitive-key patterns.
#[derive(Debug, Clone, Default)]
pub struct ParamFilter {
    patterns: Vec<Regex>,
}

impl ParamFilter {
    pub fn compile<S: AsRef<str>>(sources: &[S]) -> Result<Self, regex::Error> {
        let patterns = sources
            .iter()
            .map(|source| Regex::new(source.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_filtered(&self, key: &str) -> bool {
        let leaf = key.rsplit('.').next().unwrap_or(key);
        self.patterns
            .iter()
            .any(|pattern| pattern.is_match(key) || pattern.is_match(leaf))
    }

    /// Copy of `params` with sensitive values replaced by [`FILTERED`].
    pub fn redact(&self, params: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        params
            .iter()
            .map(|(key, value)| {
                let value = if self.is_filtered(key) {
                    FILTERED.to_string()
                } else {
                    value.clone()
                };
                (key.clone(), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_filter() -> ParamFilter {
        ParamFilter::compile(DEFAULT_FILTER_PARAMETERS).unwrap()
    }

    #[test]
    fn test_filters_passwords_by_leaf_key() {
        let filter = default_filter();
        assert!(filter.is_filtered("password"));
        assert!(filter.is_filtered("user.password"));
        assert!(filter.is_filtered("user.password_confirmation"));
        assert!(!filter.is_filtered("user.password_hint"));
        assert!(!filter.is_filtered("user.email"));
    }

    #[test]
    fn test_filters_card_fields_by_full_path() {
        let filter = default_filter();
        assert!(filter.is_filtered("order.payments_attributes.0.source_attributes.number"));
        assert!(filter.is_filtered("payment_source.verification_value"));
        assert!(!filter.is_filtered("order.number"));
        assert!(!filter.is_filtered("order.payments_attributes.0.source_attributes.name"));
    }

    #[test]
    fn test_redact_keeps_non_sensitive_values() {
        let filter = default_filter();
        let params: BTreeMap<String, String> = [
            ("user.email", "alice@example.com"),
            ("user.password", "hunter2"),
            ("payment.source.number", "4111111111111111"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let redacted = filter.redact(&params);

        assert_eq!(redacted["user.email"], "alice@example.com");
        assert_eq!(redacted["user.password"], FILTERED);
        assert_eq!(redacted["payment.source.number"], FILTERED);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(ParamFilter::compile(&["(unclosed"][..]).is_err());
    }
}
