pub const SENDER_ADDRESS_ENV: &str = "NOTIFIER_SENDER_ADDRESS";
pub const SES_REGION_ENV: &str = "NOTIFIER_SES_REGION";
pub const DRY_RUN_ENV: &str = "NOTIFIER_DRY_RUN";

pub const DEFAULT_SENDER_ADDRESS: &str = "hppeixoto15@gmail.com";
pub const DEFAULT_SES_REGION: &str = "us-east-1";

/// Cold-start settings for the notifier. Provider credentials are resolved by
/// the AWS default provider chain and never pass through here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Must be verified in SES for the configured region.
    pub sender_address: String,
    pub ses_region: String,
    pub dry_run: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            sender_address: DEFAULT_SENDER_ADDRESS.to_string(),
            ses_region: DEFAULT_SES_REGION.to_string(),
            dry_run: false,
        }
    }
}

impl NotifierConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            sender_address: non_empty(SENDER_ADDRESS_ENV).unwrap_or(defaults.sender_address),
            ses_region: non_empty(SES_REGION_ENV).unwrap_or(defaults.ses_region),
            dry_run: non_empty(DRY_RUN_ENV)
                .map(|value| parse_flag(&value))
                .unwrap_or(defaults.dry_run),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn falls_back_to_defaults_when_unset() {
        let config = NotifierConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, NotifierConfig::default());
        assert_eq!(config.ses_region, "us-east-1");
    }

    #[test]
    fn reads_overrides() {
        let config = NotifierConfig::from_lookup(lookup_from(&[
            (SENDER_ADDRESS_ENV, "noreply@logitrack.example"),
            (SES_REGION_ENV, "sa-east-1"),
            (DRY_RUN_ENV, "TRUE"),
        ]));

        assert_eq!(config.sender_address, "noreply@logitrack.example");
        assert_eq!(config.ses_region, "sa-east-1");
        assert!(config.dry_run);
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = NotifierConfig::from_lookup(lookup_from(&[
            (SENDER_ADDRESS_ENV, "  "),
            (DRY_RUN_ENV, "no"),
        ]));

        assert_eq!(config.sender_address, DEFAULT_SENDER_ADDRESS);
        assert!(!config.dry_run);
    }
}
