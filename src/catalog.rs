use std::collections::BTreeMap;

use crate::config::CatalogConfig;
use crate::error::{ConfigError, SessionError};
use crate::offload::ConfigToken;
use crate::signal_processing::{FilterKind, FilterSpec, TapSequence, design};

/// One selectable filter: its design, the taps it produces, and the accelerator
/// configuration that implements it.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub spec: FilterSpec,
    pub taps: TapSequence,
    pub config_token: ConfigToken,
}

/// Immutable name -> (spec, token) mapping
///
/// Taps are designed once, when the catalog is built.
#[derive(Debug, Clone)]
pub struct FilterCatalog {
    entries: BTreeMap<FilterKind, CatalogEntry>,
}

impl FilterCatalog {
    /// The three tuned filters: 81 taps, Kaiser beta 4, 48 kHz.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::from_config(&CatalogConfig::default())
    }

    /// # Errors
    /// `ConfigError::Invalid` for empty or shared tokens, `ConfigError::Design` for
    /// parameters no filter can be designed from.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError> {
        config.validate_tokens()?;
        let mut entries = BTreeMap::new();
        for kind in FilterKind::ALL {
            let entry_config = config.entry(kind);
            let spec = FilterSpec::new(
                kind,
                config.tap_count,
                &entry_config.cutoffs,
                config.window_beta,
                config.sample_rate,
            )?;
            let taps = design(&spec);
            log::debug!(
                "Catalog: {} -> {} ({} taps)",
                kind,
                entry_config.config_token,
                taps.len()
            );
            entries.insert(
                kind,
                CatalogEntry {
                    spec,
                    taps,
                    config_token: ConfigToken::new(entry_config.config_token.clone()),
                },
            );
        }
        Ok(Self { entries })
    }

    /// Look up a filter by display name (`"Low Pass"`) or any alias `FilterKind` accepts.
    pub fn resolve(&self, name: &str) -> Result<&CatalogEntry, SessionError> {
        name.parse::<FilterKind>()
            .ok()
            .and_then(|kind| self.entries.get(&kind))
            .ok_or_else(|| SessionError::UnknownFilter(name.to_string()))
    }

    pub fn get(&self, kind: FilterKind) -> Option<&CatalogEntry> {
        self.entries.get(&kind)
    }

    /// Display names of the available filters, in catalog order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().map(FilterKind::as_str).collect()
    }

    /// Find the entry configured with `token`.
    pub fn by_token(&self, token: &ConfigToken) -> Option<&CatalogEntry> {
        self.entries.values().find(|e| &e.config_token == token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterEntryConfig;
    use crate::error::DesignError;

    #[test]
    fn test_standard_catalog() {
        let catalog = FilterCatalog::standard().unwrap();
        assert_eq!(catalog.names(), vec!["Low Pass", "Band Pass", "High Pass"]);

        let entry = catalog.resolve("Band Pass").unwrap();
        assert_eq!(entry.spec.kind(), FilterKind::BandPass);
        assert_eq!(entry.spec.cutoffs(), &[219.0, 2224.0]);
        assert_eq!(entry.spec.tap_count(), 81);
        assert_eq!(entry.spec.sample_rate(), 48000);
        assert_eq!(entry.taps.len(), 81);
        assert_eq!(entry.config_token.as_str(), "your_file_name2.bit");
    }

    #[test]
    fn test_resolve_unknown() {
        let catalog = FilterCatalog::standard().unwrap();
        assert_eq!(
            catalog.resolve("Notch").unwrap_err(),
            SessionError::UnknownFilter("Notch".to_string())
        );
    }

    #[test]
    fn test_by_token() {
        let catalog = FilterCatalog::standard().unwrap();
        let entry = catalog
            .by_token(&ConfigToken::new("your_file_name3.bit"))
            .unwrap();
        assert_eq!(entry.spec.kind(), FilterKind::HighPass);
        assert!(catalog.by_token(&ConfigToken::new("missing.bit")).is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = CatalogConfig::default();
        config.high_pass = FilterEntryConfig {
            config_token: "hp.bit".to_string(),
            cutoffs: vec![30000.0],
        };
        assert!(matches!(
            FilterCatalog::from_config(&config),
            Err(ConfigError::Design(DesignError::InvalidCutoff(_)))
        ));

        let mut config = CatalogConfig::default();
        config.tap_count = 80;
        assert!(matches!(
            FilterCatalog::from_config(&config),
            Err(ConfigError::Design(DesignError::EvenTapCount(80)))
        ));
    }

    #[test]
    fn test_shared_token_rejected() {
        let mut config = CatalogConfig::default();
        config.band_pass.config_token = config.low_pass.config_token.clone();
        assert!(matches!(
            FilterCatalog::from_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }
}
