use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

/// How many depth months each contract root carries.
///
/// ```toml
/// [contracts]
/// default_depth = 4
///
/// [contracts.depths]
/// CME_NQ = 2
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractsConfig {
    /// Depth used for any root missing from `depths`. Without it, unknown roots are an error.
    #[serde(default)]
    pub default_depth: Option<usize>,
    #[serde(default)]
    pub depths: HashMap<String, usize>,
}

impl ContractsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_depth == Some(0) {
            return Err(ConfigError::ValidationError(
                "contracts.default_depth must be at least 1".to_string(),
            ));
        }
        if let Some((root, _)) = self.depths.iter().find(|(_, depth)| **depth == 0) {
            return Err(ConfigError::ValidationError(format!(
                "contracts.depths.{root} must be at least 1"
            )));
        }
        Ok(())
    }
}

/// Maps a contract root (e.g. `CME_GC`) to its depth-specific contract
/// identifiers (`CME_GC1`, `CME_GC2`, ...).
#[derive(Debug, Clone)]
pub struct ContractResolver {
    default_depth: Option<usize>,
    // Keys are upper-cased: config sources do not agree on key case.
    depths: HashMap<String, usize>,
}

impl ContractResolver {
    pub fn new(config: &ContractsConfig) -> Self {
        Self {
            default_depth: config.default_depth,
            depths: config
                .depths
                .iter()
                .map(|(root, depth)| (root.to_ascii_uppercase(), *depth))
                .collect(),
        }
    }

    /// The number of depth months configured for `root`, if any.
    pub fn depth(&self, root: &str) -> Option<usize> {
        self.depths
            .get(&root.to_ascii_uppercase())
            .copied()
            .or(self.default_depth)
    }

    /// Resolves `root` to its contract identifiers, front month first.
    ///
    /// Identifiers are always upper-case, matching how the vendor and the
    /// store name contracts, whatever the caller's spelling of the root.
    pub fn resolve(&self, root: &str) -> Result<Vec<String>, ConfigError> {
        let root = root.trim().to_ascii_uppercase();
        let depth = self
            .depth(&root)
            .ok_or_else(|| ConfigError::UnknownRoot(root.clone()))?;
        tracing::debug!(root = %root, depth, "Resolved contract root.");
        Ok((1..=depth).map(|i| format!("{root}{i}")).collect())
    }
}
