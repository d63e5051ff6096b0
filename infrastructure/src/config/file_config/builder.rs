//! Builder configuration from TOML (`[builder]` section)

use decision_log_domain::{BuilderConfig, DEFAULT_DETAIL_LOOKBACK};
use serde::{Deserialize, Serialize};

/// How the event stream is folded into turns
///
/// ```toml
/// [builder]
/// detail_lookback = 5   # events searched back from vote-settled for compare detail
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBuilderConfig {
    pub detail_lookback: usize,
}

impl Default for FileBuilderConfig {
    fn default() -> Self {
        Self {
            detail_lookback: DEFAULT_DETAIL_LOOKBACK,
        }
    }
}

impl FileBuilderConfig {
    pub fn to_builder_config(&self) -> BuilderConfig {
        BuilderConfig {
            detail_lookback: self.detail_lookback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_config_deserialize() {
        let toml_str = r#"
[builder]
detail_lookback = 0
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.builder.to_builder_config().detail_lookback, 0);
    }
}
