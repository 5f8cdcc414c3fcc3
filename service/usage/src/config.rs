use config::{Config, Environment, File, FileFormat};
use domain_usage::model::vo::ActiveAccounting;
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct UsageConfig {
    /// Which instances count towards the active-resource snapshot.
    #[serde(default)]
    pub active_accounting: ActiveAccounting,
    /// Ask the instance store to drop instances outside the window.
    #[serde(default = "UsageConfig::default_pre_filter_by_window")]
    pub pre_filter_by_window: bool,
}

impl UsageConfig {
    fn default_pre_filter_by_window() -> bool {
        true
    }

    /// Layers the optional file at `path` and `USAGE__*` environment variables.
    pub fn build(path: Option<&str>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }
        let config = builder
            .add_source(Environment::with_prefix("USAGE").separator("__"))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config = Config::builder().add_source(File::from_str(yaml, FileFormat::Yaml)).build()?;
        Ok(config.try_deserialize()?)
    }
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            active_accounting: Default::default(),
            pre_filter_by_window: Self::default_pre_filter_by_window(),
        }
    }
}
