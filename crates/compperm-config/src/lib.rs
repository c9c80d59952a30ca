//! Multi-tier TOML configuration for compperm.
//!
//! Reads configuration from multiple sources with precedence:
//! env vars > project > global > defaults

use compperm_policy::{ActivationPolicy, PolicyConfig};
use compperm_types::{ConfigError, as_bool};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-level config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".compperm.toml";

/// Resolved configuration for a compperm process.
#[derive(Debug, Clone)]
pub struct CompPermConfig {
    pub policy: PolicyConfig,
    /// JSON host store, if one is configured.
    pub store_path: Option<PathBuf>,
    pub config_dir: PathBuf,
}

/// Settings that can be read from a TOML config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub component_permissions: PolicySettings,
    #[serde(default)]
    pub store: StoreSettings,
}

/// `[component_permissions]` section. Unset keys fall through to lower tiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicySettings {
    pub activation: Option<ActivationPolicy>,
    pub allow_owner: Option<bool>,
    pub allow_reporter: Option<bool>,
    pub allow_cc: Option<bool>,
    pub allow_cc_email: Option<bool>,
    pub hide_components: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    pub path: Option<PathBuf>,
}

impl SettingsFile {
    /// Overlay `higher` on top of `self`; keys set in `higher` win.
    fn overlay(self, higher: SettingsFile) -> SettingsFile {
        let (low, high) = (self.component_permissions, higher.component_permissions);
        SettingsFile {
            component_permissions: PolicySettings {
                activation: high.activation.or(low.activation),
                allow_owner: high.allow_owner.or(low.allow_owner),
                allow_reporter: high.allow_reporter.or(low.allow_reporter),
                allow_cc: high.allow_cc.or(low.allow_cc),
                allow_cc_email: high.allow_cc_email.or(low.allow_cc_email),
                hide_components: high.hide_components.or(low.hide_components),
            },
            store: StoreSettings {
                path: higher.store.path.or(self.store.path),
            },
        }
    }
}

/// CLI overrides that take highest precedence.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Replaces the project config file; must exist.
    pub config_file: Option<PathBuf>,
    pub store_path: Option<PathBuf>,
}

impl CompPermConfig {
    /// Load configuration from all sources, applying precedence rules.
    ///
    /// Precedence (highest to lowest):
    /// 1. CLI flags
    /// 2. Environment variables (`COMPPERM_*`)
    /// 3. Project config (`./.compperm.toml`, or `--config`)
    /// 4. Global config (`~/.compperm/config.toml`)
    /// 5. Defaults
    pub fn load(overrides: CliOverrides) -> Result<Self, ConfigError> {
        let config_dir = config_dir();
        let global = load_settings_file(&config_dir.join("config.toml"))?.unwrap_or_default();
        let project = match &overrides.config_file {
            Some(path) => load_settings_file(path)?.ok_or_else(|| ConfigError::Parse {
                path: path.display().to_string(),
                message: "file not found".into(),
            })?,
            None => load_settings_file(Path::new(PROJECT_CONFIG_FILE))?.unwrap_or_default(),
        };
        let env = env_settings(|key| std::env::var(key).ok());

        let mut config = resolve(global.overlay(project).overlay(env), config_dir)?;
        if overrides.store_path.is_some() {
            config.store_path = overrides.store_path;
        }
        Ok(config)
    }
}

/// Turn merged settings into a validated configuration.
pub fn resolve(settings: SettingsFile, config_dir: PathBuf) -> Result<CompPermConfig, ConfigError> {
    let s = settings.component_permissions;
    let activation = s.activation.unwrap_or_default();

    if let ActivationPolicy::Components { components } = &activation {
        if components.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "component_permissions.activation.components".into(),
                message: "at least one component is required in 'components' mode".into(),
            });
        }
    }

    let policy = PolicyConfig {
        activation,
        allow_owner: s.allow_owner.unwrap_or(false),
        allow_reporter: s.allow_reporter.unwrap_or(false),
        allow_cc: s.allow_cc.unwrap_or(false),
        allow_cc_email: s.allow_cc_email.unwrap_or(false),
        hide_components: s.hide_components.unwrap_or(false),
    };

    if policy.hide_components && !policy.activation.is_global() {
        tracing::warn!(
            "hide_components has no effect with '{}' activation; use mode = \"always\"",
            policy.activation.as_str()
        );
    }

    Ok(CompPermConfig {
        policy,
        store_path: settings.store.path,
        config_dir,
    })
}

/// Settings taken from `COMPPERM_*` environment variables.
pub fn env_settings(var: impl Fn(&str) -> Option<String>) -> SettingsFile {
    let flag = |key: &str| var(key).map(|v| as_bool(&v));
    SettingsFile {
        component_permissions: PolicySettings {
            activation: var("COMPPERM_ACTIVATION_FIELD")
                .map(|field| ActivationPolicy::Field { field }),
            allow_owner: flag("COMPPERM_ALLOW_OWNER"),
            allow_reporter: flag("COMPPERM_ALLOW_REPORTER"),
            allow_cc: flag("COMPPERM_ALLOW_CC"),
            allow_cc_email: flag("COMPPERM_ALLOW_CC_EMAIL"),
            hide_components: flag("COMPPERM_HIDE_COMPONENTS"),
        },
        store: StoreSettings {
            path: var("COMPPERM_STORE").map(PathBuf::from),
        },
    }
}

/// Get the compperm config directory path (~/.compperm/).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("COMPPERM_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".compperm")
}

/// Load and parse a TOML settings file. A missing file is `Ok(None)`.
fn load_settings_file(path: &Path) -> Result<Option<SettingsFile>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            });
        }
    };
    tracing::debug!("Loaded settings from {}", path.display());
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}
