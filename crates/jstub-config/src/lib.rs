//! `jstub.toml` loading plus the process-wide `tracing` setup.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod diagnostics;
mod logging;

pub use diagnostics::{ConfigDiagnostics, ConfigWarning};
pub use logging::{init_tracing, LogBuffer, LoggingConfig};

/// Environment variable that overrides config discovery.
pub const JSTUB_CONFIG_ENV_VAR: &str = "JSTUB_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JstubConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub stubs: StubsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubsConfig {
    /// Emit stubs for nested classes (`Outer$Inner`).
    #[serde(default = "StubsConfig::default_include_nested")]
    pub include_nested: bool,

    /// Glob patterns over internal names (`com/example/internal/**`); matches are skipped.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl StubsConfig {
    fn default_include_nested() -> bool {
        true
    }

    /// Compile the selection rules once for repeated matching.
    pub fn filter(&self) -> Result<StubFilter, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidGlob {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let exclude = builder.build().map_err(|source| ConfigError::InvalidGlob {
            pattern: self.exclude.join(","),
            source,
        })?;
        Ok(StubFilter {
            include_nested: self.include_nested,
            exclude,
        })
    }
}

impl Default for StubsConfig {
    fn default() -> Self {
        Self {
            include_nested: Self::default_include_nested(),
            exclude: Vec::new(),
        }
    }
}

/// Decides which classes get a stub, by internal name.
#[derive(Debug, Clone)]
pub struct StubFilter {
    include_nested: bool,
    exclude: GlobSet,
}

impl StubFilter {
    #[must_use]
    pub fn allows(&self, internal_name: &str) -> bool {
        if !self.include_nested {
            let simple = internal_name.rsplit('/').next().unwrap_or(internal_name);
            if simple.contains('$') {
                return false;
            }
        }
        !self.exclude.is_match(internal_name)
    }
}

impl Default for StubFilter {
    fn default() -> Self {
        Self {
            include_nested: true,
            exclude: GlobSet::empty(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

fn sanitize_toml_error_message(message: &str) -> String {
    // Parse errors end up in logs; keep quoted config values out of them.
    static QUOTED_STRING_RE: OnceLock<regex::Regex> = OnceLock::new();
    static SINGLE_QUOTED_STRING_RE: OnceLock<regex::Regex> = OnceLock::new();

    let re = QUOTED_STRING_RE.get_or_init(|| {
        regex::Regex::new(r#""(?:\\.|[^"\\])*""#).expect("quoted-string regex should compile")
    });
    let out = re.replace_all(message, r#""<redacted>""#);

    let re_single = SINGLE_QUOTED_STRING_RE.get_or_init(|| {
        regex::Regex::new(r#"'(?:\\.|[^'\\])*'"#)
            .expect("single-quoted-string regex should compile")
    });
    re_single.replace_all(&out, "'<redacted>'").into_owned()
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` includes a source snippet; keep only the message.
        ConfigError::Toml(sanitize_toml_error_message(err.message()))
    }
}

impl JstubConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_from_path_with_diagnostics(path).map(|(config, _)| config)
    }

    /// Load a config file and report unknown keys and recoverable problems.
    pub fn load_from_path_with_diagnostics(
        path: impl AsRef<Path>,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str_with_diagnostics(&text)
    }

    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, unknown_keys) =
            diagnostics::deserialize_toml_with_unknown_keys::<JstubConfig>(text)?;

        let mut diagnostics = ConfigDiagnostics {
            unknown_keys,
            ..ConfigDiagnostics::default()
        };

        let level = LoggingConfig::normalize_level_directives(&config.logging.level);
        if tracing_subscriber::EnvFilter::try_new(&level).is_err() {
            diagnostics.warnings.push(ConfigWarning::LoggingLevelInvalid {
                value: config.logging.level.clone(),
            });
        }

        Ok((config, diagnostics))
    }
}

/// Find the config file for a run rooted at `base_dir`.
///
/// Precedence:
/// 1) `JSTUB_CONFIG_PATH` (absolute or relative to `base_dir`)
/// 2) `jstub.toml` in `base_dir`
/// 3) `.jstub.toml` in `base_dir`
pub fn discover_config_path(base_dir: &Path) -> Option<PathBuf> {
    if let Some(value) = std::env::var_os(JSTUB_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            base_dir.join(candidate)
        };
        return Some(path.canonicalize().unwrap_or(path));
    }

    ["jstub.toml", ".jstub.toml"]
        .into_iter()
        .map(|name| base_dir.join(name))
        .find(|path| path.is_file())
        .map(|path| path.canonicalize().unwrap_or(path))
}

/// Load the configuration for `base_dir`, or the defaults when none is present.
pub fn load_for_dir(
    base_dir: &Path,
) -> Result<(JstubConfig, Option<PathBuf>, ConfigDiagnostics), ConfigError> {
    let Some(path) = discover_config_path(base_dir) else {
        return Ok((JstubConfig::default(), None, ConfigDiagnostics::default()));
    };

    let (config, diagnostics) = JstubConfig::load_from_path_with_diagnostics(&path)?;
    Ok((config, Some(path), diagnostics))
}
