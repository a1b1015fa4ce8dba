//! Application-level configuration loading, including the super-team alias
//! table used by the standings aggregation.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "FLAVIUM_BACK_CONFIG_PATH";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    aliases: AliasTable,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in alias table.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        groups = app_config.aliases.len(),
                        "loaded super-team alias table from config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Build a configuration around an explicit alias table.
    pub fn with_aliases(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    /// Alias table consulted when distributing medals.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            aliases: default_aliases(),
        }
    }
}

/// Maps a combined-team entity to the sub-entities that each receive the
/// full medal when it wins or loses. Keys are matched against *normalized*
/// entity tokens; insertion order is preserved so standings tie-breaks stay
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    groups: IndexMap<String, Vec<String>>,
}

impl AliasTable {
    /// Number of configured alias groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no alias groups are configured.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sub-entities registered for the entity, or `None` when it is a plain
    /// single team.
    pub fn sub_entities(&self, entity: &str) -> Option<&[String]> {
        self.groups.get(entity).map(Vec::as_slice)
    }
}

impl<K, V, I> FromIterator<(K, I)> for AliasTable
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = V>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let groups = iter
            .into_iter()
            .map(|(key, subs)| {
                (
                    key.into(),
                    subs.into_iter().map(Into::into).collect::<Vec<_>>(),
                )
            })
            .collect();
        Self { groups }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    super_teams: IndexMap<String, Vec<String>>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            aliases: AliasTable {
                groups: value.super_teams,
            },
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Built-in alias table shipped with the binary: the combined TY girls team
/// fans its medals out to every constituent branch.
fn default_aliases() -> AliasTable {
    AliasTable::from_iter([(
        "TY GIRLS",
        ["TY CS", "TY CE", "TY IT", "TY MBA TECH", "TY AIML"],
    )])
}
