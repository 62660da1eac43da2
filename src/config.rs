use std::{env, path::PathBuf};

use config::ConfigError;
use directories::BaseDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::core::FilterCatalog;
use crate::tui::{KeyBinding, KeyBindings, ThemeName};

const CONFIG: &str = include_str!("../.config/config.json5");

/// Settings as written in a config file; every field may be omitted
#[derive(Clone, Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    filters: Option<FilterCatalog>,
    #[serde(default)]
    theme: Option<ThemeName>,
    #[serde(default)]
    keybindings: Vec<KeyBinding>,
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub filters: FilterCatalog,
    pub theme: ThemeName,
    /// Bindings applied on top of the built-in keymap
    pub keybindings: Vec<KeyBinding>,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    /// Built-in defaults only
    pub fn embedded() -> Result<Self, ConfigError> {
        let defaults = Self::embedded_file()?;
        Ok(Self {
            filters: defaults.filters.unwrap_or_default(),
            theme: defaults.theme.unwrap_or_default(),
            keybindings: defaults.keybindings,
        })
    }

    fn embedded_file() -> Result<ConfigFile, ConfigError> {
        json5::from_str(CONFIG).map_err(|e| ConfigError::Message(format!("embedded config: {e}")))
    }

    /// Load the user config layered over the embedded defaults.
    ///
    /// An explicit path must exist. Without one, `~/.filterbox-config.json5`
    /// (or `config.json5` under `FILTERBOX_CONFIG`) is read when present.
    /// A user `filters` list replaces the built-in catalog as a whole.
    pub fn from_path(config_path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        let defaults = Self::embedded_file()?;
        let builder = config::Config::builder();
        let builder = match config_path {
            Some(p) => builder.add_source(
                config::File::from(expand_tilde(p))
                    .format(config::FileFormat::Json5)
                    .required(true),
            ),
            None => builder.add_source(
                config::File::from(default_user_config_path())
                    .format(config::FileFormat::Json5)
                    .required(false),
            ),
        };

        let user: ConfigFile = builder.build()?.try_deserialize()?;

        let filters = user.filters.or(defaults.filters).unwrap_or_default();
        filters
            .check()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        let mut keybindings = defaults.keybindings;
        keybindings.extend(user.keybindings);

        Ok(Self {
            filters,
            theme: user.theme.or(defaults.theme).unwrap_or_default(),
            keybindings,
        })
    }

    /// Built-in keymap with this config's bindings applied
    pub fn keybindings(&self) -> KeyBindings {
        let mut bindings = KeyBindings::default();
        bindings.apply_overrides(&self.keybindings);
        bindings
    }
}

fn expand_tilde(path: &PathBuf) -> PathBuf {
    if let Some(s) = path.to_str() {
        if s.starts_with('~') {
            if let Some(base) = BaseDirs::new() {
                return PathBuf::from(s.replacen('~', base.home_dir().to_str().unwrap_or(""), 1));
            }
        }
    }
    path.clone()
}

fn default_user_config_path() -> PathBuf {
    if let Some(dir) = CONFIG_FOLDER.clone() {
        return dir.join("config.json5");
    }
    if let Some(base) = BaseDirs::new() {
        return base.home_dir().join(".filterbox-config.json5");
    }
    PathBuf::from(".filterbox-config.json5")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::Action;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(body: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json5");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_embedded_catalog() {
        let c = Config::embedded().unwrap();
        let ids: Vec<&str> = c.filters.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(ids, vec!["status", "priority", "type", "category", "stage"]);
        assert_eq!(c.theme, ThemeName::Dark);
        assert!(c.filters.iter().all(|f| f.has_sub_items()));
    }

    #[test]
    fn test_user_file_overrides_theme_only() {
        let (_dir, path) = write_config(r#"{ theme: "light" }"#);
        let c = Config::from_path(Some(&path)).unwrap();
        assert_eq!(c.theme, ThemeName::Light);
        assert_eq!(c.filters.len(), 5);
    }

    #[test]
    fn test_user_filters_replace_catalog() {
        let (_dir, path) = write_config(
            r#"{
                filters: [
                    { value: "owner", label: "Owner", sub_items: [ { value: "me", label: "Me" } ] },
                ],
            }"#,
        );
        let c = Config::from_path(Some(&path)).unwrap();
        assert_eq!(c.filters.len(), 1);
        assert_eq!(c.filters[0].label, "Owner");
        assert_eq!(c.filters[0].sub_items().len(), 1);
    }

    #[test]
    fn test_duplicate_filter_ids_rejected() {
        let (_dir, path) = write_config(
            r#"{
                filters: [
                    { value: "owner", label: "Owner" },
                    { value: "owner", label: "Owner again" },
                ],
            }"#,
        );
        assert!(Config::from_path(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json5");
        assert!(Config::from_path(Some(&path)).is_err());
    }

    #[test]
    fn test_keybinding_overrides() {
        let (_dir, path) = write_config(r#"{ keybindings: [ { key: "n", action: "OpenFilterMenu" } ] }"#);
        let c = Config::from_path(Some(&path)).unwrap();
        let bindings = c.keybindings();
        let key = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(bindings.get_action(&key), Some(Action::OpenFilterMenu));
        // Defaults stay in place
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(bindings.get_action(&quit), Some(Action::Quit));
    }
}
