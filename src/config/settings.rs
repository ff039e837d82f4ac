use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::filesystem::{DEFAULT_STORAGE_KEY, HOME_DIR};
use crate::storage::is_valid_key;

const SETTINGS_FILE_NAME: &str = "nebula.yaml";
const DEFAULT_PROMPT: &str = "nebula@os";

fn get_settings_file_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE_NAME)
}

/// User settings from `nebula.yaml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Key the filesystem is stored under
    pub storage_key: String,
    /// Starting directory of the terminal
    pub home: String,
    pub prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            home: HOME_DIR.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl Settings {
    /// Reads the settings file under `root`, or the defaults if there is none.
    pub fn read(root: &Path) -> Result<Self, SettingsError> {
        Self::from_path(get_settings_file_path(root))
    }

    pub fn from_path(path: PathBuf) -> Result<Self, SettingsError> {
        debug!("Reading settings file: {}", path.display());
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).context(ReadSnafu {
                    file_path: path.display().to_string(),
                });
            }
        };
        contents.as_str().try_into()
    }

    fn apply(&mut self, key: &str, value: &Yaml) -> Result<(), SettingsError> {
        let slot = match key {
            "storage_key" => &mut self.storage_key,
            "home" => &mut self.home,
            "prompt" => &mut self.prompt,
            other => {
                warn!("Ignoring unknown setting '{}'", other);
                return Ok(());
            }
        };
        *slot = value
            .as_str()
            .context(InvalidValueSnafu { key })?
            .to_string();
        Ok(())
    }
}

impl TryFrom<&str> for Settings {
    type Error = SettingsError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let mut settings = Settings::default();
        let Some(document) = documents.first() else {
            return Ok(settings);
        };

        let top_level = document
            .as_mapping()
            .ok_or(SettingsError::TopLevelNotMap)?;

        for (key, value) in top_level.iter() {
            if let Yaml::Value(Scalar::String(name)) = key {
                settings.apply(name, value)?;
            } else {
                debug!("Skipping non-string settings key: {:?}", key);
            }
        }

        ensure!(
            settings.home.starts_with('/'),
            RelativeHomeSnafu {
                home: settings.home.clone()
            }
        );
        ensure!(!settings.storage_key.is_empty(), EmptyStorageKeySnafu);
        ensure!(
            is_valid_key(&settings.storage_key),
            InvalidStorageKeySnafu {
                key: settings.storage_key.clone()
            }
        );

        Ok(settings)
    }
}

#[derive(Debug, Snafu)]
pub enum SettingsError {
    #[snafu(display("Failed to read the settings file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the settings file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of the settings file should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Setting '{}' should be a string", key))]
    InvalidValue { key: String },
    #[snafu(display("Home directory '{}' must be an absolute path", home))]
    RelativeHome { home: String },
    #[snafu(display("Storage key must not be empty"))]
    EmptyStorageKey,
    #[snafu(display(
        "Storage key '{}' may only hold letters, digits, '-', '_' and '.', and must not start with '.'",
        key
    ))]
    InvalidStorageKey { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use tempfile::TempDir;

    #[test]
    fn settings_default_when_file_is_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let settings = Settings::read(temp_dir.path()).expect("Missing file is not an error");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn settings_read_from_root_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(
            temp_dir.path().join(SETTINGS_FILE_NAME),
            "storage_key: scratch\nhome: /tmp\n",
        )
        .expect("Failed to write settings file");

        let settings = Settings::read(temp_dir.path()).expect("Failed to read settings");

        assert_eq!(settings.storage_key, "scratch");
        assert_eq!(settings.home, "/tmp");
        assert_eq!(settings.prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn settings_return_error_when_file_is_unreadable() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join(SETTINGS_FILE_NAME))
            .expect("Failed to create directory");

        let result = Settings::read(temp_dir.path());
        assert!(matches!(result, Err(SettingsError::ReadError { .. })));
    }

    #[test]
    fn settings_handle_empty_file() {
        let result: Result<Settings, _> = "".try_into();
        assert_eq!(result.expect("Empty file is valid"), Settings::default());
    }

    #[test]
    fn settings_handle_all_keys() {
        let yaml = r#"
storage_key: "my-fs"
home: /home/guest
prompt: "guest@nebula"
"#;
        let settings: Settings = yaml.try_into().expect("Failed to parse settings");
        assert_eq!(
            settings,
            Settings {
                storage_key: "my-fs".to_string(),
                home: "/home/guest".to_string(),
                prompt: "guest@nebula".to_string(),
            }
        );
    }

    #[test]
    fn settings_ignore_unknown_keys() {
        let settings: Settings = "theme: retro\nprompt: me".try_into().expect("Failed to parse");
        assert_eq!(settings.prompt, "me");
        assert_eq!(settings.home, HOME_DIR);
    }

    #[test]
    fn settings_return_error_on_invalid_yaml() {
        let result: Result<Settings, _> = "invalid: yaml: content: [unclosed".try_into();
        assert!(matches!(result, Err(SettingsError::ParseError { .. })));
    }

    #[rstest]
    #[case("- item1\n- item2")]
    #[case("just a string")]
    fn settings_return_error_when_top_level_is_not_map(#[case] yaml: &str) {
        let result: Result<Settings, _> = yaml.try_into();
        assert!(matches!(result, Err(SettingsError::TopLevelNotMap)));
    }

    #[rstest]
    #[case("home: [a, b]", "home")]
    #[case("prompt: 42", "prompt")]
    #[case("storage_key: {nested: map}", "storage_key")]
    fn settings_return_error_on_non_string_value(#[case] yaml: &str, #[case] expected: &str) {
        let result: Result<Settings, _> = yaml.try_into();
        match result {
            Err(SettingsError::InvalidValue { key }) => assert_eq!(key, expected),
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn settings_return_error_on_relative_home() {
        let result: Result<Settings, _> = "home: user".try_into();
        assert!(matches!(result, Err(SettingsError::RelativeHome { .. })));
    }

    #[test]
    fn settings_return_error_on_empty_storage_key() {
        let result: Result<Settings, _> = "storage_key: ''".try_into();
        assert!(matches!(result, Err(SettingsError::EmptyStorageKey)));
    }

    #[rstest]
    #[case("storage_key: my fs")]
    #[case("storage_key: .hidden")]
    #[case("storage_key: ../escape")]
    #[case("storage_key: a/b")]
    fn settings_return_error_on_unusable_storage_key(#[case] yaml: &str) {
        let result: Result<Settings, _> = yaml.try_into();
        assert!(matches!(result, Err(SettingsError::InvalidStorageKey { .. })));
    }
}
