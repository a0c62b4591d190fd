use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

const DEFAULT_CONFIG: &str = include_str!("../install-driver.toml");
pub const CONFIG_PATH: &str = "install-driver.toml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub paths: Paths,
    pub java: Java,
    pub logging: Logging,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    /// Reads `path` if it exists, otherwise falls back to the built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !std::fs::exists(path)? {
            return Self::builtin();
        }
        let config_str =
            read_to_string(path).with_context(|| format!("Unable to read {}", path.display()))?;
        toml::from_str(&config_str).with_context(|| format!("Invalid {}", path.display()))
    }

    pub fn builtin() -> Result<Self> {
        toml::from_str(DEFAULT_CONFIG).context("Invalid built-in config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Paths {
    /// Directory the installer list and every installer path are relative to.
    pub data_dir: PathBuf,
    pub config_file: PathBuf,
}

impl Paths {
    pub fn install_list(&self) -> PathBuf {
        self.data_dir.join(&self.config_file)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Java {
    pub launcher: String,
    pub registry_key: String,
    pub version_value: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Logging {
    pub level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_fixed_locations() {
        let config = Config::builtin().unwrap();
        assert_eq!(config.paths.install_list(), Path::new("data").join("config.ini"));
        assert_eq!(config.java.launcher, common::JAVA_LAUNCHER);
        assert_eq!(config.java.registry_key, common::JAVA_RUNTIME_KEY);
        assert_eq!(config.java.version_value, common::JAVA_VERSION_VALUE);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn missing_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.paths.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn file_overrides_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_PATH);
        std::fs::write(
            &path,
            r#"
[paths]
data_dir = "payload"
config_file = "list.txt"

[java]
launcher = "java"
registry_key = 'SOFTWARE\JavaSoft\JRE'
version_value = "CurrentVersion"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.paths.install_list(), Path::new("payload").join("list.txt"));
        assert_eq!(config.java.launcher, "java");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_PATH);
        std::fs::write(&path, DEFAULT_CONFIG.replace("[logging]\n", "[logging]\ncolour = true\n")).unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
