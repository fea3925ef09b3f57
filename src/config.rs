//! Settings shared by the proxies and the `cmakegen` command.
//!
//! Each value is taken from its environment variable first, then from an
//! optional `cmakegen.toml` in the working directory, then the default:
//!
//! ```toml
//! [log]
//! path = ".cmakegen_log.jsonl"
//!
//! [proxy]
//! cc = "gcc"
//! cxx = "g++"
//! verbose = false
//!
//! [generate]
//! cmake_minimum = "3.10"
//! ```

use crate::store::DEFAULT_LOG_PATH;
use crate::synth::RenderOptions;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "cmakegen.toml";

pub const LOG_ENV: &str = "CMAKEGEN_LOG";
pub const CC_ENV: &str = "CMAKEGEN_CC";
pub const CXX_ENV: &str = "CMAKEGEN_CXX";
pub const VERBOSE_ENV: &str = "CMAKEGEN_VERBOSE";

pub const DEFAULT_CC: &str = "cc";
pub const DEFAULT_CXX: &str = "c++";

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub log: LogConfig,
    pub proxy: ProxyConfig,
    pub generate: GenerateConfig,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct LogConfig {
    pub path: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ProxyConfig {
    pub cc: Option<String>,
    pub cxx: Option<String>,
    pub verbose: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct GenerateConfig {
    pub cmake_minimum: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_path: PathBuf,
    pub cc: String,
    pub cxx: String,
    pub verbose: bool,
    pub render: RenderOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(ConfigFile::default(), |_| None)
    }
}

impl Settings {
    /// Load from the process environment and `./cmakegen.toml`.
    pub fn load() -> Result<Self> {
        let file = load_config_file(Path::new(CONFIG_FILE))?.unwrap_or_default();
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed config file with an environment lookup.
    pub fn resolve(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let log_path = non_empty(LOG_ENV)
            .or(file.log.path)
            .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string());
        let cc = non_empty(CC_ENV)
            .or(file.proxy.cc)
            .unwrap_or_else(|| DEFAULT_CC.to_string());
        let cxx = non_empty(CXX_ENV)
            .or(file.proxy.cxx)
            .unwrap_or_else(|| DEFAULT_CXX.to_string());
        let verbose = non_empty(VERBOSE_ENV)
            .map(|v| is_truthy(&v))
            .or(file.proxy.verbose)
            .unwrap_or(false);

        let mut render = RenderOptions::default();
        if let Some(min) = file.generate.cmake_minimum {
            render.cmake_minimum = min;
        }

        Settings {
            log_path: PathBuf::from(log_path),
            cc,
            cxx,
            verbose,
            render,
        }
    }
}

/// Parse a config file. A missing file is `Ok(None)`.
pub fn load_config_file(path: &Path) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content).with_context(|| {
        format!(
            "Failed to parse {} - check for syntax errors (missing quotes, brackets)",
            path.display()
        )
    })?;
    Ok(Some(config))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.log_path, PathBuf::from(".cmakegen_log.jsonl"));
        assert_eq!(s.cc, "cc");
        assert_eq!(s.cxx, "c++");
        assert!(!s.verbose);
        assert_eq!(s.render.cmake_minimum, "3.10");
    }

    #[test]
    fn test_file_values() {
        let file: ConfigFile = toml::from_str(
            r#"
[log]
path = "build/log.jsonl"

[proxy]
cc = "clang"
cxx = "clang++"
verbose = true

[generate]
cmake_minimum = "3.20"
"#,
        )
        .unwrap();
        let s = Settings::resolve(file, |_| None);
        assert_eq!(s.log_path, PathBuf::from("build/log.jsonl"));
        assert_eq!(s.cc, "clang");
        assert_eq!(s.cxx, "clang++");
        assert!(s.verbose);
        assert_eq!(s.render.cmake_minimum, "3.20");
    }

    #[test]
    fn test_env_overrides_file() {
        let file: ConfigFile = toml::from_str("[proxy]\ncc = \"clang\"\nverbose = true\n").unwrap();
        let env = env_from(&[
            (CC_ENV, "gcc-13"),
            (LOG_ENV, "/tmp/x.jsonl"),
            (VERBOSE_ENV, "0"),
        ]);
        let s = Settings::resolve(file, env);
        assert_eq!(s.cc, "gcc-13");
        assert_eq!(s.cxx, "c++");
        assert_eq!(s.log_path, PathBuf::from("/tmp/x.jsonl"));
        assert!(!s.verbose);
    }

    #[test]
    fn test_empty_env_ignored() {
        let s = Settings::resolve(ConfigFile::default(), env_from(&[(CXX_ENV, "  ")]));
        assert_eq!(s.cxx, "c++");
    }

    #[test]
    fn test_partial_file() {
        let file: ConfigFile = toml::from_str("[generate]\ncmake_minimum = \"3.16\"\n").unwrap();
        let s = Settings::resolve(file, |_| None);
        assert_eq!(s.render.cmake_minimum, "3.16");
        assert_eq!(s.cc, "cc");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_file(&dir.path().join(CONFIG_FILE)).unwrap().is_none());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[proxy\ncc = ").unwrap();
        let err = load_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_truthy() {
        assert!(is_truthy("1"));
        assert!(is_truthy("TRUE"));
        assert!(!is_truthy("no"));
    }
}
