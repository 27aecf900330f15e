use crate::error::{AppResult, ConfigErrorKind, InfraError};
use crate::store::CorruptRecordPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TCP_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_PROFILES_DIR: &str = "./data/profiles";
const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_tcp_addr")]
    pub tcp_addr: String, // e.g. "0.0.0.0:4000"
    #[serde(default = "default_profiles_dir")]
    pub profiles_dir: PathBuf, // one <user>.json per player
    #[serde(default)]
    pub corrupt_records: CorruptRecordPolicy,
}

fn default_tcp_addr() -> String {
    DEFAULT_TCP_ADDR.to_string()
}

fn default_profiles_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PROFILES_DIR)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tcp_addr: default_tcp_addr(),
            profiles_dir: default_profiles_dir(),
            corrupt_records: CorruptRecordPolicy::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let cfg_err = |source| InfraError::Config {
            path: path.to_path_buf(),
            source,
        };

        let data = std::fs::read_to_string(path).map_err(|e| cfg_err(ConfigErrorKind::Read(e)))?;
        toml::from_str(&data).map_err(|e| cfg_err(ConfigErrorKind::Parse(e)))
    }

    /// Reads `.env`, then either the TOML file named by `CONFIG_FILE` or the individual
    /// environment variables.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        if let Some(path) = get(CONFIG_FILE_ENV) {
            return Self::load(path);
        }

        let corrupt_records = match get("CORRUPT_RECORDS") {
            Some(v) => v.parse().map_err(|e| InfraError::Config {
                path: PathBuf::from(".env"),
                source: ConfigErrorKind::InvalidEnv("CORRUPT_RECORDS".into(), e),
            })?,
            None => CorruptRecordPolicy::default(),
        };

        let cfg = Self {
            tcp_addr: get("TCP_ADDR").unwrap_or_else(default_tcp_addr),
            profiles_dir: get("PROFILES_DIR").map(PathBuf::from).unwrap_or_else(default_profiles_dir),
            corrupt_records,
        };

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn env_defaults() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.tcp_addr, DEFAULT_TCP_ADDR);
        assert_eq!(cfg.profiles_dir, PathBuf::from(DEFAULT_PROFILES_DIR));
        assert_eq!(cfg.corrupt_records, CorruptRecordPolicy::Degrade);
    }

    #[test]
    fn env_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("TCP_ADDR", "127.0.0.1:5000"),
            ("PROFILES_DIR", "/srv/profiles"),
            ("CORRUPT_RECORDS", "surface"),
        ]))
        .unwrap();
        assert_eq!(cfg.tcp_addr, "127.0.0.1:5000");
        assert_eq!(cfg.profiles_dir, PathBuf::from("/srv/profiles"));
        assert_eq!(cfg.corrupt_records, CorruptRecordPolicy::Surface);
    }

    #[test]
    fn env_rejects_bad_policy() {
        let err = Config::from_lookup(lookup(&[("CORRUPT_RECORDS", "ignore")])).unwrap_err();
        assert!(matches!(
            err,
            InfraError::Config { source: ConfigErrorKind::InvalidEnv(..), .. }
        ));
    }

    #[test]
    fn load_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.toml");
        std::fs::write(&path, "tcp_addr = \"127.0.0.1:4100\"\ncorrupt_records = \"surface\"\n").unwrap();

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.tcp_addr, "127.0.0.1:4100");
        assert_eq!(cfg.profiles_dir, PathBuf::from(DEFAULT_PROFILES_DIR));
        assert_eq!(cfg.corrupt_records, CorruptRecordPolicy::Surface);
    }

    #[test]
    fn load_reports_bad_toml_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "corrupt_records = \"sometimes\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(
            err,
            InfraError::Config { source: ConfigErrorKind::Parse(_), path: ref p } if *p == path
        ));

        let err = Config::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, InfraError::Config { source: ConfigErrorKind::Read(_), .. }));
    }

    #[test]
    fn config_file_env_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.toml");
        std::fs::write(&path, "profiles_dir = \"/srv/from-file\"\n").unwrap();

        let cfg = Config::from_lookup(lookup(&[
            ("CONFIG_FILE", path.to_str().unwrap()),
            ("PROFILES_DIR", "/srv/from-env"),
        ]))
        .unwrap();
        assert_eq!(cfg.profiles_dir, PathBuf::from("/srv/from-file"));
    }

    #[test]
    fn toml_with_partial_fields() {
        let cfg: Config = toml::from_str(
            r#"
            profiles_dir = "plugins/profiles"
            corrupt_records = "surface"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.tcp_addr, DEFAULT_TCP_ADDR);
        assert_eq!(cfg.profiles_dir, PathBuf::from("plugins/profiles"));
        assert_eq!(cfg.corrupt_records, CorruptRecordPolicy::Surface);
    }
}
