use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MOVIES_FILE: &str = "movies.json";
const DEFAULT_PAGES_FILE: &str = "pages.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub movies_file: PathBuf,
    pub pages_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            movies_file: PathBuf::from(DEFAULT_MOVIES_FILE),
            pages_file: PathBuf::from(DEFAULT_PAGES_FILE),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", raw))?,
            None => defaults.port,
        };

        Ok(Self {
            port,
            movies_file: get("MOVIES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.movies_file),
            pages_file: get("PAGES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.pages_file),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_defaults_when_unset() {
        let cfg = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.movies_file, PathBuf::from("movies.json"));
        assert_eq!(cfg.pages_file, PathBuf::from("pages.json"));
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("MOVIES_FILE", "/data/movies.json"),
            ("PAGES_FILE", "/data/pages.json"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.movies_file, PathBuf::from("/data/movies.json"));
        assert_eq!(cfg.pages_file, PathBuf::from("/data/pages.json"));
    }

    #[test]
    fn empty_values_are_treated_as_unset() {
        let cfg = Config::from_lookup(lookup_from(&[("PORT", " "), ("PAGES_FILE", "")])).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
