use std::path::PathBuf;

use review_core::markup::SubstitutionMode;

use crate::error::AppError;

const DEFAULT_TERMS_PATH: &str = "sensitive_words.csv";

/// Application configuration loaded explicitly from environment variables.
///
/// A missing or unreadable term table is not a config error: the server starts
/// with an empty index and reports the load failure instead.
#[derive(Debug, Clone)]
pub struct Config {
    /// CSV term table with `category` and `word` columns.
    pub terms_path: PathBuf,
    /// How highlight and rewrite apply substitutions.
    pub substitution: SubstitutionMode,
    /// Always pick the first replacement candidate instead of a random one.
    pub deterministic: bool,
    /// Serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Optional:
    /// - `CONTENT_REVIEW_TERMS_PATH` (default: "sensitive_words.csv")
    /// - `CONTENT_REVIEW_SUBSTITUTION`: "sequential" (default) or "single-pass"
    /// - `CONTENT_REVIEW_DETERMINISTIC`: "1"/"true" to disable random suggestions
    /// - `MCP_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let terms_path = lookup("CONTENT_REVIEW_TERMS_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TERMS_PATH.to_string());

        let substitution = match lookup("CONTENT_REVIEW_SUBSTITUTION") {
            Some(raw) => raw.parse::<SubstitutionMode>().map_err(AppError::Config)?,
            None => SubstitutionMode::default(),
        };

        let deterministic = match lookup("CONTENT_REVIEW_DETERMINISTIC") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Config(format!(
                    "CONTENT_REVIEW_DETERMINISTIC must be a boolean, got '{raw}'"
                ))
            })?,
            None => false,
        };

        Ok(Self {
            terms_path: PathBuf::from(terms_path),
            substitution,
            deterministic,
            tcp_listen_addr: lookup("MCP_TCP_LISTEN_ADDR"),
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.terms_path, PathBuf::from("sensitive_words.csv"));
        assert_eq!(config.substitution, SubstitutionMode::Sequential);
        assert!(!config.deterministic);
        assert!(config.tcp_listen_addr.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let config = config(&[
            ("CONTENT_REVIEW_TERMS_PATH", "/data/terms.csv"),
            ("CONTENT_REVIEW_SUBSTITUTION", "single-pass"),
            ("CONTENT_REVIEW_DETERMINISTIC", "TRUE"),
            ("MCP_TCP_LISTEN_ADDR", "127.0.0.1:7010"),
        ])
        .unwrap();
        assert_eq!(config.terms_path, PathBuf::from("/data/terms.csv"));
        assert_eq!(config.substitution, SubstitutionMode::SinglePass);
        assert!(config.deterministic);
        assert_eq!(config.tcp_listen_addr.as_deref(), Some("127.0.0.1:7010"));
    }

    #[test]
    fn rejects_bad_values() {
        let err = config(&[("CONTENT_REVIEW_SUBSTITUTION", "fuzzy")]).unwrap_err();
        assert!(err.to_string().contains("unknown substitution mode 'fuzzy'"));

        let err = config(&[("CONTENT_REVIEW_DETERMINISTIC", "maybe")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
