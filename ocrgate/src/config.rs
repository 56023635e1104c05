use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

pub const DEFAULT_LANGUAGE: &str = "ch";
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024; // 25 MB

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for request bodies, uploads included.
    pub max_body_bytes: usize,
}

/// Engine settings, fixed for the lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Language model code. PaddleOCR-style codes (`ch`, `en`, `japan`, ...)
    /// are accepted alongside native Tesseract codes (`chi_sim`, `eng+deu`).
    pub language: String,
    /// Directory holding `*.traineddata`. `None` lets Tesseract use
    /// `TESSDATA_PREFIX` or its compiled-in default.
    pub data_path: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            data_path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("OCR_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("OCR_PORT", 8000),
                max_body_bytes: parse_env_or("OCR_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
            },
            ocr: OcrConfig {
                language: env_non_empty("OCR_LANGUAGE")
                    .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
                data_path: env_non_empty("OCR_DATA_PATH"),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "OCR_HOST",
            "OCR_PORT",
            "OCR_MAX_BODY_BYTES",
            "OCR_LANGUAGE",
            "OCR_DATA_PATH",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env();

        let config = Config::from_env();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.ocr.language, "ch");
        assert!(config.ocr.data_path.is_none());
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        clear_env();
        std::env::set_var("OCR_HOST", "127.0.0.1");
        std::env::set_var("OCR_PORT", "9090");
        std::env::set_var("OCR_LANGUAGE", "en");
        std::env::set_var("OCR_DATA_PATH", "/usr/share/tessdata");

        let config = Config::from_env();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.ocr.language, "en");
        assert_eq!(config.ocr.data_path.as_deref(), Some("/usr/share/tessdata"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back_to_default() {
        clear_env();
        std::env::set_var("OCR_PORT", "not-a-port");

        let config = Config::from_env();
        assert_eq!(config.server.port, 8000);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_language_uses_default() {
        clear_env();
        std::env::set_var("OCR_LANGUAGE", "  ");

        let config = Config::from_env();
        assert_eq!(config.ocr.language, DEFAULT_LANGUAGE);

        clear_env();
    }
}
