//! Configuration module
//!
//! Configuration is read once at startup (environment variables, with `.env` support)
//! into an explicit `Config` value that is handed to the application state. Nothing in
//! the upload pipeline reads process-wide settings on its own.

use std::env;
use std::path::PathBuf;

use crate::models::{SlotStrategy, UploadMode};

// Common constants
const PORT: u16 = 8090;
const BASE_URL: &str = "http://127.0.0.1:8090";
const STORAGE_DIRECTORY: &str = "download/";
const VIRTUAL_DIRECTORY: &str = "/download";
const MAX_SIZE_IN_MB: usize = 10;
const SLOT_NAME_LENGTH: usize = 7;
const MAX_SLOT_NAME_LENGTH: usize = 32;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const SHUTDOWN_GRACE_SECS: u64 = 5;
const LOG_FILE: &str = "logs/mediadrop.log";
const LOG_MAX_FILES: usize = 7;

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
    pub shutdown_grace_secs: u64,
}

/// Where log lines go
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
}

/// Rotation period of the log file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogRotation {
    Minutely,
    Hourly,
    Daily,
    Never,
}

/// Logging configuration
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub output: LogOutput,
    pub file_path: PathBuf,
    pub json: bool,
    pub rotation: LogRotation,
    pub max_files: usize,
}

impl LoggingConfig {
    pub fn writes_console(&self) -> bool {
        matches!(self.output, LogOutput::Console | LogOutput::Both)
    }

    pub fn writes_file(&self) -> bool {
        matches!(self.output, LogOutput::File | LogOutput::Both)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            output: LogOutput::Console,
            file_path: PathBuf::from(LOG_FILE),
            json: false,
            rotation: LogRotation::Daily,
            max_files: LOG_MAX_FILES,
        }
    }
}

/// Upload endpoint configuration
#[derive(Clone, Debug)]
pub struct UploadServerConfig {
    pub base: BaseConfig,
    pub logging: LoggingConfig,
    /// Public base URL, without trailing slash
    pub base_url: String,
    /// Storage root on disk
    pub directory: PathBuf,
    /// Public mount prefix, always starting with `/` and without trailing slash
    pub virtual_directory: String,
    pub max_size_bytes: usize,
    /// Accepted MIME types, compared case-sensitively
    pub accepted_file_types: Vec<String>,
    pub upload_mode: UploadMode,
    pub slot_strategy: SlotStrategy,
    pub slot_name_length: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<UploadServerConfig>);

impl Config {
    fn as_upload(&self) -> &UploadServerConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_environment(&self.as_upload().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = UploadServerConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_upload().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_upload().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_upload().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_upload().base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_upload().base.http_concurrency_limit
    }

    pub fn shutdown_grace_secs(&self) -> u64 {
        self.as_upload().base.shutdown_grace_secs
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.as_upload().logging
    }

    pub fn base_url(&self) -> &str {
        &self.as_upload().base_url
    }

    pub fn directory(&self) -> &std::path::Path {
        &self.as_upload().directory
    }

    pub fn virtual_directory(&self) -> &str {
        &self.as_upload().virtual_directory
    }

    pub fn max_size_bytes(&self) -> usize {
        self.as_upload().max_size_bytes
    }

    pub fn accepted_file_types(&self) -> &[String] {
        &self.as_upload().accepted_file_types
    }

    pub fn upload_mode(&self) -> UploadMode {
        self.as_upload().upload_mode
    }

    pub fn slot_strategy(&self) -> SlotStrategy {
        self.as_upload().slot_strategy
    }

    pub fn slot_name_length(&self) -> usize {
        self.as_upload().slot_name_length
    }
}

fn is_production_environment(environment: &str) -> bool {
    matches!(
        environment.to_lowercase().as_str(),
        "production" | "prod" | "release"
    )
}

/// Rewrite the public mount prefix as `/segment[/segment...]`.
pub fn normalize_virtual_directory(raw: &str) -> String {
    format!("/{}", raw.trim().trim_matches('/'))
}

/// Strip trailing slashes from the public base URL.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Split a comma-separated list, dropping blanks. Case is preserved.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl UploadServerConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = var("CORS_ORIGINS", "*");
        if is_production_environment(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let base = BaseConfig {
            server_port: var("PORT", &PORT.to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins: parse_list(&cors_origins_str),
            environment,
            http_concurrency_limit: var("HTTP_CONCURRENCY_LIMIT", "")
                .parse::<usize>()
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            shutdown_grace_secs: var("SHUTDOWN_GRACE_SECS", "")
                .parse()
                .unwrap_or(SHUTDOWN_GRACE_SECS),
        };

        let logging = LoggingConfig {
            output: match var("LOG_OUTPUT", "console").to_lowercase().as_str() {
                "console" => LogOutput::Console,
                "file" => LogOutput::File,
                "both" => LogOutput::Both,
                other => return Err(anyhow::anyhow!("Invalid LOG_OUTPUT: {}", other)),
            },
            file_path: PathBuf::from(var("LOG_FILE", LOG_FILE)),
            json: var("LOG_FORMAT", "text").eq_ignore_ascii_case("json"),
            rotation: match var("LOG_ROTATION", "daily").to_lowercase().as_str() {
                "minutely" => LogRotation::Minutely,
                "hourly" => LogRotation::Hourly,
                "daily" => LogRotation::Daily,
                "never" => LogRotation::Never,
                other => return Err(anyhow::anyhow!("Invalid LOG_ROTATION: {}", other)),
            },
            max_files: var("LOG_MAX_FILES", "")
                .parse()
                .unwrap_or(LOG_MAX_FILES),
        };

        let max_size_in_mb = var("MAX_SIZE_IN_MB", "")
            .parse::<usize>()
            .unwrap_or(MAX_SIZE_IN_MB);

        let config = UploadServerConfig {
            base,
            logging,
            base_url: normalize_base_url(&var("BASE_URL", BASE_URL)),
            directory: PathBuf::from(var("STORAGE_DIRECTORY", STORAGE_DIRECTORY)),
            virtual_directory: normalize_virtual_directory(&var(
                "VIRTUAL_DIRECTORY",
                VIRTUAL_DIRECTORY,
            )),
            max_size_bytes: max_size_in_mb
                .checked_mul(1024 * 1024)
                .ok_or_else(|| anyhow::anyhow!("MAX_SIZE_IN_MB is too large: {}", max_size_in_mb))?,
            accepted_file_types: parse_list(&var("ACCEPTED_FILE_TYPES", "")),
            upload_mode: var("UPLOAD_MODE", "batch").parse()?,
            slot_strategy: var("SLOT_STRATEGY", "per-file").parse()?,
            slot_name_length: var("SLOT_NAME_LENGTH", "")
                .parse()
                .unwrap_or(SLOT_NAME_LENGTH),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| {
                anyhow::anyhow!("BASE_URL is not a valid URL ({}): {}", self.base_url, e)
            })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!("BASE_URL must use http or https"));
        }

        if self.max_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_SIZE_IN_MB must be greater than 0"));
        }

        if self.slot_name_length == 0 || self.slot_name_length > MAX_SLOT_NAME_LENGTH {
            return Err(anyhow::anyhow!(
                "SLOT_NAME_LENGTH must be between 1 and {}",
                MAX_SLOT_NAME_LENGTH
            ));
        }

        if self.directory.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("STORAGE_DIRECTORY must not be empty"));
        }

        if self.logging.writes_file() && self.logging.file_path.file_name().is_none() {
            return Err(anyhow::anyhow!("LOG_FILE must name a file"));
        }

        if self.accepted_file_types.is_empty() {
            tracing::warn!("ACCEPTED_FILE_TYPES is empty - every upload will be rejected");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<UploadServerConfig, anyhow::Error> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        UploadServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = load(&[]).unwrap();
        assert_eq!(config.base.server_port, 8090);
        assert_eq!(config.base_url, "http://127.0.0.1:8090");
        assert_eq!(config.directory, PathBuf::from("download/"));
        assert_eq!(config.virtual_directory, "/download");
        assert_eq!(config.max_size_bytes, 10 * 1024 * 1024);
        assert!(config.accepted_file_types.is_empty());
        assert_eq!(config.upload_mode, UploadMode::Batch);
        assert_eq!(config.slot_strategy, SlotStrategy::PerFile);
        assert_eq!(config.slot_name_length, 7);
        assert_eq!(config.base.shutdown_grace_secs, 5);
        assert_eq!(config.logging.output, LogOutput::Console);
    }

    #[test]
    fn normalizes_paths_and_urls() {
        let config = load(&[
            ("BASE_URL", "https://cdn.example.com/"),
            ("VIRTUAL_DIRECTORY", "files/public/"),
        ])
        .unwrap();
        assert_eq!(config.base_url, "https://cdn.example.com");
        assert_eq!(config.virtual_directory, "/files/public");

        assert_eq!(normalize_virtual_directory("//"), "/");
        assert_eq!(normalize_virtual_directory("/download"), "/download");
    }

    #[test]
    fn accepted_types_keep_their_case() {
        let config = load(&[("ACCEPTED_FILE_TYPES", "image/png, image/JPEG,,")]).unwrap();
        assert_eq!(config.accepted_file_types, vec!["image/png", "image/JPEG"]);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("BASE_URL", "not a url")]).is_err());
        assert!(load(&[("BASE_URL", "ftp://example.com")]).is_err());
        assert!(load(&[("MAX_SIZE_IN_MB", "0")]).is_err());
        assert!(load(&[("SLOT_NAME_LENGTH", "0")]).is_err());
        assert!(load(&[("UPLOAD_MODE", "many")]).is_err());
        assert!(load(&[("LOG_ROTATION", "weekly")]).is_err());
    }

    #[test]
    fn oversized_size_limit_is_an_error() {
        let err = load(&[("MAX_SIZE_IN_MB", "18446744073709551615")]).unwrap_err();
        assert!(err.to_string().contains("MAX_SIZE_IN_MB"));
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        assert!(load(&[("ENVIRONMENT", "production")]).is_err());
        let config = load(&[
            ("ENVIRONMENT", "release"),
            ("CORS_ORIGINS", "https://app.example.com"),
        ])
        .unwrap();
        assert!(Config(Box::new(config)).is_production());
    }

    #[test]
    fn unparsable_numbers_fall_back_to_defaults() {
        let config = load(&[("MAX_SIZE_IN_MB", "lots"), ("SHUTDOWN_GRACE_SECS", "-1")]).unwrap();
        assert_eq!(config.max_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config.base.shutdown_grace_secs, 5);
    }
}
