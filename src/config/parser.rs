use std::path::Path;
use crate::errors::PortalError;
use super::types::PortalConfig;
use super::security::validate_security_patterns;
use tracing::{debug, warn};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "SCANPORTAL_API_URL";

pub async fn parse_config(path: &Path) -> Result<PortalConfig, PortalError> {
    if !path.exists() {
        return Err(PortalError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(PortalError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    validate_security_patterns(&yaml)?;

    // An empty file parses to Null; treat it as all defaults.
    let config: PortalConfig = if yaml.is_null() {
        PortalConfig::default()
    } else {
        serde_yaml::from_value(yaml)?
    };

    validate_semantics(&config)?;

    Ok(config)
}

/// Resolve the effective config: file (or defaults), then the environment,
/// then an explicit CLI override.
pub async fn load_config(
    path: Option<&Path>,
    api_url_override: Option<&str>,
) -> Result<PortalConfig, PortalError> {
    let config = match path {
        Some(p) => parse_config(p).await?,
        None => PortalConfig::default(),
    };
    let config = apply_overrides(config, std::env::var(API_URL_ENV).ok(), api_url_override);
    validate_semantics(&config)?;
    debug!(base_url = %config.api.base_url, session = %config.session.path.display(), "Configuration loaded");
    Ok(config)
}

fn apply_overrides(
    mut config: PortalConfig,
    env_url: Option<String>,
    cli_url: Option<&str>,
) -> PortalConfig {
    if let Some(url) = env_url.filter(|u| !u.is_empty()) {
        debug!(var = API_URL_ENV, "API URL taken from environment");
        config.api.base_url = url;
    }
    if let Some(url) = cli_url {
        config.api.base_url = url.to_string();
    }
    config
}

/// Reject values the flows cannot run with.
fn validate_semantics(config: &PortalConfig) -> Result<(), PortalError> {
    let base = config.api.base_url.as_str();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(PortalError::Config(format!(
            "api.base_url must be an http(s) URL, got '{}'",
            base
        )));
    }

    if config.session.ttl_days == 0 {
        return Err(PortalError::Config("session.ttl_days must be at least 1".into()));
    }

    let progress = &config.progress;
    if progress.step == 0 {
        return Err(PortalError::Config("progress.step must be greater than 0".into()));
    }
    if progress.ceiling >= 100 {
        return Err(PortalError::Config(format!(
            "progress.ceiling must stay below 100, got {}",
            progress.ceiling
        )));
    }
    if progress.tick_ms == 0 {
        return Err(PortalError::Config("progress.tick_ms must be greater than 0".into()));
    }
    if progress.step > progress.ceiling {
        warn!(step = progress.step, ceiling = progress.ceiling, "Progress step exceeds ceiling; bar will jump straight to the ceiling");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let err = parse_config(Path::new("/nonexistent/scanportal.yaml")).await.unwrap_err();
        assert!(matches!(err, PortalError::Config(_)));
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let file = write_config("api:\n  base_url: https://scanner.internal\n");
        let config = parse_config(file.path()).await.unwrap();
        assert_eq!(config.api.base_url, "https://scanner.internal");
        assert_eq!(config.session.ttl_days, 1);
        assert_eq!(config.navigation.landing, "/userhome");
        assert_eq!(config.progress.ceiling, 90);
    }

    #[tokio::test]
    async fn test_empty_file_is_all_defaults() {
        let file = write_config("");
        let config = parse_config(file.path()).await.unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_progress_section_parsed() {
        let file = write_config("progress:\n  tick_ms: 50\n  step: 5\n  ceiling: 80\n  completion_hold_ms: 0\n");
        let config = parse_config(file.path()).await.unwrap();
        assert_eq!(config.progress.tick_ms, 50);
        assert_eq!(config.progress.step, 5);
        assert_eq!(config.progress.ceiling, 80);
        assert_eq!(config.progress.completion_hold_ms, 0);
    }

    #[tokio::test]
    async fn test_ceiling_at_full_rejected() {
        let file = write_config("progress:\n  ceiling: 100\n");
        let err = parse_config(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("ceiling"));
    }

    #[tokio::test]
    async fn test_dangerous_pattern_rejected() {
        let file = write_config("api:\n  base_url: 'javascript:alert(1)'\n");
        assert!(parse_config(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_file_and_override_agree_on_base_url() {
        for url in ["http://bigdata:5000", "http://profile:8080"] {
            let file = write_config(&format!("api:\n  base_url: {}\n", url));
            let from_file = parse_config(file.path()).await.unwrap();
            assert_eq!(from_file.api.base_url, url);

            let overridden = apply_overrides(PortalConfig::default(), None, Some(url));
            assert!(validate_semantics(&overridden).is_ok());
        }
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let mut config = PortalConfig::default();
        config.api.base_url = "ftp://example.com".into();
        assert!(validate_semantics(&config).is_err());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = PortalConfig::default();
        config.session.ttl_days = 0;
        assert!(validate_semantics(&config).is_err());
    }

    #[test]
    fn test_zero_step_rejected() {
        let mut config = PortalConfig::default();
        config.progress.step = 0;
        assert!(validate_semantics(&config).is_err());
    }

    #[test]
    fn test_cli_override_beats_environment() {
        let config = apply_overrides(
            PortalConfig::default(),
            Some("http://from-env:5000".into()),
            Some("http://from-cli:5000"),
        );
        assert_eq!(config.api.base_url, "http://from-cli:5000");
    }

    #[test]
    fn test_environment_beats_file() {
        let config = apply_overrides(PortalConfig::default(), Some("http://from-env:5000".into()), None);
        assert_eq!(config.api.base_url, "http://from-env:5000");
    }

    #[test]
    fn test_empty_environment_ignored() {
        let config = apply_overrides(PortalConfig::default(), Some(String::new()), None);
        assert_eq!(config.api.base_url, "http://localhost:5000");
    }
}
