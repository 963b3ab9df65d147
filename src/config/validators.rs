//! 启动时配置校验

use url::Url;

use super::{MAX_SESSION_AGE_HOURS, StaticConfig};
use crate::errors::{Result, WebError};

/// Checks that the upstream base URL is an absolute http(s) URL.
pub fn validate_backend_url(base_url: &str) -> Result<()> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(WebError::config("backend.base_url cannot be empty"));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| WebError::config(format!("backend.base_url is invalid: {}", e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(WebError::config(format!(
                "backend.base_url must use http or https, got '{}'",
                other
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(WebError::config("backend.base_url has no host"));
    }

    Ok(())
}

pub fn validate_log_format(format: &str) -> Result<()> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(WebError::config(format!(
            "logging.format must be 'text' or 'json', got '{}'",
            other
        ))),
    }
}

impl StaticConfig {
    /// Validate the whole configuration before the server starts.
    pub fn validate(&self) -> Result<()> {
        validate_backend_url(&self.backend.base_url)?;
        validate_log_format(&self.logging.format)?;

        if self.session.cookie_name.trim().is_empty() {
            return Err(WebError::validation("session.cookie_name cannot be empty"));
        }

        if let Some(hours) = self.session.max_age_hours
            && !(1..=MAX_SESSION_AGE_HOURS).contains(&hours)
        {
            return Err(WebError::validation(format!(
                "session.max_age_hours must be between 1 and {}, got {}",
                MAX_SESSION_AGE_HOURS, hours
            )));
        }

        // SameSite=None 必须配合 Secure，否则浏览器会丢弃 cookie
        if self.session.same_site == super::SameSitePolicy::None && !self.session.secure {
            return Err(WebError::validation(
                "session.same_site = None requires session.secure = true",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SameSitePolicy;

    #[test]
    fn test_validate_backend_url_accepts_http_and_https() {
        assert!(validate_backend_url("http://127.0.0.1:8080").is_ok());
        assert!(validate_backend_url("https://api.teenyurl.dev/").is_ok());
    }

    #[test]
    fn test_validate_backend_url_rejects_other_schemes() {
        assert!(validate_backend_url("ftp://example.com").is_err());
        assert!(validate_backend_url("").is_err());
        assert!(validate_backend_url("not a url").is_err());
    }

    #[test]
    fn test_validate_default_config() {
        assert!(StaticConfig::default().validate().is_ok());
    }

    #[test]
    fn test_same_site_none_requires_secure() {
        let mut config = StaticConfig::default();
        config.session.same_site = SameSitePolicy::None;
        assert!(config.validate().is_err());

        config.session.secure = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_session_max_age_is_bounded() {
        let mut config = StaticConfig::default();
        config.session.max_age_hours = Some(24);
        assert!(config.validate().is_ok());

        config.session.max_age_hours = Some(MAX_SESSION_AGE_HOURS);
        assert!(config.validate().is_ok());

        for hours in [0, MAX_SESSION_AGE_HOURS + 1, u64::MAX / 2, u64::MAX] {
            config.session.max_age_hours = Some(hours);
            let err = config.validate().unwrap_err();
            assert_eq!(err.code(), "E002");
            assert!(err.message().contains("session.max_age_hours"));
        }
    }

    #[test]
    fn test_validate_log_format() {
        assert!(validate_log_format("json").is_ok());
        assert!(validate_log_format("yaml").is_err());
    }
}
