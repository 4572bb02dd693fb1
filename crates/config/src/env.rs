use atelier_common::error::{AtelierError, AtelierResult};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Backend location and endpoint paths.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub designer_endpoint: String,
    pub issue_endpoint: String,
    pub comment_endpoint: String,
    pub project_endpoint: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Join the base URL and an endpoint path without doubling the slash.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// Designer page size used to derive page bounds. `None` keeps the legacy ceiling.
    pub designer_page_size: Option<u32>,
    pub preferences_path: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    pub fn from_env() -> AtelierResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        let designer_page_size = match env::var("DESIGNER_PAGE_SIZE").ok() {
            Some(raw) => {
                let size: u32 = raw
                    .parse()
                    .map_err(|e| AtelierError::Config(format!("invalid DESIGNER_PAGE_SIZE: {e}")))?;
                if size == 0 {
                    return Err(AtelierError::Config(
                        "DESIGNER_PAGE_SIZE must be greater than zero".to_owned(),
                    ));
                }
                Some(size)
            }
            None => None,
        };

        Ok(Self {
            api: ApiConfig {
                base_url: get_var("API_BASE_URL")?,
                designer_endpoint: get_var_or("DESIGNER_ENDPOINT", "/designer/"),
                issue_endpoint: get_var_or("ISSUE_ENDPOINT", "/issue/"),
                comment_endpoint: get_var_or("COMMENT_ENDPOINT", "/comment/"),
                project_endpoint: get_var_or("PROJECT_ENDPOINT", "/project/"),
                timeout_secs: get_var_or("REQUEST_TIMEOUT_SECS", "30")
                    .parse()
                    .map_err(|e| {
                        AtelierError::Config(format!("invalid REQUEST_TIMEOUT_SECS: {e}"))
                    })?,
            },
            designer_page_size,
            preferences_path: PathBuf::from(get_var_or(
                "PREFERENCES_PATH",
                ".atelier-preferences.json",
            )),
            log_level: get_var_or("LOG_LEVEL", "info"),
        })
    }
}

fn get_var(key: &str) -> AtelierResult<String> {
    env::var(key).map_err(|_| AtelierError::Config(format!("{key} is required but not set")))
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_optional_vars() {
        for key in [
            "DESIGNER_ENDPOINT",
            "ISSUE_ENDPOINT",
            "COMMENT_ENDPOINT",
            "PROJECT_ENDPOINT",
            "REQUEST_TIMEOUT_SECS",
            "DESIGNER_PAGE_SIZE",
            "PREFERENCES_PATH",
            "LOG_LEVEL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn config_from_env_succeeds_with_required_vars() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");
        clear_optional_vars();

        env::set_var("API_BASE_URL", "http://localhost:8000/api");

        let cfg = AppConfig::from_env().expect("should parse config");
        assert_eq!(cfg.api.base_url, "http://localhost:8000/api");
        assert_eq!(cfg.api.designer_endpoint, "/designer/");
        assert_eq!(cfg.api.timeout_secs, 30);
        assert_eq!(cfg.designer_page_size, None);
        assert_eq!(cfg.log_level, "info");

        env::remove_var("API_BASE_URL");
    }

    #[test]
    fn config_from_env_fails_without_base_url() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::remove_var("API_BASE_URL");
        let result = AppConfig::from_env();
        assert!(result.is_err());
    }

    #[test]
    fn config_reads_page_size() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");
        clear_optional_vars();

        env::set_var("API_BASE_URL", "http://localhost:8000");
        env::set_var("DESIGNER_PAGE_SIZE", "25");
        let cfg = AppConfig::from_env().expect("should parse config");
        assert_eq!(cfg.designer_page_size, Some(25));

        env::set_var("DESIGNER_PAGE_SIZE", "0");
        assert!(AppConfig::from_env().is_err());

        env::remove_var("DESIGNER_PAGE_SIZE");
        env::remove_var("API_BASE_URL");
    }

    #[test]
    fn url_for_joins_without_double_slash() {
        let api = ApiConfig {
            base_url: "http://localhost:8000/api/".to_owned(),
            designer_endpoint: "/designer/".to_owned(),
            issue_endpoint: "/issue/".to_owned(),
            comment_endpoint: "/comment/".to_owned(),
            project_endpoint: "/project/".to_owned(),
            timeout_secs: 5,
        };
        assert_eq!(
            api.url_for(&api.designer_endpoint),
            "http://localhost:8000/api/designer/"
        );
    }
}
