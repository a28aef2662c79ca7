/* 📖 # Why is the configuration file optional?

The server is useful with zero setup: run the binary and it listens on 127.0.0.1:5000.
`integer_server.toml` in the working directory only needs to exist to change something, and
every key in it is optional. Unknown keys are rejected so a typo fails loudly at startup
instead of being silently ignored.

```toml
[server]
host = "0.0.0.0"
port = 8080
name = "integer-server"

[api]
# Status used when an index or count is outside a sequence's domain (400, 403 or 422)
invalid_element_status = 400
```
*/

use integer_base::pal::http::{HttpServerConfig, HttpStatusCode};
use integer_base::{ErrorKind, FilePath, IntegerError, IntegerResult, PalHandle};
use serde::Deserialize;
use tracing::info;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "integer_server.toml";

/// Status codes accepted for `api.invalid_element_status`.
pub const INVALID_ELEMENT_STATUSES: [u16; 3] = [400, 403, 422];

/// Configuration for the integer server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
}

/// Where and how the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on, 0 for an OS-assigned port.
    pub port: u16,
    /// Value of the `Server` response header.
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            name: "integer-server".to_string(),
        }
    }
}

/// Behaviour of the sequence API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub invalid_element_status: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            invalid_element_status: HttpStatusCode::Forbidden.as_u16(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text. `path` is only used in error messages.
    pub fn parse(content: &str, path: &FilePath) -> IntegerResult<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| config_error(path, e.message()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &FilePath) -> IntegerResult<()> {
        let status = self.api.invalid_element_status;
        if !INVALID_ELEMENT_STATUSES.contains(&status) {
            return Err(config_error(
                path,
                format!(
                    "api.invalid_element_status must be one of {:?}, got {}",
                    INVALID_ELEMENT_STATUSES, status
                ),
            ));
        }
        Ok(())
    }

    /// Server settings in the form the PAL expects.
    pub fn http_server_config(&self) -> HttpServerConfig {
        HttpServerConfig::new(self.server.host.clone())
            .with_port(self.server.port)
            .with_server_name(self.server.name.clone())
    }

    /// Status code for requests whose index or count is out of range.
    pub fn invalid_element_status(&self) -> HttpStatusCode {
        HttpStatusCode::from_u16(self.api.invalid_element_status)
            .unwrap_or(HttpStatusCode::Forbidden)
    }
}

fn config_error(path: &FilePath, message: impl Into<String>) -> Box<IntegerError> {
    Box::new(IntegerError::new(ErrorKind::Config {
        path: path.as_path().to_path_buf(),
        message: message.into(),
    }))
}

/// Load the configuration at `path`, falling back to defaults if the file does not exist.
pub fn load_config(pal: &PalHandle, path: &FilePath) -> IntegerResult<Config> {
    if !pal.file_exists(path)? {
        info!(path = %path, "No configuration file found, using defaults");
        return Ok(Config::default());
    }
    let content = pal.read_file_to_string(path)?;
    let config = Config::parse(&content, path)?;
    info!(path = %path, "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use integer_base::MockPal;

    fn pal_with_config(content: &str) -> PalHandle {
        let mock = MockPal::new();
        mock.add_file(FilePath::from(CONFIG_FILE_NAME), content.as_bytes().to_vec());
        PalHandle::new(mock)
    }

    fn config_path() -> FilePath {
        FilePath::from(CONFIG_FILE_NAME)
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let pal = PalHandle::new(MockPal::new());
        let config = load_config(&pal, &config_path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.invalid_element_status(), HttpStatusCode::Forbidden);
    }

    #[test]
    fn test_full_config() {
        let pal = pal_with_config(
            r#"
[server]
host = "0.0.0.0"
port = 8080
name = "sequences"

[api]
invalid_element_status = 400
"#,
        );
        let config = load_config(&pal, &config_path()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.invalid_element_status(), HttpStatusCode::BadRequest);

        let http = config.http_server_config();
        assert_eq!(http.address(), "0.0.0.0:8080");
        assert_eq!(http.server_name, "sequences");
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let pal = pal_with_config("[server]\nport = 9000\n");
        let config = load_config(&pal, &config_path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.name, "integer-server");
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = load_config(&pal_with_config(""), &config_path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = load_config(&pal_with_config("[server]\nprot = 80\n"), &config_path())
            .unwrap_err();
        match err.kind() {
            ErrorKind::Config { path, message } => {
                assert_eq!(path.to_str(), Some(CONFIG_FILE_NAME));
                assert!(message.contains("prot"), "message: {}", message);
            }
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let err = load_config(&pal_with_config("[server\nport = 1"), &config_path()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Config { .. }));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let err =
            load_config(&pal_with_config("[server]\nport = \"http\"\n"), &config_path())
                .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Config { .. }));
    }

    #[test]
    fn test_unsupported_invalid_element_status() {
        let err = load_config(
            &pal_with_config("[api]\ninvalid_element_status = 418\n"),
            &config_path(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration in integer_server.toml: api.invalid_element_status must be one of [400, 403, 422], got 418"
        );
    }

    #[test]
    fn test_all_supported_statuses() {
        for status in INVALID_ELEMENT_STATUSES {
            let content = format!("[api]\ninvalid_element_status = {}\n", status);
            let config = Config::parse(&content, &config_path()).unwrap();
            assert_eq!(config.invalid_element_status().as_u16(), status);
        }
    }
}
