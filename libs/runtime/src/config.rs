use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Plain environment variables understood for compatibility with existing
/// deployments, mapped onto their place in the config tree.
const PLAIN_ENV_KEYS: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("APP_NAME", "server.app_name"),
    ("ALLOWED_ORIGINS", "http.allowed_origins"),
];

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Core server configuration.
    pub server: ServerConfig,
    /// HTTP middleware settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Application name reported in logs and the health endpoint.
    pub app_name: String,
    pub host: String,
    pub port: u16,
    /// Base directory for relative log file paths; normalized to an absolute path.
    #[serde(default)]
    pub home_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Comma-separated list of allowed CORS origins, or "*" for any.
    pub allowed_origins: String,
    /// Per-request timeout in seconds (0 disables the timeout layer).
    #[serde(default)]
    pub request_timeout_sec: u64,
    /// Maximum accepted request body size.
    pub body_limit_bytes: usize,
}

/// Logging configuration - maps subsystem names to their logging settings.
/// Key "default" is the catch-all for logs that don't match explicit subsystems.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    #[serde(default)]
    pub file: String, // "logs/users.log"; empty disables file output
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>, // How many rotated files to keep
    #[serde(default)]
    pub max_size_mb: Option<u64>, // Max size of the file in MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            app_name: "users-server".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            home_dir: String::new(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_string(),
            request_timeout_sec: 30,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

/// Create a default logging configuration: console only.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: String::new(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            http: HttpConfig::default(),
            logging: Some(default_logging_config()),
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading:
    /// defaults → YAML file (if given) → `APP__*` env → plain env (`PORT`, `APP_NAME`, `ALLOWED_ORIGINS`).
    /// Also normalizes `server.home_dir` into an absolute path and creates the directory.
    pub fn load<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let config_path: Option<PathBuf> = config_path.map(|p| p.as_ref().to_path_buf());
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(path) = config_path.as_deref() {
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            // A file that sets `logging` replaces the default sections wholesale.
            figment = Figment::new()
                .merge(Serialized::defaults(AppConfig {
                    logging: None,
                    ..AppConfig::default()
                }))
                .merge(Yaml::file(path));
        }

        let figment = figment
            // Example: APP__SERVER__PORT=8087 maps to server.port
            .merge(Env::prefixed("APP__").split("__"))
            .merge(Env::raw().filter_map(|key| {
                PLAIN_ENV_KEYS
                    .iter()
                    .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                    .map(|(_, path)| (*path).into())
            }));

        let mut config: AppConfig = figment.extract().with_context(|| match &config_path {
            Some(p) => format!("Failed to parse config file {}", p.display()),
            None => "Failed to parse config from environment".to_string(),
        })?;

        normalize_home_dir_inplace(&mut config.server)
            .context("Failed to resolve server.home_dir")?;

        Ok(config)
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        // Verbose flags only ever raise the "default" console level.
        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            match args.verbose {
                0 => {}
                1 => default_section.console_level = "debug".to_string(),
                _ => default_section.console_level = "trace".to_string(),
            }
        }
    }

    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Command line arguments relevant to configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
}

/// Resolve `server.home_dir` against the working directory and create it.
fn normalize_home_dir_inplace(server: &mut ServerConfig) -> Result<()> {
    let raw = server.home_dir.trim();
    let cwd = std::env::current_dir().context("current directory is not accessible")?;

    let resolved: PathBuf = if raw.is_empty() {
        cwd
    } else if Path::new(raw).is_absolute() {
        PathBuf::from(raw)
    } else {
        cwd.join(raw)
    };

    std::fs::create_dir_all(&resolved)
        .with_context(|| format!("cannot create {}", resolved.display()))?;
    server.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}
