#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use thiserror::Error;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

// Config is process wide, keep tests touching it from interleaving.
#[cfg(test)]
pub static TEST_LOCK: Lazy<std::sync::Mutex<()>> =
    Lazy::new(|| return std::sync::Mutex::new(()));

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiKey,
    ApiUrl,
    ConfigFile,
    Document,
    HealthCheckTimeout,
    Model,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No API key found. Set the GROQ_API_KEY environment variable, pass --api-key, or add api-key to {0}")]
    MissingCredential(String),

    #[error("Invalid value for config key '{key}': {value}")]
    InvalidValue { key: String, value: String },

    #[error("Unable to read config file {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let config_path = dirs::config_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("pdfchat/config.toml");

        let res = match key {
            ConfigKey::ApiUrl => "https://api.groq.com/openai",
            ConfigKey::HealthCheckTimeout => "1000",
            ConfigKey::Model => "llama3-8b-8192",

            // Special
            ConfigKey::ApiKey => "",
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
            ConfigKey::Document => "",
        };

        return res.to_string();
    }

    /// The API credential for the completion endpoint. Only the startup
    /// sequence calls this, and treats an error as fatal.
    pub fn credential() -> Result<String, ConfigError> {
        let token = Config::get(ConfigKey::ApiKey);
        if token.trim().is_empty() {
            return Err(ConfigError::MissingCredential(Config::get(
                ConfigKey::ConfigFile,
            )));
        }

        return Ok(token.trim().to_string());
    }

    /// Reads `.env` from the working directory or one of its parents into the
    /// process environment, where the env fallbacks of the CLI args pick it
    /// up. Variables already set are kept. A missing file is not an error.
    pub fn load_env_file() -> Result<(), ConfigError> {
        return Config::handle_env_file(".env", dotenvy::dotenv());
    }

    fn handle_env_file(
        name: &str,
        res: Result<path::PathBuf, dotenvy::Error>,
    ) -> Result<(), ConfigError> {
        match res {
            Ok(loaded) => {
                tracing::debug!(path = ?loaded, "Loaded env file");
                return Ok(());
            }
            Err(err) if err.not_found() => {
                return Ok(());
            }
            Err(err) => {
                return Err(ConfigError::Unreadable {
                    path: name.to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<(), ConfigError> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }
        Config::set(ConfigKey::ConfigFile, &config_file);

        let config_path = path::PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path)
                .await
                .map_err(|err| {
                    return ConfigError::Unreadable {
                        path: config_file.to_string(),
                        reason: err.to_string(),
                    };
                })?;
            Config::load_toml(&config_file, &toml_str)?;
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        Config::validate()?;

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiUrl),
            model = Config::get(ConfigKey::Model),
            config_file = Config::get(ConfigKey::ConfigFile),
            health_check_timeout = Config::get(ConfigKey::HealthCheckTimeout),
            has_api_key = !Config::get(ConfigKey::ApiKey).is_empty(),
            "config"
        );

        return Ok(());
    }

    fn load_toml(config_file: &str, toml_str: &str) -> Result<(), ConfigError> {
        let doc = toml_str
            .parse::<toml_edit::Document>()
            .map_err(|err| {
                return ConfigError::Unreadable {
                    path: config_file.to_string(),
                    reason: err.to_string(),
                };
            })?;

        for key in ConfigKey::iter() {
            if key == ConfigKey::ConfigFile || key == ConfigKey::Document {
                continue;
            }

            if let Some(val) = doc.get(&key.to_string()) {
                if let Some(val_int) = val.as_integer() {
                    Config::set(key, &val_int.to_string());
                } else if let Some(val_str) = val.as_str() {
                    if val_str.is_empty() {
                        continue;
                    }
                    Config::set(key, val_str);
                } else {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: val.to_string().trim().to_string(),
                    });
                }
            }
        }

        return Ok(());
    }

    fn validate() -> Result<(), ConfigError> {
        let timeout = Config::get(ConfigKey::HealthCheckTimeout);
        if timeout.parse::<u64>().is_err() {
            return Err(ConfigError::InvalidValue {
                key: ConfigKey::HealthCheckTimeout.to_string(),
                value: timeout,
            });
        }

        let url = Config::get(ConfigKey::ApiUrl);
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: ConfigKey::ApiUrl.to_string(),
                value: url,
            });
        }
        Config::set(ConfigKey::ApiUrl, url.trim_end_matches('/'));

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile || key == ConfigKey::Document {
                    return None;
                }

                if key == ConfigKey::ApiKey {
                    return Some(
                        "# API key for the completion endpoint. Prefer the GROQ_API_KEY environment variable.\n# api-key = \"\""
                            .to_string(),
                    );
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i32>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
