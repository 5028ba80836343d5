use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, sync::Arc, time::Duration};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProxyConfig {
    pub enabled: bool,
    pub ip_header: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub proxy: ProxyConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_prefix: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_upstream_url() -> String {
    "https://meme-api.com/gimme".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_prefix: "meme-relay".to_string(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ip_header: "x-forwarded-for".to_string(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                proxy: ProxyConfig::default(),
            },
            upstream: UpstreamConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Arc<Self>> {
        let path = path.as_ref();

        // 如果配置文件不存在
        if !path.exists() {
            // 优先从示例配置复制
            let example_path = path.with_extension("yml.example");

            if example_path.exists() {
                tracing::info!("从示例配置创建新的配置文件");
                fs::copy(&example_path, path)
                    .map_err(|e| AppError::Config(format!("复制示例配置文件失败: {}", e)))?;
            } else {
                tracing::info!("配置文件不存在，创建默认配置");
                let config_str = serde_yaml::to_string(&Config::default())
                    .map_err(|e| AppError::Config(format!("序列化默认配置失败: {}", e)))?;

                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        fs::create_dir_all(parent)
                            .map_err(|e| AppError::Config(format!("创建配置目录失败: {}", e)))?;
                    }
                }

                fs::write(path, config_str)
                    .map_err(|e| AppError::Config(format!("写入默认配置文件失败: {}", e)))?;

                tracing::info!("默认配置文件已创建: {:?}", path);
            }
        }

        let config_str = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;

        Ok(Arc::new(config))
    }

    pub fn from_yaml(config_str: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(config_str)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config("Server port must be greater than 0".to_string()));
        }

        if self.server.host.is_empty() {
            return Err(AppError::Config("Server host cannot be empty".to_string()));
        }

        if self.server.proxy.enabled && self.server.proxy.ip_header.is_empty() {
            return Err(AppError::Config("Proxy ip_header cannot be empty when proxy is enabled".to_string()));
        }

        let url = reqwest::Url::parse(&self.upstream.url)
            .map_err(|e| AppError::Config(format!("Invalid upstream URL: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!("Unsupported upstream scheme: {}", url.scheme())));
        }

        if self.upstream.timeout_secs == 0 {
            return Err(AppError::Config("Upstream timeout must be greater than 0".to_string()));
        }

        Ok(())
    }
}
