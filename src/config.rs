use anyhow::{Context, anyhow, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;

use crate::models::{Prize, PrizeTable, default_prizes};

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "https://www.optimal-traders.com",
    "https://optimal-traders-aa0294f61-6e15a02942141.webflow.io",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub woocommerce: WooCommerceConfig,
    #[serde(default)]
    pub origins: OriginConfig,
    #[serde(default)]
    pub coupon: CouponConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 运行模式，仅用于启动日志
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            environment: "development".to_string(),
        }
    }
}

/// 密钥通常来自环境变量，文件中可只写部分字段
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WooCommerceConfig {
    pub site_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for WooCommerceConfig {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            consumer_key: String::new(),
            consumer_secret: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginConfig {
    pub allowed: Vec<String>,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponConfig {
    /// 优惠券过期日期 YYYY-MM-DD
    #[serde(default = "default_expires_on")]
    pub expires_on: String,
    #[serde(default = "default_prizes")]
    pub prizes: Vec<Prize>,
}

fn default_expires_on() -> String {
    "2024-12-03".to_string()
}

impl Default for CouponConfig {
    fn default() -> Self {
        Self {
            expires_on: default_expires_on(),
            prizes: default_prizes(),
        }
    }
}

impl CouponConfig {
    pub fn expiry_date(&self) -> anyhow::Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.expires_on, "%Y-%m-%d")
            .with_context(|| format!("Invalid coupon expiry date '{}'", self.expires_on))
    }

    pub fn prize_table(&self) -> anyhow::Result<PrizeTable> {
        PrizeTable::new(self.prizes.clone()).map_err(|e| anyhow!("Invalid prize table: {e}"))
    }
}

impl Config {
    /// 读取 CONFIG_PATH（默认 config.toml），不存在时完全依赖环境变量
    pub fn from_toml() -> anyhow::Result<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        let file = match std::fs::read_to_string(&config_path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read config file {config_path}"));
            }
        };

        Self::from_sources(file.as_deref(), |name| env::var(name).ok())
    }

    /// 先解析配置文件（若有），再用环境变量覆盖，最后校验
    pub fn from_sources<F>(file: Option<&str>, get_env: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Config = match file {
            Some(content) => toml::from_str(content).context("Failed to parse config file")?,
            None => Config {
                server: ServerConfig::default(),
                woocommerce: WooCommerceConfig::default(),
                origins: OriginConfig::default(),
                coupon: CouponConfig::default(),
            },
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Some(v) = get_env("SERVER_HOST") {
            config.server.host = v;
        }
        if let Some(v) = get_env("PORT") {
            config.server.port = v
                .parse()
                .with_context(|| format!("Invalid PORT value '{v}'"))?;
        }
        if let Some(v) = get_env("APP_ENV") {
            config.server.environment = v;
        }
        if let Some(v) = get_env("SITE_URL") {
            config.woocommerce.site_url = v;
        }
        if let Some(v) = get_env("CONSUMER_KEY") {
            config.woocommerce.consumer_key = v;
        }
        if let Some(v) = get_env("CONSUMER_SECRET") {
            config.woocommerce.consumer_secret = v;
        }
        if let Some(v) = get_env("WOOCOMMERCE_TIMEOUT_SECS") {
            config.woocommerce.timeout_secs = v
                .parse()
                .with_context(|| format!("Invalid WOOCOMMERCE_TIMEOUT_SECS value '{v}'"))?;
        }
        if let Some(v) = get_env("ALLOWED_ORIGINS") {
            config.origins.allowed = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = get_env("COUPON_EXPIRES_ON") {
            config.coupon.expires_on = v;
        }

        config.woocommerce.site_url = config.woocommerce.site_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.woocommerce.site_url.is_empty() {
            bail!("SITE_URL is not set and no [woocommerce].site_url in config file");
        }
        if self.woocommerce.consumer_key.is_empty() {
            bail!("CONSUMER_KEY is not set");
        }
        if self.woocommerce.consumer_secret.is_empty() {
            bail!("CONSUMER_SECRET is not set");
        }
        if self.woocommerce.timeout_secs == 0 {
            bail!("WooCommerce timeout must be at least 1 second");
        }
        if self.origins.allowed.is_empty() {
            bail!("Origin allowlist is empty");
        }
        self.coupon.expiry_date()?;
        self.coupon.prize_table()?;
        Ok(())
    }
}
