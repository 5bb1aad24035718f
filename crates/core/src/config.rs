use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub shop: ShopConfig,
    pub chat: ChatConfig,
    pub contact: ContactConfig,
    pub lexicon: LexiconConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ShopConfig {
    pub base_url: String,
    pub storefront_token: SecretString,
    pub api_version: String,
    pub page_size: u32,
    pub sellable_category: String,
    pub timeout_secs: u64,
}

/// Turn-behavior tunables. Model choice, temperature, history depth and
/// intent thresholds are configuration, not separate code paths.
#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub max_history: usize,
    pub session_capacity: usize,
    pub temperature: f32,
    pub guided_purchase_threshold: usize,
}

#[derive(Clone, Debug)]
pub struct ContactConfig {
    /// The single canonical human-handoff address. Surfaced verbatim in
    /// crisis, custom-order, and fallback replies; never paraphrased.
    pub whatsapp_url: String,
}

/// Optional overrides for the built-in classifier keyword lists. `None`
/// means the curated defaults shipped with the agent crate apply.
#[derive(Clone, Debug, Default)]
pub struct LexiconConfig {
    pub catalog_keywords: Option<Vec<String>>,
    pub custom_order_keywords: Option<Vec<String>>,
    pub risk_keywords: Option<Vec<String>>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub llm_api_key: Option<String>,
    pub llm_base_url: Option<String>,
    pub llm_model: Option<String>,
    pub shop_base_url: Option<String>,
    pub shop_storefront_token: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8787,
                graceful_shutdown_secs: 15,
            },
            llm: LlmConfig {
                api_key: String::new().into(),
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                timeout_secs: 60,
            },
            shop: ShopConfig {
                base_url: String::new(),
                storefront_token: String::new().into(),
                api_version: "2024-01".to_string(),
                page_size: 50,
                sellable_category: "Llaveros".to_string(),
                timeout_secs: 15,
            },
            chat: ChatConfig {
                max_history: 12,
                session_capacity: 256,
                temperature: 0.2,
                guided_purchase_threshold: 2,
            },
            contact: ContactConfig {
                whatsapp_url: "https://wa.me/18094400062".to_string(),
            },
            lexicon: LexiconConfig::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("mostrador.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(llm) = patch.llm {
            if let Some(llm_api_key_value) = llm.api_key {
                self.llm.api_key = secret_value(llm_api_key_value);
            }
            if let Some(base_url) = llm.base_url {
                self.llm.base_url = base_url;
            }
            if let Some(model) = llm.model {
                self.llm.model = model;
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
        }

        if let Some(shop) = patch.shop {
            if let Some(base_url) = shop.base_url {
                self.shop.base_url = base_url;
            }
            if let Some(storefront_token_value) = shop.storefront_token {
                self.shop.storefront_token = secret_value(storefront_token_value);
            }
            if let Some(api_version) = shop.api_version {
                self.shop.api_version = api_version;
            }
            if let Some(page_size) = shop.page_size {
                self.shop.page_size = page_size;
            }
            if let Some(sellable_category) = shop.sellable_category {
                self.shop.sellable_category = sellable_category;
            }
            if let Some(timeout_secs) = shop.timeout_secs {
                self.shop.timeout_secs = timeout_secs;
            }
        }

        if let Some(chat) = patch.chat {
            if let Some(max_history) = chat.max_history {
                self.chat.max_history = max_history;
            }
            if let Some(session_capacity) = chat.session_capacity {
                self.chat.session_capacity = session_capacity;
            }
            if let Some(temperature) = chat.temperature {
                self.chat.temperature = temperature;
            }
            if let Some(guided_purchase_threshold) = chat.guided_purchase_threshold {
                self.chat.guided_purchase_threshold = guided_purchase_threshold;
            }
        }

        if let Some(contact) = patch.contact {
            if let Some(whatsapp_url) = contact.whatsapp_url {
                self.contact.whatsapp_url = whatsapp_url;
            }
        }

        if let Some(lexicon) = patch.lexicon {
            if let Some(catalog_keywords) = lexicon.catalog_keywords {
                self.lexicon.catalog_keywords = Some(catalog_keywords);
            }
            if let Some(custom_order_keywords) = lexicon.custom_order_keywords {
                self.lexicon.custom_order_keywords = Some(custom_order_keywords);
            }
            if let Some(risk_keywords) = lexicon.risk_keywords {
                self.lexicon.risk_keywords = Some(risk_keywords);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("MOSTRADOR_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("MOSTRADOR_SERVER_PORT") {
            self.server.port = parse_u16("MOSTRADOR_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("MOSTRADOR_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("MOSTRADOR_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        if let Some(value) = read_env("MOSTRADOR_LLM_API_KEY") {
            self.llm.api_key = secret_value(value);
        }
        if let Some(value) = read_env("MOSTRADOR_LLM_BASE_URL") {
            self.llm.base_url = value;
        }
        if let Some(value) = read_env("MOSTRADOR_LLM_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = read_env("MOSTRADOR_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_u64("MOSTRADOR_LLM_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("MOSTRADOR_SHOP_BASE_URL") {
            self.shop.base_url = value;
        }
        if let Some(value) = read_env("MOSTRADOR_SHOP_STOREFRONT_TOKEN") {
            self.shop.storefront_token = secret_value(value);
        }
        if let Some(value) = read_env("MOSTRADOR_SHOP_API_VERSION") {
            self.shop.api_version = value;
        }
        if let Some(value) = read_env("MOSTRADOR_SHOP_PAGE_SIZE") {
            self.shop.page_size = parse_u32("MOSTRADOR_SHOP_PAGE_SIZE", &value)?;
        }
        if let Some(value) = read_env("MOSTRADOR_SHOP_SELLABLE_CATEGORY") {
            self.shop.sellable_category = value;
        }
        if let Some(value) = read_env("MOSTRADOR_SHOP_TIMEOUT_SECS") {
            self.shop.timeout_secs = parse_u64("MOSTRADOR_SHOP_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("MOSTRADOR_CHAT_MAX_HISTORY") {
            self.chat.max_history = parse_usize("MOSTRADOR_CHAT_MAX_HISTORY", &value)?;
        }
        if let Some(value) = read_env("MOSTRADOR_CHAT_SESSION_CAPACITY") {
            self.chat.session_capacity = parse_usize("MOSTRADOR_CHAT_SESSION_CAPACITY", &value)?;
        }
        if let Some(value) = read_env("MOSTRADOR_CHAT_TEMPERATURE") {
            self.chat.temperature = parse_f32("MOSTRADOR_CHAT_TEMPERATURE", &value)?;
        }
        if let Some(value) = read_env("MOSTRADOR_CHAT_GUIDED_PURCHASE_THRESHOLD") {
            self.chat.guided_purchase_threshold =
                parse_usize("MOSTRADOR_CHAT_GUIDED_PURCHASE_THRESHOLD", &value)?;
        }

        if let Some(value) = read_env("MOSTRADOR_CONTACT_WHATSAPP_URL") {
            self.contact.whatsapp_url = value;
        }

        let log_level =
            read_env("MOSTRADOR_LOGGING_LEVEL").or_else(|| read_env("MOSTRADOR_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("MOSTRADOR_LOGGING_FORMAT").or_else(|| read_env("MOSTRADOR_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(llm_api_key) = overrides.llm_api_key {
            self.llm.api_key = secret_value(llm_api_key);
        }
        if let Some(llm_base_url) = overrides.llm_base_url {
            self.llm.base_url = llm_base_url;
        }
        if let Some(llm_model) = overrides.llm_model {
            self.llm.model = llm_model;
        }
        if let Some(shop_base_url) = overrides.shop_base_url {
            self.shop.base_url = shop_base_url;
        }
        if let Some(shop_storefront_token) = overrides.shop_storefront_token {
            self.shop.storefront_token = secret_value(shop_storefront_token);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_server(&self.server)?;
        validate_llm(&self.llm)?;
        validate_shop(&self.shop)?;
        validate_chat(&self.chat)?;
        validate_contact(&self.contact)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("mostrador.toml"), PathBuf::from("config/mostrador.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind_address.trim().is_empty() {
        return Err(ConfigError::Validation("server.bind_address must not be empty".to_string()));
    }

    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    if llm.api_key.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "llm.api_key is required (set MOSTRADOR_LLM_API_KEY or llm.api_key)".to_string(),
        ));
    }

    if !llm.base_url.starts_with("http://") && !llm.base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "llm.base_url must start with http:// or https://".to_string(),
        ));
    }

    if llm.model.trim().is_empty() {
        return Err(ConfigError::Validation("llm.model must not be empty".to_string()));
    }

    if llm.timeout_secs == 0 || llm.timeout_secs > 300 {
        return Err(ConfigError::Validation("llm.timeout_secs must be in range 1..=300".to_string()));
    }

    Ok(())
}

fn validate_shop(shop: &ShopConfig) -> Result<(), ConfigError> {
    if !shop.base_url.starts_with("http://") && !shop.base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "shop.base_url must start with http:// or https://".to_string(),
        ));
    }

    if shop.storefront_token.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "shop.storefront_token is required (set MOSTRADOR_SHOP_STOREFRONT_TOKEN or shop.storefront_token)"
                .to_string(),
        ));
    }

    if shop.page_size == 0 || shop.page_size > 250 {
        return Err(ConfigError::Validation("shop.page_size must be in range 1..=250".to_string()));
    }

    if shop.sellable_category.trim().is_empty() {
        return Err(ConfigError::Validation(
            "shop.sellable_category must not be empty".to_string(),
        ));
    }

    if shop.timeout_secs == 0 || shop.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "shop.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_chat(chat: &ChatConfig) -> Result<(), ConfigError> {
    if chat.max_history < 2 {
        return Err(ConfigError::Validation(
            "chat.max_history must be at least 2 (one user turn plus one assistant turn)"
                .to_string(),
        ));
    }

    if chat.session_capacity == 0 {
        return Err(ConfigError::Validation(
            "chat.session_capacity must be greater than zero".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&chat.temperature) {
        return Err(ConfigError::Validation(
            "chat.temperature must be in range 0.0..=2.0".to_string(),
        ));
    }

    if chat.guided_purchase_threshold == 0 {
        return Err(ConfigError::Validation(
            "chat.guided_purchase_threshold must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_contact(contact: &ContactConfig) -> Result<(), ConfigError> {
    if !contact.whatsapp_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "contact.whatsapp_url must start with https://".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    value.parse::<f32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    llm: Option<LlmPatch>,
    shop: Option<ShopPatch>,
    chat: Option<ChatPatch>,
    contact: Option<ContactPatch>,
    lexicon: Option<LexiconPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ShopPatch {
    base_url: Option<String>,
    storefront_token: Option<String>,
    api_version: Option<String>,
    page_size: Option<u32>,
    sellable_category: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatPatch {
    max_history: Option<usize>,
    session_capacity: Option<usize>,
    temperature: Option<f32>,
    guided_purchase_threshold: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct ContactPatch {
    whatsapp_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LexiconPatch {
    catalog_keywords: Option<Vec<String>>,
    custom_order_keywords: Option<Vec<String>>,
    risk_keywords: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    fn valid_overrides() -> ConfigOverrides {
        ConfigOverrides {
            llm_api_key: Some("sk-test".to_string()),
            shop_base_url: Some("https://tienda.example".to_string()),
            shop_storefront_token: Some("shpat-test".to_string()),
            ..ConfigOverrides::default()
        }
    }

    #[test]
    fn defaults_favor_catalog_faithful_generation() {
        let config = AppConfig::default();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.chat.temperature, 0.2);
        assert_eq!(config.chat.max_history, 12);
        assert_eq!(config.chat.guided_purchase_threshold, 2);
        assert_eq!(config.contact.whatsapp_url, "https://wa.me/18094400062");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn load_fails_without_required_secrets() {
        let result = AppConfig::load(LoadOptions {
            config_path: Some(std::path::PathBuf::from("/nonexistent/mostrador.toml")),
            ..LoadOptions::default()
        });

        let message = result.err().expect("validation should fail").to_string();
        assert!(message.contains("llm.api_key"));
    }

    #[test]
    fn load_applies_overrides_and_validates() {
        let config = AppConfig::load(LoadOptions {
            config_path: Some(std::path::PathBuf::from("/nonexistent/mostrador.toml")),
            overrides: valid_overrides(),
            ..LoadOptions::default()
        })
        .expect("config should load");

        assert_eq!(config.llm.api_key.expose_secret(), "sk-test");
        assert_eq!(config.shop.base_url, "https://tienda.example");
    }

    #[test]
    fn toml_patch_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
[llm]
api_key = "sk-from-file"
model = "gpt-4o"

[shop]
base_url = "https://tienda.example"
storefront_token = "shpat-from-file"
page_size = 100
sellable_category = "Llaveros"

[chat]
max_history = 20
guided_purchase_threshold = 3

[lexicon]
catalog_keywords = ["precio", "comprar"]
"#
        )
        .expect("write config");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            ..LoadOptions::default()
        })
        .expect("config should load");

        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.shop.page_size, 100);
        assert_eq!(config.chat.max_history, 20);
        assert_eq!(config.chat.guided_purchase_threshold, 3);
        assert_eq!(
            config.lexicon.catalog_keywords.as_deref(),
            Some(&["precio".to_string(), "comprar".to_string()][..])
        );
    }

    #[test]
    fn missing_required_file_is_reported() {
        let result = AppConfig::load(LoadOptions {
            config_path: Some(std::path::PathBuf::from("/nonexistent/mostrador.toml")),
            require_file: true,
            ..LoadOptions::default()
        });

        assert!(matches!(result, Err(ConfigError::MissingConfigFile(_))));
    }

    #[test]
    fn rejects_out_of_range_page_size() {
        let mut config = AppConfig::default();
        config.llm.api_key = "sk-test".to_string().into();
        config.shop.base_url = "https://tienda.example".to_string();
        config.shop.storefront_token = "shpat-test".to_string().into();
        config.shop.page_size = 500;

        let message = config.validate().err().expect("validation should fail").to_string();
        assert!(message.contains("shop.page_size"));
    }

    #[test]
    fn rejects_non_https_contact_channel() {
        let mut config = AppConfig::default();
        config.llm.api_key = "sk-test".to_string().into();
        config.shop.base_url = "https://tienda.example".to_string();
        config.shop.storefront_token = "shpat-test".to_string().into();
        config.contact.whatsapp_url = "wa.me/123".to_string();

        let message = config.validate().err().expect("validation should fail").to_string();
        assert!(message.contains("contact.whatsapp_url"));
    }

    #[test]
    fn log_format_parses_known_values() {
        assert_eq!("compact".parse::<LogFormat>().expect("parses"), LogFormat::Compact);
        assert_eq!("JSON".parse::<LogFormat>().expect("parses"), LogFormat::Json);
        assert!("yaml".parse::<LogFormat>().is_err());
    }
}
