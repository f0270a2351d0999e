// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use crate::search::GOOGLE_SEARCH_URL;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_MODEL: &str = "mistralai/mistral-large-2512";
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_CATALOG_URL: &str = "https://stage-api.eetgroup.com/api";
pub const DEFAULT_ORDER_STATUS_URL: &str = "https://stage-api.eetgroup.com/api/AiSearch/OrderStatus";
pub const DEFAULT_MAX_ROUNDS: usize = 8;

/// API keys loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// OpenRouter API key (OPENROUTER_API_KEY)
    pub openrouter: Option<String>,
    /// Google Custom Search API key (GOOGLE_API_KEY)
    pub google: Option<String>,
    /// Google Custom Search engine id (GOOGLE_CSE_ID)
    pub google_cse_id: Option<String>,
}

impl ApiKeys {
    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        let keys = Self {
            openrouter: read_key(lookup, "OPENROUTER_API_KEY"),
            google: read_key(lookup, "GOOGLE_API_KEY"),
            google_cse_id: read_key(lookup, "GOOGLE_CSE_ID"),
        };
        keys.log_status();
        keys
    }

    /// Web search needs both the key and the engine id
    pub fn has_web_search(&self) -> bool {
        self.google.is_some() && self.google_cse_id.is_some()
    }

    pub fn has_llm_provider(&self) -> bool {
        self.openrouter.is_some()
    }

    /// Log which API keys are available (without exposing values)
    fn log_status(&self) {
        let mut available = Vec::new();
        if self.openrouter.is_some() {
            available.push("OpenRouter");
        }
        if self.has_web_search() {
            available.push("Google Custom Search");
        }

        if available.is_empty() {
            warn!("No API keys configured - the agent will be unavailable");
        } else {
            debug!(keys = ?available, "API keys loaded");
        }
    }
}

/// Hosted model settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// OPENROUTER_MODEL
    pub model: String,
    /// OPENROUTER_URL
    pub base_url: String,
    /// LLM_MAX_TOKENS
    pub max_tokens: Option<u32>,
    /// LLM_TEMPERATURE
    pub temperature: Option<f32>,
    /// AGENT_MAX_ROUNDS
    pub max_rounds: usize,
}

/// Cable guide catalog settings
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// CATALOG_API_URL
    pub base_url: String,
    /// EET_CULTURE
    pub culture: String,
    /// EET_BUSINESS_ENTITY_ID
    pub business_entity_id: String,
    /// EET_MARKET_ID
    pub market_id: String,
    /// EET_SITE_ID
    pub site_id: String,
    /// CATALOG_BUILTIN_ENDS_A
    pub builtin_ends_a: bool,
}

/// Order management API settings
#[derive(Debug, Clone)]
pub struct OrderConfig {
    /// ORDER_API_URL
    pub status_url: String,
}

/// Web search settings
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// GOOGLE_SEARCH_URL
    pub endpoint: String,
}

/// Inbound HTTP settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HOST
    pub host: String,
    /// PORT
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            lines.extend(self.errors.iter().map(|e| format!("  - {}", e)));
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            lines.extend(self.warnings.iter().map(|w| format!("  - {}", w)));
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub api_keys: ApiKeys,
    pub llm: LlmConfig,
    pub catalog: CatalogConfig,
    pub orders: OrderConfig,
    pub search: SearchConfig,
    pub server: ServerConfig,
    /// Timeout for catalog, order and search calls (DOWNSTREAM_TIMEOUT_SECS)
    pub downstream_timeout: Duration,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup, after dotenvy)
    pub fn load() -> Self {
        info!("Loading environment configuration");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            api_keys: ApiKeys::from_lookup(&get),
            llm: LlmConfig {
                model: or("OPENROUTER_MODEL", DEFAULT_MODEL),
                base_url: or("OPENROUTER_URL", DEFAULT_OPENROUTER_URL),
                max_tokens: parse_or_warn(&get, "LLM_MAX_TOKENS"),
                temperature: parse_or_warn(&get, "LLM_TEMPERATURE"),
                max_rounds: parse_or_warn(&get, "AGENT_MAX_ROUNDS").unwrap_or(DEFAULT_MAX_ROUNDS),
            },
            catalog: CatalogConfig {
                base_url: or("CATALOG_API_URL", DEFAULT_CATALOG_URL),
                culture: or("EET_CULTURE", "en-zz"),
                business_entity_id: or("EET_BUSINESS_ENTITY_ID", "9"),
                market_id: or("EET_MARKET_ID", "1006"),
                site_id: or("EET_SITE_ID", "23"),
                builtin_ends_a: get("CATALOG_BUILTIN_ENDS_A")
                    .and_then(|v| parse_bool(&v))
                    .unwrap_or(false),
            },
            orders: OrderConfig {
                status_url: or("ORDER_API_URL", DEFAULT_ORDER_STATUS_URL),
            },
            search: SearchConfig {
                endpoint: or("GOOGLE_SEARCH_URL", GOOGLE_SEARCH_URL),
            },
            server: ServerConfig {
                host: or("HOST", "0.0.0.0"),
                port: parse_or_warn(&get, "PORT").unwrap_or(8000),
            },
            downstream_timeout: parse_or_warn::<u64>(&get, "DOWNSTREAM_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(crate::http::DOWNSTREAM_TIMEOUT),
        }
    }

    /// Validate configuration and return warnings/errors
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::default();

        if !self.api_keys.has_llm_provider() {
            validation.add_error("OPENROUTER_API_KEY is not set - the agent cannot run");
        }

        match (&self.api_keys.google, &self.api_keys.google_cse_id) {
            (Some(_), None) => validation.add_warning("GOOGLE_API_KEY is set but GOOGLE_CSE_ID is missing"),
            (None, Some(_)) => validation.add_warning("GOOGLE_CSE_ID is set but GOOGLE_API_KEY is missing"),
            (None, None) => validation.add_warning("Google Custom Search not configured - product lookups disabled"),
            (Some(_), Some(_)) => {}
        }

        if self.llm.max_rounds == 0 {
            validation.add_error("AGENT_MAX_ROUNDS must be at least 1");
        }

        if let Some(t) = self.llm.temperature
            && !(0.0..=2.0).contains(&t)
        {
            validation.add_warning(format!("LLM_TEMPERATURE {} is outside 0.0-2.0", t));
        }

        for (name, url) in [
            ("CATALOG_API_URL", &self.catalog.base_url),
            ("ORDER_API_URL", &self.orders.status_url),
            ("OPENROUTER_URL", &self.llm.base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                validation.add_error(format!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }

        if self.downstream_timeout.is_zero() {
            validation.add_error("DOWNSTREAM_TIMEOUT_SECS must be greater than zero");
        }

        validation
    }
}

fn read_key(lookup: &dyn Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|k| !k.trim().is_empty())
}

fn parse_or_warn<T: std::str::FromStr>(get: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = get(key)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key = key, value = %raw, "Could not parse config value, using default");
            None
        }
    }
}

/// Parse a boolean value; accepts "1"/"0", "true"/"false", "yes"/"no"
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
