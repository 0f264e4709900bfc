use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

use smsgate_core::{GatewayError, GatewayTemplate, RawTemplate};

/// Process-wide country code used when neither the call nor the
/// configuration provides one.
pub const DEFAULT_COUNTRY_CODE: &str = "91";

/// Deserializable gateway configuration: the process-wide defaults plus one
/// raw template per gateway name.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsGateConfig {
    /// Gateway used when a send does not name one.
    pub default_gateway: Option<String>,
    /// Country code prepended when a template sets `add_code`.
    pub country_code: String,
    /// Gateway name to raw template.
    pub gateways: HashMap<String, RawTemplate>,
}

impl Default for SmsGateConfig {
    fn default() -> Self {
        Self {
            default_gateway: None,
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            gateways: HashMap::new(),
        }
    }
}

impl SmsGateConfig {
    /// Load configuration from files and environment variables.
    ///
    /// Layering: built-in defaults, then `config/default`,
    /// `config/{RUN_MODE}`, `config/local` (all optional), then
    /// `SMSGATE__`-prefixed environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(Config::try_from(&SmsGateConfig::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("SMSGATE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

/// Validated, read-only lookup table from gateway name to template.
///
/// Every template is validated when the registry is built, so configuration
/// problems surface before any send is attempted rather than mid-algorithm.
#[derive(Debug, Clone)]
pub struct GatewayRegistry {
    default_gateway: Option<String>,
    country_code: String,
    templates: HashMap<String, GatewayTemplate>,
}

impl GatewayRegistry {
    /// Validate every gateway template in `config` and build the registry.
    pub fn from_config(config: SmsGateConfig) -> Result<Self, GatewayError> {
        let mut templates = HashMap::with_capacity(config.gateways.len());
        for (name, raw) in config.gateways {
            let template = GatewayTemplate::from_raw(&name, raw)?;
            templates.insert(name, template);
        }
        let country_code = if config.country_code.trim().is_empty() {
            DEFAULT_COUNTRY_CODE.to_string()
        } else {
            config.country_code
        };
        Ok(Self {
            default_gateway: config.default_gateway,
            country_code,
            templates,
        })
    }

    /// Load from files/environment and validate in one step.
    pub fn load() -> Result<Self, GatewayError> {
        let config = SmsGateConfig::load().map_err(|e| {
            GatewayError::invalid_template("<configuration>", format!("load failed: {}", e))
        })?;
        Self::from_config(config)
    }

    /// Resolve the effective gateway: per-call override, else the configured
    /// default.
    pub fn resolve(&self, gateway: Option<&str>) -> Result<&GatewayTemplate, GatewayError> {
        let name = gateway
            .filter(|g| !g.is_empty())
            .or(self.default_gateway.as_deref())
            .ok_or(GatewayError::NoGatewaySpecified)?;
        self.templates
            .get(name)
            .ok_or_else(|| GatewayError::ConfigNotFound(name.to_string()))
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn default_gateway(&self) -> Option<&str> {
        self.default_gateway.as_deref()
    }
}
