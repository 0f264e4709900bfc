use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, info};

use smsgate_core::{
    build_payload, prepare_mobile, GatewayError, HttpRequest, HttpTransport, Recipients, SendReport,
};

use crate::config::GatewayRegistry;
use crate::message::SmsMessage;
use crate::transport::ReqwestTransport;

/// Immutable per-call options for one send.
///
/// Everything that the legacy fluent client mutated on itself (selected
/// gateway, country-code override, staged wrapper params) lives here as a
/// per-call value instead, so a shared client cannot race on staged state
/// and nothing can leak into the next send.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub(crate) gateway: Option<String>,
    pub(crate) country_code: Option<String>,
    pub(crate) wrapper_params: BTreeMap<String, String>,
    pub(crate) params: BTreeMap<String, String>,
    pub(crate) headers: BTreeMap<String, String>,
}

impl SendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the named gateway instead of the configured default.
    pub fn gateway(mut self, name: impl Into<String>) -> Self {
        self.gateway = Some(name.into());
        self
    }

    /// Override the configured country-code prefix for this send.
    pub fn country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    /// Add one parameter to the wrapped payload of this send.
    pub fn wrapper_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.wrapper_params.insert(key.into(), value.into());
        self
    }

    /// Merge a map of parameters into the wrapped payload of this send.
    /// Ignored when the template has no wrapper key.
    pub fn wrapper_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.wrapper_params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add one extra API parameter, merged over the gateway defaults.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Merge a map of extra API parameters over the gateway defaults.
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add one extra HTTP header, merged over the gateway headers.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Merge a map of extra HTTP headers over the gateway headers.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// Configuration-driven SMS gateway client.
///
/// Holds a validated [`GatewayRegistry`] and an injected [`HttpTransport`];
/// both are shared, so the client is cheap to construct per logical send.
#[derive(Clone)]
pub struct SmsGateClient {
    registry: Arc<GatewayRegistry>,
    transport: Arc<dyn HttpTransport>,
}

impl SmsGateClient {
    /// Client over an explicit transport (the seam used by tests and by
    /// hosts that manage their own connection pool).
    pub fn new(registry: Arc<GatewayRegistry>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    /// Client over a fresh default `reqwest` pool.
    pub fn with_default_transport(registry: Arc<GatewayRegistry>) -> Self {
        Self::new(registry, Arc::new(ReqwestTransport::new()))
    }

    pub fn registry(&self) -> &GatewayRegistry {
        &self.registry
    }

    /// Send `message` to `to` through the effective gateway.
    ///
    /// Validation and configuration failures are returned as errors before
    /// any I/O. Once the request is dispatched, every received response is
    /// `Ok`: 4xx/5xx delivery failures are visible through
    /// [`SendReport::response_code`], and transport-level failures are
    /// captured with the sentinel code 0 rather than raised. Callers that
    /// want strict propagation chain [`SendReport::into_result`].
    pub async fn send_message(
        &self,
        to: impl Into<Recipients>,
        message: &str,
        options: SendOptions,
    ) -> Result<SendReport, GatewayError> {
        let to = to.into();
        to.validate()?;
        if message.trim().is_empty() {
            return Err(GatewayError::InvalidArgument(
                "message content cannot be empty".into(),
            ));
        }

        let gateway = options.gateway.as_deref().filter(|g| !g.is_empty());
        let template = self.registry.resolve(gateway)?;
        let gateway = gateway
            .or_else(|| self.registry.default_gateway())
            .unwrap_or_default();
        let country_code = options
            .country_code
            .as_deref()
            .unwrap_or_else(|| self.registry.country_code());

        let mobile = prepare_mobile(&to, template, country_code);
        let payload = build_payload(
            template,
            mobile,
            message,
            &options.wrapper_params,
            &options.params,
        );

        let mut headers = template.headers.clone();
        for (name, value) in &options.headers {
            headers.insert(name.clone(), value.clone());
        }
        let request = HttpRequest::new(
            template.method,
            template.url.clone(),
            headers.into_iter().collect(),
            payload,
        );

        debug!(gateway, recipients = to.len(), "dispatching sms gateway request");

        match self.transport.execute(request).await {
            Ok(response) => {
                info!(status = response.status, "sms gateway response received");
                debug!(body = %response.body, "sms gateway response body");
                Ok(SendReport::received(response.status, response.body))
            }
            Err(e) => {
                error!(error = %e, "sms gateway connection error");
                Ok(SendReport::unavailable(e.to_string()))
            }
        }
    }

    /// Send a composed [`SmsMessage`], honoring its gateway override and
    /// attached params/headers. This is the notification-channel entry
    /// point: a host passes the recipient it routed and the message the
    /// notification produced.
    pub async fn send(
        &self,
        to: impl Into<Recipients>,
        message: &SmsMessage,
    ) -> Result<SendReport, GatewayError> {
        message.validate()?;
        let mut options = SendOptions::new()
            .params(message.params.clone())
            .headers(message.headers.clone());
        if let Some(gateway) = &message.gateway {
            options = options.gateway(gateway.clone());
        }
        self.send_message(to, &message.content, options).await
    }
}
