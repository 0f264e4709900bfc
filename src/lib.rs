//! # smsgate
//!
//! A configuration-driven SMS gateway client for generic REST providers.
//!
//! Instead of one hand-written integration per provider, smsgate maps a
//! logical gateway name to a declarative request template (method, URL,
//! parameter names, headers, payload shape), substitutes the recipient(s)
//! and message into that template, sends the HTTP request, and reports the
//! raw response back to the caller.
//!
//! ## Features
//!
//! - **Template-driven**: GET query, POST form, or POST JSON requests from
//!   one configuration shape
//! - **Bulk sends**: comma-joined for query/form gateways, JSON lists for
//!   JSON gateways, optional country-code prefixing
//! - **Wrapper payloads**: batch-message nesting under a configured key
//! - **Validated configuration**: templates are checked when the registry
//!   is built, not mid-send
//! - **Injected transport**: any [`HttpTransport`](smsgate_core::HttpTransport)
//!   implementation; `reqwest` out of the box
//! - **Uniform outcomes**: delivery failures (4xx/5xx) and connection
//!   errors are inspected through [`SendReport`](smsgate_core::SendReport),
//!   never thrown past the send boundary
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use smsgate::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(GatewayRegistry::load()?);
//!     let client = SmsGateClient::with_default_transport(registry);
//!
//!     let report = client
//!         .send_message("5550001111", "Hello from smsgate!", SendOptions::new())
//!         .await?;
//!
//!     println!("gateway answered {}: {}", report.response_code(), report.response());
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Gateways are described in `config/*` files or `SMSGATE__` environment
//! variables (see [`config::SmsGateConfig::load`]):
//!
//! ```toml
//! default_gateway = "msg91"
//! country_code = "91"
//!
//! [gateways.msg91]
//! method = "POST"
//! url = "https://control.msg91.com/api/v2/sendsms"
//! json = true
//! wrapper = "sms"
//! [gateways.msg91.params]
//! send_to_param_name = "to"
//! msg_param_name = "message"
//! others = { authkey = "...", sender = "..." }
//! ```

pub mod client;
pub mod config;
pub mod message;
pub mod transport;

pub use client::{SendOptions, SmsGateClient};
pub use config::{GatewayRegistry, SmsGateConfig};
pub use message::{MessageKind, SmsMessage};
pub use transport::ReqwestTransport;

/// Common imports for smsgate usage.
pub mod prelude {
    pub use crate::client::{SendOptions, SmsGateClient};
    pub use crate::config::{GatewayRegistry, SmsGateConfig};
    pub use crate::message::{MessageKind, SmsMessage};
    pub use crate::transport::ReqwestTransport;
    pub use smsgate_core::*;
}
