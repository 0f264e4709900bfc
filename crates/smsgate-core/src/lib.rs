//! # smsgate-core
//!
//! Core types for the smsgate configuration-driven SMS gateway client.
//!
//! This crate provides the transport-agnostic building blocks:
//! - [`GatewayTemplate`] for validated, declarative request templates
//! - [`Recipients`] for single or bulk phone numbers
//! - [`Payload`] and [`build_payload`] for outgoing request construction
//! - [`HttpTransport`] trait as the seam to any HTTP client
//! - [`SendReport`] for the recorded outcome of one send
//!
//! ## Example
//!
//! ```rust,ignore
//! use smsgate_core::{build_payload, prepare_mobile, Recipients};
//!
//! let mobile = prepare_mobile(&Recipients::from("5550001111"), &template, "91");
//! let payload = build_payload(&template, mobile, "Hello!", &staged, &extras);
//! ```

mod error;
mod payload;
mod recipients;
mod report;
mod template;
mod transport;

pub use error::GatewayError;
pub use payload::{build_payload, prepare_mobile, MobileValue, Payload};
pub use recipients::Recipients;
pub use report::SendReport;
pub use template::{GatewayTemplate, HttpMethod, RawParams, RawTemplate};
pub use transport::{Headers, HttpRequest, HttpResponse, HttpTransport, RequestBody, TransportError};
