use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::GatewayError;

/// HTTP methods a gateway template may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Raw, serde-deserializable gateway template as it appears in configuration.
///
/// Field names follow the configuration file shape; everything except `url`
/// and the two parameter names is optional. Validation happens when the raw
/// form is converted into a [`GatewayTemplate`], not at deserialization, so
/// configuration problems surface as [`GatewayError`] values with the
/// offending gateway named.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTemplate {
    /// Request method, `GET` or `POST`. Defaults to `GET`.
    #[serde(default)]
    pub method: Option<String>,
    /// Absolute base URL of the provider endpoint.
    #[serde(default)]
    pub url: String,
    /// Parameter-name mapping and gateway-default parameters.
    #[serde(default)]
    pub params: RawParams,
    /// Headers sent with every request to this gateway.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Send the POST payload as a JSON body instead of form-encoded.
    #[serde(default)]
    pub json: bool,
    /// Optional top-level key the recipient/message object is nested under,
    /// as a single-element list (batch-message shape some providers require).
    #[serde(default)]
    pub wrapper: Option<String>,
    /// Parameters merged into the wrapped object only.
    #[serde(default)]
    pub wrapper_params: BTreeMap<String, String>,
    /// Prefix every recipient with the effective country code.
    #[serde(default)]
    pub add_code: bool,
    /// When sending JSON with a single recipient, wrap it in a one-element
    /// list. Defaults to true when absent.
    #[serde(default)]
    pub json_to_array: Option<bool>,
}

/// The `params` block of a raw template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawParams {
    /// Provider's parameter name for the recipient value.
    #[serde(default)]
    pub send_to_param_name: String,
    /// Provider's parameter name for the message body.
    #[serde(default)]
    pub msg_param_name: String,
    /// Gateway-default parameters merged into every request.
    #[serde(default)]
    pub others: BTreeMap<String, String>,
}

/// A validated gateway request template.
///
/// Only obtainable through [`GatewayTemplate::from_raw`], so holders can rely
/// on the URL being absolute, both parameter names being non-empty, and the
/// method/wrapper combination being consistent.
#[derive(Debug, Clone)]
pub struct GatewayTemplate {
    pub method: HttpMethod,
    pub url: Url,
    pub send_to_param_name: String,
    pub msg_param_name: String,
    pub other_params: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub is_json: bool,
    pub wrapper_key: Option<String>,
    pub wrapper_params: BTreeMap<String, String>,
    pub add_country_code: bool,
    pub json_to_array: bool,
}

impl GatewayTemplate {
    /// Validate a raw template for the named gateway.
    pub fn from_raw(gateway: &str, raw: RawTemplate) -> Result<Self, GatewayError> {
        let method = match raw.method.as_deref().map(str::trim) {
            None | Some("") => HttpMethod::Get,
            Some(m) if m.eq_ignore_ascii_case("GET") => HttpMethod::Get,
            Some(m) if m.eq_ignore_ascii_case("POST") => HttpMethod::Post,
            Some(m) => return Err(GatewayError::UnsupportedMethod(m.to_string())),
        };

        if raw.url.trim().is_empty() {
            return Err(GatewayError::invalid_template(gateway, "url is required"));
        }
        let url = Url::parse(raw.url.trim()).map_err(|e| {
            GatewayError::invalid_template(gateway, format!("invalid url `{}`: {}", raw.url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(GatewayError::invalid_template(
                gateway,
                format!("url must be http(s), got scheme `{}`", url.scheme()),
            ));
        }

        if raw.params.send_to_param_name.trim().is_empty() {
            return Err(GatewayError::invalid_template(
                gateway,
                "missing required config: params.send_to_param_name",
            ));
        }
        if raw.params.msg_param_name.trim().is_empty() {
            return Err(GatewayError::invalid_template(
                gateway,
                "missing required config: params.msg_param_name",
            ));
        }

        // Treat an empty wrapper string the same as no wrapper.
        let wrapper_key = raw
            .wrapper
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string);
        if wrapper_key.is_some() && method == HttpMethod::Get {
            return Err(GatewayError::invalid_template(
                gateway,
                "GET gateways cannot use a payload wrapper",
            ));
        }

        Ok(Self {
            method,
            url,
            send_to_param_name: raw.params.send_to_param_name,
            msg_param_name: raw.params.msg_param_name,
            other_params: raw.params.others,
            headers: raw.headers,
            is_json: raw.json,
            wrapper_key,
            wrapper_params: raw.wrapper_params,
            add_country_code: raw.add_code,
            json_to_array: raw.json_to_array.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_raw(url: &str) -> RawTemplate {
        RawTemplate {
            url: url.to_string(),
            params: RawParams {
                send_to_param_name: "to".into(),
                msg_param_name: "msg".into(),
                others: BTreeMap::new(),
            },
            ..RawTemplate::default()
        }
    }

    #[test]
    fn minimal_template_defaults() {
        let t = GatewayTemplate::from_raw("acme", minimal_raw("https://sms.example.com/push")).unwrap();
        assert_eq!(t.method, HttpMethod::Get);
        assert!(!t.is_json);
        assert!(t.json_to_array);
        assert!(t.wrapper_key.is_none());
    }

    #[test]
    fn rejects_missing_url() {
        let mut raw = minimal_raw("");
        raw.url = "  ".into();
        let err = GatewayTemplate::from_raw("acme", raw).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidTemplate { .. }));
        assert!(err.to_string().contains("url is required"));
    }

    #[test]
    fn rejects_malformed_url() {
        let err = GatewayTemplate::from_raw("acme", minimal_raw("not a url")).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidTemplate { .. }));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = GatewayTemplate::from_raw("acme", minimal_raw("ftp://sms.example.com")).unwrap_err();
        assert!(err.to_string().contains("http(s)"));
    }

    #[test]
    fn rejects_missing_param_names() {
        let mut raw = minimal_raw("https://sms.example.com");
        raw.params.msg_param_name = String::new();
        let err = GatewayTemplate::from_raw("acme", raw).unwrap_err();
        assert!(err.to_string().contains("msg_param_name"));
    }

    #[test]
    fn rejects_unknown_method() {
        let mut raw = minimal_raw("https://sms.example.com");
        raw.method = Some("PATCH".into());
        let err = GatewayTemplate::from_raw("acme", raw).unwrap_err();
        assert!(matches!(err, GatewayError::UnsupportedMethod(m) if m == "PATCH"));
    }

    #[test]
    fn method_is_case_insensitive() {
        let mut raw = minimal_raw("https://sms.example.com");
        raw.method = Some("post".into());
        let t = GatewayTemplate::from_raw("acme", raw).unwrap();
        assert_eq!(t.method, HttpMethod::Post);
    }

    #[test]
    fn rejects_get_with_wrapper() {
        let mut raw = minimal_raw("https://sms.example.com");
        raw.wrapper = Some("sms".into());
        let err = GatewayTemplate::from_raw("acme", raw).unwrap_err();
        assert!(err.to_string().contains("wrapper"));
    }

    #[test]
    fn empty_wrapper_is_no_wrapper() {
        let mut raw = minimal_raw("https://sms.example.com");
        raw.wrapper = Some("  ".into());
        let t = GatewayTemplate::from_raw("acme", raw).unwrap();
        assert!(t.wrapper_key.is_none());
    }
}
