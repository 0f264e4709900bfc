use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::{GatewayTemplate, HttpMethod, Recipients};

/// Recipient value after template formatting: either a single string (comma
/// joined for bulk non-JSON sends) or a list (JSON sends).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MobileValue {
    Text(String),
    List(Vec<String>),
}

impl MobileValue {
    fn into_json(self) -> Value {
        match self {
            MobileValue::Text(s) => Value::String(s),
            MobileValue::List(list) => Value::Array(list.into_iter().map(Value::String).collect()),
        }
    }

    fn into_text(self) -> String {
        match self {
            MobileValue::Text(s) => s,
            // Non-JSON payloads always flatten lists first; joining here keeps
            // the conversion total rather than panicking.
            MobileValue::List(list) => list.join(","),
        }
    }
}

/// The outgoing request payload, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// GET: parameters go on the URL query string, no body.
    Query(Vec<(String, String)>),
    /// POST without `json`: form-encoded body.
    Form(Vec<(String, String)>),
    /// POST with `json`: JSON body.
    Json(Value),
}

/// Format the recipient value according to the template.
///
/// Applies country-code prefixing element-wise, flattens bulk lists to a
/// comma-joined string for non-JSON gateways, and wraps a lone recipient in a
/// one-element list for JSON gateways unless `json_to_array` is false.
pub fn prepare_mobile(
    to: &Recipients,
    template: &GatewayTemplate,
    country_code: &str,
) -> MobileValue {
    let mut mobile = match to {
        Recipients::Single(n) => MobileValue::Text(n.clone()),
        Recipients::Many(list) => MobileValue::List(list.clone()),
    };

    if template.add_country_code {
        mobile = match mobile {
            MobileValue::Text(n) => MobileValue::Text(format!("{}{}", country_code, n)),
            MobileValue::List(list) => MobileValue::List(
                list.into_iter()
                    .map(|n| format!("{}{}", country_code, n))
                    .collect(),
            ),
        };
    }

    match (template.is_json, mobile) {
        (false, MobileValue::List(list)) => MobileValue::Text(list.join(",")),
        (true, MobileValue::Text(n)) if template.json_to_array => MobileValue::List(vec![n]),
        (_, mobile) => mobile,
    }
}

/// Build the outgoing payload from a validated template, a formatted
/// recipient value, and the per-call parameter sets.
///
/// Merge precedence: staged wrapper params override the template's
/// `wrapper_params`; `extra_params` override the template's `other_params`
/// and always land on the outer payload, never inside the wrapped object.
pub fn build_payload(
    template: &GatewayTemplate,
    mobile: MobileValue,
    message: &str,
    staged_wrapper_params: &BTreeMap<String, String>,
    extra_params: &BTreeMap<String, String>,
) -> Payload {
    match (template.method, template.is_json) {
        (HttpMethod::Get, _) => Payload::Query(flat_payload(template, mobile, message, extra_params)),
        (HttpMethod::Post, true) => Payload::Json(Value::Object(json_payload(
            template,
            mobile,
            message,
            staged_wrapper_params,
            extra_params,
        ))),
        (HttpMethod::Post, false) => {
            if template.wrapper_key.is_some() {
                // Form encoding cannot represent the nested batch shape, so
                // the wrapped list is carried as a JSON-encoded string value.
                let outer = json_payload(template, mobile, message, staged_wrapper_params, extra_params);
                let flat = outer
                    .into_iter()
                    .map(|(k, v)| match v {
                        Value::String(s) => (k, s),
                        other => (k, other.to_string()),
                    })
                    .collect();
                Payload::Form(flat)
            } else {
                Payload::Form(flat_payload(template, mobile, message, extra_params))
            }
        }
    }
}

/// Outer payload for non-wrapped, non-JSON requests: plain string pairs.
fn flat_payload(
    template: &GatewayTemplate,
    mobile: MobileValue,
    message: &str,
    extra_params: &BTreeMap<String, String>,
) -> Vec<(String, String)> {
    let mut params = template.other_params.clone();
    params.insert(template.send_to_param_name.clone(), mobile.into_text());
    params.insert(template.msg_param_name.clone(), message.to_string());
    for (k, v) in extra_params {
        params.insert(k.clone(), v.clone());
    }
    params.into_iter().collect()
}

/// Outer payload as a JSON object, with the optional wrapped single-element
/// list under the template's wrapper key.
fn json_payload(
    template: &GatewayTemplate,
    mobile: MobileValue,
    message: &str,
    staged_wrapper_params: &BTreeMap<String, String>,
    extra_params: &BTreeMap<String, String>,
) -> Map<String, Value> {
    let mut outer = Map::new();
    for (k, v) in &template.other_params {
        outer.insert(k.clone(), Value::String(v.clone()));
    }

    match &template.wrapper_key {
        Some(wrapper) => {
            let mut wrapped = Map::new();
            wrapped.insert(template.send_to_param_name.clone(), mobile.into_json());
            wrapped.insert(
                template.msg_param_name.clone(),
                Value::String(message.to_string()),
            );
            for (k, v) in &template.wrapper_params {
                wrapped.insert(k.clone(), Value::String(v.clone()));
            }
            // Staged params are applied last so they win over template values.
            for (k, v) in staged_wrapper_params {
                wrapped.insert(k.clone(), Value::String(v.clone()));
            }
            outer.insert(wrapper.clone(), json!([Value::Object(wrapped)]));
        }
        None => {
            outer.insert(template.send_to_param_name.clone(), mobile.into_json());
            outer.insert(
                template.msg_param_name.clone(),
                Value::String(message.to_string()),
            );
        }
    }

    for (k, v) in extra_params {
        outer.insert(k.clone(), Value::String(v.clone()));
    }
    outer
}
