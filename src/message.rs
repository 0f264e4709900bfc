use std::collections::BTreeMap;

use smsgate_core::GatewayError;

/// Kind of SMS content, which decides segment arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Text,
    Unicode,
}

/// A composed notification message: content plus the per-message extras a
/// host's notification layer attaches before handing it to the client.
#[derive(Debug, Clone, Default)]
pub struct SmsMessage {
    pub content: String,
    /// Extra API parameters, merged over the gateway defaults.
    pub params: BTreeMap<String, String>,
    /// Extra HTTP headers, merged over the gateway headers.
    pub headers: BTreeMap<String, String>,
    /// Gateway to use instead of the configured default.
    pub gateway: Option<String>,
    pub kind: MessageKind,
}

impl SmsMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Fluent alias for [`SmsMessage::new`].
    pub fn create(content: impl Into<String>) -> Self {
        Self::new(content)
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = Some(gateway.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

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

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

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

    /// Mark the message as unicode so segment estimation uses UCS-2 limits.
    pub fn unicode(mut self) -> Self {
        self.kind = MessageKind::Unicode;
        self
    }

    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Truncated preview for logs, with an ellipsis when shortened.
    pub fn preview(&self, length: usize) -> String {
        if self.len() <= length {
            return self.content.clone();
        }
        let truncated: String = self.content.chars().take(length).collect();
        format!("{}...", truncated)
    }

    /// Estimate the number of SMS segments this message occupies.
    ///
    /// GSM 7-bit: 160 chars per single segment, 153 when concatenated.
    /// Unicode/UCS-2: 70 per single segment, 67 when concatenated.
    pub fn estimate_segments(&self) -> usize {
        let length = self.len();
        if length == 0 {
            return 0;
        }
        let unicode = self.kind == MessageKind::Unicode || !self.content.is_ascii();
        if unicode {
            if length <= 70 {
                1
            } else {
                length.div_ceil(67)
            }
        } else if length <= 160 {
            1
        } else {
            length.div_ceil(153)
        }
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.content.trim().is_empty() {
            return Err(GatewayError::InvalidArgument(
                "message content cannot be empty".into(),
            ));
        }
        Ok(())
    }
}

impl From<&str> for SmsMessage {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for SmsMessage {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_params_and_headers() {
        let message = SmsMessage::create("hello")
            .gateway("msg91")
            .param("sender", "ACME")
            .header("x-api-key", "k1");
        assert_eq!(message.gateway.as_deref(), Some("msg91"));
        assert_eq!(message.params.get("sender").unwrap(), "ACME");
        assert_eq!(message.headers.get("x-api-key").unwrap(), "k1");
    }

    #[test]
    fn short_text_is_one_segment() {
        assert_eq!(SmsMessage::new("hello").estimate_segments(), 1);
        assert_eq!(SmsMessage::new("a".repeat(160)).estimate_segments(), 1);
    }

    #[test]
    fn long_text_uses_concatenated_segments() {
        assert_eq!(SmsMessage::new("a".repeat(161)).estimate_segments(), 2);
        assert_eq!(SmsMessage::new("a".repeat(306)).estimate_segments(), 2);
        assert_eq!(SmsMessage::new("a".repeat(307)).estimate_segments(), 3);
    }

    #[test]
    fn unicode_detection_tightens_limits() {
        let message = SmsMessage::new("न".repeat(71));
        assert_eq!(message.estimate_segments(), 2);
        assert_eq!(SmsMessage::new("न".repeat(70)).estimate_segments(), 1);
    }

    #[test]
    fn explicit_unicode_flag_applies_to_ascii() {
        let message = SmsMessage::new("a".repeat(71)).unicode();
        assert_eq!(message.estimate_segments(), 2);
    }

    #[test]
    fn empty_message_is_zero_segments_and_invalid() {
        let message = SmsMessage::new("");
        assert_eq!(message.estimate_segments(), 0);
        assert!(message.validate().is_err());
    }

    #[test]
    fn preview_truncates_with_ellipsis() {
        let message = SmsMessage::new("a very long notification body");
        assert_eq!(message.preview(6), "a very...");
        assert_eq!(message.preview(100), "a very long notification body");
    }
}
