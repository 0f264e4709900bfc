/// Errors that can occur while preparing or sending an SMS.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Requested gateway has no registered template.
    #[error("no gateway configuration registered for `{0}`")]
    ConfigNotFound(String),
    /// Template is missing required fields or internally inconsistent.
    #[error("invalid template for gateway `{gateway}`: {reason}")]
    InvalidTemplate { gateway: String, reason: String },
    /// No gateway resolvable from the per-call override or configured default.
    #[error("no SMS gateway specified; pass one in SendOptions or configure a default gateway")]
    NoGatewaySpecified,
    /// Template names an HTTP method other than GET or POST.
    #[error("HTTP method `{0}` is not supported; only GET and POST are allowed")]
    UnsupportedMethod(String),
    /// Recipient or message failed validation before any I/O was attempted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Network-level failure. Captured in [`crate::SendReport`] by default;
    /// only raised through the strict `SendReport::into_result` path.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl GatewayError {
    pub fn invalid_template(gateway: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            gateway: gateway.into(),
            reason: reason.into(),
        }
    }
}
