use crate::GatewayError;

/// The recorded outcome of one send attempt.
///
/// A report is produced whenever the client got far enough to dispatch the
/// request. HTTP 4xx/5xx responses are not errors at this layer; they are
/// successful observations of a failed delivery, visible through
/// [`SendReport::response_code`] and [`SendReport::is_successful`]. Only a
/// transport-level failure (connection refused, timeout, no response) leaves
/// the status absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReport {
    body: String,
    status: Option<u16>,
}

impl SendReport {
    /// A response was received, whatever its status code.
    pub fn received(status: u16, body: String) -> Self {
        Self {
            body,
            status: Some(status),
        }
    }

    /// The network call never completed; `description` is the transport
    /// error text.
    pub fn unavailable(description: String) -> Self {
        Self {
            body: description,
            status: None,
        }
    }

    /// Raw response body, or the transport error description when no
    /// response was received.
    pub fn response(&self) -> &str {
        &self.body
    }

    /// HTTP status code of the last request, 0 when the call never
    /// completed.
    pub fn response_code(&self) -> u16 {
        self.status.unwrap_or(0)
    }

    /// Recorded status, `None` when the transport failed.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// True only when a status code was recorded and it is in [200, 300).
    pub fn is_successful(&self) -> bool {
        matches!(self.status, Some(code) if (200..300).contains(&code))
    }

    /// Strict-mode conversion: turn a captured transport failure into an
    /// error for callers that want failure propagation instead of
    /// inspection.
    pub fn into_result(self) -> Result<SendReport, GatewayError> {
        match self.status {
            Some(_) => Ok(self),
            None => Err(GatewayError::Transport(self.body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn received_2xx_is_successful() {
        let report = SendReport::received(201, "queued".into());
        assert!(report.is_successful());
        assert_eq!(report.response_code(), 201);
        assert_eq!(report.response(), "queued");
    }

    #[test]
    fn received_4xx_is_not_successful_but_observable() {
        let report = SendReport::received(404, "not found".into());
        assert!(!report.is_successful());
        assert_eq!(report.response_code(), 404);
        assert!(report.clone().into_result().is_ok());
    }

    #[test]
    fn unavailable_uses_sentinel_code() {
        let report = SendReport::unavailable("connection refused".into());
        assert_eq!(report.response_code(), 0);
        assert_eq!(report.status(), None);
        assert!(!report.is_successful());
        assert!(!report.response().is_empty());
    }

    #[test]
    fn into_result_raises_only_transport_failures() {
        let err = SendReport::unavailable("timed out".into())
            .into_result()
            .unwrap_err();
        assert!(matches!(err, GatewayError::Transport(msg) if msg == "timed out"));
    }
}
