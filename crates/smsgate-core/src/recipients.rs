use crate::GatewayError;

/// One phone number or an ordered list of phone numbers.
///
/// Replaces the string-or-array polymorphism of dynamically typed gateway
/// clients with an exhaustive variant, so bulk handling is statically
/// checked at every branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    Single(String),
    Many(Vec<String>),
}

impl Recipients {
    /// Number of recipients.
    pub fn len(&self) -> usize {
        match self {
            Recipients::Single(_) => 1,
            Recipients::Many(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Recipients::Single(n) => n.is_empty(),
            Recipients::Many(list) => list.is_empty(),
        }
    }

    /// Reject empty recipient sets and blank entries before any I/O.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.is_empty() {
            return Err(GatewayError::InvalidArgument(
                "recipient phone number(s) cannot be empty".into(),
            ));
        }
        let blank = match self {
            Recipients::Single(n) => n.trim().is_empty(),
            Recipients::Many(list) => list.iter().any(|n| n.trim().is_empty()),
        };
        if blank {
            return Err(GatewayError::InvalidArgument(
                "recipient list contains a blank phone number".into(),
            ));
        }
        Ok(())
    }
}

impl From<&str> for Recipients {
    fn from(n: &str) -> Self {
        Recipients::Single(n.to_string())
    }
}

impl From<String> for Recipients {
    fn from(n: String) -> Self {
        Recipients::Single(n)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(list: Vec<String>) -> Self {
        Recipients::Many(list)
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(list: Vec<&str>) -> Self {
        Recipients::Many(list.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Recipients {
    fn from(list: &[&str]) -> Self {
        Recipients::Many(list.iter().map(|n| n.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_invalid() {
        let err = Recipients::Many(vec![]).validate().unwrap_err();
        assert!(matches!(err, GatewayError::InvalidArgument(_)));
    }

    #[test]
    fn blank_entry_is_invalid() {
        let err = Recipients::from(vec!["5550001111", "  "]).validate().unwrap_err();
        assert!(matches!(err, GatewayError::InvalidArgument(_)));
    }

    #[test]
    fn single_blank_is_invalid() {
        assert!(Recipients::from("   ").validate().is_err());
        assert!(Recipients::Single(String::new()).validate().is_err());
    }

    #[test]
    fn valid_inputs_pass() {
        assert!(Recipients::from("5550001111").validate().is_ok());
        assert!(Recipients::from(vec!["1", "2"]).validate().is_ok());
        assert_eq!(Recipients::from(vec!["1", "2"]).len(), 2);
    }
}
