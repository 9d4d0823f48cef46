use std::fmt;

/// Which upstream resource a request was for. Only used to word error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// The filtered listing search
    Properties,
    /// A single property lookup
    Property,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Properties => write!(f, "properties"),
            Resource::Property => write!(f, "property"),
        }
    }
}

/// Failure of the underlying transport, before any HTTP status was seen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Body(String),
}

/// Error returned by a listing or property fetch.
///
/// The `Display` form is the exact text handed back to the calling agent.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Upstream answered with a non-2xx status
    #[error("Error fetching {resource}: {status} {reason}")]
    Status {
        resource: Resource,
        status: u16,
        reason: String,
    },

    #[error("Error: {0}")]
    Fetch(#[from] FetchError),

    /// Upstream body was not valid JSON
    #[error("Error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl QueryError {
    /// HTTP status carried by the error, if upstream responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            QueryError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Tool arguments that do not fit the filter schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Tool arguments must be an object")]
    NotAnObject,

    #[error("Unknown filter: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: expected {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid value for {field}: {value:?} is not a number")]
    NotANumber { field: &'static str, value: String },

    #[error("Invalid value for {field}: expected one of {allowed}, got {value:?}")]
    NotAllowed {
        field: &'static str,
        allowed: String,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = QueryError::Status {
            resource: Resource::Property,
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "Error fetching property: 404 Not Found");
        assert_eq!(err.status(), Some(404));

        let err = QueryError::Status {
            resource: Resource::Properties,
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error fetching properties: 503 Service Unavailable"
        );
    }

    #[test]
    fn test_fetch_and_decode_messages() {
        let err = QueryError::from(FetchError::Transport("connection refused".to_string()));
        assert_eq!(err.to_string(), "Error: connection refused");
        assert_eq!(err.status(), None);

        let decode = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let expected = format!("Error: {}", decode);
        assert_eq!(QueryError::from(decode).to_string(), expected);
    }
}
