//! Error types for the function update path
//!
//! Every variant carries enough context (service, field, offending value) to
//! produce a precise client-facing message. The gateway maps them onto HTTP
//! status codes via [`Error::is_client_error`] and friends.

use thiserror::Error;

/// Main error type for function updates
#[derive(Debug, Error)]
pub enum Error {
    /// Request body could not be decoded
    #[error("invalid request body: {message}")]
    Decode {
        /// Decoder message
        message: String,
    },

    /// Request decoded but cannot be acted on
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Description of what's invalid
        message: String,
    },

    /// No Deployment exists for the function
    #[error("function {service} not found")]
    NotFound {
        /// Name of the function
        service: String,
    },

    /// A resource limit or request is not a valid quantity
    #[error("invalid quantity for {field} '{value}': {reason}")]
    MalformedResourceQuantity {
        /// Field path (e.g., "limits.memory")
        field: String,
        /// The offending value
        value: String,
        /// Why parsing failed
        reason: String,
    },

    /// A placement constraint is not of the form `key=value`
    #[error("invalid constraint '{constraint}': {reason}")]
    InvalidConstraint {
        /// The offending constraint
        constraint: String,
        /// Why it was rejected
        reason: String,
    },

    /// The API server rejected the update because the object changed since it was read
    #[error("conflict updating function {service}: {message}")]
    Conflict {
        /// Name of the function
        service: String,
        /// API server message
        message: String,
    },

    /// The API server rejected or failed to apply the mutated Deployment
    #[error("failed to update function {service}: {message}")]
    Submission {
        /// Name of the function
        service: String,
        /// API server message
        message: String,
    },

    /// Kubernetes API error outside of submission
    #[error("kubernetes error: {source}")]
    Kube {
        /// The underlying kube-rs error
        #[from]
        source: kube::Error,
    },
}

impl Error {
    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: msg.into(),
        }
    }

    /// Create a not found error for a function
    pub fn not_found(service: impl Into<String>) -> Self {
        Self::NotFound {
            service: service.into(),
        }
    }

    /// Create a malformed quantity error
    pub fn malformed_quantity(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedResourceQuantity {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid constraint error
    pub fn invalid_constraint(constraint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            constraint: constraint.into(),
            reason: reason.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(service: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Conflict {
            service: service.into(),
            message: msg.into(),
        }
    }

    /// Create a submission error
    pub fn submission(service: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Submission {
            service: service.into(),
            message: msg.into(),
        }
    }

    /// Whether the caller sent something we refuse to apply
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. }
                | Self::InvalidRequest { .. }
                | Self::MalformedResourceQuantity { .. }
                | Self::InvalidConstraint { .. }
        )
    }

    /// Whether the whole fetch/reconcile/submit sequence may be retried
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
