//! Error types returned by the address validation client.

use reqwest::StatusCode;

/// Errors that can occur while talking to the address validation service.
///
/// Every failure is returned to the caller of the operation that triggered it.
/// Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied input was missing or exceeded a size limit.
    ///
    /// Raised before any network activity.
    #[error(transparent)]
    InvalidArgument(#[from] ArgumentError),

    /// The service rejected the API key (HTTP 401).
    #[error("invalid api key: rejected by the address validation service")]
    InvalidCredential,

    /// The service answered with a status other than 200 or 401.
    #[error("unexpected response from address validation service: {status}")]
    UnknownService {
        /// Status code returned by the service.
        status: StatusCode,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// No HTTP response was obtained (connect, DNS, TLS, timeout) or the
    /// HTTP session could not be built.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 200 response body did not match the expected JSON shape.
    #[error("failed to decode service response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client was closed before the operation was issued.
    #[error("client has been closed")]
    Closed,
}

impl Error {
    /// Returns `true` for precondition failures on caller input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Returns `true` when the service rejected the API key.
    pub fn is_invalid_credential(&self) -> bool {
        matches!(self, Error::InvalidCredential)
    }

    /// Returns `true` when the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// HTTP status received from the service, if the failure carried one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::InvalidCredential => Some(StatusCode::UNAUTHORIZED),
            Error::UnknownService { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Precondition failures detected locally, before a request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("api key is missing or blank")]
    MissingApiKey,

    #[error("address is missing or blank")]
    MissingAddress,

    /// Address longer than [`MAX_ADDRESS_LEN`](crate::MAX_ADDRESS_LEN) characters.
    #[error("address is {len} characters long, maximum is {max}")]
    AddressTooLong { len: usize, max: usize },

    /// Joined batch longer than [`MAX_BATCH_LEN`](crate::MAX_BATCH_LEN) characters.
    #[error("joined addresses are {len} characters long, maximum is {max}")]
    BatchTooLarge { len: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_reported_for_service_errors_only() {
        assert_eq!(
            Error::InvalidCredential.status(),
            Some(StatusCode::UNAUTHORIZED)
        );

        let err = Error::UnknownService {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".into(),
        };
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert!(!err.is_invalid_credential());

        let err = Error::from(ArgumentError::MissingAddress);
        assert_eq!(err.status(), None);
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn argument_errors_are_displayed_transparently() {
        let err = Error::from(ArgumentError::AddressTooLong { len: 513, max: 512 });
        assert_eq!(
            err.to_string(),
            "address is 513 characters long, maximum is 512"
        );
    }
}
