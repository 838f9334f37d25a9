//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to HTTP status codes.

/// Error classification
///
/// Each variant maps to one RFC 9110 status code. The gateway variants
/// (502/503/504) describe failures of the upstream backend API rather than
/// of this service.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::GatewayTimeout;
/// assert_eq!(kind.status_code(), 504);
/// assert_eq!(kind.as_str(), "Gateway Timeout");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - Bad Request
    BadRequest,
    /// 401 - Unauthorized: no valid session
    Unauthorized,
    /// 422 - Unprocessable Entity: well-formed but invalid input
    UnprocessableEntity,
    /// 500 - Internal Server Error
    InternalServerError,
    /// 502 - Bad Gateway: upstream answered with garbage
    BadGateway,
    /// 503 - Service Unavailable: upstream unreachable
    ServiceUnavailable,
    /// 504 - Gateway Timeout: upstream did not answer in time
    GatewayTimeout,
}

impl ErrorKind {
    /// HTTP status code for this kind
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::InternalServerError => 500,
            ErrorKind::BadGateway => 502,
            ErrorKind::ServiceUnavailable => 503,
            ErrorKind::GatewayTimeout => 504,
        }
    }

    /// Standard reason phrase, safe to show to end users
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::BadGateway => "Bad Gateway",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
            ErrorKind::GatewayTimeout => "Gateway Timeout",
        }
    }

    /// 5xx kinds
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Failures caused by the upstream backend rather than by us or the client
    #[inline]
    pub const fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::BadGateway | ErrorKind::ServiceUnavailable | ErrorKind::GatewayTimeout
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), 400);
        assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
        assert_eq!(ErrorKind::UnprocessableEntity.status_code(), 422);
        assert_eq!(ErrorKind::InternalServerError.status_code(), 500);
        assert_eq!(ErrorKind::BadGateway.status_code(), 502);
        assert_eq!(ErrorKind::ServiceUnavailable.status_code(), 503);
        assert_eq!(ErrorKind::GatewayTimeout.status_code(), 504);
    }

    #[test]
    fn test_is_server_error() {
        assert!(!ErrorKind::BadRequest.is_server_error());
        assert!(!ErrorKind::UnprocessableEntity.is_server_error());
        assert!(ErrorKind::InternalServerError.is_server_error());
        assert!(ErrorKind::GatewayTimeout.is_server_error());
    }

    #[test]
    fn test_is_upstream_error() {
        assert!(ErrorKind::BadGateway.is_upstream_error());
        assert!(ErrorKind::ServiceUnavailable.is_upstream_error());
        assert!(ErrorKind::GatewayTimeout.is_upstream_error());
        assert!(!ErrorKind::InternalServerError.is_upstream_error());
        assert!(!ErrorKind::Unauthorized.is_upstream_error());
    }
}
