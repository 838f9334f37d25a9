//! Error conversions - From implementations for common error types

use super::app_error::AppError;

// A JSON failure here always means the other side sent something we cannot
// read, so it is classified as a gateway problem rather than a client one.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_gateway("Malformed JSON payload").with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}
