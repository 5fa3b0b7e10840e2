use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use profiledeck_profiles::{
    errors::{FETCH_PROFILES_FAILED, FETCH_PROFILE_FAILED},
    FetchError, LookupError, ProfilesError,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Profiles(#[from] ProfilesError),
    #[error("{0}")]
    Fetch(#[from] FetchError),
    #[error("{0}")]
    Lookup(#[from] LookupError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    /// Message safe to return to clients. Upstream and validation detail is
    /// logged here and replaced by the generic fetch message.
    fn public_message(&self) -> String {
        match self {
            ApiError::Profiles(ProfilesError::InvalidArgument(_)) => self.to_string(),
            ApiError::Profiles(e) => {
                tracing::warn!("Upstream failure: {}", e);
                FETCH_PROFILES_FAILED.to_string()
            }
            ApiError::Lookup(LookupError::Invalid(e)) => {
                tracing::warn!("Upstream profile failed validation: {}", e);
                FETCH_PROFILE_FAILED.to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Profiles(ProfilesError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            ApiError::Profiles(_) | ApiError::Fetch(_) | ApiError::Lookup(_) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.public_message(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_is_bad_request() {
        let err = ApiError::from(ProfilesError::InvalidArgument("page size 0".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let err = ApiError::from(ProfilesError::Status { status: 503 });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn invalid_upstream_profile_gets_generic_message() {
        let err = ApiError::from(LookupError::Invalid(
            profiledeck_profiles::validate(&serde_json::json!({})).unwrap_err(),
        ));
        assert_eq!(err.public_message(), "Failed to fetch profile");
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn not_found_keeps_status() {
        assert_eq!(
            ApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
