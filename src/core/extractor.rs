use axum::{
    body::Body,
    extract::{
        rejection::{FormRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
    Form,
};
use serde::de::DeserializeOwned;

use crate::core::error::{AppError, PageError};
use crate::features::session::Session;

/// Form extractor whose rejections render the HTML error page
pub struct PageForm<T>(pub T);

impl<T, S> FromRequest<S> for PageForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = PageFormRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(PageFormRejection(rejection)),
        }
    }
}

pub struct PageFormRejection(FormRejection);

impl IntoResponse for PageFormRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            FormRejection::InvalidFormContentType(err) => {
                format!("Invalid form content type: {}", err)
            }
            FormRejection::FailedToDeserializeForm(err) => format!("Invalid form data: {}", err),
            FormRejection::FailedToDeserializeFormBody(err) => {
                format!("Invalid form data: {}", err)
            }
            _ => "Failed to read form submission".to_string(),
        };

        PageError(AppError::BadRequest(message)).into_response()
    }
}

/// Path extractor whose rejections render the HTML error page
pub struct PagePath<T>(pub T);

impl<T, S> FromRequestParts<S> for PagePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|rejection: PathRejection| {
                PageError(AppError::BadRequest(format!(
                    "Invalid path: {}",
                    rejection.body_text()
                )))
            })
    }
}

/// Query-string extractor whose rejections render the HTML error page
pub struct PageParams<T>(pub T);

impl<T, S> FromRequestParts<S> for PageParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection: QueryRejection| {
                PageError(AppError::BadRequest(format!(
                    "Invalid query: {}",
                    rejection.body_text()
                )))
            })
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("Session middleware not installed".to_string()))
    }
}
