use crate::core::error::AppError;
use crate::features::session::{Session, SessionStore};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(auth_header) = auth_header {
                if let Some(encoded) = auth_header.strip_prefix("Basic ") {
                    if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                        if let Ok(creds) = String::from_utf8(decoded) {
                            if creds == *credentials {
                                return Ok(next.run(req).await);
                            }
                        }
                    }
                }
            }

            let response = (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
                "Unauthorized",
            )
                .into_response();

            Err(response)
        })
    }
}

/// Find the session token among the request's cookies
fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// Resolve the caller's session and expose it to handlers via request extensions.
///
/// New sessions are announced to the client with a `Set-Cookie` header.
pub async fn session_middleware(
    State(store): State<Arc<SessionStore>>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = session_token(req.headers(), store.cookie_name());
    let (session, is_new) = store.resolve(token).await;
    let id = session.id;

    req.extensions_mut().insert(session);
    let mut response = next.run(req).await;

    if is_new {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            store.cookie_name(),
            id
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Invalid session cookie header: {}", e),
        }
    }

    response
}

/// Gate for HTML pages: anonymous callers are sent to the sign-in page
pub async fn require_login(req: Request, next: Next) -> Response {
    let authenticated = req
        .extensions()
        .get::<Session>()
        .is_some_and(|s| s.authenticated);

    if !authenticated {
        return Redirect::to("/").into_response();
    }

    next.run(req).await
}

/// Gate for JSON routes: anonymous callers get a 401 envelope
pub async fn require_login_api(req: Request, next: Next) -> Result<Response, AppError> {
    let authenticated = req
        .extensions()
        .get::<Session>()
        .is_some_and(|s| s.authenticated);

    if !authenticated {
        return Err(AppError::Unauthorized(
            "Sign in to access the catalog API".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SessionConfig;
    use axum::{body::Body, middleware::from_fn, routing::get, Router};
    use tower::ServiceExt;

    fn gated_app(store: Arc<SessionStore>) -> Router {
        Router::new()
            .route("/page", get(|| async { "page" }))
            .route_layer(from_fn(require_login))
            .merge(
                Router::new()
                    .route("/api", get(|| async { "api" }))
                    .route_layer(from_fn(require_login_api)),
            )
            .layer(axum::middleware::from_fn_with_state(
                store,
                session_middleware,
            ))
    }

    #[tokio::test]
    async fn test_gates_reject_anonymous_sessions() {
        let app = gated_app(Arc::new(SessionStore::new(SessionConfig::default())));

        let response = app
            .clone()
            .oneshot(axum::http::Request::get("/page").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(response.headers().contains_key(header::SET_COOKIE));

        let response = app
            .oneshot(axum::http::Request::get("/api").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_gates_pass_authenticated_sessions() {
        let store = Arc::new(SessionStore::new(SessionConfig::default()));
        let (session, _) = store.resolve(None).await;
        session.login().await;
        let app = gated_app(Arc::clone(&store));

        let cookie = format!("catalog_session={}", session.id);
        let response = app
            .oneshot(
                axum::http::Request::get("/page")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        // Known session: no new cookie
        assert!(!response.headers().contains_key(header::SET_COOKIE));
    }

    #[test]
    fn test_session_token_found_among_cookies() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; catalog_session={}", id)).unwrap(),
        );

        assert_eq!(session_token(&headers, "catalog_session"), Some(id));
    }

    #[test]
    fn test_session_token_rejects_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("catalog_session=not-a-uuid"),
        );

        assert_eq!(session_token(&headers, "catalog_session"), None);
        assert_eq!(session_token(&HeaderMap::new(), "catalog_session"), None);
    }
}
