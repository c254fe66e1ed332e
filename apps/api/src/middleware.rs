use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;
use venue_core::{AppError, CallerContext};

use crate::error::ApiError;
use crate::state::AppState;

/// Attaches a `CallerContext` to every request.
///
/// A missing or unverifiable bearer token yields an anonymous caller; routes
/// that need an identity reject those through [`AuthenticatedCaller`].
pub async fn resolve_caller(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let caller = match bearer_token(request.headers()) {
        None => CallerContext::anonymous(),
        Some(token) => match state.token_verifier.verify(token) {
            Ok(caller_id) => CallerContext::authenticated(caller_id, token),
            Err(error) => {
                debug!(error = %error, "treating request with unverified token as anonymous");
                CallerContext::anonymous()
            }
        },
    };

    request.extensions_mut().insert(caller);
    next.run(request).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Caller that presented a valid bearer token.
pub struct AuthenticatedCaller(pub CallerContext);

impl<S> FromRequestParts<S> for AuthenticatedCaller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller = parts
            .extensions
            .get::<CallerContext>()
            .cloned()
            .unwrap_or_default();

        if caller.is_anonymous() {
            return Err(AppError::Unauthorized("authentication required".to_owned()).into());
        }

        Ok(Self(caller))
    }
}

impl AuthenticatedCaller {
    pub fn caller_id(&self) -> &str {
        self.0.caller_id().unwrap_or_default()
    }
}
