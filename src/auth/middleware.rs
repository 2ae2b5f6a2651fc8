use axum::extract::{FromRef, Request, State};
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use super::session::{SessionClaims, SessionKeys, SESSION_COOKIE};
use crate::state::AppState;

/// The authenticated session, injected into request extensions by
/// [`ensure_login`] and read back by gated handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionClaims);

/// Access gate for protected routes. Anonymous requests (no cookie, bad
/// signature, absolute or idle expiry) are redirected to `/login` and the
/// inner handler never runs. Authenticated requests slide the idle clock:
/// the response carries a re-signed cookie with an updated activity stamp.
pub async fn ensure_login(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let keys = SessionKeys::from_ref(&state);

    let claims = match jar.get(SESSION_COOKIE).map(|c| keys.verify(c.value())) {
        Some(Ok(claims)) => claims,
        Some(Err(e)) => {
            warn!(error = %e, "rejecting stale or invalid session");
            return Redirect::to("/login").into_response();
        }
        None => return Redirect::to("/login").into_response(),
    };

    request.extensions_mut().insert(CurrentUser(claims.clone()));
    let mut response = next.run(request).await;

    if let Ok(token) = keys.refresh(claims) {
        let cookie = keys.cookie(token);
        if let Ok(value) = cookie.to_string().parse() {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}
