use axum::extract::FromRef;
use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use super::history::LoginHistory;
use super::repo_types::Profile;
use crate::config::SessionConfig;
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Signed payload carried by the session cookie: the authenticated user's
/// public profile plus the two expiry clocks. `exp` is the absolute
/// deadline fixed at login; `seen` slides forward on activity and bounds
/// the idle window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // user name
    pub email: String,
    pub history: LoginHistory,
    pub iat: i64,
    pub exp: i64,
    pub seen: i64,
}

/// HS256 signing/verification keys plus the session durations.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    duration_secs: i64,
    active_secs: i64,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        let SessionConfig {
            secret,
            duration_secs,
            active_secs,
        } = state.config.session.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            duration_secs,
            active_secs,
        }
    }
}

impl SessionKeys {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            duration_secs: config.duration_secs,
            active_secs: config.active_secs,
        }
    }

    fn sign(&self, claims: &SessionClaims) -> anyhow::Result<String> {
        let token = encode(&Header::default(), claims, &self.encoding)?;
        Ok(token)
    }

    /// Opens a fresh session for a just-authenticated profile.
    pub fn issue(&self, profile: &Profile) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = SessionClaims {
            sub: profile.user_name.clone(),
            email: profile.email.clone(),
            history: profile.login_history.clone(),
            iat: now,
            exp: now + self.duration_secs,
            seen: now,
        };
        let token = self.sign(&claims)?;
        debug!(user_name = %claims.sub, "session issued");
        Ok(token)
    }

    /// Verifies signature and the absolute deadline, then the idle window.
    /// Either clock running out makes the bearer anonymous again.
    pub fn verify(&self, token: &str) -> anyhow::Result<SessionClaims> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<SessionClaims>(token, &self.decoding, &validation)?;
        let claims = data.claims;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        if now > claims.seen + self.active_secs {
            anyhow::bail!("session idle-expired");
        }
        debug!(user_name = %claims.sub, "session verified");
        Ok(claims)
    }

    /// Re-signs the claims with the activity clock moved to now. The
    /// absolute deadline is untouched, so sliding never outlives it.
    pub fn refresh(&self, mut claims: SessionClaims) -> anyhow::Result<String> {
        claims.seen = OffsetDateTime::now_utc().unix_timestamp();
        self.sign(&claims)
    }

    /// Builds the Set-Cookie value carrying `token`.
    pub fn cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::seconds(self.duration_secs))
            .build()
    }

    /// Expired cookie that tells the client to drop the session.
    pub fn removal_cookie() -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE, "");
        cookie.set_path("/");
        cookie.make_removal();
        cookie
    }
}
