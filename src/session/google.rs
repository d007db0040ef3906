//! Google identity - ID token claims, userinfo lookup, sign-in URL

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use super::{AuthError, User};

pub const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
pub const SCOPES: &str = "openid email profile";

/// Profile claims carried by an ID token or returned by userinfo
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GoogleClaims {
    #[serde(default)]
    pub sub: String,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
    pub iss: Option<String>,
    pub aud: Option<String>,
    pub exp: Option<i64>,
    pub iat: Option<i64>,
}

impl GoogleClaims {
    pub fn into_user(self, access_token: Option<String>) -> Result<User, AuthError> {
        if self.sub.is_empty() {
            return Err(AuthError::MissingSubject);
        }

        let name = self.name
            .or_else(|| match (self.given_name, self.family_name) {
                (Some(g), Some(f)) => Some(format!("{} {}", g, f)),
                (g, f) => g.or(f),
            })
            .or_else(|| self.email.clone())
            .unwrap_or_default();

        Ok(User {
            id: self.sub,
            name,
            email: self.email.unwrap_or_default(),
            picture: self.picture,
            access_token,
        })
    }
}

/// Decode the payload of an ID token. The signature is not verified.
pub fn decode_id_token(token: &str) -> Result<GoogleClaims, AuthError> {
    let mut parts = token.trim().split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(AuthError::MalformedToken("expected three dot-separated segments".into())),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::MalformedToken(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| AuthError::MalformedToken(e.to_string()))
}

/// Build a user from an ID token credential
pub fn user_from_id_token(token: &str) -> Result<User, AuthError> {
    decode_id_token(token)?.into_user(None)
}

/// Exchange an access token for the user's profile
pub async fn fetch_userinfo(http: &reqwest::Client, endpoint: &str, access_token: &str) -> Result<User, AuthError> {
    let response = http
        .get(endpoint)
        .bearer_auth(access_token)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::Userinfo(status));
    }

    let claims: GoogleClaims = response.json().await?;
    debug!("Userinfo fetched for {}", claims.sub);
    claims.into_user(Some(access_token.to_string()))
}

/// Implicit-flow sign-in URL; the access token comes back in the redirect fragment
pub fn authorization_url(client_id: Option<&str>, redirect_uri: &str) -> Result<Url, AuthError> {
    let client_id = client_id
        .filter(|c| !c.is_empty())
        .ok_or(AuthError::MissingClientId)?;

    Url::parse_with_params(
        AUTH_ENDPOINT,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "token"),
            ("scope", SCOPES),
            ("include_granted_scopes", "true"),
        ],
    )
    .map_err(|e| AuthError::InvalidUrl(e.to_string()))
}
