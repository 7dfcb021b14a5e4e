//! Request authentication for the InnerTube API.
//!
//! Two mutually exclusive credential variants exist:
//!
//! * Browser-session cookies. Each request is then signed with a
//!   time-boxed `SAPISIDHASH` derived from the `__Secure-3PAPISID` cookie,
//!   the request origin and the current whole second.
//! * An OAuth-style bearer token, passed through verbatim. No signing is
//!   involved; the caller checks expiry before sending.
//!
//! Header construction dispatches on the active variant rather than on
//! nullable fields, so a request can never go out half-signed.

use std::time::SystemTime;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, COOKIE, ORIGIN};
use sha1::{Digest, Sha1};
use veil::Redact;

use crate::{
    config::Config,
    error::{Error, Result},
    util,
};

/// Cookie that carries the session secret used for request signing.
const SAPISID_COOKIE: &str = "__Secure-3PAPISID";

/// Authentication material for one account session.
#[derive(Clone, Eq, PartialEq, Redact)]
pub enum Credentials {
    /// Cookie header captured from a logged-in browser session.
    Cookie {
        #[redact]
        cookies: String,
        #[redact]
        sapisid: String,
    },
    /// OAuth-style access token.
    Bearer {
        #[redact]
        token: String,
        expires_at: Option<SystemTime>,
    },
}

impl Credentials {
    /// Builds cookie credentials from a raw `Cookie` header string,
    /// extracting the signing secret from it.
    pub fn from_cookies(cookies: &str) -> Result<Self> {
        let sapisid = parse_cookies(cookies)
            .into_iter()
            .find(|(name, _)| name == SAPISID_COOKIE)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::Auth(format!("cookies do not contain {SAPISID_COOKIE}")))?;

        Ok(Self::Cookie {
            cookies: cookies.to_string(),
            sapisid,
        })
    }

    /// Builds bearer credentials. Expiry is optional because some token
    /// sources do not report one.
    #[must_use]
    pub fn bearer(token: &str, expires_at: Option<SystemTime>) -> Self {
        Self::Bearer {
            token: token.to_string(),
            expires_at,
        }
    }

    /// Whether the credentials are past their known lifetime.
    ///
    /// Cookie sessions have no client-visible expiry and always return
    /// `false`; so do bearer tokens without a known expiry.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        match self {
            Self::Cookie { .. } => false,
            Self::Bearer { expires_at, .. } => {
                expires_at.is_some_and(|at| SystemTime::now() >= at)
            }
        }
    }

    /// `authorization` header value for the active variant.
    pub fn authorization(&self, origin: &str) -> Result<HeaderValue> {
        let value = match self {
            Self::Cookie { sapisid, .. } => {
                sapisid_hash(sapisid, origin, util::now_from_epoch())
            }
            Self::Bearer { token, .. } => {
                if self.is_expired() {
                    return Err(Error::Auth("bearer token has expired".to_string()));
                }
                format!("Bearer {token}")
            }
        };

        HeaderValue::from_str(&value).map_err(Into::into)
    }
}

/// Derives the time-boxed authorization token.
///
/// The value is the hex-encoded SHA-1 digest of
/// `"{timestamp} {sapisid} {origin}"`, prefixed with the scheme and the
/// timestamp so the server can verify the window. Deterministic for a
/// fixed `(sapisid, origin, timestamp)` triple.
#[must_use]
pub fn sapisid_hash(sapisid: &str, origin: &str, timestamp: u64) -> String {
    let digest = Sha1::digest(format!("{timestamp} {sapisid} {origin}"));
    format!("SAPISIDHASH {timestamp}_{digest:x}")
}

/// Splits a raw `Cookie` header string into name/value pairs.
///
/// Pairs without an `=` are dropped; names and values are trimmed.
#[must_use]
pub fn parse_cookies(cookies: &str) -> Vec<(String, String)> {
    cookies
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Builds the header set attached to every API request.
///
/// The `cookie` header and the signed `authorization` travel together on
/// the cookie variant; the bearer variant sends only `authorization`.
pub fn headers(config: &Config, origin: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let origin_value = HeaderValue::from_str(origin)?;
    headers.try_insert(ORIGIN, origin_value.clone())?;
    headers.try_insert("x-origin", origin_value)?;
    headers.try_insert(CONTENT_TYPE, HeaderValue::from_static("application/json"))?;
    headers.try_insert(
        "X-Goog-AuthUser",
        HeaderValue::from_str(&config.auth_user)?,
    )?;

    if let Credentials::Cookie { cookies, .. } = &config.credentials {
        headers.try_insert(COOKIE, HeaderValue::from_str(cookies)?)?;
    }
    headers.try_insert(AUTHORIZATION, config.credentials.authorization(origin)?)?;

    Ok(headers)
}
