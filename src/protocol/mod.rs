//! Typed request bodies and shared wire helpers for InnerTube endpoints.
//!
//! Requests are small and their shapes are stable, so they get typed
//! `Serialize` structs:
//!
//! * [`browse`]: playlist detail, library listing and continuation pages
//! * [`edit`]: playlist creation and membership edits
//! * [`player`]: track metadata and streaming data
//!
//! Responses stay untyped (`serde_json::Value`) and are normalized by
//! [`crate::parse`], because the response schema is neither documented nor
//! stable.

pub mod browse;
pub mod edit;
pub mod player;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Client context attached to every request body.
///
/// Identifies the web client the API believes it is talking to; `hl`
/// selects the response language.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub client: ClientInfo,
    pub user: UserInfo,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_name: String,
    pub client_version: String,
    pub hl: String,
}

/// Empty by design; present because the wire format expects the key.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct UserInfo {}

impl Context {
    /// Name of the YouTube Music web client.
    const CLIENT_NAME: &'static str = "WEB_REMIX";

    /// Version string the web client reports.
    const CLIENT_VERSION: &'static str = "0.1";

    #[must_use]
    pub fn web_remix(hl: &str) -> Self {
        Self {
            client: ClientInfo {
                client_name: Self::CLIENT_NAME.to_owned(),
                client_version: Self::CLIENT_VERSION.to_owned(),
                hl: hl.to_owned(),
            },
            user: UserInfo {},
        }
    }
}

/// Parses and logs a JSON response body.
///
/// # Logging
///
/// * Success: parsed structure at TRACE level
/// * Parse error: raw JSON at TRACE level if the body was at least JSON
/// * Invalid JSON: error details at ERROR level
pub fn json<T>(body: &str, origin: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Debug,
{
    match serde_json::from_str(body) {
        Ok(result) => {
            trace!("{origin}: {result:#?}");
            Ok(result)
        }
        Err(e) => {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
                trace!("{origin}: {json:#?}");
            } else {
                error!("{origin}: failed parsing response ({e:?})");
                trace!("{body}");
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn context_serializes_to_wire_shape() {
        let context = Context::web_remix("en");
        assert_eq!(
            serde_json::to_value(&context).unwrap(),
            json!({
                "client": {
                    "clientName": "WEB_REMIX",
                    "clientVersion": "0.1",
                    "hl": "en",
                },
                "user": {},
            })
        );
    }
}
