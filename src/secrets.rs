//! Credential loading from a small TOML file.
//!
//! The file holds either a `cookie` key with the raw `Cookie` header value
//! from a logged-in YouTube Music browser session, or an `access_token`
//! key with an OAuth-style bearer token:
//!
//! ```toml
//! cookie = "VISITOR_INFO1_LIVE=...; __Secure-3PAPISID=...; ..."
//! ```

use std::{fs, io};

use crate::auth::Credentials;

/// Upper bound on the secrets file size.
///
/// Browser cookie strings run a few kilobytes; anything larger than this
/// is not a secrets file.
const MAX_FILE_SIZE: u64 = 16 * 1024;

pub fn check(secrets_file: &str) -> io::Result<()> {
    // Prevent out-of-memory condition: the secrets file should be small.
    let attributes = fs::metadata(secrets_file)?;
    let file_size = attributes.len();

    if file_size > MAX_FILE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{secrets_file} is too large"),
        ));
    }

    Ok(())
}

pub fn load(secrets_file: &str) -> io::Result<Credentials> {
    check(secrets_file)?;

    let contents = fs::read_to_string(secrets_file)?;
    parse(&contents).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{secrets_file}: {e}"),
        )
    })
}

fn parse(contents: &str) -> Result<Credentials, String> {
    let value = contents
        .parse::<toml::Value>()
        .map_err(|e| format!("format is invalid: {e}"))?;

    if let Some(cookie) = value.get("cookie").and_then(toml::Value::as_str) {
        return Credentials::from_cookies(cookie).map_err(|e| e.to_string());
    }

    if let Some(token) = value.get("access_token").and_then(toml::Value::as_str) {
        return Ok(Credentials::bearer(token, None));
    }

    Err("does not contain a cookie or an access_token".to_string())
}
