//! Client configuration shared across requests.

use crate::auth::Credentials;

/// Read-only configuration for one client instance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Interface language sent in the client context as `hl`.
    pub app_lang: String,

    /// Account index for the `X-Goog-AuthUser` header. "0" unless the
    /// session is signed in to multiple accounts.
    pub auth_user: String,

    pub user_agent: String,

    pub credentials: Credentials,
}

impl Config {
    /// `User-Agent` served to the API.
    ///
    /// The web client's own desktop user agent; the endpoints reject
    /// unadorned library user agents.
    const USER_AGENT: &'static str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:111.0) \
         Gecko/20100101 Firefox/111.0";

    #[must_use]
    pub fn with_credentials(credentials: Credentials) -> Self {
        trace!("user agent: {}", Self::USER_AGENT);

        Self {
            app_lang: "en".to_owned(),

            auth_user: "0".to_owned(),

            user_agent: Self::USER_AGENT.to_owned(),

            credentials,
        }
    }
}
