//! Credential configuration consumed from the environment.

/// Environment variable holding the Graph API access token.
pub const ACCESS_TOKEN_VAR: &str = "INSTAGRAM_ACCESS_TOKEN";

/// Environment variable holding the optional default business account id.
pub const ACCOUNT_ID_VAR: &str = "INSTAGRAM_ACCOUNT_ID";

/// Access credentials for the Instagram Graph API.
///
/// The token is attached to every upstream call as an `access_token` query
/// parameter. The account id is advisory — tools still take `account_id`
/// explicitly; this one is only surfaced through server-info.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_token: String,
    pub account_id: Option<String>,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, account_id: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            account_id,
        }
    }

    /// Read credentials from the environment. Returns `None` when no token
    /// is configured — tool invocations will then fail with a credential
    /// error without attempting any upstream call.
    pub fn from_env() -> Option<Self> {
        let access_token = std::env::var(ACCESS_TOKEN_VAR).ok().filter(|t| !t.is_empty())?;
        let account_id = std::env::var(ACCOUNT_ID_VAR).ok().filter(|a| !a.is_empty());
        Some(Self {
            access_token,
            account_id,
        })
    }
}
