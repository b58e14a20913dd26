//! Header sets, login bodies and endpoints for the two wire emulations.

use serde_json::{Value, json};

use crate::data::{DriverConfig, IdentityProfile, ProtocolMode};

/// App release reported by the mobile emulation.
pub const APP_VERSION: &str = "2.5.4";
/// Build number paired with [`APP_VERSION`].
pub const APP_BUILD: &str = "77";
pub const DEVICE_NAME: &str = "Xiaomi";

/// Platform and version fed into the browser-mode signature.
pub const WEB_PLATFORM: &str = "web";
pub const WEB_VERSION: &str = "3";

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const BROWSER_ORIGIN: &str = "https://www.123pan.com";
pub const BROWSER_REFERER: &str = "https://www.123pan.com/";

/// Login succeeds with this code; every other endpoint succeeds with `0`.
pub const LOGIN_OK: i64 = 200;
pub const API_OK: i64 = 0;
/// Session expired; triggers one re-authentication.
pub const SESSION_EXPIRED: i64 = 401;

/// Build the header list for one request.
///
/// `Authorization` is included only when `token` is non-empty, so login
/// requests pass `None`.
pub fn headers(
    mode: ProtocolMode,
    identity: &IdentityProfile,
    token: Option<&str>,
) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = match mode {
        ProtocolMode::Mobile => vec![
            (
                "User-Agent".into(),
                format!("123pan/v{APP_VERSION}({};{DEVICE_NAME})", identity.os_version()),
            ),
            ("Content-Type".into(), "application/json".into()),
            ("osversion".into(), identity.os_version().into()),
            ("platform".into(), "android".into()),
            ("devicetype".into(), identity.device_model().into()),
            ("devicename".into(), DEVICE_NAME.into()),
            ("loginuuid".into(), identity.session_uuid().to_string()),
            ("App-Version".into(), APP_BUILD.into()),
            ("X-App-Version".into(), APP_VERSION.into()),
        ],
        ProtocolMode::Browser => vec![
            ("User-Agent".into(), BROWSER_USER_AGENT.into()),
            ("Content-Type".into(), "application/json".into()),
            ("Origin".into(), BROWSER_ORIGIN.into()),
            ("Referer".into(), BROWSER_REFERER.into()),
            ("platform".into(), WEB_PLATFORM.into()),
            ("App-Version".into(), WEB_VERSION.into()),
        ],
    };

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        out.push(("Authorization".into(), format!("Bearer {token}")));
    }
    out
}

/// Login payload for `username`.
///
/// Email identifiers always use the `{mail, password, type: 2}` shape. Other
/// identifiers use the shape of the active mode. Surrounding whitespace is
/// stripped from `username` before it is classified or sent.
pub fn login_body(mode: ProtocolMode, username: &str, password: &str) -> Value {
    let username = username.trim();
    if super::is_email(username) {
        return json!({ "mail": username, "password": password, "type": 2 });
    }
    match mode {
        ProtocolMode::Browser => {
            json!({ "passport": username, "password": password, "remember": true })
        }
        ProtocolMode::Mobile => json!({ "passport": username, "password": password, "type": 1 }),
    }
}

/// Absolute endpoint URLs for one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub login: String,
    pub user_info: String,
    pub file_list: String,
}

impl Endpoints {
    pub fn resolve(config: &DriverConfig) -> Self {
        let base = config.base_url.trim_end_matches('/');
        match config.mode {
            ProtocolMode::Mobile => Self {
                login: format!("{base}/b/api/user/sign_in"),
                user_info: format!("{base}/b/api/user/info"),
                file_list: format!("{base}/b/api/file/list/new"),
            },
            ProtocolMode::Browser => Self {
                login: format!("{}/api/user/sign_in", config.login_url.trim_end_matches('/')),
                user_info: format!("{base}/b/api/user/info"),
                file_list: format!("{base}/api/file/list/new"),
            },
        }
    }
}
