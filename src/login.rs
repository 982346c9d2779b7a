// SPDX-FileCopyrightText: 2022 Hewlett-Packard Development Company, L.P.
//
// SPDX-License-Identifier: GPL-3.0-only

use nitro_client::SessionToken;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::Result;

pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn login_body(&self) -> Result<Vec<u8>> {
        let request = LoginRequest {
            login: Login {
                username: &self.username,
                password: &self.password,
            },
        };
        Ok(serde_json::to_vec(&request)?)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    login: Login<'a>,
}

#[derive(Serialize)]
struct Login<'a> {
    username: &'a str,
    password: &'a str,
}

/// The parts of a login response we look at. Absent or mistyped fields are
/// left at their defaults.
#[derive(Debug, Default)]
pub struct LoginResponse {
    pub errorcode: i64,
    pub message: String,
    pub severity: String,
    pub session_token: SessionToken,
}

impl LoginResponse {
    /// Best-effort parse, field by field. A body that isn't JSON yields an
    /// empty token.
    pub fn parse(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("unable to parse login response: {}", err);
                return Self::default();
            }
        };
        let string = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            errorcode: value
                .get("errorcode")
                .and_then(Value::as_i64)
                .unwrap_or_default(),
            message: string("message"),
            severity: string("severity"),
            session_token: SessionToken::new(string("sessionid")),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity.eq_ignore_ascii_case("ERROR")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_body_shape() {
        let body = Credentials::new("nsroot", "p\"ss").login_body().unwrap();
        assert_eq!(
            String::from_utf8(body).unwrap(),
            r#"{"login":{"username":"nsroot","password":"p\"ss"}}"#
        );
    }

    #[test]
    fn password_is_not_debug_printed() {
        let debug = format!("{:?}", Credentials::new("nsroot", "hunter2"));
        assert!(debug.contains("nsroot"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn parse_full_response() {
        let resp = LoginResponse::parse(
            br###"{"errorcode": 0, "message": "Done", "severity": "NONE", "sessionid": "##AB12"}"###,
        );
        assert_eq!(resp.session_token.as_str(), "##AB12");
        assert_eq!(resp.message, "Done");
        assert!(!resp.is_error());
    }

    #[test]
    fn mistyped_field_keeps_token() {
        let resp = LoginResponse::parse(
            br###"{"errorcode": "0", "message": null, "severity": "NONE", "sessionid": "##AB12"}"###,
        );
        assert_eq!(resp.session_token.as_str(), "##AB12");
        assert_eq!(resp.errorcode, 0);
        assert_eq!(resp.message, "");
        assert!(!resp.is_error());
    }

    #[test]
    fn parse_garbage_gives_empty_token() {
        let resp = LoginResponse::parse(b"<html>not json</html>");
        assert!(resp.session_token.is_empty());
        assert_eq!(resp.errorcode, 0);
    }

    #[test]
    fn error_severity() {
        let resp = LoginResponse::parse(
            br#"{"errorcode": 354, "message": "Invalid username or password", "severity": "ERROR"}"#,
        );
        assert!(resp.is_error());
        assert!(resp.session_token.is_empty());
    }
}
