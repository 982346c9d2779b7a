// SPDX-FileCopyrightText: 2022 Hewlett-Packard Development Company, L.P.
//
// SPDX-License-Identifier: MPL-2.0

//! Blocking client for the NetScaler NITRO configuration API.

use reqwest::header::{CONTENT_TYPE, COOKIE};
use std::fmt;

mod conf;
pub use conf::{NitroConf, Scheme, TransportConfig};
mod error;
pub use error::{ApiError, Error};

pub use reqwest::StatusCode;

/// Cookie NITRO expects the session id in.
pub const SESSION_COOKIE: &str = "NITRO_AUTH_TOKEN";

const CONFIG_ROOT: &str = "nitro/v1/config";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

/// Session id issued by a successful login.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn cookie(&self) -> String {
        format!("{}={}", SESSION_COOKIE, self.0)
    }
}

// Keep the token out of logs and panics
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Outcome of one completed exchange. The status is not interpreted.
#[derive(Debug, Clone)]
pub struct ApiResult {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

pub struct Client {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl Client {
    /// `host` is `fqdn:port` or `ip:port`.
    pub fn new(host: &str, config: &TransportConfig) -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(config.skip_certificate_verification)
            .timeout(config.timeout)
            .build()
            .map_err(Error::Build)?;
        Ok(Self {
            http,
            base_url: format!("{}://{}/{}", config.scheme, host, CONFIG_ROOT),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Perform one exchange against `path`, which may carry a query string.
    ///
    /// Any completed exchange is `Ok`, whatever its status code.
    pub fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        token: Option<&SessionToken>,
    ) -> Result<ApiResult, Error> {
        let url = self.url(path);

        let mut request = self
            .http
            .request(method.as_reqwest(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(body);
        }
        if let Some(token) = token.filter(|token| !token.is_empty()) {
            request = request.header(COOKIE, token.cookie());
        }

        let response = request.send().map_err(|source| Error::Request {
            method,
            url: url.clone(),
            source,
        })?;
        let status = response.status();
        tracing::info!("{} request to {} - {}", method, url, status.as_u16());

        let body = response
            .bytes()
            .map_err(|source| Error::Body { url, source })?;
        Ok(ApiResult {
            status,
            body: body.to_vec(),
        })
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish()
    }
}
