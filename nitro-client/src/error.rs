// SPDX-FileCopyrightText: 2022 Hewlett-Packard Development Company, L.P.
//
// SPDX-License-Identifier: MPL-2.0

use std::{fmt, io, path::PathBuf};

use crate::{ApiResult, Method};

/// A NITRO call that completed, but with a status code other than the one
/// the caller required.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub endpoint: String,
    pub code: u16,
    pub canonical_reason: Option<String>,
    pub message: Option<String>,
}

// NITRO reports failures as `{"errorcode": .., "message": .., "severity": ..}`
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    pub fn new(endpoint: &str, result: &ApiResult) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(&result.body)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty());
        Self {
            endpoint: endpoint.to_string(),
            code: result.status.as_u16(),
            canonical_reason: result.status.canonical_reason().map(str::to_string),
            message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error = if let Some(reason) = &self.canonical_reason {
            format!("{} {}", self.code, reason)
        } else {
            format!("{}", self.code)
        };
        if let Some(message) = &self.message {
            write!(
                f,
                "'{}' from API endpoint '{}': {}",
                error, self.endpoint, message
            )
        } else {
            write!(f, "'{}' from API endpoint '{}'", error, self.endpoint)
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
    #[error("error making {method} request to {url}")]
    Request {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("error reading api response from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read `{}`", .path.display())]
    ConfRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse `{}`", .path.display())]
    ConfParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
