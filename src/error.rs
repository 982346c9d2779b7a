// SPDX-FileCopyrightText: 2022 Hewlett-Packard Development Company, L.P.
//
// SPDX-License-Identifier: GPL-3.0-only

use nitro_client::ApiError;
use std::{io, path::PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required input missing, detected before any network activity.
    #[error("{0}")]
    Config(String),
    #[error(transparent)]
    Transport(#[from] nitro_client::Error),
    #[error("login failed, expected 201: {0}")]
    Authentication(ApiError),
    /// Login returned 201, but the body reports an error.
    #[error("login rejected with errorcode {errorcode} ({severity}): {message}")]
    LoginRejected {
        errorcode: i64,
        severity: String,
        message: String,
    },
    #[error("error marshaling login request")]
    Encode(#[from] serde_json::Error),
    #[error("get failed, expected 200: {0}")]
    ResourceFetch(ApiError),
    #[error("error writing output file `{}`", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
