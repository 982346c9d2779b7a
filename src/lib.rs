// SPDX-FileCopyrightText: 2022 Hewlett-Packard Development Company, L.P.
//
// SPDX-License-Identifier: GPL-3.0-only

//! Extract load balancing configuration from a NetScaler appliance through
//! its NITRO REST API.

pub mod cli;
pub mod endpoint;
mod error;
pub mod extract;
pub mod login;
pub mod output;

pub use endpoint::{EndpointSpec, DEFAULT_ENDPOINTS};
pub use error::{Error, Result};
pub use extract::{extract, login, Resource, Session};
pub use login::Credentials;
pub use output::OutputDir;
