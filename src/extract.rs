// SPDX-FileCopyrightText: 2022 Hewlett-Packard Development Company, L.P.
//
// SPDX-License-Identifier: GPL-3.0-only

use nitro_client::{ApiError, Client, Method, SessionToken, StatusCode};
use std::{iter::FusedIterator, slice};

use crate::{
    endpoint::EndpointSpec,
    login::{Credentials, LoginResponse},
    Error, Result,
};

const LOGIN_RESOURCE: &str = "login";

/// A fetched resource body, exactly as the appliance sent it.
#[derive(Debug, Clone)]
pub struct Resource {
    pub endpoint: EndpointSpec,
    pub body: Vec<u8>,
}

/// An authenticated session. The token is never renewed or invalidated.
#[derive(Debug)]
pub struct Session<'a> {
    client: &'a Client,
    token: SessionToken,
}

pub fn login<'a>(client: &'a Client, credentials: &Credentials) -> Result<Session<'a>> {
    let body = credentials.login_body()?;
    let result = client.execute(Method::Post, LOGIN_RESOURCE, Some(body), None)?;
    if result.status != StatusCode::CREATED {
        return Err(Error::Authentication(ApiError::new(
            LOGIN_RESOURCE,
            &result,
        )));
    }

    let response = LoginResponse::parse(&result.body);
    if response.is_error() {
        return Err(Error::LoginRejected {
            errorcode: response.errorcode,
            severity: response.severity,
            message: response.message,
        });
    }
    if response.errorcode != 0 {
        tracing::warn!(
            "login returned errorcode {} ({}): {}",
            response.errorcode,
            response.severity,
            response.message
        );
    }
    if response.session_token.is_empty() {
        tracing::warn!("login response carried no session id");
    }

    tracing::debug!("logged in as {}", credentials.username());
    Ok(Session {
        client,
        token: response.session_token,
    })
}

impl<'a> Session<'a> {
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn fetch(&self, endpoint: &EndpointSpec) -> Result<Resource> {
        let result = self
            .client
            .execute(Method::Get, &endpoint.path(), None, Some(&self.token))?;
        if result.status != StatusCode::OK {
            return Err(Error::ResourceFetch(ApiError::new(endpoint.name(), &result)));
        }
        Ok(Resource {
            endpoint: *endpoint,
            body: result.body,
        })
    }

    /// Fetch `endpoints` in order, one request per item. Stops after the
    /// first error.
    pub fn fetch_all<'s>(&'s self, endpoints: &'s [EndpointSpec]) -> Fetches<'s> {
        Fetches {
            session: self,
            endpoints: endpoints.iter(),
            failed: false,
        }
    }
}

pub struct Fetches<'s> {
    session: &'s Session<'s>,
    endpoints: slice::Iter<'s, EndpointSpec>,
    failed: bool,
}

impl<'s> Iterator for Fetches<'s> {
    type Item = Result<Resource>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let res = self.session.fetch(self.endpoints.next()?);
        self.failed = res.is_err();
        Some(res)
    }
}

impl<'s> FusedIterator for Fetches<'s> {}

/// Log in, then fetch each endpoint and hand it to `handle` as soon as it
/// arrives. Returns how many resources were handled.
///
/// The first error ends the run. Anything `handle` already persisted stays.
pub fn extract<F>(
    client: &Client,
    credentials: &Credentials,
    endpoints: &[EndpointSpec],
    mut handle: F,
) -> Result<usize>
where
    F: FnMut(Resource) -> Result<()>,
{
    let session = login(client, credentials)?;

    let mut count = 0;
    for resource in session.fetch_all(endpoints) {
        handle(resource?)?;
        count += 1;
    }

    tracing::info!("extract complete");
    Ok(count)
}
