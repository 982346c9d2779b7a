// SPDX-FileCopyrightText: 2022 Hewlett-Packard Development Company, L.P.
//
// SPDX-License-Identifier: MPL-2.0

use std::{fmt, fs, io, path::Path, time::Duration};

use crate::Error;

const CONF_PATH: &str = "/etc/nsextract.conf";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Https,
    /// Plain HTTP. Only meant for test doubles and lab appliances.
    Http,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Https => "https",
            Self::Http => "http",
        })
    }
}

/// Settings for the HTTP client shared by every call of a run.
#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// Appliances usually present self-signed certificates.
    pub skip_certificate_verification: bool,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub scheme: Scheme,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            skip_certificate_verification: true,
            timeout: None,
            scheme: Scheme::Https,
        }
    }
}

/// Contents of the optional TOML configuration file.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NitroConf {
    scheme: Option<Scheme>,
    #[serde(default)]
    pub verify_certificates: bool,
    pub timeout_secs: Option<u64>,
}

impl NitroConf {
    /// Load `path`, or `/etc/nsextract.conf` if it exists when no path is
    /// given.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::read(Path::new(CONF_PATH)) {
                Err(Error::ConfRead { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                    Ok(Self::default())
                }
                res => res,
            },
        }
    }

    fn read(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| Error::ConfParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme.unwrap_or_default()
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            skip_certificate_verification: !self.verify_certificates,
            timeout: self.timeout_secs.map(Duration::from_secs),
            scheme: self.scheme(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let conf = NitroConf::parse("").unwrap();
        let config = conf.transport_config();
        assert!(config.skip_certificate_verification);
        assert_eq!(config.timeout, None);
        assert_eq!(config.scheme, Scheme::Https);
    }

    #[test]
    fn all_keys() {
        let conf = NitroConf::parse(
            r#"
            scheme = "http"
            verify_certificates = true
            timeout_secs = 15
            "#,
        )
        .unwrap();
        let config = conf.transport_config();
        assert!(!config.skip_certificate_verification);
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.scheme, Scheme::Http);
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        assert!(NitroConf::parse(r#"scheme = "ftp""#).is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = NitroConf::load(Some(Path::new("/nonexistent/nsextract.conf"))).unwrap_err();
        assert!(matches!(err, Error::ConfRead { .. }));
    }
}
