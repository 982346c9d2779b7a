// SPDX-FileCopyrightText: 2022 Hewlett-Packard Development Company, L.P.
//
// SPDX-License-Identifier: GPL-3.0-only

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{extract::Resource, Error, Result};

/// Directory extracted resources are written to, one `<name>.json` each.
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Create `path` if needed.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(|source| Error::Persistence {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the raw body, replacing any earlier file of the same name.
    pub fn write(&self, resource: &Resource) -> Result<PathBuf> {
        let path = self.path.join(resource.endpoint.file_name());
        fs::write(&path, &resource.body).map_err(|source| Error::Persistence {
            path: path.clone(),
            source,
        })?;
        tracing::info!("created {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::EndpointSpec;

    fn resource(body: &[u8]) -> Resource {
        Resource {
            endpoint: EndpointSpec::bulk("lbvserver_service_binding"),
            body: body.to_vec(),
        }
    }

    #[test]
    fn write_is_byte_exact_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputDir::create(dir.path().join("nested/out")).unwrap();

        let path = output.write(&resource(b"a much longer first body")).unwrap();
        assert_eq!(path, output.path().join("lbvserver_service_binding.json"));

        let body = b"{\"x\":1}\n\xff\x00";
        output.write(&resource(body)).unwrap();
        assert_eq!(fs::read(&path).unwrap(), body);
    }

    #[test]
    fn unwritable_target_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputDir::create(dir.path()).unwrap();
        // A directory where the file should go
        fs::create_dir(dir.path().join("lbvserver_service_binding.json")).unwrap();

        let err = output.write(&resource(b"{}")).unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
    }
}
