// SPDX-FileCopyrightText: 2022 Hewlett-Packard Development Company, L.P.
//
// SPDX-License-Identifier: GPL-3.0-only

use std::borrow::Cow;

/// Query asking NITRO for every binding in a single response.
pub const BULK_BINDINGS: &str = "bulkbindings=yes";

/// A configuration resource to extract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndpointSpec {
    name: &'static str,
    query: Option<&'static str>,
}

impl EndpointSpec {
    pub const fn new(name: &'static str) -> Self {
        Self { name, query: None }
    }

    pub const fn with_query(name: &'static str, query: &'static str) -> Self {
        Self {
            name,
            query: Some(query),
        }
    }

    pub const fn bulk(name: &'static str) -> Self {
        Self::with_query(name, BULK_BINDINGS)
    }

    /// Resource name, without any query.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn query(&self) -> Option<&'static str> {
        self.query
    }

    /// Path relative to the NITRO config root.
    pub fn path(&self) -> Cow<'static, str> {
        match self.query {
            Some(query) => Cow::Owned(format!("{}?{}", self.name, query)),
            None => Cow::Borrowed(self.name),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name)
    }
}

/// Resources extracted by default, in output order.
pub const DEFAULT_ENDPOINTS: [EndpointSpec; 8] = [
    EndpointSpec::new("nsip"),
    EndpointSpec::bulk("ipset_binding"),
    EndpointSpec::new("netprofile"),
    EndpointSpec::new("service"),
    EndpointSpec::bulk("lbvserver_service_binding"),
    EndpointSpec::bulk("servicegroup_servicegroupmember_binding"),
    EndpointSpec::bulk("lbvserver_servicegroup_binding"),
    EndpointSpec::new("lbvserver"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths() {
        let paths: Vec<_> = DEFAULT_ENDPOINTS.iter().map(|e| e.path()).collect();
        assert_eq!(
            paths,
            [
                "nsip",
                "ipset_binding?bulkbindings=yes",
                "netprofile",
                "service",
                "lbvserver_service_binding?bulkbindings=yes",
                "servicegroup_servicegroupmember_binding?bulkbindings=yes",
                "lbvserver_servicegroup_binding?bulkbindings=yes",
                "lbvserver",
            ]
        );
    }

    #[test]
    fn plain_endpoint_has_no_query() {
        let endpoint = EndpointSpec::new("lbvserver");
        assert_eq!(endpoint.query(), None);
        assert_eq!(endpoint.path(), "lbvserver");
    }

    #[test]
    fn file_name_drops_query() {
        let endpoint = EndpointSpec::bulk("ipset_binding");
        assert_eq!(endpoint.query(), Some(BULK_BINDINGS));
        assert_eq!(endpoint.name(), "ipset_binding");
        assert_eq!(endpoint.file_name(), "ipset_binding.json");
    }
}
