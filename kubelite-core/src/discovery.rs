//! Paths and documents of the discovery and validation endpoints
//!
//! The server answers discovery on a handful of fixed, non-resource paths.
//! Which prefix a group-version lives under is decided here, by exact
//! comparison with the legacy core group-version.
use std::collections::HashMap;

pub use k8s_openapi::{
    api::core::v1::{ComponentCondition, ComponentStatus},
    apimachinery::pkg::{
        apis::meta::v1::{APIGroup, APIGroupList, APIResource, APIResourceList, APIVersions, GroupVersionForDiscovery},
        version::Info as VersionInfo,
    },
};

use crate::{object::ObjectList, request::Request};

/// The only group-version served under [`CORE_PREFIX`]
pub const LEGACY_GROUP_VERSION: &str = "v1";
/// Prefix of the legacy core api surface
pub const CORE_PREFIX: &str = "/api";
/// Prefix of every named api group
pub const GROUPED_PREFIX: &str = "/apis";
/// Server build information
pub const VERSION_PATH: &str = "/version";
/// Aggregate component health
pub const VALIDATE_PATH: &str = "/validate";

/// Resource lists keyed by the group-version that served them
pub type ResourceCatalog = HashMap<String, APIResourceList>;

/// Health records as returned by the validation endpoint, in server order
pub type ComponentStatusList = ObjectList<ComponentStatus>;

/// Path prefix a group-version is served under
pub fn prefix_for(group_version: &str) -> &'static str {
    if group_version == LEGACY_GROUP_VERSION {
        CORE_PREFIX
    } else {
        GROUPED_PREFIX
    }
}

/// Request for the resource list of one group-version
pub fn group_version_request(group_version: &str) -> Request {
    Request::abs_path([prefix_for(group_version), group_version])
}

/// Request for the server build information
pub fn version_request() -> Request {
    Request::abs_path([VERSION_PATH])
}

/// Request for the legacy core versions at the unversioned root
pub fn api_versions_request() -> Request {
    Request::abs_path([CORE_PREFIX])
}

/// Request for the named api groups
pub fn api_groups_request() -> Request {
    Request::abs_path([GROUPED_PREFIX])
}

/// Request for the component health records
pub fn validate_request() -> Request {
    Request::abs_path([VALIDATE_PATH])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_literal_uses_core_prefix() {
        assert_eq!(prefix_for("v1"), "/api");
        assert_eq!(group_version_request("v1").url_path, "/api/v1");
    }

    #[test]
    fn other_group_versions_use_grouped_prefix() {
        assert_eq!(prefix_for("extensions/v1beta1"), "/apis");
        assert_eq!(
            group_version_request("extensions/v1beta1").url_path,
            "/apis/extensions/v1beta1"
        );
        // only the exact literal is special
        assert_eq!(prefix_for("v1beta1"), "/apis");
        assert_eq!(prefix_for("apps/v1"), "/apis");
        assert_eq!(prefix_for(""), "/apis");
    }

    #[test]
    fn fixed_paths() {
        assert_eq!(version_request().url_path, "/version");
        assert_eq!(validate_request().url_path, "/validate");
        assert_eq!(api_versions_request().url_path, "/api");
        assert_eq!(api_groups_request().url_path, "/apis");
    }

    #[test]
    fn decodes_resource_list() {
        let list: APIResourceList = serde_json::from_value(serde_json::json!({
            "kind": "APIResourceList",
            "apiVersion": "v1",
            "groupVersion": "v1",
            "resources": [{
                "name": "pods",
                "singularName": "pod",
                "namespaced": true,
                "kind": "Pod",
                "verbs": ["get", "list"]
            }]
        }))
        .unwrap();
        assert_eq!(list.group_version, "v1");
        assert_eq!(list.resources[0].kind, "Pod");
        assert!(list.resources[0].namespaced);
    }
}
