//! Server version, api version and resource discovery
//!
//! The operations are split into narrow traits so a caller (or a test double)
//! can provide just the part it needs:
//!
//! - [`VersionInterface`] for the server build information and the legacy api versions
//! - [`ResourcesInterface`] for the resource catalog of a single group-version
//! - [`GroupVersionSource`] for the full list of group-versions the server serves
//! - [`ComponentValidator`] for the health of the control-plane components
//!
//! [`supported_resources`] combines the last two into an aggregate catalog.
//! Nothing here is cached; every call asks the server again.
use std::future::Future;

use kubelite_core::{discovery as paths, request::Request};

use crate::{Client, Clientset, Config, Error, Result};

mod validate;
pub use validate::ComponentValidator;

pub use kubelite_core::discovery::{
    APIGroup, APIGroupList, APIResource, APIResourceList, APIVersions, ComponentCondition, ComponentStatus,
    ComponentStatusList, GroupVersionForDiscovery, ResourceCatalog, VersionInfo,
};

/// Server build information and api version listing
pub trait VersionInterface {
    /// Build information of the server, from `/version`
    fn server_version(&self) -> impl Future<Output = Result<VersionInfo>> + Send;

    /// Versions of the legacy core api, from the unversioned root `/api`
    fn server_api_versions(&self) -> impl Future<Output = Result<APIVersions>> + Send;
}

/// Resource catalog of a single group-version
pub trait ResourcesInterface {
    /// Resources served by `group_version`
    ///
    /// The legacy core version `v1` is read from `/api/v1`, every other
    /// group-version from `/apis/<group_version>`.
    fn supported_resources_for_group_version(
        &self,
        group_version: &str,
    ) -> impl Future<Output = Result<APIResourceList>> + Send;
}

/// Source of the group-versions a server supports
pub trait GroupVersionSource {
    /// Every group-version the server serves, in server order
    ///
    /// The legacy core versions come first, followed by the versions of every named group.
    fn server_group_versions(&self) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Build the aggregate resource catalog
///
/// Lists the group-versions through `source`, then asks `client` for the resources of
/// each one, in list order and one at a time. The first failure aborts the whole
/// operation and is returned as is; catalogs fetched before it are dropped.
pub async fn supported_resources<C, S>(client: &C, source: &S) -> Result<ResourceCatalog>
where
    C: ResourcesInterface,
    S: GroupVersionSource,
{
    let group_versions = source.server_group_versions().await?;
    let mut catalog = ResourceCatalog::with_capacity(group_versions.len());
    for group_version in group_versions {
        tracing::trace!("discovering resources of {}", group_version);
        match client.supported_resources_for_group_version(&group_version).await {
            Ok(resources) => {
                catalog.insert(group_version, resources);
            }
            Err(err) => {
                tracing::debug!(
                    "resource discovery aborted at {} after {} group versions: {}",
                    group_version,
                    catalog.len(),
                    err
                );
                return Err(err);
            }
        }
    }
    Ok(catalog)
}

fn get(request: Request) -> Result<http::Request<Vec<u8>>> {
    request.get_path().map_err(Error::BuildRequest)
}

impl VersionInterface for Client {
    async fn server_version(&self) -> Result<VersionInfo> {
        self.request(get(paths::version_request())?).await
    }

    async fn server_api_versions(&self) -> Result<APIVersions> {
        self.request(get(paths::api_versions_request())?).await
    }
}

impl ResourcesInterface for Client {
    async fn supported_resources_for_group_version(&self, group_version: &str) -> Result<APIResourceList> {
        self.request(get(paths::group_version_request(group_version))?)
            .await
    }
}

impl GroupVersionSource for Client {
    async fn server_group_versions(&self) -> Result<Vec<String>> {
        let core = self.server_api_versions().await?;
        let groups: APIGroupList = self.request(get(paths::api_groups_request())?).await?;
        let mut group_versions = core.versions;
        group_versions.extend(
            groups
                .groups
                .into_iter()
                .flat_map(|group| group.versions.into_iter().map(|v| v.group_version)),
        );
        tracing::trace!("server serves {:?}", group_versions);
        Ok(group_versions)
    }
}

impl VersionInterface for Clientset {
    async fn server_version(&self) -> Result<VersionInfo> {
        self.client().server_version().await
    }

    async fn server_api_versions(&self) -> Result<APIVersions> {
        self.client().server_api_versions().await
    }
}

impl ResourcesInterface for Clientset {
    async fn supported_resources_for_group_version(&self, group_version: &str) -> Result<APIResourceList> {
        self.client()
            .supported_resources_for_group_version(group_version)
            .await
    }
}

impl GroupVersionSource for Clientset {
    async fn server_group_versions(&self) -> Result<Vec<String>> {
        self.client().server_group_versions().await
    }
}

/// Lists the group-versions through a fresh [`Client`] built from the configuration
impl GroupVersionSource for Config {
    async fn server_group_versions(&self) -> Result<Vec<String>> {
        let client = Client::try_from(self.clone())?;
        client.server_group_versions().await
    }
}
