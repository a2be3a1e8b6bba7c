//! The resource facade
//!
//! A [`Clientset`] holds the shared [`Client`] and an [`ExtensionsClient`] for the
//! workload api groups. Each resource type is reached through its own small
//! capability trait, so code that only needs pods can ask for `impl PodsNamespacer`
//! and a test double only has to provide that one accessor.
//!
//! Accessors never perform I/O and never fail. They hand out a fresh [`Api`] bound
//! to a clone of the shared client, so calling them often is cheap.
use k8s_openapi::api::core::v1::{
    ComponentStatus, Endpoints, Event, LimitRange, Namespace, Node, PersistentVolume,
    PersistentVolumeClaim, Pod, PodTemplate, ReplicationController, ResourceQuota, Secret, Service,
    ServiceAccount,
};

use crate::{Api, Client, Config, Result};

/// Capability trait with one accessor for a namespaced resource type
macro_rules! namespaced_accessor {
    ($target:ty, $capability:ident, $method:ident, $kind:ty, $what:literal) => {
        #[doc = concat!("Hands out sub-clients for ", $what, " within a namespace")]
        pub trait $capability {
            #[doc = concat!("Sub-client for ", $what, " in `namespace`")]
            fn $method(&self, namespace: &str) -> Api<$kind>;
        }

        impl $capability for $target {
            fn $method(&self, namespace: &str) -> Api<$kind> {
                Api::namespaced(self.client.clone(), namespace)
            }
        }
    };
}

/// Capability trait with one accessor for a cluster-scoped resource type
macro_rules! cluster_accessor {
    ($target:ty, $capability:ident, $method:ident, $kind:ty, $what:literal) => {
        #[doc = concat!("Hands out sub-clients for ", $what)]
        pub trait $capability {
            #[doc = concat!("Sub-client for ", $what, " across the cluster")]
            fn $method(&self) -> Api<$kind>;
        }

        impl $capability for $target {
            fn $method(&self) -> Api<$kind> {
                Api::all(self.client.clone())
            }
        }
    };
}

mod extensions;
pub use extensions::{
    DaemonSetsNamespacer, DeploymentsNamespacer, ExtensionsClient, HorizontalPodAutoscalersNamespacer,
    IngressNamespacer, JobsNamespacer,
};

/// Composition root of the resource capabilities
///
/// Construct it from a [`Client`], a [`Config`], or the inferred configuration
/// with [`Clientset::try_default`]. Cloning is cheap and clones share the transport.
///
/// ```no_run
/// use kubelite_client::{prelude::*, Clientset};
///
/// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
/// let clientset = Clientset::try_default()?;
/// let coredns = clientset.pods("kube-system").get("coredns").await?;
/// let nodes = clientset.nodes();
/// let deployments = clientset.extensions().deployments("apps");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Clientset {
    client: Client,
    extensions: ExtensionsClient,
}

impl Clientset {
    /// Bind the facade and its extensions surface to `client`
    pub fn new(client: Client) -> Self {
        let extensions = ExtensionsClient::new(client.clone());
        Self { client, extensions }
    }

    /// Create a [`Clientset`] from the inferred configuration
    ///
    /// See [`Client::try_default`].
    pub fn try_default() -> Result<Self> {
        Client::try_default().map(Self::new)
    }

    /// The transport shared by every sub-client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl From<Client> for Clientset {
    fn from(client: Client) -> Self {
        Self::new(client)
    }
}

impl TryFrom<Config> for Clientset {
    type Error = crate::Error;

    fn try_from(config: Config) -> Result<Self> {
        Client::try_from(config).map(Self::new)
    }
}

/// Access to the secondary api surface of the workload groups
pub trait ExtensionsInterface {
    /// The extensions facade
    fn extensions(&self) -> &ExtensionsClient;
}

impl ExtensionsInterface for Clientset {
    fn extensions(&self) -> &ExtensionsClient {
        &self.extensions
    }
}

namespaced_accessor!(Clientset, PodsNamespacer, pods, Pod, "pods");
namespaced_accessor!(Clientset, ServicesNamespacer, services, Service, "services");
namespaced_accessor!(Clientset, SecretsNamespacer, secrets, Secret, "secrets");
namespaced_accessor!(Clientset, EndpointsNamespacer, endpoints, Endpoints, "endpoints");
namespaced_accessor!(Clientset, LimitRangesNamespacer, limit_ranges, LimitRange, "limit ranges");
namespaced_accessor!(Clientset, ResourceQuotasNamespacer, resource_quotas, ResourceQuota, "resource quotas");
namespaced_accessor!(Clientset, ServiceAccountsNamespacer, service_accounts, ServiceAccount, "service accounts");
namespaced_accessor!(
    Clientset,
    PersistentVolumeClaimsNamespacer,
    persistent_volume_claims,
    PersistentVolumeClaim,
    "persistent volume claims"
);
namespaced_accessor!(
    Clientset,
    ReplicationControllersNamespacer,
    replication_controllers,
    ReplicationController,
    "replication controllers"
);
namespaced_accessor!(Clientset, EventNamespacer, events, Event, "event records");
namespaced_accessor!(Clientset, PodTemplatesNamespacer, pod_templates, PodTemplate, "pod templates");

cluster_accessor!(Clientset, NodesInterface, nodes, Node, "nodes");
cluster_accessor!(Clientset, NamespacesInterface, namespaces, Namespace, "namespaces");
cluster_accessor!(Clientset, PersistentVolumesInterface, persistent_volumes, PersistentVolume, "persistent volumes");
cluster_accessor!(Clientset, ComponentStatusesInterface, component_statuses, ComponentStatus, "component statuses");
