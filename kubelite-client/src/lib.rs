//! Crate for reaching the Kubernetes API through one facade
//!
//! A [`Clientset`] binds a shared transport [`Client`] and hands out narrow,
//! resource-specific sub-clients, one accessor per resource type. Operations
//! that span all resource types live next to it:
//!
//! - [`discovery`] for server version, api version listing and the per group-version
//!   resource catalogs, aggregated by [`discovery::supported_resources`]
//! - [`discovery::ComponentValidator`] for the health of control-plane components
//! - [`error::is_timeout`] to classify a transport failure as a timeout
//!
//! # Example
//!
//! ```rust,no_run
//! use kubelite_client::{prelude::*, Clientset};
//! use kubelite_client::api::ListParams;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let clientset = Clientset::try_default()?;
//!
//!     let info = clientset.server_version().await?;
//!     println!("talking to {}", info.git_version);
//!
//!     for pod in clientset.pods("kube-system").list(&ListParams::default()).await? {
//!         println!("found pod {:?}", pod.metadata.name);
//!     }
//!
//!     let catalog = supported_resources(&clientset, &clientset).await?;
//!     println!("{} group versions served", catalog.len());
//!     Ok(())
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
pub mod client;
pub mod clientset;
pub mod config;
pub mod discovery;
pub mod error;

#[doc(inline)]
pub use api::Api;
#[doc(inline)]
pub use client::Client;
#[doc(inline)]
pub use clientset::{Clientset, ExtensionsClient};
#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use error::{is_timeout, Error};

/// Convenient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub use crate::core::{Resource, ResourceExt};
/// Re-exports from kubelite_core
pub use kubelite_core as core;

/// Capability traits of the facade and the discovery operations
///
/// Bring this into scope to call accessors such as `clientset.pods("default")`.
pub mod prelude {
    pub use crate::clientset::{
        ComponentStatusesInterface, DaemonSetsNamespacer, DeploymentsNamespacer, EndpointsNamespacer,
        EventNamespacer, ExtensionsInterface, HorizontalPodAutoscalersNamespacer, IngressNamespacer,
        JobsNamespacer, LimitRangesNamespacer, NamespacesInterface, NodesInterface,
        PersistentVolumeClaimsNamespacer, PersistentVolumesInterface, PodTemplatesNamespacer,
        PodsNamespacer, ReplicationControllersNamespacer, ResourceQuotasNamespacer, SecretsNamespacer,
        ServiceAccountsNamespacer, ServicesNamespacer,
    };
    pub use crate::discovery::{
        supported_resources, ComponentValidator, GroupVersionSource, ResourcesInterface, VersionInterface,
    };
}
