//! Kubelite is an umbrella-crate for reaching [Kubernetes](http://kubernetes.io) through one facade.
//!
//! # Overview
//!
//! The main modules are:
//!
//! - [`client`](crate::client) with the transport [`Client`](crate::Client) and its layers
//! - [`clientset`](crate::clientset) with the [`Clientset`](crate::Clientset) facade and its per-resource accessors
//! - [`config`](crate::config) for cluster [`Config`](crate::Config)
//! - [`api`](crate::api) with the generic resource [`Api`](crate::Api)
//! - [`discovery`](crate::discovery) for server version, api versions, resource catalogs and component health
//! - [`core`](crate::core) with the request and path construction shared by all of the above
//!
//! # Using the Clientset
//! ```no_run
//! use kubelite::{prelude::*, api::ListParams, Clientset};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Infer the kubeconfig and bind one shared transport
//!     let clientset = Clientset::try_default()?;
//!
//!     // Every accessor reuses the same transport
//!     for node in clientset.nodes().list(&ListParams::default()).await? {
//!         println!("found node {:?}", node.metadata.name);
//!     }
//!
//!     // Ask the server what it serves
//!     let catalog = supported_resources(&clientset, &clientset).await?;
//!     for (group_version, list) in &catalog {
//!         println!("{group_version}: {} resources", list.resources.len());
//!     }
//!
//!     for status in clientset.validate_components().await? {
//!         println!("component {:?}", status.metadata.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! For details, see:
//!
//! - [`Clientset`](crate::Clientset) for the facade and its accessors
//! - [`Api`](crate::Api) for the generic api methods a sub-client offers
//! - [k8s-openapi](https://docs.rs/k8s-openapi/*/k8s_openapi/) for documentation about the generated Kubernetes types
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

#[doc(inline)]
pub use kubelite_client::api;
#[doc(inline)]
pub use kubelite_client::client;
#[doc(inline)]
pub use kubelite_client::clientset;
#[doc(inline)]
pub use kubelite_client::config;
#[doc(inline)]
pub use kubelite_client::discovery;
#[doc(inline)]
pub use kubelite_client::error;
#[doc(inline)]
pub use kubelite_client::prelude;

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
#[doc(inline)]
pub use kubelite_core as core;
