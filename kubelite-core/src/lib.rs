//! Types, paths and request construction shared by the kubelite crates
//!
//! This crate performs no I/O. It decides which url a call targets and how the
//! response documents look; the `kubelite-client` crate executes the calls.
//! The same items are re-exported from `kubelite` under `kubelite::core`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod discovery;
pub use discovery::{APIResourceList, APIVersions, ComponentStatus, VersionInfo};

pub mod object;
pub use object::ObjectList;

pub mod params;
pub use params::ListParams;

pub mod request;
pub use request::Request;

mod resource;
pub use resource::{Resource, ResourceExt};

pub use k8s_openapi::{ClusterResourceScope, NamespaceResourceScope};

mod error;
pub use error::ErrorResponse;
