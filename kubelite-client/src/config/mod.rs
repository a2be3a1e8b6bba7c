//! Where the cluster is and who the client is
//!
//! A [`Config`] is usually loaded from the local kubeconfig with [`Config::infer`]
//! and turned into a [`Client`](crate::Client) with `Client::try_from`.
use std::time::Duration;

use crate::error::KubeconfigError;

mod kubeconfig;

pub use kubeconfig::{AuthInfo, Cluster, Context, Kubeconfig, Named};

/// Deadline of every call made by a default stack
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(295);

/// Cluster url, default namespace, timeout and credentials of a client
#[derive(Debug, Clone)]
pub struct Config {
    /// Url of the apiserver, possibly with a path prefix
    pub cluster_url: http::Uri,
    /// Namespace of calls that name none
    pub default_namespace: String,
    /// Deadline of each call, `None` for no deadline
    pub timeout: Option<Duration>,
    /// Credentials sent with each call
    pub auth_info: AuthInfo,
}

/// Entries of a kubeconfig to select
///
/// Unset fields follow the chosen context, which defaults to `current-context`.
#[derive(Default, Clone, Debug)]
pub struct KubeConfigOptions {
    /// Context to use
    pub context: Option<String>,
    /// Cluster to use instead of the one of the context
    pub cluster: Option<String>,
    /// User to use instead of the one of the context
    pub user: Option<String>,
}

impl Config {
    /// Config for `cluster_url` with the default namespace and timeout and no credentials
    pub fn new(cluster_url: http::Uri) -> Self {
        Self {
            cluster_url,
            default_namespace: String::from("default"),
            timeout: Some(DEFAULT_TIMEOUT),
            auth_info: AuthInfo::default(),
        }
    }

    /// Load the current context of the local kubeconfig
    ///
    /// Reads every path of `$KUBECONFIG`, or `~/.kube/config`.
    pub fn infer() -> Result<Self, KubeconfigError> {
        Self::from_kubeconfig(&KubeConfigOptions::default())
    }

    /// Load the local kubeconfig and select from it by `options`
    pub fn from_kubeconfig(options: &KubeConfigOptions) -> Result<Self, KubeconfigError> {
        let kubeconfig = Kubeconfig::read()?;
        Self::from_custom_kubeconfig(kubeconfig, options)
    }

    /// Select from an already loaded [`Kubeconfig`] by `options`
    pub fn from_custom_kubeconfig(
        kubeconfig: Kubeconfig,
        options: &KubeConfigOptions,
    ) -> Result<Self, KubeconfigError> {
        let context_name = options
            .context
            .as_ref()
            .or(kubeconfig.current_context.as_ref())
            .ok_or(KubeconfigError::NoCurrentContext)?;
        let context = kubeconfig
            .context(context_name)
            .ok_or_else(|| KubeconfigError::UnknownContext(context_name.clone()))?;

        let cluster_name = options.cluster.as_ref().unwrap_or(&context.cluster);
        let cluster = kubeconfig
            .cluster(cluster_name)
            .ok_or_else(|| KubeconfigError::UnknownCluster(cluster_name.clone()))?;
        let user_name = options.user.as_ref().unwrap_or(&context.user);
        let auth_info = kubeconfig
            .user(user_name)
            .cloned()
            .ok_or_else(|| KubeconfigError::UnknownUser(user_name.clone()))?;

        let server = cluster
            .server
            .as_deref()
            .ok_or_else(|| KubeconfigError::MissingServer(cluster_name.clone()))?;
        let cluster_url = server.parse().map_err(KubeconfigError::InvalidServer)?;
        tracing::debug!("using context {} against {}", context_name, cluster_url);

        Ok(Self {
            cluster_url,
            default_namespace: context.namespace.clone().unwrap_or_else(|| "default".into()),
            timeout: Some(DEFAULT_TIMEOUT),
            auth_info,
        })
    }
}
