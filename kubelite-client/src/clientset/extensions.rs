//! Sub-clients for the workload api groups
use k8s_openapi::api::{
    apps::v1::{DaemonSet, Deployment},
    autoscaling::v2::HorizontalPodAutoscaler,
    batch::v1::Job,
    networking::v1::Ingress,
};

use crate::{Api, Client};

/// The secondary api surface of the facade
///
/// Serves the workload kinds that once shared the `extensions` group and now
/// live in `apps`, `batch`, `autoscaling` and `networking.k8s.io`.
#[derive(Clone)]
pub struct ExtensionsClient {
    client: Client,
}

impl ExtensionsClient {
    /// Bind the extensions surface to `client`
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

namespaced_accessor!(ExtensionsClient, DeploymentsNamespacer, deployments, Deployment, "deployments");
namespaced_accessor!(ExtensionsClient, DaemonSetsNamespacer, daemon_sets, DaemonSet, "daemon sets");
namespaced_accessor!(ExtensionsClient, JobsNamespacer, jobs, Job, "jobs");
namespaced_accessor!(
    ExtensionsClient,
    HorizontalPodAutoscalersNamespacer,
    horizontal_pod_autoscalers,
    HorizontalPodAutoscaler,
    "horizontal pod autoscalers"
);
namespaced_accessor!(ExtensionsClient, IngressNamespacer, ingresses, Ingress, "ingresses");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Body;
    use http::{Request, Response};
    use tower_test::mock;

    #[tokio::test]
    async fn workload_groups_use_grouped_prefix() {
        let (mock_service, _handle) = mock::pair::<Request<Body>, Response<Body>>();
        let ext = ExtensionsClient::new(Client::new(mock_service, "default"));
        assert_eq!(ext.deployments("ns").resource_url(), "/apis/apps/v1/namespaces/ns/deployments");
        assert_eq!(ext.daemon_sets("ns").resource_url(), "/apis/apps/v1/namespaces/ns/daemonsets");
        assert_eq!(ext.jobs("ns").resource_url(), "/apis/batch/v1/namespaces/ns/jobs");
        assert_eq!(
            ext.horizontal_pod_autoscalers("ns").resource_url(),
            "/apis/autoscaling/v2/namespaces/ns/horizontalpodautoscalers"
        );
        assert_eq!(
            ext.ingresses("ns").resource_url(),
            "/apis/networking.k8s.io/v1/namespaces/ns/ingresses"
        );
    }
}
