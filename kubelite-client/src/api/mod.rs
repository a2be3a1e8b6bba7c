//! Typed sub-clients bound to one resource type
//!
//! Every accessor of the [`Clientset`](crate::Clientset) returns an [`Api`]. It reads
//! objects of its type with [`Api::get`] and [`Api::list`].
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta};
pub use kubelite_core::{ListParams, ObjectList, Request, Resource, ResourceExt};
use kubelite_core::NamespaceResourceScope;

use crate::{Client, Error, Result};

/// Reads of one resource type, in one namespace or across the cluster
#[derive(Clone)]
pub struct Api<K> {
    request: Request,
    client: Client,
    namespace: Option<String>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: Resource> Api<K> {
    /// Cluster scoped kinds, or a namespaced kind across every namespace
    ///
    /// ```no_run
    /// # use kubelite_client::{Api, Client};
    /// # let client: Client = todo!();
    /// use k8s_openapi::api::core::v1::Node;
    /// let nodes: Api<Node> = Api::all(client);
    /// ```
    pub fn all(client: Client) -> Self {
        Self::bind(client, None)
    }

    /// A namespaced kind within `ns`
    ///
    /// Cluster scoped kinds are rejected at compile time:
    ///
    /// ```compile_fail
    /// # use kubelite_client::{Api, Client};
    /// # let client: Client = todo!();
    /// use k8s_openapi::api::core::v1::Node;
    /// let nodes: Api<Node> = Api::namespaced(client, "default");
    /// ```
    pub fn namespaced(client: Client, ns: &str) -> Self
    where
        K: k8s_openapi::Resource<Scope = NamespaceResourceScope>,
    {
        Self::bind(client, Some(ns.to_string()))
    }

    /// A namespaced kind within the default namespace of `client`
    pub fn default_namespaced(client: Client) -> Self
    where
        K: k8s_openapi::Resource<Scope = NamespaceResourceScope>,
    {
        let ns = client.default_namespace().to_string();
        Self::namespaced(client, &ns)
    }

    fn bind(client: Client, namespace: Option<String>) -> Self {
        Self {
            request: Request::new(K::url_path(namespace.as_deref())),
            client,
            namespace,
            _kind: PhantomData,
        }
    }

    /// Path of the collection this sub-client reads
    pub fn resource_url(&self) -> &str {
        &self.request.url_path
    }

    /// Namespace this sub-client is bound to, `None` for cluster scope
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Give back the shared [`Client`]
    pub fn into_client(self) -> Client {
        self.client
    }
}

impl<K: Resource + DeserializeOwned> Api<K> {
    /// Read the object called `name`
    ///
    /// A missing object is an [`Error::Api`] with code 404.
    pub async fn get(&self, name: &str) -> Result<K> {
        let req = self.request.get(name).map_err(Error::BuildRequest)?;
        self.client.request(req).await
    }

    /// Read the objects selected by `lp`
    ///
    /// ```no_run
    /// use kubelite_client::{api::{Api, ListParams, ResourceExt}, Client};
    /// use k8s_openapi::api::core::v1::Pod;
    ///
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: Client = todo!();
    /// let pods: Api<Pod> = Api::namespaced(client, "apps");
    /// for pod in pods.list(&ListParams::default().labels("app=blog")).await? {
    ///     println!("{}", pod.name_any());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(&self, lp: &ListParams) -> Result<ObjectList<K>> {
        let req = self.request.list(lp).map_err(Error::BuildRequest)?;
        self.client.request(req).await
    }
}

impl<K> From<Api<K>> for Client {
    fn from(api: Api<K>) -> Self {
        api.client
    }
}

#[cfg(test)]
mod test {
    use crate::{api::ListParams, client::Body, Api, Client, Error};
    use futures::pin_mut;
    use http::{Request, Response, StatusCode};
    use k8s_openapi::api::core::v1::{self as corev1, Secret};
    use tower_test::mock;

    #[tokio::test]
    async fn scopes_shape_urls() {
        let (mock_service, _handle) = mock::pair::<Request<Body>, Response<Body>>();
        let client = Client::new(mock_service, "apps");

        let pods: Api<corev1::Pod> = Api::default_namespaced(client.clone());
        assert_eq!(pods.resource_url(), "/api/v1/namespaces/apps/pods");
        assert_eq!(pods.namespace(), Some("apps"));

        let nodes: Api<corev1::Node> = Api::all(client.clone());
        assert_eq!(nodes.resource_url(), "/api/v1/nodes");
        assert_eq!(nodes.namespace(), None);

        let all_pods: Api<corev1::Pod> = Api::all(client);
        assert_eq!(all_pods.resource_url(), "/api/v1/pods");
        assert_eq!(all_pods.into_client().default_namespace(), "apps");
    }

    #[tokio::test]
    async fn list_decodes_items_and_paging() {
        let (mock_service, handle) = mock::pair::<Request<Body>, Response<Body>>();
        let spawned = tokio::spawn(async move {
            pin_mut!(handle);
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.method(), http::Method::GET);
            assert_eq!(request.uri().to_string(), "/api/v1/namespaces/ns/secrets?limit=1");
            let list = serde_json::json!({
                "apiVersion": "v1",
                "kind": "SecretList",
                "metadata": { "continue": "next", "resourceVersion": "12" },
                "items": [{
                    "apiVersion": "v1",
                    "kind": "Secret",
                    "metadata": { "name": "a", "namespace": "ns" },
                }],
            });
            send.send_response(
                Response::builder()
                    .body(Body::from(serde_json::to_vec(&list).unwrap()))
                    .unwrap(),
            );
        });

        let secrets: Api<Secret> = Api::namespaced(Client::new(mock_service, "default"), "ns");
        let list = secrets.list(&ListParams::default().limit(1)).await.unwrap();
        assert_eq!(list.metadata.continue_.as_deref(), Some("next"));
        assert_eq!(list.items[0].metadata.name.as_deref(), Some("a"));
        spawned.await.unwrap();
    }

    #[tokio::test]
    async fn not_found_is_an_api_error() {
        let (mock_service, handle) = mock::pair::<Request<Body>, Response<Body>>();
        let spawned = tokio::spawn(async move {
            pin_mut!(handle);
            let (_request, send) = handle.next_request().await.expect("service not called");
            let status = serde_json::json!({
                "kind": "Status",
                "apiVersion": "v1",
                "status": "Failure",
                "message": "secrets \"gone\" not found",
                "reason": "NotFound",
                "code": 404,
            });
            send.send_response(
                Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .body(Body::from(serde_json::to_vec(&status).unwrap()))
                    .unwrap(),
            );
        });

        let secrets: Api<Secret> = Api::namespaced(Client::new(mock_service, "default"), "ns");
        let err = secrets.get("gone").await.unwrap_err();
        assert!(matches!(err, Error::Api(ref ae) if ae.code == 404 && ae.reason == "NotFound"));
        spawned.await.unwrap();
    }

    #[tokio::test]
    async fn empty_name_never_reaches_the_server() {
        let (mock_service, _handle) = mock::pair::<Request<Body>, Response<Body>>();
        let secrets: Api<Secret> = Api::namespaced(Client::new(mock_service, "default"), "ns");
        let err = secrets.get("").await.unwrap_err();
        assert!(matches!(err, Error::BuildRequest(_)));
    }
}
