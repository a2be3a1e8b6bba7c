//! The transport executor
//!
//! A [`Client`] owns the tower service stack that reaches the apiserver. Clones share
//! that stack, so typed [`Api`](crate::Api) sub-clients and the
//! [`Clientset`](crate::Clientset) hand out clones freely.
use bytes::Bytes;
use futures::future::BoxFuture;
use http::{Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use tower::{buffer::Buffer, util::BoxService, BoxError, Layer, Service, ServiceExt};
use tower_http::map_response_body::MapResponseBodyLayer;

use crate::{
    error::{ErrorResponse, RequestError},
    Config, Error, Result,
};

mod body;
mod builder;

pub use body::Body;

/// Shared handle to the apiserver transport
///
/// Build one from a [`Config`] with [`Client::try_from`], from the local kubeconfig with
/// [`Client::try_default`], or around any tower service with [`Client::new`].
#[derive(Clone)]
pub struct Client {
    inner: Buffer<Request<Body>, BoxFuture<'static, Result<Response<Body>, BoxError>>>,
    default_ns: String,
}

impl Client {
    /// Wrap a service stack
    ///
    /// Requests reach `service` with the path-only uris built by [`kubelite_core::Request`]
    /// unless a layer of the stack rebases them. Must be called from within a tokio runtime.
    pub fn new<S, B, T>(service: S, default_namespace: T) -> Self
    where
        S: Service<Request<Body>, Response = Response<B>> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
        B: http_body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
        T: Into<String>,
    {
        let service = MapResponseBodyLayer::new(Body::wrap_body)
            .layer(service)
            .map_err(|e| e.into());
        Self {
            inner: Buffer::new(BoxService::new(service), 1024),
            default_ns: default_namespace.into(),
        }
    }

    /// Client for the local kubeconfig, see [`Config::infer`]
    pub fn try_default() -> Result<Self> {
        let config = Config::infer().map_err(Error::Kubeconfig)?;
        Self::try_from(config)
    }

    /// Namespace of [`Api::default_namespaced`](crate::Api::default_namespaced)
    pub fn default_namespace(&self) -> &str {
        &self.default_ns
    }

    /// Send a request and return the raw response
    ///
    /// A call the transport fails is reported as [`Error::Transport`] with the method
    /// and url of the request. A crate [`Error`] raised inside the stack passes through.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Body>> {
        let method = request.method().clone();
        let url = request.uri().to_string();
        let mut service = self.inner.clone();
        let ready = service.ready().await.map_err(Error::Service)?;
        ready.call(request).await.map_err(|source| match source.downcast::<Error>() {
            Ok(err) => *err,
            Err(source) => Error::Transport(RequestError { method, url, source }),
        })
    }

    /// Send a request and return the body of a successful response
    ///
    /// Any 4xx or 5xx status becomes [`Error::Api`].
    pub async fn request_bytes(&self, request: Request<Vec<u8>>) -> Result<Bytes> {
        let response = self.send(request.map(Body::from)).await?;
        let status = response.status();
        let body = response.into_body().into_bytes().await?;
        if status.is_client_error() || status.is_server_error() {
            return Err(Error::Api(api_error(status, &body)));
        }
        Ok(body)
    }

    /// Send a request and decode the JSON body of a successful response
    pub async fn request<T: DeserializeOwned>(&self, request: Request<Vec<u8>>) -> Result<T> {
        let body = self.request_bytes(request).await?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| {
        let body = String::from_utf8_lossy(body).into_owned();
        tracing::warn!("undecodable body {:?}: {}", body, source);
        Error::Decode { body, source }
    })
}

/// The `Status` document of an unsuccessful reply
///
/// Rebuilt from the status line and the raw text when the body is not one.
fn api_error(status: StatusCode, body: &[u8]) -> ErrorResponse {
    if let Ok(err) = serde_json::from_slice::<ErrorResponse>(body) {
        tracing::debug!("unsuccessful: {:?}", err);
        return err;
    }
    let text = String::from_utf8_lossy(body);
    tracing::warn!("unsuccessful reply without a status document: {}", text);
    ErrorResponse {
        status: status.to_string(),
        code: status.as_u16(),
        message: format!("{text:?}"),
        reason: "Failed to parse error data".into(),
    }
}
