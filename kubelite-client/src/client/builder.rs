use std::time::Duration;

use http::{HeaderValue, Request, Response, Uri};
use hyper::body::Incoming;
use hyper_util::{client::legacy::connect::HttpConnector, rt::TokioExecutor};
use secrecy::ExposeSecret;
use tower::{timeout::TimeoutLayer, BoxError, ServiceBuilder};
use tower_http::{auth::AddAuthorizationLayer, classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::Span;

use super::body::Body;
use crate::{Client, Config, Error, Result};

impl Config {
    /// Bearer `Authorization` layer, when the user has a token
    pub(crate) fn auth_layer(&self) -> Result<Option<AddAuthorizationLayer>> {
        let Some(token) = self.auth_info.bearer_token().map_err(Error::Kubeconfig)? else {
            return Ok(None);
        };
        // AddAuthorizationLayer::bearer panics on an invalid header value
        HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(Error::InvalidBearerToken)?;
        Ok(Some(
            AddAuthorizationLayer::bearer(token.expose_secret()).as_sensitive(true),
        ))
    }
}

/// Point a path-only request at the cluster, below any path prefix of the cluster url
fn rebase(base: &Uri, mut req: Request<Body>) -> Request<Body> {
    let path = req.uri().path_and_query().map_or("/", |pq| pq.as_str());
    let prefix = base.path().trim_end_matches('/');
    let mut parts = base.clone().into_parts();
    parts.path_and_query = match format!("{prefix}{path}").parse() {
        Ok(pq) => Some(pq),
        Err(err) => {
            tracing::warn!("cannot rebase {} onto {}: {}", path, base, err);
            return req;
        }
    };
    match Uri::from_parts(parts) {
        Ok(uri) => *req.uri_mut() = uri,
        Err(err) => tracing::warn!("cannot rebase {} onto {}: {}", path, base, err),
    }
    req
}

impl TryFrom<Config> for Client {
    type Error = Error;

    /// Client over the default stack for `config`
    ///
    /// The stack speaks plain http, as served by `kubectl proxy`. Use [`Client::new`]
    /// with your own service to reach servers that need anything else.
    fn try_from(config: Config) -> Result<Self> {
        let auth_layer = config.auth_layer()?;
        let base = config.cluster_url;

        let connector = HttpConnector::new();
        let client: hyper_util::client::legacy::Client<_, Body> =
            hyper_util::client::legacy::Client::builder(TokioExecutor::new()).build(connector);

        let service = ServiceBuilder::new()
            .map_request(move |req| rebase(&base, req))
            .option_layer(auth_layer)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|req: &Request<Body>| {
                        tracing::debug_span!(
                            "HTTP",
                            http.method = %req.method(),
                            http.url = %req.uri(),
                            http.status_code = tracing::field::Empty,
                        )
                    })
                    .on_response(|res: &Response<Incoming>, latency: Duration, span: &Span| {
                        span.record("http.status_code", res.status().as_u16());
                        tracing::debug!("answered in {:?}", latency);
                    })
                    .on_failure(|class: ServerErrorsFailureClass, _: Duration, _: &Span| {
                        tracing::error!("request failed: {}", class);
                    }),
            )
            .option_layer(config.timeout.map(TimeoutLayer::new))
            // both arms of the optional timeout must fail with the same error type
            .map_err(BoxError::from)
            .service(client);

        Ok(Client::new(service, config.default_namespace))
    }
}
