//! Errors of [`kubelite_client`][crate] and the timeout classifier
use std::{error::Error as StdError, io, path::PathBuf};

use thiserror::Error;
use tower::BoxError;

pub use kubelite_core::ErrorResponse;

/// Everything a call through [`kubelite_client`][crate] can fail with
#[derive(Error, Debug)]
pub enum Error {
    /// The apiserver answered with a 4xx or 5xx status
    ///
    /// A reply that was not a `Status` document is rebuilt into one.
    #[error("api error: {0}")]
    Api(#[source] ErrorResponse),

    /// The transport produced no response for a request
    #[error("{0}")]
    Transport(#[source] RequestError),

    /// The stack failed outside of a call, while becoming ready or while streaming a body
    #[error("service error: {0}")]
    Service(#[source] BoxError),

    /// A body did not decode into the expected document
    #[error("got '{body}': {source}")]
    Decode {
        /// The raw body, lossily decoded as utf-8
        body: String,
        /// The parse failure
        #[source]
        source: serde_json::Error,
    },

    /// The configured bearer token is not a valid header value
    #[error("invalid bearer token: {0}")]
    InvalidBearerToken(#[source] http::header::InvalidHeaderValue),

    /// A request could not be assembled
    #[error("failed to build request: {0}")]
    BuildRequest(#[source] kubelite_core::request::Error),

    /// The kubeconfig could not be loaded
    #[error("kubeconfig: {0}")]
    Kubeconfig(#[source] KubeconfigError),
}

impl Error {
    /// Whether this error represents a timeout, by the rules of [`is_timeout`]
    pub fn is_timeout(&self) -> bool {
        is_timeout(Some(self))
    }
}

/// A transport failure annotated with the request that caused it
#[derive(Error, Debug)]
#[error("{method} \"{url}\": {source}")]
pub struct RequestError {
    /// Method of the failed request
    pub method: http::Method,
    /// Uri of the failed request
    pub url: String,
    /// What the transport reported
    #[source]
    pub source: BoxError,
}

/// Failure to load a kubeconfig or to select from it
#[derive(Error, Debug)]
pub enum KubeconfigError {
    /// No context was requested and `current-context` is unset
    #[error("no context selected and current-context is unset")]
    NoCurrentContext,

    /// The selected context is not defined
    #[error("context {0:?} is not defined")]
    UnknownContext(String),
    /// The cluster named by the context is not defined
    #[error("cluster {0:?} is not defined")]
    UnknownCluster(String),
    /// The user named by the context is not defined
    #[error("user {0:?} is not defined")]
    UnknownUser(String),

    /// The selected cluster has no server url
    #[error("cluster {0:?} has no server")]
    MissingServer(String),
    /// The server url does not parse
    #[error("invalid server url: {0}")]
    InvalidServer(#[source] http::uri::InvalidUri),

    /// `KUBECONFIG` is unset and there is no home directory
    #[error("no kubeconfig path found")]
    NoPath,
    /// A kubeconfig or token file could not be read
    #[error("failed to read {path:?}: {source}")]
    Read {
        /// The file that failed
        path: PathBuf,
        /// The io failure
        #[source]
        source: io::Error,
    },
    /// A kubeconfig document is not yaml of the expected shape
    #[error("invalid kubeconfig yaml: {0}")]
    Yaml(#[source] serde_yaml::Error),
}

/// Message fragment of a read or write on a connection that was already closed
///
/// Such failures carry no structured timeout signal but are how an idle
/// connection torn down by a deadline tends to surface.
const CLOSED_CONNECTION: &str = "use of closed network connection";

/// Decide whether an error represents a timeout
///
/// Applied in order:
/// 1. no error is never a timeout
/// 2. a [`RequestError`] (bare, or as [`Error::Transport`]) answers with the
///    timeout predicate of the error it wraps, if that error has one
/// 3. otherwise an error with its own timeout predicate answers with it
/// 4. otherwise the message is checked for a closed network connection
///
/// Timeout predicates are the `TimedOut` kind of [`std::io::Error`],
/// [`tower::timeout::error::Elapsed`] (always a timeout), [`hyper::Error::is_timeout`]
/// and the predicate of the error carried by [`Error::Service`]. Errors of hyper and of
/// the `hyper_util` client also answer with the first cause down their `source` chain
/// that has a predicate, so a connect deadline of the `HttpConnector` counts.
pub fn is_timeout(err: Option<&(dyn StdError + 'static)>) -> bool {
    let Some(err) = err else {
        return false;
    };
    if let Some(timeout) = request_source(err).and_then(timeout_predicate) {
        return timeout;
    }
    if let Some(timeout) = timeout_predicate(err) {
        return timeout;
    }
    is_closed_connection(err)
}

fn request_source<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    let req = match err.downcast_ref::<Error>() {
        Some(Error::Transport(req)) => req,
        Some(_) => return None,
        None => err.downcast_ref::<RequestError>()?,
    };
    Some(&*req.source)
}

fn timeout_predicate(err: &(dyn StdError + 'static)) -> Option<bool> {
    if let Some(e) = err.downcast_ref::<io::Error>() {
        return Some(e.kind() == io::ErrorKind::TimedOut);
    }
    if err.is::<tower::timeout::error::Elapsed>() {
        return Some(true);
    }
    if let Some(e) = err.downcast_ref::<hyper::Error>() {
        return Some(e.is_timeout() || source_predicate(e) == Some(true));
    }
    if let Some(Error::Service(inner)) = err.downcast_ref::<Error>() {
        return timeout_predicate(&**inner);
    }
    if err.is::<hyper_util::client::legacy::Error>() {
        return source_predicate(err);
    }
    None
}

/// Answer of the first cause of `err` that has a timeout predicate
fn source_predicate(err: &(dyn StdError + 'static)) -> Option<bool> {
    let mut cause = err.source();
    while let Some(e) = cause {
        if let Some(timeout) = timeout_predicate(e) {
            return Some(timeout);
        }
        cause = e.source();
    }
    None
}

fn is_closed_connection(err: &(dyn StdError + 'static)) -> bool {
    err.to_string().contains(CLOSED_CONNECTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("{0}")]
    struct Opaque(&'static str);

    fn request_error(source: impl Into<BoxError>) -> RequestError {
        RequestError {
            method: http::Method::GET,
            url: "http://127.0.0.1:8001/version".into(),
            source: source.into(),
        }
    }

    fn timed_out() -> io::Error {
        io::Error::new(io::ErrorKind::TimedOut, "deadline exceeded")
    }

    #[test]
    fn no_error_is_not_a_timeout() {
        assert!(!is_timeout(None));
    }

    #[test]
    fn direct_predicates_are_used() {
        assert!(is_timeout(Some(&timed_out())));
        assert!(!is_timeout(Some(&io::Error::from(io::ErrorKind::ConnectionRefused))));
        assert!(is_timeout(Some(&tower::timeout::error::Elapsed::new())));
    }

    #[test]
    fn direct_predicate_wins_over_message() {
        let err = io::Error::new(io::ErrorKind::Other, "use of closed network connection");
        assert!(!is_timeout(Some(&err)));
    }

    #[test]
    fn request_error_answers_with_inner_predicate() {
        assert!(is_timeout(Some(&request_error(timed_out()))));
        assert!(!is_timeout(Some(&request_error(io::Error::from(
            io::ErrorKind::ConnectionReset
        )))));
        assert!(is_timeout(Some(&request_error(tower::timeout::error::Elapsed::new()))));
    }

    #[test]
    fn transport_variant_is_a_request_error() {
        let err = Error::Transport(request_error(timed_out()));
        assert!(err.is_timeout());
        let err = Error::Transport(request_error(io::Error::from(io::ErrorKind::BrokenPipe)));
        assert!(!err.is_timeout());
    }

    #[test]
    fn request_error_without_inner_predicate_falls_back_to_message() {
        let err = request_error(Opaque("read tcp 10.0.0.1:443: use of closed network connection"));
        assert!(is_timeout(Some(&err)));
        let err = request_error(Opaque("connection refused"));
        assert!(!is_timeout(Some(&err)));
    }

    #[test]
    fn closed_connection_message_is_a_timeout() {
        assert!(is_timeout(Some(&Opaque("write: use of closed network connection"))));
        assert!(!is_timeout(Some(&Opaque("use of closed connection"))));
        assert!(!is_timeout(Some(&Opaque("no route to host"))));
    }

    #[test]
    fn service_error_carries_its_inner_predicate() {
        assert!(Error::Service(Box::new(timed_out())).is_timeout());
        assert!(!Error::Service(Box::new(io::Error::from(io::ErrorKind::NotFound))).is_timeout());
        assert!(!Error::Service(Box::new(Opaque("buffer closed"))).is_timeout());
    }

    #[test]
    fn api_errors_are_not_timeouts() {
        let err = Error::Api(ErrorResponse {
            status: "Failure".into(),
            message: "the server was unable to return a response in the time allotted".into(),
            reason: "Timeout".into(),
            code: 504,
        });
        assert!(!err.is_timeout());
    }

    #[derive(Debug, Error)]
    #[error("tcp connect error")]
    struct Dial(#[source] io::Error);

    #[derive(Debug, Error)]
    #[error("client error (Connect)")]
    struct Connect(#[source] Dial);

    #[test]
    fn causes_are_walked_below_wrappers_with_a_predicate() {
        let chained = Connect(Dial(timed_out()));
        assert_eq!(source_predicate(&chained), Some(true));
        let refused = Connect(Dial(io::Error::from(io::ErrorKind::ConnectionRefused)));
        assert_eq!(source_predicate(&refused), Some(false));
        assert_eq!(source_predicate(&timed_out()), None);
    }

    #[test]
    fn opaque_wrappers_are_not_walked() {
        // only transport errors known to carry a cause are inspected below the surface
        assert!(!is_timeout(Some(&request_error(Dial(timed_out())))));
    }
}
