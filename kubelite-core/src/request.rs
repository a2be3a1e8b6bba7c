//! Paths and http requests of the read calls
use thiserror::Error;

use crate::params::ListParams;

/// Failure to assemble a request
#[derive(Debug, Error)]
pub enum Error {
    /// The path or query did not form a valid request
    #[error("invalid request: {0}")]
    BuildRequest(#[source] http::Error),
    /// An argument was rejected before anything was sent
    #[error("invalid argument: {0}")]
    Validation(String),
}

/// A path on the apiserver, and the GET requests that target it
///
/// Requests carry only path and query. The client stack supplies scheme and authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Absolute path, without query
    pub url_path: String,
}

impl Request {
    /// Target a path as given, typically a collection from [`Resource::url_path`](crate::Resource::url_path)
    pub fn new<S: Into<String>>(url_path: S) -> Self {
        Self {
            url_path: url_path.into(),
        }
    }

    /// Target the absolute path made of `segments`
    ///
    /// Segments may themselves contain `/`. Empty pieces are dropped, so
    /// `["/apis", "apps/v1"]` and `["apis", "apps", "v1"]` give the same path.
    pub fn abs_path<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url_path = String::new();
        for segment in segments {
            for piece in segment.as_ref().split('/').filter(|p| !p.is_empty()) {
                url_path.push('/');
                url_path.push_str(piece);
            }
        }
        if url_path.is_empty() {
            url_path.push('/');
        }
        Self { url_path }
    }

    /// GET the path itself, as for `/version` or `/validate`
    pub fn get_path(&self) -> Result<http::Request<Vec<u8>>, Error> {
        get(&self.url_path)
    }

    /// GET the collection, filtered and paged by `lp`
    pub fn list(&self, lp: &ListParams) -> Result<http::Request<Vec<u8>>, Error> {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(lp.query_pairs())
            .finish();
        if query.is_empty() {
            return get(&self.url_path);
        }
        get(&format!("{}?{query}", self.url_path))
    }

    /// GET one named object of the collection
    pub fn get(&self, name: &str) -> Result<http::Request<Vec<u8>>, Error> {
        if name.is_empty() {
            return Err(Error::Validation("a non-empty name is required".into()));
        }
        get(&format!("{}/{name}", self.url_path))
    }
}

fn get(uri: &str) -> Result<http::Request<Vec<u8>>, Error> {
    http::Request::get(uri).body(vec![]).map_err(Error::BuildRequest)
}
