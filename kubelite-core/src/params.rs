//! Query parameters of collection reads

/// Selectors and paging of a list call
///
/// Fields left at `None` are omitted from the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Only return objects whose labels match, e.g. `app=web,tier!=db`
    pub label_selector: Option<String>,
    /// Only return objects whose fields match, e.g. `status.phase=Running`
    pub field_selector: Option<String>,
    /// Upper bound on the number of objects in one page
    pub limit: Option<u32>,
    /// Token of the page to resume from, taken from a previous list's metadata
    pub continue_token: Option<String>,
}

impl ListParams {
    /// Restrict by label selector
    #[must_use]
    pub fn labels(self, selector: &str) -> Self {
        Self {
            label_selector: Some(selector.into()),
            ..self
        }
    }

    /// Restrict by field selector
    #[must_use]
    pub fn fields(self, selector: &str) -> Self {
        Self {
            field_selector: Some(selector.into()),
            ..self
        }
    }

    /// Cap the page size
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }

    /// Resume after the page that returned `token`
    #[must_use]
    pub fn continue_from(self, token: &str) -> Self {
        Self {
            continue_token: Some(token.into()),
            ..self
        }
    }

    pub(crate) fn query_pairs(&self) -> impl Iterator<Item = (&'static str, String)> {
        [
            ("labelSelector", self.label_selector.clone()),
            ("fieldSelector", self.field_selector.clone()),
            ("limit", self.limit.map(|n| n.to_string())),
            ("continue", self.continue_token.clone()),
        ]
        .into_iter()
        .filter_map(|(key, value)| Some((key, value?)))
    }
}
