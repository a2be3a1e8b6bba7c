use std::{
    fs,
    path::{Path, PathBuf},
};

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::error::KubeconfigError;

/// The parts of a kubeconfig read when selecting a context
///
/// Other keys of the file, such as `preferences` or exec plugins, are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Kubeconfig {
    /// Servers by name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub clusters: Vec<Named<Cluster>>,
    /// Credentials by name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<Named<AuthInfo>>,
    /// Cluster and user pairs by name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contexts: Vec<Named<Context>>,
    /// Context used when none is requested
    pub current_context: Option<String>,
}

/// An entry of `clusters`, `users` or `contexts`
#[derive(Clone, Debug, Deserialize)]
pub struct Named<T> {
    /// Name the entry is referenced by
    pub name: String,
    /// The entry, found under the `cluster`, `user` or `context` key
    #[serde(alias = "cluster", alias = "user", alias = "context")]
    pub value: Option<T>,
}

/// Where a cluster is served
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Cluster {
    /// Url of the apiserver
    pub server: Option<String>,
}

/// Credentials of a user
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthInfo {
    /// Bearer token
    #[serde(default, deserialize_with = "secret")]
    pub token: Option<SecretString>,
    /// File holding the bearer token, used when `token` is unset
    #[serde(rename = "tokenFile")]
    pub token_file: Option<PathBuf>,
}

impl AuthInfo {
    pub(crate) fn bearer_token(&self) -> Result<Option<SecretString>, KubeconfigError> {
        if let Some(token) = &self.token {
            return Ok(Some(token.clone()));
        }
        let Some(path) = &self.token_file else {
            return Ok(None);
        };
        let token = fs::read_to_string(path).map_err(|source| KubeconfigError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(Some(SecretString::from(token.trim().to_owned())))
    }
}

/// A cluster, a user and a default namespace
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Context {
    /// Name of the cluster
    pub cluster: String,
    /// Name of the user
    pub user: String,
    /// Namespace of calls that name none
    pub namespace: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

fn secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<SecretString>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

fn lookup<'a, T>(entries: &'a [Named<T>], name: &str) -> Option<&'a T> {
    entries.iter().find(|e| e.name == name)?.value.as_ref()
}

impl Kubeconfig {
    /// Parse yaml text, merging multiple documents in order
    pub fn from_yaml(text: &str) -> Result<Self, KubeconfigError> {
        let mut merged = Self::default();
        for doc in serde_yaml::Deserializer::from_str(text) {
            let value = serde_yaml::Value::deserialize(doc).map_err(KubeconfigError::Yaml)?;
            if value.is_null() {
                continue;
            }
            merged = merged.merge(serde_yaml::from_value(value).map_err(KubeconfigError::Yaml)?);
        }
        Ok(merged)
    }

    /// Read one file
    ///
    /// A relative `tokenFile` is resolved against the directory of `path`.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, KubeconfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| KubeconfigError::Read {
            path: path.into(),
            source,
        })?;
        let mut config = Self::from_yaml(&text)?;
        if let Some(dir) = path.parent() {
            for user in config.users.iter_mut().filter_map(|u| u.value.as_mut()) {
                if let Some(file) = user.token_file.as_mut().filter(|f| f.is_relative()) {
                    *file = dir.join(&*file);
                }
            }
        }
        Ok(config)
    }

    /// Read every path of `$KUBECONFIG`, or `~/.kube/config` when it is unset or empty
    pub fn read() -> Result<Self, KubeconfigError> {
        let paths = std::env::var_os("KUBECONFIG")
            .map(|value| {
                std::env::split_paths(&value)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        if paths.is_empty() {
            let home = home::home_dir().ok_or(KubeconfigError::NoPath)?;
            return Self::read_from(home.join(".kube").join("config"));
        }
        Self::read_paths(&paths)
    }

    fn read_paths(paths: &[PathBuf]) -> Result<Self, KubeconfigError> {
        paths
            .iter()
            .try_fold(Self::default(), |merged, path| Ok(merged.merge(Self::read_from(path)?)))
    }

    /// Combine with a later file
    ///
    /// The first file to set `current-context` or to define a name wins.
    #[must_use]
    pub fn merge(mut self, later: Self) -> Self {
        fn append<T>(into: &mut Vec<Named<T>>, later: Vec<Named<T>>) {
            for entry in later {
                if !into.iter().any(|e| e.name == entry.name) {
                    into.push(entry);
                }
            }
        }
        append(&mut self.clusters, later.clusters);
        append(&mut self.users, later.users);
        append(&mut self.contexts, later.contexts);
        self.current_context = self.current_context.or(later.current_context);
        self
    }

    /// The cluster called `name`
    pub fn cluster(&self, name: &str) -> Option<&Cluster> {
        lookup(&self.clusters, name)
    }

    /// The user called `name`
    pub fn user(&self, name: &str) -> Option<&AuthInfo> {
        lookup(&self.users, name)
    }

    /// The context called `name`
    pub fn context(&self, name: &str) -> Option<&Context> {
        lookup(&self.contexts, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    const MINIKUBE: &str = r#"
apiVersion: v1
kind: Config
current-context: minikube
preferences: {}
clusters:
- name: minikube
  cluster:
    server: http://127.0.0.1:8001
contexts:
- name: minikube
  context:
    cluster: minikube
    user: minikube
    namespace: kube-system
users:
- name: minikube
  user:
    token: sekrit
"#;

    #[test]
    fn named_entries_are_found() {
        let config = Kubeconfig::from_yaml(MINIKUBE).unwrap();
        assert_eq!(config.current_context.as_deref(), Some("minikube"));
        assert_eq!(
            config.cluster("minikube").unwrap().server.as_deref(),
            Some("http://127.0.0.1:8001")
        );
        assert_eq!(
            config.context("minikube").unwrap().namespace.as_deref(),
            Some("kube-system")
        );
        let user = config.user("minikube").unwrap();
        assert_eq!(user.token.as_ref().unwrap().expose_secret(), "sekrit");
        assert!(config.cluster("other").is_none());
    }

    #[test]
    fn empty_text_is_an_empty_config() {
        let config = Kubeconfig::from_yaml("").unwrap();
        assert!(config.clusters.is_empty());
        assert!(config.current_context.is_none());
    }

    #[test]
    fn null_lists_are_empty() {
        let config = Kubeconfig::from_yaml("clusters:\nusers: ~\n").unwrap();
        assert!(config.clusters.is_empty());
        assert!(config.users.is_empty());
    }

    #[test]
    fn first_document_wins() {
        let text = format!(
            "{MINIKUBE}\n---\ncurrent-context: other\nclusters:\n- name: minikube\n  cluster:\n    server: http://10.0.0.1\n- name: other\n  cluster:\n    server: http://10.0.0.2\n"
        );
        let merged = Kubeconfig::from_yaml(&text).unwrap();
        assert_eq!(merged.current_context.as_deref(), Some("minikube"));
        assert_eq!(merged.clusters.len(), 2);
        assert_eq!(
            merged.cluster("minikube").unwrap().server.as_deref(),
            Some("http://127.0.0.1:8001")
        );
    }

    #[test]
    fn debug_hides_token() {
        let user: AuthInfo = serde_yaml::from_str("token: kubelite_secret\n").unwrap();
        assert!(!format!("{user:?}").contains("kubelite_secret"));
    }

    #[test]
    fn token_file_is_read_relative_to_kubeconfig() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("token"), "from-file\n").unwrap();
        let config_path = dir.path().join("config");
        std::fs::write(&config_path, "users:\n- name: u\n  user:\n    tokenFile: token\n").unwrap();

        let config = Kubeconfig::read_from(&config_path).unwrap();
        let secret = config.user("u").unwrap().bearer_token().unwrap().unwrap();
        assert_eq!(secret.expose_secret(), "from-file");
    }

    #[test]
    fn inline_token_takes_precedence() {
        let user = AuthInfo {
            token: Some(SecretString::from("inline".to_string())),
            token_file: Some("/does/not/exist".into()),
        };
        assert_eq!(user.bearer_token().unwrap().unwrap().expose_secret(), "inline");
    }

    #[test]
    fn unreadable_token_file_is_an_error() {
        let user = AuthInfo {
            token_file: Some("/does/not/exist".into()),
            ..Default::default()
        };
        assert!(matches!(user.bearer_token(), Err(KubeconfigError::Read { .. })));
    }

    #[test]
    fn paths_are_merged_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        std::fs::write(&first, "current-context: a\n").unwrap();
        std::fs::write(
            &second,
            "current-context: b\ncontexts:\n- name: b\n  context:\n    cluster: c\n    user: u\n",
        )
        .unwrap();

        let merged = Kubeconfig::read_paths(&[first, second]).unwrap();
        assert_eq!(merged.current_context.as_deref(), Some("a"));
        assert!(merged.context("b").is_some());
    }
}
