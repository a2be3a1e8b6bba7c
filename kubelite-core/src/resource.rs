use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// A kind with standard object metadata, located by group, version and plural
///
/// Implemented for every generated k8s-openapi kind. Whether a kind is namespaced
/// is carried by its `k8s_openapi::Resource::Scope`.
pub trait Resource: k8s_openapi::Resource + k8s_openapi::Metadata<Ty = ObjectMeta> {
    /// Path of the collection, in `namespace` when given
    ///
    /// The core group lives under `/api`, every other group under `/apis`.
    fn url_path(namespace: Option<&str>) -> String {
        let root = if Self::GROUP.is_empty() { "api" } else { "apis" };
        match namespace {
            Some(ns) => format!(
                "/{root}/{}/namespaces/{ns}/{}",
                Self::API_VERSION,
                Self::URL_PATH_SEGMENT
            ),
            None => format!("/{root}/{}/{}", Self::API_VERSION, Self::URL_PATH_SEGMENT),
        }
    }
}

impl<K> Resource for K where K: k8s_openapi::Resource + k8s_openapi::Metadata<Ty = ObjectMeta> {}

/// Shortcuts into `metadata`
pub trait ResourceExt: Resource {
    /// `name`, else `generateName`, else the empty string
    fn name_any(&self) -> String {
        let meta = self.metadata();
        meta.name
            .clone()
            .or_else(|| meta.generate_name.clone())
            .unwrap_or_default()
    }

    /// Namespace of the object, `None` for cluster scoped kinds
    fn namespace(&self) -> Option<String> {
        self.metadata().namespace.clone()
    }
}

impl<K: Resource> ResourceExt for K {}
