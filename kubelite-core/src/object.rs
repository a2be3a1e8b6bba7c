//! Lists of objects
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use serde::Deserialize;

/// Items of one kind together with the list metadata
///
/// Decoding target for every collection read, in place of the generated `*List` types.
/// The `/validate` array is wrapped into one with [`ObjectList::from_items`].
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ObjectList<T> {
    /// Resource version and paging token, empty for wrapped arrays
    #[serde(default)]
    pub metadata: ListMeta,
    /// The objects, in server order
    #[serde(bound(deserialize = "T: Deserialize<'de>"))]
    pub items: Vec<T>,
}

impl<T> ObjectList<T> {
    /// Wrap items that arrived without list metadata
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            metadata: ListMeta::default(),
            items,
        }
    }

    /// Borrow the items in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for ObjectList<T> {
    type IntoIter = std::vec::IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ObjectList<T> {
    type IntoIter = std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod test {
    use super::ObjectList;

    #[test]
    fn list_without_metadata_deserializes() {
        let list: ObjectList<u32> = serde_json::from_str(r#"{"items": [1, 2, 3]}"#).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.metadata.resource_version, None);
        assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn from_items_preserves_order() {
        let list = ObjectList::from_items(vec!["b", "a"]);
        assert_eq!((&list).into_iter().copied().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(!list.is_empty());
    }
}
