// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Key-value tag sets and the set operations used by reconciliation.

use std::collections::{btree_map, BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Key prefix reserved by the provider; such tags cannot be added or removed.
pub const AWS_TAG_KEY_PREFIX: &str = "aws:";

/// An unordered collection of tags for one resource, keyed by tag key.
///
/// Entries are kept in key order so that iteration, chunking and every
/// conversion derived from them are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyValueTags {
    entries: BTreeMap<String, String>,
}

impl KeyValueTags {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tags in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no tags.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite a tag, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Tag keys in key order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Tags as a plain string map.
    pub fn map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Tags present in `self` whose key is absent from `new`.
    ///
    /// Keys whose value changed are not reported here: they are overwritten
    /// through [`KeyValueTags::updated`].
    pub fn removed(&self, new: &Self) -> Self {
        self.entries
            .iter()
            .filter(|(k, _)| !new.entries.contains_key(*k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Tags of `new` that are missing from `self` or carry a different value.
    pub fn updated(&self, new: &Self) -> Self {
        new.entries
            .iter()
            .filter(|(k, v)| self.entries.get(*k) != Some(*v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Drop provider-reserved tags (keys starting with `aws:`).
    pub fn ignore_aws(&self) -> Self {
        self.entries
            .iter()
            .filter(|(k, _)| !k.starts_with(AWS_TAG_KEY_PREFIX))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Split into consecutive chunks of at most `size` tags, in key order.
    ///
    /// A `size` of zero is treated as one. An empty set yields no chunks.
    pub fn chunks(&self, size: usize) -> Vec<Self> {
        let size = size.max(1);
        let mut result: Vec<Self> = Vec::with_capacity(self.len().div_ceil(size));
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i % size == 0 {
                result.push(Self::new());
            }
            if let Some(chunk) = result.last_mut() {
                chunk.entries.insert(k.clone(), v.clone());
            }
        }
        result
    }

    /// Convert into a service-native tag collection.
    pub fn native<C: FromKeyValueTags>(&self) -> C {
        C::from_key_value_tags(self)
    }

    /// Convert into a service-native collection of bare tag keys.
    pub fn native_keys<C: FromTagKeys>(&self) -> C {
        C::from_tag_keys(self)
    }
}

impl<K, V> FromIterator<(K, V)> for KeyValueTags
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<S: BuildHasher> From<HashMap<String, String, S>> for KeyValueTags {
    fn from(map: HashMap<String, String, S>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for KeyValueTags {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a KeyValueTags {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`KeyValueTags`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// A service-native tag element built from one key-value pair.
pub trait NativeTag {
    /// Build the native element.
    fn from_key_value(key: &str, value: &str) -> Self;
}

/// A service-native tag element that carries only the key.
pub trait NativeTagKey {
    /// Build the native element.
    fn from_key(key: &str) -> Self;
}

impl NativeTagKey for String {
    fn from_key(key: &str) -> Self {
        key.to_owned()
    }
}

/// Collections a [`KeyValueTags`] can be converted into with
/// [`KeyValueTags::native`].
pub trait FromKeyValueTags {
    /// Perform the conversion.
    fn from_key_value_tags(tags: &KeyValueTags) -> Self;
}

impl<T: NativeTag> FromKeyValueTags for Vec<T> {
    fn from_key_value_tags(tags: &KeyValueTags) -> Self {
        tags.iter().map(|(k, v)| T::from_key_value(k, v)).collect()
    }
}

impl<S: BuildHasher + Default> FromKeyValueTags for HashMap<String, String, S> {
    fn from_key_value_tags(tags: &KeyValueTags) -> Self {
        tags.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }
}

impl FromKeyValueTags for BTreeMap<String, String> {
    fn from_key_value_tags(tags: &KeyValueTags) -> Self {
        tags.entries.clone()
    }
}

/// Collections of bare keys a [`KeyValueTags`] can be converted into with
/// [`KeyValueTags::native_keys`].
pub trait FromTagKeys {
    /// Perform the conversion.
    fn from_tag_keys(tags: &KeyValueTags) -> Self;
}

impl<T: NativeTagKey> FromTagKeys for Vec<T> {
    fn from_tag_keys(tags: &KeyValueTags) -> Self {
        tags.iter().map(|(k, _)| T::from_key(k)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tags(pairs: &[(&str, &str)]) -> KeyValueTags {
        pairs.iter().copied().collect()
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Tag {
        key: String,
        value: String,
    }

    impl NativeTag for Tag {
        fn from_key_value(key: &str, value: &str) -> Self {
            Self {
                key: key.to_owned(),
                value: value.to_owned(),
            }
        }
    }

    #[test]
    fn removed_and_updated_split_a_simple_change() {
        let old = tags(&[("a", "1"), ("b", "2")]);
        let new = tags(&[("b", "2"), ("c", "3")]);

        assert_eq!(old.removed(&new), tags(&[("a", "1")]));
        assert_eq!(old.updated(&new), tags(&[("c", "3")]));
    }

    #[test]
    fn changed_value_is_updated_not_removed() {
        let old = tags(&[("env", "dev")]);
        let new = tags(&[("env", "prod")]);

        assert!(old.removed(&new).is_empty());
        assert_eq!(old.updated(&new), tags(&[("env", "prod")]));
    }

    #[test]
    fn ignore_aws_drops_reserved_keys() {
        let set = tags(&[("aws:cloudformation:stack-name", "x"), ("Name", "web")]);
        assert_eq!(set.ignore_aws(), tags(&[("Name", "web")]));
    }

    #[test]
    fn chunks_are_positional_and_bounded() {
        let set = tags(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4"), ("e", "5")]);
        let sizes: Vec<usize> = set.chunks(2).iter().map(KeyValueTags::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(set.chunks(2)[0].keys(), vec!["a", "b"]);
        assert!(KeyValueTags::new().chunks(3).is_empty());
        assert_eq!(set.chunks(0).len(), 5);
    }

    #[test]
    fn native_conversions() {
        let set = tags(&[("k1", "v1"), ("k2", "v2")]);
        let native: Vec<Tag> = set.native();
        assert_eq!(
            native,
            vec![Tag::from_key_value("k1", "v1"), Tag::from_key_value("k2", "v2")]
        );
        let map: HashMap<String, String> = set.native();
        assert_eq!(map.get("k2").map(String::as_str), Some("v2"));
        let keys: Vec<String> = set.native_keys();
        assert_eq!(keys, set.keys());
    }

    fn tag_map() -> impl Strategy<Value = BTreeMap<String, String>> {
        prop::collection::btree_map("[a-e]{1,2}", "[0-2]", 0..12)
    }

    proptest! {
        #[test]
        fn applying_removed_and_updated_reaches_desired(old in tag_map(), new in tag_map()) {
            let old = KeyValueTags::from(old);
            let new = KeyValueTags::from(new);

            let mut applied = old.clone();
            for key in old.removed(&new).keys() {
                applied.entries.remove(&key);
            }
            for (k, v) in &old.updated(&new) {
                applied.insert(k, v);
            }
            prop_assert_eq!(applied, new);
        }

        #[test]
        fn chunks_partition_without_duplication(set in tag_map(), size in 1usize..6) {
            let set = KeyValueTags::from(set);
            let chunks = set.chunks(size);
            prop_assert_eq!(chunks.len(), set.len().div_ceil(size));
            prop_assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= size));
            let rejoined: KeyValueTags = chunks
                .iter()
                .flat_map(|c| c.iter().map(|(k, v)| (k.to_owned(), v.to_owned())))
                .collect();
            prop_assert_eq!(rejoined, set);
        }
    }
}
