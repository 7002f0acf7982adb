use std::collections::BTreeMap;
use std::collections::btree_map;

/// Validated custom labels
///
/// Only the label parser builds non-empty sets, so keys are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet(BTreeMap<String, String>);

impl LabelSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub(crate) fn insert(&mut self, key: String, value: String) {
        debug_assert!(!key.is_empty());
        self.0.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Copy every label onto `target`, overwriting keys already present
    pub fn merge_into(&self, target: &mut BTreeMap<String, String>) {
        for (key, value) in &self.0 {
            target.insert(key.clone(), value.clone());
        }
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Objects carrying a label map that custom labels can be applied to
pub trait Labeled {
    fn labels_mut(&mut self) -> &mut BTreeMap<String, String>;
}
