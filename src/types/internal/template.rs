use std::collections::BTreeMap;

use super::label_set::Labeled;

/// Catalog template the broker instantiates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub uid: String,
    pub namespace: String,
    pub name: String,
    /// Labels applied to every object the template creates
    pub object_labels: BTreeMap<String, String>,
}

impl Labeled for Template {
    fn labels_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.object_labels
    }
}
