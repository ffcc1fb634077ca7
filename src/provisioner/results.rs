//! Result listing index.

use std::collections::BTreeMap;

/// Result artifact keys grouped by their result-group segment.
///
/// The group is the second `/`-delimited segment of an object key, i.e. the
/// directory directly under the job identifier: `jobA/groupX/f1` belongs to
/// `groupX`. Keys without a group segment (nothing below the second segment,
/// such as `jobA/f4`) are silently omitted. Built fresh on every query,
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultIndex {
    groups: BTreeMap<String, Vec<String>>,
}

impl ResultIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a full object key, grouping it by its second path segment.
    /// Returns false (and stores nothing) when the key has no group segment.
    pub fn insert(&mut self, key: String) -> bool {
        let mut segments = key.split('/');
        let group = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(group), Some(_)) => group.to_string(),
            _ => return false,
        };
        self.groups.entry(group).or_default().push(key);
        true
    }

    /// Keys in the given group, in insertion (listing) order.
    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over (group, keys) pairs in group order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.groups.iter()
    }
}
