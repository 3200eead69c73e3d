//! Device list value object

use std::collections::BTreeSet;

/// Sorted list of unique device names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceList {
    names: Vec<String>,
}

impl DeviceList {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).is_ok()
    }
}

impl<S: Into<String>> FromIterator<S> for DeviceList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let unique: BTreeSet<String> = iter
            .into_iter()
            .map(Into::into)
            .filter(|name| !name.trim().is_empty())
            .collect();
        Self {
            names: unique.into_iter().collect(),
        }
    }
}

impl IntoIterator for DeviceList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}
