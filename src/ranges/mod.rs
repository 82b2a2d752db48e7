pub mod diff;

use std::collections::btree_map::Iter;
use std::collections::{BTreeMap, BTreeSet};

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

/// CIDR ranges by category key, both kept sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeSet {
  categories: BTreeMap<String, BTreeSet<String>>,
}

impl RangeSet {
  pub fn new() -> RangeSet {
    RangeSet {
      categories: BTreeMap::new(),
    }
  }

  // categories are never stored empty
  pub fn insert<I, S>(&mut self, key: &str, entries: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let mut entries = entries.into_iter().map(Into::into).peekable();
    if entries.peek().is_none() {
      return;
    }

    self
      .categories
      .entry(key.to_owned())
      .or_default()
      .extend(entries);
  }

  pub fn get(&self, key: &str) -> Option<&BTreeSet<String>> {
    self.categories.get(key)
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.categories.keys().map(String::as_str)
  }

  pub fn iter(&self) -> Iter<'_, String, BTreeSet<String>> {
    self.categories.iter()
  }

  pub fn is_empty(&self) -> bool {
    self.categories.is_empty()
  }

  pub fn entry_count(&self) -> usize {
    self.categories.values().map(BTreeSet::len).sum()
  }

  /// Drops categories with no entries, which a hand-edited cache may contain.
  pub fn prune(&mut self) {
    self.categories.retain(|_, entries| !entries.is_empty());
  }

  pub fn invalid_entries(&self) -> Vec<(&str, &str)> {
    let mut invalid = Vec::new();
    for (key, entries) in &self.categories {
      for entry in entries {
        if entry.parse::<IpNetwork>().is_err() {
          invalid.push((key.as_str(), entry.as_str()));
        }
      }
    }

    invalid
  }
}

impl<'a> IntoIterator for &'a RangeSet {
  type Item = (&'a String, &'a BTreeSet<String>);
  type IntoIter = Iter<'a, String, BTreeSet<String>>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
