use std::collections::BTreeSet;
use std::fmt;

use super::RangeSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryChange {
  pub key: String,
  pub added: Vec<String>,
  pub removed: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffReport {
  changes: Vec<CategoryChange>,
}

impl DiffReport {
  pub fn is_empty(&self) -> bool {
    self.changes.is_empty()
  }

  pub fn changes(&self) -> &[CategoryChange] {
    &self.changes
  }

  pub fn added_count(&self) -> usize {
    self.changes.iter().map(|c| c.added.len()).sum()
  }

  pub fn removed_count(&self) -> usize {
    self.changes.iter().map(|c| c.removed.len()).sum()
  }
}

pub fn diff(previous: &RangeSet, current: &RangeSet) -> DiffReport {
  let empty = BTreeSet::new();
  let keys: BTreeSet<&str> = previous.keys().chain(current.keys()).collect();

  let mut changes = Vec::new();
  for key in keys {
    let old = previous.get(key).unwrap_or(&empty);
    let new = current.get(key).unwrap_or(&empty);

    let added: Vec<String> = new.difference(old).cloned().collect();
    let removed: Vec<String> = old.difference(new).cloned().collect();
    if added.is_empty() && removed.is_empty() {
      continue;
    }

    changes.push(CategoryChange {
      key: key.to_owned(),
      added,
      removed,
    });
  }

  DiffReport { changes }
}

impl fmt::Display for DiffReport {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let mut lines = Vec::new();
    for change in self.changes() {
      lines.push(format!("[{}]", change.key));
      if !change.added.is_empty() {
        lines.push("  Added:".to_owned());
        lines.extend(change.added.iter().map(|v| format!("    + {}", v)));
      }
      if !change.removed.is_empty() {
        lines.push("  Removed:".to_owned());
        lines.extend(change.removed.iter().map(|v| format!("    - {}", v)));
      }
    }

    write!(f, "{}", lines.join("\n"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ranges(pairs: &[(&str, &[&str])]) -> RangeSet {
    let mut set = RangeSet::new();
    for (key, entries) in pairs {
      set.insert(key, entries.iter().copied());
    }
    set
  }

  #[test]
  fn identical_sets_have_no_diff() {
    let a = ranges(&[
      ("actions", &["1.2.3.0/24", "5.6.7.0/24"]),
      ("actions_ipv6", &["2001:db8::/32"]),
    ]);

    let report = diff(&a, &a);
    assert!(report.is_empty());
    assert_eq!(report.to_string(), "");
  }

  #[test]
  fn diff_is_symmetric() {
    let a = ranges(&[
      ("actions", &["1.2.3.0/24", "5.6.7.0/24"]),
      ("actions_ipv4", &["9.9.9.0/24"]),
    ]);
    let b = ranges(&[
      ("actions", &["1.2.3.0/24", "8.8.8.0/24"]),
      ("actions_ipv6", &["2001:db8::/32"]),
    ]);

    let forward = diff(&a, &b);
    let backward = diff(&b, &a);
    assert_eq!(forward.changes().len(), backward.changes().len());

    for (f, b) in forward.changes().iter().zip(backward.changes()) {
      assert_eq!(f.key, b.key);
      assert_eq!(f.added, b.removed);
      assert_eq!(f.removed, b.added);
    }
  }

  #[test]
  fn added_entry() {
    let old = ranges(&[("actions", &["1.2.3.0/24"])]);
    let new = ranges(&[("actions", &["1.2.3.0/24", "5.6.7.0/24"])]);

    let report = diff(&old, &new);
    assert_eq!(
      report.changes(),
      &[CategoryChange {
        key: "actions".to_owned(),
        added: vec!["5.6.7.0/24".to_owned()],
        removed: vec![],
      }]
    );
    assert_eq!(report.to_string(), "[actions]\n  Added:\n    + 5.6.7.0/24");
  }

  #[test]
  fn renders_keys_sorted_and_removed_after_added() {
    let old = ranges(&[
      ("actions_ipv6", &["2001:db8::/32"]),
      ("actions", &["1.2.3.0/24", "3.3.3.0/24"]),
    ]);
    let new = ranges(&[("actions", &["4.4.4.0/24", "2.2.2.0/24", "1.2.3.0/24"])]);

    let report = diff(&old, &new);
    assert_eq!(report.added_count(), 2);
    assert_eq!(report.removed_count(), 2);
    assert_eq!(
      report.to_string(),
      "[actions]\n\
       \x20 Added:\n\
       \x20   + 2.2.2.0/24\n\
       \x20   + 4.4.4.0/24\n\
       \x20 Removed:\n\
       \x20   - 3.3.3.0/24\n\
       [actions_ipv6]\n\
       \x20 Removed:\n\
       \x20   - 2001:db8::/32"
    );
  }

  #[test]
  fn new_category_is_all_added() {
    let old = RangeSet::new();
    let new = ranges(&[("actions_ipv4", &["9.9.9.0/24"])]);

    let report = diff(&old, &new);
    assert_eq!(report.to_string(), "[actions_ipv4]\n  Added:\n    + 9.9.9.0/24");
  }
}
