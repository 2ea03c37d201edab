//! Keyed accumulators for the breakdown stages.
//!
//! A [`GroupedAccumulator`] maps a category key to an accumulator record and
//! remembers the order in which keys were first seen, so that sorting the
//! output with a stable sort keeps ties in input order.

use std::collections::HashMap;

/// Category key → accumulator, in first-seen order.
#[derive(Debug, Clone)]
pub(crate) struct GroupedAccumulator<A> {
    index: HashMap<String, usize>,
    entries: Vec<(String, A)>,
}

impl<A: Default> GroupedAccumulator<A> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Returns the accumulator for `key`, creating it on first use.
    pub(crate) fn entry(&mut self, key: &str) -> &mut A {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                self.entries.push((key.to_string(), A::default()));
                let position = self.entries.len() - 1;
                self.index.insert(key.to_string(), position);
                position
            }
        };
        &mut self.entries[position].1
    }

    /// Consumes the accumulator, yielding `(key, value)` in first-seen order.
    pub(crate) fn into_entries(self) -> Vec<(String, A)> {
        self.entries
    }
}

/// Normalizes an optional grouping code, falling back to `undefined_label`
/// when the code is missing or blank.
pub(crate) fn group_label<'a>(code: Option<&'a str>, undefined_label: &'a str) -> &'a str {
    match code.map(str::trim) {
        Some(code) if !code.is_empty() => code,
        _ => undefined_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_first_seen_order() {
        let mut groups: GroupedAccumulator<u32> = GroupedAccumulator::new();
        *groups.entry("LYON") += 1;
        *groups.entry("PARIS") += 1;
        *groups.entry("LYON") += 1;
        *groups.entry("NANTES") += 1;

        let entries = groups.into_entries();
        assert_eq!(
            entries,
            vec![
                ("LYON".to_string(), 2),
                ("PARIS".to_string(), 1),
                ("NANTES".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_empty_accumulator() {
        let groups: GroupedAccumulator<u32> = GroupedAccumulator::new();
        assert!(groups.into_entries().is_empty());
    }

    #[test]
    fn test_group_label_defaults() {
        assert_eq!(group_label(Some("PARIS"), "undefined"), "PARIS");
        assert_eq!(group_label(Some("  LYON "), "undefined"), "LYON");
        assert_eq!(group_label(Some("   "), "undefined"), "undefined");
        assert_eq!(group_label(None, "undefined"), "undefined");
    }
}
