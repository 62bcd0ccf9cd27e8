//! # Collection Algebra
//!
//! Ordered lists of shared records of one kind, with copy, filter,
//! intersection and union derivations.
//!
//! Derived collections hold new handles to the same records; nothing is
//! deep-copied. Raw [`Collection::add`] never deduplicates; the set-algebra
//! forms deduplicate by id. Id sets use `BTreeSet` so membership checks do
//! not depend on hashing.

use crate::filter::Matcher;
use crate::record::{Record, Shared};
use crate::ValueScope;
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// COLLECTION
// =============================================================================

/// Insertion-ordered list of shared records.
pub struct Collection<R> {
    items: Vec<Shared<R>>,
}

impl<R: Record> Collection<R> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Structural copy of `source`, duplicates included.
    #[must_use]
    pub fn new_copy(source: &Self) -> Self {
        let mut out = Self::new();
        out.add_all(source);
        out
    }

    /// Elements of `source` accepted by `matcher`, in source order.
    #[must_use]
    pub fn new_filtered<M: Matcher<R> + ?Sized>(source: &Self, matcher: &M) -> Self {
        let mut out = Self::new();
        out.add_filtered(source, matcher);
        out
    }

    /// Elements of `a` whose id also appears in `b`, once each, in `a`'s order.
    #[must_use]
    pub fn new_intersection(a: &Self, b: &Self) -> Self {
        let mut out = Self::new();
        out.add_intersection(a, b);
        out
    }

    /// All of `b`, then the elements of `a` whose id `b` lacks.
    #[must_use]
    pub fn new_union(a: &Self, b: &Self) -> Self {
        let mut out = Self::new();
        out.add_union(a, b);
        out
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Append one handle. No deduplication.
    pub fn add(&mut self, item: Shared<R>) {
        self.items.push(item);
    }

    /// Append every element of `source`. No deduplication.
    pub fn add_all(&mut self, source: &Self) {
        self.items.extend(source.items.iter().cloned());
    }

    /// Append the elements of `source` accepted by `matcher`.
    pub fn add_filtered<M: Matcher<R> + ?Sized>(&mut self, source: &Self, matcher: &M) {
        self.items.extend(
            source
                .items
                .iter()
                .filter(|item| matcher.accepts(item))
                .cloned(),
        );
    }

    /// Append the intersection of `a` and `b` in `a`'s order.
    ///
    /// Duplicate ids inside `a` are appended once.
    pub fn add_intersection(&mut self, a: &Self, b: &Self) {
        let in_b = b.id_set();
        let mut added = BTreeSet::new();
        for item in &a.items {
            let id = item.id();
            if in_b.contains(&id) && added.insert(id) {
                self.items.push(item.clone());
            }
        }
    }

    /// Append `b` in full, then the elements unique to `a`.
    ///
    /// Duplicate ids inside `b` are kept; `a` only contributes ids not yet
    /// seen, each once.
    pub fn add_union(&mut self, a: &Self, b: &Self) {
        let mut seen = BTreeSet::new();
        for item in &b.items {
            seen.insert(item.id());
            self.items.push(item.clone());
        }
        for item in &a.items {
            if seen.insert(item.id()) {
                self.items.push(item.clone());
            }
        }
    }

    // =========================================================================
    // ACCESS
    // =========================================================================

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Handle at position `index`, or `None` when out of range.
    #[must_use]
    pub fn get_nth(&self, index: usize) -> Option<Shared<R>> {
        self.items.get(index).cloned()
    }

    /// First element whose id equals `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<Shared<R>> {
        self.items
            .iter()
            .find(|item| item.entity().id() == id)
            .cloned()
    }

    /// Visit every element in order.
    pub fn for_each<F: FnMut(&Shared<R>)>(&self, visitor: F) {
        self.items.iter().for_each(visitor);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shared<R>> {
        self.items.iter()
    }

    /// Ids of every element in order, duplicates included.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(Shared::id).collect()
    }

    /// Distinct values of `key` across the collection, sorted.
    #[must_use]
    pub fn unique_values(&self, key: &str, scope: ValueScope) -> Vec<String> {
        let mut values = BTreeSet::new();
        for item in &self.items {
            let entity = item.entity();
            match scope {
                ValueScope::First => {
                    if let Some(value) = entity.param_value(key) {
                        values.insert(value.to_string());
                    }
                }
                ValueScope::All => {
                    values.extend(entity.param_value_list(key).iter().cloned());
                }
            }
        }
        values.into_iter().collect()
    }

    fn id_set(&self) -> BTreeSet<String> {
        self.items.iter().map(Shared::id).collect()
    }
}

// =============================================================================
// TRAIT IMPLS
// =============================================================================

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for Collection<R> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<R: Record> fmt::Debug for Collection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<R: Record> FromIterator<Shared<R>> for Collection<R> {
    fn from_iter<I: IntoIterator<Item = Shared<R>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<R: Record> Extend<Shared<R>> for Collection<R> {
    fn extend<I: IntoIterator<Item = Shared<R>>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<R> IntoIterator for Collection<R> {
    type Item = Shared<R>;
    type IntoIter = std::vec::IntoIter<Shared<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Collection<R> {
    type Item = &'a Shared<R>;
    type IntoIter = std::slice::Iter<'a, Shared<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::{Device, DeviceList};

    fn devices(ids: &[&str]) -> DeviceList {
        ids.iter()
            .map(|id| Device::new(*id).expect("device"))
            .collect()
    }

    #[test]
    fn copy_keeps_duplicates() {
        let src = devices(&["a", "b", "a"]);
        let copy = DeviceList::new_copy(&src);
        assert_eq!(copy.ids(), vec!["a", "b", "a"]);
        assert_eq!(src.len(), 3);
    }

    #[test]
    fn copy_shares_records() {
        let src = devices(&["e1000"]);
        let copy = DeviceList::new_copy(&src);
        let original = src.get_nth(0).expect("nth");
        let copied = copy.get_nth(0).expect("nth");
        assert!(original.same_entity(&copied));
    }

    #[test]
    fn intersection_follows_first_operand() {
        let a = devices(&["c", "a", "b", "a"]);
        let b = devices(&["a", "b", "z"]);
        let out = DeviceList::new_intersection(&a, &b);
        assert_eq!(out.ids(), vec!["a", "b"]);
    }

    #[test]
    fn union_puts_second_operand_first() {
        let a = devices(&["1", "2", "3"]);
        let b = devices(&["3", "4"]);
        let out = DeviceList::new_union(&a, &b);
        assert_eq!(out.ids(), vec!["3", "4", "1", "2"]);
    }

    #[test]
    fn union_keeps_duplicates_of_second_operand() {
        let a = devices(&["x", "y"]);
        let b = devices(&["y", "y"]);
        let out = DeviceList::new_union(&a, &b);
        assert_eq!(out.ids(), vec!["y", "y", "x"]);
    }

    #[test]
    fn union_with_copy_keeps_id_set() {
        let a = devices(&["p", "q", "r"]);
        let out = DeviceList::new_union(&a, &DeviceList::new_copy(&a));
        assert_eq!(out.ids(), vec!["p", "q", "r"]);
    }

    #[test]
    fn filtered_with_empty_filter_equals_copy() {
        let a = devices(&["p", "q", "p"]);
        let filtered = DeviceList::new_filtered(&a, &Filter::new());
        assert_eq!(filtered.ids(), DeviceList::new_copy(&a).ids());
    }

    #[test]
    fn filtered_preserves_source_order() {
        let a = devices(&["e1000", "sb16", "rtl8139"]);
        for dev in &a {
            let class = if dev.id() == "sb16" { "audio" } else { "network" };
            dev.set_param("class", class);
        }
        let mut filter = Filter::new();
        filter.add_constraint("class", "network");

        let out = DeviceList::new_filtered(&a, &filter);
        assert_eq!(out.ids(), vec!["e1000", "rtl8139"]);
    }

    #[test]
    fn get_nth_out_of_range_is_none() {
        let a = devices(&["only"]);
        assert!(a.get_nth(1).is_none());
        assert!(DeviceList::new().get_nth(0).is_none());
    }

    #[test]
    fn find_by_id_returns_first_match() {
        let a = devices(&["dup", "dup"]);
        let second = a.get_nth(1).expect("nth");
        second.set_param("marker", "second");

        let found = a.find_by_id("dup").expect("found");
        assert_eq!(found.param_value("marker"), None);
        assert!(a.find_by_id("missing").is_none());
    }

    #[test]
    fn for_each_visits_in_order() {
        let a = devices(&["one", "two", "three"]);
        let mut seen = Vec::new();
        a.for_each(|item| seen.push(item.id()));
        assert_eq!(seen, vec!["one", "two", "three"]);
    }

    #[test]
    fn unique_values_by_scope() {
        let a = devices(&["a", "b", "c"]);
        a.get_nth(0).expect("nth").add_param("vendor", "Intel");
        let b = a.get_nth(1).expect("nth");
        b.add_param("vendor", "Creative");
        b.add_param("vendor", "Intel");
        a.get_nth(2).expect("nth").add_param("vendor", "AMD");

        assert_eq!(
            a.unique_values("vendor", ValueScope::First),
            vec!["AMD", "Creative", "Intel"]
        );
        assert_eq!(
            a.unique_values("vendor", ValueScope::All),
            vec!["AMD", "Creative", "Intel"]
        );
        assert!(a.unique_values("class", ValueScope::First).is_empty());
    }

    #[test]
    fn first_scope_ignores_later_values() {
        let a = devices(&["a"]);
        let dev = a.get_nth(0).expect("nth");
        dev.add_param("subsystem", "pci");
        dev.add_param("subsystem", "usb");

        assert_eq!(a.unique_values("subsystem", ValueScope::First), vec!["pci"]);
        assert_eq!(
            a.unique_values("subsystem", ValueScope::All),
            vec!["pci", "usb"]
        );
    }
}
