//! # Filter Engine
//!
//! Constraint matching over entity properties.
//!
//! A [`Filter`] is an AND of per-key ORs: every constrained key must hold at
//! least one of the accepted values. Specialized filters layer extra checks
//! on top and plug into collections through the [`Matcher`] trait:
//!
//! - [`ProductFilter`]: adds a support-date window for OSes and platforms.
//! - [`OsFilter`]: adds OS relationship constraints, evaluated against a
//!   [`RelationshipGraph`].
//! - [`DeviceLinkFilter`]: evaluates a filter against a link's target device.

use crate::device::DeviceLinkRecord;
use crate::entity::{Entity, ParamMap};
use crate::keys::{PRODUCT_EOL_DATE, PRODUCT_RELEASE_DATE};
use crate::os::{Os, OsList, OsRecord};
use crate::product::Product;
use crate::record::{Record, Shared};
use crate::relationship::RelationshipGraph;
use crate::Relationship;
use chrono::NaiveDate;
use std::collections::BTreeMap;

// =============================================================================
// MATCHER TRAIT
// =============================================================================

/// Accepts or rejects a shared record.
///
/// Collections derive filtered views through this trait, so any filter kind
/// works with [`crate::Collection::new_filtered`].
pub trait Matcher<R: Record> {
    fn accepts(&self, item: &Shared<R>) -> bool;
}

// =============================================================================
// FILTER
// =============================================================================

/// Property constraints: per-key OR, cross-key AND.
///
/// An empty filter matches every entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    constraints: ParamMap,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `value` for `key` in addition to values already accepted.
    pub fn add_constraint(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.constraints.add(key, value);
    }

    /// Drop every accepted value for `key`.
    pub fn clear_constraint(&mut self, key: &str) {
        self.constraints.remove(key);
    }

    /// Drop all constraints, turning this into the identity filter.
    pub fn clear_constraints(&mut self) {
        self.constraints.clear();
    }

    /// Constrained keys in first-insertion order.
    #[must_use]
    pub fn constraint_keys(&self) -> Vec<&str> {
        self.constraints.keys().collect()
    }

    /// Accepted values for `key`.
    #[must_use]
    pub fn constraint_values(&self, key: &str) -> &[String] {
        self.constraints.values(key)
    }

    /// True when no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Check `entity` against every constraint.
    ///
    /// A key the entity lacks fails the match; keys the filter does not
    /// mention are ignored.
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        self.constraints.iter().all(|(key, accepted)| {
            entity
                .param_value_list(key)
                .iter()
                .any(|value| accepted.contains(value))
        })
    }
}

impl<R: Record> Matcher<R> for Filter {
    fn accepts(&self, item: &Shared<R>) -> bool {
        self.matches(&item.entity())
    }
}

// =============================================================================
// PRODUCT FILTER
// =============================================================================

/// Property constraints plus an optional support date.
///
/// With a support date set, a product released after that day or whose end
/// of life falls before it is rejected. Missing or unparsable dates never
/// reject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    filter: Filter,
    support_date: Option<NaiveDate>,
}

impl ProductFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing property filter.
    #[must_use]
    pub fn from_filter(filter: Filter) -> Self {
        Self {
            filter,
            support_date: None,
        }
    }

    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut Filter {
        &mut self.filter
    }

    pub fn add_constraint(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.filter.add_constraint(key, value);
    }

    /// Set or clear the day the product must be supported on.
    pub fn set_support_date(&mut self, when: Option<NaiveDate>) {
        self.support_date = when;
    }

    #[must_use]
    pub fn support_date(&self) -> Option<NaiveDate> {
        self.support_date
    }

    /// Check property constraints and the support window.
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        if !self.filter.matches(entity) {
            return false;
        }
        let Some(when) = self.support_date else {
            return true;
        };
        let released_later = entity
            .param_value_date(PRODUCT_RELEASE_DATE)
            .is_ok_and(|release| release > when);
        let ended_earlier = entity
            .param_value_date(PRODUCT_EOL_DATE)
            .is_ok_and(|eol| eol < when);
        !released_later && !ended_earlier
    }
}

impl<R: Product> Matcher<R> for ProductFilter {
    fn accepts(&self, item: &Shared<R>) -> bool {
        self.matches(&item.entity())
    }
}

// =============================================================================
// OS FILTER
// =============================================================================

/// Product constraints plus OS relationship constraints.
///
/// For every constrained verb, a candidate OS must be the subject of an edge
/// with that verb to each listed OS. Relationship checks need the graph, so
/// the filter is bound to one with [`OsFilter::bind`] before matching.
#[derive(Debug, Clone, Default)]
pub struct OsFilter {
    product: ProductFilter,
    os_constraints: BTreeMap<Relationship, OsList>,
}

impl OsFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn product_filter(&self) -> &ProductFilter {
        &self.product
    }

    pub fn product_filter_mut(&mut self) -> &mut ProductFilter {
        &mut self.product
    }

    pub fn add_constraint(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.product.add_constraint(key, value);
    }

    /// Require candidates to relate to `os` by `verb`.
    pub fn add_os_constraint(&mut self, verb: Relationship, os: &Os) {
        self.os_constraints.entry(verb).or_default().add(os.clone());
    }

    pub fn clear_os_constraint(&mut self, verb: Relationship) {
        self.os_constraints.remove(&verb);
    }

    pub fn clear_os_constraints(&mut self) {
        self.os_constraints.clear();
    }

    /// OSes required for `verb`, in the order they were added.
    #[must_use]
    pub fn os_constraint_values(&self, verb: Relationship) -> OsList {
        self.os_constraints.get(&verb).cloned().unwrap_or_default()
    }

    /// Pair this filter with the graph its relationship constraints refer to.
    #[must_use]
    pub fn bind<'a>(&'a self, graph: &'a RelationshipGraph) -> BoundOsFilter<'a> {
        BoundOsFilter {
            filter: self,
            graph,
        }
    }
}

/// An [`OsFilter`] paired with the relationship graph it evaluates against.
#[derive(Debug, Clone, Copy)]
pub struct BoundOsFilter<'a> {
    filter: &'a OsFilter,
    graph: &'a RelationshipGraph,
}

impl BoundOsFilter<'_> {
    /// Check product constraints, then every relationship constraint.
    #[must_use]
    pub fn matches(&self, os: &Os) -> bool {
        if !self.filter.product.matches(&os.entity()) {
            return false;
        }
        let subject = os.id();
        self.filter.os_constraints.iter().all(|(verb, required)| {
            required
                .iter()
                .all(|other| self.graph.contains(&subject, *verb, &other.id()))
        })
    }
}

impl Matcher<OsRecord> for BoundOsFilter<'_> {
    fn accepts(&self, item: &Os) -> bool {
        self.matches(item)
    }
}

// =============================================================================
// DEVICE LINK FILTER
// =============================================================================

/// Matches device links by their target device's properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceLinkFilter {
    target: Filter,
}

impl DeviceLinkFilter {
    #[must_use]
    pub fn new(target: Filter) -> Self {
        Self { target }
    }

    #[must_use]
    pub fn target_filter(&self) -> &Filter {
        &self.target
    }
}

impl Matcher<DeviceLinkRecord> for DeviceLinkFilter {
    fn accepts(&self, item: &Shared<DeviceLinkRecord>) -> bool {
        self.target.matches(&item.target().entity())
    }
}

// =============================================================================
// TESTS
// =============================================================================
