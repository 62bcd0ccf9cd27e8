//! # Relationship Graph
//!
//! Directed, typed edges between OSes.
//!
//! An edge `(subject, verb, object)` reads "subject verb object", so
//! "fedora-11 upgrades fedora-10" has `fedora-11` as subject. Edges store OS
//! ids rather than handles, which keeps OS records free of reference cycles.
//!
//! Three indices are maintained together:
//! - by object id ("what relates to X"),
//! - by verb,
//! - by subject id, for forward queries and per-subject clearing.
//!
//! Every edge sits in exactly one bucket of each index after every mutation.
//! Buckets are kept in insertion order; empty buckets are removed.

use crate::os::Os;
use crate::{CatalogError, Relationship};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, warn};

// =============================================================================
// EDGE
// =============================================================================

/// One directed relationship between two OS ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub subject: String,
    pub verb: Relationship,
    pub object: String,
}

impl Edge {
    #[must_use]
    pub fn new(subject: impl Into<String>, verb: Relationship, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            verb,
            object: object.into(),
        }
    }
}

// =============================================================================
// DUPLICATE POLICY
// =============================================================================

/// What [`RelationshipGraph::add_relationship`] does with an edge that
/// already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateEdgePolicy {
    /// Fail with [`CatalogError::DuplicateEdge`].
    #[default]
    Reject,
    /// Succeed without storing a second copy.
    Ignore,
}

impl DuplicateEdgePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Ignore => "ignore",
        }
    }
}

impl FromStr for DuplicateEdgePolicy {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "ignore" => Ok(Self::Ignore),
            other => Err(CatalogError::Config(format!(
                "unknown duplicate edge policy '{other}' (expected 'reject' or 'ignore')"
            ))),
        }
    }
}

// =============================================================================
// GRAPH
// =============================================================================

/// OS relationship store with object, verb and subject indices.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    by_other: BTreeMap<String, Vec<Edge>>,
    by_verb: BTreeMap<Relationship, Vec<Edge>>,
    by_subject: BTreeMap<String, Vec<Edge>>,
    policy: DuplicateEdgePolicy,
}

impl RelationshipGraph {
    /// Create an empty graph that rejects duplicate edges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: DuplicateEdgePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn policy(&self) -> DuplicateEdgePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: DuplicateEdgePolicy) {
        self.policy = policy;
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Record "`subject` `verb` `other_id`".
    ///
    /// Fails with `InvalidArgument` for an empty `other_id`. An existing
    /// triple fails with `DuplicateEdge` under [`DuplicateEdgePolicy::Reject`]
    /// and is a no-op under [`DuplicateEdgePolicy::Ignore`].
    pub fn add_relationship(
        &mut self,
        subject: &Os,
        other_id: &str,
        verb: Relationship,
    ) -> Result<(), CatalogError> {
        self.add_edge(Edge::new(subject.id(), verb, other_id))
    }

    /// Record an edge given as plain ids.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), CatalogError> {
        if edge.object.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "relationship target id must not be empty".to_string(),
            ));
        }
        if edge.subject.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "relationship subject id must not be empty".to_string(),
            ));
        }

        if self.contains(&edge.subject, edge.verb, &edge.object) {
            return match self.policy {
                DuplicateEdgePolicy::Ignore => {
                    debug!(
                        subject = %edge.subject,
                        verb = %edge.verb,
                        object = %edge.object,
                        "duplicate edge ignored"
                    );
                    Ok(())
                }
                DuplicateEdgePolicy::Reject => {
                    warn!(
                        subject = %edge.subject,
                        verb = %edge.verb,
                        object = %edge.object,
                        "duplicate edge rejected"
                    );
                    Err(CatalogError::DuplicateEdge {
                        subject: edge.subject,
                        verb: edge.verb,
                        object: edge.object,
                    })
                }
            };
        }

        debug!(
            subject = %edge.subject,
            verb = %edge.verb,
            object = %edge.object,
            "edge added"
        );
        self.by_other
            .entry(edge.object.clone())
            .or_default()
            .push(edge.clone());
        self.by_verb.entry(edge.verb).or_default().push(edge.clone());
        self.by_subject
            .entry(edge.subject.clone())
            .or_default()
            .push(edge);
        Ok(())
    }

    /// Remove every edge from `subject` to `other_id`, whatever the verb.
    ///
    /// Returns the number of edges removed.
    pub fn clear_relationships(&mut self, subject: &Os, other_id: &str) -> usize {
        let subject_id = subject.id();
        self.remove_where(|edge| edge.subject == subject_id && edge.object == other_id)
    }

    /// Remove every edge whose subject is `subject`.
    ///
    /// Returns the number of edges removed.
    pub fn clear_all_relationships(&mut self, subject: &Os) -> usize {
        let subject_id = subject.id();
        self.remove_where(|edge| edge.subject == subject_id)
    }

    fn remove_where<F: Fn(&Edge) -> bool>(&mut self, doomed: F) -> usize {
        let removed = prune(&mut self.by_subject, &doomed);
        prune(&mut self.by_other, &doomed);
        prune(&mut self.by_verb, &doomed);
        if removed > 0 {
            debug!(removed, "edges cleared");
        }
        removed
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Edges whose object is `other_id`, in insertion order.
    #[must_use]
    pub fn query_by_other(&self, other_id: &str) -> Vec<Edge> {
        self.by_other.get(other_id).cloned().unwrap_or_default()
    }

    /// Edges with `verb`, in insertion order.
    #[must_use]
    pub fn query_by_verb(&self, verb: Relationship) -> Vec<Edge> {
        self.by_verb.get(&verb).cloned().unwrap_or_default()
    }

    /// Edges whose subject is `subject_id`, in insertion order.
    #[must_use]
    pub fn query_by_subject(&self, subject_id: &str) -> Vec<Edge> {
        self.by_subject.get(subject_id).cloned().unwrap_or_default()
    }

    /// Object ids `subject_id` relates to by `verb`.
    #[must_use]
    pub fn related(&self, subject_id: &str, verb: Relationship) -> Vec<String> {
        self.by_subject
            .get(subject_id)
            .map(|edges| {
                edges
                    .iter()
                    .filter(|edge| edge.verb == verb)
                    .map(|edge| edge.object.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Subject ids that relate to `other_id` by `verb`.
    #[must_use]
    pub fn related_to(&self, other_id: &str, verb: Relationship) -> Vec<String> {
        self.by_other
            .get(other_id)
            .map(|edges| {
                edges
                    .iter()
                    .filter(|edge| edge.verb == verb)
                    .map(|edge| edge.subject.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, subject_id: &str, verb: Relationship, other_id: &str) -> bool {
        self.by_subject.get(subject_id).is_some_and(|edges| {
            edges
                .iter()
                .any(|edge| edge.verb == verb && edge.object == other_id)
        })
    }

    /// Total number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_subject.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_subject.is_empty()
    }

    /// Every edge, ordered by (subject, verb, object).
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        let mut all: Vec<Edge> = self.by_subject.values().flatten().cloned().collect();
        all.sort();
        all
    }

    /// True when all three indices hold exactly the same edge set, each edge
    /// in the bucket its fields name.
    #[must_use]
    pub fn indices_consistent(&self) -> bool {
        let placed = self
            .by_other
            .iter()
            .all(|(key, edges)| !edges.is_empty() && edges.iter().all(|e| &e.object == key))
            && self
                .by_verb
                .iter()
                .all(|(key, edges)| !edges.is_empty() && edges.iter().all(|e| e.verb == *key))
            && self
                .by_subject
                .iter()
                .all(|(key, edges)| !edges.is_empty() && edges.iter().all(|e| &e.subject == key));
        if !placed {
            return false;
        }

        let sorted = |index: Vec<Edge>| {
            let mut index = index;
            index.sort();
            index
        };
        let from_subject = self.edges();
        let from_other = sorted(self.by_other.values().flatten().cloned().collect());
        let from_verb = sorted(self.by_verb.values().flatten().cloned().collect());
        from_subject == from_other && from_subject == from_verb
    }
}

/// Drop matching edges from every bucket of `index`, then drop empty buckets.
fn prune<K: Ord, F: Fn(&Edge) -> bool>(index: &mut BTreeMap<K, Vec<Edge>>, doomed: &F) -> usize {
    let mut removed = 0;
    for edges in index.values_mut() {
        let before = edges.len();
        edges.retain(|edge| !doomed(edge));
        removed += before - edges.len();
    }
    index.retain(|_, edges| !edges.is_empty());
    removed
}

// =============================================================================
// TESTS
// =============================================================================
