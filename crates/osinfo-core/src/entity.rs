//! # Entity Model
//!
//! The base identified, property-bearing object.
//!
//! Properties are a string multi-map: each key holds an ordered list of
//! values, keys iterate in first-insertion order. Typed accessors parse
//! the first value at the boundary; storage stays string-only.

use crate::CatalogError;
use crate::keys::DATE_FORMAT;
use chrono::NaiveDate;
use std::fmt::Display;
use std::str::FromStr;

// =============================================================================
// PARAM MAP
// =============================================================================

/// Ordered multi-map from property key to values.
///
/// Invariant: no key is stored with an empty value list, so "zero values"
/// and "absent" are the same state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: Vec<(String, Vec<String>)>,
}

impl ParamMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys with at least one value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no key holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// All values for `key`, empty when absent.
    #[must_use]
    pub fn values(&self, key: &str) -> &[String] {
        match self.slot(key) {
            Some(idx) => &self.entries[idx].1,
            None => &[],
        }
    }

    /// First value for `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values(key).first().map(String::as_str)
    }

    /// True when `key` holds at least one value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.slot(key).is_some()
    }

    /// Append a value, keeping earlier values.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.slot(&key) {
            Some(idx) => self.entries[idx].1.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Replace every value of `key` with `value`.
    ///
    /// The key keeps its original position when it already existed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.slot(&key) {
            Some(idx) => self.entries[idx].1 = vec![value],
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Remove `key` entirely. Returns true if it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.slot(key) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate `(key, values)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    fn slot(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

// =============================================================================
// ENTITY
// =============================================================================

/// An identified bag of string properties.
///
/// The id is fixed at construction. Equality across the catalog is by id;
/// this struct itself compares structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: String,
    params: ParamMap,
}

impl Entity {
    /// Create an entity with no properties.
    ///
    /// Fails with `InvalidArgument` when `id` is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, CatalogError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "entity id must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            params: ParamMap::new(),
        })
    }

    /// Fresh entity carrying the id of an existing one.
    pub(crate) fn sharing_id(other: &Entity) -> Self {
        Self {
            id: other.id.clone(),
            params: ParamMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Read-only view of the property map.
    #[must_use]
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    /// Keys with at least one value, in first-insertion order.
    #[must_use]
    pub fn param_keys(&self) -> Vec<&str> {
        self.params.keys().collect()
    }

    /// First value stored for `key`.
    #[must_use]
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params.first(key)
    }

    /// Every value stored for `key`, in insertion order.
    #[must_use]
    pub fn param_value_list(&self, key: &str) -> &[String] {
        self.params.values(key)
    }

    /// Replace all values of `key` with `value`.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.set(key, value);
    }

    /// Append `value` to `key`.
    pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.add(key, value);
    }

    /// Remove `key` and all of its values.
    pub fn clear_param(&mut self, key: &str) {
        self.params.remove(key);
    }

    // -------------------------------------------------------------------------
    // Typed accessors
    // -------------------------------------------------------------------------

    /// First value of `key` as a boolean (`true`/`false`, any case).
    pub fn param_value_bool(&self, key: &str) -> Result<bool, CatalogError> {
        self.parse_first(key, "boolean", parse_bool)
    }

    /// Like [`Self::param_value_bool`], falling back to `default`.
    #[must_use]
    pub fn param_value_bool_with_default(&self, key: &str, default: bool) -> bool {
        self.param_value_bool(key).unwrap_or(default)
    }

    /// First value of `key` as a signed 64-bit integer.
    pub fn param_value_i64(&self, key: &str) -> Result<i64, CatalogError> {
        self.parse_first(key, "64-bit integer", |s| s.trim().parse().ok())
    }

    /// Like [`Self::param_value_i64`], falling back to `default`.
    #[must_use]
    pub fn param_value_i64_with_default(&self, key: &str, default: i64) -> i64 {
        self.param_value_i64(key).unwrap_or(default)
    }

    /// First value of `key` parsed as any enum-like `FromStr` type.
    pub fn param_value_enum<E: FromStr>(&self, key: &str) -> Result<E, CatalogError> {
        self.parse_first(key, "enumeration value", |s| s.parse().ok())
    }

    /// Like [`Self::param_value_enum`], falling back to `default`.
    #[must_use]
    pub fn param_value_enum_with_default<E: FromStr>(&self, key: &str, default: E) -> E {
        self.param_value_enum(key).unwrap_or(default)
    }

    /// First value of `key` as a `YYYY-MM-DD` date.
    pub fn param_value_date(&self, key: &str) -> Result<NaiveDate, CatalogError> {
        self.parse_first(key, "date", |s| {
            NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
        })
    }

    /// Like [`Self::param_value_date`], falling back to `default`.
    #[must_use]
    pub fn param_value_date_with_default(&self, key: &str, default: NaiveDate) -> NaiveDate {
        self.param_value_date(key).unwrap_or(default)
    }

    /// Store `value` as `true`/`false`, replacing existing values.
    pub fn set_param_bool(&mut self, key: impl Into<String>, value: bool) {
        self.set_param(key, if value { "true" } else { "false" });
    }

    /// Store `value` in decimal, replacing existing values.
    pub fn set_param_i64(&mut self, key: impl Into<String>, value: i64) {
        self.set_param(key, value.to_string());
    }

    /// Store the `Display` form of `value`, replacing existing values.
    pub fn set_param_enum<E: Display>(&mut self, key: impl Into<String>, value: &E) {
        self.set_param(key, value.to_string());
    }

    /// Store `value` as `YYYY-MM-DD`, replacing existing values.
    pub fn set_param_date(&mut self, key: impl Into<String>, value: NaiveDate) {
        self.set_param(key, value.format(DATE_FORMAT).to_string());
    }

    fn parse_first<T>(
        &self,
        key: &str,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, CatalogError> {
        let raw = self
            .param_value(key)
            .ok_or_else(|| CatalogError::NotFound(format!("{}: property '{}'", self.id, key)))?;
        parse(raw).ok_or_else(|| CatalogError::TypeMismatch {
            key: key.to_string(),
            value: raw.to_string(),
            expected,
        })
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// =============================================================================
// TESTS
// =============================================================================
