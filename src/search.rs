//! Case-insensitive substring filtering over content collections.
//!
//! The filter is generic over record shape: a record type opts in by
//! implementing [`Searchable`], naming its searchable fields with an
//! associated `Field` type. A field that is absent on a given record
//! (`None`) never matches.
//!
//! ## Matching Rule
//!
//! - An empty or whitespace-only query matches everything, in original order.
//! - Otherwise the query is lowercased as typed (surrounding whitespace is
//!   kept) and an item matches when any named field contains it.
//!
//! [`ContentSearch`] wraps the rule in a small view-model: it owns the query,
//! recomputes the filtered view whenever the query, the items or the field
//! list change, and exposes counts for display. The embedded `search.js`
//! applies the same rule in the browser.

use crate::types::{GlossaryEntry, Scenario};
use serde::{Deserialize, Serialize};

/// A record type whose text fields can be searched.
pub trait Searchable {
    /// Names the searchable fields of this record type.
    type Field: Copy;

    /// Text of `field` on this record, or `None` if the record has no value
    /// for it.
    fn field_text(&self, field: Self::Field) -> Option<&str>;
}

/// Searchable fields of a [`GlossaryEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlossaryField {
    Term,
    TermEn,
    Definition,
    Example,
}

impl GlossaryField {
    /// Name used in config files and in the `data-*` attributes read by
    /// `search.js`.
    pub fn as_str(self) -> &'static str {
        match self {
            GlossaryField::Term => "term",
            GlossaryField::TermEn => "term_en",
            GlossaryField::Definition => "definition",
            GlossaryField::Example => "example",
        }
    }
}

/// Fields the home page glossary searches unless config says otherwise.
pub const DEFAULT_GLOSSARY_FIELDS: [GlossaryField; 3] = [
    GlossaryField::Term,
    GlossaryField::TermEn,
    GlossaryField::Definition,
];

impl Searchable for GlossaryEntry {
    type Field = GlossaryField;

    fn field_text(&self, field: GlossaryField) -> Option<&str> {
        match field {
            GlossaryField::Term => Some(&self.term),
            GlossaryField::TermEn => Some(&self.term_en),
            GlossaryField::Definition => Some(&self.definition),
            GlossaryField::Example => self.example.as_deref(),
        }
    }
}

/// Searchable fields of a [`Scenario`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioField {
    Id,
    Title,
    Description,
}

pub const DEFAULT_SCENARIO_FIELDS: [ScenarioField; 3] = [
    ScenarioField::Id,
    ScenarioField::Title,
    ScenarioField::Description,
];

impl Searchable for Scenario {
    type Field = ScenarioField;

    fn field_text(&self, field: ScenarioField) -> Option<&str> {
        match field {
            ScenarioField::Id => Some(&self.id),
            ScenarioField::Title => Some(&self.title),
            ScenarioField::Description => Some(&self.description),
        }
    }
}

/// True when `query` should be treated as "no filter".
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Whether `item` matches an already-lowercased, non-blank `needle`.
fn matches<T: Searchable>(item: &T, fields: &[T::Field], needle: &str) -> bool {
    fields.iter().any(|&field| {
        item.field_text(field)
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

/// Filter `items` by `query` across `fields`.
///
/// Returns references in original order. A blank query returns every item.
pub fn filter_items<'a, T: Searchable>(
    items: &'a [T],
    fields: &[T::Field],
    query: &str,
) -> Vec<&'a T> {
    if is_blank(query) {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| matches(*item, fields, &needle))
        .collect()
}

/// Query state plus the derived, filtered view of a collection.
///
/// The filtered view is recomputed eagerly on every input change so reads
/// never observe a stale result.
pub struct ContentSearch<'a, T: Searchable> {
    items: &'a [T],
    fields: Vec<T::Field>,
    query: String,
    filtered: Vec<&'a T>,
}

impl<'a, T: Searchable> ContentSearch<'a, T> {
    /// Start with an empty query, i.e. every item visible.
    pub fn new(items: &'a [T], fields: &[T::Field]) -> Self {
        Self {
            items,
            fields: fields.to_vec(),
            query: String::new(),
            filtered: items.iter().collect(),
        }
    }

    /// Replace the query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    /// Replace the underlying collection, keeping the query.
    pub fn set_items(&mut self, items: &'a [T]) {
        self.items = items;
        self.recompute();
    }

    /// Replace the searched fields, keeping the query.
    pub fn set_fields(&mut self, fields: &[T::Field]) {
        self.fields = fields.to_vec();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.filtered = filter_items(self.items, &self.fields, &self.query);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn fields(&self) -> &[T::Field] {
        &self.fields
    }

    pub fn filtered_items(&self) -> &[&'a T] {
        &self.filtered
    }

    pub fn has_results(&self) -> bool {
        !self.filtered.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Whether a non-blank query is narrowing the view.
    pub fn is_filtering(&self) -> bool {
        !is_blank(&self.query)
    }
}
