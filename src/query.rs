//! Query filter documents
//!
//! A filter is built fresh for each request and handed to the store, which
//! interprets every field predicate against a [`ClassificationObject`].
//! Predicates follow document-database semantics: a null field is never
//! equal to a list, so `NotEqual` matches it.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::types::{ClassificationObject, DocumentId};

/// Filterable document fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Id,
    Tags,
    StemmedKeywords,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "_id",
            Self::Tags => "tags",
            Self::StemmedKeywords => "stemmed_keywords",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value side of a predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Int(i64),
    /// Compared as a set; element order is irrelevant
    List(Vec<String>),
}

/// Match predicate for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Equals(FilterValue),
    /// Field list contains every term. An empty term list matches nothing.
    AllOf(Vec<String>),
    NotEqual(FilterValue),
}

/// A document's value for one field
enum FieldValue<'a> {
    Int(i64),
    List(&'a [String]),
    Null,
}

fn field_value(object: &ClassificationObject, field: Field) -> FieldValue<'_> {
    match field {
        Field::Id => FieldValue::Int(object.id),
        Field::Tags => match &object.tags {
            Some(tags) => FieldValue::List(tags),
            None => FieldValue::Null,
        },
        Field::StemmedKeywords => FieldValue::List(&object.stemmed_keywords),
    }
}

fn equals(actual: &FieldValue<'_>, expected: &FilterValue) -> bool {
    match (actual, expected) {
        (FieldValue::Int(a), FilterValue::Int(b)) => a == b,
        (FieldValue::List(a), FilterValue::List(b)) => {
            let a: BTreeSet<&str> = a.iter().map(String::as_str).collect();
            let b: BTreeSet<&str> = b.iter().map(String::as_str).collect();
            a == b
        }
        _ => false,
    }
}

impl Predicate {
    fn matches(&self, actual: &FieldValue<'_>) -> bool {
        match self {
            Self::Equals(expected) => equals(actual, expected),
            Self::NotEqual(expected) => !equals(actual, expected),
            Self::AllOf(terms) => match actual {
                FieldValue::List(values) => {
                    !terms.is_empty() && terms.iter().all(|t| values.contains(t))
                }
                _ => false,
            },
        }
    }
}

/// Mapping from field to predicate; all predicates must hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    predicates: BTreeMap<Field, Predicate>,
}

impl QueryFilter {
    /// An empty filter matches every document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, predicate: Predicate) -> Self {
        self.insert(field, predicate);
        self
    }

    /// Set the predicate for a field, replacing any previous one
    pub fn insert(&mut self, field: Field, predicate: Predicate) {
        self.predicates.insert(field, predicate);
    }

    pub fn get(&self, field: Field) -> Option<&Predicate> {
        self.predicates.get(&field)
    }

    /// The id this filter pins, if it has an `_id` equality predicate
    pub fn pinned_id(&self) -> Option<DocumentId> {
        match self.get(Field::Id) {
            Some(Predicate::Equals(FilterValue::Int(id))) => Some(*id),
            _ => None,
        }
    }

    pub fn matches(&self, object: &ClassificationObject) -> bool {
        self.predicates
            .iter()
            .all(|(field, predicate)| predicate.matches(&field_value(object, *field)))
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Result ordering by last modification time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub direction: SortDirection,
}

impl Sort {
    /// Most recently modified first
    pub fn newest_first() -> Self {
        Self {
            direction: SortDirection::Descending,
        }
    }

    /// Compare by `last_modified`, breaking ties by id in the same direction
    pub fn compare(&self, a: &ClassificationObject, b: &ClassificationObject) -> Ordering {
        let ord = a
            .last_modified
            .cmp(&b.last_modified)
            .then_with(|| a.id.cmp(&b.id));
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::newest_first()
    }
}

/// Apply filter, sort and limit to a set of candidate documents
pub fn select<I>(candidates: I, filter: &QueryFilter, limit: usize, sort: Sort) -> Vec<ClassificationObject>
where
    I: IntoIterator<Item = ClassificationObject>,
{
    let mut matched: Vec<ClassificationObject> =
        candidates.into_iter().filter(|o| filter.matches(o)).collect();
    matched.sort_by(|a, b| sort.compare(a, b));
    matched.truncate(limit);
    matched
}
