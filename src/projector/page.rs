//! Result pages and projected rows

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::entity::{Entity, EntityAccessor, EntityResult, FieldValue};

/// A partial view of one entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectedRow {
    fields: Vec<(String, FieldValue)>,
}

impl ProjectedRow {
    /// Sets a field, replacing an earlier value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Returns a field's value
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns field names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ProjectedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The shaped result of one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultPage<E> {
    /// Full entities (no projection requested)
    Entities(Vec<E>),
    /// Partial views (projection requested)
    Rows(Vec<ProjectedRow>),
}

impl<E> ResultPage<E> {
    /// Returns the number of items
    pub fn len(&self) -> usize {
        match self {
            ResultPage::Entities(v) => v.len(),
            ResultPage::Rows(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the entities if the page was not projected
    pub fn entities(&self) -> Option<&[E]> {
        match self {
            ResultPage::Entities(v) => Some(v),
            ResultPage::Rows(_) => None,
        }
    }

    /// Returns the rows if the page was projected
    pub fn rows(&self) -> Option<&[ProjectedRow]> {
        match self {
            ResultPage::Entities(_) => None,
            ResultPage::Rows(v) => Some(v),
        }
    }
}

/// Shapes raw pages
pub struct Projector;

impl Projector {
    /// Checks that every requested field is declared on `E`.
    ///
    /// Independent of any page, so an unknown field fails even when the
    /// query matches nothing.
    pub fn check_fields<E: Entity>(fields: &[String]) -> EntityResult<()> {
        E::field_table().check_names(fields.iter().map(String::as_str))
    }

    /// Projects `records` onto `fields`.
    ///
    /// An empty field list passes the records through unchanged.
    pub fn project<E: Entity>(records: Vec<E>, fields: &[String]) -> EntityResult<ResultPage<E>> {
        if fields.is_empty() {
            return Ok(ResultPage::Entities(records));
        }
        Self::check_fields::<E>(fields)?;

        let rows = records
            .iter()
            .map(|record| Self::project_one(record, fields))
            .collect::<EntityResult<Vec<_>>>()?;

        Ok(ResultPage::Rows(rows))
    }

    /// Builds one row
    pub fn project_one<E: Entity>(record: &E, fields: &[String]) -> EntityResult<ProjectedRow> {
        let mut row = ProjectedRow::default();
        for name in fields {
            row.insert(name.as_str(), EntityAccessor::get(record, name)?);
        }
        Ok(row)
    }
}
