//! Field accessor tables
//!
//! Each entity type registers a table mapping field names to typed
//! extraction functions. The table replaces runtime reflection: the engine
//! asks for a field by name and the table dispatches to the getter.

use std::collections::HashMap;

use super::errors::{EntityError, EntityResult};
use super::value::{FieldKind, FieldValue};

/// Extracts one field from an entity
pub type FieldGetter<E> = fn(&E) -> FieldValue;

/// Name-indexed accessor table for one entity type
pub struct FieldTable<E> {
    entity: &'static str,
    fields: Vec<(&'static str, FieldKind, FieldGetter<E>)>,
    index: HashMap<&'static str, usize>,
}

impl<E> FieldTable<E> {
    /// Creates an empty table for the named entity type
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            fields: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registers a field getter.
    ///
    /// Registering the same name twice replaces the earlier kind and getter
    /// but keeps its declared position.
    pub fn field(mut self, name: &'static str, kind: FieldKind, getter: FieldGetter<E>) -> Self {
        match self.index.get(name) {
            Some(&pos) => self.fields[pos] = (name, kind, getter),
            None => {
                self.index.insert(name, self.fields.len());
                self.fields.push((name, kind, getter));
            }
        }
        self
    }

    /// Returns the entity type name
    pub fn entity_name(&self) -> &'static str {
        self.entity
    }

    /// Returns declared field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _, _)| *name)
    }

    /// Returns true if the field is declared
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the declared kind of a field
    pub fn kind(&self, name: &str) -> Option<FieldKind> {
        self.index.get(name).map(|&pos| self.fields[pos].1)
    }

    /// Checks that every name is declared, failing on the first miss
    pub fn check_names<'n>(&self, names: impl IntoIterator<Item = &'n str>) -> EntityResult<()> {
        for name in names {
            if !self.contains(name) {
                return Err(self.unknown(name));
            }
        }
        Ok(())
    }

    fn unknown(&self, name: &str) -> EntityError {
        EntityError::UnknownField {
            entity: self.entity,
            field: name.to_string(),
        }
    }

    /// Resolves a field by exact, case-sensitive name
    pub fn get(&self, entity: &E, name: &str) -> EntityResult<FieldValue> {
        match self.index.get(name) {
            Some(&pos) => Ok((self.fields[pos].2)(entity)),
            None => Err(self.unknown(name)),
        }
    }
}

/// An entity type with a registered accessor table
pub trait Entity: Sized + 'static {
    /// Returns the accessor table, built once per type
    fn field_table() -> &'static FieldTable<Self>;
}

/// An entity addressed by an integer primary key
pub trait Record: Entity + Clone {
    /// Returns the primary key (0 means "not yet assigned")
    fn key(&self) -> i64;

    /// Assigns the primary key
    fn set_key(&mut self, key: i64);
}

/// Schema-less field access over any registered entity
pub struct EntityAccessor;

impl EntityAccessor {
    /// Resolves `name` on `entity` without mutating it
    pub fn get<E: Entity>(entity: &E, name: &str) -> EntityResult<FieldValue> {
        E::field_table().get(entity, name)
    }
}
