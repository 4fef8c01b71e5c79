//! Collections

use serde::{Deserialize, Serialize};

use crate::{
    entity::{Entity, EntityKind},
    ids::TypedId,
    validation::{ValidationError, require_name},
};

/// Collection Id
pub type CollectionId = TypedId<Collection>;

/// A named grouping of products, e.g. "Marble" or "Travertine".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Primary key
    pub id: CollectionId,

    /// Unique, non-empty display name
    pub name: String,
}

impl Entity for Collection {
    const KIND: EntityKind = EntityKind::Collection;

    fn id(&self) -> CollectionId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// New Collection Data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCollection {
    /// Display name
    pub name: String,
}

/// Collection Update Data
pub type CollectionUpdate = NewCollection;

impl NewCollection {
    /// Return a trimmed copy, rejecting an empty name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] for a blank name.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_name(&self.name)?,
        })
    }
}
