// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::marker::PhantomData;
use std::sync::OnceLock;

use thiserror::Error;

use crate::MappedEntity;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type ProjectedDocument = serde_json::Map<String, serde_json::Value>;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Selects the fields of an entity that a partial update sends to the store.
///
/// Either individual fields are picked, or every declared field at once.
/// The two modes are exclusive, and the id field is never part of the
/// projection.
pub struct FieldProjector<E> {
    id_field_name: String,
    selection: FieldSelection,
    all_fields: OnceLock<Vec<&'static str>>,
    _entity: PhantomData<fn(&E)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldSelection {
    Unset,
    Explicit(Vec<&'static str>),
    AllFields,
}

impl<E: MappedEntity> FieldProjector<E> {
    pub fn new(id_field_name: impl Into<String>) -> Self {
        Self {
            id_field_name: id_field_name.into(),
            selection: FieldSelection::Unset,
            all_fields: OnceLock::new(),
            _entity: PhantomData,
        }
    }

    pub fn id_field_name(&self) -> &str {
        &self.id_field_name
    }

    pub fn field(mut self, field_name: &str) -> Result<Self, FieldProjectionError> {
        let mut selected = match self.selection {
            FieldSelection::AllFields => {
                return Err(FieldProjectionError::ModesCombined);
            }
            FieldSelection::Unset => Vec::new(),
            FieldSelection::Explicit(selected) => selected,
        };

        if field_name != self.id_field_name {
            let field = E::entity_field(field_name).ok_or_else(|| {
                FieldProjectionError::UnknownField {
                    entity_type: std::any::type_name::<E>(),
                    field_name: field_name.to_string(),
                }
            })?;

            if !selected.contains(&field.name) {
                selected.push(field.name);
            }
        }

        self.selection = FieldSelection::Explicit(selected);
        Ok(self)
    }

    pub fn fields<'a>(
        self,
        field_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, FieldProjectionError> {
        field_names
            .into_iter()
            .try_fold(self, |projector, field_name| projector.field(field_name))
    }

    /// Selects every declared field except the id. Must be the only
    /// selection made on this projector.
    pub fn all_fields(mut self) -> Result<Self, FieldProjectionError> {
        if self.selection != FieldSelection::Unset {
            return Err(FieldProjectionError::ModesCombined);
        }

        self.selection = FieldSelection::AllFields;
        Ok(self)
    }

    pub fn selected_fields(&self) -> Result<&[&'static str], FieldProjectionError> {
        match &self.selection {
            FieldSelection::Unset => Err(FieldProjectionError::SelectionMissing),
            FieldSelection::Explicit(selected) => Ok(selected),
            FieldSelection::AllFields => Ok(self.all_fields.get_or_init(|| {
                E::entity_fields()
                    .iter()
                    .map(|field| field.name)
                    .filter(|name| *name != self.id_field_name)
                    .collect()
            })),
        }
    }

    /// Sparse view of the entity keyed by lower camel case field names
    pub fn project(&self, entity: &E) -> Result<ProjectedDocument, FieldProjectionError> {
        let mut document = ProjectedDocument::new();

        for field_name in self.selected_fields()? {
            // Names were checked when selected
            let Some(field) = E::entity_field(field_name) else {
                continue;
            };
            let value = (field.read)(entity).map_err(|source| {
                FieldProjectionError::FieldSerialization {
                    entity_type: std::any::type_name::<E>(),
                    field_name: field.name,
                    source,
                }
            })?;
            document.insert(to_lower_camel_case(field.name), value);
        }

        Ok(document)
    }
}

impl<E> std::fmt::Debug for FieldProjector<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldProjector")
            .field("id_field_name", &self.id_field_name)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn to_lower_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum FieldProjectionError {
    #[error("Selecting all fields cannot be combined with selecting individual fields")]
    ModesCombined,

    #[error("No fields were selected for the partial update")]
    SelectionMissing,

    #[error("Entity '{entity_type}' does not declare field '{field_name}'")]
    UnknownField {
        entity_type: &'static str,
        field_name: String,
    },

    #[error("Field '{field_name}' of entity '{entity_type}' cannot be serialized")]
    FieldSerialization {
        entity_type: &'static str,
        field_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
