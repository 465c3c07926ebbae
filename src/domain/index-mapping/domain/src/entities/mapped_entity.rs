// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Entity type stored in the document store.
///
/// Fields are addressed by name through a static accessor table, which is
/// what partial updates and id extraction rely on.
pub trait MappedEntity: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn entity_fields() -> &'static [EntityField<Self>];

    fn entity_field(name: &str) -> Option<&'static EntityField<Self>> {
        Self::entity_fields().iter().find(|field| field.name == name)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct EntityField<E> {
    pub name: &'static str,
    pub read: fn(&E) -> Result<serde_json::Value, serde_json::Error>,
}

impl<E> std::fmt::Debug for EntityField<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityField")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Renders the value of the id field as a document id.
///
/// String values are used verbatim, other values as their JSON text. A null
/// id is rejected.
pub fn read_entity_id<E: MappedEntity>(
    entity: &E,
    id_field_name: &str,
) -> Result<String, ReadEntityIdError> {
    let Some(field) = E::entity_field(id_field_name) else {
        return Err(ReadEntityIdError::UnknownField {
            entity_type: std::any::type_name::<E>(),
            field_name: id_field_name.to_string(),
        });
    };

    match (field.read)(entity)? {
        serde_json::Value::Null => Err(ReadEntityIdError::NullId {
            entity_type: std::any::type_name::<E>(),
            field_name: field.name,
        }),
        serde_json::Value::String(id) => Ok(id),
        other => Ok(other.to_string()),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Builds the static accessor table of a [`MappedEntity`]:
///
/// ```ignore
/// impl MappedEntity for Order {
///     fn entity_fields() -> &'static [EntityField<Self>] {
///         entity_fields!(Order {
///             "Id" => id,
///             "CreatedAt" => created_at,
///         })
///     }
/// }
/// ```
#[macro_export]
macro_rules! entity_fields {
    ($entity:ty { $($name:literal => $field:ident),* $(,)? }) => {{
        const FIELDS: &[$crate::EntityField<$entity>] = &[
            $(
                $crate::EntityField {
                    name: $name,
                    read: {
                        fn read(
                            entity: &$entity,
                        ) -> ::std::result::Result<
                            $crate::__private::serde_json::Value,
                            $crate::__private::serde_json::Error,
                        > {
                            $crate::__private::serde_json::to_value(&entity.$field)
                        }
                        read
                    },
                },
            )*
        ];
        FIELDS
    }};
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ReadEntityIdError {
    #[error("Entity '{entity_type}' does not declare id field '{field_name}'")]
    UnknownField {
        entity_type: &'static str,
        field_name: String,
    },

    #[error("Id field '{field_name}' of entity '{entity_type}' is null")]
    NullId {
        entity_type: &'static str,
        field_name: &'static str,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
