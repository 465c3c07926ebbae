// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::{EntityMap, EntityMapConfigurationError, MappedEntity};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Frozen set of entity maps, keyed by entity type
#[derive(Default)]
pub struct EntityMapRegistry {
    maps_by_type: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl EntityMapRegistry {
    pub fn builder() -> EntityMapRegistryBuilder {
        EntityMapRegistryBuilder {
            registry: Self::default(),
        }
    }

    pub fn get<E: MappedEntity>(&self) -> Result<Arc<EntityMap<E>>, EntityNotRegisteredError> {
        self.maps_by_type
            .get(&TypeId::of::<E>())
            .cloned()
            .and_then(|map| map.downcast::<EntityMap<E>>().ok())
            .ok_or(EntityNotRegisteredError {
                entity_type: std::any::type_name::<E>(),
            })
    }

    pub fn is_registered<E: MappedEntity>(&self) -> bool {
        self.maps_by_type.contains_key(&TypeId::of::<E>())
    }

    pub fn len(&self) -> usize {
        self.maps_by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps_by_type.is_empty()
    }
}

impl std::fmt::Debug for EntityMapRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityMapRegistry")
            .field("num_maps", &self.maps_by_type.len())
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct EntityMapRegistryBuilder {
    registry: EntityMapRegistry,
}

impl EntityMapRegistryBuilder {
    pub fn register<E: MappedEntity>(
        mut self,
        map: EntityMap<E>,
    ) -> Result<Self, EntityMapConfigurationError> {
        let type_id = TypeId::of::<E>();
        if self.registry.maps_by_type.contains_key(&type_id) {
            return Err(EntityMapConfigurationError::DuplicateEntityMap {
                entity_type: map.entity_type_name(),
            });
        }

        tracing::debug!(
            entity_type = map.entity_type_name(),
            base_index_name = map.base_index_name(),
            id_field_name = map.id_field_name(),
            "Registered entity map",
        );

        self.registry.maps_by_type.insert(type_id, Arc::new(map));
        Ok(self)
    }

    pub fn build(self) -> EntityMapRegistry {
        self.registry
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Entity '{entity_type}' has no registered entity map")]
pub struct EntityNotRegisteredError {
    pub entity_type: &'static str,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
