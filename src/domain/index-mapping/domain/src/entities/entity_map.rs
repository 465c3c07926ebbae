// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::{IndexCalculator, MappedEntity};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Declares how one entity type is laid out across physical indices
#[derive(Debug)]
pub struct EntityMap<E> {
    base_index_name: String,
    id_field_name: &'static str,
    calculator: IndexCalculator<E>,
}

impl<E: MappedEntity> EntityMap<E> {
    pub fn builder() -> EntityMapBuilder<E> {
        EntityMapBuilder {
            base_index_name: None,
            id_field_name: None,
            calculator: None,
        }
    }

    pub fn base_index_name(&self) -> &str {
        &self.base_index_name
    }

    pub fn id_field_name(&self) -> &'static str {
        self.id_field_name
    }

    pub fn calculator(&self) -> &IndexCalculator<E> {
        &self.calculator
    }

    pub fn entity_type_name(&self) -> &'static str {
        std::any::type_name::<E>()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct EntityMapBuilder<E> {
    base_index_name: Option<String>,
    id_field_name: Option<&'static str>,
    calculator: Option<IndexCalculator<E>>,
}

impl<E: MappedEntity> EntityMapBuilder<E> {
    pub fn base_index_name(mut self, base_index_name: impl Into<String>) -> Self {
        self.base_index_name = Some(base_index_name.into());
        self
    }

    pub fn id_field_name(mut self, id_field_name: &'static str) -> Self {
        self.id_field_name = Some(id_field_name);
        self
    }

    pub fn calculator(mut self, calculator: IndexCalculator<E>) -> Self {
        self.calculator = Some(calculator);
        self
    }

    pub fn build(self) -> Result<EntityMap<E>, EntityMapConfigurationError> {
        let entity_type = std::any::type_name::<E>();

        let base_index_name = self
            .base_index_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(EntityMapConfigurationError::MissingBaseIndexName { entity_type })?;

        let id_field_name = self
            .id_field_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(EntityMapConfigurationError::MissingIdFieldName { entity_type })?;

        let calculator = self
            .calculator
            .ok_or(EntityMapConfigurationError::MissingCalculator { entity_type })?;

        if E::entity_field(id_field_name).is_none() {
            return Err(EntityMapConfigurationError::UnknownIdField {
                entity_type,
                id_field_name,
            });
        }

        Ok(EntityMap {
            base_index_name,
            id_field_name,
            calculator,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EntityMapConfigurationError {
    #[error("Entity map of '{entity_type}' has no base index name")]
    MissingBaseIndexName { entity_type: &'static str },

    #[error("Entity map of '{entity_type}' has no id field")]
    MissingIdFieldName { entity_type: &'static str },

    #[error("Entity map of '{entity_type}' has no index calculator")]
    MissingCalculator { entity_type: &'static str },

    #[error("Entity '{entity_type}' does not declare id field '{id_field_name}'")]
    UnknownIdField {
        entity_type: &'static str,
        id_field_name: &'static str,
    },

    #[error("Entity map of '{entity_type}' is already registered")]
    DuplicateEntityMap { entity_type: &'static str },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
