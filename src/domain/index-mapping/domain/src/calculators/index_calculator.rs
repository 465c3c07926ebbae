// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::any::Any;

use thiserror::Error;

use crate::{BasicIndexCalculator, CustomIndexCalculator, FilterableIndexCalculator};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const INDEX_NAME_WILDCARD: &str = "*";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Strategy that maps an entity, or a query filter, onto index-name postfixes
#[derive(Debug)]
pub enum IndexCalculator<E> {
    Basic(BasicIndexCalculator),
    Custom(CustomIndexCalculator<E>),
    Filterable(FilterableIndexCalculator<E>),
}

impl<E: 'static> IndexCalculator<E> {
    pub fn basic() -> Self {
        Self::Basic(BasicIndexCalculator::new())
    }

    pub fn basic_fixed() -> Self {
        Self::Basic(BasicIndexCalculator::fixed())
    }

    pub fn custom(calculator: CustomIndexCalculator<E>) -> Self {
        Self::Custom(calculator)
    }

    pub fn filterable(calculator: FilterableIndexCalculator<E>) -> Self {
        Self::Filterable(calculator)
    }

    pub fn postfix_for_entity(&self, entity: &E) -> String {
        match self {
            Self::Basic(c) => c.postfix_for_entity(entity),
            Self::Custom(c) => c.postfix_for_entity(entity),
            Self::Filterable(c) => c.postfix_for_entity(entity),
        }
    }

    pub fn postfixes_for_filter(
        &self,
        filter: Option<&dyn Any>,
    ) -> Result<Vec<String>, FilterTypeMismatchError> {
        match self {
            Self::Basic(c) => Ok(c.postfixes_for_filter()),
            Self::Custom(c) => c.postfixes_for_filter(filter),
            Self::Filterable(c) => c.postfixes_for_filter(filter),
        }
    }

    pub fn base_index_wildcard(&self) -> &'static str {
        match self {
            Self::Basic(c) => c.base_index_wildcard(),
            Self::Custom(_) => INDEX_NAME_WILDCARD,
            Self::Filterable(c) => c.base_index_wildcard(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Filter does not match the type expected by the index calculator: '{expected_type}'")]
pub struct FilterTypeMismatchError {
    pub expected_type: &'static str,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
