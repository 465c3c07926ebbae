// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::any::{Any, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{FilterTypeMismatchError, INDEX_NAME_WILDCARD};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type EntityPostfixFn<E> = Arc<dyn Fn(&E) -> String + Send + Sync>;

type ErasedFilterPostfixFn = Arc<dyn Fn(Option<&dyn Any>) -> Option<Vec<String>> + Send + Sync>;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Calculator driven by user-supplied postfix functions.
///
/// The filter type is fixed when the builder is created, so a filter of any
/// other type is rejected even if no filter function was configured.
pub struct CustomIndexCalculator<E> {
    by_entity: Option<EntityPostfixFn<E>>,
    by_filter: Option<ErasedFilterPostfixFn>,
    filter_type_id: TypeId,
    filter_type_name: &'static str,
}

impl<E: 'static> CustomIndexCalculator<E> {
    pub fn builder<F: Any>() -> CustomIndexCalculatorBuilder<E, F> {
        CustomIndexCalculatorBuilder {
            by_entity: None,
            by_filter: None,
            _filter: PhantomData,
        }
    }

    pub fn has_filter_fn(&self) -> bool {
        self.by_filter.is_some()
    }

    pub fn filter_type_name(&self) -> &'static str {
        self.filter_type_name
    }

    pub fn postfix_for_entity(&self, entity: &E) -> String {
        match &self.by_entity {
            Some(by_entity) => by_entity(entity),
            None => String::new(),
        }
    }

    pub fn postfixes_for_filter(
        &self,
        filter: Option<&dyn Any>,
    ) -> Result<Vec<String>, FilterTypeMismatchError> {
        let type_matches = filter.is_none_or(|filter| Any::type_id(filter) == self.filter_type_id);
        if !type_matches {
            return Err(FilterTypeMismatchError {
                expected_type: self.filter_type_name,
            });
        }

        let postfixes = self
            .by_filter
            .as_ref()
            .and_then(|by_filter| by_filter(filter))
            .unwrap_or_else(|| vec![INDEX_NAME_WILDCARD.to_string()]);

        Ok(postfixes)
    }
}

impl<E> std::fmt::Debug for CustomIndexCalculator<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomIndexCalculator")
            .field("has_entity_fn", &self.by_entity.is_some())
            .field("has_filter_fn", &self.by_filter.is_some())
            .field("filter_type", &self.filter_type_name)
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct CustomIndexCalculatorBuilder<E, F> {
    by_entity: Option<EntityPostfixFn<E>>,
    by_filter: Option<ErasedFilterPostfixFn>,
    _filter: PhantomData<fn(&F)>,
}

impl<E: 'static, F: Any> CustomIndexCalculatorBuilder<E, F> {
    /// Postfix of the physical index a single entity is written to
    pub fn by_entity(mut self, by_entity: impl Fn(&E) -> String + Send + Sync + 'static) -> Self {
        self.by_entity = Some(Arc::new(by_entity));
        self
    }

    /// Postfixes of the physical indices a query has to span. Returning
    /// `None` means "match everything".
    pub fn by_filter(
        mut self,
        by_filter: impl Fn(Option<&F>) -> Option<Vec<String>> + Send + Sync + 'static,
    ) -> Self {
        self.by_filter = Some(Arc::new(move |filter: Option<&dyn Any>| {
            by_filter(filter.and_then(|filter| filter.downcast_ref::<F>()))
        }));
        self
    }

    pub fn build(self) -> CustomIndexCalculator<E> {
        CustomIndexCalculator {
            by_entity: self.by_entity,
            by_filter: self.by_filter,
            filter_type_id: TypeId::of::<F>(),
            filter_type_name: std::any::type_name::<F>(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
