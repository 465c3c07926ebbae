// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::any::Any;

use crate::{CustomIndexCalculator, CustomIndexCalculatorBuilder, FilterTypeMismatchError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Same postfix rules as [`CustomIndexCalculator`], but also knows the
/// wildcard that spans every physical index of the entity type.
#[derive(Debug)]
pub struct FilterableIndexCalculator<E> {
    inner: CustomIndexCalculator<E>,
}

impl<E: 'static> FilterableIndexCalculator<E> {
    pub fn builder<F: Any>() -> FilterableIndexCalculatorBuilder<E, F> {
        FilterableIndexCalculatorBuilder {
            inner: CustomIndexCalculator::builder::<F>(),
        }
    }

    pub fn postfix_for_entity(&self, entity: &E) -> String {
        self.inner.postfix_for_entity(entity)
    }

    pub fn postfixes_for_filter(
        &self,
        filter: Option<&dyn Any>,
    ) -> Result<Vec<String>, FilterTypeMismatchError> {
        self.inner.postfixes_for_filter(filter)
    }

    /// With a filter function every postfix is a hyphen-prefixed partition
    /// marker, so the base name is followed by `-*`.
    pub fn base_index_wildcard(&self) -> &'static str {
        if self.inner.has_filter_fn() { "-*" } else { "*" }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct FilterableIndexCalculatorBuilder<E, F> {
    inner: CustomIndexCalculatorBuilder<E, F>,
}

impl<E: 'static, F: Any> FilterableIndexCalculatorBuilder<E, F> {
    pub fn by_entity(self, by_entity: impl Fn(&E) -> String + Send + Sync + 'static) -> Self {
        Self {
            inner: self.inner.by_entity(by_entity),
        }
    }

    pub fn by_filter(
        self,
        by_filter: impl Fn(Option<&F>) -> Option<Vec<String>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner: self.inner.by_filter(by_filter),
        }
    }

    pub fn build(self) -> FilterableIndexCalculator<E> {
        FilterableIndexCalculator {
            inner: self.inner.build(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
