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

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const SEGMENT_SEPARATOR: &str = "-";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Assembles final index names out of the global prefix/suffix, the base
/// name of an entity map and the postfixes of its calculator.
///
/// Every produced name is lower-cased and validated before it is returned.
#[derive(Debug, Clone, Default)]
pub struct IndexNameResolver {
    prefix: String,
    suffix: String,
}

impl IndexNameResolver {
    pub fn new(config: &IndexMappingConfig) -> Self {
        Self {
            prefix: config.index_prefix().to_lowercase(),
            suffix: config.index_suffix().to_lowercase(),
        }
    }

    /// Name of the physical index the entity is written to
    pub fn resolve_write_index_name<E: MappedEntity>(
        &self,
        entity_map: &EntityMap<E>,
        entity: &E,
    ) -> Result<String, IndexNameViolationError> {
        let postfix = entity_map.calculator().postfix_for_entity(entity);

        let index_name = join_segments([
            self.prefix.as_str(),
            entity_map.base_index_name(),
            self.suffix.as_str(),
            postfix.as_str(),
        ])
        .to_lowercase();

        validate_index_name(&index_name, IndexNameUsage::Write)?;
        Ok(index_name)
    }

    /// Comma-separated list of indices a query with the given filter spans
    pub fn resolve_query_index_names<E: MappedEntity>(
        &self,
        entity_map: &EntityMap<E>,
        filter: Option<&dyn Any>,
    ) -> Result<String, ResolveQueryIndexNamesError> {
        let fixed_prefix = self.fixed_prefix(entity_map);
        let postfixes = entity_map.calculator().postfixes_for_filter(filter)?;

        let index_names = if postfixes.is_empty() {
            fixed_prefix
        } else {
            postfixes
                .iter()
                .map(|postfix| {
                    join_segments([fixed_prefix.as_str(), postfix.as_str()]).to_lowercase()
                })
                .collect::<Vec<_>>()
                .join(",")
        };

        validate_index_name(&index_names, IndexNameUsage::Query)?;
        Ok(index_names)
    }

    /// Pattern that matches every physical index of the entity type
    pub fn resolve_index_pattern<E: MappedEntity>(
        &self,
        entity_map: &EntityMap<E>,
    ) -> Result<String, IndexNameViolationError> {
        let pattern = format!(
            "{}{}",
            self.fixed_prefix(entity_map),
            entity_map.calculator().base_index_wildcard()
        );

        validate_index_name(&pattern, IndexNameUsage::Query)?;
        Ok(pattern)
    }

    fn fixed_prefix<E: MappedEntity>(&self, entity_map: &EntityMap<E>) -> String {
        join_segments([
            self.prefix.as_str(),
            entity_map.base_index_name(),
            self.suffix.as_str(),
        ])
        .to_lowercase()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveQueryIndexNamesError {
    #[error(transparent)]
    FilterTypeMismatch(#[from] FilterTypeMismatchError),

    #[error(transparent)]
    NameViolation(#[from] IndexNameViolationError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
