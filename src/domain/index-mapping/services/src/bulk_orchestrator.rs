// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use index_mapping::*;
use internal_error::{InternalError, ResultIntoInternal};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Documents of a write batch that resolved to the same physical index
#[derive(Debug, Clone, PartialEq)]
pub struct BulkGroup {
    pub index_name: String,
    pub documents: Vec<StoreDocument>,
}

/// Partitions a batch by write index name.
///
/// Groups appear in the order their first entity appears in the batch, and
/// entities keep their relative order within a group.
pub fn group_by_write_index<E: MappedEntity>(
    resolver: &IndexNameResolver,
    entity_map: &EntityMap<E>,
    entities: &[E],
) -> Result<Vec<BulkGroup>, GroupBulkBatchError> {
    let mut groups: Vec<BulkGroup> = Vec::new();
    let mut group_positions: HashMap<String, usize> = HashMap::new();

    for entity in entities {
        let index_name = resolver.resolve_write_index_name(entity_map, entity)?;
        let document = entity_document(entity_map, entity)?;

        match group_positions.get(&index_name) {
            Some(&position) => groups[position].documents.push(document),
            None => {
                group_positions.insert(index_name.clone(), groups.len());
                groups.push(BulkGroup {
                    index_name,
                    documents: vec![document],
                });
            }
        }
    }

    Ok(groups)
}

pub(crate) fn entity_document<E: MappedEntity>(
    entity_map: &EntityMap<E>,
    entity: &E,
) -> Result<StoreDocument, InternalError> {
    let id = read_entity_id(entity, entity_map.id_field_name()).context_int_err(format!(
        "reading id of entity '{}'",
        entity_map.entity_type_name()
    ))?;

    let source = serde_json::to_value(entity).context_int_err(format!(
        "serializing entity '{}' with id '{id}'",
        entity_map.entity_type_name()
    ))?;

    Ok(StoreDocument { id, source })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Writes bulk groups chunk by chunk.
///
/// A failed chunk stops its own group only: the remaining chunks of that group
/// are skipped, while the other groups are still written.
#[derive(Debug, Clone, Copy)]
pub struct BulkOrchestrator {
    chunk_size: usize,
}

impl BulkOrchestrator {
    /// Takes the chunk size from a validated config, which is never zero
    pub fn new(config: &IndexMappingConfig) -> Self {
        Self {
            chunk_size: config.bulk_chunk_size(),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of documents the store confirmed
    #[tracing::instrument(
        level = "debug",
        name = "BulkOrchestrator::write_groups",
        skip_all,
        fields(num_groups = groups.len())
    )]
    pub async fn write_groups(
        &self,
        client: &dyn DocumentStoreClient,
        groups: Vec<BulkGroup>,
    ) -> usize {
        let mut total_indexed = 0;

        for group in groups {
            total_indexed += self.write_group(client, group).await;
        }

        tracing::info!(total_indexed, "Bulk write finished");

        total_indexed
    }

    async fn write_group(&self, client: &dyn DocumentStoreClient, group: BulkGroup) -> usize {
        let BulkGroup {
            index_name,
            documents,
        } = group;

        let num_documents = documents.len();
        let mut num_indexed = 0;

        let mut remaining = documents.into_iter().peekable();
        let mut chunk_index = 0;

        while remaining.peek().is_some() {
            let chunk: Vec<_> = remaining.by_ref().take(self.chunk_size).collect();
            let chunk_len = chunk.len();

            tracing::debug!(%index_name, chunk_index, chunk_len, "Submitting bulk chunk");

            let outcome = client.bulk_index(&index_name, chunk).await;

            match bulk_outcome_into_result(outcome, &index_name) {
                Ok(_) => {
                    num_indexed += chunk_len;
                    tracing::debug!(
                        %index_name,
                        chunk_index,
                        num_indexed,
                        num_documents,
                        "Bulk chunk indexed"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        %index_name,
                        chunk_index,
                        num_indexed,
                        num_documents,
                        error = ?e,
                        error_msg = %e,
                        "Bulk chunk failed, skipping the rest of the group"
                    );
                    return num_indexed;
                }
            }

            chunk_index += 1;
        }

        tracing::info!(%index_name, num_indexed, "Bulk group indexed");

        num_indexed
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn bulk_outcome_into_result(
    outcome: BulkOutcome,
    index_name: &str,
) -> Result<BulkOutcome, StoreOperationError> {
    if outcome.is_success() {
        return Ok(outcome);
    }

    let BulkOutcome {
        outcome: mut store_outcome,
        items,
        ..
    } = outcome;

    let item_errors: Vec<_> = items
        .iter()
        .filter(|item| !item.is_valid)
        .map(|item| match &item.error {
            Some(error) => format!("{}: {error}", item.id),
            None => item.id.clone(),
        })
        .collect();

    if !item_errors.is_empty() {
        store_outcome.debug_information = format!(
            "{} (rejected items: {})",
            store_outcome.debug_information,
            item_errors.join("; ")
        );
    }

    Err(StoreOperationError::from_outcome(
        StoreOperation::BulkIndex,
        index_name,
        store_outcome,
    ))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(thiserror::Error, Debug)]
pub enum GroupBulkBatchError {
    #[error(transparent)]
    IndexName(#[from] IndexNameViolationError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
