// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::any::Any;
use std::sync::Arc;

use index_mapping::*;
use internal_error::{InternalError, ResultIntoInternal};

use crate::bulk_orchestrator::entity_document;
use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// CRUD, bulk and query operations over entities with a registered
/// [`EntityMap`].
///
/// The store client is created on first use and shared afterwards.
pub struct EntityRepository {
    registry: Arc<EntityMapRegistry>,
    config: Arc<IndexMappingConfig>,
    client_factory: Arc<dyn DocumentStoreClientFactory>,
    client: tokio::sync::OnceCell<Arc<dyn DocumentStoreClient>>,
    resolver: IndexNameResolver,
}

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
impl EntityRepository {
    pub fn new(
        registry: Arc<EntityMapRegistry>,
        config: Arc<IndexMappingConfig>,
        client_factory: Arc<dyn DocumentStoreClientFactory>,
    ) -> Self {
        let resolver = IndexNameResolver::new(&config);
        Self {
            registry,
            config,
            client_factory,
            client: tokio::sync::OnceCell::new(),
            resolver,
        }
    }
}

impl EntityRepository {
    async fn store_client(&self) -> Result<&Arc<dyn DocumentStoreClient>, InternalError> {
        self.client
            .get_or_try_init(|| async {
                tracing::debug!("Creating document store client");
                self.client_factory.create_client().await
            })
            .await
    }

    pub fn resolver(&self) -> &IndexNameResolver {
        &self.resolver
    }

    /// Fresh projector bound to the id field of the entity map
    pub fn field_projector<E: MappedEntity>(
        &self,
    ) -> Result<FieldProjector<E>, EntityNotRegisteredError> {
        let entity_map = self.registry.get::<E>()?;
        Ok(FieldProjector::new(entity_map.id_field_name()))
    }

    #[tracing::instrument(level = "debug", name = "EntityRepository::add", skip_all)]
    pub async fn add<E: MappedEntity>(&self, entity: &E) -> Result<(), WriteEntityError> {
        let entity_map = self.registry.get::<E>()?;
        let index_name = self.resolver.resolve_write_index_name(&entity_map, entity)?;
        let document = entity_document(&entity_map, entity)?;

        let client = self.store_client().await?;
        let outcome = client.index(&index_name, document).await;
        check_outcome(outcome, StoreOperation::Index, &index_name)?;

        Ok(())
    }

    /// Returns the number of entities the store confirmed. Store failures
    /// are logged and only shrink the returned count.
    #[tracing::instrument(
        level = "debug",
        name = "EntityRepository::bulk_add",
        skip_all,
        fields(num_entities = entities.len())
    )]
    pub async fn bulk_add<E: MappedEntity>(
        &self,
        entities: &[E],
    ) -> Result<usize, WriteEntityError> {
        if entities.is_empty() {
            return Ok(0);
        }

        let entity_map = self.registry.get::<E>()?;
        let groups = group_by_write_index(&self.resolver, &entity_map, entities)?;

        let client = self.store_client().await?;
        let orchestrator = BulkOrchestrator::new(&self.config);

        Ok(orchestrator.write_groups(client.as_ref(), groups).await)
    }

    #[tracing::instrument(level = "debug", name = "EntityRepository::delete", skip_all)]
    pub async fn delete<E: MappedEntity>(&self, entity: &E) -> Result<(), WriteEntityError> {
        let entity_map = self.registry.get::<E>()?;
        let index_name = self.resolver.resolve_write_index_name(&entity_map, entity)?;
        let document = entity_document(&entity_map, entity)?;

        let client = self.store_client().await?;
        let outcome = client.delete(&index_name, &document.id).await;
        check_outcome(outcome, StoreOperation::Delete, &index_name)?;

        Ok(())
    }

    /// Writes the projected fields of the entity. With `upsert` set, a
    /// missing document is created from the whole entity.
    #[tracing::instrument(
        level = "debug",
        name = "EntityRepository::update",
        skip_all,
        fields(upsert)
    )]
    pub async fn update<E: MappedEntity>(
        &self,
        entity: &E,
        projector: &FieldProjector<E>,
        upsert: bool,
    ) -> Result<(), UpdateEntityError> {
        let entity_map = self.registry.get::<E>()?;
        let index_name = self.resolver.resolve_write_index_name(&entity_map, entity)?;
        let partial_document = projector.project(entity)?;
        let document = entity_document(&entity_map, entity)?;

        let request = PartialUpdateRequest {
            id: document.id,
            partial_document,
            upsert_document: upsert.then_some(document.source),
            retry_on_conflict: self.config.update_retry_on_conflict(),
        };

        let client = self.store_client().await?;
        let outcome = client.update(&index_name, request).await;
        check_outcome(outcome, StoreOperation::Update, &index_name)?;

        Ok(())
    }

    #[tracing::instrument(
        level = "debug",
        name = "EntityRepository::search",
        skip_all,
        fields(skip, take)
    )]
    pub async fn search<E: MappedEntity>(
        &self,
        query: &QueryDescriptor,
        filter: Option<&dyn Any>,
        skip: usize,
        take: usize,
    ) -> Result<Vec<E>, QueryEntitiesError> {
        let entity_map = self.registry.get::<E>()?;
        let index_names = self.resolver.resolve_query_index_names(&entity_map, filter)?;

        let client = self.store_client().await?;
        let SearchOutcome { outcome, documents } =
            client.search(&index_names, query, skip, take).await;
        check_outcome(outcome, StoreOperation::Search, &index_names)?;

        let entities = documents
            .into_iter()
            .map(serde_json::from_value::<E>)
            .collect::<Result<Vec<_>, _>>()
            .context_int_err(format!(
                "deserializing '{}' hits from '{index_names}'",
                entity_map.entity_type_name()
            ))?;

        Ok(entities)
    }

    #[tracing::instrument(level = "debug", name = "EntityRepository::count", skip_all)]
    pub async fn count<E: MappedEntity>(
        &self,
        query: &QueryDescriptor,
        filter: Option<&dyn Any>,
    ) -> Result<u64, QueryEntitiesError> {
        let entity_map = self.registry.get::<E>()?;
        let index_names = self.resolver.resolve_query_index_names(&entity_map, filter)?;

        let client = self.store_client().await?;
        let CountOutcome { outcome, count } = client.count(&index_names, query).await;
        check_outcome(outcome, StoreOperation::Count, &index_names)?;

        Ok(count)
    }

    /// Deletes every physical index of the entity type
    #[tracing::instrument(level = "debug", name = "EntityRepository::drop_indices", skip_all)]
    pub async fn drop_indices<E: MappedEntity>(&self) -> Result<(), WriteEntityError> {
        let entity_map = self.registry.get::<E>()?;
        let index_pattern = self.resolver.resolve_index_pattern(&entity_map)?;

        let client = self.store_client().await?;
        let outcome = client.delete_indices(&index_pattern).await;
        check_outcome(outcome, StoreOperation::DeleteIndices, &index_pattern)?;

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn check_outcome(
    outcome: StoreOutcome,
    operation: StoreOperation,
    index_name: &str,
) -> Result<StoreOutcome, StoreOperationError> {
    match outcome.into_result(operation, index_name) {
        Ok(outcome) => {
            tracing::debug!(
                %operation,
                index_name,
                debug_information = %outcome.debug_information,
                "Store operation succeeded"
            );
            Ok(outcome)
        }
        Err(e) => {
            tracing::error!(
                %operation,
                index_name,
                error = ?e,
                error_msg = %e,
                "Store operation failed"
            );
            Err(e)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
