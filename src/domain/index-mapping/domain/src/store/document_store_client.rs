// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::InternalError;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type DocumentId = String;

/// Opaque query body, passed to the store as is
pub type QueryDescriptor = serde_json::Value;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct StoreDocument {
    pub id: DocumentId,
    pub source: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdateRequest {
    pub id: DocumentId,
    pub partial_document: ProjectedDocument,
    /// Document to create when the target does not exist yet
    pub upsert_document: Option<serde_json::Value>,
    pub retry_on_conflict: u32,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Client of the underlying document store.
///
/// Failures are reported through the outcome values rather than errors, so
/// that the diagnostic payload of the store always reaches the caller.
#[async_trait::async_trait]
pub trait DocumentStoreClient: Send + Sync {
    async fn index(&self, index_name: &str, document: StoreDocument) -> StoreOutcome;

    async fn bulk_index(&self, index_name: &str, documents: Vec<StoreDocument>) -> BulkOutcome;

    async fn search(
        &self,
        index_names: &str,
        query: &QueryDescriptor,
        skip: usize,
        take: usize,
    ) -> SearchOutcome;

    async fn count(&self, index_names: &str, query: &QueryDescriptor) -> CountOutcome;

    async fn delete(&self, index_name: &str, id: &str) -> StoreOutcome;

    async fn update(&self, index_name: &str, request: PartialUpdateRequest) -> StoreOutcome;

    async fn delete_indices(&self, index_pattern: &str) -> StoreOutcome;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Creates the shared store client on first use
#[async_trait::async_trait]
pub trait DocumentStoreClientFactory: Send + Sync {
    async fn create_client(&self) -> Result<Arc<dyn DocumentStoreClient>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
