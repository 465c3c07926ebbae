// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;
use std::sync::Arc;

use index_mapping::*;
use internal_error::InternalError;
use tokio::sync::RwLock;

use crate::query_matcher::{index_list_matches, query_matches};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    // Documents keep insertion order within an index
    indices: BTreeMap<String, Vec<StoreDocument>>,
}

impl State {
    fn upsert(&mut self, index_name: &str, document: StoreDocument) {
        let documents = self.indices.entry(index_name.to_string()).or_default();
        match documents.iter_mut().find(|existing| existing.id == document.id) {
            Some(existing) => *existing = document,
            None => documents.push(document),
        }
    }

    fn matching<'a>(
        &'a self,
        index_names: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a Vec<StoreDocument>)> + 'a {
        self.indices
            .iter()
            .filter(move |(name, _)| index_list_matches(index_names, name))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Document store kept in process memory.
///
/// Indices are created on first write. Concrete names that do not exist are
/// skipped when reading, as if `ignore_unavailable` was set.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    state: Arc<RwLock<State>>,
}

#[dill::component(pub)]
#[dill::interface(dyn DocumentStoreClientFactory)]
#[dill::scope(dill::Singleton)]
impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
        }
    }
}

impl InMemoryDocumentStore {
    pub async fn index_names(&self) -> Vec<String> {
        let readable_state = self.state.read().await;
        readable_state.indices.keys().cloned().collect()
    }

    pub async fn documents_in(&self, index_name: &str) -> Vec<StoreDocument> {
        let readable_state = self.state.read().await;
        readable_state
            .indices
            .get(index_name)
            .cloned()
            .unwrap_or_default()
    }

    fn check_write_target(index_name: &str) -> Result<(), StoreOutcome> {
        validate_index_name(index_name, IndexNameUsage::Write).map_err(|e| {
            StoreOutcome::failed(format!("invalid_index_name_exception: {e}"), e)
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl DocumentStoreClientFactory for InMemoryDocumentStore {
    async fn create_client(&self) -> Result<Arc<dyn DocumentStoreClient>, InternalError> {
        Ok(Arc::new(self.clone()))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl DocumentStoreClient for InMemoryDocumentStore {
    async fn index(&self, index_name: &str, document: StoreDocument) -> StoreOutcome {
        if let Err(outcome) = Self::check_write_target(index_name) {
            return outcome;
        }

        let mut writable_state = self.state.write().await;
        let id = document.id.clone();
        writable_state.upsert(index_name, document);

        StoreOutcome::valid(format!("Indexed document '{id}' into '{index_name}'"))
    }

    async fn bulk_index(&self, index_name: &str, documents: Vec<StoreDocument>) -> BulkOutcome {
        if let Err(outcome) = Self::check_write_target(index_name) {
            return BulkOutcome {
                outcome,
                errors: true,
                items: vec![],
            };
        }

        let mut writable_state = self.state.write().await;
        let num_documents = documents.len();

        let items = documents
            .into_iter()
            .map(|document| {
                let item = BulkItemOutcome {
                    id: document.id.clone(),
                    is_valid: true,
                    error: None,
                };
                writable_state.upsert(index_name, document);
                item
            })
            .collect();

        BulkOutcome {
            outcome: StoreOutcome::valid(format!(
                "Bulk indexed {num_documents} document(s) into '{index_name}'"
            )),
            errors: false,
            items,
        }
    }

    async fn search(
        &self,
        index_names: &str,
        query: &QueryDescriptor,
        skip: usize,
        take: usize,
    ) -> SearchOutcome {
        let readable_state = self.state.read().await;

        let mut documents = Vec::new();
        for (_, index_documents) in readable_state.matching(index_names) {
            for document in index_documents {
                match query_matches(query, &document.source) {
                    Ok(true) => documents.push(document.source.clone()),
                    Ok(false) => {}
                    Err(reason) => {
                        return SearchOutcome {
                            outcome: StoreOutcome::invalid(format!(
                                "search_phase_execution_exception: {reason}"
                            )),
                            documents: vec![],
                        };
                    }
                }
            }
        }

        let documents: Vec<_> = documents.into_iter().skip(skip).take(take).collect();

        SearchOutcome {
            outcome: StoreOutcome::valid(format!(
                "Found {} document(s) in '{index_names}'",
                documents.len()
            )),
            documents,
        }
    }

    async fn count(&self, index_names: &str, query: &QueryDescriptor) -> CountOutcome {
        let readable_state = self.state.read().await;

        let mut count = 0;
        for (_, index_documents) in readable_state.matching(index_names) {
            for document in index_documents {
                match query_matches(query, &document.source) {
                    Ok(true) => count += 1,
                    Ok(false) => {}
                    Err(reason) => {
                        return CountOutcome {
                            outcome: StoreOutcome::invalid(format!(
                                "search_phase_execution_exception: {reason}"
                            )),
                            count: 0,
                        };
                    }
                }
            }
        }

        CountOutcome {
            outcome: StoreOutcome::valid(format!("Counted {count} document(s) in '{index_names}'")),
            count,
        }
    }

    async fn delete(&self, index_name: &str, id: &str) -> StoreOutcome {
        let mut writable_state = self.state.write().await;

        let Some(documents) = writable_state.indices.get_mut(index_name) else {
            return StoreOutcome::invalid(format!("index_not_found_exception: '{index_name}'"));
        };

        let num_before = documents.len();
        documents.retain(|document| document.id != id);

        if documents.len() == num_before {
            StoreOutcome::invalid(format!("not_found: document '{id}' in '{index_name}'"))
        } else {
            StoreOutcome::valid(format!("Deleted document '{id}' from '{index_name}'"))
        }
    }

    async fn update(&self, index_name: &str, request: PartialUpdateRequest) -> StoreOutcome {
        if let Err(outcome) = Self::check_write_target(index_name) {
            return outcome;
        }

        let mut writable_state = self.state.write().await;

        let existing = writable_state
            .indices
            .get_mut(index_name)
            .and_then(|documents| documents.iter_mut().find(|d| d.id == request.id));

        if let Some(document) = existing {
            let serde_json::Value::Object(source) = &mut document.source else {
                return StoreOutcome::invalid(format!(
                    "mapper_parsing_exception: document '{}' is not an object",
                    request.id
                ));
            };
            for (key, value) in request.partial_document {
                source.insert(key, value);
            }
            return StoreOutcome::valid(format!(
                "Updated document '{}' in '{index_name}'",
                request.id
            ));
        }

        match request.upsert_document {
            Some(upsert_document) => {
                let id = request.id;
                writable_state.upsert(
                    index_name,
                    StoreDocument {
                        id: id.clone(),
                        source: upsert_document,
                    },
                );
                StoreOutcome::valid(format!("Upserted document '{id}' into '{index_name}'"))
            }
            None => StoreOutcome::invalid(format!(
                "document_missing_exception: document '{}' in '{index_name}'",
                request.id
            )),
        }
    }

    async fn delete_indices(&self, index_pattern: &str) -> StoreOutcome {
        let mut writable_state = self.state.write().await;

        let num_before = writable_state.indices.len();
        writable_state
            .indices
            .retain(|name, _| !index_list_matches(index_pattern, name));
        let num_deleted = num_before - writable_state.indices.len();

        tracing::debug!(index_pattern, num_deleted, "Deleted in-memory indices");

        StoreOutcome::valid(format!(
            "Deleted {num_deleted} index(es) matching '{index_pattern}'"
        ))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
