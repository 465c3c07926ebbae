// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::BoxedError;
use thiserror::Error;

use crate::StoreOutcome;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StoreOperation {
    Index,
    BulkIndex,
    Search,
    Count,
    Delete,
    Update,
    DeleteIndices,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The store reported an invalid or unsuccessful outcome
#[derive(Error, Debug)]
#[error("Store operation '{operation}' on '{index_name}' failed: {debug_information}")]
pub struct StoreOperationError {
    pub operation: StoreOperation,
    pub index_name: String,
    pub debug_information: String,
    #[source]
    pub cause: Option<BoxedError>,
}

impl StoreOperationError {
    pub fn from_outcome(
        operation: StoreOperation,
        index_name: impl Into<String>,
        outcome: StoreOutcome,
    ) -> Self {
        Self {
            operation,
            index_name: index_name.into(),
            debug_information: outcome.debug_information,
            cause: outcome.cause,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Converts an invalid outcome into an error, keeping the store diagnostics
pub trait StoreOutcomeExt: Sized {
    fn into_result(
        self,
        operation: StoreOperation,
        index_name: &str,
    ) -> Result<Self, StoreOperationError>;
}

impl StoreOutcomeExt for StoreOutcome {
    fn into_result(
        self,
        operation: StoreOperation,
        index_name: &str,
    ) -> Result<Self, StoreOperationError> {
        if self.is_valid {
            Ok(self)
        } else {
            Err(StoreOperationError::from_outcome(operation, index_name, self))
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
