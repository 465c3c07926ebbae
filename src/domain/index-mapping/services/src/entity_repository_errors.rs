// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use index_mapping::*;
use internal_error::InternalError;
use thiserror::Error;

use crate::GroupBulkBatchError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum WriteEntityError {
    #[error(transparent)]
    NotRegistered(#[from] EntityNotRegisteredError),

    #[error(transparent)]
    IndexName(#[from] IndexNameViolationError),

    #[error(transparent)]
    Store(#[from] StoreOperationError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<GroupBulkBatchError> for WriteEntityError {
    fn from(value: GroupBulkBatchError) -> Self {
        match value {
            GroupBulkBatchError::IndexName(e) => Self::IndexName(e),
            GroupBulkBatchError::Internal(e) => Self::Internal(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum UpdateEntityError {
    #[error(transparent)]
    NotRegistered(#[from] EntityNotRegisteredError),

    #[error(transparent)]
    IndexName(#[from] IndexNameViolationError),

    #[error(transparent)]
    Projection(#[from] FieldProjectionError),

    #[error(transparent)]
    Store(#[from] StoreOperationError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum QueryEntitiesError {
    #[error(transparent)]
    NotRegistered(#[from] EntityNotRegisteredError),

    #[error(transparent)]
    FilterTypeMismatch(#[from] FilterTypeMismatchError),

    #[error(transparent)]
    IndexName(#[from] IndexNameViolationError),

    #[error(transparent)]
    Store(#[from] StoreOperationError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<ResolveQueryIndexNamesError> for QueryEntitiesError {
    fn from(value: ResolveQueryIndexNamesError) -> Self {
        match value {
            ResolveQueryIndexNamesError::FilterTypeMismatch(e) => Self::FilterTypeMismatch(e),
            ResolveQueryIndexNamesError::NameViolation(e) => Self::IndexName(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
