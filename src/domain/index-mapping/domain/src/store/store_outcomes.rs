// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::BoxedError;

use crate::DocumentId;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct StoreOutcome {
    pub is_valid: bool,
    pub debug_information: String,
    pub cause: Option<BoxedError>,
}

impl StoreOutcome {
    pub fn valid(debug_information: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            debug_information: debug_information.into(),
            cause: None,
        }
    }

    pub fn invalid(debug_information: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            debug_information: debug_information.into(),
            cause: None,
        }
    }

    pub fn failed(debug_information: impl Into<String>, cause: impl Into<BoxedError>) -> Self {
        Self {
            is_valid: false,
            debug_information: debug_information.into(),
            cause: Some(cause.into()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct BulkOutcome {
    pub outcome: StoreOutcome,
    /// Set when at least one item of the request was rejected
    pub errors: bool,
    pub items: Vec<BulkItemOutcome>,
}

impl BulkOutcome {
    pub fn is_success(&self) -> bool {
        self.outcome.is_valid && !self.errors
    }

    pub fn num_succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.is_valid).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemOutcome {
    pub id: DocumentId,
    pub is_valid: bool,
    pub error: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct SearchOutcome {
    pub outcome: StoreOutcome,
    pub documents: Vec<serde_json::Value>,
}

#[derive(Debug)]
pub struct CountOutcome {
    pub outcome: StoreOutcome,
    pub count: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
