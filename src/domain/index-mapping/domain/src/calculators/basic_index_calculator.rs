// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::INDEX_NAME_WILDCARD;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Calculator for entity types that are not partitioned per entity.
///
/// Writes always target the base index. Reads of a non-fixed index append a
/// wildcard so that rolled-over physical indices are still covered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicIndexCalculator {
    fixed: bool,
}

impl BasicIndexCalculator {
    pub fn new() -> Self {
        Self { fixed: false }
    }

    /// All reads and writes target exactly one physical index
    pub fn fixed() -> Self {
        Self { fixed: true }
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn postfix_for_entity<E>(&self, _entity: &E) -> String {
        String::new()
    }

    pub fn postfixes_for_filter(&self) -> Vec<String> {
        if self.fixed {
            vec![]
        } else {
            vec![INDEX_NAME_WILDCARD.to_string()]
        }
    }

    pub fn base_index_wildcard(&self) -> &'static str {
        if self.fixed { "" } else { INDEX_NAME_WILDCARD }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
