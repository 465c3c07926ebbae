// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const MAX_INDEX_NAME_SEGMENT_BYTES: usize = 255;

const FORBIDDEN_START_CHARS: [char; 3] = ['-', '_', '+'];

const FORBIDDEN_CHARS: [char; 10] = ['\\', '/', '?', '"', '<', '>', '|', ' ', ',', '#'];

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexNameUsage {
    /// Physical index a document is written to: one segment, no wildcards
    Write,
    /// Comma-separated list of indices or patterns to read from
    Query,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn validate_index_name(
    index_name: &str,
    usage: IndexNameUsage,
) -> Result<(), IndexNameViolationError> {
    let check = |segment: &str| {
        validate_segment(segment, usage).map_err(|violation| IndexNameViolationError {
            index_name: index_name.to_string(),
            violation,
        })
    };

    match usage {
        IndexNameUsage::Write => check(index_name),
        IndexNameUsage::Query => index_name.split(',').try_for_each(check),
    }
}

fn validate_segment(segment: &str, usage: IndexNameUsage) -> Result<(), IndexNameViolation> {
    if segment.is_empty() {
        return Err(IndexNameViolation::Empty);
    }

    if segment.len() > MAX_INDEX_NAME_SEGMENT_BYTES {
        return Err(IndexNameViolation::TooLong {
            length: segment.len(),
        });
    }

    if segment == "." || segment == ".." {
        return Err(IndexNameViolation::Reserved);
    }

    if let Some(first) = segment.chars().next().filter(|c| FORBIDDEN_START_CHARS.contains(c)) {
        return Err(IndexNameViolation::InvalidStart { character: first });
    }

    if let Some(character) = segment.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(IndexNameViolation::ForbiddenCharacter { character });
    }

    if usage == IndexNameUsage::Write && segment.contains('*') {
        return Err(IndexNameViolation::WildcardInWriteTarget);
    }

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Index name '{index_name}' is invalid: {violation}")]
pub struct IndexNameViolationError {
    pub index_name: String,
    pub violation: IndexNameViolation,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexNameViolation {
    #[error("name segment is empty")]
    Empty,

    #[error("name segment is {length} bytes long, at most 255 allowed")]
    TooLong { length: usize },

    #[error("'.' and '..' are reserved")]
    Reserved,

    #[error("name must not start with '{character}'")]
    InvalidStart { character: char },

    #[error("name must not contain '{character}'")]
    ForbiddenCharacter { character: char },

    #[error("wildcards are only allowed in query index names")]
    WildcardInWriteTarget,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
