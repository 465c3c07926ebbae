// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::ser::{Error as _, SerializeStruct as _};
use serde::{Deserialize, Serialize, Serializer};

use super::TEST_ENTITY_ID_FIELD;
use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const FAULTY_TEST_ENTITY_BASE_INDEX_NAME: &str = "FaultyEntity";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Entity with a nullable id and a payload that can refuse to serialize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultyTestEntity {
    pub id: Option<String>,
    pub label: String,
    pub payload: FaultyPayload,
}

impl FaultyTestEntity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            label: "faulty".to_string(),
            payload: FaultyPayload { broken: false },
        }
    }

    pub fn without_id() -> Self {
        Self {
            id: None,
            ..Self::new("")
        }
    }

    #[must_use]
    pub fn with_broken_payload(mut self) -> Self {
        self.payload.broken = true;
        self
    }
}

impl MappedEntity for FaultyTestEntity {
    fn entity_fields() -> &'static [EntityField<Self>] {
        entity_fields!(FaultyTestEntity {
            "Id" => id,
            "Label" => label,
            "Payload" => payload,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FaultyPayload {
    pub broken: bool,
}

impl Serialize for FaultyPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.broken {
            return Err(S::Error::custom("broken payload"));
        }

        let mut state = serializer.serialize_struct("FaultyPayload", 1)?;
        state.serialize_field("broken", &self.broken)?;
        state.end()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// All faulty entities share one physical index
pub fn faulty_test_entity_map() -> EntityMap<FaultyTestEntity> {
    EntityMap::builder()
        .base_index_name(FAULTY_TEST_ENTITY_BASE_INDEX_NAME)
        .id_field_name(TEST_ENTITY_ID_FIELD)
        .calculator(IndexCalculator::basic_fixed())
        .build()
        .expect("valid faulty entity map")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
