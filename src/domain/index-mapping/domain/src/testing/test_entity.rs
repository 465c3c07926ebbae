// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const TEST_ENTITY_BASE_INDEX_NAME: &str = "TestEntity";
pub const TEST_ENTITY_ID_FIELD: &str = "Id";
pub const TEST_ENTITY_DATE_FORMAT: &str = "%Y.%m.%d";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEntity {
    pub id: String,
    pub name: String,
    pub creation_time: DateTime<Utc>,
    pub group_name: String,
    pub active: bool,
}

impl TestEntity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        creation_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            creation_time,
            group_name: "default".to_string(),
            active: true,
        }
    }

    #[must_use]
    pub fn with_group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = group_name.into();
        self
    }

    pub fn created_on(id: impl Into<String>, year: i32, month: u32, day: u32) -> Self {
        let creation_time = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid test date");
        Self::new(id, "test", creation_time)
    }
}

impl MappedEntity for TestEntity {
    fn entity_fields() -> &'static [EntityField<Self>] {
        entity_fields!(TestEntity {
            "Id" => id,
            "Name" => name,
            "CreationTime" => creation_time,
            "GroupName" => group_name,
            "Active" => active,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Inclusive range of days a query is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestDateRangeFilter {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl TestDateRangeFilter {
    pub fn day_postfixes(&self) -> Vec<String> {
        let mut postfixes = Vec::new();
        let mut day = self.from;
        while day <= self.to {
            postfixes.push(day.format(TEST_ENTITY_DATE_FORMAT).to_string());
            let Some(next) = day.checked_add_days(Days::new(1)) else {
                break;
            };
            day = next;
        }
        postfixes
    }
}

/// Filter of a different type, for exercising mismatches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestGroupFilter {
    pub group_name: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn daily_postfix(entity: &TestEntity) -> String {
    entity
        .creation_time
        .format(TEST_ENTITY_DATE_FORMAT)
        .to_string()
}

/// Entities sliced into one physical index per creation day
pub fn daily_test_entity_map() -> EntityMap<TestEntity> {
    EntityMap::builder()
        .base_index_name(TEST_ENTITY_BASE_INDEX_NAME)
        .id_field_name(TEST_ENTITY_ID_FIELD)
        .calculator(IndexCalculator::filterable(
            FilterableIndexCalculator::builder::<TestDateRangeFilter>()
                .by_entity(daily_postfix)
                .by_filter(|filter| filter.map(TestDateRangeFilter::day_postfixes))
                .build(),
        ))
        .build()
        .expect("valid test entity map")
}

/// Entities sliced into one physical index per group
pub fn grouped_test_entity_map() -> EntityMap<TestEntity> {
    EntityMap::builder()
        .base_index_name(TEST_ENTITY_BASE_INDEX_NAME)
        .id_field_name(TEST_ENTITY_ID_FIELD)
        .calculator(IndexCalculator::custom(
            CustomIndexCalculator::builder::<TestGroupFilter>()
                .by_entity(|entity: &TestEntity| entity.group_name.clone())
                .by_filter(|filter| filter.map(|f| vec![f.group_name.clone()]))
                .build(),
        ))
        .build()
        .expect("valid test entity map")
}

/// All entities share one physical index
pub fn fixed_test_entity_map() -> EntityMap<TestEntity> {
    EntityMap::builder()
        .base_index_name(TEST_ENTITY_BASE_INDEX_NAME)
        .id_field_name(TEST_ENTITY_ID_FIELD)
        .calculator(IndexCalculator::basic_fixed())
        .build()
        .expect("valid test entity map")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
