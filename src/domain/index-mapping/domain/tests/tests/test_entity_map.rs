// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use index_mapping::testing::*;
use index_mapping::*;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn entity_type() -> &'static str {
    std::any::type_name::<TestEntity>()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_entity_map_requires_base_index_name() {
    let err = EntityMap::<TestEntity>::builder()
        .base_index_name("  ")
        .id_field_name(TEST_ENTITY_ID_FIELD)
        .calculator(IndexCalculator::basic())
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        EntityMapConfigurationError::MissingBaseIndexName {
            entity_type: entity_type()
        }
    );
}

#[test]
fn test_entity_map_requires_id_field() {
    let err = EntityMap::<TestEntity>::builder()
        .base_index_name(TEST_ENTITY_BASE_INDEX_NAME)
        .calculator(IndexCalculator::basic())
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        EntityMapConfigurationError::MissingIdFieldName {
            entity_type: entity_type()
        }
    );
}

#[test]
fn test_entity_map_requires_calculator() {
    let err = EntityMap::<TestEntity>::builder()
        .base_index_name(TEST_ENTITY_BASE_INDEX_NAME)
        .id_field_name(TEST_ENTITY_ID_FIELD)
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        EntityMapConfigurationError::MissingCalculator {
            entity_type: entity_type()
        }
    );
}

#[test]
fn test_entity_map_requires_declared_id_field() {
    let err = EntityMap::<TestEntity>::builder()
        .base_index_name(TEST_ENTITY_BASE_INDEX_NAME)
        .id_field_name("Uuid")
        .calculator(IndexCalculator::basic())
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        EntityMapConfigurationError::UnknownIdField {
            entity_type: entity_type(),
            id_field_name: "Uuid",
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_registry_resolves_registered_map() {
    let registry = EntityMapRegistry::builder()
        .register(daily_test_entity_map())
        .unwrap()
        .build();

    let entity_map = registry.get::<TestEntity>().unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(entity_map.base_index_name(), TEST_ENTITY_BASE_INDEX_NAME);
    assert_eq!(entity_map.id_field_name(), TEST_ENTITY_ID_FIELD);
}

#[test]
fn test_registry_reports_missing_map() {
    let registry = EntityMapRegistry::builder().build();

    assert!(registry.is_empty());
    assert_eq!(
        registry.get::<TestEntity>().unwrap_err(),
        EntityNotRegisteredError {
            entity_type: entity_type()
        }
    );
}

#[test]
fn test_registry_rejects_second_map_of_same_type() {
    let result = EntityMapRegistry::builder()
        .register(daily_test_entity_map())
        .unwrap()
        .register(fixed_test_entity_map());

    assert!(matches!(
        result,
        Err(EntityMapConfigurationError::DuplicateEntityMap { .. })
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_read_entity_id_renders_non_string_values() {
    let entity = TestEntity::created_on("abc", 2024, 1, 1);

    assert_eq!(read_entity_id(&entity, "Id").unwrap(), "abc");
    assert_eq!(read_entity_id(&entity, "Active").unwrap(), "true");
    assert!(matches!(
        read_entity_id(&entity, "Missing"),
        Err(ReadEntityIdError::UnknownField { .. })
    ));
}

#[test]
fn test_read_entity_id_rejects_null_id() {
    let entity = FaultyTestEntity::without_id();

    assert!(matches!(
        read_entity_id(&entity, TEST_ENTITY_ID_FIELD),
        Err(ReadEntityIdError::NullId {
            field_name: "Id",
            ..
        })
    ));
    assert_eq!(
        read_entity_id(&FaultyTestEntity::new("f1"), TEST_ENTITY_ID_FIELD).unwrap(),
        "f1"
    );
}

#[test]
fn test_read_entity_id_reports_serialization_failure() {
    let entity = FaultyTestEntity::new("f1").with_broken_payload();

    let err = read_entity_id(&entity, "Payload").unwrap_err();

    assert!(matches!(err, ReadEntityIdError::Serialization(_)));
    assert_eq!(err.to_string(), "broken payload");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
