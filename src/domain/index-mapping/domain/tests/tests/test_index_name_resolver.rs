// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::NaiveDate;
use index_mapping::testing::*;
use index_mapping::*;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn resolver(prefix: &str, suffix: &str) -> IndexNameResolver {
    IndexNameResolver::new(&IndexMappingConfig::with_affixes(prefix, suffix))
}

fn single_day(year: i32, month: u32, day: u32) -> TestDateRangeFilter {
    let day = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    TestDateRangeFilter { from: day, to: day }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Write names
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_write_name_combines_all_segments() {
    let entity_map = daily_test_entity_map();
    let entity = TestEntity::created_on("1", 2024, 1, 1);

    let index_name = resolver("PRE", "Suf")
        .resolve_write_index_name(&entity_map, &entity)
        .unwrap();

    assert_eq!(index_name, "pre-testentity-suf-2024.01.01");
}

#[test]
fn test_write_name_omits_empty_segments() {
    let entity = TestEntity::created_on("1", 2024, 1, 1);

    assert_eq!(
        resolver("", "")
            .resolve_write_index_name(&daily_test_entity_map(), &entity)
            .unwrap(),
        "testentity-2024.01.01"
    );
    assert_eq!(
        resolver("pre", "")
            .resolve_write_index_name(&fixed_test_entity_map(), &entity)
            .unwrap(),
        "pre-testentity"
    );
    assert_eq!(
        resolver("", "suf")
            .resolve_write_index_name(&grouped_test_entity_map(), &entity.with_group_name("Blue"))
            .unwrap(),
        "testentity-suf-blue"
    );
}

#[test]
fn test_write_name_is_stable_across_calls() {
    let entity_map = daily_test_entity_map();
    let resolver = resolver("pre", "suf");
    let entity = TestEntity::created_on("1", 2024, 5, 17);

    let first = resolver.resolve_write_index_name(&entity_map, &entity).unwrap();
    let second = resolver.resolve_write_index_name(&entity_map, &entity).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_write_name_rejects_wildcard_postfix() {
    let entity_map = EntityMap::<TestEntity>::builder()
        .base_index_name("testentity")
        .id_field_name(TEST_ENTITY_ID_FIELD)
        .calculator(IndexCalculator::custom(
            CustomIndexCalculator::builder::<()>()
                .by_entity(|_| "*".to_string())
                .build(),
        ))
        .build()
        .unwrap();

    let err = resolver("", "")
        .resolve_write_index_name(&entity_map, &TestEntity::created_on("1", 2024, 1, 1))
        .unwrap_err();

    assert_eq!(
        err,
        IndexNameViolationError {
            index_name: "testentity-*".to_string(),
            violation: IndexNameViolation::WildcardInWriteTarget,
        }
    );
}

#[test]
fn test_write_name_rejects_forbidden_characters_from_postfix() {
    let entity = TestEntity::created_on("1", 2024, 1, 1).with_group_name("a/b");

    let err = resolver("", "")
        .resolve_write_index_name(&grouped_test_entity_map(), &entity)
        .unwrap_err();

    assert_eq!(
        err.violation,
        IndexNameViolation::ForbiddenCharacter { character: '/' }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Query names
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_query_names_span_every_postfix() {
    let filter = TestDateRangeFilter {
        from: NaiveDate::from_ymd_opt(2024, 1, 30).unwrap(),
        to: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
    };

    let index_names = resolver("pre", "suf")
        .resolve_query_index_names(&daily_test_entity_map(), Some(&filter))
        .unwrap();

    assert_eq!(
        index_names,
        "pre-testentity-suf-2024.01.30,pre-testentity-suf-2024.01.31,pre-testentity-suf-2024.02.01"
    );
}

#[test]
fn test_query_names_without_filter_use_wildcard() {
    let index_names = resolver("pre", "suf")
        .resolve_query_index_names(&daily_test_entity_map(), None)
        .unwrap();

    assert_eq!(index_names, "pre-testentity-suf-*");
}

#[test]
fn test_query_names_of_fixed_index_have_no_separator() {
    let index_names = resolver("pre", "suf")
        .resolve_query_index_names(&fixed_test_entity_map(), Some(&single_day(2024, 1, 1)))
        .unwrap();

    assert_eq!(index_names, "pre-testentity-suf");
}

#[test]
fn test_query_names_reject_filter_of_other_type() {
    let err = resolver("", "")
        .resolve_query_index_names(&daily_test_entity_map(), Some(&"not a filter"))
        .unwrap_err();

    assert!(
        matches!(err, ResolveQueryIndexNamesError::FilterTypeMismatch(_)),
        "{err:?}"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Patterns
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_index_pattern_per_calculator() {
    let resolver = resolver("pre", "");

    assert_eq!(
        resolver.resolve_index_pattern(&daily_test_entity_map()).unwrap(),
        "pre-testentity-*"
    );
    assert_eq!(
        resolver.resolve_index_pattern(&grouped_test_entity_map()).unwrap(),
        "pre-testentity*"
    );
    assert_eq!(
        resolver.resolve_index_pattern(&fixed_test_entity_map()).unwrap(),
        "pre-testentity"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Validation
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_segment_length_boundary() {
    let exactly_max = "a".repeat(255);
    let over_max = "a".repeat(256);

    assert_eq!(validate_index_name(&exactly_max, IndexNameUsage::Write), Ok(()));
    assert_eq!(
        validate_index_name(&over_max, IndexNameUsage::Write)
            .unwrap_err()
            .violation,
        IndexNameViolation::TooLong { length: 256 }
    );

    // Every query segment gets its own budget
    let two_segments = format!("{exactly_max},{exactly_max}");
    assert_eq!(validate_index_name(&two_segments, IndexNameUsage::Query), Ok(()));
}

#[test]
fn test_wildcard_allowed_only_for_queries() {
    assert_eq!(validate_index_name("orders-*", IndexNameUsage::Query), Ok(()));
    assert_eq!(
        validate_index_name("orders-*", IndexNameUsage::Write)
            .unwrap_err()
            .violation,
        IndexNameViolation::WildcardInWriteTarget
    );
}

#[test]
fn test_reserved_names_and_starts() {
    for usage in [IndexNameUsage::Write, IndexNameUsage::Query] {
        assert_eq!(
            validate_index_name(".", usage).unwrap_err().violation,
            IndexNameViolation::Reserved
        );
        assert_eq!(
            validate_index_name("..", usage).unwrap_err().violation,
            IndexNameViolation::Reserved
        );

        for first in ['-', '_', '+'] {
            assert_eq!(
                validate_index_name(&format!("{first}orders"), usage)
                    .unwrap_err()
                    .violation,
                IndexNameViolation::InvalidStart { character: first }
            );
        }
    }

    // Dots are fine inside a name
    assert_eq!(validate_index_name(".orders", IndexNameUsage::Write), Ok(()));
}

#[test]
fn test_forbidden_characters() {
    for character in ['\\', '/', '?', '"', '<', '>', '|', ' ', '#'] {
        let name = format!("ord{character}ers");
        assert_eq!(
            validate_index_name(&name, IndexNameUsage::Query)
                .unwrap_err()
                .violation,
            IndexNameViolation::ForbiddenCharacter { character },
            "{name}"
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
