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
use index_mapping_services::*;
use pretty_assertions::assert_eq;

use super::harness::EntityRepositoryHarness;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// 120 entities, 70 in group "a" and 50 in group "b", interleaved
fn mixed_batch() -> Vec<TestEntity> {
    (0..120)
        .map(|i| {
            let group_name = if i % 12 < 7 { "a" } else { "b" };
            TestEntity::created_on(format!("{i}"), 2024, 1, 1).with_group_name(group_name)
        })
        .collect()
}

fn ids_of_group(entities: &[TestEntity], group_name: &str) -> Vec<String> {
    entities
        .iter()
        .filter(|entity| entity.group_name == group_name)
        .map(|entity| entity.id.clone())
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_bulk_add_empty_batch_makes_no_calls() {
    let harness = EntityRepositoryHarness::new(grouped_test_entity_map());

    let num_indexed = harness.repo.bulk_add::<TestEntity>(&[]).await.unwrap();

    assert_eq!(num_indexed, 0);
    assert_eq!(harness.num_clients_created(), 0);
    harness.assert_events(&[]);
}

#[test_log::test(tokio::test)]
async fn test_bulk_add_groups_and_chunks() {
    let harness = EntityRepositoryHarness::new(grouped_test_entity_map());
    let entities = mixed_batch();

    let num_indexed = harness.repo.bulk_add(&entities).await.unwrap();

    assert_eq!(num_indexed, 120);
    harness.assert_events(&[
        "bulk:testentity-a:50",
        "bulk:testentity-a:20",
        "bulk:testentity-b:50",
    ]);

    // Relative order within a group is preserved
    assert_eq!(
        harness.stored_ids("testentity-a").await,
        ids_of_group(&entities, "a")
    );
    assert_eq!(
        harness.stored_ids("testentity-b").await,
        ids_of_group(&entities, "b")
    );
}

#[test_log::test(tokio::test)]
async fn test_bulk_add_isolates_failed_group() {
    let harness = EntityRepositoryHarness::builder(grouped_test_entity_map())
        .fail_bulk_call("testentity-a", 2)
        .build();
    let entities = mixed_batch();

    let num_indexed = harness.repo.bulk_add(&entities).await.unwrap();

    assert_eq!(num_indexed, 100);
    harness.assert_events(&[
        "bulk:testentity-a:50",
        "bulk:testentity-a:20",
        "bulk:testentity-b:50",
    ]);
    assert_eq!(harness.stored_ids("testentity-a").await.len(), 50);
    assert_eq!(harness.stored_ids("testentity-b").await.len(), 50);
}

#[test_log::test(tokio::test)]
async fn test_bulk_add_skips_rest_of_group_after_failure() {
    let harness = EntityRepositoryHarness::builder(grouped_test_entity_map())
        .fail_bulk_call("testentity-a", 1)
        .build();

    let num_indexed = harness.repo.bulk_add(&mixed_batch()).await.unwrap();

    assert_eq!(num_indexed, 50);
    harness.assert_events(&["bulk:testentity-a:50", "bulk:testentity-b:50"]);
    assert!(harness.stored_ids("testentity-a").await.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_bulk_add_uses_configured_chunk_size() {
    let harness = EntityRepositoryHarness::builder(fixed_test_entity_map())
        .config(IndexMappingConfig::new("", "", 2, 3).unwrap())
        .build();

    let entities: Vec<_> = (1..=5)
        .map(|i| TestEntity::created_on(format!("{i}"), 2024, 1, i))
        .collect();

    let num_indexed = harness.repo.bulk_add(&entities).await.unwrap();

    assert_eq!(num_indexed, 5);
    harness.assert_events(&[
        "bulk:testentity:2",
        "bulk:testentity:2",
        "bulk:testentity:1",
    ]);
}

#[test_log::test(tokio::test)]
async fn test_bulk_add_spreads_days_across_indices() {
    let harness = EntityRepositoryHarness::builder(daily_test_entity_map())
        .config(IndexMappingConfig::with_affixes("Pre", "Suf"))
        .build();

    let entities = vec![
        TestEntity::created_on("1", 2024, 1, 2),
        TestEntity::created_on("2", 2024, 1, 1),
        TestEntity::created_on("3", 2024, 1, 2),
    ];

    let num_indexed = harness.repo.bulk_add(&entities).await.unwrap();

    assert_eq!(num_indexed, 3);
    harness.assert_events(&[
        "bulk:pre-testentity-suf-2024.01.02:2",
        "bulk:pre-testentity-suf-2024.01.01:1",
    ]);
    assert_eq!(
        harness.stored_ids("pre-testentity-suf-2024.01.02").await,
        vec!["1".to_string(), "3".to_string()]
    );
}

#[test_log::test(tokio::test)]
async fn test_bulk_add_rejects_invalid_index_name_before_writing() {
    let harness = EntityRepositoryHarness::new(grouped_test_entity_map());

    let entities = vec![
        TestEntity::created_on("1", 2024, 1, 1).with_group_name("a"),
        TestEntity::created_on("2", 2024, 1, 1).with_group_name("no spaces allowed"),
    ];

    let result = harness.repo.bulk_add(&entities).await;

    assert!(
        matches!(
            result,
            Err(WriteEntityError::IndexName(IndexNameViolationError {
                violation: IndexNameViolation::ForbiddenCharacter { character: ' ' },
                ..
            }))
        ),
        "{result:?}"
    );
    harness.assert_events(&[]);
}

#[test_log::test(tokio::test)]
async fn test_bulk_add_rejects_null_id_before_writing() {
    let harness = EntityRepositoryHarness::new(fixed_test_entity_map());

    let entities = vec![
        FaultyTestEntity::new("f1"),
        FaultyTestEntity::without_id(),
        FaultyTestEntity::new("f3"),
    ];

    let result = harness.repo.bulk_add(&entities).await;

    assert!(
        matches!(result, Err(WriteEntityError::Internal(_))),
        "{result:?}"
    );
    harness.assert_events(&[]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
