//! Repository integration tests against an in-memory database

use chrono::{Duration, Utc};
use solhub_interfaces::{
    DatabaseError, NewApiKey, NewParameter, NewSolution, ParameterFilters, RepositoryFactory,
    UpdateParameter, UpdateSolution,
};
use solhub_storage::testing::in_memory_factory;

fn new_solution(name: &str) -> NewSolution {
    NewSolution {
        name: name.to_string(),
        description: Some(format!("{} solution", name)),
    }
}

fn new_parameter(key: &str, tags: &[&str]) -> NewParameter {
    NewParameter {
        name: None,
        key: key.to_string(),
        value: Some(format!("value-of-{}", key)),
        description: None,
        is_secret: false,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn new_api_key(solution_id: i32, name: &str, hash: &str) -> NewApiKey {
    NewApiKey {
        solution_id,
        key_name: name.to_string(),
        key_hash: hash.to_string(),
        key_prefix: "sol_preview1".to_string(),
        expires_at: None,
    }
}

#[tokio::test]
async fn solution_crud_and_name_conflict() {
    let factory = in_memory_factory().await;
    let repo = factory.solution_repository();

    let created = repo.create(new_solution("billing")).await.unwrap();
    assert_eq!(created.name, "billing");
    assert_eq!(created.parameter_count, 0);

    let fetched = repo.find_by_id(created.id.as_i32().unwrap()).await.unwrap().unwrap();
    assert_eq!(fetched.uuid, created.uuid);

    let err = repo.create(new_solution("billing")).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict { .. }));
    assert!(err.to_string().contains("billing"));

    let updated = repo
        .update(
            created.id.as_i32().unwrap(),
            UpdateSolution {
                name: Some("billing-v2".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "billing-v2");

    assert!(repo.find_by_name("billing").await.unwrap().is_none());
    assert!(repo.find_by_name("billing-v2").await.unwrap().is_some());
}

#[tokio::test]
async fn assignment_is_idempotent_both_ways() {
    let factory = in_memory_factory().await;
    let solutions = factory.solution_repository();
    let parameters = factory.parameter_repository();

    let solution = solutions.create(new_solution("billing")).await.unwrap();
    let parameter = parameters.create(new_parameter("DB_HOST", &[])).await.unwrap();
    let sid = solution.id.as_i32().unwrap();
    let pid = parameter.id.as_i32().unwrap();

    solutions.assign_parameter(sid, pid).await.unwrap();
    solutions.assign_parameter(sid, pid).await.unwrap();
    assert_eq!(solutions.parameter_count(sid).await.unwrap(), 1);

    solutions.unassign_parameter(sid, pid).await.unwrap();
    solutions.unassign_parameter(sid, pid).await.unwrap();
    assert_eq!(solutions.parameter_count(sid).await.unwrap(), 0);
}

#[tokio::test]
async fn assign_unknown_ids_are_not_found() {
    let factory = in_memory_factory().await;
    let solutions = factory.solution_repository();

    let err = solutions.assign_parameter(999, 1).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound { .. }));

    let solution = solutions.create(new_solution("billing")).await.unwrap();
    let err = solutions
        .assign_parameter(solution.id.as_i32().unwrap(), 999)
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound { .. }));
}

#[tokio::test]
async fn solution_delete_guard_blocks_until_unassigned() {
    let factory = in_memory_factory().await;
    let solutions = factory.solution_repository();
    let parameters = factory.parameter_repository();

    let solution = solutions.create(new_solution("billing")).await.unwrap();
    let parameter = parameters.create(new_parameter("DB_HOST", &[])).await.unwrap();
    let sid = solution.id.as_i32().unwrap();
    let pid = parameter.id.as_i32().unwrap();
    solutions.assign_parameter(sid, pid).await.unwrap();

    let err = solutions.delete(sid).await.unwrap_err();
    match err {
        DatabaseError::Conflict { message } => assert!(message.contains('1')),
        other => panic!("expected conflict, got {other:?}"),
    }

    solutions.unassign_parameter(sid, pid).await.unwrap();
    solutions.delete(sid).await.unwrap();
    assert!(solutions.find_by_id(sid).await.unwrap().is_none());

    // Parameter survives the solution
    assert!(parameters.find_by_id(pid).await.unwrap().is_some());
}

#[tokio::test]
async fn parameter_tags_are_created_or_linked() {
    let factory = in_memory_factory().await;
    let parameters = factory.parameter_repository();
    let tags = factory.tag_repository();

    tags.create("infra").await.unwrap();

    let parameter = parameters
        .create(new_parameter("DB_HOST", &["infra", "database"]))
        .await
        .unwrap();
    let names: Vec<&str> = parameter.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["database", "infra"]);

    // "infra" was linked, not duplicated
    assert_eq!(tags.find_all().await.unwrap().len(), 2);

    // A second parameter reusing a tag shares the same row
    let second = parameters
        .create(new_parameter("DB_PORT", &["database"]))
        .await
        .unwrap();
    assert_eq!(second.tags[0].id, parameter.tags[0].id);
}

#[tokio::test]
async fn parameter_update_replaces_tag_set() {
    let factory = in_memory_factory().await;
    let parameters = factory.parameter_repository();

    let parameter = parameters
        .create(new_parameter("DB_HOST", &["infra", "database"]))
        .await
        .unwrap();
    let pid = parameter.id.as_i32().unwrap();

    let updated = parameters
        .update(
            pid,
            UpdateParameter {
                tags: Some(vec!["networking".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let names: Vec<&str> = updated.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["networking"]);

    // tags: None leaves the set untouched
    let untouched = parameters
        .update(
            pid,
            UpdateParameter {
                value: Some("db.internal".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(untouched.tags.len(), 1);
    assert_eq!(untouched.value.as_deref(), Some("db.internal"));
}

#[tokio::test]
async fn parameter_key_conflict() {
    let factory = in_memory_factory().await;
    let parameters = factory.parameter_repository();

    parameters.create(new_parameter("DB_HOST", &[])).await.unwrap();
    let err = parameters.create(new_parameter("DB_HOST", &[])).await.unwrap_err();
    match err {
        DatabaseError::Conflict { message } => assert!(message.contains("DB_HOST")),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn parameter_delete_detaches_everywhere() {
    let factory = in_memory_factory().await;
    let solutions = factory.solution_repository();
    let parameters = factory.parameter_repository();
    let tags = factory.tag_repository();

    let solution = solutions.create(new_solution("billing")).await.unwrap();
    let parameter = parameters
        .create(new_parameter("DB_HOST", &["infra"]))
        .await
        .unwrap();
    let sid = solution.id.as_i32().unwrap();
    let pid = parameter.id.as_i32().unwrap();
    solutions.assign_parameter(sid, pid).await.unwrap();

    parameters.delete(pid).await.unwrap();

    assert_eq!(solutions.parameter_count(sid).await.unwrap(), 0);
    // The tag itself survives
    assert!(tags.find_by_name("infra").await.unwrap().is_some());
    // And the solution can now be deleted
    solutions.delete(sid).await.unwrap();
}

#[tokio::test]
async fn search_filters_compose() {
    let factory = in_memory_factory().await;
    let solutions = factory.solution_repository();
    let parameters = factory.parameter_repository();

    let solution = solutions.create(new_solution("billing")).await.unwrap();
    let sid = solution.id.as_i32().unwrap();

    let host = parameters
        .create(new_parameter("DB_HOST", &["database"]))
        .await
        .unwrap();
    let port = parameters
        .create(new_parameter("DB_PORT", &["database"]))
        .await
        .unwrap();
    let mut secret = new_parameter("API_TOKEN", &["auth"]);
    secret.is_secret = true;
    let token = parameters.create(secret).await.unwrap();

    solutions
        .assign_parameter(sid, host.id.as_i32().unwrap())
        .await
        .unwrap();
    solutions
        .assign_parameter(sid, token.id.as_i32().unwrap())
        .await
        .unwrap();

    let by_solution = parameters
        .search(ParameterFilters {
            solution_id: Some(solution.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    let keys: Vec<&str> = by_solution.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["API_TOKEN", "DB_HOST"]);

    let by_tag = parameters
        .search(ParameterFilters {
            tags: Some(vec!["database".to_string()]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_tag.len(), 2);

    let by_fragment = parameters
        .search(ParameterFilters {
            key_contains: Some("PORT".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_fragment.len(), 1);
    assert_eq!(by_fragment[0].key, "DB_PORT");

    let secrets = parameters
        .search(ParameterFilters {
            is_secret: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(secrets.len(), 1);
    assert_eq!(secrets[0].key, "API_TOKEN");

    let combined = parameters
        .search(ParameterFilters {
            solution_id: Some(solution.id.clone()),
            is_secret: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].key, "DB_HOST");

    let unassigned = parameters.find_unassigned().await.unwrap();
    assert_eq!(unassigned.len(), 1);
    assert_eq!(unassigned[0].id, port.id);
}

#[tokio::test]
async fn tag_conflicts_and_cascade() {
    let factory = in_memory_factory().await;
    let parameters = factory.parameter_repository();
    let tags = factory.tag_repository();

    let tag = tags.create("infra").await.unwrap();
    let err = tags.create("infra").await.unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict { .. }));

    let err = tags.create("   ").await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));

    let parameter = parameters
        .create(new_parameter("DB_HOST", &["infra"]))
        .await
        .unwrap();

    tags.delete(tag.id.as_i32().unwrap()).await.unwrap();
    let refreshed = parameters
        .find_by_id(parameter.id.as_i32().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(refreshed.tags.is_empty());
}

#[tokio::test]
async fn api_key_validity_rules() {
    let factory = in_memory_factory().await;
    let solutions = factory.solution_repository();
    let api_keys = factory.api_key_repository();

    let solution = solutions.create(new_solution("billing")).await.unwrap();
    let sid = solution.id.as_i32().unwrap();

    let key = api_keys
        .create_api_key(new_api_key(sid, "ci", "hash-active"))
        .await
        .unwrap();
    assert!(key.is_active);
    assert!(key.last_used.is_none());

    // Valid lookup
    let found = api_keys.find_valid_by_hash("hash-active").await.unwrap();
    assert!(found.is_some());

    // Unknown digest
    assert!(api_keys.find_valid_by_hash("hash-unknown").await.unwrap().is_none());

    // Disabled key is rejected
    api_keys.set_active(key.id.as_i32().unwrap(), false).await.unwrap();
    assert!(api_keys.find_valid_by_hash("hash-active").await.unwrap().is_none());

    // Re-enabling restores validity
    api_keys.set_active(key.id.as_i32().unwrap(), true).await.unwrap();
    assert!(api_keys.find_valid_by_hash("hash-active").await.unwrap().is_some());

    // Expired key is rejected lazily
    let mut expired = new_api_key(sid, "old", "hash-expired");
    expired.expires_at = Some(Utc::now() - Duration::hours(1));
    api_keys.create_api_key(expired).await.unwrap();
    assert!(api_keys.find_valid_by_hash("hash-expired").await.unwrap().is_none());

    // Deleted key is rejected
    api_keys.delete(key.id.as_i32().unwrap()).await.unwrap();
    assert!(api_keys.find_valid_by_hash("hash-active").await.unwrap().is_none());
}

#[tokio::test]
async fn api_key_listing_and_touch() {
    let factory = in_memory_factory().await;
    let solutions = factory.solution_repository();
    let api_keys = factory.api_key_repository();

    let solution = solutions.create(new_solution("billing")).await.unwrap();
    let sid = solution.id.as_i32().unwrap();

    let err = api_keys.find_by_solution(999).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound { .. }));

    let first = api_keys
        .create_api_key(new_api_key(sid, "ci", "hash-1"))
        .await
        .unwrap();

    let listed = api_keys.find_by_solution(sid).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].key_name, "ci");
    assert_eq!(listed[0].preview(), "sol_preview1...");

    api_keys.touch_last_used(first.id.as_i32().unwrap()).await.unwrap();
    let refreshed = api_keys
        .find_by_id(first.id.as_i32().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(refreshed.last_used.is_some());
}

#[tokio::test]
async fn deleting_solution_removes_its_keys() {
    let factory = in_memory_factory().await;
    let solutions = factory.solution_repository();
    let api_keys = factory.api_key_repository();

    let solution = solutions.create(new_solution("billing")).await.unwrap();
    let sid = solution.id.as_i32().unwrap();
    api_keys
        .create_api_key(new_api_key(sid, "ci", "hash-1"))
        .await
        .unwrap();

    solutions.delete(sid).await.unwrap();
    assert!(api_keys.find_valid_by_hash("hash-1").await.unwrap().is_none());
}

#[tokio::test]
async fn bulk_delete_skips_missing_ids() {
    let factory = in_memory_factory().await;
    let parameters = factory.parameter_repository();

    let a = parameters.create(new_parameter("A", &[])).await.unwrap();
    let b = parameters.create(new_parameter("B", &["infra"])).await.unwrap();
    let aid = a.id.as_i32().unwrap();
    let bid = b.id.as_i32().unwrap();

    let affected = parameters.bulk_delete(&[aid, bid, 9999]).await.unwrap();
    assert_eq!(affected, 2);
    assert!(parameters.find_by_id(aid).await.unwrap().is_none());
    assert!(parameters.find_by_id(bid).await.unwrap().is_none());

    assert_eq!(parameters.bulk_delete(&[]).await.unwrap(), 0);
}

#[tokio::test]
async fn bulk_tag_links_existing_parameters_only() {
    let factory = in_memory_factory().await;
    let parameters = factory.parameter_repository();
    let tags = factory.tag_repository();

    let a = parameters.create(new_parameter("A", &["infra"])).await.unwrap();
    let b = parameters.create(new_parameter("B", &[])).await.unwrap();
    let aid = a.id.as_i32().unwrap();
    let bid = b.id.as_i32().unwrap();

    // "infra" is already linked to A; "audit" does not exist yet
    let touched = parameters
        .bulk_tag(&[aid, bid, 9999], &["infra".to_string(), "audit".to_string()])
        .await
        .unwrap();
    assert_eq!(touched, 2);

    for id in [aid, bid] {
        let names: Vec<String> = parameters
            .find_by_id(id)
            .await
            .unwrap()
            .unwrap()
            .tags
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["audit".to_string(), "infra".to_string()]);
    }
    assert!(tags.find_by_name("audit").await.unwrap().is_some());
}

#[tokio::test]
async fn bulk_untag_removes_only_named_links() {
    let factory = in_memory_factory().await;
    let parameters = factory.parameter_repository();
    let tags = factory.tag_repository();

    let a = parameters
        .create(new_parameter("A", &["infra", "audit"]))
        .await
        .unwrap();
    let b = parameters.create(new_parameter("B", &["infra"])).await.unwrap();
    let aid = a.id.as_i32().unwrap();
    let bid = b.id.as_i32().unwrap();

    let removed = parameters
        .bulk_untag(&[aid, bid], &["infra".to_string(), "ghost".to_string()])
        .await
        .unwrap();
    assert_eq!(removed, 2);

    let a_tags: Vec<String> = parameters
        .find_by_id(aid)
        .await
        .unwrap()
        .unwrap()
        .tags
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(a_tags, vec!["audit".to_string()]);
    assert!(parameters.find_by_id(bid).await.unwrap().unwrap().tags.is_empty());

    // The tag rows themselves survive, only the links go
    assert!(tags.find_by_name("infra").await.unwrap().is_some());
}
