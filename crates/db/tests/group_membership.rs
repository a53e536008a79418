//! Integration tests for group capacity and join-request resolution.
//!
//! These invariants live in the SQL itself (the guarded member INSERT and
//! the status-conditioned request UPDATEs), so they are exercised against a
//! real database.

use sqlx::PgPool;

use lingo_core::types::DbId;
use lingo_db::models::group::{CreateGroup, StudyGroup};
use lingo_db::models::user::{CreateUser, User};
use lingo_db::repositories::group_repo::ApprovalOutcome;
use lingo_db::repositories::{GroupRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$dGVzdA$dGVzdA".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn new_group(pool: &PgPool, owner_id: DbId, max_members: i32) -> StudyGroup {
    GroupRepo::create_with_owner(
        pool,
        owner_id,
        &CreateGroup {
            name: "Evening drills".to_string(),
            description: None,
            max_members: None,
            requires_approval: Some(true),
        },
        max_members,
    )
    .await
    .unwrap()
}

async fn member_count(pool: &PgPool, group_id: DbId) -> i64 {
    GroupRepo::members_with_names(pool, group_id)
        .await
        .unwrap()
        .len() as i64
}

// ---------------------------------------------------------------------------
// Test: the guarded insert refuses to overshoot max_members
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn join_stops_at_capacity(pool: PgPool) {
    let owner = new_user(&pool, "cap_owner").await;
    let first = new_user(&pool, "cap_first").await;
    let second = new_user(&pool, "cap_second").await;

    // Owner is enrolled at creation, so a max of 2 leaves one seat.
    let group = new_group(&pool, owner.id, 2).await;

    let joined = GroupRepo::join_group(&pool, group.id, first.id).await.unwrap();
    assert!(joined, "first join should take the last seat");

    let joined = GroupRepo::join_group(&pool, group.id, second.id).await.unwrap();
    assert!(!joined, "join into a full group should insert nothing");

    assert_eq!(member_count(&pool, group.id).await, 2);
    assert_eq!(
        GroupRepo::member_role(&pool, group.id, second.id).await.unwrap(),
        None
    );
}

// ---------------------------------------------------------------------------
// Test: joining twice violates uq_group_members_group_user
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_join_hits_the_unique_constraint(pool: PgPool) {
    let owner = new_user(&pool, "dup_owner").await;
    let joiner = new_user(&pool, "dup_joiner").await;
    let group = new_group(&pool, owner.id, 10).await;

    assert!(GroupRepo::join_group(&pool, group.id, joiner.id).await.unwrap());

    let err = GroupRepo::join_group(&pool, group.id, joiner.id)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(e) => {
            assert_eq!(e.constraint(), Some("uq_group_members_group_user"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: approval flips the request and enrolls the requester
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_enrolls_the_requester(pool: PgPool) {
    let owner = new_user(&pool, "appr_owner").await;
    let requester = new_user(&pool, "appr_requester").await;
    let group = new_group(&pool, owner.id, 10).await;

    let request = GroupRepo::create_join_request(&pool, group.id, requester.id)
        .await
        .unwrap();
    assert_eq!(request.status, "pending");

    let outcome = GroupRepo::approve_request(&pool, request.id).await.unwrap();
    assert_eq!(
        outcome,
        ApprovalOutcome::Approved {
            group_id: group.id,
            user_id: requester.id
        }
    );

    let resolved = GroupRepo::find_request(&pool, request.id).await.unwrap().unwrap();
    assert_eq!(resolved.status, "approved");
    assert!(resolved.resolved_at.is_some());

    assert_eq!(
        GroupRepo::member_role(&pool, group.id, requester.id).await.unwrap(),
        Some("member".to_string())
    );
}

// ---------------------------------------------------------------------------
// Test: a resolved request cannot be resolved again
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolved_requests_are_immutable(pool: PgPool) {
    let owner = new_user(&pool, "res_owner").await;
    let requester = new_user(&pool, "res_requester").await;
    let group = new_group(&pool, owner.id, 10).await;

    let request = GroupRepo::create_join_request(&pool, group.id, requester.id)
        .await
        .unwrap();
    GroupRepo::approve_request(&pool, request.id).await.unwrap();

    // A second approval is a no-op, and rejection cannot overwrite it.
    assert_eq!(
        GroupRepo::approve_request(&pool, request.id).await.unwrap(),
        ApprovalOutcome::AlreadyResolved
    );
    assert_eq!(GroupRepo::reject_request(&pool, request.id).await.unwrap(), None);

    let row = GroupRepo::find_request(&pool, request.id).await.unwrap().unwrap();
    assert_eq!(row.status, "approved");
}

// ---------------------------------------------------------------------------
// Test: approval of a request into a full group leaves it pending
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_into_a_full_group_rolls_back(pool: PgPool) {
    let owner = new_user(&pool, "full_owner").await;
    let filler = new_user(&pool, "full_filler").await;
    let requester = new_user(&pool, "full_requester").await;
    let group = new_group(&pool, owner.id, 2).await;

    let request = GroupRepo::create_join_request(&pool, group.id, requester.id)
        .await
        .unwrap();

    // The last seat goes to someone else while the request waits.
    assert!(GroupRepo::join_group(&pool, group.id, filler.id).await.unwrap());

    let outcome = GroupRepo::approve_request(&pool, request.id).await.unwrap();
    assert_eq!(
        outcome,
        ApprovalOutcome::GroupFull {
            group_id: group.id,
            user_id: requester.id
        }
    );

    // The whole transaction rolled back: still pending, still not a member.
    let row = GroupRepo::find_request(&pool, request.id).await.unwrap().unwrap();
    assert_eq!(row.status, "pending");
    assert!(row.resolved_at.is_none());
    assert_eq!(
        GroupRepo::member_role(&pool, group.id, requester.id).await.unwrap(),
        None
    );
    assert_eq!(member_count(&pool, group.id).await, 2);
}

// ---------------------------------------------------------------------------
// Test: one pending request per user; a rejected one frees the slot
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn one_pending_request_per_user(pool: PgPool) {
    let owner = new_user(&pool, "pend_owner").await;
    let requester = new_user(&pool, "pend_requester").await;
    let group = new_group(&pool, owner.id, 10).await;

    let request = GroupRepo::create_join_request(&pool, group.id, requester.id)
        .await
        .unwrap();

    let err = GroupRepo::create_join_request(&pool, group.id, requester.id)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(e) => {
            assert_eq!(e.constraint(), Some("uq_group_join_requests_pending"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }

    // Once rejected, the partial index no longer blocks a retry.
    GroupRepo::reject_request(&pool, request.id).await.unwrap();
    let retry = GroupRepo::create_join_request(&pool, group.id, requester.id).await;
    assert!(retry.is_ok(), "a resolved request should not block a new one");
}
