//! Integration tests for challenge progress and the submission workflow.
//!
//! The progress clamp lives inside the upsert and the submission state
//! machine inside status-conditioned transactions, so both are exercised
//! against a real database.

use sqlx::PgPool;

use lingo_core::types::DbId;
use lingo_db::models::challenge::{CreateChallenge, CreateSubmission, GroupChallenge, UpdateChallenge};
use lingo_db::models::group::CreateGroup;
use lingo_db::models::user::{CreateUser, User};
use lingo_db::repositories::{ChallengeRepo, GroupRepo, UserRepo};

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

/// Create an owner, a group, and one enrolled member.
async fn group_with_member(pool: &PgPool, prefix: &str) -> (User, User, DbId) {
    let owner = new_user(pool, &format!("{prefix}_owner")).await;
    let member = new_user(pool, &format!("{prefix}_member")).await;
    let group = GroupRepo::create_with_owner(
        pool,
        owner.id,
        &CreateGroup {
            name: "Grammar grind".to_string(),
            description: None,
            max_members: None,
            requires_approval: Some(false),
        },
        10,
    )
    .await
    .unwrap();
    assert!(GroupRepo::join_group(pool, group.id, member.id).await.unwrap());
    (owner, member, group.id)
}

async fn new_challenge(
    pool: &PgPool,
    group_id: DbId,
    created_by: DbId,
    target_value: i32,
) -> GroupChallenge {
    ChallengeRepo::create(
        pool,
        group_id,
        created_by,
        &CreateChallenge {
            title: "Drill streak".to_string(),
            description: Some("One set per day".to_string()),
            challenge_type: "grammar".to_string(),
            target_value,
            duration_days: None,
        },
        7,
    )
    .await
    .unwrap()
}

fn proof(content: &str) -> CreateSubmission {
    CreateSubmission {
        proof_content: content.to_string(),
        proof_image_url: None,
    }
}

async fn participant_state(
    pool: &PgPool,
    challenge_id: DbId,
    user_id: DbId,
) -> Option<(i32, String, bool)> {
    ChallengeRepo::leaderboard(pool, challenge_id)
        .await
        .unwrap()
        .into_iter()
        .find(|e| e.user_id == user_id)
        .map(|e| (e.current_value, e.status, e.completed_at.is_some()))
}

// ---------------------------------------------------------------------------
// Test: progress accumulates but never exceeds the target
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_clamps_to_the_target(pool: PgPool) {
    let (owner, member, group_id) = group_with_member(&pool, "clamp").await;
    let challenge = new_challenge(&pool, group_id, owner.id, 10).await;

    let credited = ChallengeRepo::log_progress(&pool, member.id, "grammar", 7)
        .await
        .unwrap();
    assert_eq!(credited, 1);
    assert_eq!(
        participant_state(&pool, challenge.id, member.id).await,
        Some((7, "in_progress".to_string(), false))
    );

    // Crediting past the target pins the value at the target.
    ChallengeRepo::log_progress(&pool, member.id, "grammar", 7)
        .await
        .unwrap();
    let (value, _, _) = participant_state(&pool, challenge.id, member.id)
        .await
        .unwrap();
    assert_eq!(value, 10, "progress must not exceed the target");
}

// ---------------------------------------------------------------------------
// Test: the very first credit is clamped as well
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_first_credit_is_clamped(pool: PgPool) {
    let (owner, member, group_id) = group_with_member(&pool, "first").await;
    let challenge = new_challenge(&pool, group_id, owner.id, 10).await;

    ChallengeRepo::log_progress(&pool, member.id, "grammar", 50)
        .await
        .unwrap();
    let (value, _, _) = participant_state(&pool, challenge.id, member.id)
        .await
        .unwrap();
    assert_eq!(value, 10);
}

// ---------------------------------------------------------------------------
// Test: progress only reaches matching live challenges in the user's groups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_ignores_other_types_and_foreign_groups(pool: PgPool) {
    let (owner, member, group_id) = group_with_member(&pool, "scope").await;
    new_challenge(&pool, group_id, owner.id, 10).await;

    // Wrong type: nothing credited.
    let credited = ChallengeRepo::log_progress(&pool, member.id, "conversation", 5)
        .await
        .unwrap();
    assert_eq!(credited, 0);

    // Non-member: nothing credited either.
    let outsider = new_user(&pool, "scope_outsider").await;
    let credited = ChallengeRepo::log_progress(&pool, outsider.id, "grammar", 5)
        .await
        .unwrap();
    assert_eq!(credited, 0);
}

// ---------------------------------------------------------------------------
// Test: approval grants completion credit in the same transaction
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_grants_completion(pool: PgPool) {
    let (owner, member, group_id) = group_with_member(&pool, "grant").await;
    let challenge = new_challenge(&pool, group_id, owner.id, 10).await;

    let submission = ChallengeRepo::create_submission(&pool, challenge.id, member.id, &proof("done"))
        .await
        .unwrap();
    assert_eq!(submission.status, "pending");

    let processed = ChallengeRepo::process_submission(&pool, submission.id, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(processed.status, "approved");
    assert!(processed.resolved_at.is_some());

    let (_, status, completed) = participant_state(&pool, challenge.id, member.id)
        .await
        .unwrap();
    assert_eq!(status, "completed");
    assert!(completed, "approval should stamp completed_at");
}

// ---------------------------------------------------------------------------
// Test: a processed submission cannot be processed again
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn processing_is_single_shot(pool: PgPool) {
    let (owner, member, group_id) = group_with_member(&pool, "once").await;
    let challenge = new_challenge(&pool, group_id, owner.id, 10).await;
    let submission = ChallengeRepo::create_submission(&pool, challenge.id, member.id, &proof("done"))
        .await
        .unwrap();

    ChallengeRepo::process_submission(&pool, submission.id, false)
        .await
        .unwrap()
        .unwrap();

    // Neither a repeat rejection nor a late approval goes through.
    assert!(ChallengeRepo::process_submission(&pool, submission.id, false)
        .await
        .unwrap()
        .is_none());
    assert!(ChallengeRepo::process_submission(&pool, submission.id, true)
        .await
        .unwrap()
        .is_none());

    // Rejection never touched the participant row.
    assert_eq!(participant_state(&pool, challenge.id, member.id).await, None);
}

// ---------------------------------------------------------------------------
// Test: editing an approved submission resets it and revokes the credit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn editing_revokes_completion_credit(pool: PgPool) {
    let (owner, member, group_id) = group_with_member(&pool, "edit").await;
    let challenge = new_challenge(&pool, group_id, owner.id, 10).await;
    let submission = ChallengeRepo::create_submission(&pool, challenge.id, member.id, &proof("v1"))
        .await
        .unwrap();
    ChallengeRepo::process_submission(&pool, submission.id, true)
        .await
        .unwrap()
        .unwrap();

    let reset = ChallengeRepo::reset_submission(&pool, submission.id, &proof("v2"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reset.status, "pending");
    assert_eq!(reset.proof_content, "v2");
    assert!(reset.resolved_at.is_none());

    let (_, status, completed) = participant_state(&pool, challenge.id, member.id)
        .await
        .unwrap();
    assert_eq!(status, "in_progress");
    assert!(!completed, "revocation should clear completed_at");
}

// ---------------------------------------------------------------------------
// Test: deleting an approved submission revokes the credit too
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_revokes_completion_credit(pool: PgPool) {
    let (owner, member, group_id) = group_with_member(&pool, "del").await;
    let challenge = new_challenge(&pool, group_id, owner.id, 10).await;
    let submission = ChallengeRepo::create_submission(&pool, challenge.id, member.id, &proof("done"))
        .await
        .unwrap();
    ChallengeRepo::process_submission(&pool, submission.id, true)
        .await
        .unwrap()
        .unwrap();

    assert!(ChallengeRepo::delete_submission(&pool, submission.id)
        .await
        .unwrap());
    assert!(ChallengeRepo::find_submission(&pool, submission.id)
        .await
        .unwrap()
        .is_none());

    let (_, status, completed) = participant_state(&pool, challenge.id, member.id)
        .await
        .unwrap();
    assert_eq!(status, "in_progress");
    assert!(!completed);
}

// ---------------------------------------------------------------------------
// Test: one live submission per participant; rejection frees the slot
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn one_live_submission_per_participant(pool: PgPool) {
    let (owner, member, group_id) = group_with_member(&pool, "live").await;
    let challenge = new_challenge(&pool, group_id, owner.id, 10).await;
    let submission = ChallengeRepo::create_submission(&pool, challenge.id, member.id, &proof("first"))
        .await
        .unwrap();

    let err = ChallengeRepo::create_submission(&pool, challenge.id, member.id, &proof("second"))
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(e) => {
            assert_eq!(e.constraint(), Some("uq_challenge_submissions_open"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }

    // A rejected submission no longer occupies the slot.
    ChallengeRepo::process_submission(&pool, submission.id, false)
        .await
        .unwrap()
        .unwrap();
    let retry = ChallengeRepo::create_submission(&pool, challenge.id, member.id, &proof("again")).await;
    assert!(retry.is_ok(), "a rejected submission should not block a new one");
}

// ---------------------------------------------------------------------------
// Test: an explicit null clears the description, an absent field keeps it
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_distinguishes_null_from_absent_description(pool: PgPool) {
    let (owner, _member, group_id) = group_with_member(&pool, "desc").await;
    let challenge = new_challenge(&pool, group_id, owner.id, 10).await;
    assert!(challenge.description.is_some());

    // Absent field: description untouched.
    let updated = ChallengeRepo::update(
        &pool,
        challenge.id,
        &UpdateChallenge {
            title: Some("Drill streak II".to_string()),
            description: None,
            target_value: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.title, "Drill streak II");
    assert_eq!(updated.description, challenge.description);

    // Explicit null: description cleared.
    let cleared = ChallengeRepo::update(
        &pool,
        challenge.id,
        &UpdateChallenge {
            title: None,
            description: Some(None),
            target_value: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.title, "Drill streak II");
}
