//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-step state changes
//! (group creation, join approval, submission processing, point
//! transactions) run inside a single transaction.

pub mod attendance_repo;
pub mod challenge_repo;
pub mod community_repo;
pub mod faq_repo;
pub mod grammar_repo;
pub mod group_repo;
pub mod learning_log_repo;
pub mod level_test_repo;
pub mod notice_repo;
pub mod notification_repo;
pub mod plan_repo;
pub mod point_repo;
pub mod pronunciation_repo;
pub mod session_repo;
pub mod user_repo;
pub mod vocabulary_repo;

pub use attendance_repo::AttendanceRepo;
pub use challenge_repo::ChallengeRepo;
pub use community_repo::CommunityRepo;
pub use faq_repo::FaqRepo;
pub use grammar_repo::GrammarRepo;
pub use group_repo::GroupRepo;
pub use learning_log_repo::LearningLogRepo;
pub use level_test_repo::LevelTestRepo;
pub use notice_repo::NoticeRepo;
pub use notification_repo::NotificationRepo;
pub use plan_repo::PlanRepo;
pub use point_repo::PointRepo;
pub use pronunciation_repo::PronunciationRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use vocabulary_repo::VocabularyRepo;
