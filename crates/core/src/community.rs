//! Community post, comment, and report rules.

use crate::error::CoreError;
use crate::types::DbId;

pub const POST_TITLE_MAX: usize = 200;
pub const POST_CONTENT_MAX: usize = 5000;
pub const COMMENT_CONTENT_MAX: usize = 1000;
pub const REPORT_REASON_MAX: usize = 500;

pub fn validate_post_fields(title: &str, content: &str) -> Result<(), CoreError> {
    let title_len = title.trim().chars().count();
    if title_len == 0 || title_len > POST_TITLE_MAX {
        return Err(CoreError::Validation(format!(
            "Post title must be between 1 and {POST_TITLE_MAX} characters"
        )));
    }
    let content_len = content.trim().chars().count();
    if content_len == 0 || content_len > POST_CONTENT_MAX {
        return Err(CoreError::Validation(format!(
            "Post content must be between 1 and {POST_CONTENT_MAX} characters"
        )));
    }
    Ok(())
}

pub fn validate_comment_content(content: &str) -> Result<(), CoreError> {
    let len = content.trim().chars().count();
    if len == 0 || len > COMMENT_CONTENT_MAX {
        return Err(CoreError::Validation(format!(
            "Comment content must be between 1 and {COMMENT_CONTENT_MAX} characters"
        )));
    }
    Ok(())
}

/// What a report points at. A report targets a post or a comment, never
/// both and never neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTarget {
    Post(DbId),
    Comment(DbId),
}

pub fn resolve_report_target(
    post_id: Option<DbId>,
    comment_id: Option<DbId>,
) -> Result<ReportTarget, CoreError> {
    match (post_id, comment_id) {
        (Some(post), None) => Ok(ReportTarget::Post(post)),
        (None, Some(comment)) => Ok(ReportTarget::Comment(comment)),
        _ => Err(CoreError::Validation(
            "Exactly one of post_id or comment_id is required".into(),
        )),
    }
}

pub fn validate_report_reason(reason: &str) -> Result<(), CoreError> {
    let len = reason.trim().chars().count();
    if len == 0 || len > REPORT_REASON_MAX {
        return Err(CoreError::Validation(format!(
            "Report reason must be between 1 and {REPORT_REASON_MAX} characters"
        )));
    }
    Ok(())
}
