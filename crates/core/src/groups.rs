//! Study-group domain rules.

use crate::error::CoreError;

/// Group creator. Exactly one per group; set when the group is created.
pub const MEMBER_ROLE_OWNER: &str = "owner";
/// Ordinary member admitted by the owner or by joining an open group.
pub const MEMBER_ROLE_MEMBER: &str = "member";

/// Join-request lifecycle states.
pub const JOIN_STATUS_PENDING: &str = "pending";
pub const JOIN_STATUS_APPROVED: &str = "approved";
pub const JOIN_STATUS_REJECTED: &str = "rejected";

/// Membership capacity bounds.
pub const MIN_GROUP_MEMBERS: i32 = 2;
pub const MAX_GROUP_MEMBERS: i32 = 50;
pub const DEFAULT_GROUP_MEMBERS: i32 = 10;

pub const GROUP_NAME_MIN: usize = 2;
pub const GROUP_NAME_MAX: usize = 100;
pub const GROUP_DESCRIPTION_MAX: usize = 500;
pub const GROUP_MESSAGE_MAX: usize = 1000;

/// Validate the client-supplied fields of a group create or update.
pub fn validate_group_fields(
    name: &str,
    description: Option<&str>,
    max_members: i32,
) -> Result<(), CoreError> {
    let name_len = name.trim().chars().count();
    if name_len < GROUP_NAME_MIN || name_len > GROUP_NAME_MAX {
        return Err(CoreError::Validation(format!(
            "Group name must be between {GROUP_NAME_MIN} and {GROUP_NAME_MAX} characters"
        )));
    }
    if let Some(desc) = description {
        if desc.chars().count() > GROUP_DESCRIPTION_MAX {
            return Err(CoreError::Validation(format!(
                "Group description must be at most {GROUP_DESCRIPTION_MAX} characters"
            )));
        }
    }
    if !(MIN_GROUP_MEMBERS..=MAX_GROUP_MEMBERS).contains(&max_members) {
        return Err(CoreError::Validation(format!(
            "Group capacity must be between {MIN_GROUP_MEMBERS} and {MAX_GROUP_MEMBERS} members"
        )));
    }
    Ok(())
}

/// Validate a group chat message body.
pub fn validate_message_content(content: &str) -> Result<(), CoreError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Message content must not be empty".into(),
        ));
    }
    if trimmed.chars().count() > GROUP_MESSAGE_MAX {
        return Err(CoreError::Validation(format!(
            "Message content must be at most {GROUP_MESSAGE_MAX} characters"
        )));
    }
    Ok(())
}
