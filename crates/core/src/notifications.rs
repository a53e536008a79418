//! Notification kinds and message templates.
//!
//! Notifications are only ever created by the server in reaction to domain
//! events, so the wording lives here rather than in handlers.

/// A learning plan was created for the user.
pub const KIND_STUDY_START: &str = "study_start";
/// Study-group membership events.
pub const KIND_GROUP: &str = "group";
/// Challenge submission events.
pub const KIND_CHALLENGE: &str = "challenge";

/// Content for the notification raised when a plan is generated.
pub fn plan_created_content(estimated_days: i32) -> String {
    format!("Your new learning plan is ready. Estimated duration: {estimated_days} days.")
}

/// Content for a resolved join request.
pub fn join_resolved_content(group_name: &str, approved: bool) -> String {
    if approved {
        format!("Your request to join '{group_name}' was approved.")
    } else {
        format!("Your request to join '{group_name}' was declined.")
    }
}

/// Content for a resolved challenge submission.
pub fn submission_resolved_content(challenge_title: &str, approved: bool) -> String {
    if approved {
        format!("Your submission for '{challenge_title}' was approved. Challenge complete!")
    } else {
        format!("Your submission for '{challenge_title}' was rejected.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_mention_the_subject() {
        assert!(plan_created_content(30).contains("30 days"));
        assert!(join_resolved_content("Night Owls", true).contains("Night Owls"));
        assert!(join_resolved_content("Night Owls", false).contains("declined"));
        assert!(submission_resolved_content("Daily Drill", true).contains("complete"));
        assert!(submission_resolved_content("Daily Drill", false).contains("rejected"));
    }
}
