//! Notification text for each submission event.

use chrono::{DateTime, Utc};

use crate::backend::notify::OutgoingEmail;
use crate::shared::SubmissionFields;

/// Human-readable form of the editing deadline
pub fn format_deadline(deadline: DateTime<Utc>) -> String {
    deadline.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Confirmation sent to the submitter after a successful submit
pub fn confirmation(
    fields: &SubmissionFields,
    unique_id: i64,
    edit_link: &str,
    deadline: DateTime<Utc>,
) -> OutgoingEmail {
    OutgoingEmail {
        to: fields.submitter_email.clone(),
        subject: "Submission Confirmation".to_string(),
        body: format!(
            "Thank you for your submission! Your unique ID is {}.\n\
             Edit your submission here: {}\n\
             Editing deadline: {}.",
            unique_id,
            edit_link,
            format_deadline(deadline)
        ),
    }
}

/// Alert sent to the conference admin for every new submission
pub fn admin_alert(fields: &SubmissionFields, unique_id: i64, admin_email: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: admin_email.to_string(),
        subject: "New Submission Received".to_string(),
        body: format!(
            "A new abstract submission has been received:\n\
             ID: {}\n\
             Submitter: {}\n\
             Title: {}\n\
             Type: {}\n\
             Check the admin dashboard for more details.",
            unique_id, fields.submitter_name, fields.abstract_title, fields.abstract_type
        ),
    }
}

/// Notice sent to the submitter after an edit
pub fn update_notice(fields: &SubmissionFields, unique_id: i64) -> OutgoingEmail {
    OutgoingEmail {
        to: fields.submitter_email.clone(),
        subject: "Submission Updated".to_string(),
        body: format!(
            "Your submission with ID {} has been successfully updated.",
            unique_id
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::AbstractType;
    use chrono::TimeZone;

    fn fields() -> SubmissionFields {
        SubmissionFields {
            submitter_name: "Ada".into(),
            submitter_email: "ada@example.com".into(),
            abstract_title: "Engines".into(),
            abstract_type: AbstractType::TechnicalPaper,
            theme: "Innovation".into(),
            company: "C".into(),
            discipline: "D".into(),
            author_names: "Ada".into(),
            abstract_content: "...".into(),
        }
    }

    #[test]
    fn test_confirmation_mentions_id_link_and_deadline() {
        let deadline = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let email = confirmation(&fields(), 12, "http://host/edit?id=12", deadline);
        assert_eq!(email.to, "ada@example.com");
        assert!(email.body.contains("unique ID is 12"));
        assert!(email.body.contains("http://host/edit?id=12"));
        assert!(email.body.contains("2025-01-01 00:00 UTC"));
    }

    #[test]
    fn test_admin_alert_goes_to_admin() {
        let email = admin_alert(&fields(), 3, "admin@example.com");
        assert_eq!(email.to, "admin@example.com");
        assert!(email.body.contains("Submitter: Ada"));
        assert!(email.body.contains("Type: technical-paper"));
    }

    #[test]
    fn test_update_notice() {
        let email = update_notice(&fields(), 9);
        assert_eq!(email.subject, "Submission Updated");
        assert!(email.body.contains("ID 9"));
    }
}
