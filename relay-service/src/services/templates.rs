//! Email templates for the contact flow.

use askama::Template;

use super::providers::EmailMessage;
use crate::models::ContactSubmission;

pub const ACKNOWLEDGMENT_SUBJECT: &str = "Thank you for contacting me";

#[derive(Template)]
#[template(path = "email/acknowledgment.html")]
struct AcknowledgmentHtml<'a> {
    greeting: &'a str,
}

#[derive(Template)]
#[template(path = "email/acknowledgment.txt")]
struct AcknowledgmentText<'a> {
    greeting: &'a str,
}

#[derive(Template)]
#[template(path = "email/owner_notification.html")]
struct OwnerNotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    message_lines: Vec<&'a str>,
}

#[derive(Template)]
#[template(path = "email/owner_notification.txt")]
struct OwnerNotificationText<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Thank-you note sent back to the submitter.
pub fn acknowledgment(submission: &ContactSubmission) -> Result<EmailMessage, askama::Error> {
    let greeting = display_name(&submission.name).unwrap_or("there");

    Ok(EmailMessage {
        to: submission.email.clone(),
        subject: ACKNOWLEDGMENT_SUBJECT.to_string(),
        body_text: Some(AcknowledgmentText { greeting }.render()?),
        body_html: Some(AcknowledgmentHtml { greeting }.render()?),
        from_name: None,
        reply_to: None,
    })
}

/// Notification for the site owner carrying the submission itself. Replies go
/// straight to the submitter.
pub fn owner_notification(
    submission: &ContactSubmission,
    owner: &str,
) -> Result<EmailMessage, askama::Error> {
    let name = display_name(&submission.name).unwrap_or("Anonymous");
    let subject_name: String = name.chars().filter(|c| !c.is_control()).collect();

    let body_text = OwnerNotificationText {
        name,
        email: &submission.email,
        message: &submission.message,
    }
    .render()?;

    let body_html = OwnerNotificationHtml {
        name,
        email: &submission.email,
        message_lines: submission.message.lines().collect(),
    }
    .render()?;

    Ok(EmailMessage {
        to: owner.to_string(),
        subject: format!("New message from {}", subject_name),
        body_text: Some(body_text),
        body_html: Some(body_html),
        from_name: Some(subject_name),
        reply_to: Some(submission.email.clone()),
    })
}

fn display_name(name: &str) -> Option<&str> {
    Some(name.trim()).filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Jo <b>Bold</b>".to_string(),
            email: "jo@example.com".to_string(),
            message: "Hello & welcome\nSecond line".to_string(),
        }
    }

    #[test]
    fn test_acknowledgment_goes_to_submitter() {
        let email = acknowledgment(&submission()).unwrap();
        assert_eq!(email.to, "jo@example.com");
        assert_eq!(email.subject, ACKNOWLEDGMENT_SUBJECT);
        assert!(email.reply_to.is_none());
        assert!(email.body_html.unwrap().contains("Jo &lt;b&gt;Bold"));
    }

    #[test]
    fn test_acknowledgment_without_name() {
        let email = acknowledgment(&ContactSubmission {
            name: "  ".to_string(),
            ..submission()
        })
        .unwrap();
        assert!(email.body_text.unwrap().starts_with("Hi there,"));
    }

    #[test]
    fn test_notification_embeds_escaped_submission() {
        let email = owner_notification(&submission(), "owner@example.com").unwrap();
        assert_eq!(email.to, "owner@example.com");
        assert_eq!(email.reply_to.as_deref(), Some("jo@example.com"));

        let html = email.body_html.unwrap();
        assert!(html.contains("Jo &lt;b&gt;Bold"));
        assert!(html.contains("jo@example.com"));
        assert!(html.contains("Hello &amp; welcome<br>Second line"));
        assert!(!html.contains("<b>Bold</b>"));
    }

    #[test]
    fn test_notification_escapes_quotes_and_markup_in_message() {
        let email = owner_notification(
            &ContactSubmission {
                message: "<script>alert(\"hi\")</script> it's me".to_string(),
                ..submission()
            },
            "owner@example.com",
        )
        .unwrap();

        let html = email.body_html.unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&quot;hi&quot;"));
        assert!(html.contains("it&#x27;s me"));
    }

    #[test]
    fn test_notification_text_body_is_not_escaped() {
        let email = owner_notification(&submission(), "owner@example.com").unwrap();
        let text = email.body_text.unwrap();
        assert!(text.contains("Name: Jo <b>Bold</b>"));
        assert!(text.contains("Hello & welcome\nSecond line"));
    }

    #[test]
    fn test_notification_subject_strips_line_breaks() {
        let email = owner_notification(
            &ContactSubmission {
                name: "Jo\r\nBcc: everyone@example.com".to_string(),
                ..submission()
            },
            "owner@example.com",
        )
        .unwrap();
        assert!(!email.subject.contains('\n'));
        assert!(!email.subject.contains('\r'));
    }
}
