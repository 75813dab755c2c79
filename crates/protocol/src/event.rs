//! Webhook event decoding.
//!
//! GitHub delivers `issues` and `label` events as JSON. Only the shape of
//! the payload is used to tell them apart: an `issue` object together with
//! an issue action is an issue event, a `label` object together with a
//! label action is a label event, and everything else is unrecognized.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ProtocolError, Result};
use crate::raw::{RawIssue, RawLabel};

/// Actions of the `issues` event the content layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueAction {
    Opened,
    Edited,
    Deleted,
    Pinned,
    Unpinned,
    Labeled,
    Unlabeled,
}

impl IssueAction {
    /// Parses a GitHub action name.
    #[must_use]
    pub fn parse(action: &str) -> Option<Self> {
        Some(match action {
            "opened" => Self::Opened,
            "edited" => Self::Edited,
            "deleted" => Self::Deleted,
            "pinned" => Self::Pinned,
            "unpinned" => Self::Unpinned,
            "labeled" => Self::Labeled,
            "unlabeled" => Self::Unlabeled,
            _ => return None,
        })
    }

    /// Returns the GitHub action name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Edited => "edited",
            Self::Deleted => "deleted",
            Self::Pinned => "pinned",
            Self::Unpinned => "unpinned",
            Self::Labeled => "labeled",
            Self::Unlabeled => "unlabeled",
        }
    }
}

/// Actions of the `label` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelAction {
    Created,
    Edited,
    Deleted,
}

impl LabelAction {
    /// Parses a GitHub action name.
    #[must_use]
    pub fn parse(action: &str) -> Option<Self> {
        Some(match action {
            "created" => Self::Created,
            "edited" => Self::Edited,
            "deleted" => Self::Deleted,
            _ => return None,
        })
    }

    /// Returns the GitHub action name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Edited => "edited",
            Self::Deleted => "deleted",
        }
    }
}

/// An `issues` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueEvent {
    pub action: IssueAction,
    /// Repository `full_name`, such as `ak4zh/blog`.
    pub repository: String,
    pub issue: RawIssue,
}

/// A `label` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEvent {
    pub action: LabelAction,
    /// Repository `full_name`, such as `ak4zh/blog`.
    pub repository: String,
    pub label: RawLabel,
}

/// A decoded webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    Issue(IssueEvent),
    Label(LabelEvent),
    /// Any other delivery, such as `ping` or `issue_comment`.
    Unrecognized,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    issue: Option<Value>,
    #[serde(default)]
    label: Option<Value>,
    #[serde(default)]
    repository: Option<RepositoryRef>,
}

#[derive(Deserialize)]
struct RepositoryRef {
    #[serde(default)]
    full_name: Option<String>,
}

impl WebhookEvent {
    /// Decodes a raw webhook body.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::DeserializationFailed`] if the body is not
    /// JSON, and [`ProtocolError::MalformedEvent`] if it looks like an
    /// issue or label event but lacks required fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitcms_protocol::WebhookEvent;
    ///
    /// let event = WebhookEvent::parse(br#"{"zen": "Keep it logically awesome."}"#)?;
    /// assert_eq!(event, WebhookEvent::Unrecognized);
    /// # Ok::<(), gitcms_protocol::ProtocolError>(())
    /// ```
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let value: Value =
            serde_json::from_slice(payload).map_err(ProtocolError::DeserializationFailed)?;
        Self::from_value(value)
    }

    /// Decodes an already parsed webhook body.
    ///
    /// # Errors
    ///
    /// See [`WebhookEvent::parse`].
    pub fn from_value(value: Value) -> Result<Self> {
        let envelope: Envelope = serde_json::from_value(value)
            .map_err(|e| ProtocolError::malformed(format!("unexpected payload shape: {e}")))?;
        let action = envelope.action.as_deref().unwrap_or_default();

        if let (Some(issue), Some(action)) = (envelope.issue, IssueAction::parse(action)) {
            let issue: RawIssue = serde_json::from_value(issue)
                .map_err(|e| ProtocolError::malformed(format!("invalid issue: {e}")))?;
            return Ok(Self::Issue(IssueEvent {
                action,
                repository: repository_name(envelope.repository)?,
                issue,
            }));
        }

        if let (Some(label), Some(action)) = (envelope.label, LabelAction::parse(action)) {
            let label: RawLabel = serde_json::from_value(label)
                .map_err(|e| ProtocolError::malformed(format!("invalid label: {e}")))?;
            return Ok(Self::Label(LabelEvent {
                action,
                repository: repository_name(envelope.repository)?,
                label,
            }));
        }

        Ok(Self::Unrecognized)
    }

    /// Returns the repository the event belongs to.
    #[must_use]
    pub fn repository(&self) -> Option<&str> {
        match self {
            Self::Issue(event) => Some(&event.repository),
            Self::Label(event) => Some(&event.repository),
            Self::Unrecognized => None,
        }
    }
}

fn repository_name(repository: Option<RepositoryRef>) -> Result<String> {
    repository
        .and_then(|r| r.full_name)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ProtocolError::malformed("missing repository.full_name"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue_json(number: u64) -> Value {
        json!({
            "number": number,
            "title": "Hello World",
            "body": "Hi",
            "created_at": "2024-01-15T10:30:00Z",
            "updated_at": "2024-01-15T10:30:00Z",
            "user": { "login": "ak4zh" },
            "labels": []
        })
    }

    #[test]
    fn decode_issue_event() {
        let payload = json!({
            "action": "opened",
            "issue": issue_json(3),
            "repository": { "full_name": "ak4zh/blog" }
        });
        let event = WebhookEvent::parse(payload.to_string().as_bytes()).unwrap();

        let WebhookEvent::Issue(event) = event else {
            panic!("expected issue event, got {event:?}");
        };
        assert_eq!(event.action, IssueAction::Opened);
        assert_eq!(event.repository, "ak4zh/blog");
        assert_eq!(event.issue.number, 3);
    }

    #[test]
    fn decode_label_event() {
        let payload = json!({
            "action": "deleted",
            "label": { "id": 9, "name": "+rust", "color": "dea584", "default": false },
            "repository": { "full_name": "ak4zh/blog" }
        });
        let event = WebhookEvent::from_value(payload).unwrap();

        let WebhookEvent::Label(event) = event else {
            panic!("expected label event, got {event:?}");
        };
        assert_eq!(event.action, LabelAction::Deleted);
        assert_eq!(event.label.id, 9);
    }

    #[test]
    fn issue_with_unknown_action_is_unrecognized() {
        let payload = json!({
            "action": "assigned",
            "issue": issue_json(3),
            "repository": { "full_name": "ak4zh/blog" }
        });
        assert_eq!(WebhookEvent::from_value(payload).unwrap(), WebhookEvent::Unrecognized);
    }

    #[test]
    fn labeled_issue_event_is_not_a_label_event() {
        let payload = json!({
            "action": "labeled",
            "issue": issue_json(3),
            "label": { "id": 9, "name": "+page", "color": "fff" },
            "repository": { "full_name": "ak4zh/blog" }
        });
        assert!(matches!(
            WebhookEvent::from_value(payload).unwrap(),
            WebhookEvent::Issue(IssueEvent { action: IssueAction::Labeled, .. })
        ));
    }

    #[test]
    fn ping_is_unrecognized() {
        let payload = json!({ "zen": "Design for failure.", "hook_id": 1 });
        let event = WebhookEvent::from_value(payload).unwrap();
        assert_eq!(event, WebhookEvent::Unrecognized);
        assert!(event.repository().is_none());
    }

    #[test]
    fn non_json_fails() {
        assert!(matches!(
            WebhookEvent::parse(b"not json"),
            Err(ProtocolError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn missing_repository_is_malformed() {
        let payload = json!({ "action": "opened", "issue": issue_json(3) });
        assert!(matches!(
            WebhookEvent::from_value(payload),
            Err(ProtocolError::MalformedEvent { .. })
        ));
    }

    #[test]
    fn issue_without_number_is_malformed() {
        let payload = json!({
            "action": "edited",
            "issue": { "title": "No number" },
            "repository": { "full_name": "ak4zh/blog" }
        });
        assert!(matches!(
            WebhookEvent::from_value(payload),
            Err(ProtocolError::MalformedEvent { .. })
        ));
    }

    #[test]
    fn array_payload_is_malformed() {
        assert!(matches!(
            WebhookEvent::parse(b"[1, 2, 3]"),
            Err(ProtocolError::MalformedEvent { .. })
        ));
    }

    #[test]
    fn action_names_round_trip() {
        for action in ["opened", "edited", "deleted", "pinned", "unpinned", "labeled", "unlabeled"] {
            assert_eq!(IssueAction::parse(action).unwrap().as_str(), action);
        }
        for action in ["created", "edited", "deleted"] {
            assert_eq!(LabelAction::parse(action).unwrap().as_str(), action);
        }
    }
}
