//! Wire format of a flow request and its validation.
//!
//! ```json
//! { "eventNameTrigger": "socksPurchased",
//!   "userEmail": "test@example.com",
//!   "emails": [ { "subject": "Payment received", "emailBody": "Thank you!", "timeDelay": 0 } ] }
//! ```
//!
//! `timeDelay` is in seconds and may be fractional. The three top-level fields
//! must be present and truthy: non-empty strings, and a non-null `emails`
//! array (an empty array is fine).

use std::time::Duration;

use serde::Deserialize;

use crate::error::FlowError;
use crate::flow::{Flow, Message};
use crate::policies::FlowLimits;

/// Incoming flow request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowRequest {
    /// Opaque trigger label.
    #[serde(default)]
    pub event_name_trigger: Option<String>,
    /// Recipient address (not validated for format).
    #[serde(default)]
    pub user_email: Option<String>,
    /// Messages in dispatch order.
    #[serde(default)]
    pub emails: Option<Vec<EmailRequest>>,
}

/// One message of a [`FlowRequest`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub subject: String,
    pub email_body: String,
    /// Delay before sending, in seconds.
    pub time_delay: f64,
}

impl FlowRequest {
    /// Decodes a JSON body.
    pub fn from_json(body: &[u8]) -> Result<Self, FlowError> {
        serde_json::from_slice(body).map_err(|e| FlowError::Malformed {
            reason: e.to_string(),
        })
    }

    /// Validates the request against `limits` and builds a fresh [`Flow`].
    pub fn into_flow(self, limits: &FlowLimits) -> Result<Flow, FlowError> {
        let trigger = required(self.event_name_trigger, "eventNameTrigger")?;
        let recipient = required(self.user_email, "userEmail")?;
        let emails = self
            .emails
            .ok_or(FlowError::MissingField { field: "emails" })?;

        limits.check_count(emails.len())?;

        let mut messages = Vec::with_capacity(emails.len());
        for (index, email) in emails.into_iter().enumerate() {
            let delay = seconds(index, email.time_delay)?;
            limits.check_delay(index, delay)?;
            messages.push(Message::new(email.subject, email.email_body, delay));
        }

        Ok(Flow::new(trigger, recipient, messages))
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, FlowError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(FlowError::MissingField { field })
}

fn seconds(index: usize, value: f64) -> Result<Duration, FlowError> {
    if value < 0.0 {
        return Err(FlowError::InvalidDelay { index, value });
    }
    Duration::try_from_secs_f64(value).map_err(|_| FlowError::InvalidDelay { index, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Flow, FlowError> {
        FlowRequest::from_json(json.as_bytes())?.into_flow(&FlowLimits::default())
    }

    #[test]
    fn valid_request_builds_ordered_flow() {
        let flow = parse(
            r#"{"eventNameTrigger":"socksPurchased","userEmail":"test@example.com",
                "emails":[{"subject":"Payment received","emailBody":"Thank you!","timeDelay":0},
                          {"subject":"Socks dispatched!","emailBody":"Get ready!","timeDelay":1.5}]}"#,
        )
        .unwrap();

        assert_eq!(flow.trigger(), "socksPurchased");
        assert_eq!(flow.recipient(), "test@example.com");
        let subjects: Vec<&str> = flow.messages().iter().map(Message::subject).collect();
        assert_eq!(subjects, vec!["Payment received", "Socks dispatched!"]);
        assert_eq!(flow.messages()[1].delay(), Duration::from_millis(1500));
    }

    #[test]
    fn empty_emails_is_valid() {
        let flow = parse(r#"{"eventNameTrigger":"websiteSignup","userEmail":"t@e.com","emails":[]}"#)
            .unwrap();
        assert!(flow.is_empty());
    }

    #[test]
    fn missing_or_falsy_fields_are_rejected() {
        assert_eq!(
            parse(r#"{"eventNameTrigger":"websiteSignup","userEmail":"t@e.com"}"#).unwrap_err(),
            FlowError::MissingField { field: "emails" }
        );
        assert_eq!(
            parse(r#"{"eventNameTrigger":"","userEmail":"t@e.com","emails":[]}"#).unwrap_err(),
            FlowError::MissingField {
                field: "eventNameTrigger"
            }
        );
        assert_eq!(
            parse(r#"{"eventNameTrigger":"x","userEmail":null,"emails":[]}"#).unwrap_err(),
            FlowError::MissingField { field: "userEmail" }
        );
        assert_eq!(
            parse("{}").unwrap_err(),
            FlowError::MissingField {
                field: "eventNameTrigger"
            }
        );
    }

    #[test]
    fn negative_delay_is_rejected() {
        let err = parse(
            r#"{"eventNameTrigger":"x","userEmail":"t@e.com",
                "emails":[{"subject":"s","emailBody":"b","timeDelay":-1}]}"#,
        )
        .unwrap_err();
        assert_eq!(err, FlowError::InvalidDelay { index: 0, value: -1.0 });
    }

    #[test]
    fn limits_are_enforced() {
        let limits = FlowLimits {
            max_delay: Duration::from_secs(60),
            max_messages: 1,
        };
        let over_delay = FlowRequest::from_json(
            br#"{"eventNameTrigger":"x","userEmail":"t@e.com",
                 "emails":[{"subject":"s","emailBody":"b","timeDelay":7200}]}"#,
        )
        .unwrap();
        assert_eq!(
            over_delay.into_flow(&limits).unwrap_err().as_label(),
            "flow_delay_too_long"
        );

        let over_count = FlowRequest::from_json(
            br#"{"eventNameTrigger":"x","userEmail":"t@e.com",
                 "emails":[{"subject":"a","emailBody":"b","timeDelay":0},
                           {"subject":"c","emailBody":"d","timeDelay":0}]}"#,
        )
        .unwrap();
        assert_eq!(
            over_count.into_flow(&limits).unwrap_err(),
            FlowError::TooManyMessages { count: 2, max: 1 }
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            FlowRequest::from_json(b"not json").unwrap_err().as_label(),
            "flow_malformed"
        );
        assert_eq!(
            FlowRequest::from_json(br#"{"emails":"nope"}"#)
                .unwrap_err()
                .as_label(),
            "flow_malformed"
        );
    }
}
