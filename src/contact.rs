//! Contact form relay.
//!
//! A submission produces two emails, sent one after the other:
//!
//! 1. a notification to the site owner (`admin_template`);
//! 2. an auto-reply to the visitor (`reply_template`).
//!
//! Either failing is reported as one [`ContactError::Delivery`]: the caller
//! is not told whether the notification went out before the reply failed.

use crate::{config::ContactConfig, debug, log};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Locale, TimeZone};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// `lundi 19 octobre 2026 à 14:05`
const TIME_FORMAT_FR: &str = "%A %-d %B %Y à %H:%M";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Invalid contact form: {0}")]
    InvalidForm(String),

    #[error("Failed to send the message, please try again later")]
    Delivery(#[source] anyhow::Error),
}

// ============================================================================
// Form
// ============================================================================

/// A validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Trim and validate the three required fields.
    pub fn new(name: &str, email: &str, message: &str) -> Result<Self, ContactError> {
        let (name, email, message) = (name.trim(), email.trim(), message.trim());

        for (field, value) in [("name", name), ("email", email), ("message", message)] {
            if value.is_empty() {
                return Err(ContactError::InvalidForm(format!("`{field}` is required")));
            }
        }
        match email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(ContactError::InvalidForm(format!(
                    "`{email}` is not an email address"
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        })
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Body of one send call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailRequest {
    pub service_id: String,
    pub template_id: String,
    /// Public key of the account.
    pub user_id: String,
    pub template_params: Value,
}

/// Notification for the site owner.
pub fn admin_request(form: &ContactForm, config: &ContactConfig, time: &str) -> EmailRequest {
    EmailRequest {
        service_id: config.service_id.clone(),
        template_id: config.admin_template.clone(),
        user_id: config.public_key.clone(),
        template_params: json!({
            "name": form.name,
            "user_email": form.email,
            "message": form.message,
            "time": time,
        }),
    }
}

/// Auto-reply for the visitor.
pub fn reply_request(form: &ContactForm, config: &ContactConfig) -> EmailRequest {
    EmailRequest {
        service_id: config.service_id.clone(),
        template_id: config.reply_template.clone(),
        user_id: config.public_key.clone(),
        template_params: json!({
            "from_name": form.name,
            "to_email": form.email,
            "title": form.message,
            "message": form.message,
        }),
    }
}

/// Long French date with short time, in the submitter's local time.
pub fn format_time_fr<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format_localized(TIME_FORMAT_FR, Locale::fr_FR).to_string()
}

// ============================================================================
// Transport
// ============================================================================

/// Something that delivers one [`EmailRequest`].
pub trait Transport {
    fn send(&self, request: &EmailRequest) -> Result<()>;
}

/// HTTP client for the email service's send endpoint.
pub struct EmailJs {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl EmailJs {
    pub fn new(endpoint: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl Transport for EmailJs {
    fn send(&self, request: &EmailRequest) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .with_context(|| format!("Failed to send request to {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!(
                "HTTP {} from {} ({}): {}",
                status,
                self.endpoint,
                request.template_id,
                body
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Submit
// ============================================================================

/// Send the owner notification, then the visitor auto-reply.
///
/// The reply is not attempted when the notification fails.
pub fn submit<Tz: TimeZone>(
    form: &ContactForm,
    config: &ContactConfig,
    transport: &dyn Transport,
    now: &DateTime<Tz>,
) -> Result<(), ContactError>
where
    Tz::Offset: std::fmt::Display,
{
    let time = format_time_fr(now);
    let requests = [admin_request(form, config, &time), reply_request(form, config)];

    for request in &requests {
        debug!("contact"; "sending {}", request.template_id);
        if let Err(err) = transport.send(request) {
            log!("error"; "{:#}", err);
            return Err(ContactError::Delivery(err));
        }
    }

    log!("contact"; "message from {} sent", form.email);
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use std::cell::RefCell;

    /// Records template ids; fails on the listed ones.
    #[derive(Default)]
    struct Recorder {
        sent: RefCell<Vec<String>>,
        fail_on: Vec<&'static str>,
    }

    impl Transport for Recorder {
        fn send(&self, request: &EmailRequest) -> Result<()> {
            self.sent.borrow_mut().push(request.template_id.clone());
            if self.fail_on.contains(&request.template_id.as_str()) {
                return Err(anyhow!("503 Service Unavailable"));
            }
            Ok(())
        }
    }

    fn form() -> ContactForm {
        ContactForm::new(" Rabe ", "rabe@example.mg", "Un site vitrine ?").unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_form_trims() {
        let form = form();
        assert_eq!(form.name, "Rabe");
        assert_eq!(form.email, "rabe@example.mg");
    }

    #[test]
    fn test_form_rejects_empty_fields() {
        let err = ContactForm::new("Rabe", "rabe@example.mg", "   ").unwrap_err();
        assert!(matches!(err, ContactError::InvalidForm(ref m) if m.contains("message")));
    }

    #[test]
    fn test_form_rejects_bad_email() {
        for email in ["rabe", "@example.mg", "rabe@"] {
            assert!(ContactForm::new("Rabe", email, "Bonjour").is_err(), "{email}");
        }
    }

    #[test]
    fn test_format_time_fr() {
        assert_eq!(format_time_fr(&now()), "lundi 19 octobre 2026 à 14:05");

        let eat = FixedOffset::east_opt(3 * 3600).unwrap();
        let late = eat.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();
        assert_eq!(format_time_fr(&late), "samedi 1 août 2026 à 09:00");

        let winter = Utc.with_ymd_and_hms(2026, 2, 8, 23, 59, 0).unwrap();
        assert_eq!(format_time_fr(&winter), "dimanche 8 février 2026 à 23:59");
    }

    #[test]
    fn test_admin_request() {
        let config = ContactConfig::default();
        let request = admin_request(&form(), &config, "t");
        assert_eq!(request.template_id, "template_received");
        assert_eq!(request.user_id, "ALDptbdckCv1GcLKe");
        assert_eq!(request.template_params["name"], "Rabe");
        assert_eq!(request.template_params["user_email"], "rabe@example.mg");
        assert_eq!(request.template_params["time"], "t");
    }

    #[test]
    fn test_reply_request() {
        let request = reply_request(&form(), &ContactConfig::default());
        assert_eq!(request.template_id, "template_reply");
        assert_eq!(request.template_params["from_name"], "Rabe");
        assert_eq!(request.template_params["to_email"], "rabe@example.mg");
        assert_eq!(request.template_params["title"], "Un site vitrine ?");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(reply_request(&form(), &ContactConfig::default())).unwrap();
        let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        for key in ["service_id", "template_id", "user_id", "template_params"] {
            assert!(keys.contains(&key.to_string()), "{key}");
        }
    }

    #[test]
    fn test_submit_sends_admin_then_reply() {
        let transport = Recorder::default();
        submit(&form(), &ContactConfig::default(), &transport, &now()).unwrap();
        assert_eq!(*transport.sent.borrow(), ["template_received", "template_reply"]);
    }

    #[test]
    fn test_submit_stops_after_admin_failure() {
        let transport = Recorder {
            fail_on: vec!["template_received"],
            ..Default::default()
        };
        let err = submit(&form(), &ContactConfig::default(), &transport, &now()).unwrap_err();
        assert!(matches!(err, ContactError::Delivery(_)));
        assert_eq!(*transport.sent.borrow(), ["template_received"]);
    }

    #[test]
    fn test_submit_reply_failure_is_same_error() {
        let transport = Recorder {
            fail_on: vec!["template_reply"],
            ..Default::default()
        };
        let err = submit(&form(), &ContactConfig::default(), &transport, &now()).unwrap_err();
        assert!(matches!(err, ContactError::Delivery(_)));
        assert_eq!(transport.sent.borrow().len(), 2);
    }
}
