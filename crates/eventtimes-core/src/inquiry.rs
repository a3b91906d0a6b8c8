//! Contact inquiry form state and the relay payload.

use std::fmt;

use instant::{Duration, Instant};
use serde::Serialize;

use crate::constants::CONFIRMATION_WINDOW_SEC;
use crate::error::ChoreoError;

pub const FALLBACK_MESSAGE: &str = "We couldn't send your inquiry right now. Please email us at \
hello@theeventtimes.studio or call +94 77 123 4567.";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContactInquiry {
    pub name: String,
    pub email: String,
    pub date: String,
    pub location: String,
    pub message: String,
}

/// Input names used by the form markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Date,
    Location,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Date,
        FormField::Location,
        FormField::Message,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(FormField::Name),
            "email" => Some(FormField::Email),
            "date" => Some(FormField::Date),
            "location" => Some(FormField::Location),
            "message" => Some(FormField::Message),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Date => "date",
            FormField::Location => "location",
            FormField::Message => "message",
        }
    }
}

/// A required field that failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InquiryField {
    Name,
    Email,
    Message,
}

impl fmt::Display for InquiryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            InquiryField::Name => "please tell us your name",
            InquiryField::Email => "please enter a valid email address",
            InquiryField::Message => "please add a short message",
        };
        f.write_str(msg)
    }
}

fn plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.trim().is_empty(),
        None => false,
    }
}

impl ContactInquiry {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Date => &self.date,
            FormField::Location => &self.location,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Date => self.date = value,
            FormField::Location => self.location = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn validate(&self) -> Result<(), ChoreoError> {
        if self.name.trim().is_empty() {
            return Err(ChoreoError::InvalidInquiry(InquiryField::Name));
        }
        if !plausible_email(self.email.trim()) {
            return Err(ChoreoError::InvalidInquiry(InquiryField::Email));
        }
        if self.message.trim().is_empty() {
            return Err(ChoreoError::InvalidInquiry(InquiryField::Message));
        }
        Ok(())
    }

    pub fn subject(&self) -> String {
        let mut subject = format!("Wedding inquiry from {}", self.name.trim());
        let location = self.location.trim();
        if !location.is_empty() {
            subject.push_str(" - ");
            subject.push_str(location);
        }
        subject
    }

    pub fn payload(&self) -> RelayPayload {
        let optional = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        RelayPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            date: optional(&self.date),
            location: optional(&self.location),
            message: self.message.trim().to_string(),
            subject: self.subject(),
        }
    }
}

/// JSON body posted to the form relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RelayPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub message: String,
    #[serde(rename = "_subject")]
    pub subject: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered,
    /// Relay answered with a non-success status.
    Rejected(u16),
    /// No response at all.
    Unreachable(String),
}

impl RelayOutcome {
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            RelayOutcome::Delivered
        } else {
            RelayOutcome::Rejected(status)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting,
    Confirmed { until: Instant },
    Failed,
}

#[derive(Debug)]
pub struct InquiryForm {
    pub inquiry: ContactInquiry,
    status: FormStatus,
    window: Duration,
}

impl Default for InquiryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl InquiryForm {
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(CONFIRMATION_WINDOW_SEC))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            inquiry: ContactInquiry::default(),
            status: FormStatus::Editing,
            window,
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self.status, FormStatus::Confirmed { .. })
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Validate and freeze the form for sending; returns the body to post.
    pub fn begin_submit(&mut self) -> Result<RelayPayload, ChoreoError> {
        if self.status == FormStatus::Submitting {
            return Err(ChoreoError::SubmissionInFlight);
        }
        self.inquiry.validate()?;
        self.status = FormStatus::Submitting;
        Ok(self.inquiry.payload())
    }

    pub fn finish(&mut self, outcome: RelayOutcome, now: Instant) {
        match outcome {
            RelayOutcome::Delivered => {
                log::info!("[inquiry] delivered");
                self.inquiry = ContactInquiry::default();
                self.status = FormStatus::Confirmed {
                    until: now + self.window,
                };
            }
            RelayOutcome::Rejected(status) => {
                log::warn!("[inquiry] relay rejected with status {}", status);
                self.status = FormStatus::Failed;
            }
            RelayOutcome::Unreachable(reason) => {
                log::warn!("[inquiry] relay unreachable: {}", reason);
                self.status = FormStatus::Failed;
            }
        }
    }

    /// Close an expired confirmation window. Returns true when the status changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.status {
            FormStatus::Confirmed { until } if now >= until => {
                self.status = FormStatus::Editing;
                true
            }
            _ => false,
        }
    }

    /// Editing after a failure clears the failure notice.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        self.inquiry.set(field, value);
        if self.status == FormStatus::Failed {
            self.status = FormStatus::Editing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> InquiryForm {
        let mut form = InquiryForm::new();
        form.edit(FormField::Name, "A");
        form.edit(FormField::Email, "a@b.com");
        form.edit(FormField::Message, "hi");
        form
    }

    #[test]
    fn delivered_inquiry_resets_and_confirms_for_window() {
        let mut form = filled();
        let payload = form.begin_submit().expect("valid");
        assert_eq!(payload.subject, "Wedding inquiry from A");
        let t0 = Instant::now();
        form.finish(RelayOutcome::Delivered, t0);
        assert_eq!(form.inquiry, ContactInquiry::default());
        assert!(form.is_confirming());
        assert!(!form.tick(t0 + Duration::from_millis(2900)));
        assert!(form.tick(t0 + Duration::from_secs(3)));
        assert_eq!(form.status(), FormStatus::Editing);
    }

    #[test]
    fn failed_inquiry_keeps_fields() {
        let mut form = filled();
        form.begin_submit().expect("valid");
        form.finish(RelayOutcome::Rejected(500), Instant::now());
        assert_eq!(form.inquiry.name, "A");
        assert_eq!(form.inquiry.email, "a@b.com");
        assert_eq!(form.inquiry.message, "hi");
        assert_eq!(form.status(), FormStatus::Failed);
        assert!(!form.is_confirming());
    }

    #[test]
    fn invalid_email_is_never_sent() {
        let mut form = filled();
        form.edit(FormField::Email, "a@");
        assert_eq!(
            form.begin_submit(),
            Err(ChoreoError::InvalidInquiry(InquiryField::Email))
        );
        assert_eq!(form.status(), FormStatus::Editing);
    }

    #[test]
    fn second_submit_while_sending_is_refused() {
        let mut form = filled();
        form.begin_submit().expect("valid");
        assert_eq!(form.begin_submit(), Err(ChoreoError::SubmissionInFlight));
    }

    #[test]
    fn payload_skips_blank_optionals_and_renames_subject() {
        let mut form = filled();
        form.edit(FormField::Location, "Galle");
        let json = serde_json::to_value(form.begin_submit().expect("valid")).expect("json");
        assert_eq!(json["_subject"], "Wedding inquiry from A - Galle");
        assert_eq!(json["location"], "Galle");
        assert!(json.get("date").is_none());
    }

    #[test]
    fn status_codes_map_to_outcomes() {
        assert_eq!(RelayOutcome::from_status(200), RelayOutcome::Delivered);
        assert_eq!(RelayOutcome::from_status(204), RelayOutcome::Delivered);
        assert_eq!(RelayOutcome::from_status(422), RelayOutcome::Rejected(422));
    }

    #[test]
    fn field_names_round_trip_the_markup() {
        for f in FormField::ALL {
            assert_eq!(FormField::from_name(f.name()), Some(f));
        }
        assert_eq!(FormField::from_name("phone"), None);
    }
}
