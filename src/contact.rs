//! Reservation / contact form state.
//!
//! There is no backend: a submit locks the form for a fixed delay and then
//! unlocks it, keeping the entered values.

use std::fmt;

use web_time::{Duration, Instant};

use crate::error::SiteError;

/// Values offered by the guests selector.
pub const GUEST_OPTIONS: [&str; 9] = ["1", "2", "3", "4", "5", "6", "7", "8", "9+"];

/// Default simulated submission time.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// One input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    /// Guest name (required).
    Name,
    /// Reply address (required).
    Email,
    /// Phone number.
    Phone,
    /// Party size, one of [`GUEST_OPTIONS`].
    Guests,
    /// Requested date.
    Date,
    /// Free-text message.
    Message,
}

impl ContactField {
    /// Every field in form order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Guests,
        Self::Date,
        Self::Message,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Guests => "Guests",
            Self::Date => "Date",
            Self::Message => "Message",
        }
    }

    /// Whether a submit needs this field filled in.
    #[must_use]
    pub fn is_required(self) -> bool {
        matches!(self, Self::Name | Self::Email)
    }

    fn slot(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Phone => 2,
            Self::Guests => 3,
            Self::Date => 4,
            Self::Message => 5,
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display text for a guests option value.
#[must_use]
pub fn guest_label(value: &str) -> String {
    match value {
        "1" => "1 Guest".to_owned(),
        "" => "Select".to_owned(),
        other => format!("{other} Guests"),
    }
}

/// Result of [`ContactForm::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form is now submitting.
    Started,
    /// A submission is already running; nothing changed.
    AlreadySubmitting,
}

/// Form values plus submission state.
#[derive(Debug, Clone)]
pub struct ContactForm {
    values: [String; 6],
    submit_delay: Duration,
    submitted_at: Option<Instant>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

impl ContactForm {
    /// Empty form with the given simulated submission time.
    #[must_use]
    pub fn new(submit_delay: Duration) -> Self {
        Self {
            values: Default::default(),
            submit_delay,
            submitted_at: None,
        }
    }

    /// Current value of `field`.
    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        &self.values[field.slot()]
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        self.values[field.slot()] = value.into();
    }

    /// First required field that is blank.
    ///
    /// # Errors
    ///
    /// [`SiteError::MissingField`] naming that field.
    pub fn validate(&self) -> Result<(), SiteError> {
        match ContactField::ALL
            .into_iter()
            .find(|f| f.is_required() && self.get(*f).trim().is_empty())
        {
            Some(field) => Err(SiteError::MissingField(field)),
            None => Ok(()),
        }
    }

    /// Submit the form.
    ///
    /// # Errors
    ///
    /// [`SiteError::MissingField`] if a required field is blank; the form
    /// stays editable.
    pub fn submit(&mut self, now: Instant) -> Result<SubmitOutcome, SiteError> {
        if self.is_submitting() {
            return Ok(SubmitOutcome::AlreadySubmitting);
        }
        self.validate()?;
        log::debug!("reservation form submitted");
        self.submitted_at = Some(now);
        Ok(SubmitOutcome::Started)
    }

    /// Finish a running submission once its delay has passed. Returns
    /// `true` on the call that finishes it.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.submitted_at {
            Some(at) if now.saturating_duration_since(at) >= self.submit_delay => {
                self.submitted_at = None;
                true
            }
            _ => false,
        }
    }

    /// Whether the submit button is disabled.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitted_at.is_some()
    }

    /// Submit button caption.
    #[must_use]
    pub fn button_label(&self) -> &'static str {
        if self.is_submitting() {
            "Sending..."
        } else {
            "Send Message"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        form.set(ContactField::Name, "Priya");
        form.set(ContactField::Email, "priya@example.com");
        form
    }

    #[test]
    fn test_required_fields_block_submit() {
        let mut form = ContactForm::default();
        let now = Instant::now();
        assert!(matches!(
            form.submit(now),
            Err(SiteError::MissingField(ContactField::Name))
        ));

        form.set(ContactField::Name, "Priya");
        form.set(ContactField::Email, "   ");
        assert!(matches!(
            form.submit(now),
            Err(SiteError::MissingField(ContactField::Email))
        ));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_optional_fields_can_stay_empty() {
        let form = filled();
        assert!(form.validate().is_ok());
        assert_eq!(form.get(ContactField::Guests), "");
    }

    #[test]
    fn test_submission_completes_after_delay() {
        let mut form = filled();
        let t0 = Instant::now();
        assert_eq!(form.submit(t0).unwrap(), SubmitOutcome::Started);
        assert!(form.is_submitting());
        assert_eq!(form.button_label(), "Sending...");
        assert_eq!(
            form.submit(t0 + Duration::from_millis(10)).unwrap(),
            SubmitOutcome::AlreadySubmitting
        );

        assert!(!form.tick(t0 + Duration::from_millis(1999)));
        assert!(form.tick(t0 + Duration::from_millis(2000)));
        assert!(!form.is_submitting());
        assert!(!form.tick(t0 + Duration::from_millis(3000)));
        // Values survive the round trip.
        assert_eq!(form.get(ContactField::Name), "Priya");
    }

    #[test]
    fn guest_option_labels() {
        let labels: Vec<String> = GUEST_OPTIONS.iter().map(|v| guest_label(v)).collect();
        assert_eq!(labels[0], "1 Guest");
        assert_eq!(labels[1], "2 Guests");
        assert_eq!(labels[8], "9+ Guests");
        assert_eq!(guest_label(""), "Select");
    }

    #[test]
    fn field_labels_in_form_order() {
        let labels: Vec<&str> = ContactField::ALL.into_iter().map(ContactField::label).collect();
        assert_eq!(labels, ["Name", "Email", "Phone", "Guests", "Date", "Message"]);
        assert_eq!(ContactField::Date.to_string(), "Date");
    }
}
