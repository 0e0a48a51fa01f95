//! Contact form: field state, validation and the submission lifecycle.
//!
//! ```text
//! Idle --submit (valid)--> Sending --ok--> Success --reset delay / edit--> Idle
//!                                  \--err--> Error --edit / new message--> Idle
//!                                                  \--submit--> Sending
//! ```
//!
//! The form does not call the sender itself. [`ContactForm::submit`] hands
//! out a [`Submission`]; whoever dispatches it reports back through
//! [`ContactForm::complete`] with the submission's [`Ticket`]. Outcomes for
//! any ticket other than the pending one are discarded.

use std::{
    fmt, mem,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tokio::{sync::mpsc, time::Instant};
use tracing::{debug, trace};

use crate::{
    error::SendError,
    notify::{NotificationSender, TemplateParams},
};

static NEXT_FORM_ID: AtomicU64 = AtomicU64::new(1);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    #[default]
    Collaboration,
    JobOpportunity,
    FreelanceProject,
    Consultation,
    Other,
}

impl Subject {
    pub const ALL: [Self; 5] = [
        Self::Collaboration,
        Self::JobOpportunity,
        Self::FreelanceProject,
        Self::Consultation,
        Self::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Collaboration => "Collaboration",
            Self::JobOpportunity => "Job Opportunity",
            Self::FreelanceProject => "Freelance Project",
            Self::Consultation => "Consultation",
            Self::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Subject,
        Self::Message,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: Subject,
    pub message: String,
}

impl ContactFields {
    /// Current text of a field; the subject yields its label.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Subject => self.subject.label(),
            Field::Message => &self.message,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        for (field, value) in [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Message, &self.message),
        ] {
            if value.trim().is_empty() {
                errors.push(FieldError::Required(field));
            }
        }
        if !self.email.trim().is_empty() && !is_well_formed_email(self.email.trim()) {
            errors.push(FieldError::MalformedEmail);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    fn template_params(&self, to_name: &str) -> TemplateParams {
        TemplateParams {
            from_name: self.name.clone(),
            from_email: self.email.clone(),
            phone: self.phone.clone(),
            subject: self.subject.label().to_owned(),
            message: self.message.clone(),
            to_name: to_name.to_owned(),
        }
    }
}

/// One `@`, a non-empty local part, a dotted domain that neither starts
/// nor ends with a dot, and no whitespace.
pub fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required(Field),
    MalformedEmail,
}

impl FieldError {
    pub const fn field(self) -> Field {
        match self {
            Self::Required(field) => field,
            Self::MalformedEmail => Field::Email,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{} is required", field.label()),
            Self::MalformedEmail => write!(f, "Enter a valid email address"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn for_field(&self, field: Field) -> Option<FieldError> {
        self.0.iter().copied().find(|e| e.field() == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.0.iter().copied()
    }

    fn clear_field(&mut self, field: Field) {
        self.0.retain(|e| e.field() != field);
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error(SendError),
}

/// Identifies one submission attempt of one form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    form: u64,
    attempt: u64,
}

/// A validated message ready to be handed to a sender.
#[derive(Debug)]
pub struct Submission {
    pub ticket: Ticket,
    pub params: TemplateParams,
}

/// Result of a dispatched submission.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub ticket: Ticket,
    pub result: Result<(), SendError>,
}

impl Submission {
    /// Send on a background task and report the outcome on `outcomes`.
    pub fn dispatch(
        self,
        sender: Arc<dyn NotificationSender>,
        outcomes: mpsc::UnboundedSender<SubmissionOutcome>,
    ) {
        let Self { ticket, params } = self;
        tokio::spawn(async move {
            let result = sender.send(params).await;
            // The receiver is gone when the app is shutting down.
            let _ = outcomes.send(SubmissionOutcome { ticket, result });
        });
    }
}

/// Why a submit request did not start a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    InFlight,
    Invalid(ValidationErrors),
}

impl fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InFlight => write!(f, "A message is already being sent"),
            Self::Invalid(errors) => write!(f, "Invalid message: {errors}"),
        }
    }
}

impl std::error::Error for SubmitRejected {}

pub struct ContactForm {
    id: u64,
    fields: ContactFields,
    status: SubmitStatus,
    errors: Option<ValidationErrors>,
    pending: Option<Ticket>,
    attempts: u64,
    reset_at: Option<Instant>,
    reset_after: Duration,
    to_name: String,
}

impl ContactForm {
    pub fn new(to_name: impl Into<String>, reset_after: Duration) -> Self {
        Self {
            id: NEXT_FORM_ID.fetch_add(1, Ordering::Relaxed),
            fields: ContactFields::default(),
            status: SubmitStatus::Idle,
            errors: None,
            pending: None,
            attempts: 0,
            reset_at: None,
            reset_after,
            to_name: to_name.into(),
        }
    }

    pub const fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub const fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub const fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    pub const fn is_sending(&self) -> bool {
        matches!(self.status, SubmitStatus::Sending)
    }

    /// Set a field. Ignored while sending; the subject only accepts one of
    /// the allowed labels. Editing after success or failure returns the form
    /// to idle. Returns whether the value was applied.
    pub fn update_field(&mut self, field: Field, value: &str) -> bool {
        if self.is_sending() {
            return false;
        }
        match field {
            Field::Name => value.clone_into(&mut self.fields.name),
            Field::Email => value.clone_into(&mut self.fields.email),
            Field::Phone => value.clone_into(&mut self.fields.phone),
            Field::Message => value.clone_into(&mut self.fields.message),
            Field::Subject => match Subject::from_label(value) {
                Some(subject) => self.fields.subject = subject,
                None => return false,
            },
        }
        if let Some(errors) = &mut self.errors {
            errors.clear_field(field);
            if errors.is_empty() {
                self.errors = None;
            }
        }
        self.return_to_idle();
        true
    }

    /// Append a character to a text field.
    pub fn push_char(&mut self, field: Field, c: char) -> bool {
        if field == Field::Subject {
            return false;
        }
        let mut value = self.fields.value(field).to_owned();
        value.push(c);
        self.update_field(field, &value)
    }

    /// Remove the last character of a text field.
    pub fn pop_char(&mut self, field: Field) -> bool {
        if field == Field::Subject {
            return false;
        }
        let mut value = self.fields.value(field).to_owned();
        if value.pop().is_none() {
            return false;
        }
        self.update_field(field, &value)
    }

    pub fn cycle_subject(&mut self, forward: bool) -> bool {
        let subject = if forward {
            self.fields.subject.next()
        } else {
            self.fields.subject.prev()
        };
        self.update_field(Field::Subject, subject.label())
    }

    /// "Send another message": leave a finished state without editing.
    pub fn new_message(&mut self) {
        if matches!(self.status, SubmitStatus::Success | SubmitStatus::Error(_)) {
            self.return_to_idle();
        }
    }

    /// Validate and start a submission. Also the retry path from `Error`.
    pub fn submit(&mut self) -> Result<Submission, SubmitRejected> {
        if self.is_sending() {
            trace!("Submit ignored, already sending");
            return Err(SubmitRejected::InFlight);
        }
        if let Err(errors) = self.fields.validate() {
            debug!(%errors, "Contact form invalid");
            self.errors = Some(errors.clone());
            self.return_to_idle();
            return Err(SubmitRejected::Invalid(errors));
        }

        self.attempts += 1;
        let ticket = Ticket {
            form: self.id,
            attempt: self.attempts,
        };
        self.errors = None;
        self.reset_at = None;
        self.pending = Some(ticket);
        self.status = SubmitStatus::Sending;
        debug!(attempt = self.attempts, "Contact form sending");

        Ok(Submission {
            ticket,
            params: self.fields.template_params(&self.to_name),
        })
    }

    /// Apply a sender outcome. Returns `false` for stale outcomes.
    pub fn complete(&mut self, ticket: Ticket, result: Result<(), SendError>) -> bool {
        if self.pending != Some(ticket) {
            trace!(?ticket, "Discarding stale submission outcome");
            return false;
        }
        self.pending = None;
        match result {
            Ok(()) => {
                self.fields = ContactFields::default();
                self.status = SubmitStatus::Success;
                self.reset_at = Some(Instant::now() + self.reset_after);
                debug!("Contact form sent");
            }
            Err(e) => {
                debug!(error = %e, "Contact form failed");
                self.status = SubmitStatus::Error(e);
            }
        }
        true
    }

    /// Time-driven transitions: a success notice returns to idle after the
    /// reset delay.
    pub fn update(&mut self, now: Instant) {
        if self.reset_at.is_some_and(|at| now >= at) {
            self.return_to_idle();
        }
    }

    /// Tear the form down and start a fresh instance. Outcomes of earlier
    /// submissions no longer apply.
    pub fn reset_instance(&mut self) {
        *self = Self::new(mem::take(&mut self.to_name), self.reset_after);
    }

    fn return_to_idle(&mut self) {
        self.reset_at = None;
        if !matches!(self.status, SubmitStatus::Idle) {
            debug!("Contact form idle");
            self.status = SubmitStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::future::BoxFuture;

    use super::*;

    const RESET: Duration = Duration::from_millis(5000);

    struct AlwaysOk;

    impl NotificationSender for AlwaysOk {
        fn send(&self, _params: TemplateParams) -> BoxFuture<'static, Result<(), SendError>> {
            Box::pin(async { Ok(()) })
        }
    }

    struct AlwaysReject;

    impl NotificationSender for AlwaysReject {
        fn send(&self, _params: TemplateParams) -> BoxFuture<'static, Result<(), SendError>> {
            Box::pin(async { Err(SendError::Network("offline".into())) })
        }
    }

    fn filled(message: &str) -> ContactForm {
        let mut form = ContactForm::new("Alex", RESET);
        form.update_field(Field::Name, "John");
        form.update_field(Field::Email, "john@x.com");
        form.update_field(Field::Phone, "");
        form.update_field(Field::Subject, "Collaboration");
        form.update_field(Field::Message, message);
        form
    }

    async fn run(form: &mut ContactForm, sender: &dyn NotificationSender) {
        let submission = form.submit().unwrap();
        assert_eq!(*form.status(), SubmitStatus::Sending);
        let result = sender.send(submission.params).await;
        assert!(form.complete(submission.ticket, result));
    }

    #[test]
    fn test_email_shapes() {
        for ok in ["john@x.com", "a.b+c@mail.example.org"] {
            assert!(is_well_formed_email(ok), "{ok}");
        }
        for bad in ["", "john", "@x.com", "john@", "john@x", "john@.com", "john@x.", "jo hn@x.com", "a@b@c.com"] {
            assert!(!is_well_formed_email(bad), "{bad}");
        }
    }

    #[test]
    fn test_empty_message_never_submits() {
        let mut form = filled("");
        let rejected = form.submit().unwrap_err();
        assert_eq!(*form.status(), SubmitStatus::Idle);
        let SubmitRejected::Invalid(errors) = rejected else {
            panic!("expected validation failure");
        };
        assert_eq!(
            errors.for_field(Field::Message),
            Some(FieldError::Required(Field::Message))
        );
        assert!(errors.for_field(Field::Name).is_none());
        assert!(form.errors().is_some());
    }

    #[test]
    fn test_malformed_email_is_reported_inline() {
        let mut form = filled("Hi");
        form.update_field(Field::Email, "john@x");
        assert!(form.submit().is_err());
        assert_eq!(
            form.errors().and_then(|e| e.for_field(Field::Email)),
            Some(FieldError::MalformedEmail)
        );

        // Fixing the field clears its error.
        form.update_field(Field::Email, "john@x.com");
        assert!(form.errors().is_none());
    }

    #[test]
    fn test_subject_restricted_to_allowed_set() {
        let mut form = ContactForm::new("Alex", RESET);
        assert!(!form.update_field(Field::Subject, "Spam"));
        assert_eq!(form.fields().subject, Subject::Collaboration);
        assert!(form.update_field(Field::Subject, "Consultation"));
        assert_eq!(form.fields().subject, Subject::Consultation);
        form.cycle_subject(true);
        assert_eq!(form.fields().subject, Subject::Other);
        form.cycle_subject(true);
        assert_eq!(form.fields().subject, Subject::Collaboration);
        form.cycle_subject(false);
        assert_eq!(form.fields().subject, Subject::Other);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_resets_fields_then_returns_to_idle() {
        let mut form = filled("Let's build something");
        form.update_field(Field::Subject, "Other");
        run(&mut form, &AlwaysOk).await;

        assert_eq!(*form.status(), SubmitStatus::Success);
        assert_eq!(*form.fields(), ContactFields::default());
        assert_eq!(form.fields().subject, Subject::Collaboration);

        form.update(Instant::now() + RESET - Duration::from_millis(1));
        assert_eq!(*form.status(), SubmitStatus::Success);
        form.update(Instant::now() + RESET);
        assert_eq!(*form.status(), SubmitStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_preserves_input_and_allows_retry() {
        let mut form = filled("Hello there");
        let typed = form.fields().clone();
        run(&mut form, &AlwaysReject).await;

        assert!(matches!(form.status(), SubmitStatus::Error(SendError::Network(_))));
        assert_eq!(*form.fields(), typed);

        run(&mut form, &AlwaysOk).await;
        assert_eq!(*form.status(), SubmitStatus::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sending_blocks_edits_and_resubmits() {
        let mut form = filled("Hello");
        let submission = form.submit().unwrap();

        assert!(!form.update_field(Field::Name, "Jane"));
        assert_eq!(form.fields().name, "John");
        assert_eq!(form.submit().unwrap_err(), SubmitRejected::InFlight);

        assert!(form.complete(submission.ticket, Ok(())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_or_new_message_leaves_finished_states() {
        let mut form = filled("Hello");
        run(&mut form, &AlwaysReject).await;
        form.push_char(Field::Message, '!');
        assert_eq!(*form.status(), SubmitStatus::Idle);
        assert_eq!(form.fields().message, "Hello!");

        run(&mut form, &AlwaysOk).await;
        form.new_message();
        assert_eq!(*form.status(), SubmitStatus::Idle);
        // The cancelled reset deadline must not fire later.
        form.update(Instant::now() + RESET * 2);
        assert_eq!(*form.status(), SubmitStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outcome_after_teardown_is_discarded() {
        let mut form = filled("Hello");
        let submission = form.submit().unwrap();
        form.reset_instance();

        assert!(!form.complete(submission.ticket, Err(SendError::Network("late".into()))));
        assert_eq!(*form.status(), SubmitStatus::Idle);
        assert!(form.submit().is_err(), "fresh instance starts empty");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_reports_on_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut form = filled("Hello");
        form.submit().unwrap().dispatch(Arc::new(AlwaysOk), tx);

        let outcome = rx.recv().await.unwrap();
        assert!(form.complete(outcome.ticket, outcome.result));
        assert_eq!(*form.status(), SubmitStatus::Success);
    }

    #[test]
    fn test_pop_char_on_empty_field() {
        let mut form = ContactForm::new("Alex", RESET);
        assert!(!form.pop_char(Field::Name));
        assert!(form.push_char(Field::Name, 'J'));
        assert!(form.pop_char(Field::Name));
        assert!(form.fields().name.is_empty());
    }
}
