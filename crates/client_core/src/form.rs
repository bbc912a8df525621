//! Root form state: owns every field, the applicant draft, the notification
//! slot and the verification lock. UI actions return [`FormCommand`]s for the
//! backend worker; worker results come back as [`FormEvent`]s.

use std::time::Instant;

use shared::{
    domain::{
        ApplicantDraft, ApplicantField, CollegeId, Major, MajorId, COLLEGES,
    },
    protocol::{ActionOutcome, SendMailRequest},
};
use tracing::{debug, error, info, warn};

use crate::{
    config::StaleMajorPolicy,
    error::ApiCallError,
    field::{placeholder, SelectOption, SelectableField, ValidatedField},
    notification::{NotificationSlot, Severity},
    validation::{
        is_valid_email, is_valid_name, is_valid_phone_number, is_valid_student_id,
        is_valid_verification_code, Validator,
    },
    verification::{TickResult, VerificationError, VerificationLock},
    ApiRequest,
};

pub const SUBMIT_LABEL: &str = "提交申请";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextInput {
    Name,
    StudentId,
    PhoneNumber,
    Email,
    VerificationCode,
}

impl TextInput {
    pub fn field(self) -> ApplicantField {
        match self {
            Self::Name => ApplicantField::Name,
            Self::StudentId => ApplicantField::StudentId,
            Self::PhoneNumber => ApplicantField::PhoneNumber,
            Self::Email => ApplicantField::Email,
            Self::VerificationCode => ApplicantField::VerificationCode,
        }
    }

    fn validator(self) -> Validator {
        match self {
            Self::Name => is_valid_name,
            Self::StudentId => is_valid_student_id,
            Self::PhoneNumber => is_valid_phone_number,
            Self::Email => is_valid_email,
            Self::VerificationCode => is_valid_verification_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Api(ApiRequest),
    StartCountdown,
    StopCountdown,
}

#[derive(Debug)]
pub enum FormEvent {
    MajorsLoaded {
        college_id: CollegeId,
        result: Result<Vec<Major>, ApiCallError>,
    },
    VerificationMailSent(Result<ActionOutcome, ApiCallError>),
    ApplicationSubmitted(Result<ActionOutcome, ApiCallError>),
    CountdownTick,
}

#[derive(Debug, Clone)]
struct TextFields {
    name: ValidatedField,
    student_id: ValidatedField,
    phone_number: ValidatedField,
    email: ValidatedField,
    verification_code: ValidatedField,
}

impl TextFields {
    fn new() -> Self {
        let field = |input: TextInput| ValidatedField::new(input.field().label(), input.validator());
        Self {
            name: field(TextInput::Name),
            student_id: field(TextInput::StudentId),
            phone_number: field(TextInput::PhoneNumber),
            email: field(TextInput::Email),
            verification_code: field(TextInput::VerificationCode),
        }
    }

    fn get(&self, input: TextInput) -> &ValidatedField {
        match input {
            TextInput::Name => &self.name,
            TextInput::StudentId => &self.student_id,
            TextInput::PhoneNumber => &self.phone_number,
            TextInput::Email => &self.email,
            TextInput::VerificationCode => &self.verification_code,
        }
    }

    fn get_mut(&mut self, input: TextInput) -> &mut ValidatedField {
        match input {
            TextInput::Name => &mut self.name,
            TextInput::StudentId => &mut self.student_id,
            TextInput::PhoneNumber => &mut self.phone_number,
            TextInput::Email => &mut self.email,
            TextInput::VerificationCode => &mut self.verification_code,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecruitForm {
    text: TextFields,
    college: SelectableField<CollegeId>,
    major: SelectableField<Option<MajorId>>,
    selected_college: Option<CollegeId>,
    majors: Option<Vec<Major>>,
    draft: ApplicantDraft,
    policy_accepted: bool,
    policy_dialog_open: bool,
    notification: NotificationSlot,
    verification: VerificationLock,
    stale_majors: StaleMajorPolicy,
}

impl Default for RecruitForm {
    fn default() -> Self {
        Self::new(StaleMajorPolicy::default())
    }
}

impl RecruitForm {
    pub fn new(stale_majors: StaleMajorPolicy) -> Self {
        let colleges = COLLEGES
            .iter()
            .map(|college| SelectOption::new(college.id, college.name))
            .collect();
        Self {
            text: TextFields::new(),
            college: SelectableField::new("学院", placeholder(CollegeId::UNSELECTED, true), colleges),
            major: SelectableField::new(
                ApplicantField::Major.label(),
                placeholder(None, true),
                Vec::new(),
            ),
            selected_college: None,
            majors: None,
            draft: ApplicantDraft::default(),
            policy_accepted: false,
            policy_dialog_open: false,
            notification: NotificationSlot::default(),
            verification: VerificationLock::default(),
            stale_majors,
        }
    }

    pub fn text_field(&self, input: TextInput) -> &ValidatedField {
        self.text.get(input)
    }

    pub fn edit_text(&mut self, input: TextInput, text: &str) {
        if let Some(confirmed) = self.text.get_mut(input).edit(text).map(str::to_owned) {
            self.draft.set(input.field(), Some(confirmed));
        }
    }

    pub fn college_field(&self) -> &SelectableField<CollegeId> {
        &self.college
    }

    pub fn major_field(&self) -> &SelectableField<Option<MajorId>> {
        &self.major
    }

    pub fn selected_college(&self) -> Option<CollegeId> {
        self.selected_college
    }

    pub fn majors(&self) -> Option<&[Major]> {
        self.majors.as_deref()
    }

    /// Clears the chosen major and the fetched list before asking for the
    /// majors of the new college. Re-selecting a college whose list is
    /// already loaded does nothing; re-selecting one whose lookup failed
    /// retries it.
    pub fn select_college(&mut self, label: &str) -> Option<FormCommand> {
        let (_, college_id) = self.college.select(label)?;
        if self.selected_college == Some(college_id) && self.majors.is_some() {
            return None;
        }

        self.selected_college = Some(college_id);
        self.majors = None;
        self.major.set_options(Vec::new());
        self.draft.major = None;
        debug!(college_id = college_id.0, "college selected; major cleared");
        Some(FormCommand::Api(ApiRequest::LookupMajors { college_id }))
    }

    pub fn select_major(&mut self, label: &str) {
        if let Some((name, _)) = self.major.select(label) {
            self.draft.major = Some(name);
        }
    }

    pub fn draft(&self) -> &ApplicantDraft {
        &self.draft
    }

    pub fn policy_accepted(&self) -> bool {
        self.policy_accepted
    }

    pub fn set_policy_accepted(&mut self, accepted: bool) {
        self.policy_accepted = accepted;
    }

    pub fn policy_dialog_open(&self) -> bool {
        self.policy_dialog_open
    }

    pub fn open_policy_dialog(&mut self) {
        self.policy_dialog_open = true;
    }

    pub fn close_policy_dialog(&mut self) {
        self.policy_dialog_open = false;
    }

    pub fn notification(&self) -> &NotificationSlot {
        &self.notification
    }

    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.notification.show(severity, message);
    }

    pub fn dismiss_notification(&mut self) {
        self.notification.dismiss();
    }

    pub fn expire_notification(&mut self, now: Instant) {
        self.notification.expire(now);
    }

    pub fn verification(&self) -> &VerificationLock {
        &self.verification
    }

    pub fn send_code_prerequisites_met(&self) -> bool {
        self.draft.name.is_some() && self.draft.email.is_some()
    }

    pub fn send_code_enabled(&self) -> bool {
        self.send_code_prerequisites_met() && !self.verification.is_busy()
    }

    pub fn send_code_label(&self) -> String {
        self.verification
            .button_label(self.send_code_prerequisites_met())
    }

    pub fn request_verification_code(&mut self) -> Result<FormCommand, VerificationError> {
        let (Some(name), Some(email)) = (self.draft.name.clone(), self.draft.email.clone()) else {
            return Err(VerificationError::MissingPrerequisites);
        };
        self.verification.begin_request()?;
        debug!("requesting verification mail");
        Ok(FormCommand::Api(ApiRequest::SendVerificationMail(
            SendMailRequest { name, email },
        )))
    }

    pub fn can_submit(&self) -> bool {
        self.policy_accepted && self.draft.is_complete()
    }

    pub fn submit(&mut self) -> Option<FormCommand> {
        if !self.policy_accepted {
            debug!("submit ignored: policy not accepted");
            return None;
        }
        let Some(applicant) = self.draft.to_applicant() else {
            debug!(missing = ?self.draft.missing_fields(), "submit ignored: draft incomplete");
            return None;
        };
        Some(FormCommand::Api(ApiRequest::SubmitApplication(applicant)))
    }

    pub fn apply(&mut self, event: FormEvent) -> Option<FormCommand> {
        match event {
            FormEvent::MajorsLoaded { college_id, result } => {
                self.apply_majors(college_id, result);
                None
            }
            FormEvent::VerificationMailSent(result) => self.apply_verification_result(result),
            FormEvent::ApplicationSubmitted(result) => {
                match result {
                    Ok(outcome) => self.notify_outcome("submit", &outcome),
                    Err(err) => self.notify_failure("submit", &err),
                }
                None
            }
            FormEvent::CountdownTick => match self.verification.tick() {
                TickResult::Counting(_) => None,
                TickResult::Expired => {
                    debug!("verification countdown finished");
                    Some(FormCommand::StopCountdown)
                }
                TickResult::Stray => Some(FormCommand::StopCountdown),
            },
        }
    }

    /// A command could not be handed to the backend worker.
    pub fn command_failed(&mut self, command: &FormCommand, reason: &str) {
        let err = ApiCallError::Unavailable(reason.to_string());
        match command {
            FormCommand::Api(ApiRequest::SendVerificationMail(_)) => {
                self.verification.release();
                self.notify_failure("send_mail", &err);
            }
            FormCommand::Api(request) => self.notify_failure(request.name(), &err),
            FormCommand::StartCountdown => {
                warn!(%reason, "countdown could not start; unlocking send button");
                self.verification.release();
            }
            FormCommand::StopCountdown => {
                warn!(%reason, "countdown stop could not be delivered");
            }
        }
    }

    fn apply_majors(&mut self, college_id: CollegeId, result: Result<Vec<Major>, ApiCallError>) {
        if self.selected_college != Some(college_id) {
            match self.stale_majors {
                StaleMajorPolicy::DiscardStale => {
                    warn!(
                        college_id = college_id.0,
                        current = ?self.selected_college.map(|id| id.0),
                        "discarding major list for a previous college selection"
                    );
                    return;
                }
                StaleMajorPolicy::LastArrivalWins => {
                    debug!(college_id = college_id.0, "applying late major list");
                }
            }
        }

        match result {
            Ok(majors) if self.majors.as_deref() == Some(majors.as_slice()) => {
                debug!(college_id = college_id.0, "major list unchanged; keeping selection");
            }
            Ok(majors) => {
                info!(college_id = college_id.0, count = majors.len(), "majors loaded");
                self.major.set_options(
                    majors
                        .iter()
                        .map(|major| SelectOption::new(Some(major.id), major.name.clone()))
                        .collect(),
                );
                self.draft.major = None;
                self.majors = Some(majors);
            }
            Err(err) => self.notify_failure("lookup_majors", &err),
        }
    }

    fn apply_verification_result(
        &mut self,
        result: Result<ActionOutcome, ApiCallError>,
    ) -> Option<FormCommand> {
        match result {
            Ok(outcome) => {
                self.notify_outcome("send_mail", &outcome);
                if outcome.is_success() {
                    self.verification.lock();
                    Some(FormCommand::StartCountdown)
                } else {
                    self.verification.release();
                    None
                }
            }
            Err(err) => {
                self.verification.release();
                self.notify_failure("send_mail", &err);
                None
            }
        }
    }

    fn notify_outcome(&mut self, action: &str, outcome: &ActionOutcome) {
        let severity = match outcome {
            ActionOutcome::Success(_) => {
                info!(action, server_message = outcome.message(), "action succeeded");
                Severity::Success
            }
            ActionOutcome::Info(_) => {
                warn!(action, server_message = outcome.message(), "action returned info status");
                Severity::Info
            }
            ActionOutcome::Error(_) => {
                warn!(action, server_message = outcome.message(), "action rejected by server");
                Severity::Error
            }
        };
        self.notify(severity, outcome.message());
    }

    fn notify_failure(&mut self, action: &str, err: &ApiCallError) {
        error!(action, %err, "backend call failed");
        self.notify(Severity::Error, err.user_message());
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
