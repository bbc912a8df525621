use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use shared::{
    domain::{Applicant, CollegeId, Major},
    error::ProtocolError,
    protocol::{ActionOutcome, ActionReply, MajorListResponse, MajorLookupRequest, SendMailRequest},
};
use tracing::debug;

pub mod config;
pub mod countdown;
pub mod error;
pub mod field;
pub mod form;
pub mod notification;
pub mod validation;
pub mod verification;

pub use config::{ClientConfig, StaleMajorPolicy};
pub use countdown::CountdownTicker;
pub use error::{ApiCallError, NETWORK_ERROR_MESSAGE};
pub use form::{FormCommand, FormEvent, RecruitForm, TextInput};
pub use notification::{AnchorOrigin, HorizontalAnchor, Notification, Severity, VerticalAnchor};
pub use verification::{VerificationError, VerificationPhase};

pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

const MAJORS_PATH: &str = "ajaxGetMajor";
const SEND_MAIL_PATH: &str = "sendMail";
const SUBMIT_PATH: &str = "submit";

/// One call against the recruitment backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    LookupMajors { college_id: CollegeId },
    SendVerificationMail(SendMailRequest),
    SubmitApplication(Applicant),
}

impl ApiRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LookupMajors { .. } => "lookup_majors",
            Self::SendVerificationMail(_) => "send_mail",
            Self::SubmitApplication(_) => "submit",
        }
    }
}

#[async_trait]
pub trait RecruitApi: Send + Sync {
    /// An error string in place of the list comes back as [`ApiCallError::Rejected`].
    async fn fetch_majors(&self, college_id: CollegeId) -> Result<Vec<Major>, ApiCallError>;
    async fn send_verification_mail(
        &self,
        request: &SendMailRequest,
    ) -> Result<ActionOutcome, ApiCallError>;
    async fn submit_application(&self, applicant: &Applicant)
        -> Result<ActionOutcome, ApiCallError>;
}

/// Form-encoded HTTP client for the three backend endpoints.
pub struct HttpRecruitApi {
    http: Client,
    base_url: String,
}

impl HttpRecruitApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: &ClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_form<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, ApiCallError> {
        let url = format!("{}/{path}", self.base_url);
        debug!(%url, "posting form");
        let res = self
            .http
            .post(&url)
            .form(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.text().await?)
    }

    async fn post_action<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ActionOutcome, ApiCallError> {
        let text = self.post_form(path, body).await?;
        let reply: ActionReply = serde_json::from_str(&text).map_err(ProtocolError::from)?;
        Ok(reply.into_outcome()?)
    }
}

#[async_trait]
impl RecruitApi for HttpRecruitApi {
    async fn fetch_majors(&self, college_id: CollegeId) -> Result<Vec<Major>, ApiCallError> {
        let text = self
            .post_form(MAJORS_PATH, &MajorLookupRequest { college_id })
            .await?;
        match MajorListResponse::from_body(&text)? {
            MajorListResponse::Majors(majors) => Ok(majors),
            MajorListResponse::Rejected(message) => Err(ApiCallError::Rejected(message)),
        }
    }

    async fn send_verification_mail(
        &self,
        request: &SendMailRequest,
    ) -> Result<ActionOutcome, ApiCallError> {
        self.post_action(SEND_MAIL_PATH, request).await
    }

    async fn submit_application(
        &self,
        applicant: &Applicant,
    ) -> Result<ActionOutcome, ApiCallError> {
        self.post_action(SUBMIT_PATH, applicant).await
    }
}

/// Runs one request and packages the result for [`RecruitForm::apply`].
pub async fn execute(api: &dyn RecruitApi, request: ApiRequest) -> FormEvent {
    let name = request.name();
    let event = match request {
        ApiRequest::LookupMajors { college_id } => FormEvent::MajorsLoaded {
            college_id,
            result: api.fetch_majors(college_id).await,
        },
        ApiRequest::SendVerificationMail(body) => {
            FormEvent::VerificationMailSent(api.send_verification_mail(&body).await)
        }
        ApiRequest::SubmitApplication(applicant) => {
            FormEvent::ApplicationSubmitted(api.submit_application(&applicant).await)
        }
    };

    let failed = matches!(
        &event,
        FormEvent::MajorsLoaded { result: Err(_), .. }
            | FormEvent::VerificationMailSent(Err(_))
            | FormEvent::ApplicationSubmitted(Err(_))
    );
    debug!(request = name, failed, "backend request finished");
    event
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
