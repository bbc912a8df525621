use serde::{Deserialize, Serialize};

use crate::{
    domain::{CollegeId, Major, MajorId},
    error::ProtocolError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorLookupRequest {
    pub college_id: CollegeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMailRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorRecord {
    pub major_name: String,
    pub id: MajorId,
}

impl From<MajorRecord> for Major {
    fn from(value: MajorRecord) -> Self {
        Self {
            name: value.major_name,
            id: value.id,
        }
    }
}

/// Body of `/ajaxGetMajor`: either the major list or an error string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MajorListResponse {
    Majors(Vec<Major>),
    Rejected(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMajorList {
    Majors(Vec<MajorRecord>),
    Message(String),
}

impl MajorListResponse {
    /// Non-JSON text is the backend's plain error string. JSON of any other
    /// shape than a list or a string is malformed.
    pub fn from_body(body: &str) -> Result<Self, ProtocolError> {
        let value = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => value,
            Err(_) => return Ok(Self::Rejected(body.trim().to_string())),
        };
        Ok(match serde_json::from_value::<RawMajorList>(value)? {
            RawMajorList::Majors(records) => {
                Self::Majors(records.into_iter().map(Major::from).collect())
            }
            RawMajorList::Message(message) => Self::Rejected(message),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Success,
    Info,
    Error,
}

impl ActionStatus {
    pub fn from_code(code: i64) -> Result<Self, ProtocolError> {
        match code {
            0 => Ok(Self::Success),
            1 => Ok(Self::Info),
            2 => Ok(Self::Error),
            other => Err(ProtocolError::UnknownStatus(other)),
        }
    }
}

/// Body of `/sendMail` and `/submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionReply {
    pub status: i64,
    #[serde(default)]
    pub message: String,
}

/// Decoded result of an action endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Success(String),
    Info(String),
    Error(String),
}

impl ActionOutcome {
    pub fn status(&self) -> ActionStatus {
        match self {
            Self::Success(_) => ActionStatus::Success,
            Self::Info(_) => ActionStatus::Info,
            Self::Error(_) => ActionStatus::Error,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Info(message) | Self::Error(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl ActionReply {
    pub fn into_outcome(self) -> Result<ActionOutcome, ProtocolError> {
        Ok(match ActionStatus::from_code(self.status)? {
            ActionStatus::Success => ActionOutcome::Success(self.message),
            ActionStatus::Info => ActionOutcome::Info(self.message),
            ActionStatus::Error => ActionOutcome::Error(self.message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_list_body_decodes_records() {
        let parsed =
            MajorListResponse::from_body(r#"[{"major_name":"软件工程","id":101}]"#).expect("decode");
        assert_eq!(
            parsed,
            MajorListResponse::Majors(vec![Major {
                name: "软件工程".to_string(),
                id: MajorId(101),
            }])
        );
    }

    #[test]
    fn major_list_error_string_is_rejection() {
        assert_eq!(
            MajorListResponse::from_body(r#""college not found""#).expect("decode"),
            MajorListResponse::Rejected("college not found".to_string())
        );
        assert_eq!(
            MajorListResponse::from_body("参数错误\n").expect("decode"),
            MajorListResponse::Rejected("参数错误".to_string())
        );
    }

    #[test]
    fn major_list_object_body_is_malformed() {
        let err = MajorListResponse::from_body(r#"{"unexpected":true}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed(_)));
    }

    #[test]
    fn action_reply_maps_status_to_outcome() {
        let outcome = ActionReply {
            status: 2,
            message: "学号已存在".to_string(),
        }
        .into_outcome()
        .expect("known status");
        assert_eq!(outcome, ActionOutcome::Error("学号已存在".to_string()));
        assert_eq!(outcome.status(), ActionStatus::Error);

        let unknown = ActionReply {
            status: 7,
            message: String::new(),
        }
        .into_outcome();
        assert!(matches!(unknown, Err(ProtocolError::UnknownStatus(7))));
    }

    #[test]
    fn college_id_serializes_as_bare_number() {
        let body = serde_json::to_value(MajorLookupRequest {
            college_id: CollegeId(8),
        })
        .expect("serialize");
        assert_eq!(body["college_id"], 8);
    }
}
