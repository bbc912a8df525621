use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);
    };
}

id_newtype!(CollegeId, u32);
id_newtype!(MajorId, i64);

/// Label shown by every dropdown before a real choice is made.
pub const PLACEHOLDER_LABEL: &str = "请选择";

impl CollegeId {
    pub const UNSELECTED: Self = Self(0);

    pub fn is_sentinel(self) -> bool {
        self == Self::UNSELECTED
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct College {
    pub id: CollegeId,
    pub name: &'static str,
}

const fn college(id: u32, name: &'static str) -> College {
    College {
        id: CollegeId(id),
        name,
    }
}

/// Colleges accepted by the backend. Ids are not contiguous.
pub const COLLEGES: &[College] = &[
    college(1, "理学院"),
    college(2, "管理学院"),
    college(3, "能源学院"),
    college(4, "建工学院"),
    college(5, "机械学院"),
    college(6, "电控学院"),
    college(7, "通信学院"),
    college(8, "计算机学院"),
    college(9, "地环学院"),
    college(10, "测绘学院"),
    college(11, "材料学院"),
    college(14, "化工学院"),
    college(15, "艺术学院"),
    college(17, "安全学院"),
    college(18, "人文与外国语学院"),
];

pub fn college_by_id(id: CollegeId) -> Option<&'static College> {
    COLLEGES.iter().find(|college| college.id == id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Major {
    pub name: String,
    pub id: MajorId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicantField {
    Name,
    StudentId,
    PhoneNumber,
    Email,
    Major,
    VerificationCode,
}

impl ApplicantField {
    pub const ALL: [ApplicantField; 6] = [
        ApplicantField::Name,
        ApplicantField::StudentId,
        ApplicantField::PhoneNumber,
        ApplicantField::Email,
        ApplicantField::Major,
        ApplicantField::VerificationCode,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "姓名",
            Self::StudentId => "学号",
            Self::PhoneNumber => "电话号码",
            Self::Email => "邮箱",
            Self::Major => "专业",
            Self::VerificationCode => "验证码",
        }
    }
}

/// Complete application payload as posted to `/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub student_id: String,
    pub telephone: String,
    pub email: String,
    pub major: String,
    pub code: String,
}

/// Applicant fields collected so far; a field stays `None` until its input validates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantDraft {
    pub name: Option<String>,
    pub student_id: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub major: Option<String>,
    pub verification_code: Option<String>,
}

impl ApplicantDraft {
    pub fn get(&self, field: ApplicantField) -> Option<&str> {
        let value = match field {
            ApplicantField::Name => &self.name,
            ApplicantField::StudentId => &self.student_id,
            ApplicantField::PhoneNumber => &self.phone_number,
            ApplicantField::Email => &self.email,
            ApplicantField::Major => &self.major,
            ApplicantField::VerificationCode => &self.verification_code,
        };
        value.as_deref()
    }

    pub fn set(&mut self, field: ApplicantField, value: Option<String>) {
        let slot = match field {
            ApplicantField::Name => &mut self.name,
            ApplicantField::StudentId => &mut self.student_id,
            ApplicantField::PhoneNumber => &mut self.phone_number,
            ApplicantField::Email => &mut self.email,
            ApplicantField::Major => &mut self.major,
            ApplicantField::VerificationCode => &mut self.verification_code,
        };
        *slot = value;
    }

    pub fn missing_fields(&self) -> Vec<ApplicantField> {
        ApplicantField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        ApplicantField::ALL
            .into_iter()
            .all(|field| self.get(field).is_some())
    }

    pub fn to_applicant(&self) -> Option<Applicant> {
        Some(Applicant {
            name: self.name.clone()?,
            student_id: self.student_id.clone()?,
            telephone: self.phone_number.clone()?,
            email: self.email.clone()?,
            major: self.major.clone()?,
            code: self.verification_code.clone()?,
        })
    }
}
