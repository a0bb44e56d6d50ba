use serde::{Deserialize, Serialize};

use crate::backend::wire::serialize_weights;
use crate::models::SkillParameter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupInitRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifySignupRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A logged-in user. The backend calls the token `access_token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(alias = "access_token")]
    pub token: String,
    pub user_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

/// Body of `POST /jd/submit` and `PUT /jd/update/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct JdPayload {
    pub job_title: String,
    pub job_description: String,
    #[serde(serialize_with = "serialize_weights")]
    pub skills: Vec<SkillParameter>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmitResponse {
    pub message: String,
    #[serde(default)]
    pub jd_id: Option<String>,
}
