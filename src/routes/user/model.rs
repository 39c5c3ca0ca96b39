use serde::{Deserialize, Serialize};

use crate::database::UserRecord;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_name: String,
    pub posts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

impl From<UserRecord> for User {
    fn from(user: UserRecord) -> Self {
        Self {
            user_name: user.user_name,
            posts: user.posts,
        }
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.user_name.trim().is_empty() || self.user_name.contains('/') {
            return Err(AppError::Validation("invalid userName".into()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("password must not be empty".into()));
        }
        Ok(())
    }
}
