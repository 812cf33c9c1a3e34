use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::util::require_non_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub organization_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccount {
    pub name: String,
    pub organization_id: i64,
}

impl CreateAccount {
    pub fn validate(&self) -> Result<()> {
        require_non_blank(&self.name, "Account name")?;
        if self.organization_id <= 0 {
            return Err(AppError::Validation(
                "organizationId must be a positive integer".into(),
            ));
        }
        Ok(())
    }
}
