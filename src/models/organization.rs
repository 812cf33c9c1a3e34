use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::util::require_non_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
}

impl CreateOrganization {
    pub fn validate(&self) -> Result<()> {
        require_non_blank(&self.name, "Organization name")
    }
}

/// Rename payload. Organizations have no other mutable fields.
#[derive(Debug, Deserialize)]
pub struct UpdateOrganization {
    pub name: String,
}

impl UpdateOrganization {
    pub fn validate(&self) -> Result<()> {
        require_non_blank(&self.name, "Organization name")
    }
}
