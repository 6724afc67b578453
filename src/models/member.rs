//! Member model and related types

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A registered library member and the set of item ids currently on loan
/// to them. The borrow set preserves borrow order and is mutated only
/// through circulation transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub member_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub borrowed: IndexSet<String>,
}

impl Member {
    pub fn new(member_id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            name: name.into(),
            email: email.into(),
            borrowed: IndexSet::new(),
        }
    }

    /// Number of items currently on loan to this member
    pub fn borrowed_count(&self) -> usize {
        self.borrowed.len()
    }
}

/// Create member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    /// Member id; generated when omitted
    pub member_id: Option<String>,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}
