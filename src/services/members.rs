//! Member management service

use std::sync::Arc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    factory::IdGenerator,
    models::member::{CreateMember, Member},
    repository::Repository,
};

/// Attempts at allocating a fresh generated member id before giving up
const ID_ATTEMPTS: usize = 8;

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
    ids: Arc<IdGenerator>,
}

impl MembersService {
    pub fn new(repository: Repository, ids: Arc<IdGenerator>) -> Self {
        Self { repository, ids }
    }

    /// Register a new member. The id is generated when the request does not
    /// carry one; explicit ids fail with `Duplicate` when already taken.
    pub async fn register(&self, request: CreateMember) -> AppResult<Member> {
        request.validate()?;

        if let Some(member_id) = request.member_id {
            let member = Member::new(member_id, request.name, request.email);
            let mut state = self.repository.write().await;
            state.members.register(member.clone())?;
            tracing::info!("member {} registered", member.member_id);
            return Ok(member);
        }

        for _ in 0..ID_ATTEMPTS {
            let member = Member::new(self.ids.next_id('M'), request.name.clone(), request.email.clone());
            let mut state = self.repository.write().await;
            match state.members.register(member.clone()) {
                Ok(()) => {
                    tracing::info!("member {} registered", member.member_id);
                    return Ok(member);
                }
                Err(AppError::Duplicate(_)) => continue,
                Err(err) => return Err(err),
            }
        }
        Err(AppError::Internal(
            "Could not allocate an unused member id".to_string(),
        ))
    }

    /// Get one member by id
    pub async fn get_member(&self, id: &str) -> AppResult<Member> {
        let state = self.repository.read().await;
        state.members.get(id).cloned()
    }
}
