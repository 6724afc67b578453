//! Member registry store

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::member::Member,
};

/// Owns all member records and each member's borrow set, bounded by the
/// configured per-member limit.
#[derive(Debug)]
pub struct MemberRegistry {
    members: IndexMap<String, Member>,
    max_borrows: usize,
}

impl MemberRegistry {
    pub fn new(max_borrows: usize) -> Self {
        Self {
            members: IndexMap::new(),
            max_borrows,
        }
    }

    pub fn max_borrows(&self) -> usize {
        self.max_borrows
    }

    /// Register a new member. Fails with `Duplicate` when the id is taken.
    pub fn register(&mut self, member: Member) -> AppResult<()> {
        if self.members.contains_key(&member.member_id) {
            return Err(AppError::Duplicate(format!(
                "Member with id {} already exists",
                member.member_id
            )));
        }
        self.members.insert(member.member_id.clone(), member);
        Ok(())
    }

    /// Get a member by id
    pub fn get(&self, id: &str) -> AppResult<&Member> {
        self.members
            .get(id)
            .ok_or_else(|| AppError::MemberNotFound(format!("Member with id {} not found", id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains_key(id)
    }

    /// True iff the member exists, holds fewer items than the limit, and
    /// does not already hold this item.
    pub fn can_borrow(&self, member_id: &str, item_id: &str) -> bool {
        self.members.get(member_id).is_some_and(|member| {
            member.borrowed.len() < self.max_borrows && !member.borrowed.contains(item_id)
        })
    }

    /// Add an item id to the member's borrow set. Returns false, leaving
    /// the set untouched, when `can_borrow` does not hold.
    pub fn record_borrow(&mut self, member_id: &str, item_id: &str) -> bool {
        if !self.can_borrow(member_id, item_id) {
            return false;
        }
        match self.members.get_mut(member_id) {
            Some(member) => member.borrowed.insert(item_id.to_string()),
            None => false,
        }
    }

    /// Remove an item id from the member's borrow set. Returns false when
    /// the member does not exist or the id is absent from the set.
    pub fn record_return(&mut self, member_id: &str, item_id: &str) -> bool {
        match self.members.get_mut(member_id) {
            Some(member) => member.borrowed.shift_remove(item_id),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str) -> Member {
        Member::new(id, "Test Member", "test@example.com")
    }

    #[test]
    fn register_rejects_duplicate_ids() {
        let mut registry = MemberRegistry::new(5);
        registry.register(member("M001")).unwrap();
        let err = registry.register(member("M001")).unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn borrow_set_is_bounded() {
        let mut registry = MemberRegistry::new(2);
        registry.register(member("M001")).unwrap();

        assert!(registry.record_borrow("M001", "B001"));
        assert!(registry.record_borrow("M001", "B002"));
        assert!(!registry.can_borrow("M001", "B003"));
        assert!(!registry.record_borrow("M001", "B003"));
        assert_eq!(registry.get("M001").unwrap().borrowed_count(), 2);
    }

    #[test]
    fn cannot_borrow_same_item_twice() {
        let mut registry = MemberRegistry::new(5);
        registry.register(member("M001")).unwrap();

        assert!(registry.record_borrow("M001", "B001"));
        assert!(!registry.can_borrow("M001", "B001"));
        assert!(!registry.record_borrow("M001", "B001"));
        assert_eq!(registry.get("M001").unwrap().borrowed_count(), 1);
    }

    #[test]
    fn return_of_unheld_item_fails() {
        let mut registry = MemberRegistry::new(5);
        registry.register(member("M001")).unwrap();

        assert!(!registry.record_return("M001", "B001"));
        assert!(!registry.record_return("M999", "B001"));

        assert!(registry.record_borrow("M001", "B001"));
        assert!(registry.record_return("M001", "B001"));
        assert!(!registry.record_return("M001", "B001"));
    }

    #[test]
    fn unknown_member_cannot_borrow() {
        let registry = MemberRegistry::new(5);
        assert!(!registry.can_borrow("M999", "B001"));
    }
}
