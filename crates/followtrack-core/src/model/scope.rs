use serde::{Deserialize, Serialize};

/// The (account id, chat-group id) pair that partitions all stored data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub owner_id: i64,
    /// 0 means a private (direct-message) context
    pub group_id: i64,
}

impl Scope {
    pub const PRIVATE_GROUP: i64 = 0;

    pub fn new(owner_id: i64, group_id: i64) -> Self {
        Self { owner_id, group_id }
    }

    /// Scope for a private conversation with the owner
    pub fn private(owner_id: i64) -> Self {
        Self::new(owner_id, Self::PRIVATE_GROUP)
    }

    pub fn is_private(&self) -> bool {
        self.group_id == Self::PRIVATE_GROUP
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner_id, self.group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_scope() {
        let scope = Scope::private(42);
        assert!(scope.is_private());
        assert_eq!(scope.group_id, 0);
        assert!(!Scope::new(42, 7).is_private());
    }

    #[test]
    fn test_display() {
        assert_eq!(Scope::new(1, 2).to_string(), "1/2");
    }
}
