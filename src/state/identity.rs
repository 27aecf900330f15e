use crate::models::types::UserName;
use crate::state::session::Session;
use parking_lot::RwLock;

/// Resolves who issued the current request. Profile mutations are always scoped to this
/// user; `None` means the caller is not an interactive, identified player.
pub trait CurrentUserLookup: Send + Sync {
    fn current_user(&self) -> Option<UserName>;
}

impl CurrentUserLookup for RwLock<Session> {
    fn current_user(&self) -> Option<UserName> {
        let s = self.read();
        if s.is_logged_in() { s.get_user() } else { None }
    }
}

/// A caller with a fixed identity (or none), for tooling and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedUser(pub Option<UserName>);

impl FixedUser {
    pub fn named(user: UserName) -> Self {
        Self(Some(user))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl CurrentUserLookup for FixedUser {
    fn current_user(&self) -> Option<UserName> {
        self.0.clone()
    }
}
