//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as `RwSignal<AuthState>` by the root component. Route guards fill
//! it from `GET /auth/user/`; pages read the username from it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use wire::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    /// Starts loading: nothing is known until the session check returns.
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    /// Session check succeeded.
    pub fn signed_in(&mut self, user: User) {
        self.user = Some(user);
        self.loading = false;
    }

    /// Session check failed or the user logged out.
    pub fn signed_out(&mut self) {
        self.user = None;
        self.loading = false;
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}
