//! Application state - single source of truth
//!
//! Views never hold `&mut AppState`: they observe slices through
//! `StoreHandle::select` and change it by dispatching actions.

use serde::{Deserialize, Serialize};

/// The signed-in user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

impl User {
    /// This user with only the name replaced
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

/// User slice of the state (`None` = signed out)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserState {
    pub user: Option<User>,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub user: UserState,
}

impl AppState {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: UserState { user: Some(user) },
        }
    }
}

/// Selector for the cached user of a view
pub fn select_user(state: &AppState) -> Option<User> {
    state.user.user.clone()
}
