//! Reducer - pure function: (state, action) -> changed
//!
//! Returns `true` only when the state actually changed, so views subscribed
//! to the user slice are not woken by no-op edits.

use crate::action::Action;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::UserEdit(user) => {
            if state.user.user.as_ref() == Some(&user) {
                false
            } else {
                state.user.user = Some(user);
                true
            }
        }

        Action::UserLogout => state.user.user.take().is_some(),

        // Quit is handled in main loop, not here
        Action::Quit => false,
    }
}
