//! Store actions
//!
//! Naming follows `<Category><Verb>`: `UserEdit`, `UserLogout`.

use crate::state::User;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Replace the stored user with a full snapshot
    UserEdit(User),

    /// Sign the user out
    UserLogout,

    /// Exit the application (handled by the main loop)
    Quit,
}

impl dashboard_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::UserEdit(_) => "UserEdit",
            Action::UserLogout => "UserLogout",
            Action::Quit => "Quit",
        }
    }

    fn summary(&self) -> String {
        match self {
            // Keep email out of logs
            Action::UserEdit(user) => {
                format!("UserEdit {{ id: {}, name: {:?} }}", user.id, user.name)
            }
            _ => self.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::Action as _;

    #[test]
    fn test_summary_omits_email() {
        let action = Action::UserEdit(User {
            id: 3,
            name: "Ada".into(),
            email: "secret@example.com".into(),
        });

        assert_eq!(action.name(), "UserEdit");
        assert_eq!(action.summary(), r#"UserEdit { id: 3, name: "Ada" }"#);
    }
}
