//! Goal status transition rules.
//!
//! Transitions are explicit user actions. Reaching 100% progress never
//! completes a goal by itself; the client gates the "complete" action on
//! progress, the server does not.

use crate::error::AppError;
use crate::models::goal::GoalStatus;

/// The four permitted transitions: pause, resume, complete, reopen.
pub fn is_allowed(from: GoalStatus, to: GoalStatus) -> bool {
    matches!(
        (from, to),
        (GoalStatus::Active, GoalStatus::Paused)
            | (GoalStatus::Paused, GoalStatus::Active)
            | (GoalStatus::Active, GoalStatus::Completed)
            | (GoalStatus::Completed, GoalStatus::Active)
    )
}

pub fn check_transition(from: GoalStatus, to: GoalStatus) -> Result<(), AppError> {
    if is_allowed(from, to) {
        Ok(())
    } else {
        Err(AppError::InvalidTransition(format!(
            "Cannot transition goal from {:?} to {:?}",
            from, to
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GoalStatus::*;

    #[test]
    fn pause_resume_complete_reopen_are_allowed() {
        assert!(is_allowed(Active, Paused));
        assert!(is_allowed(Paused, Active));
        assert!(is_allowed(Active, Completed));
        assert!(is_allowed(Completed, Active));
    }

    #[test]
    fn everything_else_is_rejected() {
        assert!(!is_allowed(Paused, Completed));
        assert!(!is_allowed(Completed, Paused));
        assert!(!is_allowed(Cancelled, Active));
        assert!(!is_allowed(Active, Cancelled));
        assert!(!is_allowed(Active, Active));
        assert!(!is_allowed(Completed, Completed));
    }

    #[test]
    fn check_transition_returns_invalid_transition_error() {
        let err = check_transition(Paused, Completed).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }
}
