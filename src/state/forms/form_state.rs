//! Form session state: current step, per-step validation and the record

use super::record::{FieldUpdate, FormRecord};
use crate::state::{StepValidation, MAX_STEPS};
use tracing::debug;

/// Single source of truth for questionnaire progress and content
///
/// Forward navigation is gated: step `n` is only reachable once steps
/// `0..n` have all been reported complete and valid through
/// [`FormSession::update_step_validation`]. Going back is always allowed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormSession {
    current_step: usize,
    step_validations: Vec<Option<StepValidation>>,
    form_data: FormRecord,
}

impl FormSession {
    /// Fresh session: step 0, no validations, every field empty/unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from previously stored parts
    ///
    /// Returns `None` when `current_step` is outside the step range.
    pub fn from_parts(
        current_step: usize,
        step_validations: Vec<Option<StepValidation>>,
        form_data: FormRecord,
    ) -> Option<Self> {
        (current_step < MAX_STEPS).then_some(Self {
            current_step,
            step_validations,
            form_data,
        })
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn max_steps(&self) -> usize {
        MAX_STEPS
    }

    /// Sparse list of validations, indexed by step
    pub fn step_validations(&self) -> &[Option<StepValidation>] {
        &self.step_validations
    }

    pub fn step_validation(&self, step: usize) -> Option<StepValidation> {
        self.step_validations.get(step).copied().flatten()
    }

    pub fn form_data(&self) -> &FormRecord {
        &self.form_data
    }

    /// Jump to `step` if it is in range and the gate allows it
    ///
    /// Returns whether the current step changed.
    pub fn set_current_step(&mut self, step: usize) -> bool {
        if step < MAX_STEPS && self.can_navigate_to_step(step) {
            self.current_step = step;
            true
        } else {
            debug!(
                requested = step,
                current = self.current_step,
                "navigation ignored"
            );
            false
        }
    }

    pub fn can_navigate_to_step(&self, step: usize) -> bool {
        if step < self.current_step {
            return true;
        }

        (0..step).all(|i| self.step_validation(i).is_some_and(|v| v.passes()))
    }

    /// Record the UI's verdict for `step`, growing the list as needed.
    /// Indices past the last step name no step and are dropped.
    pub fn update_step_validation(&mut self, step: usize, is_complete: bool, is_valid: bool) -> bool {
        if step >= MAX_STEPS {
            debug!(step, "validation for unknown step ignored");
            return false;
        }
        if step >= self.step_validations.len() {
            self.step_validations.resize(step + 1, None);
        }
        self.step_validations[step] = Some(StepValidation::new(is_complete, is_valid));
        true
    }

    pub fn update_field(&mut self, update: FieldUpdate) {
        self.form_data.apply(update);
    }

    /// Replace the whole record (draft restore). Step and validations stay.
    pub fn update_form_data(&mut self, record: FormRecord) {
        self.form_data = record;
    }

    /// Advance by one without consulting the gate
    pub fn next_step(&mut self) -> bool {
        if self.current_step < MAX_STEPS - 1 {
            self.current_step += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_step(&mut self) -> bool {
        if self.current_step > 0 {
            self.current_step -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset_form(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Answer, FieldId, NumericText};
    use pretty_assertions::assert_eq;

    fn session_at(step: usize) -> FormSession {
        let mut session = FormSession::new();
        for i in 0..step {
            session.update_step_validation(i, true, true);
        }
        assert!(session.set_current_step(step));
        session
    }

    mod construction {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_is_initial_state() {
            let session = FormSession::new();
            assert_eq!(session.current_step(), 0);
            assert_eq!(session.max_steps(), 5);
            assert!(session.step_validations().is_empty());
            assert_eq!(session.form_data(), &FormRecord::default());
        }

        #[test]
        fn test_from_parts_rejects_out_of_range_step() {
            assert!(FormSession::from_parts(5, vec![], FormRecord::new()).is_none());
            let restored = FormSession::from_parts(4, vec![None], FormRecord::new()).unwrap();
            assert_eq!(restored.current_step(), 4);
        }
    }

    mod navigation_gate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_step_zero_always_reachable() {
            assert!(FormSession::new().can_navigate_to_step(0));
        }

        #[test]
        fn test_forward_blocked_without_validations() {
            let session = FormSession::new();
            for step in 1..5 {
                assert!(!session.can_navigate_to_step(step));
            }
        }

        #[test]
        fn test_backward_always_allowed() {
            let mut session = session_at(3);
            // Invalidate everything; going back must still work.
            for i in 0..3 {
                session.update_step_validation(i, false, false);
            }
            assert!(session.can_navigate_to_step(0));
            assert!(session.can_navigate_to_step(2));
            assert!(!session.can_navigate_to_step(3));
        }

        #[test]
        fn test_every_prior_step_must_pass() {
            let mut session = FormSession::new();
            session.update_step_validation(0, true, true);
            session.update_step_validation(1, true, false);
            session.update_step_validation(2, true, true);

            assert!(session.can_navigate_to_step(1));
            assert!(!session.can_navigate_to_step(2));
            assert!(!session.can_navigate_to_step(3));
        }

        #[test]
        fn test_incomplete_step_blocks() {
            let mut session = FormSession::new();
            session.update_step_validation(0, false, true);
            assert!(!session.can_navigate_to_step(1));
        }

        #[test]
        fn test_missing_slot_blocks() {
            let mut session = FormSession::new();
            session.update_step_validation(1, true, true);
            assert_eq!(session.step_validations(), &[None, Some(StepValidation::new(true, true))]);
            assert!(!session.can_navigate_to_step(2));
        }

        #[test]
        fn test_validation_past_last_step_is_dropped() {
            let mut session = FormSession::new();
            session.update_step_validation(0, true, true);
            assert!(!session.update_step_validation(MAX_STEPS, true, true));
            assert!(!session.update_step_validation(usize::MAX, true, true));
            assert_eq!(session.step_validations(), &[Some(StepValidation::new(true, true))]);
        }

        #[test]
        fn test_gate_reacts_to_later_updates() {
            let mut session = FormSession::new();
            session.update_step_validation(0, true, true);
            assert!(session.can_navigate_to_step(1));
            session.update_step_validation(0, true, false);
            assert!(!session.can_navigate_to_step(1));
        }

        #[test]
        fn test_current_step_itself_needs_prior_steps() {
            let mut session = FormSession::new();
            session.next_step();
            session.next_step();
            // Reached step 2 ungated; staying there is still gated.
            assert!(!session.can_navigate_to_step(2));
            assert!(session.can_navigate_to_step(1));
        }
    }

    mod set_current_step {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_moves_when_gate_open() {
            let mut session = FormSession::new();
            session.update_step_validation(0, true, true);
            session.update_step_validation(1, true, true);
            assert!(session.set_current_step(2));
            assert_eq!(session.current_step(), 2);
        }

        #[test]
        fn test_ignored_when_gate_closed() {
            let mut session = FormSession::new();
            assert!(!session.set_current_step(2));
            assert_eq!(session.current_step(), 0);
        }

        #[test]
        fn test_ignored_when_out_of_range() {
            let mut session = session_at(4);
            session.update_step_validation(4, true, true);
            assert!(session.can_navigate_to_step(5));
            assert!(!session.set_current_step(5));
            assert!(!session.set_current_step(usize::MAX));
            assert_eq!(session.current_step(), 4);
        }

        #[test]
        fn test_backward_jump() {
            let mut session = session_at(3);
            assert!(session.set_current_step(1));
            assert_eq!(session.current_step(), 1);
        }

        #[test]
        fn test_same_step_is_allowed_when_gate_open() {
            let mut session = session_at(2);
            assert!(session.set_current_step(2));
            assert_eq!(session.current_step(), 2);
        }
    }

    mod sequential {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_next_step_ignores_validation() {
            let mut session = FormSession::new();
            assert!(session.next_step());
            assert_eq!(session.current_step(), 1);
        }

        #[test]
        fn test_next_step_stops_at_last() {
            let mut session = FormSession::new();
            for _ in 0..10 {
                session.next_step();
            }
            assert_eq!(session.current_step(), 4);
            assert!(!session.next_step());
            assert_eq!(session.current_step(), 4);
        }

        #[test]
        fn test_prev_step_stops_at_zero() {
            let mut session = FormSession::new();
            assert!(!session.prev_step());
            assert_eq!(session.current_step(), 0);
        }

        #[test]
        fn test_prev_step_decrements() {
            let mut session = session_at(3);
            assert!(session.prev_step());
            assert_eq!(session.current_step(), 2);
        }
    }

    mod record_updates {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_update_field_keeps_step() {
            let mut session = session_at(1);
            session.update_field(FieldUpdate::PropertyAddress("123 Main St".to_string()));
            assert_eq!(session.form_data().property_address, "123 Main St");
            assert_eq!(session.current_step(), 1);
        }

        #[test]
        fn test_update_form_data_replaces_record_only() {
            let mut session = session_at(2);
            let mut draft = FormRecord::new();
            draft.apply(FieldUpdate::County("Cook".to_string()));
            draft.apply(FieldUpdate::YearBuilt(NumericText::Number(1955.0)));

            session.update_form_data(draft.clone());

            assert_eq!(session.form_data(), &draft);
            assert_eq!(session.current_step(), 2);
            assert_eq!(session.step_validations().len(), 2);
        }
    }

    mod reset {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_reset_form_returns_to_initial_state() {
            let mut session = session_at(3);
            session.update_field(FieldUpdate::HeightRestrictionCompliant(Answer::No));
            session.update_field(FieldUpdate::Acres(NumericText::Number(2.0)));

            session.reset_form();

            assert_eq!(session, FormSession::new());
            for id in FieldId::ALL {
                assert!(session.form_data().value(*id).is_blank());
            }
        }
    }

    #[test]
    fn test_walkthrough() {
        let mut session = FormSession::new();
        assert_eq!(session.current_step(), 0);
        assert_eq!(session.form_data().property_address, "");

        session.update_field(FieldUpdate::PropertyAddress("123 Main St".to_string()));
        assert_eq!(session.form_data().property_address, "123 Main St");
        assert_eq!(session.current_step(), 0);

        session.set_current_step(2);
        assert_eq!(session.current_step(), 0);

        session.update_step_validation(0, true, true);
        session.update_step_validation(1, true, true);
        session.set_current_step(2);
        assert_eq!(session.current_step(), 2);

        session.prev_step();
        assert_eq!(session.current_step(), 1);

        session.reset_form();
        assert_eq!(session.current_step(), 0);
        assert_eq!(session.form_data().property_address, "");
        assert!(session.step_validations().is_empty());
    }
}
