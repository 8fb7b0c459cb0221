//! Step-through state for a single scenario.
//!
//! Navigation past either end is a no-op, not an error. The stepper borrows
//! its scenario; every rendered stepper instance owns its own position.

use crate::types::{Scenario, ScenarioStep};
use std::fmt;

#[derive(Debug, Clone, Copy)]
pub struct ScenarioStepper<'a> {
    scenario: &'a Scenario,
    current: usize,
}

impl<'a> ScenarioStepper<'a> {
    /// Stepper positioned at the first step. `None` if the scenario has no
    /// steps (content validation rejects those before rendering).
    pub fn new(scenario: &'a Scenario) -> Option<Self> {
        if scenario.steps.is_empty() {
            return None;
        }
        Some(Self {
            scenario,
            current: 0,
        })
    }

    /// Stepper positioned at `index`, or `None` if out of range.
    pub fn at(scenario: &'a Scenario, index: usize) -> Option<Self> {
        let mut stepper = Self::new(scenario)?;
        stepper.jump_to(index).then_some(stepper)
    }

    /// Advance one step. Returns whether the position changed.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Go back one step. Returns whether the position changed.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump directly to `index`. Out-of-range indices are ignored and
    /// return `false`.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.step_count() {
            return false;
        }
        self.current = index;
        true
    }

    pub fn scenario(&self) -> &'a Scenario {
        self.scenario
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &'a ScenarioStep {
        &self.scenario.steps[self.current]
    }

    pub fn step_count(&self) -> usize {
        self.scenario.steps.len()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.step_count()
    }

    /// Index the "previous" control leads to, if any.
    pub fn previous_index(&self) -> Option<usize> {
        self.current.checked_sub(1)
    }

    /// Index the "next" control leads to, if any.
    pub fn next_index(&self) -> Option<usize> {
        (!self.is_last()).then_some(self.current + 1)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            position: self.current + 1,
            total: self.step_count(),
        }
    }
}

/// 1-based position within a scenario, for the progress bar and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        self.position as f64 / self.total as f64
    }

    /// Width of the progress bar fill, rounded to two decimals.
    pub fn percent(&self) -> f64 {
        (self.fraction() * 10_000.0).round() / 100.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "단계 {} / {}", self.position, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStore;
    use crate::test_helpers::*;

    fn three_steps() -> Scenario {
        Scenario {
            id: "demo".to_string(),
            title: "Demo".to_string(),
            description: "Three layers".to_string(),
            steps: ["Controller", "Service", "Database"]
                .iter()
                .map(|layer| ScenarioStep {
                    layer: layer.to_string(),
                    description: format!("{layer} step"),
                    code: None,
                })
                .collect(),
        }
    }

    #[test]
    fn starts_at_first_step() {
        let scenario = three_steps();
        let stepper = ScenarioStepper::new(&scenario).unwrap();
        assert_eq!(stepper.current_index(), 0);
        assert_eq!(stepper.current_step().layer, "Controller");
        assert!(stepper.is_first());
        assert!(!stepper.is_last());
    }

    #[test]
    fn empty_scenario_has_no_stepper() {
        let mut scenario = three_steps();
        scenario.steps.clear();
        assert!(ScenarioStepper::new(&scenario).is_none());
    }

    #[test]
    fn previous_at_start_is_noop() {
        let scenario = three_steps();
        let mut stepper = ScenarioStepper::new(&scenario).unwrap();
        assert!(!stepper.previous());
        assert_eq!(stepper.current_index(), 0);
        assert_eq!(stepper.previous_index(), None);
    }

    #[test]
    fn next_at_end_is_noop() {
        let scenario = three_steps();
        let mut stepper = ScenarioStepper::new(&scenario).unwrap();
        assert!(stepper.next());
        assert!(stepper.next());
        assert!(stepper.is_last());
        assert!(!stepper.next());
        assert_eq!(stepper.current_index(), 2);
        assert_eq!(stepper.next_index(), None);
    }

    #[test]
    fn next_then_previous_round_trips() {
        let scenario = three_steps();
        let mut stepper = ScenarioStepper::new(&scenario).unwrap();
        stepper.next();
        assert_eq!(stepper.current_step().layer, "Service");
        assert_eq!(stepper.previous_index(), Some(0));
        assert_eq!(stepper.next_index(), Some(2));
        stepper.previous();
        assert_eq!(stepper.current_index(), 0);
    }

    #[test]
    fn jump_sets_exact_index_from_any_state() {
        let scenario = three_steps();
        for start in 0..3 {
            for target in 0..3 {
                let mut stepper = ScenarioStepper::at(&scenario, start).unwrap();
                assert!(stepper.jump_to(target));
                assert_eq!(stepper.current_index(), target, "from {start} to {target}");
            }
        }
    }

    #[test]
    fn jump_out_of_range_is_ignored() {
        let scenario = three_steps();
        let mut stepper = ScenarioStepper::at(&scenario, 1).unwrap();
        assert!(!stepper.jump_to(3));
        assert_eq!(stepper.current_index(), 1);
        assert!(ScenarioStepper::at(&scenario, 7).is_none());
    }

    #[test]
    fn progress_reports_one_based_fraction() {
        let scenario = three_steps();
        let mut stepper = ScenarioStepper::new(&scenario).unwrap();
        assert_eq!(stepper.progress(), Progress { position: 1, total: 3 });
        assert_eq!(stepper.progress().percent(), 33.33);
        stepper.jump_to(2);
        assert_eq!(stepper.progress().fraction(), 1.0);
        assert_eq!(stepper.progress().to_string(), "단계 3 / 3");
    }

    #[test]
    fn walks_builtin_update_scenario() {
        let store = ContentStore::builtin().unwrap();
        let scenario = find_scenario(&store, "user-update");
        let mut stepper = ScenarioStepper::new(scenario).unwrap();
        let mut layers = vec![stepper.current_step().layer.clone()];
        while stepper.next() {
            layers.push(stepper.current_step().layer.clone());
        }
        assert_eq!(layers, vec!["Controller", "Service", "Entity", "Database"]);
        assert!(stepper.current_step().code.as_deref().unwrap().starts_with("UPDATE users"));
    }
}
