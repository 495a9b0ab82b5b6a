//! The editable step sequence owned by the caller for one session.

use super::{OptionError, OptionValue, Step, StepId, StepType};
use crate::config::Templates;
use crate::parse::{self, ParseError};
use crate::render::Serializer;

/// Ordered steps plus the templates new steps start from.
///
/// Order is significant: it is both the transformation order and the order
/// of stages in the generated command. Duplicate step types are allowed.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
    templates: Templates,
}

impl Pipeline {
    pub fn new(templates: Templates) -> Self {
        Self {
            steps: Vec::new(),
            templates,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append a step of `step_type` initialised from its template.
    pub fn add(&mut self, step_type: StepType) -> StepId {
        let step = Step::new(self.templates.kind(step_type));
        let id = step.id;
        log::debug!("added {step_type} step {id}");
        self.steps.push(step);
        id
    }

    /// Remove a step. Its id is not handed out again.
    pub fn remove(&mut self, id: StepId) -> Option<Step> {
        let pos = self.steps.iter().position(|s| s.id == id)?;
        Some(self.steps.remove(pos))
    }

    /// Edit one option of one step in place.
    pub fn set_option(
        &mut self,
        id: StepId,
        key: &str,
        value: OptionValue,
    ) -> Result<(), OptionError> {
        let step = self
            .steps
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(OptionError::UnknownStep(id))?;
        step.kind.set_option(key, value)
    }

    /// Swap in a whole new step sequence.
    pub fn replace(&mut self, steps: Vec<Step>) {
        self.steps = steps;
    }

    /// Parse `command` and adopt its steps. On failure the current steps
    /// stay as they were.
    pub fn load_command(&mut self, command: &str) -> Result<(), ParseError> {
        let steps = parse::parse(command)?;
        self.replace(steps);
        Ok(())
    }

    /// Preview text for `raw` input, or the error sentinel.
    pub fn preview(&self, raw: &str) -> String {
        crate::eval::evaluate(raw, &self.steps)
    }

    /// The equivalent shell command.
    pub fn command(&self, serializer: &Serializer, formatted: bool) -> String {
        serializer.serialize(&self.steps, formatted)
    }
}
