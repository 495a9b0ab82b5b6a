//! Pipeline evaluator: runs each step over the output of the previous one.

use thiserror::Error;

use crate::commands::{self, Input, StepError};
use crate::step::{Step, StepType};

/// Prefix shared by every preview failure text.
pub const PREVIEW_ERROR_MARKER: &str = "Error:";

/// Why a preview stopped early. `Display` gives the text shown in place of
/// the preview.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreviewError {
    /// The step is valid but too complex to simulate; the generated command
    /// is still correct.
    #[error("Error: Preview not available for complex {step} programs. Check the generated command.")]
    Unavailable { step: StepType },
    #[error("Error: step '{step}' failed: {message}")]
    Step { step: StepType, message: String },
}

impl PreviewError {
    fn from_step(step: StepType, err: StepError) -> Self {
        match err {
            StepError::PreviewUnavailable => PreviewError::Unavailable { step },
            other => PreviewError::Step {
                step,
                message: other.to_string(),
            },
        }
    }
}

/// Run `steps` over `raw` and return the final text.
///
/// Stops at the first step that fails or cannot be previewed; later steps are
/// not attempted.
pub fn run(raw: &str, steps: &[Step]) -> Result<String, PreviewError> {
    let mut lines: Vec<String> = raw.split('\n').map(str::to_string).collect();
    let mut text = raw.to_string();

    for step in steps {
        let step_type = step.step_type();
        let input = Input {
            lines: &lines,
            text: &text,
        };
        match commands::apply(&step.kind, &input) {
            Ok(next) => {
                lines = next;
                text = lines.join("\n");
            }
            Err(err) => {
                let err = PreviewError::from_step(step_type, err);
                match &err {
                    PreviewError::Unavailable { .. } => log::info!("{step_type} step {}: {err}", step.id),
                    PreviewError::Step { .. } => log::warn!("{step_type} step {}: {err}", step.id),
                }
                return Err(err);
            }
        }
    }

    Ok(text)
}

/// Like [`run`], but a failure becomes its message, which always starts
/// with [`PREVIEW_ERROR_MARKER`].
pub fn evaluate(raw: &str, steps: &[Step]) -> String {
    run(raw, steps).unwrap_or_else(|e| e.to_string())
}
