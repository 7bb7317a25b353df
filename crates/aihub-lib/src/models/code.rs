// Code assistance data models

use serde::{Deserialize, Serialize};

/// Canned code-assistance task variants.
///
/// Each task is a fixed prompt template over the same structured completion
/// call; only the instruction text differs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CodeTask {
    Optimize,
    Explain,
    AddErrorHandling,
}

impl CodeTask {
    /// Display name for the UI
    pub fn display_name(&self) -> &'static str {
        match self {
            CodeTask::Optimize => "Optimize",
            CodeTask::Explain => "Explain",
            CodeTask::AddErrorHandling => "Add Error Handling",
        }
    }

    /// The instruction sent as the user prompt for this task
    pub fn instruction(&self, language: &str) -> String {
        match self {
            CodeTask::Optimize => format!(
                "Optimize this {} code for better performance, readability, and best practices. \
                 Provide the optimized version with detailed explanations of the improvements made.",
                language
            ),
            CodeTask::Explain => format!(
                "Explain this {} code in detail. Break down its functionality, logic flow, \
                 and any important concepts or patterns used.",
                language
            ),
            CodeTask::AddErrorHandling => format!(
                "Add comprehensive error handling to this {} code. Include try-catch blocks, \
                 input validation, and appropriate error messages.",
                language
            ),
        }
    }
}

impl std::fmt::Display for CodeTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Result of a code-assistance call.
///
/// Structured output with both fields required; a response missing either
/// field fails parsing instead of producing a partial result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAssistance {
    /// Generated or transformed code
    pub code: String,
    /// Explanation of the code or the changes made
    pub explanation: String,
}
