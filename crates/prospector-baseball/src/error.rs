// Structured error payloads handed back to callers instead of raised faults.

use serde::Serialize;

/// JSON-shaped error result: `{"error": "...", "kind": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

impl ErrorBody {
    pub fn new(kind: &'static str, error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
            kind,
        }
    }
}
