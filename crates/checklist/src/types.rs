use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One checklist entry.
///
/// The id is runtime-only: the persisted document is a plain
/// `{"task", "completed"}` array, so ids are regenerated on every load. All
/// registry mutations address tasks by id rather than by list index, which
/// keeps asynchronously delivered updates from ever hitting a shifted index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(rename = "task")]
    pub text: String,

    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }
}
