use serde::{Deserialize, Serialize};

/// Equipment and budget the student can draw on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    #[serde(default)]
    pub lab_access: bool,
    #[serde(default)]
    pub special_equipment: bool,
    #[serde(default)]
    pub high_budget: bool,
}

impl Resources {
    /// Wire names of the flags that are set, in declaration order.
    pub fn available(&self) -> Vec<&'static str> {
        [
            ("labAccess", self.lab_access),
            ("specialEquipment", self.special_equipment),
            ("highBudget", self.high_budget),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFormData {
    pub interests: String,
    pub grade_level: String,
    pub field_of_study: String,
    #[serde(default)]
    pub resources: Resources,
}

/// A science fair project idea. Every field comes from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdea {
    pub title: String,
    pub description: String,
    pub hypothesis: String,
    pub materials: Vec<String>,
    pub procedure: Vec<String>,
    pub expected_outcome: String,
    /// Beginner / Intermediate / Advanced
    pub difficulty: String,
    pub time_required: String,
    pub safety_notes: String,
}
