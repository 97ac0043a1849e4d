use serde::{Deserialize, Serialize};

/// Stroke palette for drawable relationship edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub parent_stroke: String,
    pub married_stroke: String,
    pub stroke_width: f32,
    pub married_dasharray: String,
}

impl Theme {
    pub fn standard() -> Self {
        Self {
            parent_stroke: "#3b82f6".to_string(),
            married_stroke: "#f59e42".to_string(),
            stroke_width: 2.0,
            married_dasharray: "6 3".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::standard()
    }
}
