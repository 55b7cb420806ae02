use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: String,
    pub text: String,
}

impl Highlight {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Body of `POST /highlights`. A missing `text` is taken as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateHighlight {
    #[serde(default)]
    pub text: String,
}

/// Body of `PUT /highlights/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateHighlight {
    #[serde(default)]
    pub text: String,
}

/// Body of `POST /highlights/reorder`. The list key is required; a body
/// without it is rejected rather than read as an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReorderHighlights {
    #[serde(rename = "reorderedHighlights")]
    pub reordered_highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

pub fn seed_highlights() -> Vec<Highlight> {
    vec![
        Highlight::new("1", "High foot traffic and visibility for retail spaces."),
        Highlight::new(
            "2",
            "Potential for significant rental income growth due to market demand.",
        ),
        Highlight::new("3", "Attractive lease terms and incentives for new tenants."),
    ]
}
