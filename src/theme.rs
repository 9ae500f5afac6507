use serde::{Deserialize, Serialize};

/// Fixed predicate palette. Edge colors index into this by predicate hash, so
/// the order is part of the output contract.
pub const PREDICATE_PALETTE: [&str; 10] = [
    "#2563EB", "#DB2777", "#059669", "#D97706", "#7C3AED", "#0891B2", "#DC2626", "#65A30D",
    "#C026D3", "#475569",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub subject_fill: String,
    pub object_fill: String,
    pub node_stroke: String,
    pub label_color: String,
    pub edge_opacity: f32,
}

impl Theme {
    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            background: "#FFFFFF".to_string(),
            subject_fill: "#DBEAFE".to_string(),
            object_fill: "#FEF3C7".to_string(),
            node_stroke: "#64748B".to_string(),
            label_color: "#1C2430".to_string(),
            edge_opacity: 0.72,
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            background: "#0F172A".to_string(),
            subject_fill: "#1E3A8A".to_string(),
            object_fill: "#78350F".to_string(),
            node_stroke: "#CBD5E1".to_string(),
            label_color: "#E2E8F0".to_string(),
            edge_opacity: 0.8,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "modern" | "default" | "light" => Some(Self::modern()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}
