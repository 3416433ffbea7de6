//! Custom field definitions
//!
//! Fields are scoped to a space category and applied to every list under
//! that category during provisioning.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One selectable option of a dropdown field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropDownOption {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Semantic type of a custom field, with its type-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Currency,
    ShortText,
    DropDown { options: Vec<DropDownOption> },
    Date,
    Number,
}

impl FieldKind {
    /// Remote API type identifier
    pub fn api_type(&self) -> &'static str {
        match self {
            FieldKind::Currency => "currency",
            FieldKind::ShortText => "short_text",
            FieldKind::DropDown { .. } => "drop_down",
            FieldKind::Date => "date",
            FieldKind::Number => "number",
        }
    }

    /// Remote `type_config` payload for field creation
    pub fn type_config(&self) -> Value {
        match self {
            FieldKind::DropDown { options } => {
                let options: Vec<Value> = options
                    .iter()
                    .enumerate()
                    .map(|(index, option)| {
                        serde_json::json!({
                            "name": option.name,
                            "color": option.color,
                            "orderindex": index,
                        })
                    })
                    .collect();
                serde_json::json!({ "options": options })
            }
            _ => serde_json::json!({}),
        }
    }
}

/// A custom field definition, scoped to a space category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,

    #[serde(flatten)]
    pub kind: FieldKind,
}
