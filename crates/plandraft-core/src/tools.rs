//! Tool selection.

use crate::element::ElementKind;
use crate::selection::CursorIcon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Available tools: the selector, or placement of one element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum ToolKind {
    #[default]
    Select,
    Place(ElementKind),
}

impl ToolKind {
    pub fn is_select(self) -> bool {
        self == ToolKind::Select
    }

    /// The tool stays active after placing (walls), instead of reverting to select.
    pub fn is_sticky(self) -> bool {
        matches!(self, ToolKind::Place(kind) if kind.is_drawn())
    }

    /// Canvas cursor while this tool is active and nothing is being dragged.
    pub fn cursor(self) -> CursorIcon {
        match self {
            ToolKind::Select => CursorIcon::Default,
            ToolKind::Place(_) => CursorIcon::Crosshair,
        }
    }

    /// Parse `"select"` or a placeable element kind name.
    pub fn parse(name: &str) -> Option<Self> {
        if name == "select" {
            Some(ToolKind::Select)
        } else {
            ElementKind::parse(name).map(ToolKind::Place)
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolKind::Select => f.write_str("select"),
            ToolKind::Place(kind) => write!(f, "{kind}"),
        }
    }
}

impl TryFrom<String> for ToolKind {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::parse(&name).ok_or_else(|| format!("unknown tool '{name}'"))
    }
}

impl From<ToolKind> for String {
    fn from(tool: ToolKind) -> Self {
        tool.to_string()
    }
}
