use crate::constant::BLANK_MARKER;
use serde::Deserialize;

/// Difference severity tag carried by each comparison record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Exact literal match.
    None,
    /// Normalized forms equal, literal forms differ.
    Sutil,
    /// Neither literal nor normalized forms match.
    Major,
    /// Placeholder row inserted for alignment.
    Blank,
    /// User-modified, pending reclassification.
    Edited,
}

impl Classification {
    /// Parse a payload tag. Unknown or missing tags default to `Major`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("none") => Self::None,
            Some("sutil") => Self::Sutil,
            Some("blank") => Self::Blank,
            Some("edited") => Self::Edited,
            _ => Self::Major,
        }
    }
}

/// Which side of a row an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Expected,
    Actual,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Expected => Self::Actual,
            Self::Actual => Self::Expected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// One row of the grid: position `i` pairs `expected[i]` with `actual[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRecord {
    pub expected: String,
    pub actual: String,
    pub classification: Classification,
}

impl ComparisonRecord {
    pub fn side(&self, side: Side) -> &str {
        match side {
            Side::Expected => &self.expected,
            Side::Actual => &self.actual,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut String {
        match side {
            Side::Expected => &mut self.expected,
            Side::Actual => &mut self.actual,
        }
    }

    /// A row holding the blank marker on either side.
    pub fn is_placeholder(&self) -> bool {
        self.expected == BLANK_MARKER || self.actual == BLANK_MARKER
    }
}

/// Raw record shape of the JSON payload.
///
/// `diff_html` is accepted for compatibility with externally generated
/// payloads but ignored: display markup is always recomputed locally.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    pub expected: Option<String>,
    pub actual: Option<String>,
    #[serde(default)]
    pub diff_type: Option<String>,
    #[serde(default)]
    pub diff_html: Option<String>,
}
