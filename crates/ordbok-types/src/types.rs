use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum SessionEvent {
    QueryInput {
        text: String,
        mode: DisplayMode,
        direction: String,
    },
    SwitchDirection(String),
    ShowResults(Vec<RenderRecord>),
    ClearResults,
    Status(LoadStatus),
    Shutdown,
}

/// How much annotation detail a query wants back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Simple,
    Detailed,
}

/// Coarse load lifecycle notifications, advisory only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    LoadingStarted,
    LoadingFinished,
    NotFound,
}

/// Presentation-agnostic output for one matched entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRecord {
    pub segments: Vec<RenderSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSegment {
    pub role: SegmentRole,
    pub text: String,
    /// External link target, when the segment is clickable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Localized default label (part-of-speech tags only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// What belongs between this segment and the next
    pub separator: Separator,
}

/// Separator hint after a segment. Renderers map these to whatever their
/// medium uses for a space and a line/entry break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Separator {
    None,
    Space,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentRole {
    Headword,
    Translation,
    PosTag,
    GroupId,
    ExampleSource,
    ExampleTarget,
    BracketOpen,
    BracketClose,
    Equivalence,
    Comma,
    Slash,
    Geo,
    SynonymGroup,
    VariantGroup,
    Synonym,
    Restriction,
    Unknown,
}
