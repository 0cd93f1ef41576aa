//! Persisted state of each designer component.

use crate::model::control_panel::Configuration;
use crate::model::modeline::ModelineConfig;

/// State of one control panel designer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CpDesignerState {
    pub cp_config: Configuration,
}

/// Membership of the control panel designer group, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CpDesignerGroupState {
    pub designer_ids: Vec<String>,
}

/// State of one monitor designer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonitorDesignerState {
    pub modeline_config: ModelineConfig,
}

/// Membership of the monitor designer group, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonitorDesignerGroupState {
    pub designer_ids: Vec<String>,
}

/// Raw text of a game or machine name list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameListState {
    pub input_str: String,
}

impl NameListState {
    pub fn new(input_str: impl Into<String>) -> Self {
        Self {
            input_str: input_str.into(),
        }
    }

    /// Parses the input into names.
    ///
    /// Comments (`// ...`, `# ...`, `/* ... */`) are removed, commas separate
    /// names like line breaks do, and each name is trimmed. Empty entries are
    /// dropped and only the first occurrence of a repeated name is kept.
    pub fn parse_names(&self) -> Vec<String> {
        parse_names(&self.input_str)
    }
}

/// State of the game override manager. It has no fields yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameOverrideManagerState {}

/// Parses a name list. See [`NameListState::parse_names`].
pub fn parse_names(input: &str) -> Vec<String> {
    let without_line_comments = strip_line_comments(input);
    let without_comments = strip_block_comments(&without_line_comments);

    let mut names: Vec<String> = Vec::new();
    for entry in without_comments.split([',', '\n']) {
        let name = entry.trim();
        if name.is_empty() || names.iter().any(|n| n == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}

// Line comments run to the end of their line. They are removed first, so a
// `//` inside a block comment truncates that line of the block.
fn strip_line_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while !rest.is_empty() {
        let start = match (rest.find("//"), rest.find('#')) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => {
                out.push_str(rest);
                break;
            }
        };
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
        rest = &rest[end..];
        if let Some(line_break) = rest.chars().next() {
            out.push(line_break);
            rest = &rest[line_break.len_utf8()..];
        }
    }
    out
}

// An unterminated block comment runs to the end of the input.
fn strip_block_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        rest = match body.find("*/") {
            Some(end) => &body[end + 2..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

/// Display name of the group member at `index`: `A`..`Z`, then `A2`..`Z2`,
/// `A3`...
pub fn group_item_name(index: usize) -> String {
    const NUM_LETTERS: usize = 26;
    let quotient = index / NUM_LETTERS;
    let letter = (b'A' + (index % NUM_LETTERS) as u8) as char;
    if quotient == 0 {
        letter.to_string()
    } else {
        format!("{letter}{}", quotient + 1)
    }
}
