//! The editable markup/style/script triple.

use serde::{Deserialize, Serialize};

/// One project's editable content.
///
/// All three buffers are always defined; "no content" is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceBundle {
    pub markup: String,
    pub style: String,
    pub script: String,
}

impl SourceBundle {
    /// Build a bundle from the three buffers.
    pub fn new(
        markup: impl Into<String>,
        style: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            markup: markup.into(),
            style: style.into(),
            script: script.into(),
        }
    }

    /// Combined byte length of the three buffers.
    pub fn total_len(&self) -> usize {
        self.markup.len() + self.style.len() + self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}

/// A bundle as it arrives from loosely-typed input (share tokens, JSON bodies,
/// local records). Absent fields stay `None` until [`PartialBundle::normalize`].
///
/// Both the `markup`/`style`/`script` and the `html`/`css`/`js` spellings are
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartialBundle {
    #[serde(default, alias = "html")]
    pub markup: Option<String>,
    #[serde(default, alias = "css")]
    pub style: Option<String>,
    #[serde(default, alias = "js")]
    pub script: Option<String>,
}

impl PartialBundle {
    /// Resolve absent fields to empty strings.
    pub fn normalize(self) -> SourceBundle {
        SourceBundle {
            markup: self.markup.unwrap_or_default(),
            style: self.style.unwrap_or_default(),
            script: self.script.unwrap_or_default(),
        }
    }

    /// Fill absent fields from `base`, keeping present ones.
    pub fn merge_onto(self, base: &SourceBundle) -> SourceBundle {
        SourceBundle {
            markup: self.markup.unwrap_or_else(|| base.markup.clone()),
            style: self.style.unwrap_or_else(|| base.style.clone()),
            script: self.script.unwrap_or_else(|| base.script.clone()),
        }
    }
}

impl From<SourceBundle> for PartialBundle {
    fn from(value: SourceBundle) -> Self {
        Self {
            markup: Some(value.markup),
            style: Some(value.style),
            script: Some(value.script),
        }
    }
}
