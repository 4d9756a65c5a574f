//! Script document value objects

/// One unit of teleprompter content.
///
/// `text` is the plain content used for metadata, `raw` keeps the original
/// markdown for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub text: String,
    pub raw: String,
}

impl Block {
    /// Create a block from its plain text and markdown source
    pub fn new(text: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            raw: raw.into(),
        }
    }

    /// Create a block whose markdown source is its plain text
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            raw: text.clone(),
            text,
        }
    }
}

/// Output of a script loader: an optional leading title and the blocks in
/// document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedScript {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

/// A loaded script. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDocument {
    title: String,
    blocks: Vec<Block>,
}

impl ScriptDocument {
    /// Build a document, falling back to `file_name` when the script has no
    /// leading heading.
    pub fn from_parsed(parsed: ParsedScript, file_name: &str) -> Self {
        let title = parsed
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| file_name.to_string());

        Self {
            title,
            blocks: parsed.blocks,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Block at `position`, if any
    pub fn block(&self, position: usize) -> Option<&Block> {
        self.blocks.get(position)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
