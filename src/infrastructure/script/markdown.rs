//! Markdown script loader

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::application::ports::ScriptLoader;
use crate::domain::script::{Block, ParsedScript};

/// Splits a markdown script into top-level blocks.
///
/// A heading that opens the document becomes the title. Every other
/// heading and all thematic breaks are dropped, so only content blocks
/// are prompted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownScriptLoader;

impl MarkdownScriptLoader {
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    }
}

/// Top-level element being collected
struct Pending {
    start: usize,
    end: usize,
    heading: bool,
    text: String,
}

impl Pending {
    fn break_line(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
    }
}

impl ScriptLoader for MarkdownScriptLoader {
    fn load(&self, raw: &str) -> ParsedScript {
        let mut parsed = ParsedScript::default();
        let mut depth = 0usize;
        let mut first_element = true;
        let mut pending: Option<Pending> = None;

        for (event, range) in Parser::new_ext(raw, Self::options()).into_offset_iter() {
            match event {
                Event::Start(tag) => {
                    if depth == 0 {
                        pending = Some(Pending {
                            start: range.start,
                            end: range.end,
                            heading: matches!(tag, Tag::Heading { .. }),
                            text: String::new(),
                        });
                    }
                    depth += 1;
                }
                Event::End(tag) => {
                    depth = depth.saturating_sub(1);
                    if depth > 0 {
                        if matches!(tag, TagEnd::Paragraph | TagEnd::Item | TagEnd::CodeBlock) {
                            if let Some(p) = pending.as_mut() {
                                p.break_line();
                            }
                        }
                        continue;
                    }

                    let Some(element) = pending.take() else {
                        continue;
                    };
                    let text = element.text.trim().to_string();
                    if element.heading {
                        if first_element {
                            parsed.title = Some(text);
                        }
                    } else {
                        let source = raw.get(element.start..element.end).unwrap_or_default();
                        parsed.blocks.push(Block::new(text, source.trim()));
                    }
                    first_element = false;
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some(p) = pending.as_mut() {
                        p.text.push_str(&text);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if let Some(p) = pending.as_mut() {
                        p.text.push('\n');
                    }
                }
                Event::Rule if depth == 0 => first_element = false,
                _ => {}
            }
        }

        parsed
    }
}
