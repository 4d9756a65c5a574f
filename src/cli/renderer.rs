//! Terminal markdown renderer

use colored::{Color, Colorize};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

use crate::application::ports::Renderer;

/// Column limit for wrapped text
pub const DEFAULT_WIDTH: usize = 80;

/// Renders markdown as styled, word-wrapped terminal text
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    width: usize,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_width(DEFAULT_WIDTH)
    }

    pub fn with_width(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Style {
    bold: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    dimmed: bool,
    color: Option<Color>,
}

impl Style {
    fn heading(level: HeadingLevel) -> Self {
        match level {
            HeadingLevel::H1 => Self {
                bold: true,
                underline: true,
                color: Some(Color::Green),
                ..Self::default()
            },
            _ => Self {
                bold: true,
                color: Some(Color::Red),
                ..Self::default()
            },
        }
    }

    fn paint(self, text: &str) -> String {
        let mut styled = text.normal();
        if self.bold {
            styled = styled.bold();
        }
        if self.italic {
            styled = styled.italic();
        }
        if self.underline {
            styled = styled.underline();
        }
        if self.strike {
            styled = styled.strikethrough();
        }
        if self.dimmed {
            styled = styled.dimmed();
        }
        if let Some(color) = self.color {
            styled = styled.color(color);
        }
        styled.to_string()
    }
}

/// What a `Start` event opened, so its `End` can undo it
enum Frame {
    Inline,
    Block,
    Heading,
    CodeBlock,
    List,
    Item,
    Quote,
}

/// Line buffer with word wrapping and a continuation indent
struct Output {
    width: usize,
    lines: Vec<String>,
    current: String,
    used: usize,
    open: bool,
    pending_space: bool,
    indent: Vec<String>,
}

impl Output {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            current: String::new(),
            used: 0,
            open: false,
            pending_space: false,
            indent: Vec::new(),
        }
    }

    fn prefix(&self) -> String {
        self.indent.concat()
    }

    fn open_line(&mut self) {
        if !self.open {
            self.current = self.prefix();
            self.used = self.current.chars().count();
            self.open = true;
            self.pending_space = false;
        }
    }

    fn word(&mut self, word: &str, style: Style) {
        let width = word.chars().count();
        self.open_line();

        let prefix_width = self.prefix().chars().count();
        let space = usize::from(self.pending_space && self.used > prefix_width);
        if self.used > prefix_width && self.used + space + width > self.width {
            self.break_line();
            self.open_line();
        } else if space == 1 {
            self.current.push(' ');
            self.used += 1;
        }

        self.current.push_str(&style.paint(word));
        self.used += width;
        self.pending_space = false;
    }

    fn text(&mut self, text: &str, style: Style) {
        for (i, word) in text.split([' ', '\n', '\t']).enumerate() {
            if i > 0 {
                self.pending_space = true;
            }
            if !word.is_empty() {
                self.word(word, style);
            }
        }
    }

    /// Emit a line verbatim after the indent
    fn raw_line(&mut self, line: &str, style: Style) {
        self.break_line();
        self.lines.push(format!("{}{}", self.prefix(), style.paint(line)));
    }

    fn break_line(&mut self) {
        if self.open {
            self.lines.push(std::mem::take(&mut self.current));
            self.open = false;
        }
        self.used = 0;
        self.pending_space = false;
    }

    fn blank_line(&mut self) {
        self.break_line();
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn finish(mut self) -> String {
        self.break_line();
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut out = Output::new(self.width);
        let mut frames: Vec<Frame> = Vec::new();
        let mut styles: Vec<Style> = vec![Style::default()];
        let mut lists: Vec<Option<u64>> = Vec::new();
        let mut in_code = false;
        let mut quote_depth = 0usize;

        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

        for event in Parser::new_ext(markdown, options) {
            let style = styles.last().copied().unwrap_or_default();
            match event {
                Event::Start(tag) => {
                    let frame = match tag {
                        Tag::Heading { level, .. } => {
                            let heading = Style::heading(level);
                            out.break_line();
                            out.word(&"#".repeat(level as usize), heading);
                            out.pending_space = true;
                            styles.push(heading);
                            Frame::Heading
                        }
                        Tag::Emphasis => {
                            styles.push(Style { italic: true, ..style });
                            Frame::Inline
                        }
                        Tag::Strong => {
                            styles.push(Style { bold: true, ..style });
                            Frame::Inline
                        }
                        Tag::Strikethrough => {
                            styles.push(Style { strike: true, ..style });
                            Frame::Inline
                        }
                        Tag::Link { .. } => {
                            styles.push(Style {
                                underline: true,
                                color: Some(Color::Blue),
                                ..style
                            });
                            Frame::Inline
                        }
                        Tag::CodeBlock(_) => {
                            in_code = true;
                            out.indent.push("    ".to_string());
                            Frame::CodeBlock
                        }
                        Tag::List(start) => {
                            out.break_line();
                            lists.push(start);
                            Frame::List
                        }
                        Tag::Item => {
                            out.break_line();
                            let marker = match lists.last_mut() {
                                Some(Some(n)) => {
                                    let marker = format!("{}.", n);
                                    *n += 1;
                                    marker
                                }
                                _ => "*".to_string(),
                            };
                            out.word(&marker, Style::default());
                            out.pending_space = true;
                            out.indent.push(" ".repeat(marker.chars().count() + 1));
                            Frame::Item
                        }
                        Tag::BlockQuote(_) => {
                            out.break_line();
                            quote_depth += 1;
                            out.indent.push("│ ".to_string());
                            styles.push(Style { dimmed: true, ..style });
                            Frame::Quote
                        }
                        _ => Frame::Block,
                    };
                    frames.push(frame);
                }
                Event::End(_) => {
                    let nested = !lists.is_empty() || quote_depth > 0;
                    match frames.pop() {
                        Some(Frame::Inline) => {
                            styles.pop();
                        }
                        Some(Frame::Heading) => {
                            styles.pop();
                            out.blank_line();
                        }
                        Some(Frame::CodeBlock) => {
                            in_code = false;
                            out.break_line();
                            out.indent.pop();
                            if !nested {
                                out.blank_line();
                            }
                        }
                        Some(Frame::List) => {
                            lists.pop();
                            out.break_line();
                            if lists.is_empty() && quote_depth == 0 {
                                out.blank_line();
                            }
                        }
                        Some(Frame::Item) => {
                            out.break_line();
                            out.indent.pop();
                        }
                        Some(Frame::Quote) => {
                            styles.pop();
                            out.break_line();
                            out.indent.pop();
                            quote_depth = quote_depth.saturating_sub(1);
                            if quote_depth == 0 && lists.is_empty() {
                                out.blank_line();
                            }
                        }
                        Some(Frame::Block) | None => {
                            if nested {
                                out.break_line();
                            } else {
                                out.blank_line();
                            }
                        }
                    }
                }
                Event::Text(text) if in_code => {
                    for line in text.lines() {
                        out.raw_line(line, Style { color: Some(Color::Yellow), ..style });
                    }
                }
                Event::Text(text) => out.text(&text, style),
                Event::Code(code) => out.word(&code, Style { color: Some(Color::Yellow), ..style }),
                Event::SoftBreak => out.pending_space = true,
                Event::HardBreak => out.break_line(),
                Event::Rule => {
                    out.raw_line(&"─".repeat(self.width), Style { dimmed: true, ..style });
                    out.blank_line();
                }
                Event::TaskListMarker(checked) => {
                    out.word(if checked { "[x]" } else { "[ ]" }, style);
                    out.pending_space = true;
                }
                Event::Html(html) | Event::InlineHtml(html) => out.text(&html, style),
                _ => {}
            }
        }

        out.finish()
    }
}
