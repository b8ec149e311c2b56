//! Line breaking and pagination of plain paragraphs inside a margin box.
//!
//! Glyph widths are approximated by a fixed average advance, which is enough
//! for the standard Helvetica face used by the writer.

use docsplit_style::Margins;

/// Body font size in points.
pub const FONT_SIZE: f32 = 12.0;
/// Baseline-to-baseline distance in points.
pub const LEADING: f32 = FONT_SIZE * 1.2;
/// Average glyph advance as a fraction of the font size.
const AVERAGE_ADVANCE: f32 = 0.5;

/// A line positioned on a page, in PDF coordinates (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Greedy word wrap of one paragraph into lines no wider than `width`.
/// Words longer than a whole line are kept intact on a line of their own.
pub fn wrap_paragraph(text: &str, width: f32) -> Vec<String> {
    let max_chars = ((width / (FONT_SIZE * AVERAGE_ADVANCE)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// A paragraph together with the margins in force when it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub text: String,
    pub margins: Margins,
}

impl Block {
    pub fn new(text: impl Into<String>, margins: Margins) -> Self {
        Self {
            text: text.into(),
            margins,
        }
    }
}

/// Lays out blocks top to bottom, each inside its own margin box.
///
/// A page keeps the margins of its first block: a block with different
/// margins starts a new page, as does a baseline that would fall below the
/// bottom margin. Always yields at least one (possibly empty) page, and at
/// least one line per page even when the margins leave no room.
pub fn paginate(blocks: &[Block], page_width: f32, page_height: f32) -> Vec<Vec<PlacedLine>> {
    let mut pages = vec![Vec::new()];
    let mut page_margins: Option<Margins> = None;
    let mut y = 0.0;

    for block in blocks {
        let margins = block.margins;
        let content_width = (page_width - margins.horizontal()).max(0.0);
        for line in wrap_paragraph(&block.text, content_width) {
            let current_is_empty = pages.last().is_none_or(|p: &Vec<PlacedLine>| p.is_empty());
            let margins_changed = page_margins.is_some_and(|m| m != margins);
            if !current_is_empty && (margins_changed || y < margins.bottom) {
                pages.push(Vec::new());
                page_margins = None;
            }
            if page_margins.is_none() {
                page_margins = Some(margins);
                y = page_height - margins.top - FONT_SIZE;
            }
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    x: margins.left,
                    y,
                    text: line,
                });
            }
            y -= LEADING;
        }
    }
    pages
}
