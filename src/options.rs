use crate::page::PageStyle;
use crate::style::{FontFamily, ResolvedTextStyle};

/// What to do with a word wider than the line it has to fit on
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum WordOverflow {
    /// Break the word at a character boundary, keeping at least one character per line
    #[default]
    BreakAnywhere,
    /// Keep the word whole on its own line, overflowing the right edge
    Overflow,
    /// Stop layout with [LayoutError::WordTooWide](crate::LayoutError::WordTooWide)
    Fail,
}

/// Document-wide layout configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// The text style every paragraph style resolves over
    pub default_text_style: ResolvedTextStyle,
    /// Style of the first page, and of pages created on overflow until an explicit
    /// page break names another style
    pub default_page_style: PageStyle,
    /// Number of spaces a tab character expands to
    pub tab_size: usize,
    pub word_overflow: WordOverflow,
}

impl LayoutOptions {
    /// Defaults with Courier as the document font, matching [MonospaceMetrics](crate::MonospaceMetrics)
    pub fn monospace() -> LayoutOptions {
        let mut options = LayoutOptions::default();
        options.default_text_style.family = FontFamily::Courier;
        options
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            default_text_style: ResolvedTextStyle::default(),
            default_page_style: PageStyle::A4_PORTRAIT,
            tab_size: 4,
            word_overflow: WordOverflow::BreakAnywhere,
        }
    }
}
