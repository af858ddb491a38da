use crate::error::LayoutError;
use crate::image::ImageId;
use crate::metrics::FontMetrics;
use crate::options::WordOverflow;
use crate::style::ResolvedTextStyle;
use crate::units::Pt;

/// One item of a paragraph's inline stream, with its effective style already resolved
#[derive(Debug, Clone, PartialEq)]
pub enum FlowItem {
    Text {
        text: String,
        style: ResolvedTextStyle,
    },
    Image {
        image: ImageId,
        width: Pt,
        height: Pt,
    },
    /// Forced line end
    Break,
}

/// Geometry the lines of one paragraph are wrapped into
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlowParams {
    /// Width available to the paragraph's first line (after the first-line margin)
    pub first_line_width: Pt,
    /// Width available to every other line
    pub width: Pt,
    /// Multiplier on the metrics' line height
    pub line_spacing: f32,
    /// The paragraph's own style, which sizes lines that hold no text
    pub base_style: ResolvedTextStyle,
    pub word_overflow: WordOverflow,
    pub tab_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FragmentContent {
    Text {
        text: String,
        style: ResolvedTextStyle,
    },
    Image {
        image: ImageId,
        width: Pt,
        height: Pt,
    },
}

/// A piece of a line that keeps a single style. Fragments never merge across the
/// boundary of two input runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub content: FragmentContent,
    /// Offset from the start of the line
    pub x: Pt,
    pub width: Pt,
    /// Number of space characters in the fragment
    pub spaces: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub fragments: Vec<Fragment>,
    pub width: Pt,
    /// Vertical advance of the line, line spacing included
    pub height: Pt,
    /// Distance from the top of the line to the baseline
    pub ascent: Pt,
    /// True only for the paragraph's first line
    pub first: bool,
    /// The line was ended by a forced break or by the end of the paragraph rather
    /// than by wrapping
    pub hard_end: bool,
}

impl Line {
    /// The concatenated text of all text fragments
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .filter_map(|f| match &f.content {
                FragmentContent::Text { text, .. } => Some(text.as_str()),
                FragmentContent::Image { .. } => None,
            })
            .collect()
    }

    pub fn spaces(&self) -> usize {
        self.fragments.iter().map(|f| f.spaces).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PieceKind {
    Word(String),
    Space(String),
    Image { image: ImageId, height: Pt },
}

#[derive(Debug, Clone, PartialEq)]
struct Piece {
    run: usize,
    kind: PieceKind,
    style: ResolvedTextStyle,
    width: Pt,
}

enum Unit {
    /// Spaces between words: the only places a line may wrap
    Glue(Vec<Piece>),
    /// Pieces with no space between them, possibly from several runs
    Word(Vec<Piece>),
    Break,
}

/// Wraps a paragraph's inline stream into lines.
///
/// # Wrapping Behavior
///
/// Words are accumulated greedily. Spaces are the only break opportunities; when the
/// next word would overflow the line, the line is cut at the last space and the word
/// starts the next line, with the spaces at the cut dropped. Text runs that touch
/// without a space in between form a single unbreakable word.
///
/// A word wider than an empty line is handled according to
/// [WordOverflow](crate::WordOverflow). Character breaking always places at least one
/// character per line, so layout terminates even when a single glyph is wider than
/// the line.
///
/// [FlowItem::Break] ends the line immediately. Only the very first line of the
/// paragraph uses `first_line_width`.
pub fn wrap_lines<M: FontMetrics + ?Sized>(
    items: &[FlowItem],
    params: &FlowParams,
    metrics: &M,
) -> Result<Vec<Line>, LayoutError> {
    let units = tokenize(items, params.tab_size, metrics)?;
    let mut wrapper = Wrapper {
        params,
        metrics,
        lines: Vec::new(),
        current: Vec::new(),
        current_width: Pt::ZERO,
        pending: Vec::new(),
        first: true,
        after_wrap: false,
    };

    for unit in units {
        match unit {
            Unit::Break => {
                wrapper.pending.clear();
                wrapper.finish_line(true);
            }
            Unit::Glue(pieces) => {
                if !(wrapper.after_wrap && wrapper.current.is_empty()) {
                    wrapper.pending.extend(pieces);
                }
            }
            Unit::Word(pieces) => wrapper.place_word(pieces)?,
        }
    }
    wrapper.pending.clear();
    wrapper.finish_line(true);

    Ok(wrapper.lines)
}

struct Wrapper<'a, M: FontMetrics + ?Sized> {
    params: &'a FlowParams,
    metrics: &'a M,
    lines: Vec<Line>,
    current: Vec<Piece>,
    current_width: Pt,
    /// Spaces seen since the last word, only committed once another word follows
    pending: Vec<Piece>,
    first: bool,
    after_wrap: bool,
}

impl<'a, M: FontMetrics + ?Sized> Wrapper<'a, M> {
    fn available(&self) -> Pt {
        if self.first {
            self.params.first_line_width
        } else {
            self.params.width
        }
    }

    fn place_word(&mut self, word: Vec<Piece>) -> Result<(), LayoutError> {
        let word_width: Pt = word.iter().map(|p| p.width).sum();
        let glue_width: Pt = self.pending.iter().map(|p| p.width).sum();

        if self.current_width + glue_width + word_width <= self.available() {
            self.commit(word);
            return Ok(());
        }

        // leading spaces never push a word off its line
        self.pending.clear();
        if !self.current.is_empty() {
            self.finish_line(false);
        }
        if word_width <= self.available() {
            self.commit(word);
            return Ok(());
        }

        // the word is alone on its line and still too wide
        match self.params.word_overflow {
            WordOverflow::Overflow => {
                log::warn!(
                    "word of width {} overflows a line of width {}",
                    word_width,
                    self.available()
                );
                self.commit(word);
                Ok(())
            }
            WordOverflow::Fail => Err(LayoutError::WordTooWide {
                word: word_text(&word),
                width: word_width,
                available: self.available(),
            }),
            WordOverflow::BreakAnywhere => self.break_word(word),
        }
    }

    /// Hard-break a word at character boundaries, leaving the last chunk on the open line
    fn break_word(&mut self, word: Vec<Piece>) -> Result<(), LayoutError> {
        for piece in word {
            let text = match &piece.kind {
                PieceKind::Word(text) => text.clone(),
                _ => {
                    if !self.current.is_empty()
                        && self.current_width + piece.width > self.available()
                    {
                        self.finish_line(false);
                    }
                    self.push(piece);
                    continue;
                }
            };

            let mut chunk = String::new();
            let mut chunk_width = Pt::ZERO;
            for ch in text.chars() {
                let ch_width = self
                    .metrics
                    .measure_text_width(ch.encode_utf8(&mut [0; 4]), &piece.style)?;
                let line_empty = self.current.is_empty() && chunk.is_empty();
                if !line_empty && self.current_width + chunk_width + ch_width > self.available() {
                    if !chunk.is_empty() {
                        self.push(Piece {
                            kind: PieceKind::Word(std::mem::take(&mut chunk)),
                            width: chunk_width,
                            ..piece.clone()
                        });
                        chunk_width = Pt::ZERO;
                    }
                    self.finish_line(false);
                }
                chunk.push(ch);
                chunk_width += ch_width;
            }
            if !chunk.is_empty() {
                self.push(Piece {
                    kind: PieceKind::Word(chunk),
                    width: chunk_width,
                    ..piece
                });
            }
        }
        Ok(())
    }

    fn commit(&mut self, word: Vec<Piece>) {
        let glue = std::mem::take(&mut self.pending);
        for piece in glue.into_iter().chain(word) {
            self.push(piece);
        }
    }

    fn push(&mut self, piece: Piece) {
        self.current_width += piece.width;
        self.current.push(piece);
        self.after_wrap = false;
    }

    fn finish_line(&mut self, hard_end: bool) {
        let pieces = std::mem::take(&mut self.current);
        let line = build_line(pieces, self.first, hard_end, self.params, self.metrics);
        log::trace!(
            "wrapped line {:?} ({} wide, {} tall)",
            line.text(),
            line.width,
            line.height
        );
        self.lines.push(line);
        self.current_width = Pt::ZERO;
        self.first = false;
        self.after_wrap = !hard_end;
    }
}

fn word_text(word: &[Piece]) -> String {
    word.iter()
        .filter_map(|p| match &p.kind {
            PieceKind::Word(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn tokenize<M: FontMetrics + ?Sized>(
    items: &[FlowItem],
    tab_size: usize,
    metrics: &M,
) -> Result<Vec<Unit>, LayoutError> {
    let mut units: Vec<Unit> = Vec::new();
    let tab = " ".repeat(tab_size);

    let push_piece = |units: &mut Vec<Unit>, piece: Piece| {
        let is_space = matches!(piece.kind, PieceKind::Space(_));
        match units.last_mut() {
            Some(Unit::Glue(pieces)) if is_space => pieces.push(piece),
            Some(Unit::Word(pieces)) if !is_space => pieces.push(piece),
            _ if is_space => units.push(Unit::Glue(vec![piece])),
            _ => units.push(Unit::Word(vec![piece])),
        }
    };

    for (run, item) in items.iter().enumerate() {
        match item {
            FlowItem::Break => units.push(Unit::Break),
            FlowItem::Image {
                image,
                width,
                height,
            } => push_piece(
                &mut units,
                Piece {
                    run,
                    kind: PieceKind::Image {
                        image: *image,
                        height: *height,
                    },
                    style: ResolvedTextStyle::default(),
                    width: *width,
                },
            ),
            FlowItem::Text { text, style } => {
                // replace tabs with spaces and normalize newlines
                let text = text
                    .replace('\t', &tab)
                    .replace("\r\n", "\n")
                    .replace('\r', "\n");
                for (i, segment) in text.split('\n').enumerate() {
                    if i > 0 {
                        units.push(Unit::Break);
                    }
                    for (is_space, chunk) in split_spaces(segment) {
                        let width = metrics.measure_text_width(chunk, style)?;
                        let kind = if is_space {
                            PieceKind::Space(chunk.to_string())
                        } else {
                            PieceKind::Word(chunk.to_string())
                        };
                        push_piece(
                            &mut units,
                            Piece {
                                run,
                                kind,
                                style: *style,
                                width,
                            },
                        );
                    }
                }
            }
        }
    }

    Ok(units)
}

/// Split text into maximal chunks of spaces and of non-spaces
fn split_spaces(text: &str) -> Vec<(bool, &str)> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (i, ch) in text.char_indices() {
        let is_space = ch == ' ';
        match in_space {
            Some(state) if state != is_space => {
                chunks.push((state, &text[start..i]));
                start = i;
            }
            _ => {}
        }
        in_space = Some(is_space);
    }
    if let Some(state) = in_space {
        chunks.push((state, &text[start..]));
    }
    chunks
}

fn build_line<M: FontMetrics + ?Sized>(
    pieces: Vec<Piece>,
    first: bool,
    hard_end: bool,
    params: &FlowParams,
    metrics: &M,
) -> Line {
    let mut fragments: Vec<Fragment> = Vec::new();
    let mut last_run: Option<usize> = None;
    let mut x = Pt::ZERO;
    let mut height = Pt::ZERO;
    let mut ascent = Pt::ZERO;

    for piece in pieces {
        match piece.kind {
            PieceKind::Image { image, height: h } => {
                height = height.max(h);
                ascent = ascent.max(h);
                fragments.push(Fragment {
                    content: FragmentContent::Image {
                        image,
                        width: piece.width,
                        height: h,
                    },
                    x,
                    width: piece.width,
                    spaces: 0,
                });
                last_run = None;
            }
            PieceKind::Word(text) | PieceKind::Space(text) => {
                height = height.max(metrics.line_height(&piece.style) * params.line_spacing);
                ascent = ascent.max(metrics.ascent(&piece.style));
                let spaces = text.chars().filter(|&c| c == ' ').count();
                match fragments.last_mut() {
                    Some(Fragment {
                        content: FragmentContent::Text { text: acc, .. },
                        width,
                        spaces: acc_spaces,
                        ..
                    }) if last_run == Some(piece.run) => {
                        acc.push_str(&text);
                        *width += piece.width;
                        *acc_spaces += spaces;
                    }
                    _ => fragments.push(Fragment {
                        content: FragmentContent::Text {
                            text,
                            style: piece.style,
                        },
                        x,
                        width: piece.width,
                        spaces,
                    }),
                }
                last_run = Some(piece.run);
            }
        }
        x += piece.width;
    }

    if fragments.is_empty() {
        height = metrics.line_height(&params.base_style) * params.line_spacing;
        ascent = metrics.ascent(&params.base_style);
    }

    Line {
        fragments,
        width: x,
        height,
        ascent,
        first,
        hard_end,
    }
}
