//! ASCII-art card backs.
//!
//! A card's "scanned" side is a grid of pseudo-code sized to the card in a
//! monospace font. Every line is exactly `cols` ASCII characters.

use blackbolt_core::EffectRng;

/// Monospace glyph advance relative to font size.
const CHAR_ASPECT: f32 = 0.6;

const TOKENS: &[&str] = &[
    "fn", "let", "mut", "const", "if", "else", "for", "in", "match", "return", "=>", "=", "+=", "*", "&", "{",
    "}", "(", ")", ";", "::", "//", "0x3f", "42", "1e-3", "scan", "card", "frame", "alpha", "pool", "drift",
    "velocity", "render", "vec![]", "Some(x)", "None", "self", "dt", "ctx", "emit",
];

/// A cached text grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiArt {
    cols: usize,
    rows: usize,
    text: String,
}

impl AsciiArt {
    /// Columns and rows that fit a `width` x `height` card.
    #[must_use]
    pub fn dimensions(width: f32, height: f32, font_size: f32, line_height: f32) -> (usize, usize) {
        let advance = font_size * CHAR_ASPECT;
        let cols = if advance > 0.0 { (width / advance).floor().max(0.0) as usize } else { 0 };
        let rows = if line_height > 0.0 { (height / line_height).floor().max(0.0) as usize } else { 0 };
        (cols, rows)
    }

    /// Generates a fresh grid.
    #[must_use]
    pub fn generate(cols: usize, rows: usize, rng: &mut EffectRng) -> Self {
        let mut art = Self {
            cols,
            rows,
            text: String::with_capacity((cols + 1) * rows),
        };
        art.regenerate(rng);
        art
    }

    /// Rewrites the grid in place, keeping its allocation.
    pub fn regenerate(&mut self, rng: &mut EffectRng) {
        self.text.clear();
        for row in 0..self.rows {
            if row > 0 {
                self.text.push('\n');
            }
            fill_line(&mut self.text, self.cols, rng);
        }
    }

    /// Columns per line.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Line count.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// The grid as newline-separated text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Iterates over lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

fn fill_line(out: &mut String, cols: usize, rng: &mut EffectRng) {
    let start = out.len();
    let indent = (2 * rng.below(4) as usize).min(cols);
    out.extend(std::iter::repeat_n(' ', indent));

    loop {
        let token = TOKENS[rng.below(TOKENS.len() as u32) as usize];
        let used = out.len() - start;
        if used + token.len() > cols {
            break;
        }
        out.push_str(token);
        if out.len() - start < cols {
            out.push(' ');
        }
    }

    let used = out.len() - start;
    out.extend(std::iter::repeat_n(' ', cols - used));
}
