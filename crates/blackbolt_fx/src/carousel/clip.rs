//! Scan-line clipping.
//!
//! The image layer is hidden from its left edge by `right` percent, the
//! ASCII layer shown from its left edge up to `left` percent. Left of the
//! scan line a card is all ASCII, right of it all image, and under the
//! line the two meet at the overlap.

use blackbolt_core::Rect;

use crate::draw::ClipInset;

/// Clip percentages for one card, both in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipPair {
    /// Percent of the image hidden from its left edge.
    pub right: f32,
    /// Percent of the ASCII layer revealed from its left edge.
    pub left: f32,
}

impl ClipPair {
    /// Card entirely right of the scan line.
    pub const IMAGE: Self = Self { right: 0.0, left: 0.0 };
    /// Card entirely left of the scan line.
    pub const ASCII: Self = Self {
        right: 100.0,
        left: 100.0,
    };

    /// Inset for the image layer.
    #[must_use]
    pub fn image_inset(self) -> ClipInset {
        ClipInset {
            left: self.right,
            right: 0.0,
        }
    }

    /// Inset for the ASCII layer.
    #[must_use]
    pub fn ascii_inset(self) -> ClipInset {
        ClipInset {
            left: 0.0,
            right: 100.0 - self.left,
        }
    }
}

/// Clips `card` against the scan line. The flag is true when they overlap.
#[must_use]
pub fn clip_against(card: &Rect, scan: &Rect) -> (ClipPair, bool) {
    let cw = card.width;
    if cw <= 0.0 {
        return (ClipPair::IMAGE, false);
    }

    if card.x < scan.right() && card.right() > scan.x {
        let int_left = (scan.x - card.x).max(0.0);
        let int_right = (scan.right() - card.x).min(cw);
        let pair = ClipPair {
            right: (int_left / cw * 100.0).clamp(0.0, 100.0),
            left: (int_right / cw * 100.0).clamp(0.0, 100.0),
        };
        (pair, true)
    } else if card.right() <= scan.x {
        (ClipPair::ASCII, false)
    } else {
        (ClipPair::IMAGE, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan() -> Rect {
        Rect::new(716.0, 0.0, 8.0, 300.0)
    }

    #[test]
    fn test_left_of_line_is_ascii() {
        let card = Rect::new(100.0, 85.0, 400.0, 250.0);
        assert_eq!(clip_against(&card, &scan()), (ClipPair::ASCII, false));
    }

    #[test]
    fn test_touching_left_edge_is_ascii() {
        let card = Rect::new(316.0, 85.0, 400.0, 250.0);
        assert_eq!(clip_against(&card, &scan()), (ClipPair::ASCII, false));
    }

    #[test]
    fn test_right_of_line_is_image() {
        let card = Rect::new(724.0, 85.0, 400.0, 250.0);
        assert_eq!(clip_against(&card, &scan()), (ClipPair::IMAGE, false));
    }

    #[test]
    fn test_straddling_card_splits() {
        let card = Rect::new(520.0, 85.0, 400.0, 250.0);
        let (pair, hit) = clip_against(&card, &scan());
        assert!(hit);
        assert!((pair.right - 49.0).abs() < 1e-4);
        assert!((pair.left - 51.0).abs() < 1e-4);
        assert!(pair.right <= pair.left);
    }

    #[test]
    fn test_line_entering_card() {
        let card = Rect::new(720.0, 85.0, 400.0, 250.0);
        let (pair, hit) = clip_against(&card, &scan());
        assert!(hit);
        assert_eq!(pair.right, 0.0);
        assert!((pair.left - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_insets() {
        let pair = ClipPair { right: 30.0, left: 32.0 };
        assert_eq!(pair.image_inset(), ClipInset { left: 30.0, right: 0.0 });
        assert_eq!(pair.ascii_inset(), ClipInset { left: 0.0, right: 68.0 });
    }
}
