//! Draw commands.
//!
//! The thin rendering adapter: effects read their own simulation state and
//! append commands here. A canvas/WebGL/DOM backend replays the list; tests
//! inspect it directly.

use blackbolt_core::Rect;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Off-white used for burst circles (#eee).
    pub const MIST: Self = Self::rgb8(0xEE, 0xEE, 0xEE);
    /// Scanner glow violet (violet-500).
    pub const VIOLET: Self = Self::rgb8(139, 92, 246);
    /// Scanner inner glow (violet-300).
    pub const LAVENDER: Self = Self::rgb8(196, 181, 253);
    /// Beam head (emerald-300).
    pub const EMERALD_300: Self = Self::rgb8(110, 231, 183);
    /// Beam body (emerald-400).
    pub const EMERALD_400: Self = Self::rgb8(52, 211, 153);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Creates a color from hex value (0xRRGGBB), fully opaque.
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        Self::rgb8(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Returns a new color with different alpha, clamped to [0, 1].
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a.clamp(0.0, 1.0))
    }

    /// Scales each channel by `1 + pct`, capped at 1.
    #[must_use]
    pub fn shade(self, pct: f32) -> Self {
        let k = 1.0 + pct;
        Self::rgba(
            (self.r * k).clamp(0.0, 1.0),
            (self.g * k).clamp(0.0, 1.0),
            (self.b * k).clamp(0.0, 1.0),
            self.a,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Compositing mode for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Normal alpha blending.
    #[default]
    SourceOver,
    /// Additive ("lighter"); overlapping glows brighten.
    Additive,
    /// Keeps existing pixels only where the source is opaque (masking).
    DestinationIn,
}

/// Direction a linear gradient runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientAxis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// One gradient color stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient (0-1).
    pub offset: f32,
    /// Color at that position.
    pub color: Color,
}

/// A linear gradient with up to [`Gradient::MAX_STOPS`] stops, stored inline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    /// Axis the gradient runs along.
    pub axis: GradientAxis,
    stops: [GradientStop; Gradient::MAX_STOPS],
    len: usize,
}

impl Gradient {
    /// Maximum number of stops.
    pub const MAX_STOPS: usize = 5;

    /// Builds a gradient. Stops beyond [`Self::MAX_STOPS`] are ignored.
    #[must_use]
    pub fn new(axis: GradientAxis, stops: &[(f32, Color)]) -> Self {
        let mut gradient = Self {
            axis,
            stops: [GradientStop {
                offset: 0.0,
                color: Color::TRANSPARENT,
            }; Self::MAX_STOPS],
            len: stops.len().min(Self::MAX_STOPS),
        };
        for (slot, &(offset, color)) in gradient.stops.iter_mut().zip(stops) {
            *slot = GradientStop {
                offset: offset.clamp(0.0, 1.0),
                color,
            };
        }
        gradient
    }

    /// The active stops.
    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops[..self.len]
    }
}

/// Cached sprite textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    /// White core fading through blue (hue 217) to transparent.
    AmbientGlow,
    /// White core fading through lavender and violet to transparent.
    ScannerGlow,
}

/// Inset clip in percent of the layer's width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipInset {
    /// Percent hidden from the left edge.
    pub left: f32,
    /// Percent hidden from the right edge.
    pub right: f32,
}

/// Which representation of a carousel card a layer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLayer {
    /// The card image.
    Image,
    /// The ASCII-art rendering.
    Ascii,
}

/// A draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clears a region to transparent.
    Clear {
        /// Region.
        bounds: Rect,
    },
    /// Solid rectangle.
    FillRect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: f32,
        /// Layer alpha.
        alpha: f32,
        /// Compositing.
        blend: BlendMode,
    },
    /// Rectangle filled with a linear gradient.
    GradientRect {
        /// Bounds.
        bounds: Rect,
        /// Gradient.
        gradient: Gradient,
        /// Corner radius.
        corner_radius: f32,
        /// Layer alpha.
        alpha: f32,
        /// Compositing.
        blend: BlendMode,
    },
    /// Cached sprite centred on a point.
    Sprite {
        /// Texture.
        sprite: SpriteId,
        /// Center.
        center: (f32, f32),
        /// Half extent.
        radius: f32,
        /// Alpha.
        alpha: f32,
        /// Compositing.
        blend: BlendMode,
    },
    /// Filled circle.
    Circle {
        /// Center.
        center: (f32, f32),
        /// Radius.
        radius: f32,
        /// Color.
        color: Color,
        /// Alpha.
        alpha: f32,
    },
    /// Filled triangle.
    Triangle {
        /// Vertices in screen space.
        points: [(f32, f32); 3],
        /// Color.
        color: Color,
        /// Alpha.
        alpha: f32,
    },
    /// Single text glyph with a transform.
    Glyph {
        /// Character.
        ch: char,
        /// Resting center.
        center: (f32, f32),
        /// Font size in pixels.
        size: f32,
        /// Color.
        color: Color,
        /// Opacity.
        opacity: f32,
        /// Uniform scale.
        scale: f32,
        /// Vertical offset from the resting position.
        offset_y: f32,
        /// Rotation in degrees.
        rotation_deg: f32,
    },
    /// One layer of a carousel card.
    CardLayer {
        /// Card index.
        card: usize,
        /// Layer kind.
        layer: CardLayer,
        /// Card bounds.
        bounds: Rect,
        /// Clip applied to the layer.
        clip: ClipInset,
    },
}

/// Collects draw commands for one frame.
#[derive(Debug, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates a list with room for a busy frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(4096),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Adds a draw command.
    #[inline]
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// All commands in submission order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the total command count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Counts commands matching a predicate.
    pub fn count_where(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_truncates_stops() {
        let stops = [(0.0, Color::WHITE); 7];
        let gradient = Gradient::new(GradientAxis::Horizontal, &stops);
        assert_eq!(gradient.stops().len(), Gradient::MAX_STOPS);
    }

    #[test]
    fn test_shade_caps_at_one() {
        let c = Color::rgba(0.9, 0.5, 0.0, 1.0).shade(0.2);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 0.6).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(Color::WHITE.with_alpha(3.5).a, 1.0);
    }

    #[test]
    fn test_list_frame_reset() {
        let mut list = DrawList::new();
        list.push(DrawCommand::Clear { bounds: Rect::default() });
        assert_eq!(list.len(), 1);
        list.begin_frame();
        assert!(list.is_empty());
    }
}
