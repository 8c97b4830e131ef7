//! Drawing primitives emitted by the renderer.
//!
//! A [`Frame`] is an ordered list of [`DrawCommand`]s; a surface replays
//! them front to back. Arc angles follow the usual canvas convention:
//! degrees, clockwise, 0° at 3 o'clock.

use calwatch_core::{Color, Point};
use serde::Serialize;

/// How a shape is filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
    FillAndStroke,
}

/// Line end decoration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
}

/// Horizontal anchor of text relative to its origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Typeface {
    #[default]
    Default,
    Serif,
}

/// Style for one draw command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f64,
    pub cap: StrokeCap,
    pub anti_alias: bool,
    pub text_size: f64,
    pub align: TextAlign,
    pub typeface: Typeface,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            style: PaintStyle::Fill,
            stroke_width: 1.0,
            cap: StrokeCap::Butt,
            anti_alias: true,
            text_size: 12.0,
            align: TextAlign::Left,
            typeface: Typeface::Default,
        }
    }
}

impl Paint {
    /// A filled paint.
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// An outline paint of the given width.
    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width: width,
            ..Self::default()
        }
    }

    /// A centered text paint.
    pub fn text(color: Color, size: f64) -> Self {
        Self {
            color,
            text_size: size,
            align: TextAlign::Center,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    #[must_use]
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.color = self.color.with_alpha(alpha);
        self
    }

    #[must_use]
    pub fn with_typeface(mut self, typeface: Typeface) -> Self {
        self.typeface = typeface;
        self
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A `width` x `height` rectangle centered in a `outer_width` x
    /// `outer_height` surface.
    pub fn centered(outer_width: f64, outer_height: f64, width: f64, height: f64) -> Self {
        let left = (outer_width - width) / 2.0;
        let top = (outer_height - height) / 2.0;
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// One drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear { color: Color },
    Line { from: Point, to: Point, paint: Paint },
    /// An arc of the oval inscribed in `oval`. With `use_center` the arc is
    /// closed through the center into a pie slice.
    Arc {
        oval: Rect,
        start_angle: f64,
        sweep_angle: f64,
        use_center: bool,
        paint: Paint,
    },
    Circle { center: Point, radius: f64, paint: Paint },
    Rect { rect: Rect, paint: Paint },
    /// Text with its baseline at `origin`.
    Text { text: String, origin: Point, paint: Paint },
    /// Text laid along an arc of `oval`, shifted by the offsets.
    TextOnArc {
        text: String,
        oval: Rect,
        start_angle: f64,
        sweep_angle: f64,
        h_offset: f64,
        v_offset: f64,
        paint: Paint,
    },
}

impl DrawCommand {
    /// Returns the text carried by text commands.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } | Self::TextOnArc { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// The commands for one rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text drawn in the frame, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands.iter().filter_map(DrawCommand::text).collect()
    }
}
