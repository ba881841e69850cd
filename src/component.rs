use crate::color::Color;
use crate::math::Vector2;

/// Text styling handed to the measurement and draw collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub font_size: u16,
    pub letter_spacing: u16,
    pub line_height: u16,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            font_size: 16,
            letter_spacing: 0,
            line_height: 0,
        }
    }
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn font_size(mut self, size: u16) -> Self {
        self.font_size = size;
        self
    }

    pub fn letter_spacing(mut self, spacing: u16) -> Self {
        self.letter_spacing = spacing;
        self
    }

    pub fn line_height(mut self, height: u16) -> Self {
        self.line_height = height;
        self
    }
}

/// An image that can be loaded as a texture: an external file path or bytes
/// embedded in the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(&'static str),
    Bytes {
        name: &'static str,
        data: &'static [u8],
    },
}

impl ImageSource {
    /// Cache key for the texture manager.
    pub fn name(&self) -> &str {
        match self {
            ImageSource::Path(path) => path,
            ImageSource::Bytes { name, .. } => name,
        }
    }
}

/// Image styling: a tint applied at blit time.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageStyle {
    pub tint: Color,
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self { tint: Color::WHITE }
    }
}

/// Rectangle fill or outline covering the node's rect.
#[derive(Debug, Clone, PartialEq)]
pub struct RectStyle {
    pub color: Color,
    /// `None` fills the rectangle, `Some(thickness)` strokes its outline.
    pub outline: Option<f32>,
}

impl RectStyle {
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            outline: None,
        }
    }

    pub fn outline(color: Color, thickness: f32) -> Self {
        Self {
            color,
            outline: Some(thickness),
        }
    }
}

/// The visual payloads a node can carry. Geometry inside a kind is local to
/// the node's rectangle.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Rect(RectStyle),
    Text(String, TextStyle),
    Image(ImageSource, ImageStyle),
    Line {
        from: Vector2,
        to: Vector2,
        thickness: f32,
        color: Color,
    },
    Polygon {
        points: Vec<Vector2>,
        color: Color,
    },
    Circle {
        center: Vector2,
        radius: f32,
        color: Color,
    },
}

/// One visual component attached to a node. Components draw in attachment
/// order; `above_children` defers a component until after the node's subtree
/// (borders and cursors over content).
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub kind: ComponentKind,
    pub above_children: bool,
}

impl Component {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            above_children: false,
        }
    }

    pub fn above(mut self) -> Self {
        self.above_children = true;
        self
    }
}

impl From<ComponentKind> for Component {
    fn from(kind: ComponentKind) -> Self {
        Self::new(kind)
    }
}
