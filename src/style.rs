use crate::error::UiError;
use crate::math::Vector2;

/// Layout axis. The primary axis of a container is the one its children
/// flow along; the other axis is the secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Axis {
    #[default]
    X,
    Y,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }

    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Placement of the packed content block along an axis: the start offset is
/// shifted (`First`/`Center`/`Last`), or leftover space is redistributed
/// evenly between items (`MaxSpacing`).
///
/// In linear flow this governs the primary axis; in a wrapping grid it
/// governs how lines stack along the secondary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Anchor {
    #[default]
    First,
    Center,
    Last,
    MaxSpacing,
}

/// Per-child placement within the space allotted across an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Align {
    #[default]
    First,
    Center,
    Last,
}

/// A length that is either absolute pixels or a fraction of the available
/// space it is resolved against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dim {
    Px(f32),
    /// Fraction in `0.0..=1.0` of the space left after fixed content.
    Percent(f32),
}

impl Dim {
    /// Parses `"12"` as pixels and `"50%"` as a fraction. Anything else is
    /// a configuration error; nothing is coerced.
    pub fn parse(text: &str) -> Result<Self, UiError> {
        let trimmed = text.trim();
        let invalid = || UiError::InvalidPercent(text.to_string());
        if let Some(number) = trimmed.strip_suffix('%') {
            let value: f32 = number.trim().parse().map_err(|_| invalid())?;
            if !value.is_finite() || value < 0.0 {
                return Err(invalid());
            }
            Ok(Dim::Percent(value / 100.0))
        } else {
            let value: f32 = trimmed.parse().map_err(|_| invalid())?;
            if !value.is_finite() || value < 0.0 {
                return Err(invalid());
            }
            Ok(Dim::Px(value))
        }
    }

    pub fn resolve(self, available: f32) -> f32 {
        match self {
            Dim::Px(value) => value,
            Dim::Percent(fraction) => fraction * available,
        }
    }
}

impl Default for Dim {
    fn default() -> Self {
        Dim::Px(0.0)
    }
}

impl From<f32> for Dim {
    fn from(value: f32) -> Self {
        Dim::Px(value)
    }
}

/// Clamp bounds for a resize-to-content axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: f32,
    pub max: f32,
}

impl MinMax {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }
}

impl Default for MinMax {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: f32::MAX,
        }
    }
}

/// Padding for each side of a container's box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(value: f32) -> Self {
        Self::new(value, value, 0.0, 0.0)
    }

    pub fn vertical(value: f32) -> Self {
        Self::new(0.0, 0.0, value, value)
    }

    /// Total padding along an axis (both sides).
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.left + self.right,
            Axis::Y => self.top + self.bottom,
        }
    }

    /// Padding on the leading side of an axis.
    pub fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }
}

impl From<f32> for Padding {
    fn from(value: f32) -> Self {
        Self::all(value)
    }
}

/// Per-node layout configuration. Plain data; chainable setters consume and
/// return `self` so a declaration reads as one expression.
///
/// Fill and resize are independent knobs per axis so that requesting both on
/// the same axis can be rejected as a configuration conflict at declaration
/// time, before any layout runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    /// Primary axis children flow along.
    pub axis: Axis,
    /// Per-axis fill request (`[x, y]`), resolved against leftover parent
    /// space.
    pub fill: [Option<Dim>; 2],
    /// Per-axis resize-to-content request with clamp bounds.
    pub resize: [Option<MinMax>; 2],
    pub padding: Padding,
    /// Space between consecutive children; percent resolves against the
    /// padded primary extent.
    pub spacing: Dim,
    pub anchor: Anchor,
    /// Secondary-axis placement of each child (linear flow) or of children
    /// within their line (grid).
    pub align: Align,
    /// Selects the wrapping-grid solver instead of linear flow.
    pub grid: bool,
    /// Primary-axis placement of each line's content within a grid.
    pub grid_align: Align,
    /// When `false`, this node's subtree is not clipped by the ancestor
    /// chain and may bleed into siblings.
    pub clip: bool,
    /// Excluded from the parent's layout solving; keeps its declared rect.
    pub ignore_layout: bool,
    /// Attach to this node id instead of the innermost open container.
    pub parent: Option<u32>,
    /// Explicit z override; otherwise derived from parent z + sibling index.
    pub z: Option<i32>,
    /// Pixel offset applied when resolving the absolute rect.
    pub offset: Vector2,
}

impl Style {
    pub fn new() -> Self {
        Self {
            clip: true,
            ..Self::default()
        }
    }

    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn fill_x(mut self, dim: impl Into<Dim>) -> Self {
        self.fill[0] = Some(dim.into());
        self
    }

    pub fn fill_y(mut self, dim: impl Into<Dim>) -> Self {
        self.fill[1] = Some(dim.into());
        self
    }

    pub fn resize_x(mut self, bounds: MinMax) -> Self {
        self.resize[0] = Some(bounds);
        self
    }

    pub fn resize_y(mut self, bounds: MinMax) -> Self {
        self.resize[1] = Some(bounds);
        self
    }

    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn spacing(mut self, spacing: impl Into<Dim>) -> Self {
        self.spacing = spacing.into();
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn grid(mut self) -> Self {
        self.grid = true;
        self
    }

    pub fn grid_align(mut self, align: Align) -> Self {
        self.grid_align = align;
        self
    }

    pub fn no_clip(mut self) -> Self {
        self.clip = false;
        self
    }

    pub fn ignore_layout(mut self) -> Self {
        self.ignore_layout = true;
        self
    }

    pub fn parent(mut self, id: u32) -> Self {
        self.parent = Some(id);
        self
    }

    pub fn z(mut self, z: i32) -> Self {
        self.z = Some(z);
        self
    }

    pub fn offset(mut self, offset: impl Into<Vector2>) -> Self {
        self.offset = offset.into();
        self
    }

    pub fn fill_on(&self, axis: Axis) -> Option<Dim> {
        self.fill[axis.index()]
    }

    pub fn resize_on(&self, axis: Axis) -> Option<MinMax> {
        self.resize[axis.index()]
    }

    /// Rejects configurations that cannot mean anything. Called by the tree
    /// builder before a node is linked into the frame.
    pub fn validate(&self) -> Result<(), UiError> {
        for axis in [Axis::X, Axis::Y] {
            if self.fill[axis.index()].is_some() && self.resize[axis.index()].is_some() {
                return Err(UiError::ConflictingSizing(axis));
            }
        }
        Ok(())
    }
}

/// Shorthand for a fill request. `fill!()` takes all remaining space,
/// `fill!(0.5)` takes half of it.
#[macro_export]
macro_rules! fill {
    ($fraction:expr) => {
        $crate::style::Dim::Percent($fraction)
    };
    () => {
        $crate::fill!(1.0)
    };
}

/// Shorthand for an absolute pixel length.
#[macro_export]
macro_rules! px {
    ($value:expr) => {
        $crate::style::Dim::Px($value)
    };
}

/// Shorthand for resize-to-content clamp bounds. Defaults max to `f32::MAX`
/// if omitted.
#[macro_export]
macro_rules! content {
    ($min:expr, $max:expr) => {
        $crate::style::MinMax::new($min, $max)
    };
    ($min:expr) => {
        $crate::content!($min, f32::MAX)
    };
    () => {
        $crate::content!(0.0)
    };
}
