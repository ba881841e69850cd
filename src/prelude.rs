//! The weft prelude — a single import for everything you need.
//!
//! ```rust
//! use weft::prelude::*;
//! ```

// Core types
pub use crate::Ui;
pub use crate::draw::Surface;
pub use crate::error::UiError;
pub use crate::math::{Dimensions, Rect, Vector2};
pub use crate::pointer::{Interaction, PointerButton};
pub use crate::renderer::{MacroquadSurface, TextureManager, TEXTURE_MANAGER};

// Components
pub use crate::component::{
    Component, ComponentKind, ImageSource, ImageStyle, RectStyle, TextStyle,
};

// Style — enums globbed, the rest as types
pub use crate::style::Align::{self, *};
pub use crate::style::Anchor;
pub use crate::style::Axis;
pub use crate::style::{Dim, MinMax, Padding, Style};

// Macros
pub use crate::{content, fill, px};

// Utility functions
pub use crate::renderer::{image_measurer, text_measurer};

pub use crate::color::Color;
