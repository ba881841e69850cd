use crate::component::Component;
use crate::math::{Rect, Vector2};
use crate::pointer::Interaction;
use crate::style::Style;

/// One UI element for the current frame, stored in the frame arena and
/// addressed by its call-order id. Rebuilt from scratch every frame; nothing
/// here survives `begin_frame`.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: u32,
    /// Parent-local rectangle, mutated by the solver.
    pub rect: Rect,
    /// Resolved during the finalize walk by accumulating ancestor offsets.
    pub absolute_rect: Rect,
    /// Clip applied to this node's content; `None` means unclipped.
    pub clip: Option<Rect>,
    pub style: Style,
    pub parent: Option<u32>,
    /// All children in insertion order, including layout-ignored ones.
    pub children: Vec<u32>,
    pub components: Vec<Component>,
    pub z: i32,
    pub interaction: Interaction,
    /// Content extent beyond the padded box, per axis; consumed by
    /// scrolling collaborators via the identity store.
    pub overflow: Vector2,
    /// Set once this node's children have been sized and positioned.
    pub solved: bool,
    /// Fully outside the parent clip this frame; skipped for draw and hit
    /// registration.
    pub culled: bool,
}

impl Node {
    pub fn new(id: u32, rect: Rect, style: Style, parent: Option<u32>, z: i32) -> Self {
        Self {
            id,
            rect,
            absolute_rect: Rect::default(),
            clip: None,
            style,
            parent,
            children: Vec::new(),
            components: Vec::new(),
            z,
            interaction: Interaction::inert(id),
            overflow: Vector2::ZERO,
            solved: false,
            culled: false,
        }
    }
}
