//! Immediate-mode UI layout and interaction engine.
//!
//! Application code re-declares its whole widget tree every frame through
//! [`Ui::begin`]/[`Ui::element`]/[`Ui::end`] calls; the engine turns that
//! declaration into positioned, sized, hit-tested and drawn elements. No
//! widget objects are retained between frames: identity is the call-order
//! id, and frame N's settled geometry answers frame N+1's interaction
//! queries. That one-frame latency is deliberate: it is the only way to
//! answer hover/press questions synchronously, at declaration time, before
//! the current frame's layout exists.

pub mod color;
pub mod component;
pub mod draw;
pub mod error;
pub mod identity;
pub mod math;
pub mod node;
pub mod pointer;
pub mod prelude;
pub mod renderer;
mod solve;
pub mod style;

pub use color::Color;
pub use component::{Component, ComponentKind, ImageSource, ImageStyle, RectStyle, TextStyle};
pub use error::UiError;
pub use math::{Dimensions, Rect, Vector2};
pub use pointer::{ButtonPhase, Interaction, Pointer, PointerButton, POINTER_BUTTON_COUNT};
pub use style::{Align, Anchor, Axis, Dim, MinMax, Padding, Style};

use draw::Surface;
use identity::{IdentityRecord, IdentityStore};
use node::Node;
use solve::{MeasureImageFn, MeasureTextFn, Solver};

/// The engine. Owns the per-frame node arena, the cross-frame identity
/// store, the pointer snapshot and the style stack. Single-threaded and
/// frame-stepped; nothing here blocks or suspends.
pub struct Ui {
    surface_size: Dimensions,
    nodes: Vec<Node>,
    /// Open-container stack; the synthetic root sits at the bottom for the
    /// whole frame.
    open: Vec<u32>,
    store: IdentityStore,
    pointer: Pointer,
    pointer_down: [bool; POINTER_BUTTON_COUNT],
    style_stack: Vec<Style>,
    measure_text: Option<Box<MeasureTextFn>>,
    measure_image: Option<Box<MeasureImageFn>>,
    in_frame: bool,
    finalized: bool,
    last_created: Option<u32>,
}

impl Ui {
    pub fn new(surface_size: Dimensions) -> Self {
        Self {
            surface_size,
            nodes: Vec::new(),
            open: Vec::new(),
            store: IdentityStore::new(),
            pointer: Pointer::default(),
            pointer_down: [false; POINTER_BUTTON_COUNT],
            style_stack: Vec::new(),
            measure_text: None,
            measure_image: None,
            in_frame: false,
            finalized: false,
            last_created: None,
        }
    }

    /// Use when the window the tree renders to changes size.
    pub fn set_surface_size(&mut self, size: Dimensions) {
        self.surface_size = size;
    }

    /// Feeds the pointer snapshot for the coming frame: position plus the
    /// raw down flag per button. Edges (pressed/released this frame) are
    /// derived against the previous call. Call once per frame, before
    /// `begin_frame`.
    pub fn set_pointer_state(
        &mut self,
        position: impl Into<Vector2>,
        down: [bool; POINTER_BUTTON_COUNT],
    ) {
        self.pointer.position = position.into();
        for index in 0..POINTER_BUTTON_COUNT {
            self.pointer.buttons[index] =
                ButtonPhase::from_down(self.pointer_down[index], down[index]);
        }
        self.pointer_down = down;
    }

    /// Registers the text measurement collaborator; required before any
    /// resize-to-content node carries a text component.
    pub fn set_text_measurer<F>(&mut self, measure: F)
    where
        F: FnMut(&str, &TextStyle) -> Dimensions + 'static,
    {
        self.measure_text = Some(Box::new(measure));
    }

    pub fn set_image_measurer<F>(&mut self, measure: F)
    where
        F: FnMut(&ImageSource, &ImageStyle) -> Dimensions + 'static,
    {
        self.measure_image = Some(Box::new(measure));
    }

    // ------------------------------------------------------------------
    // Style stack
    // ------------------------------------------------------------------

    /// Pushes scoped style defaults. There is no hidden global default
    /// style: callers derive declarations from [`Ui::base_style`] and scope
    /// shared values with push/pop around a declaration block.
    pub fn push_style(&mut self, style: Style) {
        self.style_stack.push(style);
    }

    pub fn pop_style(&mut self) -> Option<Style> {
        self.style_stack.pop()
    }

    /// A copy of the innermost pushed style, or a fresh default.
    pub fn base_style(&self) -> Style {
        self.style_stack.last().cloned().unwrap_or_else(Style::new)
    }

    // ------------------------------------------------------------------
    // Frame lifecycle
    // ------------------------------------------------------------------

    /// Starts a frame: resets the arena and opens the synthetic root, which
    /// has no parent and fills the drawable surface.
    pub fn begin_frame(&mut self) {
        self.nodes.clear();
        self.open.clear();
        self.last_created = None;
        self.finalized = false;
        self.in_frame = true;

        let root_rect = Rect::from_size(self.surface_size.width, self.surface_size.height);
        self.nodes.push(Node::new(0, root_rect, Style::new(), None, 0));
        self.open.push(0);
        log::trace!("frame started, surface {:?}", self.surface_size);
    }

    /// Opens a container and pushes it onto the open-parent stack. The
    /// returned interaction is answered from last frame's geometry.
    pub fn begin(&mut self, rect: Option<Rect>, style: &Style) -> Result<Interaction, UiError> {
        self.create(rect, style, true)
    }

    /// Creates a leaf node without opening it.
    pub fn element(&mut self, rect: Option<Rect>, style: &Style) -> Result<Interaction, UiError> {
        self.create(rect, style, false)
    }

    /// Closes the innermost open container and immediately solves its
    /// layout, so resize-to-content parents further up see its final size.
    /// Returns the solved parent-local rectangle.
    pub fn end(&mut self) -> Result<Rect, UiError> {
        if !self.in_frame {
            return Err(UiError::NoFrame("`end` outside a frame"));
        }
        if self.open.len() <= 1 {
            return Err(UiError::EndWithoutBegin);
        }
        let Some(id) = self.open.pop() else {
            return Err(UiError::EndWithoutBegin);
        };
        let id = id as usize;
        self.nodes[id].solved = false;
        self.solver().solve(id)?;
        Ok(self.nodes[id].rect)
    }

    /// Attaches a visual component to the most recently created node.
    pub fn add_component(&mut self, component: impl Into<Component>) -> Result<(), UiError> {
        if !self.in_frame {
            return Err(UiError::NoFrame("`add_component` outside a frame"));
        }
        let target = self
            .last_created
            .ok_or(UiError::ComponentWithoutElement)? as usize;
        self.nodes[target].components.push(component.into());
        Ok(())
    }

    /// Shorthand for attaching a text component.
    pub fn text(&mut self, text: impl Into<String>, style: TextStyle) -> Result<(), UiError> {
        self.add_component(Component::new(ComponentKind::Text(text.into(), style)))
    }

    /// Shorthand for attaching a rectangle fill.
    pub fn fill(&mut self, color: Color) -> Result<(), UiError> {
        self.add_component(Component::new(ComponentKind::Rect(RectStyle::fill(color))))
    }

    /// Finishes the frame: solves the root, resolves absolute rectangles,
    /// clips and culling, writes every node's identity record, and settles
    /// the topmost hovered node for next frame's queries.
    pub fn end_frame(&mut self) -> Result<(), UiError> {
        if !self.in_frame {
            return Err(UiError::NoFrame("`end_frame` without `begin_frame`"));
        }
        if self.open.len() != 1 {
            return Err(UiError::NoFrame("containers still open at end of frame"));
        }
        self.open.pop();

        self.nodes[0].rect = Rect::from_size(self.surface_size.width, self.surface_size.height);
        self.nodes[0].solved = false;
        self.solver().solve(0)?;

        self.finalize(0, Vector2::ZERO, None, false);
        self.update_identity();
        self.settle_topmost();
        self.release_capture_if_done();

        self.in_frame = false;
        self.finalized = true;
        log::trace!(
            "frame finalized: {} nodes, topmost {:?}",
            self.nodes.len(),
            self.store.topmost()
        );
        Ok(())
    }

    /// Renders the finalized tree. Read-only; may be called repeatedly and
    /// requires a completed `end_frame`.
    pub fn draw(&self, surface: &mut dyn Surface) -> Result<(), UiError> {
        if !self.finalized {
            return Err(UiError::NoFrame("`draw` before `end_frame`"));
        }
        draw::draw_tree(&self.nodes, 0, surface);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Parent-local rectangle of a node in the last finalized frame.
    pub fn rect_of(&self, id: u32) -> Option<Rect> {
        self.nodes.get(id as usize).map(|node| node.rect)
    }

    pub fn absolute_rect_of(&self, id: u32) -> Option<Rect> {
        self.nodes.get(id as usize).map(|node| node.absolute_rect)
    }

    /// Per-axis content overflow recorded for an id in the last finalized
    /// frame; consumed by scrolling collaborators.
    pub fn overflow_of(&self, id: u32) -> Option<Vector2> {
        self.store.get(id).map(|record| record.overflow)
    }

    /// The single topmost hovered node of the last finalized frame.
    pub fn topmost(&self) -> Option<u32> {
        self.store.topmost()
    }

    /// Drops all cross-frame identity state, e.g. on scene teardown.
    pub fn clear_identity(&mut self) {
        self.store.clear();
    }

    /// Drops identity state except the whitelisted ids.
    pub fn clear_identity_except(&mut self, keep: &[u32]) {
        self.store.clear_except(keep);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn solver(&mut self) -> Solver<'_> {
        Solver {
            nodes: &mut self.nodes,
            measure_text: &mut self.measure_text,
            measure_image: &mut self.measure_image,
        }
    }

    fn create(
        &mut self,
        rect: Option<Rect>,
        style: &Style,
        container: bool,
    ) -> Result<Interaction, UiError> {
        if !self.in_frame {
            return Err(UiError::NoFrame("element declared outside a frame"));
        }
        style.validate()?;

        let id = self.nodes.len() as u32;
        let parent = match style.parent {
            Some(explicit) => {
                if (explicit as usize) >= self.nodes.len() {
                    return Err(UiError::UnknownParent(explicit));
                }
                explicit
            }
            None => match self.open.last() {
                Some(&open) => open,
                None => return Err(UiError::NoFrame("no open container")),
            },
        };

        let sibling_index = self.nodes[parent as usize].children.len();
        let z = style
            .z
            .unwrap_or(self.nodes[parent as usize].z + sibling_index as i32 + 1);

        let interaction = self.resolve_interaction(id);

        let mut node = Node::new(id, rect.unwrap_or_default(), style.clone(), Some(parent), z);
        node.interaction = interaction;
        self.nodes.push(node);
        self.nodes[parent as usize].children.push(id);
        // Adoption into a container that already closed reopens the
        // ancestor chain, so the frame-end solve re-enters it and the new
        // child gets sized and placed.
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            let ancestor_node = &mut self.nodes[current as usize];
            if !ancestor_node.solved {
                break;
            }
            ancestor_node.solved = false;
            ancestor = ancestor_node.parent;
        }
        self.last_created = Some(id);
        if container {
            self.open.push(id);
        }
        Ok(interaction)
    }

    /// Answers an interaction query the instant a node is created, from the
    /// previous frame's settled geometry. No record yet means the inert
    /// default, by the one-frame latency contract.
    fn resolve_interaction(&mut self, id: u32) -> Interaction {
        let mut result = Interaction::inert(id);
        let Some(record) = self.store.get(id) else {
            return result;
        };
        let over = !record.culled && record.absolute_rect.contains(self.pointer.position);
        result.hovered = over;
        result.topmost = record.was_topmost;

        match self.store.captured() {
            Some((captured_id, button)) => {
                // A live capture owns all press semantics, on or off its
                // geometry, until the button releases.
                if captured_id == id {
                    let phase = self.pointer.phase(button);
                    if phase.is_down() {
                        result.pressed = Some(button);
                    }
                    if phase == ButtonPhase::ReleasedThisFrame {
                        result.just_released = Some(button);
                    }
                }
            }
            None if over && record.was_topmost => {
                if let Some(button) = self.pointer.just_pressed() {
                    result.just_pressed = Some(button);
                    result.pressed = Some(button);
                    self.store.claim_capture(id, button);
                } else if let Some(button) = self.pointer.held() {
                    result.pressed = Some(button);
                } else if let Some(button) = self.pointer.just_released() {
                    result.just_released = Some(button);
                }
            }
            None => {}
        }
        result
    }

    /// Resolves absolute rectangles, clip chains and clip culling in one
    /// depth-first walk over the solved tree.
    fn finalize(
        &mut self,
        index: usize,
        parent_origin: Vector2,
        parent_clip: Option<Rect>,
        parent_culled: bool,
    ) {
        let node = &self.nodes[index];
        let offset = node.style.offset;
        let absolute = Rect::new(
            parent_origin.x + node.rect.x + offset.x,
            parent_origin.y + node.rect.y + offset.y,
            node.rect.width,
            node.rect.height,
        );
        let clips = node.style.clip;

        // A clip-disabled node bleeds out of its ancestors, so it is never
        // culled against them either.
        let culled = parent_culled
            || (clips && parent_clip.is_some_and(|clip| !clip.overlaps(&absolute)));
        let clip = if clips {
            Some(match parent_clip {
                Some(parent_clip) => absolute.intersect(&parent_clip),
                None => absolute,
            })
        } else {
            None
        };

        let node = &mut self.nodes[index];
        node.absolute_rect = absolute;
        node.clip = clip;
        node.culled = culled;

        let children: Vec<usize> = node.children.iter().map(|&id| id as usize).collect();
        let origin = absolute.origin();
        for child in children {
            self.finalize(child, origin, clip, culled);
        }
    }

    fn update_identity(&mut self) {
        for node in &self.nodes {
            self.store.insert(
                node.id,
                IdentityRecord {
                    rect: node.rect,
                    absolute_rect: node.absolute_rect,
                    components: node.components.clone(),
                    children: node.children.clone(),
                    parent: node.parent,
                    overflow: node.overflow,
                    hovered: node.interaction.hovered,
                    pressed: node.interaction.pressed,
                    was_topmost: false,
                    culled: node.culled,
                },
            );
        }
    }

    /// Flags the single topmost hovered node: highest z among non-culled,
    /// positive-area nodes under the pointer; equal z resolves to the
    /// later-declared node, which draws on top.
    fn settle_topmost(&mut self) {
        let mut best: Option<(i32, u32)> = None;
        for node in &self.nodes {
            if node.culled || node.absolute_rect.is_empty() {
                continue;
            }
            if !node.absolute_rect.contains(self.pointer.position) {
                continue;
            }
            let key = (node.z, node.id);
            if best.map_or(true, |current| key > current) {
                best = Some(key);
            }
        }
        self.store.set_topmost(best.map(|(_, id)| id));
    }

    fn release_capture_if_done(&mut self) {
        if let Some((_, button)) = self.store.captured() {
            if !self.pointer.phase(button).is_down() {
                self.store.release_capture();
            }
        }
    }
}
