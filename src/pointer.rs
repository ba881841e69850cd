use crate::math::Vector2;

/// Pointer buttons in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PointerButton {
    Left = 0,
    Middle = 1,
    Right = 2,
}

pub const POINTER_BUTTON_COUNT: usize = 3;

pub const POINTER_BUTTONS: [PointerButton; POINTER_BUTTON_COUNT] = [
    PointerButton::Left,
    PointerButton::Middle,
    PointerButton::Right,
];

/// Per-button phase for the current frame, derived from the down flags of
/// this frame and the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ButtonPhase {
    PressedThisFrame,
    Pressed,
    ReleasedThisFrame,
    #[default]
    Released,
}

impl ButtonPhase {
    pub fn is_down(self) -> bool {
        matches!(self, ButtonPhase::PressedThisFrame | ButtonPhase::Pressed)
    }

    pub(crate) fn from_down(was_down: bool, is_down: bool) -> Self {
        match (was_down, is_down) {
            (false, true) => ButtonPhase::PressedThisFrame,
            (true, true) => ButtonPhase::Pressed,
            (true, false) => ButtonPhase::ReleasedThisFrame,
            (false, false) => ButtonPhase::Released,
        }
    }
}

/// The pointer snapshot the engine works from, queried once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub position: Vector2,
    pub buttons: [ButtonPhase; POINTER_BUTTON_COUNT],
}

impl Pointer {
    pub fn phase(&self, button: PointerButton) -> ButtonPhase {
        self.buttons[button as usize]
    }

    /// The first button that went down this frame, in index order.
    pub fn just_pressed(&self) -> Option<PointerButton> {
        POINTER_BUTTONS
            .into_iter()
            .find(|&b| self.phase(b) == ButtonPhase::PressedThisFrame)
    }

    pub fn just_released(&self) -> Option<PointerButton> {
        POINTER_BUTTONS
            .into_iter()
            .find(|&b| self.phase(b) == ButtonPhase::ReleasedThisFrame)
    }

    pub fn held(&self) -> Option<PointerButton> {
        POINTER_BUTTONS.into_iter().find(|&b| self.phase(b).is_down())
    }
}

/// What a node learns about the pointer the instant it is declared.
///
/// Everything here is resolved against the *previous* frame's settled
/// geometry; a node declared for the first time gets the inert default.
/// Hover is pure geometry; the press fields are only active when the node
/// was the topmost hovered node last frame or currently holds the press
/// capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interaction {
    /// Id assigned to the node this frame; stable across frames only while
    /// the declaration order is stable.
    pub id: u32,
    /// The pointer was inside this node's previous-frame absolute rect.
    pub hovered: bool,
    /// This node was the single topmost hovered node last frame.
    pub topmost: bool,
    /// Button currently held on this node.
    pub pressed: Option<PointerButton>,
    /// Button that went down on this node this frame.
    pub just_pressed: Option<PointerButton>,
    /// Button that was released on this node this frame.
    pub just_released: Option<PointerButton>,
}

impl Interaction {
    pub(crate) fn inert(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Released on this node this frame, the usual click trigger.
    pub fn clicked(&self) -> bool {
        self.just_released.is_some()
    }

    pub fn held(&self) -> bool {
        self.pressed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_edges() {
        assert_eq!(
            ButtonPhase::from_down(false, true),
            ButtonPhase::PressedThisFrame
        );
        assert_eq!(ButtonPhase::from_down(true, true), ButtonPhase::Pressed);
        assert_eq!(
            ButtonPhase::from_down(true, false),
            ButtonPhase::ReleasedThisFrame
        );
        assert_eq!(ButtonPhase::from_down(false, false), ButtonPhase::Released);
    }

    #[test]
    fn just_pressed_prefers_lowest_index() {
        let mut pointer = Pointer::default();
        pointer.buttons[PointerButton::Right as usize] = ButtonPhase::PressedThisFrame;
        pointer.buttons[PointerButton::Left as usize] = ButtonPhase::PressedThisFrame;
        assert_eq!(pointer.just_pressed(), Some(PointerButton::Left));
    }
}
