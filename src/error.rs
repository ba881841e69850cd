use crate::style::Axis;

/// Every failure the engine can raise. All of them are raised synchronously
/// at the point of declaration; a failed call leaves the current frame's
/// build unusable and the caller is expected to abandon it.
///
/// The first group are configuration errors (the declared style cannot mean
/// anything), the second are builder-protocol errors (the calls arrived in
/// an order the engine cannot honor).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    /// A node asked to both resize to content and fill its parent on the
    /// same axis.
    #[error("conflicting sizing: both fill and resize requested on the {0:?} axis")]
    ConflictingSizing(Axis),

    /// A percentage string did not parse, e.g. `"50%%"` or `"abc%"`.
    #[error("invalid percentage value `{0}`")]
    InvalidPercent(String),

    /// A text component needed measuring during resize-to-content sizing
    /// but no measurer was registered with [`crate::Ui::set_text_measurer`].
    #[error("text measurer not set but a text component requires measurement")]
    TextMeasurerNotSet,

    /// `end` was called with no container open besides the synthetic root.
    #[error("`end` called with no open container")]
    EndWithoutBegin,

    /// A component was added before any node was created this frame.
    #[error("component added before any element was created this frame")]
    ComponentWithoutElement,

    /// A style named an explicit parent id that does not exist in the
    /// current frame.
    #[error("explicit parent id {0} does not exist in this frame")]
    UnknownParent(u32),

    /// A declaration call arrived outside a `begin_frame`/`end_frame` pair,
    /// or `end_frame` was called with containers still open.
    #[error("frame protocol violation: {0}")]
    NoFrame(&'static str),
}
