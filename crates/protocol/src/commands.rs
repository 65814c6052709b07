use serde::{Deserialize, Serialize};

use crate::stable_id::StableId;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// Screens emit a `Vec<RenderCommand>` per frame on the fixed 1920×1080
/// canvas. Renderers consume the list sequentially and never call back into
/// the focus engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally labelled and tagged with the
    /// stable id of the item it represents (for measurement and hit-testing).
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        label: Option<String>,
        item_id: Option<StableId>,
    },

    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Restrict subsequent drawing to a rectangular region (a lane viewport).
    SetClip { rect: Rect },

    ClearClip,

    /// Translate everything until the matching `PopTransform`. Swimlanes push
    /// their negated scroll offset here.
    PushTransform { translate: Point },

    PopTransform,

    /// Begin a focus group (header, filters, content lane, mini-player,
    /// overlay). `focused` marks the group that owns directional input.
    BeginGroup {
        id: String,
        label: Option<String>,
        focused: bool,
    },

    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}
