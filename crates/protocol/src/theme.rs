use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Surface,
    Border,

    // Header
    HeaderBackground,
    ButtonIdle,
    ButtonFocused,

    // Swimlane cards
    CardIdle,
    CardFocused,
    /// The lane's selected item (e.g. the applied filter) when unfocused.
    CardActive,
    MoreAffordance,

    TextPrimary,
    TextSecondary,
    TextMuted,

    /// Outline drawn around whatever owns input focus.
    FocusRing,

    // Mini-player
    MiniPlayerBackground,

    // Player overlay
    OverlayScrim,
    OverlayPanel,
    ControlIdle,
    ControlFocused,
}
