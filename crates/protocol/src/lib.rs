pub mod commands;
pub mod input;
pub mod item;
pub mod stable_id;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, TextAlign};
pub use input::{Horizontal, NavSignal, Vertical};
pub use item::{FocusableItem, Tag};
pub use stable_id::StableId;
pub use theme::ThemeToken;
pub use types::{FALLBACK_VIEWPORT_WIDTH, LayoutItem, Point, Rect, Viewport};
