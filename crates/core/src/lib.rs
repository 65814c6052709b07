//! Remote-control focus engine for a TV-style music browser.
//!
//! Everything here is deterministic and single-threaded: front-ends feed in
//! [`NavSignal`](tunelane_protocol::NavSignal)s, elapsed time and layout
//! measurements, and read back render commands.

pub mod animation;
pub mod button_row;
pub mod catalog;
pub mod config;
pub mod error;
pub mod focus;
pub mod group;
pub mod layout;
pub mod memory;
pub mod offset;
pub mod overlay;
pub mod screens;
pub mod session;
pub mod swimlane;
pub mod views;

pub use catalog::{Catalog, StaticCatalog};
pub use config::DesignTokens;
pub use error::Error;
pub use focus::{FocusHost, FocusTarget, RecordingFocusHost};
pub use group::{GroupFocusMemory, GroupNavigator};
pub use layout::{LayoutProbe, LayoutReport};
pub use memory::{ItemPosition, ScreenMemory};
pub use overlay::{OverlayPhase, PlayerOverlay};
pub use screens::{Route, Screen, ScreenOutcome};
pub use session::{Playback, Session, SessionSnapshot};
