use serde::{Deserialize, Serialize};

/// Logical remote-control signal. The physical key that produced it is the
/// front-end's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavSignal {
    Left,
    Right,
    Up,
    Down,
    Select,
    Back,
    /// Tab-equivalent. Only the player overlay reacts to cycling.
    CycleForward,
    CycleBackward,
}

impl NavSignal {
    pub fn horizontal(self) -> Option<Horizontal> {
        match self {
            NavSignal::Left => Some(Horizontal::Left),
            NavSignal::Right => Some(Horizontal::Right),
            _ => None,
        }
    }

    pub fn vertical(self) -> Option<Vertical> {
        match self {
            NavSignal::Up => Some(Vertical::Up),
            NavSignal::Down => Some(Vertical::Down),
            _ => None,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "left" => NavSignal::Left,
            "right" => NavSignal::Right,
            "up" => NavSignal::Up,
            "down" => NavSignal::Down,
            "select" | "enter" => NavSignal::Select,
            "back" | "escape" => NavSignal::Back,
            "cycle-forward" | "tab" => NavSignal::CycleForward,
            "cycle-backward" | "shift-tab" => NavSignal::CycleBackward,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizontal {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vertical {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_key_aliases() {
        assert_eq!(NavSignal::parse("escape"), Some(NavSignal::Back));
        assert_eq!(NavSignal::parse("tab"), Some(NavSignal::CycleForward));
        assert_eq!(NavSignal::parse("menu"), None);
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&NavSignal::CycleBackward).expect("serialize signal");
        assert_eq!(json, "\"cycle-backward\"");
    }

    #[test]
    fn only_arrows_have_axes() {
        assert_eq!(NavSignal::Left.horizontal(), Some(Horizontal::Left));
        assert_eq!(NavSignal::Up.horizontal(), None);
        assert_eq!(NavSignal::Down.vertical(), Some(Vertical::Down));
        assert_eq!(NavSignal::Select.vertical(), None);
    }
}
