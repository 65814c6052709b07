use tunelane_core::LayoutProbe;
use tunelane_protocol::FocusableItem;

/// Cells of padding on each side of a chip label.
const CHIP_PADDING_CELLS: f64 = 2.0;
const MORE_LABEL: &str = "More";

/// Reports layout in canvas pixels as the terminal renderer will draw it.
///
/// Lanes span the whole canvas width. A chip is as wide as its label plus
/// padding, converted from terminal cells back to canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalProbe {
    canvas_width: f64,
    px_per_cell: f64,
}

impl TerminalProbe {
    pub fn new(canvas_width: f64, columns: u16) -> Self {
        Self {
            canvas_width,
            px_per_cell: canvas_width / f64::from(columns.max(1)),
        }
    }

    fn chip_width(&self, label: &str) -> f64 {
        let cells = label.chars().count() as f64 + 2.0 * CHIP_PADDING_CELLS;
        cells * self.px_per_cell
    }
}

impl LayoutProbe for TerminalProbe {
    fn container_width(&self, _group: usize) -> Option<f64> {
        Some(self.canvas_width)
    }

    fn item_width(&self, _group: usize, item: &FocusableItem) -> Option<f64> {
        Some(self.chip_width(&item.title))
    }

    fn more_width(&self, _group: usize) -> Option<f64> {
        Some(self.chip_width(MORE_LABEL))
    }
}
