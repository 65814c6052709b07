use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use tunelane_protocol::{Point, Rect as CanvasRect, RenderCommand, TextAlign, ThemeToken};

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Surface => Color::Rgb(18, 18, 24),
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::HeaderBackground => Color::Rgb(24, 24, 32),
        ThemeToken::ButtonIdle => Color::Rgb(40, 40, 52),
        ThemeToken::ButtonFocused => Color::Rgb(70, 110, 200),
        ThemeToken::CardIdle => Color::Rgb(36, 36, 48),
        ThemeToken::CardFocused => Color::Rgb(70, 110, 200),
        ThemeToken::CardActive => Color::Rgb(40, 90, 70),
        ThemeToken::MoreAffordance => Color::Rgb(60, 60, 80),
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::FocusRing => Color::LightYellow,
        ThemeToken::MiniPlayerBackground => Color::Rgb(28, 28, 40),
        ThemeToken::OverlayScrim => Color::Rgb(8, 8, 12),
        ThemeToken::OverlayPanel => Color::Rgb(30, 30, 44),
        ThemeToken::ControlIdle => Color::Rgb(46, 46, 62),
        ThemeToken::ControlFocused => Color::Rgb(70, 110, 200),
    }
}

/// Maps the fixed design canvas onto terminal cells.
#[derive(Debug, Clone, Copy)]
struct Scale {
    area: Rect,
    sx: f64,
    sy: f64,
}

impl Scale {
    fn new(area: Rect, canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            area,
            sx: f64::from(area.width) / canvas_width.max(1.0),
            sy: f64::from(area.height) / canvas_height.max(1.0),
        }
    }

    fn col(&self, x: f64) -> i32 {
        i32::from(self.area.x) + (x * self.sx).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        i32::from(self.area.y) + (y * self.sy).floor() as i32
    }

    /// Cell rectangle covering `rect`, at least one cell in each direction.
    fn cells(&self, rect: CanvasRect) -> CellRect {
        let x0 = self.col(rect.x);
        let y0 = self.row(rect.y);
        let x1 = self.col(rect.right()).max(x0 + 1);
        let y1 = self.row(rect.y + rect.h).max(y0 + 1);
        CellRect { x0, y0, x1, y1 }
    }
}

/// Half-open cell rectangle in signed coordinates so off-screen geometry
/// can be clipped instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRect {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl CellRect {
    fn from_area(area: Rect) -> Self {
        Self {
            x0: i32::from(area.x),
            y0: i32::from(area.y),
            x1: i32::from(area.x) + i32::from(area.width),
            y1: i32::from(area.y) + i32::from(area.height),
        }
    }

    fn intersect(self, other: Self) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

struct Painter<'a> {
    buf: &'a mut Buffer,
    scale: Scale,
    bounds: CellRect,
    clip: Option<CellRect>,
    translate: Vec<Point>,
}

impl Painter<'_> {
    fn offset(&self) -> Point {
        self.translate
            .iter()
            .fold(Point::new(0.0, 0.0), |acc, p| Point::new(acc.x + p.x, acc.y + p.y))
    }

    fn visible(&self) -> CellRect {
        match self.clip {
            Some(clip) => self.bounds.intersect(clip),
            None => self.bounds,
        }
    }

    fn put(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bg: Option<Color>) {
        if !self.visible().contains(x, y) {
            return;
        }
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        let cell = &mut self.buf[(x, y)];
        cell.set_char(ch);
        if let Some(fg) = fg {
            cell.set_fg(fg);
        }
        if let Some(bg) = bg {
            cell.set_bg(bg);
        }
    }

    fn rect(&mut self, rect: CanvasRect, color: ThemeToken, border: Option<ThemeToken>) {
        let offset = self.offset();
        let moved = CanvasRect::new(rect.x + offset.x, rect.y + offset.y, rect.w, rect.h);
        let cells = self.scale.cells(moved);
        let bg = theme_to_color(color);
        let border = border.map(theme_to_color);
        for y in cells.y0..cells.y1 {
            for x in cells.x0..cells.x1 {
                let edge_x = x == cells.x0 || x == cells.x1 - 1;
                let edge_y = y == cells.y0 || y == cells.y1 - 1;
                let ch = match border {
                    Some(_) if edge_x && edge_y => '+',
                    Some(_) if edge_y => '-',
                    Some(_) if edge_x => '|',
                    _ => ' ',
                };
                self.put(x, y, ch, border, Some(bg));
            }
        }
    }

    fn text(&mut self, position: Point, text: &str, color: ThemeToken, align: TextAlign) {
        let offset = self.offset();
        let len = text.chars().count() as i32;
        let col = self.scale.col(position.x + offset.x);
        let start = match align {
            TextAlign::Left => col,
            TextAlign::Center => col - len / 2,
            TextAlign::Right => col - len,
        };
        // Text positions are baselines; the glyphs sit in the cell above.
        let row = self.scale.row(position.y + offset.y) - 1;
        let fg = theme_to_color(color);
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, row, ch, Some(fg), None);
        }
    }

    fn apply(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
                ..
            } => {
                self.rect(*rect, *color, *border_color);
                if let Some(label) = label {
                    let center = Point::new(rect.x + rect.w / 2.0, rect.y + rect.h * 0.6);
                    self.text(center, label, ThemeToken::TextPrimary, TextAlign::Center);
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                ..
            } => self.text(*position, text, *color, *align),
            RenderCommand::SetClip { rect } => {
                self.clip = Some(self.scale.cells(*rect));
            }
            RenderCommand::ClearClip => self.clip = None,
            RenderCommand::PushTransform { translate } => self.translate.push(*translate),
            RenderCommand::PopTransform => {
                self.translate.pop();
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}

/// Paint `commands` (laid out on a `canvas_width`×`canvas_height` canvas)
/// into `area` of `buf`.
pub fn draw_commands(
    buf: &mut Buffer,
    area: Rect,
    commands: &[RenderCommand],
    canvas_width: f64,
    canvas_height: f64,
) {
    let mut painter = Painter {
        buf,
        scale: Scale::new(area, canvas_width, canvas_height),
        bounds: CellRect::from_area(area),
        clip: None,
        translate: Vec::new(),
    };
    for command in commands {
        painter.apply(command);
    }
}
