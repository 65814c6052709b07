use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};
use tunelane_core::{OverlayPhase, Session};

use crate::keymap::{KeyAction, action_for};
use crate::probe::TerminalProbe;
use crate::renderer::draw_commands;

const FRAME: Duration = Duration::from_millis(16);

fn status_line(session: &Session) -> String {
    let snapshot = session.snapshot();
    let overlay = match snapshot.overlay_phase {
        OverlayPhase::Closed => String::new(),
        phase => format!(" | player {phase:?}"),
    };
    format!(
        " tunelane | {} | group {}/{}{} | ←↑↓→ move | enter select | esc back | s stop | q quit ",
        snapshot.screen, snapshot.active_group, snapshot.group_count, overlay
    )
}

pub fn run(session: &mut Session) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    session: &mut Session,
) -> Result<()> {
    let (canvas_width, canvas_height) = {
        let tokens = session.tokens();
        (tokens.canvas_width, tokens.canvas_height)
    };
    let mut measured_for = None;
    let mut last_frame = Instant::now();

    loop {
        let size = terminal.size()?;
        let route = session.route();
        // Screens are rebuilt on navigation, so measurements are re-sent
        // whenever the route or the terminal width changes.
        if measured_for != Some((size.width, route.clone())) {
            session.report_layout(&TerminalProbe::new(canvas_width, size.width));
            measured_for = Some((size.width, route));
        }

        let commands = session.render();
        let status = status_line(session);
        terminal.draw(|frame| {
            let area = frame.area();
            let header = Block::default()
                .title(status)
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, Rect::new(0, 0, area.width, 1));

            let content = Rect::new(0, 1, area.width, area.height.saturating_sub(1));
            frame.render_widget(Block::default().style(Style::default().bg(Color::Black)), content);
            draw_commands(frame.buffer_mut(), content, &commands, canvas_width, canvas_height);
        })?;

        let timeout = FRAME.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match action_for(&key) {
                        Some(KeyAction::Quit) => break,
                        Some(KeyAction::Stop) => session.stop(),
                        Some(KeyAction::Signal(signal)) => {
                            session.handle(signal);
                        }
                        None => {}
                    }
                }
            }
        }

        let now = Instant::now();
        session.tick(now - last_frame);
        last_frame = now;
    }

    Ok(())
}
