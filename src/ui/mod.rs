pub mod field;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::game::snapshot::{Hud, Snapshot};

const PANEL_BG: Color = Color::Rgb(15, 15, 25);
const SEPARATOR: Color = Color::Rgb(60, 60, 60);

pub fn render(frame: &mut Frame, app: &App) {
    let snapshot = app.snapshot();
    let area = frame.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .title(" Space Invaders ")
        .title_style(Style::default().fg(Color::Rgb(100, 255, 100)).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status
            Constraint::Min(8),    // Arena
            Constraint::Length(1), // Help
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(status_line(&snapshot.hud)), chunks[0]);

    let arena = fit_arena(chunks[1], &snapshot);
    if arena.width > 0 && arena.height > 0 {
        let lines = field::render_field(&snapshot, arena.width as usize, arena.height as usize);
        frame.render_widget(Paragraph::new(lines), arena);
    }

    frame.render_widget(Paragraph::new(footer_line(&snapshot.hud)), chunks[2]);

    if snapshot.hud.game_over {
        render_game_over(frame, arena, &snapshot.hud);
    } else if snapshot.hud.won {
        render_banner(frame, arena, &format!(" WAVE {} ", snapshot.hud.wave), Color::Rgb(80, 255, 150));
    } else if snapshot.hud.paused {
        render_banner(frame, arena, " PAUSED ", Color::Yellow);
    }
}

/// Largest centred area that keeps the arena's aspect ratio. A terminal
/// cell is taken to be twice as tall as it is wide.
fn fit_arena(area: Rect, snapshot: &Snapshot) -> Rect {
    let aspect = snapshot.arena_width.max(1) as f32 / snapshot.arena_height.max(1) as f32;
    let width_for_height = (area.height as f32 * aspect * 2.0) as u16;
    let (w, h) = if width_for_height <= area.width {
        (width_for_height, area.height)
    } else {
        (area.width, (area.width as f32 / aspect / 2.0) as u16)
    };
    Rect::new(
        area.x + area.width.saturating_sub(w) / 2,
        area.y + area.height.saturating_sub(h) / 2,
        w,
        h,
    )
}

fn separator() -> Span<'static> {
    Span::styled(" | ", Style::default().fg(Color::DarkGray))
}

fn status_line(hud: &Hud) -> Line<'static> {
    let lives = "\u{2666} ".repeat(hud.lives as usize);
    Line::from(vec![
        Span::styled(" \u{1f47e} ", Style::default()),
        Span::styled(
            format!("Score: {} ", hud.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        separator(),
        Span::styled(
            format!("Lives: {}", lives),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        separator(),
        Span::styled(format!("High: {} ", hud.high_score), Style::default().fg(Color::Cyan)),
        separator(),
        Span::styled(format!("Wave: {} ", hud.wave), Style::default().fg(Color::Green)),
        separator(),
        Span::styled(format!("Aliens: {} ", hud.aliens_left), Style::default().fg(Color::Rgb(255, 80, 80))),
    ])
}

fn key_hint(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
        Span::styled(action, Style::default().fg(Color::DarkGray)),
    ]
}

fn footer_line(hud: &Hud) -> Line<'static> {
    if hud.game_over {
        return Line::from(vec![
            Span::styled(" GAME OVER! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled("Press ENTER to play again, Q to quit", Style::default().fg(Color::Gray)),
        ]);
    }
    if hud.paused {
        return Line::from(Span::styled(
            " PAUSED - Press P to resume ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    let hints = [
        key_hint(" \u{2190}\u{2192}", " Move "),
        key_hint("Space", " Shoot "),
        key_hint("P", " Pause "),
        key_hint("Q", " Quit"),
    ];
    let mut spans = Vec::new();
    for (i, hint) in hints.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("| ", Style::default().fg(SEPARATOR)));
        }
        spans.extend(hint);
    }
    Line::from(spans)
}

fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    Rect::new(
        area.x + area.width.saturating_sub(w) / 2,
        area.y + area.height.saturating_sub(h) / 2,
        w,
        h,
    )
}

fn render_banner(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let banner = centered(area, text.chars().count() as u16 + 2, 3);
    frame.render_widget(Clear, banner);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(PANEL_BG));
    let p = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(p, banner);
}

fn render_game_over(frame: &mut Frame, area: Rect, hud: &Hud) {
    let overlay = centered(area, 36, 10);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 80, 80)))
        .title(" GAME OVER ")
        .title_style(Style::default().fg(Color::Rgb(255, 80, 80)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(PANEL_BG));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let new_best = hud.score > 0 && hud.score >= hud.high_score;
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Score: {}", hud.score),
            Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Best: {}", hud.high_score),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            format!("Reached wave {}", hud.wave),
            Style::default().fg(Color::Rgb(180, 180, 200)),
        )),
    ];
    if new_best {
        lines.push(Line::from(Span::styled(
            "\u{1f3c6} NEW HIGH SCORE!",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));
    if hud.replay_enabled {
        let mut hint = key_hint("Enter", " play again  ").to_vec();
        hint.extend(key_hint("Q", " quit"));
        lines.push(Line::from(hint));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center).style(Style::default().bg(PANEL_BG));
    frame.render_widget(p, inner);
}
