//! UI rendering for the Flappy Ball game scene.
//!
//! Rendering is a pure function of the session state plus the wall clock:
//! the restart prompt's visibility and blink are driven by real time read
//! at render time, never by a frame counter, so they stay correct under
//! variable frame rates.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{
    GameSession, Phase, BALL_SIZE, BALL_X, BLINK_PERIOD_MS, FIELD_HEIGHT, FIELD_WIDTH, GROUND_Y,
    PIPE_WIDTH, RESTART_COOLDOWN_MS,
};

/// Render the Flappy Ball scene: play area, status bar, and the game-over
/// overlay when the round has ended.
pub fn render(frame: &mut Frame, area: Rect, session: &GameSession) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Flappy Ball ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Play area (top) + status bar (bottom 2 lines).
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(inner);

    render_play_area(frame, chunks[0], session);
    render_status_bar(frame, chunks[1], session);

    if let Phase::GameOver { at } = session.phase {
        render_game_over_overlay(frame, area, session, at);
    }
}

/// Paint the 800x600 virtual field into the terminal cell grid: sky,
/// ground strip, pipe regions, and the ball.
fn render_play_area(frame: &mut Frame, area: Rect, session: &GameSession) {
    let width = area.width as usize;
    let height = area.height as usize;

    if width == 0 || height == 0 {
        return;
    }

    let x_scale = FIELD_WIDTH as f64 / width as f64;
    let y_scale = FIELD_HEIGHT as f64 / height as f64;

    // Ball bounding box in display cells, at least one cell each way.
    let ball_left = (BALL_X as f64 / x_scale).round() as usize;
    let ball_right = (((BALL_X + BALL_SIZE) as f64 / x_scale).round() as usize).max(ball_left + 1);
    let ball_top = (session.ball_y as f64 / y_scale).round() as usize;
    let ball_bottom =
        (((session.ball_y + BALL_SIZE) as f64 / y_scale).round() as usize).max(ball_top + 1);

    let mut lines = Vec::with_capacity(height);
    for display_row in 0..height {
        // Sample the game coordinate at the cell center.
        let game_row = ((display_row as f64 + 0.5) * y_scale) as i32;

        let mut spans = Vec::with_capacity(width);
        for display_col in 0..width {
            let game_col = ((display_col as f64 + 0.5) * x_scale) as i32;

            if (ball_left..ball_right).contains(&display_col)
                && (ball_top..ball_bottom).contains(&display_row)
            {
                spans.push(Span::styled(
                    "●",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
                continue;
            }

            let mut cell: Option<Span> = None;
            for pipe in &session.pipes {
                if game_col >= pipe.x && game_col < pipe.x + PIPE_WIDTH {
                    if game_row < pipe.gap_top || game_row >= pipe.gap_bottom {
                        cell = Some(Span::styled("█", Style::default().fg(Color::Green)));
                    } else if game_row - pipe.gap_top < y_scale as i32
                        || pipe.gap_bottom - game_row <= y_scale as i32
                    {
                        // Gap lip, one display row thick.
                        cell = Some(Span::styled("░", Style::default().fg(Color::DarkGray)));
                    }
                    break;
                }
            }

            if let Some(span) = cell {
                spans.push(span);
            } else if game_row >= GROUND_Y {
                spans.push(Span::styled("▓", Style::default().fg(Color::LightGreen)));
            } else {
                spans.push(Span::styled(" ", Style::default()));
            }
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);

    // Score readout in the top-left corner of the field.
    if area.width >= 12 {
        let score_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width - 1,
            height: 1,
        };
        let score = Paragraph::new(Line::from(Span::styled(
            format!("Score: {}", session.score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(score, score_area);
    }
}

/// Two-line status bar: status message plus control hints.
fn render_status_bar(frame: &mut Frame, area: Rect, session: &GameSession) {
    if area.height < 1 {
        return;
    }

    let (text, color) = if session.is_game_over() {
        (format!("Crashed at {} pipes", session.score), Color::Red)
    } else {
        (format!("Score: {}", session.score), Color::Green)
    };

    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 {
        let controls = Line::from(vec![
            Span::styled("[Space]", Style::default().fg(Color::White)),
            Span::styled(" Jump  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[q/Esc]", Style::default().fg(Color::White)),
            Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
        ]);
        let controls = Paragraph::new(controls).alignment(Alignment::Center);
        frame.render_widget(
            controls,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Centered game-over modal with the final score and, once the restart
/// cooldown has elapsed, a blinking restart prompt.
fn render_game_over_overlay(frame: &mut Frame, area: Rect, session: &GameSession, at: Instant) {
    let modal_width = 34u16.min(area.width);
    let modal_height = 7u16.min(area.height);
    let x = area.x + (area.width.saturating_sub(modal_width)) / 2;
    let y = area.y + (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(x, y, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let cooldown_elapsed =
        Instant::now().duration_since(at) >= Duration::from_millis(RESTART_COOLDOWN_MS);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "GAME OVER!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Final Score: {}", session.score),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];

    if cooldown_elapsed {
        lines.push(Line::from(Span::styled(
            "Press Space to restart",
            Style::default().fg(blink_color()),
        )));
    }

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, inner);
}

/// Alternate the restart prompt color on a fixed wall-clock period.
fn blink_color() -> Color {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    if (millis / BLINK_PERIOD_MS) % 2 == 0 {
        Color::White
    } else {
        Color::Blue
    }
}
