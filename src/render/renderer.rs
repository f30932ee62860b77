use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph},
    Frame,
};
use std::collections::HashSet;
use std::time::Duration;

use crate::app::screen::{Menu, RoundSummary, Screen};
use crate::game::{Cell, GameMode, Outcome, RenderSnapshot};

/// Draws every screen of the game
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, screen: &Screen) {
        match screen {
            Screen::MainMenu(menu) | Screen::ModeMenu(menu) => self.render_menu(frame, menu),
            Screen::DifficultyMenu { menu, .. } => self.render_menu(frame, menu),
            Screen::Credits => self.render_credits(frame),
            Screen::Playing(session) => self.render_round(frame, &session.snapshot()),
            Screen::Finished(summary) => self.render_result(frame, summary),
        }
    }

    fn render_menu(&self, frame: &mut Frame, menu: &Menu) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                menu.title.clone(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(menu_lines(menu));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("↑↓", Style::default().fg(Color::Cyan)),
            Span::raw(" to choose | "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" to confirm | "),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::raw(" back | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]));

        let area = centered(frame.area(), 60, (lines.len() + 2) as u16);
        let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        );
        frame.render_widget(panel, area);
    }

    fn render_credits(&self, frame: &mut Frame) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Credits",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Snake, an arcade classic"),
            Line::from("Classic and chrono modes, three difficulties"),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to go back", Style::default().fg(Color::Gray)),
            ]),
        ];

        let area = centered(frame.area(), 60, (lines.len() + 2) as u16);
        let panel = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(panel, area);
    }

    fn render_round(&self, frame: &mut Frame, snapshot: &RenderSnapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Special apple countdown
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot), chunks[0]);

        let grid_area = centered(
            chunks[1],
            snapshot.grid.columns() as u16 * 2 + 2,
            snapshot.grid.rows() as u16 + 2,
        );
        frame.render_widget(self.render_grid(snapshot), grid_area);

        if let Some(special) = snapshot.special_apple {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Magenta))
                .label("Special apple")
                .ratio(special.remaining_fraction.clamp(0.0, 1.0));
            frame.render_widget(gauge, centered(chunks[2], grid_area.width, 1));
        }

        if snapshot.paused {
            let area = centered(grid_area, 30, 5);
            frame.render_widget(Clear, area);
            frame.render_widget(self.render_pause(), area);
        }

        frame.render_widget(self.render_controls(), chunks[3]);
    }

    fn render_grid(&self, snapshot: &RenderSnapshot) -> Paragraph<'static> {
        let obstacles: HashSet<Cell> = snapshot.obstacles.iter().copied().collect();
        let body: HashSet<Cell> = snapshot.snake.iter().skip(1).copied().collect();
        let head = snapshot.snake.first().copied();
        let apple = snapshot.apple.map(|a| a.cell);
        let special = snapshot.special_apple.map(|a| a.cell);

        let mut lines = Vec::with_capacity(snapshot.grid.rows() as usize);
        for y in 0..snapshot.grid.rows() {
            let mut spans = Vec::with_capacity(snapshot.grid.columns() as usize);

            for x in 0..snapshot.grid.columns() {
                let cell = Cell::new(x, y);

                let span = if Some(cell) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if body.contains(&cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if obstacles.contains(&cell) {
                    Span::styled("█ ", Style::default().fg(Color::Gray))
                } else if Some(cell) == special {
                    Span::styled(
                        "@ ",
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if Some(cell) == apple {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", snapshot.config)),
        )
    }

    fn render_stats(&self, snapshot: &RenderSnapshot) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
        ];

        match (snapshot.config.mode, snapshot.time_remaining) {
            (GameMode::Chrono, Some(remaining)) => {
                let color = if remaining <= Duration::from_secs(10) {
                    Color::Red
                } else {
                    Color::White
                };
                spans.push(Span::styled("Time left: ", Style::default().fg(Color::Yellow)));
                spans.push(Span::styled(
                    format_time(remaining),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
                if let Some(rules) = snapshot.config.chrono_rules() {
                    spans.push(Span::raw("    "));
                    spans.push(Span::styled("Goal: ", Style::default().fg(Color::Yellow)));
                    spans.push(Span::styled(
                        rules.victory_score.to_string(),
                        Style::default().fg(Color::White),
                    ));
                }
            }
            _ => {
                spans.push(Span::styled("Time: ", Style::default().fg(Color::Yellow)));
                spans.push(Span::styled(
                    format_time(snapshot.elapsed),
                    Style::default().fg(Color::White),
                ));
            }
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_pause(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Space to resume",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_result(&self, frame: &mut Frame, summary: &RoundSummary) {
        let (title, color) = match summary.outcome {
            Outcome::Victory => ("VICTORY", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                summary.config.to_string(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    summary.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    summary.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        if summary.new_best {
            text.push(Line::from(Span::styled(
                "New high score!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(error) = &summary.store_error {
            text.push(Line::from(Span::styled(
                format!("Score not saved: {}", error),
                Style::default().fg(Color::Red),
            )));
        }

        text.push(Line::from(""));
        text.extend(menu_lines(&summary.menu));
        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to replay or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        let area = centered(frame.area(), 60, (text.len() + 2) as u16);
        let panel = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(panel, area);
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::raw(" to leave | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn menu_lines(menu: &Menu) -> Vec<Line<'static>> {
    menu.items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if i == menu.selected {
                Line::from(Span::styled(
                    format!("> {} <", item.label()),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    item.label(),
                    Style::default().fg(Color::White),
                ))
            }
        })
        .collect()
}

/// A `width` x `height` rectangle centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// `mm:ss`, rounding partial seconds up so a clock never shows 00:00 early
pub fn format_time(duration: Duration) -> String {
    let total_secs = duration.as_millis().div_ceil(1000) as u64;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
