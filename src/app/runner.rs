use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::{interval, MissedTickBehavior};

use super::router::Router;
use crate::input::InputHandler;
use crate::render::{Renderer, SoundPlayer};

/// Render at 30 FPS (33ms per frame)
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// The interactive game: terminal, timers and the screen router
pub struct App {
    router: Router,
    renderer: Renderer,
    input_handler: InputHandler,
    sound: SoundPlayer,
    tick_interval: Duration,
}

impl App {
    pub fn new(router: Router, sound: SoundPlayer, tick_interval: Duration) -> Self {
        Self {
            router,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            sound,
            tick_interval,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut render_timer = interval(RENDER_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut last_tick = Instant::now();
        info!("Game loop started, tick every {:?}", self.tick_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.router.request_quit(),
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    let now = Instant::now();
                    let cues = self.router.tick(now - last_tick);
                    last_tick = now;
                    self.sound.play_all(&cues);
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.router.screen());
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.router.request_quit();
                }
            }

            if self.router.should_quit() {
                break;
            }
        }

        info!("Game loop stopped");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.router.handle_key(action);
        }
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
