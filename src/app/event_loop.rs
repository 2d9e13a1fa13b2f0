use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Model, update};

/// Upper bound on how long the loop waits for input before repainting.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the terminal cannot be
    /// initialized, or reading terminal events fails.
    pub fn run(&mut self) -> Result<()> {
        // Load before touching the terminal so read errors print normally.
        let model = Model::open(self.file_path.clone(), self.highlight_enabled, (80, 24))?;
        let mut model = model.with_line_numbers(self.line_numbers);

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: mpad requires an interactive terminal")?;
        let result = terminal
            .size()
            .context("Failed to query terminal size")
            .and_then(|size| {
                model.resize(size.width, size.height);
                Self::event_loop(&mut terminal, &mut model)
            });

        ratatui::restore();
        tracing::info!(dirty = model.editor.is_dirty(), "exiting");
        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_status(Instant::now()) {
                needs_render = true;
            }

            let poll = if needs_render {
                Duration::ZERO
            } else {
                POLL_INTERVAL
            };
            if event::poll(poll)? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    *model = update(std::mem::take(model), msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while !model.should_quit && event::poll(Duration::ZERO)? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        *model = update(std::mem::take(model), msg);
                        needs_render = true;
                    }
                }
            }

            if model.should_quit {
                break;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }
        }
        Ok(())
    }
}
