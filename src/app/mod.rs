mod cell;
mod config;
pub mod game;
mod grid;
mod renderer;

use std::io::{Stdout, Write};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode},
    execute, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

pub use cell::{GridCell, PathType};
pub use config::AppConfig;
pub use grid::Grid;
pub use renderer::Renderer;

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App { config }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop
    pub fn run(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        tracing::info!("Started app with {:?}", self.config);

        let (width, height) = match (self.config.width, self.config.height) {
            (Some(width), Some(height)) => (width, height),
            _ => match App::ask_maze_dimensions(stdout)? {
                Some((width, height)) => (width as i32, height as i32),
                None => return Ok(()),
            },
        };

        // Invalid dimensions are left for maze generation to reject
        let (term_width, term_height) = terminal::size()?;
        if width > 0 && height > 0 && !App::fits_terminal(width, height, term_width, term_height)
        {
            execute!(
                stdout,
                style::PrintStyledContent(
                    format!(
                        "Terminal size is too small for a {}x{} maze. Please resize the terminal or pick a smaller maze.\r\n",
                        width, height
                    )
                    .with(Color::Yellow)
                    .attribute(Attribute::Bold)
                ),
                style::PrintStyledContent(
                    "Press Esc to exit...\r\n"
                        .with(Color::Blue)
                        .attribute(Attribute::Bold)
                )
            )?;
            App::wait_for_esc()?;
            return Ok(());
        }

        game::run(
            stdout,
            width,
            height,
            self.config.seed,
            self.config.tick_interval,
        )?;

        tracing::info!("Exiting app");
        Ok(())
    }

    /// Whether a `width` x `height` maze and its status panel fit in the terminal.
    fn fits_terminal(width: i32, height: i32, term_width: u16, term_height: u16) -> bool {
        let (grid_width, grid_height) =
            Renderer::grid_size(width.max(0) as usize, height.max(0) as usize);
        grid_width * GridCell::CELL_WIDTH as usize <= term_width as usize
            && grid_height + Renderer::NUM_PANEL_ROWS as usize <= term_height as usize
    }

    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()?
                && code == KeyCode::Esc
                && kind == event::KeyEventKind::Press
            {
                break;
            }
        }
        Ok(())
    }

    fn prompt_with_validation<F, T>(
        stdout: &mut Stdout,
        prompt: &str,
        validate: F,
    ) -> std::io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        // Save cursor position so we can restore / redraw
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;
        stdout.flush()?;

        let mut input = String::new();

        let number_option = loop {
            // Re-render prompt line
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;

            stdout.queue(style::PrintStyledContent(
                prompt.with(Color::Cyan).attribute(Attribute::Bold),
            ))?;

            // Decide color based on validity
            let validation_result = validate(input.trim());
            match validation_result {
                Ok(_) => {
                    stdout.queue(style::SetForegroundColor(Color::Green))?;
                }
                Err(_) => {
                    stdout.queue(style::SetForegroundColor(Color::Red))?;
                }
            }

            queue!(stdout, style::Print(&input), style::ResetColor)?;

            stdout.queue(style::Print(" \r\n"))?;

            if let Err(msg) = validation_result {
                stdout.queue(style::PrintStyledContent(
                    msg.with(Color::DarkGrey).attribute(Attribute::Dim),
                ))?;
            }

            stdout.flush()?;

            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != event::KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Enter => match validate(input.trim()) {
                        Ok(n) => break Some(n),
                        Err(_) => continue,
                    },
                    KeyCode::Char(c) => {
                        if !c.is_whitespace() && !c.is_control() {
                            input.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Esc => {
                        // User cancelled input
                        break None;
                    }
                    _ => {}
                }
            }
        };
        // Cleanup
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
        )?;
        stdout.flush()?;

        Ok(number_option)
    }

    /// Largest maze dimension that fits in `term_size` characters, when each grid slot
    /// takes `cell_size` characters and every maze cell needs two slots plus one border slot.
    fn get_max_maze_size(term_size: u16, cell_size: u16) -> u8 {
        let slots = term_size / cell_size.max(1);
        (slots.saturating_sub(1) / 2).clamp(1, u8::MAX as u16) as u8
    }

    fn ask_maze_dimensions(stdout: &mut Stdout) -> std::io::Result<Option<(u8, u8)>> {
        stdout.execute(style::PrintStyledContent(
            "Enter maze dimensions, or press Esc to exit. Leave empty to fill the terminal.\r\n"
                .with(Color::Blue),
        ))?;

        // Validation closure based on terminal size
        let validate = |s: &str, is_width| {
            let max_size = if let Ok((term_width, term_height)) = terminal::size() {
                if is_width {
                    App::get_max_maze_size(term_width, GridCell::CELL_WIDTH)
                } else {
                    // Reserve rows for the status panel
                    App::get_max_maze_size(term_height.saturating_sub(Renderer::NUM_PANEL_ROWS), 1)
                }
            } else {
                // Fallback to max size if terminal size cannot be determined
                u8::MAX
            };

            if s.trim().is_empty() {
                return Ok(max_size);
            }

            let error_msg = format!("Please enter a valid number between 1 and {}.", max_size);
            s.parse::<u8>()
                .map_err(|_| error_msg.clone())
                .and_then(|n| match n {
                    1..=255 if n <= max_size => Ok(n),
                    _ => Err(error_msg),
                })
        };

        let width = match App::prompt_with_validation(stdout, "Width: ", |s| validate(s, true))? {
            Some(w) => w,
            None => return Ok(None),
        };
        stdout.execute(style::PrintStyledContent(
            format!("Width set to {}\r\n", width)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        let height = match App::prompt_with_validation(stdout, "Height: ", |s| validate(s, false))?
        {
            Some(h) => h,
            None => return Ok(None),
        };
        stdout.execute(style::PrintStyledContent(
            format!("Height set to {}\r\n", height)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        Ok(Some((width, height)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_maze_size() {
        // 80 columns at two characters per slot: 40 slots, 19 cells plus borders
        assert_eq!(App::get_max_maze_size(80, GridCell::CELL_WIDTH), 19);
        assert_eq!(App::get_max_maze_size(24, 1), 11);
        assert_eq!(App::get_max_maze_size(0, 1), 1);
        assert_eq!(App::get_max_maze_size(u16::MAX, 1), u8::MAX);
    }

    #[test]
    fn test_fits_terminal() {
        assert!(App::fits_terminal(19, 10, 80, 24));
        assert!(!App::fits_terminal(20, 10, 80, 24));
        // 2 * 11 + 1 rows of maze plus the panel
        assert!(!App::fits_terminal(19, 11, 80, 24));
    }
}
