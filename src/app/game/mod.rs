pub mod game_state;

use crate::app::renderer::Renderer;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, ClearType},
};
use game_state::{Command, Direction, GameState};
use std::{
    io::Stdout,
    time::{Duration, Instant},
};

/// Maps a key to the command it triggers, if any.
/// Esc and `q` are handled by the loop itself since they end the game.
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('1') => Some(Command::SelectManual),
        KeyCode::Char('2') => Some(Command::SelectBfs),
        KeyCode::Char('3') => Some(Command::SelectDfs),
        KeyCode::Up => Some(Command::Move(Direction::Up)),
        KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Char('v') => Some(Command::ToggleDisplay),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('n') => Some(Command::NewMaze),
        _ => None,
    }
}

fn redraw(stdout: &mut Stdout, game_state: &GameState) -> std::io::Result<()> {
    execute!(
        stdout,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    Renderer::draw(stdout, game_state)
}

/// Play on a `width` x `height` maze until the user quits.
///
/// Everything runs on the calling thread: key presses are applied as soon as they arrive,
/// and a search (if one is running) advances once per `tick_interval`.
pub fn run(
    stdout: &mut Stdout,
    width: i32,
    height: i32,
    seed: Option<u64>,
    tick_interval: Duration,
) -> std::io::Result<()> {
    let mut game_state = GameState::new(width, height, seed)?;
    tracing::info!(
        "[game] Starting game with maze size {}x{} and seed {:?}",
        width,
        height,
        seed
    );
    redraw(stdout, &game_state)?;

    let mut last_tick = Instant::now();
    loop {
        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                    if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('q')) {
                        tracing::debug!("[game] Quit key pressed, exiting");
                        break;
                    }
                    if let Some(command) = command_for_key(key_event.code) {
                        let was_new_maze = command == Command::NewMaze;
                        game_state.handle(command)?;
                        if was_new_maze {
                            redraw(stdout, &game_state)?;
                        } else {
                            Renderer::draw(stdout, &game_state)?;
                        }
                    }
                }
                Event::Resize(_, _) => redraw(stdout, &game_state)?,
                _ => {} // Ignore other events
            }
        }

        if last_tick.elapsed() >= tick_interval {
            last_tick = Instant::now();
            if game_state.tick() {
                Renderer::draw(stdout, &game_state)?;
            }
        }
    }

    tracing::info!(
        "[game] Exiting with score {} in {:?} mode",
        game_state.score(),
        game_state.mode()
    );
    Ok(())
}
