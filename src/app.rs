use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::audio::Soundtrack;
use crate::game::{Direction, Game, Snapshot};

// Without release events a tapped key stays held this long. Long enough to
// bridge the terminal's key-repeat delay.
const MOVE_HOLD_MS: u32 = 480;
const FIRE_HOLD_MS: u32 = 100;
// Marks a key held until its release event arrives
const UNTIL_RELEASED: u32 = u32::MAX;

/// Milliseconds each control is still considered held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Held {
    left: u32,
    right: u32,
    fire: u32,
}

impl Held {
    fn decay(&mut self, elapsed_ms: u32) {
        for held in [&mut self.left, &mut self.right, &mut self.fire] {
            if *held != UNTIL_RELEASED {
                *held = held.saturating_sub(elapsed_ms);
            }
        }
    }

    fn direction(&self) -> Direction {
        if self.left > 0 {
            Direction::Left
        } else if self.right > 0 {
            Direction::Right
        } else {
            Direction::None
        }
    }
}

pub struct App {
    pub should_quit: bool,
    game: Game,
    held: Held,
    release_events: bool,
    last_tick: Instant,
}

impl App {
    /// `release_events` is true when the terminal reports key releases.
    pub fn new(game: Game, soundtrack: &mut dyn Soundtrack, release_events: bool) -> Self {
        soundtrack.start_loop();
        Self {
            should_quit: false,
            game,
            held: Held::default(),
            release_events,
            last_tick: Instant::now(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn on_tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.advance(elapsed);
    }

    /// Pushes the held controls into the game, then runs the clocks.
    pub fn advance(&mut self, elapsed: Duration) {
        self.game.set_direction(self.held.direction());
        self.game.set_firing(self.held.fire > 0);
        let report = self.game.advance(elapsed);
        if report.game_over {
            self.held = Held::default();
        }
        if !self.release_events {
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            self.held.decay(elapsed_ms);
        }
    }

    pub fn on_focus_lost(&mut self) {
        if !self.game.world().is_paused() && !self.game.world().is_game_over() {
            self.game.toggle_pause();
        }
        self.held = Held::default();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if key.kind == KeyEventKind::Release {
            self.release(key.code);
            return;
        }

        let hold = |ms: u32| if self.release_events { UNTIL_RELEASED } else { ms };
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.held.left = hold(MOVE_HOLD_MS);
                self.held.right = 0;
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.held.right = hold(MOVE_HOLD_MS);
                self.held.left = 0;
            }
            KeyCode::Char(' ') | KeyCode::Up => {
                if !self.game.world().is_game_over() {
                    self.held.fire = hold(FIRE_HOLD_MS);
                }
            }
            // Repeats of a key held through the last life must not skip the game-over screen
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') if key.kind == KeyEventKind::Press => {
                self.replay();
            }
            KeyCode::Char('p') | KeyCode::Char('P') if key.kind == KeyEventKind::Press => {
                self.game.toggle_pause();
            }
            _ => {}
        }
    }

    fn release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => self.held.left = 0,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => self.held.right = 0,
            KeyCode::Char(' ') | KeyCode::Up => self.held.fire = 0,
            _ => {}
        }
    }

    fn replay(&mut self) {
        if self.game.replay() {
            self.held = Held::default();
            self.last_tick = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentSoundtrack;
    use crate::config::GameConfig;
    use crate::game::World;
    use crate::scores::MemoryHighScores;

    fn app(release_events: bool) -> App {
        let world = World::with_seed(GameConfig::default(), Box::new(MemoryHighScores::default()), 11);
        let mut soundtrack = SilentSoundtrack::default();
        let app = App::new(Game::new(world), &mut soundtrack, release_events);
        assert!(soundtrack.is_started());
        app
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    fn frame(app: &mut App) {
        app.advance(Duration::from_millis(16));
    }

    #[test]
    fn tapped_key_moves_ship_for_the_hold_time() {
        let mut app = app(false);
        let start = app.game().world().ship_x();
        app.on_key(key(KeyCode::Left, KeyEventKind::Press));
        let frames = (MOVE_HOLD_MS / 16) as i32;
        for _ in 0..frames + 10 {
            frame(&mut app);
        }
        let moved = start - app.game().world().ship_x();
        assert_eq!(moved, frames * GameConfig::default().ship_step);
    }

    #[test]
    fn release_event_stops_the_ship() {
        let mut app = app(true);
        app.on_key(key(KeyCode::Right, KeyEventKind::Press));
        for _ in 0..100 {
            frame(&mut app);
        }
        let x = app.game().world().ship_x();
        app.on_key(key(KeyCode::Right, KeyEventKind::Release));
        frame(&mut app);
        assert_eq!(app.game().world().ship_x(), x);
    }

    #[test]
    fn space_fires_a_single_shot() {
        let mut app = app(true);
        app.on_key(key(KeyCode::Char(' '), KeyEventKind::Press));
        for _ in 0..5 {
            frame(&mut app);
            assert!(app.game().world().ship_shot_count() <= 1);
        }
        assert_eq!(app.game().world().ship_shot_count(), 1);
    }

    #[test]
    fn pause_key_toggles_pause() {
        let mut app = app(false);
        app.on_key(key(KeyCode::Char('p'), KeyEventKind::Press));
        assert!(app.game().world().is_paused());
        app.on_key(key(KeyCode::Char('p'), KeyEventKind::Press));
        assert!(!app.game().world().is_paused());
    }

    #[test]
    fn losing_focus_pauses() {
        let mut app = app(false);
        app.on_focus_lost();
        assert!(app.game().world().is_paused());
    }

    #[test]
    fn only_a_fresh_enter_restarts_after_game_over() {
        let mut app = app(false);
        let mut steps = 0;
        while !app.game().world().is_game_over() && steps < 200_000 {
            app.game.step();
            steps += 1;
        }
        assert!(app.game().world().is_game_over());

        app.on_key(key(KeyCode::Char(' '), KeyEventKind::Press));
        app.on_key(key(KeyCode::Char(' '), KeyEventKind::Repeat));
        app.on_key(key(KeyCode::Enter, KeyEventKind::Repeat));
        frame(&mut app);
        assert!(app.game().world().is_game_over());

        app.on_key(key(KeyCode::Enter, KeyEventKind::Press));
        assert!(!app.game().world().is_game_over());
        assert_eq!(app.game().world().score(), 0);
    }

    #[test]
    fn quit_keys() {
        let mut app = app(false);
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
