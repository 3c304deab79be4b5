//! Arrow Rush session controller.
//!
//! A `GameSession` owns every piece of mutable game state and is the only way to
//! change it. The render shell drives it synchronously: it forwards start, pause
//! and navigation clicks, maps each arrow key (or on-screen button) to a
//! [`Direction`] for [`GameSession::submit_response`], and calls
//! [`GameSession::check_timeout`] on every frame before drawing the countdown.
//! Nothing here owns a timer; the time budget is enforced only as often as the
//! shell polls.
//!
//! All timestamps are milliseconds on the shell's monotonic clock
//! (`performance.now()` in the browser).

mod direction;
mod rng;
mod rules;

pub use direction::Direction;
pub use rng::SessionRng;
pub use rules::{Rules, RulesError};

/// Coarse game mode; decides which view and which inputs are live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

/// Arrow currently on screen and when it was shown.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Prompt {
    direction: Direction,
    issued_at_ms: f64,
}

/// Outcome of a single response, for shells that flash feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Not playing, so the input was dropped without touching state.
    Ignored,
    Correct { points: u64, leveled_up: bool },
    Incorrect { game_over: bool },
}

/// Read-only copy of everything the shell needs to draw a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub phase: Phase,
    pub score: u64,
    pub level: u32,
    pub lives: u8,
    pub correct_streak: u32,
    /// Longest streak of the current game; survives the miss that ends it.
    pub best_streak: u32,
    pub time_limit_seconds: f64,
    pub current_direction: Option<Direction>,
    pub direction_issued_at_ms: Option<f64>,
}

pub struct GameSession {
    rules: Rules,
    rng: SessionRng,
    phase: Phase,
    score: u64,
    level: u32,
    lives: u8,
    correct_streak: u32,
    best_streak: u32,
    time_limit_ms: u32,
    // Set exactly while `phase == Playing`.
    prompt: Option<Prompt>,
    started_at_ms: Option<f64>,
    ended_at_ms: Option<f64>,
}

impl GameSession {
    pub fn new(rules: Rules, rng: SessionRng) -> Self {
        Self {
            rules,
            rng,
            phase: Phase::Menu,
            score: 0,
            level: 1,
            lives: rules.initial_lives,
            correct_streak: 0,
            best_streak: 0,
            time_limit_ms: rules.initial_time_limit_ms,
            prompt: None,
            started_at_ms: None,
            ended_at_ms: None,
        }
    }

    /// Default rules with a fixed seed. Mostly useful for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Rules::default(), SessionRng::new(seed))
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Install new rules. They apply from the next start or restart; a game in
    /// progress keeps its current counters.
    pub fn set_rules(&mut self, rules: Rules) -> Result<(), RulesError> {
        rules.validate()?;
        self.rules = rules;
        Ok(())
    }

    fn reset(&mut self) {
        self.score = 0;
        self.level = 1;
        self.lives = self.rules.initial_lives;
        self.correct_streak = 0;
        self.best_streak = 0;
        self.time_limit_ms = self.rules.initial_time_limit_ms;
        self.prompt = None;
        self.started_at_ms = None;
        self.ended_at_ms = None;
    }

    fn begin(&mut self, now_ms: f64) {
        self.reset();
        self.phase = Phase::Playing;
        self.started_at_ms = Some(now_ms);
        self.generate_direction(now_ms);
        log::info!(
            "game started: {} lives, {:.1}s per arrow",
            self.lives,
            self.time_limit_seconds()
        );
    }

    /// Start a fresh game from the menu. Any progress left over from a pause
    /// is discarded. Ignored outside the menu.
    pub fn start_game(&mut self, now_ms: f64) {
        if self.phase != Phase::Menu {
            return;
        }
        self.begin(now_ms);
    }

    /// Throw away the current game (running or finished) and start over.
    pub fn restart(&mut self, now_ms: f64) {
        self.begin(now_ms);
    }

    /// Replace the pending arrow. A response aimed at the previous arrow is
    /// judged against this one from now on.
    fn generate_direction(&mut self, now_ms: f64) {
        let idx = self.rng.next_index(Direction::ALL.len());
        self.prompt = Some(Prompt {
            direction: Direction::ALL[idx],
            issued_at_ms: now_ms,
        });
    }

    /// Shared miss path for wrong answers and timeouts. Returns true when the
    /// last life was spent.
    fn lose_life(&mut self, now_ms: f64) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.correct_streak = 0;
        if self.lives == 0 {
            self.phase = Phase::GameOver;
            self.prompt = None;
            self.ended_at_ms = Some(now_ms);
            log::info!("game over: score {} at level {}", self.score, self.level);
            true
        } else {
            self.generate_direction(now_ms);
            false
        }
    }

    /// Poll the time budget. Returns true if the pending arrow expired, in
    /// which case a life was lost and the shell should redraw right away.
    /// Elapsed time equal to the limit is still in time.
    pub fn check_timeout(&mut self, now_ms: f64) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(prompt) = self.prompt else {
            return false;
        };
        let elapsed_ms = now_ms - prompt.issued_at_ms;
        if elapsed_ms <= self.time_limit_ms as f64 {
            return false;
        }
        log::debug!(
            "timeout on {:?} after {:.0}ms, {} lives left",
            prompt.direction,
            elapsed_ms,
            self.lives.saturating_sub(1)
        );
        self.lose_life(now_ms);
        true
    }

    /// Judge one directional input against the arrow on screen.
    pub fn submit_response(&mut self, direction: Direction, now_ms: f64) -> Verdict {
        if self.phase != Phase::Playing {
            return Verdict::Ignored;
        }
        let Some(prompt) = self.prompt else {
            return Verdict::Ignored;
        };

        if direction != prompt.direction {
            log::debug!("miss: wanted {:?}, got {:?}", prompt.direction, direction);
            let game_over = self.lose_life(now_ms);
            return Verdict::Incorrect { game_over };
        }

        let points = self.rules.base_points as u64 * self.level as u64;
        self.score += points;
        self.correct_streak += 1;
        self.best_streak = self.best_streak.max(self.correct_streak);
        // Only reached right after an increment, so each multiple fires once.
        let leveled_up = self.correct_streak % self.rules.streak_per_level == 0;
        if leveled_up {
            self.level += 1;
            self.time_limit_ms = self.rules.next_time_limit_ms(self.time_limit_ms);
            log::info!(
                "level {} reached, {:.1}s per arrow",
                self.level,
                self.time_limit_seconds()
            );
        }
        self.generate_direction(now_ms);
        Verdict::Correct { points, leveled_up }
    }

    /// Leave a running game for the menu. Counters are kept for display, but
    /// the next `start_game` resets them; there is no resume.
    pub fn pause(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.phase = Phase::Menu;
        self.prompt = None;
        log::info!("paused at score {}", self.score);
    }

    /// Back to the menu after a game over. State is reset on the next start.
    pub fn return_to_menu(&mut self) {
        if self.phase == Phase::GameOver {
            self.phase = Phase::Menu;
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn correct_streak(&self) -> u32 {
        self.correct_streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn time_limit_seconds(&self) -> f64 {
        self.time_limit_ms as f64 / 1000.0
    }

    pub fn current_direction(&self) -> Option<Direction> {
        self.prompt.map(|p| p.direction)
    }

    /// Seconds left for the pending arrow, between zero and the limit. `None`
    /// when no arrow is on screen.
    pub fn remaining_seconds(&self, now_ms: f64) -> Option<f64> {
        self.prompt.map(|p| {
            let elapsed_ms = (now_ms - p.issued_at_ms).max(0.0);
            (self.time_limit_ms as f64 - elapsed_ms).max(0.0) / 1000.0
        })
    }

    /// Time since the current game started. Stops counting at game over.
    pub fn play_duration_seconds(&self, now_ms: f64) -> Option<f64> {
        self.started_at_ms.map(|start| {
            let end = self.ended_at_ms.unwrap_or(now_ms);
            ((end - start) / 1000.0).max(0.0)
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            level: self.level,
            lives: self.lives,
            correct_streak: self.correct_streak,
            best_streak: self.best_streak,
            time_limit_seconds: self.time_limit_seconds(),
            current_direction: self.current_direction(),
            direction_issued_at_ms: self.prompt.map(|p| p.issued_at_ms),
        }
    }
}
