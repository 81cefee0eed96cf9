use crate::constants::FPS;
use std::time::Instant;

const STARTING_SPEED: f64 = 6.0;
const MAX_SPEED: f64 = 13.0;
const ACCELERATION: f64 = 0.001;
/// Obstacles are held back for this long at the start of a run.
const CLEAR_TIME_MS: f64 = 3_000.0;
/// Scoreboard units per game-distance unit.
const DISTANCE_COEFFICIENT: f64 = 0.025;
/// Score interval between day/night flips.
const INVERT_DISTANCE: u64 = 700;
/// How long a night stretch lasts before fading back to day.
const INVERT_FADE_DURATION_MS: f64 = 12_000.0;

pub struct GameState {
    pub speed: f64,
    max_speed: f64,
    pub distance: f64,
    pub running_time: f64,
    pub night_active: bool,
    invert_timer: f64,
    last_invert_score: u64,
    pub cached_hud: String,
    pub hud_needs_update: bool,
    pub hud_last_update: Instant,
    pub alt_mode_label: Option<&'static str>,
}

impl GameState {
    pub fn new(starting_speed: Option<f64>) -> Self {
        Self {
            speed: starting_speed.unwrap_or(STARTING_SPEED),
            max_speed: MAX_SPEED,
            distance: 0.0,
            running_time: 0.0,
            night_active: false,
            invert_timer: 0.0,
            last_invert_score: 0,
            cached_hud: String::new(),
            hud_needs_update: true,
            hud_last_update: Instant::now(),
            alt_mode_label: None,
        }
    }

    /// Advance speed, distance and the day/night schedule by one frame.
    pub fn update(&mut self, delta: f64) {
        self.running_time += delta;

        if self.speed < self.max_speed {
            self.speed += ACCELERATION;
        }
        self.distance += self.speed * FPS / 1000.0 * delta;

        if self.night_active {
            self.invert_timer += delta;
            if self.invert_timer > INVERT_FADE_DURATION_MS {
                self.night_active = false;
                self.invert_timer = 0.0;
            }
        } else {
            let score = self.score();
            // Flip at every multiple of the invert distance, once per crossing.
            if score > 0
                && score % INVERT_DISTANCE == 0
                && score != self.last_invert_score
            {
                self.night_active = true;
                self.last_invert_score = score;
            }
        }

        self.hud_needs_update = true;
    }

    /// Whether the start-of-run grace period has elapsed.
    pub fn obstacles_active(&self) -> bool {
        self.running_time > CLEAR_TIME_MS
    }

    pub fn score(&self) -> u64 {
        (self.distance * DISTANCE_COEFFICIENT).round() as u64
    }

    /// Halve current and maximum speed. Used when switching into the alt
    /// game mode with slowdown enabled.
    pub fn halve_speeds(&mut self) {
        self.speed /= 2.0;
        self.max_speed /= 2.0;
        self.hud_needs_update = true;
    }

    pub fn set_alt_mode_label(&mut self, label: &'static str) {
        self.alt_mode_label = Some(label);
        self.hud_needs_update = true;
    }

    /// Rebuild the HUD line, at most ten times a second.
    pub fn update_cached_hud(&mut self) {
        if !self.hud_needs_update
            || self.hud_last_update.elapsed() < std::time::Duration::from_millis(100)
        {
            return;
        }

        self.cached_hud = if let Some(label) = self.alt_mode_label {
            format!(
                "Score: {:05} | Speed: {:.1} | {} | Press 'q' to quit",
                self.score(),
                self.speed,
                label
            )
        } else {
            format!(
                "Score: {:05} | Speed: {:.1} | Press 'm' for night run, 'q' to quit",
                self.score(),
                self.speed
            )
        };

        self.hud_needs_update = false;
        self.hud_last_update = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_for(state: &mut GameState, frames: usize) {
        for _ in 0..frames {
            state.update(16.0);
        }
    }

    #[test]
    fn test_speed_accelerates_and_caps() {
        let mut state = GameState::new(None);
        let start = state.speed;
        run_for(&mut state, 1000);
        assert!(state.speed > start);

        run_for(&mut state, 20_000);
        assert!(state.speed <= MAX_SPEED + ACCELERATION);
    }

    #[test]
    fn test_obstacles_held_back_during_grace_period() {
        let mut state = GameState::new(None);
        assert!(!state.obstacles_active());
        run_for(&mut state, 200);
        assert!(state.obstacles_active());
    }

    #[test]
    fn test_night_triggers_on_score_crossing() {
        let mut state = GameState::new(Some(13.0));
        let mut went_dark = false;
        for _ in 0..400_000 {
            state.update(16.0);
            if state.night_active {
                went_dark = true;
                break;
            }
        }
        assert!(went_dark, "night never triggered");
        assert_eq!(state.score() % INVERT_DISTANCE, 0);
    }

    #[test]
    fn test_night_fades_back_to_day() {
        let mut state = GameState::new(Some(13.0));
        state.night_active = true;
        run_for(&mut state, 800);
        assert!(!state.night_active);
    }

    #[test]
    fn test_halve_speeds_lowers_the_cap_too() {
        let mut state = GameState::new(Some(12.0));
        state.halve_speeds();
        assert_eq!(state.speed, 6.0);
        run_for(&mut state, 20_000);
        assert!(state.speed <= MAX_SPEED / 2.0 + ACCELERATION);
    }
}
