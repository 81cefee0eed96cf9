use crate::app_state::GameState;
use crate::config::Config;
use crate::render::TerminalRenderer;
use crate::resources::{GameResources, ResourceProvider};
use crate::scene::Horizon;
use crate::sprites;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::io;
use std::time::{Duration, Instant};

pub struct App {
    state: GameState,
    resources: GameResources,
    horizon: Horizon,
    frame_duration: Duration,
    force_night: bool,
}

impl App {
    pub fn new(
        config: &Config,
        renderer: &TerminalRenderer,
        starting_speed: Option<f64>,
        start_in_alt_mode: bool,
        force_night: bool,
    ) -> Self {
        let mut state = GameState::new(starting_speed);
        let mut resources = GameResources::new(&config.game);
        let arena = renderer.arena();

        let mut horizon = Horizon::new(
            sprites::default_sprite_positions(),
            arena,
            config.game.gap_coefficient,
            &resources,
        );

        if start_in_alt_mode {
            Self::switch_to_alt_mode(&mut state, &mut resources, &mut horizon);
        }

        Self {
            state,
            resources,
            horizon,
            frame_duration: Duration::from_millis(1000 / config.game.fps_cap.max(1)),
            force_night,
        }
    }

    fn switch_to_alt_mode(
        state: &mut GameState,
        resources: &mut GameResources,
        horizon: &mut Horizon,
    ) {
        resources.activate_alt();
        horizon.enable_alt_game_mode(resources, sprites::alt_sprite_positions());
        if resources.has_slowdown() {
            state.halve_speeds();
        }
        state.set_alt_mode_label("Night run");
    }

    pub fn run(&mut self, renderer: &mut TerminalRenderer) -> io::Result<()> {
        let mut last_frame = Instant::now();

        loop {
            let now = Instant::now();
            let delta = now.duration_since(last_frame).as_secs_f64() * 1000.0;
            last_frame = now;

            self.state.update(delta);

            renderer.clear()?;

            let show_night = self.force_night || self.state.night_active;
            self.horizon.update(
                delta,
                self.state.speed,
                self.state.obstacles_active(),
                show_night,
                &self.resources,
                renderer,
            )?;

            self.state.update_cached_hud();
            renderer.render_line_colored(
                2,
                1,
                &self.state.cached_hud,
                crossterm::style::Color::Cyan,
            )?;

            renderer.flush()?;

            if event::poll(self.frame_duration)? {
                match event::read()? {
                    Event::Resize(width, height) => {
                        renderer.manual_resize(width, height)?;
                        let arena = renderer.arena();
                        self.horizon.resize(arena.width, arena.height);
                    }
                    Event::Key(key_event) => match key_event.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => break,
                        KeyCode::Char('c')
                            if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            break;
                        }
                        KeyCode::Char('m') | KeyCode::Char('M')
                            if !self.resources.alt_active() =>
                        {
                            Self::switch_to_alt_mode(
                                &mut self.state,
                                &mut self.resources,
                                &mut self.horizon,
                            );
                        }
                        _ => {}
                    },
                    _ => {}
                }
            }
        }

        Ok(())
    }
}
