pub mod background;
pub mod cloud;
pub mod line;
pub mod night;
pub mod obstacle;

use rand::Rng;
use std::io;

use crate::constants::Dimensions;
use crate::render::Surface;
use crate::resources::ResourceProvider;
use crate::sprites::{
    BackgroundElConfig, ElPlacement, ObstacleKind, ObstacleType, Sheet, SpritePositions,
    YPlacement,
};
use background::BackgroundEl;
use cloud::Cloud;
use line::HorizonLine;
use night::NightMode;
use obstacle::{Obstacle, ObstacleParams};

const CLOUD_FREQUENCY: f64 = 0.5;
const BG_CLOUD_SPEED: f64 = 0.2;
const MAX_CLOUDS: usize = 6;

/// Retry cap for the spawn re-roll. The original recursed without a bound;
/// a misconfigured type pool would overflow the stack instead of stalling.
const MAX_SPAWN_ATTEMPTS: usize = 64;

/// Element that participates in the shared parallax recycling pattern:
/// moves left each frame, reports its trailing gap, and flags itself for
/// removal once off screen.
pub trait ParallaxEl {
    fn update(&mut self, speed: f64, surface: &mut dyn Surface) -> io::Result<()>;
    fn x_pos(&self) -> i32;
    fn gap(&self) -> i32;
    fn is_removed(&self) -> bool;
}

/// Move a parallax collection one frame and decide whether a new element
/// should be appended. An empty collection always wants a spawn; otherwise
/// one is requested only when the collection has room, the trailing element
/// has cleared its own gap, and the frequency roll succeeds. Removed
/// elements are filtered out, preserving order.
fn update_parallax_layer<E: ParallaxEl>(
    els: &mut Vec<E>,
    el_speed: f64,
    max_els: usize,
    frequency: f64,
    container_width: i32,
    surface: &mut dyn Surface,
) -> io::Result<bool> {
    if els.is_empty() {
        return Ok(true);
    }

    for el in els.iter_mut() {
        el.update(el_speed, surface)?;
    }

    let Some(last) = els.last() else {
        return Ok(true);
    };
    let wants_spawn = els.len() < max_els
        && container_width - last.x_pos() > last.gap()
        && frequency > rand::random::<f64>();

    els.retain(|el| !el.is_removed());
    Ok(wants_spawn)
}

/// The scrolling environment: ground lines, clouds, background elements,
/// night mode and the obstacle pipeline. Owns every element collection and
/// is driven by one `update` call per frame.
pub struct Horizon {
    dimensions: Dimensions,
    gap_coefficient: f64,
    sprite_pos: SpritePositions,
    active_sheet: Sheet,
    alt_game_mode_active: bool,

    horizon_lines: Vec<HorizonLine>,
    clouds: Vec<Cloud>,
    cloud_speed: f64,
    cloud_frequency: f64,
    background_els: Vec<BackgroundEl>,
    last_el: Option<&'static str>,
    background_el_config: BackgroundElConfig,
    night_mode: NightMode,

    obstacles: Vec<Obstacle>,
    obstacle_history: Vec<ObstacleKind>,
    obstacles_spawned: u64,
    obstacle_types: Vec<ObstacleType>,
    max_gap_coefficient: f64,
    max_obstacle_length: i32,
}

impl Horizon {
    pub fn new(
        sprite_pos: SpritePositions,
        dimensions: Dimensions,
        gap_coefficient: f64,
        provider: &dyn ResourceProvider,
    ) -> Self {
        let definition = provider.sprite_definition();
        let horizon_lines = definition
            .lines
            .iter()
            .map(|config| HorizonLine::new(config, definition.sheet))
            .collect();

        let mut horizon = Self {
            dimensions,
            gap_coefficient,
            sprite_pos,
            active_sheet: definition.sheet,
            alt_game_mode_active: false,
            horizon_lines,
            clouds: Vec::new(),
            cloud_speed: BG_CLOUD_SPEED,
            cloud_frequency: CLOUD_FREQUENCY,
            background_els: Vec::new(),
            last_el: None,
            background_el_config: definition.background_el_config,
            night_mode: NightMode::new(&sprite_pos, dimensions.width),
            obstacles: Vec::new(),
            obstacle_history: Vec::new(),
            obstacles_spawned: 0,
            obstacle_types: definition.obstacles.clone(),
            max_gap_coefficient: definition.max_gap_coefficient,
            max_obstacle_length: definition.max_obstacle_length,
        };
        // Start with a single cloud on the horizon. No obstacles yet.
        horizon.add_cloud();
        horizon
    }

    /// Advance the whole environment by one frame.
    ///
    /// `update_obstacles` gates the obstacle pipeline (held off during the
    /// ease-in at the start of a run); `show_night` drives the day/night
    /// fade.
    pub fn update(
        &mut self,
        delta: f64,
        current_speed: f64,
        update_obstacles: bool,
        show_night: bool,
        provider: &dyn ResourceProvider,
        surface: &mut dyn Surface,
    ) -> io::Result<()> {
        let has_clouds = provider.sprite_definition().has_clouds;

        if self.alt_game_mode_active {
            self.update_background_els(delta, provider, surface)?;
        }

        for line in &mut self.horizon_lines {
            line.update(delta, current_speed, surface)?;
        }

        if !self.alt_game_mode_active || has_clouds {
            self.night_mode.update(show_night, surface)?;
            self.update_clouds(delta, current_speed, surface)?;
        }

        if update_obstacles {
            self.update_obstacles(delta, current_speed, provider, surface)?;
        }
        Ok(())
    }

    fn update_clouds(
        &mut self,
        delta: f64,
        speed: f64,
        surface: &mut dyn Surface,
    ) -> io::Result<()> {
        let el_speed = self.cloud_speed / 1000.0 * delta * speed;
        let wants_spawn = update_parallax_layer(
            &mut self.clouds,
            el_speed,
            MAX_CLOUDS,
            self.cloud_frequency,
            self.dimensions.width,
            surface,
        )?;
        if wants_spawn {
            self.add_cloud();
        }
        Ok(())
    }

    fn update_background_els(
        &mut self,
        delta: f64,
        provider: &dyn ResourceProvider,
        surface: &mut dyn Surface,
    ) -> io::Result<()> {
        let wants_spawn = update_parallax_layer(
            &mut self.background_els,
            delta,
            self.background_el_config.max_bg_els,
            self.cloud_frequency,
            self.dimensions.width,
            surface,
        )?;
        if wants_spawn {
            self.add_background_el(provider);
        }
        Ok(())
    }

    fn add_cloud(&mut self) {
        self.clouds.push(Cloud::new(
            self.active_sheet,
            self.sprite_pos.cloud,
            self.dimensions.width,
        ));
    }

    /// Append a random background element, avoiding back-to-back repeats of
    /// the same type when more than one type exists. Pinned types never
    /// despawn, so at most one instance of each is kept.
    fn add_background_el(&mut self, provider: &dyn ResourceProvider) {
        let specs = &provider.sprite_definition().background_els;
        let pool: Vec<_> = specs
            .iter()
            .filter(|spec| {
                !matches!(spec.placement, ElPlacement::Fixed { .. })
                    || !self.background_els.iter().any(|el| el.name() == spec.name)
            })
            .collect();
        if pool.is_empty() {
            return;
        }
        let mut rng = rand::rng();
        let mut index = rng.random_range(0..pool.len());
        while pool.len() > 1 && Some(pool[index].name) == self.last_el {
            index = rng.random_range(0..pool.len());
        }
        self.last_el = Some(pool[index].name);
        self.background_els.push(BackgroundEl::new(
            self.active_sheet,
            pool[index],
            self.background_el_config,
            self.dimensions.width,
        ));
    }

    fn update_obstacles(
        &mut self,
        delta: f64,
        current_speed: f64,
        provider: &dyn ResourceProvider,
        surface: &mut dyn Surface,
    ) -> io::Result<()> {
        for obstacle in &mut self.obstacles {
            obstacle.update(delta, current_speed, surface)?;
        }
        // Obstacles are created and removed in scroll order, so eviction is
        // a front-of-queue cleanup.
        self.obstacles.retain(|obstacle| !obstacle.remove);

        // A follower is scheduled at most once per obstacle, and only after
        // the obstacle is on screen with its gap cleared. An empty pipeline
        // always wants a spawn.
        let latch_index = match self.obstacles.last() {
            Some(last) => {
                if !last.following_obstacle_created
                    && last.is_visible()
                    && last.x_pos + last.width + last.gap < self.dimensions.width
                {
                    Some(Some(self.obstacles.len() - 1))
                } else {
                    None
                }
            }
            None => Some(None),
        };
        if let Some(latch) = latch_index {
            if self.add_new_obstacle(current_speed, provider) {
                if let Some(index) = latch {
                    self.obstacles[index].following_obstacle_created = true;
                }
            }
        }
        Ok(())
    }

    /// Pick a type and append a new obstacle. Collectable types only enter
    /// the pool when the alt game mode is active or globally enabled.
    /// Returns false when no acceptable type exists this frame.
    fn add_new_obstacle(&mut self, current_speed: f64, provider: &dyn ResourceProvider) -> bool {
        let collectables_allowed =
            self.alt_game_mode_active || provider.alt_game_mode_enabled();
        let pool: Vec<usize> = self
            .obstacle_types
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.collectable || collectables_allowed)
            .map(|(index, _)| index)
            .collect();
        if pool.is_empty() {
            return false;
        }

        let max_duplication = provider.max_obstacle_duplication();
        let mut rng = rand::rng();
        let mut chosen = None;

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let index = pool[rng.random_range(0..pool.len())];
            let candidate = &self.obstacle_types[index];
            let duplicate = pool.len() > 1
                && self.duplicate_obstacle_check(candidate.kind, max_duplication);
            if !duplicate && current_speed >= candidate.min_speed {
                chosen = Some(index);
                break;
            }
        }

        // Retry cap exhausted: relax the duplication rule, but never spawn a
        // type the current speed cannot support.
        let chosen = chosen.or_else(|| {
            pool.iter()
                .copied()
                .filter(|&i| current_speed >= self.obstacle_types[i].min_speed)
                .max_by(|&a, &b| {
                    self.obstacle_types[a]
                        .min_speed
                        .total_cmp(&self.obstacle_types[b].min_speed)
                })
        });
        let Some(index) = chosen else {
            return false;
        };

        let type_config = &self.obstacle_types[index];
        let params = ObstacleParams {
            sheet: self.active_sheet,
            max_obstacle_length: self.max_obstacle_length,
            max_gap_coefficient: self.max_gap_coefficient,
            slowdown: provider.has_slowdown(),
            audio_cues: provider.has_audio_cues(),
            compact_layout: provider.compact_layout(),
        };
        // Offset by the type width so the obstacle slides in from fully
        // off screen instead of popping in at the edge.
        self.obstacles.push(Obstacle::new(
            type_config,
            self.dimensions,
            self.gap_coefficient,
            current_speed,
            type_config.width,
            params,
        ));

        self.obstacle_history.insert(0, type_config.kind);
        self.obstacle_history.truncate(max_duplication);
        self.obstacles_spawned += 1;
        true
    }

    /// Whether spawning `next` would extend the most recent run of
    /// same-kind obstacles past the duplication limit.
    fn duplicate_obstacle_check(&self, next: ObstacleKind, max_duplication: usize) -> bool {
        let run = self
            .obstacle_history
            .iter()
            .take_while(|&&kind| kind == next)
            .count();
        run >= max_duplication
    }

    /// Switch to the alt sprite set: new type table (with the slowdown
    /// transformation applied), new lines and background config, cleared
    /// collections, full reset.
    pub fn enable_alt_game_mode(
        &mut self,
        provider: &dyn ResourceProvider,
        sprite_pos: SpritePositions,
    ) {
        let definition = provider.sprite_definition();

        self.clouds.clear();
        self.background_els.clear();
        self.last_el = None;
        self.alt_game_mode_active = true;
        self.sprite_pos = sprite_pos;
        self.active_sheet = definition.sheet;

        self.obstacle_types =
            adjusted_obstacle_types(&definition.obstacles, provider.has_slowdown());
        self.max_gap_coefficient = definition.max_gap_coefficient;
        self.max_obstacle_length = definition.max_obstacle_length;
        self.background_el_config = definition.background_el_config;

        self.horizon_lines = definition
            .lines
            .iter()
            .map(|config| HorizonLine::new(config, definition.sheet))
            .collect();

        self.reset();
    }

    /// Remove existing obstacles and reposition the lines and night mode.
    pub fn reset(&mut self) {
        self.obstacles.clear();
        for line in &mut self.horizon_lines {
            line.reset();
        }
        self.night_mode.reset();
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.dimensions = Dimensions { width, height };
        self.night_mode.resize(width);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn clouds_len(&self) -> usize {
        self.clouds.len()
    }

    pub fn background_els_len(&self) -> usize {
        self.background_els.len()
    }

    pub fn obstacle_history(&self) -> &[ObstacleKind] {
        &self.obstacle_history
    }

    /// Total obstacles spawned since construction. At most one per frame.
    pub fn obstacles_spawned(&self) -> u64 {
        self.obstacles_spawned
    }

    pub fn horizon_lines(&self) -> &[HorizonLine] {
        &self.horizon_lines
    }

    pub fn night_mode(&self) -> &NightMode {
        &self.night_mode
    }

    pub fn alt_game_mode_active(&self) -> bool {
        self.alt_game_mode_active
    }
}

/// Derive the mode-adjusted type table. With slowdown enabled, speed
/// thresholds are halved and minimum gaps inflated to compensate for the
/// halved game speed, and variable-y types collapse to their first slot.
/// The source table is never mutated in place.
fn adjusted_obstacle_types(types: &[ObstacleType], slowdown: bool) -> Vec<ObstacleType> {
    if !slowdown {
        return types.to_vec();
    }
    types
        .iter()
        .map(|t| {
            let mut adjusted = t.clone();
            adjusted.multiple_speed = t.multiple_speed / 2.0;
            adjusted.min_gap = t.min_gap * 1.5;
            adjusted.min_speed = t.min_speed / 2.0;
            if let YPlacement::Variable { slots, .. } = &t.y_placement {
                adjusted.y_placement = YPlacement::Fixed(slots[0]);
            }
            adjusted
        })
        .collect()
}
