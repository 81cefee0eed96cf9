use crate::config::GameSettings;
use crate::sprites::{self, SpriteDefinition};

/// Read-only view of the external configuration and sprite data the
/// environment consumes each frame.
pub trait ResourceProvider {
    /// Definition of the currently active sprite set.
    fn sprite_definition(&self) -> &SpriteDefinition;
    fn has_slowdown(&self) -> bool;
    fn has_audio_cues(&self) -> bool;
    fn alt_game_mode_enabled(&self) -> bool;
    fn compact_layout(&self) -> bool;
    fn max_obstacle_duplication(&self) -> usize;
}

/// Owns both sprite definitions and the mode switch between them.
pub struct GameResources {
    default_definition: SpriteDefinition,
    alt_definition: SpriteDefinition,
    alt_active: bool,
    slowdown: bool,
    audio_cues: bool,
    alt_game_mode_enabled: bool,
    compact_layout: bool,
    max_obstacle_duplication: usize,
}

impl GameResources {
    pub fn new(settings: &GameSettings) -> Self {
        Self {
            default_definition: sprites::default_definition(),
            alt_definition: sprites::alt_definition(),
            alt_active: false,
            slowdown: settings.slowdown,
            audio_cues: settings.audio_cues,
            alt_game_mode_enabled: settings.alt_game_mode,
            compact_layout: settings.compact_layout,
            max_obstacle_duplication: settings.max_obstacle_duplication,
        }
    }

    /// Switch the active sprite definition to the alt set. One-way, like the
    /// game itself: there is no path back to the default set mid-run.
    pub fn activate_alt(&mut self) {
        self.alt_active = true;
    }

    pub fn alt_active(&self) -> bool {
        self.alt_active
    }
}

impl ResourceProvider for GameResources {
    fn sprite_definition(&self) -> &SpriteDefinition {
        if self.alt_active {
            &self.alt_definition
        } else {
            &self.default_definition
        }
    }

    fn has_slowdown(&self) -> bool {
        self.slowdown
    }

    fn has_audio_cues(&self) -> bool {
        self.audio_cues
    }

    fn alt_game_mode_enabled(&self) -> bool {
        self.alt_game_mode_enabled
    }

    fn compact_layout(&self) -> bool {
        self.compact_layout
    }

    fn max_obstacle_duplication(&self) -> usize {
        self.max_obstacle_duplication
    }
}
