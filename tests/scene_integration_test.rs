use runnr::app_state::GameState;
use runnr::config::GameSettings;
use runnr::constants::DEFAULT_DIMENSIONS;
use runnr::render::NoopSurface;
use runnr::resources::GameResources;
use runnr::scene::Horizon;
use runnr::sprites::{self, ObstacleKind};

const FRAME_MS: f64 = 16.0;

fn new_horizon(provider: &GameResources) -> Horizon {
    Horizon::new(
        sprites::default_sprite_positions(),
        DEFAULT_DIMENSIONS,
        0.6,
        provider,
    )
}

#[test]
fn test_full_run_spawns_scrolls_and_evicts() {
    let provider = GameResources::new(&GameSettings::default());
    let mut horizon = new_horizon(&provider);
    let mut state = GameState::new(None);
    let mut surface = NoopSurface;

    let mut max_obstacles = 0;
    for _ in 0..20_000 {
        state.update(FRAME_MS);
        horizon
            .update(
                FRAME_MS,
                state.speed,
                state.obstacles_active(),
                state.night_active,
                &provider,
                &mut surface,
            )
            .unwrap();

        max_obstacles = max_obstacles.max(horizon.obstacles().len());
        for obstacle in horizon.obstacles() {
            // Evicted obstacles never survive a frame.
            assert!(obstacle.is_visible() || obstacle.x_pos > 0);
            assert!(obstacle.gap > 0);
        }
    }

    assert!(max_obstacles >= 2, "pipeline should run ahead of the player");
    assert!(
        max_obstacles <= 20,
        "eviction failed to keep the collection bounded"
    );
    assert!(state.score() > 0);
}

#[test]
fn test_obstacles_respect_grace_period() {
    let provider = GameResources::new(&GameSettings::default());
    let mut horizon = new_horizon(&provider);
    let mut state = GameState::new(None);
    let mut surface = NoopSurface;

    // Slightly under the grace period at 16ms per frame.
    for _ in 0..180 {
        state.update(FRAME_MS);
        horizon
            .update(
                FRAME_MS,
                state.speed,
                state.obstacles_active(),
                false,
                &provider,
                &mut surface,
            )
            .unwrap();
    }
    assert!(horizon.obstacles().is_empty());

    for _ in 0..600 {
        state.update(FRAME_MS);
        horizon
            .update(
                FRAME_MS,
                state.speed,
                state.obstacles_active(),
                false,
                &provider,
                &mut surface,
            )
            .unwrap();
    }
    assert!(!horizon.obstacles().is_empty());
}

#[test]
fn test_ground_seam_stays_closed_for_the_whole_run() {
    let provider = GameResources::new(&GameSettings::default());
    let mut horizon = new_horizon(&provider);
    let mut surface = NoopSurface;

    for _ in 0..10_000 {
        horizon
            .update(FRAME_MS, 12.0, false, false, &provider, &mut surface)
            .unwrap();
        for line in horizon.horizon_lines() {
            let [a, b] = line.x_positions();
            let (left, right) = if a <= b { (a, b) } else { (b, a) };
            assert_eq!(right, left + line.width(), "segments must stay adjacent");
            assert!(left <= 0, "left segment must cover the screen edge");
        }
    }
}

#[test]
fn test_alt_mode_switch_swaps_obstacle_table() {
    let mut provider = GameResources::new(&GameSettings::default());
    let mut horizon = new_horizon(&provider);
    let mut surface = NoopSurface;

    for _ in 0..3000 {
        horizon
            .update(FRAME_MS, 8.0, true, false, &provider, &mut surface)
            .unwrap();
    }

    provider.activate_alt();
    horizon.enable_alt_game_mode(&provider, sprites::alt_sprite_positions());
    assert!(horizon.obstacles().is_empty());
    assert_eq!(horizon.clouds_len(), 0);

    for _ in 0..5000 {
        horizon
            .update(FRAME_MS, 8.0, true, false, &provider, &mut surface)
            .unwrap();
        for obstacle in horizon.obstacles() {
            assert!(
                matches!(
                    obstacle.kind(),
                    ObstacleKind::Stump | ObstacleKind::Owl | ObstacleKind::Coin
                ),
                "desert obstacle {:?} spawned after the mode switch",
                obstacle.kind()
            );
        }
        // The alt scene has no clouds.
        assert_eq!(horizon.clouds_len(), 0);
        assert!(horizon.background_els_len() <= 4);
    }
}

#[test]
fn test_decoration_stream_never_stalls() {
    let mut provider = GameResources::new(&GameSettings::default());
    let mut horizon = new_horizon(&provider);
    let mut surface = NoopSurface;

    provider.activate_alt();
    horizon.enable_alt_game_mode(&provider, sprites::alt_sprite_positions());

    // Pinned lanterns never despawn; once one is the newest element the
    // stream must still keep producing scrolling decorations.
    let mut late_max = 0;
    for frame in 0..30_000 {
        horizon
            .update(FRAME_MS, 4.0, false, false, &provider, &mut surface)
            .unwrap();
        if frame >= 10_000 {
            late_max = late_max.max(horizon.background_els_len());
        }
    }
    assert!(
        late_max > 1,
        "decoration stream stalled: late max population was {late_max}"
    );
}

#[test]
fn test_collectables_spawn_in_alt_mode() {
    let mut provider = GameResources::new(&GameSettings::default());
    let mut horizon = new_horizon(&provider);
    let mut surface = NoopSurface;

    provider.activate_alt();
    horizon.enable_alt_game_mode(&provider, sprites::alt_sprite_positions());

    let mut saw_coin = false;
    for _ in 0..50_000 {
        horizon
            .update(FRAME_MS, 6.0, true, false, &provider, &mut surface)
            .unwrap();
        if horizon
            .obstacles()
            .iter()
            .any(|o| o.kind() == ObstacleKind::Coin)
        {
            saw_coin = true;
            break;
        }
    }
    assert!(saw_coin, "collectables should enter the pool in alt mode");
}

#[test]
fn test_slowdown_collapses_flying_obstacles_to_ground_level() {
    let settings = GameSettings {
        slowdown: true,
        ..GameSettings::default()
    };
    let mut provider = GameResources::new(&settings);
    let mut horizon = new_horizon(&provider);
    let mut surface = NoopSurface;

    provider.activate_alt();
    horizon.enable_alt_game_mode(&provider, sprites::alt_sprite_positions());

    // Speed 5.0 clears the halved flying threshold of 4.25.
    let mut saw_owl = false;
    for _ in 0..50_000 {
        horizon
            .update(FRAME_MS, 5.0, true, false, &provider, &mut surface)
            .unwrap();
        for obstacle in horizon.obstacles() {
            if obstacle.kind() == ObstacleKind::Owl {
                saw_owl = true;
                assert_eq!(obstacle.y_pos, 20, "variable y should pin to the top slot");
            }
        }
        if saw_owl {
            break;
        }
    }
    assert!(saw_owl, "owl should spawn once the halved threshold is met");
}

#[test]
fn test_night_mode_fades_with_the_day_cycle() {
    let provider = GameResources::new(&GameSettings::default());
    let mut horizon = new_horizon(&provider);
    let mut surface = NoopSurface;

    for _ in 0..100 {
        horizon
            .update(FRAME_MS, 8.0, false, true, &provider, &mut surface)
            .unwrap();
        let opacity = horizon.night_mode().opacity();
        assert!((0.0..=1.0).contains(&opacity));
    }
    assert_eq!(horizon.night_mode().opacity(), 1.0);

    for _ in 0..100 {
        horizon
            .update(FRAME_MS, 8.0, false, false, &provider, &mut surface)
            .unwrap();
    }
    assert_eq!(horizon.night_mode().opacity(), 0.0);
}

#[test]
fn test_resize_keeps_the_scene_running() {
    let provider = GameResources::new(&GameSettings::default());
    let mut horizon = new_horizon(&provider);
    let mut surface = NoopSurface;

    for _ in 0..1000 {
        horizon
            .update(FRAME_MS, 8.0, true, false, &provider, &mut surface)
            .unwrap();
    }
    horizon.resize(80, 20);
    for _ in 0..1000 {
        horizon
            .update(FRAME_MS, 8.0, true, false, &provider, &mut surface)
            .unwrap();
    }
    // New spawns start at the new right edge.
    if let Some(last) = horizon.obstacles().last() {
        assert!(last.x_pos <= 80 + last.width);
    }
}
