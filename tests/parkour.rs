use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use winit::event::TouchPhase;
use winit::keyboard::KeyCode;

use parkour_run::{
    Controls, Game, InputScheme, InputState, Level, LevelConfig, Phase, PlayerTuning, TouchLayout,
};

fn seeded_game(seed: u64) -> Game {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Game::new(Level::generate(&LevelConfig::default(), &mut rng), PlayerTuning::default())
}

fn gapless_config() -> LevelConfig {
    LevelConfig {
        lead_in: 1.0,
        gap_min: 4.0,
        gap_max: 4.0,
        lateral_spread: 0.0,
        bonus_height: 0.0,
        obstacle_chance: 0.0,
        ..LevelConfig::default()
    }
}

#[test]
fn idle_spawn_settles_on_start_platform() {
    let mut game = seeded_game(11);
    let mut input = InputState::default();

    let mut respawned = false;
    for _ in 0..63 {
        respawned |= game.frame(0.016, &mut input).respawned;
    }

    let p = game.player();
    assert!(!respawned);
    assert!(p.on_ground);
    let half = game.tuning().height * 0.5;
    assert!((p.position.y - half).abs() < 0.2, "y = {}", p.position.y);
    assert_eq!(p.position.x, 0.0);
    assert_eq!(p.position.z, 0.0);
}

#[test]
fn holding_forward_on_gapless_level_wins() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let level = Level::generate(&gapless_config(), &mut rng);
    let mut game = Game::new(level, PlayerTuning::default());
    let mut input = InputState {
        move_fwd: true,
        ..Default::default()
    };

    let mut won_at = None;
    for i in 0..1500 {
        let r = game.frame(0.016, &mut input);
        assert!(!r.respawned, "fell off at frame {i}");
        if r.won {
            won_at = Some(i);
            break;
        }
    }

    assert!(won_at.is_some(), "never reached the goal");
    match game.phase() {
        Phase::Won { time } => assert!(time.is_finite() && time > 0.0),
        Phase::Playing => panic!("expected win"),
    }
}

#[test]
fn frame_dt_never_exceeds_cap() {
    let mut game = seeded_game(5);
    let mut input = InputState::default();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..500 {
        let raw: f32 = rng.random_range(-0.5..2.0);
        let r = game.frame(raw, &mut input);
        assert!(r.dt >= 0.0 && r.dt <= 0.05, "dt = {}", r.dt);
    }
}

#[test]
fn restart_after_win_is_idempotent() {
    for seed in 0..5 {
        let mut game = seeded_game(seed);
        let mut input = InputState::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed + 100);

        for _ in 0..200 {
            input.move_fwd = rng.random_bool(0.7);
            input.move_left = rng.random_bool(0.2);
            input.jump = rng.random_bool(0.1);
            input.look_delta = glam::Vec2::new(rng.random_range(-20.0..20.0), rng.random_range(-5.0..5.0));
            game.frame(0.016, &mut input);
        }

        let marker = game.level().goal_marker();
        game.player_mut().position = marker;
        assert!(game.frame(0.016, &mut input).won);

        game.restart();
        assert_eq!(game.player().position, game.tuning().spawn);
        assert_eq!(game.player().velocity, Vec3::ZERO);
        assert_eq!(game.session_time(), 0.0);
        assert_eq!(game.phase(), Phase::Playing);

        game.restart();
        assert_eq!(game.player().position, game.tuning().spawn);
    }
}

#[test]
fn win_time_never_decreases() {
    let mut game = seeded_game(8);
    let mut input = InputState::default();

    let mut last = 0.0;
    for _ in 0..50 {
        game.frame(0.016, &mut input);
        assert!(game.session_time() >= last);
        last = game.session_time();
    }

    game.player_mut().position = game.level().goal_marker();
    game.frame(0.016, &mut input);
    let Phase::Won { time } = game.phase() else {
        panic!("expected win");
    };
    assert!(time >= last);

    for _ in 0..10 {
        game.frame(0.016, &mut input);
        assert_eq!(game.phase(), Phase::Won { time });
    }
}

#[test]
fn below_fall_threshold_returns_to_spawn() {
    let mut game = seeded_game(2);
    let mut input = InputState::default();
    let threshold = game.tuning().fall_threshold;

    game.player_mut().position = Vec3::new(12.0, threshold - 0.01, -30.0);
    let r = game.frame(0.016, &mut input);

    assert!(r.respawned);
    assert_eq!(game.player().position, game.tuning().spawn);
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn space_tapped_in_the_air_does_not_jump_on_landing() {
    let mut game = seeded_game(4);
    let mut controls = Controls::new(InputScheme::Desktop, TouchLayout::new(800, 600, 1.0));

    game.frame(0.016, controls.state_mut());
    assert!(!game.player().on_ground);

    controls.on_key(KeyCode::Space, true, false);
    controls.on_key(KeyCode::Space, false, false);

    let jump = game.tuning().jump_impulse;
    for i in 0..120 {
        game.frame(0.016, controls.state_mut());
        controls.state_mut().clear_one_shots();
        assert!(game.player().velocity.y < jump * 0.5, "jumped on frame {i}");
    }
    assert!(game.player().on_ground);
}

#[test]
fn space_held_through_landing_jumps() {
    let mut game = seeded_game(4);
    let mut controls = Controls::new(InputScheme::Desktop, TouchLayout::new(800, 600, 1.0));
    controls.on_key(KeyCode::Space, true, false);

    let jump = game.tuning().jump_impulse;
    let mut jumped = false;
    for _ in 0..120 {
        game.frame(0.016, controls.state_mut());
        controls.state_mut().clear_one_shots();
        if game.player().velocity.y > jump * 0.5 {
            jumped = true;
            break;
        }
    }
    assert!(jumped);
    assert!(!controls.state().jump);
}

#[test]
fn touch_tap_restarts_after_win() {
    let layout = TouchLayout::new(800, 600, 1.0);
    let mut game = seeded_game(6);
    let mut controls = Controls::new(InputScheme::Touch, layout);

    game.frame(0.016, controls.state_mut());
    game.player_mut().position = game.level().goal_marker();
    assert!(game.frame(0.016, controls.state_mut()).won);
    controls.state_mut().clear_one_shots();

    // Tippen auf den Jump-Button ist kein Neustart
    let button = (layout.jump_min + layout.jump_max) * 0.5;
    controls.on_touch(1, TouchPhase::Started, button);
    controls.on_touch(1, TouchPhase::Ended, button);
    game.frame(0.016, controls.state_mut());
    controls.state_mut().clear_one_shots();
    assert!(matches!(game.phase(), Phase::Won { .. }));

    controls.on_touch(2, TouchPhase::Started, glam::Vec2::new(400.0, 150.0));
    game.frame(0.016, controls.state_mut());
    controls.state_mut().clear_one_shots();
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.player().position.x, game.tuning().spawn.x);
    assert_eq!(game.player().position.z, game.tuning().spawn.z);
}
