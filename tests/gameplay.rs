use invaders::config::GameConfig;
use invaders::game::{Direction, Game, Phase, World};
use invaders::scores::{FileHighScores, HighScoreStore, MemoryHighScores};

fn seeded(seed: u64) -> Game {
    Game::new(World::with_seed(
        GameConfig::default(),
        Box::new(MemoryHighScores::default()),
        seed,
    ))
}

/// Sweeps the ship back and forth with the trigger held.
fn steer(game: &mut Game, step: u32) {
    let direction = if (step / 90) % 2 == 0 { Direction::Left } else { Direction::Right };
    game.set_direction(direction);
    game.set_firing(true);
}

#[test]
fn long_session_keeps_world_consistent() {
    for seed in [1, 7, 42] {
        let mut game = seeded(seed);
        let config = GameConfig::default();
        let mut last_score = 0;
        let mut last_lives = game.world().lives();
        let mut game_overs = 0;

        for step in 0..6_000 {
            steer(&mut game, step);
            let report = game.step();
            let world = game.world();

            assert!(world.ship_x() >= 0);
            assert!(world.ship_x() <= config.arena_width - config.ship_width());
            assert!(world.ship_shot_count() <= 1);
            assert!(world.alien_shot_count() <= 2);
            assert!(world.score() >= last_score, "score went down at step {step}");
            assert!(world.lives() <= last_lives);
            assert!(world.high_score() >= world.score());
            assert!(world.aliens_left() <= 55);

            if report.game_over {
                game_overs += 1;
                assert!(world.is_game_over());
            }
            last_score = world.score();
            last_lives = world.lives();
        }
        assert!(game_overs <= 1, "seed {seed} ended {game_overs} times");
    }
}

#[test]
fn frozen_after_game_over_until_replay() {
    let mut game = seeded(3);
    // Standing still under fire eventually loses every life
    let mut steps = 0;
    while !game.world().is_game_over() && steps < 200_000 {
        game.set_direction(Direction::None);
        game.step();
        steps += 1;
    }
    assert!(game.world().is_game_over());
    assert_eq!(game.world().phase(), Phase::GameOver);

    let ticks = game.world().ticks();
    let score = game.world().score();
    for _ in 0..50 {
        game.step();
    }
    assert_eq!(game.world().ticks(), ticks);
    assert_eq!(game.world().score(), score);

    assert!(game.replay());
    let world = game.world();
    assert_eq!(world.phase(), Phase::Playing);
    assert_eq!(world.score(), 0);
    assert_eq!(world.lives(), GameConfig::default().starting_lives);
    assert_eq!(world.aliens_left(), 55);
    assert_eq!(world.snapshot().hud.wave, 1);
    assert!(world.high_score() >= score);
}

#[test]
fn pause_holds_the_clock() {
    let mut game = seeded(9);
    game.toggle_pause();
    let before = game.snapshot();
    for _ in 0..100 {
        game.advance(std::time::Duration::from_millis(16));
    }
    let after = game.snapshot();
    assert_eq!(before.tick, after.tick);
    assert_eq!(before.aliens, after.aliens);
    assert!(after.hud.paused);
}

#[test]
fn best_score_lands_in_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invaders.scores");
    let mut game = Game::new(World::with_seed(
        GameConfig::default(),
        Box::new(FileHighScores::new(&path)),
        21,
    ));

    for step in 0..8_000 {
        steer(&mut game, step);
        game.step();
        if game.world().is_game_over() {
            break;
        }
    }

    let best = game.world().high_score();
    let stored = FileHighScores::new(&path).read_high_score().unwrap();
    assert_eq!(stored, best);
}

#[test]
fn stored_best_is_loaded_on_start() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invaders.scores");
    FileHighScores::new(&path).write_high_score(4_321).unwrap();

    let world = World::with_seed(GameConfig::default(), Box::new(FileHighScores::new(&path)), 0);
    assert_eq!(world.high_score(), 4_321);
    assert_eq!(world.snapshot().hud.high_score, 4_321);
}

#[test]
fn corrupt_score_file_starts_from_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invaders.scores");
    std::fs::write(&path, b"junk").unwrap();

    let world = World::with_seed(GameConfig::default(), Box::new(FileHighScores::new(&path)), 0);
    assert_eq!(world.high_score(), 0);
}

#[test]
fn config_file_shapes_the_world() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invaders.toml");
    std::fs::write(&path, "starting_lives = 5\nalien_interval_base_ms = 300\n").unwrap();

    let config = GameConfig::from_file(&path).unwrap();
    let world = World::with_seed(config, Box::new(MemoryHighScores::default()), 0);
    assert_eq!(world.lives(), 5);
    assert_eq!(world.alien_interval_ms(), 300);
}

#[test]
fn bad_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invaders.toml");
    std::fs::write(&path, "starting_lives = 0\n").unwrap();

    let err = GameConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("starting_lives"));
}

#[test]
fn slowest_accepted_config_runs() {
    let config = GameConfig::from_toml("alien_interval_base_ms = 60000\nbonus_interval_ms = 600000\n").unwrap();
    let mut game = Game::new(World::with_seed(config, Box::new(MemoryHighScores::default()), 4));
    for _ in 0..200 {
        game.step();
    }
    assert_eq!(game.world().alien_interval_ms(), 60_000);
    assert!(GameConfig::from_toml("alien_interval_base_ms = 50000000\n").is_err());
}
