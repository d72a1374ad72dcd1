use rand::rngs::mock::StepRng;
use torus_snake::cell::{Cell, RenderClass};
use torus_snake::config::SimConfig;
use torus_snake::direction::Direction;
use torus_snake::driver::{run_until_terminated, Headless};
use torus_snake::error::ConfigError;
use torus_snake::game::{Game, GameStatus, MovePolicy, StepOutcome};
use torus_snake::grid::Position;

#[test]
fn stepwise_fruit_collection_and_restock() {
    // Constant zero draws: greedy moves and deterministic fruit placement.
    let mut game = Game::with_rng(SimConfig::new(5, 5), StepRng::new(0, 0)).expect("valid config");
    assert_eq!(game.head(), Position::new(2, 2));
    assert_eq!(game.fruit(), Some(Position::new(0, 0)));

    game.place_fruit(Position::new(2, 3), 1);

    let outcome = game.step(0.0);
    let StepOutcome::Moved(applied) = outcome else {
        panic!("open board should not terminate");
    };
    assert_eq!(applied.direction, Direction::Down);
    assert_eq!(applied.policy, MovePolicy::Greedy);
    assert!(applied.ate_fruit);
    assert_eq!(game.length(), 4);
    assert_eq!(game.fruit(), None);
    assert_eq!(game.grid().get(Position::new(2, 3)).value, 4);
    assert_eq!(game.grid().get(Position::new(2, 2)).value, 2);

    game.prepare_tick();
    assert_eq!(game.fruit(), Some(Position::new(0, 0)));
    assert_eq!(game.grid().get(Position::new(0, 0)).value, -4);

    // Up is body now; Left lands 4 away from (0, 0), Down and Right 6.
    let outcome = game.step(0.0);
    let StepOutcome::Moved(applied) = outcome else {
        panic!("open board should not terminate");
    };
    assert_eq!(applied.direction, Direction::Left);
    assert_eq!(game.head(), Position::new(1, 3));
    assert_eq!(game.grid().get(Position::new(2, 2)).value, 1);
}

#[test]
fn snake_wraps_across_the_edge() {
    let mut game = Game::with_rng(SimConfig::new(5, 5), StepRng::new(0, 0)).expect("valid config");
    let fruit = game.fruit().expect("fruit placed");
    game.grid_mut().set(fruit, Cell::EMPTY);
    // Aim at an emptied target two cells below; once there, ties favour Down.
    game.place_fruit(Position::new(2, 4), 1);
    game.grid_mut().set(Position::new(2, 4), Cell::EMPTY);

    let mut heads = Vec::new();
    for _ in 0..3 {
        assert!(game.step(0.0).continues());
        heads.push(game.head());
    }

    assert_eq!(
        heads,
        vec![Position::new(2, 3), Position::new(2, 4), Position::new(2, 0)]
    );
}

#[test]
fn boxed_in_snake_stops_the_driver() {
    let mut game = Game::with_seed(SimConfig::new(5, 5), 42).expect("valid config");
    for direction in Direction::ALL {
        let neighbour = game.candidate_head(direction);
        game.grid_mut().set(neighbour, Cell::body(2));
    }

    let summary = run_until_terminated(&mut game, &mut Headless, None).expect("headless run");

    assert!(summary.terminated);
    assert_eq!(summary.length, 3);
    assert_eq!(game.status(), GameStatus::Terminated);
    let snapshot = game.snapshot();
    let heads = snapshot
        .rows()
        .flatten()
        .filter(|class| **class == RenderClass::Head)
        .count();
    assert_eq!(heads, 1);
    assert_eq!(snapshot.body_cells, 5);
}

#[test]
fn same_seed_gives_same_run() {
    let mut config = SimConfig::new(12, 9);
    config.exploration_rate = 0.4;
    config.auto_grow_every = Some(7);

    let mut first = Game::with_seed(config.clone(), 99).expect("valid config");
    let mut second = Game::with_seed(config, 99).expect("valid config");

    let a = run_until_terminated(&mut first, &mut Headless, Some(5_000)).expect("run");
    let b = run_until_terminated(&mut second, &mut Headless, Some(5_000)).expect("run");

    assert_eq!(a, b);
    assert_eq!(first.grid(), second.grid());
}

#[test]
fn invalid_configuration_never_builds_a_game() {
    assert!(matches!(
        Game::with_seed(SimConfig::new(0, 5), 1),
        Err(ConfigError::EmptyGrid { .. })
    ));
    assert!(matches!(
        Game::with_seed(SimConfig::new(1, 2), 1),
        Err(ConfigError::GridTooSmall { .. })
    ));
}
