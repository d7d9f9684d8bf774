use crakers_content::{GeneratorConfig, LevelLoader, generate_level};
use crakers_core::{
    AgentState, Cell, Direction, EnemySpawn, GameConfig, GridMap, Level, MapOracle, StateTransition,
};
use crakers_runtime::{
    InputProvider, Outcome, PlayerInput, RuntimeError, ScriptedInput, Session, SessionEvent,
    SessionStatus, StepReport, WanderInput,
};

fn every_tick() -> GameConfig {
    GameConfig::default().with_enemy_move_interval(1)
}

fn run_to_end(session: &mut Session, provider: &mut dyn InputProvider, max_ticks: u64) -> Vec<StepReport> {
    let mut reports = Vec::new();
    while !session.status().is_finished() && session.tick() < max_ticks {
        reports.push(session.step_with(&mut *provider).unwrap());
    }
    reports
}

#[test]
fn idle_player_is_caught_and_loses_every_life() {
    let map = GridMap::from_ascii(&["#########", "#.......#", "#########"]).unwrap();
    let level = Level::new(map, Cell::new(1, 1))
        .with_gems([Cell::new(6, 1)])
        .with_enemy(EnemySpawn::new(Cell::new(7, 1), vec![Cell::new(7, 1)]));
    let config = every_tick();
    let mut session = Session::new(level, config.clone()).unwrap();

    let reports = run_to_end(&mut session, &mut ScriptedInput::default(), 500);

    let first = &reports[0];
    assert!(first.events.contains(&SessionEvent::EnemyStateChanged {
        enemy: 0,
        transition: StateTransition {
            from: AgentState::Patrol,
            to: AgentState::Chase,
        },
    }));

    let hits: Vec<(u64, u32)> = reports
        .iter()
        .flat_map(|report| {
            report.events.iter().filter_map(move |event| match event {
                SessionEvent::PlayerHit { lives_left, .. } => Some((report.tick, *lives_left)),
                _ => None,
            })
        })
        .collect();
    let grace = config.invincibility_ticks;
    assert_eq!(hits, vec![(6, 2), (6 + grace, 1), (6 + 2 * grace, 0)]);

    let last = reports.last().unwrap();
    assert_eq!(last.status, SessionStatus::Finished(Outcome::Lost));
    assert_eq!(last.events.last(), Some(&SessionEvent::Lost));
    assert!(matches!(
        session.step(PlayerInput::Idle),
        Err(RuntimeError::SessionFinished {
            outcome: Outcome::Lost
        })
    ));
}

#[test]
fn breaking_line_of_sight_starts_a_search() {
    let map = GridMap::from_ascii(&[
        "#######", "#.....#", "#####.#", "#####.#", "#####.#", "#####.#", "#####.#",
        "#####.#", "#####.#", "#######",
    ])
    .unwrap();
    let level = Level::new(map, Cell::new(5, 1))
        .with_gems([Cell::new(5, 8)])
        .with_enemy(EnemySpawn::new(Cell::new(1, 1), vec![Cell::new(1, 1)]));
    let mut session = Session::new(level, every_tick()).unwrap();

    let mut script = ScriptedInput::new(
        std::iter::once(PlayerInput::Idle)
            .chain(std::iter::repeat_n(PlayerInput::Move(Direction::South), 4)),
    );
    let transitions: Vec<StateTransition> = (0..5)
        .flat_map(|_| {
            let report = session.step_with(&mut script).unwrap();
            report.transitions().map(|(_, t)| t).collect::<Vec<_>>()
        })
        .collect();

    assert_eq!(
        transitions[..2],
        [
            StateTransition {
                from: AgentState::Patrol,
                to: AgentState::Chase,
            },
            StateTransition {
                from: AgentState::Chase,
                to: AgentState::Search,
            },
        ]
    );
    let remembered = session.enemies()[0].last_known_player().unwrap();
    assert_eq!(remembered.x, 5);
}

#[test]
fn ron_level_can_be_cleared() {
    let level = LevelLoader::parse(
        r##########"(
            layout: [
                "#######",
                "#P.*..#",
                "#######",
            ],
            gems: [(5, 1)],
        )"##########,
    )
    .unwrap();
    let mut session = Session::new(level, GameConfig::default()).unwrap();
    let mut script = ScriptedInput::new([PlayerInput::Move(Direction::East); 4]);

    let reports = run_to_end(&mut session, &mut script, 10);

    assert_eq!(reports.len(), 4);
    let collected: Vec<Cell> = reports
        .iter()
        .flat_map(|report| &report.events)
        .filter_map(|event| match event {
            SessionEvent::GemCollected { cell, .. } => Some(*cell),
            _ => None,
        })
        .collect();
    assert_eq!(collected, vec![Cell::new(3, 1), Cell::new(5, 1)]);
    assert_eq!(session.status(), SessionStatus::Finished(Outcome::Won));
}

#[test]
fn seeded_sessions_replay_identically() {
    let run = |seed: u64| {
        let level = generate_level(seed, &GeneratorConfig::default()).unwrap();
        let mut session = Session::new(level, GameConfig::default()).unwrap();
        let mut wander = WanderInput::new(seed);
        let reports = run_to_end(&mut session, &mut wander, 400);
        (reports, session.player().clone())
    };

    assert_eq!(run(21), run(21));
}

#[test]
fn enemies_never_skip_cells() {
    let level = generate_level(8, &GeneratorConfig::default()).unwrap();
    let mut session = Session::new(level, every_tick()).unwrap();
    let mut wander = WanderInput::new(8);

    for report in run_to_end(&mut session, &mut wander, 300) {
        for event in &report.events {
            if let SessionEvent::EnemyMoved { from, to, .. } = event {
                assert!(from.is_adjacent(*to), "tick {}: {from} -> {to}", report.tick);
                assert!(session.map().tile(*to).is_some_and(|tile| tile.is_walkable()));
            }
        }
    }
}
