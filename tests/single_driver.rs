mod common;

use ale_driver::{Backend, Emulator, EnvConfig, SimBackend, SingleEnvDriver, SlotState, StepOutcome};
use common::{assert_reset_after_done, MockBackend, Op};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn sim() -> SimBackend {
    SimBackend::new().with_screen(21, 16)
}

#[test]
fn random_run_over_breakout() {
    common::init();
    let config = EnvConfig::default()
        .game("breakout")
        .max_frames(108_000)
        .gray_scale(true)
        .seed(42);
    let mut driver = SingleEnvDriver::initialize(&sim(), &config).unwrap();
    assert!(!driver.action_set().is_empty());
    driver.reset().unwrap();

    let report = driver.run(20_000).unwrap();
    assert_eq!(report.steps, 20_000);
    assert!(report.episodes > 0);
    assert!(report.fps() > 0.0);
}

#[test]
fn identical_configs_and_actions_give_identical_outcomes() {
    let config = EnvConfig::default().max_frames(200).seed(11);
    let play = || -> Vec<StepOutcome> {
        let mut env = sim().construct_single(&config).unwrap();
        let actions = env.action_set();
        let mut rng = StdRng::seed_from_u64(5);
        env.reset().unwrap();
        (0..5_000)
            .map(|_| {
                let a = actions.get(rng.gen_range(0..actions.len())).unwrap();
                let outcome = env.step(a).unwrap();
                if outcome.is_done() {
                    env.reset().unwrap();
                }
                outcome
            })
            .collect()
    };
    assert_eq!(play(), play());
}

#[test]
fn different_seeds_diverge() {
    let outcomes = |seed: i32| -> Vec<StepOutcome> {
        let mut env = sim().construct_single(&EnvConfig::default().seed(seed)).unwrap();
        env.reset().unwrap();
        (0..2_000).map(|_| env.step(1).unwrap()).take_while(|o| !o.is_done()).collect()
    };
    assert_ne!(outcomes(1), outcomes(2));
}

#[test]
fn action_set_is_idempotent() {
    let mut driver = SingleEnvDriver::initialize(&sim(), &EnvConfig::default()).unwrap();
    let first = driver.action_set().clone();
    driver.run(100).unwrap();
    assert_eq!(driver.action_set(), &first);
    assert_eq!(driver.env().action_set(), first);
}

#[test]
fn every_finished_episode_is_reset_before_the_next_step() {
    let backend = MockBackend::new(7);
    let mut driver = SingleEnvDriver::initialize(&backend, &EnvConfig::default()).unwrap();
    let report = driver.run(100).unwrap();
    assert_eq!(report.episodes, 14);

    let ops = backend.ops();
    assert_eq!(ops.iter().filter(|op| matches!(op, Op::Step(..))).count(), 100);
    assert_eq!(ops.first(), Some(&Op::Reset(42)));
    assert_reset_after_done(&ops);
}

#[test]
fn run_resets_an_uninitialized_environment() {
    let backend = MockBackend::new(1_000);
    let mut driver = SingleEnvDriver::initialize(&backend, &EnvConfig::default()).unwrap();
    assert_eq!(driver.state(), SlotState::Uninitialized);
    driver.run(3).unwrap();
    assert_eq!(backend.ops()[0], Op::Reset(42));
}

#[test]
fn handle_is_released_on_drop_and_on_error() {
    let backend = MockBackend::new(5);
    {
        let mut driver = SingleEnvDriver::initialize(&backend, &EnvConfig::default()).unwrap();
        assert_eq!(backend.live(), 1);
        assert!(driver.step(0).is_err());
        assert_eq!(backend.live(), 1);
    }
    assert_eq!(backend.live(), 0);
}

#[test]
fn trailing_reset_is_not_timed() {
    let mut backend = MockBackend::new(1);
    backend.reset_delay = std::time::Duration::from_millis(300);
    let mut driver = SingleEnvDriver::initialize(&backend, &EnvConfig::default()).unwrap();
    let report = driver.run(1).unwrap();
    assert_eq!(report.episodes, 1);
    assert!(report.elapsed < std::time::Duration::from_millis(300));
    assert_eq!(driver.state(), SlotState::Ready);
    assert!(matches!(
        backend.ops()[..],
        [Op::Reset(42), Op::Step(42, _), Op::Done(42), Op::Reset(42)]
    ));
}
