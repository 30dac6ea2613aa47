#![allow(dead_code)]
use ale_driver::{
    ActionSet, AleError, Backend, Emulator, EnvConfig, Observation, Result, SlotReset,
    StepOutcome, VecEmulator, VecStep,
};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    thread,
    time::Duration,
};

/// Calls observed by the mock, tagged with the environment's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Reset(i32),
    Step(i32, i32),
    Done(i32),
}

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Backend whose episodes last exactly `episode_len` steps and whose reward
/// echoes the action. It performs no checks of its own.
#[derive(Clone)]
pub struct MockBackend {
    pub live: Arc<AtomicUsize>,
    pub log: Arc<Mutex<Vec<Op>>>,
    pub episode_len: u32,
    pub fail_at_slot: Option<usize>,

    /// Seed of the environment whose first step fails.
    pub fail_first_step_of: Option<i32>,

    /// Time every reset takes.
    pub reset_delay: Duration,
}

impl MockBackend {
    pub fn new(episode_len: u32) -> Self {
        MockBackend {
            live: Arc::new(AtomicUsize::new(0)),
            log: Arc::new(Mutex::new(vec![])),
            episode_len,
            fail_at_slot: None,
            fail_first_step_of: None,
            reset_delay: Duration::from_millis(0),
        }
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn ops(&self) -> Vec<Op> {
        self.log.lock().unwrap().clone()
    }

    /// Operations addressed to the environment seeded with `seed`.
    pub fn ops_of(&self, seed: i32) -> Vec<Op> {
        self.ops()
            .into_iter()
            .filter(|op| match op {
                Op::Reset(s) | Op::Step(s, _) | Op::Done(s) => *s == seed,
            })
            .collect()
    }

    fn make(&self, config: &EnvConfig) -> MockEnv {
        self.live.fetch_add(1, Ordering::SeqCst);
        MockEnv {
            seed: config.seed,
            frames: 0,
            score: 0,
            episode_len: self.episode_len,
            fail_next_step: self.fail_first_step_of == Some(config.seed),
            reset_delay: self.reset_delay,
            live: self.live.clone(),
            log: self.log.clone(),
        }
    }
}

pub struct MockEnv {
    pub seed: i32,
    pub frames: u32,
    score: i32,
    episode_len: u32,
    fail_next_step: bool,
    reset_delay: Duration,
    live: Arc<AtomicUsize>,
    log: Arc<Mutex<Vec<Op>>>,
}

impl MockEnv {
    fn record(&self, op: Op) {
        self.log.lock().unwrap().push(op);
    }
}

impl Emulator for MockEnv {
    fn action_set(&self) -> ActionSet {
        ActionSet::new(vec![0, 1, 3, 4])
    }

    fn reset(&mut self) -> Result<Observation> {
        self.record(Op::Reset(self.seed));
        thread::sleep(self.reset_delay);
        self.frames = 0;
        self.score = 0;
        Ok(self.obs())
    }

    fn step(&mut self, action: i32) -> Result<StepOutcome> {
        if self.fail_next_step {
            self.fail_next_step = false;
            return Err(AleError::Backend(format!("environment {} crashed", self.seed)));
        }
        self.record(Op::Step(self.seed, action));
        self.frames += 1;
        self.score += action;
        let terminal = self.frames >= self.episode_len;
        if terminal {
            self.record(Op::Done(self.seed));
        }
        Ok(StepOutcome {
            reward: action,
            terminal,
            truncation: false,
            life_loss: terminal,
        })
    }

    fn obs(&mut self) -> Observation {
        vec![self.frames as u8; 4]
    }

    fn score(&self) -> i32 {
        self.score
    }
}

impl Drop for MockEnv {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Sequential batch without any validation of its own.
pub struct MockVec {
    pub envs: Vec<MockEnv>,
}

impl VecEmulator for MockVec {
    fn batch_size(&self) -> usize {
        self.envs.len()
    }

    fn action_space(&self) -> ActionSet {
        self.envs[0].action_set()
    }

    fn reset(&mut self) -> Result<Vec<SlotReset>> {
        self.envs
            .iter_mut()
            .enumerate()
            .map(|(index, e)| e.reset().map(|obs| SlotReset { index, obs }))
            .collect()
    }

    fn reset_slot(&mut self, index: usize) -> Result<Observation> {
        self.envs[index].reset()
    }

    fn step(&mut self, actions: &[i32]) -> Result<Vec<VecStep>> {
        self.envs
            .iter_mut()
            .zip(actions)
            .enumerate()
            .map(|(index, (e, &a))| -> Result<VecStep> {
                let o = e.step(a)?;
                Ok(VecStep {
                    index,
                    obs: e.obs(),
                    reward: o.reward,
                    terminal: o.terminal,
                    truncation: o.truncation,
                    life_loss: o.life_loss,
                    score: e.score(),
                })
            })
            .collect()
    }
}

impl Backend for MockBackend {
    type Env = MockEnv;
    type VecEnv = MockVec;

    fn construct_single(&self, config: &EnvConfig) -> Result<MockEnv> {
        Ok(self.make(config))
    }

    fn construct_vector(&self, batch_size: usize, config: &EnvConfig) -> Result<MockVec> {
        let envs = (0..batch_size)
            .map(|i| {
                if self.fail_at_slot == Some(i) {
                    Err(AleError::Initialization(format!("slot {} failed", i)))
                } else {
                    config.for_slot(i).map(|c| self.make(&c))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(MockVec { envs })
    }
}

/// Checks that every `Done` of an environment is followed by a `Reset` of it
/// before any further `Step`.
pub fn assert_reset_after_done(ops: &[Op]) {
    let mut finished = std::collections::HashSet::new();
    for op in ops {
        match *op {
            Op::Done(s) => {
                finished.insert(s);
            }
            Op::Reset(s) => {
                finished.remove(&s);
            }
            Op::Step(s, _) => assert!(!finished.contains(&s), "environment {} stepped after done", s),
        }
    }
}
