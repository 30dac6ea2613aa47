//! Discrete actions and action sets.
use rand::Rng;
use std::{fmt, sync::Arc};

/// Joystick actions understood by the Arcade Learning Environment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum AleAction {
    Noop = 0,
    Fire = 1,
    Up = 2,
    Right = 3,
    Left = 4,
    Down = 5,
    UpRight = 6,
    UpLeft = 7,
    DownRight = 8,
    DownLeft = 9,
    UpFire = 10,
    RightFire = 11,
    LeftFire = 12,
    DownFire = 13,
    UpRightFire = 14,
    UpLeftFire = 15,
    DownRightFire = 16,
    DownLeftFire = 17,
}

impl AleAction {
    /// All 18 legal actions in id order.
    pub const LEGAL: [AleAction; 18] = [
        AleAction::Noop,
        AleAction::Fire,
        AleAction::Up,
        AleAction::Right,
        AleAction::Left,
        AleAction::Down,
        AleAction::UpRight,
        AleAction::UpLeft,
        AleAction::DownRight,
        AleAction::DownLeft,
        AleAction::UpFire,
        AleAction::RightFire,
        AleAction::LeftFire,
        AleAction::DownFire,
        AleAction::UpRightFire,
        AleAction::UpLeftFire,
        AleAction::DownRightFire,
        AleAction::DownLeftFire,
    ];

    pub fn id(self) -> i32 {
        self as i32
    }
}

/// Ordered collection of the legal action ids of a game.
///
/// The set is immutable once obtained from a backend. Clones share the same
/// underlying buffer, so it can be handed to every caller read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSet(Arc<[i32]>);

impl ActionSet {
    pub fn new(actions: impl Into<Vec<i32>>) -> Self {
        Self(actions.into().into())
    }

    /// The full legal set of 18 actions.
    pub fn legal() -> Self {
        Self::new(
            AleAction::LEGAL
                .iter()
                .map(|a| a.id())
                .collect::<Vec<_>>(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, action: i32) -> bool {
        self.0.contains(&action)
    }

    pub fn get(&self, ix: usize) -> Option<i32> {
        self.0.get(ix).copied()
    }

    /// Position of `action` in the set.
    pub fn index_of(&self, action: i32) -> Option<usize> {
        self.0.iter().position(|&a| a == action)
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    /// Draws an action uniformly at random.
    ///
    /// Panics if the set is empty; backends never advertise an empty set.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        self.0[rng.gen_range(0..self.0.len())]
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}
