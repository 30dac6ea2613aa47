//! Catalog of the Atari 2600 games known to the Arcade Learning Environment.
use crate::error::{AleError, Result};
use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A game of the standard ALE ROM set.
///
/// The snake_case name of a variant is the game name accepted by
/// [`EnvConfig::game`](crate::EnvConfig::game), e.g. `"breakout"` or `"ms_pacman"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum BundledRom {
    Adventure,
    AirRaid,
    Alien,
    Amidar,
    Assault,
    Asterix,
    Asteroids,
    Atlantis,
    #[strum(serialize = "atlantis2")]
    Atlantis2,
    Backgammon,
    BankHeist,
    BasicMath,
    BattleZone,
    BeamRider,
    Berzerk,
    Blackjack,
    Bowling,
    Boxing,
    Breakout,
    Carnival,
    Casino,
    Centipede,
    ChopperCommand,
    Combat,
    CrazyClimber,
    Crossbow,
    Darkchambers,
    Defender,
    DemonAttack,
    DonkeyKong,
    DoubleDunk,
    Earthworld,
    ElevatorAction,
    Enduro,
    Entombed,
    Et,
    FishingDerby,
    FlagCapture,
    Freeway,
    Frogger,
    Frostbite,
    Galaxian,
    Gopher,
    Gravitar,
    Hangman,
    HauntedHouse,
    Hero,
    HumanCannonball,
    IceHockey,
    Jamesbond,
    JourneyEscape,
    Joust,
    Kaboom,
    Kangaroo,
    KeystoneKapers,
    KingKong,
    Klax,
    Koolaid,
    Krull,
    KungFuMaster,
    LaserGates,
    LostLuggage,
    MarioBros,
    MazeCraze,
    MiniatureGolf,
    MontezumaRevenge,
    MrDo,
    MsPacman,
    NameThisGame,
    Othello,
    Pacman,
    Phoenix,
    Pitfall,
    #[strum(serialize = "pitfall2")]
    Pitfall2,
    Pong,
    Pooyan,
    PrivateEye,
    Qbert,
    Riverraid,
    RoadRunner,
    Robotank,
    Seaquest,
    SirLancelot,
    Skiing,
    Solaris,
    SpaceInvaders,
    SpaceWar,
    StarGunner,
    Superman,
    Surround,
    Tennis,
    Tetris,
    #[strum(serialize = "tic_tac_toe_3d")]
    TicTacToe3d,
    TimePilot,
    Trondead,
    Turmoil,
    Tutankham,
    #[strum(serialize = "up_n_down")]
    UpNDown,
    Venture,
    VideoCheckers,
    VideoChess,
    VideoCube,
    VideoPinball,
    Warlords,
    WizardOfWor,
    WordZapper,
    YarsRevenge,
    Zaxxon,
}

impl BundledRom {
    /// Looks a game up by name.
    pub fn from_name(name: &str) -> Result<Self> {
        BundledRom::from_str(name)
            .map_err(|_| AleError::Initialization(format!("unknown game: {:?}", name)))
    }

    /// Returns the name of the game.
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// Returns the filename that the ROM should be named, in order for the ALE to pick up on it and
    /// use the correct settings.
    pub fn filename(&self) -> String {
        format!("{}.bin", self.name())
    }

    /// Iterates over every game in the catalog.
    pub fn all() -> impl Iterator<Item = BundledRom> {
        BundledRom::iter()
    }
}
