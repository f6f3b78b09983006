//! Strategy definitions: moves, the closed set of strategy kinds, rosters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PayoffError, StrategyError};

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    pub fn opposite(self) -> Move {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }

    pub fn is_cooperate(self) -> bool {
        self == Move::Cooperate
    }

    pub fn is_defect(self) -> bool {
        self == Move::Defect
    }

    /// Single-letter code used in transcripts.
    pub fn code(self) -> char {
        match self {
            Move::Cooperate => 'C',
            Move::Defect => 'D',
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Move {
    type Err = PayoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "cooperate" => Ok(Move::Cooperate),
            "d" | "defect" => Ok(Move::Defect),
            _ => Err(PayoffError::invalid(s)),
        }
    }
}

impl TryFrom<char> for Move {
    type Error = PayoffError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'C' | 'c' => Ok(Move::Cooperate),
            'D' | 'd' => Ok(Move::Defect),
            other => Err(PayoffError::invalid(other.to_string())),
        }
    }
}

impl TryFrom<u8> for Move {
    type Error = PayoffError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        Move::try_from(b as char)
    }
}

/// The closed set of strategy variants.
///
/// Decision rules live in [`crate::player`]; this enum only carries the
/// identity and static metadata of each variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StrategyKind {
    /// Copy opponent's last move. Start with cooperate.
    TitForTat,
    /// Always defect, never cooperate.
    AlwaysDefect,
    /// Always cooperate, never defect.
    AlwaysCooperate,
    /// Tit-for-Tat that breaks out of a ten-move defection spiral.
    GenerousTitForTat,
    /// Cooperate until the opponent defects once, then always defect.
    Grudger,
    /// Tit-for-Tat with a 10% chance of unprovoked defection.
    Joss,
    /// Tit-for-Tat that defects on every 50th round.
    Graaskamp,
    /// Escalating retaliation with statistically gated fresh starts.
    TidemanChieruzzi,
    /// Plays the mode of the opponent's last five moves.
    Nydegger,
    /// Defect only if opponent defected twice in a row.
    TitForTwoTats,
    /// Random choice each round.
    Random,
    /// Retaliate with increasing defection streaks, then forgive.
    Shubik,
    /// Cooperate after mutual outcomes, defect after mixed ones.
    WinStayLoseShift,
    /// Tit-for-Two-Tats; otherwise defects only after exploiting a cooperator.
    Benjo,
    /// Cooperate after cooperation, otherwise play the opponent's mode.
    ModalTFT,
    /// Defect after cooperation, otherwise play the opponent's mode.
    ModalDefector,
    /// Cooperate while the opponent cooperated at least 70% of the last ten.
    Downing,
    /// Tit-for-Tat whose forgiveness decays toward a coin flip.
    Feld,
    /// Cooperates eleven rounds, then tracks the opponent's recent rate.
    Tullock,
    /// Tit-for-Tat that punishes random or alternating opponents.
    SteinAndRapoport,
    /// Ten rounds of cooperation, then grudging.
    Davis,
    /// Cooperate on agreement, otherwise cooperate with probability 2/7.
    Grofman,
    /// Probes with a defection and exploits opponents that do not respond.
    Tester,
    /// Defect on the first move, then cooperate forever.
    DefectOnce,
    /// Cooperate on the first move, then defect forever.
    CooperateOnce,
    /// Placeholder entry. Always cooperates.
    NameWithheld,
}

impl StrategyKind {
    /// Every strategy in canonical enumeration order.
    pub const ALL: [StrategyKind; 26] = [
        StrategyKind::TitForTat,
        StrategyKind::AlwaysDefect,
        StrategyKind::AlwaysCooperate,
        StrategyKind::GenerousTitForTat,
        StrategyKind::Grudger,
        StrategyKind::Joss,
        StrategyKind::Graaskamp,
        StrategyKind::TidemanChieruzzi,
        StrategyKind::Nydegger,
        StrategyKind::TitForTwoTats,
        StrategyKind::Random,
        StrategyKind::Shubik,
        StrategyKind::WinStayLoseShift,
        StrategyKind::Benjo,
        StrategyKind::ModalTFT,
        StrategyKind::ModalDefector,
        StrategyKind::Downing,
        StrategyKind::Feld,
        StrategyKind::Tullock,
        StrategyKind::SteinAndRapoport,
        StrategyKind::Davis,
        StrategyKind::Grofman,
        StrategyKind::Tester,
        StrategyKind::DefectOnce,
        StrategyKind::CooperateOnce,
        StrategyKind::NameWithheld,
    ];

    /// Canonical name, also the scoreboard key.
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::TitForTat => "TitForTat",
            StrategyKind::AlwaysDefect => "AlwaysDefect",
            StrategyKind::AlwaysCooperate => "AlwaysCooperate",
            StrategyKind::GenerousTitForTat => "GenerousTitForTat",
            StrategyKind::Grudger => "Grudger",
            StrategyKind::Joss => "Joss",
            StrategyKind::Graaskamp => "Graaskamp",
            StrategyKind::TidemanChieruzzi => "TidemanChieruzzi",
            StrategyKind::Nydegger => "Nydegger",
            StrategyKind::TitForTwoTats => "TitForTwoTats",
            StrategyKind::Random => "Random",
            StrategyKind::Shubik => "Shubik",
            StrategyKind::WinStayLoseShift => "WinStayLoseShift",
            StrategyKind::Benjo => "Benjo",
            StrategyKind::ModalTFT => "ModalTFT",
            StrategyKind::ModalDefector => "ModalDefector",
            StrategyKind::Downing => "Downing",
            StrategyKind::Feld => "Feld",
            StrategyKind::Tullock => "Tullock",
            StrategyKind::SteinAndRapoport => "SteinAndRapoport",
            StrategyKind::Davis => "Davis",
            StrategyKind::Grofman => "Grofman",
            StrategyKind::Tester => "Tester",
            StrategyKind::DefectOnce => "DefectOnce",
            StrategyKind::CooperateOnce => "CooperateOnce",
            StrategyKind::NameWithheld => "NameWithheld",
        }
    }

    /// Move played in round one.
    pub fn initial_move(self) -> Move {
        match self {
            StrategyKind::AlwaysDefect
            | StrategyKind::ModalDefector
            | StrategyKind::DefectOnce
            | StrategyKind::Tester => Move::Defect,
            _ => Move::Cooperate,
        }
    }

    /// Whether the strategy draws from its random source.
    pub fn is_stochastic(self) -> bool {
        matches!(
            self,
            StrategyKind::Joss
                | StrategyKind::Random
                | StrategyKind::Feld
                | StrategyKind::Tullock
                | StrategyKind::TidemanChieruzzi
                | StrategyKind::Grofman
        )
    }

    /// Get a human-readable description of a strategy
    pub fn describe(self) -> &'static str {
        match self {
            StrategyKind::TitForTat => "Copies opponent's last move. Starts by cooperating.",
            StrategyKind::AlwaysDefect => "Never cooperates. Always defects.",
            StrategyKind::AlwaysCooperate => "Never defects. Always cooperates.",
            StrategyKind::GenerousTitForTat => {
                "Tit for Tat, but cooperates after ten consecutive own defections."
            }
            StrategyKind::Grudger => "Cooperates until betrayed once, then always defects.",
            StrategyKind::Joss => "Tit for Tat with a 10% chance of defecting anyway.",
            StrategyKind::Graaskamp => "Tit for Tat that defects every 50th round.",
            StrategyKind::TidemanChieruzzi => {
                "Escalating retaliation with a statistically gated fresh start."
            }
            StrategyKind::Nydegger => {
                "Cooperates for four rounds, then plays the mode of the opponent's last five moves."
            }
            StrategyKind::TitForTwoTats => "Only retaliates after two consecutive defections.",
            StrategyKind::Random => "Randomly cooperates or defects each round.",
            StrategyKind::Shubik => "Retaliates one round longer after each new defection.",
            StrategyKind::WinStayLoseShift => {
                "Cooperates after mutual cooperation or mutual defection, defects otherwise."
            }
            StrategyKind::Benjo => {
                "Defects after two opponent defections or after a round it won outright."
            }
            StrategyKind::ModalTFT => {
                "Cooperates after cooperation, otherwise plays the opponent's most common move."
            }
            StrategyKind::ModalDefector => {
                "Defects after cooperation, otherwise plays the opponent's most common move."
            }
            StrategyKind::Downing => {
                "Cooperates while the opponent cooperated in at least 7 of the last 10 rounds."
            }
            StrategyKind::Feld => "Retaliates always, forgives less and less over time.",
            StrategyKind::Tullock => {
                "Cooperates 11 rounds, then cooperates 10% less often than the opponent."
            }
            StrategyKind::SteinAndRapoport => {
                "Tit for Tat that defects against random or alternating opponents."
            }
            StrategyKind::Davis => "Cooperates 10 rounds, then defects forever once betrayed.",
            StrategyKind::Grofman => {
                "Cooperates when both moved alike, otherwise cooperates 2 times in 7."
            }
            StrategyKind::Tester => {
                "Opens with a defection; punished it plays Tit for Tat, unpunished it alternates."
            }
            StrategyKind::DefectOnce => "Defects on the first move, then always cooperates.",
            StrategyKind::CooperateOnce => "Cooperates on the first move, then always defects.",
            StrategyKind::NameWithheld => "Placeholder entry. Always cooperates.",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = StrategyError;

    /// Case- and punctuation-insensitive: `tit-for-tat` parses as `TitForTat`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        if let Some(kind) = StrategyKind::ALL
            .iter()
            .find(|k| normalize(k.name()) == wanted)
        {
            return Ok(*kind);
        }
        match wanted.as_str() {
            "friedman" | "grimtrigger" => Ok(StrategyKind::Grudger),
            "winstaylooseshift" | "pavlov" => Ok(StrategyKind::WinStayLoseShift),
            "softtitfortat" => Ok(StrategyKind::GenerousTitForTat),
            _ => Err(StrategyError::UnknownStrategy { name: s.to_string() }),
        }
    }
}

impl TryFrom<String> for StrategyKind {
    type Error = StrategyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StrategyKind> for String {
    fn from(kind: StrategyKind) -> Self {
        kind.name().to_string()
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Predefined strategy rosters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Roster {
    /// Every strategy, canonical order.
    All,
    /// The roster without random elements.
    #[serde(alias = "non-random", alias = "nonrandom")]
    Deterministic,
    /// The classic roster including random elements.
    #[serde(alias = "random")]
    Stochastic,
}

impl Roster {
    pub fn strategies(self) -> Vec<StrategyKind> {
        use StrategyKind::*;
        match self {
            Roster::All => StrategyKind::ALL.to_vec(),
            Roster::Deterministic => vec![
                TitForTat,
                AlwaysDefect,
                GenerousTitForTat,
                ModalTFT,
                AlwaysCooperate,
                Grudger,
                Graaskamp,
                Nydegger,
                DefectOnce,
                TitForTwoTats,
                WinStayLoseShift,
                Benjo,
                Shubik,
                Downing,
            ],
            Roster::Stochastic => vec![
                TitForTat,
                AlwaysDefect,
                GenerousTitForTat,
                Joss,
                TidemanChieruzzi,
                Random,
                AlwaysCooperate,
                Grudger,
                Graaskamp,
                Nydegger,
                DefectOnce,
                Downing,
                TitForTwoTats,
                WinStayLoseShift,
                Benjo,
                Shubik,
                ModalTFT,
            ],
        }
    }
}

impl FromStr for Roster {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "all" => Ok(Roster::All),
            "deterministic" | "nonrandom" => Ok(Roster::Deterministic),
            "stochastic" | "random" => Ok(Roster::Stochastic),
            _ => Err(StrategyError::UnknownStrategy { name: s.to_string() }),
        }
    }
}
