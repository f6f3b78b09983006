//! Strategy execution: the stateful player behind every strategy kind
//!
//! A [`Player`] is built fresh for each match. After every round the match
//! engine records the outcome and then asks the player for its next move,
//! so the decision for round k+1 always sees the result of round k.

use rand::Rng;

use crate::history::History;
use crate::payoff::{payoff_type, score, PayoffType};
use crate::random::SeededRng;
use crate::stats::{
    check_randomness, compare_samples, is_alternating_pattern, mode, random_5050_sample,
};
use crate::strategy::{Move, StrategyKind};

const JOSS_DEFECT_PROBABILITY: f64 = 0.1;
const GRAASKAMP_PERIOD: u64 = 50;
const GENEROUS_WINDOW: usize = 10;
const NYDEGGER_WINDOW: usize = 5;
const DOWNING_WINDOW: usize = 10;
const DOWNING_MIN_COOPERATIONS: usize = 7;
const DAVIS_OPENING: usize = 10;
const FELD_DECAY: f64 = 0.0025;
const FELD_FLOOR: f64 = 0.5;
const TULLOCK_OPENING: usize = 11;
const TULLOCK_PERIOD: usize = 10;
const GROFMAN_COOPERATION: f64 = 2.0 / 7.0;

// Matches are assumed to last 200 rounds.
const TIDEMAN_POINT_MARGIN: i64 = 10;
const TIDEMAN_FRESH_START_GAP: usize = 20;
const TIDEMAN_HORIZON: usize = 190;
const TIDEMAN_BASELINE_COOPERATION: f64 = 0.7;
const STEIN_OPENING: usize = 4;
const STEIN_CHECK_PERIOD: usize = 15;
const STEIN_ENDGAME: usize = 198;

/// The capability every participant in a match provides.
pub trait Strategy {
    /// Display name, used as the scoreboard key.
    fn name(&self) -> &str;

    /// Move to be played in the upcoming round.
    fn current_move(&self) -> Move;

    /// Moves recorded so far, own and opponent.
    fn history(&self) -> &History;

    /// Append the moves actually played this round.
    fn record_outcome(&mut self, own: Move, opponent: Move);

    /// Compute, store and return the move for the next round.
    fn decide_next_move(&mut self) -> Move;
}

/// State kept by Tideman and Chieruzzi between rounds.
#[derive(Clone, Debug, Default, PartialEq)]
struct TidemanState {
    own_points: u64,
    opponent_points: u64,
    retaliation_length: u32,
    retaliation_remaining: u32,
    last_fresh_start: usize,
    fresh_start_remaining: u32,
}

/// Variant-specific counters.
#[derive(Clone, Debug, PartialEq)]
enum Memory {
    Stateless,
    Graaskamp { round: u64 },
    Shubik { retaliations: u32, counter: u32 },
    Feld { cooperation_probability: f64 },
    Tullock { cooperation_probability: f64, held: Move },
    Tideman(TidemanState),
    SteinAndRapoport { opponent_random: bool },
}

impl Memory {
    fn for_kind(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Graaskamp => Memory::Graaskamp { round: 1 },
            StrategyKind::Shubik => Memory::Shubik { retaliations: 0, counter: 0 },
            StrategyKind::Feld => Memory::Feld { cooperation_probability: 1.0 },
            StrategyKind::Tullock => Memory::Tullock {
                cooperation_probability: 1.0,
                held: Move::Cooperate,
            },
            StrategyKind::TidemanChieruzzi => Memory::Tideman(TidemanState::default()),
            StrategyKind::SteinAndRapoport => Memory::SteinAndRapoport { opponent_random: false },
            _ => Memory::Stateless,
        }
    }
}

/// A strategy instance: identity, current move, history and counters.
#[derive(Clone, Debug)]
pub struct Player {
    kind: StrategyKind,
    current: Move,
    history: History,
    memory: Memory,
    rng: SeededRng,
}

impl Player {
    pub fn new(kind: StrategyKind, rng: SeededRng) -> Self {
        Self {
            kind,
            current: kind.initial_move(),
            history: History::new(),
            memory: Memory::for_kind(kind),
            rng,
        }
    }

    /// Build a player whose history is already populated, for inspecting
    /// decisions from a chosen position. Point tallies and round counters
    /// are derived from the history; other counters start fresh.
    pub fn with_history(kind: StrategyKind, own: &[Move], opponent: &[Move], rng: SeededRng) -> Self {
        let mut player = Self::new(kind, rng);
        player.history = History::from_moves(own, opponent);
        let rounds = player.history.len();

        match &mut player.memory {
            Memory::Graaskamp { round } => *round = rounds.max(1) as u64,
            Memory::Tideman(state) => {
                for (own, opp) in player.history.rounds() {
                    state.own_points += u64::from(score(own, opp));
                    state.opponent_points += u64::from(score(opp, own));
                }
            }
            _ => {}
        }
        if let Some(last) = player.history.last_own() {
            player.current = last;
        }
        player
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    fn decide(&mut self) -> Move {
        let history = &self.history;
        match self.kind {
            StrategyKind::AlwaysCooperate | StrategyKind::NameWithheld => Move::Cooperate,
            StrategyKind::AlwaysDefect => Move::Defect,
            StrategyKind::TitForTat => tit_for_tat(history),
            StrategyKind::GenerousTitForTat => generous_tit_for_tat(history),
            StrategyKind::Grudger => grudger(history),
            StrategyKind::Joss => {
                if self.rng.gen_bool(JOSS_DEFECT_PROBABILITY) {
                    Move::Defect
                } else {
                    tit_for_tat(history)
                }
            }
            StrategyKind::Graaskamp => match &mut self.memory {
                Memory::Graaskamp { round } => graaskamp(history, round),
                _ => tit_for_tat(history),
            },
            StrategyKind::Nydegger => nydegger(history),
            StrategyKind::TitForTwoTats => tit_for_two_tats(history),
            StrategyKind::Random => {
                if self.rng.gen_bool(0.5) {
                    Move::Cooperate
                } else {
                    Move::Defect
                }
            }
            StrategyKind::Shubik => match &mut self.memory {
                Memory::Shubik { retaliations, counter } => shubik(history, retaliations, counter),
                _ => tit_for_tat(history),
            },
            StrategyKind::WinStayLoseShift => win_stay_lose_shift(history),
            StrategyKind::Benjo => benjo(history),
            StrategyKind::ModalTFT => modal_tft(history),
            StrategyKind::ModalDefector => modal_defector(history),
            StrategyKind::Downing => downing(history),
            StrategyKind::Feld => match &mut self.memory {
                Memory::Feld { cooperation_probability } => {
                    feld(history, cooperation_probability, &mut self.rng)
                }
                _ => tit_for_tat(history),
            },
            StrategyKind::Tullock => match &mut self.memory {
                Memory::Tullock { cooperation_probability, held } => {
                    tullock(history, cooperation_probability, held, &mut self.rng)
                }
                _ => Move::Cooperate,
            },
            StrategyKind::TidemanChieruzzi => match &mut self.memory {
                Memory::Tideman(state) => tideman_chieruzzi(history, state, &mut self.rng),
                _ => tit_for_tat(history),
            },
            StrategyKind::SteinAndRapoport => match &mut self.memory {
                Memory::SteinAndRapoport { opponent_random } => {
                    stein_and_rapoport(history, opponent_random)
                }
                _ => tit_for_tat(history),
            },
            StrategyKind::Davis => davis(history),
            StrategyKind::Grofman => grofman(history, &mut self.rng),
            StrategyKind::Tester => tester(history),
            StrategyKind::DefectOnce => Move::Cooperate,
            StrategyKind::CooperateOnce => Move::Defect,
        }
    }
}

impl Strategy for Player {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn current_move(&self) -> Move {
        self.current
    }

    fn history(&self) -> &History {
        &self.history
    }

    fn record_outcome(&mut self, own: Move, opponent: Move) {
        self.history.record(own, opponent);
        if let Memory::Tideman(state) = &mut self.memory {
            state.own_points += u64::from(score(own, opponent));
            state.opponent_points += u64::from(score(opponent, own));
        }
    }

    fn decide_next_move(&mut self) -> Move {
        self.current = self.decide();
        self.current
    }
}

/// Tit-for-Tat: copy opponent's last move, start with cooperate
fn tit_for_tat(history: &History) -> Move {
    history.last_opponent().unwrap_or(Move::Cooperate)
}

/// Mirror, unless the last ten own moves were all defections.
fn generous_tit_for_tat(history: &History) -> Move {
    let recent = history.recent_own(GENEROUS_WINDOW);
    if recent.len() == GENEROUS_WINDOW && recent.iter().all(|m| m.is_defect()) {
        return Move::Cooperate;
    }
    tit_for_tat(history)
}

/// Grudger: cooperate until the opponent defects once, anywhere in history
fn grudger(history: &History) -> Move {
    if history.opponent().iter().any(|m| m.is_defect()) {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

fn graaskamp(history: &History, round: &mut u64) -> Move {
    let decision = if *round % GRAASKAMP_PERIOD == 0 {
        Move::Defect
    } else {
        tit_for_tat(history)
    };
    *round += 1;
    decision
}

fn nydegger(history: &History) -> Move {
    if history.len() < NYDEGGER_WINDOW {
        return Move::Cooperate;
    }
    mode(history.recent_opponent(NYDEGGER_WINDOW))
}

/// Tit-for-Two-Tats: defect only after two consecutive defections
fn tit_for_two_tats(history: &History) -> Move {
    let recent = history.recent_opponent(2);
    if recent.len() == 2 && recent.iter().all(|m| m.is_defect()) {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Each new opponent defection lengthens the retaliation by one round.
fn shubik(history: &History, retaliations: &mut u32, counter: &mut u32) -> Move {
    if history.last_opponent() == Some(Move::Defect) {
        *retaliations += 1;
        *counter = *retaliations;
    }
    if *counter > 0 {
        *counter -= 1;
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Stay on cooperate after a mutual outcome (R or P), shift to defect
/// after an asymmetric one (S or T).
fn win_stay_lose_shift(history: &History) -> Move {
    match (history.last_own(), history.last_opponent()) {
        (Some(own), Some(opp)) if !payoff_type(own, opp).is_mutual() => Move::Defect,
        _ => Move::Cooperate,
    }
}

/// Tit-for-two-tats first. A lone defection against its cooperation is
/// forgiven; only a round it won outright (T) shifts it to D.
fn benjo(history: &History) -> Move {
    if tit_for_two_tats(history).is_defect() {
        return Move::Defect;
    }
    match (history.last_own(), history.last_opponent()) {
        (Some(own), Some(opp)) if payoff_type(own, opp) == PayoffType::T => Move::Defect,
        _ => Move::Cooperate,
    }
}

fn modal_tft(history: &History) -> Move {
    match history.last_opponent() {
        None | Some(Move::Cooperate) => Move::Cooperate,
        Some(Move::Defect) => mode(history.opponent()),
    }
}

fn modal_defector(history: &History) -> Move {
    match history.last_opponent() {
        None => Move::Defect,
        Some(Move::Cooperate) => Move::Defect,
        Some(Move::Defect) => mode(history.opponent()),
    }
}

fn downing(history: &History) -> Move {
    if history.len() < DOWNING_WINDOW {
        return Move::Cooperate;
    }
    let cooperations = history
        .recent_opponent(DOWNING_WINDOW)
        .iter()
        .filter(|m| m.is_cooperate())
        .count();
    if cooperations >= DOWNING_MIN_COOPERATIONS {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// Retaliate always; forgive with a probability decaying toward 0.5.
fn feld<R: Rng>(history: &History, cooperation_probability: &mut f64, rng: &mut R) -> Move {
    let decision = match history.last_opponent() {
        Some(Move::Defect) => Move::Defect,
        _ => {
            if rng.gen_bool(cooperation_probability.clamp(0.0, 1.0)) {
                Move::Cooperate
            } else {
                Move::Defect
            }
        }
    };
    *cooperation_probability = (*cooperation_probability - FELD_DECAY).max(FELD_FLOOR);
    decision
}

/// Cooperate through the opening, then every tenth round resample at
/// 10% below the opponent's recent cooperation rate. The sampled move is
/// held until the next resample.
fn tullock<R: Rng>(
    history: &History,
    cooperation_probability: &mut f64,
    held: &mut Move,
    rng: &mut R,
) -> Move {
    let len = history.len();
    if len < TULLOCK_OPENING {
        return Move::Cooperate;
    }
    if (len - TULLOCK_OPENING) % TULLOCK_PERIOD == 0 {
        let cooperations = history
            .recent_opponent(TULLOCK_PERIOD)
            .iter()
            .filter(|m| m.is_cooperate())
            .count() as f64;
        *cooperation_probability = ((cooperations - 1.0) / TULLOCK_PERIOD as f64).max(0.0);
        *held = if rng.gen_bool(*cooperation_probability) {
            Move::Cooperate
        } else {
            Move::Defect
        };
    }
    *held
}

fn tideman_chieruzzi<R: Rng>(history: &History, state: &mut TidemanState, rng: &mut R) -> Move {
    let len = history.len();
    if len == 0 {
        return Move::Cooperate;
    }

    if state.fresh_start_remaining > 0 {
        state.fresh_start_remaining -= 1;
        return Move::Cooperate;
    }

    if fresh_start_due(history, state, rng) {
        state.retaliation_length = 0;
        state.retaliation_remaining = 0;
        state.last_fresh_start = len;
        state.fresh_start_remaining = 1;
        return Move::Cooperate;
    }

    let opponent = history.opponent();
    if opponent[len - 1].is_defect() {
        let new_run = len < 2 || opponent[len - 2].is_cooperate();
        if new_run {
            state.retaliation_length += 1;
            state.retaliation_remaining = state.retaliation_length;
        }
        state.retaliation_remaining = state.retaliation_remaining.saturating_sub(1);
        return Move::Defect;
    }

    if state.retaliation_remaining > 0 {
        state.retaliation_remaining -= 1;
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// All fresh-start conditions; the statistical test runs last.
fn fresh_start_due<R: Rng>(history: &History, state: &TidemanState, rng: &mut R) -> bool {
    let len = history.len();
    let margin = state.own_points as i64 - state.opponent_points as i64;
    let recent_own = history.recent_own(2);

    margin >= TIDEMAN_POINT_MARGIN
        && recent_own.len() == 2
        && recent_own.iter().all(|m| m.is_defect())
        && len - state.last_fresh_start >= TIDEMAN_FRESH_START_GAP
        && len < TIDEMAN_HORIZON
        && {
            let baseline = random_5050_sample(len, TIDEMAN_BASELINE_COOPERATION, rng);
            compare_samples(history.own(), &baseline)
        }
}

fn stein_and_rapoport(history: &History, opponent_random: &mut bool) -> Move {
    let len = history.len();
    if len < STEIN_OPENING {
        return Move::Cooperate;
    }
    if len >= STEIN_ENDGAME {
        return Move::Defect;
    }
    if len % STEIN_CHECK_PERIOD == 0 {
        let opponent = history.opponent();
        *opponent_random = check_randomness(opponent) || is_alternating_pattern(opponent);
    }
    if *opponent_random {
        Move::Defect
    } else {
        tit_for_tat(history)
    }
}

fn davis(history: &History) -> Move {
    if history.len() < DAVIS_OPENING {
        return Move::Cooperate;
    }
    grudger(history)
}

fn grofman<R: Rng>(history: &History, rng: &mut R) -> Move {
    match (history.last_own(), history.last_opponent()) {
        (Some(own), Some(opp)) if own != opp => {
            if rng.gen_bool(GROFMAN_COOPERATION) {
                Move::Cooperate
            } else {
                Move::Defect
            }
        }
        _ => Move::Cooperate,
    }
}

/// Punished for the opening defection: play Tit-for-Tat. Otherwise
/// alternate against the pushover.
fn tester(history: &History) -> Move {
    match history.opponent().first() {
        None => Move::Defect,
        Some(Move::Defect) => tit_for_tat(history),
        Some(Move::Cooperate) => history
            .last_own()
            .map_or(Move::Cooperate, Move::opposite),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: Move = Move::Cooperate;
    const D: Move = Move::Defect;

    fn rng() -> SeededRng {
        SeededRng::new(42, 0)
    }

    fn fresh(kind: StrategyKind) -> Player {
        Player::new(kind, rng())
    }

    /// Decision after seeding the given history.
    fn decide_after(kind: StrategyKind, own: &[Move], opponent: &[Move]) -> Move {
        Player::with_history(kind, own, opponent, rng()).decide_next_move()
    }

    /// Play `player` against a fixed opponent script, returning own moves.
    fn play_script(player: &mut Player, opponent: &[Move]) -> Vec<Move> {
        let mut moves = Vec::with_capacity(opponent.len());
        for &opp in opponent {
            let own = player.current_move();
            moves.push(own);
            player.record_outcome(own, opp);
            player.decide_next_move();
        }
        moves
    }

    #[test]
    fn test_initial_moves_follow_kind() {
        for kind in StrategyKind::ALL {
            let player = fresh(kind);
            assert_eq!(player.current_move(), kind.initial_move(), "{}", kind);
            assert!(player.history().is_empty());
            assert_eq!(player.name(), kind.name());
        }
    }

    #[test]
    fn test_constant_strategies() {
        let mut ac = fresh(StrategyKind::AlwaysCooperate);
        let mut ad = fresh(StrategyKind::AlwaysDefect);
        assert!(play_script(&mut ac, &[D; 20]).iter().all(|m| *m == C));
        assert!(play_script(&mut ad, &[C; 20]).iter().all(|m| *m == D));
    }

    #[test]
    fn test_name_withheld_is_cooperative_stub() {
        let mut player = fresh(StrategyKind::NameWithheld);
        let opponent: Vec<Move> = (0..30).map(|i| if i % 3 == 0 { D } else { C }).collect();
        assert!(play_script(&mut player, &opponent).iter().all(|m| *m == C));
    }

    #[test]
    fn test_tit_for_tat_idempotence() {
        let mut tft = fresh(StrategyKind::TitForTat);
        let mut opponent = vec![C; 50];
        opponent.push(D);
        opponent.extend([C, C, C]);
        let moves = play_script(&mut tft, &opponent);
        assert!(moves[..51].iter().all(|m| *m == C));
        assert_eq!(moves[51], D);
        assert_eq!(moves[52], C);
        assert_eq!(tft.current_move(), C);
    }

    #[test]
    fn test_tit_for_tat_guards_empty_history() {
        assert_eq!(decide_after(StrategyKind::TitForTat, &[], &[]), C);
    }

    #[test]
    fn test_generous_forgives_own_defection_spiral() {
        assert_eq!(decide_after(StrategyKind::GenerousTitForTat, &[D; 10], &[D; 10]), C);
        assert_eq!(decide_after(StrategyKind::GenerousTitForTat, &[D; 9], &[D; 9]), D);

        let mut own = vec![C];
        own.extend([D; 9]);
        assert_eq!(decide_after(StrategyKind::GenerousTitForTat, &own, &[D; 10]), D);
        assert_eq!(decide_after(StrategyKind::GenerousTitForTat, &[C; 3], &[C, C, C]), C);
    }

    #[test]
    fn test_grudger_never_forgives() {
        let mut grudger = fresh(StrategyKind::Grudger);
        let mut opponent = vec![C; 5];
        opponent.push(D);
        opponent.extend([C; 30]);
        let moves = play_script(&mut grudger, &opponent);
        assert!(moves[..6].iter().all(|m| *m == C));
        assert!(moves[6..].iter().all(|m| *m == D));
    }

    #[test]
    fn test_grudger_scans_full_history() {
        let mut opponent = vec![D];
        opponent.extend([C; 99]);
        assert_eq!(decide_after(StrategyKind::Grudger, &[C; 100], &opponent), D);
    }

    #[test]
    fn test_joss_defects_about_ten_percent() {
        let mut joss = Player::new(StrategyKind::Joss, SeededRng::new(3, 0));
        let moves = play_script(&mut joss, &[C; 5_000]);
        let defections = moves.iter().filter(|m| m.is_defect()).count();
        assert!(defections > 350 && defections < 650, "{} defections", defections);
    }

    #[test]
    fn test_joss_retaliates() {
        let mut joss = Player::new(StrategyKind::Joss, SeededRng::new(3, 0));
        assert!(play_script(&mut joss, &[D; 100])[1..].iter().all(|m| *m == D));
    }

    #[test]
    fn test_graaskamp_defects_on_fiftieth_round() {
        let mut graaskamp = fresh(StrategyKind::Graaskamp);
        let moves = play_script(&mut graaskamp, &[C; 60]);
        for (i, m) in moves.iter().enumerate() {
            let expected = if i == 50 { D } else { C };
            assert_eq!(*m, expected, "round {}", i);
        }
    }

    #[test]
    fn test_graaskamp_mirrors_between_checkpoints() {
        assert_eq!(decide_after(StrategyKind::Graaskamp, &[C; 3], &[C, C, D]), D);
        assert_eq!(decide_after(StrategyKind::Graaskamp, &[C; 3], &[D, D, C]), C);
    }

    #[test]
    fn test_nydegger_mode_of_last_five() {
        assert_eq!(decide_after(StrategyKind::Nydegger, &[C; 4], &[D; 4]), C);
        assert_eq!(decide_after(StrategyKind::Nydegger, &[C; 5], &[D, D, D, C, C]), D);
        assert_eq!(decide_after(StrategyKind::Nydegger, &[C; 6], &[D, C, C, D, D, C]), C);
    }

    #[test]
    fn test_tit_for_two_tats() {
        assert_eq!(decide_after(StrategyKind::TitForTwoTats, &[C], &[D]), C);
        assert_eq!(decide_after(StrategyKind::TitForTwoTats, &[C, C], &[C, D]), C);
        assert_eq!(decide_after(StrategyKind::TitForTwoTats, &[C, C], &[D, D]), D);
        assert_eq!(decide_after(StrategyKind::TitForTwoTats, &[C, C, D], &[D, D, C]), C);
    }

    #[test]
    fn test_random_is_reproducible_and_mixed() {
        let mut a = Player::new(StrategyKind::Random, SeededRng::new(9, 1));
        let mut b = Player::new(StrategyKind::Random, SeededRng::new(9, 1));
        let moves_a = play_script(&mut a, &[C; 200]);
        let moves_b = play_script(&mut b, &[C; 200]);
        assert_eq!(moves_a, moves_b);
        let defections = moves_a.iter().filter(|m| m.is_defect()).count();
        assert!(defections > 60 && defections < 140, "{} defections", defections);
    }

    #[test]
    fn test_shubik_escalation() {
        let mut shubik = fresh(StrategyKind::Shubik);
        // Opponent defects in rounds 2 and 4.
        let opponent = [C, C, D, C, D, C, C, C, C];
        let moves = play_script(&mut shubik, &opponent);
        // One retaliation after the first defection, two after the second.
        assert_eq!(moves, vec![C, C, C, D, C, D, D, C, C]);
    }

    #[test]
    fn test_shubik_third_defection_triggers_three() {
        let mut shubik = fresh(StrategyKind::Shubik);
        let opponent = [D, C, C, D, C, C, C, D, C, C, C, C, C];
        let moves = play_script(&mut shubik, &opponent);
        assert_eq!(moves, vec![C, D, C, C, D, D, C, C, D, D, D, C, C]);
    }

    #[test]
    fn test_win_stay_lose_shift() {
        assert_eq!(decide_after(StrategyKind::WinStayLoseShift, &[C], &[C]), C);
        assert_eq!(decide_after(StrategyKind::WinStayLoseShift, &[D], &[D]), C);
        assert_eq!(decide_after(StrategyKind::WinStayLoseShift, &[C], &[D]), D);
        assert_eq!(decide_after(StrategyKind::WinStayLoseShift, &[D], &[C]), D);
    }

    #[test]
    fn test_benjo() {
        assert_eq!(decide_after(StrategyKind::Benjo, &[C, C], &[D, D]), D);
        assert_eq!(decide_after(StrategyKind::Benjo, &[C, C], &[C, C]), C);
        assert_eq!(decide_after(StrategyKind::Benjo, &[C, C], &[C, D]), C);
        assert_eq!(decide_after(StrategyKind::Benjo, &[D, D], &[C, D]), C);
        assert_eq!(decide_after(StrategyKind::Benjo, &[C, D], &[C, C]), D);
    }

    #[test]
    fn test_benjo_forgives_single_defection() {
        let mut benjo =
            Player::with_history(StrategyKind::Benjo, &[C; 5], &[C, C, D, C, D], rng());
        assert_eq!(benjo.decide_next_move(), C);
        benjo.record_outcome(C, D);
        assert_eq!(benjo.decide_next_move(), D);
    }

    #[test]
    fn test_benjo_against_defector() {
        let mut benjo = fresh(StrategyKind::Benjo);
        let moves = play_script(&mut benjo, &[D; 10]);
        assert_eq!(moves, vec![C, C, D, D, D, D, D, D, D, D]);
    }

    #[test]
    fn test_modal_tft() {
        assert_eq!(decide_after(StrategyKind::ModalTFT, &[C; 3], &[D, D, C]), C);
        assert_eq!(decide_after(StrategyKind::ModalTFT, &[C; 3], &[D, C, D]), D);
        assert_eq!(decide_after(StrategyKind::ModalTFT, &[C; 4], &[C, C, C, D]), C);
        assert_eq!(decide_after(StrategyKind::ModalTFT, &[C; 2], &[C, D]), C);
    }

    #[test]
    fn test_modal_defector() {
        assert_eq!(decide_after(StrategyKind::ModalDefector, &[D; 3], &[D, D, C]), D);
        assert_eq!(decide_after(StrategyKind::ModalDefector, &[D; 4], &[C, C, C, D]), C);
        assert_eq!(decide_after(StrategyKind::ModalDefector, &[D; 3], &[C, D, D]), D);
    }

    #[test]
    fn test_downing() {
        assert_eq!(decide_after(StrategyKind::Downing, &[C; 9], &[D; 9]), C);
        let seven_of_ten = [D, C, D, C, C, C, D, C, C, C];
        assert_eq!(decide_after(StrategyKind::Downing, &[C; 10], &seven_of_ten), C);
        let six_of_ten = [D, C, D, C, D, C, D, C, C, C];
        assert_eq!(decide_after(StrategyKind::Downing, &[C; 10], &six_of_ten), D);
    }

    #[test]
    fn test_feld_retaliates_and_decays() {
        let mut feld = fresh(StrategyKind::Feld);
        let moves = play_script(&mut feld, &[D; 10]);
        assert!(moves[1..].iter().all(|m| *m == D));

        let mut feld = fresh(StrategyKind::Feld);
        play_script(&mut feld, &[C; 400]);
        match feld.memory {
            Memory::Feld { cooperation_probability } => {
                assert!((cooperation_probability - FELD_FLOOR).abs() < 1e-9)
            }
            ref other => panic!("unexpected memory {:?}", other),
        }
    }

    #[test]
    fn test_feld_starts_fully_forgiving() {
        let mut feld = fresh(StrategyKind::Feld);
        // First forgiveness draw happens at p = 1.0.
        let moves = play_script(&mut feld, &[C; 2]);
        assert_eq!(moves, vec![C, C]);
    }

    #[test]
    fn test_tullock_opening_and_persistence() {
        let mut tullock = fresh(StrategyKind::Tullock);
        let moves = play_script(&mut tullock, &[C; 41]);
        assert!(moves[..11].iter().all(|m| *m == C));
        // Held between resamples: rounds 11..=20 share one sampled move.
        assert!(moves[11..21].iter().all(|m| *m == moves[11]));
        assert!(moves[21..31].iter().all(|m| *m == moves[21]));
    }

    #[test]
    fn test_tullock_defects_against_defector() {
        let mut tullock = fresh(StrategyKind::Tullock);
        let moves = play_script(&mut tullock, &[D; 40]);
        assert!(moves[..11].iter().all(|m| *m == C));
        assert!(moves[11..].iter().all(|m| *m == D));
    }

    #[test]
    fn test_tideman_cooperates_with_cooperator() {
        let mut tideman = fresh(StrategyKind::TidemanChieruzzi);
        assert!(play_script(&mut tideman, &[C; 50]).iter().all(|m| *m == C));
    }

    #[test]
    fn test_tideman_retaliates_against_defector() {
        let mut tideman = fresh(StrategyKind::TidemanChieruzzi);
        let moves = play_script(&mut tideman, &[D; 50]);
        assert_eq!(moves[0], C);
        assert!(moves[1..].iter().all(|m| *m == D));
    }

    #[test]
    fn test_tideman_escalates_per_defection_run() {
        let mut tideman = fresh(StrategyKind::TidemanChieruzzi);
        let opponent = [C, D, C, C, C, D, C, C, C, C];
        let moves = play_script(&mut tideman, &opponent);
        assert_eq!(moves, vec![C, C, D, C, C, C, D, D, C, C]);
    }

    #[test]
    fn test_tideman_fresh_start() {
        // Far ahead on points, defecting far more than a 70% cooperator would.
        let own = [D; 40];
        let opponent = [C; 40];

        let mut tideman = Player::with_history(StrategyKind::TidemanChieruzzi, &own, &opponent, rng());
        assert_eq!(tideman.decide_next_move(), C);
        tideman.record_outcome(C, D);
        assert_eq!(tideman.decide_next_move(), C);
    }

    #[test]
    fn test_tideman_no_fresh_start_near_horizon() {
        let mut opponent = vec![C; 187];
        opponent.extend([D, D]);
        let mut early =
            Player::with_history(StrategyKind::TidemanChieruzzi, &[D; 189], &opponent, rng());
        assert_eq!(early.decide_next_move(), C);

        let mut opponent = vec![C; 188];
        opponent.extend([D, D]);
        let mut late =
            Player::with_history(StrategyKind::TidemanChieruzzi, &[D; 190], &opponent, rng());
        assert_eq!(late.decide_next_move(), D);
    }

    #[test]
    fn test_tideman_fresh_starts_twenty_rounds_apart() {
        let mut tideman =
            Player::with_history(StrategyKind::TidemanChieruzzi, &[D; 40], &[C; 40], rng());
        assert_eq!(tideman.decide_next_move(), C);
        tideman.record_outcome(C, D);
        assert_eq!(tideman.decide_next_move(), C);
        tideman.record_outcome(C, D);
        assert_eq!(tideman.decide_next_move(), D);

        // Still ahead and defecting, but too soon after the last fresh start.
        for _ in 43..60 {
            tideman.record_outcome(D, D);
            assert_eq!(tideman.decide_next_move(), D);
        }
        tideman.record_outcome(D, D);
        assert_eq!(tideman.history().len(), 60);
        assert_eq!(tideman.decide_next_move(), C);
    }

    #[test]
    fn test_tideman_fresh_start_needs_two_own_defections() {
        let mut opponent = vec![C; 38];
        opponent.extend([D, D]);

        let mut own = vec![D; 39];
        own.push(C);
        let mut tideman =
            Player::with_history(StrategyKind::TidemanChieruzzi, &own, &opponent, rng());
        assert_eq!(tideman.decide_next_move(), D);

        let mut tideman =
            Player::with_history(StrategyKind::TidemanChieruzzi, &[D; 40], &opponent, rng());
        assert_eq!(tideman.decide_next_move(), C);
    }

    #[test]
    fn test_tideman_no_fresh_start_when_behind() {
        let mut tideman =
            Player::with_history(StrategyKind::TidemanChieruzzi, &[D; 30], &[D; 30], rng());
        assert_eq!(tideman.decide_next_move(), D);
    }

    #[test]
    fn test_stein_and_rapoport_opening_and_endgame() {
        assert_eq!(decide_after(StrategyKind::SteinAndRapoport, &[C; 3], &[D; 3]), C);
        assert_eq!(decide_after(StrategyKind::SteinAndRapoport, &[C; 198], &[C; 198]), D);
        assert_eq!(decide_after(StrategyKind::SteinAndRapoport, &[C; 199], &[C; 199]), D);
    }

    #[test]
    fn test_stein_and_rapoport_punishes_alternation() {
        let opponent: Vec<Move> = (0..15).map(|i| if i % 2 == 0 { C } else { D }).collect();
        assert_eq!(decide_after(StrategyKind::SteinAndRapoport, &[C; 15], &opponent), D);
    }

    #[test]
    fn test_stein_and_rapoport_punishes_random_looking_opponent() {
        // Balanced C/D counts without strict alternation.
        let opponent: Vec<Move> = (0..30).map(|i| if i % 4 < 2 { C } else { D }).collect();
        let mut stein =
            Player::with_history(StrategyKind::SteinAndRapoport, &[C; 30], &opponent, rng());
        assert_eq!(stein.decide_next_move(), D);

        // The verdict holds until the next check, even against cooperation.
        for _ in 31..45 {
            stein.record_outcome(D, C);
            assert_eq!(stein.decide_next_move(), D);
        }
        // 30 C against 15 D no longer looks random.
        stein.record_outcome(D, C);
        assert_eq!(stein.decide_next_move(), C);
    }

    #[test]
    fn test_stein_and_rapoport_mirrors_steady_opponent() {
        let mut stein = fresh(StrategyKind::SteinAndRapoport);
        let moves = play_script(&mut stein, &[C; 100]);
        assert!(moves.iter().all(|m| *m == C));

        let mut opponent = vec![C; 15];
        opponent.push(D);
        assert_eq!(decide_after(StrategyKind::SteinAndRapoport, &[C; 16], &opponent), D);
    }

    #[test]
    fn test_davis() {
        assert_eq!(decide_after(StrategyKind::Davis, &[C; 9], &[D; 9]), C);
        let mut opponent = vec![D];
        opponent.extend([C; 9]);
        assert_eq!(decide_after(StrategyKind::Davis, &[C; 10], &opponent), D);
        assert_eq!(decide_after(StrategyKind::Davis, &[C; 10], &[C; 10]), C);
    }

    #[test]
    fn test_defect_once_and_cooperate_once() {
        let mut defect_once = fresh(StrategyKind::DefectOnce);
        let moves = play_script(&mut defect_once, &[D; 10]);
        assert_eq!(moves[0], D);
        assert!(moves[1..].iter().all(|m| *m == C));

        let mut cooperate_once = fresh(StrategyKind::CooperateOnce);
        let moves = play_script(&mut cooperate_once, &[C; 10]);
        assert_eq!(moves[0], C);
        assert!(moves[1..].iter().all(|m| *m == D));
    }

    #[test]
    fn test_grofman() {
        assert_eq!(decide_after(StrategyKind::Grofman, &[C], &[C]), C);
        assert_eq!(decide_after(StrategyKind::Grofman, &[D], &[D]), C);

        let mut grofman = Player::new(StrategyKind::Grofman, SeededRng::new(11, 0));
        let mut cooperations = 0;
        for _ in 0..7_000 {
            grofman.record_outcome(C, D);
            if grofman.decide_next_move().is_cooperate() {
                cooperations += 1;
            }
        }
        assert!(cooperations > 1_700 && cooperations < 2_300, "{}", cooperations);
    }

    #[test]
    fn test_tester_mirrors_when_punished() {
        let opponent = [D, C, D, D, C, C, D, C];
        let mut tester = fresh(StrategyKind::Tester);
        let moves = play_script(&mut tester, &opponent);
        assert_eq!(moves[0], D);
        for i in 1..opponent.len() {
            assert_eq!(moves[i], opponent[i - 1], "round {}", i);
        }
    }

    #[test]
    fn test_tester_alternates_against_pushover() {
        let opponent = [C, D, D, C, D, C, C, C];
        let mut tester = fresh(StrategyKind::Tester);
        let moves = play_script(&mut tester, &opponent);
        assert_eq!(moves, vec![D, C, D, C, D, C, D, C]);
    }

    #[test]
    fn test_with_history_sets_state() {
        let player = Player::with_history(StrategyKind::TitForTat, &[C, D], &[D, C], rng());
        assert_eq!(player.history().len(), 2);
        assert_eq!(player.current_move(), D);
        assert_eq!(player.kind(), StrategyKind::TitForTat);
    }

    #[test]
    fn test_every_strategy_survives_long_match() {
        for kind in StrategyKind::ALL {
            let mut player = fresh(kind);
            let opponent: Vec<Move> = (0..250).map(|i| if i % 7 < 3 { D } else { C }).collect();
            let moves = play_script(&mut player, &opponent);
            assert_eq!(moves.len(), 250);
            assert_eq!(player.history().len(), 250);
        }
    }
}
