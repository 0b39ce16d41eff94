//! Fitness accumulation across games.

use monopoly_engine::board::{Location, LocationRegistry};
use monopoly_engine::core::PlayerId;
use monopoly_engine::error::BoardError;
use monopoly_engine::fitness::{FitnessEvaluator, FitnessLedger, NetWorth, NumMonopolies, NumProperties};
use monopoly_engine::turn::{NextAction, Player};

/// Player with only cash; decisions are never asked for.
struct Holder {
    id: PlayerId,
    cash: i64,
}

impl Holder {
    fn new(id: u8, cash: i64) -> Self {
        Self {
            id: PlayerId::new(id),
            cash,
        }
    }
}

impl Player for Holder {
    fn id(&self) -> PlayerId {
        self.id
    }
    fn cash(&self) -> i64 {
        self.cash
    }
    fn next_action(&self) -> NextAction {
        NextAction::Done
    }
    fn set_next_action(&mut self, _action: NextAction) {}
    fn position(&self) -> usize {
        0
    }
    fn set_position(&mut self, _index: usize) {}
    fn in_jail(&self) -> bool {
        false
    }
    fn go_to_jail(&mut self) {}
    fn leave_jail(&mut self) {}
    fn jail_turns(&self) -> u8 {
        0
    }
    fn set_jail_turns(&mut self, _turns: u8) {}
    fn should_pay_bail(&self, _board: &LocationRegistry) -> bool {
        false
    }
    fn wants_to_buy(&self, _location: &Location, _board: &LocationRegistry) -> bool {
        false
    }
    fn make_build_decision(&mut self, _board: &mut LocationRegistry) -> Result<(), BoardError> {
        Ok(())
    }
    fn pay_off_mortgages(&mut self, _board: &mut LocationRegistry) -> Result<(), BoardError> {
        Ok(())
    }
}

/// Player 0 holds the dark blues with a house on Boardwalk plus a
/// railroad; player 1 holds nothing.
fn finished_board() -> LocationRegistry {
    let mut board = LocationRegistry::standard().unwrap();
    for index in [5, 37, 39] {
        board.set_owner(index, Some(PlayerId::new(0)));
    }
    board.compute_monopolies();
    board.add_house(39).unwrap();
    board
}

#[test]
fn test_evaluator_names() {
    assert_eq!(NetWorth.name(), "net_worth");
    assert_eq!(NumProperties.name(), "num_properties");
    assert_eq!(NumMonopolies.name(), "num_monopolies");
}

#[test]
fn test_game_scores() {
    let board = finished_board();
    let rich = Holder::new(0, 100);
    let poor = Holder::new(1, 900);

    // 100 cash + 200 + 350 + 400 + 200 house
    assert_eq!(NetWorth.game_score(&rich, &board), 1250);
    assert_eq!(NetWorth.game_score(&poor, &board), 900);
    assert_eq!(NumProperties.game_score(&rich, &board), 3);
    assert_eq!(NumMonopolies.game_score(&rich, &board), 1);
    assert_eq!(NumMonopolies.game_score(&poor, &board), 0);
}

#[test]
fn test_ledger_accumulates_over_games() {
    let board = finished_board();
    let players = [Holder::new(0, 100), Holder::new(1, 900)];
    let mut ledger = FitnessLedger::new(NetWorth, 2);

    for _ in 0..3 {
        assert!(ledger.record_game(&players, &board).is_empty());
    }

    assert_eq!(ledger.fitness(PlayerId::new(0)), Some(3750));
    assert_eq!(ledger.fitness(PlayerId::new(1)), Some(2700));
    assert_eq!(
        ledger.totals().collect::<Vec<_>>(),
        vec![(PlayerId::new(0), 3750), (PlayerId::new(1), 2700)]
    );

    ledger.reset();
    assert_eq!(ledger.fitness(PlayerId::new(0)), Some(0));
}

#[test]
fn test_ledger_ignores_unknown_player() {
    let board = finished_board();
    let mut ledger = FitnessLedger::new(NumProperties, 2);

    assert_eq!(ledger.record(&Holder::new(5, 0), &board), None);
    assert_eq!(ledger.fitness(PlayerId::new(5)), None);
    assert_eq!(ledger.record(&Holder::new(0, 0), &board), Some(3));
}

#[test]
fn test_record_game_reports_skipped_players() {
    let board = finished_board();
    let players = [Holder::new(0, 0), Holder::new(4, 0), Holder::new(1, 0)];
    let mut ledger = FitnessLedger::new(NumProperties, 2);

    assert_eq!(ledger.record_game(&players, &board), vec![PlayerId::new(4)]);
    assert_eq!(ledger.fitness(PlayerId::new(0)), Some(3));
    assert_eq!(ledger.fitness(PlayerId::new(1)), Some(0));
}
