//! Turn protocol tests.
//!
//! A scripted player is driven through full turns with `TurnMachine`, the
//! way an orchestrator would: read the next action, send the matching
//! event, apply the effects.

use monopoly_engine::board::{BoardDirectory, Location, LocationRegistry};
use monopoly_engine::core::{BoardConfig, GameId, LoadMode, PlayerId, PlayerMap};
use monopoly_engine::error::{BoardError, TurnError};
use monopoly_engine::turn::{
    DiceRoll, NextAction, Player, TurnEffect, TurnEvent, TurnMachine, TurnState, BAIL, GO_SALARY,
    JAIL_INDEX, MAX_JAIL_TURNS,
};

/// Player that buys everything it can afford and builds one house on the
/// first street of any monopoly it holds.
#[derive(Debug)]
struct Scripted {
    id: PlayerId,
    cash: i64,
    position: usize,
    jailed: bool,
    jail_turns: u8,
    next: NextAction,
    pays_bail: bool,
    payoff_calls: usize,
}

impl Scripted {
    fn new(id: u8) -> Self {
        Self {
            id: PlayerId::new(id),
            cash: 1500,
            position: 0,
            jailed: false,
            jail_turns: 0,
            next: NextAction::Done,
            pays_bail: true,
            payoff_calls: 0,
        }
    }
}

impl Player for Scripted {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn cash(&self) -> i64 {
        self.cash
    }

    fn next_action(&self) -> NextAction {
        self.next
    }

    fn set_next_action(&mut self, action: NextAction) {
        self.next = action;
    }

    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, index: usize) {
        self.position = index;
    }

    fn in_jail(&self) -> bool {
        self.jailed
    }

    fn go_to_jail(&mut self) {
        self.jailed = true;
    }

    fn leave_jail(&mut self) {
        self.jailed = false;
    }

    fn jail_turns(&self) -> u8 {
        self.jail_turns
    }

    fn set_jail_turns(&mut self, turns: u8) {
        self.jail_turns = turns;
    }

    fn should_pay_bail(&self, _board: &LocationRegistry) -> bool {
        self.pays_bail
    }

    fn wants_to_buy(&self, _location: &Location, _board: &LocationRegistry) -> bool {
        true
    }

    fn make_build_decision(&mut self, board: &mut LocationRegistry) -> Result<(), BoardError> {
        let target = board
            .owned_by(self.id)
            .find(|l| l.is_street() && l.is_part_of_monopoly() && l.houses() == 0)
            .map(Location::index);
        match target {
            Some(index) => board.add_house(index),
            None => Ok(()),
        }
    }

    fn pay_off_mortgages(&mut self, board: &mut LocationRegistry) -> Result<(), BoardError> {
        self.payoff_calls += 1;
        let mortgaged: Vec<usize> = board
            .owned_by(self.id)
            .filter(|l| l.is_mortgaged())
            .map(Location::index)
            .collect();
        for index in mortgaged {
            board.unmortgage(index)?;
        }
        Ok(())
    }
}

/// Apply effects to the active player and the rest of the table.
fn apply(effects: &[TurnEffect], active: &mut Scripted, cash: &mut PlayerMap<i64>) {
    for effect in effects {
        match *effect {
            TurnEffect::PayBank { amount } => active.cash -= amount,
            TurnEffect::PayRent { to, amount } => {
                active.cash -= amount;
                cash[to] += amount;
            }
            TurnEffect::CollectSalary { amount } => active.cash += amount,
            TurnEffect::StartAuction { .. } | TurnEffect::SentToJail => {}
        }
    }
}

/// Drive one turn to completion. `roll` is used when the player is asked
/// to roll.
fn play_turn(
    machine: &mut TurnMachine,
    player: &mut Scripted,
    board: &mut LocationRegistry,
    roll: DiceRoll,
) -> Vec<TurnEffect> {
    let mut effects = Vec::new();
    let mut others = PlayerMap::with_value(4, 0);

    let mut event = TurnEvent::PlayerActivated;
    loop {
        let produced = machine.dispatch(event, player, board).unwrap();
        apply(&produced, player, &mut others);
        effects.extend(produced);

        event = match player.next_action() {
            NextAction::RollDice => TurnEvent::DiceRolled(roll),
            NextAction::Done => break,
            action => action.event().unwrap(),
        };
    }

    assert!(machine.state().is_inactive());
    effects
}

fn standard() -> LocationRegistry {
    LocationRegistry::standard().unwrap()
}

/// A mortgage decision runs the payoff hook, then the trade decision ends
/// the turn.
#[test]
fn test_mortgage_then_trade_ends_turn() {
    let mut board = standard();
    let mut player = Scripted::new(0);

    let t = TurnState::PayoffMortgage
        .process_event(&TurnEvent::MortgageDecision, &mut player, &mut board)
        .unwrap();
    assert_eq!(player.payoff_calls, 1);
    assert_eq!(player.next_action(), NextAction::MakeTradeDecision);
    assert_eq!(t.state, TurnState::TradeDecision);

    let t = t
        .state
        .process_event(&TurnEvent::TradeDecision, &mut player, &mut board)
        .unwrap();
    assert_eq!(player.next_action(), NextAction::Done);
    assert_eq!(t.state, TurnState::Inactive);
}

#[test]
fn test_full_turn_buying_a_street() {
    let mut board = standard();
    let mut player = Scripted::new(0);
    let mut machine = TurnMachine::new(player.id());

    let effects = play_turn(&mut machine, &mut player, &mut board, DiceRoll::new(1, 2));

    assert_eq!(effects, vec![TurnEffect::PayBank { amount: 60 }]);
    assert_eq!(player.position(), 3);
    assert_eq!(player.cash(), 1440);
    assert!(board.location_at(3).is_owned_by(player.id()));
    assert_eq!(player.payoff_calls, 1);
}

#[test]
fn test_completing_a_group_builds_the_same_turn() {
    let mut board = standard();
    let mut player = Scripted::new(0);
    board.set_owner(1, Some(player.id()));
    let mut machine = TurnMachine::new(player.id());

    play_turn(&mut machine, &mut player, &mut board, DiceRoll::new(1, 2));

    assert_eq!(player.num_monopolies(&board), 1);
    assert_eq!(board.count_houses_in_group(1), 1);
}

#[test]
fn test_mortgages_paid_off_during_turn() {
    let mut board = standard();
    let mut player = Scripted::new(0);
    player.position = 10;
    board.set_owner(5, Some(player.id()));
    board.mortgage(5).unwrap();
    let mut machine = TurnMachine::new(player.id());

    // 10 + 2 lands on the electric company
    play_turn(&mut machine, &mut player, &mut board, DiceRoll::new(1, 1));

    assert!(!board.location_at(5).is_mortgaged());
    assert!(board.location_at(12).is_owned_by(player.id()));
}

#[test]
fn test_rent_paid_to_owner() {
    let mut board = standard();
    let owner = PlayerId::new(1);
    for index in [37, 39] {
        board.set_owner(index, Some(owner));
    }
    board.compute_monopolies();

    let mut player = Scripted::new(0);
    player.position = 35;
    let mut machine = TurnMachine::new(player.id());

    let effects = play_turn(&mut machine, &mut player, &mut board, DiceRoll::new(2, 2));
    assert_eq!(effects, vec![TurnEffect::PayRent { to: owner, amount: 100 }]);
    assert_eq!(player.cash(), 1400);
}

#[test]
fn test_passing_go_then_buying() {
    let mut board = standard();
    let mut player = Scripted::new(0);
    player.position = 36;
    let mut machine = TurnMachine::new(player.id());

    // 36 + 9 wraps to 5 (Reading Railroad)
    let effects = play_turn(&mut machine, &mut player, &mut board, DiceRoll::new(4, 5));
    assert_eq!(
        effects,
        vec![
            TurnEffect::CollectSalary { amount: GO_SALARY },
            TurnEffect::PayBank { amount: 200 },
        ]
    );
    assert_eq!(player.cash(), 1500);
}

#[test]
fn test_sent_to_jail_ends_turn() {
    let mut board = standard();
    let mut player = Scripted::new(0);
    player.position = 27;
    let mut machine = TurnMachine::new(player.id());

    let effects = play_turn(&mut machine, &mut player, &mut board, DiceRoll::new(1, 2));
    assert_eq!(effects, vec![TurnEffect::SentToJail]);
    assert_eq!(player.position(), JAIL_INDEX);
    assert!(player.in_jail());
    assert_eq!(player.payoff_calls, 0);
}

#[test]
fn test_jailed_player_pays_bail_and_rolls() {
    let mut board = standard();
    let mut player = Scripted::new(0);
    player.position = JAIL_INDEX;
    player.jailed = true;
    let mut machine = TurnMachine::new(player.id());

    // 10 + 3 lands on States Avenue
    let effects = play_turn(&mut machine, &mut player, &mut board, DiceRoll::new(1, 2));
    assert_eq!(
        effects,
        vec![
            TurnEffect::PayBank { amount: BAIL },
            TurnEffect::PayBank { amount: 140 },
        ]
    );
    assert!(!player.in_jail());
    assert_eq!(player.position(), 13);
}

fn jailed_without_bail() -> Scripted {
    let mut player = Scripted::new(0);
    player.position = JAIL_INDEX;
    player.jailed = true;
    player.pays_bail = false;
    player
}

#[test]
fn test_jailed_player_without_bail_misses_roll() {
    let mut board = standard();
    let mut player = jailed_without_bail();
    let mut machine = TurnMachine::new(player.id());

    let effects = play_turn(&mut machine, &mut player, &mut board, DiceRoll::new(1, 2));
    assert!(effects.is_empty());
    assert!(player.in_jail());
    assert_eq!(player.jail_turns(), 1);
    assert_eq!(player.position(), JAIL_INDEX);
    assert_eq!(player.payoff_calls, 1);
}

/// A player who never pays bail still gets out on doubles.
#[test]
fn test_doubles_release_player_who_never_pays_bail() {
    let mut board = standard();
    let mut player = jailed_without_bail();
    let mut machine = TurnMachine::new(player.id());

    // 10 + 6 lands on St. James Place
    let effects = play_turn(&mut machine, &mut player, &mut board, DiceRoll::new(3, 3));
    assert_eq!(effects, vec![TurnEffect::PayBank { amount: 180 }]);
    assert!(!player.in_jail());
    assert_eq!(player.jail_turns(), 0);
    assert_eq!(player.position(), 16);

    // Nine more turns of 3+3 reach Go To Jail; the tenth rolls out again.
    for _ in 0..10 {
        play_turn(&mut machine, &mut player, &mut board, DiceRoll::new(3, 3));
    }
    assert!(!player.in_jail());
    assert_eq!(player.position(), 16);
}

/// The third miss in a row forces bail and moves the player anyway.
#[test]
fn test_third_miss_forces_bail() {
    let mut board = standard();
    let mut player = jailed_without_bail();
    let mut machine = TurnMachine::new(player.id());

    for turn in 1..MAX_JAIL_TURNS {
        let effects = play_turn(&mut machine, &mut player, &mut board, DiceRoll::new(1, 2));
        assert!(effects.is_empty());
        assert!(player.in_jail());
        assert_eq!(player.jail_turns(), turn);
    }

    // 10 + 3 lands on States Avenue
    let effects = play_turn(&mut machine, &mut player, &mut board, DiceRoll::new(1, 2));
    assert_eq!(
        effects,
        vec![
            TurnEffect::PayBank { amount: BAIL },
            TurnEffect::PayBank { amount: 140 },
        ]
    );
    assert!(!player.in_jail());
    assert_eq!(player.jail_turns(), 0);
    assert_eq!(player.position(), 13);
}

#[test]
fn test_invalid_event_leaves_state_unchanged() {
    let mut board = standard();
    let mut player = Scripted::new(0);
    let mut machine = TurnMachine::new(player.id());

    machine
        .dispatch(TurnEvent::PlayerActivated, &mut player, &mut board)
        .unwrap();
    assert_eq!(machine.state(), TurnState::AwaitingRoll);

    let err = machine
        .dispatch(TurnEvent::TradeDecision, &mut player, &mut board)
        .unwrap_err();
    assert_eq!(
        err,
        TurnError::InvalidTransition {
            state: TurnState::AwaitingRoll,
            event: TurnEvent::TradeDecision,
        }
    );
    assert_eq!(machine.state(), TurnState::AwaitingRoll);
}

#[test]
fn test_board_error_leaves_state_unchanged() {
    let mut board = standard();
    let mut player = Scripted::new(0);
    for index in [1, 3] {
        board.set_owner(index, Some(player.id()));
    }
    board.compute_monopolies();
    board.mortgage(3).unwrap();
    let mut machine = TurnMachine::new(player.id());

    // Lands on Reading Railroad, buys it, then tries to build on Mediterranean
    for event in [
        TurnEvent::PlayerActivated,
        TurnEvent::DiceRolled(DiceRoll::new(2, 3)),
        TurnEvent::BuyDecision,
    ] {
        machine.dispatch(event, &mut player, &mut board).unwrap();
    }
    assert_eq!(machine.state(), TurnState::BuildDecision);

    let err = machine
        .dispatch(TurnEvent::BuildDecision, &mut player, &mut board)
        .unwrap_err();
    assert!(matches!(err, TurnError::Board(BoardError::GroupMortgaged { .. })));
    assert_eq!(machine.state(), TurnState::BuildDecision);
}

#[test]
fn test_wrong_player_rejected() {
    let mut board = standard();
    let mut intruder = Scripted::new(1);
    let mut machine = TurnMachine::new(PlayerId::new(0));

    let err = machine
        .dispatch(TurnEvent::PlayerActivated, &mut intruder, &mut board)
        .unwrap_err();
    assert_eq!(
        err,
        TurnError::WrongPlayer {
            expected: PlayerId::new(0),
            actual: PlayerId::new(1),
        }
    );
    assert_eq!(machine.state(), TurnState::Inactive);
}

/// Independent games on one directory do not see each other's turns.
#[test]
fn test_parallel_games_are_isolated() {
    let directory = BoardDirectory::new();

    std::thread::scope(|scope| {
        for game in 0..4u8 {
            let directory = &directory;
            scope.spawn(move || {
                let id = GameId::new(format!("game-{game}"));
                let handle = directory
                    .get_or_create(&id, &BoardConfig::standard(), LoadMode::Strict)
                    .unwrap();
                let mut board = handle.lock().unwrap();

                let mut player = Scripted::new(game);
                let mut machine = TurnMachine::new(player.id());
                // Each game's player lands on a different street: 3, 6, 8, 9
                let roll = [
                    DiceRoll::new(1, 2),
                    DiceRoll::new(3, 3),
                    DiceRoll::new(4, 4),
                    DiceRoll::new(4, 5),
                ][usize::from(game)];
                play_turn(&mut machine, &mut player, &mut board, roll);
                assert_eq!(board.owned_by(player.id()).count(), 1);
            });
        }
    });

    assert_eq!(directory.len(), 4);
    for game in 0..4u8 {
        let handle = directory.get(&GameId::new(format!("game-{game}"))).unwrap();
        let board = handle.lock().unwrap();
        let owners: Vec<_> = board.locations().iter().filter_map(Location::owner).collect();
        assert_eq!(owners, vec![PlayerId::new(game)]);
    }
}
