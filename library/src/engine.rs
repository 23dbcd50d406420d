use enum_iterator::all;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::{debug, info, trace};

use crate::ai::legal_cards;
use crate::bid::{Bid, Contract};
use crate::card::Card;
use crate::card_list::CardList;
use crate::deck::{dealt, shuffled};
use crate::error::GameError;
use crate::event::{GameEvent, GameListener};
use crate::hand::Hand;
use crate::player::Player;
use crate::scoring::{contractor_score, opposition_score, winning_team};
use crate::seat::{Seat, Team};
use crate::trick::Trick;
use crate::{HAND_SIZE, PLAYERS, WIDOW_SIZE};

/// Where the engine is in the round cycle. Each transition method checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    NewGame,
    Dealt,
    AllPassed,
    Contracted,
    Exchanged,
    Playing,
    RoundComplete,
    Scored,
    GameOver,
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Phase::Setup => "setup",
                Phase::NewGame => "new game",
                Phase::Dealt => "dealt",
                Phase::AllPassed => "all passed",
                Phase::Contracted => "contracted",
                Phase::Exchanged => "exchanged",
                Phase::Playing => "playing",
                Phase::RoundComplete => "round complete",
                Phase::Scored => "scored",
                Phase::GameOver => "game over",
            }
        )
    }
}

/// Runs games of Five Hundred between four players.
///
/// Transitions are explicit: `new_game`, `deal`, `bid`, `exchange`,
/// `play_trick`, `compute_score` and `is_game_over`. Every transition
/// notifies the registered listeners before returning.
pub struct GameEngine<R: Rng = StdRng> {
    rng: R,
    players: [Player; PLAYERS],
    listeners: Vec<Box<dyn GameListener>>,
    phase: Phase,
    dealer: Seat,
    turn: Seat,
    bids: [Bid; PLAYERS],
    contract: Option<(Seat, Contract)>,
    widow: CardList,
    trick: Option<Trick>,
    last_trick: Option<Trick>,
    tricks_played: usize,
    leader: Seat,
    contract_made: bool,
    last_card: Option<Card>,
    winners: Option<Team>,
}

impl GameEngine<StdRng> {
    pub fn seeded(players: [Player; PLAYERS], seed: u64) -> Self {
        Self::new(players, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn new(players: [Player; PLAYERS], rng: R) -> Self {
        Self {
            rng,
            players,
            listeners: Vec::new(),
            phase: Phase::Setup,
            dealer: Seat::North,
            turn: Seat::East,
            bids: [Bid::Pass; PLAYERS],
            contract: None,
            widow: CardList::new(),
            trick: None,
            last_trick: None,
            tricks_played: 0,
            leader: Seat::East,
            contract_made: false,
            last_card: None,
            winners: None,
        }
    }

    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: GameListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: GameEvent) {
        trace!(event = event.name(), "notify");
        for listener in self.listeners.iter_mut() {
            listener.on_event(&event);
        }
    }

    fn expect_phase(&self, action: &'static str, allowed: &[Phase]) -> Result<(), GameError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(GameError::OutOfPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    /// Clears every score and picks a dealer at random. Allowed at any time.
    pub fn new_game(&mut self) {
        for player in self.players.iter_mut() {
            player.reset_for_game();
        }
        let dealer = Seat::try_from(self.rng.gen_range(0..PLAYERS)).expect("seat index in range");
        self.dealer = dealer;
        self.turn = dealer.next();
        self.bids = [Bid::Pass; PLAYERS];
        self.contract = None;
        self.widow.clear();
        self.trick = None;
        self.last_trick = None;
        self.tricks_played = 0;
        self.contract_made = false;
        self.last_card = None;
        self.winners = None;
        self.phase = Phase::NewGame;
        info!(%dealer, "new game");
        self.emit(GameEvent::NewGame { dealer });
    }

    /// Shuffles a fresh deck, deals ten cards to each seat starting left of
    /// the dealer and sets the last six aside as the widow.
    pub fn deal(&mut self) -> Result<(), GameError> {
        self.expect_phase("deal", &[Phase::NewGame, Phase::AllPassed, Phase::Scored])?;
        let first = self.dealer.next();
        let (hands, widow) = dealt(shuffled(&mut self.rng), first);
        for (player, cards) in self.players.iter_mut().zip(hands) {
            player.hand = Hand::from(cards);
            player.tricks_won = 0;
            player.round_score = 0;
            player.playing.reset_for_new_round();
        }
        self.widow = widow;
        self.bids = [Bid::Pass; PLAYERS];
        self.contract = None;
        self.trick = None;
        self.last_trick = None;
        self.tricks_played = 0;
        self.contract_made = false;
        self.last_card = None;
        self.turn = first;
        self.phase = Phase::Dealt;
        debug!(dealer = %self.dealer, widow = %self.widow, "deal");
        self.emit(GameEvent::Deal {
            dealer: self.dealer,
            first_bidder: first,
        });
        Ok(())
    }

    /// Asks each seat for a bid in turn and settles the contract. Returns
    /// `None` when all four pass, in which case the next step is a redeal.
    ///
    /// # Panics
    ///
    /// If a bidding strategy neither passes nor beats the highest bid so far.
    pub fn bid(&mut self) -> Result<Option<(Seat, Contract)>, GameError> {
        self.expect_phase("bid", &[Phase::Dealt])?;
        let mut previous: [Option<Bid>; PLAYERS] = [None; PLAYERS];
        let first = self.dealer.next();
        for seat in (0..PLAYERS).map(|steps| first.offset(steps)) {
            self.turn = seat;
            let player = &mut self.players[seat.index()];
            let bid = player.bidding.select_bid(&previous, seat, &player.hand);
            let highest = Bid::max_made(&previous);
            assert!(
                bid.is_pass() || bid > highest,
                "{seat} bid {bid} without beating {highest}"
            );
            debug!(%seat, %bid, "bid");
            previous[seat.index()] = Some(bid);
        }
        self.bids = previous.map(Option::unwrap_or_default);

        self.contract = all::<Seat>()
            .filter_map(|seat| match self.bids[seat.index()] {
                Bid::Contract(contract) => Some((seat, contract)),
                Bid::Pass => None,
            })
            .max_by_key(|(_, contract)| *contract);
        self.phase = match self.contract {
            Some((holder, contract)) => {
                info!(%holder, %contract, "contract");
                self.turn = holder;
                Phase::Contracted
            }
            None => {
                info!("all passed");
                Phase::AllPassed
            }
        };
        self.emit(GameEvent::Bid {
            bids: self.bids,
            contract: self.contract,
        });
        Ok(self.contract)
    }

    /// Gives the widow to the contract holder and sets aside the six cards
    /// they choose to discard, which become the new widow.
    ///
    /// # Panics
    ///
    /// If the exchange strategy does not pick six distinct cards of the hand.
    pub fn exchange(&mut self) -> Result<CardList, GameError> {
        self.expect_phase("exchange", &[Phase::Contracted])?;
        let (holder, _) = self.contract.expect("a contracted round has a holder");
        let widow = std::mem::take(&mut self.widow);
        let bids = self.bids;
        let player = self.player_mut(holder);
        player.hand.extend(widow);
        let discards = player
            .exchange
            .select_cards_to_discard(&bids, holder, &player.hand);
        assert!(
            discards.len() == WIDOW_SIZE && discards.iter().all(|card| player.hand.contains(card)),
            "{holder} must discard six cards from the hand, not {discards}"
        );
        player.hand.remove_all(&discards);
        debug!(%holder, %discards, "exchange");
        self.widow = discards.clone();
        self.turn = holder;
        self.leader = holder;
        self.phase = Phase::Exchanged;
        self.emit(GameEvent::Exchange {
            contract_holder: holder,
            discards: discards.clone(),
        });
        Ok(discards)
    }

    /// Plays one trick: each seat in turn from the leader adds a legal card.
    /// Returns the winner, who leads the next trick.
    ///
    /// # Panics
    ///
    /// If a playing strategy returns a card it may not play.
    pub fn play_trick(&mut self) -> Result<Seat, GameError> {
        self.expect_phase("play a trick", &[Phase::Exchanged, Phase::Playing])?;
        let (_, contract) = self.contract.expect("a round in play has a contract");
        self.phase = Phase::Playing;
        self.trick = Some(Trick::with_contract(contract, self.leader));

        for _ in 0..PLAYERS {
            let trick = self.trick.clone().expect("trick in progress");
            let seat = trick.next_seat();
            self.turn = seat;
            let player = &mut self.players[seat.index()];
            let card = player.playing.play(&trick, &player.hand);
            assert!(
                legal_cards(&trick, &player.hand).contains(card),
                "{seat} may not play {card} to {trick}"
            );
            player.hand.remove(card);
            for player in self.players.iter_mut() {
                player.playing.observe_play(&trick, seat, card);
            }
            trace!(%seat, %card, "play");
            if let Some(current) = self.trick.as_mut() {
                current.add(card);
            }
            self.last_card = Some(card);
            self.emit(GameEvent::SinglePlay { seat, card });
        }

        let trick = self.trick.take().expect("trick in progress");
        let winner = trick.winner().expect("a complete trick has a winner");
        self.player_mut(winner).tricks_won += 1;
        self.tricks_played += 1;
        self.leader = winner;
        self.turn = winner;
        if self.tricks_played == HAND_SIZE {
            self.phase = Phase::RoundComplete;
        }
        debug!(%winner, %trick, "trick");
        self.last_trick = Some(trick.clone());
        self.emit(GameEvent::Play { winner, trick });
        Ok(winner)
    }

    /// Scores the round for both teams and passes the deal to the left.
    /// Returns the round's score by team.
    pub fn compute_score(&mut self) -> Result<[i32; 2], GameError> {
        self.expect_phase("score", &[Phase::RoundComplete])?;
        let (holder, contract) = self.contract.expect("a completed round has a contract");
        let contract_team = holder.team();
        let tricks = self.team_tricks();

        let mut round_scores = [0; 2];
        round_scores[contract_team.index()] =
            contractor_score(contract, tricks[contract_team.index()]);
        round_scores[contract_team.other().index()] =
            opposition_score(tricks[contract_team.other().index()]);
        self.contract_made = tricks[contract_team.index()] >= contract.tricks() as usize;

        for seat in all::<Seat>() {
            let player = self.player_mut(seat);
            player.round_score = round_scores[seat.team().index()];
            player.score += player.round_score;
        }
        self.dealer = self.dealer.next();
        self.phase = Phase::Scored;
        let team_scores = self.team_scores();
        info!(
            %holder,
            %contract,
            made = self.contract_made,
            ?round_scores,
            ?team_scores,
            "score"
        );
        self.emit(GameEvent::Score {
            round_scores,
            team_scores,
            contract_made: self.contract_made,
        });
        Ok(round_scores)
    }

    /// Whether the game has ended. Checked after scoring; once it returns
    /// `true` it keeps doing so without announcing the end again.
    pub fn is_game_over(&mut self) -> bool {
        match self.phase {
            Phase::GameOver => true,
            Phase::Scored => {
                let Some((holder, _)) = self.contract else {
                    return false;
                };
                let Some(winners) = winning_team(self.team_scores(), holder.team()) else {
                    return false;
                };
                for seat in winners.seats() {
                    self.player_mut(seat).game_winner = true;
                }
                self.winners = Some(winners);
                self.phase = Phase::GameOver;
                info!(%winners, scores = ?self.team_scores(), "game over");
                self.emit(GameEvent::GameOver { winners });
                true
            }
            _ => false,
        }
    }

    /// Deals until someone bids, then exchanges, plays all ten tricks and
    /// scores. Returns the round's score by team.
    pub fn play_round(&mut self) -> Result<[i32; 2], GameError> {
        loop {
            self.deal()?;
            if self.bid()?.is_some() {
                break;
            }
        }
        self.exchange()?;
        while self.phase != Phase::RoundComplete {
            self.play_trick()?;
        }
        self.compute_score()
    }

    /// Plays a whole game from a fresh start and returns the winning team.
    pub fn play_game(&mut self) -> Result<Team, GameError> {
        self.new_game();
        loop {
            self.play_round()?;
            if self.is_game_over() {
                return Ok(self.winners.expect("a finished game has winners"));
            }
        }
    }

    /// The cards `seat` may play now: the lead set when the trick is empty,
    /// otherwise the cards that follow the suit led.
    pub fn playable_cards(&self, seat: Seat) -> Result<CardList, GameError> {
        self.expect_phase("list playable cards", &[Phase::Exchanged, Phase::Playing])?;
        let (_, contract) = self.contract.expect("a round in play has a contract");
        let trick = self
            .trick
            .clone()
            .unwrap_or_else(|| Trick::with_contract(contract, self.leader));
        Ok(legal_cards(&trick, self.player(seat).hand()))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player; PLAYERS] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    /// The seat currently expected to act.
    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn bids(&self) -> &[Bid; PLAYERS] {
        &self.bids
    }

    pub fn contract(&self) -> Option<Contract> {
        self.contract.map(|(_, contract)| contract)
    }

    pub fn contract_holder(&self) -> Option<Seat> {
        self.contract.map(|(holder, _)| holder)
    }

    pub fn widow(&self) -> &CardList {
        &self.widow
    }

    pub fn current_trick(&self) -> Option<&Trick> {
        self.trick.as_ref()
    }

    pub fn last_trick(&self) -> Option<&Trick> {
        self.last_trick.as_ref()
    }

    pub fn tricks_played(&self) -> usize {
        self.tricks_played
    }

    /// Leader of the trick in progress, or of the next one.
    pub fn trick_leader(&self) -> Seat {
        self.leader
    }

    pub fn last_card(&self) -> Option<Card> {
        self.last_card
    }

    pub fn is_contract_made(&self) -> bool {
        self.contract_made
    }

    pub fn winners(&self) -> Option<Team> {
        self.winners
    }

    pub fn team_scores(&self) -> [i32; 2] {
        [Team::NorthSouth, Team::EastWest].map(|team| self.player(team.seats()[0]).score())
    }

    /// Tricks won this round, by team.
    pub fn team_tricks(&self) -> [usize; 2] {
        [Team::NorthSouth, Team::EastWest].map(|team| {
            team.seats()
                .iter()
                .map(|seat| self.player(*seat).tricks_won())
                .sum()
        })
    }
}

#[cfg(test)]
use crate::ai::{BiddingStrategy, CardExchangeStrategy, PlayingStrategy};
#[cfg(test)]
use crate::config::{AiConfig, AiLevel};
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[cfg(test)]
fn robots(level: AiLevel) -> [Player; PLAYERS] {
    let config = AiConfig::default();
    all::<Seat>()
        .map(|seat| Player::robot(seat.to_string(), level, &config, seat.index() as u64).unwrap())
        .collect::<Vec<_>>()
        .try_into()
        .unwrap()
}

#[cfg(test)]
fn engine(level: AiLevel, seed: u64) -> GameEngine {
    GameEngine::seeded(robots(level), seed)
}

#[test]
fn test_transitions_check_the_phase() {
    let mut game = engine(AiLevel::Basic, 1);
    assert_eq!(
        game.deal(),
        Err(GameError::OutOfPhase {
            action: "deal",
            phase: Phase::Setup
        })
    );
    game.new_game();
    assert!(game.bid().is_err());
    assert!(game.exchange().is_err());
    assert!(game.play_trick().is_err());
    assert!(game.compute_score().is_err());
    assert!(!game.is_game_over());
}

#[test]
fn test_deal_hands_out_every_card_once() {
    let mut game = engine(AiLevel::Random, 2);
    game.new_game();
    game.deal().unwrap();
    let mut seen = game.widow().clone();
    assert_eq!(seen.len(), WIDOW_SIZE);
    for player in game.players() {
        assert_eq!(player.hand().len(), HAND_SIZE);
        for card in player.hand().iter() {
            assert!(seen.add(card), "{card} dealt twice");
        }
    }
    assert_eq!(seen.len(), 46);
    assert_eq!(game.turn(), game.dealer().next());
}

#[test]
fn test_a_round_plays_ten_tricks() {
    let mut game = engine(AiLevel::Advanced, 3);
    game.new_game();
    let dealer = game.dealer();
    let round = game.play_round().unwrap();
    assert_eq!(game.phase(), Phase::Scored);
    assert_eq!(game.tricks_played(), HAND_SIZE);
    assert_eq!(game.team_tricks().iter().sum::<usize>(), HAND_SIZE);
    assert_eq!(game.team_scores(), round);
    assert_eq!(game.dealer(), dealer.next());
    assert!(game.players().iter().all(|player| player.hand().is_empty()));
    assert_eq!(game.widow().len(), WIDOW_SIZE);
    assert!(game.contract_holder().is_some());
}

#[test]
fn test_partners_share_a_score() {
    let mut game = engine(AiLevel::Basic, 4);
    game.new_game();
    for _ in 0..3 {
        game.play_round().unwrap();
        if game.is_game_over() {
            break;
        }
    }
    for seat in all::<Seat>() {
        assert_eq!(game.player(seat).score(), game.player(seat.partner()).score());
    }
}

#[test]
fn test_game_over_is_announced_once() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut game = engine(AiLevel::Random, 5);
    let log = events.clone();
    game.add_listener(move |event: &GameEvent| log.borrow_mut().push(event.clone()));
    let winners = game.play_game().unwrap();
    assert!(game.is_game_over());
    assert!(game.is_game_over());
    let over = events
        .borrow()
        .iter()
        .filter(|event| matches!(event, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(over, 1);
    for seat in winners.seats() {
        assert!(game.player(seat).is_game_winner());
    }
    assert!(!game.player(winners.other().seats()[0]).is_game_winner());
}

#[test]
fn test_playable_cards_follow_the_lead() {
    let mut game = engine(AiLevel::Basic, 6);
    game.new_game();
    loop {
        game.deal().unwrap();
        if game.bid().unwrap().is_some() {
            break;
        }
    }
    game.exchange().unwrap();
    let holder = game.contract_holder().unwrap();
    let contract = game.contract().unwrap();
    let lead = game.playable_cards(holder).unwrap();
    let expected = game.player(holder).hand().can_lead(contract.is_no_trump());
    assert_eq!(lead, expected);
}

#[cfg(test)]
struct Greedy;

#[cfg(test)]
impl BiddingStrategy for Greedy {
    fn select_bid(&mut self, _: &[Option<Bid>; PLAYERS], _: Seat, _: &Hand) -> Bid {
        Bid::new(6, None).unwrap()
    }
}

#[cfg(test)]
struct Lazy;

#[cfg(test)]
impl CardExchangeStrategy for Lazy {
    fn select_cards_to_discard(&mut self, _: &[Bid; PLAYERS], _: Seat, _: &Hand) -> CardList {
        CardList::new()
    }
}

#[cfg(test)]
struct First;

#[cfg(test)]
impl PlayingStrategy for First {
    fn play(&mut self, _: &Trick, hand: &Hand) -> Card {
        hand.first().unwrap()
    }
}

#[cfg(test)]
fn stubborn(seat: Seat) -> Player {
    Player::with_strategies(seat.to_string(), Box::new(Greedy), Box::new(Lazy), Box::new(First))
}

#[test]
#[should_panic(expected = "without beating")]
fn test_repeating_a_bid_is_a_contract_violation() {
    let players: Vec<Player> = all::<Seat>().map(stubborn).collect();
    let mut game = GameEngine::seeded(players.try_into().unwrap(), 7);
    game.new_game();
    game.deal().unwrap();
    let _ = game.bid();
}
