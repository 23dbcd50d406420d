use std::cell::RefCell;
use std::rc::Rc;

use enum_iterator::all;
use fivehundred::{AiConfig, AiLevel, GameEngine, GameEvent, Phase, Player, Seat, PLAYERS};

fn table(levels: [AiLevel; PLAYERS], seed: u64) -> [Player; PLAYERS] {
    let config = AiConfig::default();
    let players: Vec<Player> = all::<Seat>()
        .zip(levels)
        .map(|(seat, level)| {
            Player::robot(format!("{seat} ({level})"), level, &config, seed * 4 + seat.index() as u64)
                .unwrap()
        })
        .collect();
    players.try_into().unwrap()
}

#[test]
fn test_thousand_games_all_finish_past_five_hundred() {
    let levels: Vec<AiLevel> = all::<AiLevel>().collect();
    for seed in 0..1000u64 {
        let pick = |offset: u64| levels[((seed + offset) % levels.len() as u64) as usize];
        let mut game = GameEngine::seeded(table([pick(0), pick(1), pick(2), pick(0)], seed), seed);
        let winners = game.play_game().unwrap();
        assert_eq!(game.phase(), Phase::GameOver);
        let scores = game.team_scores();
        assert!(
            scores.iter().any(|score| *score <= -500 || *score >= 500),
            "game {seed} ended at {scores:?}"
        );
        assert!(
            scores[winners.index()] >= 500 || scores[winners.other().index()] <= -500,
            "game {seed}: {winners} won at {scores:?}"
        );
    }
}

#[test]
fn test_events_arrive_in_round_order() {
    let events = Rc::new(RefCell::new(Vec::<GameEvent>::new()));
    let mut game = GameEngine::seeded(table([AiLevel::Advanced; PLAYERS], 42), 42);
    let log = events.clone();
    game.add_listener(move |event: &GameEvent| log.borrow_mut().push(event.clone()));
    game.new_game();
    game.play_round().unwrap();

    let names: Vec<&str> = events.borrow().iter().map(GameEvent::name).collect();
    assert_eq!(names.first(), Some(&"new game"));
    assert_eq!(names.last(), Some(&"score"));

    // Passed-out deals come first; the round proper starts at the last deal.
    let start = names.iter().rposition(|name| *name == "deal").unwrap();
    let mut expected = vec!["deal", "bid", "exchange"];
    for _ in 0..10 {
        expected.extend(["single play"; 4]);
        expected.push("play");
    }
    expected.push("score");
    assert_eq!(&names[start..], expected.as_slice());
    for pair in names[1..start].chunks(2) {
        assert_eq!(pair, ["deal", "bid"]);
    }
}

#[test]
fn test_every_trick_is_won_by_its_highest_card() {
    let events = Rc::new(RefCell::new(Vec::<GameEvent>::new()));
    let mut game = GameEngine::seeded(table([AiLevel::Basic; PLAYERS], 7), 7);
    let log = events.clone();
    game.add_listener(move |event: &GameEvent| log.borrow_mut().push(event.clone()));
    game.play_game().unwrap();

    let mut leader = None;
    for event in events.borrow().iter() {
        match event {
            GameEvent::Exchange { contract_holder, .. } => leader = Some(*contract_holder),
            GameEvent::Play { winner, trick } => {
                assert_eq!(Some(trick.leader()), leader);
                assert_eq!(trick.len(), PLAYERS);
                assert_eq!(trick.winner(), Some(*winner));
                leader = Some(*winner);
            }
            _ => {}
        }
    }
}

#[test]
fn test_seeded_games_replay_exactly() {
    let run = || {
        let events = Rc::new(RefCell::new(Vec::<GameEvent>::new()));
        let levels = [AiLevel::Random, AiLevel::Basic, AiLevel::Advanced, AiLevel::Basic];
        let mut game = GameEngine::seeded(table(levels, 99), 99);
        let log = events.clone();
        game.add_listener(move |event: &GameEvent| log.borrow_mut().push(event.clone()));
        game.play_game().unwrap();
        let events = events.borrow().clone();
        events
    };
    assert_eq!(run(), run());
}
