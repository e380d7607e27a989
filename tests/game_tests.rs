use battleship_link::render::Status;
use battleship_link::{
    BoardError, Cell, Cursor, FleetConfig, Game, GameError, Intent, Message, NullSink, Outcome,
    Phase, RenderEvent, Seat, ShipId, ShotOutcome, Turn,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn started(seat: Seat, seed: u64) -> Game<8> {
    let mut game = Game::new(FleetConfig::default(), seat).unwrap();
    game.start(&mut SmallRng::seed_from_u64(seed), &mut NullSink).unwrap();
    game
}

fn move_to(game: &mut Game<8>, x: usize, y: usize) {
    while game.cursor() != Cursor::new(x, y) {
        let c = game.cursor();
        let intent = if c.x < x {
            Intent::Right
        } else if c.x > x {
            Intent::Left
        } else if c.y < y {
            Intent::Down
        } else {
            Intent::Up
        };
        assert_eq!(game.handle_intent(intent, &mut NullSink), None);
    }
}

/// Fire at the first unknown cell and have the peer report a miss.
fn fire_and_miss(game: &mut Game<8>) {
    let (x, y) = (0..8)
        .flat_map(|y| (0..8).map(move |x| (x, y)))
        .find(|&(x, y)| game.view().is_unknown(x, y).unwrap())
        .unwrap();
    move_to(game, x, y);
    let shot = game.handle_intent(Intent::Fire, &mut NullSink);
    assert_eq!(shot, Some(Message::ShotRequest { x: x as u8, y: y as u8 }));
    let replies = game
        .handle_message(
            Message::ShotResult {
                x: x as u8,
                y: y as u8,
                outcome: ShotOutcome::Miss,
            },
            &mut NullSink,
        )
        .unwrap();
    assert!(replies.is_empty());
}

fn ship_cells(game: &Game<8>) -> Vec<(usize, usize)> {
    game.ocean().placements().iter().flat_map(|p| p.cells()).collect()
}

#[test]
fn start_places_fleet_and_arms_trackers() {
    let mut events = Vec::new();
    let mut game = Game::<8>::new(FleetConfig::default(), Seat::PlayerOne).unwrap();
    assert_eq!(game.phase(), Phase::Standby);
    game.start(&mut SmallRng::seed_from_u64(5), &mut events).unwrap();

    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.turn(), Turn::Ours);
    assert_eq!(game.own_fleet().healths(), &[4, 3, 2]);
    assert_eq!(game.enemy_fleet().healths(), &[4, 3, 2]);
    assert_eq!(game.ocean().occupied().count(), 9);
    assert_eq!(game.view().shots_fired(), 0);
    assert!(events.contains(&RenderEvent::Status(Status::YourTurn)));
    let own_cells = events
        .iter()
        .filter(|e| matches!(e, RenderEvent::Cell { .. }))
        .count();
    assert_eq!(own_cells, 64);

    assert_eq!(
        game.start(&mut SmallRng::seed_from_u64(5), &mut NullSink),
        Err(GameError::WrongPhase(Phase::Playing))
    );
}

#[test]
fn second_seat_waits_for_the_first_shot() {
    let game = started(Seat::PlayerTwo, 1);
    assert_eq!(game.turn(), Turn::Theirs);
}

#[test]
fn cursor_clamps_at_grid_edges() {
    let mut game = started(Seat::PlayerOne, 2);
    let mut events = Vec::new();
    game.handle_intent(Intent::Up, &mut events);
    game.handle_intent(Intent::Left, &mut events);
    assert_eq!(game.cursor(), Cursor::new(0, 0));
    assert!(events.is_empty());

    move_to(&mut game, 7, 7);
    game.handle_intent(Intent::Down, &mut events);
    game.handle_intent(Intent::Right, &mut events);
    assert_eq!(game.cursor(), Cursor::new(7, 7));
    assert!(events.is_empty());
}

#[test]
fn second_fire_is_rejected_while_a_shot_is_in_flight() {
    let mut game = started(Seat::PlayerOne, 3);
    assert_eq!(
        game.handle_intent(Intent::Fire, &mut NullSink),
        Some(Message::ShotRequest { x: 0, y: 0 })
    );
    assert_eq!(game.pending_shot(), Some((0, 0)));

    game.handle_intent(Intent::Right, &mut NullSink);
    let mut events = Vec::new();
    assert_eq!(game.handle_intent(Intent::Fire, &mut events), None);
    assert_eq!(events, vec![RenderEvent::Status(Status::AwaitingResult)]);
    assert_eq!(game.pending_shot(), Some((0, 0)));
}

#[test]
fn firing_on_their_turn_is_rejected() {
    let mut game = started(Seat::PlayerTwo, 4);
    let mut events = Vec::new();
    assert_eq!(game.handle_intent(Intent::Fire, &mut events), None);
    assert_eq!(events, vec![RenderEvent::Status(Status::NotYourTurn)]);
}

#[test]
fn firing_at_a_resolved_cell_is_rejected() {
    let mut game = started(Seat::PlayerOne, 5);
    fire_and_miss(&mut game);
    // their shot back, so the turn returns to us with the cursor still on (0, 0)
    game.handle_message(Message::ShotRequest { x: 0, y: 0 }, &mut NullSink)
        .unwrap();
    assert_eq!(game.turn(), Turn::Ours);

    let mut events = Vec::new();
    assert_eq!(game.handle_intent(Intent::Fire, &mut events), None);
    assert_eq!(events, vec![RenderEvent::Status(Status::AlreadyFiredHere)]);
    assert_eq!(game.view().cell(0, 0), Ok(Cell::Miss));
}

#[test]
fn hit_and_sunk_results_update_the_view() {
    let mut game = started(Seat::PlayerOne, 6);
    game.handle_intent(Intent::Fire, &mut NullSink);
    let mut events = Vec::new();
    game.handle_message(
        Message::ShotResult {
            x: 0,
            y: 0,
            outcome: ShotOutcome::Sunk(ShipId::new(3).unwrap()),
        },
        &mut events,
    )
    .unwrap();
    assert_eq!(game.view().cell(0, 0), Ok(Cell::Hit));
    assert_eq!(game.enemy_fleet().healths(), &[4, 3, 0]);
    assert_eq!(game.turn(), Turn::Theirs);
    assert!(events.contains(&RenderEvent::Status(Status::Sank("D-stroy".into()))));
}

#[test]
fn losing_the_last_ship_ends_the_game() {
    let mut game = started(Seat::PlayerTwo, 7);
    let cells = ship_cells(&game);
    let (last, rest) = cells.split_last().unwrap();

    for &(x, y) in rest {
        let replies = game
            .handle_message(Message::ShotRequest { x: x as u8, y: y as u8 }, &mut NullSink)
            .unwrap();
        assert_eq!(replies.len(), 1);
        assert!(matches!(
            replies[0],
            Message::ShotResult {
                outcome: ShotOutcome::Hit | ShotOutcome::Sunk(_),
                ..
            }
        ));
        assert_eq!(game.phase(), Phase::Playing);
        fire_and_miss(&mut game);
    }

    let mut events = Vec::new();
    let replies = game
        .handle_message(
            Message::ShotRequest {
                x: last.0 as u8,
                y: last.1 as u8,
            },
            &mut events,
        )
        .unwrap();
    assert_eq!(replies.len(), 2);
    assert!(matches!(
        replies[0],
        Message::ShotResult {
            outcome: ShotOutcome::Sunk(_),
            ..
        }
    ));
    assert_eq!(replies[1], Message::FleetDestroyed);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.outcome(), Some(Outcome::Lost));
    assert!(game.own_fleet().is_destroyed());
    assert_eq!(events.last(), Some(&RenderEvent::Defeat));

    assert_eq!(game.handle_intent(Intent::Fire, &mut NullSink), None);
    assert_eq!(
        game.handle_message(Message::ShotRequest { x: 0, y: 0 }, &mut NullSink),
        Err(GameError::WrongPhase(Phase::GameOver))
    );
}

#[test]
fn fleet_destroyed_from_peer_wins() {
    let mut game = started(Seat::PlayerOne, 8);
    fire_and_miss(&mut game);
    let mut events = Vec::new();
    game.handle_message(Message::FleetDestroyed, &mut events).unwrap();
    assert_eq!(game.outcome(), Some(Outcome::Won));
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(events, vec![RenderEvent::Victory]);
}

#[test]
fn out_of_turn_and_mismatched_payloads_change_nothing() {
    let mut game = started(Seat::PlayerOne, 9);
    let before = game.clone();

    assert_eq!(
        game.handle_message(Message::ShotRequest { x: 1, y: 1 }, &mut NullSink),
        Err(GameError::OutOfTurn)
    );
    assert_eq!(
        game.handle_message(
            Message::ShotResult {
                x: 1,
                y: 1,
                outcome: ShotOutcome::Miss
            },
            &mut NullSink
        ),
        Err(GameError::NoShotOutstanding)
    );
    assert_eq!(
        game.handle_message(Message::Ready { version: 1 }, &mut NullSink),
        Err(GameError::UnexpectedMessage)
    );
    assert!(game.handle_message(Message::ShotRequest { x: 8, y: 0 }, &mut NullSink).is_err());
    assert_eq!(game.ocean(), before.ocean());
    assert_eq!(game.turn(), before.turn());

    game.handle_intent(Intent::Fire, &mut NullSink);
    assert_eq!(
        game.handle_message(
            Message::ShotResult {
                x: 2,
                y: 0,
                outcome: ShotOutcome::Hit
            },
            &mut NullSink
        ),
        Err(GameError::ResultMismatch {
            expected: (0, 0),
            got: (2, 0)
        })
    );
    assert_eq!(game.view().shots_fired(), 0);
    assert_eq!(game.pending_shot(), Some((0, 0)));
}

#[test]
fn incoming_repeat_shot_is_rejected() {
    let mut game = started(Seat::PlayerTwo, 10);
    game.handle_message(Message::ShotRequest { x: 3, y: 3 }, &mut NullSink)
        .unwrap();
    fire_and_miss(&mut game);
    assert_eq!(
        game.handle_message(Message::ShotRequest { x: 3, y: 3 }, &mut NullSink),
        Err(GameError::Board(BoardError::AlreadyResolved { x: 3, y: 3 }))
    );
    assert_eq!(game.turn(), Turn::Theirs);
}

#[test]
fn reset_only_after_the_game() {
    let mut game = started(Seat::PlayerOne, 11);
    assert_eq!(game.reset(&mut NullSink), Err(GameError::WrongPhase(Phase::Playing)));

    fire_and_miss(&mut game);
    game.handle_intent(Intent::Right, &mut NullSink);
    game.handle_message(Message::FleetDestroyed, &mut NullSink).unwrap();
    let mut events = Vec::new();
    game.reset(&mut events).unwrap();

    assert_eq!(events, vec![RenderEvent::Lobby]);
    assert_eq!(game.phase(), Phase::Standby);
    assert_eq!(game.outcome(), None);
    assert_eq!(game.cursor(), Cursor::default());
    assert!(game.ocean().rows().iter().flatten().all(|&c| c == Cell::Empty));
    assert_eq!(game.view().shots_fired(), 0);
    assert!(game.own_fleet().healths().iter().all(|&h| h == 0));
    assert!(game.enemy_fleet().healths().iter().all(|&h| h == 0));

    game.start(&mut SmallRng::seed_from_u64(12), &mut NullSink).unwrap();
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.own_fleet().healths(), &[4, 3, 2]);
}

#[test]
fn impossible_fleet_never_reaches_standby() {
    let fleet: FleetConfig = FleetConfig::new(vec!["Huge:9".parse().unwrap()]);
    assert!(Game::<8>::new(fleet, Seat::PlayerOne).is_err());
}

#[test]
fn concession_only_after_our_shot_is_answered() {
    let mut game = started(Seat::PlayerOne, 13);
    assert_eq!(
        game.handle_message(Message::FleetDestroyed, &mut NullSink),
        Err(GameError::UnexpectedMessage)
    );
    game.handle_intent(Intent::Fire, &mut NullSink);
    assert_eq!(
        game.handle_message(Message::FleetDestroyed, &mut NullSink),
        Err(GameError::UnexpectedMessage)
    );
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.pending_shot(), Some((0, 0)));

    game.handle_message(
        Message::ShotResult {
            x: 0,
            y: 0,
            outcome: ShotOutcome::Hit,
        },
        &mut NullSink,
    )
    .unwrap();
    game.handle_message(Message::FleetDestroyed, &mut NullSink).unwrap();
    assert_eq!(game.outcome(), Some(Outcome::Won));
}
