use battleship_link::{
    Autopilot, Device, FleetConfig, Game, InMemoryTransport, NullSink, Outcome, Phase,
    RenderEvent, Seat, ShipSpec,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

type Sim<S> = Device<8, Autopilot, InMemoryTransport, S>;

fn pair(config: FleetConfig, seed: u64) -> (Sim<Vec<RenderEvent>>, Sim<NullSink>) {
    let (t1, t2) = InMemoryTransport::pair();
    let one = Device::new(
        Game::new(config.clone(), Seat::PlayerOne).unwrap(),
        Autopilot::seeded(seed),
        t1,
        Vec::new(),
        SmallRng::seed_from_u64(seed + 1),
    );
    let two = Device::new(
        Game::new(config, Seat::PlayerTwo).unwrap(),
        Autopilot::seeded(seed + 2),
        t2,
        NullSink,
        SmallRng::seed_from_u64(seed + 3),
    );
    (one, two)
}

fn agree(a: Outcome, b: Outcome) {
    assert!(matches!(
        (a, b),
        (Outcome::Won, Outcome::Lost) | (Outcome::Lost, Outcome::Won)
    ));
}

#[tokio::test]
async fn autopilots_play_to_a_single_winner() -> anyhow::Result<()> {
    let (mut one, mut two) = pair(FleetConfig::default(), 10);
    let (a, b) = tokio::try_join!(one.run(), two.run())?;
    agree(a, b);

    for dev_game in [one.game(), two.game()] {
        assert_eq!(dev_game.phase(), Phase::GameOver);
    }
    let loser = if a == Outcome::Lost { one.game() } else { two.game() };
    assert!(loser.own_fleet().is_destroyed());
    let winner = if a == Outcome::Won { one.game() } else { two.game() };
    assert!(!winner.own_fleet().is_destroyed());
    assert!(one.shots_fired() >= 9 || two.shots_fired() >= 9);

    let events = one.sink();
    assert_eq!(events.first(), Some(&RenderEvent::Lobby));
    let last = events.last().unwrap();
    assert!(*last == RenderEvent::Victory || *last == RenderEvent::Defeat);
    Ok(())
}

#[tokio::test]
async fn rematch_after_reset() -> anyhow::Result<()> {
    let (mut one, mut two) = pair(FleetConfig::default(), 20);
    let (a, b) = tokio::try_join!(one.run(), two.run())?;
    agree(a, b);

    // a finished device refuses to run again until reset
    assert!(one.run().await.is_err());

    one.reset()?;
    two.reset()?;
    assert_eq!(one.game().phase(), Phase::Standby);
    assert_eq!(one.game().view().shots_fired(), 0);

    let (a, b) = tokio::try_join!(one.run(), two.run())?;
    agree(a, b);
    Ok(())
}

#[tokio::test]
async fn custom_fleet_with_debounce() -> anyhow::Result<()> {
    let fleet = FleetConfig::new(vec![ShipSpec::new("Dinghy", 1), ShipSpec::new("Skiff", 2)]);
    let (one, two) = pair(fleet, 30);
    let mut one = one.with_debounce(Duration::from_millis(1));
    let mut two = two.with_debounce(Duration::from_millis(1));
    let (a, b) = tokio::try_join!(one.run(), two.run())?;
    agree(a, b);
    Ok(())
}

#[tokio::test]
async fn peer_hanging_up_ends_the_run_with_an_error() {
    let (mut one, two) = pair(FleetConfig::default(), 40);
    drop(two);
    assert!(one.run().await.is_err());
}
