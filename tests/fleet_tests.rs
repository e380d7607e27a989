use battleship_link::{Fleet, FleetConfig, FleetError, ShipId, ShipSpec};

fn id(n: u8) -> ShipId {
    ShipId::new(n).unwrap()
}

fn armed(lengths: &[usize]) -> Fleet {
    let config = FleetConfig::new(lengths.iter().map(|&l| ShipSpec::new("S", l)).collect());
    let mut fleet = Fleet::new(config.len());
    fleet.arm(&config);
    fleet
}

#[test]
fn new_fleet_starts_at_zero() {
    let fleet = Fleet::new(3);
    assert_eq!(fleet.healths(), &[0, 0, 0]);
    assert!(fleet.is_destroyed());
}

#[test]
fn destroyed_flips_only_on_last_hit() {
    let mut fleet = armed(&[4, 3, 2]);
    assert_eq!(fleet.healths(), &[4, 3, 2]);

    let hits = [1, 1, 1, 1, 2, 2, 2, 3, 3];
    let mut flips = 0;
    for (i, &ship) in hits.iter().enumerate() {
        let before = fleet.is_destroyed();
        fleet.damage(id(ship)).unwrap();
        if !before && fleet.is_destroyed() {
            flips += 1;
            assert_eq!(i, hits.len() - 1);
        }
    }
    assert_eq!(flips, 1);
    assert_eq!(fleet.afloat(), 0);
}

#[test]
fn damage_reports_remaining_health() {
    let mut fleet = armed(&[2]);
    assert_eq!(fleet.damage(id(1)), Ok(1));
    assert_eq!(fleet.damage(id(1)), Ok(0));
    assert_eq!(fleet.damage(id(1)), Err(FleetError::AlreadyDestroyed(id(1))));
    assert_eq!(fleet.health(id(1)), Ok(0));
}

#[test]
fn unknown_ships_are_rejected() {
    let mut fleet = armed(&[3, 2]);
    assert_eq!(fleet.damage(id(3)), Err(FleetError::UnknownShip(id(3))));
    assert_eq!(fleet.sink(id(9)), Err(FleetError::UnknownShip(id(9))));
    assert_eq!(fleet.healths(), &[3, 2]);
}

#[test]
fn sink_is_idempotent() {
    let mut fleet = armed(&[3, 2]);
    assert_eq!(fleet.sink(id(2)), Ok(true));
    assert_eq!(fleet.sink(id(2)), Ok(false));
    assert_eq!(fleet.afloat(), 1);
    assert!(!fleet.is_destroyed());
    assert_eq!(fleet.sink(id(1)), Ok(true));
    assert!(fleet.is_destroyed());
}

#[test]
fn clear_zeroes_without_shrinking() {
    let mut fleet = armed(&[4, 3, 2]);
    fleet.clear();
    assert_eq!(fleet.len(), 3);
    assert!(fleet.is_destroyed());
}
