use battleship_link::{Cell, FleetConfig, OceanGrid, ShipSpec, ShotOutcome};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn fleet(lengths: &[usize]) -> FleetConfig {
    FleetConfig::new(lengths.iter().map(|&l| ShipSpec::new("S", l)).collect())
}

fn check_layout<const N: usize>(seed: u64, lengths: &[usize]) -> Result<(), TestCaseError> {
    let config = fleet(lengths);
    prop_assume!(config.validate::<N>().is_ok());
    let mut rng = SmallRng::seed_from_u64(seed);
    let grid = OceanGrid::<N>::place_fleet_randomly(&mut rng, &config).unwrap();

    prop_assert_eq!(grid.placements().len(), lengths.len());
    prop_assert_eq!(grid.occupied().count(), lengths.iter().sum::<usize>());
    for p in grid.placements() {
        let len = lengths[p.id().index()];
        let cells: Vec<_> = p.cells().collect();
        prop_assert_eq!(cells.len(), len);
        for (x, y) in cells {
            prop_assert!(x < N && y < N);
            prop_assert_eq!(grid.cell(x, y).unwrap(), Cell::Ship(p.id()));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placement_fits_on_8x8(seed in any::<u64>(), lengths in prop::collection::vec(1usize..=4, 1..=5)) {
        check_layout::<8>(seed, &lengths)?;
    }

    #[test]
    fn placement_fits_on_10x10(seed in any::<u64>(), lengths in prop::collection::vec(1usize..=6, 1..=6)) {
        check_layout::<10>(seed, &lengths)?;
    }

    #[test]
    fn placement_fits_on_5x5(seed in any::<u64>(), lengths in prop::collection::vec(1usize..=5, 1..=3)) {
        check_layout::<5>(seed, &lengths)?;
    }

    #[test]
    fn hits_equal_ship_cells_after_a_full_sweep(seed in any::<u64>()) {
        let config = FleetConfig::default();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = OceanGrid::<8>::place_fleet_randomly(&mut rng, &config).unwrap();

        let mut order: Vec<(usize, usize)> = (0..8).flat_map(|y| (0..8).map(move |x| (x, y))).collect();
        for i in (1..order.len()).rev() {
            order.swap(i, rng.random_range(0..=i));
        }
        let mut hits = 0;
        let mut sunk = 0;
        for (x, y) in order {
            match grid.apply_incoming_shot(x, y).unwrap() {
                ShotOutcome::Hit => hits += 1,
                ShotOutcome::Sunk(_) => {
                    hits += 1;
                    sunk += 1;
                }
                ShotOutcome::Miss => {}
            }
        }
        prop_assert_eq!(hits, config.total_cells());
        prop_assert_eq!(sunk, config.len());
        prop_assert!(grid.rows().iter().flatten().all(|c| c.is_resolved()));
    }
}
