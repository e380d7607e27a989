use anyhow::anyhow;
use battleship_link::display::{render_boards, LogSink};
use battleship_link::{
    init_logging, Autopilot, Device, FleetConfig, Game, InMemoryTransport, OceanGrid, Outcome,
    Seat, ShipSpec, GRID_SIZE,
};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Two-device Battleship over a simulated peer link", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run two self-playing devices against each other.
    Duel {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long = "ship", value_name = "NAME:LEN", help = "Fleet entry, repeat per ship in placement order")]
        ships: Vec<ShipSpec>,
        #[arg(long, default_value_t = 1)]
        games: usize,
        #[arg(long, default_value_t = 0, help = "Minimum spacing between button presses")]
        debounce_ms: u64,
        #[arg(long, help = "Print both devices' grids after each game")]
        show_boards: bool,
    },
    /// Print one random fleet placement.
    Place {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long = "ship", value_name = "NAME:LEN")]
        ships: Vec<ShipSpec>,
    },
}

fn fleet_from(ships: Vec<ShipSpec>) -> FleetConfig {
    if ships.is_empty() {
        FleetConfig::default()
    } else {
        FleetConfig::new(ships)
    }
}

fn rng_for(seed: Option<u64>, offset: u64) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s.wrapping_add(offset)),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Duel {
            seed,
            ships,
            games,
            debounce_ms,
            show_boards,
        } => {
            let fleet = fleet_from(ships);
            if let Some(s) = seed {
                println!("Using fixed seed: {} (games will be reproducible)", s);
            }
            let one = Game::<GRID_SIZE>::new(fleet.clone(), Seat::PlayerOne).map_err(|e| anyhow!(e))?;
            let two = Game::<GRID_SIZE>::new(fleet, Seat::PlayerTwo).map_err(|e| anyhow!(e))?;
            let (link_one, link_two) = InMemoryTransport::pair();
            let debounce = Duration::from_millis(debounce_ms);

            let mut dev_one = Device::new(
                one,
                Autopilot::new(rng_for(seed, 2)),
                link_one,
                LogSink::new("P1"),
                rng_for(seed, 0),
            )
            .with_debounce(debounce);
            let mut dev_two = Device::new(
                two,
                Autopilot::new(rng_for(seed, 3)),
                link_two,
                LogSink::new("P2"),
                rng_for(seed, 1),
            )
            .with_debounce(debounce);

            let mut wins = [0usize; 2];
            for round in 1..=games {
                if round > 1 {
                    dev_one.reset()?;
                    dev_two.reset()?;
                }
                let (res_one, res_two) = tokio::try_join!(dev_one.run(), dev_two.run())?;
                let winner = match (res_one, res_two) {
                    (Outcome::Won, Outcome::Lost) => 0,
                    (Outcome::Lost, Outcome::Won) => 1,
                    other => return Err(anyhow!("devices disagree on the result: {:?}", other)),
                };
                wins[winner] += 1;
                println!(
                    "game {}: player {} won (shots fired: P1 {}, P2 {})",
                    round,
                    winner + 1,
                    dev_one.shots_fired(),
                    dev_two.shots_fired()
                );
                if show_boards {
                    println!("-- P1 --\n{}", render_boards(dev_one.game()));
                    println!("-- P2 --\n{}", render_boards(dev_two.game()));
                }
            }
            println!("final score: P1 {} - P2 {}", wins[0], wins[1]);
        }
        Commands::Place { seed, ships } => {
            let fleet = fleet_from(ships);
            fleet.validate::<GRID_SIZE>().map_err(|e| anyhow!(e))?;
            let grid = OceanGrid::<GRID_SIZE>::place_fleet_randomly(&mut rng_for(seed, 0), &fleet)
                .map_err(|e| anyhow!(e))?;
            println!("{:?}", grid);
            for p in grid.placements() {
                let name = fleet.get(p.id()).map(|s| s.name()).unwrap_or("?");
                println!("{} {:<10} at {:?} {:?}", p.id(), name, p.origin(), p.orientation());
            }
        }
    }
    Ok(())
}
