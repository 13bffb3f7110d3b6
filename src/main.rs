use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use lane_sim::simulation::{RunState, SimConfig, SimWorld, VehicleClass};

#[derive(Parser)]
#[command(name = "lane_sim")]
#[command(about = "Lane-based traffic simulation with overtaking")]
struct Cli {
    /// Number of lanes on the track
    #[arg(long, default_value = "2")]
    lanes: usize,

    /// Vehicles spawned per lane
    #[arg(long, default_value = "3")]
    vehicles: usize,

    /// Maximum number of ticks to run
    #[arg(long, default_value = "1000")]
    ticks: u32,

    /// Seed for reproducible vehicle class selection
    #[arg(long)]
    seed: Option<u64>,

    /// Disable overtaking
    #[arg(long)]
    no_lane_changes: bool,

    /// Ticks between track redraws
    #[arg(long, default_value = "25")]
    draw_every: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = SimConfig {
        lane_changes_enabled: !cli.no_lane_changes,
        ..SimConfig::default()
    };
    let mut world = SimWorld::new(config);

    for index in 0..cli.lanes {
        world.add_lane(100.0 + 400.0 * index as f32);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let classes = [VehicleClass::Small, VehicleClass::Big];
    for lane_index in 0..cli.lanes {
        for _ in 0..cli.vehicles {
            let class = *classes.choose(&mut rng).context("no vehicle classes")?;
            world.add_vehicle(lane_index, class)?;
        }
    }

    println!("Initial state:");
    print_summary(&world);
    draw_track(&world);

    world.start();

    let mut tick = 0;
    while tick < cli.ticks && world.state == RunState::Running {
        tick += 1;
        world.tick();

        if cli.draw_every > 0 && tick % cli.draw_every == 0 {
            println!("--- After tick {} ---", tick);
            draw_track(&world);
        }
    }

    println!("=== Final state (tick {}) ===", tick);
    print_summary(&world);
    draw_track(&world);

    Ok(())
}

/// Print a summary of the world state
fn print_summary(world: &SimWorld) {
    println!("=== Lane Simulation Summary ===");
    println!("{}", world.summary());
    for lane in &world.lanes {
        println!(
            "--- Lane {} (offset {:.0}) ---",
            lane.identifier, lane.lateral_offset
        );
        for vehicle in &lane.vehicles {
            println!(
                "  {} [{}]: pos={:.1}, speed={:.2}, accel={:.2}",
                vehicle.label, vehicle.color, vehicle.position, vehicle.speed, vehicle.acceleration
            );
        }
    }
}

/// Draw the track in the terminal, one row per lane
fn draw_track(world: &SimWorld) {
    const WIDTH: usize = 100;

    // Span from the rearmost vehicle to a little past the finish line
    let mut min_pos = world.config.start_line - 40.0;
    for lane in &world.lanes {
        for vehicle in &lane.vehicles {
            min_pos = min_pos.min(vehicle.position);
        }
    }
    let max_pos = world.config.finish_line + 20.0;
    let scale = WIDTH as f32 / (max_pos - min_pos);
    let to_col = |pos: f32| -> usize { (((pos - min_pos) * scale) as usize).min(WIDTH - 1) };

    println!();
    for lane in &world.lanes {
        let mut row = vec!['.'; WIDTH];
        row[to_col(world.config.finish_line)] = '|';
        for vehicle in &lane.vehicles {
            let rear = to_col(vehicle.position);
            let front = to_col(vehicle.leading_edge());
            for cell in row.iter_mut().take(front).skip(rear) {
                *cell = '=';
            }
            row[front] = '>';
        }
        let line: String = row.into_iter().collect();
        println!("lane {} {}", lane.identifier, line);
    }
    println!();
}
