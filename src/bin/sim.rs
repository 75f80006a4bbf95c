use std::io::Write;
use std::thread;
use std::time::Instant;

use clap::Parser;
use resource_realms::cli::{
    GameStats, PlayerInstance, PlayerSpec, StatisticsAccumulator, print_player_help,
};
use resource_realms::game::{Game, GameConfig};
use resource_realms::types::Color;

#[derive(Debug, Parser, Clone)]
#[command(name = "realms-sim")]
#[command(about = "Resource Realms simulator - play seeded games between player strategies")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 5)]
    num: u32,

    /// Comma-separated player codes (e.g., R,R,R,R or F,F,R,R)
    /// Use ':' to set player-specific params (e.g., F:0.1 for epsilon)
    #[arg(long, default_value = "R,R,R,R")]
    players: String,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Victory points needed to win
    #[arg(long, default_value_t = 10)]
    vps_to_win: u32,

    /// Cap on the longest-road search depth
    #[arg(long)]
    max_trail_depth: Option<usize>,

    /// Opponent settlements cut longest-road trails
    #[arg(long)]
    opponents_break_roads: bool,

    /// Show player codes and exit
    #[arg(long)]
    help_players: bool,

    /// Silence console output
    #[arg(long)]
    quiet: bool,

    /// Number of worker threads for parallel execution
    #[arg(long, default_value_t = 1)]
    workers: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.help_players {
        print_player_help();
        return;
    }

    let specs: Vec<PlayerSpec> = args.players.split(',').map(PlayerSpec::parse).collect();
    if !(2..=4).contains(&specs.len()) {
        eprintln!("Error: Must specify 2-4 players");
        std::process::exit(1);
    }
    for spec in &specs {
        if spec.build(0).is_none() {
            eprintln!("Error: Unknown player code '{}'", spec.code);
            eprintln!("Use --help-players to see available codes");
            std::process::exit(1);
        }
    }

    let mut stats = StatisticsAccumulator::new();
    if args.workers > 1 {
        run_parallel_simulations(&args, &specs, &mut stats);
    } else {
        run_sequential_simulations(&args, &specs, &mut stats);
    }

    if !args.quiet {
        print_summary(&stats, &specs);
    }
}

fn config_for(args: &Args, num_players: usize, game_idx: u64) -> GameConfig {
    GameConfig {
        num_players,
        vps_to_win: args.vps_to_win,
        max_trail_depth: args.max_trail_depth,
        opponents_break_roads: args.opponents_break_roads,
        seed: args.seed + game_idx,
        ..GameConfig::default()
    }
}

fn seat_players(specs: &[PlayerSpec], seed: u64) -> Vec<PlayerInstance> {
    specs
        .iter()
        .enumerate()
        .filter_map(|(seat, spec)| spec.build(seed.wrapping_mul(31).wrapping_add(seat as u64)))
        .collect()
}

fn run_sequential_simulations(
    args: &Args,
    specs: &[PlayerSpec],
    stats: &mut StatisticsAccumulator,
) {
    for game_idx in 0..args.num {
        let config = config_for(args, specs.len(), game_idx as u64);
        let mut players = seat_players(specs, config.seed);

        let start = Instant::now();
        let mut game = Game::new(config);
        let winner = game.play(&mut players);
        let duration = start.elapsed();

        stats.after(&game, duration);

        if !args.quiet {
            let last_n = 10;
            if game_idx < last_n || game_idx >= args.num.saturating_sub(last_n) {
                let winner_str = winner
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "None".to_string());
                let seating: String = game
                    .state
                    .players
                    .iter()
                    .map(|p| p.color.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                println!(
                    "Game {:>4}: Seating=[{}], Winner={:>6}, Turns={:>4}, Duration={:?}",
                    game_idx + 1,
                    seating,
                    winner_str,
                    game.turn,
                    duration
                );
            } else if (game_idx + 1) % 100 == 0 {
                print!(".");
                let _ = std::io::stdout().flush();
            }
        }
    }
}

fn run_parallel_simulations(
    args: &Args,
    specs: &[PlayerSpec],
    stats: &mut StatisticsAccumulator,
) {
    let games_per_worker = args.num as usize / args.workers;
    let remainder = args.num as usize % args.workers;

    thread::scope(|scope| {
        let handles: Vec<_> = (0..args.workers)
            .map(|worker_id| {
                let num_games = games_per_worker + usize::from(worker_id < remainder);
                let start_idx = worker_id * games_per_worker + worker_id.min(remainder);
                scope.spawn(move || {
                    let mut local = GameStats::new();
                    for game_idx in start_idx..start_idx + num_games {
                        let config = config_for(args, specs.len(), game_idx as u64);
                        let mut players = seat_players(specs, config.seed);
                        let start = Instant::now();
                        let mut game = Game::new(config);
                        game.play(&mut players);
                        local.record_game(&game, start.elapsed());
                    }
                    local
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(local) => stats.stats.merge(local),
                Err(_) => log::error!("a simulation worker panicked"),
            }
        }
    });
}

fn print_summary(stats: &StatisticsAccumulator, specs: &[PlayerSpec]) {
    let stats = &stats.stats;
    println!("\n{}", "=".repeat(80));
    println!("SIMULATION SUMMARY");
    println!("{}", "=".repeat(80));

    println!("\nPlayer Summary:");
    println!(
        "{:<25} {:<8} {:<10} {:<8} {:<8} {:<8}",
        "Player", "Wins", "Win Rate", "Avg VP", "Road", "Army"
    );
    println!("{}", "-".repeat(70));

    for (spec, color) in specs.iter().zip(Color::ORDERED) {
        let name = spec.build(0).map_or("?", |p| p.name());
        println!(
            "{:<25} {:<8} {:<9.1}% {:<8.2} {:<8} {:<8}",
            format!("{name} ({color})"),
            stats.wins.get(&color).copied().unwrap_or(0),
            stats.win_rate(color),
            stats.avg_vps(color),
            stats.longest_road_holders.get(&color).copied().unwrap_or(0),
            stats.largest_army_holders.get(&color).copied().unwrap_or(0),
        );
    }

    println!("\nGame Summary:");
    println!("  Total Games: {}", stats.games);
    println!("  Avg Turns: {:.2}", stats.get_avg_turns());
    println!("  Avg Ticks: {:.2}", stats.get_avg_ticks());
    println!("  Avg Duration: {:.2?}", stats.get_avg_duration());
}
