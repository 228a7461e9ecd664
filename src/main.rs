use bucketq::graph::Graph;
use bucketq::queue::{BucketQueue, Error};
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Random insert/pop mix over a uniform queue
    Churn,
    /// Shortest paths over a random graph via Dial's algorithm
    Dijkstra,
}

#[derive(Parser)]
#[command(name = "bucketq")]
#[command(about = "Fixed-capacity bucket queue workload driver", long_about = None)]
struct Args {
    /// Workload to run
    #[arg(value_enum)]
    mode: Mode,

    /// Number of priority classes (churn mode)
    #[arg(short = 'c', long, default_value = "64")]
    classes: usize,

    /// Capacity of each priority class (churn mode)
    #[arg(short = 'k', long, default_value = "1024")]
    capacity: usize,

    /// Number of random operations (churn mode)
    #[arg(short = 'n', long, default_value = "1000000")]
    ops: usize,

    /// Number of graph nodes (dijkstra mode)
    #[arg(long, default_value = "10000")]
    nodes: usize,

    /// Maximum edge weight (dijkstra mode)
    #[arg(short = 'w', long, default_value = "9")]
    max_weight: u32,

    /// RNG seed
    #[arg(short = 's', long, default_value = "0")]
    seed: u64,
}

fn run_churn(args: &Args) {
    let mut queue = match BucketQueue::uniform(args.classes, args.capacity) {
        Ok(queue) => queue,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut inserted = 0usize;
    let mut popped = 0usize;
    let mut rejected = 0usize;

    let start = Instant::now();
    for op in 0..args.ops {
        match rng.gen_range(0..4) {
            // Inserts weighted 2:1:1 against the pops so the queue carries
            // standing load and buckets hit capacity.
            0 | 1 => {
                let priority = rng.gen_range(0..args.classes);
                match queue.insert(op as u32, priority) {
                    Ok(()) => inserted += 1,
                    Err(Error::BucketFull { .. }) => rejected += 1,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            2 => {
                if queue.pop_min().is_some() {
                    popped += 1;
                }
            }
            _ => {
                if queue.pop_max().is_some() {
                    popped += 1;
                }
            }
        }
    }
    let elapsed_ms = start.elapsed().as_millis();

    println!(
        "ops: {:<9}  inserted: {:<9}  popped: {:<9}  rejected: {:<9}  left: {:<9}  elapsed: {} ms",
        args.ops,
        inserted,
        popped,
        rejected,
        queue.len(),
        elapsed_ms
    );
}

fn run_dijkstra(args: &Args) {
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let graph = Graph::random(args.nodes, args.max_weight, &mut rng);

    let start = Instant::now();
    let dist = match graph.shortest_paths(0) {
        Ok(dist) => dist,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed_ms = start.elapsed().as_millis();

    let reachable = dist.iter().filter(|d| d.is_some()).count();
    let longest = dist.iter().flatten().max().copied().unwrap_or(0);

    println!(
        "nodes: {:<9}  reachable: {:<9}  longest: {:<9}  elapsed: {} ms",
        args.nodes, reachable, longest, elapsed_ms
    );
}

fn main() {
    let args = Args::parse();

    match args.mode {
        Mode::Churn => {
            if args.classes == 0 {
                eprintln!("Error: churn mode needs at least one priority class");
                std::process::exit(1);
            }
            run_churn(&args);
        }
        Mode::Dijkstra => {
            if args.nodes == 0 {
                eprintln!("Error: dijkstra mode needs at least one node");
                std::process::exit(1);
            }
            run_dijkstra(&args);
        }
    }
}
