// src/main.rs

use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;

use reco_lib::{
    db::SnapshotStore,
    models::CustomerId,
    recommend::{RecommendationConfig, RecommendationEngine},
};

struct RunConfig {
    cid: CustomerId,
    snapshot_path: PathBuf,
    seed: Option<u64>,
}

impl RunConfig {
    /// Positional args: customer id, then an optional snapshot path.
    /// RECO_SEED pins the dampening draws for reproducible runs.
    fn from_args() -> Result<Self> {
        let mut args = std::env::args().skip(1);
        let cid = args
            .next()
            .context("Usage: reco <customer-id> [snapshot.json]")?
            .parse::<i64>()
            .context("Customer id must be an integer")?;
        let snapshot_path = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("snapshot.json"));
        let seed = match std::env::var("RECO_SEED") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .context("RECO_SEED must be an unsigned integer")?,
            ),
            Err(_) => None,
        };
        Ok(Self {
            cid: CustomerId(cid),
            snapshot_path,
            seed,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    info!("Starting product recommendation run");
    let start_time = Instant::now();

    let run = RunConfig::from_args()?;
    let store = SnapshotStore::from_json_file(&run.snapshot_path)
        .context("Failed to load snapshot")?;
    let engine = RecommendationEngine::new(store);

    let mut rng = match run.seed {
        Some(seed) => {
            info!("Using fixed seed {} for repeat-purchase dampening", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let config = RecommendationConfig::default();
    let recommendations = engine.recommend(run.cid, &config, &mut rng).await?;
    info!(
        "Recommendation run finished in {:.2?}",
        start_time.elapsed()
    );

    println!(
        "{:<6} {:<25} {:<20} {:<14} {:>8}",
        "pid", "product", "business", "category", "score"
    );
    for rec in &recommendations {
        println!(
            "{:<6} {:<25} {:<20} {:<14} {:>8.3}",
            rec.pid, rec.product_name, rec.business_name, rec.category, rec.score
        );
    }

    Ok(())
}
