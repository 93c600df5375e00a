//! Generate a bet set and print it as JSON.
//!
//! ```text
//! cargo run --example generate_bets -- lotofacil 42 10
//! RUST_LOG=bolao=debug cargo run --example generate_bets -- lotomania
//! ```

use bolao::{BetSetService, Config, GenerateRequest, Lottery};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::var("BOLAO_CONFIG") {
        Ok(path) => Config::load(path)?,
        Err(_) => Config::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let lottery: Lottery = args.next().as_deref().unwrap_or("lotofacil").parse()?;
    let seed: Option<u32> = args.next().map(|s| s.parse()).transpose()?;
    let sample_size: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(10);

    // Widest pool the lottery accepts, written the way users type it.
    let range = lottery.number_range();
    let widest = *lottery.pool_len().end() as u32;
    let pool: Vec<i64> = (*range.start()..*range.start() + widest)
        .map(|n| if lottery == Lottery::Lotomania { i64::from(n % 100) } else { i64::from(n) })
        .collect();

    let service = BetSetService::new(lottery.rules(), &config.sampling);
    let request = GenerateRequest {
        pool: lottery.canonicalize_all(&pool),
        draw_size: lottery.bet_size(),
        sample_size,
        seed,
    };

    match service.generate(&request) {
        Ok(set) => println!("{}", serde_json::to_string_pretty(&set)?),
        Err(err) => {
            eprintln!("{} ({})", serde_json::to_string(&err.to_body())?, err.http_status());
            std::process::exit(1);
        }
    }
    Ok(())
}
