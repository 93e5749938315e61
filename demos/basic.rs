use anyhow::{Context, Result};
use hypervec::Vector;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    println!("--- Basic Usage Example ---");
    let mut arr = Vector::new();

    for i in 1..=5 {
        arr.push_back(i * 10);
        println!("Pushed: {}, size: {}, cap: {}", i * 10, arr.size(), arr.capacity());
    }

    arr.insert(2, 25).context("insert into the middle")?;
    println!("After insert at 2: {arr}");

    let removed = arr.erase(0).context("erase the first element")?;
    println!("Erased {removed}, now: {arr}");

    println!("Position of 30: {}", arr.position(&30));
    println!("Position of 99: {} (end = {})", arr.position(&99), arr.end());

    if let Err(err) = arr.get(100) {
        println!("Lookup failed as expected: {err}");
    }

    arr.clear();
    println!("After clear, size: {}, cap: {}", arr.size(), arr.capacity());
    Ok(())
}
