use anyhow::{Context, Result};
use hypervec::Hypercube;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    println!("--- Hypercube Example ---");
    let mut cube: Hypercube<u32, 3> = Hypercube::with_side(3);

    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                cube[i][j][k] = (i * 9 + j * 3 + k) as u32;
            }
        }
    }

    println!("Plane 1: {:?}", &cube[1]);

    let corner = cube
        .get(2)
        .and_then(|plane| plane.get(2))
        .and_then(|row| row.get(2))
        .context("corner lookup")?;
    println!("Corner [2][2][2] = {corner}");

    match cube[0][0].get(3) {
        Ok(v) => println!("Unexpected value {v}"),
        Err(err) => println!("Past the edge: {err}"),
    }
    Ok(())
}
