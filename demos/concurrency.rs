use anyhow::{Result, anyhow, ensure};
use hypervec::{Hypercube, Vector};
use std::thread;

const SIDE: usize = 4;

fn main() -> Result<()> {
    println!("--- Handing Containers to a Worker Thread ---");

    let mut pending: Vector<usize> = (0..SIDE).collect();
    let cube: Hypercube<usize, 3> = Hypercube::with_side(SIDE);

    // take() leaves `pending` empty but usable; the worker owns the rows now.
    let rows = pending.take();
    ensure!(pending.size() == 0 && pending.capacity() == 0, "take left data behind");

    let worker = thread::spawn(move || {
        let mut cube = cube;
        for &i in &rows {
            for j in 0..SIDE {
                for k in 0..SIDE {
                    cube[i][j][k] = i * 100 + j * 10 + k;
                }
            }
        }
        (cube, rows)
    });

    let (cube, rows) = worker.join().map_err(|_| anyhow!("worker thread panicked"))?;
    println!("Rows filled by the worker: {rows}");

    // Shape survived the trip: every level still stops at SIDE.
    ensure!(cube.get(SIDE).is_err(), "outer axis grew");
    for i in 0..SIDE {
        ensure!(cube[i].get(SIDE).is_err(), "axis {i} grew");
        for j in 0..SIDE {
            ensure!(cube[i][j].get(SIDE).is_err(), "row {i},{j} grew");
            ensure!(cube[i][j][SIDE - 1] == i * 100 + j * 10 + SIDE - 1, "bad value at {i},{j}");
        }
    }
    println!("Corner cell after the round trip: {}", cube[SIDE - 1][SIDE - 1][SIDE - 1]);

    pending.push_back(SIDE);
    println!("Emptied vector reused on the main thread: {pending}");
    Ok(())
}
