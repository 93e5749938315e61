use anyhow::{Result, ensure};
use hypervec::Vector;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Tracked(usize, Arc<AtomicUsize>);

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if self.0 == 2 {
            panic!("refusing to clone element 2");
        }
        Tracked(self.0, self.1.clone())
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        println!("Dropping element {}", self.0);
        self.1.fetch_add(1, Ordering::SeqCst);
    }
}

fn main() -> Result<()> {
    println!("--- Panic Safety & RAII Example ---");
    let drop_count = Arc::new(AtomicUsize::new(0));

    {
        let mut arr = Vector::new();
        for i in 0..3 {
            arr.push_back(Tracked(i, drop_count.clone()));
        }
        println!("Vector created with 3 elements.");

        // The copy panics on its third element; the two finished copies are
        // dropped and the source is left as it was.
        let copied = panic::catch_unwind(AssertUnwindSafe(|| arr.clone()));
        ensure!(copied.is_err(), "clone should have panicked");
        ensure!(arr.size() == 3, "source changed by a failed clone");
        println!("Failed clone cleaned up after itself.");
    }

    let total = drop_count.load(Ordering::SeqCst);
    println!("Total elements dropped: {total}");
    ensure!(total == 5, "expected 5 drops, saw {total}");
    Ok(())
}
