use super::*;
use crate::vector;
use crossbeam::scope;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Droppable(Arc<AtomicUsize>);

impl Drop for Droppable {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_basic_push_get() {
    let mut v = Vector::new();
    assert_eq!(v.size(), 0);
    assert_eq!(v.capacity(), 0);
    v.push_back(1);
    v.push_back(2);
    v.push_back(3);
    assert_eq!(v.size(), 3);
    assert_eq!(v[0], 1);
    assert_eq!(v[1], 2);
    assert_eq!(v[2], 3);
    assert_eq!(v.get(1), Ok(&2));
}

#[test]
fn test_with_len_is_defaulted() {
    let v: Vector<i32> = Vector::with_len(5);
    assert_eq!(v.size(), 5);
    assert_eq!(v.capacity(), 5);
    for i in 0..5 {
        assert_eq!(v.get(i), Ok(&0));
    }

    let s: Vector<String> = Vector::with_len(2);
    assert!(s.iter().all(|x| x.is_empty()));
}

#[test]
fn test_from_elem_copies_are_independent() {
    let mut v = Vector::from_elem(3, String::from("abc"));
    assert_eq!(v.size(), 3);
    assert_eq!(v.capacity(), 3);

    v[1].push('d');
    assert_eq!(v[0], "abc");
    assert_eq!(v[1], "abcd");
    assert_eq!(v[2], "abc");
}

#[test]
fn test_literal_sequence() {
    let v = vector![4, 5, 6, 7];
    assert_eq!(v.size(), 4);
    assert_eq!(v.capacity(), 4);
    assert_eq!(v.as_ref(), &[4, 5, 6, 7]);

    let from_slice = Vector::from_slice(&["a", "b"]);
    assert_eq!(from_slice.as_slice(), &["a", "b"]);
    assert_eq!(from_slice.capacity(), 2);

    let empty: Vector<u8> = vector![];
    assert!(empty.is_empty());
}

#[test]
fn test_get_mut_is_visible() {
    let mut v = vector![1, 2, 3];
    *v.get_mut(2).unwrap() = 30;
    v[0] = 10;
    assert_eq!(v.as_slice(), &[10, 2, 30]);
}

#[test]
fn test_insert_erase_find_scenario() {
    let mut v = vector![1, 2, 3];
    v.insert(1, 9).unwrap();
    assert_eq!(v.as_slice(), &[1, 9, 2, 3]);
    assert_eq!(v.size(), 4);

    assert_eq!(v.erase(0), Ok(1));
    assert_eq!(v.as_slice(), &[9, 2, 3]);
    assert_eq!(v.size(), 3);

    assert_eq!(v.find(&2), Some(&2));
    assert_eq!(v.position(&2), 1);
    assert_eq!(v.find(&99), None);
    assert_eq!(v.position(&99), v.end());
}

#[test]
fn test_find_mut() {
    let mut v = vector![5, 6, 5];
    *v.find_mut(&5).unwrap() = 50;
    assert_eq!(v.as_slice(), &[50, 6, 5]);
    assert!(v.find_mut(&7).is_none());
}

#[test]
fn test_out_of_range() {
    let mut v: Vector<i32> = Vector::new();
    assert_eq!(v.get(0), Err(OutOfRange { index: 0, len: 0 }));
    assert_eq!(v.erase(0), Err(OutOfRange { index: 0, len: 0 }));
    assert_eq!(v.insert(1, 10), Err(OutOfRange { index: 1, len: 0 }));
    assert!(v.get_mut(0).is_err());

    v.push_back(1);
    assert!(v.get(1).is_err());
    assert!(v.erase(1).is_err());
    assert!(v.insert(2, 5).is_err());
    // Failed calls leave the vector untouched.
    assert_eq!(v.as_slice(), &[1]);
    assert_eq!(v.capacity(), 1);
}

#[test]
fn test_out_of_range_message() {
    let err = OutOfRange { index: 4, len: 2 };
    assert_eq!(err.to_string(), "index 4 is out of range for length 2");
}

#[test]
#[should_panic(expected = "index 3 is out of range for length 3")]
fn test_index_panics_past_end() {
    let v = vector![1, 2, 3];
    let _ = v[3];
}

#[test]
#[should_panic(expected = "out of range")]
fn test_index_mut_panics_on_empty() {
    let mut v: Vector<i32> = Vector::new();
    v[0] = 1;
}

#[test]
fn test_insert_at_end_matches_push_back() {
    let mut pushed = Vector::new();
    let mut inserted = Vector::new();
    for i in 0..20 {
        pushed.push_back(i);
        let end = inserted.size();
        inserted.insert(end, i).unwrap();
        assert_eq!(pushed.capacity(), inserted.capacity());
    }
    assert_eq!(pushed, inserted);
}

#[test]
fn test_growth_policy() {
    let mut v = Vector::new();
    let mut caps = vec![v.capacity()];
    for i in 0..15 {
        v.push_back(i);
        if *caps.last().unwrap() != v.capacity() {
            caps.push(v.capacity());
        }
    }
    assert_eq!(caps, vec![0, 1, 3, 7, 15]);
}

#[test]
fn test_growth_is_amortized() {
    let mut v = Vector::new();
    let mut reallocations = 0;
    let mut last_cap = v.capacity();
    for k in 1..=10_000usize {
        v.push_back(k);
        assert!(v.capacity() <= 2 * k);
        if v.capacity() != last_cap {
            reallocations += 1;
            last_cap = v.capacity();
        }
    }
    // 2^14 > 10_000
    assert!(reallocations <= 14, "{reallocations} reallocations");
}

#[test]
fn test_insert_grows_when_full() {
    let mut v = vector![1, 2, 3];
    assert_eq!(v.capacity(), 3);
    v.insert(0, 0).unwrap();
    assert_eq!(v.capacity(), 7);
    assert_eq!(v.as_slice(), &[0, 1, 2, 3]);
}

#[test]
fn test_clear_keeps_capacity() {
    let mut v = Vector::new();
    for i in 0..5 {
        v.push_back(i);
    }
    assert_eq!(v.capacity(), 7);

    v.clear();
    assert_eq!(v.size(), 0);
    assert_eq!(v.capacity(), 7);
    assert!(v.get(0).is_err());

    for i in 0..7 {
        v.push_back(i * 10);
    }
    assert_eq!(v.capacity(), 7);
    assert_eq!(v[6], 60);
}

#[test]
fn test_clear_drops_elements() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut v = Vector::new();
    for _ in 0..4 {
        v.push_back(Droppable(counter.clone()));
    }
    v.clear();
    assert_eq!(counter.load(Ordering::SeqCst), 4);
    drop(v);
    assert_eq!(counter.load(Ordering::SeqCst), 4);
}

#[test]
fn test_reset() {
    let mut v = vector![3, 4, 5];
    v.push_back(6);
    let cap = v.capacity();
    v.reset();
    assert_eq!(v.as_slice(), &[0, 0, 0, 0]);
    assert_eq!(v.capacity(), cap);
}

#[test]
fn test_clone_is_deep_and_tight() {
    let mut a = Vector::new();
    for i in 0..5 {
        a.push_back(i.to_string());
    }
    assert_eq!(a.capacity(), 7);

    let mut b = a.clone();
    assert_eq!(b.size(), 5);
    assert_eq!(b.capacity(), 5);
    assert_eq!(a, b);

    b[0].push('!');
    b.push_back("x".to_string());
    assert_eq!(a[0], "0");
    assert_eq!(a.size(), 5);
}

#[test]
fn test_take_moves_buffer() {
    let mut a = vector![1, 2, 3];
    let b = a.take();
    assert_eq!(b.as_slice(), &[1, 2, 3]);
    assert_eq!(a.size(), 0);
    assert_eq!(a.capacity(), 0);

    // The emptied source is still usable.
    a.push_back(4);
    assert_eq!(a.as_slice(), &[4]);
}

#[test]
fn test_raii_drop() {
    let counter = Arc::new(AtomicUsize::new(0));
    {
        let mut v = Vector::new();
        for _ in 0..10 {
            v.push_back(Droppable(counter.clone()));
        }
        let removed = v.erase(3).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        drop(removed);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
    assert_eq!(counter.load(Ordering::SeqCst), 10);
}

#[test]
fn test_into_iter_drops_rest() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut v = Vector::new();
    for _ in 0..6 {
        v.push_back(Droppable(counter.clone()));
    }

    let mut it = v.into_iter();
    assert_eq!(it.len(), 6);
    drop(it.next());
    drop(it.next_back());
    assert_eq!(counter.load(Ordering::SeqCst), 2);
    assert_eq!(it.as_slice().len(), 4);
    drop(it);
    assert_eq!(counter.load(Ordering::SeqCst), 6);
}

#[test]
fn test_panicking_clone_does_not_leak() {
    let drops = Arc::new(AtomicUsize::new(0));

    struct Fused {
        explode: bool,
        drops: Arc<AtomicUsize>,
    }

    impl Clone for Fused {
        fn clone(&self) -> Self {
            if self.explode {
                panic!("clone failed");
            }
            Fused {
                explode: false,
                drops: self.drops.clone(),
            }
        }
    }

    impl Drop for Fused {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    let mut source = Vector::new();
    for explode in [false, false, true] {
        source.push_back(Fused {
            explode,
            drops: drops.clone(),
        });
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| source.clone()));
    assert!(result.is_err());
    // The two finished clones were dropped with the partial copy.
    assert_eq!(drops.load(Ordering::SeqCst), 2);
    assert_eq!(source.size(), 3);

    drop(source);
    assert_eq!(drops.load(Ordering::SeqCst), 5);
}

#[test]
fn test_iterators() {
    let mut v = Vector::new();
    v.push_back(10);
    v.push_back(20);
    v.push_back(30);

    let mut sum = 0;
    for &x in &v {
        sum += x;
    }
    assert_eq!(sum, 60);
    // Restartable.
    assert_eq!(v.iter().count(), 3);
    assert_eq!(v.iter().count(), 3);

    for x in &mut v {
        *x += 1;
    }
    assert_eq!(v[0], 11);

    let collected: Vec<i32> = v.into_iter().collect();
    assert_eq!(collected, vec![11, 21, 31]);
}

#[test]
fn test_iteration_follows_erase_insert_and_clear() {
    let mut v = vector![1, 2, 3, 4, 5];
    v.erase(1).unwrap();
    v.erase(2).unwrap();
    assert_eq!(v.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);

    v.insert(1, 7).unwrap();
    let cap = v.capacity();
    assert_eq!((&v).into_iter().rev().copied().collect::<Vec<_>>(), vec![5, 3, 7, 1]);

    v.clear();
    assert_eq!(v.iter().next(), None);
    assert_eq!((&mut v).into_iter().count(), 0);
    assert_eq!(v.capacity(), cap);

    // Refilling after clear iterates only the new elements.
    v.extend([8, 9]);
    assert_eq!(v.iter().sum::<i32>(), 17);
    assert_eq!(v.into_iter().collect::<Vec<_>>(), vec![8, 9]);
}

#[test]
fn test_iteration_skips_spare_capacity() {
    let mut v = Vector::new();
    for i in 0..4 {
        v.push_back(i);
    }
    assert_eq!(v.capacity(), 7);
    assert_eq!(v.iter().count(), 4);
    assert_eq!(v.into_iter().rev().collect::<Vec<_>>(), vec![3, 2, 1, 0]);
}

#[test]
fn test_collect_and_extend() {
    let mut v: Vector<u32> = (1..=3).collect();
    v.extend([4, 5]);
    assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);

    let from_vec = Vector::from(vec![7, 8]);
    assert_eq!(from_vec.capacity(), 2);
}

#[test]
fn test_display_and_debug() {
    let v = vector![1, 2, 3];
    assert_eq!(v.to_string(), "1 2 3 ");
    assert_eq!(format!("{v:?}"), "[1, 2, 3]");
    assert_eq!(Vector::<i32>::new().to_string(), "");
}

#[test]
fn test_zero_sized_elements() {
    let mut v = Vector::new();
    for _ in 0..10 {
        v.push_back(());
    }
    assert_eq!(v.size(), 10);
    assert_eq!(v.capacity(), 15);
    v.insert(3, ()).unwrap();
    assert_eq!(v.erase(0), Ok(()));
    v.clear();
    assert_eq!(v.capacity(), 15);
    assert_eq!(v.into_iter().count(), 0);
}

#[test]
fn test_concurrency() {
    let mut v = Vector::new();
    for i in 0..100 {
        v.push_back(i);
    }

    let (sum, found) = scope(|s| {
        let sum = s.spawn(|_| v.iter().sum::<i32>());
        let found = s.spawn(|_| v.find(&42).copied());
        (sum.join().unwrap(), found.join().unwrap())
    })
    .unwrap();
    assert_eq!(sum, 4950);
    assert_eq!(found, Some(42));
}

#[test]
fn test_matches_std_vec_model() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut v = Vector::new();
    let mut model: Vec<i64> = Vec::new();

    for _ in 0..5_000 {
        match rng.random_range(0..5) {
            0 | 1 => {
                let x = rng.random::<i64>();
                v.push_back(x);
                model.push(x);
            }
            2 => {
                let i = rng.random_range(0..=model.len() + 1);
                let x = rng.random::<i64>();
                if i <= model.len() {
                    v.insert(i, x).unwrap();
                    model.insert(i, x);
                } else {
                    assert!(v.insert(i, x).is_err());
                }
            }
            3 => {
                let i = rng.random_range(0..=model.len());
                if i < model.len() {
                    assert_eq!(v.erase(i), Ok(model.remove(i)));
                } else {
                    assert!(v.erase(i).is_err());
                }
            }
            _ => {
                let i = rng.random_range(0..=model.len());
                assert_eq!(v.get(i).ok(), model.get(i));
            }
        }
        assert_eq!(v.size(), model.len());
        assert!(v.capacity() >= v.size());
    }
    assert_eq!(v.as_slice(), model.as_slice());
}

#[test]
fn test_hypercube_shape() {
    let mut cube: Hypercube<u8, 2> = Hypercube::with_side(3);
    cube[2][1] = 9;
    assert_eq!(cube.get(2).unwrap().get(1), Ok(&9));
    assert_eq!(cube.get(3).err(), Some(OutOfRange { index: 3, len: 3 }));
    assert_eq!(cube[0].get(3).err(), Some(OutOfRange { index: 3, len: 3 }));
}

#[test]
fn test_max_dimension_cube() {
    let mut cube: Hypercube<u8, { MAX_DIMENSION }> = Hypercube::with_side(1);
    cube[0][0][0][0][0][0][0][0][0][0][0][0] = 3;
    assert_eq!(cube[0][0][0][0][0][0][0][0][0][0][0][0], 3);
    assert!(cube[0][0][0][0][0][0][0][0][0][0][0].get(1).is_err());
}

#[test]
fn test_print_live_elements() {
    let mut v = vector![1, 2];
    v.push_back(3);
    assert_eq!(v.to_string(), "1 2 3 ");
    v.print();

    v.clear();
    assert_eq!(v.to_string(), "");
    v.print();
}
