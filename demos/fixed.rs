//! Runs a heap over a fixed-capacity arena: exhaustion surfaces as a plain
//! `None`, and releasing makes the memory reusable.

use xheap::{FixedArena, Heap};

fn main() {
    let mut heap = Heap::new(FixedArena::new(256));

    let mut held = Vec::new();
    loop {
        match heap.allocate(48) {
            Some(ptr) => {
                println!("Got 48 bytes at {ptr:p}");
                held.push(ptr);
            }
            None => {
                println!("Arena exhausted after {} blocks", held.len());
                break;
            }
        }
    }

    let first = held[0];
    heap.release(first.as_ptr());

    let again = heap
        .allocate(16)
        .expect("released memory should be reusable");
    println!(
        "Carved 16 bytes out of the released block at {again:p} (reused: {})",
        again == first
    );
}
