//! Walkthrough on the real process heap: allocate, release, observe the
//! merged blocks being reused.

use xheap::{Heap, SystemBreak};

fn main() {
    let mut heap = Heap::new(SystemBreak::new());

    let a = heap.allocate(10).expect("out of memory");
    let b = heap.allocate(20).expect("out of memory");
    let c = heap.allocate(30).expect("out of memory");
    println!("Allocated 10 at {a:p}, 20 at {b:p}, 30 at {c:p}");
    println!("Blocks in the arena: {}", heap.free_list_len());

    unsafe { a.as_ptr().write_bytes(0xAA, 10) };

    heap.release(a.as_ptr());
    heap.release(b.as_ptr());
    println!(
        "Released the first two; they merged, {} blocks remain",
        heap.free_list_len()
    );

    let d = heap.allocate(10).expect("out of memory");
    println!("Reallocated 10 at {d:p} (front reused: {})", d == a);
    println!("Blocks in the arena: {}", heap.free_list_len());

    heap.release(c.as_ptr());
    heap.release(d.as_ptr());
}
