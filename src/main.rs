use costack::set_panic_hook;
use costack::{Handle, Scheduler, Status};

/// Prints `count` numbers starting at `start`, yielding after each one.
fn counter(co: &Handle, (start, count): (u32, u32)) {
    for i in 0..count {
        println!("coroutine {} : {}", co.id(), start + i);
        co.yield_now();
    }
}

fn interleave() {
    let scheduler = Scheduler::new();
    let first = scheduler.register(counter, (0, 5));
    let second = scheduler.register(counter, (100, 5));

    println!("main start");
    while scheduler.status(first) != Status::Dead && scheduler.status(second) != Status::Dead {
        scheduler.resume(first);
        scheduler.resume(second);
    }
    println!("main end");
}

fn main() {
    set_panic_hook("costack demo".to_string());
    interleave();
}
