//! `faultline calculator`: arithmetic that panics, run behind barriers

use faultline_error::{Barrier, isolate};

pub fn add(v1: i64, v2: i64) -> i64 {
    v1 + v2
}

/// `v1 - v2`, panicking when the result would be negative
pub fn must_sub(v1: i64, v2: i64) -> i64 {
    if v1 < v2 {
        panic!("v2 bigger than v1");
    }
    v1 - v2
}

/// Run `f`, printing instead of propagating any panic it raises.
fn safe_call(f: impl FnOnce()) {
    if let Err(fault) = isolate(f) {
        println!("recover panic : {}", fault.message());
    }
}

/// Returns `true` once every step has run, faults included.
pub fn run() -> bool {
    Barrier::new()
        .label("calculator")
        .on_exit(|fault| {
            if fault.is_some() {
                println!("a fault escaped the inner barriers; ignoring it");
            }
        })
        .run(|| {
            println!("{}", add(10, 20));
            safe_call(|| println!("{}", must_sub(20, 10)));
            safe_call(|| println!("{}", must_sub(10, 20)));
            true
        })
        .unwrap_or_default()
}
