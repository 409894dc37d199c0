// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked copies and subscriptions.
//!
//! Opening a panel that is already open stacks a copy under a fresh id. The
//! entry cell notifies when the copy is added, and each instance cell notifies
//! when its position changes, which is where a view would re-render.
//!
//! Run:
//! - `cargo run -p overstack_demos --example stack_copies`

use overstack_panels::{StackCoordinator, StackError, StackPolicy};

fn main() -> Result<(), StackError> {
    let mut stacks: StackCoordinator<&str, u64> = StackCoordinator::with_policy(
        StackPolicy::EVICT_BY_ID_ONLY | StackPolicy::REFLOW_ON_CLOSE,
    );
    let first = stacks.register("profile", 0)?;

    // Views hold their guards for as long as they are mounted.
    let mut views = Vec::new();
    if let Some(entry) = stacks.get(&"profile") {
        views.push(entry.subscribe(|e| println!("  [entry] {} instance(s)", e.len())));
    }
    if let Some(cell) = stacks.stack(&"profile", first) {
        views.push(cell.subscribe(move |s| println!("  [{first}] open={} {:?}", s.open, s.position)));
    }

    println!("== Open profile for user 1 ==");
    let _ = stacks.open(&"profile", Some(1));

    println!("== Open profile for user 2 ==");
    let opened = stacks.open(&"profile", Some(2))?;
    assert!(opened.is_copy());
    let copy = opened.stack();
    if let Some(cell) = stacks.stack(&"profile", copy) {
        views.push(cell.subscribe(move |s| println!("  [{copy}] open={} {:?}", s.open, s.position)));
    }

    println!("== Close user 2 ==");
    let _ = stacks.close_stack(&"profile", copy);

    println!("== History ==\n  {:?}", stacks.stack_history().get());

    println!("== Unmount views ==");
    drop(views);
    let _ = stacks.close(&"profile");
    println!("  (no listener output)");
    Ok(())
}
