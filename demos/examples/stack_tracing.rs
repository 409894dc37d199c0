// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace events.
//!
//! With the `tracing` feature, every coordinator operation emits a debug
//! event, including the ones it ignores and why.
//!
//! Run:
//! - `cargo run -p overstack_demos --example stack_tracing`

use overstack_panels::{StackCoordinator, StackError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), StackError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let mut stacks: StackCoordinator<&str, ()> = StackCoordinator::new();
    stacks.register("a", ())?;
    stacks.register("b", ())?;

    let _ = stacks.close(&"a");
    let _ = stacks.open(&"a", None);
    let _ = stacks.open(&"b", None);
    let _ = stacks.close(&"a");
    let _ = stacks.open(&"ghost", None);
    stacks.close_all();
    Ok(())
}
