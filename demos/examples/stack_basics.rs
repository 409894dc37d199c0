// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator basics.
//!
//! Registers two side panels, opens them in turn, shows the LIFO close rule,
//! and resets with `close_all`.
//!
//! Run:
//! - `cargo run -p overstack_demos --example stack_basics`

use overstack_panels::{Position, StackCoordinator, StackError};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
enum Panel {
    Profile,
    Payout,
}

#[derive(Clone, Debug, Default)]
struct Params {
    github_user_id: Option<u64>,
}

fn dump(c: &StackCoordinator<Panel, Params>) {
    for panel in c.snapshot().panels {
        for s in panel.stacks {
            println!(
                "  {:?} {}  open={:<5}  position={:?}  params={:?}",
                panel.name, s.stack, s.open, s.position, s.params
            );
        }
    }
}

fn main() -> Result<(), StackError> {
    let mut stacks: StackCoordinator<Panel, Params> = StackCoordinator::new();

    let profile = stacks.register(Panel::Profile, Params::default())?;
    let _ = stacks.open(
        &Panel::Profile,
        Some(Params {
            github_user_id: Some(43_467_246),
        }),
    );
    println!("== Open profile ==");
    dump(&stacks);

    let payout = stacks.register(Panel::Payout, Params::default())?;
    let _ = stacks.open(&Panel::Payout, None);
    println!("== Open payout ==");
    dump(&stacks);

    // Profile is not the most recently opened name.
    assert_eq!(stacks.close(&Panel::Profile), Err(StackError::NotOnTop));
    assert_eq!(stacks.close(&Panel::Payout), Ok(payout));
    println!("== Close payout ==");
    dump(&stacks);
    assert_eq!(
        stacks.state(&Panel::Profile, profile).map(|s| s.position),
        Some(Position::Back)
    );

    let changes = stacks.refresh_positions();
    println!("== Refresh ==\n  {changes:?}");

    let reset = stacks.close_all();
    println!("== Close all ({reset} reset) ==");
    dump(&stacks);
    Ok(())
}
