//! Safe mode CLI commands.

use clap::Subcommand;
use haven_core::Registry;

use crate::store::Store;

#[derive(Subcommand)]
pub enum SafeModeAction {
    /// Turn safe mode on: nothing will appear contextually or be invocable
    On,
    /// Turn safe mode off
    Off,
    /// Show the current flag
    Status,
}

pub fn run(action: SafeModeAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Store::open()?;
    let user_id = store.user_id.clone();

    match action {
        SafeModeAction::On => {
            store.registry.set_safe_mode(&user_id, true);
            println!("safe mode is on; your interventions are still listed, just not invocable");
            store.save()
        }
        SafeModeAction::Off => {
            store.registry.set_safe_mode(&user_id, false);
            println!("safe mode is off");
            store.save()
        }
        SafeModeAction::Status => {
            let enabled = store.registry.is_safe_mode_enabled(&user_id)?;
            println!("safe mode: {}", if enabled { "on" } else { "off" });
            Ok(())
        }
    }
}
