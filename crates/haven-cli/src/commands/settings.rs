//! Soft-limit settings CLI commands.
//!
//! These limits are advisory: the audit mentions them, nothing enforces
//! them.

use clap::Subcommand;
use haven_core::{GovernanceSettings, Registry};

use crate::store::Store;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current soft limits
    Show,
    /// Set one or both soft limits
    Set {
        /// Soft ceiling on active interventions
        #[arg(long)]
        max_active: Option<u32>,
        /// Soft ceiling on active reminders
        #[arg(long)]
        max_reminders: Option<u32>,
    },
    /// Clear both soft limits
    Clear,
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Store::open()?;
    let user_id = store.user_id.clone();

    match action {
        SettingsAction::Show => {
            let settings = store.registry.governance_settings(&user_id)?;
            println!("max active interventions: {}", describe(settings.max_active_interventions));
            println!("max reminders: {}", describe(settings.max_reminders));
            Ok(())
        }
        SettingsAction::Set {
            max_active,
            max_reminders,
        } => {
            let mut settings = store.registry.governance_settings(&user_id)?;
            if let Some(max) = max_active {
                settings.max_active_interventions = Some(max);
            }
            if let Some(max) = max_reminders {
                settings.max_reminders = Some(max);
            }
            store.registry.set_settings(&user_id, settings);
            println!("soft limits updated (these are reminders for you, never enforced)");
            store.save()
        }
        SettingsAction::Clear => {
            store.registry.set_settings(&user_id, GovernanceSettings::default());
            println!("soft limits cleared");
            store.save()
        }
    }
}

fn describe(limit: Option<u32>) -> String {
    match limit {
        Some(n) => n.to_string(),
        None => "not set".to_string(),
    }
}
