//! The `eligibility` command: what a concrete context event would surface.

use haven_core::{Context, GovernanceEngine};

use crate::store::Store;

pub fn run(context: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let context: Context = context.parse()?;
    let store = Store::open()?;
    let engine = GovernanceEngine::new(store.registry.clone());
    let result = engine
        .compute_eligibility(&store.user_id, context)
        .map_err(|_| "your data could not be checked right now; nothing has been lost")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.is_empty() {
        println!("nothing is relevant to '{}'", context.label());
        return Ok(());
    }
    for entry in &result.eligible {
        let marker = if entry.would_show_first {
            " (would show first)"
        } else {
            ""
        };
        println!(
            "eligible: {} {}{marker}",
            entry.intervention.kind, entry.intervention.id
        );
    }
    for entry in &result.blocked {
        println!(
            "blocked:  {} {} ({})",
            entry.intervention.kind, entry.intervention.id, entry.reason
        );
    }
    Ok(())
}
