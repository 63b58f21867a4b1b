//! The `invoke-check` command: the manual-invocation pre-check.

use haven_core::GovernanceEngine;

use crate::store::Store;

pub fn run(intervention_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let engine = GovernanceEngine::new(store.registry.clone());
    let check = engine.can_invoke(&store.user_id, intervention_id);

    if check.can_invoke {
        println!("can invoke: yes ({})", check.reason);
    } else {
        println!("can invoke: no ({})", check.reason);
    }
    Ok(())
}
