//! The `pause-all` command: bulk pause actions.
//!
//! Bulk actions only ever set Paused; everything they touch can be resumed
//! individually.

use haven_core::{GovernanceEngine, InterventionKind};

use crate::store::Store;

pub fn run(kind: Option<&str>, except_manual: bool) -> Result<(), Box<dyn std::error::Error>> {
    if kind.is_some() && except_manual {
        return Err("choose either --kind or --except-manual, not both".into());
    }

    let mut store = Store::open()?;
    let user_id = store.user_id.clone();
    let mut engine = GovernanceEngine::new(std::mem::take(&mut store.registry));

    let paused = if let Some(kind) = kind {
        let kind: InterventionKind = kind.parse()?;
        engine.pause_by_kind(&user_id, kind)?
    } else if except_manual {
        engine.pause_all_except_manual(&user_id)?
    } else {
        engine.pause_all(&user_id)?
    };

    store.registry = engine.into_registry();
    println!("paused {paused} intervention(s); resume any of them individually when ready");
    store.save()
}
