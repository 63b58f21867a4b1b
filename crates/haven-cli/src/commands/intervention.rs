//! Intervention management CLI commands.

use clap::Subcommand;
use haven_core::{
    GovernanceEngine, Intervention, InterventionKind, InterventionStatus, Registry,
};

use crate::store::Store;

#[derive(Subcommand)]
pub enum InterventionAction {
    /// List interventions
    List {
        #[arg(long)]
        json: bool,
    },
    /// Create a new intervention
    Create {
        /// Kind (e.g. reminder_display)
        kind: String,
        /// Never surface contextually; manual invocation only
        #[arg(long)]
        manual_only: bool,
        /// Kind-specific parameters as a JSON object
        #[arg(long)]
        params: Option<String>,
    },
    /// Pause one intervention
    Pause { id: String },
    /// Resume one paused intervention
    Resume { id: String },
    /// Disable one intervention
    Disable { id: String },
    /// Soft-delete one intervention
    Delete { id: String },
}

pub fn run(action: InterventionAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Store::open()?;
    let user_id = store.user_id.clone();

    match action {
        InterventionAction::List { json } => {
            let interventions = store.registry.list_interventions(&user_id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&interventions)?);
            } else if interventions.is_empty() {
                println!("no interventions yet");
            } else {
                for i in &interventions {
                    let trigger = match i.kind.trigger_context() {
                        Some(ctx) if i.allow_contextual_trigger => ctx.label(),
                        _ => "manual only",
                    };
                    println!("{}  {}  [{}]  ({trigger})", i.id, i.kind, i.status.label());
                }
            }
            Ok(())
        }
        InterventionAction::Create {
            kind,
            manual_only,
            params,
        } => {
            let kind: InterventionKind = kind.parse()?;
            let mut intervention = Intervention::new(user_id, kind);
            intervention.allow_contextual_trigger = !manual_only;
            if let Some(raw) = params {
                intervention.parameters = serde_json::from_str(&raw)?;
            }
            println!("created: {} ({})", intervention.id, intervention.kind);
            store.registry.insert_intervention(intervention);
            store.save()
        }
        InterventionAction::Pause { id } => {
            store
                .registry
                .set_intervention_status(&user_id, &id, InterventionStatus::Paused)?;
            println!("paused: {id}");
            store.save()
        }
        InterventionAction::Resume { id } => {
            let mut engine = GovernanceEngine::new(std::mem::take(&mut store.registry));
            let changed = engine.resume(&user_id, &id)?;
            store.registry = engine.into_registry();
            if changed {
                println!("resumed: {id}");
                store.save()
            } else {
                println!("nothing to resume: {id} is not paused");
                Ok(())
            }
        }
        InterventionAction::Disable { id } => {
            store
                .registry
                .set_intervention_status(&user_id, &id, InterventionStatus::Disabled)?;
            println!("disabled: {id}");
            store.save()
        }
        InterventionAction::Delete { id } => {
            store.registry.soft_delete_intervention(&user_id, &id)?;
            println!("deleted: {id}");
            store.save()
        }
    }
}
