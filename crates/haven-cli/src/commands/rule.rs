//! Governance rule management CLI commands.

use std::collections::BTreeSet;

use clap::Subcommand;
use haven_core::{Context, GovernanceRule, RuleKind, RuleStatus};

use crate::store::Store;

#[derive(Subcommand)]
pub enum RuleAction {
    /// List rules, including paused and unevaluable ones
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add a time-window rule: interventions only on the listed days
    AllowDays {
        /// Comma-separated days (e.g. mon,tue,fri)
        days: String,
    },
    /// Add a context-exclusion rule
    ExcludeContext {
        /// Comma-separated contexts (e.g. focus_mode_started)
        contexts: String,
    },
    /// Add an advisory session cap
    SessionCap {
        /// Maximum interventions per session (advisory only)
        max: u32,
    },
    /// Pause one rule
    Pause { id: String },
    /// Resume one rule
    Resume { id: String },
}

pub fn run(action: RuleAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Store::open()?;
    let user_id = store.user_id.clone();

    match action {
        RuleAction::List { json } => {
            let rules = store.registry.list_all_rules(&user_id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rules)?);
            } else if rules.is_empty() {
                println!("no rules yet");
            } else {
                for rule in &rules {
                    let status = match rule.status {
                        RuleStatus::Active => "active",
                        RuleStatus::Paused => "paused",
                    };
                    println!("{}  [{}]  {}", rule.id, status, rule.kind.describe());
                }
            }
            Ok(())
        }
        RuleAction::AllowDays { days } => {
            let allowed_days = days
                .split(',')
                .map(|d| d.trim().parse::<chrono::Weekday>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| "days must look like: mon,tue,fri")?;
            add_rule(&mut store, RuleKind::TimeWindow { allowed_days })
        }
        RuleAction::ExcludeContext { contexts } => {
            let excluded_contexts = contexts
                .split(',')
                .map(|c| c.trim().parse::<Context>())
                .collect::<Result<BTreeSet<_>, _>>()?;
            add_rule(&mut store, RuleKind::ContextExclusion { excluded_contexts })
        }
        RuleAction::SessionCap { max } => {
            add_rule(&mut store, RuleKind::SessionCap { max_per_session: max })
        }
        RuleAction::Pause { id } => set_status(&mut store, &id, RuleStatus::Paused),
        RuleAction::Resume { id } => set_status(&mut store, &id, RuleStatus::Active),
    }
}

fn add_rule(store: &mut Store, kind: RuleKind) -> Result<(), Box<dyn std::error::Error>> {
    let rule = GovernanceRule::new(store.user_id.clone(), kind);
    println!("created rule: {} ({})", rule.id, rule.kind.describe());
    store.registry.insert_rule(rule);
    store.save()
}

fn set_status(
    store: &mut Store,
    id: &str,
    status: RuleStatus,
) -> Result<(), Box<dyn std::error::Error>> {
    let user_id = store.user_id.clone();
    store
        .registry
        .set_rule_status(&user_id, &id.to_string(), status)?;
    match status {
        RuleStatus::Active => println!("resumed rule: {id}"),
        RuleStatus::Paused => println!("paused rule: {id}"),
    }
    store.save()
}
