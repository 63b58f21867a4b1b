//! The `audit` command: the full explainability report.

use haven_core::{AuditReport, ContextReport, GovernanceEngine};

use crate::store::Store;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let engine = GovernanceEngine::new(store.registry.clone());
    let report = engine
        .compute_audit(&store.user_id)
        .map_err(|_| "your data could not be checked right now; nothing has been lost")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render(&report);
    }
    Ok(())
}

fn render(report: &AuditReport) {
    println!(
        "safe mode: {}",
        if report.safe_mode_enabled { "on" } else { "off" }
    );
    for ctx in &report.contexts {
        render_context(ctx);
    }
    if !report.rule_notes.is_empty() {
        println!("\nrule notes:");
        for note in &report.rule_notes {
            println!("  - {note}");
        }
    }
    if !report.advisories.is_empty() {
        println!("\nadvisories:");
        for note in &report.advisories {
            println!("  - {note}");
        }
    }
}

fn render_context(ctx: &ContextReport) {
    if ctx.eligible.is_empty() && ctx.blocked.is_empty() {
        return;
    }
    println!("\n[{}]", ctx.context.label());
    for entry in &ctx.eligible {
        let marker = if entry.would_show_first {
            " (would show first)"
        } else {
            ""
        };
        println!(
            "  eligible: {} {}{marker}",
            entry.intervention.kind, entry.intervention.id
        );
        for reason in &entry.reasons {
            println!("      - {reason}");
        }
    }
    for entry in &ctx.blocked {
        println!(
            "  blocked:  {} {} ({})",
            entry.intervention.kind, entry.intervention.id, entry.reason
        );
    }
    if let Some(note) = &ctx.selection_note {
        println!("  note: {note}");
    }
}
