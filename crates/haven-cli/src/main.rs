use clap::{Parser, Subcommand};

mod commands;
mod store;

#[derive(Parser)]
#[command(name = "haven-cli", version, about = "Haven CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full explainability report across all contexts
    Audit {
        /// Emit the raw report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Eligibility for one context event
    Eligibility {
        /// Context name (e.g. project_opened)
        context: String,
        #[arg(long)]
        json: bool,
    },
    /// Pre-check before opening an intervention
    InvokeCheck {
        /// Intervention id
        intervention_id: String,
    },
    /// Intervention management
    Intervention {
        #[command(subcommand)]
        action: commands::intervention::InterventionAction,
    },
    /// Governance rule management
    Rule {
        #[command(subcommand)]
        action: commands::rule::RuleAction,
    },
    /// Safe mode control
    SafeMode {
        #[command(subcommand)]
        action: commands::safemode::SafeModeAction,
    },
    /// Pause interventions in bulk
    PauseAll {
        /// Restrict to one intervention kind
        #[arg(long)]
        kind: Option<String>,
        /// Leave manual-only interventions untouched
        #[arg(long)]
        except_manual: bool,
    },
    /// Soft limit settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Audit { json } => commands::audit::run(json),
        Commands::Eligibility { context, json } => commands::eligibility::run(&context, json),
        Commands::InvokeCheck { intervention_id } => commands::invoke::run(&intervention_id),
        Commands::Intervention { action } => commands::intervention::run(action),
        Commands::Rule { action } => commands::rule::run(action),
        Commands::SafeMode { action } => commands::safemode::run(action),
        Commands::PauseAll { kind, except_manual } => {
            commands::pause::run(kind.as_deref(), except_manual)
        }
        Commands::Settings { action } => commands::settings::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
