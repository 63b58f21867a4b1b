pub mod audit;
pub mod eligibility;
pub mod intervention;
pub mod invoke;
pub mod pause;
pub mod rule;
pub mod safemode;
pub mod settings;
