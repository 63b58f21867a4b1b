//! Safe mode: the single global per-user override.
//!
//! Safe mode is checked before any other logic and short-circuits it. Its
//! blocking reason is always the one fixed string below, never combined with
//! other reasons, so the explanation stays unambiguous. It has no effect on
//! the existence or listing of interventions; the UI still shows them, just
//! marked non-invocable.

/// The one blocking reason safe mode ever produces.
pub const SAFE_MODE_REASON: &str = "safe_mode_active";

/// Whether safe mode blocks everything for this user right now.
///
/// Trivial by design: the flag is read fresh from the registry on every
/// call, so the engine holds no mutable global.
pub fn is_blocking(safe_mode_enabled: bool) -> bool {
    safe_mode_enabled
}
