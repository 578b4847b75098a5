//! Update tokens for the pod template
//!
//! The token only has to differ between rapid successive updates of the same
//! function so the pod template always changes. It is not an identifier.

use chrono::Utc;

/// Source of per-update tokens
pub trait TagGenerator: Send + Sync {
    /// Produce the next token
    fn next_tag(&self) -> String;
}

/// Tokens from the sub-second nanoseconds of the wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockTagGenerator;

impl TagGenerator for ClockTagGenerator {
    fn next_tag(&self) -> String {
        Utc::now().timestamp_subsec_nanos().to_string()
    }
}

impl<F> TagGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_tag(&self) -> String {
        self()
    }
}
