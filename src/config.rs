//! Application-level configuration constants.

// UI behavior
pub const FRAME_INTERVAL_MS: u32 = 16;

// Fixed labels for the two-candidate mode
pub const CARD_LABELS: [&str; 2] = ["LEFT", "RIGHT"];

// Placeholder shown before the first digit run
pub const DIGIT_PLACEHOLDER: &str = "?";
