//! Shared numeric constants for the sketchpad crate.

// ── Pixels ──────────────────────────────────────────────────────

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Offset of the alpha channel within a pixel.
pub const ALPHA_OFFSET: usize = 3;

/// Alpha value of a set (inked) pixel.
pub const OPAQUE: u8 = 255;

// ── Clock ───────────────────────────────────────────────────────

/// Seconds-hand length as a fraction of the clock radius.
pub const SECONDS_HAND_RATIO: f64 = 0.95;

/// Minutes-hand length as a fraction of the clock radius.
pub const MINUTES_HAND_RATIO: f64 = 0.75;

/// Hours-hand length as a fraction of the clock radius.
pub const HOURS_HAND_RATIO: f64 = 0.55;

/// π / 30 (6°) — angular step of one second or one minute.
pub const FRAC_PI_30: f64 = std::f64::consts::PI / 30.0;

pub const MS_PER_SECOND: f64 = 1_000.0;
pub const MS_PER_MINUTE: f64 = 60_000.0;
pub const MS_PER_HOUR: f64 = 3_600_000.0;

// ── Host defaults ───────────────────────────────────────────────

/// Height of the page header above the canvas, in CSS pixels.
pub const DEFAULT_HEADER_HEIGHT: i32 = 150;

/// Horizontal space left around the canvas when fitting it to the window.
pub const DEFAULT_MARGIN_X: u32 = 2;

/// Vertical space left below the canvas when fitting it to the window.
pub const DEFAULT_MARGIN_Y: u32 = 8;

/// Clock animation period.
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 1_000;
