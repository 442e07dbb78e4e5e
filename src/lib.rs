//! Rasterization engine for a browser-based freehand shape drawing tool.
//!
//! The crate compiles to WebAssembly and runs in the browser, but everything
//! except the thin browser `Engine` wrapper is plain Rust and testable
//! natively. A user picks a tool (line, rect, circle, clock) and drags on the
//! canvas; every pointer-move undoes the previous preview frame and draws the
//! next one directly into an RGBA pixel buffer, which the host presents.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::Session`] (testable core) and the browser `Engine` |
//! | [`preview`] | Pointer-driven preview state machine |
//! | [`shapes`] | Draw/undo of lines, rectangles, circles and clock faces |
//! | [`raster`] | Scan-conversion: Bresenham line/circle, rotation |
//! | [`pixels`] | RGBA pixel buffer with a committed-ink baseline |
//! | [`input`] | Tool ids, shapes and the stroke state |
//! | [`state`] | Observable state cell with `(previous, next)` notifications |
//! | [`ticker`] | Cancellable periodic task and time sources |
//! | [`config`] | Runtime configuration |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants |

pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod input;
pub mod pixels;
pub mod preview;
pub mod raster;
pub mod shapes;
pub mod state;
pub mod ticker;
