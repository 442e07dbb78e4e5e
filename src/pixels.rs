//! RGBA pixel buffer with a committed-ink baseline.
//!
//! Every pixel is either set (opaque black) or clear (alpha 0). The baseline
//! is a frozen copy of the buffer taken at the last commit; clearing a pixel
//! that is opaque in the baseline is a no-op, so erasing a preview frame can
//! never eat ink that was already committed underneath it.

#[cfg(test)]
#[path = "pixels_test.rs"]
mod pixels_test;

use std::rc::Rc;

use crate::consts::{ALPHA_OFFSET, BYTES_PER_PIXEL, OPAQUE};
use crate::error::RenderError;

/// Immutable copy of a buffer's bytes.
///
/// Cheap to clone; the bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    bytes: Rc<[u8]>,
}

impl Snapshot {
    fn blank(len: usize) -> Self {
        Self { bytes: vec![0; len].into() }
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn is_opaque_at(&self, offset: usize) -> bool {
        self.bytes.get(offset + ALPHA_OFFSET).is_some_and(|&a| a > 0)
    }
}

/// Flat RGBA buffer sized to the canvas.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
    baseline: Snapshot,
}

impl PixelBuffer {
    /// A fully clear buffer with an all-clear baseline.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Self { width, height, data: vec![0; len], baseline: Snapshot::blank(len) }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major, ready for `putImageData`.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Byte offset of `(x, y)`, or `OutOfBounds`.
    fn offset(&self, x: i32, y: i32) -> Result<usize, RenderError> {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(ux), Ok(uy)) if ux < self.width && uy < self.height => {
                Ok((uy as usize * self.width as usize + ux as usize) * BYTES_PER_PIXEL)
            }
            _ => Err(RenderError::OutOfBounds { x, y, width: self.width, height: self.height }),
        }
    }

    /// Write opaque black at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::OutOfBounds`] and leaves the buffer untouched
    /// when the coordinate is outside the buffer.
    pub fn set_pixel(&mut self, x: i32, y: i32) -> Result<(), RenderError> {
        let at = self.offset(x, y)?;
        self.data[at..at + BYTES_PER_PIXEL].copy_from_slice(&[0, 0, 0, OPAQUE]);
        Ok(())
    }

    /// Zero the alpha at `(x, y)` unless the baseline has ink there.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::OutOfBounds`] when the coordinate is outside the buffer.
    pub fn clear_pixel(&mut self, x: i32, y: i32) -> Result<(), RenderError> {
        let at = self.offset(x, y)?;
        if !self.baseline.is_opaque_at(at) {
            self.data[at + ALPHA_OFFSET] = 0;
        }
        Ok(())
    }

    /// Whether `(x, y)` is set. Out-of-bounds coordinates read as clear.
    #[must_use]
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.offset(x, y)
            .is_ok_and(|at| self.data[at + ALPHA_OFFSET] > 0)
    }

    /// Whether `(x, y)` holds committed ink.
    #[must_use]
    pub fn is_committed(&self, x: i32, y: i32) -> bool {
        self.offset(x, y).is_ok_and(|at| self.baseline.is_opaque_at(at))
    }

    /// Number of set pixels.
    #[must_use]
    pub fn count_set(&self) -> usize {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .filter(|px| px[ALPHA_OFFSET] > 0)
            .count()
    }

    /// Zero every byte and reset the baseline to all-clear.
    pub fn clear_all(&mut self) {
        self.data.fill(0);
        self.baseline = Snapshot::blank(self.data.len());
    }

    /// Immutable copy of the current bytes.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { bytes: self.data.as_slice().into() }
    }

    /// The snapshot that currently protects committed ink.
    #[must_use]
    pub fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    /// Replace the baseline. A snapshot of a different size is ignored.
    pub fn set_baseline(&mut self, snapshot: Snapshot) {
        if snapshot.bytes.len() == self.data.len() {
            self.baseline = snapshot;
        } else {
            tracing::warn!(
                expected = self.data.len(),
                actual = snapshot.bytes.len(),
                "baseline size mismatch, ignored"
            );
        }
    }

    /// Freeze the current bytes as the new baseline.
    pub fn commit(&mut self) {
        self.baseline = self.snapshot();
    }
}
