//! Trail field: the decaying intensity grid agents sense and deposit onto.
//! One cell per device pixel. Coverage is stored as a 0..1 opacity and
//! reported on a 0..255 intensity scale.

use glam::Vec2;

use crate::config::DepositColor;
use crate::coords::DeviceSpace;
use crate::render::canvas::Canvas;

/// Highest intensity `sample` can return.
pub const MAX_INTENSITY: f32 = 255.0;
/// Returned by `sample` off-surface. Lower than any valid intensity.
pub const OUT_OF_BOUNDS: f32 = -1.0;
/// Fold the pending decay gain into the cells once it drops below this.
const GAIN_FOLD_THRESHOLD: f32 = 1e-3;

/// The only surface the swarm sees of the trail.
pub trait ScalarField {
    /// Intensity at a simulation-space position, or `OUT_OF_BOUNDS`.
    fn sample(&self, pos: Vec2) -> f32;
    /// Composite one deposit "over" the cell containing `pos`.
    fn deposit(&mut self, pos: Vec2);
    /// Multiply every cell's intensity by `factor`.
    fn decay(&mut self, factor: f32);
    /// Zero every cell.
    fn clear(&mut self);
}

pub struct TrailMap {
    space: DeviceSpace,
    /// Real coverage = cells[i] * gain, row-major.
    cells: Vec<f32>,
    /// Decay applied lazily to the whole surface.
    gain: f32,
    deposit: DepositColor,
}

impl TrailMap {
    pub fn new(space: DeviceSpace, deposit: DepositColor) -> Self {
        Self {
            cells: vec![0.0; space.px_w * space.px_h],
            space,
            gain: 1.0,
            deposit,
        }
    }

    /// Reallocate for a new surface. Prior content is discarded.
    pub fn reset(&mut self, space: DeviceSpace) {
        self.space = space;
        self.cells.resize(space.px_w * space.px_h, 0.0);
        self.clear();
    }

    /// Coverage (0..1) of a device-pixel cell.
    #[inline]
    pub fn coverage(&self, cx: usize, cy: usize) -> f32 {
        (self.cells[cy * self.space.px_w + cx] * self.gain).min(1.0)
    }

    /// Is every cell at zero intensity?
    #[cfg(test)]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&c| c == 0.0)
    }

    fn fold_gain(&mut self) {
        let gain = self.gain;
        for cell in &mut self.cells {
            *cell *= gain;
        }
        self.gain = 1.0;
    }

    /// Clear `canvas`, then paint the trail onto it as premultiplied RGBA,
    /// nearest-neighbor scaled to the canvas resolution.
    pub fn composite_onto(&self, canvas: &mut Canvas) {
        canvas.clear();
        if self.space.is_empty() || canvas.is_empty() {
            return;
        }

        let (fw, fh) = (self.space.px_w, self.space.px_h);
        let (cw, ch) = (canvas.width() as usize, canvas.height() as usize);
        let [r, g, b] = self.deposit.rgb.map(f32::from);

        for ty in 0..ch {
            let sy = ty * fh / ch;
            for tx in 0..cw {
                let sx = tx * fw / cw;
                let a = self.coverage(sx, sy);
                if a <= 0.0 {
                    continue;
                }
                canvas.put(
                    tx as u32,
                    ty as u32,
                    [
                        (r * a).round() as u8,
                        (g * a).round() as u8,
                        (b * a).round() as u8,
                        (a * 255.0).round() as u8,
                    ],
                );
            }
        }
    }
}

impl ScalarField for TrailMap {
    #[inline]
    fn sample(&self, pos: Vec2) -> f32 {
        match self.space.to_index(pos) {
            Some(i) => (self.cells[i] * self.gain).min(1.0) * MAX_INTENSITY,
            None => OUT_OF_BOUNDS,
        }
    }

    #[inline]
    fn deposit(&mut self, pos: Vec2) {
        let Some(i) = self.space.to_index(pos) else {
            return;
        };
        let src = self.deposit.alpha;
        let dst = (self.cells[i] * self.gain).min(1.0);
        // Standard "over": a = src + dst * (1 - src).
        let out = (src + dst * (1.0 - src)).min(1.0);
        self.cells[i] = out / self.gain;
    }

    fn decay(&mut self, factor: f32) {
        debug_assert!((0.0..=1.0).contains(&factor), "decay factor {factor}");
        self.gain *= factor.clamp(0.0, 1.0);
        if self.gain < GAIN_FOLD_THRESHOLD {
            self.fold_gain();
        }
    }

    fn clear(&mut self) {
        self.cells.fill(0.0);
        self.gain = 1.0;
    }
}
