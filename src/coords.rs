use glam::Vec2;

/// Conversion between simulation space (logical viewport units) and
/// device-pixel space. Shared by sensing, deposit and compositing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSpace {
    /// Simulation-space extent.
    pub size: Vec2,
    pub dpr: f32,
    /// Backing grid dimensions in device pixels.
    pub px_w: usize,
    pub px_h: usize,
}

impl DeviceSpace {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self {
            size: Vec2::new(width, height),
            dpr,
            px_w: (width * dpr).floor() as usize,
            px_h: (height * dpr).floor() as usize,
        }
    }

    /// Is `pos` inside [0, width) x [0, height)?
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x < self.size.x && pos.y >= 0.0 && pos.y < self.size.y
    }

    /// Device-pixel cell containing `pos`, or None outside the surface.
    #[inline]
    pub fn to_cell(&self, pos: Vec2) -> Option<(usize, usize)> {
        if !self.contains(pos) || self.px_w == 0 || self.px_h == 0 {
            return None;
        }
        // Fractional viewports can floor onto the one-past-last column.
        let cx = ((pos.x * self.dpr).floor() as usize).min(self.px_w - 1);
        let cy = ((pos.y * self.dpr).floor() as usize).min(self.px_h - 1);
        Some((cx, cy))
    }

    /// Row-major index of the cell containing `pos`.
    #[inline]
    pub fn to_index(&self, pos: Vec2) -> Option<usize> {
        self.to_cell(pos).map(|(cx, cy)| cy * self.px_w + cx)
    }

    /// Clamp a position to the last in-bounds value on each axis.
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.min(self.size.x - 1.0).max(0.0),
            pos.y.min(self.size.y - 1.0).max(0.0),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.px_w == 0 || self.px_h == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_scale_by_dpr() {
        let space = DeviceSpace::new(100.0, 50.0, 2.0);
        assert_eq!((space.px_w, space.px_h), (200, 100));
        assert_eq!(space.to_cell(Vec2::new(10.4, 3.9)), Some((20, 7)));
        // (0.5, 1.0) lands in device cell (1, 2).
        assert_eq!(space.to_index(Vec2::new(0.5, 1.0)), Some(2 * 200 + 1));
        assert_eq!(space.to_index(Vec2::new(0.5, 0.4)), Some(1));
    }

    #[test]
    fn outside_has_no_cell() {
        let space = DeviceSpace::new(100.0, 50.0, 1.5);
        assert_eq!(space.to_cell(Vec2::new(-0.01, 10.0)), None);
        assert_eq!(space.to_cell(Vec2::new(100.0, 10.0)), None);
        assert_eq!(space.to_cell(Vec2::new(10.0, 50.0)), None);
    }

    #[test]
    fn fractional_edge_stays_in_grid() {
        // 10.5 * 1.0 floors to 10 columns; x = 10.2 is still on-surface.
        let space = DeviceSpace::new(10.5, 4.0, 1.0);
        assert_eq!(space.px_w, 10);
        assert_eq!(space.to_cell(Vec2::new(10.2, 0.0)), Some((9, 0)));
    }

    #[test]
    fn clamp_pulls_inside() {
        let space = DeviceSpace::new(100.0, 50.0, 1.0);
        assert_eq!(space.clamp(Vec2::new(-3.0, 75.0)), Vec2::new(0.0, 49.0));
        assert!(space.contains(space.clamp(Vec2::new(1e6, -1e6))));
    }

    #[test]
    fn bad_dpr_falls_back() {
        let space = DeviceSpace::new(10.0, 10.0, 0.0);
        assert_eq!(space.dpr, 1.0);
    }
}
