/// CPU-side RGBA8 surface (premultiplied alpha), row-major.
/// The trail map composites onto this before it is uploaded to the GPU.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    /// Resize and clear. Keeps the allocation when shrinking.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, [0; 4]);
    }

    /// Set every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixels.fill([0; 4]);
    }

    #[inline]
    pub fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = y as usize * self.width as usize + x as usize;
        self.pixels[i] = rgba;
    }

    /// Read one pixel. Panics if out of range.
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw bytes for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_and_read_back() {
        let mut canvas = Canvas::new(4, 3);
        canvas.put(3, 2, [1, 2, 3, 4]);
        assert_eq!(canvas.pixel(3, 2), [1, 2, 3, 4]);
        assert_eq!(canvas.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(canvas.as_bytes().len(), 4 * 3 * 4);
    }

    #[test]
    fn resize_clears() {
        let mut canvas = Canvas::new(2, 2);
        canvas.put(1, 1, [9, 9, 9, 9]);
        canvas.resize(3, 1);
        assert_eq!(canvas.as_bytes(), &[0u8; 12][..]);
        assert!(!canvas.is_empty());
        canvas.resize(0, 5);
        assert!(canvas.is_empty());
    }
}
