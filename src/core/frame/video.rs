/// 相机帧（RGBA）
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>, // RGBA 格式
    pub timestamp_ms: u64,
}

impl VideoFrame {
    pub fn new(width: u32, height: u32, data: Vec<u8>, timestamp_ms: u64) -> Self {
        Self {
            width,
            height,
            data,
            timestamp_ms,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_valid(&self) -> bool {
        self.pixel_count() > 0 && self.data.len() == self.pixel_count() * 4
    }

    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixel_count() * 3);
        for chunk in self.data.chunks_exact(4) {
            rgb.push(chunk[0]); // R
            rgb.push(chunk[1]); // G
            rgb.push(chunk[2]); // B
        }
        rgb
    }
}
