use anyhow::Result;

/// One captured frame: owned pixels plus dimensions. The monitor never
/// interprets pixel contents itself; frames only pass through to the
/// detector backend.
#[derive(Clone, Debug)]
pub struct Frame {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }
}

/// A frame producer: a live camera, a still image loader, or the stub.
///
/// `next_frame` is called once per poll-loop iteration for stream sources
/// and exactly once for single-shot capture.
pub trait FrameSource: Send {
    /// Source identifier for logs (e.g. the configured URL).
    fn name(&self) -> &str;

    fn next_frame(&mut self) -> Result<Frame>;
}

/// Synthetic source used behind `stub://` URLs and in tests. Produces a
/// shifting gradient so consecutive frames differ.
pub struct StubSource {
    name: String,
    width: u32,
    height: u32,
    counter: u64,
}

impl StubSource {
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            counter: 0,
        }
    }
}

impl FrameSource for StubSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_frame(&mut self) -> Result<Frame> {
        let len = pixel_count(self.width, self.height);
        let shift = self.counter as u8;
        let pixels = (0..len).map(|i| (i as u8).wrapping_add(shift)).collect();
        self.counter += 1;
        Ok(Frame::new(pixels, self.width, self.height))
    }
}

// Widened before multiplying: width * height can exceed u32.
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_count_does_not_overflow_u32() {
        assert_eq!(pixel_count(70_000, 70_000), 4_900_000_000);
    }

    #[test]
    fn stub_source_frames_differ() {
        let mut source = StubSource::new("stub://test", 8, 8);
        let a = source.next_frame().expect("frame");
        let b = source.next_frame().expect("frame");
        assert_eq!(a.pixels.len(), 64);
        assert_ne!(a.pixels, b.pixels);
    }
}
