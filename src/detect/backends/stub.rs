use anyhow::Result;

use crate::detect::backend::DetectorBackend;
use crate::detect::result::Detection;
use crate::frame::Frame;

/// Stub backend for testing and `stub://` sources. Replays a scripted
/// sequence of per-frame detections, cycling when the script runs out.
pub struct StubBackend {
    script: Vec<Vec<Detection>>,
    cursor: usize,
}

impl StubBackend {
    /// Backend that never detects anything.
    pub fn new() -> Self {
        Self {
            script: Vec::new(),
            cursor: 0,
        }
    }

    /// Backend replaying the given per-frame detections.
    pub fn with_script(script: Vec<Vec<Detection>>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Convenience constructor: one script frame per label slice.
    pub fn scripted_labels(frames: &[&[&str]]) -> Self {
        let script = frames
            .iter()
            .map(|labels| labels.iter().map(|l| Detection::labeled(l)).collect())
            .collect();
        Self::with_script(script)
    }
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>> {
        if self.script.is_empty() {
            return Ok(Vec::new());
        }
        let detections = self.script[self.cursor % self.script.len()].clone();
        self.cursor += 1;
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script_detects_nothing() {
        let mut backend = StubBackend::new();
        let frame = Frame::new(vec![0; 16], 4, 4);
        assert!(backend.detect(&frame).expect("detect").is_empty());
    }

    #[test]
    fn script_cycles() {
        let mut backend = StubBackend::scripted_labels(&[&["car"], &["robot", "robot"]]);
        let frame = Frame::new(vec![0; 16], 4, 4);

        assert_eq!(backend.detect(&frame).expect("detect").len(), 1);
        assert_eq!(backend.detect(&frame).expect("detect").len(), 2);
        // wraps back to the first script entry
        let third = backend.detect(&frame).expect("detect");
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].label, "car");
    }
}
