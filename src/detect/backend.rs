use anyhow::Result;

use crate::detect::result::Detection;
use crate::frame::Frame;

/// Detector backend trait: the seam to the pretrained model.
///
/// The monitor treats the model as a black box. Implementations receive a
/// frame and return zero or more labeled detections; nothing here assumes a
/// model architecture, confidence calibration, or box convention beyond
/// what [`Detection`] carries.
pub trait DetectorBackend: Send {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Run detection on one frame.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>>;

    /// Optional warm-up hook.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}
