/// One recognized object instance.
///
/// Coordinates are normalized 0..1 box geometry as reported by the model.
/// Only `label` matters to the history subsystem; geometry and confidence
/// pass through for display layers.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub confidence: f32,
    pub label: String,
}

impl Detection {
    /// Detection with a label only, geometry zeroed. Enough for counting.
    pub fn labeled(label: &str) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 0.0,
            confidence: 1.0,
            label: label.to_string(),
        }
    }
}
