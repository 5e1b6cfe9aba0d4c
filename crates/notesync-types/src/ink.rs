use serde::{Deserialize, Serialize};

use crate::id::StrokeId;

/// A sampled pen position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InkPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_pressure")]
    pub pressure: f64,
}

fn default_pressure() -> f64 {
    1.0
}

impl InkPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pressure: default_pressure(),
        }
    }
}

/// One continuous pen stroke of a live-ink document. Strokes are never
/// edited in place: an erased stroke is deleted and a redrawn one gets a new id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    pub points: Vec<InkPoint>,
}

impl Stroke {
    pub fn new(id: impl Into<StrokeId>, points: Vec<InkPoint>) -> Self {
        Self {
            id: id.into(),
            points,
        }
    }
}
