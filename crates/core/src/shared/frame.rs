use serde::{Deserialize, Serialize};

use super::detection::TextRegion;

/// One analysed camera frame: its dimensions and the OCR text regions
/// found in it, in frame-local pixel coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    /// Clockwise rotation needed to display the frame upright.
    #[serde(default)]
    pub rotation_degrees: u32,
    #[serde(default)]
    pub regions: Vec<TextRegion>,
}

impl Frame {
    pub fn new(index: usize, width: u32, height: u32) -> Self {
        Self {
            index,
            width,
            height,
            rotation_degrees: 0,
            regions: Vec::new(),
        }
    }

    pub fn with_regions(mut self, regions: Vec<TextRegion>) -> Self {
        self.regions = regions;
        self
    }

    /// Width and height as seen after applying `rotation_degrees`.
    pub fn upright_size(&self) -> (u32, u32) {
        if self.rotation_degrees % 180 == 90 {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}
