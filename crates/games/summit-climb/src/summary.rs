use serde::{Deserialize, Serialize};

use summit_core::time::format_clock;

use crate::progression::Inventory;

/// End-of-run statistics shown after reaching the summit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub elapsed_secs: f32,
    pub peak_altitude: f32,
    /// Ropes plus torches held at the end of the run.
    pub total_items: u32,
}

impl RunSummary {
    pub fn new(elapsed_secs: f32, peak_altitude: f32, inventory: &Inventory) -> Self {
        Self {
            elapsed_secs,
            peak_altitude,
            total_items: inventory.total_items(),
        }
    }

    pub fn clock(&self) -> String {
        format_clock(self.elapsed_secs)
    }

    /// Peak altitude floored to whole meters.
    pub fn altitude_meters(&self) -> u32 {
        self.peak_altitude.max(0.0).floor() as u32
    }
}
