//! One detector per external HGT-detection tool

mod consel;
mod jane;
mod ranger;
mod riata;
mod trex;

pub use consel::ConselDetector;
pub use jane::JaneDetector;
pub use ranger::RangerDetector;
pub use riata::RiataDetector;
pub use trex::TrexDetector;

use crate::traits::HgtDetector;
use crate::types::Tool;

/// Detector instance for a tool
pub fn detector_for(tool: Tool) -> Box<dyn HgtDetector> {
    match tool {
        Tool::Trex => Box::new(TrexDetector),
        Tool::RangerDtl => Box::new(RangerDetector),
        Tool::RiataHgt => Box::new(RiataDetector),
        Tool::Jane => Box::new(JaneDetector),
        Tool::Consel => Box::new(ConselDetector),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_for_covers_every_tool() {
        for tool in Tool::all() {
            assert_eq!(detector_for(tool).tool(), tool);
        }
    }
}
