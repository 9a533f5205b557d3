//! Tube display trait

use crate::display::Frame;

/// A bank of nixie tubes
///
/// Rendering replaces what every tube shows in one update. Blanked
/// positions are dark regardless of their stored digit.
pub trait TubeDisplay {
    fn render(&mut self, frame: &Frame);
}
