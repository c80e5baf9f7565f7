use super::overlay_item::OverlayItem;

/// Rendering surface for plate highlights.
///
/// Receives the full set of highlights for each frame; implementations
/// replace whatever they showed for the previous frame.
pub trait OverlaySink: Send {
    fn render(
        &mut self,
        frame_index: usize,
        items: &[OverlayItem],
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flushes and releases the surface.
    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
