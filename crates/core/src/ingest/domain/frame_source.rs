use crate::shared::frame::Frame;

/// Yields analysed frames in capture order.
///
/// Stands in for the camera + OCR stage: every frame arrives with the text
/// regions recognised in it.
pub trait FrameSource: Send {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
