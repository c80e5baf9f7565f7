use std::io::Write;

use serde::Serialize;

use crate::overlay::domain::overlay_item::OverlayItem;
use crate::overlay::domain::overlay_sink::OverlaySink;

#[derive(Serialize)]
struct OverlayRecord<'a> {
    frame: usize,
    items: &'a [OverlayItem],
}

/// Writes one JSON object per rendered frame to any byte sink.
pub struct JsonLinesOverlayWriter<W: Write + Send> {
    out: W,
    frames_written: usize,
}

impl<W: Write + Send> JsonLinesOverlayWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames_written: 0,
        }
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> OverlaySink for JsonLinesOverlayWriter<W> {
    fn render(
        &mut self,
        frame_index: usize,
        items: &[OverlayItem],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let record = OverlayRecord {
            frame: frame_index,
            items,
        };
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")?;
        self.frames_written += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.out.flush()?;
        Ok(())
    }
}
