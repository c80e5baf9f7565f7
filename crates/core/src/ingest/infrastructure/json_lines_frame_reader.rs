use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ingest::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

#[derive(Debug, Error)]
pub enum FrameReadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("read error at line {line}: {source}")]
    Io {
        line: usize,
        source: std::io::Error,
    },
    #[error("malformed frame at line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
    #[error("inverted box for region {region} at line {line}")]
    InvertedBox { line: usize, region: usize },
}

/// Reads one JSON-encoded [`Frame`] per line. Blank lines are skipped.
pub struct JsonLinesFrameReader<R: BufRead + Send> {
    input: Option<R>,
}

impl JsonLinesFrameReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, FrameReadError> {
        let file = File::open(path).map_err(|source| FrameReadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead + Send> JsonLinesFrameReader<R> {
    pub fn new(input: R) -> Self {
        Self { input: Some(input) }
    }
}

fn parse_line(line: usize, text: &str) -> Result<Frame, FrameReadError> {
    let frame: Frame =
        serde_json::from_str(text).map_err(|source| FrameReadError::Parse { line, source })?;
    if let Some(region) = frame.regions.iter().position(|r| !r.is_well_formed()) {
        return Err(FrameReadError::InvertedBox { line, region });
    }
    Ok(frame)
}

impl<R: BufRead + Send> FrameSource for JsonLinesFrameReader<R> {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let Some(input) = self.input.as_mut() else {
            return Box::new(std::iter::empty());
        };
        Box::new(
            input
                .lines()
                .enumerate()
                .map(|(i, result)| (i + 1, result))
                .filter(|(_, result)| result.as_ref().map_or(true, |l| !l.trim().is_empty()))
                .map(|(line, result)| -> Result<Frame, Box<dyn std::error::Error>> {
                    let text = result.map_err(|source| FrameReadError::Io { line, source })?;
                    Ok(parse_line(line, &text)?)
                }),
        )
    }

    fn close(&mut self) {
        self.input = None;
    }
}
