//! Recorded frame scripts for replay.
//!
//! A script is a JSON array of frames. Each frame either carries its regions
//! inline or points at a Tesseract TSV file next to the script:
//!
//! ```json
//! [
//!   { "atMs": 0,   "action": "populate", "tsv": "frames/001.tsv" },
//!   { "atMs": 120, "action": "detect",   "regions": [] },
//!   { "atMs": 900, "action": "reset" }
//! ]
//! ```

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ocr::{read_tsv_regions, TextRegion};
use crate::session::queue::{FrameCommand, FrameWorkItem};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameAction {
    Populate,
    Detect,
    Reset,
}

/// One frame as written in the script file.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptFrame {
    /// Capture time relative to the start of the recording
    pub at_ms: u64,
    pub action: FrameAction,
    #[serde(default)]
    pub regions: Option<Vec<TextRegion>>,
    /// TSV file relative to the script
    #[serde(default)]
    pub tsv: Option<PathBuf>,
}

/// A validated script with every TSV reference resolved.
#[derive(Debug, Clone)]
pub struct FrameScript {
    pub items: Vec<FrameWorkItem>,
}

impl FrameScript {
    /// Reads and validates a script file.
    ///
    /// Every problem is reported before any frame is handed out: unreadable
    /// or invalid JSON, decreasing timestamps, frames with both `regions` and
    /// `tsv`, and TSV files that fail to parse.
    pub fn load(path: &Path, min_confidence: f32) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read frame script {}", path.display()))?;
        let frames: Vec<ScriptFrame> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse frame script {}", path.display()))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        Self::from_frames(frames, base_dir, min_confidence)
    }

    pub fn from_frames(frames: Vec<ScriptFrame>, base_dir: &Path, min_confidence: f32) -> Result<Self> {
        let mut items = Vec::with_capacity(frames.len());
        let mut last_ms = 0u64;

        for (idx, frame) in frames.into_iter().enumerate() {
            let number = idx as u32 + 1;

            if frame.at_ms < last_ms {
                return Err(anyhow!(
                    "Frame {}: atMs {} is earlier than the previous frame ({})",
                    number,
                    frame.at_ms,
                    last_ms
                ));
            }
            last_ms = frame.at_ms;

            let regions = match (frame.regions, frame.tsv) {
                (Some(_), Some(_)) => {
                    return Err(anyhow!("Frame {}: use either regions or tsv, not both", number));
                }
                (Some(regions), None) => regions,
                (None, Some(tsv)) => read_tsv_regions(&base_dir.join(tsv), min_confidence)
                    .with_context(|| format!("Frame {}", number))?,
                (None, None) => Vec::new(),
            };

            let command = match frame.action {
                FrameAction::Populate => FrameCommand::Populate(regions),
                FrameAction::Detect => FrameCommand::Detect(regions),
                FrameAction::Reset => FrameCommand::Reset,
            };

            items.push(FrameWorkItem::with_elapsed(
                number,
                command,
                Duration::from_millis(frame.at_ms),
            ));
        }

        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TSV: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
5\t1\t1\t1\t1\t1\t10\t100\t40\t20\t95\tYes\n\
5\t1\t1\t1\t2\t1\t10\t300\t40\t20\t95\tNo\n";

    #[test]
    fn test_load_inline_and_tsv_frames() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("001.tsv"), TSV).unwrap();
        let script_path = dir.path().join("script.json");
        std::fs::write(
            &script_path,
            r#"[
                {"atMs": 0, "action": "populate", "tsv": "001.tsv"},
                {"atMs": 50, "action": "detect", "regions": [
                    {"value": "yes", "boundingBox": {"x": 10, "y": 100, "width": 40, "height": 20}}
                ]},
                {"atMs": 50, "action": "reset"}
            ]"#,
        )
        .unwrap();

        let script = FrameScript::load(&script_path, 0.0).unwrap();
        assert_eq!(script.len(), 3);

        match &script.items[0].command {
            FrameCommand::Populate(regions) => assert_eq!(regions.len(), 2),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(script.items[1].elapsed, Duration::from_millis(50));
        assert_eq!(script.items[2].command, FrameCommand::Reset);
        assert_eq!(script.items[2].frame, 3);
    }

    #[test]
    fn test_decreasing_time_rejected() {
        let dir = tempdir().unwrap();
        let script_path = dir.path().join("script.json");
        std::fs::write(
            &script_path,
            r#"[{"atMs": 100, "action": "reset"}, {"atMs": 50, "action": "reset"}]"#,
        )
        .unwrap();

        assert!(FrameScript::load(&script_path, 0.0).is_err());
    }

    #[test]
    fn test_regions_and_tsv_together_rejected() {
        let frames = vec![ScriptFrame {
            at_ms: 0,
            action: FrameAction::Detect,
            regions: Some(Vec::new()),
            tsv: Some(PathBuf::from("x.tsv")),
        }];
        assert!(FrameScript::from_frames(frames, Path::new("."), 0.0).is_err());
    }

    #[test]
    fn test_missing_tsv_file_is_error() {
        let dir = tempdir().unwrap();
        let frames = vec![ScriptFrame {
            at_ms: 0,
            action: FrameAction::Populate,
            regions: None,
            tsv: Some(PathBuf::from("missing.tsv")),
        }];
        assert!(FrameScript::from_frames(frames, dir.path(), 0.0).is_err());
    }

    #[test]
    fn test_unknown_action_rejected() {
        let dir = tempdir().unwrap();
        let script_path = dir.path().join("script.json");
        std::fs::write(&script_path, r#"[{"atMs": 0, "action": "tap"}]"#).unwrap();
        assert!(FrameScript::load(&script_path, 0.0).is_err());
    }
}
