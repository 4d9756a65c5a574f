//! FFmpeg-based metadata tagger adapter

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::fs;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{MediaTagger, TaggingError};
use crate::domain::take::TakeMetadata;

/// Suffix of the intermediate file FFmpeg writes before it replaces the take
const TAGGED_SUFFIX: &str = "-metadata.mp4";

/// Tags recordings by remuxing them through FFmpeg
pub struct FfmpegTagger {
    program: String,
}

impl FfmpegTagger {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Where FFmpeg writes the tagged copy of `file`
    fn tagged_path(file: &Path) -> PathBuf {
        let mut name = file.as_os_str().to_owned();
        name.push(TAGGED_SUFFIX);
        PathBuf::from(name)
    }

    /// Build FFmpeg args; absent metadata values are left out
    fn build_args(file: &Path, metadata: &TakeMetadata) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), file.into()];

        for (key, value) in metadata.entries() {
            if let Some(value) = value {
                args.push("-metadata".into());
                args.push(format!("{}={}", key, value).into());
            }
        }

        args.push(Self::tagged_path(file).into());
        args
    }
}

impl Default for FfmpegTagger {
    fn default() -> Self {
        Self::new(crate::domain::config::DEFAULT_FFMPEG_PATH)
    }
}

#[async_trait]
impl MediaTagger for FfmpegTagger {
    async fn tag(&self, file: &Path, metadata: &TakeMetadata) -> Result<(), TaggingError> {
        let tagged = Self::tagged_path(file);
        debug!(file = %file.display(), program = %self.program, "Tagging take");

        let output = Command::new(&self.program)
            .args(Self::build_args(file, metadata))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TaggingError::TaggerNotFound(self.program.clone())
                } else {
                    TaggingError::SpawnFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let _ = fs::remove_file(&tagged).await;
            return Err(TaggingError::ProcessFailed {
                status: output.status.to_string(),
                message: stderr.lines().last().unwrap_or("unknown error").to_string(),
            });
        }

        fs::rename(&tagged, file)
            .await
            .map_err(|e| TaggingError::ReplaceFailed {
                path: file.display().to_string(),
                message: e.to_string(),
            })?;

        debug!(file = %file.display(), "Take tagged");
        Ok(())
    }
}
