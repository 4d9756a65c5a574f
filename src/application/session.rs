//! Record script use case
//!
//! Wires the script navigator and the take loop together: shows each block,
//! asks the operator what to do, records, and tags accepted takes.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::navigation::{Cursor, NavigationIntent};
use crate::domain::script::{Block, ScriptDocument};
use crate::domain::take::{filename_stem, Credits, RecordDecision, TakeMetadata};

use super::ports::{
    ask, CaptureBackend, Chooser, ChooserError, MediaTagger, Renderer, ScriptError, ScriptLoader,
    ScriptSource, TaggingError,
};
use super::recording::RecordingController;
use super::take_loop::{TakeLoop, TakeLoopError, TakeOutcome, TakeRequest};

/// Question shown when picking a script
pub const SELECT_SCRIPT_PROMPT: &str = "Select your script:";

/// Errors from the record script use case
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("Take failed: {0}")]
    Take(#[from] TakeLoopError),

    #[error("Tagging failed: {0}")]
    Tagging(#[from] TaggingError),

    #[error("Prompt failed: {0}")]
    Chooser(#[from] ChooserError),
}

/// Input parameters for a recording session
#[derive(Debug, Clone, Default)]
pub struct SessionInput {
    /// Script to record; asked from the listing when absent
    pub script: Option<String>,
    /// Root folder for recordings, one sub-folder per script
    pub record_location: PathBuf,
    /// Author/copyright tags
    pub credits: Credits,
}

/// Counts reported when the cursor reaches the end of the script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub script: String,
    pub title: String,
    pub accepted: usize,
    pub abandoned: usize,
    pub ignored: usize,
}

/// Callbacks for display and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct SessionCallbacks {
    /// Called with the rendered teleprompter screen
    pub on_screen: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called when the backend confirmed a recording started
    pub on_recording_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called before tagging an accepted take
    pub on_tagging_start: Option<Box<dyn Fn(&Path) + Send + Sync>>,
    /// Called once an accepted take is tagged
    pub on_take_saved: Option<Box<dyn Fn(&Path) + Send + Sync>>,
    /// Called when a take is cancelled
    pub on_take_discarded: Option<Box<dyn Fn() + Send + Sync>>,
}

impl SessionCallbacks {
    pub(crate) fn screen(&self, text: &str) {
        if let Some(ref cb) = self.on_screen {
            cb(text);
        }
    }

    pub(crate) fn recording_start(&self) {
        if let Some(ref cb) = self.on_recording_start {
            cb();
        }
    }

    pub(crate) fn take_discarded(&self) {
        if let Some(ref cb) = self.on_take_discarded {
            cb();
        }
    }

    fn tagging_start(&self, path: &Path) {
        if let Some(ref cb) = self.on_tagging_start {
            cb(path);
        }
    }

    fn take_saved(&self, path: &Path) {
        if let Some(ref cb) = self.on_take_saved {
            cb(path);
        }
    }
}

/// Interactive recording session over one script
pub struct RecordScriptUseCase<B, C, S, L, R, T>
where
    B: CaptureBackend,
    C: Chooser,
    S: ScriptSource,
    L: ScriptLoader,
    R: Renderer,
    T: MediaTagger,
{
    controller: RecordingController<B>,
    chooser: C,
    scripts: S,
    loader: L,
    renderer: R,
    tagger: T,
}

impl<B, C, S, L, R, T> RecordScriptUseCase<B, C, S, L, R, T>
where
    B: CaptureBackend,
    C: Chooser,
    S: ScriptSource,
    L: ScriptLoader,
    R: Renderer,
    T: MediaTagger,
{
    /// Create a new use case instance
    pub fn new(
        controller: RecordingController<B>,
        chooser: C,
        scripts: S,
        loader: L,
        renderer: R,
        tagger: T,
    ) -> Self {
        Self {
            controller,
            chooser,
            scripts,
            loader,
            renderer,
            tagger,
        }
    }

    pub fn controller(&self) -> &RecordingController<B> {
        &self.controller
    }

    /// Ask the operator which script to record
    pub async fn select_script(&self) -> Result<String, SessionError> {
        let names = self.scripts.list().await?;
        let options: Vec<&str> = names.iter().map(String::as_str).collect();
        let index = self.chooser.choose(SELECT_SCRIPT_PROMPT, &options).await?;
        names
            .get(index)
            .cloned()
            .ok_or_else(|| ChooserError::OutOfRange(index).into())
    }

    async fn load(&self, script: &str) -> Result<ScriptDocument, SessionError> {
        let raw = self.scripts.read(script).await?;
        Ok(ScriptDocument::from_parsed(self.loader.load(&raw), script))
    }

    fn render_screen(&self, title: &str, block: &Block) -> String {
        format!(
            "{}\n{}",
            self.renderer.render(&format!("# Script: {}", title)),
            self.renderer.render(&block.raw)
        )
    }

    /// Run the session until the cursor passes the last block
    pub async fn execute(
        &self,
        input: SessionInput,
        callbacks: SessionCallbacks,
    ) -> Result<SessionSummary, SessionError> {
        let script = match input.script {
            Some(name) => name,
            None => self.select_script().await?,
        };

        // The title is fixed for the session; blocks are re-read every
        // iteration so edits to the script show up on the next block.
        let title = self.load(&script).await?.title().to_string();
        let folder = input.record_location.join(&script);
        info!(script = %script, title = %title, "Starting session");

        let mut summary = SessionSummary {
            script: script.clone(),
            title: title.clone(),
            ..Default::default()
        };
        let mut cursor = Cursor::new(0);
        let take_loop = TakeLoop::new(&self.controller, &self.chooser);

        loop {
            let document = self.load(&script).await?;
            cursor.resize(document.len());
            if cursor.is_finished() {
                break;
            }
            let Some(block) = document.block(cursor.position()) else {
                break;
            };

            let progression = cursor.progression();
            let screen = self.render_screen(&title, block);
            callbacks.screen(&screen);

            let decision: RecordDecision = ask(
                &self.chooser,
                &format!("({}) Ready to record ?", progression),
            )
            .await?;
            debug!(?decision, position = cursor.position(), "Block decision");

            let intent = match decision {
                RecordDecision::Back => NavigationIntent::Back,
                RecordDecision::Reload => NavigationIntent::Reload,
                RecordDecision::Record | RecordDecision::Ignore => {
                    let request = TakeRequest {
                        folder: folder.clone(),
                        filename_stem: filename_stem(&script, cursor.position()),
                        screen,
                    };
                    let outcome = take_loop.run(decision, &request, &callbacks).await?;

                    match &outcome {
                        TakeOutcome::Accepted { file_path, .. } => {
                            let metadata =
                                TakeMetadata::compute(&title, progression, block, &input.credits);
                            callbacks.tagging_start(file_path);
                            self.tagger.tag(file_path, &metadata).await?;
                            callbacks.take_saved(file_path);
                            summary.accepted += 1;
                        }
                        TakeOutcome::Abandoned => summary.abandoned += 1,
                        TakeOutcome::NotRecorded => summary.ignored += 1,
                    }
                    outcome.intent()
                }
            };

            cursor.step(intent);
        }

        info!(
            accepted = summary.accepted,
            abandoned = summary.abandoned,
            ignored = summary.ignored,
            "Session finished"
        );
        Ok(summary)
    }
}
