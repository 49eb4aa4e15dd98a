use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::error::{RunError, RunResult};
use crate::input_files::whisper::WhisperFile;
use crate::input_files::TranscriptFile;
use crate::transcript::Transcript;

/// Anything that can turn a source file into timed segments.
pub trait Transcriber {
    fn transcribe(&self, source: &Path) -> RunResult<Transcript>;
}

/// Runs the `whisper` command line tool and reads back its JSON output.
pub struct WhisperCommand {
    pub program: String,
    pub model: String,
}

impl WhisperCommand {
    pub fn new(program: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            model: model.into(),
        }
    }
}

impl Transcriber for WhisperCommand {
    fn transcribe(&self, source: &Path) -> RunResult<Transcript> {
        let out_dir = tempfile::tempdir().map_err(RunError::transcription)?;
        info!("Transcribing {source:?} with {} ({})", self.program, self.model);

        let output = Command::new(&self.program)
            .arg(source)
            .args(["--model", self.model.as_str()])
            .args(["--output_format", "json"])
            .arg("--output_dir")
            .arg(out_dir.path())
            .output()
            .map_err(|err| {
                RunError::TranscriptionFailure(format!("could not run {}: {err}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RunError::TranscriptionFailure(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stem = source
            .file_stem()
            .ok_or(RunError::MissingInput("audio file name"))?;
        let mut json_path = out_dir.path().join(stem);
        json_path.set_extension("json");
        debug!("Reading whisper output from {json_path:?}");

        let segments =
            WhisperFile::into_segments_from(&json_path).map_err(RunError::transcription)?;
        Transcript::from_segments(segments).map_err(RunError::transcription)
    }
}

/**
Uses the source as a transcript when it parses as one, otherwise hands it to
`fallback` as audio.
*/
pub struct FileOrAudio<T: Transcriber> {
    pub fallback: T,
}

impl<T: Transcriber> Transcriber for FileOrAudio<T> {
    fn transcribe(&self, source: &Path) -> RunResult<Transcript> {
        if !source.is_file() {
            return Err(RunError::TranscriptionFailure(format!(
                "{source:?} is not a readable file"
            )));
        }
        match Transcript::infer(source) {
            Ok(transcript) => {
                info!("Read {} segments from {source:?}", transcript.len());
                Ok(transcript)
            }
            Err(err) => {
                debug!("{source:?} is not a transcript ({err}), treating it as audio");
                self.fallback.transcribe(source)
            }
        }
    }
}
