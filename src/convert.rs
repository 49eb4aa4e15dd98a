use std::path::Path;

use crate::{
    app_config::AppConfig,
    error::{RunError, RunResult},
    transcript::Transcript,
    video::{extract_video_id, VideoId},
};

/// Stores an existing transcript file in the cache under the video's id.
pub fn command_convert(config: &AppConfig, source: &Path, url: &str) -> RunResult<VideoId> {
    let video_id =
        extract_video_id(url).ok_or_else(|| RunError::InvalidReference(url.to_string()))?;
    let transcript = Transcript::infer(source).map_err(RunError::transcription)?;
    let dest = Transcript::cache_path(&config.data_dir, &video_id);
    println!("Converting: {source:?} -> {dest:?}");
    transcript
        .save(&dest)
        .map_err(|err| RunError::Cache(format!("{dest:?}: {err}")))?;
    Ok(video_id)
}
