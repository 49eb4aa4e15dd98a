use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

use crate::app_config::{AppConfig, CACHE_EXT};
use crate::error::{RunError, RunResult};
use crate::export::export;
use crate::matcher::{find_matches, normalize_keywords, MatchReport};
use crate::transcriber::Transcriber;
use crate::transcript::Transcript;
use crate::utils::Timer;
use crate::video::{extract_video_id, VideoId};

#[derive(Debug, Clone)]
pub struct FindRequest {
    pub url: String,
    pub keywords: String,
    pub source: Option<PathBuf>,
    pub refresh: bool,
}

/**
One full run: check the inputs, get a transcript, match, then write both CSV
files. Nothing is written unless every step before the export succeeded.
*/
pub fn run_find(
    config: &AppConfig,
    request: &FindRequest,
    transcriber: &impl Transcriber,
) -> RunResult<MatchReport> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(RunError::MissingInput("YouTube URL"));
    }
    if request.keywords.trim().is_empty() {
        return Err(RunError::MissingInput("keywords"));
    }
    let video_id =
        extract_video_id(url).ok_or_else(|| RunError::InvalidReference(url.to_string()))?;
    if normalize_keywords(&request.keywords).is_empty() {
        return Err(RunError::MissingInput("keywords"));
    }

    let transcript = load_transcript(config, &video_id, request, transcriber)?;

    let mut timer = Timer::new();
    let report = find_matches(&transcript.segments, &request.keywords, &video_id)?;
    timer.log(
        format!(
            "Matched {} records across {} segments",
            report.matches.len(),
            transcript.len()
        )
        .as_str(),
    );

    export(
        &report.matches,
        &report.unmatched,
        &config.matches_path(),
        &config.unmatched_path(),
    )?;
    Ok(report)
}

fn load_transcript(
    config: &AppConfig,
    video_id: &VideoId,
    request: &FindRequest,
    transcriber: &impl Transcriber,
) -> RunResult<Transcript> {
    let mut timer = Timer::new();
    let cache_path = Transcript::cache_path(&config.data_dir, video_id);

    if !request.refresh && cache_is_current(&cache_path, request.source.as_deref()) {
        match Transcript::read(&cache_path) {
            Ok(transcript) => {
                timer.log(format!("Loaded cached transcript for {video_id}").as_str());
                return Ok(transcript);
            }
            Err(err) => warn!("Ignoring unreadable cache {cache_path:?}: {err}"),
        }
    }

    let Some(source) = &request.source else {
        return Err(RunError::MissingInput("transcript source"));
    };
    let transcript = transcriber.transcribe(source)?;
    timer.log(format!("Transcribed {} segments", transcript.len()).as_str());

    if let Err(err) = transcript.save(&cache_path) {
        warn!("Could not cache transcript at {cache_path:?}: {err}");
    }
    Ok(transcript)
}

/// The cache stands in for the source only when it was written after the
/// source last changed. Without a source any existing cache entry will do.
fn cache_is_current(cache_path: &Path, source: Option<&Path>) -> bool {
    let Ok(cache_meta) = std::fs::metadata(cache_path) else {
        return false;
    };
    let Some(source) = source else {
        return true;
    };
    let modified = |meta: std::fs::Metadata| meta.modified().ok();
    match (
        modified(cache_meta),
        std::fs::metadata(source).ok().and_then(modified),
    ) {
        (Some(cached_at), Some(source_changed_at)) => cached_at >= source_changed_at,
        _ => false,
    }
}

pub fn print_report(report: &MatchReport) {
    println!("\nDone! Results written to CSV.");
    for m in &report.matches {
        println!(
            "\n{} [{}-{}]\n  {}\n  {}",
            m.keyword, m.start, m.end, m.link, m.snippet
        );
    }

    if !report.unmatched.is_empty() {
        println!("\nKeywords not found:");
        for kw in &report.unmatched {
            println!("  - {kw}");
        }
    }
}

/// Lists every cached transcript as `(video id, segment count)`.
pub fn cached_transcripts(config: &AppConfig) -> Vec<(String, usize)> {
    let mut found = vec![];
    for entry in WalkDir::new(&config.data_dir)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !(path.is_file() && path.extension().is_some_and(|ext| ext == CACHE_EXT)) {
            continue;
        }
        let Some(video_id) = path.file_stem().map(|stem| stem.to_string_lossy().to_string())
        else {
            continue;
        };
        match Transcript::read(path) {
            Ok(transcript) => found.push((video_id, transcript.len())),
            Err(err) => warn!("Skipping {path:?}: {err}"),
        }
    }
    found.sort();
    found
}

pub fn command_list(config: &AppConfig) {
    let mut timer = Timer::new();
    let cached = cached_transcripts(config);
    timer.log(format!("Found {} cached transcripts", cached.len()).as_str());
    for (video_id, segments) in cached {
        println!("{video_id}\t{segments} segments");
    }
    info!("Cache directory: {:?}", config.data_dir);
}
