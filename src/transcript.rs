use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zstd::stream::{read::Decoder, write::Encoder};

use crate::app_config::CACHE_EXT;
use crate::error::StgResult;
use crate::input_files::sbv::SbvFile;
use crate::input_files::srt::SrtFile;
use crate::input_files::whisper::WhisperFile;
use crate::input_files::youtube::YouTubeTranscriptFile;
use crate::input_files::TranscriptFile;
use crate::video::VideoId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

pub type Segments = Vec<TranscriptSegment>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub segments: Segments,
}

impl Transcript {
    pub fn from_segments(segments: Segments) -> StgResult<Self> {
        validate(&segments)?;
        Ok(Self { segments })
    }

    /// Tries every known transcript format in turn and keeps the first that parses.
    pub fn infer(path: &Path) -> StgResult<Self> {
        let funcs = vec![
            WhisperFile::into_segments_from,
            YouTubeTranscriptFile::into_segments_from,
            SrtFile::into_segments_from,
            SbvFile::into_segments_from,
        ];
        let found = funcs
            .iter()
            .find_map(|func| func(path).ok().filter(|segments| !segments.is_empty()));
        let segments = found.ok_or(format!("Could not parse {:?} as a transcript", path))?;
        Self::from_segments(segments)
    }

    pub fn cache_path(data_dir: &Path, video_id: &VideoId) -> PathBuf {
        data_dir.join(format!("{}.{CACHE_EXT}", video_id.as_str()))
    }

    pub fn save(&self, path: &Path) -> StgResult<()> {
        let data = serde_json::to_string(self)?.into_bytes();
        compress_and_write(data, path)
    }

    pub fn read(path: &Path) -> StgResult<Self> {
        let data = read_and_decompress(path)?;
        let value: Self = serde_json::from_str(&String::from_utf8(data)?)?;
        validate(&value.segments)?;
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

fn validate(segments: &[TranscriptSegment]) -> StgResult<()> {
    let mut previous = 0.0;
    for (idx, seg) in segments.iter().enumerate() {
        if !seg.start.is_finite() || !seg.end.is_finite() || seg.start < 0.0 || seg.end < 0.0 {
            return Err(format!("Segment {idx} has an invalid time range").into());
        }
        if seg.start < previous {
            return Err(format!("Segment {idx} starts before the segment preceding it").into());
        }
        previous = seg.start;
    }
    Ok(())
}

const COMPRESSION_LEVEL: i32 = 3;

fn compress_and_write(data: Vec<u8>, path: &Path) -> StgResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut encoder = Encoder::new(file, COMPRESSION_LEVEL)?;
    encoder.write_all(&data)?;
    encoder.finish()?;
    Ok(())
}

fn read_and_decompress(path: &Path) -> StgResult<Vec<u8>> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)?;
    let mut decompressed_data = Vec::new();
    decoder.read_to_end(&mut decompressed_data)?;
    Ok(decompressed_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::extract_video_id;

    #[test]
    fn cache_round_trips_through_zstd() {
        let dir = tempfile::tempdir().unwrap();
        let video = extract_video_id("https://youtu.be/abc123").unwrap();
        let path = Transcript::cache_path(dir.path(), &video);
        assert!(path.ends_with("abc123.stg"));

        let transcript = Transcript::from_segments(vec![
            TranscriptSegment::new(0.0, 2.5, " Hello there."),
            TranscriptSegment::new(2.5, 4.0, " General Kenobi."),
        ])
        .unwrap();
        transcript.save(&path).unwrap();
        assert_eq!(Transcript::read(&path).unwrap(), transcript);
    }

    #[test]
    fn cache_path_stays_inside_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        assert!(extract_video_id("https://www.youtube.com/watch?v=..%2F..%2Fescaped").is_none());

        let video = extract_video_id("https://www.youtube.com/watch?v=abc-_9").unwrap();
        let path = Transcript::cache_path(&data_dir, &video);
        assert_eq!(path.parent(), Some(data_dir.as_path()));
    }

    #[test]
    fn rejects_out_of_order_segments() {
        let result = Transcript::from_segments(vec![
            TranscriptSegment::new(5.0, 6.0, "later"),
            TranscriptSegment::new(1.0, 2.0, "earlier"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_negative_and_non_finite_times() {
        assert!(Transcript::from_segments(vec![TranscriptSegment::new(-1.0, 2.0, "x")]).is_err());
        assert!(
            Transcript::from_segments(vec![TranscriptSegment::new(0.0, f64::NAN, "x")]).is_err()
        );
    }

    #[test]
    fn infer_rejects_unknown_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "just some text\nwith no timings\n").unwrap();
        assert!(Transcript::infer(&path).is_err());
    }

    #[test]
    fn infer_reads_srt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.srt");
        std::fs::write(
            &path,
            "1\n00:00:01,000 --> 00:00:03,500\nHello world\n\n2\n00:00:03,500 --> 00:00:05,000\nGoodbye\n\n",
        )
        .unwrap();
        let transcript = Transcript::infer(&path).unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.segments[0].start, 1.0);
        assert_eq!(transcript.segments[0].end, 3.5);
        assert_eq!(transcript.segments[1].text, "Goodbye");
    }
}
