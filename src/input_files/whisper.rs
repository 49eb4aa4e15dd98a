use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StgResult;
use crate::transcript::{Segments, TranscriptSegment};

use super::TranscriptFile;

/**
Output of `whisper --output_format json`, and of whisperx which adds word
level timings on top. Only the segment timings are needed here, extra fields
are ignored.
*/
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WhisperFile {
    #[serde(default)]
    pub text: Option<String>,
    pub segments: Vec<WhisperSegment>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WhisperSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl TranscriptFile for WhisperFile {
    fn read(path: &Path) -> StgResult<Self> {
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }

    fn into_segments(self) -> StgResult<Segments> {
        Ok(self
            .segments
            .into_iter()
            .map(|seg| TranscriptSegment::new(seg.start, seg.end, seg.text))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_whisperx_output_with_word_timings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.json");
        std::fs::write(
            &path,
            r#"{
                "segments": [
                    {"start": 0.0, "end": 4.2, "text": " Hello world",
                     "words": [{"word": "Hello", "start": 0.0, "end": 0.5, "score": 0.9}]},
                    {"start": 4.2, "end": 7.0, "text": " again"}
                ],
                "word_segments": []
            }"#,
        )
        .unwrap();
        let segments = WhisperFile::into_segments_from(&path).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, " Hello world");
        assert_eq!(segments[1].start, 4.2);
    }
}
