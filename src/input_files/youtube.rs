use serde::{Deserialize, Serialize};

use crate::error::StgResult;
use crate::transcript::{Segments, TranscriptSegment};

use super::TranscriptFile;

/**
Source: https://pypi.org/project/youtube-transcript-api/

Installation: `pip install youtube-transcript-api`

Usage:
```py
from youtube_transcript_api import YouTubeTranscriptApi

YouTubeTranscriptApi.get_transcript(video_id)
```
*/
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct YouTubeTranscriptFile(Vec<YouTubeTranscriptSegment>);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct YouTubeTranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl TranscriptFile for YouTubeTranscriptFile {
    fn read(path: &std::path::Path) -> StgResult<Self> {
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }

    fn into_segments(self) -> StgResult<Segments> {
        Ok(self
            .0
            .into_iter()
            .map(|seg| TranscriptSegment::new(seg.start, seg.start + seg.duration, seg.text))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_is_start_plus_duration() {
        let file: YouTubeTranscriptFile = serde_json::from_str(
            r#"[{"text": "first", "start": 1.5, "duration": 2.0},
                {"text": "second", "start": 3.5, "duration": 1.25}]"#,
        )
        .unwrap();
        let segments = file.into_segments().unwrap();
        assert_eq!(segments[0], TranscriptSegment::new(1.5, 3.5, "first"));
        assert_eq!(segments[1].end, 4.75);
    }
}
