use std::{fmt::Display, path::Path};

use cached::proc_macro::cached;
use regex::Regex;

use crate::error::StgResult;
use crate::transcript::{Segments, TranscriptSegment};

use super::TranscriptFile;

#[cached(size = 1)]
fn srt_regex() -> Regex {
    Regex::new(r"(?m)^(\d+)\n(\d+):(\d+):(\d+),(\d+) ?--> ?(\d+):(\d+):(\d+),(\d+)\n")
        .expect("srt pattern is valid")
}

#[derive(Debug)]
pub struct SrtTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
}

impl SrtTime {
    pub fn in_seconds(&self) -> f64 {
        let seconds = (self.hours * 60 * 60 + self.minutes * 60 + self.seconds) as f64;
        let millis = self.millis as f64 / 1000.0;
        seconds + millis
    }
}

impl Display for SrtTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

#[derive(Debug)]
pub struct SrtSegment {
    pub id: u32,
    pub start: SrtTime,
    pub end: SrtTime,
    pub text: String,
}

pub struct SrtFile {
    pub segments: Vec<SrtSegment>,
}

impl TranscriptFile for SrtFile {
    fn read(path: &Path) -> StgResult<Self> {
        let contents = std::fs::read_to_string(path)?
            .trim_start_matches('\u{feff}')
            .replace("\r\n", "\n");
        let mut segments = vec![];
        let headers = srt_regex().captures_iter(&contents).collect::<Vec<_>>();
        for (idx, cap) in headers.iter().enumerate() {
            // a cue's text runs until the next cue header, blank line or not
            let text_start = cap.get(0).map_or(0, |m| m.end());
            let text_end = headers
                .get(idx + 1)
                .and_then(|next| next.get(0))
                .map_or(contents.len(), |m| m.start());
            segments.push(SrtSegment {
                id: cap[1].parse()?,
                start: SrtTime {
                    hours: cap[2].parse()?,
                    minutes: cap[3].parse()?,
                    seconds: cap[4].parse()?,
                    millis: cap[5].parse()?,
                },
                end: SrtTime {
                    hours: cap[6].parse()?,
                    minutes: cap[7].parse()?,
                    seconds: cap[8].parse()?,
                    millis: cap[9].parse()?,
                },
                text: contents[text_start..text_end]
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join(" "),
            });
        }
        if segments.len() != 0 {
            Ok(Self { segments })
        } else {
            Err(String::from("`.srt` file must contain at least 1 segment").into())
        }
    }

    fn into_segments(self) -> StgResult<Segments> {
        Ok(self
            .segments
            .into_iter()
            .map(|seg| {
                TranscriptSegment::new(seg.start.in_seconds(), seg.end.in_seconds(), seg.text)
            })
            .collect())
    }
}
