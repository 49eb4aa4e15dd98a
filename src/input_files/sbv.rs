use std::{fmt::Display, path::Path};

use cached::proc_macro::cached;
use regex::Regex;

use crate::error::StgResult;
use crate::transcript::{Segments, TranscriptSegment};

use super::TranscriptFile;

#[cached(size = 1)]
fn sbv_regex() -> Regex {
    Regex::new(r"(\d+):(\d+):(\d+)\.(\d+),(\d+):(\d+):(\d+)\.(\d+)\n(.*)\n")
        .expect("sbv pattern is valid")
}

#[derive(Debug)]
pub struct SbvTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
}

impl SbvTime {
    pub fn in_seconds(&self) -> f64 {
        let seconds = (self.hours * 60 * 60 + self.minutes * 60 + self.seconds) as f64;
        let millis = self.millis as f64 / 1000.0;
        seconds + millis
    }
}

impl Display for SbvTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02}.{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

#[derive(Debug)]
pub struct SbvSegment {
    pub start: SbvTime,
    pub end: SbvTime,
    pub text: String,
}

pub struct SbvFile {
    pub segments: Vec<SbvSegment>,
}

impl TranscriptFile for SbvFile {
    fn read(path: &Path) -> StgResult<Self> {
        let contents = std::fs::read_to_string(path)?.replace("\r\n", "\n");
        let mut segments = vec![];
        for cap in sbv_regex().captures_iter(&contents) {
            segments.push(SbvSegment {
                start: SbvTime {
                    hours: cap[1].parse()?,
                    minutes: cap[2].parse()?,
                    seconds: cap[3].parse()?,
                    millis: cap[4].parse()?,
                },
                end: SbvTime {
                    hours: cap[5].parse()?,
                    minutes: cap[6].parse()?,
                    seconds: cap[7].parse()?,
                    millis: cap[8].parse()?,
                },
                text: cap[9].to_string(),
            });
        }
        Ok(Self { segments })
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
