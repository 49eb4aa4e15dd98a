use std::path::Path;

use crate::error::StgResult;
use crate::transcript::Segments;

pub mod sbv;
pub mod srt;
pub mod whisper;
pub mod youtube;

pub trait TranscriptFile: Sized {
    fn read(path: &Path) -> StgResult<Self>;
    fn into_segments(self) -> StgResult<Segments>;
    fn into_segments_from(path: &Path) -> StgResult<Segments> {
        Self::read(path)?.into_segments()
    }
}
