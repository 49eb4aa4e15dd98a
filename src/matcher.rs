use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{RunError, RunResult};
use crate::timestamp::format_time;
use crate::transcript::TranscriptSegment;
use crate::video::{build_timestamped_link, VideoId};

/// Requested keywords after trimming and lower-casing, without duplicates.
pub type Keywords = BTreeSet<String>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub keyword: String,
    pub start: String,
    pub end: String,
    pub link: String,
    pub snippet: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub matches: Vec<MatchRecord>,
    pub unmatched: Vec<String>,
}

/// Splits comma separated input into keywords. Empty pieces are dropped.
pub fn normalize_keywords(raw: &str) -> Keywords {
    raw.split(',')
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty())
        .collect()
}

/**
Finds every keyword in every segment.

Matching is plain substring containment on the lower-cased segment text, so
`"cat"` also hits `"concatenate"`. A segment yields one record per keyword it
contains and a keyword yields one record per segment it appears in.

Records come back grouped by keyword. The sort is stable, so within a keyword
they keep transcript order.
*/
pub fn find_matches(
    segments: &[TranscriptSegment],
    raw_keywords: &str,
    video_id: &VideoId,
) -> RunResult<MatchReport> {
    let keywords = normalize_keywords(raw_keywords);
    if keywords.is_empty() {
        return Err(RunError::MissingInput("keywords"));
    }

    let mut matches = vec![];
    let mut matched = Keywords::new();

    for segment in segments {
        let segment_text = segment.text.to_lowercase();
        for keyword in keywords.iter().filter(|kw| segment_text.contains(kw.as_str())) {
            matches.push(MatchRecord {
                keyword: keyword.clone(),
                start: format_time(segment.start),
                end: format_time(segment.end),
                link: build_timestamped_link(video_id, segment.start),
                snippet: segment.text.trim().to_string(),
            });
            matched.insert(keyword.clone());
        }
    }

    matches.sort_by(|a, b| a.keyword.cmp(&b.keyword));
    let unmatched = keywords.difference(&matched).cloned().collect();

    Ok(MatchReport { matches, unmatched })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::extract_video_id;
    use proptest::prelude::*;

    fn video() -> VideoId {
        extract_video_id("https://www.youtube.com/watch?v=abc123").unwrap()
    }

    fn seg(start: f64, end: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment::new(start, end, text)
    }

    #[test]
    fn normalizes_keyword_input() {
        let keywords = normalize_keywords("  World, moon ,,WORLD,  , Sun");
        assert_eq!(
            keywords.into_iter().collect::<Vec<_>>(),
            vec!["moon", "sun", "world"]
        );
    }

    #[test]
    fn finds_world_twice_and_misses_moon() {
        let transcript = vec![seg(0.0, 5.0, "hello world"), seg(5.0, 9.0, "goodbye world")];
        let report = find_matches(&transcript, "world, moon", &video()).unwrap();

        assert_eq!(report.matches.len(), 2);
        assert!(report.matches.iter().all(|m| m.keyword == "world"));
        assert_eq!(
            (report.matches[0].start.as_str(), report.matches[0].end.as_str()),
            ("00:00:00", "00:00:05")
        );
        assert_eq!(
            (report.matches[1].start.as_str(), report.matches[1].end.as_str()),
            ("00:00:05", "00:00:09")
        );
        assert_eq!(
            report.matches[1].link,
            "https://www.youtube.com/watch?v=abc123&t=5s"
        );
        assert_eq!(report.unmatched, vec!["moon"]);
    }

    #[test]
    fn empty_keywords_are_missing_input() {
        let transcript = vec![seg(0.0, 1.0, "anything")];
        let result = find_matches(&transcript, " , ,  ", &video());
        assert!(matches!(result, Err(RunError::MissingInput(_))));
    }

    #[test]
    fn matching_is_case_insensitive_and_keeps_original_snippet() {
        let transcript = vec![seg(12.7, 15.2, "  The RUST compiler  ")];
        let report = find_matches(&transcript, "Rust", &video()).unwrap();
        assert_eq!(report.matches[0].snippet, "The RUST compiler");
        assert_eq!(report.matches[0].link, "https://www.youtube.com/watch?v=abc123&t=12s");
        assert!(report.unmatched.is_empty());
    }

    #[test]
    fn substring_hits_inside_longer_words() {
        let transcript = vec![seg(0.0, 1.0, "we concatenate strings")];
        let report = find_matches(&transcript, "cat", &video()).unwrap();
        assert_eq!(report.matches.len(), 1);
    }

    #[test]
    fn one_segment_can_match_several_keywords() {
        let transcript = vec![
            seg(0.0, 2.0, "beta and alpha"),
            seg(2.0, 4.0, "alpha again"),
        ];
        let report = find_matches(&transcript, "beta, alpha", &video()).unwrap();
        let summary: Vec<_> = report
            .matches
            .iter()
            .map(|m| (m.keyword.as_str(), m.start.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("alpha", "00:00:00"), ("alpha", "00:00:02"), ("beta", "00:00:00")]
        );
    }

    #[test]
    fn empty_transcript_leaves_everything_unmatched() {
        let report = find_matches(&[], "b, a", &video()).unwrap();
        assert!(report.matches.is_empty());
        assert_eq!(report.unmatched, vec!["a", "b"]);
    }

    fn transcript_strategy() -> impl Strategy<Value = Vec<TranscriptSegment>> {
        prop::collection::vec(("[a-d ]{0,12}", 0.0f64..10.0), 0..12).prop_map(|parts| {
            let mut start = 0.0;
            parts
                .into_iter()
                .map(|(text, len)| {
                    let segment = TranscriptSegment::new(start, start + len, text);
                    start += len;
                    segment
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn matched_and_unmatched_partition_the_keywords(
            transcript in transcript_strategy(),
            raw in "[a-dA-D ]{1,3}(,[a-dA-D ]{1,3}){0,4}",
        ) {
            let requested = normalize_keywords(&raw);
            prop_assume!(!requested.is_empty());
            let report = find_matches(&transcript, &raw, &video()).unwrap();

            let matched: Keywords = report.matches.iter().map(|m| m.keyword.clone()).collect();
            let unmatched: Keywords = report.unmatched.iter().cloned().collect();
            prop_assert!(matched.is_disjoint(&unmatched));
            prop_assert_eq!(matched.union(&unmatched).cloned().collect::<Keywords>(), requested);
        }

        #[test]
        fn output_is_sorted_and_repeatable(
            transcript in transcript_strategy(),
            raw in "[a-d]{1,2}(,[a-d]{1,2}){0,4}",
        ) {
            let first = find_matches(&transcript, &raw, &video()).unwrap();
            let second = find_matches(&transcript, &raw, &video()).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert!(first.matches.windows(2).all(|w| w[0].keyword <= w[1].keyword));
            prop_assert!(first.unmatched.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
