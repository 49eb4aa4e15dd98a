use std::fmt::Display;

use serde::{Deserialize, Serialize};
use url::Url;

const WATCH_HOSTS: [&str; 3] = ["youtube.com", "www.youtube.com", "m.youtube.com"];
const SHORT_HOST: &str = "youtu.be";
const WATCH_URL: &str = "https://www.youtube.com/watch";

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/**
Pulls the video id out of either URL shape:

- `https://www.youtube.com/watch?v=<id>` (with or without `www`)
- `https://youtu.be/<id>`

Anything else, including a URL that fails to parse, gives `None`. Ids may
only contain `[A-Za-z0-9_-]`, since they end up in file names and links.
*/
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;

    let id = if WATCH_HOSTS.contains(&host) {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())?
    } else if host == SHORT_HOST {
        parsed.path_segments()?.next()?.to_string()
    } else {
        return None;
    };

    if id.is_empty() || !id.chars().all(is_id_char) {
        None
    } else {
        Some(VideoId(id))
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Watch URL that starts playback at `start_seconds`, truncated to whole seconds.
pub fn build_timestamped_link(video_id: &VideoId, start_seconds: f64) -> String {
    let seconds = start_seconds as u64;
    format!("{WATCH_URL}?v={video_id}&t={seconds}s")
}
