use serde::Deserialize;
use std::collections::HashMap;

/// Video metadata as printed by `yt-dlp --dump-json`, reduced to the caption tracks
#[derive(Debug, Default, Deserialize)]
pub struct VideoCaptionInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitles: HashMap<String, Vec<CaptionTrack>>,
    #[serde(default)]
    pub automatic_captions: HashMap<String, Vec<CaptionTrack>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptionTrack {
    pub ext: String,
    pub url: String,
}

/// YouTube `json3` timed-text document
#[derive(Debug, Deserialize)]
pub struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    start_ms: Option<u64>,
    #[serde(default)]
    segs: Vec<TimedTextSegment>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

impl VideoCaptionInfo {
    /// Pick the json3 track for a language, uploaded subtitles first
    pub fn json3_track(&self, language: &str) -> Option<&CaptionTrack> {
        find_track(&self.subtitles, language).or_else(|| find_track(&self.automatic_captions, language))
    }
}

fn find_track<'a>(
    tracks: &'a HashMap<String, Vec<CaptionTrack>>,
    language: &str,
) -> Option<&'a CaptionTrack> {
    let prefix = format!("{}-", language);
    let exact = tracks.get(language);
    let regional = || {
        let mut keys: Vec<&String> = tracks.keys().filter(|k| k.starts_with(&prefix)).collect();
        keys.sort();
        keys.first().and_then(|k| tracks.get(*k))
    };

    exact
        .or_else(regional)
        .and_then(|list| list.iter().find(|track| track.ext == "json3"))
}

impl TimedText {
    /// Caption fragments in playback order, one per timed event
    pub fn fragments(&self) -> Vec<String> {
        let mut events: Vec<&TimedTextEvent> = self.events.iter().collect();
        events.sort_by_key(|event| event.start_ms.unwrap_or(0));

        events
            .into_iter()
            .map(|event| {
                event
                    .segs
                    .iter()
                    .map(|seg| seg.utf8.as_str())
                    .collect::<String>()
                    .replace('\n', " ")
                    .trim()
                    .to_string()
            })
            .filter(|fragment| !fragment.is_empty())
            .collect()
    }

    /// The whole transcript, fragments joined by single spaces
    pub fn transcript(&self) -> String {
        self.fragments().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"{
        "title": "Demo",
        "subtitles": {},
        "automatic_captions": {
            "en-orig": [{"ext": "vtt", "url": "https://x/vtt"}, {"ext": "json3", "url": "https://x/orig"}],
            "de": [{"ext": "json3", "url": "https://x/de"}]
        }
    }"#;

    #[test]
    fn picks_regional_automatic_track() {
        let info: VideoCaptionInfo = serde_json::from_str(DUMP).unwrap();
        assert_eq!(info.json3_track("en").unwrap().url, "https://x/orig");
        assert_eq!(info.json3_track("de").unwrap().url, "https://x/de");
        assert!(info.json3_track("fr").is_none());
    }

    #[test]
    fn uploaded_subtitles_win_over_automatic() {
        let mut info: VideoCaptionInfo = serde_json::from_str(DUMP).unwrap();
        info.subtitles.insert(
            "en".to_string(),
            vec![CaptionTrack {
                ext: "json3".to_string(),
                url: "https://x/manual".to_string(),
            }],
        );
        assert_eq!(info.json3_track("en").unwrap().url, "https://x/manual");
    }

    #[test]
    fn transcript_joins_fragments_with_single_spaces() {
        let doc = r#"{"events": [
            {"tStartMs": 1500, "segs": [{"utf8": "second"}, {"utf8": " line\n"}]},
            {"tStartMs": 0, "segs": [{"utf8": "first"}]},
            {"tStartMs": 900},
            {"tStartMs": 2000, "segs": [{"utf8": "\n"}]}
        ]}"#;
        let timed: TimedText = serde_json::from_str(doc).unwrap();
        assert_eq!(timed.fragments(), vec!["first", "second line"]);
        assert_eq!(timed.transcript(), "first second line");
    }
}
