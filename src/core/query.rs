use crate::models::SearchHit;

const PLAYBACK_SUFFIX: &str = "official video";

/// Normalize a user keyword: trim and collapse runs of whitespace.
/// Returns None when nothing is left to search for.
pub fn normalize_keyword(raw: &str) -> Option<String> {
    let keyword = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if keyword.is_empty() {
        None
    } else {
        Some(keyword)
    }
}

/// Build the video search query for a hit: "{title} {artist}".
pub fn build_video_query(hit: &SearchHit) -> String {
    join_parts(&[hit.title.as_str(), hit.artist.as_str()])
}

/// Build the query used to pick a video for playback:
/// "{title} {artist} official video".
pub fn build_playback_query(title: &str, artist: &str) -> String {
    join_parts(&[title, artist, PLAYBACK_SUFFIX])
}

fn join_parts(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keyword() {
        assert_eq!(normalize_keyword("  let   it be "), Some("let it be".to_string()));
    }

    #[test]
    fn test_normalize_empty_keyword() {
        assert_eq!(normalize_keyword(""), None);
        assert_eq!(normalize_keyword(" \t\n"), None);
    }

    #[test]
    fn test_video_query() {
        let hit = SearchHit {
            title: "Yesterday".to_string(),
            artist: "The Beatles".to_string(),
            thumbnail_url: None,
        };
        assert_eq!(build_video_query(&hit), "Yesterday The Beatles");
    }

    #[test]
    fn test_playback_query() {
        assert_eq!(
            build_playback_query("Yesterday", "The Beatles"),
            "Yesterday The Beatles official video"
        );
    }
}
