use std::fmt;

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// 가사 서비스 검색 결과 한 건.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub artist: String,
    pub thumbnail_url: Option<String>,
}

impl SearchHit {
    /// 제목과 아티스트가 모두 비어있지 않으면 true.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.artist.trim().is_empty()
    }
}

/// 영상 조회수. 통계를 가져오지 못하면 `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCount {
    Known(String),
    Unknown,
}

impl fmt::Display for ViewCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewCount::Known(count) => f.write_str(&group_digits(count)),
            ViewCount::Unknown => f.write_str("알 수 없음"),
        }
    }
}

/// "500000" → "500,000". 숫자가 아니면 그대로 둔다.
fn group_digits(raw: &str) -> String {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }
    let len = raw.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMatch {
    pub video_id: String,
    pub view_count: ViewCount,
}

impl VideoMatch {
    pub fn url(&self) -> String {
        watch_url(&self.video_id)
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_PREFIX, video_id)
}

/// 검색 결과 한 줄: 가사 서비스 결과와 (있다면) 매칭된 영상.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub hit: SearchHit,
    pub video: Option<VideoMatch>,
}

impl SearchResult {
    pub fn video_url(&self) -> Option<String> {
        self.video.as_ref().map(VideoMatch::url)
    }

    pub fn display_views(&self) -> String {
        match &self.video {
            Some(v) => v.view_count.to_string(),
            None => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub title: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_count_groups_digits() {
        assert_eq!(ViewCount::Known("500000".to_string()).to_string(), "500,000");
        assert_eq!(ViewCount::Known("1234567".to_string()).to_string(), "1,234,567");
        assert_eq!(ViewCount::Known("999".to_string()).to_string(), "999");
    }

    #[test]
    fn test_view_count_non_numeric_untouched() {
        assert_eq!(ViewCount::Known("12k".to_string()).to_string(), "12k");
    }

    #[test]
    fn test_view_count_unknown() {
        assert_eq!(ViewCount::Unknown.to_string(), "알 수 없음");
    }

    #[test]
    fn test_hit_completeness() {
        let hit = SearchHit {
            title: "Yesterday".to_string(),
            artist: "  ".to_string(),
            thumbnail_url: None,
        };
        assert!(!hit.is_complete());
    }

    #[test]
    fn test_watch_url() {
        let m = VideoMatch {
            video_id: "abc123".to_string(),
            view_count: ViewCount::Unknown,
        };
        assert_eq!(m.url(), "https://www.youtube.com/watch?v=abc123");
    }
}
