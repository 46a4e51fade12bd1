use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::config::YoutubeConfig;
use crate::models::ViewCount;
use crate::sources::VideoSource;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";

/// YouTube Data API v3 클라이언트.
pub struct YoutubeClient {
    client: reqwest::blocking::Client,
    api_key: String,
}

#[derive(Deserialize)]
struct ItemList<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: SearchItemId,
}

#[derive(Deserialize, Default)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct VideoItem {
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Deserialize, Default)]
struct Statistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}

impl YoutubeClient {
    pub fn new(config: &YoutubeConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .context("YouTube API 키가 설정되지 않았습니다 (YOUTUBE_API_KEY)")?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("modumubul/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("YouTube HTTP 클라이언트 생성에 실패했습니다")?;

        Ok(Self { client, api_key })
    }

    fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String> {
        self.client
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .context("YouTube 연결에 실패했습니다")?
            .error_for_status()
            .context("YouTube 요청이 실패했습니다")?
            .text()
            .context("YouTube 응답 읽기에 실패했습니다")
    }
}

/// 검색 응답에서 첫 번째 항목의 영상 ID를 꺼낸다.
/// 첫 항목에 videoId가 없으면 뒤 항목을 보지 않고 None.
pub fn parse_first_video_id(body: &str) -> Result<Option<String>> {
    let list: ItemList<SearchItem> =
        serde_json::from_str(body).context("YouTube 검색 응답 파싱에 실패했습니다")?;
    Ok(list
        .items
        .into_iter()
        .next()
        .and_then(|item| item.id.video_id)
        .filter(|id| !id.is_empty()))
}

/// 통계 응답에서 조회수를 꺼낸다. 항목이나 viewCount가 없으면 Unknown.
pub fn parse_view_count(body: &str) -> Result<ViewCount> {
    let list: ItemList<VideoItem> =
        serde_json::from_str(body).context("YouTube 통계 응답 파싱에 실패했습니다")?;
    Ok(list
        .items
        .into_iter()
        .next()
        .and_then(|item| item.statistics.view_count)
        .map(ViewCount::Known)
        .unwrap_or(ViewCount::Unknown))
}

impl VideoSource for YoutubeClient {
    fn name(&self) -> &str {
        "YouTube"
    }

    fn search_video(&self, query: &str) -> Result<Option<String>> {
        let body = self.get(
            SEARCH_URL,
            &[("part", "snippet"), ("type", "video"), ("q", query)],
        )?;
        let id = parse_first_video_id(&body)?;
        debug!(query, video_id = ?id, "YouTube 검색 완료");
        Ok(id)
    }

    fn view_count(&self, video_id: &str) -> Result<ViewCount> {
        let body = self.get(VIDEOS_URL, &[("part", "statistics"), ("id", video_id)])?;
        parse_view_count(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_video_id() {
        let body = r#"{"kind": "youtube#searchListResponse", "items": [
            {"id": {"kind": "youtube#video", "videoId": "abc123"}},
            {"id": {"kind": "youtube#video", "videoId": "def456"}}
        ]}"#;
        assert_eq!(parse_first_video_id(body).unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_first_video_id_no_items() {
        assert_eq!(parse_first_video_id(r#"{"items": []}"#).unwrap(), None);
        assert_eq!(parse_first_video_id("{}").unwrap(), None);
    }

    #[test]
    fn test_first_item_without_video_id() {
        let body = r#"{"items": [
            {"id": {"kind": "youtube#channel", "channelId": "UC1"}},
            {"id": {"kind": "youtube#video", "videoId": "def456"}}
        ]}"#;
        assert_eq!(parse_first_video_id(body).unwrap(), None);
    }

    #[test]
    fn test_view_count() {
        let body = r#"{"items": [{"id": "abc123", "statistics": {"viewCount": "500000", "likeCount": "10"}}]}"#;
        assert_eq!(
            parse_view_count(body).unwrap(),
            ViewCount::Known("500000".to_string())
        );
    }

    #[test]
    fn test_view_count_no_items_is_unknown() {
        assert_eq!(parse_view_count(r#"{"items": []}"#).unwrap(), ViewCount::Unknown);
    }

    #[test]
    fn test_view_count_missing_field_is_unknown() {
        let body = r#"{"items": [{"id": "abc123", "statistics": {"likeCount": "10"}}]}"#;
        assert_eq!(parse_view_count(body).unwrap(), ViewCount::Unknown);
        let body = r#"{"items": [{"id": "abc123"}]}"#;
        assert_eq!(parse_view_count(body).unwrap(), ViewCount::Unknown);
    }

    #[test]
    fn test_new_requires_key() {
        let cfg = YoutubeConfig { api_key: None };
        assert!(YoutubeClient::new(&cfg).is_err());
    }

    /// 실제 YouTube API 호출 테스트. 네트워크와 YOUTUBE_API_KEY가 필요하다.
    #[test]
    #[ignore]
    fn test_live_search_and_stats() {
        let cfg = YoutubeConfig {
            api_key: std::env::var("YOUTUBE_API_KEY").ok(),
        };
        let client = YoutubeClient::new(&cfg).expect("YoutubeClient 생성 실패");
        let id = client
            .search_video("Yesterday The Beatles")
            .expect("검색 실패")
            .expect("영상 없음");
        let views = client.view_count(&id).expect("통계 조회 실패");
        println!("{} 조회수: {}", id, views);
    }
}
