use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::config::GeniusConfig;
use crate::models::SearchHit;
use crate::sources::LyricsSource;

const SEARCH_URL: &str = "https://api.genius.com/search";

pub struct GeniusClient {
    client: reqwest::blocking::Client,
    access_token: String,
}

#[derive(Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    response: SearchPayload,
}

#[derive(Deserialize, Default)]
struct SearchPayload {
    #[serde(default)]
    hits: Vec<GeniusHit>,
}

#[derive(Deserialize)]
struct GeniusHit {
    #[serde(default)]
    result: GeniusSong,
}

#[derive(Deserialize, Default)]
struct GeniusSong {
    title: Option<String>,
    header_image_url: Option<String>,
    #[serde(default)]
    primary_artist: GeniusArtist,
}

#[derive(Deserialize, Default)]
struct GeniusArtist {
    name: Option<String>,
}

impl GeniusClient {
    pub fn new(config: &GeniusConfig) -> Result<Self> {
        let access_token = config
            .access_token
            .clone()
            .filter(|t| !t.is_empty())
            .context("Genius access token이 설정되지 않았습니다 (GENIUS_API_KEY)")?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("modumubul/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Genius HTTP 클라이언트 생성에 실패했습니다")?;

        Ok(Self {
            client,
            access_token,
        })
    }

    fn convert_hit(hit: GeniusHit) -> SearchHit {
        let song = hit.result;
        SearchHit {
            title: song.title.unwrap_or_default(),
            artist: song.primary_artist.name.unwrap_or_default(),
            thumbnail_url: song.header_image_url.filter(|u| !u.is_empty()),
        }
    }
}

/// Genius 검색 응답 본문을 SearchHit 목록으로 변환한다.
/// 제목이나 아티스트가 없는 항목은 빈 문자열로 남겨 호출자가 거르도록 한다.
pub fn parse_search_response(body: &str) -> Result<Vec<SearchHit>> {
    let resp: SearchResponse =
        serde_json::from_str(body).context("Genius 검색 응답 파싱에 실패했습니다")?;
    Ok(resp
        .response
        .hits
        .into_iter()
        .map(GeniusClient::convert_hit)
        .collect())
}

impl LyricsSource for GeniusClient {
    fn name(&self) -> &str {
        "Genius"
    }

    fn search(&self, keyword: &str) -> Result<Vec<SearchHit>> {
        let body = self
            .client
            .get(SEARCH_URL)
            .bearer_auth(&self.access_token)
            .query(&[("q", keyword)])
            .send()
            .context("Genius 연결에 실패했습니다")?
            .error_for_status()
            .context("Genius 검색 요청이 실패했습니다")?
            .text()
            .context("Genius 검색 응답 읽기에 실패했습니다")?;

        let hits = parse_search_response(&body)?;
        debug!(keyword, count = hits.len(), "Genius 검색 완료");
        Ok(hits)
    }
}
