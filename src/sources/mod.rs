pub mod genius;
pub mod youtube;

use anyhow::Result;

use crate::models::{SearchHit, ViewCount};

/// 곡 메타데이터(가사) 검색 소스 트레이트.
pub trait LyricsSource {
    fn name(&self) -> &str;
    /// 키워드로 곡을 검색한다. 응답 순서를 유지한다.
    fn search(&self, keyword: &str) -> Result<Vec<SearchHit>>;
}

/// 영상 플랫폼 소스 트레이트.
/// 검색으로 영상 ID를 찾고, ID로 조회수를 가져온다.
pub trait VideoSource {
    fn name(&self) -> &str;
    /// 쿼리로 영상을 검색해 첫 번째 결과의 ID를 반환한다.
    fn search_video(&self, query: &str) -> Result<Option<String>>;
    /// 영상 ID의 조회수를 가져온다. 통계가 없으면 `ViewCount::Unknown`.
    fn view_count(&self, video_id: &str) -> Result<ViewCount>;
}
