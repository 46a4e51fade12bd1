use tracing::{debug, info, warn};

use crate::core::query;
use crate::models::{SearchHit, SearchResult, VideoMatch, ViewCount};
use crate::sources::{LyricsSource, VideoSource};

/// 키워드로 곡을 검색하고 각 결과에 영상과 조회수를 붙인다.
///
/// 외부 서비스 실패는 호출자에게 올리지 않는다.
/// 가사 검색이 실패하면 빈 목록, 영상 검색이 실패하면 영상 없음,
/// 통계 조회가 실패하면 조회수 `Unknown`이 된다.
/// 제목이나 아티스트가 없는 결과는 건너뛴다.
pub fn search_songs(
    lyrics: &dyn LyricsSource,
    video: &dyn VideoSource,
    keyword: &str,
) -> Vec<SearchResult> {
    let Some(keyword) = query::normalize_keyword(keyword) else {
        return Vec::new();
    };

    let hits = match lyrics.search(&keyword) {
        Ok(hits) => hits,
        Err(e) => {
            warn!("{} 검색 실패: {:#}", lyrics.name(), e);
            return Vec::new();
        }
    };

    info!(keyword = %keyword, hits = hits.len(), "{} 검색 결과", lyrics.name());

    hits.into_iter()
        .filter(|hit| {
            let keep = hit.is_complete();
            if !keep {
                debug!(?hit, "제목 또는 아티스트가 없어 건너뜁니다");
            }
            keep
        })
        .map(|hit| {
            let video = resolve_video(video, &hit);
            SearchResult { hit, video }
        })
        .collect()
}

/// 결과 한 건의 영상을 찾는다. 검색 → 통계 순서로 두 번 호출한다.
pub fn resolve_video(video: &dyn VideoSource, hit: &SearchHit) -> Option<VideoMatch> {
    let q = query::build_video_query(hit);

    let video_id = match video.search_video(&q) {
        Ok(Some(id)) => id,
        Ok(None) => {
            debug!(query = %q, "영상 검색 결과 없음");
            return None;
        }
        Err(e) => {
            warn!("{} 영상 검색 실패 ({}): {:#}", video.name(), q, e);
            return None;
        }
    };

    let view_count = video.view_count(&video_id).unwrap_or_else(|e| {
        warn!("{} 조회수 조회 실패 ({}): {:#}", video.name(), video_id, e);
        ViewCount::Unknown
    });

    Some(VideoMatch {
        video_id,
        view_count,
    })
}
