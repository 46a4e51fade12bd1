use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::core::query;
use crate::models::watch_url;
use crate::sources::VideoSource;

/// 제목과 아티스트로 재생할 영상의 URL을 찾는다.
/// 검색 결과에서 쓰는 것과 같은 영상 검색 API를 "official video" 쿼리로 호출한다.
/// 찾지 못하거나 검색이 실패하면 None.
pub fn resolve_playback_url(
    video: &dyn VideoSource,
    title: &str,
    artist: &str,
) -> Option<String> {
    let q = query::build_playback_query(title, artist);
    match video.search_video(&q) {
        Ok(Some(id)) => {
            debug!(query = %q, video_id = %id, "재생할 영상을 찾았습니다");
            Some(watch_url(&id))
        }
        Ok(None) => None,
        Err(e) => {
            warn!("{} 재생 영상 검색 실패 ({}): {:#}", video.name(), q, e);
            None
        }
    }
}

/// 기본 브라우저(또는 OS 기본 핸들러)로 URL을 연다.
pub fn open_url(url: &str) -> Result<()> {
    let mut cmd = opener_command(url);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("URL을 열 수 없습니다: {}", url))?;
    Ok(())
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}
