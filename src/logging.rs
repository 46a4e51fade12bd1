use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// stderr로 로그를 내보낸다. 표준 출력은 결과 표시에만 쓴다.
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::INFO } else { Level::WARN };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
        .add_directive("reqwest=warn".parse()?)
        .add_directive("rusqlite=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("로그 초기화에 실패했습니다: {}", e))?;

    Ok(())
}
