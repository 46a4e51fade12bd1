use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};
use dialoguer::{Input, Select};
use tracing::debug;

use crate::config::{self, Config, GeniusConfig, YoutubeConfig};
use crate::core::aggregator;
use crate::core::favorites::FavoritesStore;
use crate::core::playback;
use crate::models::SearchResult;
use crate::sources::genius::GeniusClient;
use crate::sources::youtube::YoutubeClient;
use crate::sources::VideoSource;

#[derive(Parser)]
#[command(name = "modumubul", about = "곡 검색 + YouTube 조회수 + 즐겨찾기")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 자세한 로그 출력
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// 즐겨찾기 DB 경로
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 키워드로 곡 검색
    Search {
        /// 검색어
        #[arg(required = true, num_args = 1..)]
        keyword: Vec<String>,
        /// 결과만 출력하고 동작 선택 메뉴를 띄우지 않음
        #[arg(long)]
        no_interactive: bool,
    },
    /// 즐겨찾기 목록
    Favorites,
    /// 즐겨찾기에 저장된 곡 열기
    Open {
        /// 즐겨찾기 제목
        title: String,
    },
    /// 제목과 아티스트로 영상을 찾아 재생
    Play { title: String, artist: String },
    /// API 자격증명 설정
    Config,
}

/// 검색 결과 한 줄에서 고를 수 있는 동작.
/// 각 값은 해당 줄의 제목/아티스트/URL을 직접 소유한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Play { title: String, artist: String },
    Favorite { title: String, url: String },
}

impl RowAction {
    pub fn label(&self) -> String {
        match self {
            RowAction::Play { title, artist } => format!("듣기: {} - {}", title, artist),
            RowAction::Favorite { title, .. } => format!("즐겨찾기 추가: {}", title),
        }
    }
}

/// 결과 한 줄의 동작 목록. 영상이 없으면 즐겨찾기는 제공하지 않는다.
pub fn row_actions(result: &SearchResult) -> Vec<RowAction> {
    let mut actions = vec![RowAction::Play {
        title: result.hit.title.clone(),
        artist: result.hit.artist.clone(),
    }];
    if let Some(url) = result.video_url() {
        actions.push(RowAction::Favorite {
            title: result.hit.title.clone(),
            url,
        });
    }
    actions
}

pub fn run(cli: Cli) -> Result<()> {
    let mut cfg = config::load_config();
    if let Some(db) = cli.db {
        cfg.storage.db_path = Some(db);
    }

    match cli.command {
        Some(Commands::Search {
            keyword,
            no_interactive,
        }) => cmd_search(&cfg, &keyword.join(" "), no_interactive),
        Some(Commands::Favorites) => cmd_favorites(&cfg),
        Some(Commands::Open { title }) => cmd_open(&cfg, &title),
        Some(Commands::Play { title, artist }) => cmd_play(&cfg, &title, &artist),
        Some(Commands::Config) => cmd_config(),
        None => {
            println!("사용법: modumubul <명령어>");
            println!("자세한 정보는 modumubul --help를 실행하세요.");
            Ok(())
        }
    }
}

fn ensure_configured(cfg: &Config) -> Result<()> {
    if !cfg.genius.is_configured() || !cfg.youtube.is_configured() {
        bail!(
            "API 자격증명이 없습니다. {}와 {} 환경 변수를 지정하거나 'modumubul config'를 실행하세요.",
            config::GENIUS_ENV,
            config::YOUTUBE_ENV
        );
    }
    Ok(())
}

fn cmd_search(cfg: &Config, keyword: &str, no_interactive: bool) -> Result<()> {
    ensure_configured(cfg)?;

    let mut store = FavoritesStore::open(&cfg.db_path())?;
    let lyrics = GeniusClient::new(&cfg.genius)?;
    let video = YoutubeClient::new(&cfg.youtube)?;

    println!("검색 중: {}", keyword);
    let results = aggregator::search_songs(&lyrics, &video, keyword);

    if results.is_empty() {
        println!("검색 결과가 없습니다.");
        return Ok(());
    }

    println!("{}", results_table(&results, &store));

    if no_interactive {
        return Ok(());
    }

    let actions: Vec<RowAction> = results.iter().flat_map(row_actions).collect();
    let mut items: Vec<String> = actions.iter().map(RowAction::label).collect();
    items.push("종료".to_string());

    loop {
        let selection = Select::new()
            .with_prompt("동작을 선택하세요")
            .items(&items)
            .default(0)
            .interact()?;

        let Some(action) = actions.get(selection) else {
            break;
        };
        debug!(?action, "선택");
        apply_action(action, &video, &mut store)?;
    }

    Ok(())
}

fn apply_action(
    action: &RowAction,
    video: &dyn VideoSource,
    store: &mut FavoritesStore,
) -> Result<()> {
    match action {
        RowAction::Play { title, artist } => play(video, title, artist),
        RowAction::Favorite { title, url } => {
            if store.add(title, url)? {
                println!("즐겨찾기에 추가했습니다: {}", title);
            } else {
                println!("이미 즐겨찾기에 있습니다: {}", title);
            }
            Ok(())
        }
    }
}

fn results_table(results: &[SearchResult], store: &FavoritesStore) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "#", "제목", "아티스트", "조회수", "영상", "썸네일", "즐겨찾기",
    ]);

    for (i, result) in results.iter().enumerate() {
        let star = if store.contains(&result.hit.title) { "★" } else { "" };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&result.hit.title),
            Cell::new(&result.hit.artist),
            Cell::new(result.display_views()),
            Cell::new(result.video_url().unwrap_or_else(|| "-".to_string())),
            Cell::new(result.hit.thumbnail_url.as_deref().unwrap_or("-")),
            Cell::new(star),
        ]);
    }

    table
}

fn cmd_favorites(cfg: &Config) -> Result<()> {
    let store = FavoritesStore::open(&cfg.db_path())?;

    if store.is_empty() {
        println!("즐겨찾기가 비어 있습니다.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["제목", "URL"]);
    for entry in store.load() {
        table.add_row(vec![Cell::new(&entry.title), Cell::new(&entry.url)]);
    }

    println!("{table}");
    println!("\n총 {}곡", store.len());
    Ok(())
}

fn cmd_open(cfg: &Config, title: &str) -> Result<()> {
    let store = FavoritesStore::open(&cfg.db_path())?;
    match store.get(title) {
        Some(url) => {
            println!("여는 중: {}", url);
            playback::open_url(url)
        }
        None => {
            println!("즐겨찾기에 없는 제목입니다: {}", title);
            Ok(())
        }
    }
}

fn cmd_play(cfg: &Config, title: &str, artist: &str) -> Result<()> {
    if !cfg.youtube.is_configured() {
        bail!(
            "YouTube API 키가 없습니다. {} 환경 변수를 지정하거나 'modumubul config'를 실행하세요.",
            config::YOUTUBE_ENV
        );
    }
    let video = YoutubeClient::new(&cfg.youtube)?;
    play(&video, title, artist)
}

fn play(video: &dyn VideoSource, title: &str, artist: &str) -> Result<()> {
    match playback::resolve_playback_url(video, title, artist) {
        Some(url) => {
            println!("여는 중: {}", url);
            playback::open_url(&url)
        }
        None => {
            println!("재생할 영상을 찾지 못했습니다: {} - {}", title, artist);
            Ok(())
        }
    }
}

fn cmd_config() -> Result<()> {
    // 환경 변수가 아닌 파일 값만 편집하고 저장한다.
    let mut cfg = config::load_file_config();

    println!("API 설정");
    println!("(Genius: https://genius.com/api-clients, YouTube: https://console.cloud.google.com)\n");

    let current_token = cfg.genius.access_token.clone().unwrap_or_default();
    let access_token: String = Input::new()
        .with_prompt("Genius access token")
        .with_initial_text(current_token)
        .interact_text()?;

    let current_key = cfg.youtube.api_key.clone().unwrap_or_default();
    let api_key: String = Input::new()
        .with_prompt("YouTube API key")
        .with_initial_text(current_key)
        .interact_text()?;

    cfg.genius = GeniusConfig {
        access_token: Some(access_token),
    };
    cfg.youtube = YoutubeConfig {
        api_key: Some(api_key),
    };

    config::save_config(&cfg)?;
    println!("\n설정이 저장되었습니다!");
    Ok(())
}
