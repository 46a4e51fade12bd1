//! 즐겨찾기 저장소.
//!
//! 제목 → 영상 URL 매핑을 SQLite 테이블 하나에 저장한다.
//! 시작할 때 전체를 메모리로 읽어 두고, 추가는 DB에 먼저 기록한 뒤 메모리에 반영한다.
//! 삭제나 수정은 없다. 한 번 저장된 제목의 URL은 바뀌지 않는다.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::models::FavoriteEntry;

pub struct FavoritesStore {
    conn: Connection,
    entries: Vec<FavoriteEntry>,
}

impl FavoritesStore {
    /// DB 파일을 열고(없으면 생성) 저장된 즐겨찾기를 읽어 들인다.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("디렉토리를 만들 수 없습니다: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("즐겨찾기 DB를 열 수 없습니다: {}", path.display()))?;
        info!("즐겨찾기 DB: {}", path.display());
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS favorites (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                url TEXT
            );
            "#,
        )
        .context("즐겨찾기 테이블 생성에 실패했습니다")?;

        let entries = Self::read_all(&conn)?;
        debug!(count = entries.len(), "즐겨찾기 로드");
        Ok(Self { conn, entries })
    }

    /// 저장된 행을 id 순서로 읽는다.
    /// url이 NULL인 행은 건너뛰고, 같은 제목이 여러 번 있으면 첫 행만 쓴다.
    fn read_all(conn: &Connection) -> Result<Vec<FavoriteEntry>> {
        let mut stmt = conn
            .prepare("SELECT title, url FROM favorites ORDER BY id")
            .context("즐겨찾기 조회 준비에 실패했습니다")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<String>>(1)?))
            })
            .context("즐겨찾기 조회에 실패했습니다")?;

        let mut entries: Vec<FavoriteEntry> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for row in rows {
            let (title, url) = row.context("즐겨찾기 행 읽기에 실패했습니다")?;
            let (Some(title), Some(url)) = (title, url) else {
                debug!("제목이나 URL이 없는 즐겨찾기 행을 건너뜁니다");
                continue;
            };
            if !seen.insert(title.clone()) {
                continue;
            }
            entries.push(FavoriteEntry { title, url });
        }
        Ok(entries)
    }

    /// 메모리에 올라와 있는 전체 즐겨찾기.
    pub fn load(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.title == title)
            .map(|e| e.url.as_str())
    }

    pub fn contains(&self, title: &str) -> bool {
        self.get(title).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 새 제목이면 저장하고 true, 이미 있으면 아무것도 하지 않고 false.
    pub fn add(&mut self, title: &str, url: &str) -> Result<bool> {
        if self.contains(title) {
            debug!(title, "이미 즐겨찾기에 있습니다");
            return Ok(false);
        }

        self.conn
            .execute(
                "INSERT INTO favorites (title, url) VALUES (?1, ?2)",
                params![title, url],
            )
            .context("즐겨찾기 저장에 실패했습니다")?;

        self.entries.push(FavoriteEntry {
            title: title.to_string(),
            url: url.to_string(),
        });
        info!(title, url, "즐겨찾기 추가");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn memory_store() -> FavoritesStore {
        FavoritesStore::from_connection(Connection::open_in_memory().unwrap()).unwrap()
    }

    fn row_count(store: &FavoritesStore) -> i64 {
        store
            .conn
            .query_row("SELECT COUNT(*) FROM favorites", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_add_two_and_load() {
        let mut store = memory_store();
        assert!(store.add("Yesterday", "https://www.youtube.com/watch?v=abc123").unwrap());
        assert!(store.add("Let It Be", "https://www.youtube.com/watch?v=def456").unwrap());

        let mut titles: Vec<_> = store.load().iter().map(|e| e.title.as_str()).collect();
        titles.sort();
        assert_eq!(titles, vec!["Let It Be", "Yesterday"]);
        assert_eq!(row_count(&store), 2);
    }

    #[test]
    fn test_duplicate_title_is_noop() {
        let mut store = memory_store();
        assert!(store.add("Yesterday", "https://www.youtube.com/watch?v=abc123").unwrap());
        assert!(!store.add("Yesterday", "https://www.youtube.com/watch?v=other").unwrap());

        assert_eq!(store.len(), 1);
        assert_eq!(row_count(&store), 1);
        assert_eq!(
            store.get("Yesterday"),
            Some("https://www.youtube.com/watch?v=abc123")
        );
    }

    #[test]
    fn test_reload_from_existing_rows() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE favorites (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT, url TEXT);
            INSERT INTO favorites (title, url) VALUES ('Yesterday', 'u1');
            INSERT INTO favorites (title, url) VALUES ('Broken', NULL);
            INSERT INTO favorites (title, url) VALUES ('Yesterday', 'u2');
            INSERT INTO favorites (title, url) VALUES ('Help!', 'u3');
            "#,
        )
        .unwrap();

        let store = FavoritesStore::from_connection(conn).unwrap();

        assert_eq!(
            store.load(),
            &[
                FavoriteEntry {
                    title: "Yesterday".to_string(),
                    url: "u1".to_string()
                },
                FavoriteEntry {
                    title: "Help!".to_string(),
                    url: "u3".to_string()
                },
            ]
        );
        assert!(!store.contains("Broken"));
    }

    #[test]
    fn test_persists_across_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("favorites.db");

        {
            let mut store = FavoritesStore::open(&path).unwrap();
            assert!(store.is_empty());
            assert!(store.add("Yesterday", "u1").unwrap());
            assert!(store.add("Let It Be", "u2").unwrap());
        }

        let mut store = FavoritesStore::open(&path).unwrap();
        let mut titles: Vec<_> = store.load().iter().map(|e| e.title.as_str()).collect();
        titles.sort();
        assert_eq!(titles, vec!["Let It Be", "Yesterday"]);
        assert_eq!(store.get("Yesterday"), Some("u1"));
        assert_eq!(store.get("Let It Be"), Some("u2"));
        assert!(!store.add("Yesterday", "u3").unwrap());
        assert_eq!(row_count(&store), 2);
    }
}
