use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};

use crate::app::{BraidError, Result};
use crate::domain::Feed;
use crate::store::Store;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|e| BraidError::Migration(e.to_string()))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            BraidError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn get_flag(&self, sql: &str, link: &str) -> Result<Option<bool>> {
        let conn = self.conn()?;
        let flag = conn
            .query_row(sql, params![link], |row| row.get::<_, bool>(0))
            .optional()?;
        Ok(flag)
    }
}

impl Store for SqliteStore {
    fn load_feeds(&self) -> Result<Vec<Feed>> {
        let conn = self.conn()?;

        // Key order, like a cursor over an ordered key/value bucket
        let mut stmt = conn.prepare("SELECT url, title FROM feeds ORDER BY url")?;

        let feeds = stmt
            .query_map([], |row| {
                Ok(Feed::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(feeds)
    }

    fn save_feed(&self, feed: &Feed) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO feeds (url, title) VALUES (?1, ?2)
             ON CONFLICT(url) DO UPDATE SET title = ?2",
            params![feed.url, feed.title],
        )?;
        Ok(())
    }

    fn remove_feed(&self, url: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM feeds WHERE url = ?1", params![url])?;
        Ok(())
    }

    fn get_read(&self, link: &str) -> Result<Option<bool>> {
        self.get_flag("SELECT is_read FROM item_read WHERE link = ?1", link)
    }

    fn set_read(&self, link: &str, is_read: bool) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO item_read (link, is_read) VALUES (?1, ?2)
             ON CONFLICT(link) DO UPDATE SET is_read = ?2",
            params![link, is_read],
        )?;
        Ok(())
    }

    fn get_favorite(&self, link: &str) -> Result<Option<bool>> {
        self.get_flag(
            "SELECT is_favorite FROM item_favorite WHERE link = ?1",
            link,
        )
    }

    fn set_favorite(&self, link: &str, is_favorite: bool) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO item_favorite (link, is_favorite) VALUES (?1, ?2)
             ON CONFLICT(link) DO UPDATE SET is_favorite = ?2",
            params![link, is_favorite],
        )?;
        Ok(())
    }
}
