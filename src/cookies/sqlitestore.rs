//! Browser cookie database access.
//!
//! Reads and deletes cookies in Chrome/Firefox SQLite databases, exposing
//! them through the [`CookieStore`] capability. Encrypted Chrome values
//! (empty `value` column) are skipped; decrypting them is out of scope.

use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use rusqlite::{Connection, OpenFlags};
use time::OffsetDateTime;
use url::Url;

use crate::base::auditerror::{AuditError, Result};
use crate::cookies::record::CookieRecord;
use crate::cookies::store::CookieStore;

/// Browsers with a supported cookie database schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chrome,
    Firefox,
}

/// Chrome stores timestamps as microseconds since 1601-01-01 (FILETIME
/// epoch). Offset to the Unix epoch in microseconds.
const CHROME_EPOCH_OFFSET_MICROS: i64 = 11_644_473_600_000_000;

/// A [`CookieStore`] over a browser profile's cookie database.
pub struct SqliteCookieStore {
    kind: BrowserKind,
    db_path: PathBuf,
}

impl SqliteCookieStore {
    pub fn new(kind: BrowserKind, db_path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            db_path: db_path.into(),
        }
    }

    pub fn chrome(db_path: impl Into<PathBuf>) -> Self {
        Self::new(BrowserKind::Chrome, db_path)
    }

    pub fn firefox(db_path: impl Into<PathBuf>) -> Self {
        Self::new(BrowserKind::Firefox, db_path)
    }

    /// Locate the default cookie database for the given browser and profile
    /// on this machine, if the platform layout is known.
    pub fn discover(kind: BrowserKind, profile: Option<&str>) -> Option<PathBuf> {
        match kind {
            BrowserKind::Chrome => {
                let profile = profile.unwrap_or("Default");
                let base = if cfg!(target_os = "macos") {
                    home_dir()?.join("Library/Application Support/Google/Chrome")
                } else if cfg!(target_os = "windows") {
                    PathBuf::from(std::env::var("LOCALAPPDATA").ok()?)
                        .join("Google/Chrome/User Data")
                } else {
                    home_dir()?.join(".config/google-chrome")
                };
                Some(base.join(profile).join("Cookies"))
            }
            BrowserKind::Firefox => {
                let base = if cfg!(target_os = "macos") {
                    home_dir()?.join("Library/Application Support/Firefox/Profiles")
                } else if cfg!(target_os = "windows") {
                    PathBuf::from(std::env::var("APPDATA").ok()?).join("Mozilla/Firefox/Profiles")
                } else {
                    home_dir()?.join(".mozilla/firefox")
                };

                if let Some(profile) = profile {
                    return Some(base.join(profile).join("cookies.sqlite"));
                }
                // Auto-detect the default release profile.
                for entry in std::fs::read_dir(&base).ok()?.flatten() {
                    let name = entry.file_name().to_string_lossy().to_string();
                    if name.ends_with(".default") || name.ends_with(".default-release") {
                        return Some(entry.path().join("cookies.sqlite"));
                    }
                }
                None
            }
        }
    }

    fn fetch_sync(&self) -> Result<Vec<CookieRecord>> {
        if !self.db_path.exists() {
            return Err(AuditError::fetch_failed(format!(
                "cookie database not found: {}",
                self.db_path.display()
            )));
        }

        let conn =
            Connection::open_with_flags(&self.db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let records = match self.kind {
            BrowserKind::Chrome => read_chrome_rows(&conn)?,
            BrowserKind::Firefox => read_firefox_rows(&conn)?,
        };

        tracing::debug!(
            db = %self.db_path.display(),
            count = records.len(),
            "fetched cookie records"
        );
        Ok(records)
    }

    fn delete_sync(&self, host: &str, path: &str, name: &str) -> Result<()> {
        let conn = Connection::open(&self.db_path)
            .map_err(|e| AuditError::delete_failed(e.to_string()))?;

        // A domain cookie's host column carries a leading dot; the scope URL
        // never does. Match both spellings.
        let sql = match self.kind {
            BrowserKind::Chrome => {
                "DELETE FROM cookies \
                 WHERE (host_key = ?1 OR host_key = '.' || ?1) AND name = ?2 AND path = ?3"
            }
            BrowserKind::Firefox => {
                "DELETE FROM moz_cookies \
                 WHERE (host = ?1 OR host = '.' || ?1) AND name = ?2 AND path = ?3"
            }
        };

        let removed = conn
            .execute(sql, rusqlite::params![host, name, path])
            .map_err(|e| AuditError::delete_failed(e.to_string()))?;

        tracing::info!(host = %host, name = %name, removed, "deleted cookie rows");
        Ok(())
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl CookieStore for SqliteCookieStore {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<CookieRecord>>> {
        Box::pin(async move { self.fetch_sync() })
    }

    fn delete<'a>(&'a self, url: &'a Url, name: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let host = url
                .host_str()
                .ok_or(AuditError::PreconditionViolation {
                    what: "deletion URL has no host",
                })?;
            self.delete_sync(host, url.path(), name)
        })
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

fn read_chrome_rows(conn: &Connection) -> Result<Vec<CookieRecord>> {
    let mut stmt = conn.prepare(
        "SELECT host_key, name, value, path, expires_utc, is_secure, is_httponly FROM cookies",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, i64>(4)?,
            row.get::<_, i64>(5)?,
            row.get::<_, i64>(6)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (domain, name, value, path, expires_utc, is_secure, is_httponly) = row?;
        // Empty value means the row is encrypted.
        if value.is_empty() {
            continue;
        }
        records.push(CookieRecord {
            name,
            value,
            domain,
            path,
            secure: is_secure != 0,
            http_only: is_httponly != 0,
            expires: chrome_time_to_offset(expires_utc),
        });
    }
    Ok(records)
}

fn read_firefox_rows(conn: &Connection) -> Result<Vec<CookieRecord>> {
    let mut stmt = conn.prepare(
        "SELECT host, name, value, path, expiry, isSecure, isHttpOnly FROM moz_cookies",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, i64>(4)?,
            row.get::<_, i64>(5)?,
            row.get::<_, i64>(6)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (domain, name, value, path, expiry, is_secure, is_http_only) = row?;
        records.push(CookieRecord {
            name,
            value,
            domain,
            path,
            secure: is_secure != 0,
            http_only: is_http_only != 0,
            expires: unix_time_to_offset(expiry),
        });
    }
    Ok(records)
}

/// Chrome epoch microseconds to `OffsetDateTime`; 0 means session cookie.
fn chrome_time_to_offset(timestamp: i64) -> Option<OffsetDateTime> {
    if timestamp == 0 {
        return None;
    }
    let unix_micros = timestamp - CHROME_EPOCH_OFFSET_MICROS;
    OffsetDateTime::from_unix_timestamp_nanos(unix_micros as i128 * 1000).ok()
}

/// Unix seconds to `OffsetDateTime`; 0 means session cookie.
fn unix_time_to_offset(timestamp: i64) -> Option<OffsetDateTime> {
    if timestamp == 0 {
        return None;
    }
    OffsetDateTime::from_unix_timestamp(timestamp).ok()
}

/// Convert an `OffsetDateTime` to Chrome epoch microseconds. Used when
/// writing fixture databases.
pub fn unix_to_chrome_timestamp(time: OffsetDateTime) -> i64 {
    time.unix_timestamp() * 1_000_000 + CHROME_EPOCH_OFFSET_MICROS
}
