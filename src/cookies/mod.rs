//! Cookie records and host cookie-store access.
//!
//! - [`record`]: the read-only cookie snapshot and its identity key
//! - [`store`]: the [`CookieStore`](store::CookieStore) capability plus an
//!   in-memory implementation
//! - [`sqlitestore`]: Chrome/Firefox cookie database access
//!
//! The database layout follows Chromium's
//! `net/extras/sqlite/sqlite_persistent_cookie_store.cc` and Firefox's
//! `moz_cookies` table.

pub mod record;
pub mod sqlitestore;
pub mod store;

pub use record::{CookieKey, CookieRecord};
pub use sqlitestore::{BrowserKind, SqliteCookieStore};
pub use store::{CookieStore, MemoryCookieStore};
