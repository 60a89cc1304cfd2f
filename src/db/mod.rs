//! Session token persistence.
//!
//! The web build shares browser local storage with the external login flow,
//! so tokens are stored there as raw strings under the login flow's keys.
//! Desktop builds keep them in a small SQLite settings table.

use crate::api::Session;
use crate::error::StitchError;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

const ACCESS_TOKEN_KEY: &str = "accessToken";
const REFRESH_TOKEN_KEY: &str = "refreshToken";

#[cfg(target_arch = "wasm32")]
fn storage_error(err: wasm_bindgen::JsValue) -> StitchError {
    StitchError::Storage(format!("{err:?}"))
}

#[cfg(target_arch = "wasm32")]
pub async fn load_session() -> Result<Session, StitchError> {
    let storage = LocalStorage::raw();
    Ok(Session {
        access_token: storage.get_item(ACCESS_TOKEN_KEY).map_err(storage_error)?,
        refresh_token: storage.get_item(REFRESH_TOKEN_KEY).map_err(storage_error)?,
    })
}

#[cfg(target_arch = "wasm32")]
pub async fn save_session(session: &Session) -> Result<(), StitchError> {
    let storage = LocalStorage::raw();
    for (key, value) in [
        (ACCESS_TOKEN_KEY, &session.access_token),
        (REFRESH_TOKEN_KEY, &session.refresh_token),
    ] {
        match value {
            Some(token) => storage.set_item(key, token).map_err(storage_error)?,
            None => storage.remove_item(key).map_err(storage_error)?,
        }
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn clear_session() -> Result<(), StitchError> {
    let storage = LocalStorage::raw();
    storage.remove_item(ACCESS_TOKEN_KEY).map_err(storage_error)?;
    storage.remove_item(REFRESH_TOKEN_KEY).map_err(storage_error)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_session() -> Result<Session, StitchError> {
    let conn = get_db_connection()?;
    initialize_schema(&conn)?;
    read_session(&conn)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_session(session: &Session) -> Result<(), StitchError> {
    let conn = get_db_connection()?;
    initialize_schema(&conn)?;
    write_session(&conn, session)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn clear_session() -> Result<(), StitchError> {
    let conn = get_db_connection()?;
    initialize_schema(&conn)?;
    write_session(&conn, &Session::default())
}

#[cfg(not(target_arch = "wasm32"))]
fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), StitchError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_session(conn: &rusqlite::Connection) -> Result<Session, StitchError> {
    use rusqlite::OptionalExtension;

    let read = |key: &str| -> Result<Option<String>, StitchError> {
        Ok(conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [key],
                |row: &rusqlite::Row| row.get(0),
            )
            .optional()?)
    };

    Ok(Session {
        access_token: read(ACCESS_TOKEN_KEY)?,
        refresh_token: read(REFRESH_TOKEN_KEY)?,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn write_session(conn: &rusqlite::Connection, session: &Session) -> Result<(), StitchError> {
    for (key, value) in [
        (ACCESS_TOKEN_KEY, &session.access_token),
        (REFRESH_TOKEN_KEY, &session.refresh_token),
    ] {
        match value {
            Some(token) => conn.execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                [key, token.as_str()],
            )?,
            None => conn.execute("DELETE FROM settings WHERE key = ?1", [key])?,
        };
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn get_db_connection() -> Result<rusqlite::Connection, StitchError> {
    let data_dir = dirs::data_dir()
        .map(|dir| dir.join("stitch"))
        .unwrap_or_else(|| std::path::PathBuf::from(".stitch"));
    std::fs::create_dir_all(&data_dir)
        .map_err(|e| StitchError::Storage(format!("Failed to create data dir: {e}")))?;

    rusqlite::Connection::open(data_dir.join("stitch.db"))
        .map_err(|e| StitchError::Storage(format!("Failed to open database: {e}")))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn memory_db() -> rusqlite::Connection {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn empty_store_has_no_session() {
        let conn = memory_db();
        assert_eq!(read_session(&conn).unwrap(), Session::default());
    }

    #[test]
    fn session_round_trips_and_clears() {
        let conn = memory_db();
        let session = Session::new("access-1", "refresh-1");
        write_session(&conn, &session).unwrap();
        assert_eq!(read_session(&conn).unwrap(), session);

        write_session(&conn, &Session::new("access-2", "refresh-1")).unwrap();
        assert_eq!(
            read_session(&conn).unwrap().access_token.as_deref(),
            Some("access-2")
        );

        write_session(&conn, &Session::default()).unwrap();
        assert!(!read_session(&conn).unwrap().is_signed_in());
    }
}
