//! Pending upload queries.
//!
//! Every read and delete takes the owner as a parameter; there is no query
//! that spans users.

use chrono::Utc;
use episort_common::{Error, FileHandle, FileRecord, MediaKind, Result, StoredFile, UserId};
use rusqlite::types::Type;
use rusqlite::{Connection, Row};

const SELECT_COLUMNS: &str = "id, owner, handle, name, kind";

/// Insert a file record.
///
/// No uniqueness is enforced: uploading the same file twice stores two rows.
///
/// # Returns
///
/// * `Ok(StoredFile)` - The record with its assigned row id
/// * `Err(Error)` - If a database error occurs
pub fn insert_file(conn: &Connection, record: &FileRecord) -> Result<StoredFile> {

    conn.execute(
        "INSERT INTO files (owner, handle, name, kind, created_at)
         VALUES (:owner, :handle, :name, :kind, :created_at)",
        rusqlite::named_params! {
            ":owner": record.owner.get(),
            ":handle": record.handle.as_str(),
            ":name": record.name,
            ":kind": record.kind.to_string(),
            ":created_at": Utc::now().to_rfc3339(),
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(StoredFile {
        id: conn.last_insert_rowid(),
        record: record.clone(),
    })
}

/// List every pending file of one owner, oldest first.
pub fn list_files_for_owner(conn: &Connection, owner: UserId) -> Result<Vec<StoredFile>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM files WHERE owner = :owner ORDER BY id"
        ))
        .map_err(|e| Error::database(e.to_string()))?;

    let files = stmt
        .query_map(
            rusqlite::named_params! { ":owner": owner.get() },
            row_to_stored_file,
        )
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(files)
}

/// Delete every pending file of one owner.
///
/// # Returns
///
/// * `Ok(usize)` - Number of rows removed
/// * `Err(Error)` - If a database error occurs
pub fn delete_files_for_owner(conn: &Connection, owner: UserId) -> Result<usize> {
    conn.execute(
        "DELETE FROM files WHERE owner = :owner",
        rusqlite::named_params! { ":owner": owner.get() },
    )
    .map_err(|e| Error::database(e.to_string()))
}

fn row_to_stored_file(row: &Row<'_>) -> rusqlite::Result<StoredFile> {
    let kind: String = row.get(4)?;
    let kind = kind.parse::<MediaKind>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, e.into())
    })?;

    Ok(StoredFile {
        id: row.get(0)?,
        record: FileRecord {
            owner: UserId::from(row.get::<_, i64>(1)?),
            handle: FileHandle::from(row.get::<_, String>(2)?),
            name: row.get(3)?,
            kind,
        },
    })
}
