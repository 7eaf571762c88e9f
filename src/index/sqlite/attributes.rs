//! Attribute store: one serialized attribute record per note name.

use super::transaction::Transaction;
use crate::domain::NoteAttribute;
use crate::index::{IndexError, IndexResult};
use rusqlite::{Connection, OptionalExtension};

/// Reads and decodes the attribute record for `name`, if any.
pub(super) fn read_attribute(conn: &Connection, name: &str) -> IndexResult<Option<NoteAttribute>> {
    let data: Option<String> = conn
        .prepare_cached("SELECT data FROM attributes WHERE name = ?1")?
        .query_row([name], |row| row.get(0))
        .optional()?;

    data.map(|data| {
        serde_json::from_str(&data).map_err(|source| IndexError::Corrupt {
            name: name.to_string(),
            source,
        })
    })
    .transpose()
}

impl Transaction<'_> {
    /// Looks up the attribute record for `name` inside this transaction.
    pub fn get_attribute(&self, name: &str) -> IndexResult<Option<NoteAttribute>> {
        read_attribute(self.conn(), name)
    }

    /// Replaces the attribute record for `name`, returning the previous one.
    ///
    /// The previous record is decoded before it is overwritten, so a corrupt
    /// record aborts the write instead of being silently replaced.
    pub fn put_attribute(
        &self,
        name: &str,
        attribute: &NoteAttribute,
    ) -> IndexResult<Option<NoteAttribute>> {
        let previous = read_attribute(self.conn(), name)?;

        let data = serde_json::to_string(attribute).map_err(|source| IndexError::Encode {
            name: name.to_string(),
            source,
        })?;

        self.conn()
            .prepare_cached(
                "INSERT INTO attributes (name, data) VALUES (?1, ?2)
                 ON CONFLICT(name) DO UPDATE SET data = excluded.data",
            )?
            .execute([name, data.as_str()])?;

        Ok(previous)
    }
}
