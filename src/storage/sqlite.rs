use crate::model::{StorageError, StoredRecord, TourismRecord};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use tracing::info;

pub const TABLE_NAME: &str = "tourism_data";

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS tourism_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        country_name TEXT NOT NULL,
        number_of_foreigners INTEGER NOT NULL
    );
";

pub struct TourismStorage {
    conn: Connection,
}

impl TourismStorage {
    /// Opens the database and makes sure `tourism_data` exists. Existing rows are left alone.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self { conn })
    }

    /// Drops and recreates the table, then inserts `records` in order, all in
    /// one transaction. An empty slice leaves the store untouched.
    pub fn replace_all(&mut self, records: &[TourismRecord]) -> Result<usize, StorageError> {
        if records.is_empty() {
            info!("No records to store, leaving '{}' unchanged", TABLE_NAME);
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {TABLE_NAME};{CREATE_TABLE}"))?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tourism_data (country_name, number_of_foreigners) VALUES (?1, ?2)",
            )?;
            for record in records {
                stmt.execute(params![&record.country_name, &record.number_of_foreigners])?;
            }
        }
        tx.commit()?;

        info!("Stored {} records in table '{}'", records.len(), TABLE_NAME);
        Ok(records.len())
    }

    /// Every row, in insertion order.
    pub fn load_all(&self) -> Result<Vec<StoredRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, country_name, number_of_foreigners FROM tourism_data ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], Self::map_record)?;
        let mut records = Vec::new();
        for record in rows {
            records.push(record?);
        }

        Ok(records)
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        let count: usize = self
            .conn
            .query_row("SELECT COUNT(*) FROM tourism_data", [], |row| row.get(0))?;
        Ok(count)
    }

    fn map_record(row: &Row) -> Result<StoredRecord, rusqlite::Error> {
        Ok(StoredRecord {
            id: row.get(0)?,
            country_name: row.get(1)?,
            number_of_foreigners: row.get(2)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, n: u64) -> TourismRecord {
        TourismRecord {
            country_name: name.to_string(),
            number_of_foreigners: n,
        }
    }

    fn open_temp() -> (tempfile::TempDir, TourismStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = TourismStorage::new(dir.path().join("tourism.db")).unwrap();
        (dir, storage)
    }

    #[test]
    fn new_creates_empty_table() {
        let (_dir, storage) = open_temp();
        assert_eq!(storage.count().unwrap(), 0);
        assert!(storage.load_all().unwrap().is_empty());
    }

    #[test]
    fn new_is_idempotent_and_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tourism.db");

        let mut storage = TourismStorage::new(&path).unwrap();
        storage.replace_all(&[record("USA", 1), record("France", 2)]).unwrap();
        drop(storage);

        let reopened = TourismStorage::new(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 2);
    }

    #[test]
    fn unwritable_location_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("nested").join("tourism.db");
        assert!(matches!(
            TourismStorage::new(path),
            Err(StorageError::DatabaseError(_))
        ));
    }

    #[test]
    fn replace_all_overwrites_previous_contents() {
        let (_dir, mut storage) = open_temp();
        storage
            .replace_all(&[record("USA", 1), record("France", 2), record("China", 3)])
            .unwrap();

        let written = storage.replace_all(&[record("Korea", 10), record("Taiwan", 20)]).unwrap();
        assert_eq!(written, 2);

        let rows = storage.load_all().unwrap();
        assert_eq!(
            rows,
            vec![
                StoredRecord { id: 1, country_name: "Korea".into(), number_of_foreigners: 10 },
                StoredRecord { id: 2, country_name: "Taiwan".into(), number_of_foreigners: 20 },
            ]
        );
    }

    #[test]
    fn empty_replace_leaves_store_untouched() {
        let (_dir, mut storage) = open_temp();
        storage.replace_all(&[record("USA", 1234)]).unwrap();

        assert_eq!(storage.replace_all(&[]).unwrap(), 0);

        let rows = storage.load_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country_name, "USA");
        assert_eq!(rows[0].number_of_foreigners, 1234);
    }

    #[test]
    fn largest_parseable_count_round_trips() {
        let (_dir, mut storage) = open_temp();
        let max = i64::MAX as u64;
        storage.replace_all(&[record("USA", max)]).unwrap();
        assert_eq!(storage.load_all().unwrap()[0].number_of_foreigners, max);
    }

    #[test]
    fn load_all_keeps_insertion_order_and_duplicates() {
        let (_dir, mut storage) = open_temp();
        storage
            .replace_all(&[record("Zambia", 5), record("Austria", 7), record("Zambia", 9)])
            .unwrap();

        let names: Vec<String> = storage
            .load_all()
            .unwrap()
            .into_iter()
            .map(|r| r.country_name)
            .collect();
        assert_eq!(names, ["Zambia", "Austria", "Zambia"]);
    }
}
