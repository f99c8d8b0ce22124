//! Patient database operations.
//!
//! Every mutation is a single statement, autocommitted by SQLite, so no
//! record is ever partially written.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{NewPatient, Patient};

fn row_to_patient(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        national_id: row.get(2)?,
        age: row.get(3)?,
        phone: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

impl Database {
    /// Insert a new patient and return the stored row.
    ///
    /// A national ID already present yields [`DbError::Duplicate`] and
    /// leaves the existing record untouched.
    pub fn insert_patient(&self, new: &NewPatient) -> DbResult<Patient> {
        self.conn
            .execute(
                r#"
                INSERT INTO patients (name, national_id, age, phone)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![new.name, new.national_id, new.age, new.phone],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DbError::Duplicate(new.national_id.clone())
                } else {
                    e.into()
                }
            })?;

        let id = self.conn.last_insert_rowid();
        self.conn
            .query_row(
                r#"
                SELECT id, name, national_id, age, phone, created_at, updated_at
                FROM patients
                WHERE id = ?
                "#,
                [id],
                row_to_patient,
            )
            .map_err(Into::into)
    }

    /// Get a patient by canonical national ID.
    pub fn get_patient(&self, national_id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT id, name, national_id, age, phone, created_at, updated_at
                FROM patients
                WHERE national_id = ?
                "#,
                [national_id],
                row_to_patient,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all patients, ordered by name ascending.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, national_id, age, phone, created_at, updated_at
            FROM patients
            ORDER BY name
            "#,
        )?;

        let rows = stmt.query_map([], row_to_patient)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Search patients whose name or national ID contains `term`
    /// (case-insensitive), ordered by name ascending.
    pub fn search_patients(&self, term: &str) -> DbResult<Vec<Patient>> {
        let pattern = format!("%{}%", term);
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, national_id, age, phone, created_at, updated_at
            FROM patients
            WHERE name LIKE ?1 OR national_id LIKE ?1
            ORDER BY name
            "#,
        )?;

        let rows = stmt.query_map([pattern], row_to_patient)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Update name, age and phone of the patient with the given canonical
    /// national ID. The ID itself is the lookup key and never changes.
    pub fn update_patient(
        &self,
        national_id: &str,
        name: &str,
        age: i64,
        phone: Option<&str>,
    ) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                age = ?3,
                phone = ?4,
                updated_at = datetime('now')
            WHERE national_id = ?1
            "#,
            params![national_id, name, age, phone],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete the patient with the given canonical national ID.
    pub fn delete_patient(&self, national_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE national_id = ?", [national_id])?;
        Ok(rows_affected > 0)
    }

    /// Total number of registered patients.
    pub fn count_patients(&self) -> DbResult<i64> {
        self.conn
            .query_row("SELECT COUNT(id) FROM patients", [], |row| row.get(0))
            .map_err(Into::into)
    }

    /// Arithmetic mean of ages; `None` when the table is empty.
    pub fn mean_age(&self) -> DbResult<Option<f64>> {
        self.conn
            .query_row("SELECT AVG(age) FROM patients", [], |row| row.get(0))
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn new_patient(name: &str, national_id: &str, age: i64, phone: Option<&str>) -> NewPatient {
        NewPatient {
            name: name.into(),
            national_id: national_id.into(),
            age,
            phone: phone.map(Into::into),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let inserted = db
            .insert_patient(&new_patient("Ana", "11122233344", 30, Some("999")))
            .unwrap();
        assert!(inserted.id > 0);
        assert!(!inserted.created_at.is_empty());

        let retrieved = db.get_patient("11122233344").unwrap().unwrap();
        assert_eq!(retrieved, inserted);
        assert_eq!(retrieved.name, "Ana");
        assert_eq!(retrieved.age, 30);
        assert_eq!(retrieved.phone, Some("999".into()));
    }

    #[test]
    fn test_get_missing_is_none() {
        let db = setup_db();
        assert!(db.get_patient("00000000000").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let db = setup_db();

        db.insert_patient(&new_patient("Ana", "11122233344", 30, None))
            .unwrap();
        let err = db
            .insert_patient(&new_patient("Bia", "11122233344", 25, None))
            .unwrap_err();
        assert!(matches!(err, DbError::Duplicate(id) if id == "11122233344"));

        // Existing row unaltered
        let kept = db.get_patient("11122233344").unwrap().unwrap();
        assert_eq!(kept.name, "Ana");
        assert_eq!(kept.age, 30);
    }

    #[test]
    fn test_list_ordered_by_name() {
        let db = setup_db();

        db.insert_patient(&new_patient("Carla", "33344455566", 40, None))
            .unwrap();
        db.insert_patient(&new_patient("Ana", "11122233344", 30, None))
            .unwrap();
        db.insert_patient(&new_patient("Bruno", "22233344455", 35, None))
            .unwrap();

        let names: Vec<String> = db
            .list_patients()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);
    }

    #[test]
    fn test_search_by_name_case_insensitive() {
        let db = setup_db();

        db.insert_patient(&new_patient("Ana Souza", "11122233344", 30, None))
            .unwrap();
        db.insert_patient(&new_patient("Bruno", "22233344455", 35, None))
            .unwrap();

        let results = db.search_patients("ana").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Ana Souza");
    }

    #[test]
    fn test_search_by_national_id_substring() {
        let db = setup_db();

        db.insert_patient(&new_patient("Ana", "11122233344", 30, None))
            .unwrap();
        db.insert_patient(&new_patient("Bruno", "22233344455", 35, None))
            .unwrap();

        let results = db.search_patients("111222").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Ana");
    }

    #[test]
    fn test_update_patient() {
        let db = setup_db();

        db.insert_patient(&new_patient("Ana", "11122233344", 30, None))
            .unwrap();

        let updated = db
            .update_patient("11122233344", "Ana Souza", 31, Some("888"))
            .unwrap();
        assert!(updated);

        let retrieved = db.get_patient("11122233344").unwrap().unwrap();
        assert_eq!(retrieved.name, "Ana Souza");
        assert_eq!(retrieved.age, 31);
        assert_eq!(retrieved.phone, Some("888".into()));
    }

    #[test]
    fn test_update_missing_reports_no_rows() {
        let db = setup_db();
        assert!(!db.update_patient("00000000000", "Ana", 30, None).unwrap());
    }

    #[test]
    fn test_delete_patient() {
        let db = setup_db();

        db.insert_patient(&new_patient("Ana", "11122233344", 30, None))
            .unwrap();
        assert!(db.delete_patient("11122233344").unwrap());
        assert!(db.get_patient("11122233344").unwrap().is_none());
        assert!(!db.delete_patient("11122233344").unwrap());
    }

    #[test]
    fn test_aggregates_empty() {
        let db = setup_db();
        assert_eq!(db.count_patients().unwrap(), 0);
        assert_eq!(db.mean_age().unwrap(), None);
    }

    #[test]
    fn test_aggregates() {
        let db = setup_db();

        db.insert_patient(&new_patient("Ana", "11122233344", 20, None))
            .unwrap();
        db.insert_patient(&new_patient("Bruno", "22233344455", 30, None))
            .unwrap();
        db.insert_patient(&new_patient("Carla", "33344455566", 40, None))
            .unwrap();

        assert_eq!(db.count_patients().unwrap(), 3);
        assert_eq!(db.mean_age().unwrap(), Some(30.0));
    }
}
