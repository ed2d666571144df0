use std::path::Path;

use rusqlite::{Connection, ErrorCode, OptionalExtension, params};

use super::user::{NewSuperuser, User, joined_now, unusable_password};
use super::{AdminStore, DbError, Site, read_fixture};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS sites (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    domain TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS auth_user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    first_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    password TEXT NOT NULL,
    is_staff INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    is_superuser INTEGER NOT NULL DEFAULT 0,
    date_joined TEXT NOT NULL
);
";

const SELECT_USER: &str = "SELECT id, username, first_name, last_name, email, password, \
     is_staff, is_active, is_superuser, date_joined FROM auth_user WHERE username = ?1";

pub(super) struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub(super) fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(super) fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl AdminStore for SqliteStore {
    fn sync_schema(&mut self) -> Result<(), DbError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn load_fixture(&mut self, path: &Path) -> Result<usize, DbError> {
        let sites = read_fixture(path)?;
        let tx = self.conn.transaction()?;
        for site in &sites {
            tx.execute(
                "INSERT INTO sites (id, name, domain) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name, domain = excluded.domain",
                params![site.id, site.name, site.domain],
            )?;
        }
        tx.commit()?;
        Ok(sites.len())
    }

    fn create_superuser(&mut self, user: &NewSuperuser) -> Result<(), DbError> {
        let result = self.conn.execute(
            "INSERT INTO auth_user (username, first_name, last_name, email, password,
                 is_staff, is_active, is_superuser, date_joined)
             VALUES (?1, ?2, ?3, ?4, ?5, 1, 1, 1, ?6)",
            params![
                user.username,
                user.first_name,
                user.last_name,
                user.email,
                unusable_password(),
                joined_now(),
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(DbError::DuplicateUser(user.username.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_user(&mut self, username: &str) -> Result<User, DbError> {
        self.conn
            .query_row(SELECT_USER, params![username], |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    first_name: row.get(2)?,
                    last_name: row.get(3)?,
                    email: row.get(4)?,
                    password: row.get(5)?,
                    is_staff: row.get(6)?,
                    is_active: row.get(7)?,
                    is_superuser: row.get(8)?,
                    date_joined: row.get(9)?,
                })
            })
            .optional()?
            .ok_or_else(|| DbError::UserNotFound(username.to_string()))
    }

    fn save_user(&mut self, user: &User) -> Result<(), DbError> {
        let updated = self.conn.execute(
            "UPDATE auth_user SET username = ?2, first_name = ?3, last_name = ?4, email = ?5,
                 password = ?6, is_staff = ?7, is_active = ?8, is_superuser = ?9
             WHERE id = ?1",
            params![
                user.id,
                user.username,
                user.first_name,
                user.last_name,
                user.email,
                user.password,
                user.is_staff,
                user.is_active,
                user.is_superuser,
            ],
        )?;
        if updated == 0 {
            return Err(DbError::UserNotFound(user.username.clone()));
        }
        Ok(())
    }

    fn get_site(&mut self, id: u32) -> Result<Option<Site>, DbError> {
        let site = self
            .conn
            .query_row(
                "SELECT id, name, domain FROM sites WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Site {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        domain: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(site)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn admin() -> NewSuperuser {
        NewSuperuser {
            username: "admin".to_string(),
            first_name: "admin-first-name".to_string(),
            last_name: "admin-last-name".to_string(),
            email: "admin@invalid.example.com".to_string(),
        }
    }

    fn store() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.sync_schema().unwrap();
        store
    }

    #[test]
    fn test_sync_schema_is_idempotent() {
        let mut store = store();
        store.sync_schema().unwrap();
    }

    #[test]
    fn test_create_superuser_then_duplicate() {
        let mut store = store();
        store.create_superuser(&admin()).unwrap();

        let err = store.create_superuser(&admin()).unwrap_err();
        assert!(matches!(err, DbError::DuplicateUser(name) if name == "admin"));
    }

    #[test]
    fn test_created_superuser_has_unusable_password() {
        let mut store = store();
        store.create_superuser(&admin()).unwrap();

        let user = store.get_user("admin").unwrap();
        assert!(user.is_superuser);
        assert!(user.is_staff);
        assert!(user.is_active);
        assert!(!user.has_usable_password());
        assert_eq!(user.email, "admin@invalid.example.com");
    }

    #[test]
    fn test_save_user_updates_password() {
        let mut store = store();
        store.create_superuser(&admin()).unwrap();

        let mut user = store.get_user("admin").unwrap();
        user.set_password("new-password").unwrap();
        store.save_user(&user).unwrap();

        let reloaded = store.get_user("admin").unwrap();
        assert!(reloaded.check_password("new-password"));
        assert!(!reloaded.check_password("other"));
    }

    #[test]
    fn test_get_user_missing() {
        let mut store = store();
        let err = store.get_user("nobody").unwrap_err();
        assert!(matches!(err, DbError::UserNotFound(_)));
    }

    #[test]
    fn test_load_fixture_replaces_existing_site() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("initial-data.json");
        let mut store = store();

        std::fs::write(
            &path,
            r#"[{"pk": 5, "model": "sites.site", "fields": {"name": "old", "domain": "old.example.com"}}]"#,
        )
        .unwrap();
        assert_eq!(store.load_fixture(&path).unwrap(), 1);

        std::fs::write(
            &path,
            r#"[{"pk": 5, "model": "sites.site", "fields": {"name": "new", "domain": "new.example.com"}}]"#,
        )
        .unwrap();
        assert_eq!(store.load_fixture(&path).unwrap(), 1);

        let site = store.get_site(5).unwrap().unwrap();
        assert_eq!(site.name, "new");
        assert_eq!(site.domain, "new.example.com");
        assert!(store.get_site(6).unwrap().is_none());
    }
}
