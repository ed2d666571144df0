use std::path::Path;

use postgres::error::SqlState;
use postgres::{Client, NoTls, Row};

use super::user::{NewSuperuser, User, joined_now, unusable_password};
use super::{AdminStore, DbError, DbSettings, Site, read_fixture};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS sites (
    id BIGINT PRIMARY KEY,
    name TEXT NOT NULL,
    domain TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS auth_user (
    id BIGSERIAL PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    first_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    password TEXT NOT NULL,
    is_staff BOOLEAN NOT NULL DEFAULT FALSE,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    is_superuser BOOLEAN NOT NULL DEFAULT FALSE,
    date_joined TEXT NOT NULL
);
";

pub(super) struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    pub(super) fn connect(settings: &DbSettings) -> Result<Self, DbError> {
        let mut config = postgres::Config::new();
        config
            .host(&settings.host)
            .user(&settings.user)
            .password(&settings.password)
            .dbname(&settings.name);
        if let Some(port) = settings.port {
            config.port(port);
        }
        let client = config.connect(NoTls)?;
        Ok(Self { client })
    }
}

fn user_from_row(row: &Row) -> User {
    User {
        id: row.get(0),
        username: row.get(1),
        first_name: row.get(2),
        last_name: row.get(3),
        email: row.get(4),
        password: row.get(5),
        is_staff: row.get(6),
        is_active: row.get(7),
        is_superuser: row.get(8),
        date_joined: row.get(9),
    }
}

impl AdminStore for PostgresStore {
    fn sync_schema(&mut self) -> Result<(), DbError> {
        self.client.batch_execute(SCHEMA)?;
        Ok(())
    }

    fn load_fixture(&mut self, path: &Path) -> Result<usize, DbError> {
        let sites = read_fixture(path)?;
        let mut tx = self.client.transaction()?;
        for site in &sites {
            tx.execute(
                "INSERT INTO sites (id, name, domain) VALUES ($1, $2, $3)
                 ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, domain = EXCLUDED.domain",
                &[&i64::from(site.id), &site.name, &site.domain],
            )?;
        }
        tx.commit()?;
        Ok(sites.len())
    }

    fn create_superuser(&mut self, user: &NewSuperuser) -> Result<(), DbError> {
        let result = self.client.execute(
            "INSERT INTO auth_user (username, first_name, last_name, email, password,
                 is_staff, is_active, is_superuser, date_joined)
             VALUES ($1, $2, $3, $4, $5, TRUE, TRUE, TRUE, $6)",
            &[
                &user.username,
                &user.first_name,
                &user.last_name,
                &user.email,
                &unusable_password(),
                &joined_now(),
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(err) if err.code() == Some(&SqlState::UNIQUE_VIOLATION) => {
                Err(DbError::DuplicateUser(user.username.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_user(&mut self, username: &str) -> Result<User, DbError> {
        let row = self.client.query_opt(
            "SELECT id, username, first_name, last_name, email, password,
                 is_staff, is_active, is_superuser, date_joined
             FROM auth_user WHERE username = $1",
            &[&username],
        )?;
        row.as_ref()
            .map(user_from_row)
            .ok_or_else(|| DbError::UserNotFound(username.to_string()))
    }

    fn save_user(&mut self, user: &User) -> Result<(), DbError> {
        let updated = self.client.execute(
            "UPDATE auth_user SET username = $2, first_name = $3, last_name = $4, email = $5,
                 password = $6, is_staff = $7, is_active = $8, is_superuser = $9
             WHERE id = $1",
            &[
                &user.id,
                &user.username,
                &user.first_name,
                &user.last_name,
                &user.email,
                &user.password,
                &user.is_staff,
                &user.is_active,
                &user.is_superuser,
            ],
        )?;
        if updated == 0 {
            return Err(DbError::UserNotFound(user.username.clone()));
        }
        Ok(())
    }

    fn get_site(&mut self, id: u32) -> Result<Option<Site>, DbError> {
        let row = self.client.query_opt(
            "SELECT id, name, domain FROM sites WHERE id = $1",
            &[&i64::from(id)],
        )?;
        let Some(row) = row else {
            return Ok(None);
        };
        let raw_id: i64 = row.get(0);
        let id = u32::try_from(raw_id).map_err(|_| DbError::InvalidSiteId(raw_id))?;
        Ok(Some(Site {
            id,
            name: row.get(1),
            domain: row.get(2),
        }))
    }
}
