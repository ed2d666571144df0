#![cfg(unix)]

mod unix_integration {
    use std::fs;
    use std::net::TcpListener;
    use std::path::Path;
    use std::process::{Command, Output};
    use std::thread::sleep;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use relay_admin::db::{AdminStore, DbError, DbSettings, NewSuperuser, OdbType, open_store};
    use tempfile::tempdir;

    const DB_USER: &str = "relay";
    const DB_PASSWORD: &str = "relay-pass";
    const DB_NAME: &str = "relay_admin";

    fn run_command(mut command: Command) -> Result<Output> {
        command.output().context("Failed to run command")
    }

    fn docker_command(args: &[&str]) -> Command {
        let mut command = Command::new("docker");
        command.args(args);
        command
    }

    fn unique_suffix() -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        nanos.to_string()
    }

    fn reserve_local_port() -> Result<u16> {
        let listener =
            TcpListener::bind(("127.0.0.1", 0)).context("Failed to reserve local port")?;
        let port = listener
            .local_addr()
            .context("Failed to read reserved local address")?
            .port();
        Ok(port)
    }

    struct PostgresContainer {
        name: String,
        port: u16,
    }

    impl Drop for PostgresContainer {
        fn drop(&mut self) {
            let _ = Command::new("docker")
                .args(["rm", "-f", &self.name])
                .output();
        }
    }

    impl PostgresContainer {
        fn start() -> Result<Self> {
            let name = format!("relay-admin-store-itest-{}", unique_suffix());
            let port = reserve_local_port()?;
            let port_mapping = format!("127.0.0.1:{port}:5432");
            let output = run_command(docker_command(&[
                "run",
                "--rm",
                "-d",
                "--name",
                &name,
                "-e",
                &format!("POSTGRES_USER={DB_USER}"),
                "-e",
                &format!("POSTGRES_PASSWORD={DB_PASSWORD}"),
                "-e",
                &format!("POSTGRES_DB={DB_NAME}"),
                "-p",
                &port_mapping,
                "postgres:16",
            ]))?;
            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                anyhow::bail!("Failed to start postgres container: {stderr}");
            }
            let container = Self { name, port };
            container.wait_until_ready()?;
            Ok(container)
        }

        fn settings(&self) -> DbSettings {
            DbSettings {
                db_type: OdbType::Postgresql,
                name: DB_NAME.to_string(),
                user: DB_USER.to_string(),
                password: DB_PASSWORD.to_string(),
                host: "127.0.0.1".to_string(),
                port: Some(self.port),
            }
        }

        fn store(&self) -> Result<Box<dyn AdminStore>> {
            open_store(&self.settings()).context("Failed to open postgres store")
        }

        fn wait_until_ready(&self) -> Result<()> {
            let start = SystemTime::now();
            loop {
                let output = run_command(docker_command(&[
                    "exec",
                    &self.name,
                    "pg_isready",
                    "-U",
                    DB_USER,
                    "-d",
                    DB_NAME,
                ]))?;
                if output.status.success() && self.store().is_ok() {
                    return Ok(());
                }
                if start.elapsed().unwrap_or_default() > Duration::from_secs(30) {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    anyhow::bail!("Timed out waiting for postgres readiness: {stderr}");
                }
                sleep(Duration::from_millis(300));
            }
        }
    }

    fn write_fixture(path: &Path, site_id: u32, name: &str) -> Result<()> {
        let fixture = serde_json::json!([{
            "pk": site_id,
            "model": "sites.site",
            "fields": {"name": name, "domain": "relayadmin.example.com"}
        }]);
        fs::write(path, fixture.to_string()).context("Failed to write fixture")
    }

    fn admin() -> NewSuperuser {
        NewSuperuser {
            username: "admin".to_string(),
            first_name: "admin-first-name".to_string(),
            last_name: "admin-last-name".to_string(),
            email: "admin@invalid.example.com".to_string(),
        }
    }

    #[test]
    #[ignore = "Requires local Docker and postgres:16 image"]
    fn postgres_store_bootstraps_admin_and_reports_duplicates() -> Result<()> {
        let container = PostgresContainer::start()?;
        let dir = tempdir().context("Failed to create temp dir")?;
        let fixture_path = dir.path().join("initial-data.json");
        let mut store = container.store()?;

        store.sync_schema()?;
        store.sync_schema()?;

        write_fixture(&fixture_path, 1_048_575, "Relay admin")?;
        assert_eq!(store.load_fixture(&fixture_path)?, 1);
        write_fixture(&fixture_path, 1_048_575, "Renamed admin")?;
        assert_eq!(store.load_fixture(&fixture_path)?, 1);
        let site = store.get_site(1_048_575)?.context("site missing")?;
        assert_eq!(site.name, "Renamed admin");
        assert!(store.get_site(7)?.is_none());

        store.create_superuser(&admin())?;
        let err = store
            .create_superuser(&admin())
            .expect_err("second create must fail");
        assert!(matches!(err, DbError::DuplicateUser(ref username) if username == "admin"));

        let mut user = store.get_user("admin")?;
        assert!(user.is_superuser);
        assert!(user.is_staff);
        assert!(!user.has_usable_password());
        user.set_password("first-pass")?;
        store.save_user(&user)?;

        let mut reopened = container.store()?;
        let mut user = reopened.get_user("admin")?;
        assert!(user.check_password("first-pass"));
        user.set_password("second-pass")?;
        reopened.save_user(&user)?;

        let user = container.store()?.get_user("admin")?;
        assert!(user.check_password("second-pass"));
        assert!(!user.check_password("first-pass"));
        assert!(matches!(
            reopened.get_user("nobody"),
            Err(DbError::UserNotFound(_))
        ));
        Ok(())
    }
}
