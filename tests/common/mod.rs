#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::{DbPool, establish_connection_pool};
use tempfile::{TempDir, tempdir};

use pushkind_leads::repository::DieselRepository;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Migrated SQLite file living in a temporary directory.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 database path");

        let pool = establish_connection_pool(url).expect("connection pool");
        let mut conn = pool.get().expect("connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("migrations applied");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}
