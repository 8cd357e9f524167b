use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};

/// Tables a roster save must contain.
pub const REQUIRED_TABLES: [&str; 5] = ["nation", "competition", "club", "player", "save_meta"];

#[cfg(test)]
pub const SAVE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS nation (
        id    INTEGER PRIMARY KEY,
        name  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS competition (
        id    INTEGER PRIMARY KEY,
        name  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS club (
        id              INTEGER PRIMARY KEY,
        name            TEXT NOT NULL,
        nation_id       INTEGER,
        competition_id  INTEGER,
        FOREIGN KEY (nation_id) REFERENCES nation(id),
        FOREIGN KEY (competition_id) REFERENCES competition(id)
    );

    CREATE TABLE IF NOT EXISTS player (
        id                    INTEGER PRIMARY KEY,
        forename              TEXT NOT NULL,
        surname               TEXT NOT NULL,
        nation_id             INTEGER,
        second_nation_id      INTEGER,
        club_contracted_id    INTEGER,
        club_playing_id       INTEGER,
        birth_days            INTEGER NOT NULL,
        can_play_for_country  INTEGER NOT NULL DEFAULT 0,
        declared_for_nation   INTEGER NOT NULL DEFAULT 0,
        positions             TEXT NOT NULL DEFAULT '',
        gk_rating             REAL,
        ld_rating             REAL,
        rd_rating             REAL,
        lw_rating             REAL,
        c_rating              REAL,
        rw_rating             REAL,
        current_ability       INTEGER NOT NULL DEFAULT 0,
        potential_ability     INTEGER NOT NULL DEFAULT 0,
        adaptability          INTEGER NOT NULL DEFAULT 0,
        ambition              INTEGER NOT NULL DEFAULT 0,
        determination         INTEGER NOT NULL DEFAULT 0,
        loyalty               INTEGER NOT NULL DEFAULT 0,
        professionalism       INTEGER NOT NULL DEFAULT 0,
        temperament           INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY (nation_id) REFERENCES nation(id),
        FOREIGN KEY (second_nation_id) REFERENCES nation(id),
        FOREIGN KEY (club_contracted_id) REFERENCES club(id),
        FOREIGN KEY (club_playing_id) REFERENCES club(id)
    );

    CREATE TABLE IF NOT EXISTS save_meta (
        earliest_days  INTEGER NOT NULL,
        latest_days    INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_player_nation ON player(nation_id);
    CREATE INDEX IF NOT EXISTS idx_player_birth ON player(birth_days);
";

/// Saves are only ever read.
pub fn open_connection(db_path: &Path) -> Result<Connection> {
    Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("failed to open save: {}", db_path.display()))
}

pub fn validate_save(db_path: &Path) -> Result<()> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")
        .context("failed to prepare schema check")?;

    for table in REQUIRED_TABLES {
        let count: i64 = stmt
            .query_row([table], |row| row.get(0))
            .with_context(|| format!("failed to check table {table}"))?;
        if count == 0 {
            anyhow::bail!("not a roster save, missing table: {table}");
        }
    }

    Ok(())
}

#[cfg(test)]
pub fn init_save(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to create save: {}", db_path.display()))?;
    conn.execute_batch(SAVE_SCHEMA)
        .context("failed to initialize save schema")?;
    Ok(conn)
}
