pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS families (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    slug        TEXT NOT NULL UNIQUE,
    invite_code TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    family_id     INTEGER NOT NULL REFERENCES families(id),
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    display_name  TEXT NOT NULL,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS family_members (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    family_id INTEGER NOT NULL REFERENCES families(id),
    label     TEXT NOT NULL,
    slug      TEXT NOT NULL,
    position  INTEGER NOT NULL DEFAULT 0,
    UNIQUE(family_id, slug)
);

CREATE TABLE IF NOT EXISTS invitations (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    family_id  INTEGER NOT NULL REFERENCES families(id),
    code_hash  TEXT NOT NULL UNIQUE,
    created_by INTEGER REFERENCES users(id),
    expires_at TEXT NOT NULL,
    used_by    INTEGER REFERENCES users(id),
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL REFERENCES users(id),
    token_hash TEXT NOT NULL UNIQUE,
    expires_at TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sessions_expires ON sessions(expires_at);

CREATE TABLE IF NOT EXISTS sheets (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    family_id  INTEGER NOT NULL REFERENCES families(id),
    year       INTEGER NOT NULL,
    month      INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE(family_id, year, month)
);

CREATE INDEX IF NOT EXISTS idx_sheets_family ON sheets(family_id);

CREATE TABLE IF NOT EXISTS salaries (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    sheet_id         INTEGER NOT NULL REFERENCES sheets(id) ON DELETE CASCADE,
    member_id        INTEGER NOT NULL REFERENCES family_members(id),
    category         TEXT NOT NULL DEFAULT '',
    encrypted_label  TEXT NOT NULL,
    encrypted_amount TEXT NOT NULL,
    position         INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_salaries_sheet ON salaries(sheet_id);

CREATE TABLE IF NOT EXISTS charges (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    sheet_id         INTEGER NOT NULL REFERENCES sheets(id) ON DELETE CASCADE,
    charge_type      TEXT NOT NULL DEFAULT 'FIXE_COMMUN',
    member_id        INTEGER REFERENCES family_members(id),
    category         TEXT NOT NULL DEFAULT '',
    encrypted_label  TEXT NOT NULL,
    encrypted_amount TEXT NOT NULL,
    position         INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_charges_sheet ON charges(sheet_id);

CREATE TABLE IF NOT EXISTS budgets (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    sheet_id         INTEGER NOT NULL REFERENCES sheets(id) ON DELETE CASCADE,
    encrypted_label  TEXT NOT NULL,
    encrypted_amount TEXT NOT NULL,
    position         INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_budgets_sheet ON budgets(sheet_id);

"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
