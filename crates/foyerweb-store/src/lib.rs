//! SQLite persistence for foyerweb
//!
//! One `Store` wraps one connection. The schema is versioned through
//! `schema_version`; sheet labels and amounts are encrypted with a
//! caller-supplied [`FieldCipher`] before they touch disk, so reads
//! need the same cipher back.
//!
//! Member attribution is relational: salary and charge lines reference
//! `family_members` rows, created implicitly the first time a sheet
//! names someone. Legacy free-text person labels are canonicalized on
//! write.

pub mod error;
pub mod models;
mod schema;

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use foyerweb_core::models::{Budget, Charge, Salary, Sheet};
use foyerweb_core::normalize::{
    normalize_person_label, slugify, MEMBER_FALLBACK,
};
use foyerweb_core::types::ChargeType;
use foyerweb_crypto::FieldCipher;

pub use error::{StoreError, StoreResult};
pub use models::{Family, FamilyMember, Invitation, Session, User};

use error::is_unique_violation;

/// Database handle
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database at `path` and run migrations.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// In-memory database for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> StoreResult<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ==================== Families ====================

    /// Create a family with a unique slug derived from its name.
    pub fn create_family(&self, name: &str, invite_code: &str) -> StoreResult<Family> {
        let base = slugify(name);
        let now = Utc::now();

        let mut suffix = 1u32;
        loop {
            let slug = if suffix == 1 {
                base.clone()
            } else {
                format!("{}-{}", base, suffix)
            };

            let result = self.conn.execute(
                "INSERT INTO families (name, slug, invite_code, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![name, slug, invite_code, now.to_rfc3339()],
            );
            match result {
                Ok(_) => {
                    let id = self.conn.last_insert_rowid();
                    return Ok(Family {
                        id,
                        name: name.to_string(),
                        slug,
                        invite_code: invite_code.to_string(),
                        created_at: now,
                    });
                }
                Err(e) if is_unique_violation(&e) => {
                    suffix += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Look up a family by id.
    pub fn find_family(&self, id: i64) -> StoreResult<Option<Family>> {
        self.conn
            .query_row(
                "SELECT id, name, slug, invite_code, created_at FROM families WHERE id = ?1",
                params![id],
                row_to_family,
            )
            .optional()?
            .transpose()
    }

    /// Look up a family by the code its account page displays.
    pub fn find_family_by_invite_code(&self, invite_code: &str) -> StoreResult<Option<Family>> {
        self.conn
            .query_row(
                "SELECT id, name, slug, invite_code, created_at FROM families
                 WHERE invite_code = ?1",
                params![invite_code],
                row_to_family,
            )
            .optional()?
            .transpose()
    }

    /// Replace the displayed invite code. Returns false when the
    /// family does not exist.
    pub fn update_invite_code(&self, family_id: i64, invite_code: &str) -> StoreResult<bool> {
        let updated = self.conn.execute(
            "UPDATE families SET invite_code = ?1 WHERE id = ?2",
            params![invite_code, family_id],
        )?;
        Ok(updated > 0)
    }

    // ==================== Users ====================

    /// Create a user. Emails are unique across all families.
    pub fn create_user(
        &self,
        family_id: i64,
        email: &str,
        password_hash: &str,
        display_name: &str,
    ) -> StoreResult<User> {
        let email = email.trim().to_lowercase();
        let now = Utc::now();
        let result = self.conn.execute(
            "INSERT INTO users (family_id, email, password_hash, display_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![family_id, email, password_hash, display_name, now.to_rfc3339()],
        );
        match result {
            Ok(_) => Ok(User {
                id: self.conn.last_insert_rowid(),
                family_id,
                email,
                password_hash: password_hash.to_string(),
                display_name: display_name.to_string(),
                created_at: now,
            }),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateEmail { email }),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a user by email (case-insensitive).
    pub fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.conn
            .query_row(
                "SELECT id, family_id, email, password_hash, display_name, created_at
                 FROM users WHERE email = ?1",
                params![email.trim().to_lowercase()],
                row_to_user,
            )
            .optional()?
            .transpose()
    }

    /// List the users attached to a family.
    pub fn list_users(&self, family_id: i64) -> StoreResult<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, family_id, email, password_hash, display_name, created_at
             FROM users WHERE family_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![family_id], row_to_user)?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row??);
        }
        Ok(users)
    }

    /// Apply a partial profile update; `None` fields keep their value.
    /// Returns the updated user.
    pub fn update_user(
        &self,
        user_id: i64,
        display_name: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> StoreResult<User> {
        let email = email.map(|e| e.trim().to_lowercase());
        let result = self.conn.execute(
            "UPDATE users SET
                 display_name = COALESCE(?1, display_name),
                 email = COALESCE(?2, email),
                 password_hash = COALESCE(?3, password_hash)
             WHERE id = ?4",
            params![display_name, email, password_hash, user_id],
        );
        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(StoreError::DuplicateEmail {
                    email: email.unwrap_or_default(),
                })
            }
            Err(e) => return Err(e.into()),
        }

        self.conn.query_row(
            "SELECT id, family_id, email, password_hash, display_name, created_at
             FROM users WHERE id = ?1",
            params![user_id],
            row_to_user,
        )?
    }

    // ==================== Family members ====================

    /// Members in first-seen order.
    pub fn list_members(&self, family_id: i64) -> StoreResult<Vec<FamilyMember>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, family_id, label, slug, position FROM family_members
             WHERE family_id = ?1 ORDER BY position, id",
        )?;
        let rows = stmt.query_map(params![family_id], row_to_member)?;
        let mut members = Vec::new();
        for row in rows {
            members.push(row?);
        }
        Ok(members)
    }

    /// Find a member by label, creating it on first reference.
    pub fn find_or_create_member(
        &self,
        family_id: i64,
        label: &str,
    ) -> StoreResult<FamilyMember> {
        find_or_create_member(&self.conn, family_id, label)
    }

    // ==================== Invitations ====================

    /// Record a freshly minted invitation.
    pub fn create_invitation(
        &self,
        family_id: i64,
        code_hash: &str,
        created_by: Option<i64>,
        validity: Duration,
    ) -> StoreResult<Invitation> {
        let now = Utc::now();
        let expires_at = now + validity;
        self.conn.execute(
            "INSERT INTO invitations (family_id, code_hash, created_by, expires_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                family_id,
                code_hash,
                created_by,
                expires_at.to_rfc3339(),
                now.to_rfc3339()
            ],
        )?;
        Ok(Invitation {
            id: self.conn.last_insert_rowid(),
            family_id,
            code_hash: code_hash.to_string(),
            created_by,
            expires_at,
            used_by: None,
            created_at: now,
        })
    }

    /// Find an invitation that is neither expired nor already used.
    pub fn find_valid_invitation(&self, code_hash: &str) -> StoreResult<Option<Invitation>> {
        let found = self
            .conn
            .query_row(
                "SELECT id, family_id, code_hash, created_by, expires_at, used_by, created_at
                 FROM invitations WHERE code_hash = ?1",
                params![code_hash],
                row_to_invitation,
            )
            .optional()?
            .transpose()?;
        Ok(found.filter(|inv| inv.used_by.is_none() && inv.expires_at > Utc::now()))
    }

    /// Expire every unused, still-valid invitation of a family.
    /// Returns the number revoked.
    pub fn revoke_active_invitations(&self, family_id: i64) -> StoreResult<usize> {
        let now = Utc::now().to_rfc3339();
        let revoked = self.conn.execute(
            "UPDATE invitations SET expires_at = ?1
             WHERE family_id = ?2 AND used_by IS NULL AND expires_at > ?1",
            params![now, family_id],
        )?;
        Ok(revoked)
    }

    /// Mark an invitation as consumed by a user.
    pub fn fulfill_invitation(&self, invitation_id: i64, user_id: i64) -> StoreResult<()> {
        self.conn.execute(
            "UPDATE invitations SET used_by = ?1 WHERE id = ?2",
            params![user_id, invitation_id],
        )?;
        Ok(())
    }

    // ==================== Sessions ====================

    /// Record a new session for a user.
    pub fn create_session(
        &self,
        user_id: i64,
        token_hash: &str,
        ttl: Duration,
    ) -> StoreResult<Session> {
        let now = Utc::now();
        let expires_at = now + ttl;
        self.conn.execute(
            "INSERT INTO sessions (user_id, token_hash, expires_at, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, token_hash, expires_at.to_rfc3339(), now.to_rfc3339()],
        )?;
        Ok(Session {
            id: self.conn.last_insert_rowid(),
            user_id,
            token_hash: token_hash.to_string(),
            expires_at,
            created_at: now,
        })
    }

    /// Resolve an unexpired session and its user in one lookup.
    pub fn find_valid_session(&self, token_hash: &str) -> StoreResult<Option<(Session, User)>> {
        let found = self
            .conn
            .query_row(
                "SELECT s.id, s.user_id, s.token_hash, s.expires_at, s.created_at,
                        u.id, u.family_id, u.email, u.password_hash, u.display_name, u.created_at
                 FROM sessions s JOIN users u ON u.id = s.user_id
                 WHERE s.token_hash = ?1",
                params![token_hash],
                |row| {
                    let session = Session {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        token_hash: row.get(2)?,
                        expires_at: parse_ts_raw(row.get::<_, String>(3)?)?,
                        created_at: parse_ts_raw(row.get::<_, String>(4)?)?,
                    };
                    let user = User {
                        id: row.get(5)?,
                        family_id: row.get(6)?,
                        email: row.get(7)?,
                        password_hash: row.get(8)?,
                        display_name: row.get(9)?,
                        created_at: parse_ts_raw(row.get::<_, String>(10)?)?,
                    };
                    Ok((session, user))
                },
            )
            .optional()?;
        Ok(found.filter(|(session, _)| session.expires_at > Utc::now()))
    }

    /// Delete a session by token hash. Returns false when no session
    /// matched.
    pub fn delete_session(&self, token_hash: &str) -> StoreResult<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM sessions WHERE token_hash = ?1",
            params![token_hash],
        )?;
        Ok(deleted > 0)
    }

    /// Drop every expired session. Returns the number removed.
    pub fn prune_expired_sessions(&self) -> StoreResult<usize> {
        let pruned = self.conn.execute(
            "DELETE FROM sessions WHERE expires_at <= ?1",
            params![Utc::now().to_rfc3339()],
        )?;
        if pruned > 0 {
            log::debug!("Pruned {} expired session(s)", pruned);
        }
        Ok(pruned)
    }

    // ==================== Sheets ====================

    /// Insert a sheet with its children, encrypting every label and
    /// amount. Fails with `DuplicatePeriod` when the family already
    /// has a sheet for this (year, month).
    pub fn insert_sheet(
        &mut self,
        family_id: i64,
        sheet: &Sheet,
        cipher: &FieldCipher,
    ) -> StoreResult<i64> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        let result = tx.execute(
            "INSERT INTO sheets (family_id, year, month, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![family_id, sheet.year, sheet.month, now, now],
        );
        if let Err(e) = result {
            if is_unique_violation(&e) {
                return Err(StoreError::DuplicatePeriod {
                    year: sheet.year,
                    month: sheet.month,
                });
            }
            return Err(e.into());
        }
        let sheet_id = tx.last_insert_rowid();

        write_children(&tx, family_id, sheet_id, sheet, cipher)?;
        tx.commit()?;
        Ok(sheet_id)
    }

    /// Replace a sheet's children wholesale and bump `updated_at`.
    /// Last writer wins; returns false when the sheet does not belong
    /// to the family.
    pub fn replace_sheet(
        &mut self,
        family_id: i64,
        sheet_id: i64,
        sheet: &Sheet,
        cipher: &FieldCipher,
    ) -> StoreResult<bool> {
        let tx = self.conn.transaction()?;

        let updated = tx.execute(
            "UPDATE sheets SET year = ?1, month = ?2, updated_at = ?3
             WHERE id = ?4 AND family_id = ?5",
            params![
                sheet.year,
                sheet.month,
                Utc::now().to_rfc3339(),
                sheet_id,
                family_id
            ],
        );
        let updated = match updated {
            Ok(n) => n,
            Err(e) if is_unique_violation(&e) => {
                return Err(StoreError::DuplicatePeriod {
                    year: sheet.year,
                    month: sheet.month,
                });
            }
            Err(e) => return Err(e.into()),
        };
        if updated == 0 {
            return Ok(false);
        }

        tx.execute("DELETE FROM salaries WHERE sheet_id = ?1", params![sheet_id])?;
        tx.execute("DELETE FROM charges WHERE sheet_id = ?1", params![sheet_id])?;
        tx.execute("DELETE FROM budgets WHERE sheet_id = ?1", params![sheet_id])?;

        write_children(&tx, family_id, sheet_id, sheet, cipher)?;
        tx.commit()?;
        Ok(true)
    }

    /// Delete a sheet and its children. Returns false when the sheet
    /// does not belong to the family.
    pub fn delete_sheet(&self, family_id: i64, sheet_id: i64) -> StoreResult<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM sheets WHERE id = ?1 AND family_id = ?2",
            params![sheet_id, family_id],
        )?;
        Ok(deleted > 0)
    }

    /// All of a family's sheets, most recent period first.
    pub fn list_sheets(&self, family_id: i64, cipher: &FieldCipher) -> StoreResult<Vec<Sheet>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, year, month FROM sheets
             WHERE family_id = ?1 ORDER BY year DESC, month DESC",
        )?;
        let rows = stmt.query_map(params![family_id], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i32>(1)?, row.get::<_, u32>(2)?))
        })?;
        let mut headers = Vec::new();
        for row in rows {
            headers.push(row?);
        }

        let mut sheets = Vec::new();
        for (id, year, month) in headers {
            sheets.push(self.read_sheet(id, year, month, cipher)?);
        }
        Ok(sheets)
    }

    /// One sheet, scoped by family.
    pub fn get_sheet(
        &self,
        family_id: i64,
        sheet_id: i64,
        cipher: &FieldCipher,
    ) -> StoreResult<Option<Sheet>> {
        let header = self
            .conn
            .query_row(
                "SELECT id, year, month FROM sheets WHERE id = ?1 AND family_id = ?2",
                params![sheet_id, family_id],
                |row| {
                    Ok((row.get::<_, i64>(0)?, row.get::<_, i32>(1)?, row.get::<_, u32>(2)?))
                },
            )
            .optional()?;

        match header {
            Some((id, year, month)) => Ok(Some(self.read_sheet(id, year, month, cipher)?)),
            None => Ok(None),
        }
    }

    fn read_sheet(
        &self,
        sheet_id: i64,
        year: i32,
        month: u32,
        cipher: &FieldCipher,
    ) -> StoreResult<Sheet> {
        let mut stmt = self.conn.prepare(
            "SELECT m.label, s.category, s.encrypted_label, s.encrypted_amount
             FROM salaries s JOIN family_members m ON m.id = s.member_id
             WHERE s.sheet_id = ?1 ORDER BY s.position, s.id",
        )?;
        let rows = stmt.query_map(params![sheet_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;
        let mut salaries = Vec::new();
        for row in rows {
            let (person, category, enc_label, enc_amount) = row?;
            salaries.push(Salary {
                person,
                category,
                label: cipher.decrypt_value(&enc_label)?,
                amount: cipher.decrypt_amount(&enc_amount)?,
            });
        }

        let mut stmt = self.conn.prepare(
            "SELECT c.charge_type, m.label, c.category, c.encrypted_label, c.encrypted_amount
             FROM charges c LEFT JOIN family_members m ON m.id = c.member_id
             WHERE c.sheet_id = ?1 ORDER BY c.position, c.id",
        )?;
        let rows = stmt.query_map(params![sheet_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;
        let mut charges = Vec::new();
        for row in rows {
            let (code, person, category, enc_label, enc_amount) = row?;
            charges.push(Charge {
                charge_type: ChargeType::parse_lossy(&code),
                person,
                category,
                label: cipher.decrypt_value(&enc_label)?,
                amount: cipher.decrypt_amount(&enc_amount)?,
            });
        }

        let mut stmt = self.conn.prepare(
            "SELECT encrypted_label, encrypted_amount FROM budgets
             WHERE sheet_id = ?1 ORDER BY position, id",
        )?;
        let rows = stmt.query_map(params![sheet_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut budgets = Vec::new();
        for row in rows {
            let (enc_label, enc_amount) = row?;
            budgets.push(Budget {
                label: cipher.decrypt_value(&enc_label)?,
                amount: cipher.decrypt_amount(&enc_amount)?,
            });
        }

        Ok(Sheet {
            id: sheet_id,
            year,
            month,
            salaries,
            charges,
            budgets,
        })
    }
}

fn write_children(
    conn: &Connection,
    family_id: i64,
    sheet_id: i64,
    sheet: &Sheet,
    cipher: &FieldCipher,
) -> StoreResult<()> {
    for (position, salary) in sheet.salaries.iter().enumerate() {
        let person = normalize_person_label(Some(&salary.person));
        let person = if person.is_empty() {
            MEMBER_FALLBACK.to_string()
        } else {
            person
        };
        let member = find_or_create_member(conn, family_id, &person)?;
        conn.execute(
            "INSERT INTO salaries (sheet_id, member_id, category, encrypted_label, encrypted_amount, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                sheet_id,
                member.id,
                salary.category,
                cipher.encrypt_value(&salary.label)?,
                cipher.encrypt_amount(salary.amount)?,
                position as i64
            ],
        )?;
    }

    for (position, charge) in sheet.charges.iter().enumerate() {
        let person = normalize_person_label(charge.person.as_deref());
        let member_id = if person.is_empty() {
            None
        } else {
            Some(find_or_create_member(conn, family_id, &person)?.id)
        };
        conn.execute(
            "INSERT INTO charges (sheet_id, charge_type, member_id, category, encrypted_label, encrypted_amount, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                sheet_id,
                charge.charge_type.as_str(),
                member_id,
                charge.category,
                cipher.encrypt_value(&charge.label)?,
                cipher.encrypt_amount(charge.amount)?,
                position as i64
            ],
        )?;
    }

    for (position, budget) in sheet.budgets.iter().enumerate() {
        conn.execute(
            "INSERT INTO budgets (sheet_id, encrypted_label, encrypted_amount, position)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                sheet_id,
                cipher.encrypt_value(&budget.label)?,
                cipher.encrypt_amount(budget.amount)?,
                position as i64
            ],
        )?;
    }

    Ok(())
}

fn find_or_create_member(
    conn: &Connection,
    family_id: i64,
    label: &str,
) -> StoreResult<FamilyMember> {
    let slug = slugify(label);
    let existing = conn
        .query_row(
            "SELECT id, family_id, label, slug, position FROM family_members
             WHERE family_id = ?1 AND slug = ?2",
            params![family_id, slug],
            row_to_member,
        )
        .optional()?;
    if let Some(member) = existing {
        return Ok(member);
    }

    let position: i64 = conn.query_row(
        "SELECT COUNT(*) FROM family_members WHERE family_id = ?1",
        params![family_id],
        |row| row.get(0),
    )?;
    conn.execute(
        "INSERT INTO family_members (family_id, label, slug, position)
         VALUES (?1, ?2, ?3, ?4)",
        params![family_id, label, slug, position],
    )?;
    Ok(FamilyMember {
        id: conn.last_insert_rowid(),
        family_id,
        label: label.to_string(),
        slug,
        position,
    })
}

// ==================== Row mapping ====================

fn row_to_family(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoreResult<Family>> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let slug = row.get(2)?;
    let invite_code = row.get(3)?;
    let created_at: String = row.get(4)?;
    Ok(parse_ts(&created_at).map(|created_at| Family {
        id,
        name,
        slug,
        invite_code,
        created_at,
    }))
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoreResult<User>> {
    let id = row.get(0)?;
    let family_id = row.get(1)?;
    let email = row.get(2)?;
    let password_hash = row.get(3)?;
    let display_name = row.get(4)?;
    let created_at: String = row.get(5)?;
    Ok(parse_ts(&created_at).map(|created_at| User {
        id,
        family_id,
        email,
        password_hash,
        display_name,
        created_at,
    }))
}

fn row_to_member(row: &rusqlite::Row<'_>) -> rusqlite::Result<FamilyMember> {
    Ok(FamilyMember {
        id: row.get(0)?,
        family_id: row.get(1)?,
        label: row.get(2)?,
        slug: row.get(3)?,
        position: row.get(4)?,
    })
}

fn row_to_invitation(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoreResult<Invitation>> {
    let id = row.get(0)?;
    let family_id = row.get(1)?;
    let code_hash = row.get(2)?;
    let created_by = row.get(3)?;
    let expires_at: String = row.get(4)?;
    let used_by = row.get(5)?;
    let created_at: String = row.get(6)?;
    let parsed = parse_ts(&expires_at)
        .and_then(|expires_at| parse_ts(&created_at).map(|created_at| (expires_at, created_at)));
    Ok(parsed.map(|(expires_at, created_at)| Invitation {
        id,
        family_id,
        code_hash,
        created_by,
        expires_at,
        used_by,
        created_at,
    }))
}

fn parse_ts(value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StoreError::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Timestamp parsing inside a rusqlite row closure, where only
/// `rusqlite::Error` can escape.
fn parse_ts_raw(value: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
