//! Database repository for users, sessions and resumes.
//!
//! Writes that touch both a resume and its owner run in one transaction.

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use crate::ats::AtsAnalysis;
use crate::errors::AppError;
use crate::models::{NewUser, PersonalInfo, Resume, ResumeContent, Session, User};

const USER_COLUMNS: &str = "id, name, phone_number, email, password_hash, resume_ids, \
     default_resume_id, total_resumes_created, created_at, updated_at";

const RESUME_COLUMNS: &str = "id, user_id, resume_title, first_name, last_name, email, phone, \
     location, linked_in, portfolio, professional_summary, experience, education, skills, \
     certifications, projects, languages, job_description, ats_score, formatting_score, \
     keyword_score, structure_score, ats_suggestions, missing_keywords, strengths, \
     last_analyzed, is_active, is_default, version, created_at, updated_at";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== USER OPERATIONS ====================

    /// Create a user. `password_hash` must already be hashed.
    pub async fn create_user(&self, user: &NewUser, password_hash: &str) -> Result<User, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now();

        sqlx::query(
            r#"INSERT INTO users (
                id, name, phone_number, email, password_hash, resume_ids,
                default_resume_id, total_resumes_created, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, '[]', NULL, 0, ?, ?)"#,
        )
        .bind(&id)
        .bind(&user.name)
        .bind(&user.phone_number)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|err| match AppError::from(err) {
            AppError::Duplicate(_) => AppError::Duplicate("Email already registered".to_string()),
            other => other,
        })?;

        Ok(User {
            id,
            name: user.name.clone(),
            phone_number: user.phone_number.clone(),
            email: user.email.clone(),
            password_hash: password_hash.to_string(),
            resume_ids: Vec::new(),
            default_resume_id: None,
            total_resumes_created: 0,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Look up a user by (already normalized) email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    // ==================== SESSION OPERATIONS ====================

    pub async fn create_session(
        &self,
        user_id: &str,
        ttl: chrono::Duration,
    ) -> Result<Session, AppError> {
        let created = Utc::now();
        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            secret: uuid::Uuid::new_v4().simple().to_string(),
            user_id: user_id.to_string(),
            expires_at: format_time(created + ttl),
        };

        sqlx::query(
            "INSERT INTO sessions (id, secret, user_id, expires_at, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(&session.secret)
        .bind(&session.user_id)
        .bind(&session.expires_at)
        .bind(format_time(created))
        .execute(&self.pool)
        .await?;

        Ok(session)
    }

    /// Get an unexpired session by id. The secret is checked by the caller.
    pub async fn get_session(&self, id: &str) -> Result<Option<Session>, AppError> {
        let row = sqlx::query(
            "SELECT id, secret, user_id, expires_at FROM sessions WHERE id = ? AND expires_at > ?",
        )
        .bind(id)
        .bind(now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Session {
            id: row.get("id"),
            secret: row.get("secret"),
            user_id: row.get("user_id"),
            expires_at: row.get("expires_at"),
        }))
    }

    pub async fn delete_session(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Remove expired sessions, returning how many were dropped.
    pub async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ==================== RESUME OPERATIONS ====================

    /// Open a transaction that holds the write lock from its first statement.
    ///
    /// A deferred transaction that reads before writing fails with
    /// `SQLITE_BUSY` instead of waiting when another writer commits in between.
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, AppError> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    /// Create a resume and attach it to its owner.
    pub async fn create_resume(
        &self,
        user_id: &str,
        content: &ResumeContent,
    ) -> Result<Resume, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now();
        let info = &content.personal_info;

        let mut tx = self.begin_write().await?;

        let owner = sqlx::query("SELECT resume_ids FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let mut resume_ids: Vec<String> = parse_json_list(&owner.get::<String, _>("resume_ids"));
        resume_ids.push(id.clone());

        sqlx::query(
            r#"INSERT INTO resumes (
                id, user_id, resume_title, first_name, last_name, email, phone, location,
                linked_in, portfolio, professional_summary, experience, education, skills,
                certifications, projects, languages, job_description,
                is_active, is_default, version, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1, 0, 1, ?, ?)"#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&content.resume_title)
        .bind(&info.first_name)
        .bind(&info.last_name)
        .bind(&info.email)
        .bind(&info.phone)
        .bind(&info.location)
        .bind(&info.linked_in)
        .bind(&info.portfolio)
        .bind(&content.professional_summary)
        .bind(serde_json::to_string(&content.experience)?)
        .bind(serde_json::to_string(&content.education)?)
        .bind(serde_json::to_string(&content.skills)?)
        .bind(serde_json::to_string(&content.certifications)?)
        .bind(serde_json::to_string(&content.projects)?)
        .bind(serde_json::to_string(&content.languages)?)
        .bind(&content.job_description)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"UPDATE users SET
                resume_ids = ?,
                total_resumes_created = total_resumes_created + 1,
                updated_at = ?
            WHERE id = ?"#,
        )
        .bind(serde_json::to_string(&resume_ids)?)
        .bind(&now)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Resume {
            id,
            user_id: user_id.to_string(),
            content: content.clone(),
            ats_score: None,
            formatting_score: None,
            keyword_score: None,
            structure_score: None,
            ats_suggestions: Vec::new(),
            missing_keywords: Vec::new(),
            strengths: Vec::new(),
            last_analyzed: None,
            is_active: true,
            is_default: false,
            version: 1,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get an active resume owned by `user_id`.
    pub async fn get_resume(&self, id: &str, user_id: &str) -> Result<Option<Resume>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {RESUME_COLUMNS} FROM resumes WHERE id = ? AND user_id = ? AND is_active = 1"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(resume_from_row))
    }

    /// Active resumes of `user_id`, newest first.
    pub async fn list_resumes(&self, user_id: &str) -> Result<Vec<Resume>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {RESUME_COLUMNS} FROM resumes \
             WHERE user_id = ? AND is_active = 1 \
             ORDER BY created_at DESC, rowid DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(resume_from_row).collect())
    }

    /// Replace the editable content of an active resume and bump its version.
    pub async fn update_resume(
        &self,
        id: &str,
        user_id: &str,
        content: &ResumeContent,
    ) -> Result<Resume, AppError> {
        let now = now();
        let info = &content.personal_info;

        let result = sqlx::query(
            r#"UPDATE resumes SET
                resume_title = ?, first_name = ?, last_name = ?, email = ?, phone = ?,
                location = ?, linked_in = ?, portfolio = ?, professional_summary = ?,
                experience = ?, education = ?, skills = ?, certifications = ?, projects = ?,
                languages = ?, job_description = ?, version = version + 1, updated_at = ?
            WHERE id = ? AND user_id = ? AND is_active = 1"#,
        )
        .bind(&content.resume_title)
        .bind(&info.first_name)
        .bind(&info.last_name)
        .bind(&info.email)
        .bind(&info.phone)
        .bind(&info.location)
        .bind(&info.linked_in)
        .bind(&info.portfolio)
        .bind(&content.professional_summary)
        .bind(serde_json::to_string(&content.experience)?)
        .bind(serde_json::to_string(&content.education)?)
        .bind(serde_json::to_string(&content.skills)?)
        .bind(serde_json::to_string(&content.certifications)?)
        .bind(serde_json::to_string(&content.projects)?)
        .bind(serde_json::to_string(&content.languages)?)
        .bind(&content.job_description)
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(resume_not_found());
        }

        self.get_resume(id, user_id)
            .await?
            .ok_or_else(resume_not_found)
    }

    /// Soft-delete a resume owned by `user_id`, active or not.
    ///
    /// Detaches it from the owner's list and clears the owner's default if it
    /// pointed here.
    pub async fn delete_resume(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        let now = now();
        let mut tx = self.begin_write().await?;

        let row = sqlx::query("SELECT is_active FROM resumes WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(resume_not_found)?;
        let was_active = row.get::<i32, _>("is_active") != 0;

        if was_active {
            sqlx::query(
                "UPDATE resumes SET is_active = 0, is_default = 0, updated_at = ? WHERE id = ?",
            )
            .bind(&now)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let owner = sqlx::query("SELECT resume_ids FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
        let mut resume_ids: Vec<String> = parse_json_list(&owner.get::<String, _>("resume_ids"));
        resume_ids.retain(|r| r != id);

        sqlx::query(
            r#"UPDATE users SET
                resume_ids = ?,
                default_resume_id =
                    CASE WHEN default_resume_id = ? THEN NULL ELSE default_resume_id END,
                updated_at = ?
            WHERE id = ?"#,
        )
        .bind(serde_json::to_string(&resume_ids)?)
        .bind(id)
        .bind(&now)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Make an active resume the owner's default.
    pub async fn set_default_resume(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        let now = now();
        let mut tx = self.begin_write().await?;

        sqlx::query("SELECT id FROM resumes WHERE id = ? AND user_id = ? AND is_active = 1")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(resume_not_found)?;

        sqlx::query(
            "UPDATE resumes SET is_default = CASE WHEN id = ? THEN 1 ELSE 0 END WHERE user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET default_resume_id = ?, updated_at = ? WHERE id = ?")
            .bind(id)
            .bind(&now)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Store a successful analysis on an active resume.
    pub async fn save_analysis(
        &self,
        id: &str,
        user_id: &str,
        analysis: &AtsAnalysis,
    ) -> Result<Resume, AppError> {
        let result = sqlx::query(
            r#"UPDATE resumes SET
                ats_score = ?, formatting_score = ?, keyword_score = ?, structure_score = ?,
                ats_suggestions = ?, missing_keywords = ?, strengths = ?, last_analyzed = ?
            WHERE id = ? AND user_id = ? AND is_active = 1"#,
        )
        .bind(analysis.ats_score)
        .bind(analysis.formatting_score)
        .bind(analysis.keyword_score)
        .bind(analysis.structure_score)
        .bind(serde_json::to_string(&analysis.suggestions)?)
        .bind(serde_json::to_string(&analysis.missing_keywords)?)
        .bind(serde_json::to_string(&analysis.strengths)?)
        .bind(now())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(resume_not_found());
        }

        self.get_resume(id, user_id)
            .await?
            .ok_or_else(resume_not_found)
    }
}

fn resume_not_found() -> AppError {
    AppError::NotFound("Resume not found".to_string())
}

fn now() -> String {
    format_time(Utc::now())
}

/// Fixed-width UTC timestamps so that text comparison orders chronologically.
fn format_time(time: chrono::DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// Helper functions for row conversion

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    let resume_ids: String = row.get("resume_ids");
    User {
        id: row.get("id"),
        name: row.get("name"),
        phone_number: row.get("phone_number"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        resume_ids: parse_json_list(&resume_ids),
        default_resume_id: row.get("default_resume_id"),
        total_resumes_created: row.get("total_resumes_created"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn resume_from_row(row: &sqlx::sqlite::SqliteRow) -> Resume {
    let is_active: i32 = row.get("is_active");
    let is_default: i32 = row.get("is_default");
    let list = |column: &str| row.get::<String, _>(column);

    Resume {
        id: row.get("id"),
        user_id: row.get("user_id"),
        content: ResumeContent {
            resume_title: row.get("resume_title"),
            personal_info: PersonalInfo {
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                email: row.get("email"),
                phone: row.get("phone"),
                location: row.get("location"),
                linked_in: row.get("linked_in"),
                portfolio: row.get("portfolio"),
            },
            professional_summary: row.get("professional_summary"),
            experience: parse_json_list(&list("experience")),
            education: parse_json_list(&list("education")),
            skills: parse_json_list(&list("skills")),
            certifications: parse_json_list(&list("certifications")),
            projects: parse_json_list(&list("projects")),
            languages: parse_json_list(&list("languages")),
            job_description: row.get("job_description"),
        },
        ats_score: row.get("ats_score"),
        formatting_score: row.get("formatting_score"),
        keyword_score: row.get("keyword_score"),
        structure_score: row.get("structure_score"),
        ats_suggestions: parse_json_list(&list("ats_suggestions")),
        missing_keywords: parse_json_list(&list("missing_keywords")),
        strengths: parse_json_list(&list("strengths")),
        last_analyzed: row.get("last_analyzed"),
        is_active: is_active != 0,
        is_default: is_default != 0,
        version: row.get("version"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn parse_json_list<T: DeserializeOwned>(s: &str) -> Vec<T> {
    serde_json::from_str(s).unwrap_or_else(|err| {
        tracing::warn!("Discarding unreadable JSON column: {}", err);
        Vec::new()
    })
}
