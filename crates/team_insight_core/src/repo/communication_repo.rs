//! Communication record repository contract and SQLite implementation.

use crate::model::communication::{CommunicationId, CommunicationRecord};
use crate::repo::{
    bool_to_int, parse_count, parse_flag, parse_uuid, RepoError, RepoResult,
    SqliteTeamRepository,
};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

const COMMUNICATION_COLUMNS: &str = "communication.id AS id,
    communication.member_id AS member_id,
    communication.messages_per_day AS messages_per_day,
    communication.after_hours AS after_hours,
    communication.recorded_date AS recorded_date,
    communication.created_at AS created_at";
const COMMUNICATION_ORDER: &str = "ORDER BY communication.recorded_date DESC,
    communication.created_at DESC,
    communication.id ASC";

/// Communication record joined with the name of its member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationWithMember {
    pub record: CommunicationRecord,
    /// `None` when the member reference does not resolve.
    pub member_name: Option<String>,
}

pub trait CommunicationRepository {
    /// Creates a record; the referenced member must exist.
    fn create_communication(&self, record: &CommunicationRecord) -> RepoResult<CommunicationId>;
    fn get_communication(&self, id: CommunicationId) -> RepoResult<Option<CommunicationRecord>>;
    /// Lists records, most recent date first.
    fn list_communication(&self) -> RepoResult<Vec<CommunicationRecord>>;
    /// Lists records with member names, most recent date first.
    fn list_communication_with_members(&self) -> RepoResult<Vec<CommunicationWithMember>>;
    fn delete_communication(&self, id: CommunicationId) -> RepoResult<()>;
}

impl CommunicationRepository for SqliteTeamRepository<'_> {
    fn create_communication(&self, record: &CommunicationRecord) -> RepoResult<CommunicationId> {
        record.validate()?;
        if !self.member_exists(record.member_id)? {
            return Err(RepoError::MemberNotFound(record.member_id));
        }

        self.conn.execute(
            "INSERT INTO communication (
                id,
                member_id,
                messages_per_day,
                after_hours,
                recorded_date,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                record.id.to_string(),
                record.member_id.to_string(),
                record.messages_per_day,
                bool_to_int(record.after_hours),
                record.recorded_date,
                record.created_at,
            ],
        )?;

        Ok(record.id)
    }

    fn get_communication(&self, id: CommunicationId) -> RepoResult<Option<CommunicationRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COMMUNICATION_COLUMNS} FROM communication WHERE communication.id = ?1;"
        ))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_communication_row(row)?));
        }
        Ok(None)
    }

    fn list_communication(&self) -> RepoResult<Vec<CommunicationRecord>> {
        list_communication_on(self.conn)
    }

    fn list_communication_with_members(&self) -> RepoResult<Vec<CommunicationWithMember>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COMMUNICATION_COLUMNS}, members.name AS member_name
             FROM communication
             LEFT JOIN members ON members.id = communication.member_id
             {COMMUNICATION_ORDER};"
        ))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(CommunicationWithMember {
                record: parse_communication_row(row)?,
                member_name: row.get("member_name")?,
            });
        }
        Ok(items)
    }

    fn delete_communication(&self, id: CommunicationId) -> RepoResult<()> {
        self.delete_by_id("communication", id)
    }
}

pub(crate) fn list_communication_on(conn: &Connection) -> RepoResult<Vec<CommunicationRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COMMUNICATION_COLUMNS} FROM communication {COMMUNICATION_ORDER};"
    ))?;
    let mut rows = stmt.query([])?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(parse_communication_row(row)?);
    }
    Ok(records)
}

fn parse_communication_row(row: &Row<'_>) -> RepoResult<CommunicationRecord> {
    let id_text: String = row.get("id")?;
    let member_text: String = row.get("member_id")?;
    Ok(CommunicationRecord {
        id: parse_uuid(&id_text, "communication.id")?,
        member_id: parse_uuid(&member_text, "communication.member_id")?,
        messages_per_day: parse_count(
            row.get("messages_per_day")?,
            "communication.messages_per_day",
        )?,
        after_hours: parse_flag(row.get("after_hours")?, "communication.after_hours")?,
        recorded_date: row.get("recorded_date")?,
        created_at: row.get("created_at")?,
    })
}
