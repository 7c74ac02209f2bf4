//! Meeting repository contract and SQLite implementation.

use crate::model::meeting::{Meeting, MeetingId};
use crate::repo::{parse_count, parse_uuid, RepoError, RepoResult, SqliteTeamRepository};
use rusqlite::{params, Connection, Row};

const MEETING_SELECT_SQL: &str = "SELECT
    id,
    title,
    duration,
    participants,
    meeting_date,
    created_at
FROM meetings";

pub trait MeetingRepository {
    fn create_meeting(&self, meeting: &Meeting) -> RepoResult<MeetingId>;
    fn get_meeting(&self, id: MeetingId) -> RepoResult<Option<Meeting>>;
    /// Lists meetings, most recent date first.
    fn list_meetings(&self) -> RepoResult<Vec<Meeting>>;
    fn delete_meeting(&self, id: MeetingId) -> RepoResult<()>;
}

impl MeetingRepository for SqliteTeamRepository<'_> {
    fn create_meeting(&self, meeting: &Meeting) -> RepoResult<MeetingId> {
        meeting.validate()?;

        self.conn.execute(
            "INSERT INTO meetings (
                id,
                title,
                duration,
                participants,
                meeting_date,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                meeting.id.to_string(),
                meeting.title.as_str(),
                meeting.duration,
                meeting.participants,
                meeting.meeting_date,
                meeting.created_at,
            ],
        )?;

        Ok(meeting.id)
    }

    fn get_meeting(&self, id: MeetingId) -> RepoResult<Option<Meeting>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEETING_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_meeting_row(row)?));
        }
        Ok(None)
    }

    fn list_meetings(&self) -> RepoResult<Vec<Meeting>> {
        list_meetings_on(self.conn)
    }

    fn delete_meeting(&self, id: MeetingId) -> RepoResult<()> {
        self.delete_by_id("meetings", id)
    }
}

pub(crate) fn list_meetings_on(conn: &Connection) -> RepoResult<Vec<Meeting>> {
    let mut stmt = conn.prepare(&format!(
        "{MEETING_SELECT_SQL} ORDER BY meeting_date DESC, created_at DESC, id ASC;"
    ))?;
    let mut rows = stmt.query([])?;
    let mut meetings = Vec::new();
    while let Some(row) = rows.next()? {
        meetings.push(parse_meeting_row(row)?);
    }
    Ok(meetings)
}

fn parse_meeting_row(row: &Row<'_>) -> RepoResult<Meeting> {
    let id_text: String = row.get("id")?;
    let meeting = Meeting {
        id: parse_uuid(&id_text, "meetings.id")?,
        title: row.get("title")?,
        duration: parse_count(row.get("duration")?, "meetings.duration")?,
        participants: parse_count(row.get("participants")?, "meetings.participants")?,
        meeting_date: row.get("meeting_date")?,
        created_at: row.get("created_at")?,
    };
    meeting.validate().map_err(|err| {
        RepoError::InvalidData(format!("meeting `{id_text}` failed validation: {err}"))
    })?;
    Ok(meeting)
}
