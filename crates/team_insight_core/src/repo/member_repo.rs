//! Member repository contract and SQLite implementation.

use crate::model::member::{Member, MemberId};
use crate::repo::{parse_uuid, RepoError, RepoResult, SqliteTeamRepository};
use rusqlite::{params, Connection, Row};

const MEMBER_SELECT_SQL: &str = "SELECT id, name, user_id, created_at FROM members";

pub trait MemberRepository {
    fn create_member(&self, member: &Member) -> RepoResult<MemberId>;
    fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>>;
    /// Lists members ordered by name.
    fn list_members(&self) -> RepoResult<Vec<Member>>;
    /// Deletes a member together with their tasks and communication records.
    fn delete_member(&self, id: MemberId) -> RepoResult<()>;
}

impl MemberRepository for SqliteTeamRepository<'_> {
    fn create_member(&self, member: &Member) -> RepoResult<MemberId> {
        member.validate()?;

        self.conn.execute(
            "INSERT INTO members (id, name, user_id, created_at) VALUES (?1, ?2, ?3, ?4);",
            params![
                member.id.to_string(),
                member.name.as_str(),
                member.user_id.as_deref(),
                member.created_at,
            ],
        )?;

        Ok(member.id)
    }

    fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMBER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_member_row(row)?));
        }
        Ok(None)
    }

    fn list_members(&self) -> RepoResult<Vec<Member>> {
        list_members_on(self.conn)
    }

    fn delete_member(&self, id: MemberId) -> RepoResult<()> {
        self.delete_by_id("members", id)
    }
}

pub(crate) fn list_members_on(conn: &Connection) -> RepoResult<Vec<Member>> {
    let mut stmt = conn.prepare(&format!(
        "{MEMBER_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, id ASC;"
    ))?;
    let mut rows = stmt.query([])?;
    let mut members = Vec::new();
    while let Some(row) = rows.next()? {
        members.push(parse_member_row(row)?);
    }
    Ok(members)
}

fn parse_member_row(row: &Row<'_>) -> RepoResult<Member> {
    let id_text: String = row.get("id")?;
    let member = Member {
        id: parse_uuid(&id_text, "members.id")?,
        name: row.get("name")?,
        user_id: row.get("user_id")?,
        created_at: row.get("created_at")?,
    };
    member.validate().map_err(|err| {
        RepoError::InvalidData(format!("member `{id_text}` failed validation: {err}"))
    })?;
    Ok(member)
}
