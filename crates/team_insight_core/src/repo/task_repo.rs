//! Task repository contract and SQLite implementation.

use crate::model::task::{Task, TaskId, Urgency};
use crate::repo::{parse_uuid, RepoError, RepoResult, SqliteTeamRepository};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

const TASK_COLUMNS: &str = "tasks.id AS id,
    tasks.member_id AS member_id,
    tasks.title AS title,
    tasks.urgency AS urgency,
    tasks.created_at AS created_at";
const TASK_ORDER: &str = "ORDER BY tasks.created_at DESC, tasks.id ASC";

/// Task joined with the name of its member, for list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWithMember {
    pub task: Task,
    /// `None` when the member reference does not resolve.
    pub member_name: Option<String>,
}

pub trait TaskRepository {
    /// Creates a task; the referenced member must exist.
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists tasks, newest first.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Lists tasks with member names, newest first.
    fn list_tasks_with_members(&self) -> RepoResult<Vec<TaskWithMember>>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

impl TaskRepository for SqliteTeamRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;
        if !self.member_exists(task.member_id)? {
            return Err(RepoError::MemberNotFound(task.member_id));
        }

        self.conn.execute(
            "INSERT INTO tasks (id, member_id, title, urgency, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                task.id.to_string(),
                task.member_id.to_string(),
                task.title.as_str(),
                task.urgency.as_str(),
                task.created_at,
            ],
        )?;

        Ok(task.id)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE tasks.id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        list_tasks_on(self.conn)
    }

    fn list_tasks_with_members(&self) -> RepoResult<Vec<TaskWithMember>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS}, members.name AS member_name
             FROM tasks
             LEFT JOIN members ON members.id = tasks.member_id
             {TASK_ORDER};"
        ))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(TaskWithMember {
                task: parse_task_row(row)?,
                member_name: row.get("member_name")?,
            });
        }
        Ok(items)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.delete_by_id("tasks", id)
    }
}

pub(crate) fn list_tasks_on(conn: &Connection) -> RepoResult<Vec<Task>> {
    let mut stmt = conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks {TASK_ORDER};"))?;
    let mut rows = stmt.query([])?;
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }
    Ok(tasks)
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let member_text: String = row.get("member_id")?;
    let urgency_text: String = row.get("urgency")?;
    let urgency = Urgency::parse(&urgency_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid urgency `{urgency_text}` in tasks.urgency"))
    })?;

    let task = Task {
        id: parse_uuid(&id_text, "tasks.id")?,
        member_id: parse_uuid(&member_text, "tasks.member_id")?,
        title: row.get("title")?,
        urgency,
        created_at: row.get("created_at")?,
    };
    task.validate().map_err(|err| {
        RepoError::InvalidData(format!("task `{id_text}` failed validation: {err}"))
    })?;
    Ok(task)
}
