//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Translate UI strings (ids, urgency, dates, roles) into core types.
//! - List stored records so the UI can show and delete them.
//! - Report which cached query results each write made stale.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens its own connection; nothing is cached here.
//! - Failures come back as envelopes with `ok = false`, never as panics.

use chrono::NaiveDate;
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use team_insight_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_db,
    parse_role, ping as ping_inner, visible_sections as visible_sections_inner,
    CommunicationWithMember, DashboardReport, DashboardService, Meeting, Member, NewCommunication,
    NewMeeting, NewMember, NewTask, QueryKey, RepoResult, SqliteTeamRepository, TaskWithMember,
    TeamDataService, Urgency,
};
use uuid::Uuid;

const DB_FILE_NAME: &str = "team_insight.sqlite3";
const DB_PATH_ENV: &str = "TEAM_INSIGHT_DB_PATH";
const DATE_FORMAT: &str = "%Y-%m-%d";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file used by every later call.
///
/// Must run before the first DB-backed call; afterwards the path is fixed
/// for the process. Repeating the call with the same path is a no-op.
///
/// # FFI contract
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "database already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Result envelope for create and delete calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created record ID on successful creates.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Query keys whose cached results are now stale.
    pub invalidated: Vec<String>,
}

impl MutationResponse {
    fn success(message: impl Into<String>, id: Option<String>, stale: Vec<QueryKey>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
            invalidated: stale
                .into_iter()
                .map(|key| key.as_str().to_string())
                .collect(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
            invalidated: Vec::new(),
        }
    }
}

/// Adds a team member.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Blank names are rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn add_member(name: String, user_id: Option<String>) -> MutationResponse {
    mutate("add_member", "Member added.", |service| {
        service
            .add_member(NewMember { name, user_id })
            .map(|member| Some(member.id.to_string()))
    })
}

/// Adds a task for an existing member.
///
/// `urgency` is `Low|Medium|High` (case-insensitive).
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(member_id: String, title: String, urgency: String) -> MutationResponse {
    let member_id = match parse_id(&member_id, "member_id") {
        Ok(id) => id,
        Err(err) => return MutationResponse::failure(format!("add_task failed: {err}")),
    };
    let Some(urgency) = Urgency::parse(&urgency) else {
        return MutationResponse::failure(format!(
            "add_task failed: unsupported urgency `{}`",
            urgency.trim()
        ));
    };
    mutate("add_task", "Task added.", |service| {
        service
            .add_task(NewTask {
                member_id,
                title,
                urgency,
            })
            .map(|task| Some(task.id.to_string()))
    })
}

/// Adds a meeting. `meeting_date` is `YYYY-MM-DD`; `None` means today (UTC).
#[flutter_rust_bridge::frb(sync)]
pub fn add_meeting(
    title: String,
    duration: u32,
    participants: u32,
    meeting_date: Option<String>,
) -> MutationResponse {
    let meeting_date = match parse_optional_date(meeting_date, "meeting_date") {
        Ok(date) => date,
        Err(err) => return MutationResponse::failure(format!("add_meeting failed: {err}")),
    };
    mutate("add_meeting", "Meeting added.", |service| {
        service
            .add_meeting(NewMeeting {
                title,
                duration,
                participants,
                meeting_date,
            })
            .map(|meeting| Some(meeting.id.to_string()))
    })
}

/// Adds daily communication stats for an existing member.
///
/// `recorded_date` is `YYYY-MM-DD`; `None` means today (UTC).
#[flutter_rust_bridge::frb(sync)]
pub fn add_communication(
    member_id: String,
    messages_per_day: u32,
    after_hours: bool,
    recorded_date: Option<String>,
) -> MutationResponse {
    let parsed = parse_id(&member_id, "member_id").and_then(|member_id| {
        parse_optional_date(recorded_date, "recorded_date").map(|date| (member_id, date))
    });
    let (member_id, recorded_date) = match parsed {
        Ok(values) => values,
        Err(err) => {
            return MutationResponse::failure(format!("add_communication failed: {err}"))
        }
    };
    mutate("add_communication", "Communication stats added.", |service| {
        service
            .add_communication(NewCommunication {
                member_id,
                messages_per_day,
                after_hours,
                recorded_date,
            })
            .map(|record| Some(record.id.to_string()))
    })
}

/// Deletes a member together with their tasks and communication records.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_member(id: String) -> MutationResponse {
    delete_with("delete_member", "Member deleted.", &id, |service, id| {
        service.delete_member(id)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(id: String) -> MutationResponse {
    delete_with("delete_task", "Task deleted.", &id, |service, id| {
        service.delete_task(id)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_meeting(id: String) -> MutationResponse {
    delete_with("delete_meeting", "Meeting deleted.", &id, |service, id| {
        service.delete_meeting(id)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_communication(id: String) -> MutationResponse {
    delete_with(
        "delete_communication",
        "Communication stats deleted.",
        &id,
        |service, id| service.delete_communication(id),
    )
}

/// Display-ready team health.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthView {
    pub health: i64,
    /// `Healthy|At Risk|Critical`.
    pub status: String,
    pub description: String,
    /// CSS `hsl(...)` color for the status.
    pub color: String,
    pub workload_risk: i64,
    /// `Low|Medium|High`, classified on the unrounded risk.
    pub workload_level: String,
    pub meeting_risk: i64,
    pub meeting_level: String,
    pub communication_risk: i64,
    pub communication_level: String,
    pub member_count: u64,
    pub total_workload: u64,
    pub total_meeting_cost: u64,
    pub avg_messages: i64,
    pub after_hours_percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadItem {
    pub member_id: String,
    pub member_name: String,
    pub total_workload: u64,
    pub task_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingCostItem {
    pub meeting_id: String,
    pub title: String,
    /// Person-minutes.
    pub cost: u64,
    pub duration: u32,
    pub participants: u32,
}

/// Stored record totals for the stats cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCountsView {
    pub members: u64,
    pub tasks: u64,
    pub meetings: u64,
    pub communication_records: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunicationItem {
    pub member_id: String,
    pub member_name: String,
    pub messages_per_day: u32,
    pub after_hours_percentage: u32,
}

/// Dashboard envelope. On failure `counts` and `health` are `None` and
/// every list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    pub ok: bool,
    pub message: String,
    pub counts: Option<RecordCountsView>,
    pub health: Option<HealthView>,
    pub workload: Vec<WorkloadItem>,
    pub meeting_costs: Vec<MeetingCostItem>,
    pub communication: Vec<CommunicationItem>,
}

impl DashboardResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            counts: None,
            health: None,
            workload: Vec::new(),
            meeting_costs: Vec::new(),
            communication: Vec::new(),
        }
    }
}

/// Computes the whole dashboard from one consistent snapshot.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; any failed read fails the whole response.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_report() -> DashboardResponse {
    let db_path = resolve_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error op=dashboard_report error={err}");
            return DashboardResponse::failure(format!("dashboard_report failed: {err}"));
        }
    };
    let service = DashboardService::new(SqliteTeamRepository::new(&conn));
    match service.report() {
        Ok(report) => to_dashboard_response(report),
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error op=dashboard_report error={err}");
            DashboardResponse::failure(format!("dashboard_report failed: {err}"))
        }
    }
}

/// Stored team member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberItem {
    pub id: String,
    pub name: String,
    pub user_id: Option<String>,
    pub created_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembersResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<MemberItem>,
}

/// Stored task with the name of its member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub member_id: String,
    pub member_name: Option<String>,
    pub title: String,
    /// `Low|Medium|High`.
    pub urgency: String,
    pub created_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<TaskItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingItem {
    pub id: String,
    pub title: String,
    pub duration: u32,
    pub participants: u32,
    pub cost: u64,
    /// `YYYY-MM-DD`.
    pub meeting_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingsResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<MeetingItem>,
}

/// Stored communication stats with the name of their member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunicationRecordItem {
    pub id: String,
    pub member_id: String,
    pub member_name: Option<String>,
    pub messages_per_day: u32,
    pub after_hours: bool,
    /// `YYYY-MM-DD`.
    pub recorded_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunicationResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<CommunicationRecordItem>,
}

/// Lists members ordered by name (case-insensitive).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures return `ok = false` with no items.
#[flutter_rust_bridge::frb(sync)]
pub fn list_members() -> MembersResponse {
    match read_with("list_members", |service| service.list_members()) {
        Ok(members) => MembersResponse {
            ok: true,
            message: count_message(members.len()),
            items: members.into_iter().map(to_member_item).collect(),
        },
        Err(message) => MembersResponse {
            ok: false,
            message,
            items: Vec::new(),
        },
    }
}

/// Lists tasks newest first, with member names.
#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks() -> TasksResponse {
    match read_with("list_tasks", |service| service.list_tasks()) {
        Ok(tasks) => TasksResponse {
            ok: true,
            message: count_message(tasks.len()),
            items: tasks.into_iter().map(to_task_item).collect(),
        },
        Err(message) => TasksResponse {
            ok: false,
            message,
            items: Vec::new(),
        },
    }
}

/// Lists meetings, most recent date first.
#[flutter_rust_bridge::frb(sync)]
pub fn list_meetings() -> MeetingsResponse {
    match read_with("list_meetings", |service| service.list_meetings()) {
        Ok(meetings) => MeetingsResponse {
            ok: true,
            message: count_message(meetings.len()),
            items: meetings.into_iter().map(to_meeting_item).collect(),
        },
        Err(message) => MeetingsResponse {
            ok: false,
            message,
            items: Vec::new(),
        },
    }
}

/// Lists communication stats, most recent date first, with member names.
#[flutter_rust_bridge::frb(sync)]
pub fn list_communication() -> CommunicationResponse {
    match read_with("list_communication", |service| service.list_communication()) {
        Ok(records) => CommunicationResponse {
            ok: true,
            message: count_message(records.len()),
            items: records.into_iter().map(to_communication_item).collect(),
        },
        Err(message) => CommunicationResponse {
            ok: false,
            message,
            items: Vec::new(),
        },
    }
}

/// Navigation entry for one dashboard section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionItem {
    pub id: String,
    pub label: String,
    pub route: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionsResponse {
    pub ok: bool,
    pub message: String,
    pub sections: Vec<SectionItem>,
}

/// Lists the sections a role (`admin|member`) may navigate to.
#[flutter_rust_bridge::frb(sync)]
pub fn visible_sections(role: String) -> SectionsResponse {
    match parse_role(&role) {
        Ok(role) => SectionsResponse {
            ok: true,
            message: String::new(),
            sections: visible_sections_inner(role)
                .into_iter()
                .map(|section| SectionItem {
                    id: section.id().to_string(),
                    label: section.label().to_string(),
                    route: section.route().to_string(),
                })
                .collect(),
        },
        Err(err) => SectionsResponse {
            ok: false,
            message: format!("visible_sections failed: {err}"),
            sections: Vec::new(),
        },
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn mutate(
    op: &str,
    success_message: &str,
    f: impl FnOnce(&mut TeamDataService<SqliteTeamRepository<'_>>) -> RepoResult<Option<String>>,
) -> MutationResponse {
    let db_path = resolve_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error op={op} error={err}");
            return MutationResponse::failure(format!("{op} failed: {err}"));
        }
    };
    let mut service = TeamDataService::new(SqliteTeamRepository::new(&conn));
    match f(&mut service) {
        Ok(id) => MutationResponse::success(success_message, id, service.take_stale()),
        Err(err) => MutationResponse::failure(format!("{op} failed: {err}")),
    }
}

fn delete_with(
    op: &str,
    success_message: &str,
    raw_id: &str,
    f: impl FnOnce(&mut TeamDataService<SqliteTeamRepository<'_>>, Uuid) -> RepoResult<()>,
) -> MutationResponse {
    let id = match parse_id(raw_id, "id") {
        Ok(id) => id,
        Err(err) => return MutationResponse::failure(format!("{op} failed: {err}")),
    };
    mutate(op, success_message, |service| f(service, id).map(|()| None))
}

fn parse_id(value: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid {field} `{}`", value.trim()))
}

fn parse_optional_date(value: Option<String>, field: &str) -> Result<Option<NaiveDate>, String> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| format!("invalid {field} `{text}`; expected YYYY-MM-DD")),
    }
}

fn read_with<T>(
    op: &str,
    f: impl FnOnce(&TeamDataService<SqliteTeamRepository<'_>>) -> RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_call module=ffi status=error op={op} error={err}");
        format!("{op} failed: {err}")
    })?;
    let service = TeamDataService::new(SqliteTeamRepository::new(&conn));
    f(&service).map_err(|err| {
        warn!("event=ffi_call module=ffi status=error op={op} error={err}");
        format!("{op} failed: {err}")
    })
}

fn count_message(count: usize) -> String {
    if count == 0 {
        "No records.".to_string()
    } else {
        format!("Found {count} record(s).")
    }
}

fn to_member_item(member: Member) -> MemberItem {
    MemberItem {
        id: member.id.to_string(),
        name: member.name,
        user_id: member.user_id,
        created_at_ms: member.created_at,
    }
}

fn to_task_item(item: TaskWithMember) -> TaskItem {
    let task = item.task;
    TaskItem {
        id: task.id.to_string(),
        member_id: task.member_id.to_string(),
        member_name: item.member_name,
        title: task.title,
        urgency: task.urgency.as_str().to_string(),
        created_at_ms: task.created_at,
    }
}

fn to_meeting_item(meeting: Meeting) -> MeetingItem {
    MeetingItem {
        id: meeting.id.to_string(),
        cost: meeting.cost(),
        title: meeting.title,
        duration: meeting.duration,
        participants: meeting.participants,
        meeting_date: meeting.meeting_date.format(DATE_FORMAT).to_string(),
    }
}

fn to_communication_item(item: CommunicationWithMember) -> CommunicationRecordItem {
    let record = item.record;
    CommunicationRecordItem {
        id: record.id.to_string(),
        member_id: record.member_id.to_string(),
        member_name: item.member_name,
        messages_per_day: record.messages_per_day,
        after_hours: record.after_hours,
        recorded_date: record.recorded_date.format(DATE_FORMAT).to_string(),
    }
}

fn to_dashboard_response(report: DashboardReport) -> DashboardResponse {
    let health = report.health;
    let counts = report.counts;
    DashboardResponse {
        ok: true,
        message: format!("Team health {} ({}).", health.health, health.status_label),
        counts: Some(RecordCountsView {
            members: counts.members as u64,
            tasks: counts.tasks as u64,
            meetings: counts.meetings as u64,
            communication_records: counts.communication_records as u64,
        }),
        health: Some(HealthView {
            health: health.health,
            status: health.status_label,
            description: health.status_description,
            color: health.color.hsl().to_string(),
            workload_risk: health.workload_risk,
            workload_level: health.workload_level.label().to_string(),
            meeting_risk: health.meeting_risk,
            meeting_level: health.meeting_level.label().to_string(),
            communication_risk: health.communication_risk,
            communication_level: health.communication_level.label().to_string(),
            member_count: health.member_count as u64,
            total_workload: health.total_workload,
            total_meeting_cost: health.total_meeting_cost,
            avg_messages: health.avg_messages,
            after_hours_percentage: health.after_hours_percentage,
        }),
        workload: report
            .workload
            .into_iter()
            .map(|row| WorkloadItem {
                member_id: row.member_id.to_string(),
                member_name: row.member_name,
                total_workload: row.total_workload,
                task_count: row.task_count,
            })
            .collect(),
        meeting_costs: report
            .meeting_costs
            .into_iter()
            .map(|row| MeetingCostItem {
                meeting_id: row.meeting_id.to_string(),
                title: row.title,
                cost: row.cost,
                duration: row.duration,
                participants: row.participants,
            })
            .collect(),
        communication: report
            .communication
            .into_iter()
            .map(|row| CommunicationItem {
                member_id: row.member_id.to_string(),
                member_name: row.member_name,
                messages_per_day: row.messages_per_day,
                after_hours_percentage: row.after_hours_percentage,
            })
            .collect(),
    }
}
