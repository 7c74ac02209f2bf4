use chrono::NaiveDate;
use rusqlite::Connection;
use team_insight_core::db::open_db_in_memory;
use team_insight_core::{
    CommunicationRecord, CommunicationRepository, Meeting, MeetingRepository, Member,
    MemberRepository, ModelValidationError, NewCommunication, NewMeeting, NewMember, NewTask,
    QueryKey, RepoError, SqliteTeamRepository, Task, TaskRepository, TeamDataService, Urgency,
};
use uuid::Uuid;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

#[test]
fn member_create_get_and_list_by_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeamRepository::new(&conn);

    let zoe = Member::new("zoe");
    let ada = Member::new("Ada");
    let mut bob = Member::new("Bob");
    bob.user_id = Some("auth-bob".to_string());
    for member in [&zoe, &ada, &bob] {
        repo.create_member(member).unwrap();
    }

    let loaded = repo.get_member(bob.id).unwrap().unwrap();
    assert_eq!(loaded, bob);
    assert!(repo.get_member(Uuid::new_v4()).unwrap().is_none());

    let names: Vec<String> = repo
        .list_members()
        .unwrap()
        .into_iter()
        .map(|member| member.name)
        .collect();
    assert_eq!(names, vec!["Ada", "Bob", "zoe"]);
}

#[test]
fn blank_member_name_is_rejected_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeamRepository::new(&conn);

    let err = repo.create_member(&Member::new("   ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ModelValidationError::EmptyName)
    ));
    assert_eq!(count_rows(&conn, "members"), 0);
}

#[test]
fn task_requires_existing_member() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeamRepository::new(&conn);

    let ghost = Uuid::new_v4();
    let err = repo
        .create_task(&Task::new(ghost, "write report", Urgency::High))
        .unwrap_err();
    match err {
        RepoError::MemberNotFound(id) => assert_eq!(id, ghost),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(count_rows(&conn, "tasks"), 0);
}

#[test]
fn tasks_list_with_member_names() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeamRepository::new(&conn);
    let ada = Member::new("Ada");
    repo.create_member(&ada).unwrap();

    let mut older = Task::new(ada.id, "triage", Urgency::Low);
    older.created_at = 1_000;
    let mut newer = Task::new(ada.id, "release", Urgency::High);
    newer.created_at = 2_000;
    repo.create_task(&older).unwrap();
    repo.create_task(&newer).unwrap();

    let listed = repo.list_tasks_with_members().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].task, newer);
    assert_eq!(listed[1].task, older);
    assert!(listed
        .iter()
        .all(|item| item.member_name.as_deref() == Some("Ada")));

    assert_eq!(repo.get_task(older.id).unwrap(), Some(older));
}

#[test]
fn meetings_validate_counts_and_list_most_recent_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeamRepository::new(&conn);

    let err = repo
        .create_meeting(&Meeting::new("planning", 0, 4, date(1)))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ModelValidationError::InvalidDuration(0))
    ));
    let err = repo
        .create_meeting(&Meeting::new("planning", 30, 0, date(1)))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ModelValidationError::InvalidParticipants(0))
    ));

    let early = Meeting::new("kickoff", 60, 6, date(1));
    let late = Meeting::new("retro", 45, 5, date(20));
    repo.create_meeting(&early).unwrap();
    repo.create_meeting(&late).unwrap();

    let titles: Vec<String> = repo
        .list_meetings()
        .unwrap()
        .into_iter()
        .map(|meeting| meeting.title)
        .collect();
    assert_eq!(titles, vec!["retro", "kickoff"]);
    assert_eq!(repo.get_meeting(late.id).unwrap().unwrap().meeting_date, date(20));
}

#[test]
fn communication_roundtrips_flag_and_date() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeamRepository::new(&conn);
    let ada = Member::new("Ada");
    repo.create_member(&ada).unwrap();

    let record = CommunicationRecord::new(ada.id, 120, true, date(5));
    repo.create_communication(&record).unwrap();

    let loaded = repo.get_communication(record.id).unwrap().unwrap();
    assert_eq!(loaded, record);

    let listed = repo.list_communication_with_members().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].member_name.as_deref(), Some("Ada"));
    assert!(listed[0].record.after_hours);
}

#[test]
fn deleting_member_cascades_to_tasks_and_communication() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeamRepository::new(&conn);
    let ada = Member::new("Ada");
    let bob = Member::new("Bob");
    repo.create_member(&ada).unwrap();
    repo.create_member(&bob).unwrap();
    repo.create_task(&Task::new(ada.id, "a", Urgency::Medium))
        .unwrap();
    repo.create_task(&Task::new(bob.id, "b", Urgency::Low))
        .unwrap();
    repo.create_communication(&CommunicationRecord::new(ada.id, 10, false, date(2)))
        .unwrap();

    repo.delete_member(ada.id).unwrap();

    assert_eq!(count_rows(&conn, "members"), 1);
    let tasks = repo.list_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].member_id, bob.id);
    assert!(repo.list_communication().unwrap().is_empty());
}

#[test]
fn deleting_unknown_record_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeamRepository::new(&conn);

    let missing = Uuid::new_v4();
    assert!(matches!(repo.delete_meeting(missing), Err(RepoError::NotFound(id)) if id == missing));
    assert!(matches!(
        repo.delete_communication(missing),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn corrupted_urgency_surfaces_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeamRepository::new(&conn);
    let ada = Member::new("Ada");
    repo.create_member(&ada).unwrap();
    let task = Task::new(ada.id, "fix", Urgency::High);
    repo.create_task(&task).unwrap();

    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         UPDATE tasks SET urgency = 'Urgent';",
    )
    .unwrap();

    let err = repo.get_task(task.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn service_trims_input_and_reports_stale_keys() {
    let conn = open_db_in_memory().unwrap();
    let mut service = TeamDataService::new(SqliteTeamRepository::new(&conn));

    let ada = service
        .add_member(NewMember {
            name: "  Ada  ".to_string(),
            user_id: Some("   ".to_string()),
        })
        .unwrap();
    assert_eq!(ada.name, "Ada");
    assert_eq!(ada.user_id, None);
    assert_eq!(
        service.take_stale(),
        vec![
            QueryKey::Members,
            QueryKey::Tasks,
            QueryKey::Communication,
            QueryKey::Workload,
            QueryKey::CommunicationSummary,
            QueryKey::TeamHealth,
        ]
    );

    service
        .add_meeting(NewMeeting {
            title: "sync".to_string(),
            duration: 30,
            participants: 5,
            meeting_date: Some(date(15)),
        })
        .unwrap();
    assert_eq!(
        service.take_stale(),
        vec![QueryKey::Meetings, QueryKey::MeetingCosts, QueryKey::TeamHealth]
    );
    assert!(service.take_stale().is_empty());
}

#[test]
fn service_failed_writes_mark_nothing_stale() {
    let conn = open_db_in_memory().unwrap();
    let mut service = TeamDataService::new(SqliteTeamRepository::new(&conn));

    let err = service
        .add_task(NewTask {
            member_id: Uuid::new_v4(),
            title: "orphan".to_string(),
            urgency: Urgency::Low,
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::MemberNotFound(_)));
    assert!(service.delete_task(Uuid::new_v4()).is_err());
    assert!(service.take_stale().is_empty());
}

#[test]
fn service_defaults_communication_date_to_today() {
    let conn = open_db_in_memory().unwrap();
    let mut service = TeamDataService::new(SqliteTeamRepository::new(&conn));
    let ada = service
        .add_member(NewMember {
            name: "Ada".to_string(),
            user_id: None,
        })
        .unwrap();

    let before = chrono::Utc::now().date_naive();
    let record = service
        .add_communication(NewCommunication {
            member_id: ada.id,
            messages_per_day: 80,
            after_hours: false,
            recorded_date: None,
        })
        .unwrap();
    let after = chrono::Utc::now().date_naive();

    assert!(record.recorded_date >= before && record.recorded_date <= after);
    let listed = service.list_communication().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].record.id, record.id);
}

fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
