//! Postgres-backed repositories against a throwaway database per test.
//!
//! Run with `DATABASE_URL` pointing at a server where the user may create
//! databases:
//!
//! ```bash
//! cargo test --test integration_pg_repository -- --ignored
//! ```

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use sqlx::PgPool;

use sno_api::modules::lectures::service::LectureService;
use sno_api::repository::{
    CredentialStore, LectureLink, LectureRepository, NewUser, PgCredentialStore,
    PgLectureRepository,
};
use sno_models::{
    CourseId, CreateLectureDto, FileId, ForumId, LectureFilterParams, LectureId, SummaryId,
    UpdateLectureDto, UserId,
};

fn new_user(login: &str) -> NewUser {
    NewUser {
        login: login.to_string(),
        email: format!("{login}@example.com"),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        password_hash: "$2b$04$notarealhashnotarealhashnotarealhashnotarealhas".to_string(),
    }
}

fn create(title: &str, lecturer: Option<UserId>, day: Option<(u32, u32, u32)>) -> CreateLectureDto {
    CreateLectureDto {
        course_id: None,
        lecturer_id: lecturer,
        title: title.to_string(),
        description: String::new(),
        date: day.map(|(m, d, h)| Utc.with_ymd_and_hms(2024, m, d, h, 0, 0).unwrap()),
        summary_id: None,
        forum_id: None,
        file_id: None,
    }
}

/// Two lecturers and five lectures, one of them undated.
async fn seed(pool: &PgPool) -> (PgLectureRepository, UserId, UserId) {
    let users = PgCredentialStore::new(pool.clone());
    let ivanov = users.create(new_user("ivanov")).await.unwrap().id;
    let petrov = users.create(new_user("petrov")).await.unwrap().id;

    let repo = PgLectureRepository::new(pool.clone());
    for dto in [
        create("Intro to Rust", Some(ivanov), Some((1, 10, 9))),
        create("Advanced Rust", Some(petrov), Some((2, 1, 0))),
        create("Intro to Databases", Some(petrov), Some((2, 29, 23))),
        create("Networks", Some(ivanov), None),
        create("Compilers", None, Some((3, 1, 12))),
    ] {
        repo.insert(dto).await.unwrap();
    }

    (repo, ivanov, petrov)
}

async fn titles(repo: &PgLectureRepository, params: LectureFilterParams) -> Vec<String> {
    LectureService::find_filtered(repo, params)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.title)
        .collect()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_filter_and_sort_in_sql(pool: PgPool) {
    let (repo, _, petrov) = seed(&pool).await;

    assert_eq!(
        titles(&repo, LectureFilterParams::default()).await,
        [
            "Advanced Rust",
            "Compilers",
            "Intro to Databases",
            "Intro to Rust",
            "Networks"
        ]
    );

    let by_title_and_lecturer = LectureFilterParams {
        title: Some("intro".to_string()),
        lecturer_id: Some(petrov.to_string()),
        ..Default::default()
    };
    assert_eq!(titles(&repo, by_title_and_lecturer).await, ["Intro to Databases"]);

    let february = LectureFilterParams {
        start_date: Some("2024-02-01".to_string()),
        end_date: Some("2024-02-29".to_string()),
        ..Default::default()
    };
    assert_eq!(
        titles(&repo, february).await,
        ["Advanced Rust", "Intro to Databases"]
    );

    let newest_first = LectureFilterParams {
        sort_by: Some("date".to_string()),
        sort_direction: Some("desc".to_string()),
        ..Default::default()
    };
    assert_eq!(
        titles(&repo, newest_first).await,
        [
            "Compilers",
            "Intro to Databases",
            "Advanced Rust",
            "Intro to Rust",
            "Networks"
        ]
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_like_wildcards_in_title_are_literal(pool: PgPool) {
    let repo = PgLectureRepository::new(pool);
    repo.insert(create("100% Rust", None, None)).await.unwrap();
    repo.insert(create("1000 Rust tips", None, None)).await.unwrap();
    repo.insert(create("snake_case", None, None)).await.unwrap();
    repo.insert(create("snakeXcase", None, None)).await.unwrap();

    let percent = LectureFilterParams {
        title: Some("0%".to_string()),
        ..Default::default()
    };
    assert_eq!(titles(&repo, percent).await, ["100% Rust"]);

    let underscore = LectureFilterParams {
        title: Some("e_c".to_string()),
        ..Default::default()
    };
    assert_eq!(titles(&repo, underscore).await, ["snake_case"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_relink_to_missing_row_sets_null(pool: PgPool) {
    let (repo, ivanov, petrov) = seed(&pool).await;
    let first = LectureId(1);

    let moved = repo
        .relink(first, LectureLink::Lecturer(petrov))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.lecturer_id, Some(petrov));

    let cleared = repo
        .relink(first, LectureLink::Forum(ForumId(404)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.forum_id, None);
    assert_eq!(cleared.lecturer_id, Some(petrov));

    assert!(
        repo.relink(LectureId(999), LectureLink::Lecturer(ivanov))
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_keeps_absent_links(pool: PgPool) {
    let (repo, ivanov, _) = seed(&pool).await;

    let updated = repo
        .update(
            LectureId(1),
            UpdateLectureDto {
                title: "Intro to Rust, revised".to_string(),
                description: "Second edition".to_string(),
                date: None,
                lecturer_id: None,
                summary_id: None,
                forum_id: None,
                file_id: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Intro to Rust, revised");
    assert_eq!(updated.date, None);
    assert_eq!(updated.lecturer_id, Some(ivanov));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_page_and_delete(pool: PgPool) {
    let (repo, _, _) = seed(&pool).await;

    let (page, total) = repo.find_page(2, 2).await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(
        page.iter().map(|l| l.id).collect::<Vec<_>>(),
        [LectureId(3), LectureId(4)]
    );

    assert!(repo.delete(LectureId(3)).await.unwrap());
    assert!(!repo.delete(LectureId(3)).await.unwrap());
    assert!(repo.find_by_id(LectureId(3)).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_login_is_bad_request(pool: PgPool) {
    let users = PgCredentialStore::new(pool);
    users.create(new_user("ivanov")).await.unwrap();

    let err = users.create(new_user("ivanov")).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);

    let stored = users.find_by_login("ivanov").await.unwrap().unwrap();
    assert_eq!(stored.user.email, "ivanov@example.com");
    assert!(users.find_by_login("petrov").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_unknown_references_are_stored_as_null(pool: PgPool) {
    let (repo, ivanov, _) = seed(&pool).await;

    let created = repo
        .insert(CreateLectureDto {
            course_id: Some(CourseId(999)),
            forum_id: Some(ForumId(999)),
            file_id: Some(FileId(999)),
            summary_id: Some(SummaryId(999)),
            ..create("Orphan", Some(ivanov), None)
        })
        .await
        .unwrap();
    assert_eq!(created.course_id, None);
    assert_eq!(created.forum_id, None);
    assert_eq!(created.file_id, None);
    assert_eq!(created.summary_id, None);
    assert_eq!(created.lecturer_id, Some(ivanov));

    let updated = repo
        .update(
            created.id,
            UpdateLectureDto {
                title: "Orphan".to_string(),
                description: String::new(),
                date: None,
                lecturer_id: Some(UserId(999)),
                summary_id: None,
                forum_id: None,
                file_id: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.lecturer_id, None);
}
