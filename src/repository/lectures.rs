use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use crate::modules::lectures::sort::LectureSort;
use crate::modules::lectures::specification::{LectureClause, LectureSpecification};
use sno_core::AppError;
use sno_models::{
    CourseId, CreateLectureDto, FileId, ForumId, Lecture, LectureId, UpdateLectureDto, UserId,
};

const LECTURE_COLUMNS: &str =
    "id, course_id, lecturer_id, title, description, date, summary_id, forum_id, file_id";

/// A single reference of a lecture that can be repointed on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LectureLink {
    Course(CourseId),
    Lecturer(UserId),
    File(FileId),
    Forum(ForumId),
}

impl LectureLink {
    pub fn column(&self) -> &'static str {
        match self {
            LectureLink::Course(_) => "course_id",
            LectureLink::Lecturer(_) => "lecturer_id",
            LectureLink::File(_) => "file_id",
            LectureLink::Forum(_) => "forum_id",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            LectureLink::Course(_) => "courses",
            LectureLink::Lecturer(_) => "users",
            LectureLink::File(_) => "files",
            LectureLink::Forum(_) => "forums",
        }
    }

    pub fn target(&self) -> i64 {
        match self {
            LectureLink::Course(id) => id.get(),
            LectureLink::Lecturer(id) => id.get(),
            LectureLink::File(id) => id.get(),
            LectureLink::Forum(id) => id.get(),
        }
    }
}

/// Lecture persistence.
///
/// Methods addressing a single lecture return `None`/`false` when it does not
/// exist and leave the 404 to the caller.
#[async_trait]
pub trait LectureRepository: Send + Sync {
    /// Every lecture matching `spec`, ordered by `sort`.
    async fn find_matching(
        &self,
        spec: &LectureSpecification,
        sort: LectureSort,
    ) -> Result<Vec<Lecture>, AppError>;

    /// One page ordered by id, plus the total row count.
    async fn find_page(&self, limit: i64, offset: i64) -> Result<(Vec<Lecture>, i64), AppError>;

    async fn find_by_id(&self, id: LectureId) -> Result<Option<Lecture>, AppError>;

    /// References to rows that do not exist are stored as null.
    async fn insert(&self, dto: CreateLectureDto) -> Result<Lecture, AppError>;

    /// Absent references keep their value; a reference to a row that does
    /// not exist is cleared.
    async fn update(&self, id: LectureId, dto: UpdateLectureDto)
    -> Result<Option<Lecture>, AppError>;

    async fn delete(&self, id: LectureId) -> Result<bool, AppError>;

    async fn set_description(
        &self,
        id: LectureId,
        description: String,
    ) -> Result<Option<Lecture>, AppError>;

    /// Points one reference at `link`'s target. A target that does not exist
    /// clears the reference instead.
    async fn relink(&self, id: LectureId, link: LectureLink) -> Result<Option<Lecture>, AppError>;
}

#[derive(Debug, Clone)]
pub struct PgLectureRepository {
    db: PgPool,
}

impl PgLectureRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Escapes `LIKE` metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Appends `WHERE ...` for every clause of `spec`, joined by AND.
fn push_specification(builder: &mut QueryBuilder<'_, Postgres>, spec: &LectureSpecification) {
    if spec.is_unconstrained() {
        return;
    }

    builder.push(" WHERE ");
    let mut conditions = builder.separated(" AND ");
    for clause in spec.clauses() {
        match clause {
            LectureClause::TitleContains(needle) => {
                conditions
                    .push("title ILIKE ")
                    .push_bind_unseparated(format!("%{}%", escape_like(needle)))
                    .push_unseparated(" ESCAPE '\\'");
            }
            LectureClause::LecturerIs(id) => {
                conditions.push("lecturer_id = ").push_bind_unseparated(*id);
            }
            LectureClause::DateFrom(from) => {
                conditions.push("date >= ").push_bind_unseparated(*from);
            }
            LectureClause::DateBefore(until) => {
                conditions.push("date < ").push_bind_unseparated(*until);
            }
            LectureClause::Dated => {
                conditions.push("date IS NOT NULL");
            }
        }
    }
}

#[async_trait]
impl LectureRepository for PgLectureRepository {
    #[instrument(skip(self))]
    async fn find_matching(
        &self,
        spec: &LectureSpecification,
        sort: LectureSort,
    ) -> Result<Vec<Lecture>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {LECTURE_COLUMNS} FROM lectures"));
        push_specification(&mut builder, spec);
        builder.push(" ORDER BY ").push(sort.order_by_sql());

        let lectures = builder
            .build_query_as::<Lecture>()
            .fetch_all(&self.db)
            .await?;

        Ok(lectures)
    }

    #[instrument(skip(self))]
    async fn find_page(&self, limit: i64, offset: i64) -> Result<(Vec<Lecture>, i64), AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lectures")
            .fetch_one(&self.db)
            .await?;

        let lectures = sqlx::query_as::<_, Lecture>(&format!(
            "SELECT {LECTURE_COLUMNS} FROM lectures ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok((lectures, total))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: LectureId) -> Result<Option<Lecture>, AppError> {
        let lecture = sqlx::query_as::<_, Lecture>(&format!(
            "SELECT {LECTURE_COLUMNS} FROM lectures WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(lecture)
    }

    #[instrument(skip(self, dto), fields(title = %dto.title))]
    async fn insert(&self, dto: CreateLectureDto) -> Result<Lecture, AppError> {
        let lecture = sqlx::query_as::<_, Lecture>(&format!(
            r#"
            INSERT INTO lectures (course_id, lecturer_id, title, description, date, summary_id, forum_id, file_id)
            VALUES (
                (SELECT id FROM courses WHERE id = $1),
                (SELECT id FROM users WHERE id = $2),
                $3,
                $4,
                $5,
                (SELECT id FROM summaries WHERE id = $6),
                (SELECT id FROM forums WHERE id = $7),
                (SELECT id FROM files WHERE id = $8)
            )
            RETURNING {LECTURE_COLUMNS}
            "#
        ))
        .bind(dto.course_id)
        .bind(dto.lecturer_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.date)
        .bind(dto.summary_id)
        .bind(dto.forum_id)
        .bind(dto.file_id)
        .fetch_one(&self.db)
        .await?;

        Ok(lecture)
    }

    #[instrument(skip(self, dto))]
    async fn update(
        &self,
        id: LectureId,
        dto: UpdateLectureDto,
    ) -> Result<Option<Lecture>, AppError> {
        let lecture = sqlx::query_as::<_, Lecture>(&format!(
            r#"
            UPDATE lectures
            SET title = $2,
                description = $3,
                date = $4,
                lecturer_id = CASE WHEN $5::BIGINT IS NULL THEN lecturer_id
                                   ELSE (SELECT id FROM users WHERE id = $5) END,
                summary_id = CASE WHEN $6::BIGINT IS NULL THEN summary_id
                                  ELSE (SELECT id FROM summaries WHERE id = $6) END,
                forum_id = CASE WHEN $7::BIGINT IS NULL THEN forum_id
                                ELSE (SELECT id FROM forums WHERE id = $7) END,
                file_id = CASE WHEN $8::BIGINT IS NULL THEN file_id
                               ELSE (SELECT id FROM files WHERE id = $8) END
            WHERE id = $1
            RETURNING {LECTURE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.date)
        .bind(dto.lecturer_id)
        .bind(dto.summary_id)
        .bind(dto.forum_id)
        .bind(dto.file_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(lecture)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: LectureId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM lectures WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, description))]
    async fn set_description(
        &self,
        id: LectureId,
        description: String,
    ) -> Result<Option<Lecture>, AppError> {
        let lecture = sqlx::query_as::<_, Lecture>(&format!(
            "UPDATE lectures SET description = $2 WHERE id = $1 RETURNING {LECTURE_COLUMNS}"
        ))
        .bind(id)
        .bind(description)
        .fetch_optional(&self.db)
        .await?;

        Ok(lecture)
    }

    #[instrument(skip(self))]
    async fn relink(&self, id: LectureId, link: LectureLink) -> Result<Option<Lecture>, AppError> {
        // Column and table names come from LectureLink, never from input.
        let sql = format!(
            "UPDATE lectures SET {column} = (SELECT id FROM {table} WHERE id = $2) \
             WHERE id = $1 RETURNING {LECTURE_COLUMNS}",
            column = link.column(),
            table = link.table(),
        );

        let lecture = sqlx::query_as::<_, Lecture>(&sql)
            .bind(id)
            .bind(link.target())
            .fetch_optional(&self.db)
            .await?;

        Ok(lecture)
    }
}
