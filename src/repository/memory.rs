//! In-process repositories for tests and local experiments.
//!
//! They honour the same contracts as the Postgres implementations, with one
//! exception: there are no referenced tables, so every reference resolves
//! unless its target id was registered as missing via
//! [`InMemoryLectureRepository::forget_target`].

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::modules::lectures::sort::LectureSort;
use crate::modules::lectures::specification::LectureSpecification;
use crate::repository::lectures::{LectureLink, LectureRepository};
use crate::repository::users::{CredentialStore, NewUser, duplicate_user};
use sno_core::AppError;
use sno_models::{CreateLectureDto, Lecture, LectureId, UpdateLectureDto, User, UserCredentials, UserId};

#[derive(Debug)]
pub struct InMemoryLectureRepository {
    rows: RwLock<BTreeMap<LectureId, Lecture>>,
    missing_targets: RwLock<HashSet<(&'static str, i64)>>,
    next_id: AtomicI64,
}

impl Default for InMemoryLectureRepository {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            missing_targets: RwLock::new(HashSet::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryLectureRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `lecture` as-is, keeping its id.
    pub async fn seed(&self, lecture: Lecture) {
        self.next_id.fetch_max(lecture.id.get() + 1, Ordering::SeqCst);
        self.rows.write().await.insert(lecture.id, lecture);
    }

    /// Makes later relinks to this target behave as if the row did not exist.
    pub async fn forget_target(&self, link: LectureLink) {
        self.missing_targets
            .write()
            .await
            .insert((link.table(), link.target()));
    }
}

/// `id` unless it was registered as missing from `table`.
fn resolve<T>(missing: &HashSet<(&'static str, i64)>, table: &'static str, id: Option<T>) -> Option<T>
where
    T: Copy + Into<i64>,
{
    id.filter(|target| !missing.contains(&(table, (*target).into())))
}

#[async_trait]
impl LectureRepository for InMemoryLectureRepository {
    async fn find_matching(
        &self,
        spec: &LectureSpecification,
        sort: LectureSort,
    ) -> Result<Vec<Lecture>, AppError> {
        let mut lectures: Vec<Lecture> = self
            .rows
            .read()
            .await
            .values()
            .filter(|l| spec.matches(l))
            .cloned()
            .collect();
        sort.apply(&mut lectures);
        Ok(lectures)
    }

    async fn find_page(&self, limit: i64, offset: i64) -> Result<(Vec<Lecture>, i64), AppError> {
        let rows = self.rows.read().await;
        let page = rows
            .values()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect();
        Ok((page, rows.len() as i64))
    }

    async fn find_by_id(&self, id: LectureId) -> Result<Option<Lecture>, AppError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, dto: CreateLectureDto) -> Result<Lecture, AppError> {
        let missing = self.missing_targets.read().await;
        let lecture = Lecture {
            id: LectureId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            course_id: resolve(&missing, "courses", dto.course_id),
            lecturer_id: resolve(&missing, "users", dto.lecturer_id),
            title: dto.title,
            description: dto.description,
            date: dto.date,
            summary_id: resolve(&missing, "summaries", dto.summary_id),
            forum_id: resolve(&missing, "forums", dto.forum_id),
            file_id: resolve(&missing, "files", dto.file_id),
        };
        drop(missing);
        self.rows.write().await.insert(lecture.id, lecture.clone());
        Ok(lecture)
    }

    async fn update(
        &self,
        id: LectureId,
        dto: UpdateLectureDto,
    ) -> Result<Option<Lecture>, AppError> {
        let missing = self.missing_targets.read().await;
        let mut rows = self.rows.write().await;
        let Some(lecture) = rows.get_mut(&id) else {
            return Ok(None);
        };

        lecture.title = dto.title;
        lecture.description = dto.description;
        lecture.date = dto.date;
        if dto.lecturer_id.is_some() {
            lecture.lecturer_id = resolve(&missing, "users", dto.lecturer_id);
        }
        if dto.summary_id.is_some() {
            lecture.summary_id = resolve(&missing, "summaries", dto.summary_id);
        }
        if dto.forum_id.is_some() {
            lecture.forum_id = resolve(&missing, "forums", dto.forum_id);
        }
        if dto.file_id.is_some() {
            lecture.file_id = resolve(&missing, "files", dto.file_id);
        }

        Ok(Some(lecture.clone()))
    }

    async fn delete(&self, id: LectureId) -> Result<bool, AppError> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn set_description(
        &self,
        id: LectureId,
        description: String,
    ) -> Result<Option<Lecture>, AppError> {
        let mut rows = self.rows.write().await;
        Ok(rows.get_mut(&id).map(|lecture| {
            lecture.description = description;
            lecture.clone()
        }))
    }

    async fn relink(&self, id: LectureId, link: LectureLink) -> Result<Option<Lecture>, AppError> {
        let exists = !self
            .missing_targets
            .read()
            .await
            .contains(&(link.table(), link.target()));

        let mut rows = self.rows.write().await;
        Ok(rows.get_mut(&id).map(|lecture| {
            match link {
                LectureLink::Course(target) => lecture.course_id = exists.then_some(target),
                LectureLink::Lecturer(target) => lecture.lecturer_id = exists.then_some(target),
                LectureLink::File(target) => lecture.file_id = exists.then_some(target),
                LectureLink::Forum(target) => lecture.forum_id = exists.then_some(target),
            }
            lecture.clone()
        }))
    }
}

#[derive(Debug)]
pub struct InMemoryCredentialStore {
    users: RwLock<Vec<UserCredentials>>,
    next_id: AtomicI64,
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<UserCredentials>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|c| c.user.login == login)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|c| c.user.login == new_user.login || c.user.email == new_user.email)
        {
            return Err(duplicate_user());
        }

        let user = User {
            id: UserId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            login: new_user.login,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
        };
        users.push(UserCredentials {
            user: user.clone(),
            password_hash: new_user.password_hash,
        });
        Ok(user)
    }
}
