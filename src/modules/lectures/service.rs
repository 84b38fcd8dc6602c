use anyhow::anyhow;
use tracing::{debug, instrument};

use super::sort::LectureSort;
use super::specification::{LectureCriteria, build};
use crate::metrics::track_lecture_query;
use crate::repository::{LectureLink, LectureRepository};
use sno_core::{AppError, PaginationParams};
use sno_models::{
    CreateLectureDto, Lecture, LectureFilterParams, LectureId, PaginatedLecturesResponse,
    UpdateLectureDto,
};

fn lecture_not_found(id: LectureId) -> AppError {
    AppError::not_found(anyhow!("Lecture with ID {} not found", id))
}

pub struct LectureService;

impl LectureService {
    #[instrument(skip(repo))]
    pub async fn get_lectures(
        repo: &dyn LectureRepository,
        pagination: PaginationParams,
    ) -> Result<PaginatedLecturesResponse, AppError> {
        let (data, total) = repo.find_page(pagination.size(), pagination.offset()).await?;
        track_lecture_query("page", data.len());

        Ok(PaginatedLecturesResponse {
            data,
            meta: pagination.meta(total),
        })
    }

    /// Lectures matching every usable criterion in `params`, sorted as
    /// requested. Criteria that do not parse are dropped, never rejected.
    #[instrument(skip(repo))]
    pub async fn find_filtered(
        repo: &dyn LectureRepository,
        params: LectureFilterParams,
    ) -> Result<Vec<Lecture>, AppError> {
        let criteria = LectureCriteria::from_params(&params);
        let spec = build(&criteria);
        let sort = LectureSort::from_params(params.sort_by.as_deref(), params.sort_direction.as_deref());
        debug!(?criteria, ?sort, "Running filtered lecture query");

        let lectures = repo.find_matching(&spec, sort).await?;
        track_lecture_query("filter", lectures.len());
        Ok(lectures)
    }

    #[instrument(skip(repo))]
    pub async fn get_lecture(repo: &dyn LectureRepository, id: LectureId) -> Result<Lecture, AppError> {
        repo.find_by_id(id).await?.ok_or_else(|| lecture_not_found(id))
    }

    #[instrument(skip(repo, dto))]
    pub async fn create_lecture(
        repo: &dyn LectureRepository,
        dto: CreateLectureDto,
    ) -> Result<Lecture, AppError> {
        repo.insert(dto).await
    }

    #[instrument(skip(repo, dto))]
    pub async fn update_lecture(
        repo: &dyn LectureRepository,
        id: LectureId,
        dto: UpdateLectureDto,
    ) -> Result<Lecture, AppError> {
        repo.update(id, dto).await?.ok_or_else(|| lecture_not_found(id))
    }

    #[instrument(skip(repo))]
    pub async fn delete_lecture(repo: &dyn LectureRepository, id: LectureId) -> Result<(), AppError> {
        if repo.delete(id).await? {
            Ok(())
        } else {
            Err(lecture_not_found(id))
        }
    }

    #[instrument(skip(repo, description))]
    pub async fn update_description(
        repo: &dyn LectureRepository,
        id: LectureId,
        description: String,
    ) -> Result<Lecture, AppError> {
        repo.set_description(id, description)
            .await?
            .ok_or_else(|| lecture_not_found(id))
    }

    #[instrument(skip(repo))]
    pub async fn relink(
        repo: &dyn LectureRepository,
        id: LectureId,
        link: LectureLink,
    ) -> Result<Lecture, AppError> {
        let lecture = repo.relink(id, link).await?.ok_or_else(|| lecture_not_found(id))?;
        if link_target_missing(&lecture, link) {
            debug!(column = link.column(), target = link.target(), "Link target missing, reference cleared");
        }
        Ok(lecture)
    }
}

fn link_target_missing(lecture: &Lecture, link: LectureLink) -> bool {
    match link {
        LectureLink::Course(_) => lecture.course_id.is_none(),
        LectureLink::Lecturer(_) => lecture.lecturer_id.is_none(),
        LectureLink::File(_) => lecture.file_id.is_none(),
        LectureLink::Forum(_) => lecture.forum_id.is_none(),
    }
}
