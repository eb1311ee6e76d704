use crate::domain::errors::DomainError;

const CNT_POST_SLUG: &str = "posts_slug_key";
const CNT_PROJECT_SLUG: &str = "projects_slug_key";
const CNT_TAG_SLUG: &str = "tags_slug_key";
const CNT_TAG_NAME: &str = "tags_name_key";
const CNT_REVISION_VERSION: &str = "post_revisions_post_id_version_key";
const CNT_REVISION_POST: &str = "post_revisions_post_id_fkey";
const CNT_POST_TAG_POST: &str = "post_tags_post_id_fkey";
const CNT_POST_TAG_TAG: &str = "post_tags_tag_id_fkey";
const CNT_POST_TAG_PAIR: &str = "post_tags_pkey";
const CNT_POST_STATUS: &str = "posts_status_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_POST_SLUG | CNT_PROJECT_SLUG | CNT_TAG_SLUG => {
                        DomainError::SlugTaken(constraint.to_string())
                    }
                    CNT_REVISION_VERSION => DomainError::VersionTaken(constraint.to_string()),
                    CNT_TAG_NAME => DomainError::Conflict("tag name already exists".into()),
                    CNT_REVISION_POST | CNT_POST_TAG_POST => {
                        DomainError::NotFound("post not found".into())
                    }
                    CNT_POST_TAG_TAG => DomainError::NotFound("tag not found".into()),
                    CNT_POST_TAG_PAIR => DomainError::Conflict("tag listed twice".into()),
                    CNT_POST_STATUS => DomainError::Validation("unknown post status".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match &*code {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
