//! PostgreSQL-backed `ReviewRepository` implementation using Diesel ORM.
//!
//! `optional_reviews` has no foreign key to `reviews`, so the delete path
//! removes children explicitly before the parent. Comments cascade.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{
    AddCommentOutcome, CreateReviewOutcome, ReviewRepository, ReviewRepositoryError,
};
use crate::domain::{
    Comment, CommentId, GameId, NewComment, NewOptionalReview, NewReview, OptionalReview,
    OptionalReviewId, Review, ReviewDeletion, ReviewEdit, ReviewId, UserId,
};

use super::diesel_error_mapping::{game_exists, port_error_mappers, review_exists, user_exists};
use super::models::{
    CommentRow, NewCommentRow, NewOptionalReviewRow, NewReviewRow, OptionalReviewRow, ReviewRow,
    ReviewUpdate,
};
use super::pool::DbPool;
use super::schema::{comments, optional_reviews, reviews};

port_error_mappers!(ReviewRepositoryError);

/// Diesel-backed implementation of the [`ReviewRepository`] port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn row_to_optional_review(row: OptionalReviewRow) -> OptionalReview {
    OptionalReview {
        aspect: row.review_name,
        score: row.optional_rating,
    }
}

fn row_to_comment(row: CommentRow) -> Comment {
    Comment {
        id: CommentId::new(row.comment_id),
        review_id: ReviewId::new(row.review_id),
        user_id: UserId::new(row.user_id),
        text: row.text,
        updated_at: row.updated_at,
    }
}

fn optional_rows(review_id: i32, optional: &[NewOptionalReview]) -> Vec<NewOptionalReviewRow<'_>> {
    optional
        .iter()
        .map(|item| NewOptionalReviewRow {
            review_name: item.aspect.as_str(),
            optional_rating: item.score.get(),
            review_id,
        })
        .collect()
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn create(
        &self,
        review: &NewReview,
    ) -> Result<CreateReviewOutcome, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewReviewRow {
            score: review.score.get(),
            text: review.text.as_str(),
            published: review.published,
            user_id: review.user_id.get(),
            game_id: review.game_id.get(),
        };
        let optional = review.optional_reviews.as_slice();

        conn.transaction(|conn| {
            async move {
                if !user_exists(conn, row.user_id).await? {
                    return Ok(CreateReviewOutcome::UserMissing);
                }
                if !game_exists(conn, row.game_id).await? {
                    return Ok(CreateReviewOutcome::GameMissing);
                }
                let review_id: i32 = diesel::insert_into(reviews::table)
                    .values(&row)
                    .returning(reviews::id)
                    .get_result(conn)
                    .await?;
                let children = optional_rows(review_id, optional);
                if !children.is_empty() {
                    diesel::insert_into(optional_reviews::table)
                        .values(&children)
                        .execute(conn)
                        .await?;
                }
                Ok(CreateReviewOutcome::Created(ReviewId::new(review_id)))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find(&self, review_id: ReviewId) -> Result<Option<Review>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let found: Option<(ReviewRow, Vec<OptionalReviewRow>)> = conn
            .transaction(|conn| {
                async move {
                    let row: Option<ReviewRow> = reviews::table
                        .find(review_id.get())
                        .select(ReviewRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(row) = row else {
                        return Ok(None);
                    };
                    let children: Vec<OptionalReviewRow> = optional_reviews::table
                        .filter(optional_reviews::review_id.eq(row.id))
                        .order_by(optional_reviews::id)
                        .select(OptionalReviewRow::as_select())
                        .load(conn)
                        .await?;
                    Ok(Some((row, children)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(found.map(|(row, children)| Review {
            id: ReviewId::new(row.id),
            user_id: UserId::new(row.user_id),
            game_id: GameId::new(row.game_id),
            score: row.score,
            text: row.text,
            published: row.published,
            updated_at: row.updated_at,
            optional_reviews: children.into_iter().map(row_to_optional_review).collect(),
        }))
    }

    async fn update(
        &self,
        review_id: ReviewId,
        edit: &ReviewEdit,
    ) -> Result<bool, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = ReviewUpdate {
            score: edit.score.get(),
            text: edit.text.as_str(),
            published: edit.published,
        };

        let updated: usize = conn
            .transaction(|conn| {
                async move {
                    diesel::update(reviews::table.find(review_id.get()))
                        .set(&update)
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn add_optional(
        &self,
        review_id: ReviewId,
        optional: &NewOptionalReview,
    ) -> Result<Option<OptionalReviewId>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewOptionalReviewRow {
            review_name: optional.aspect.as_str(),
            optional_rating: optional.score.get(),
            review_id: review_id.get(),
        };

        let id: Option<i32> = conn
            .transaction(|conn| {
                async move {
                    if !review_exists(conn, row.review_id).await? {
                        return Ok(None);
                    }
                    let id = diesel::insert_into(optional_reviews::table)
                        .values(&row)
                        .returning(optional_reviews::id)
                        .get_result(conn)
                        .await?;
                    Ok(Some(id))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(id.map(OptionalReviewId::new))
    }

    async fn add_comment(
        &self,
        review_id: ReviewId,
        comment: &NewComment,
    ) -> Result<AddCommentOutcome, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCommentRow {
            review_id: review_id.get(),
            user_id: comment.user_id.get(),
            text: comment.text.as_str(),
        };

        conn.transaction(|conn| {
            async move {
                if !review_exists(conn, row.review_id).await? {
                    return Ok(AddCommentOutcome::ReviewMissing);
                }
                if !user_exists(conn, row.user_id).await? {
                    return Ok(AddCommentOutcome::UserMissing);
                }
                let id: i32 = diesel::insert_into(comments::table)
                    .values(&row)
                    .returning(comments::comment_id)
                    .get_result(conn)
                    .await?;
                Ok(AddCommentOutcome::Added(CommentId::new(id)))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn comments(
        &self,
        review_id: ReviewId,
    ) -> Result<Option<Vec<Comment>>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Option<Vec<CommentRow>> = conn
            .transaction(|conn| {
                async move {
                    if !review_exists(conn, review_id.get()).await? {
                        return Ok(None);
                    }
                    let rows = comments::table
                        .filter(comments::review_id.eq(review_id.get()))
                        .order_by((comments::updated_at.asc(), comments::comment_id.asc()))
                        .select(CommentRow::as_select())
                        .load(conn)
                        .await?;
                    Ok(Some(rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.map(|rows| rows.into_iter().map(row_to_comment).collect()))
    }

    async fn delete_with_optional_reviews(
        &self,
        review_id: ReviewId,
    ) -> Result<ReviewDeletion, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let optional_reviews_deleted = diesel::delete(
                    optional_reviews::table
                        .filter(optional_reviews::review_id.eq(review_id.get())),
                )
                .execute(conn)
                .await?;
                let reviews_deleted = diesel::delete(reviews::table.find(review_id.get()))
                    .execute(conn)
                    .await?;
                Ok(ReviewDeletion {
                    review_deleted: reviews_deleted > 0,
                    optional_reviews_deleted,
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
