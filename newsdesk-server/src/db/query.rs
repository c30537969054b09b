//! SQL composition for the listing endpoints
//!
//! Values from the request (topic, ids) are always bound. The only
//! interpolated fragments are the allow-listed column and direction
//! strings from [`crate::models::sort`].

use sqlx::{Postgres, QueryBuilder};

use crate::models::{
    ArticleListParams, ArticleSort, CommentListParams, CommentSort, SortOrder, ValidationError,
};

/// Article columns shared by every article projection, minus `body`
const ARTICLE_SUMMARY_COLUMNS: &str = "a.article_id, a.title, a.topic, a.author, \
     a.created_at, a.votes, a.article_img_url";

/// Comment count per article. LEFT JOIN keeps articles without comments at 0.
const COMMENT_COUNT_JOIN: &str = "COUNT(c.comment_id)::BIGINT AS comment_count \
     FROM articles a \
     LEFT JOIN comments c ON c.article_id = a.article_id";

/// Validated article listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleListQuery<'a> {
    pub sort: ArticleSort,
    pub order: SortOrder,
    pub topic: Option<&'a str>,
}

impl<'a> ArticleListQuery<'a> {
    /// Validate raw query parameters. No SQL is built for invalid input.
    pub fn from_params(params: &'a ArticleListParams) -> Result<Self, ValidationError> {
        Ok(Self {
            sort: ArticleSort::parse(params.sort_by.as_deref())?,
            order: SortOrder::parse(params.order.as_deref())?,
            topic: params.topic(),
        })
    }

    /// Build the listing query: one row per article with its comment count.
    pub fn build(&self) -> QueryBuilder<'a, Postgres> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(ARTICLE_SUMMARY_COLUMNS);
        qb.push(", ");
        qb.push(COMMENT_COUNT_JOIN);

        if let Some(topic) = self.topic {
            qb.push(" WHERE LOWER(a.topic) = LOWER(");
            qb.push_bind(topic);
            qb.push(")");
        }

        qb.push(" GROUP BY a.article_id");
        push_order_by(&mut qb, self.sort.column(), self.order);

        // Equal sort keys would otherwise come back in arbitrary order
        if self.sort != ArticleSort::ArticleId {
            qb.push(", a.article_id ");
            qb.push(self.order.as_sql());
        }

        qb
    }
}

/// Validated comment listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentListQuery {
    pub sort: CommentSort,
    pub order: SortOrder,
}

impl CommentListQuery {
    pub fn from_params(params: &CommentListParams) -> Result<Self, ValidationError> {
        Ok(Self {
            sort: CommentSort::parse(params.sort_by.as_deref())?,
            order: SortOrder::parse(params.order.as_deref())?,
        })
    }

    /// Build the per-article comment listing. The article id is bound.
    pub fn build<'a>(&self, article_id: i32) -> QueryBuilder<'a, Postgres> {
        let mut qb = QueryBuilder::new(
            "SELECT comment_id, article_id, body, votes, author, created_at \
             FROM comments WHERE article_id = ",
        );
        qb.push_bind(article_id);
        push_order_by(&mut qb, self.sort.column(), self.order);

        if self.sort != CommentSort::CommentId {
            qb.push(", comment_id ");
            qb.push(self.order.as_sql());
        }

        qb
    }
}

/// Single article with body and comment count.
pub(crate) fn article_detail_sql() -> String {
    format!(
        "SELECT {}, a.body, {} WHERE a.article_id = $1 GROUP BY a.article_id",
        ARTICLE_SUMMARY_COLUMNS, COMMENT_COUNT_JOIN
    )
}

fn push_order_by(qb: &mut QueryBuilder<'_, Postgres>, column: &'static str, order: SortOrder) {
    qb.push(" ORDER BY ");
    qb.push(column);
    qb.push(" ");
    qb.push(order.as_sql());
}
