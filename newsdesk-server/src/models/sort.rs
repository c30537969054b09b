//! Sort field and direction allow-lists
//!
//! Column names and sort keywords cannot be bound as query parameters, so
//! ORDER BY is the one place SQL is assembled from request input. Only the
//! `&'static str` values returned by [`ArticleSort::column`],
//! [`CommentSort::column`] and [`SortOrder::as_sql`] ever reach the query
//! text; anything outside the allow-lists is rejected, never escaped.

use super::ValidationError;

/// Treat `?sort_by=` the same as no parameter at all.
fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse `order`, case-insensitively. Absent means DESC.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        match non_empty(raw) {
            None => Ok(Self::default()),
            Some(s) if s.eq_ignore_ascii_case("asc") => Ok(Self::Asc),
            Some(s) if s.eq_ignore_ascii_case("desc") => Ok(Self::Desc),
            Some(s) => Err(ValidationError::InvalidOrder { value: s.to_owned() }),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sortable article columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleSort {
    #[default]
    CreatedAt,
    Votes,
    Title,
    Author,
    Topic,
    ArticleId,
    ArticleImgUrl,
}

impl ArticleSort {
    pub const ALL: [Self; 7] = [
        Self::CreatedAt,
        Self::Votes,
        Self::Title,
        Self::Author,
        Self::Topic,
        Self::ArticleId,
        Self::ArticleImgUrl,
    ];

    /// Parse `sort_by` (exact match). Absent means `created_at`.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let Some(s) = non_empty(raw) else {
            return Ok(Self::default());
        };

        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidSort { value: s.to_owned() })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Votes => "votes",
            Self::Title => "title",
            Self::Author => "author",
            Self::Topic => "topic",
            Self::ArticleId => "article_id",
            Self::ArticleImgUrl => "article_img_url",
        }
    }

    /// Qualified column for the `articles a` alias used by the listing query.
    pub fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "a.created_at",
            Self::Votes => "a.votes",
            Self::Title => "a.title",
            Self::Author => "a.author",
            Self::Topic => "a.topic",
            Self::ArticleId => "a.article_id",
            Self::ArticleImgUrl => "a.article_img_url",
        }
    }
}

/// Sortable comment columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSort {
    CommentId,
    Votes,
    #[default]
    CreatedAt,
    Author,
    Body,
}

impl CommentSort {
    pub const ALL: [Self; 5] = [
        Self::CommentId,
        Self::Votes,
        Self::CreatedAt,
        Self::Author,
        Self::Body,
    ];

    /// Parse `sort_by` (exact match). Absent means `created_at`.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let Some(s) = non_empty(raw) else {
            return Ok(Self::default());
        };

        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidSort { value: s.to_owned() })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CommentId => "comment_id",
            Self::Votes => "votes",
            Self::CreatedAt => "created_at",
            Self::Author => "author",
            Self::Body => "body",
        }
    }

    /// Column in the unaliased `comments` table.
    pub fn column(self) -> &'static str {
        self.as_str()
    }
}
