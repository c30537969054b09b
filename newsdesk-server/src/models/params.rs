//! Query string parameters for listing endpoints

use serde::Deserialize;

/// `GET /api/articles` query parameters, unvalidated
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleListParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub topic: Option<String>,
}

impl ArticleListParams {
    /// Topic filter; an empty `?topic=` means no filter.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref().filter(|t| !t.is_empty())
    }
}

/// `GET /api/articles/{id}/comments` query parameters, unvalidated
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentListParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_topic_is_no_filter() {
        let params = ArticleListParams {
            topic: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(params.topic(), None);

        let params = ArticleListParams {
            topic: Some("cats".into()),
            ..Default::default()
        };
        assert_eq!(params.topic(), Some("cats"));
    }
}
