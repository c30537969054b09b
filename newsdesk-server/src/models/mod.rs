//! Request models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic, and never reaches SQL.

pub mod validation;
pub mod id;
pub mod sort;
pub mod params;
pub mod comment;
pub mod votes;

pub use validation::ValidationError;
pub use id::{ArticleId, CommentId};
pub use sort::{ArticleSort, CommentSort, SortOrder};
pub use params::{ArticleListParams, CommentListParams};
pub use comment::{NewComment, ValidComment};
pub use votes::VotePatch;
