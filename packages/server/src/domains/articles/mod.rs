//! Articles as seen through the host content store.

pub mod hooks;
pub mod models;

pub use models::{Article, ArticleId, ArticleKind, ArticleStatus};
