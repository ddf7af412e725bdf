//! Domain entities - the core business objects.

mod category;
mod comment;
mod filter;
mod post;
mod user;

pub use category::{Category, CategoryChanges};
pub use comment::Comment;
pub use filter::PostFilter;
pub use post::{Post, PostChanges, PostDetail};
pub use user::User;
