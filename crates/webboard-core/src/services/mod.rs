//! Services - the operations the board exposes, one transaction each.
//!
//! Identity is asserted by the caller: an `author_id` passed to a service is
//! trusted as the acting user and only checked against stored ownership.

mod categories;
mod comments;
mod posts;
mod resolve;
mod users;

pub use categories::CategoryCatalog;
pub use comments::{CommentService, CommentUpdate, ensure_owner};
pub use posts::{NewPost, PostService};
pub use resolve::{CategoryResolver, PostResolver, UserResolver};
pub use users::UserDirectory;
