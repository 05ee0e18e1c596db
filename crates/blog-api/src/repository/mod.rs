//! 数据访问层

mod memory;
mod post_repo;
mod theme_repo;
mod traits;
mod user_repo;

pub use memory::{MemoryBlogStore, MemoryPostRepository, MemoryRepository, MemoryThemeRepository};
pub use post_repo::PgPostRepository;
pub use theme_repo::PgThemeRepository;
pub use traits::{Repository, UserRepository};
pub use user_repo::PgUserRepository;
