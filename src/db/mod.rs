pub mod cache;
pub mod catalog;
pub mod redis;

mod macros;

pub use cache::{CacheKey, DetailsCache, MemoryCache};
pub use catalog::{Catalog, RecommendationTable};
pub use self::redis::{create_redis_client, CacheWriterHandle, RedisCache};
