pub mod enrichment;
pub mod providers;
pub mod recommendations;
pub mod title_query;

pub use enrichment::{default_chain, Enricher, FallbackStep};
pub use providers::MetadataProvider;
