pub mod clause;
pub mod compiler;
pub mod engine;
pub mod error;
pub mod fields;
pub mod filter;
pub mod pagination;
pub mod params;
pub mod sort;
pub mod time_window;
pub mod token;

pub use clause::{BooleanQuery, QueryClause};
pub use compiler::{CompiledQuery, QueryCompiler, TrackTotalHits};
pub use engine::{EngineError, SearchConfig, SearchEngine, TransferPage};
pub use error::QueryError;
pub use fields::FilterField;
pub use pagination::PageSpec;
pub use params::{RawQuery, ResponseFlags};
pub use sort::{SortDirection, SortSpec};
