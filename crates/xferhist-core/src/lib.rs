pub mod action;
pub mod error;
pub mod meta;
pub mod projection;

pub use action::{ActionDescriptor, ActionRecord, Authorization};
pub use error::{CoreError, Result};
pub use meta::{ActionMetaMerger, DefaultMetaMerger};
pub use projection::{Projection, ProjectionOptions, ResultProjector, SimpleRecord};
