//! Service layer for the LuvToSearch API.

mod search;

pub use search::{SearchService, SEARCH_PATH};
