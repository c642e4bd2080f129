pub mod pagination;
pub mod query;
pub mod response;

pub use pagination::{PaginatedResponse, PaginationMeta};
pub use query::{PaginationQuery, SortOrder, SortQuery};
pub use response::ApiResponse;
