pub use self::{
    invocation::{ApiEvent, ApiResponse},
    pool_query::{PoolData, QueryBody, QueryData, QueryError, QueryResponse},
};

mod invocation;
mod pool_query;
