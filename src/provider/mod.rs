pub use self::{
    csv_file::{to_csv, write_dataset, Dataset_File},
    http::{parse_pool_dataset, pool_day_data_query, HTTP},
    storage::{archive_dataset, ObjectStorage, S3Storage},
};

#[cfg(test)]
pub(crate) use self::storage::memory;

mod csv_file;
mod http;
mod storage;
