mod pool_day_data;

pub use pool_day_data::{Pool_Dataset, Pool_Day_Data};
