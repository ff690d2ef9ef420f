use chrono::NaiveDate;

pub fn format_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Datasets are stored under the pool address, one object per day.
pub fn object_key(pool_address: &str, date: NaiveDate) -> String {
    format!("{}/{}.csv", pool_address, format_day(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_day_pads() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_day(date), "2024-03-01");
    }

    #[test]
    fn test_object_key() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            object_key("0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640", date),
            "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640/2024-03-01.csv"
        );
    }
}
