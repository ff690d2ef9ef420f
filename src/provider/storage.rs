use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    config::Credentials, error::DisplayErrorContext, primitives::ByteStream,
    Client,
};
use tokio::fs::File;
use tracing::{error, info};

use crate::{configuration::Config, error::Error, provider::Dataset_File};

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Streams `file` from its current position into the store under `key`.
    async fn put_file(&self, file: File, key: &str) -> Result<(), Error>;
}

pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    pub async fn new(config: &Config) -> S3Storage {
        let credentials = Credentials::new(
            config.access_key.to_owned(),
            config.secret_key.to_owned(),
            None,
            None,
            "pool-etl",
        );
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.to_owned()))
            .credentials_provider(credentials)
            .load()
            .await;

        S3Storage {
            client: Client::new(&sdk_config),
            bucket: config.bucket.to_owned(),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put_file(&self, file: File, key: &str) -> Result<(), Error> {
        let body = ByteStream::read_from().file(file).build().await?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("text/csv")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                Error::StorageError(DisplayErrorContext(&e).to_string())
            })?;

        Ok(())
    }
}

pub async fn archive_dataset(
    storage: &dyn ObjectStorage,
    dataset: Dataset_File,
    key: &str,
) -> Result<(), Error> {
    storage
        .put_file(File::from_std(dataset.file), key)
        .await
        .inspect_err(|e| error!("Upload of {} failed: {}", key, e))?;

    info!("Upload Successful! {}", key);

    Ok(())
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{memory::MemoryStorage, *};
    use crate::{
        model::{Pool_Dataset, Pool_Day_Data},
        provider::{to_csv, write_dataset},
    };
    use tempfile::tempdir;

    const POOL: &str = "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640";

    fn dataset(first_day: i64, days: i64) -> Pool_Dataset {
        let records = (first_day..first_day + days)
            .map(|date| Pool_Day_Data {
                date,
                open: date.to_string(),
                high: String::from("2"),
                low: String::from("0.5"),
                close: String::from("1.5"),
                volumeUSD: String::from("100"),
                feesUSD: String::from("1"),
                txCount: String::from("5"),
            })
            .collect();

        Pool_Dataset {
            pool_id: POOL.to_owned(),
            records,
        }
    }

    #[tokio::test]
    async fn test_archive_stores_file_bytes() {
        let dir = tempdir().unwrap();
        let data = dataset(1, 2);
        let written = write_dataset(dir.path(), &data).await.unwrap();

        let storage = MemoryStorage::default();
        archive_dataset(&storage, written, "pool/2024-03-01.csv")
            .await
            .unwrap();

        let objects = storage.objects.lock().unwrap();
        assert_eq!(
            objects["pool/2024-03-01.csv"],
            to_csv(&data.records).unwrap()
        );
    }

    #[tokio::test]
    async fn test_archive_propagates_failure() {
        let dir = tempdir().unwrap();
        let written = write_dataset(dir.path(), &dataset(1, 1)).await.unwrap();

        let storage = MemoryStorage {
            fail_with: Some(String::from("AccessDenied")),
            ..Default::default()
        };
        let result =
            archive_dataset(&storage, written, "pool/2024-03-01.csv").await;

        assert!(matches!(result, Err(Error::StorageError(reason)) if reason == "AccessDenied"));
        assert!(storage.objects.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_ingestions_archive_what_they_wrote() {
        let dir = Arc::new(tempdir().unwrap());
        let storage = Arc::new(MemoryStorage::default());

        let mut handles = vec![];
        for task in 0..200_i64 {
            let dir = dir.clone();
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                let data = dataset(task * 100, 1 + task % 14);
                let key = format!("{}/{}.csv", POOL, task);

                let written = write_dataset(dir.path(), &data).await.unwrap();
                archive_dataset(storage.as_ref(), written, &key)
                    .await
                    .unwrap();

                (key, to_csv(&data.records).unwrap())
            }));
        }

        let mut expected = vec![];
        for handle in handles {
            expected.push(handle.await.unwrap());
        }

        let objects = storage.objects.lock().unwrap();
        let mismatched = expected
            .iter()
            .filter(|(key, bytes)| objects.get(key) != Some(bytes))
            .count();
        assert_eq!(mismatched, 0);
    }
}
