use std::{
    fs::File,
    io::{Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tokio::{fs, task};
use tracing::info;

use crate::{
    error::Error,
    model::{Pool_Dataset, Pool_Day_Data},
};

/// A written dataset. `file` is the handle the rows were written through,
/// rewound to the start, so later writers of `path` cannot change what is read.
#[derive(Debug)]
pub struct Dataset_File {
    pub path: PathBuf,
    pub file: File,
}

/// Writes `<scratch_dir>/<pool_id>.csv`, replacing any previous file.
///
/// Rows go to a fresh temporary file that is then renamed over the target,
/// so readers never observe a truncated or half written dataset.
pub async fn write_dataset(
    scratch_dir: &Path,
    dataset: &Pool_Dataset,
) -> Result<Dataset_File, Error> {
    if dataset.pool_id.is_empty()
        || !dataset.pool_id.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(Error::ServerError(format!(
            "Invalid pool id for file name: {:?}",
            dataset.pool_id
        )));
    }

    let data = to_csv(&dataset.records)?;
    fs::create_dir_all(scratch_dir).await?;

    let path = scratch_dir.join(format!("{}.csv", dataset.pool_id));
    let dir = scratch_dir.to_path_buf();
    let target = path.clone();

    let file = task::spawn_blocking(move || -> Result<File, Error> {
        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(&data)?;
        temp.flush()?;

        let mut file = temp.persist(&target).map_err(|e| e.error)?;
        file.seek(SeekFrom::Start(0))?;

        Ok(file)
    })
    .await??;

    info!(
        "Wrote {} records to {}",
        dataset.records.len(),
        path.display()
    );

    Ok(Dataset_File { path, file })
}

pub fn to_csv(records: &[Pool_Day_Data]) -> Result<Vec<u8>, Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);

    wtr.write_record(Pool_Day_Data::HEADERS)?;
    for record in records {
        wtr.serialize(record)?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| Error::ServerError(format!("CSV writer error: {}", e)))?;

    Ok(data)
}
