use std::path::Path;

use flate2::read::GzDecoder;
use tokio::{fs::File, io::AsyncWriteExt};

/// Download Error
#[derive(thiserror::Error, Debug)]
pub enum DownloadError {
    /// The request failed or returned an error status
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Writing or unpacking the file failed
    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking extraction task did not complete
    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Stream the body of a GET request into a file, returning the number of bytes written
pub async fn download_file(url: &str, destination: &Path) -> Result<u64, DownloadError> {
    let mut response = reqwest::get(url).await?.error_for_status()?;
    let mut file = File::create(destination).await?;
    let mut written = 0;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;

    Ok(written)
}

/// Unpack a gzip-compressed tar archive into the destination directory
pub async fn extract_tar_gz(archive: &Path, destination: &Path) -> Result<(), DownloadError> {
    let archive = archive.to_path_buf();
    let destination = destination.to_path_buf();

    tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let file = std::fs::File::open(&archive)?;

        tar::Archive::new(GzDecoder::new(file)).unpack(&destination)
    })
    .await??;

    Ok(())
}
