use std::path::{Path, PathBuf};

use tokio::{fs, io};

/// Read a whole UTF-8 file from the given path
pub async fn read_file(path: impl AsRef<Path>) -> io::Result<String> {
    fs::read_to_string(path).await
}

/// Whether the path exists and is a directory
pub async fn is_dir(path: impl AsRef<Path>) -> bool {
    fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}

/// The names of the immediate subdirectories, sorted
pub async fn subdirectories(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let mut entries = fs::read_dir(path).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();

    Ok(names)
}

/// The regular files directly inside the directory with the given extension, sorted
pub async fn files_with_extension(
    path: impl AsRef<Path>,
    extension: &str,
) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(path).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let matches = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);

        if matches && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }

    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn lists_sorted_subdirectories_and_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        for name in ["pos", "neg"] {
            std::fs::create_dir(dir.path().join(name))?;
        }
        std::fs::write(dir.path().join("b.txt"), "b")?;
        std::fs::write(dir.path().join("a.TXT"), "a")?;
        std::fs::write(dir.path().join("notes.md"), "skip")?;

        assert_eq!(subdirectories(dir.path()).await?, vec!["neg", "pos"]);
        assert_eq!(
            files_with_extension(dir.path(), "txt").await?,
            vec![dir.path().join("a.TXT"), dir.path().join("b.txt")]
        );
        assert_eq!(read_file(dir.path().join("b.txt")).await?, "b");
        assert!(is_dir(dir.path().join("neg")).await);
        assert!(!is_dir(dir.path().join("b.txt")).await);

        Ok(())
    }
}
