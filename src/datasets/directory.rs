//! Corpora stored as one subdirectory of text files per class

use std::path::{Path, PathBuf};

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::utils::files;

use super::{DatasetError, Split, SplitOptions};

/// A text file and the index of its class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Path to the text file
    pub path: PathBuf,

    /// Index into the sorted class names
    pub label: usize,
}

/// An indexed labeled directory
#[derive(Debug, Clone)]
pub struct Index {
    /// Class names, sorted lexicographically; a class's label is its position here
    pub class_names: Vec<String>,

    /// Every sample, grouped by class and sorted by path within each class
    pub samples: Vec<Sample>,
}

/// Index the `.txt` files under each immediate subdirectory of `root`
pub async fn index(root: &Path) -> Result<Index, DatasetError> {
    let display = root.display().to_string();

    if !files::is_dir(root).await {
        return Err(DatasetError::MissingDirectory(display));
    }

    let class_names = files::subdirectories(root)
        .await
        .map_err(|source| DatasetError::Read {
            path: display.clone(),
            source,
        })?;

    if class_names.is_empty() {
        return Err(DatasetError::NoClasses(display));
    }

    let mut samples = Vec::new();

    for (label, class_name) in class_names.iter().enumerate() {
        let class_dir = root.join(class_name);

        let paths = files::files_with_extension(&class_dir, "txt")
            .await
            .map_err(|source| DatasetError::Read {
                path: class_dir.display().to_string(),
                source,
            })?;

        samples.extend(paths.into_iter().map(|path| Sample { path, label }));
    }

    Ok(Index {
        class_names,
        samples,
    })
}

/// Shuffle the samples with a seeded generator and keep the requested subset.
///
/// The last `floor(validation_split * n)` shuffled samples form the validation subset and the
/// rest form the training subset. The test split keeps every sample.
pub fn select<T>(
    mut samples: Vec<T>,
    split: Split,
    options: SplitOptions,
) -> Result<Vec<T>, DatasetError> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    samples.shuffle(&mut rng);

    if split == Split::Test {
        return Ok(samples);
    }

    if !(options.validation_split > 0.0 && options.validation_split < 1.0) {
        return Err(DatasetError::InvalidValidationSplit(options.validation_split));
    }

    let num_validation = (options.validation_split * samples.len() as f64) as usize;
    let validation = samples.split_off(samples.len() - num_validation);

    match split {
        Split::Validation => Ok(validation),
        _ => Ok(samples),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn options() -> SplitOptions {
        SplitOptions::new(42, 0.2)
    }

    #[test]
    fn splits_deterministically_and_disjointly() -> anyhow::Result<()> {
        let samples: Vec<usize> = (0..100).collect();

        let train = select(samples.clone(), Split::Train, options())?;
        let valid = select(samples.clone(), Split::Validation, options())?;

        assert_eq!(train.len(), 80);
        assert_eq!(valid.len(), 20);
        assert_eq!(train, select(samples.clone(), Split::Train, options())?);

        let train_set: HashSet<_> = train.iter().collect();
        assert!(valid.iter().all(|sample| !train_set.contains(sample)));

        let mut all: Vec<_> = train.into_iter().chain(valid).collect();
        all.sort();
        assert_eq!(all, samples);

        Ok(())
    }

    #[test]
    fn different_seeds_give_different_splits() -> anyhow::Result<()> {
        let samples: Vec<usize> = (0..100).collect();

        let a = select(samples.clone(), Split::Validation, options())?;
        let b = select(samples, Split::Validation, SplitOptions::new(7, 0.2))?;

        assert_ne!(a, b);

        Ok(())
    }

    #[test]
    fn rejects_out_of_range_validation_splits() {
        for fraction in [0.0, 1.0, -0.5, 1.5] {
            let result = select(vec![1, 2, 3], Split::Train, SplitOptions::new(42, fraction));

            assert!(matches!(
                result,
                Err(DatasetError::InvalidValidationSplit(_))
            ));
        }
    }

    #[test]
    fn test_split_keeps_everything() -> anyhow::Result<()> {
        let mut test = select((0..10).collect::<Vec<_>>(), Split::Test, options())?;
        test.sort();

        assert_eq!(test, (0..10).collect::<Vec<_>>());

        Ok(())
    }

    #[tokio::test]
    async fn labels_classes_in_lexicographic_order() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        for (class, file) in [("pos", "1_10.txt"), ("neg", "0_1.txt"), ("neg", "2_3.txt")] {
            std::fs::create_dir_all(dir.path().join(class))?;
            std::fs::write(dir.path().join(class).join(file), "text")?;
        }

        let index = index(dir.path()).await?;

        let neg = index.class_names.iter().position(|c| c == "neg");
        let pos = index.class_names.iter().position(|c| c == "pos");

        assert!(neg < pos);
        assert_eq!(index.class_names, vec!["neg", "pos"]);
        assert_eq!(
            index.samples.iter().map(|s| s.label).collect::<Vec<_>>(),
            vec![0, 0, 1]
        );

        Ok(())
    }

    #[tokio::test]
    async fn missing_or_empty_roots_are_errors() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        assert!(matches!(
            index(&dir.path().join("absent")).await,
            Err(DatasetError::MissingDirectory(_))
        ));
        assert!(matches!(
            index(dir.path()).await,
            Err(DatasetError::NoClasses(_))
        ));

        Ok(())
    }
}
