use std::{collections::BTreeMap, hash::Hash};

/// Invert a map by swapping keys and values
pub fn invert_map<K, V, MK, MV>(original: MK) -> MV
where
    K: Ord + Hash + Eq,
    V: Ord + Hash + Eq + Clone,
    MK: IntoIterator<Item = (K, V)>,
    MV: FromIterator<(V, K)>,
{
    original
        .into_iter()
        .map(|(key, value)| (value, key))
        .collect()
}

/// Map class ids to class names, in the order the names are given
pub fn id2label(class_names: &[String]) -> BTreeMap<usize, String> {
    class_names.iter().cloned().enumerate().collect()
}

/// Map class names to class ids, in the order the names are given
pub fn label2id(class_names: &[String]) -> BTreeMap<String, usize> {
    invert_map(id2label(class_names))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn inverts_class_maps() {
        let names = vec!["neg".to_string(), "pos".to_string()];

        let label2id = label2id(&names);

        assert_eq!(label2id.get("neg"), Some(&0));
        assert_eq!(label2id.get("pos"), Some(&1));
        assert_eq!(invert_map::<_, _, _, BTreeMap<_, _>>(label2id), id2label(&names));
    }
}
