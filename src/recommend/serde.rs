use std::io::{Read, Write};

use serde::{ser::SerializeStruct, Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{Error, Result},
    item::Item,
    recommend::{index_titles, BuildReport, Snapshot},
    similarity::SimilarityMatrix,
    vectorizer::{DocumentVector, Vocabulary},
};

/// Deserialization form of `Snapshot`.
/// It carries no title index; `into_snapshot` rebuilds it and checks that
/// the parts agree with each other.
#[derive(Debug, Deserialize)]
pub struct SnapshotData {
    pub items: Vec<Item>,
    pub vocabulary: Vocabulary,
    pub vectors: Vec<DocumentVector>,
    pub matrix: SimilarityMatrix,
    pub report: BuildReport,
}

fn corrupt(message: String) -> Error {
    Error::CorruptSnapshot { message }
}

impl SnapshotData {
    /// Validate and convert into a queryable `Snapshot`.
    ///
    /// # Errors
    /// * `Error::CorruptSnapshot` - item, vector and matrix sizes disagree, the
    ///   matrix data is short or out of range, a vector is not sorted by column,
    ///   or a vector refers to a column outside the vocabulary
    pub fn into_snapshot(self) -> Result<Snapshot> {
        let n = self.items.len();
        if n == 0 {
            return Err(corrupt("snapshot holds no items".to_string()));
        }
        if self.vectors.len() != n {
            return Err(corrupt(format!("{} items but {} vectors", n, self.vectors.len())));
        }
        if self.matrix.len() != n {
            return Err(corrupt(format!(
                "{} items but a {}x{} similarity matrix",
                n,
                self.matrix.len(),
                self.matrix.len()
            )));
        }
        let matrix = SimilarityMatrix::from_packed(n, self.matrix.into_packed())?;
        if let Some(row) = self.vectors.iter().position(|v| !v.is_well_formed()) {
            return Err(corrupt(format!("vector {row} is not sorted by column")));
        }
        let columns = self.vocabulary.len();
        if let Some(row) = self
            .vectors
            .iter()
            .position(|v| v.indices().iter().any(|&c| c as usize >= columns))
        {
            return Err(corrupt(format!(
                "vector {row} refers to a column outside the {columns}-term vocabulary"
            )));
        }
        if self.items.iter().enumerate().any(|(pos, item)| item.id != pos) {
            return Err(corrupt("item ids do not match their positions".to_string()));
        }

        let (title_index, _) = index_titles(&self.items);
        Ok(Snapshot {
            items: self.items,
            vocabulary: self.vocabulary,
            vectors: self.vectors,
            matrix,
            title_index,
            report: self.report,
        })
    }
}

impl Serialize for Snapshot {
    /// The title index is derived data and is left out.
    /// Use `SnapshotData` to deserialize.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Snapshot", 5)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("vocabulary", &self.vocabulary)?;
        state.serialize_field("vectors", &self.vectors)?;
        state.serialize_field("matrix", &self.matrix)?;
        state.serialize_field("report", &self.report)?;
        state.end()
    }
}

impl Snapshot {
    /// Write the snapshot as CBOR
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        serde_cbor::to_writer(writer, self)?;
        Ok(())
    }

    /// Read a snapshot written by `save`
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        let data: SnapshotData = serde_cbor::from_reader(reader)?;
        let snapshot = data.into_snapshot()?;
        info!(
            items = snapshot.len(),
            vocabulary = snapshot.vocabulary().len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::BufReader};

    use super::*;
    use crate::config::VectorizerConfig;

    fn snapshot() -> Snapshot {
        let items = vec![
            Item::new("Dune", "Frank Herbert", "Fiction", "Desert spice empire").with_rating(4.25),
            Item::new("Dune Messiah", "Frank Herbert", "Fiction", "Desert spice prophet"),
            Item::new("Emma", "Jane Austen", "Classics", "Matchmaking in Highbury"),
        ];
        Snapshot::build(items, &VectorizerConfig::default()).unwrap()
    }

    #[test]
    fn save_then_load_serves_the_same_answers() {
        let original = snapshot();
        let mut bytes = Vec::new();
        original.save(&mut bytes).unwrap();
        let loaded = Snapshot::load(&bytes[..]).unwrap();

        assert_eq!(loaded.items(), original.items());
        assert_eq!(loaded.vocabulary(), original.vocabulary());
        assert_eq!(loaded.matrix(), original.matrix());
        assert_eq!(loaded.report(), original.report());
        assert_eq!(
            loaded.recommend("Dune", 2).unwrap(),
            original.recommend("Dune", 2).unwrap()
        );
    }

    #[test]
    fn through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.snapshot");
        snapshot().save(File::create(&path).unwrap()).unwrap();
        let loaded = Snapshot::load(BufReader::new(File::open(&path).unwrap())).unwrap();
        assert_eq!(loaded.index_of("Emma"), Some(2));
    }

    #[test]
    fn mismatched_parts_are_rejected() {
        let original = snapshot();
        let mut bytes = Vec::new();
        original.save(&mut bytes).unwrap();
        let mut data: SnapshotData = serde_cbor::from_slice(&bytes).unwrap();
        data.vectors.pop();
        assert!(matches!(data.into_snapshot(), Err(Error::CorruptSnapshot { .. })));

        let mut data: SnapshotData = serde_cbor::from_slice(&bytes).unwrap();
        data.items.push(Item::new("Extra", "", "", ""));
        assert!(matches!(data.into_snapshot(), Err(Error::CorruptSnapshot { .. })));
    }

    #[derive(Serialize)]
    struct RawMatrix {
        n: usize,
        data: Vec<f64>,
    }

    #[derive(Serialize)]
    struct RawVector {
        inds: Vec<u32>,
        vals: Vec<f64>,
    }

    fn reencode<T: Serialize, U: for<'de> Deserialize<'de>>(raw: &T) -> U {
        serde_cbor::from_slice(&serde_cbor::to_vec(raw).unwrap()).unwrap()
    }

    #[test]
    fn short_matrix_data_is_rejected_before_any_query() {
        let mut bytes = Vec::new();
        snapshot().save(&mut bytes).unwrap();

        let mut data: SnapshotData = serde_cbor::from_slice(&bytes).unwrap();
        data.matrix = reencode(&RawMatrix { n: 3, data: vec![1.0, 0.5] });
        assert_eq!(data.matrix.len(), 3);
        assert!(matches!(data.into_snapshot(), Err(Error::CorruptSnapshot { .. })));

        let mut data: SnapshotData = serde_cbor::from_slice(&bytes).unwrap();
        data.matrix = reencode(&RawMatrix { n: 3, data: vec![1.0, 0.5, 2.0, 1.0, 0.0, 1.0] });
        assert!(matches!(data.into_snapshot(), Err(Error::CorruptSnapshot { .. })));
    }

    #[test]
    fn unsorted_vector_indices_are_rejected() {
        let mut bytes = Vec::new();
        snapshot().save(&mut bytes).unwrap();
        let mut data: SnapshotData = serde_cbor::from_slice(&bytes).unwrap();
        data.vectors[0] = reencode(&RawVector { inds: vec![1, 0], vals: vec![0.6, 0.8] });
        assert!(matches!(data.into_snapshot(), Err(Error::CorruptSnapshot { .. })));
    }

    #[test]
    fn garbage_is_an_encoding_error() {
        assert!(matches!(
            Snapshot::load(&b"not a snapshot"[..]),
            Err(Error::Snapshot(_))
        ));
    }
}
