use std::{fs::File, io::Read, path::Path};

use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    item::{Item, RATING_COLUMN, REQUIRED_COLUMNS},
};

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    title: usize,
    authors: usize,
    categories: usize,
    description: usize,
    rating: Option<usize>,
}

impl Columns {
    /// Check the header against the required columns.
    /// Every missing column is reported at once.
    fn resolve(headers: &csv::ByteRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| String::from_utf8_lossy(h).trim() == name)
        };
        let found: Vec<Option<usize>> = REQUIRED_COLUMNS.iter().map(|c| find(*c)).collect();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .zip(&found)
            .filter(|(_, pos)| pos.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        match found[..] {
            [Some(title), Some(authors), Some(categories), Some(description)] => Ok(Columns {
                title,
                authors,
                categories,
                description,
                rating: find(RATING_COLUMN),
            }),
            _ => Err(Error::Schema { missing }),
        }
    }
}

/// Load a corpus from a CSV file with a header row.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Item>> {
    let path = path.as_ref();
    let items = read_csv(File::open(path)?)?;
    info!(path = %path.display(), items = items.len(), "corpus loaded");
    Ok(items)
}

/// Read a corpus from any CSV source.
///
/// Invalid UTF-8 is replaced with U+FFFD, absent cells become empty strings and
/// an empty or unparsable rating becomes `None`.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Item>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = Columns::resolve(rdr.byte_headers()?)?;
    debug!(?columns, "corpus columns resolved");

    let mut items = Vec::new();
    let mut record = csv::ByteRecord::new();
    while rdr.read_byte_record(&mut record)? {
        let text = |pos: usize| {
            record
                .get(pos)
                .map(|raw| String::from_utf8_lossy(raw).into_owned())
                .unwrap_or_default()
        };
        let average_rating = columns
            .rating
            .and_then(|pos| record.get(pos))
            .and_then(|raw| std::str::from_utf8(raw).ok())
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|r| r.is_finite());
        items.push(Item {
            id: items.len(),
            title: text(columns.title),
            authors: text(columns.authors),
            categories: text(columns.categories),
            description: text(columns.description),
            average_rating,
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const BOOKS: &str = "\
title,authors,categories,description,average_rating
Dune,Frank Herbert,Fiction,\"Spice, sand and empire\",4.25
Emma,Jane Austen,Classics,Matchmaking in Highbury,
Gilead,Marilynne Robinson,Fiction,,3.85
";

    #[test]
    fn reads_required_and_passthrough_fields() {
        let items = read_csv(BOOKS.as_bytes()).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Dune");
        assert_eq!(items[0].description, "Spice, sand and empire");
        assert_eq!(items[0].average_rating, Some(4.25));
        assert_eq!(items[1].average_rating, None);
        assert_eq!(items[2].description, "");
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let csv = "title,categories,average_rating\nDune,Fiction,4.0\n";
        match read_csv(csv.as_bytes()) {
            Err(Error::Schema { missing }) => {
                assert_eq!(missing, vec!["authors".to_string(), "description".to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn rating_column_is_optional_and_columns_may_be_reordered() {
        let csv = "description,title,categories,authors\nA story,Solo,Drama,Someone\n";
        let items = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(items[0].title, "Solo");
        assert_eq!(items[0].authors, "Someone");
        assert_eq!(items[0].average_rating, None);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut bytes = b"title,authors,categories,description\nCaf".to_vec();
        bytes.extend_from_slice(&[0xFF]);
        bytes.extend_from_slice(b",X,Y,Z\n");
        let items = read_csv(&bytes[..]).unwrap();
        assert_eq!(items[0].title, "Caf\u{FFFD}");
    }

    #[test]
    fn short_rows_fill_with_empty_strings() {
        let csv = "title,authors,categories,description\nLonely,Anon\n";
        let items = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(items[0].categories, "");
        assert_eq!(items[0].description, "");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BOOKS.as_bytes()).unwrap();
        let items = load_csv(file.path()).unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn header_only_file_is_an_empty_corpus() {
        let items = read_csv("title,authors,categories,description\n".as_bytes()).unwrap();
        assert!(items.is_empty());
    }
}
