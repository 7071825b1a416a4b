use crate::domain::catalog::Library;
use crate::domain::model::{Book, LibraryUser, Magazine, Publication};
use crate::domain::ports::FileManager;
use crate::utils::error::{LibraryError, Result};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const BOOK_TAG: &str = "Book";
const MAGAZINE_TAG: &str = "Magazine";

/// CSV persistence for the catalog: one semicolon-delimited line per entity,
/// publications type-tagged, users untagged. No quoting on either side, so a
/// `;` inside a field corrupts the record — the legacy format has no escape
/// mechanism and this codec does not invent one.
pub struct CsvFileManager {
    library_path: PathBuf,
    users_path: PathBuf,
}

impl CsvFileManager {
    pub fn new(library_path: impl Into<PathBuf>, users_path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: library_path.into(),
            users_path: users_path.into(),
        }
    }

    fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LibraryError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LibraryError::IoError(e),
        })?;
        Ok(ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(file))
    }

    fn import_publications(&self, library: &mut Library) -> Result<()> {
        let mut reader = Self::open_reader(&self.library_path)?;
        let mut count = 0usize;
        for (index, record) in reader.records().enumerate() {
            let publication = decode_publication(&record?, index + 1)?;
            library.add_publication(publication)?;
            count += 1;
        }
        tracing::debug!("Imported {} publications from {}", count, self.library_path.display());
        Ok(())
    }

    fn import_users(&self, library: &mut Library) -> Result<()> {
        let mut reader = Self::open_reader(&self.users_path)?;
        let mut count = 0usize;
        for (index, record) in reader.records().enumerate() {
            let user = decode_user(&record?, index + 1)?;
            library.add_user(user)?;
            count += 1;
        }
        tracing::debug!("Imported {} users from {}", count, self.users_path.display());
        Ok(())
    }

    fn write_lines(path: &Path, rows: Vec<Vec<String>>) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .from_writer(Vec::new());
        for row in rows {
            writer.write_record(&row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| LibraryError::IoError(e.into_error()))?;
        std::fs::write(path, bytes).map_err(|source| LibraryError::WriteFailure {
            path: path.display().to_string(),
            source,
        })
    }
}

impl FileManager for CsvFileManager {
    /// Loads both files into a fresh catalog. A malformed line aborts the
    /// whole import; there is no skip-and-continue recovery.
    fn import(&self) -> Result<Library> {
        let mut library = Library::new();
        self.import_publications(&mut library)?;
        self.import_users(&mut library)?;
        tracing::info!(
            "Imported {} publications and {} users",
            library.publications().len(),
            library.users().len()
        );
        Ok(library)
    }

    /// Overwrites both files with the full catalog. Map iteration order; the
    /// files carry no ordering contract.
    fn export(&self, library: &Library) -> Result<()> {
        let publication_rows = library
            .publications()
            .values()
            .map(encode_publication)
            .collect();
        Self::write_lines(&self.library_path, publication_rows)?;

        let user_rows = library.users().values().map(encode_user).collect();
        Self::write_lines(&self.users_path, user_rows)?;

        tracing::info!(
            "Exported {} publications and {} users",
            library.publications().len(),
            library.users().len()
        );
        Ok(())
    }
}

pub fn encode_publication(publication: &Publication) -> Vec<String> {
    match publication {
        Publication::Book(book) => vec![
            BOOK_TAG.to_string(),
            book.title.clone(),
            book.author.clone(),
            book.year.to_string(),
            book.pages.to_string(),
            book.publisher.clone(),
            book.isbn.clone(),
        ],
        Publication::Magazine(magazine) => vec![
            MAGAZINE_TAG.to_string(),
            magazine.title.clone(),
            magazine.publisher.clone(),
            magazine.year.to_string(),
            magazine.month.to_string(),
            magazine.day.to_string(),
            magazine.language.clone(),
        ],
    }
}

pub fn encode_user(user: &LibraryUser) -> Vec<String> {
    vec![
        user.first_name.clone(),
        user.last_name.clone(),
        user.national_id.clone(),
    ]
}

pub fn decode_publication(record: &StringRecord, line: usize) -> Result<Publication> {
    let tag = record.get(0).unwrap_or_default();
    match tag {
        BOOK_TAG => decode_book(record, line),
        MAGAZINE_TAG => decode_magazine(record, line),
        _ => Err(LibraryError::UnknownType {
            tag: tag.to_string(),
        }),
    }
}

fn decode_book(record: &StringRecord, line: usize) -> Result<Publication> {
    require_fields(record, 7, line)?;
    Ok(Book::new(
        &record[1],
        &record[2],
        parse_number(&record[3], "year", line)?,
        parse_number(&record[4], "pages", line)?,
        &record[5],
        &record[6],
    )
    .into())
}

fn decode_magazine(record: &StringRecord, line: usize) -> Result<Publication> {
    require_fields(record, 7, line)?;
    Ok(Magazine::new(
        &record[1],
        &record[2],
        parse_number(&record[3], "year", line)?,
        parse_number(&record[4], "month", line)?,
        parse_number(&record[5], "day", line)?,
        &record[6],
    )
    .into())
}

pub fn decode_user(record: &StringRecord, line: usize) -> Result<LibraryUser> {
    require_fields(record, 3, line)?;
    Ok(LibraryUser::new(&record[0], &record[1], &record[2]))
}

fn require_fields(record: &StringRecord, expected: usize, line: usize) -> Result<()> {
    if record.len() < expected {
        return Err(LibraryError::MalformedRecord {
            line,
            reason: format!("expected {} fields, found {}", expected, record.len()),
        });
    }
    Ok(())
}

fn parse_number<T: FromStr>(field: &str, name: &str, line: usize) -> Result<T> {
    field.parse().map_err(|_| LibraryError::MalformedRecord {
        line,
        reason: format!("invalid {}: '{}'", name, field),
    })
}
