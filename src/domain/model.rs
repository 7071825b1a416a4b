use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub pages: i32,
    pub publisher: String,
    pub isbn: String,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        pages: i32,
        publisher: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            pages,
            publisher: publisher.into(),
            isbn: isbn.into(),
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}, {}) - {} pages, ISBN {}",
            self.title, self.author, self.publisher, self.year, self.pages, self.isbn
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Magazine {
    pub title: String,
    pub publisher: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub language: String,
}

impl Magazine {
    pub fn new(
        title: impl Into<String>,
        publisher: impl Into<String>,
        year: i32,
        month: u32,
        day: u32,
        language: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            publisher: publisher.into(),
            year,
            month,
            day,
            language: language.into(),
        }
    }
}

impl fmt::Display for Magazine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}-{:02}-{:02}), language: {}",
            self.title, self.publisher, self.year, self.month, self.day, self.language
        )
    }
}

/// A catalog item. Closed set of variants; the CSV codec dispatches on the
/// variant tag and the catalog keys publications by `title()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Publication {
    Book(Book),
    Magazine(Magazine),
}

impl Publication {
    pub fn title(&self) -> &str {
        match self {
            Publication::Book(book) => &book.title,
            Publication::Magazine(magazine) => &magazine.title,
        }
    }

    pub fn is_book(&self) -> bool {
        matches!(self, Publication::Book(_))
    }

    pub fn is_magazine(&self) -> bool {
        matches!(self, Publication::Magazine(_))
    }
}

impl From<Book> for Publication {
    fn from(book: Book) -> Self {
        Publication::Book(book)
    }
}

impl From<Magazine> for Publication {
    fn from(magazine: Magazine) -> Self {
        Publication::Magazine(magazine)
    }
}

impl fmt::Display for Publication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Publication::Book(book) => book.fmt(f),
            Publication::Magazine(magazine) => magazine.fmt(f),
        }
    }
}

/// A registered reader. `national_id` is the unique key within the catalog.
///
/// The borrow lists are live model state but no menu command drives them;
/// they persist only as empty defaults in the users file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryUser {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    #[serde(default)]
    pub borrowed_publications: Vec<Publication>,
    #[serde(default)]
    pub publication_history: Vec<Publication>,
}

impl LibraryUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        national_id: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            national_id: national_id.into(),
            borrowed_publications: Vec::new(),
            publication_history: Vec::new(),
        }
    }

    pub fn borrow_publication(&mut self, publication: Publication) {
        self.borrowed_publications.push(publication);
    }

    /// Moves a borrowed publication into the history. Returns false when the
    /// publication was never borrowed.
    pub fn return_publication(&mut self, publication: &Publication) -> bool {
        match self
            .borrowed_publications
            .iter()
            .position(|p| p == publication)
        {
            Some(index) => {
                let returned = self.borrowed_publications.remove(index);
                self.publication_history.push(returned);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for LibraryUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.first_name, self.last_name, self.national_id)
    }
}
