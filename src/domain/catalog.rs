use crate::domain::model::{LibraryUser, Publication};
use crate::utils::error::{LibraryError, Result};
use std::cmp::Ordering;
use std::collections::HashMap;

/// The in-memory catalog: publications keyed by title, users keyed by
/// national id. Owns every entity it holds; callers hand entities over by
/// value and read them back by reference.
#[derive(Debug, Default)]
pub struct Library {
    publications: HashMap<String, Publication>,
    users: HashMap<String, LibraryUser>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a publication, rejecting a title that is already catalogued.
    pub fn add_publication(&mut self, publication: Publication) -> Result<()> {
        if self.publications.contains_key(publication.title()) {
            return Err(LibraryError::DuplicatePublication {
                title: publication.title().to_string(),
            });
        }
        self.publications
            .insert(publication.title().to_string(), publication);
        Ok(())
    }

    /// Removes a publication only on full value equality, not a bare title
    /// match. Returns whether anything was removed.
    pub fn remove_publication(&mut self, publication: &Publication) -> bool {
        match self.publications.get(publication.title()) {
            Some(existing) if existing == publication => {
                self.publications.remove(publication.title());
                true
            }
            _ => false,
        }
    }

    /// Exact, case-sensitive lookup by title.
    pub fn find_by_title(&self, title: &str) -> Option<&Publication> {
        self.publications.get(title)
    }

    pub fn add_user(&mut self, user: LibraryUser) -> Result<()> {
        if self.users.contains_key(&user.national_id) {
            return Err(LibraryError::DuplicateUser {
                national_id: user.national_id.clone(),
            });
        }
        self.users.insert(user.national_id.clone(), user);
        Ok(())
    }

    /// Returns a freshly ordered view; internal storage stays untouched.
    pub fn sorted_publications<F>(&self, mut compare: F) -> Vec<&Publication>
    where
        F: FnMut(&Publication, &Publication) -> Ordering,
    {
        let mut publications: Vec<&Publication> = self.publications.values().collect();
        publications.sort_by(|a, b| compare(a, b));
        publications
    }

    pub fn sorted_users<F>(&self, mut compare: F) -> Vec<&LibraryUser>
    where
        F: FnMut(&LibraryUser, &LibraryUser) -> Ordering,
    {
        let mut users: Vec<&LibraryUser> = self.users.values().collect();
        users.sort_by(|a, b| compare(a, b));
        users
    }

    pub fn publications(&self) -> &HashMap<String, Publication> {
        &self.publications
    }

    pub fn users(&self) -> &HashMap<String, LibraryUser> {
        &self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Book, Magazine};

    fn book(title: &str) -> Publication {
        Book::new(title, "Author", 2000, 100, "Publisher", "isbn").into()
    }

    #[test]
    fn test_duplicate_title_rejected_catalog_unchanged() {
        let mut library = Library::new();
        library.add_publication(book("Dune")).unwrap();

        let duplicate = Book::new("Dune", "Other", 1999, 50, "Else", "x").into();
        let err = library.add_publication(duplicate).unwrap_err();
        assert!(matches!(err, LibraryError::DuplicatePublication { ref title } if title == "Dune"));

        // The original entry survived the rejected insert.
        let kept = library.find_by_title("Dune").unwrap();
        assert_eq!(kept, &book("Dune"));
        assert_eq!(library.publications().len(), 1);
    }

    #[test]
    fn test_duplicate_national_id_rejected() {
        let mut library = Library::new();
        library
            .add_user(LibraryUser::new("Jan", "Kowalski", "123"))
            .unwrap();

        let err = library
            .add_user(LibraryUser::new("Anna", "Nowak", "123"))
            .unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateUser { ref national_id } if national_id == "123"));
    }

    #[test]
    fn test_remove_requires_value_equality() {
        let mut library = Library::new();
        library.add_publication(book("Dune")).unwrap();

        // Same title, different fields: not removed.
        let lookalike = Book::new("Dune", "Other", 1999, 50, "Else", "x").into();
        assert!(!library.remove_publication(&lookalike));
        assert!(library.find_by_title("Dune").is_some());

        assert!(library.remove_publication(&book("Dune")));
        assert!(library.find_by_title("Dune").is_none());
        // A second remove finds nothing.
        assert!(!library.remove_publication(&book("Dune")));
    }

    #[test]
    fn test_find_by_title_is_case_sensitive() {
        let mut library = Library::new();
        assert!(library.find_by_title("Dune").is_none());

        library.add_publication(book("Dune")).unwrap();
        assert!(library.find_by_title("Dune").is_some());
        assert!(library.find_by_title("dune").is_none());
    }

    #[test]
    fn test_sorted_publications_ignores_insertion_order() {
        let mut library = Library::new();
        library.add_publication(book("banana")).unwrap();
        library.add_publication(book("Apple")).unwrap();

        let sorted = library.sorted_publications(|a, b| {
            a.title().to_lowercase().cmp(&b.title().to_lowercase())
        });
        let titles: Vec<&str> = sorted.iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["Apple", "banana"]);
    }

    #[test]
    fn test_sorted_users_by_last_name_case_insensitive() {
        let mut library = Library::new();
        library
            .add_user(LibraryUser::new("Jan", "nowak", "1"))
            .unwrap();
        library
            .add_user(LibraryUser::new("Anna", "Kowalska", "2"))
            .unwrap();

        let sorted = library.sorted_users(|a, b| {
            a.last_name.to_lowercase().cmp(&b.last_name.to_lowercase())
        });
        let last_names: Vec<&str> = sorted.iter().map(|u| u.last_name.as_str()).collect();
        assert_eq!(last_names, vec!["Kowalska", "nowak"]);
    }

    #[test]
    fn test_books_and_magazines_share_the_title_keyspace() {
        let mut library = Library::new();
        library.add_publication(book("Dune")).unwrap();

        let magazine: Publication = Magazine::new("Dune", "Pub", 2021, 1, 1, "en").into();
        assert!(library.add_publication(magazine).is_err());
    }
}
