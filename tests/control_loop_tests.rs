use libcat::{CsvFileManager, LibraryControl};
use tempfile::TempDir;

fn manager(dir: &TempDir) -> CsvFileManager {
    CsvFileManager::new(
        dir.path().join("Library.csv"),
        dir.path().join("Users.csv"),
    )
}

/// Drives a full scripted session through in-memory streams and returns
/// everything the loop printed.
fn run_session(dir: &TempDir, script: &str) -> String {
    let mut output = Vec::new();
    let mut control = LibraryControl::new(script.as_bytes(), &mut output, manager(dir));
    control.run().unwrap();
    drop(control);
    String::from_utf8(output).unwrap()
}

#[test]
fn test_missing_files_fall_back_to_empty_catalog() {
    let dir = TempDir::new().unwrap();

    let output = run_session(&dir, "0\n");
    assert!(output.contains("Starting with an empty catalog."));
    assert!(output.contains("Catalog saved."));
    assert!(output.contains("Bye."));

    // Exit still exported both files.
    assert!(dir.path().join("Library.csv").exists());
    assert!(dir.path().join("Users.csv").exists());
}

#[test]
fn test_add_book_persists_across_sessions() {
    let dir = TempDir::new().unwrap();

    let script = "1\nDune\nFrank Herbert\n1965\n412\nChilton\n978\n0\n";
    let output = run_session(&dir, script);
    assert!(output.contains("Book added."));

    // Second session imports what the first exported.
    let output = run_session(&dir, "3\n0\n");
    assert!(output.contains("Catalog imported from file."));
    assert!(output.contains("Dune - Frank Herbert"));
}

#[test]
fn test_invalid_menu_input_reprompts() {
    let dir = TempDir::new().unwrap();

    let output = run_session(&dir, "abc\n42\n0\n");
    assert!(output.contains("Input was not a number"));
    assert!(output.contains("No menu option with id 42"));
    assert!(output.contains("Bye."));
}

#[test]
fn test_bad_numeric_field_abandons_the_add() {
    let dir = TempDir::new().unwrap();

    let script = "1\nDune\nFrank Herbert\nMCMLXV\n0\n";
    let output = run_session(&dir, script);
    assert!(output.contains("Could not create the book, invalid input."));

    let library_csv = std::fs::read_to_string(dir.path().join("Library.csv")).unwrap();
    assert!(library_csv.is_empty());
}

#[test]
fn test_duplicate_book_reported_loop_continues() {
    let dir = TempDir::new().unwrap();

    let add = "1\nDune\nA\n2000\n100\nP\n1\n";
    let script = format!("{add}{add}0\n");
    let output = run_session(&dir, &script);
    assert!(output.contains("Book added."));
    assert!(output.contains("A publication titled 'Dune' already exists"));
    assert!(output.contains("Catalog saved."));
}

#[test]
fn test_listing_is_sorted_case_insensitively() {
    let dir = TempDir::new().unwrap();

    let script = "1\nbanana\nA\n2000\n10\nP\n1\n1\nApple\nB\n2001\n20\nP\n2\n3\n0\n";
    let output = run_session(&dir, script);

    let apple = output.find("Apple - B").unwrap();
    let banana = output.find("banana - A").unwrap();
    assert!(apple < banana);
}

#[test]
fn test_find_book_is_case_sensitive() {
    let dir = TempDir::new().unwrap();

    let script = "1\nDune\nFrank Herbert\n1965\n412\nChilton\n978\n9\ndune\n9\nDune\n0\n";
    let output = run_session(&dir, script);
    assert!(output.contains("No such title in the catalog."));
    assert!(output.contains("Dune - Frank Herbert"));
}

#[test]
fn test_delete_requires_matching_fields() {
    let dir = TempDir::new().unwrap();

    let script = concat!(
        "1\nDune\nFrank Herbert\n1965\n412\nChilton\n978\n",
        // Same title, wrong author: nothing removed.
        "6\nDune\nSomeone Else\n1965\n412\nChilton\n978\n",
        // Exact match: removed.
        "6\nDune\nFrank Herbert\n1965\n412\nChilton\n978\n",
        "0\n"
    );
    let output = run_session(&dir, script);
    assert!(output.contains("No such book in the catalog."));
    assert!(output.contains("Book removed."));

    let library_csv = std::fs::read_to_string(dir.path().join("Library.csv")).unwrap();
    assert!(library_csv.is_empty());
}

#[test]
fn test_add_and_list_users_sorted_by_last_name() {
    let dir = TempDir::new().unwrap();

    let script = concat!(
        "7\nJan\nnowak\n111\n",
        "7\nAnna\nKowalska\n222\n",
        "7\nJan\nKowalski\n111\n",
        "8\n0\n"
    );
    let output = run_session(&dir, script);
    assert!(output.contains("User added."));
    assert!(output.contains("A user with national id '111' already exists"));

    let kowalska = output.find("Anna Kowalska (222)").unwrap();
    let nowak = output.find("Jan nowak (111)").unwrap();
    assert!(kowalska < nowak);

    let users_csv = std::fs::read_to_string(dir.path().join("Users.csv")).unwrap();
    assert_eq!(users_csv.lines().count(), 2);
}

#[test]
fn test_magazine_lifecycle_through_the_menu() {
    let dir = TempDir::new().unwrap();

    let script = concat!(
        "2\nWired\nConde Nast\n2021\n1\n1\nen\n",
        "4\n",
        "5\nWired\nConde Nast\n2021\n1\n1\nen\n",
        "4\n0\n"
    );
    let output = run_session(&dir, script);
    assert!(output.contains("Magazine added."));
    assert!(output.contains("Wired - Conde Nast (2021-01-01), language: en"));
    assert!(output.contains("Magazine removed."));
    assert!(output.contains("No magazines in the catalog."));
}
