use crate::domain::catalog::Library;
use crate::domain::model::{Book, LibraryUser, Magazine, Publication};
use crate::domain::ports::FileManager;
use crate::utils::error::{LibraryError, Result};
use std::fmt;
use std::io::{BufRead, ErrorKind, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Exit,
    AddBook,
    AddMagazine,
    PrintBooks,
    PrintMagazines,
    DeleteMagazine,
    DeleteBook,
    AddUser,
    PrintUsers,
    FindBook,
}

impl MenuOption {
    pub const ALL: [MenuOption; 10] = [
        MenuOption::Exit,
        MenuOption::AddBook,
        MenuOption::AddMagazine,
        MenuOption::PrintBooks,
        MenuOption::PrintMagazines,
        MenuOption::DeleteMagazine,
        MenuOption::DeleteBook,
        MenuOption::AddUser,
        MenuOption::PrintUsers,
        MenuOption::FindBook,
    ];

    pub fn from_value(value: i64) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(LibraryError::InvalidSelection { value })
    }

    pub fn value(&self) -> usize {
        *self as usize
    }

    fn description(&self) -> &'static str {
        match self {
            MenuOption::Exit => "Exit and save the catalog",
            MenuOption::AddBook => "Add a new book",
            MenuOption::AddMagazine => "Add a new magazine",
            MenuOption::PrintBooks => "List available books",
            MenuOption::PrintMagazines => "List available magazines",
            MenuOption::DeleteMagazine => "Delete a magazine",
            MenuOption::DeleteBook => "Delete a book",
            MenuOption::AddUser => "Add a user",
            MenuOption::PrintUsers => "List users",
            MenuOption::FindBook => "Find a book by title",
        }
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.value(), self.description())
    }
}

/// The interactive menu loop. Generic over its streams so tests can feed a
/// scripted session through in-memory buffers; `main` wires in locked
/// stdin/stdout. Domain failures are reported to the output and the loop
/// keeps going; only stream errors propagate out.
pub struct LibraryControl<R, W, F> {
    input: R,
    output: W,
    file_manager: F,
    library: Library,
}

impl<R: BufRead, W: Write, F: FileManager> LibraryControl<R, W, F> {
    pub fn new(input: R, output: W, file_manager: F) -> Self {
        Self {
            input,
            output,
            file_manager,
            library: Library::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.load_catalog()?;
        loop {
            self.print_options()?;
            let option = self.read_option()?;
            tracing::debug!("Selected option {:?}", option);
            match option {
                MenuOption::Exit => {
                    self.exit()?;
                    return Ok(());
                }
                MenuOption::AddBook => self.add_book()?,
                MenuOption::AddMagazine => self.add_magazine()?,
                MenuOption::PrintBooks => self.print_books()?,
                MenuOption::PrintMagazines => self.print_magazines()?,
                MenuOption::DeleteMagazine => self.delete_magazine()?,
                MenuOption::DeleteBook => self.delete_book()?,
                MenuOption::AddUser => self.add_user()?,
                MenuOption::PrintUsers => self.print_users()?,
                MenuOption::FindBook => self.find_book()?,
            }
        }
    }

    /// Import failure is not fatal: report it and start empty.
    fn load_catalog(&mut self) -> Result<()> {
        match self.file_manager.import() {
            Ok(library) => {
                self.library = library;
                writeln!(self.output, "Catalog imported from file.")?;
            }
            Err(e) => {
                tracing::warn!("Import failed: {}", e);
                writeln!(self.output, "{}", e)?;
                writeln!(self.output, "Starting with an empty catalog.")?;
                self.library = Library::new();
            }
        }
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        match self.file_manager.export(&self.library) {
            Ok(()) => writeln!(self.output, "Catalog saved.")?,
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                writeln!(self.output, "{}", e)?;
            }
        }
        writeln!(self.output, "Bye.")?;
        Ok(())
    }

    fn print_options(&mut self) -> Result<()> {
        writeln!(self.output, "Pick an option:")?;
        for option in MenuOption::ALL {
            writeln!(self.output, "{}", option)?;
        }
        Ok(())
    }

    /// Re-prompts until the user supplies a number that maps to an option.
    fn read_option(&mut self) -> Result<MenuOption> {
        loop {
            match self.read_number::<i64>("") {
                Ok(value) => match MenuOption::from_value(value) {
                    Ok(option) => return Ok(option),
                    Err(e) => writeln!(self.output, "{}", e)?,
                },
                Err(LibraryError::NonNumericInput) => {
                    writeln!(self.output, "{}", LibraryError::NonNumericInput)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn add_book(&mut self) -> Result<()> {
        match self.read_book() {
            Ok(book) => match self.library.add_publication(book.into()) {
                Ok(()) => writeln!(self.output, "Book added.")?,
                Err(e) => writeln!(self.output, "{}", e)?,
            },
            Err(LibraryError::NonNumericInput) => {
                writeln!(self.output, "Could not create the book, invalid input.")?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn add_magazine(&mut self) -> Result<()> {
        match self.read_magazine() {
            Ok(magazine) => match self.library.add_publication(magazine.into()) {
                Ok(()) => writeln!(self.output, "Magazine added.")?,
                Err(e) => writeln!(self.output, "{}", e)?,
            },
            Err(LibraryError::NonNumericInput) => {
                writeln!(self.output, "Could not create the magazine, invalid input.")?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Deletion re-reads the whole entity and removes on full value
    /// equality, same as the add path builds it.
    fn delete_book(&mut self) -> Result<()> {
        match self.read_book() {
            Ok(book) => {
                if self.library.remove_publication(&book.into()) {
                    writeln!(self.output, "Book removed.")?;
                } else {
                    writeln!(self.output, "No such book in the catalog.")?;
                }
            }
            Err(LibraryError::NonNumericInput) => {
                writeln!(self.output, "Could not create the book, invalid input.")?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn delete_magazine(&mut self) -> Result<()> {
        match self.read_magazine() {
            Ok(magazine) => {
                if self.library.remove_publication(&magazine.into()) {
                    writeln!(self.output, "Magazine removed.")?;
                } else {
                    writeln!(self.output, "No such magazine in the catalog.")?;
                }
            }
            Err(LibraryError::NonNumericInput) => {
                writeln!(self.output, "Could not create the magazine, invalid input.")?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn add_user(&mut self) -> Result<()> {
        let user = self.read_user()?;
        match self.library.add_user(user) {
            Ok(()) => writeln!(self.output, "User added.")?,
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(())
    }

    fn print_books(&mut self) -> Result<()> {
        let books = self.library.sorted_publications(|a, b| {
            a.title().to_lowercase().cmp(&b.title().to_lowercase())
        });
        let mut any = false;
        for publication in books.iter().filter(|p| p.is_book()) {
            writeln!(self.output, "{}", publication)?;
            any = true;
        }
        if !any {
            writeln!(self.output, "No books in the catalog.")?;
        }
        Ok(())
    }

    fn print_magazines(&mut self) -> Result<()> {
        let magazines = self.library.sorted_publications(|a, b| {
            a.title().to_lowercase().cmp(&b.title().to_lowercase())
        });
        let mut any = false;
        for publication in magazines.iter().filter(|p| p.is_magazine()) {
            writeln!(self.output, "{}", publication)?;
            any = true;
        }
        if !any {
            writeln!(self.output, "No magazines in the catalog.")?;
        }
        Ok(())
    }

    fn print_users(&mut self) -> Result<()> {
        let users = self.library.sorted_users(|a, b| {
            a.last_name.to_lowercase().cmp(&b.last_name.to_lowercase())
        });
        if users.is_empty() {
            writeln!(self.output, "No users registered.")?;
            return Ok(());
        }
        for user in users {
            writeln!(self.output, "{}", user)?;
        }
        Ok(())
    }

    fn find_book(&mut self) -> Result<()> {
        let title = self.read_string("Title of the book to find:")?;
        match self.library.find_by_title(&title) {
            Some(publication) => writeln!(self.output, "{}", publication)?,
            None => writeln!(self.output, "No such title in the catalog.")?,
        }
        Ok(())
    }

    fn read_book(&mut self) -> Result<Book> {
        let title = self.read_string("Title:")?;
        let author = self.read_string("Author:")?;
        let year = self.read_number("Publication year:")?;
        let pages = self.read_number("Pages:")?;
        let publisher = self.read_string("Publisher:")?;
        let isbn = self.read_string("ISBN:")?;
        Ok(Book::new(title, author, year, pages, publisher, isbn))
    }

    fn read_magazine(&mut self) -> Result<Magazine> {
        let title = self.read_string("Title:")?;
        let publisher = self.read_string("Publisher:")?;
        let year = self.read_number("Year:")?;
        let month = self.read_number("Month:")?;
        let day = self.read_number("Day:")?;
        let language = self.read_string("Language:")?;
        Ok(Magazine::new(title, publisher, year, month, day, language))
    }

    fn read_user(&mut self) -> Result<LibraryUser> {
        let first_name = self.read_string("First name:")?;
        let last_name = self.read_string("Last name:")?;
        let national_id = self.read_string("National id:")?;
        Ok(LibraryUser::new(first_name, last_name, national_id))
    }

    fn read_string(&mut self, prompt: &str) -> Result<String> {
        if !prompt.is_empty() {
            writeln!(self.output, "{}", prompt)?;
        }
        self.read_line()
    }

    fn read_number<T: FromStr>(&mut self, prompt: &str) -> Result<T> {
        let line = self.read_string(prompt)?;
        line.parse().map_err(|_| LibraryError::NonNumericInput)
    }

    fn read_line(&mut self) -> Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(LibraryError::IoError(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                "input stream closed",
            )));
        }
        Ok(line.trim().to_string())
    }
}
