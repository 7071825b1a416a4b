use crate::domain::catalog::Library;
use crate::utils::error::Result;

/// Persistence port. The control loop only ever talks to this trait, so
/// tests can swap the CSV backend for an in-memory one.
pub trait FileManager {
    fn import(&self) -> Result<Library>;
    fn export(&self, library: &Library) -> Result<()>;
}
