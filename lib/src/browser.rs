use crate::error::Result;
use std::path::Path;

/// Hand a saved export to the system's default handler.
pub fn open_file(path: &Path) -> Result<()> {
    open::that(path)?;
    Ok(())
}
