use super::{AppContext, MarkportCommand};
use markport::browser;
use markport::download::{ConflictAction, DirectoryDownloads};
use markport::error::{ExportError, Result};
use markport::exporter::{ExportOutcome, Exporter};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ExportCommand {
    pub out_dir: Option<PathBuf>,
    pub filename: Option<String>,
    pub overwrite: bool,
    pub open: bool,
}

impl ExportCommand {
    fn downloads(&self, ctx: &AppContext) -> DirectoryDownloads {
        let dir = self
            .out_dir
            .clone()
            .unwrap_or_else(|| ctx.config.download_dir.clone());
        let conflict = if self.overwrite || ctx.config.overwrite {
            ConflictAction::Overwrite
        } else {
            ConflictAction::Uniquify
        };
        DirectoryDownloads::new(&dir).with_conflict(conflict)
    }
}

impl MarkportCommand for ExportCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let downloads = self.downloads(ctx);
        let filename = self.filename.as_deref().unwrap_or(&ctx.config.filename);

        let outcome = Exporter::new(ctx.bus, &downloads)
            .with_filename(filename)
            .with_timeout(ctx.config.reply_timeout())
            .export_bookmarks()?;

        match outcome {
            ExportOutcome::Downloaded { path, bookmarks } => {
                eprintln!(
                    "✓ Exported {} bookmark(s) to {}",
                    bookmarks,
                    path.display()
                );
                if self.open || ctx.config.open_after_export {
                    browser::open_file(&path)?;
                }
                Ok(())
            }
            ExportOutcome::Aborted(e) => Err(ExportError::Channel(e)),
        }
    }
}
