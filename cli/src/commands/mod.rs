use markport::config::Config;
use markport::error::Result;
use markport::messaging::LocalBus;

pub struct AppContext<'a> {
    pub bus: &'a LocalBus,
    pub config: &'a Config,
    pub no_color: bool,
}

pub mod browsers;
pub mod export;
pub mod message;
pub mod tree;

pub trait MarkportCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()>;
}

/// Enum-based dispatch for commands (avoids Box<dyn MarkportCommand>)
#[derive(Debug)]
pub enum CommandEnum {
    Export(export::ExportCommand),
    Count(message::CountCommand),
    Send(message::SendCommand),
    Tree(tree::TreeCommand),
    Browsers(browsers::BrowsersCommand),
}

impl CommandEnum {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::Export(cmd) => cmd.execute(ctx),
            Self::Count(cmd) => cmd.execute(ctx),
            Self::Send(cmd) => cmd.execute(ctx),
            Self::Tree(cmd) => cmd.execute(ctx),
            Self::Browsers(cmd) => cmd.execute(ctx),
        }
    }
}
