use super::{AppContext, MarkportCommand};
use crate::output::colorize::{Colorize, ColorizeTree, PlainTree};
use markport::error::Result;
use markport::exporter::request_tree;

#[derive(Debug, Clone)]
pub struct TreeCommand;

impl TreeCommand {
    pub fn render(&self, ctx: &AppContext) -> Result<String> {
        let tree = request_tree(ctx.bus, ctx.config.reply_timeout())?;

        Ok(if ctx.no_color {
            PlainTree(&tree).render()
        } else {
            ColorizeTree(&tree).to_colored()
        })
    }
}

impl MarkportCommand for TreeCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        print!("{}", self.render(ctx)?);
        Ok(())
    }
}
