use super::{AppContext, MarkportCommand};
use log::debug;
use markport::error::{ExportError, Result};
use markport::messaging::MessageDispatcher;
use markport::models::errors::ChannelError;
use markport::models::message::{ExportResponse, Message};

#[derive(Debug, Clone)]
pub struct CountCommand {
    pub count: i64,
}

impl MarkportCommand for CountCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        // Fire and forget: the responder only logs counts.
        let pending = ctx.bus.send_message(Message::count(self.count))?;
        debug!("Sent count {} as request {}", self.count, pending.id());
        eprintln!("Sent count {}", self.count);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SendCommand {
    pub json: String,
}

impl SendCommand {
    /// Send the raw message. `None` means the responder handled it without replying.
    pub fn dispatch(&self, ctx: &AppContext) -> Result<Option<ExportResponse>> {
        let value: serde_json::Value = serde_json::from_str(&self.json)
            .map_err(|e| ExportError::InvalidInput(format!("Message is not valid JSON: {}", e)))?;
        let message = Message::from_value(value);
        debug!("Sending {:?}", message);

        let pending = ctx.bus.send_message(message)?;
        match pending.wait(ctx.config.reply_timeout()) {
            Ok(response) => Ok(Some(response)),
            Err(ChannelError::PortClosed) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl MarkportCommand for SendCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self.dispatch(ctx)? {
            Some(response) => println!("{}", serde_json::to_string_pretty(&response)?),
            None => eprintln!("No response"),
        }
        Ok(())
    }
}
