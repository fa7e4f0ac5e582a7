use super::{AppContext, MarkportCommand};
use crate::cli::get_exe_name;
use markport::error::Result;
use markport::store::{detect_browsers, BrowserProfile};
use owo_colors::OwoColorize;

#[derive(Debug, Clone)]
pub struct BrowsersCommand;

fn describe(profile: &BrowserProfile, no_color: bool) -> String {
    let path = profile.path.display().to_string();
    if no_color {
        format!("  • {}  {}", profile.display_string(), path)
    } else {
        format!("  • {}  {}", profile.display_string().green(), path.yellow())
    }
}

impl MarkportCommand for BrowsersCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let profiles = detect_browsers();
        if profiles.is_empty() {
            eprintln!("No browser profiles detected.");
            eprintln!(
                "Point at a bookmarks file directly with: {} --bookmarks <FILE>",
                get_exe_name()
            );
        } else {
            eprintln!("Detected browser profiles:");
            for profile in &profiles {
                eprintln!("{}", describe(profile, ctx.no_color));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markport::store::BrowserType;
    use std::path::PathBuf;

    #[test]
    fn test_describe_plain() {
        let profile = BrowserProfile {
            browser: BrowserType::Edge,
            profile_name: "Default".to_string(),
            path: PathBuf::from("/home/u/.config/microsoft-edge/Default/Bookmarks"),
        };
        assert_eq!(
            describe(&profile, true),
            "  • Edge (Default)  /home/u/.config/microsoft-edge/Default/Bookmarks"
        );
    }
}
