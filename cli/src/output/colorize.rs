use markport::models::bookmark::{BookmarkNode, NodeType};
use owo_colors::OwoColorize;

pub trait Colorize {
    fn to_colored(&self) -> String;
}

/// Indented outline of a bookmark tree: folders in bold, leaves with their URL.
pub struct ColorizeTree<'a>(pub &'a [BookmarkNode]);

/// Same outline without escape codes, for `--nc` and pipes.
pub struct PlainTree<'a>(pub &'a [BookmarkNode]);

impl<'a> Colorize for ColorizeTree<'a> {
    fn to_colored(&self) -> String {
        let mut s = String::new();
        for node in self.0 {
            render(node, 0, true, &mut s);
        }
        s
    }
}

impl<'a> PlainTree<'a> {
    pub fn render(&self) -> String {
        let mut s = String::new();
        for node in self.0 {
            render(node, 0, false, &mut s);
        }
        s
    }
}

fn render(node: &BookmarkNode, depth: usize, color: bool, out: &mut String) {
    let indent = "  ".repeat(depth);

    if node.node_type == Some(NodeType::Separator) {
        out.push_str(&format!("{}{}\n", indent, "----"));
        return;
    }

    if node.is_folder() {
        let title = if node.title.is_empty() {
            "(root)"
        } else {
            node.title.as_str()
        };
        if color {
            out.push_str(&format!(
                "{}{} {} {}\n",
                indent,
                "+".red(),
                title.bold().green(),
                format!("[{}]", node.id).bright_blue()
            ));
        } else {
            out.push_str(&format!("{}+ {} [{}]\n", indent, title, node.id));
        }
        for child in node.children.as_deref().unwrap_or_default() {
            render(child, depth + 1, color, out);
        }
        return;
    }

    let url = node.url.as_deref().unwrap_or_default();
    if color {
        out.push_str(&format!(
            "{}{} {} {}\n",
            indent,
            ">".red(),
            node.title,
            url.yellow()
        ));
    } else {
        out.push_str(&format!("{}> {} {}\n", indent, node.title, url));
    }
}
