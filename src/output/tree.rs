//! Static tree rendering for the terminal

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::Node;

/// Renders a tree with box-drawing connectors, folder coloring, and size
/// annotations.
pub struct TreeFormatter {
    use_color: bool,
}

impl TreeFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Format the whole tree into a plain string.
    pub fn format(&self, root: &Node) -> String {
        let mut out = String::new();
        out.push_str(root.name());
        out.push('\n');
        Self::format_children(root, "", &mut out);

        let folders = count_folders(root);
        let files = root.node_count() - folders;
        out.push_str(&format!("\n{} folders, {} files\n", folders, files));
        out
    }

    fn format_children(node: &Node, prefix: &str, out: &mut String) {
        let children = node.children();
        for (i, child) in children.iter().enumerate() {
            let is_last = i == children.len() - 1;
            let connector = if is_last { "└── " } else { "├── " };
            out.push_str(prefix);
            out.push_str(connector);
            out.push_str(child.name());
            if let Some(size) = child.size() {
                out.push_str(&format!(" ({})", size));
            }
            out.push('\n');

            let child_prefix = if is_last {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };
            Self::format_children(child, &child_prefix, out);
        }
    }

    /// Print the tree to stdout with colors.
    pub fn print(&self, root: &Node) -> io::Result<()> {
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.print_node(root, &mut stdout, "", true, true)?;

        let folders = count_folders(root);
        let files = root.node_count() - folders;
        writeln!(stdout)?;
        writeln!(stdout, "{} folders, {} files", folders, files)?;
        Ok(())
    }

    fn print_node(
        &self,
        node: &Node,
        stdout: &mut StandardStream,
        prefix: &str,
        is_last: bool,
        is_root: bool,
    ) -> io::Result<()> {
        if !is_root {
            let connector = if is_last { "└── " } else { "├── " };
            write!(stdout, "{}{}", prefix, connector)?;
        }

        if node.is_folder() {
            let mut spec = ColorSpec::new();
            spec.set_fg(Some(Color::Blue)).set_bold(true);
            stdout.set_color(&spec)?;
            write!(stdout, "{}", node.name())?;
            stdout.reset()?;
        } else {
            write!(stdout, "{}", node.name())?;
        }

        if let Some(size) = node.size() {
            let mut dim = ColorSpec::new();
            dim.set_fg(Some(Color::Ansi256(244)));
            stdout.set_color(&dim)?;
            write!(stdout, " ({})", size)?;
            stdout.reset()?;
        }
        writeln!(stdout)?;

        let children = node.children();
        for (i, child) in children.iter().enumerate() {
            let child_is_last = i == children.len() - 1;
            let child_prefix = if is_root {
                String::new()
            } else if is_last {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };
            self.print_node(child, stdout, &child_prefix, child_is_last, false)?;
        }

        Ok(())
    }
}

fn count_folders(node: &Node) -> usize {
    if node.is_folder() {
        1 + node.children().iter().map(count_folders).sum::<usize>()
    } else {
        0
    }
}
