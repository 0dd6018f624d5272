use std::fmt;

use crate::{NodeId, NodeType, Tree};

/// Render the reachable part of a tree, one line per node.
///
/// Each line is indented by one tab per depth level. Tag lines read
/// `<div> : class = "main" | id = "head menu"`, text lines read
/// `<data> : some text`. Attribute keys and value tokens come out sorted.
#[must_use]
pub fn render(tree: &Tree) -> String {
    tree.to_string()
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (line, id) in self.descendants(self.root()).enumerate() {
            if line > 0 {
                writeln!(f)?;
            }
            write_node(self, id, f)?;
        }
        Ok(())
    }
}

fn write_node(tree: &Tree, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Some(node) = tree.get(id) else {
        return Ok(());
    };
    for _ in 0..node.depth {
        f.write_str("\t")?;
    }
    match &node.node_type {
        NodeType::Tag(data) => {
            write!(f, "<{}> : ", data.name)?;
            for (i, (key, tokens)) in data.attrs.iter().enumerate() {
                if i > 0 {
                    f.write_str(" | ")?;
                }
                let value: Vec<&str> = tokens.iter().map(String::as_str).collect();
                write!(f, "{key} = \"{}\"", value.join(" "))?;
            }
            Ok(())
        }
        NodeType::Text(text) => write!(f, "<data> : {text}"),
    }
}
