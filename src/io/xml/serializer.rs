//! Dump writer - serialize an Octree to the tag-based text format

use crate::core::{Node, Octree};
use std::fmt::Write as FmtWrite;

/// Serialize the whole tree to the dump format. Output is
/// deterministic: the same tree always produces identical text.
pub fn serialize_xml(tree: &Octree) -> String {
    let mut output = String::new();
    serialize_node(tree.root(), 0, &mut output);
    output
}

/// Write the dump to an `io::Write` sink.
pub fn write_xml<W: std::io::Write>(tree: &Octree, sink: &mut W) -> std::io::Result<()> {
    sink.write_all(serialize_xml(tree).as_bytes())
}

/// Emit one node at the given depth: opening tag with the volume's
/// center and half-extent, then either the stored lines (leaf) or the
/// eight children in fixed octant order, then the closing tag.
fn serialize_node(node: &Node, depth: usize, output: &mut String) {
    let indent = "\t".repeat(depth);
    let v = node.volume();
    let _ = writeln!(
        output,
        "{}<node x=\"{}\" y=\"{}\" z=\"{}\" dim=\"{}\">",
        indent, v.center.x, v.center.y, v.center.z, v.half_dim
    );

    match node.children() {
        None => {
            for line in node.records() {
                let _ = writeln!(
                    output,
                    "{}\t<line x=\"{}\" y=\"{}\" z=\"{}\" len=\"{}\" char=\"{}\" />",
                    indent,
                    line.pos.x,
                    line.pos.y,
                    line.pos.z,
                    line.length,
                    escape_label(line.label)
                );
            }
        }
        Some(children) => {
            for child in children.iter() {
                serialize_node(child, depth + 1, output);
            }
        }
    }

    let _ = writeln!(output, "{}</node>", indent);
}

/// Replace the five markup-reserved characters with named escapes.
/// The `<`/`>` mapping is intentionally reversed; see the module docs.
fn escape_label(label: char) -> String {
    match label {
        '"' => "&quot;".to_string(),
        '\'' => "&apos;".to_string(),
        '>' => "&lt;".to_string(),
        '<' => "&gt;".to_string(),
        '&' => "&amp;".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Line, Volume};
    use glam::IVec3;

    #[test]
    fn test_serialize_empty_root() {
        let tree = Octree::with_default_capacity(Volume::new(IVec3::splat(128), 128));
        let xml = serialize_xml(&tree);
        assert_eq!(xml, "<node x=\"128\" y=\"128\" z=\"128\" dim=\"128\">\n</node>\n");
    }

    #[test]
    fn test_serialize_leaf_lines() {
        let mut tree = Octree::new(Volume::new(IVec3::splat(128), 128), 2);
        assert!(tree.insert(Line::new(0, 51, 1, 4, 'k')));
        let xml = serialize_xml(&tree);
        assert!(xml.contains("\t<line x=\"0\" y=\"51\" z=\"1\" len=\"4\" char=\"k\" />\n"));
    }

    #[test]
    fn test_escape_table() {
        assert_eq!(escape_label('"'), "&quot;");
        assert_eq!(escape_label('\''), "&apos;");
        // Reversed mapping is the format's contract
        assert_eq!(escape_label('>'), "&lt;");
        assert_eq!(escape_label('<'), "&gt;");
        assert_eq!(escape_label('&'), "&amp;");
        assert_eq!(escape_label('a'), "a");
    }

    #[test]
    fn test_indent_tracks_depth() {
        let mut tree = Octree::with_default_capacity(Volume::new(IVec3::splat(128), 128));
        // Two far-apart points force one subdivision of the root
        assert!(tree.insert(Line::new(10, 10, 10, 1, 'a')));
        assert!(tree.insert(Line::new(200, 200, 200, 1, 'b')));

        let xml = serialize_xml(&tree);
        let mut depth = 0usize;
        for raw in xml.lines() {
            let tabs = raw.chars().take_while(|&c| c == '\t').count();
            let trimmed = raw.trim_start_matches('\t');
            if trimmed.starts_with("</node>") {
                depth -= 1;
                assert_eq!(tabs, depth);
            } else if trimmed.starts_with("<node") {
                assert_eq!(tabs, depth);
                depth += 1;
            } else {
                // Line elements sit one level under their leaf
                assert_eq!(tabs, depth);
            }
        }
        assert_eq!(depth, 0);
    }
}
