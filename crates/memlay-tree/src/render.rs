//! Indented text rendering.

use std::io::{self, Write};

use crate::{FieldTree, NodeId};

/// Spaces added per nesting level unless configured otherwise.
pub const DEFAULT_INDENT: usize = 8;

/// Options controlling text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Also print member sizes and array dimensions.
    pub detailed: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            detailed: false,
        }
    }
}

/// Write the whole tree, one line per member, root excluded.
pub fn write_text<W: Write>(tree: &FieldTree, writer: &mut W, options: &RenderOptions) -> io::Result<()> {
    write_text_from(tree, NodeId::ROOT, writer, options)
}

/// Write the members below `node`; `node` itself is not printed.
///
/// Indentation counts levels below `node`, so its direct children start in
/// column 0.
pub fn write_text_from<W: Write>(
    tree: &FieldTree,
    node: NodeId,
    writer: &mut W,
    options: &RenderOptions,
) -> io::Result<()> {
    write_children(tree, node, 0, writer, options)
}

/// Render the whole tree into a string.
pub fn render_text(tree: &FieldTree, options: &RenderOptions) -> String {
    let mut output = Vec::new();
    let _ = write_text(tree, &mut output, options);
    String::from_utf8_lossy(&output).into_owned()
}

fn write_children<W: Write>(
    tree: &FieldTree,
    parent: NodeId,
    level: usize,
    writer: &mut W,
    options: &RenderOptions,
) -> io::Result<()> {
    for (id, node) in tree.children(parent) {
        let Some(record) = node.record() else {
            continue;
        };

        write!(
            writer,
            "{:indent$}{} @{}",
            "",
            record.name,
            record.offset,
            indent = level * options.indent
        )?;
        if let Some(type_name) = &record.type_name {
            write!(writer, " ({})", type_name)?;
        }
        if options.detailed {
            write!(writer, " size={}", record.size)?;
            for dim in record.array_dims() {
                write!(writer, "[{}]", dim)?;
            }
        }
        writeln!(writer)?;

        if node.has_children() {
            write_children(tree, id, level + 1, writer, options)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use memlay_record::FieldRecord;

    fn sample() -> FieldTree {
        FieldTree::from_records([
            FieldRecord::new(0, "hdr", 0),
            FieldRecord::new(1, "magic", 0).with_size(4).with_type("uint32_t"),
            FieldRecord::new(1, "inner", 4),
            FieldRecord::new(2, "flag", 0).with_size(1).with_type("char"),
            FieldRecord::new(0, "buf", 16)
                .with_size(1)
                .with_type("char")
                .with_array_dims(&[4, 8])
                .unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_render_default() {
        let text = render_text(&sample(), &RenderOptions::default());
        let expected = "\
hdr @0
        magic @0 (uint32_t)
        inner @4
                flag @0 (char)
buf @16 (char)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_custom_indent() {
        let options = RenderOptions {
            indent: 2,
            ..Default::default()
        };
        let text = render_text(&sample(), &options);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "  magic @0 (uint32_t)");
        assert_eq!(lines[3], "    flag @0 (char)");
    }

    #[test]
    fn test_render_detailed() {
        let options = RenderOptions {
            detailed: true,
            ..Default::default()
        };
        let text = render_text(&sample(), &options);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "hdr @0 size=0");
        assert_eq!(lines[4], "buf @16 (char) size=1[4][8]");
    }

    #[test]
    fn test_render_empty_tree() {
        let tree = FieldTree::from_records(Vec::<FieldRecord>::new()).unwrap();
        assert_eq!(render_text(&tree, &RenderOptions::default()), "");
    }

    #[test]
    fn test_missing_type_has_no_parens() {
        let tree = FieldTree::from_records([FieldRecord::new(0, "anon", 8)]).unwrap();
        assert_eq!(render_text(&tree, &RenderOptions::default()), "anon @8\n");
    }

    #[test]
    fn test_render_subtree() {
        let tree = sample();
        let hdr = tree.find_path("hdr").unwrap();

        let mut output = Vec::new();
        write_text_from(&tree, hdr, &mut output, &RenderOptions::default()).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "magic @0 (uint32_t)\ninner @4\n        flag @0 (char)\n"
        );
    }
}
