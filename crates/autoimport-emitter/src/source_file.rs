//! Whole-file emit by splicing printed imports into the original text.

use crate::printer::Printer;
use autoimport_parser::{NodeArena, NodeIndex, node_flags};
use tracing::debug;

/// Where a synthesized statement goes in the original text.
#[derive(Clone, Copy, Debug)]
enum Anchor {
    /// At the start of a line: print the statement, then a newline.
    LineStart(u32),
    /// Right after a statement or directive: print a newline, then the statement.
    AfterNode(u32),
}

impl Anchor {
    fn offset(self) -> u32 {
        match self {
            Anchor::LineStart(pos) | Anchor::AfterNode(pos) => pos,
        }
    }
}

/// Regenerate the text of the file rooted at `root`.
///
/// Synthesized import declarations are inserted next to their neighbours in
/// the statement list, modified ones are reprinted in place, and all other
/// text is copied unchanged.
pub fn emit_source_file(arena: &NodeArena, root: NodeIndex) -> String {
    let Some(file) = arena.get(root).and_then(|node| arena.get_source_file(node)) else {
        return String::new();
    };
    let text: &str = &file.text;
    let mut printer = Printer::new(arena, text);

    let mut cursor = 0u32;
    let mut anchor = body_start_anchor(arena, &file.directives, text);
    let mut synthesized = 0usize;
    let mut reprinted = 0usize;

    for stmt in file.statements.iter() {
        let Some(node) = arena.get(stmt) else {
            continue;
        };

        if node.has_flag(node_flags::SYNTHESIZED) {
            let offset = anchor.offset().max(cursor);
            printer.copy_source(cursor, offset);
            cursor = offset;
            match anchor {
                Anchor::LineStart(_) => {
                    printer.emit_import_declaration(stmt);
                    printer.write_line();
                }
                Anchor::AfterNode(_) => {
                    printer.write_line();
                    printer.emit_import_declaration(stmt);
                }
            }
            synthesized += 1;
            continue;
        }

        if node.has_flag(node_flags::MODIFIED) {
            printer.copy_source(cursor, node.pos);
            printer.emit_import_declaration(stmt);
            cursor = node.end;
            reprinted += 1;
        }
        anchor = Anchor::AfterNode(node.end);
    }

    printer.copy_source(cursor, text.len() as u32);
    debug!(synthesized, reprinted, "emitted source file");
    printer.take_output()
}

/// The first statement position: after the directive prologue, or after a
/// shebang line, or the very start of the file.
fn body_start_anchor(
    arena: &NodeArena,
    directives: &autoimport_parser::NodeList,
    text: &str,
) -> Anchor {
    if let Some(last) = directives.nodes.last().and_then(|&d| arena.get(d)) {
        return Anchor::AfterNode(last.end);
    }
    if text.starts_with("#!") {
        return match memchr::memchr(b'\n', text.as_bytes()) {
            Some(newline) => Anchor::LineStart(newline as u32 + 1),
            None => Anchor::AfterNode(text.len() as u32),
        };
    }
    Anchor::LineStart(0)
}

impl Printer<'_> {
    fn copy_source(&mut self, start: u32, end: u32) {
        if start < end {
            let text = self.source_slice(start, end);
            self.write(text);
        }
    }
}
