//! Printer for import declarations.
//!
//! Only import statements are ever printed; every other byte of the output
//! is copied from the original source by `emit_source_file`.

use crate::source_writer::{NewLineKind, SourceWriter};
use autoimport_parser::{Node, NodeArena, NodeIndex, node_flags, syntax_kind_ext};
use autoimport_scanner::SyntaxKind;

pub struct Printer<'a> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) source_text: &'a str,
    pub(crate) writer: SourceWriter,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena, source_text: &'a str) -> Printer<'a> {
        Printer {
            arena,
            source_text,
            writer: SourceWriter::with_capacity(
                source_text.len() + 64,
                NewLineKind::detect(source_text),
            ),
        }
    }

    pub fn take_output(self) -> String {
        self.writer.take_output()
    }

    pub fn get_output(&self) -> &str {
        self.writer.get_output()
    }

    // =========================================================================
    // Imports
    // =========================================================================

    /// Print an import declaration. Specifiers are grouped as
    /// `default, * as ns` or `default, { named }`; original module
    /// specifiers and attributes keep their source text.
    pub fn emit_import_declaration(&mut self, idx: NodeIndex) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };
        let Some(import) = self.arena.get_import_decl(node) else {
            return;
        };

        let mut default = None;
        let mut namespace = None;
        let mut named = Vec::new();
        for specifier in import.specifiers.iter() {
            match self.arena.kind_of(specifier) {
                Some(syntax_kind_ext::IMPORT_DEFAULT_SPECIFIER) => default = Some(specifier),
                Some(syntax_kind_ext::NAMESPACE_IMPORT) => namespace = Some(specifier),
                Some(syntax_kind_ext::IMPORT_SPECIFIER) => named.push(specifier),
                _ => {}
            }
        }

        self.write("import ");
        if default.is_some() || namespace.is_some() || !named.is_empty() {
            let mut need_comma = false;
            if let Some(spec) = default {
                self.emit_specifier_name(spec);
                need_comma = true;
            }
            if let Some(spec) = namespace {
                if need_comma {
                    self.write(", ");
                }
                self.write("* as ");
                self.emit_specifier_name(spec);
                need_comma = true;
            }
            if !named.is_empty() {
                if need_comma {
                    self.write(", ");
                }
                self.write("{ ");
                for (i, &spec) in named.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_import_specifier(spec);
                }
                self.write(" }");
            }
            self.write(" from ");
        }

        self.emit_string_literal(import.module_specifier);
        if import.attributes.is_some() {
            self.emit_attributes(node, import.module_specifier, import.attributes);
        }
        self.write(";");
    }

    fn emit_import_specifier(&mut self, idx: NodeIndex) {
        let Some(spec) = self.arena.get(idx).and_then(|n| self.arena.get_specifier(n)) else {
            return;
        };
        if spec.property_name.is_some() {
            self.emit_name(spec.property_name);
            self.write(" as ");
        }
        self.emit_name(spec.name);
    }

    fn emit_specifier_name(&mut self, idx: NodeIndex) {
        if let Some(spec) = self.arena.get(idx).and_then(|n| self.arena.get_specifier(n)) {
            self.emit_name(spec.name);
        }
    }

    /// Source text for `with { ... }`, from the end of the module specifier
    /// through the attribute list.
    fn emit_attributes(&mut self, decl: &Node, module_specifier: NodeIndex, attributes: NodeIndex) {
        let Some(spec_node) = self.arena.get(module_specifier) else {
            return;
        };
        let Some(attr_node) = self.arena.get(attributes) else {
            return;
        };
        if decl.has_flag(node_flags::SYNTHESIZED) || spec_node.has_flag(node_flags::SYNTHESIZED) {
            return;
        }
        let text = self.source_slice(spec_node.end, attr_node.end);
        self.write(text);
    }

    // =========================================================================
    // Names and literals
    // =========================================================================

    /// Identifier or module export name. Source nodes print verbatim.
    fn emit_name(&mut self, idx: NodeIndex) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };
        if !node.has_flag(node_flags::SYNTHESIZED) {
            let text = self.source_slice(node.pos, node.end);
            self.write(text);
            return;
        }
        if node.kind == SyntaxKind::StringLiteral as u16 {
            self.emit_string_literal(idx);
        } else if let Some(ident) = self.arena.get_identifier(node) {
            self.writer.write(&ident.escaped_text);
        }
    }

    fn emit_string_literal(&mut self, idx: NodeIndex) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };
        if !node.has_flag(node_flags::SYNTHESIZED) {
            let text = self.source_slice(node.pos, node.end);
            self.write(text);
            return;
        }
        if let Some(literal) = self.arena.get_literal(node) {
            let quoted = quote_string(&literal.text);
            self.write(&quoted);
        }
    }

    // =========================================================================
    // Output helpers
    // =========================================================================

    pub(crate) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    pub(crate) fn write_line(&mut self) {
        self.writer.write_line();
    }

    /// Slice of the original text, empty when out of range.
    pub(crate) fn source_slice(&self, start: u32, end: u32) -> &'a str {
        self.source_text
            .get(start as usize..end as usize)
            .unwrap_or_default()
    }
}

/// Double-quoted JavaScript string literal for `value`.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
