use autoimport_common::{Diagnostic, DiagnosticCategory, LineMap};
use colored::Colorize;
use std::collections::HashMap;

/// Renders parse diagnostics as `file:line:col - error 1005: message`
/// followed by the offending source line.
pub struct Reporter {
    color: bool,
    sources: HashMap<String, (String, LineMap)>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: HashMap::new(),
        }
    }

    /// Register the text diagnostics for `file` point into.
    pub fn add_source(&mut self, file: &str, text: &str) {
        let map = LineMap::build(text);
        self.sources.insert(file.to_string(), (text.to_string(), map));
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = match self.position_for(&diagnostic.file, diagnostic.start) {
            Some((line, column)) => format!("{}:{}:{}", diagnostic.file, line, column),
            None if !diagnostic.file.is_empty() => diagnostic.file.clone(),
            None => "<unknown>".to_string(),
        };

        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        if diagnostic.code != 0 {
            output.push(' ');
            output.push_str(&diagnostic.code.to_string());
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) = self.format_snippet(diagnostic) {
            output.push_str(&snippet);
        }
        output
    }

    /// The source line with the diagnostic span underlined:
    ///
    /// ```text
    ///     2   foo(;
    ///             ~
    /// ```
    fn format_snippet(&self, diagnostic: &Diagnostic) -> Option<String> {
        let (source, _) = self.sources.get(&diagnostic.file)?;
        let (line_num, column) = self.position_for(&diagnostic.file, diagnostic.start)?;
        let line_text = source.lines().nth((line_num - 1) as usize)?;

        let mut underline = String::new();
        let span_start = column as usize - 1;
        let span_len = (diagnostic.length as usize).max(1);
        for (i, ch) in line_text.char_indices() {
            if i >= span_start + span_len {
                break;
            }
            let fill = if i < span_start { ' ' } else { '~' };
            if ch == '\t' {
                underline.extend(std::iter::repeat_n(fill, 4));
            } else {
                underline.push(fill);
            }
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {line_num:>3}   {line_text}\n        {underline}"))
    }

    fn position_for(&self, file: &str, offset: u32) -> Option<(u32, u32)> {
        let (_, line_map) = self.sources.get(file)?;
        let position = line_map.offset_to_position(offset);
        Some((position.line + 1, position.character + 1))
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "message",
        };
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }
}
