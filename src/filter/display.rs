use super::{Filter, GroupKind};
use std::fmt::{self, Write};

/// Default indent width for pretty output
pub const DEFAULT_INDENT: usize = 4;

/// Layout of serialized filters
///
/// An `indent` of zero renders everything on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub indent: usize,
    pub indent_char: char,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::compact()
    }
}

impl FormatOptions {
    /// Single line, no separators
    pub fn compact() -> Self {
        Self {
            indent: 0,
            indent_char: ' ',
        }
    }

    /// One filter per line, indented by four spaces per level
    pub fn pretty() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            indent_char: ' ',
        }
    }

    pub fn indent(mut self, width: usize) -> Self {
        self.indent = width;
        self
    }

    pub fn indent_char(mut self, c: char) -> Self {
        self.indent_char = c;
        self
    }

    pub fn is_compact(&self) -> bool {
        self.indent == 0
    }
}

impl Filter {
    /// Render with an explicit layout, starting at nesting level zero
    pub fn to_string_with(&self, options: &FormatOptions) -> String {
        self.to_string_at(options, 0)
    }

    /// Render with an explicit layout, starting at nesting `level`
    pub fn to_string_at(&self, options: &FormatOptions, level: usize) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_filter(&mut out, self, options, level);
        out
    }
}

/// `{}` renders canonical text, `{:#}` the default pretty layout
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = if f.alternate() {
            FormatOptions::pretty()
        } else {
            FormatOptions::compact()
        };
        write_filter(f, self, &options, 0)
    }
}

fn write_indent(out: &mut impl Write, options: &FormatOptions, level: usize) -> fmt::Result {
    for _ in 0..level * options.indent {
        out.write_char(options.indent_char)?;
    }
    Ok(())
}

fn write_filter(
    out: &mut impl Write,
    filter: &Filter,
    options: &FormatOptions,
    level: usize,
) -> fmt::Result {
    write_indent(out, options, level)?;

    match filter {
        Filter::Comparison(c) => write!(out, "({}{}{})", c.attribute, c.operator, c.value),
        // `!` keeps its child on the same line, whatever the layout.
        Filter::Group(g) if options.is_compact() || g.kind == GroupKind::Not => {
            write!(out, "({}", g.kind.symbol())?;
            for child in &g.children {
                write_filter(out, child, &FormatOptions::compact(), 0)?;
            }
            out.write_char(')')
        }
        Filter::Group(g) => {
            write!(out, "({}", g.kind.symbol())?;
            for child in &g.children {
                out.write_char('\n')?;
                write_filter(out, child, options, level + 1)?;
            }
            out.write_char('\n')?;
            write_indent(out, options, level)?;
            out.write_char(')')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_stays_inline_when_pretty() {
        let filter = Filter::parse("(&(!(|(a=1)(b=2)))(c=3))").unwrap();
        assert_eq!(
            filter.to_string_with(&FormatOptions::pretty()),
            "(&\n    (!(|(a=1)(b=2)))\n    (c=3)\n)"
        );
    }

    #[test]
    fn test_level_offsets_whole_output() {
        let filter = Filter::parse("(|(a=1)(b=2))").unwrap();
        assert_eq!(
            filter.to_string_at(&FormatOptions::pretty().indent(2), 1),
            "  (|\n    (a=1)\n    (b=2)\n  )"
        );
    }

    #[test]
    fn test_alternate_display_is_pretty() {
        let filter = Filter::parse("(&(a=1)(b=2))").unwrap();
        assert_eq!(format!("{filter:#}"), "(&\n    (a=1)\n    (b=2)\n)");
        assert_eq!(format!("{filter}"), "(&(a=1)(b=2))");
    }

    #[test]
    fn test_comparison_indent() {
        let filter = Filter::parse("(a=1)").unwrap();
        assert_eq!(filter.to_string_at(&FormatOptions::pretty(), 2), "        (a=1)");
        assert_eq!(filter.to_string_at(&FormatOptions::compact(), 2), "(a=1)");
    }
}
