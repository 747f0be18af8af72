use std::io;

use termcolor::{Color, ColorSpec, WriteColor};

use crate::Diagnostic;

const TAB: &str = "    ";

impl Diagnostic {
    /// Renders the diagnostic as a location line and a caret-underlined
    /// snippet of the offending source line:
    ///
    /// ```text
    /// error: syntax error
    /// In demo.cfg:2:8
    /// 2 | (def a 007);
    ///   |        ^^^ numbers may not start with `0`
    /// ```
    ///
    /// Line and column are one-based; the column counts characters, with
    /// tabs rendered as four spaces.
    pub fn write_to_stream(
        &self,
        name: &str,
        source: &str,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        let start = self.span.start.min(source.len());
        let end = self.span.end.clamp(start, source.len());

        let line_start = source[..start].rfind('\n').map_or(0, |at| at + 1);
        let line_end = source[start..]
            .find('\n')
            .map_or(source.len(), |at| start + at);

        let line_num = source[..start].matches('\n').count() + 1;
        let col_num = source[line_start..start].chars().count() + 1;

        stream.set_color(&primary())?;
        write!(stream, "error:")?;
        stream.reset()?;
        let message = &self.message;
        writeln!(stream, " {message}")?;

        stream.set_color(&subtle())?;
        writeln!(stream, "In {name}:{line_num}:{col_num}")?;

        let gutter = line_num.to_string();
        let width = gutter.len();

        write!(stream, "{gutter} | ")?;
        stream.reset()?;
        writeln!(stream, "{}", source[line_start..line_end].replace('\t', TAB))?;

        stream.set_color(&subtle())?;
        write!(stream, "{:width$} | ", "")?;
        stream.reset()?;

        let offset: usize = source[line_start..start]
            .chars()
            .map(|ch| if ch == '\t' { TAB.len() } else { 1 })
            .sum();
        let carets = source[start..end.min(line_end)].chars().count().max(1);

        stream.set_color(&primary())?;
        write!(stream, "{:offset$}", "")?;
        for _ in 0..carets {
            write!(stream, "^")?;
        }
        let label = &self.label;
        writeln!(stream, " {label}")?;
        stream.reset()?;

        Ok(())
    }
}

fn primary() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Red)).set_bold(true);
    spec
}

fn subtle() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Cyan));
    spec
}

#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use crate::span::Span;
    use crate::Diagnostic;

    fn render(diagnostic: &Diagnostic, source: &str) -> String {
        let mut out = NoColor::new(Vec::new());
        diagnostic
            .write_to_stream("demo.cfg", source, &mut out)
            .unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn snippet_on_second_line() {
        let source = "x\n(def a 007);";
        let diagnostic = Diagnostic::error("syntax error", "bad number", Span::new(9, 12));

        assert_eq!(
            render(&diagnostic, source),
            concat!(
                "error: syntax error\n",
                "In demo.cfg:2:8\n",
                "2 | (def a 007);\n",
                "  |        ^^^ bad number\n",
            )
        );
    }

    #[test]
    fn snippet_at_end_of_input() {
        let source = "(def a 1)";
        let diagnostic = Diagnostic::error("syntax error", "expected `;`", Span::empty(9));

        assert_eq!(
            render(&diagnostic, source),
            concat!(
                "error: syntax error\n",
                "In demo.cfg:1:10\n",
                "1 | (def a 1)\n",
                "  |          ^ expected `;`\n",
            )
        );
    }

    #[test]
    fn tabs_render_four_wide() {
        let source = "\t@";
        let diagnostic = Diagnostic::error("syntax error", "unknown character", Span::new(1, 2));

        assert_eq!(
            render(&diagnostic, source),
            concat!(
                "error: syntax error\n",
                "In demo.cfg:1:2\n",
                "1 |     @\n",
                "  |     ^ unknown character\n",
            )
        );
    }
}
