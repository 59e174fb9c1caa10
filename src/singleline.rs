use std::fmt;

use crate::{buffer::Buffer, text::Text};

/// A printer that collapses the document onto one line.
///
/// It mirrors the [`PrettyPrinter`](crate::PrettyPrinter) surface but makes
/// no break decisions: breakables emit their separators, `if_break` bodies
/// are skipped while `if_flat` bodies run, and indentation is ignored.
/// Line-suffix content collects in a side buffer that
/// [`flush`](SingleLinePrinter::flush) appends after everything else.
///
/// ```
/// use prettier_print::singleline_format;
///
/// let out = singleline_format(String::new(), |p| {
///     p.group(|p| {
///         p.text("a");
///         p.breakable_space();
///         p.text("b");
///     });
/// });
/// assert_eq!(out, "a b");
/// ```
pub struct SingleLinePrinter<O: Buffer> {
    output: O,
    line_suffixes: O,
    suffix_depth: usize,
}

impl<O: Buffer> SingleLinePrinter<O> {
    pub fn new(output: O) -> Self {
        SingleLinePrinter {
            output,
            line_suffixes: O::default(),
            suffix_depth: 0,
        }
    }

    /// Appends the deferred line-suffix content and returns the output.
    pub fn flush(mut self) -> O {
        let suffixes = std::mem::take(&mut self.line_suffixes);
        self.output.extend_from(suffixes);
        self.output
    }

    pub fn text(&mut self, object: impl AsRef<str>) {
        self.sink().append(object.as_ref());
    }

    /// Widths play no role on a single line; the text is appended as-is.
    pub fn text_width(&mut self, object: impl AsRef<str>, _width: usize) {
        self.text(object);
    }

    pub fn as_string(&mut self, value: impl fmt::Display) {
        let text = Text::display(value);
        self.sink().append(&text);
    }

    pub fn breakable(&mut self, separator: impl AsRef<str>) {
        self.text(separator);
    }

    pub fn breakable_with(&mut self, separator: impl AsRef<str>, _indent: bool, _force: bool) {
        self.text(separator);
    }

    pub fn breakable_space(&mut self) {
        self.text(" ");
    }

    pub fn breakable_empty(&mut self) {
        self.text("");
    }

    pub fn breakable_force(&mut self) {
        self.text(" ");
    }

    pub fn breakable_return(&mut self) {
        self.text(" ");
    }

    pub fn comma_breakable(&mut self) {
        self.text(",");
        self.breakable_space();
    }

    pub fn fill_breakable(&mut self, separator: impl AsRef<str>) {
        self.text(separator);
    }

    pub fn break_parent(&mut self) {}

    pub fn trim(&mut self) {
        self.sink().trim_trailing();
    }

    pub fn group<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        f(self)
    }

    pub fn group_with<R>(
        &mut self,
        _indentation: isize,
        open: impl AsRef<str>,
        close: impl AsRef<str>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let open = open.as_ref();
        if !open.is_empty() {
            self.text(open);
        }
        let result = f(self);
        let close = close.as_ref();
        if !close.is_empty() {
            self.text(close);
        }
        result
    }

    pub fn indent<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        f(self)
    }

    pub fn nest<R>(&mut self, _indentation: isize, f: impl FnOnce(&mut Self) -> R) -> R {
        f(self)
    }

    /// The break side never renders on a single line; the body is not run.
    pub fn if_break(&mut self, _f: impl FnOnce(&mut Self)) -> SingleLineIfBreakBuilder<'_, O> {
        SingleLineIfBreakBuilder { printer: self }
    }

    pub fn if_flat(&mut self, f: impl FnOnce(&mut Self)) {
        f(self);
    }

    pub fn line_suffix(&mut self, f: impl FnOnce(&mut Self)) {
        self.suffix_depth += 1;
        f(self);
        self.suffix_depth -= 1;
    }

    pub fn line_suffix_with(&mut self, _priority: usize, f: impl FnOnce(&mut Self)) {
        self.line_suffix(f);
    }

    pub fn seplist<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        each: impl FnMut(&mut Self, T),
    ) {
        self.seplist_with(items, |printer| printer.comma_breakable(), each);
    }

    pub fn seplist_with<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        mut separator: impl FnMut(&mut Self),
        mut each: impl FnMut(&mut Self, T),
    ) {
        let mut first = true;
        for item in items {
            if !first {
                separator(self);
            }
            first = false;
            each(self, item);
        }
    }

    fn sink(&mut self) -> &mut O {
        if self.suffix_depth > 0 {
            &mut self.line_suffixes
        } else {
            &mut self.output
        }
    }
}

/// Single-line counterpart of
/// [`IfBreakBuilder`](crate::IfBreakBuilder): only the flat side runs.
pub struct SingleLineIfBreakBuilder<'p, O: Buffer> {
    printer: &'p mut SingleLinePrinter<O>,
}

impl<O: Buffer> SingleLineIfBreakBuilder<'_, O> {
    pub fn if_flat(self, f: impl FnOnce(&mut SingleLinePrinter<O>)) {
        f(self.printer);
    }
}
