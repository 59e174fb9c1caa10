//! # prettier-print
//!
//! A pretty-printing engine in the
//! [Wadler](http://homepages.inf.ed.ac.uk/wadler/papers/prettier/prettier.pdf)/Lindig
//! family, extended the way Prettier-style formatters need: forced breaks
//! that propagate to enclosing groups, content conditional on whether a
//! group broke, buffered line suffixes for trailing comments, and
//! trailing-whitespace trimming.
//!
//! Documents are built through a stateful [`PrettyPrinter`]: inside the
//! closure passed to [`format`], imperative calls grow a document tree,
//! and when the closure returns the layout engine renders it against the
//! maximum line width, greedily keeping grouped content on one line.
//!
//! ## Quick start
//!
//! Let's pretty-print simple sexps!  We want to print `(1 2 3)` on one
//! line when it fits, and otherwise one element per line:
//!
//! ```rust
//! use prettier_print::{format, format_with, Options, PrettyPrinter};
//!
//! enum SExp {
//!     Atom(u32),
//!     List(Vec<SExp>),
//! }
//!
//! fn print(p: &mut PrettyPrinter<'_, String>, sexp: &SExp) {
//!     match sexp {
//!         SExp::Atom(value) => p.as_string(value),
//!         SExp::List(children) => {
//!             p.group_with(1, "(", ")", |p| {
//!                 p.seplist_with(
//!                     children,
//!                     |p| p.breakable_space(),
//!                     |p, child| print(p, child),
//!                 );
//!             });
//!         }
//!     }
//! }
//!
//! let list = SExp::List(vec![SExp::Atom(1), SExp::Atom(2), SExp::Atom(3)]);
//!
//! assert_eq!(format(String::new(), |p| print(p, &list)), "(1 2 3)");
//!
//! let options = Options {
//!     max_width: 5,
//!     ..Options::default()
//! };
//! assert_eq!(
//!     format_with(String::new(), options, |p| print(p, &list)),
//!     "(1\n 2\n 3)",
//! );
//! ```
//!
//! The output parameter is any [`Buffer`]: a `String` for the common case,
//! or a `Vec<String>` when the caller wants the appended chunks as a list.
//! [`singleline_format`] renders the same builder calls collapsed onto a
//! single line, with no width limit involved.

mod buffer;
mod builder;
mod doc;
mod render;
mod singleline;
pub mod text;

use std::{borrow::Cow, rc::Rc};

pub use buffer::Buffer;
pub use builder::{IfBreakBuilder, PrettyPrinter};
pub use doc::{
    last_position, remove_breaks, remove_breaks_with, Align, Breakable, Contents, Doc, DocRef,
    Group, IfBreak, LineSuffix, TextNode, LINE_SUFFIX_DEFAULT_PRIORITY,
};
pub use singleline::{SingleLineIfBreakBuilder, SingleLinePrinter};
pub use text::{Fragment, Text};

/// Maps an indentation count to the string emitted after each newline.
pub type Genspace<'a> = Rc<dyn Fn(usize) -> String + 'a>;

/// Layout parameters consumed by [`format_with`] and
/// [`PrettyPrinter::with_options`].
pub struct Options<'a> {
    /// Maximum line width the engine lays out against.
    pub max_width: usize,
    /// String emitted for every line break.
    pub newline: Cow<'a, str>,
    /// Indentation the whole document starts at.
    pub base_indent: usize,
    /// Indentation generator; the default emits that many spaces.
    pub genspace: Genspace<'a>,
}

impl Default for Options<'_> {
    fn default() -> Self {
        Options {
            max_width: 80,
            newline: Cow::Borrowed("\n"),
            base_indent: 0,
            genspace: Rc::new(|count| " ".repeat(count)),
        }
    }
}

/// Builds a document through the closure and renders it with default
/// [`Options`], returning the output buffer.
pub fn format<'a, O, F>(output: O, f: F) -> O
where
    O: Buffer,
    F: FnOnce(&mut PrettyPrinter<'a, O>),
{
    format_with(output, Options::default(), f)
}

/// Builds a document through the closure and renders it with the given
/// [`Options`], returning the output buffer.
pub fn format_with<'a, O, F>(output: O, options: Options<'a>, f: F) -> O
where
    O: Buffer,
    F: FnOnce(&mut PrettyPrinter<'a, O>),
{
    let mut printer = PrettyPrinter::with_options(output, options);
    f(&mut printer);
    printer.flush()
}

/// Runs the closure against a [`SingleLinePrinter`], returning the output
/// collapsed onto one line.
pub fn singleline_format<O, F>(output: O, f: F) -> O
where
    O: Buffer,
    F: FnOnce(&mut SingleLinePrinter<O>),
{
    let mut printer = SingleLinePrinter::new(output);
    f(&mut printer);
    printer.flush()
}
