use std::{borrow::Cow, fmt, rc::Rc};

use crate::{
    buffer::Buffer,
    doc::{
        Align, Breakable, Contents, Doc, Group, IfBreak, LineSuffix, TextNode,
        LINE_SUFFIX_DEFAULT_PRIORITY,
    },
    render,
    text::Fragment,
    Genspace, Options,
};

/// Stateful construction of a document tree.
///
/// The printer keeps a stack of open groups (rooted at a synthetic depth-0
/// group) and a current append target; every container operation swaps the
/// target for the container's contents around a synchronously-called
/// closure and restores it afterwards. [`flush`](PrettyPrinter::flush)
/// hands the finished tree to the layout engine and returns the output.
///
/// ```
/// use prettier_print::format;
///
/// let out = format(String::new(), |p| {
///     p.group(|p| {
///         p.text("a");
///         p.breakable_space();
///         p.text("b");
///     });
/// });
/// assert_eq!(out, "a b");
/// ```
pub struct PrettyPrinter<'a, O: Buffer> {
    output: O,
    max_width: usize,
    newline: Cow<'a, str>,
    genspace: Genspace<'a>,
    base_indent: usize,
    groups: Vec<Rc<Group<'a>>>,
    target: Contents<'a>,
}

impl<'a, O: Buffer> PrettyPrinter<'a, O> {
    pub fn new(output: O) -> Self {
        Self::with_options(output, Options::default())
    }

    pub fn with_options(output: O, options: Options<'a>) -> Self {
        let root = Rc::new(Group::new(0));
        let target = root.contents();
        PrettyPrinter {
            output,
            max_width: options.max_width,
            newline: options.newline,
            genspace: options.genspace,
            base_indent: options.base_indent,
            groups: vec![root],
            target,
        }
    }

    /// Renders the tree built so far and returns the output buffer,
    /// consuming the printer.
    pub fn flush(self) -> O {
        let PrettyPrinter {
            mut output,
            max_width,
            newline,
            genspace,
            base_indent,
            groups,
            ..
        } = self;
        let root = groups
            .into_iter()
            .next()
            .expect("the synthetic root group is always present");
        render::render_doc(
            Rc::new(Doc::Group(root)),
            &mut output,
            max_width,
            &newline,
            &*genspace,
            base_indent,
        );
        output
    }

    /// Appends text at its byte length. Consecutive textual emissions
    /// coalesce into a single node.
    ///
    /// The text must not contain line breaks; newlines come only from
    /// breakables rendered in break mode.
    pub fn text(&mut self, object: impl Into<Cow<'a, str>>) {
        self.text_fragment(Fragment::new(object));
    }

    /// Appends text at a caller-supplied width, for content whose column
    /// footprint differs from its byte length (or is zero, for opaque
    /// markers).
    pub fn text_width(&mut self, object: impl Into<Cow<'a, str>>, width: usize) {
        self.text_fragment(Fragment::with_width(object, width));
    }

    /// Appends `value.to_string()` at its byte length.
    pub fn as_string(&mut self, value: impl fmt::Display) {
        self.text_fragment(Fragment::display(value));
    }

    pub fn text_fragment(&mut self, fragment: Fragment<'a>) {
        let mut target = self.target.borrow_mut();
        if let Some(Doc::Text(text)) = target.last().map(|doc| &**doc) {
            text.push(fragment);
            return;
        }
        target.push(Rc::new(Doc::Text(TextNode::new(fragment))));
    }

    /// A separator in flat mode, a newline plus indentation in break mode.
    pub fn breakable(&mut self, separator: impl Into<Fragment<'a>>) {
        self.push_breakable(separator.into(), true, false);
    }

    /// The fully general breakable. `force` also breaks every enclosing
    /// group, so the node is never rendered as its separator.
    pub fn breakable_with(
        &mut self,
        separator: impl Into<Fragment<'a>>,
        indent: bool,
        force: bool,
    ) {
        self.push_breakable(separator.into(), indent, force);
        if force {
            self.break_parent();
        }
    }

    pub fn breakable_space(&mut self) {
        self.breakable(" ");
    }

    pub fn breakable_empty(&mut self) {
        self.breakable("");
    }

    pub fn breakable_force(&mut self) {
        self.breakable_with(" ", true, true);
    }

    /// A forced breakable whose next line starts at column 0 regardless of
    /// the current indentation.
    pub fn breakable_return(&mut self) {
        self.breakable_with(" ", false, true);
    }

    pub fn comma_breakable(&mut self) {
        self.text(",");
        self.breakable_space();
    }

    /// A breakable wrapped in its own group, so each one breaks
    /// independently instead of all-or-nothing with its siblings.
    pub fn fill_breakable(&mut self, separator: impl Into<Fragment<'a>>) {
        let separator = separator.into();
        self.group(|printer| printer.push_breakable(separator, true, false));
    }

    /// Appends a break-parent marker and breaks every enclosing group,
    /// innermost outward, stopping at the first group already broken.
    pub fn break_parent(&mut self) {
        self.target.borrow_mut().push(Rc::new(Doc::BreakParent));
        for group in self.groups.iter().rev() {
            if group.is_broken() {
                break;
            }
            group.mark_broken();
        }
    }

    /// Erases trailing spaces and tabs on the current output line.
    pub fn trim(&mut self) {
        self.target.borrow_mut().push(Rc::new(Doc::Trim));
    }

    /// Opens a group: its contents are laid out flat if they fit the
    /// remaining line, broken otherwise.
    pub fn group<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.group_with(0, "", "", f)
    }

    /// A group bracketed by `open` and `close` (either may be empty), with
    /// the body nested by `indentation` when nonzero. The delimiters land
    /// outside the group so only the body takes part in its fit decision.
    pub fn group_with<R>(
        &mut self,
        indentation: isize,
        open: impl Into<Fragment<'a>>,
        close: impl Into<Fragment<'a>>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let open = open.into();
        let close = close.into();

        if !open.is_empty() {
            self.text_fragment(open);
        }

        let group = Rc::new(Group::new(self.current_group().depth() + 1));
        self.groups.push(group.clone());
        self.target
            .borrow_mut()
            .push(Rc::new(Doc::Group(group.clone())));

        let contents = group.contents();
        let result = self.with_target(contents, |printer| {
            if indentation != 0 {
                printer.nest(indentation, f)
            } else {
                f(printer)
            }
        });

        self.groups.pop();

        if !close.is_empty() {
            self.text_fragment(close);
        }
        result
    }

    /// Runs the body with indentation increased by two columns.
    pub fn indent<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let contents = Contents::default();
        self.target
            .borrow_mut()
            .push(Rc::new(Doc::Indent(contents.clone())));
        self.with_target(contents, f)
    }

    /// Runs the body with indentation adjusted by `indentation` columns,
    /// which may be negative.
    pub fn nest<R>(&mut self, indentation: isize, f: impl FnOnce(&mut Self) -> R) -> R {
        let align = Align::new(indentation);
        let contents = align.contents();
        self.target.borrow_mut().push(Rc::new(Doc::Align(align)));
        self.with_target(contents, f)
    }

    /// Content rendered only when the enclosing group breaks. The returned
    /// builder chains [`if_flat`](IfBreakBuilder::if_flat) for the
    /// flat-mode alternate.
    pub fn if_break(&mut self, f: impl FnOnce(&mut Self)) -> IfBreakBuilder<'_, 'a, O> {
        let node = IfBreak::new();
        let break_contents = node.break_contents();
        let flat_contents = node.flat_contents();
        self.target.borrow_mut().push(Rc::new(Doc::IfBreak(node)));
        self.with_target(break_contents, f);
        IfBreakBuilder {
            printer: self,
            flat_contents,
        }
    }

    /// Content rendered only when the enclosing group stays flat.
    pub fn if_flat(&mut self, f: impl FnOnce(&mut Self)) {
        if self.current_group().is_broken() {
            // The flat side can never render. Run the body into a
            // throwaway group anyway, so a forced break discovered inside
            // it still propagates into the real tree.
            let throwaway = Rc::new(Group::new(0));
            self.groups.push(throwaway.clone());
            let contents = throwaway.contents();
            self.with_target(contents, f);
            self.groups.pop();
            if throwaway.is_broken() {
                self.break_parent();
            }
        } else {
            let node = IfBreak::new();
            let flat_contents = node.flat_contents();
            self.target.borrow_mut().push(Rc::new(Doc::IfBreak(node)));
            self.with_target(flat_contents, f);
        }
    }

    /// Defers the body's output until just before the next newline, or the
    /// end of the document. Useful for trailing comments.
    pub fn line_suffix(&mut self, f: impl FnOnce(&mut Self)) {
        self.line_suffix_with(LINE_SUFFIX_DEFAULT_PRIORITY, f);
    }

    /// A line suffix with an explicit priority: on a shared line, higher
    /// priorities flush first.
    pub fn line_suffix_with(&mut self, priority: usize, f: impl FnOnce(&mut Self)) {
        let node = LineSuffix::new(priority);
        let contents = node.contents();
        self.target
            .borrow_mut()
            .push(Rc::new(Doc::LineSuffix(node)));
        self.with_target(contents, f);
    }

    /// Runs the body with appends redirected into `target`, restoring the
    /// previous target on the way out.
    pub fn with_target<R>(&mut self, target: Contents<'a>, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = std::mem::replace(&mut self.target, target);
        let result = f(self);
        self.target = previous;
        result
    }

    /// The current append target.
    pub fn target(&self) -> Contents<'a> {
        self.target.clone()
    }

    /// The innermost open group.
    pub fn current_group(&self) -> &Rc<Group<'a>> {
        self.groups
            .last()
            .expect("the synthetic root group is always present")
    }

    /// Runs `each` per item with [`comma_breakable`] between items. An
    /// empty iterator emits nothing.
    ///
    /// [`comma_breakable`]: PrettyPrinter::comma_breakable
    pub fn seplist<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        each: impl FnMut(&mut Self, T),
    ) {
        self.seplist_with(items, |printer| printer.comma_breakable(), each);
    }

    /// Runs `each` per item with a caller-chosen separator between items.
    /// The separator is never invoked for an empty iterator.
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

    fn push_breakable(&mut self, separator: Fragment<'a>, indent: bool, force: bool) {
        self.target
            .borrow_mut()
            .push(Rc::new(Doc::Breakable(Breakable::new(
                separator, indent, force,
            ))));
    }
}

/// Captures the flat-mode alternate of an [`if_break`] block.
///
/// [`if_break`]: PrettyPrinter::if_break
pub struct IfBreakBuilder<'p, 'a, O: Buffer> {
    printer: &'p mut PrettyPrinter<'a, O>,
    flat_contents: Contents<'a>,
}

impl<'a, O: Buffer> IfBreakBuilder<'_, 'a, O> {
    pub fn if_flat(self, f: impl FnOnce(&mut PrettyPrinter<'a, O>)) {
        self.printer.with_target(self.flat_contents, f);
    }
}
