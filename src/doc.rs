use std::{
    cell::{Cell, Ref, RefCell},
    fmt,
    rc::Rc,
};

use crate::text::{Fragment, Text};

/// A shared handle to a document node.
///
/// Nodes are reference counted because contents arrays keep growing after
/// the node has been linked into a parent, and because a group's broken bit
/// flips while the node is already reachable from two places (the tree and
/// the builder's group stack).
pub type DocRef<'a> = Rc<Doc<'a>>;

/// The ordered child sequence of a container node, also usable as a
/// builder target.
pub type Contents<'a> = Rc<RefCell<Vec<DocRef<'a>>>>;

/// The priority a [`LineSuffix`] gets when the caller does not pick one.
pub const LINE_SUFFIX_DEFAULT_PRIORITY: usize = 1;

/// The concrete document type. Nodes carry no behavior beyond accessors;
/// construction lives in the builder and layout in the engine.
pub enum Doc<'a> {
    /// Coalesced text objects with a precomputed total width.
    Text(TextNode<'a>),
    /// A separator in flat mode, a newline (plus indentation) in break mode.
    Breakable(Breakable<'a>),
    /// A subtree laid out either all-flat or all-break as one decision.
    Group(Rc<Group<'a>>),
    /// Children emitted with indentation increased by two columns.
    Indent(Contents<'a>),
    /// Children emitted with indentation adjusted by a signed delta.
    Align(Align<'a>),
    /// Renders its break contents or its flat contents depending on the
    /// mode of the enclosing group.
    IfBreak(IfBreak<'a>),
    /// Content deferred until the next newline or the end of the document.
    LineSuffix(LineSuffix<'a>),
    /// Marker applied at construction time; inert during layout.
    BreakParent,
    /// Erase trailing spaces and tabs on the current line.
    Trim,
    /// A bare string emitted as-is, advancing the column by its length.
    Raw(Text<'a>),
}

/// Accumulates consecutive textual emissions into one node to keep the
/// tree small.
pub struct TextNode<'a> {
    fragments: RefCell<Vec<Fragment<'a>>>,
    width: Cell<usize>,
}

impl<'a> TextNode<'a> {
    pub fn new(fragment: Fragment<'a>) -> Self {
        let width = fragment.width();
        TextNode {
            fragments: RefCell::new(vec![fragment]),
            width: Cell::new(width),
        }
    }

    pub fn push(&self, fragment: Fragment<'a>) {
        self.width.set(self.width.get() + fragment.width());
        self.fragments.borrow_mut().push(fragment);
    }

    pub fn fragments(&self) -> Ref<'_, [Fragment<'a>]> {
        Ref::map(self.fragments.borrow(), Vec::as_slice)
    }

    pub fn width(&self) -> usize {
        self.width.get()
    }
}

pub struct Breakable<'a> {
    separator: Fragment<'a>,
    indent: bool,
    force: bool,
}

impl<'a> Breakable<'a> {
    pub fn new(separator: impl Into<Fragment<'a>>, indent: bool, force: bool) -> Self {
        Breakable {
            separator: separator.into(),
            indent,
            force,
        }
    }

    pub fn separator(&self) -> &Fragment<'a> {
        &self.separator
    }

    pub fn width(&self) -> usize {
        self.separator.width()
    }

    pub fn indent(&self) -> bool {
        self.indent
    }

    pub fn force(&self) -> bool {
        self.force
    }
}

pub struct Group<'a> {
    depth: usize,
    broken: Cell<bool>,
    contents: Contents<'a>,
}

impl<'a> Group<'a> {
    pub fn new(depth: usize) -> Self {
        Group {
            depth,
            broken: Cell::new(false),
            contents: Contents::default(),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_broken(&self) -> bool {
        self.broken.get()
    }

    /// The broken bit is sticky: it is only ever set, never cleared.
    pub fn mark_broken(&self) {
        self.broken.set(true);
    }

    pub fn contents(&self) -> Contents<'a> {
        self.contents.clone()
    }
}

pub struct Align<'a> {
    delta: isize,
    contents: Contents<'a>,
}

impl<'a> Align<'a> {
    pub fn new(delta: isize) -> Self {
        Align {
            delta,
            contents: Contents::default(),
        }
    }

    pub fn with_contents(delta: isize, contents: Contents<'a>) -> Self {
        Align { delta, contents }
    }

    pub fn delta(&self) -> isize {
        self.delta
    }

    pub fn contents(&self) -> Contents<'a> {
        self.contents.clone()
    }
}

#[derive(Default)]
pub struct IfBreak<'a> {
    break_contents: Contents<'a>,
    flat_contents: Contents<'a>,
}

impl<'a> IfBreak<'a> {
    pub fn new() -> Self {
        IfBreak::default()
    }

    pub fn break_contents(&self) -> Contents<'a> {
        self.break_contents.clone()
    }

    pub fn flat_contents(&self) -> Contents<'a> {
        self.flat_contents.clone()
    }
}

pub struct LineSuffix<'a> {
    priority: usize,
    contents: Contents<'a>,
}

impl<'a> LineSuffix<'a> {
    pub fn new(priority: usize) -> Self {
        LineSuffix {
            priority,
            contents: Contents::default(),
        }
    }

    pub fn priority(&self) -> usize {
        self.priority
    }

    pub fn contents(&self) -> Contents<'a> {
        self.contents.clone()
    }
}

/// Column offset of the last character `node` would emit, restarting at
/// zero after every `Breakable`. Callers use it for alignment decisions
/// that depend on where a subtree ends.
pub fn last_position(node: &DocRef<'_>) -> usize {
    let mut stack = vec![node.clone()];
    let mut width = 0;

    while let Some(doc) = stack.pop() {
        match &*doc {
            Doc::Text(text) => width += text.width(),
            Doc::Raw(text) => width += text.len(),
            Doc::Breakable(_) => width = 0,
            Doc::Group(group) => push_reversed(&mut stack, &group.contents()),
            Doc::Indent(contents) => push_reversed(&mut stack, contents),
            Doc::Align(align) => push_reversed(&mut stack, &align.contents()),
            Doc::IfBreak(ifbreak) => push_reversed(&mut stack, &ifbreak.break_contents()),
            Doc::LineSuffix(_) | Doc::BreakParent | Doc::Trim => {}
        }
    }

    width
}

/// Collapses the subtree under `node` into unbreakable form, in place:
/// every `Breakable` becomes literal text and every `IfBreak` is pinned to
/// its flat contents. Forced breakables turn into `"; "`.
pub fn remove_breaks(node: &DocRef<'_>) {
    remove_breaks_with(node, "; ");
}

/// Like [`remove_breaks`] with a caller-chosen replacement for forced
/// breakables.
pub fn remove_breaks_with<'a>(node: &DocRef<'a>, replacement: impl Into<Fragment<'a>>) {
    let replacement = replacement.into();
    let mut queue: Vec<Contents<'a>> = Vec::new();
    enqueue_contents(&mut queue, node);

    while let Some(contents) = queue.pop() {
        let mut children = contents.borrow_mut();
        for slot in children.iter_mut() {
            let replaced = match &**slot {
                Doc::Breakable(breakable) => {
                    let fragment = if breakable.force() {
                        // The collapsed text keeps the breakable's width.
                        Fragment::with_width(replacement.as_str().to_owned(), breakable.width())
                    } else {
                        breakable.separator().clone()
                    };
                    Some(Rc::new(Doc::Text(TextNode::new(fragment))))
                }
                Doc::IfBreak(ifbreak) => Some(Rc::new(Doc::Align(Align::with_contents(
                    0,
                    ifbreak.flat_contents(),
                )))),
                _ => None,
            };
            if let Some(doc) = replaced {
                *slot = doc;
            }
            enqueue_contents(&mut queue, slot);
        }
    }
}

fn enqueue_contents<'a>(queue: &mut Vec<Contents<'a>>, doc: &DocRef<'a>) {
    match &**doc {
        Doc::Group(group) => queue.push(group.contents()),
        Doc::Indent(contents) => queue.push(contents.clone()),
        Doc::Align(align) => queue.push(align.contents()),
        _ => {}
    }
}

fn push_reversed<'a>(stack: &mut Vec<DocRef<'a>>, contents: &Contents<'a>) {
    for child in contents.borrow().iter().rev() {
        stack.push(child.clone());
    }
}

impl fmt::Debug for Doc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Doc::Text(text) => text.fmt(f),
            Doc::Breakable(breakable) => breakable.fmt(f),
            Doc::Group(group) => group.fmt(f),
            Doc::Indent(contents) => f
                .debug_tuple("Indent")
                .field(&ContentsDebug(contents))
                .finish(),
            Doc::Align(align) => f
                .debug_struct("Align")
                .field("delta", &align.delta)
                .field("contents", &ContentsDebug(&align.contents))
                .finish(),
            Doc::IfBreak(ifbreak) => f
                .debug_struct("IfBreak")
                .field("break_contents", &ContentsDebug(&ifbreak.break_contents))
                .field("flat_contents", &ContentsDebug(&ifbreak.flat_contents))
                .finish(),
            Doc::LineSuffix(suffix) => f
                .debug_struct("LineSuffix")
                .field("priority", &suffix.priority)
                .field("contents", &ContentsDebug(&suffix.contents))
                .finish(),
            Doc::BreakParent => f.write_str("BreakParent"),
            Doc::Trim => f.write_str("Trim"),
            Doc::Raw(text) => f.debug_tuple("Raw").field(text).finish(),
        }
    }
}

impl fmt::Debug for TextNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut joined = String::new();
        for fragment in self.fragments.borrow().iter() {
            joined.push_str(fragment.as_str());
        }
        joined.fmt(f)
    }
}

impl fmt::Debug for Breakable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Breakable")
            .field("separator", &self.separator.as_str())
            .field("indent", &self.indent)
            .field("force", &self.force)
            .finish()
    }
}

impl fmt::Debug for Group<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("depth", &self.depth)
            .field("broken", &self.broken.get())
            .field("contents", &ContentsDebug(&self.contents))
            .finish()
    }
}

struct ContentsDebug<'r, 'a>(&'r Contents<'a>);

impl fmt::Debug for ContentsDebug<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}
