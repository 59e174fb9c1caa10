//! The layout engine: a stack-based interpreter that walks the document
//! tree in reverse-DFS order, deciding break or flat per group by asking
//! the fits lookahead, and emitting to the output buffer as it goes.

mod fit;

use std::rc::Rc;

use crate::{
    buffer::Buffer,
    doc::{Contents, Doc, DocRef, Group},
};

/// Columns added by every `Indent` node.
pub(crate) const INDENT_WIDTH: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Mode {
    Break,
    Flat,
}

#[derive(Clone)]
pub(crate) struct Command<'a> {
    pub(crate) indent: usize,
    pub(crate) mode: Mode,
    pub(crate) doc: DocRef<'a>,
}

pub(crate) fn render_doc<'a, O: Buffer>(
    root: DocRef<'a>,
    output: &mut O,
    max_width: usize,
    newline: &str,
    genspace: &(dyn Fn(usize) -> String + 'a),
    base_indent: usize,
) {
    if base_indent > 0 {
        output.append(&genspace(base_indent));
    }

    Renderer {
        output,
        max_width,
        newline,
        genspace,
        position: base_indent,
        should_remeasure: false,
        commands: vec![Command {
            indent: base_indent,
            // The synthetic root group always renders broken so that
            // top-level forced breakables have an enclosing break context.
            mode: Mode::Break,
            doc: root,
        }],
        line_suffixes: Vec::new(),
    }
    .run();
}

struct SuffixCommand<'a> {
    indent: usize,
    mode: Mode,
    priority: usize,
    contents: Contents<'a>,
}

struct Renderer<'e, 'a, O: Buffer> {
    output: &'e mut O,
    max_width: usize,
    newline: &'e str,
    genspace: &'e (dyn Fn(usize) -> String + 'a),
    position: usize,
    should_remeasure: bool,
    commands: Vec<Command<'a>>,
    line_suffixes: Vec<SuffixCommand<'a>>,
}

impl<'a, O: Buffer> Renderer<'_, 'a, O> {
    fn run(&mut self) {
        loop {
            while let Some(command) = self.commands.pop() {
                self.dispatch(command);
            }

            // Suffixes queued on the final line, with no breakable left to
            // flush them, still need to go out before we stop.
            if self.line_suffixes.is_empty() {
                break;
            }
            self.drain_line_suffixes();
        }
    }

    fn dispatch(&mut self, command: Command<'a>) {
        let Command { indent, mode, doc } = command;
        match &*doc {
            Doc::Text(text) => {
                for fragment in text.fragments().iter() {
                    self.output.append(fragment.as_str());
                }
                self.position += text.width();
            }

            Doc::Raw(text) => {
                self.output.append(text);
                self.position += text.len();
            }

            Doc::Group(group) => self.enter_group(group, indent, mode),

            Doc::Breakable(breakable) => {
                if mode == Mode::Flat {
                    if !breakable.force() {
                        self.output.append(breakable.separator().as_str());
                        self.position += breakable.width();
                        return;
                    }
                    // A forced breakable inside a flattened group: emit the
                    // newline anyway and remeasure from the next group on.
                    self.should_remeasure = true;
                }

                if !self.line_suffixes.is_empty() {
                    // Re-enter this breakable once the suffixes are out.
                    self.commands.push(Command {
                        indent,
                        mode,
                        doc: doc.clone(),
                    });
                    self.drain_line_suffixes();
                    return;
                }

                if !breakable.indent() {
                    self.output.append(self.newline);
                    self.position = 0;
                } else {
                    self.position = self.position.saturating_sub(self.output.trim_trailing());
                    self.output.append(self.newline);
                    let spaces = (self.genspace)(indent);
                    self.output.append(&spaces);
                    self.position = indent;
                }
            }

            Doc::Indent(contents) => self.push_children(contents, indent + INDENT_WIDTH, mode),

            Doc::Align(align) => self.push_children(
                &align.contents(),
                indent.saturating_add_signed(align.delta()),
                mode,
            ),

            Doc::IfBreak(ifbreak) => {
                let contents = match mode {
                    Mode::Break => ifbreak.break_contents(),
                    Mode::Flat => ifbreak.flat_contents(),
                };
                self.push_children(&contents, indent, mode);
            }

            Doc::LineSuffix(suffix) => self.line_suffixes.push(SuffixCommand {
                indent,
                mode,
                priority: suffix.priority(),
                contents: suffix.contents(),
            }),

            // Break parents act at construction time; inert here.
            Doc::BreakParent => {}

            Doc::Trim => {
                self.position = self.position.saturating_sub(self.output.trim_trailing());
            }
        }
    }

    fn enter_group(&mut self, group: &Rc<Group<'a>>, indent: usize, mode: Mode) {
        if mode == Mode::Flat && !self.should_remeasure {
            let child_mode = if group.is_broken() {
                Mode::Break
            } else {
                Mode::Flat
            };
            self.push_children(&group.contents(), indent, child_mode);
            return;
        }

        self.should_remeasure = false;

        if group.is_broken() {
            self.push_children(&group.contents(), indent, Mode::Break);
            return;
        }

        let mut seed: Vec<Command<'a>> = {
            let contents = group.contents();
            let children = contents.borrow();
            children
                .iter()
                .rev()
                .map(|child| Command {
                    indent,
                    mode: Mode::Flat,
                    doc: child.clone(),
                })
                .collect()
        };

        let budget = self.max_width.saturating_sub(self.position);
        if !fit::fits::<O>(&seed, &self.commands, budget) {
            group.mark_broken();
            for command in &mut seed {
                command.mode = Mode::Break;
            }
        }
        self.commands.append(&mut seed);
    }

    fn push_children(&mut self, contents: &Contents<'a>, indent: usize, mode: Mode) {
        for child in contents.borrow().iter().rev() {
            self.commands.push(Command {
                indent,
                mode,
                doc: child.clone(),
            });
        }
    }

    fn drain_line_suffixes(&mut self) {
        // Take-and-clear before pushing anything: an empty suffix body
        // contributes no commands, so the end-of-document drain cannot
        // cycle. Only the suffix children are pushed, never the container.
        let mut suffixes = std::mem::take(&mut self.line_suffixes);

        // Ascending stable sort puts the highest priority nearest the top
        // of the command stack, ties going to the most recently queued.
        suffixes.sort_by_key(|suffix| suffix.priority);

        for suffix in suffixes {
            for child in suffix.contents.borrow().iter().rev() {
                self.commands.push(Command {
                    indent: suffix.indent,
                    mode: suffix.mode,
                    doc: child.clone(),
                });
            }
        }
    }
}
