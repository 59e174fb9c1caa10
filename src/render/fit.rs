use super::{Command, Mode};
use crate::{
    buffer::Buffer,
    doc::{Contents, Doc, DocRef},
};

struct FitCommand<'a> {
    mode: Mode,
    doc: DocRef<'a>,
}

/// Bounded lookahead: does the document fit in `budget` columns, assuming
/// flat layout from this point on?
///
/// `seed` holds the commands just produced for the group being measured;
/// once it runs dry the lookahead continues into `rest`, the engine's
/// remaining command stack, walked from its top without consuming it. The
/// answer is yes as soon as a newline is guaranteed (a breakable reached in
/// break mode, or any forced breakable) and no as soon as the budget is
/// exceeded.
pub(super) fn fits<'a, O: Buffer>(
    seed: &[Command<'a>],
    rest: &[Command<'a>],
    budget: usize,
) -> bool {
    let mut used = 0usize;
    let mut rest_index = rest.len();
    let mut stack: Vec<FitCommand<'a>> = seed
        .iter()
        .map(|command| FitCommand {
            mode: command.mode,
            doc: command.doc.clone(),
        })
        .collect();

    // Mirrors what the real buffer would hold on the current line, so a
    // Trim in the lookahead refunds exactly what it would refund for real.
    let mut scratch = O::default();

    loop {
        if used > budget {
            return false;
        }

        let FitCommand { mode, doc } = match stack.pop() {
            Some(command) => command,
            None => {
                if rest_index == 0 {
                    return true;
                }
                rest_index -= 1;
                let command = &rest[rest_index];
                FitCommand {
                    mode: command.mode,
                    doc: command.doc.clone(),
                }
            }
        };

        match &*doc {
            Doc::Text(text) => {
                for fragment in text.fragments().iter() {
                    scratch.append(fragment.as_str());
                }
                used = used.saturating_add(text.width());
            }

            Doc::Raw(text) => {
                scratch.append(text);
                used = used.saturating_add(text.len());
            }

            Doc::Breakable(breakable) => {
                if mode == Mode::Flat && !breakable.force() {
                    scratch.append(breakable.separator().as_str());
                    used = used.saturating_add(breakable.width());
                } else {
                    // A newline lands before the budget runs out.
                    return true;
                }
            }

            Doc::Trim => used = used.saturating_sub(scratch.trim_trailing()),

            Doc::Group(group) => {
                let child_mode = if group.is_broken() { Mode::Break } else { mode };
                push_children(&mut stack, &group.contents(), child_mode);
            }

            Doc::IfBreak(ifbreak) => {
                let contents = match mode {
                    Mode::Break => ifbreak.break_contents(),
                    Mode::Flat => ifbreak.flat_contents(),
                };
                push_children(&mut stack, &contents, mode);
            }

            Doc::Indent(contents) => push_children(&mut stack, contents, mode),
            Doc::Align(align) => push_children(&mut stack, &align.contents(), mode),

            Doc::LineSuffix(_) | Doc::BreakParent => {}
        }
    }
}

fn push_children<'a>(stack: &mut Vec<FitCommand<'a>>, contents: &Contents<'a>, mode: Mode) {
    for child in contents.borrow().iter().rev() {
        stack.push(FitCommand {
            mode,
            doc: child.clone(),
        });
    }
}
