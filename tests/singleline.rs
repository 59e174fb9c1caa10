use prettier_print::*;

#[test]
fn collapses_breakables_onto_one_line() {
    let out = singleline_format(String::new(), |p| {
        p.group(|p| {
            p.text("a");
            p.breakable_space();
            p.text("b");
        });
    });
    assert_eq!(out, "a b");
}

#[test]
fn if_break_is_skipped_and_if_flat_runs() {
    let out = singleline_format(String::new(), |p| {
        p.text("a");
        p.if_break(|p| p.text("B")).if_flat(|p| p.text("f"));
        p.if_flat(|p| p.text("g"));
    });
    assert_eq!(out, "afg");
}

#[test]
fn indentation_is_ignored() {
    let out = singleline_format(String::new(), |p| {
        p.indent(|p| {
            p.text("a");
            p.nest(4, |p| {
                p.breakable_space();
                p.text("b");
            });
        });
    });
    assert_eq!(out, "a b");
}

#[test]
fn forced_breakables_emit_their_separators() {
    let out = singleline_format(String::new(), |p| {
        p.text("a");
        p.breakable_force();
        p.text("b");
        p.breakable_return();
        p.text("c");
        p.break_parent();
    });
    assert_eq!(out, "a b c");
}

#[test]
fn line_suffixes_defer_to_the_very_end() {
    let out = singleline_format(String::new(), |p| {
        p.line_suffix(|p| p.text(" # note"));
        p.text("code");
    });
    assert_eq!(out, "code # note");
}

#[test]
fn trim_applies_immediately() {
    let out = singleline_format(String::new(), |p| {
        p.text("a   ");
        p.trim();
        p.text("b");
    });
    assert_eq!(out, "ab");
}

#[test]
fn group_delimiters_are_emitted() {
    let out = singleline_format(String::new(), |p| {
        p.group_with(2, "(", ")", |p| {
            p.seplist(["1", "2"], |p, s| p.text(s));
        });
    });
    assert_eq!(out, "(1, 2)");
}

// With no forced breakables and no line suffixes, single-line output is
// exactly what the full engine produces at unbounded width.
#[test]
fn matches_format_at_unbounded_width() {
    let single = singleline_format(String::new(), |p| {
        p.group(|p| {
            p.text("let");
            p.breakable_space();
            p.text("x");
            p.nest(2, |p| {
                p.breakable_space();
                p.text("=");
                p.breakable_space();
                p.text("1");
            });
        });
    });

    let options = Options {
        max_width: usize::MAX,
        ..Default::default()
    };
    let wide = format_with(String::new(), options, |p| {
        p.group(|p| {
            p.text("let");
            p.breakable_space();
            p.text("x");
            p.nest(2, |p| {
                p.breakable_space();
                p.text("=");
                p.breakable_space();
                p.text("1");
            });
        });
    });

    assert_eq!(single, wide);
    assert_eq!(single, "let x = 1");
}

#[test]
fn chunk_buffers_work_in_single_line_mode() {
    let chunks = singleline_format(Vec::<String>::new(), |p| {
        p.text("a");
        p.line_suffix(|p| p.text("!"));
        p.text("b");
    });
    assert_eq!(chunks.concat(), "ab!");
}
