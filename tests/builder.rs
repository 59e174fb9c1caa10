
use prettier_print::*;

#[test]
fn consecutive_text_coalesces_into_one_node() {
    let out = format(String::new(), |p| {
        p.text("a");
        p.text("b");
        p.as_string(3);
        assert_eq!(p.current_group().contents().borrow().len(), 1);
    });
    assert_eq!(out, "ab3");
}

#[test]
fn seplist_defaults_to_comma_breakable() {
    test!(
        |p| {
            p.seplist(["a", "b", "c"], |p, item| p.text(item));
        },
        "a, b, c"
    );
}

#[test]
fn seplist_never_separates_an_empty_list() {
    let out = format(String::new(), |p| {
        p.seplist_with(
            Vec::<&str>::new(),
            |_| panic!("separator must not run for an empty list"),
            |p, item| p.text(item),
        );
    });
    assert_eq!(out, "");
}

#[test]
fn group_with_wraps_the_body_in_delimiters() {
    test!(
        5,
        |p| {
            p.group_with(1, "[", "]", |p| {
                p.seplist_with(["aa", "bb"], |p| p.comma_breakable(), |p, s| p.text(s));
            });
        },
        "[aa,\n bb]"
    );
}

#[test]
fn fill_breakables_break_independently() {
    test!(
        6,
        |p| {
            p.group(|p| {
                p.text("aa");
                p.fill_breakable(" ");
                p.text("bb");
                p.fill_breakable(" ");
                p.text("cc");
            });
        },
        "aa bb\ncc"
    );
}

#[test]
fn with_target_collects_into_a_detached_array() {
    let out = format(String::new(), |p| {
        let detached = Contents::default();
        p.with_target(detached.clone(), |p| {
            p.text("detached");
        });
        assert_eq!(detached.borrow().len(), 1);
        p.text("real");
    });
    assert_eq!(out, "real");
}

#[test]
fn if_flat_on_a_broken_group_discards_its_body() {
    let out = format(String::new(), |p| {
        p.group(|p| {
            p.break_parent();
            p.text("a");
            p.if_flat(|p| p.text("never"));
        });
    });
    assert_eq!(out, "a");
}

#[test]
fn if_flat_on_an_unbroken_group_renders_flat() {
    let out = format(String::new(), |p| {
        p.group(|p| {
            p.text("a");
            p.if_flat(|p| p.text(" = 1"));
        });
    });
    assert_eq!(out, "a = 1");
}

// Even a discarded if_flat body must surface a forced break it contains.
#[test]
fn if_flat_on_a_broken_group_still_propagates_forced_breaks() {
    let out = format(String::new(), |p| {
        p.group(|p| {
            p.break_parent();
            p.text("a");
            p.if_flat(|p| p.break_parent());
        });
        assert!(p.current_group().is_broken());
        p.text("b");
    });
    assert_eq!(out, "ab");
}

#[test]
fn groups_track_their_nesting_depth() {
    format(String::new(), |p| {
        assert_eq!(p.current_group().depth(), 0);
        p.group(|p| {
            assert_eq!(p.current_group().depth(), 1);
            p.group(|p| {
                assert_eq!(p.current_group().depth(), 2);
            });
            assert_eq!(p.current_group().depth(), 1);
        });
    });
}

#[test]
fn last_position_restarts_after_breakables() {
    format(String::new(), |p| {
        p.group(|p| {
            p.text("hello");
            p.breakable_space();
            p.text("world!!");
        });
        let group = p.current_group().contents().borrow()[0].clone();
        assert_eq!(last_position(&group), 7);
    });
}

#[test]
fn last_position_measures_the_break_side_of_if_break() {
    format(String::new(), |p| {
        p.if_break(|p| p.text("breakside"))
            .if_flat(|p| p.text("flat"));
        let node = p.current_group().contents().borrow()[0].clone();
        assert_eq!(last_position(&node), 9);
    });
}

#[test]
fn remove_breaks_collapses_a_subtree_in_place() {
    let out = format(String::new(), |p| {
        p.group(|p| {
            p.text("a");
            p.breakable_space();
            p.if_break(|p| p.text("B")).if_flat(|p| p.text("f"));
            p.breakable_force();
            p.text("b");
        });
        let node = p.current_group().contents().borrow()[0].clone();
        remove_breaks(&node);
    });
    assert_eq!(out, "a f; b");
}

#[test]
fn remove_breaks_with_accepts_a_custom_replacement() {
    let out = format(String::new(), |p| {
        p.group(|p| {
            p.text("a");
            p.breakable_force();
            p.text("b");
        });
        let node = p.current_group().contents().borrow()[0].clone();
        remove_breaks_with(&node, " | ");
    });
    assert_eq!(out, "a | b");
}

#[test]
fn breakable_accepts_a_custom_width_fragment() {
    // A two-byte separator that the caller declares one column wide.
    test!(
        3,
        |p| {
            p.group(|p| {
                p.text("a");
                p.breakable(Fragment::with_width("··", 1));
                p.text("b");
            });
        },
        "a··b"
    );
}

#[test]
fn zero_width_markers_do_not_affect_layout() {
    test!(
        3,
        |p| {
            p.group(|p| {
                p.text_width("<m>", 0);
                p.text("a");
                p.breakable_space();
                p.text("b");
            });
        },
        "<m>a b"
    );
}
