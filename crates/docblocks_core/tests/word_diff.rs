use docblocks_core::diff::word::Change;
use docblocks_core::{new_text, old_text, project, word_diff, DiffMode, DiffToken};

#[test]
fn appended_word_is_a_single_added_run() {
    assert_eq!(
        word_diff("The cat sat.", "The cat sat quietly."),
        vec![
            DiffToken::unchanged("The cat sat"),
            DiffToken::added(" quietly"),
            DiffToken::unchanged("."),
        ]
    );
}

#[test]
fn identical_texts_are_one_unchanged_run() {
    let text = "Same words, same order.";
    assert_eq!(word_diff(text, text), vec![DiffToken::unchanged(text)]);
}

#[test]
fn token_streams_rebuild_both_texts() {
    let pairs = [
        ("Rust is fast.", "Rust is very fast!"),
        ("one two three", "three two one"),
        ("", "brand new"),
        ("gone entirely", ""),
        ("tabs\tand  spaces", "tabs and spaces"),
        ("Ünïcode wörds", "Ünïcode words"),
    ];
    for (old, new) in pairs {
        let tokens = word_diff(old, new);
        assert_eq!(old_text(&tokens), old, "old side of {old:?} -> {new:?}");
        assert_eq!(new_text(&tokens), new, "new side of {old:?} -> {new:?}");
    }
}

#[test]
fn adjacent_runs_never_share_a_change_kind() {
    let tokens = word_diff("a b c d e f", "a x c y e z");
    for pair in tokens.windows(2) {
        assert_ne!(pair[0].change(), pair[1].change(), "{tokens:?}");
    }
    assert!(tokens.iter().all(|token| !(token.added && token.removed)));
}

#[test]
fn projections_hold_only_their_side() {
    let tokens = word_diff("The old plan", "The new plan");
    let current = project(&tokens, DiffMode::Current);
    let generated = project(&tokens, DiffMode::Generated);

    let current_text: String = current.iter().map(|node| node.text.as_str()).collect();
    let generated_text: String = generated.iter().map(|node| node.text.as_str()).collect();
    assert_eq!(current_text, "The old plan");
    assert_eq!(generated_text, "The new plan");

    assert!(current.iter().all(|node| !node.added));
    assert!(generated.iter().all(|node| !node.removed));
    assert!(current.iter().any(|node| node.removed && node.text == "old"));
    assert!(generated.iter().any(|node| node.added && node.text == "new"));
}

#[test]
fn tokens_serialize_without_false_flags() {
    let tokens = vec![DiffToken::unchanged("a"), DiffToken::added("b")];
    assert_eq!(
        serde_json::to_value(&tokens).unwrap(),
        serde_json::json!([{ "value": "a" }, { "value": "b", "added": true }])
    );
    assert_eq!(tokens[1].change(), Change::Added);
}
