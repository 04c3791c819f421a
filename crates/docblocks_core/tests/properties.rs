use docblocks_core::{
    merge_blocks, new_text, normalize_str, old_text, word_diff, Block, BlockKind, Choice,
    InlineNode, ListStyle,
};
use proptest::prelude::*;

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-zA-Z ]{0,40}".prop_map(String::from),
        2 => "[a-z0-9_.,;:!?'\"()\\- \t\n]{0,40}".prop_map(String::from),
        2 => "[äöüéßñçøåλжあ字 ,.]{0,20}".prop_map(String::from),
        1 => any::<String>(),
    ]
}

fn inline_strategy() -> impl Strategy<Value = InlineNode> {
    (text_strategy(), any::<[bool; 4]>()).prop_map(|(text, [bold, italic, underline, code])| {
        InlineNode {
            text,
            bold,
            italic,
            underline,
            code,
            ..InlineNode::default()
        }
    })
}

fn runs_strategy() -> impl Strategy<Value = Vec<InlineNode>> {
    prop::collection::vec(inline_strategy(), 0..4)
}

fn block_strategy() -> impl Strategy<Value = Block> {
    let kind = prop_oneof![
        runs_strategy().prop_map(|content| BlockKind::Paragraph { content }),
        (prop::option::of(-2i64..10), runs_strategy())
            .prop_map(|(level, content)| BlockKind::Heading { level, content }),
        runs_strategy().prop_map(|content| BlockKind::Quote { content }),
        text_strategy().prop_map(|source| BlockKind::Code { source }),
        (any::<bool>(), prop::collection::vec(runs_strategy(), 0..3)).prop_map(
            |(numbered, items)| BlockKind::List {
                style: if numbered {
                    ListStyle::Numbered
                } else {
                    ListStyle::Bulleted
                },
                items,
            }
        ),
    ];
    (kind, prop::option::of("[a-z0-9-]{1,12}")).prop_map(|(kind, id)| {
        let block = Block::new(kind);
        match id {
            Some(id) => block.with_id(id),
            None => block,
        }
    })
}

fn sequence_strategy() -> impl Strategy<Value = Vec<Block>> {
    prop::collection::vec(block_strategy(), 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn word_diff_rebuilds_both_texts(old in text_strategy(), new in text_strategy()) {
        let tokens = word_diff(&old, &new);
        prop_assert_eq!(old_text(&tokens), old);
        prop_assert_eq!(new_text(&tokens), new);
    }

    #[test]
    fn word_diff_of_equal_texts_is_unchanged(text in text_strategy()) {
        let tokens = word_diff(&text, &text);
        prop_assert!(tokens.iter().all(|token| token.is_unchanged()));
        let joined: String = tokens.iter().map(|token| token.value.as_str()).collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn normalization_round_trips_serialized_blocks(blocks in sequence_strategy()) {
        let serialized = serde_json::to_string(&blocks).unwrap();
        let first = normalize_str(&serialized).into_blocks();
        prop_assert_eq!(&first, &blocks);

        let again = normalize_str(&serde_json::to_string(&first).unwrap()).into_blocks();
        prop_assert_eq!(again, first);
    }

    #[test]
    fn uniform_choices_select_one_side(
        current in sequence_strategy(),
        generated in sequence_strategy(),
    ) {
        let len = current.len().max(generated.len());
        let all_current = vec![Choice::Current; len];
        let all_generated = vec![Choice::Generated; len];
        prop_assert_eq!(merge_blocks(&current, &generated, &all_current), current.clone());
        prop_assert_eq!(merge_blocks(&current, &generated, &all_generated), generated.clone());
    }
}
