use pretty_assertions::assert_eq;
use test_log::test;

use super::*;

/// Feed all fragments, returning the owned snapshots after every feed and the
/// final split.
fn feed_all(fragments: &[&str]) -> (Vec<(String, String, bool)>, Split) {
    let mut splitter = StreamSplitter::default();
    let snapshots = fragments
        .iter()
        .map(|fragment| {
            let snapshot = splitter.feed(fragment).unwrap();
            (
                snapshot.visible.to_owned(),
                snapshot.reasoning.to_owned(),
                snapshot.inside_reasoning,
            )
        })
        .collect();

    (snapshots, splitter.finalize())
}

fn split(fragments: &[&str]) -> Split {
    feed_all(fragments).1
}

#[test]
fn test_text_without_markers_is_visible() {
    let result = split(&["Hello", ", ", "world!"]);

    assert_eq!(result, Split {
        visible: "Hello, world!".to_owned(),
        reasoning: String::new(),
        had_reasoning: false,
    });
}

#[test]
fn test_single_fragment_with_reasoning() {
    let result = split(&["A<think>B</think>C"]);

    assert_eq!(result, Split {
        visible: "AC".to_owned(),
        reasoning: "B".to_owned(),
        had_reasoning: true,
    });
}

#[test]
fn test_open_marker_split_across_fragments() {
    let result = split(&["<th", "ink>X</think>"]);

    assert_eq!(result.visible, "");
    assert_eq!(result.reasoning, "X");
    assert!(result.had_reasoning);
}

#[test]
fn test_close_marker_split_across_fragments() {
    let result = split(&["<think>reason</", "thi", "nk>Answer"]);

    assert_eq!(result.visible, "Answer");
    assert_eq!(result.reasoning, "reason");
}

#[test]
fn test_unterminated_reasoning_is_kept_as_reasoning() {
    let result = split(&["A<think>B"]);

    assert_eq!(result, Split {
        visible: "A".to_owned(),
        reasoning: "B".to_owned(),
        had_reasoning: true,
    });
}

#[test]
fn test_unterminated_with_partial_close_marker() {
    let result = split(&["<think>almost done</thi"]);

    assert_eq!(result.visible, "");
    assert_eq!(result.reasoning, "almost done</thi");
}

#[test]
fn test_repeated_sections_are_joined_with_separator() {
    let result = split(&["<think>A</think>X<think>B</think>Y"]);

    assert_eq!(result, Split {
        visible: "XY".to_owned(),
        reasoning: "A\nB".to_owned(),
        had_reasoning: true,
    });
}

#[test]
fn test_empty_first_section_still_gets_separator() {
    let result = split(&["<think></think>X<think>B</think>"]);

    assert_eq!(result.visible, "X");
    assert_eq!(result.reasoning, "\nB");
}

#[test]
fn test_custom_separator() {
    let delimiters = Delimiters::default().with_separator("\n---\n");
    let result = split_complete("<think>A</think><think>B</think>", delimiters);

    assert_eq!(result.reasoning, "A\n---\nB");
}

#[test]
fn test_nested_looking_open_marker_is_reasoning_text() {
    let result = split(&["<think>a<think>b</think>c</think>d"]);

    assert_eq!(result.reasoning, "a<think>b");
    assert_eq!(result.visible, "c</think>d");
}

#[test]
fn test_reversed_markers_are_visible_text() {
    let result = split(&["</think>hi<think"]);

    assert_eq!(result.visible, "</think>hi<think");
    assert!(!result.had_reasoning);
}

#[test]
fn test_markers_are_case_sensitive() {
    let result = split(&["<THINK>x</THINK>"]);

    assert_eq!(result.visible, "<THINK>x</THINK>");
    assert!(!result.had_reasoning);
}

#[test]
fn test_character_by_character_feed() {
    let text = "pre<think>deep thought</think>post";
    let fragments = text
        .char_indices()
        .map(|(i, c)| &text[i..i + c.len_utf8()])
        .collect::<Vec<_>>();

    assert_eq!(split(&fragments), split(&[text]));
}

#[test]
fn test_multibyte_text_around_markers() {
    let result = split(&["héllo <", "think>🦀 ", "ünïcode</", "think> wörld"]);

    assert_eq!(result.visible, "héllo  wörld");
    assert_eq!(result.reasoning, "🦀 ünïcode");
}

#[test]
fn test_empty_fragments_are_noops() {
    let mut splitter = StreamSplitter::default();
    let snapshot = splitter.feed("").unwrap();
    assert_eq!(snapshot.visible, "");
    assert!(!snapshot.inside_reasoning);

    splitter.feed("<think>x").unwrap();
    let snapshot = splitter.feed("").unwrap();
    assert_eq!(snapshot.reasoning, "x");
    assert!(snapshot.inside_reasoning);
}

#[test]
fn test_no_fragments() {
    assert_eq!(split(&[]), Split::default());
}

#[test]
fn test_live_snapshots_hold_back_partial_markers() {
    let (snapshots, _) = feed_all(&["Hi <th", "ink>plan</th", "ink>Done"]);

    assert_eq!(snapshots, vec![
        ("Hi ".to_owned(), String::new(), false),
        ("Hi ".to_owned(), "plan".to_owned(), true),
        ("Hi Done".to_owned(), "plan".to_owned(), false),
    ]);
}

#[test]
fn test_held_back_text_is_released_when_no_marker_follows() {
    let mut splitter = StreamSplitter::default();

    assert_eq!(splitter.feed("a <").unwrap().visible, "a ");
    assert_eq!(splitter.feed("b").unwrap().visible, "a <b");
}

#[test]
fn test_finalize_is_idempotent() {
    let mut splitter = StreamSplitter::default();
    splitter.feed("x<think>y</thi").unwrap();

    let first = splitter.finalize();
    let second = splitter.finalize();
    assert_eq!(first, second);
    assert!(splitter.is_finalized());
}

#[test]
fn test_feed_after_finalize_is_an_error() {
    let mut splitter = StreamSplitter::default();
    splitter.feed("x").unwrap();
    splitter.finalize();

    assert_eq!(splitter.feed("y"), Err(Error::Finalized));
    assert_eq!(splitter.finalize().visible, "x");
}

#[test]
fn test_raw_keeps_markers() {
    let mut splitter = StreamSplitter::default();
    splitter.feed("a<think>").unwrap();
    splitter.feed("b</think>").unwrap();

    assert_eq!(splitter.raw(), "a<think>b</think>");
}

#[test]
fn test_alternate_markers() {
    let delimiters = Delimiters::new("[[", "]]").unwrap();
    let mut splitter = StreamSplitter::new(delimiters);
    splitter.feed("one [").unwrap();
    splitter.feed("[two]").unwrap();
    splitter.feed("] three").unwrap();

    let result = splitter.finalize();
    assert_eq!(result.visible, "one  three");
    assert_eq!(result.reasoning, "two");
}

#[test]
fn test_held_back_prefers_longest_overlap() {
    assert_eq!(held_back("abc<thi", "<think>"), 4);
    assert_eq!(held_back("abc<", "<think>"), 1);
    assert_eq!(held_back("abc", "<think>"), 0);
    assert_eq!(held_back("<think", "<think>"), 6);
    assert_eq!(held_back("aaa", "aab"), 2);
}

mod properties {
    use proptest::{prelude::*, sample::Index};

    use super::super::*;

    fn text() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just("<think>".to_owned()),
                Just("</think>".to_owned()),
                Just("<".to_owned()),
                Just("</".to_owned()),
                Just("<th".to_owned()),
                Just("ink>".to_owned()),
                "[a-z é🦀\n]{0,5}",
            ],
            0..24,
        )
        .prop_map(|parts| parts.concat())
    }

    /// Cut `text` into fragments at the char boundaries picked by `cuts`.
    fn fragments<'a>(text: &'a str, cuts: &[Index]) -> Vec<&'a str> {
        let boundaries = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect::<Vec<_>>();

        let mut cuts = cuts
            .iter()
            .map(|cut| boundaries[cut.index(boundaries.len())])
            .collect::<Vec<_>>();
        cuts.sort_unstable();
        cuts.dedup();

        let mut start = 0;
        let mut fragments = vec![];
        for cut in cuts {
            fragments.push(&text[start..cut]);
            start = cut;
        }
        fragments.push(&text[start..]);
        fragments
    }

    proptest! {
        #[test]
        fn chunking_does_not_change_the_result(
            text in text(),
            cuts in prop::collection::vec(any::<Index>(), 0..12),
        ) {
            let whole = split_complete(&text, Delimiters::default());

            let mut splitter = StreamSplitter::default();
            for fragment in fragments(&text, &cuts) {
                splitter.feed(fragment).unwrap();
            }

            prop_assert_eq!(splitter.finalize(), whole);
        }

        #[test]
        fn snapshots_are_prefixes_of_the_result(
            text in text(),
            cuts in prop::collection::vec(any::<Index>(), 0..12),
        ) {
            let mut splitter = StreamSplitter::default();
            let mut snapshots = vec![];
            for fragment in fragments(&text, &cuts) {
                let snapshot = splitter.feed(fragment).unwrap();
                snapshots.push((snapshot.visible.to_owned(), snapshot.reasoning.to_owned()));
            }

            let result = splitter.finalize();
            let mut previous = (String::new(), String::new());
            for (visible, reasoning) in snapshots {
                prop_assert!(visible.starts_with(&previous.0));
                prop_assert!(reasoning.starts_with(&previous.1));
                prop_assert!(result.visible.starts_with(&visible));
                prop_assert!(result.reasoning.starts_with(&reasoning));
                previous = (visible, reasoning);
            }
        }

        #[test]
        fn text_without_markers_is_all_visible(text in "[a-z <>/é\n]{0,64}") {
            prop_assume!(!text.contains("<think>"));

            let result = split_complete(&text, Delimiters::default());
            prop_assert_eq!(result.visible, text);
            prop_assert!(!result.had_reasoning);
        }
    }
}
