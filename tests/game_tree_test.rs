//! Tests for GameTree navigation, learning and both text formats

use rstest::{fixture, rstest};

use twentyq::domain::{is_answer_text, Choice, DomainError, GameTree};
use twentyq::util::testing;

const ANIMALS: &str = include_str!("resources/games/animals.txt");

#[fixture]
fn feathers() -> GameTree {
    testing::init_test_setup();
    GameTree::from_lines(["Feathers?", "chicken", "horse"]).unwrap()
}

#[fixture]
fn animals() -> GameTree {
    testing::init_test_setup();
    GameTree::from_lines(ANIMALS.lines()).unwrap()
}

fn all_nodes_respect_leaf_rule(tree: &GameTree) -> bool {
    tree.arena().iter().all(|node| {
        let has_children = node.yes.is_some() && node.no.is_some();
        let has_no_children = node.yes.is_none() && node.no.is_none();
        if is_answer_text(&node.content) {
            node.is_answer() && has_no_children
        } else {
            !node.is_answer() && has_children
        }
    })
}

// ============================================================
// Full game
// ============================================================

#[rstest]
fn given_feathers_game_when_playing_a_miss_then_learns_goose(mut feathers: GameTree) {
    assert_eq!(feathers.current_content(), "Feathers?");
    assert!(!feathers.is_answer());

    feathers.choose(Choice::No).unwrap();
    assert_eq!(feathers.current_content(), "horse");
    assert!(feathers.is_answer());

    feathers.add("Does it swim?", "goose").unwrap();
    feathers.restart();
    feathers.choose(Choice::No).unwrap();
    feathers.choose(Choice::Yes).unwrap();
    assert_eq!(feathers.current_content(), "goose");
}

// ============================================================
// Navigation
// ============================================================

#[rstest]
#[case(&[], "Does it have feathers?", false)]
#[case(&[Choice::Yes], "Can it fly?", false)]
#[case(&[Choice::Yes, Choice::Yes], "eagle", true)]
#[case(&[Choice::Yes, Choice::No], "penguin", true)]
#[case(&[Choice::No, Choice::Yes, Choice::Yes], "whale", true)]
#[case(&[Choice::No, Choice::Yes, Choice::No], "shark", true)]
#[case(&[Choice::No, Choice::No], "Does it moo?", false)]
#[case(&[Choice::No, Choice::No, Choice::No], "horse", true)]
fn given_replies_when_choosing_then_reaches_expected_node(
    mut animals: GameTree,
    #[case] choices: &[Choice],
    #[case] expected: &str,
    #[case] answer: bool,
) {
    for &choice in choices {
        animals.choose(choice).unwrap();
    }
    assert_eq!(animals.current_content(), expected);
    assert_eq!(animals.is_answer(), answer);
    assert_eq!(animals.path(), choices);
}

#[rstest]
fn given_any_history_when_restart_then_back_at_root(mut animals: GameTree) {
    animals.choose(Choice::No).unwrap();
    animals.choose(Choice::No).unwrap();
    animals.choose(Choice::Yes).unwrap();
    animals.add("Does it give milk?", "goat").unwrap();

    animals.restart();
    assert_eq!(animals.current_content(), "Does it have feathers?");
    assert!(animals.path().is_empty());

    animals.restart();
    assert_eq!(animals.current_content(), "Does it have feathers?");
}

#[rstest]
fn given_cursor_on_answer_when_choosing_then_error_and_cursor_kept(mut feathers: GameTree) {
    feathers.choose(Choice::Yes).unwrap();
    assert_eq!(feathers.choose(Choice::No), Err(DomainError::AtAnswer));
    assert_eq!(feathers.current_content(), "chicken");
}

// ============================================================
// Learning
// ============================================================

#[rstest]
fn given_miss_when_add_then_tree_grows_by_two_and_rest_unchanged(mut animals: GameTree) {
    let before: Vec<String> = animals.persisted_lines().map(String::from).collect();
    let count = animals.node_count();

    animals.choose(Choice::Yes).unwrap();
    animals.choose(Choice::No).unwrap();
    animals.add("Does it live in Antarctica?", "emperor penguin").unwrap();

    assert_eq!(animals.node_count(), count + 2);
    assert_eq!(animals.current_content(), "Does it live in Antarctica?");

    let after: Vec<String> = animals.persisted_lines().map(String::from).collect();
    let mut expected = before.clone();
    let at = expected.iter().position(|l| l == "penguin").unwrap();
    expected.splice(
        at..=at,
        [
            "Does it live in Antarctica?".to_string(),
            "emperor penguin".to_string(),
            "penguin".to_string(),
        ],
    );
    assert_eq!(after, expected);

    animals.choose(Choice::Yes).unwrap();
    assert_eq!(animals.current_content(), "emperor penguin");
    assert!(animals.is_answer());
    animals.restart();
    for choice in [Choice::Yes, Choice::No, Choice::No] {
        animals.choose(choice).unwrap();
    }
    assert_eq!(animals.current_content(), "penguin");
    assert!(animals.is_answer());
}

#[rstest]
fn given_many_adds_then_leaf_rule_holds_everywhere(mut animals: GameTree) {
    let lessons = [
        (vec![Choice::Yes, Choice::Yes], "Is it a bird of prey?", "hawk"),
        (vec![Choice::No, Choice::No, Choice::No], "Does it have stripes?", "zebra"),
        (vec![Choice::No, Choice::Yes, Choice::Yes], "Is it huge?", "blue whale"),
    ];
    for (choices, question, answer) in lessons {
        animals.restart();
        for choice in choices {
            animals.choose(choice).unwrap();
        }
        animals.add(question, answer).unwrap();
        assert!(all_nodes_respect_leaf_rule(&animals));
    }
    assert_eq!(animals.node_count(), 11 + 6);
}

#[rstest]
fn given_single_answer_when_add_on_root_then_grows_by_two_and_leaf_rule_holds() {
    let mut tree = GameTree::from_lines(["horse"]).unwrap();
    assert!(tree.is_answer());

    tree.add("Does it moo?", "cow").unwrap();

    assert_eq!(tree.node_count(), 3);
    assert!(all_nodes_respect_leaf_rule(&tree));
    assert_eq!(tree.outline(), "horse\nDoes it moo?\n- cow\n");
    tree.restart();
    tree.choose(Choice::Yes).unwrap();
    assert_eq!(tree.current_content(), "cow");
}

#[rstest]
#[case("Does it swim", "goose")]
#[case("", "goose")]
#[case("goose", "Does it swim?")]
fn given_question_without_question_mark_when_add_then_rejected(
    mut feathers: GameTree,
    #[case] question: &str,
    #[case] answer: &str,
) {
    feathers.choose(Choice::Yes).unwrap();
    let err = feathers.add(question, answer).unwrap_err();
    assert!(matches!(err, DomainError::NotAQuestion(_)));
    assert_eq!(feathers.node_count(), 3);
    assert_eq!(feathers.current_content(), "chicken");
}

#[rstest]
#[case("Does it swim?", "a fish?")]
#[case("Does it swim?", "  goose? ")]
#[case("Does it swim?", "?")]
fn given_answer_ending_in_question_mark_when_add_then_rejected(
    mut feathers: GameTree,
    #[case] question: &str,
    #[case] answer: &str,
) {
    feathers.choose(Choice::No).unwrap();
    let before: Vec<String> = feathers.persisted_lines().map(String::from).collect();

    let err = feathers.add(question, answer).unwrap_err();

    assert!(matches!(err, DomainError::NotAnAnswer(_)));
    assert_eq!(feathers.current_content(), "horse");
    assert!(feathers.is_answer());
    let after: Vec<String> = feathers.persisted_lines().map(String::from).collect();
    assert_eq!(after, before);
}

#[rstest]
fn given_add_when_dumped_and_reloaded_then_identical_and_playable(mut feathers: GameTree) {
    feathers.choose(Choice::No).unwrap();
    feathers.add("Does it swim?", "a fish").unwrap();

    let dumped: Vec<String> = feathers.persisted_lines().map(String::from).collect();
    let mut reloaded = GameTree::from_lines(&dumped).unwrap();

    assert_eq!(reloaded.outline(), feathers.outline());
    assert!(all_nodes_respect_leaf_rule(&reloaded));
    reloaded.choose(Choice::No).unwrap();
    reloaded.choose(Choice::Yes).unwrap();
    assert_eq!(reloaded.current_content(), "a fish");
    assert!(reloaded.is_answer());
}

// ============================================================
// Outline (pretty-print)
// ============================================================

#[rstest]
fn given_feathers_when_outline_then_no_branch_first(feathers: GameTree) {
    assert_eq!(feathers.outline(), "horse\nFeathers?\n- chicken\n");
}

#[rstest]
fn given_animals_when_outline_then_matches_layout(animals: GameTree) {
    let expected = "\
horse
Does it moo?
- cow
Does it live in water?
- shark
- Is it a mammal?
- - whale
Does it have feathers?
- penguin
- Can it fly?
- - eagle
";
    assert_eq!(animals.outline(), expected);
    assert_eq!(animals.to_string(), expected);
}

#[test]
fn given_single_answer_when_outline_then_one_line() {
    let tree = GameTree::from_lines(["horse"]).unwrap();
    assert_eq!(tree.outline(), "horse\n");
    assert!(tree.is_answer());
}

// ============================================================
// Persisted form
// ============================================================

#[rstest]
#[case::single("horse\n")]
#[case::feathers("Feathers?\nchicken\nhorse\n")]
#[case::animals(ANIMALS)]
#[case::left_deep("A?\nB?\nC?\nd\ne\nf\ng\n")]
#[case::right_deep("A?\nb\nB?\nc\nC?\nd\ne\n")]
fn given_wellformed_lines_when_dump_and_reload_then_identical(#[case] text: &str) {
    let tree = GameTree::from_lines(text.lines()).unwrap();
    let dumped: Vec<&str> = tree.persisted_lines().collect();
    assert_eq!(dumped, text.lines().collect::<Vec<_>>());

    let reloaded = GameTree::from_lines(dumped.iter()).unwrap();
    assert_eq!(reloaded.outline(), tree.outline());
    assert_eq!(
        reloaded.persisted_lines().collect::<Vec<_>>(),
        tree.persisted_lines().collect::<Vec<_>>()
    );
}

#[rstest]
fn given_learned_tree_when_reloaded_then_learning_survives(mut feathers: GameTree) {
    feathers.choose(Choice::Yes).unwrap();
    feathers.add("Does it swim?", "goose").unwrap();
    let dumped: Vec<String> = feathers.persisted_lines().map(String::from).collect();
    assert_eq!(dumped, vec!["Feathers?", "Does it swim?", "goose", "chicken", "horse"]);

    let mut reloaded = GameTree::from_lines(&dumped).unwrap();
    reloaded.choose(Choice::Yes).unwrap();
    reloaded.choose(Choice::Yes).unwrap();
    assert_eq!(reloaded.current_content(), "goose");
}

#[test]
fn given_deep_chain_when_built_and_dumped_then_no_stack_overflow() {
    // Every question answers on yes and continues on no
    let depth = 100_000;
    let mut lines = Vec::with_capacity(depth * 2 + 1);
    for i in 0..depth {
        lines.push(format!("Is it number {}?", i));
        lines.push(format!("number {}", i));
    }
    lines.push("something else".to_string());

    let tree = GameTree::from_lines(&lines).unwrap();
    assert_eq!(tree.node_count(), depth * 2 + 1);
    assert_eq!(tree.depth(), depth + 1);
    assert_eq!(tree.persisted_lines().count(), lines.len());
    assert_eq!(tree.outline().lines().count(), lines.len());
}

// ============================================================
// Malformed input
// ============================================================

#[test]
fn given_no_lines_when_building_then_empty_source() {
    let lines: [&str; 0] = [];
    assert_eq!(
        GameTree::from_lines(lines).unwrap_err(),
        DomainError::EmptySource
    );
}

#[test]
fn given_truncated_lines_when_building_then_truncated_error() {
    let text = include_str!("resources/games/truncated.txt");
    assert_eq!(
        GameTree::from_lines(text.lines()).unwrap_err(),
        DomainError::Truncated { line: 5 }
    );
}

#[test]
fn given_untidy_lines_when_building_then_trimmed_and_surplus_ignored() {
    let text = include_str!("resources/games/untidy.txt");
    let tree = GameTree::from_lines(text.lines()).unwrap();
    assert_eq!(
        tree.persisted_lines().collect::<Vec<_>>(),
        vec!["Feathers?", "chicken", "horse"]
    );
}

#[test]
fn given_blank_line_when_building_then_kept_as_empty_answer() {
    let mut tree = GameTree::from_lines(["Feathers?", "   ", "horse"]).unwrap();
    tree.choose(Choice::Yes).unwrap();
    assert_eq!(tree.current_content(), "");
    assert!(tree.is_answer());
}
