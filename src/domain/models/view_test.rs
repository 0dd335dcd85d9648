use anyhow::Result;
use test_utils::nine_words_fixture;
use test_utils::past_tense_fixture;

use super::Feedback;
use super::FeedbackKind;
use super::Hint;
use super::StudyMode;
use super::Word;
use super::WordSet;
use super::WordView;

fn set_from(fixture: &str) -> Result<WordSet> {
    let words: Vec<Word> = serde_json::from_str(fixture)?;
    return WordSet::new(words);
}

#[test]
fn it_shows_the_first_word() -> Result<()> {
    let set = set_from(nine_words_fixture())?;
    let view = WordView::new(&set, StudyMode::BaseForm, None);

    assert_eq!(view.meaning, "달리다");
    assert_eq!(view.word_number, 1);
    assert_eq!(view.word_count, 9);
    assert_eq!(view.subset_number, 1);
    assert_eq!(view.subset_count, 3);
    assert_eq!(view.answer, "");
    assert_eq!(view.feedback, None);
    insta::assert_snapshot!(view.progress(), @"Word: 1/9 · Set: 1/3");

    return Ok(());
}

#[test]
fn it_tracks_sub_sets() -> Result<()> {
    let mut set = set_from(nine_words_fixture())?;

    set.move_to(3)?;
    let view = WordView::new(&set, StudyMode::BaseForm, None);
    insta::assert_snapshot!(view.progress(), @"Word: 4/9 · Set: 2/3");

    set.move_to(8)?;
    let view = WordView::new(&set, StudyMode::BaseForm, None);
    insta::assert_snapshot!(view.progress(), @"Word: 9/9 · Set: 3/3");

    return Ok(());
}

#[test]
fn it_asks_by_meaning_in_past_tense_mode() -> Result<()> {
    let set = set_from(past_tense_fixture())?;
    let view = WordView::new(&set, StudyMode::PastTense, None);

    assert_eq!(view.meaning, "도착하다");
    assert_eq!(view.mode, StudyMode::PastTense);

    return Ok(());
}

#[test]
fn it_formats_feedback() -> Result<()> {
    let words: Vec<Word> = serde_json::from_str(past_tense_fixture())?;

    let correct = Feedback::correct(&words[0], StudyMode::BaseForm);
    assert_eq!(correct.kind, FeedbackKind::Correct);
    insta::assert_snapshot!(correct.text, @"✅ Correct: arrive");

    let correct = Feedback::correct(&words[0], StudyMode::PastTense);
    insta::assert_snapshot!(correct.text, @"✅ Correct: arrive → arrived");

    let incorrect = Feedback::incorrect(&words[1], StudyMode::PastTense);
    assert_eq!(incorrect.kind, FeedbackKind::Incorrect);
    insta::assert_snapshot!(incorrect.text, @"❌ Incorrect! Answer: go → went");

    return Ok(());
}

#[test]
fn it_builds_hints_with_examples() -> Result<()> {
    let words: Vec<Word> = serde_json::from_str(nine_words_fixture())?;
    let hint = Hint::from_word(&words[0]);

    assert_eq!(hint.example, Some("I run every morning.".to_string()));
    assert_eq!(hint.first_letter, "r");
    insta::assert_snapshot!(hint.format(), @r###"
    Example:
    I run every morning.

    First letter:
    r...
    "###);

    return Ok(());
}

#[test]
fn it_builds_hints_without_examples() {
    let word = Word {
        word: "book".to_string(),
        meaning: "책".to_string(),
        example: Some("  ".to_string()),
        ..Word::default()
    };
    let hint = Hint::from_word(&word);

    assert_eq!(hint.example, None);
    insta::assert_snapshot!(hint.format(), @r###"
    Example:
    none

    First letter:
    b...
    "###);
}
