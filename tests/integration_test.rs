use learning_quiz::config::Config;
use learning_quiz::logger;
use learning_quiz::models::{Answer, QuestionType};
use learning_quiz::quiz::{ChoiceSlot, EditorAction, ItemVariant, RenderedItem};
use learning_quiz::{
    AnswerDecision, AnswerRecorder, LocalLearningSetSource, QuizQuestionAdapter, SessionLoader,
};
use tempfile::TempDir;

const GEO_SET: &str = r#"
[question_set]
id = "geo"
name = "Geography"

[[question_set.questions]]
text = "ねこ means?"
transcript = "neko"
type = "SINGLE_INPUT"

[[question_set.questions]]
text = "Describe a river"
type = "FREE_FORM"

[[question_set.questions]]
text = "What is the capital of France?"
transcript = "capital of France"
type = "SINGLE_INPUT"

[[question_set.questions]]
text = "Largest ocean?"
type = "MULTIPLE_CHOICE"
answers = [{ text = "Pacific" }, { text = "Atlantic" }, { text = "Indian" }, { text = "Arctic" }]

[[question_set.questions]]
text = "Draw a map"
type = "DRAWING"

[glossary]
id = "geo"
name = "Geography terms"

[[glossary.terms]]
term = "ocean"
definition = "a very large expanse of sea"
"#;

async fn loaded_adapter(config: &Config) -> (TempDir, QuizQuestionAdapter<AnswerRecorder>) {
    logger::init();

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("geo.toml"), GEO_SET).unwrap();

    let loader = SessionLoader::new(LocalLearningSetSource::new(dir.path()), config);
    let mut adapter = QuizQuestionAdapter::new(AnswerRecorder::new(config));
    let loaded = loader.load_learning_set(&mut adapter, "geo").await.unwrap();
    assert_eq!(loaded.glossary.terms.len(), 1);

    (dir, adapter)
}

#[tokio::test]
async fn test_session_from_local_learning_set() {
    let (_dir, adapter) = loaded_adapter(&Config::default()).await;

    assert_eq!(adapter.item_count(), 5);
    assert_eq!(adapter.question(4).question_type, QuestionType::Unknown);
    assert_eq!(adapter.item_variant(4), ItemVariant::SINGLE_LINE);
    assert_eq!(adapter.item_variant(3), ItemVariant::MultiChoice);
}

#[tokio::test]
async fn test_hint_toggle_reveals_transcript() {
    let (_dir, mut adapter) = loaded_adapter(&Config::default()).await;

    assert!(!adapter.render(2).transcript().is_visible());

    adapter.set_show_hint(true);
    let item = adapter.render(2);
    assert!(item.transcript().is_visible());
    assert_eq!(item.transcript().text, "capital of France");

    adapter.set_show_hint(false);
    assert!(adapter.render_all().iter().all(|i| !i.transcript().is_visible()));
}

#[tokio::test]
async fn test_free_text_answer_flow() {
    let (_dir, mut adapter) = loaded_adapter(&Config::default()).await;

    let decision = adapter.editor_action(2, EditorAction::Done, "Paris");
    assert_eq!(decision, Some(AnswerDecision::Record));

    let history = adapter.callback().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].question.text, "What is the capital of France?");
    assert_eq!(history[0].answer, Answer::new("Paris"));

    match adapter.render(2) {
        RenderedItem::TextInput(item) => assert_eq!(item.input.text, "Paris"),
        other => panic!("unexpected item {:?}", other),
    }
}

#[tokio::test]
async fn test_multiple_choice_grid_and_selection() {
    let (_dir, mut adapter) = loaded_adapter(&Config::default()).await;

    let item = match adapter.render(3) {
        RenderedItem::MultiChoice(item) => item,
        other => panic!("unexpected item {:?}", other),
    };
    assert_eq!(item.slots.len(), 6);
    assert_eq!(item.filler_count(), 2);
    assert_eq!(item.slots[0], ChoiceSlot::Choice(Answer::new("Pacific")));

    assert_eq!(adapter.select_choice(3, 0), Some(AnswerDecision::Record));
    assert_eq!(adapter.select_choice(3, 5), None);
    assert_eq!(adapter.callback().history().len(), 1);
    assert_eq!(adapter.user_answers()[&3], Answer::new("Pacific"));
}

#[tokio::test]
async fn test_blank_rejection_and_reload_clears_answers() {
    let config = Config {
        reject_blank_answers: true,
        ..Config::default()
    };
    let (dir, mut adapter) = loaded_adapter(&config).await;

    assert_eq!(adapter.submit_text(1, "  "), Some(AnswerDecision::Discard));
    assert_eq!(adapter.submit_text(1, "wide and slow"), Some(AnswerDecision::Record));
    assert_eq!(adapter.user_answers().len(), 1);

    let loader = SessionLoader::new(LocalLearningSetSource::new(dir.path()), &config);
    loader.load_questions(&mut adapter, "geo").await.unwrap();
    assert!(adapter.user_answers().is_empty());
    assert_eq!(adapter.callback().stats().rejected, 1);
}
