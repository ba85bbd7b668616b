use pretty_assertions::assert_eq;

use super::{mock::MockProvider, *};

#[tokio::test]
async fn test_available_models_includes_default() {
    let provider =
        MockProvider::new(Vec::<String>::new()).with_models(vec!["llama3:8b".to_owned()]);

    let models = available_models(&provider, "deepseek-r1:14b").await;
    assert_eq!(models, vec!["deepseek-r1:14b", "llama3:8b"]);
}

#[tokio::test]
async fn test_available_models_keeps_listed_default_in_place() {
    let provider = MockProvider::new(Vec::<String>::new())
        .with_models(vec!["llama3:8b".to_owned(), "deepseek-r1:14b".to_owned()]);

    let models = available_models(&provider, "deepseek-r1:14b").await;
    assert_eq!(models, vec!["llama3:8b", "deepseek-r1:14b"]);
}

#[tokio::test]
async fn test_available_models_falls_back_to_default() {
    let provider = MockProvider::new(Vec::<String>::new()).unreachable();

    let models = available_models(&provider, "deepseek-r1:14b").await;
    assert_eq!(models, vec!["deepseek-r1:14b"]);
}

#[test]
fn test_chat_request_builder() {
    let request = ChatRequest::new("deepseek-r1:14b", vec![Message::user("hi")]);
    assert_eq!(request.temperature, None);

    let request = request.with_temperature(0.3);
    assert_eq!(request.temperature, Some(0.3));
    assert_eq!(request.messages.len(), 1);
}
