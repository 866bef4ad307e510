//! Terminal front-end driven with scripted input.

mod common;

use common::{MockBackend, panel_with};
use rag_chat::repl::run_repl;
use serde_json::json;

async fn run(backend: MockBackend, input: &str) -> (String, std::sync::Arc<MockBackend>) {
    let (panel, backend, _) = panel_with(backend);
    let mut output = Vec::new();
    run_repl(&panel, input.as_bytes(), &mut output).await.unwrap();
    (String::from_utf8(output).unwrap(), backend)
}

#[tokio::test]
async fn test_answers_until_quit() {
    let backend = MockBackend::new().with_ask(json!({ "answer": "retrieval-augmented generation" }));

    let (output, backend) = run(backend, "\n   \n  What is RAG?  \nQuit\nnever asked\n").await;

    assert!(output.starts_with("Ready!\n"));
    assert!(output.contains("Answer: retrieval-augmented generation\n"));
    assert_eq!(backend.queries(), vec!["What is RAG?"]);
}

#[tokio::test]
async fn test_quit_words() {
    for word in ["quit", "EXIT", "q"] {
        let (_, backend) = run(MockBackend::new(), &format!("{word}\nhello\n")).await;
        assert!(backend.queries().is_empty(), "{word} should quit");
    }
}

#[tokio::test]
async fn test_end_of_input_stops() {
    let (output, backend) = run(MockBackend::new().with_ask_failure(), "hello").await;

    assert!(output.contains("Answer: Error contacting server\n"));
    assert_eq!(backend.queries(), vec!["hello"]);
}

#[tokio::test]
async fn test_upload_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    std::fs::write(&path, b"%PDF-1.4").unwrap();

    let backend = MockBackend::new().with_upload(json!({ "message": "ok" }));
    let input = format!(":upload {}\n:upload\n:upload /no/such/file.pdf\nexit\n", path.display());
    let (output, backend) = run(backend, &input).await;

    assert!(output.contains("Uploaded doc.pdf at "));
    assert!(output.contains("Usage: :upload <path>"));
    assert!(output.contains("Error: cannot read /no/such/file.pdf"));
    assert_eq!(backend.uploaded_names(), vec!["doc.pdf"]);
    assert!(backend.queries().is_empty());
}
