//! End-to-end pipeline tests with stub providers: ingest → retrieve →
//! context assembly → completion.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docrag::prompt::{assemble_context, build_prompt};
use docrag::{
    CompletionProvider, DocumentSource, EmbeddingProvider, InMemoryVectorStore, RagConfig,
    RagError, RagPipeline, RecursiveChunker, Result, ScoredResult, VectorStore,
};

/// Deterministic pseudo-random embeddings derived from the text's hash.
struct HashEmbedder {
    dims: usize,
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut state = hasher.finish() | 1;
        let mut embedding = Vec::with_capacity(self.dims);
        for _ in 0..self.dims {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            embedding.push((state >> 40) as f32 / (1u64 << 23) as f32 - 1.0);
        }
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}

/// Records every prompt it receives and returns a fixed reply.
struct RecordingCompletion {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingCompletion {
    fn new(reply: &str) -> Self {
        Self { reply: reply.to_string(), prompts: Mutex::new(Vec::new()) }
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().expect("no prompt recorded")
    }
}

#[async_trait]
impl CompletionProvider for RecordingCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RagError::Embedding { provider: "stub".into(), message: "unreachable host".into() })
    }

    fn dimensions(&self) -> usize {
        16
    }
}

struct FailingCompletion;

#[async_trait]
impl CompletionProvider for FailingCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(RagError::Completion { provider: "stub".into(), message: "model timed out".into() })
    }
}

fn build_pipeline(
    config: RagConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    completion: Arc<dyn CompletionProvider>,
) -> (RagPipeline, Arc<InMemoryVectorStore>) {
    let store = Arc::new(InMemoryVectorStore::new(embedder.clone()));
    let pipeline = RagPipeline::builder()
        .config(config.clone())
        .chunker(Arc::new(RecursiveChunker::new(config.chunk_size, config.chunk_overlap)))
        .embedding_provider(embedder)
        .vector_store(store.clone())
        .completion_provider(completion)
        .build()
        .unwrap();
    (pipeline, store)
}

#[tokio::test]
async fn ingest_then_answer_returns_completion_verbatim() {
    let completion = Arc::new(RecordingCompletion::new("The warehouse opens at 6 AM."));
    let (pipeline, _store) = build_pipeline(
        RagConfig::default(),
        Arc::new(HashEmbedder { dims: 16 }),
        completion.clone(),
    );

    pipeline
        .ingest(
            "The warehouse opens at 6 AM on weekdays.\n\n\
             Deliveries are accepted until 4 PM at the rear gate.",
            DocumentSource::Text,
        )
        .await
        .unwrap();

    let answer = pipeline.answer("When does the warehouse open?").await.unwrap();
    assert_eq!(answer, "The warehouse opens at 6 AM.");

    let prompt = completion.last_prompt();
    assert!(prompt.contains("warehouse opens at 6 AM"));
    assert!(prompt.contains("When does the warehouse open?"));
}

#[tokio::test]
async fn prompt_sections_appear_in_fixed_order() {
    let completion = Arc::new(RecordingCompletion::new("ok"));
    let (pipeline, _store) = build_pipeline(
        RagConfig::default(),
        Arc::new(HashEmbedder { dims: 16 }),
        completion.clone(),
    );

    pipeline.ingest("Facts about shipping schedules.", DocumentSource::Text).await.unwrap();
    pipeline.answer("What are the facts?").await.unwrap();

    let prompt = completion.last_prompt();
    let system = prompt.find("[SYSTEM]").unwrap();
    let context = prompt.find("[CONTEXT]").unwrap();
    let question = prompt.find("[QUESTION]").unwrap();
    let answer = prompt.find("[ANSWER]").unwrap();
    assert!(system < context && context < question && question < answer);
}

#[tokio::test]
async fn ingest_returns_one_id_per_persisted_chunk() {
    let config = RagConfig::builder().chunk_size(40).chunk_overlap(8).top_k(4).build().unwrap();
    let completion = Arc::new(RecordingCompletion::new("ok"));
    let (pipeline, store) =
        build_pipeline(config, Arc::new(HashEmbedder { dims: 16 }), completion);

    let ids = pipeline
        .ingest(
            "Order processing begins once payment clears. Refunds are issued to the \
             original payment method within five business days of approval.",
            DocumentSource::Text,
        )
        .await
        .unwrap();

    assert!(ids.len() > 1);
    assert_eq!(store.all_records().await.len(), ids.len());
}

#[tokio::test]
async fn ingest_with_no_usable_text_fails() {
    let completion = Arc::new(RecordingCompletion::new("ok"));
    let (pipeline, _store) = build_pipeline(
        RagConfig::default(),
        Arc::new(HashEmbedder { dims: 16 }),
        completion,
    );

    let err = pipeline.ingest("   \n\t  ", DocumentSource::Text).await.unwrap_err();
    assert!(matches!(err, RagError::EmptyContent));
}

#[tokio::test]
async fn empty_question_is_rejected() {
    let completion = Arc::new(RecordingCompletion::new("ok"));
    let (pipeline, _store) = build_pipeline(
        RagConfig::default(),
        Arc::new(HashEmbedder { dims: 16 }),
        completion,
    );

    let err = pipeline.answer("   ").await.unwrap_err();
    assert!(matches!(err, RagError::InvalidArgument(_)));
}

#[tokio::test]
async fn empty_store_answer_gets_empty_context_block() {
    let completion = Arc::new(RecordingCompletion::new("I do not know."));
    let (pipeline, _store) = build_pipeline(
        RagConfig::default(),
        Arc::new(HashEmbedder { dims: 16 }),
        completion.clone(),
    );

    let answer = pipeline.answer("Is anything known?").await.unwrap();
    assert_eq!(answer, "I do not know.");

    let prompt = completion.last_prompt();
    let context_start = prompt.find("[CONTEXT]").unwrap() + "[CONTEXT]".len();
    let question_start = prompt.find("[QUESTION]").unwrap();
    assert!(prompt[context_start..question_start].trim().is_empty());
}

#[tokio::test]
async fn records_are_tagged_with_their_source() {
    let completion = Arc::new(RecordingCompletion::new("ok"));
    let (pipeline, store) = build_pipeline(
        RagConfig::default(),
        Arc::new(HashEmbedder { dims: 16 }),
        completion,
    );

    pipeline.ingest("pasted notes", DocumentSource::Text).await.unwrap();
    pipeline.ingest("extracted report", DocumentSource::PdfUpload).await.unwrap();
    pipeline
        .ingest("scraped article", DocumentSource::Url("https://example.com/a".to_string()))
        .await
        .unwrap();

    let records = store.all_records().await;
    let sources: Vec<&str> =
        records.iter().map(|r| r.metadata.get("source").unwrap().as_str()).collect();
    assert_eq!(sources, vec!["text-input", "pdf-upload", "https://example.com/a"]);
}

#[tokio::test]
async fn repeated_retrieval_is_deterministic() {
    let completion = Arc::new(RecordingCompletion::new("ok"));
    let (pipeline, _store) = build_pipeline(
        RagConfig::default(),
        Arc::new(HashEmbedder { dims: 16 }),
        completion,
    );

    pipeline.ingest("Invoices are numbered sequentially.", DocumentSource::Text).await.unwrap();
    pipeline.ingest("Credit notes reference the invoice.", DocumentSource::Text).await.unwrap();

    let first = pipeline.retrieve("How are invoices numbered?", 2).await.unwrap();
    let second = pipeline.retrieve("How are invoices numbered?", 2).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn embedding_failure_propagates_from_both_paths() {
    let completion = Arc::new(RecordingCompletion::new("ok"));
    let (pipeline, _store) =
        build_pipeline(RagConfig::default(), Arc::new(FailingEmbedder), completion);

    let err = pipeline.ingest("some text", DocumentSource::Text).await.unwrap_err();
    assert!(matches!(err, RagError::Embedding { .. }));

    let err = pipeline.answer("a question").await.unwrap_err();
    assert!(matches!(err, RagError::Embedding { .. }));
}

#[tokio::test]
async fn completion_failure_propagates() {
    let (pipeline, _store) = build_pipeline(
        RagConfig::default(),
        Arc::new(HashEmbedder { dims: 16 }),
        Arc::new(FailingCompletion),
    );

    pipeline.ingest("some text", DocumentSource::Text).await.unwrap();
    let err = pipeline.answer("a question").await.unwrap_err();
    assert!(matches!(err, RagError::Completion { .. }));
}

#[test]
fn builder_rejects_missing_fields() {
    let err = RagPipeline::builder().config(RagConfig::default()).build().unwrap_err();
    assert!(matches!(err, RagError::Config(_)));
}

#[test]
fn config_builder_validates_parameters() {
    let err = RagConfig::builder().chunk_size(100).chunk_overlap(100).build().unwrap_err();
    assert!(matches!(err, RagError::Config(_)));

    let err = RagConfig::builder().top_k(0).build().unwrap_err();
    assert!(matches!(err, RagError::Config(_)));

    let config = RagConfig::builder()
        .chunk_size(400)
        .chunk_overlap(50)
        .top_k(2)
        .max_context_chars(2000)
        .build()
        .unwrap();
    assert_eq!(config.max_context_chars, Some(2000));
}

fn scored(content: &str) -> ScoredResult {
    ScoredResult { content: content.to_string(), metadata: HashMap::new(), similarity: 1.0 }
}

#[test]
fn context_joins_results_with_blank_lines() {
    let results = [scored("first passage"), scored("second passage")];
    assert_eq!(assemble_context(&results, None), "first passage\n\nsecond passage");
    assert_eq!(assemble_context(&[], None), "");
}

#[test]
fn context_cap_keeps_whole_results_only() {
    let results = [scored("aaaa"), scored("bbbb"), scored("cccc")];
    // 4 + 2 + 4 = 10 chars fit; the third result would exceed the cap.
    assert_eq!(assemble_context(&results, Some(10)), "aaaa\n\nbbbb");
    // A cap below the first result yields an empty context.
    assert_eq!(assemble_context(&results, Some(3)), "");
    assert_eq!(assemble_context(&results, None), "aaaa\n\nbbbb\n\ncccc");
}

#[test]
fn prompt_embeds_context_and_question_verbatim() {
    let prompt = build_prompt("the context block", "the question?");
    assert!(prompt.contains("the context block"));
    assert!(prompt.contains("the question?"));
    assert!(prompt.contains("ONLY the information in the context"));
}
