//! Creates, inspects, tags and deletes a custom vocabulary.
//!
//! Runs against the in-memory service by default. Set `TRANSCRIBE_LIVE=1`
//! together with `AWS_REGION` (and optionally `TRANSCRIBE_ENDPOINT`) to use
//! the HTTP transport instead.
//!
//! ```bash
//! RUST_LOG=transcribe=debug cargo run --example vocabulary_lifecycle
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use transcribe::{
    Client, ErrorKind,
    mock::MockTranscribe,
    model::{
        CreateVocabularyRequest, DeleteVocabularyRequest, GetVocabularyRequest,
        ListTagsForResourceRequest, ListVocabulariesRequest, Tag, TagResourceRequest,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mock = Arc::new(MockTranscribe::new());
    let client = if std::env::var("TRANSCRIBE_LIVE").is_ok_and(|v| v == "1") {
        Client::from_env()?
    } else {
        Client::builder()
            .region("us-east-1")
            .transport(mock.clone())
            .build()?
    };
    println!("Using {client:?}");

    let create = CreateVocabularyRequest::with_phrases(
        "product-names",
        "en-US",
        ["Transcribe", "Kinesis", "SageMaker"],
    );
    let created = client.create_vocabulary(&create).await?;
    println!(
        "Created {:?} ({:?})",
        created.vocabulary_name, created.vocabulary_state
    );

    let get = GetVocabularyRequest::new("product-names");
    let vocabulary = client.get_vocabulary(&get).await?;
    println!("Download from {:?}", vocabulary.download_uri);
    if let Some(meta) = client.cached_response_metadata(&get) {
        println!("Request id {:?}, status {}", meta.request_id, meta.status);
    }

    let arn = mock.arn("vocabulary", "product-names").await;
    client
        .tag_resource(&TagResourceRequest::new(
            arn.clone(),
            vec![Tag::new("team", "speech")],
        ))
        .await?;
    let tags = client
        .list_tags_for_resource(&ListTagsForResourceRequest::new(arn))
        .await?;
    println!("Tags: {:?}", tags.tags);

    let listed = client
        .list_vocabularies(&ListVocabulariesRequest::default())
        .await?;
    println!("{} vocabularies", listed.vocabularies.len());

    client
        .delete_vocabulary(&DeleteVocabularyRequest::new("product-names"))
        .await?;

    match client.get_vocabulary(&get).await {
        Err(e) if e.kind == ErrorKind::NotFound => println!("Deleted: {e}"),
        Err(e) => eprintln!("Unexpected error: {e}"),
        Ok(_) => eprintln!("Vocabulary still exists"),
    }

    client.shutdown();
    Ok(())
}
