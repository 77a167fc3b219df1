//! Command execution.
//!
//! Each command performs one client call and prints the response as
//! pretty JSON on stdout.

use std::path::Path;

use anyhow::{Context, bail};
use pinecone_client::models::{IndexSpec, Vector};
use pinecone_client::{
    CreateIndexRequest, EmbedInput, ListVectorIdsRequest, Pinecone, QueryRequest,
};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::TRACING_TARGET_COMMAND;
use crate::config::{Command, IndexCommand};

/// Runs a parsed command against the client.
pub async fn execute(pinecone: &Pinecone, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Indexes { command } => indexes(pinecone, command).await,
        Command::Stats { index, filter } => {
            let filter = filter.as_deref().map(parse_filter).transpose()?;
            let stats = pinecone
                .index(&index)
                .await?
                .describe_index_stats(filter.as_ref())
                .await?;
            print_json(&stats)
        }
        Command::Query {
            index,
            vector,
            id,
            top_k,
            namespace,
            filter,
            include_values,
        } => {
            let mut request = match id {
                Some(id) => QueryRequest::by_id(id),
                None => QueryRequest::by_vector(vector),
            }
            .with_top_k(top_k)
            .include_values(include_values);

            if let Some(namespace) = namespace {
                request = request.with_namespace(namespace);
            }
            if let Some(filter) = filter {
                request = request.with_filter(parse_filter(&filter)?);
            }

            let response = pinecone.index(&index).await?.query(&request).await?;
            print_json(&response)
        }
        Command::Fetch {
            index,
            ids,
            namespace,
        } => {
            let response = pinecone
                .index(&index)
                .await?
                .fetch(&ids, namespace.as_deref())
                .await?;
            print_json(&response)
        }
        Command::Upsert {
            index,
            file,
            namespace,
        } => {
            let vectors = read_vectors(&file)?;
            tracing::info!(
                target: TRACING_TARGET_COMMAND,
                index = %index,
                count = vectors.len(),
                "Upserting vectors"
            );
            let response = pinecone
                .index(&index)
                .await?
                .upsert(&vectors, namespace.as_deref())
                .await?;
            print_json(&response)
        }
        Command::ListIds {
            index,
            prefix,
            limit,
            pagination_token,
            namespace,
        } => {
            let request = ListVectorIdsRequest {
                prefix,
                limit,
                pagination_token,
                namespace,
            };
            let page = pinecone
                .index(&index)
                .await?
                .list_vector_ids(&request)
                .await?;
            print_json(&page)
        }
        Command::Namespaces { index } => {
            let namespaces = pinecone.index(&index).await?.list_namespaces().await?;
            print_json(&namespaces)
        }
        Command::Embed {
            model,
            input_type,
            inputs,
        } => {
            let inputs: Vec<EmbedInput> = inputs.into_iter().map(EmbedInput::from).collect();
            let mut parameters = Map::new();
            if let Some(input_type) = input_type {
                parameters.insert("input_type".into(), Value::String(input_type));
            }
            let response = pinecone
                .inference()
                .embed(&model, &inputs, &parameters)
                .await?;
            print_json(&response)
        }
    }
}

async fn indexes(pinecone: &Pinecone, command: IndexCommand) -> anyhow::Result<()> {
    match command {
        IndexCommand::List => print_json(&pinecone.list_indexes().await?),
        IndexCommand::Describe { name } => print_json(&pinecone.describe_index(&name).await?),
        IndexCommand::Delete { name } => {
            pinecone.delete_index(&name).await?;
            print_json(&json!({ "deleted": name }))
        }
        IndexCommand::Create {
            name,
            dimension,
            metric,
            cloud,
            region,
        } => {
            let request = CreateIndexRequest::new(IndexSpec::serverless(cloud, region))
                .with_dimension(dimension)
                .with_metric(metric);
            print_json(&pinecone.create_index(&name, request).await?)
        }
    }
}

/// Parses a metadata filter given on the command line.
fn parse_filter(raw: &str) -> anyhow::Result<Value> {
    let filter: Value = serde_json::from_str(raw).context("filter is not valid JSON")?;
    if !filter.is_object() {
        bail!("filter must be a JSON object");
    }
    Ok(filter)
}

fn read_vectors(path: &Path) -> anyhow::Result<Vec<Vector>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_vectors(&content).with_context(|| format!("invalid vectors in {}", path.display()))
}

fn parse_vectors(content: &str) -> anyhow::Result<Vec<Vector>> {
    let vectors: Vec<Vector> = serde_json::from_str(content)?;
    if vectors.is_empty() {
        bail!("no vectors to upsert");
    }
    Ok(vectors)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        let filter = parse_filter(r#"{"genre": {"$eq": "drama"}}"#).unwrap();
        assert_eq!(filter["genre"]["$eq"], json!("drama"));

        assert!(parse_filter("[1, 2]").is_err());
        assert!(parse_filter("{oops").is_err());
    }

    #[test]
    fn test_parse_vectors() {
        let vectors = parse_vectors(
            r#"[
                {"id": "v1", "values": [0.5, 0.25], "metadata": {"genre": "drama"}},
                {"id": "v2", "values": [1.0, 0.0]}
            ]"#,
        )
        .unwrap();

        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0].id, "v1");
        assert_eq!(vectors[1].values, vec![1.0, 0.0]);
    }

    #[test]
    fn test_parse_vectors_rejects_empty_array() {
        let error = parse_vectors("[]").unwrap_err();
        assert_eq!(error.to_string(), "no vectors to upsert");
    }
}
