use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use search_core::{DocId, DocumentStatus, RequestRateTracker, SearchEngine, SearchHit};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Rank documents against queries with TF-IDF", long_about = None)]
struct Cli {
    /// Input path (.json/.jsonl file or a directory of them)
    #[arg(long)]
    documents: String,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Only return documents with this status (default: actual)
    #[arg(long, value_enum)]
    status: Option<StatusArg>,
    /// Print one JSON object per query
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Split each result list into pages of at most this many hits
    #[arg(long)]
    page_size: Option<usize>,
    /// Queries to run; read from stdin, one per line, when none are given
    queries: Vec<String>,
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    results: &'a [SearchHit],
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let mut engine = SearchEngine::from_stop_words_text(&cli.stop_words).context("invalid stop words")?;
    for doc in load_documents(Path::new(&cli.documents))? {
        engine
            .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
            .with_context(|| format!("failed to add document {}", doc.id))?;
    }
    tracing::info!(
        num_docs = engine.document_count(),
        num_terms = engine.index().term_count(),
        stop_words = engine.stop_words().len(),
        "ingested documents"
    );

    let queries = if cli.queries.is_empty() {
        io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?
    } else {
        cli.queries.clone()
    };

    let status = cli.status.map(DocumentStatus::from).unwrap_or_default();
    let mut tracker = RequestRateTracker::new(&engine);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for query in queries.iter().filter(|q| !q.trim().is_empty()) {
        match tracker.add_find_request_with_status(query, status) {
            Ok(hits) => out.write_all(render(query, &hits, cli.json, cli.page_size)?.as_bytes())?,
            Err(err) => eprintln!("error: {query:?}: {err}"),
        }
    }

    tracing::info!(zero_results = tracker.zero_result_count(), requests = tracker.tick(), "search complete");
    Ok(())
}

fn load_documents(input_path: &Path) -> Result<Vec<InputDoc>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else {
        files.push(input_path.to_path_buf());
    }

    let mut docs = Vec::new();
    for file in files {
        let parsed = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") { read_jsonl(&file) } else { read_json(&file) };
        docs.extend(parsed.with_context(|| format!("failed to read {}", file.display()))?);
    }
    Ok(docs)
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(docs)
}

fn read_json(file: &Path) -> Result<Vec<InputDoc>> {
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(File::open(file)?))?;
    match json {
        serde_json::Value::Array(arr) => {
            Ok(arr.into_iter().map(serde_json::from_value).collect::<serde_json::Result<Vec<_>>>()?)
        }
        serde_json::Value::Object(_) => Ok(vec![serde_json::from_value(json)?]),
        _ => Ok(Vec::new()),
    }
}

fn format_hit(hit: &SearchHit) -> String {
    format!("{{ document_id = {}, relevance = {}, rating = {} }}", hit.id, hit.relevance, hit.rating)
}

fn render(query: &str, hits: &[SearchHit], json: bool, page_size: Option<usize>) -> Result<String> {
    if json {
        let mut line = serde_json::to_string(&QueryOutput { query, results: hits })?;
        line.push('\n');
        return Ok(line);
    }

    let page_size = page_size.unwrap_or(usize::MAX).max(1);
    let pages: Vec<String> = hits
        .chunks(page_size)
        .map(|page| page.iter().map(|h| format_hit(h) + "\n").collect())
        .collect();
    Ok(pages.join("Page break\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn hit(id: DocId, relevance: f64, rating: i32) -> SearchHit {
        SearchHit { id, relevance, rating }
    }

    #[test]
    fn loads_json_and_jsonl() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.jsonl"),
            "{\"id\": 1, \"text\": \"curly cat\", \"ratings\": [3, 4]}\n\n{\"id\": 2, \"text\": \"dog\", \"status\": \"BANNED\"}\n",
        )
        .unwrap();
        fs::write(dir.path().join("b.json"), "[{\"id\": 3, \"text\": \"parrot\", \"status\": \"REMOVED\", \"ratings\": []}]").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = load_documents(dir.path()).unwrap();
        let ids: Vec<DocId> = docs.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(docs[0].ratings, vec![3, 4]);
        assert_eq!(docs[0].status, DocumentStatus::Actual);
        assert_eq!(docs[1].status, DocumentStatus::Banned);
        assert_eq!(docs[2].status, DocumentStatus::Removed);
    }

    #[test]
    fn rejects_bad_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.jsonl");
        fs::write(&path, "{\"id\": \"one\"}\n").unwrap();
        assert!(load_documents(&path).is_err());
    }

    #[test]
    fn renders_pages() {
        let hits = vec![hit(2, 0.25, 2), hit(1, 0.0, 5), hit(4, 0.0, -1)];
        let text = render("curly dog", &hits, false, Some(2)).unwrap();
        assert_eq!(
            text,
            "{ document_id = 2, relevance = 0.25, rating = 2 }\n\
             { document_id = 1, relevance = 0, rating = 5 }\n\
             Page break\n\
             { document_id = 4, relevance = 0, rating = -1 }\n"
        );
        assert_eq!(render("none", &[], false, None).unwrap(), "");
    }

    #[test]
    fn renders_json() {
        let text = render("dog", &[hit(2, 0.5, 2)], true, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["query"], "dog");
        assert_eq!(value["results"][0]["id"], 2);
    }
}
