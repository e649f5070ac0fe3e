use crate::config::FigpressConfig;
use crate::core::{CompactNode, CompressionStats, Compressor};
use crate::fetch::{DocumentSource, FigmaClient};
use crate::format::{DocumentView, HeaderContext, render};
use crate::utils::clipboard::copy_to_clipboard;
use crate::utils::tokens::TokenReport;
use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use rayon::prelude::*;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum RunEvent {
    Loading(String),
    Compressed {
        source: String,
        stats: CompressionStats,
    },
    /// The document had nothing visible
    Empty(String),
    TokenCountUpdate(TokenReport),
    OverBudget {
        tokens: usize,
        budget: usize,
    },
    Complete(String),
}

/// A document after loading and compression.
#[derive(Debug, Clone)]
pub struct CompressedDocument {
    pub source: String,
    pub raw: Value,
    pub tree: Option<CompactNode>,
    pub stats: CompressionStats,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub documents: Vec<CompressedDocument>,
    pub stats: CompressionStats,
    pub tokens: Option<TokenReport>,
    /// Rendered output, also written to `output` or stdout
    pub rendered: String,
    pub output: Option<PathBuf>,
}

impl RunSummary {
    pub fn empty_documents(&self) -> usize {
        self.documents.iter().filter(|d| d.tree.is_none()).count()
    }
}

/// Main entry point for figpress in CLI mode.
///
/// Runs the pipeline on a worker thread and turns its events into log lines on
/// the calling thread. Fails if any document could not be loaded or the output
/// could not be written.
pub fn run(config: FigpressConfig) -> Result<()> {
    let (tx, rx) = crossbeam_channel::unbounded();

    let config_clone = config.clone();
    let worker = std::thread::spawn(move || run_pipeline(&config_clone, Some(tx)));

    let mut tokens = None;
    for event in rx {
        match event {
            RunEvent::Loading(source) => tracing::debug!(%source, "loading document"),
            RunEvent::Compressed { source, stats } => tracing::debug!(
                %source,
                visited = stats.visited,
                emitted = stats.emitted,
                hidden = stats.hidden,
                icons = stats.icons,
                flattened = stats.flattened,
                "compressed document"
            ),
            RunEvent::Empty(source) => tracing::warn!(%source, "nothing visible to show"),
            RunEvent::TokenCountUpdate(report) => tokens = Some(report),
            RunEvent::OverBudget { tokens, budget } => {
                tracing::warn!(tokens, budget, "compact output exceeds token budget")
            }
            RunEvent::Complete(msg) => tracing::info!("{}", msg),
        }
    }

    let summary = worker
        .join()
        .map_err(|_| anyhow::anyhow!("Compression worker panicked"))??;

    if summary.stats.truncated > 0 {
        tracing::warn!(
            nodes = summary.stats.truncated,
            max_depth = config.max_depth,
            "document deeper than max_depth; deeper nodes were dropped"
        );
    }

    if let Some(report) = tokens {
        eprintln!("\nTokens: {}", report);
    }

    Ok(())
}

fn load_and_compress(
    source: &DocumentSource,
    client: Option<&FigmaClient>,
    compressor: &Compressor,
) -> Result<CompressedDocument> {
    let raw = source
        .load(client)
        .with_context(|| format!("Failed to load {}", source))?;
    let (tree, stats) = compressor.compress_with_stats(&raw);
    Ok(CompressedDocument {
        source: source.to_string(),
        raw,
        tree,
        stats,
    })
}

/// Loads, compresses, renders and writes every configured document.
///
/// Sources are loaded in parallel; document order in the output follows the
/// order of `config.sources`. Any load failure aborts the run before anything
/// is written.
pub fn run_pipeline(config: &FigpressConfig, tx: Option<Sender<RunEvent>>) -> Result<RunSummary> {
    let notify = |event: RunEvent| {
        if let Some(tx) = &tx {
            let _ = tx.send(event);
        }
    };

    config.validate()?;
    let sources = config.document_sources()?;

    let client = if sources.iter().any(DocumentSource::is_remote) {
        let token = config.token.clone().unwrap_or_default();
        Some(FigmaClient::new(token, config.http_config())?)
    } else {
        None
    };

    let compressor = Compressor::new(config.compress_options());

    let documents: Vec<CompressedDocument> = sources
        .par_iter()
        .map(|source| {
            notify(RunEvent::Loading(source.to_string()));
            load_and_compress(source, client.as_ref(), &compressor)
        })
        .collect::<Result<_>>()?;

    let mut stats = CompressionStats::default();
    for doc in &documents {
        stats += doc.stats;
        match doc.tree {
            Some(_) => notify(RunEvent::Compressed {
                source: doc.source.clone(),
                stats: doc.stats,
            }),
            None => notify(RunEvent::Empty(doc.source.clone())),
        }
    }

    let tokens = if config.no_tokens {
        None
    } else {
        let mut total = TokenReport::default();
        for doc in &documents {
            let raw_json = serde_json::to_string(&doc.raw)?;
            let compact_json = serde_json::to_string(&doc.tree)?;
            total += TokenReport::measure(&raw_json, &compact_json);
        }
        notify(RunEvent::TokenCountUpdate(total));
        if let Some(budget) = config.max_tokens {
            if total.exceeds(Some(budget)) {
                notify(RunEvent::OverBudget {
                    tokens: total.compact,
                    budget,
                });
            }
        }
        Some(total)
    };

    let views: Vec<DocumentView> = documents
        .iter()
        .map(|doc| DocumentView {
            source: &doc.source,
            raw: &doc.raw,
            tree: doc.tree.as_ref(),
        })
        .collect();
    let context = HeaderContext {
        prompt: config.prompt.as_deref(),
        token_count: tokens.map(|t| t.compact),
        legend: config.legend,
    };
    let rendered = render(config.output_format, config.tree_depth, context, &views)?;

    match &config.output {
        Some(path) => std::fs::write(path, &rendered)
            .with_context(|| format!("Failed to write output to {}", path.display()))?,
        None => print!("{}", rendered),
    }

    if config.clipboard_copy {
        if let Err(e) = copy_to_clipboard(&rendered) {
            tracing::warn!(error = %e, "could not copy output to clipboard");
        }
    }

    let msg = match &config.output {
        Some(path) => format!("Wrote {} document(s) to {}", documents.len(), path.display()),
        None => format!("Wrote {} document(s) to stdout", documents.len()),
    };
    notify(RunEvent::Complete(msg));

    Ok(RunSummary {
        documents,
        stats,
        tokens,
        rendered,
        output: config.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    fn write_doc(dir: &TempDir, name: &str, value: &Value) -> String {
        let path = dir.path().join(name);
        fs::write(&path, value.to_string()).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_pipeline_emits_events_in_order() -> Result<()> {
        let dir = TempDir::new()?;
        let visible = write_doc(&dir, "a.json", &serde_json::json!({"type": "TEXT", "name": "a"}));
        let hidden = write_doc(
            &dir,
            "b.json",
            &serde_json::json!({"type": "TEXT", "name": "b", "visible": false}),
        );

        let config = FigpressConfig {
            sources: vec![visible, hidden],
            output: Some(dir.path().join("out.json")),
            no_tokens: true,
            ..Default::default()
        };
        let (tx, rx) = crossbeam_channel::unbounded();
        let summary = run_pipeline(&config, Some(tx))?;

        assert_eq!(summary.documents.len(), 2);
        assert_eq!(summary.empty_documents(), 1);
        assert!(summary.tokens.is_none());

        let events: Vec<RunEvent> = rx.try_iter().collect();
        assert!(events.iter().any(|e| matches!(e, RunEvent::Empty(s) if s.ends_with("b.json"))));
        assert!(matches!(events.last(), Some(RunEvent::Complete(_))));
        Ok(())
    }

    #[test]
    fn test_pipeline_fails_before_writing_on_bad_source() -> Result<()> {
        let dir = TempDir::new()?;
        let good = write_doc(&dir, "a.json", &serde_json::json!({"type": "TEXT", "name": "a"}));
        let output = dir.path().join("out.json");
        let config = FigpressConfig {
            sources: vec![good, dir.path().join("missing.json").display().to_string()],
            output: Some(output.clone()),
            no_tokens: true,
            ..Default::default()
        };

        let err = run_pipeline(&config, None).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.json"));
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn test_budget_warning() -> Result<()> {
        let dir = TempDir::new()?;
        let doc = write_doc(
            &dir,
            "a.json",
            &serde_json::json!({"type": "TEXT", "name": "Title", "characters": "Hello there"}),
        );
        let config = FigpressConfig {
            sources: vec![doc],
            output: Some(dir.path().join("out.txt")),
            output_format: OutputFormat::Tree,
            max_tokens: Some(1),
            ..Default::default()
        };
        let (tx, rx) = crossbeam_channel::unbounded();
        let summary = run_pipeline(&config, Some(tx))?;

        assert!(summary.tokens.unwrap().compact > 1);
        assert!(rx.try_iter().any(|e| matches!(e, RunEvent::OverBudget { budget: 1, .. })));
        Ok(())
    }
}
