//! Minimal CLI: guess → (types | schema)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use json_guess::{GuessOptions, JsonType};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// guess structural type definitions from JSON/NDJSON samples
#[derive(Parser, Debug)]
#[command(version)]
pub struct CommandLineInterface {
    /// log pipeline stages to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// guess and print TypeScript-style type definitions
    Types(GuessArgs),
    /// guess and print the definition list as JSON
    Schema(GuessArgs),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document. Every output is a document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct GuessArgs {
    #[command(flatten)]
    input_settings: InputSettings,

    /// JSON options file (rootName, placeholderName, maxDepth)
    #[arg(long)]
    config: Option<PathBuf>,

    /// name of the root definition
    #[arg(long)]
    root_type: Option<String>,

    /// maximum container nesting accepted
    #[arg(long)]
    max_depth: Option<usize>,

    /// guess every document on its own instead of unifying them
    #[arg(long, default_value_t = false)]
    each: bool,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// Definitions guessed from one group of documents. `source` is set when
/// each document was guessed on its own.
#[derive(Debug, Serialize)]
struct TypeGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    types: Vec<JsonType>,
}

/// One input document and where it came from.
#[derive(Debug)]
struct Document {
    source: String,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let source_paths = resolve_file_path_patterns(&self.input).context("failed to resolve input file paths")?;
        let mut out = Vec::new();
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file ({source_path_str})"))?;
            if self.ndjson {
                for (index, line) in source.lines().enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let location = format!("{source_path_str}:{}", index + 1);
                    let value = serde_json::from_str::<Value>(line)
                        .with_context(|| format!("failed to parse NDJSON line ({location})"))?;
                    self.select(location, value, &mut out)?;
                }
            } else {
                let value = serde_json::from_str::<Value>(&source)
                    .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
                self.select(source_path_str, value, &mut out)?;
            }
        }
        debug!(documents = out.len(), "loaded input documents");
        Ok(out)
    }

    /// Apply the pointer, then the jq filter.
    fn select(&self, source: String, value: Value, out: &mut Vec<Document>) -> Result<()> {
        let value = match self.json_pointer.as_deref() {
            None => value,
            Some(pointer) => match value.pointer(pointer) {
                Some(found) => found.clone(),
                None => bail!("JSON pointer {pointer} not found in {source}"),
            },
        };
        match self.jq_expr.as_deref() {
            None => out.push(Document { source, value }),
            Some(jq_expr) => {
                let results = crate::jq_exec::run_jaq(jq_expr, &value)
                    .with_context(|| format!("failed to apply jq expression to {source}"))?;
                out.extend(results.into_iter().map(|value| Document { source: source.clone(), value }));
            }
        }
        Ok(())
    }
}

impl GuessArgs {
    /// Options file first, then flags on top.
    fn resolve_options(&self) -> Result<GuessOptions> {
        let mut options = match self.config.as_ref() {
            None => GuessOptions::default(),
            Some(path) => {
                let src = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read options file ({})", path.display()))?;
                GuessOptions::from_json_str(&src).with_context(|| format!("in options file {}", path.display()))?
            }
        };
        if let Some(root_type) = self.root_type.as_ref() {
            options.root_name = root_type.clone();
        }
        if let Some(max_depth) = self.max_depth {
            options.max_depth = max_depth;
        }
        Ok(options)
    }

    /// One definition list per group: all documents together, or each alone.
    fn guess(&self) -> Result<Vec<TypeGroup>> {
        let options = self.resolve_options()?;
        let documents = self.input_settings.load_documents()?;
        if documents.is_empty() {
            bail!("no input documents");
        }
        if !self.each {
            let types = json_guess::guess_samples(documents.iter().map(|d| &d.value), &options)
                .context("failed to guess types")?;
            return Ok(vec![TypeGroup { source: None, types }]);
        }
        info!(documents = documents.len(), "guessing each document independently");
        documents
            .par_iter()
            .map(|doc| {
                json_guess::guess_with(&doc.value, &options)
                    .map(|types| TypeGroup { source: Some(doc.source.clone()), types })
                    .with_context(|| format!("failed to guess types for {}", doc.source))
            })
            .collect()
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Types(target) => {
                let groups = target.guess()?;
                let mut src = String::new();
                for (i, group) in groups.iter().enumerate() {
                    if i > 0 {
                        src.push('\n');
                    }
                    if let Some(source) = group.source.as_deref() {
                        src.push_str(&format!("// {source}\n"));
                    }
                    src.push_str(&json_guess::render::typescript(&group.types));
                }
                write_output(target.out.as_deref(), &src)
            }
            Command::Schema(target) => {
                let groups = target.guess()?;
                let src = match groups.as_slice() {
                    [single] if !target.each => serde_json::to_string_pretty(&single.types)?,
                    _ => serde_json::to_string_pretty(&groups)?,
                };
                write_output(target.out.as_deref(), &format!("{src}\n"))
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create output directory ({})", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write output file ({})", out.display()))
        }
        None => {
            print!("{src}");
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
