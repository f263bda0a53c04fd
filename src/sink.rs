//! RdfSink trait for unit-of-work statement emission
//!
//! The conversion driver opens the sink once, streams every statement of one
//! conversion through it, and closes it once. The sink behind the trait is
//! expected to treat that begin/commit span as a single atomic unit of work;
//! the repository collaborator that provides production sinks owns the
//! transaction semantics.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{Gml2RdfError, Result};
use crate::term::RdfTerm;

/// Write-only, sequential statement sink bounded by one unit of work
///
/// Exactly one `begin`/`commit` pair brackets all `insert` calls of a
/// conversion. A sink is exclusively owned by one conversion for the
/// lifetime of that span.
pub trait RdfSink {
    /// Open the unit of work for the given named graph
    fn begin(&mut self, graph: &str) -> Result<()>;

    /// Insert one statement into the open unit of work
    fn insert(&mut self, subject: &RdfTerm, predicate: &RdfTerm, object: &RdfTerm) -> Result<()>;

    /// Close the unit of work, allowing the sink to flush as one batch
    fn commit(&mut self) -> Result<()>;
}

/// A statement recorded by [`GraphCollectorSink`]
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub subject: RdfTerm,
    pub predicate: RdfTerm,
    pub object: RdfTerm,
    pub graph: String,
}

/// A sink that collects statements in memory
///
/// The standard sink for tests and for callers that want the full statement
/// set before handing it to a repository in one batch.
#[derive(Debug, Default)]
pub struct GraphCollectorSink {
    statements: Vec<Statement>,
    open_graph: Option<String>,
    begin_count: usize,
    commit_count: usize,
}

impl GraphCollectorSink {
    /// Create a new collector sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected statements, in emission order
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Number of `begin` calls observed
    pub fn begin_count(&self) -> usize {
        self.begin_count
    }

    /// Number of `commit` calls observed
    pub fn commit_count(&self) -> usize {
        self.commit_count
    }

    /// Statements grouped by predicate IRI
    pub fn by_predicate(&self) -> HashMap<&str, Vec<&Statement>> {
        let mut index: HashMap<&str, Vec<&Statement>> = HashMap::new();
        for stmt in &self.statements {
            if let Some(pred) = stmt.predicate.as_iri() {
                index.entry(pred).or_default().push(stmt);
            }
        }
        index
    }
}

impl RdfSink for GraphCollectorSink {
    fn begin(&mut self, graph: &str) -> Result<()> {
        if self.open_graph.is_some() {
            return Err(Gml2RdfError::Sink("unit of work already open".to_string()));
        }
        self.open_graph = Some(graph.to_string());
        self.begin_count += 1;
        Ok(())
    }

    fn insert(&mut self, subject: &RdfTerm, predicate: &RdfTerm, object: &RdfTerm) -> Result<()> {
        let graph = self
            .open_graph
            .clone()
            .ok_or_else(|| Gml2RdfError::Sink("insert outside unit of work".to_string()))?;
        self.statements.push(Statement {
            subject: subject.clone(),
            predicate: predicate.clone(),
            object: object.clone(),
            graph,
        });
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.open_graph.take().is_none() {
            return Err(Gml2RdfError::Sink("commit without open unit of work".to_string()));
        }
        self.commit_count += 1;
        Ok(())
    }
}

/// A sink that streams N-Quads lines to a writer
///
/// Lines are buffered during the unit of work and written on commit, so a
/// failed conversion leaves the writer untouched.
pub struct NQuadsWriterSink<W: Write> {
    writer: W,
    buffer: String,
    open_graph: Option<String>,
}

impl<W: Write> NQuadsWriterSink<W> {
    /// Create a sink writing to `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: String::new(),
            open_graph: None,
        }
    }

    /// Consume the sink and return the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn format_term(term: &RdfTerm) -> String {
        match term {
            RdfTerm::Iri(iri) => format!("<{iri}>"),
            RdfTerm::BlankNode(id) => format!("_:{id}"),
            RdfTerm::Literal {
                value,
                datatype,
                language,
            } => {
                let escaped = escape_nquads(value);
                match (language, datatype) {
                    (Some(lang), _) => format!("\"{escaped}\"@{lang}"),
                    (None, Some(dt)) => format!("\"{escaped}\"^^<{dt}>"),
                    (None, None) => format!("\"{escaped}\""),
                }
            }
        }
    }
}

impl<W: Write> RdfSink for NQuadsWriterSink<W> {
    fn begin(&mut self, graph: &str) -> Result<()> {
        if self.open_graph.is_some() {
            return Err(Gml2RdfError::Sink("unit of work already open".to_string()));
        }
        self.open_graph = Some(graph.to_string());
        self.buffer.clear();
        Ok(())
    }

    fn insert(&mut self, subject: &RdfTerm, predicate: &RdfTerm, object: &RdfTerm) -> Result<()> {
        let graph = self
            .open_graph
            .as_deref()
            .ok_or_else(|| Gml2RdfError::Sink("insert outside unit of work".to_string()))?;
        self.buffer.push_str(&format!(
            "{} {} {} <{}> .\n",
            Self::format_term(subject),
            Self::format_term(predicate),
            Self::format_term(object),
            graph
        ));
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.open_graph.take().is_none() {
            return Err(Gml2RdfError::Sink("commit without open unit of work".to_string()));
        }
        self.writer
            .write_all(self.buffer.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|e| Gml2RdfError::Sink(e.to_string()))?;
        self.buffer.clear();
        Ok(())
    }
}

fn escape_nquads(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}
