//! Trellis - rule-based auto-layout for process diagram containers.
//!
//! Structured activities of a process diagram (scopes, sequences, flows,
//! handler containers) keep their children in a tidy arrangement: stacked
//! columns or rows one margin apart, handler slots in a second column, and
//! container bounds refit around whatever they hold.
//!
//! The layout core works against the [`model::LayoutModel`] collaborator, so
//! any host model can drive it. [`Engine`] wires it to the bundled
//! [`Diagram`] store and its TOML document format.

pub mod arrange;
pub mod classify;
pub mod config;
pub mod controller;
pub mod diagram;
pub mod document;
pub mod fit;
pub mod model;
pub mod pass;

mod error;
mod partition;

pub use trellis_core::{geometry, identifier, stencil};

pub use controller::{LayoutController, LayoutOutcome, Occurrence, OccurrenceKind};
pub use diagram::Diagram;
pub use error::TrellisError;
pub use pass::{LayoutPass, PassReport};

use log::{debug, info, trace};

use config::AppConfig;
use document::Document;

/// Parses, lays out and renders diagrams.
///
/// # Examples
///
/// ```
/// use trellis::{Engine, config::AppConfig};
///
/// let source = r#"
/// namespace = "bpel#"
///
/// [[nodes]]
/// id = "seq"
/// kind = "sequence"
/// children = ["a", "b"]
/// bounds = { x = 0.0, y = 0.0, width = 10.0, height = 10.0 }
///
/// [[nodes]]
/// id = "a"
/// kind = "invoke"
/// bounds = { x = 0.0, y = 80.0, width = 100.0, height = 40.0 }
///
/// [[nodes]]
/// id = "b"
/// kind = "invoke"
/// bounds = { x = 0.0, y = 0.0, width = 100.0, height = 40.0 }
/// "#;
///
/// let engine = Engine::new(AppConfig::default());
/// let mut diagram = engine.parse(source).expect("valid document");
/// let report = engine.relayout(&mut diagram);
/// assert!(report.writes > 0);
///
/// let toml = engine.render(&diagram).expect("serializable");
/// assert!(toml.contains("[[nodes]]"));
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    controller: LayoutController,
}

impl Engine {
    /// Create an engine using the layout section of `config`.
    pub fn new(config: AppConfig) -> Self {
        Self {
            controller: LayoutController::new(config.layout()),
        }
    }

    /// Returns the controller occurrences are dispatched to.
    pub fn controller(&self) -> &LayoutController {
        &self.controller
    }

    /// Parse a TOML diagram document into a validated [`Diagram`].
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Document`] for malformed TOML and for
    /// structural problems such as unknown children or containment cycles.
    pub fn parse(&self, source: &str) -> Result<Diagram, TrellisError> {
        info!("Parsing diagram document");

        let document: Document = toml::from_str(source)
            .map_err(|err| TrellisError::new_document_error(err.into(), source))?;
        let diagram = Diagram::from_document(&document)
            .map_err(|err| TrellisError::new_document_error(err, source))?;

        debug!(nodes = diagram.len(); "Diagram parsed successfully");
        trace!(diagram:?; "Parsed diagram");
        Ok(diagram)
    }

    /// Lay out every pending container of `diagram`, innermost first.
    ///
    /// A freshly parsed diagram has every container pending. Afterwards only
    /// containers whose children moved or resized are laid out again.
    pub fn relayout(&self, diagram: &mut Diagram) -> PassReport {
        info!(nodes = diagram.len(); "Running layout pass");
        LayoutPass::new(&self.controller).run(diagram)
    }

    /// Handle a single occurrence for the node named `container`.
    ///
    /// Without an explicit `kind` the container's own default applies (its
    /// document hint, else the default for its node kind).
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::UnknownNode`] when no node has that id.
    pub fn apply(
        &self,
        diagram: &mut Diagram,
        container: &str,
        kind: Option<OccurrenceKind>,
    ) -> Result<LayoutOutcome, TrellisError> {
        let id = diagram
            .find(container)
            .ok_or_else(|| TrellisError::UnknownNode(container.to_string()))?;
        let kind = kind.unwrap_or_else(|| pass::occurrence_kind(diagram, id));

        info!(container, kind:% = kind; "Applying layout occurrence");
        let outcome = self.controller.handle(diagram, Occurrence::new(id, kind));
        diagram.settle(id);
        debug!(outcome:?; "Occurrence handled");
        Ok(outcome)
    }

    /// Serialize `diagram`, including its current bounds, as a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Render`] if serialization fails.
    pub fn render(&self, diagram: &Diagram) -> Result<String, TrellisError> {
        let output = toml::to_string_pretty(&diagram.to_document())
            .map_err(|err| TrellisError::Render(err.to_string()))?;
        info!(bytes = output.len(); "Diagram rendered");
        Ok(output)
    }
}
