//! Entry point for layout occurrences.
//!
//! The host raises an [`Occurrence`] whenever a container or one of its
//! children changes. [`LayoutController::handle`] decides whether the container
//! takes part in auto-layout, runs the arranger matching the occurrence kind
//! and refits the container afterwards.
//!
//! A single occurrence never touches the container's ancestors. Cascading is
//! the host's business: it raises another occurrence for the parent once the
//! child's size changed (see [`crate::pass::LayoutPass`]).

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use trellis_core::{geometry::Point, identifier::Id};

use crate::{
    arrange::{Arranger, CompositeArranger, SingleChildArranger, StackArranger},
    config::LayoutConfig,
    fit::BoundsFitter,
    model::{self, LayoutModel},
};

/// Property key controlling auto-layout participation.
pub const AUTO_LAYOUT_KEY: &str = "oryx-autolayout";

/// Kind of layout requested by an occurrence.
///
/// The names match external configuration strings (kebab-case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OccurrenceKind {
    /// Two-column composite layout with handler slots.
    #[default]
    General,
    Vertical,
    Horizontal,
    SingleChild,
    /// Refit the container without arranging its children.
    AutoResize,
}

impl FromStr for OccurrenceKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            "single-child" => Ok(Self::SingleChild),
            "auto-resize" => Ok(Self::AutoResize),
            _ => Err("Unsupported occurrence kind"),
        }
    }
}

impl From<OccurrenceKind> for &'static str {
    fn from(val: OccurrenceKind) -> Self {
        match val {
            OccurrenceKind::General => "general",
            OccurrenceKind::Vertical => "vertical",
            OccurrenceKind::Horizontal => "horizontal",
            OccurrenceKind::SingleChild => "single-child",
            OccurrenceKind::AutoResize => "auto-resize",
        }
    }
}

impl Display for OccurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A layout request for one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    container: Id,
    kind: OccurrenceKind,
}

impl Occurrence {
    pub fn new(container: Id, kind: OccurrenceKind) -> Self {
        Self { container, kind }
    }

    pub fn container(&self) -> Id {
        self.container
    }

    pub fn kind(&self) -> OccurrenceKind {
        self.kind
    }
}

/// What handling an occurrence did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// The container opted out of auto-layout; nothing was touched.
    Disabled,
    /// The container has no children; nothing was touched.
    NoChildren,
    /// Layout ran and performed `writes` geometry writes (zero when already laid out).
    Applied { writes: usize },
}

/// Dispatches occurrences to arrangers and refits containers.
#[derive(Debug, Clone)]
pub struct LayoutController {
    margin: f32,
    vertical: StackArranger,
    horizontal: StackArranger,
    single_child: SingleChildArranger,
    composite: CompositeArranger,
    fitter: BoundsFitter,
}

impl Default for LayoutController {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl LayoutController {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            margin: config.margin(),
            vertical: StackArranger::vertical(config),
            horizontal: StackArranger::horizontal(config),
            single_child: SingleChildArranger::new(config),
            composite: CompositeArranger::new(config),
            fitter: BoundsFitter::new(config),
        }
    }

    /// Handles one occurrence against `model`.
    pub fn handle(&self, model: &mut dyn LayoutModel, occurrence: Occurrence) -> LayoutOutcome {
        let container = occurrence.container();

        if !auto_layout_enabled(model, container) {
            debug!(container:% = container; "Auto-layout disabled, skipping");
            return LayoutOutcome::Disabled;
        }

        let children = model.children(container).to_vec();
        if children.is_empty() {
            self.reset_bounds(container);
            return LayoutOutcome::NoChildren;
        }

        debug!(
            container:% = container,
            kind:% = occurrence.kind(),
            children = children.len();
            "Handling layout occurrence"
        );

        let arranged = match self.arranger(occurrence.kind()) {
            Some(arranger) => arranger.arrange(model, container, &children),
            None => self.clamp_to_margin(model, &children),
        };
        let refit = self.fitter.fit(model, container);

        LayoutOutcome::Applied {
            writes: arranged + usize::from(refit),
        }
    }

    /// Arranger for `kind`; `None` for occurrences that only refit.
    fn arranger(&self, kind: OccurrenceKind) -> Option<&dyn Arranger> {
        match kind {
            OccurrenceKind::General => Some(&self.composite),
            OccurrenceKind::Vertical => Some(&self.vertical),
            OccurrenceKind::Horizontal => Some(&self.horizontal),
            OccurrenceKind::SingleChild => Some(&self.single_child),
            OccurrenceKind::AutoResize => None,
        }
    }

    /// Pushes children that poke into the margin band back onto the margin.
    fn clamp_to_margin(&self, model: &mut dyn LayoutModel, children: &[Id]) -> usize {
        let mut writes = 0;
        for &child in children {
            let Some(bounds) = model.bounds(child) else {
                continue;
            };
            let upper_left = bounds.upper_left();
            let clamped = Point::new(
                upper_left.x().max(self.margin),
                upper_left.y().max(self.margin),
            );
            if model::move_node(model, child, clamped) {
                writes += 1;
            }
        }
        writes
    }

    /// Hook for giving empty containers a default footprint. Empty containers
    /// currently keep whatever bounds they have.
    fn reset_bounds(&self, container: Id) {
        trace!(container:% = container; "Container has no children, keeping its bounds");
    }
}

/// Unset or `true` enables auto-layout; only an explicit `false` disables it.
fn auto_layout_enabled(model: &dyn LayoutModel, container: Id) -> bool {
    model.auto_layout_flag(container).unwrap_or(true)
}
