//! Layout detection.
//!
//! The legacy exporter pads every data line to a fixed width per list
//! type, so modal line width is the strongest signal. Header text narrows
//! the candidate set, and a sampled id-shape score breaks remaining ties.
//! Detection surfaces ambiguity instead of guessing past it: anything
//! below threshold comes back as [`Detection::Unknown`] and the caller
//! decides whether to abort or force a layout override.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use m1_layouts::LayoutRegistry;
use m1_model::{Layout, RawLine};

use crate::split::{SplitOptions, split};

/// Detection tuning knobs.
#[derive(Debug, Clone)]
pub struct DetectorOptions {
    /// Data lines sampled per candidate when widths alone cannot decide.
    pub sample_size: usize,
    /// Minimum fraction of sampled lines whose id column must look like a
    /// patient id for a candidate to win.
    pub id_threshold: f64,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            sample_size: 25,
            id_threshold: 0.8,
        }
    }
}

/// A confidently detected layout.
#[derive(Debug, Clone)]
pub struct LayoutMatch {
    pub layout: Layout,
    /// 1.0 for a header or sole-width match; the sampled id fraction
    /// otherwise.
    pub confidence: f64,
}

/// Detection outcome. Never an error: `Unknown` is a first-class result.
#[derive(Debug, Clone)]
pub enum Detection {
    Matched(LayoutMatch),
    Unknown(UnknownReason),
}

/// Why no registered layout could be confidently matched.
#[derive(Debug, Clone, PartialEq)]
pub enum UnknownReason {
    EmptyInput,
    /// No registered layout has the modal line width (or all such layouts
    /// were eliminated by a header mismatch).
    NoCandidates { modal_width: usize },
    /// Multiple candidates scored equally well; refusing to pick one.
    Ambiguous { candidates: Vec<String> },
    /// The best candidate's sampled id fraction fell below threshold.
    BelowThreshold { layout: String, fraction: f64 },
}

impl fmt::Display for UnknownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("no non-blank lines"),
            Self::NoCandidates { modal_width } => {
                write!(f, "no registered layout is {modal_width} columns wide")
            }
            Self::Ambiguous { candidates } => {
                write!(f, "ambiguous between {}", candidates.join(", "))
            }
            Self::BelowThreshold { layout, fraction } => write!(
                f,
                "best candidate {layout} matched only {:.0}% of sampled ids",
                fraction * 100.0
            ),
        }
    }
}

/// Determine which registered layout a file uses.
///
/// Pure over its inputs, hence idempotent: the same lines, registry and
/// options always produce the same result.
pub fn detect(
    lines: &[RawLine],
    registry: &LayoutRegistry,
    options: &DetectorOptions,
) -> Detection {
    let Some(modal_width) = modal_line_width(lines) else {
        return Detection::Unknown(UnknownReason::EmptyInput);
    };
    debug!(modal_width, "computed modal line width");

    let width_candidates: Vec<&Layout> = registry
        .iter()
        .filter(|layout| layout.total_width() == modal_width)
        .collect();
    if width_candidates.is_empty() {
        return Detection::Unknown(UnknownReason::NoCandidates { modal_width });
    }

    // A header signature found on the first line narrows the field; a
    // file exported without its title line keeps every width candidate in
    // play (absence of a header never disqualifies).
    let first_line = lines[0].text();
    let confirmed: Vec<&Layout> = width_candidates
        .iter()
        .copied()
        .filter(|layout| layout.is_header_line(first_line))
        .collect();
    let candidates = if confirmed.is_empty() {
        width_candidates
    } else {
        confirmed
    };
    if let [layout] = candidates.as_slice() {
        debug!(layout = layout.name(), "single candidate after width and header checks");
        return Detection::Matched(LayoutMatch {
            layout: (*layout).clone(),
            confidence: 1.0,
        });
    }

    // Several layouts share this width; score each by how often its id
    // column holds a plausible id token across a sample of data lines.
    let mut scored: Vec<(&Layout, f64)> = candidates
        .iter()
        .map(|layout| (*layout, id_fraction(lines, layout, options.sample_size)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (layout, fraction) in &scored {
        debug!(layout = layout.name(), fraction, "sampled id score");
    }

    let (best, best_fraction) = scored[0];
    if scored.len() > 1 && scored[1].1 == best_fraction {
        let tied: Vec<String> = scored
            .iter()
            .filter(|(_, fraction)| *fraction == best_fraction)
            .map(|(layout, _)| layout.name().to_string())
            .collect();
        return Detection::Unknown(UnknownReason::Ambiguous { candidates: tied });
    }
    if best_fraction < options.id_threshold {
        return Detection::Unknown(UnknownReason::BelowThreshold {
            layout: best.name().to_string(),
            fraction: best_fraction,
        });
    }
    Detection::Matched(LayoutMatch {
        layout: best.clone(),
        confidence: best_fraction,
    })
}

/// Most frequent line width among the given lines; ties break toward the
/// smaller width for determinism.
fn modal_line_width(lines: &[RawLine]) -> Option<usize> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for line in lines {
        *counts.entry(line.width()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(width, _)| width)
}

/// Fraction of sampled data lines whose id column holds an id-shaped token.
fn id_fraction(lines: &[RawLine], layout: &Layout, sample_size: usize) -> f64 {
    let split_options = SplitOptions::default();
    let id_name = &layout.id_field().name;
    let sample: Vec<&RawLine> = lines
        .iter()
        .filter(|line| !layout.is_header_line(line.text()))
        .take(sample_size)
        .collect();
    if sample.is_empty() {
        return 0.0;
    }
    let hits = sample
        .iter()
        .filter(|line| {
            split(line, layout, &split_options)
                .ok()
                .and_then(|fields| fields.get(id_name).cloned().flatten())
                .is_some_and(|token| is_id_like(&token))
        })
        .count();
    hits as f64 / sample.len() as f64
}

/// A plausible patient id: non-blank alphanumeric token with no inner
/// whitespace.
fn is_id_like(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|ch| ch.is_ascii_alphanumeric())
}
