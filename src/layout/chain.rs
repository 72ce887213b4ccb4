//! Chains: targets laid out edge to edge along one axis
//!
//! A chain is an ordered mix of targets and spacing modifiers. Each pair of
//! neighbouring targets is joined trailing-to-leading (or bottom-to-top), once per
//! spacing modifier between them, or once with the default spacing when there is none.

use std::fmt;

use log::warn;

use super::alignment::{insert_unique, Alignment};
use super::config::{Centering, ChainConfig, Pinning};
use super::descriptor::ConstraintDescriptor;
use super::modifier::Modifier;
use super::types::{Attribute, Axis, Target};
use crate::error::RestraintError;

/// One element of a chain
#[derive(Debug, Clone, PartialEq)]
pub enum ChainEntry {
    Target(Target),
    Spacing(Modifier),
}

impl From<Target> for ChainEntry {
    fn from(target: Target) -> Self {
        Self::Target(target)
    }
}

impl From<&Target> for ChainEntry {
    fn from(target: &Target) -> Self {
        Self::Target(target.clone())
    }
}

impl From<Modifier> for ChainEntry {
    fn from(modifier: Modifier) -> Self {
        Self::Spacing(modifier)
    }
}

impl fmt::Display for ChainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target(target) => write!(f, "{}", target.id()),
            Self::Spacing(modifier) => write!(f, "{}", modifier),
        }
    }
}

fn describe(chain: &[ChainEntry]) -> String {
    let entries: Vec<String> = chain.iter().map(ToString::to_string).collect();
    format!("[{}]", entries.join(", "))
}

/// The targets of a chain, in order
pub fn chain_targets(chain: &[ChainEntry]) -> Vec<Target> {
    chain
        .iter()
        .filter_map(|entry| match entry {
            ChainEntry::Target(target) => Some(target.clone()),
            ChainEntry::Spacing(_) => None,
        })
        .collect()
}

fn spacing_anchors(axis: Axis) -> (Attribute, Attribute) {
    match axis {
        Axis::Horizontal => (Attribute::Leading, Attribute::Trailing),
        Axis::Vertical => (Attribute::Top, Attribute::Bottom),
    }
}

/// Resolve a chain into spacing descriptors
///
/// Fails with [`RestraintError::MalformedChain`] when a spacing modifier has no target
/// before it or no target after it.
pub fn resolve_chain(
    axis: Axis,
    chain: &[ChainEntry],
    default_spacing: f64,
) -> Result<Vec<ConstraintDescriptor>, RestraintError> {
    let (leading, trailing) = spacing_anchors(axis);
    let mut descriptors = Vec::new();
    let mut previous: Option<&Target> = None;
    let mut pending: Vec<&Modifier> = Vec::new();

    for entry in chain {
        match entry {
            ChainEntry::Spacing(modifier) => {
                if previous.is_none() {
                    return Err(RestraintError::malformed_chain(describe(chain)));
                }
                pending.push(modifier);
            }
            ChainEntry::Target(current) => {
                if let Some(previous) = previous {
                    let first = current.anchor(leading);
                    let second = previous.anchor(trailing);
                    if pending.is_empty() {
                        descriptors.push(ConstraintDescriptor::between(
                            first,
                            second,
                            &Modifier::new(default_spacing),
                        ));
                    } else {
                        for modifier in pending.drain(..) {
                            descriptors.push(ConstraintDescriptor::between(
                                first.clone(),
                                second.clone(),
                                &modifier.with_multiple(1.0),
                            ));
                        }
                    }
                }
                previous = Some(current);
            }
        }
    }

    if !pending.is_empty() {
        return Err(RestraintError::malformed_chain(describe(chain)));
    }
    Ok(descriptors)
}

/// Container alignments for a chain laid out inside a container
///
/// `cross` applies to every chained target, `first` only to the first and `last` only
/// to the last.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainAlignment {
    pub axis: Axis,
    pub cross: Vec<Alignment>,
    pub first: Vec<Alignment>,
    pub last: Vec<Alignment>,
}

impl ChainAlignment {
    /// Derive alignments from pinning and centering options
    pub fn from_config(axis: Axis, config: &ChainConfig) -> Self {
        let soft = config.axis_pinning == Pinning::Soft;
        let soft_ends = config.ends_pinning == Pinning::Soft;

        let (mut cross, centering, first, last) = match axis {
            Axis::Horizontal => (
                if soft {
                    vec![Alignment::SoftTop, Alignment::SoftBottom]
                } else {
                    vec![Alignment::Top, Alignment::Bottom]
                },
                match config.centering {
                    Centering::Start => Alignment::Top,
                    Centering::Center => Alignment::CenterY,
                    Centering::End => Alignment::Bottom,
                },
                if soft_ends { Alignment::SoftLeft } else { Alignment::Left },
                if soft_ends { Alignment::SoftRight } else { Alignment::Right },
            ),
            Axis::Vertical => (
                if soft {
                    vec![Alignment::SoftLeft, Alignment::SoftRight]
                } else {
                    vec![Alignment::Left, Alignment::Right]
                },
                match config.centering {
                    Centering::Start => Alignment::Left,
                    Centering::Center => Alignment::CenterX,
                    Centering::End => Alignment::Right,
                },
                if soft_ends { Alignment::SoftTop } else { Alignment::Top },
                if soft_ends { Alignment::SoftBottom } else { Alignment::Bottom },
            ),
        };
        insert_unique(&mut cross, centering);

        Self {
            axis,
            cross,
            first: vec![first],
            last: vec![last],
        }
    }

    /// Partition explicit alignments by role
    ///
    /// Cross-axis alignments go to every target, start-edge ones to the first and
    /// end-edge ones to the last. An along-axis center has no single target to apply
    /// to and is dropped.
    pub fn from_alignments(axis: Axis, alignments: &[Alignment]) -> Self {
        let mut result = Self {
            axis,
            cross: Vec::new(),
            first: Vec::new(),
            last: Vec::new(),
        };
        for alignment in alignments {
            if alignment.axis() != axis {
                insert_unique(&mut result.cross, alignment.clone());
            } else if alignment.is_start_edge() {
                insert_unique(&mut result.first, alignment.clone());
            } else if alignment.is_end_edge() {
                insert_unique(&mut result.last, alignment.clone());
            } else {
                warn!("dropping {:?}: it lies along the {:?} chain axis", alignment, axis);
            }
        }
        result
    }

    /// Resolve against `container` for the given chained targets
    pub fn resolve(&self, targets: &[Target], container: &Target) -> Vec<ConstraintDescriptor> {
        let modifier = Modifier::default();
        let last_index = targets.len().saturating_sub(1);
        let mut descriptors = Vec::new();

        for (index, target) in targets.iter().enumerate() {
            let mut alignments: Vec<&Alignment> = self.cross.iter().collect();
            if index == 0 {
                alignments.extend(&self.first);
            }
            if index == last_index {
                alignments.extend(&self.last);
            }
            descriptors.extend(
                alignments
                    .into_iter()
                    .map(|alignment| alignment.resolve(target, container, &modifier)),
            );
        }
        descriptors
    }
}
