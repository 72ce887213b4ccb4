//! The restraint builder
//!
//! A [`Restraint`] accumulates constraint descriptors for the targets laid out in a
//! root container. Builder calls resolve alignments, chains and sizes into
//! descriptors right away; nothing reaches the layout engine until
//! [`Restraint::activate`] or [`Restraint::diff_activate`].

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::error::RestraintError;
use crate::layout::{
    chain_targets, resolve_chain, Alignment, Attribute, Axis, ChainAlignment, ChainConfig,
    ChainEntry, ConstraintDescriptor, DescriptorId, Edges, EngineError, LayoutEngine, Modifier,
    RelativeSize, RestraintConfig, SizeValue, Target, TargetAlignment,
};

/// A group of constraint descriptors over the targets of one root container
///
/// Builder methods consume and return the restraint so calls can be chained. Child
/// restraints are activated and deactivated together with their parent.
#[derive(Debug, Clone)]
pub struct Restraint {
    root: Target,
    config: RestraintConfig,
    items: Vec<Target>,
    descriptors: Vec<ConstraintDescriptor>,
    children: Vec<Restraint>,
    identifiers: HashMap<String, ConstraintDescriptor>,
}

impl Restraint {
    /// An empty restraint laying out targets inside `root`
    pub fn new(root: &Target) -> Self {
        Self::with_config(root, RestraintConfig::default())
    }

    pub fn with_config(root: &Target, config: RestraintConfig) -> Self {
        Self {
            root: root.clone(),
            config,
            items: Vec::new(),
            descriptors: Vec::new(),
            children: Vec::new(),
            identifiers: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Target {
        &self.root
    }

    pub fn config(&self) -> &RestraintConfig {
        &self.config
    }

    /// Targets added to the root container on activation
    pub fn items(&self) -> &[Target] {
        &self.items
    }

    /// This restraint's own descriptors, without its children's
    pub fn descriptors(&self) -> &[ConstraintDescriptor] {
        &self.descriptors
    }

    pub fn children(&self) -> &[Restraint] {
        &self.children
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// Add targets (views or guides) to the root container when activated
    pub fn add_items(mut self, items: &[Target]) -> Self {
        for item in items {
            if !self.items.contains(item) {
                self.items.push(item.clone());
            }
        }
        self
    }

    pub fn add_child(mut self, child: Restraint) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_children(mut self, children: impl IntoIterator<Item = Restraint>) -> Self {
        self.children.extend(children);
        self
    }

    // ========================================================================
    // Alignment
    // ========================================================================

    /// Align every target in `targets` to the root with every alignment
    ///
    /// # Panics
    ///
    /// Panics if an identifier is already registered in this restraint.
    pub fn align_items(self, targets: &[Target], alignments: &[Alignment]) -> Self {
        let root = self.root.clone();
        self.align_items_to(targets, alignments, &root)
    }

    /// Align every target in `targets` to `other` with every alignment
    ///
    /// # Panics
    ///
    /// Panics if an identifier is already registered in this restraint.
    pub fn align_items_to(self, targets: &[Target], alignments: &[Alignment], other: &Target) -> Self {
        let modifier = &Modifier::default();
        let descriptors = targets
            .iter()
            .flat_map(|target| {
                alignments
                    .iter()
                    .map(move |alignment| alignment.resolve(target, other, modifier))
            })
            .collect();
        self.add_descriptors(descriptors)
    }

    /// Align each entry's target to `other` with that entry's own alignments
    ///
    /// # Panics
    ///
    /// Panics if an identifier is already registered in this restraint.
    pub fn align_each(self, entries: &[TargetAlignment], other: &Target) -> Self {
        let modifier = &Modifier::default();
        let descriptors = entries
            .iter()
            .flat_map(|entry| {
                entry
                    .alignments
                    .iter()
                    .map(move |alignment| alignment.resolve(&entry.target, other, modifier))
            })
            .collect();
        self.add_descriptors(descriptors)
    }

    /// Pin the given edges of every target to the root's matching edges
    pub fn align_sides(self, targets: &[Target], sides: Edges) -> Self {
        let alignments: Vec<Alignment> = sides.into();
        self.align_items(targets, &alignments)
    }

    // ========================================================================
    // Sizing
    // ========================================================================

    /// # Panics
    ///
    /// Panics if an identifier is already registered in this restraint.
    pub fn set_widths(self, values: &[SizeValue]) -> Self {
        self.set_sizes(Attribute::Width, values)
    }

    /// # Panics
    ///
    /// Panics if an identifier is already registered in this restraint.
    pub fn set_heights(self, values: &[SizeValue]) -> Self {
        self.set_sizes(Attribute::Height, values)
    }

    /// # Panics
    ///
    /// Panics if an identifier is already registered in this restraint.
    pub fn set_relative_widths(self, sizes: &[RelativeSize]) -> Self {
        self.set_relative_sizes(Attribute::Width, sizes)
    }

    /// # Panics
    ///
    /// Panics if an identifier is already registered in this restraint.
    pub fn set_relative_heights(self, sizes: &[RelativeSize]) -> Self {
        self.set_relative_sizes(Attribute::Height, sizes)
    }

    fn set_sizes(self, attribute: Attribute, values: &[SizeValue]) -> Self {
        let descriptors = values
            .iter()
            .map(|value| ConstraintDescriptor::constant(value.target.anchor(attribute), &value.modifier))
            .collect();
        self.add_descriptors(descriptors)
    }

    fn set_relative_sizes(self, attribute: Attribute, sizes: &[RelativeSize]) -> Self {
        let descriptors = sizes
            .iter()
            .map(|size| {
                ConstraintDescriptor::between(
                    size.source.anchor(attribute),
                    size.of.anchor(attribute),
                    &size.modifier,
                )
            })
            .collect();
        self.add_descriptors(descriptors)
    }

    // ========================================================================
    // Chaining
    // ========================================================================

    /// Lay out a chain left to right
    ///
    /// # Panics
    ///
    /// Panics if the chain starts or ends with a spacing modifier, or if an
    /// identifier is already registered in this restraint.
    pub fn chain_horizontally(self, chain: &[ChainEntry]) -> Self {
        self.chain(Axis::Horizontal, chain, None)
    }

    /// Lay out a chain top to bottom
    ///
    /// # Panics
    ///
    /// Panics if the chain starts or ends with a spacing modifier, or if an
    /// identifier is already registered in this restraint.
    pub fn chain_vertically(self, chain: &[ChainEntry]) -> Self {
        self.chain(Axis::Vertical, chain, None)
    }

    /// Lay out several independent chains left to right
    pub fn chain_horizontally_many(self, chains: &[Vec<ChainEntry>]) -> Self {
        chains
            .iter()
            .fold(self, |restraint, chain| restraint.chain_horizontally(chain))
    }

    /// Lay out several independent chains top to bottom
    pub fn chain_vertically_many(self, chains: &[Vec<ChainEntry>]) -> Self {
        chains
            .iter()
            .fold(self, |restraint, chain| restraint.chain_vertically(chain))
    }

    /// Lay out a chain left to right inside `container`, pinned per this
    /// restraint's chain config
    pub fn chain_horizontally_in(self, chain: &[ChainEntry], container: &Target) -> Self {
        let config = self.config.chain;
        self.chain_horizontally_in_with(chain, container, &config)
    }

    /// Lay out a chain top to bottom inside `container`, pinned per this
    /// restraint's chain config
    pub fn chain_vertically_in(self, chain: &[ChainEntry], container: &Target) -> Self {
        let config = self.config.chain;
        self.chain_vertically_in_with(chain, container, &config)
    }

    pub fn chain_horizontally_in_with(
        self,
        chain: &[ChainEntry],
        container: &Target,
        config: &ChainConfig,
    ) -> Self {
        let alignment = ChainAlignment::from_config(Axis::Horizontal, config);
        self.chain(Axis::Horizontal, chain, Some((container, alignment)))
    }

    pub fn chain_vertically_in_with(
        self,
        chain: &[ChainEntry],
        container: &Target,
        config: &ChainConfig,
    ) -> Self {
        let alignment = ChainAlignment::from_config(Axis::Vertical, config);
        self.chain(Axis::Vertical, chain, Some((container, alignment)))
    }

    /// Lay out a chain left to right inside `container` with explicit alignments
    ///
    /// Top, bottom and center-y alignments apply to every target; leading and left
    /// ones to the first target; trailing and right ones to the last target.
    pub fn chain_horizontally_aligning(
        self,
        chain: &[ChainEntry],
        container: &Target,
        alignments: &[Alignment],
    ) -> Self {
        let alignment = ChainAlignment::from_alignments(Axis::Horizontal, alignments);
        self.chain(Axis::Horizontal, chain, Some((container, alignment)))
    }

    /// Lay out a chain top to bottom inside `container` with explicit alignments
    ///
    /// Left, right, leading, trailing and center-x alignments apply to every target;
    /// top ones to the first target; bottom ones to the last target.
    pub fn chain_vertically_aligning(
        self,
        chain: &[ChainEntry],
        container: &Target,
        alignments: &[Alignment],
    ) -> Self {
        let alignment = ChainAlignment::from_alignments(Axis::Vertical, alignments);
        self.chain(Axis::Vertical, chain, Some((container, alignment)))
    }

    fn chain(
        self,
        axis: Axis,
        chain: &[ChainEntry],
        container: Option<(&Target, ChainAlignment)>,
    ) -> Self {
        let mut descriptors = match resolve_chain(axis, chain, self.config.default_spacing) {
            Ok(descriptors) => descriptors,
            Err(e) => panic!("{}", e),
        };
        if let Some((container, alignment)) = container {
            descriptors.extend(alignment.resolve(&chain_targets(chain), container));
        }
        self.add_descriptors(descriptors)
    }

    // ========================================================================
    // Descriptors
    // ========================================================================

    /// Append caller-built descriptors
    ///
    /// # Panics
    ///
    /// Panics if an identifier is already registered in this restraint or repeats
    /// within `descriptors`.
    pub fn add_descriptors(mut self, descriptors: Vec<ConstraintDescriptor>) -> Self {
        if let Err(e) = self.try_add_descriptors(descriptors) {
            panic!("{}", e);
        }
        self
    }

    /// Append descriptors, registering their identifiers
    ///
    /// On error nothing is appended or registered.
    pub fn try_add_descriptors(
        &mut self,
        descriptors: Vec<ConstraintDescriptor>,
    ) -> Result<(), RestraintError> {
        let mut incoming = HashSet::new();
        for identifier in descriptors.iter().filter_map(|d| d.identifier.as_deref()) {
            if self.identifiers.contains_key(identifier) || !incoming.insert(identifier) {
                return Err(RestraintError::duplicate_identifier(identifier));
            }
        }

        for descriptor in descriptors {
            if let Some(identifier) = &descriptor.identifier {
                self.identifiers
                    .insert(identifier.clone(), descriptor.clone());
            }
            self.descriptors.push(descriptor);
        }
        Ok(())
    }

    /// Deactivate `descriptors`, then drop them and their identifiers from this
    /// restraint or whichever descendant owns them
    ///
    /// Descriptors owned by neither this restraint nor its descendants are ignored.
    pub fn remove_descriptors<E: LayoutEngine>(
        &mut self,
        descriptors: &[ConstraintDescriptor],
        engine: &mut E,
    ) -> Result<(), EngineError> {
        let owned: HashSet<DescriptorId> = self.all_descriptors().iter().map(|d| d.id()).collect();
        let removed: Vec<ConstraintDescriptor> = descriptors
            .iter()
            .filter(|d| owned.contains(&d.id()))
            .cloned()
            .collect();
        engine.deactivate(&removed)?;

        let ids: HashSet<DescriptorId> = removed.iter().map(ConstraintDescriptor::id).collect();
        self.drop_descriptors(&ids);
        self.mark_tree(engine);
        Ok(())
    }

    fn drop_descriptors(&mut self, ids: &HashSet<DescriptorId>) {
        self.descriptors.retain(|d| !ids.contains(&d.id()));
        self.identifiers.retain(|_, d| !ids.contains(&d.id()));
        for child in &mut self.children {
            child.drop_descriptors(ids);
        }
    }

    /// The descriptor registered under `identifier` in this restraint
    pub fn lookup(&self, identifier: &str) -> Option<&ConstraintDescriptor> {
        self.identifiers.get(identifier)
    }

    /// Number of descriptors here and in all descendants
    pub fn descriptor_count(&self) -> usize {
        self.descriptors.len()
            + self
                .children
                .iter()
                .map(Restraint::descriptor_count)
                .sum::<usize>()
    }

    /// Every descriptor here and in all descendants, parents first
    pub fn all_descriptors(&self) -> Vec<&ConstraintDescriptor> {
        let mut all: Vec<&ConstraintDescriptor> = self.descriptors.iter().collect();
        for child in &self.children {
            all.extend(child.all_descriptors());
        }
        all
    }

    // ========================================================================
    // Activation
    // ========================================================================

    fn install_items<E: LayoutEngine>(&self, engine: &mut E) -> Result<(), EngineError> {
        for item in &self.items {
            engine.add_to_container(item, &self.root)?;
        }
        for child in &self.children {
            child.install_items(engine)?;
        }
        Ok(())
    }

    fn owned_descriptors(&self) -> Vec<ConstraintDescriptor> {
        self.all_descriptors().into_iter().cloned().collect()
    }

    fn mark_tree<E: LayoutEngine>(&self, engine: &mut E) {
        engine.mark_needs_layout(&self.root);
        for child in &self.children {
            child.mark_tree(engine);
        }
    }

    /// Add items to their containers, then activate this restraint and its children
    ///
    /// The whole tree goes to the engine in one call, so an engine that rolls back a
    /// failed call leaves nothing of this restraint active.
    pub fn activate<E: LayoutEngine>(&self, engine: &mut E) -> Result<(), EngineError> {
        debug!(
            "activating {} descriptors in {}",
            self.descriptor_count(),
            self.root.id()
        );
        self.install_items(engine)?;
        engine.activate(&self.owned_descriptors())?;
        self.mark_tree(engine);
        Ok(())
    }

    /// Deactivate this restraint and its children
    pub fn deactivate<E: LayoutEngine>(&self, engine: &mut E) -> Result<(), EngineError> {
        debug!(
            "deactivating {} descriptors in {}",
            self.descriptor_count(),
            self.root.id()
        );
        engine.deactivate(&self.owned_descriptors())?;
        self.mark_tree(engine);
        Ok(())
    }

    /// Switch from `old` to `new`, touching only descriptors not shared by both
    ///
    /// Descriptors only in `old` are deactivated first, then descriptors only in `new`
    /// are activated. Shared descriptors stay active throughout. If activating fails,
    /// the descriptors only in `old` are activated again before the error is returned.
    pub fn diff_activate<E: LayoutEngine>(
        new: &Restraint,
        old: &Restraint,
        engine: &mut E,
    ) -> Result<(), EngineError> {
        let new_all = new.all_descriptors();
        let old_all = old.all_descriptors();
        let new_ids: HashSet<DescriptorId> = new_all.iter().map(|d| d.id()).collect();
        let old_ids: HashSet<DescriptorId> = old_all.iter().map(|d| d.id()).collect();

        let removed: Vec<ConstraintDescriptor> = old_all
            .into_iter()
            .filter(|d| !new_ids.contains(&d.id()))
            .cloned()
            .collect();
        let added: Vec<ConstraintDescriptor> = new_all
            .into_iter()
            .filter(|d| !old_ids.contains(&d.id()))
            .cloned()
            .collect();
        debug!(
            "diff-activating: {} removed, {} added, {} kept",
            removed.len(),
            added.len(),
            new_ids.len() - added.len()
        );

        new.install_items(engine)?;
        engine.deactivate(&removed)?;
        if let Err(e) = engine.activate(&added) {
            warn!("diff-activation failed, restoring {} descriptors: {}", removed.len(), e);
            engine.activate(&removed)?;
            return Err(e);
        }
        old.mark_tree(engine);
        new.mark_tree(engine);
        Ok(())
    }
}
