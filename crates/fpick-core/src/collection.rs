#![forbid(unsafe_code)]

//! Candidate trees and the ordered collections built from them.
//!
//! A [`Collection`] is an ordered list of [`Node`]s. A node is either a leaf
//! [`Item`] or a [`Section`] holding further nodes. Keys are unique across the
//! whole tree; this is checked once in [`Collection::new`] and preserved by
//! every derived view.
//!
//! # Filtering
//!
//! [`Collection::filter`] is a pure projection: leaves are kept when the
//! predicate accepts their text value, and a section survives only when at
//! least one of its descendant leaves does. Surviving sections contain only
//! their surviving children, in original order.

use std::collections::HashMap;

use crate::error::{CollectionError, CollectionResult};
use crate::filter::FilterPredicate;
use crate::Key;

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// A selectable leaf candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<T> {
    key: Key,
    text_value: String,
    value: T,
}

impl<T> Item<T> {
    /// Create an item carrying an arbitrary payload.
    pub fn new(key: impl Into<Key>, text_value: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            text_value: text_value.into(),
            value,
        }
    }

    /// Unique key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Text matched by filter predicates and shown as the committed value.
    pub fn text_value(&self) -> &str {
        &self.text_value
    }

    /// Caller payload.
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl Item<()> {
    /// Create a payload-free item.
    pub fn text(key: impl Into<Key>, text_value: impl Into<String>) -> Self {
        Self::new(key, text_value, ())
    }
}

/// A titled group of candidates. Sections are never selectable themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<T> {
    key: Key,
    title: Option<String>,
    children: Vec<Node<T>>,
}

impl<T> Section<T> {
    /// Create an empty section.
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            title: None,
            children: Vec::new(),
        }
    }

    /// Set the section heading (builder).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append one child (builder).
    #[must_use]
    pub fn child(mut self, node: impl Into<Node<T>>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append several children (builder).
    #[must_use]
    pub fn with_children(mut self, nodes: impl IntoIterator<Item = Node<T>>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Unique key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Optional heading.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Ordered children.
    pub fn children(&self) -> &[Node<T>] {
        &self.children
    }
}

/// A candidate: either a leaf item or a section of further candidates.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<T> {
    /// Selectable leaf.
    Item(Item<T>),
    /// Group of candidates.
    Section(Section<T>),
}

impl<T> Node<T> {
    /// Key of the item or section.
    pub fn key(&self) -> &Key {
        match self {
            Node::Item(item) => item.key(),
            Node::Section(section) => section.key(),
        }
    }

    /// Whether this node is a section.
    pub fn is_section(&self) -> bool {
        matches!(self, Node::Section(_))
    }

    /// Text value of an item, or the title of a section (empty if untitled).
    pub fn text_value(&self) -> &str {
        match self {
            Node::Item(item) => item.text_value(),
            Node::Section(section) => section.title().unwrap_or(""),
        }
    }

    /// Children of a section; empty for items.
    pub fn children(&self) -> &[Node<T>] {
        match self {
            Node::Item(_) => &[],
            Node::Section(section) => section.children(),
        }
    }

    /// The leaf item, if this node is one.
    pub fn as_item(&self) -> Option<&Item<T>> {
        match self {
            Node::Item(item) => Some(item),
            Node::Section(_) => None,
        }
    }
}

impl<T> From<Item<T>> for Node<T> {
    fn from(item: Item<T>) -> Self {
        Node::Item(item)
    }
}

impl<T> From<Section<T>> for Node<T> {
    fn from(section: Section<T>) -> Self {
        Node::Section(section)
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Ordered candidate tree with key lookup.
///
/// # Invariants
///
/// 1. Every key in the tree is unique.
/// 2. `paths` maps each key to the index path of its node.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    nodes: Vec<Node<T>>,
    paths: HashMap<Key, Vec<usize>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl<T> Collection<T> {
    /// Build a collection, rejecting duplicate keys anywhere in the tree.
    pub fn new(nodes: impl IntoIterator<Item = Node<T>>) -> CollectionResult<Self> {
        let nodes: Vec<Node<T>> = nodes.into_iter().collect();
        let mut paths = HashMap::new();
        let mut prefix = Vec::new();
        index_nodes(&nodes, &mut prefix, &mut paths)?;
        Ok(Self { nodes, paths })
    }

    /// Build a flat collection from leaf items.
    pub fn from_items(items: impl IntoIterator<Item = Item<T>>) -> CollectionResult<Self> {
        Self::new(items.into_iter().map(Node::Item))
    }

    /// A collection with no candidates.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            paths: HashMap::new(),
        }
    }

    /// Rebuild the index for nodes already known to carry unique keys.
    fn from_unique(nodes: Vec<Node<T>>) -> Self {
        let mut paths = HashMap::new();
        let mut prefix = Vec::new();
        // Subtrees of a valid collection cannot introduce duplicates.
        let indexed = index_nodes(&nodes, &mut prefix, &mut paths);
        debug_assert!(indexed.is_ok(), "filtered view repeated a key");
        Self { nodes, paths }
    }

    /// Top-level nodes in display order.
    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether there are no top-level nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes at any depth, sections included.
    pub fn node_count(&self) -> usize {
        self.paths.len()
    }

    /// Number of leaf items at any depth.
    pub fn leaf_count(&self) -> usize {
        self.items().count()
    }

    /// Whether any node (item or section) has this key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.paths.contains_key(key)
    }

    /// Look up a node by key.
    pub fn get(&self, key: &str) -> Option<&Node<T>> {
        let path = self.paths.get(key)?;
        let (first, rest) = path.split_first()?;
        let mut node = self.nodes.get(*first)?;
        for &idx in rest {
            node = node.children().get(idx)?;
        }
        Some(node)
    }

    /// Look up a leaf item by key. Sections yield `None`.
    pub fn item(&self, key: &str) -> Option<&Item<T>> {
        self.get(key).and_then(Node::as_item)
    }

    /// Leaf items in depth-first display order.
    pub fn items(&self) -> Items<'_, T> {
        Items {
            stack: vec![self.nodes.iter()],
        }
    }

    /// Leaf keys in depth-first display order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.items().map(Item::key)
    }

    /// Project the collection through `predicate` for `query`.
    pub fn filter<P>(&self, query: &str, predicate: &P) -> Self
    where
        T: Clone,
        P: FilterPredicate + ?Sized,
    {
        Self::from_unique(filter_nodes(&self.nodes, query, predicate))
    }
}

impl<T> TryFrom<Vec<Node<T>>> for Collection<T> {
    type Error = CollectionError;

    fn try_from(nodes: Vec<Node<T>>) -> CollectionResult<Self> {
        Self::new(nodes)
    }
}

impl<T> TryFrom<Vec<Item<T>>> for Collection<T> {
    type Error = CollectionError;

    fn try_from(items: Vec<Item<T>>) -> CollectionResult<Self> {
        Self::from_items(items)
    }
}

fn index_nodes<T>(
    nodes: &[Node<T>],
    prefix: &mut Vec<usize>,
    paths: &mut HashMap<Key, Vec<usize>>,
) -> CollectionResult<()> {
    for (idx, node) in nodes.iter().enumerate() {
        prefix.push(idx);
        if paths.insert(node.key().clone(), prefix.clone()).is_some() {
            return Err(CollectionError::DuplicateKey(node.key().clone()));
        }
        if let Node::Section(section) = node {
            index_nodes(section.children(), prefix, paths)?;
        }
        prefix.pop();
    }
    Ok(())
}

fn filter_nodes<T, P>(nodes: &[Node<T>], query: &str, predicate: &P) -> Vec<Node<T>>
where
    T: Clone,
    P: FilterPredicate + ?Sized,
{
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Item(item) => predicate
                .matches(item.text_value(), query)
                .then(|| Node::Item(item.clone())),
            Node::Section(section) => {
                let children = filter_nodes(section.children(), query, predicate);
                if children.is_empty() {
                    None
                } else {
                    Some(Node::Section(Section {
                        key: section.key.clone(),
                        title: section.title.clone(),
                        children,
                    }))
                }
            }
        })
        .collect()
}

/// Depth-first iterator over the leaf items of a collection.
#[derive(Debug)]
pub struct Items<'a, T> {
    stack: Vec<std::slice::Iter<'a, Node<T>>>,
}

impl<'a, T> Iterator for Items<'a, T> {
    type Item = &'a Item<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Node::Item(item)) => return Some(item),
                Some(Node::Section(section)) => self.stack.push(section.children().iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
