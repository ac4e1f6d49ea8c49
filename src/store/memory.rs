//! In-process tree store.

use std::collections::BTreeMap;

use serde_json::Value;
use tokio::sync::RwLock;

use super::TreeStore;
use crate::error::StoreError;

#[derive(Debug)]
enum Node {
    Leaf(Value),
    Branch(BTreeMap<String, Node>),
}

/// Tree store held in memory. Used by the test suite and when no database
/// is configured.
#[derive(Debug)]
pub struct MemoryTree {
    root: RwLock<BTreeMap<String, Node>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk to the branch at `segments`; `Ok(None)` if any segment is missing.
fn descend<'a>(
    root: &'a BTreeMap<String, Node>,
    path: &str,
) -> Result<Option<&'a BTreeMap<String, Node>>, StoreError> {
    // ---
    let mut current = root;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        match current.get(segment) {
            None => return Ok(None),
            Some(Node::Branch(children)) => current = children,
            Some(Node::Leaf(_)) => return Err(StoreError::PathConflict(path.to_string())),
        }
    }
    Ok(Some(current))
}

impl TreeStore for MemoryTree {
    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        // ---
        let mut root = self.root.write().await;
        let segments: Vec<&str> = path.split('/').collect();
        let (leaf, parents) = segments
            .split_last()
            .ok_or_else(|| StoreError::PathConflict(path.to_string()))?;

        let mut current = &mut *root;
        for segment in parents {
            let node = current
                .entry(segment.to_string())
                .or_insert_with(|| Node::Branch(BTreeMap::new()));
            current = match node {
                Node::Branch(children) => children,
                Node::Leaf(_) => return Err(StoreError::PathConflict(path.to_string())),
            };
        }

        if let Some(Node::Branch(_)) = current.get(*leaf) {
            return Err(StoreError::PathConflict(path.to_string()));
        }
        current.insert(leaf.to_string(), Node::Leaf(value));
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        // ---
        let root = self.root.read().await;
        let Some((parent, leaf)) = path.rsplit_once('/') else {
            return Ok(match root.get(path) {
                Some(Node::Leaf(value)) => Some(value.clone()),
                _ => None,
            });
        };

        // A missing or conflicting parent simply means there is no document
        let parent = match descend(&root, parent) {
            Ok(Some(parent)) => parent,
            _ => return Ok(None),
        };
        Ok(match parent.get(leaf) {
            Some(Node::Leaf(value)) => Some(value.clone()),
            _ => None,
        })
    }

    async fn children(&self, path: &str) -> Result<Vec<(String, Value)>, StoreError> {
        // ---
        let root = self.root.read().await;
        let Some(branch) = descend(&root, path)? else {
            return Ok(Vec::new());
        };

        Ok(branch
            .iter()
            .filter_map(|(key, node)| match node {
                Node::Leaf(value) => Some((key.clone(), value.clone())),
                Node::Branch(_) => None,
            })
            .collect())
    }

    async fn child_keys(&self, path: &str) -> Result<Vec<String>, StoreError> {
        // ---
        let root = self.root.read().await;
        Ok(descend(&root, path)?
            .map(|branch| branch.keys().cloned().collect())
            .unwrap_or_default())
    }
}
