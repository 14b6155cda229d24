//! Syntax tree: the engine tree plus everything keyed to it
//!
//! A `SyntaxTree` owns its identity cache, so no cache entry can outlive
//! the tree it describes. Edits bump a generation counter; owned cursors
//! compare it to refuse stale positions.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tree_sitter::{Node, Parser, Tree};

use crate::config::{BridgeConfig, TextEncoding};
use crate::errors::{BridgeError, Result};
use crate::features::codec::{EncodedNode, FIELD_COUNT_PER_NODE};
use crate::features::identity::{IdentityCache, NodeObject};
use crate::features::languages::BundledLanguage;
use crate::shared::models::{Range, TextEdit};
use crate::shared::units::Units;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique tree identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(pub u64);

impl TreeId {
    fn next() -> Self {
        Self(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
pub struct SyntaxTree {
    tree: Tree,
    language: BundledLanguage,
    encoding: TextEncoding,
    units: Units,
    cache: IdentityCache,
    id: TreeId,
    generation: u64,
}

impl SyntaxTree {
    /// Parse `text`, reusing `old_tree` (already edited) when given
    pub fn parse(
        language: BundledLanguage,
        text: &str,
        old_tree: Option<&SyntaxTree>,
        config: &BridgeConfig,
    ) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.grammar())
            .map_err(|e| BridgeError::parse(format!("{language}: {e}")))?;

        let old = old_tree.map(|t| &t.tree);
        let tree = match config.text_encoding {
            TextEncoding::Utf16 => {
                let code_units: Vec<u16> = text.encode_utf16().collect();
                parser.parse_utf16(&code_units, old)
            }
            TextEncoding::Utf8 => parser.parse(text, old),
        }
        .ok_or_else(|| BridgeError::parse(format!("{language}: parser returned no tree")))?;

        let id = TreeId::next();
        tracing::debug!(
            tree = id.0,
            %language,
            encoding = %config.text_encoding,
            incremental = old.is_some(),
            "parsed syntax tree"
        );

        Ok(Self {
            tree,
            language,
            encoding: config.text_encoding,
            units: Units::new(config.text_encoding),
            cache: IdentityCache::new(),
            id,
            generation: 0,
        })
    }

    /// Parse with the default configuration (UTF-16 units)
    pub fn parse_with_defaults(language: BundledLanguage, text: &str) -> Result<Self> {
        Self::parse(language, text, None, &BridgeConfig::default())
    }

    pub fn inner(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn language(&self) -> BundledLanguage {
        self.language
    }

    pub fn grammar(&self) -> tree_sitter::Language {
        self.language.grammar()
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn identity_cache(&self) -> &IdentityCache {
        &self.cache
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Number of edits applied so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply an edit given in host units. Cached wrappers are moved along
    /// with the tree so their handles keep decoding to the same nodes.
    pub fn edit(&mut self, edit: &TextEdit) -> Result<()> {
        let input = self.units.edit_from_host(edit)?;
        self.tree.edit(&input);

        let live = self.cache.live_objects();
        for object in &live {
            // SAFETY: cached words are only ever encoded from nodes of this
            // tree and refreshed on every edit.
            if let Some(mut node) = unsafe { object.encoded().bind(&self.tree) } {
                node.edit(&input);
                object.refresh(EncodedNode::from_node(node));
            }
        }

        self.generation += 1;
        tracing::debug!(
            tree = self.id.0,
            generation = self.generation,
            refreshed = live.len(),
            "applied edit"
        );
        Ok(())
    }

    /// Span covering every changed node, or `None` if nothing changed
    pub fn edited_range(&self) -> Option<Range> {
        let root = self.tree.root_node();
        if !root.has_changes() {
            return None;
        }

        let mut cursor = root.walk();
        let mut first = root;
        loop {
            let next = first.children(&mut cursor).find(|c| c.has_changes());
            match next {
                Some(child) => first = child,
                None => break,
            }
        }
        let mut last = root;
        loop {
            let next = last.children(&mut cursor).filter(|c| c.has_changes()).last();
            match next {
                Some(child) => last = child,
                None => break,
            }
        }

        Some(Range {
            start_index: self.units.offset_to_host(first.start_byte()),
            end_index: self.units.offset_to_host(last.end_byte()),
            start_position: self.units.point_to_host(first.start_position()),
            end_position: self.units.point_to_host(last.end_position()),
        })
    }

    /// Ranges whose syntactic structure differs between `self` (edited) and `other`
    pub fn changed_ranges(&self, other: &SyntaxTree) -> Vec<Range> {
        self.tree
            .changed_ranges(&other.tree)
            .map(|range| self.units.range_to_host(range))
            .collect()
    }

    /// Graphviz rendering of the tree
    #[cfg(unix)]
    pub fn print_dot_graph(&self) -> Result<String> {
        use std::io::{Read, Seek, SeekFrom};

        let mut file = tempfile::tempfile()?;
        self.tree.print_dot_graph(&file);
        file.seek(SeekFrom::Start(0))?;
        let mut graph = String::new();
        file.read_to_string(&mut graph)?;
        Ok(graph)
    }

    /// Wrapper for an encoded node of this tree (null words give `None`).
    /// Words that name no node of this tree are rejected.
    pub fn cache_node(&self, encoded: EncodedNode) -> Result<Option<Rc<NodeObject>>> {
        let Some(node) = encoded.resolve(&self.tree)? else {
            return Ok(None);
        };
        Ok(self.cache.insert(EncodedNode::from_node(node), node.kind_id()))
    }

    /// `cache_node` over consecutive six-word handles
    pub fn cache_nodes(&self, words: &[u32]) -> Result<Vec<Option<Rc<NodeObject>>>> {
        if words.len() % FIELD_COUNT_PER_NODE != 0 {
            return Err(BridgeError::invalid_argument(format!(
                "Node words must come in groups of {}, got {}",
                FIELD_COUNT_PER_NODE,
                words.len()
            )));
        }
        words
            .chunks_exact(FIELD_COUNT_PER_NODE)
            .map(|chunk| EncodedNode::from_words(chunk).and_then(|encoded| self.cache_node(encoded)))
            .collect()
    }
}
