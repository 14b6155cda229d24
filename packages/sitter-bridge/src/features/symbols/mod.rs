//! Symbol sets for type-membership filters
//!
//! A type name can map to several grammar symbols (aliases share a display
//! name), so a name list resolves to every matching id. `"ERROR"` also adds
//! the engine's builtin error symbol, which no grammar lists.

use rustc_hash::FxHashSet;

/// The engine's builtin error symbol (`(TSSymbol)-1`)
pub const ERROR_SYMBOL: u16 = u16::MAX;

const ERROR_TYPE_NAME: &str = "ERROR";

/// The two grammar queries symbol resolution needs
pub trait Grammar {
    fn symbol_count(&self) -> usize;
    fn symbol_name(&self, symbol: u16) -> Option<&str>;
}

impl Grammar for tree_sitter::Language {
    fn symbol_count(&self) -> usize {
        self.node_kind_count()
    }

    fn symbol_name(&self, symbol: u16) -> Option<&str> {
        self.node_kind_for_id(symbol)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSet {
    symbols: FxHashSet<u16>,
}

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve type names against `grammar`. Names that match no symbol
    /// contribute nothing.
    pub fn from_names<G, S>(names: &[S], grammar: &G) -> Self
    where
        G: Grammar + ?Sized,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        let count = grammar.symbol_count().min(usize::from(ERROR_SYMBOL));
        for name in names {
            let name = name.as_ref();
            if name == ERROR_TYPE_NAME {
                set.add(ERROR_SYMBOL);
            }
            for symbol in 0..count as u16 {
                if grammar.symbol_name(symbol) == Some(name) {
                    set.add(symbol);
                }
            }
        }
        set
    }

    pub fn add(&mut self, symbol: u16) {
        self.symbols.insert(symbol);
    }

    #[inline]
    pub fn contains(&self, symbol: u16) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromIterator<u16> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}
