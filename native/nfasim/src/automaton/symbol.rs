//! Symbol types for automaton transitions.

use indexmap::IndexMap;

/// A symbol identifier represented as a u32.
/// The special value `EPSILON` represents an epsilon (empty) transition.
pub type SymbolId = u32;

/// Special symbol ID representing epsilon (empty) transitions.
/// We use u32::MAX as the epsilon marker.
pub const EPSILON: SymbolId = u32::MAX;

/// Textual spelling of the epsilon symbol in automaton descriptions.
pub const EPSILON_TOKEN: &str = "@";

/// Check if a symbol is an epsilon transition.
#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// Interner mapping symbol spellings to dense `SymbolId`s.
///
/// The epsilon spelling always resolves to `EPSILON` and no ordinary symbol
/// can alias it. Other symbols receive ids in declaration order, so id and
/// insertion index coincide.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    ids: IndexMap<String, SymbolId>,
}

impl SymbolTable {
    /// Create an empty table. Epsilon is a member from the start.
    pub fn new() -> Self {
        Self {
            ids: IndexMap::new(),
        }
    }

    /// Intern a symbol spelling, returning its id.
    pub fn intern(&mut self, text: &str) -> SymbolId {
        if text == EPSILON_TOKEN {
            return EPSILON;
        }
        if let Some(&id) = self.ids.get(text) {
            return id;
        }
        let id = self.ids.len() as SymbolId;
        self.ids.insert(text.to_owned(), id);
        id
    }

    /// Look up a symbol spelling without interning it.
    pub fn get(&self, text: &str) -> Option<SymbolId> {
        if text == EPSILON_TOKEN {
            return Some(EPSILON);
        }
        self.ids.get(text).copied()
    }

    /// Look up the symbol matching a single input character.
    ///
    /// The epsilon spelling is not consumable input, so it never matches
    /// here; an unknown character resolves to no symbol at all.
    pub fn get_char(&self, c: char) -> Option<SymbolId> {
        let mut buf = [0u8; 4];
        let text: &str = c.encode_utf8(&mut buf);
        self.ids.get(text).copied()
    }

    /// The spelling of a symbol, epsilon included.
    pub fn text(&self, symbol: SymbolId) -> Option<&str> {
        if is_epsilon(symbol) {
            return Some(EPSILON_TOKEN);
        }
        self.ids
            .get_index(symbol as usize)
            .map(|(text, _)| text.as_str())
    }

    /// Number of ordinary symbols, epsilon excluded.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no ordinary symbol has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over ordinary symbol spellings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SymbolId)> + '_ {
        self.ids.iter().map(|(text, &id)| (text.as_str(), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon() {
        assert!(is_epsilon(EPSILON));
        assert!(!is_epsilon(0));
        assert!(!is_epsilon(100));
    }

    #[test]
    fn test_epsilon_reserved() {
        let mut table = SymbolTable::new();
        assert_eq!(table.intern(EPSILON_TOKEN), EPSILON);
        assert_eq!(table.get(EPSILON_TOKEN), Some(EPSILON));
        // Interning the epsilon spelling never creates an ordinary symbol.
        assert_eq!(table.len(), 0);
        assert_eq!(table.text(EPSILON), Some(EPSILON_TOKEN));
    }

    #[test]
    fn test_dense_ids() {
        let mut table = SymbolTable::new();
        assert_eq!(table.intern("a"), 0);
        assert_eq!(table.intern("b"), 1);
        assert_eq!(table.intern("a"), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.text(0), Some("a"));
        assert_eq!(table.text(1), Some("b"));
        assert_eq!(table.text(2), None);
    }

    #[test]
    fn test_char_lookup() {
        let mut table = SymbolTable::new();
        table.intern("a");
        assert_eq!(table.get_char('a'), Some(0));
        assert_eq!(table.get_char('z'), None);
        // The epsilon spelling is not consumable input.
        assert_eq!(table.get_char('@'), None);
    }
}
