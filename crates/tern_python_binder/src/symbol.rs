use std::hash::{Hash, Hasher};

use bitflags::bitflags;
use hashbrown::hash_map::RawEntryMut;
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;

use tern_index::{newtype_index, IndexVec};
use tern_python_ast::Name;

use crate::declaration::Declaration;
use crate::node_key::TypeSourceId;
use crate::types::Type;

/// Id of a symbol within its owning scope's table.
newtype_index! {
    pub struct ScopedSymbolId;
}

/// Map from symbol id to nothing; the name is stored once, in the symbol
/// arena, and hashed on demand.
type SymbolMap = hashbrown::HashMap<ScopedSymbolId, (), ()>;

bitflags! {
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct SymbolFlags: u8 {
        /// The name has no value before its first executed binding.
        const INITIALLY_UNBOUND           = 1 << 0;
        /// Member of the class body (or any name not proven otherwise).
        const CLASS_MEMBER                = 1 << 1;
        /// Assigned through the method's self parameter.
        const INSTANCE_MEMBER             = 1 << 2;
        /// Excluded when the owning class is matched against a protocol.
        const IGNORED_FOR_PROTOCOL_MATCH  = 1 << 3;
    }
}

/// All declarations of one name in one scope, in discovery order.
#[derive(Debug)]
pub struct Symbol<'ast> {
    name: Name,
    flags: SymbolFlags,
    declarations: SmallVec<[Declaration<'ast>; 2]>,
    /// Types recorded by downstream inference, keyed by the opaque source
    /// the binder attached to the corresponding declaration.
    inferred_types: FxHashMap<TypeSourceId, Type>,
}

impl<'ast> Symbol<'ast> {
    fn new(name: Name) -> Self {
        Self {
            name,
            flags: SymbolFlags::empty(),
            declarations: SmallVec::new(),
            inferred_types: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn declarations(&self) -> &[Declaration<'ast>] {
        &self.declarations
    }

    pub fn flags(&self) -> SymbolFlags {
        self.flags
    }

    pub fn is_initially_unbound(&self) -> bool {
        self.flags.contains(SymbolFlags::INITIALLY_UNBOUND)
    }

    pub fn is_class_member(&self) -> bool {
        self.flags.contains(SymbolFlags::CLASS_MEMBER)
    }

    pub fn is_instance_member(&self) -> bool {
        self.flags.contains(SymbolFlags::INSTANCE_MEMBER)
    }

    /// Stores the type a later pass inferred for one of this symbol's
    /// declaration sites.
    pub fn set_inferred_type_for_source(&mut self, source: TypeSourceId, ty: Type) {
        self.inferred_types.insert(source, ty);
    }

    pub fn inferred_type_for_source(&self, source: TypeSourceId) -> Option<Type> {
        self.inferred_types.get(&source).copied()
    }

    pub(crate) fn insert_flags(&mut self, flags: SymbolFlags) {
        self.flags.insert(flags);
    }

    pub(crate) fn push_declaration(&mut self, declaration: Declaration<'ast>) {
        self.declarations.push(declaration);
    }

    pub(crate) fn declarations_mut(&mut self) -> &mut [Declaration<'ast>] {
        &mut self.declarations
    }

    /// Whether any declaration binds a value (used to reject `global x`
    /// after `x` was assigned).
    pub(crate) fn has_value_declaration(&self) -> bool {
        self.declarations
            .iter()
            .any(Declaration::is_value_binding)
    }
}

/// The symbol table of a single scope. Names are unique; insertion order is
/// the order ids were handed out.
#[derive(Debug, Default)]
pub struct SymbolTable<'ast> {
    symbols: IndexVec<ScopedSymbolId, Symbol<'ast>>,
    symbols_by_name: SymbolMap,
}

impl<'ast> SymbolTable<'ast> {
    pub fn symbol(&self, symbol_id: ScopedSymbolId) -> &Symbol<'ast> {
        &self.symbols[symbol_id]
    }

    pub fn symbol_ids(&self) -> impl Iterator<Item = ScopedSymbolId> + use<'_, 'ast> {
        self.symbols.indices()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol<'ast>> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol_by_name(&self, name: &str) -> Option<&Symbol<'ast>> {
        let id = self.symbol_id_by_name(name)?;
        Some(self.symbol(id))
    }

    pub fn symbol_id_by_name(&self, name: &str) -> Option<ScopedSymbolId> {
        let (id, ()) = self
            .symbols_by_name
            .raw_entry()
            .from_hash(Self::hash_name(name), |id| {
                self.symbols[*id].name().as_str() == name
            })?;
        Some(*id)
    }

    pub(crate) fn symbol_mut(&mut self, symbol_id: ScopedSymbolId) -> &mut Symbol<'ast> {
        &mut self.symbols[symbol_id]
    }

    /// Returns the id for `name`, creating the symbol if it is new, and
    /// whether it was created. Flags are merged into an existing symbol.
    pub(crate) fn add_or_update_symbol(
        &mut self,
        name: Name,
        flags: SymbolFlags,
    ) -> (ScopedSymbolId, bool) {
        let hash = Self::hash_name(&name);
        let entry = self
            .symbols_by_name
            .raw_entry_mut()
            .from_hash(hash, |id| self.symbols[*id].name() == &name);

        match entry {
            RawEntryMut::Occupied(entry) => {
                let id = *entry.key();
                self.symbols[id].insert_flags(flags);
                (id, false)
            }
            RawEntryMut::Vacant(entry) => {
                let mut symbol = Symbol::new(name);
                symbol.insert_flags(flags);

                let id = self.symbols.push(symbol);
                entry.insert_with_hasher(hash, id, (), |id| {
                    Self::hash_name(self.symbols[*id].name().as_str())
                });
                (id, true)
            }
        }
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.symbols.shrink_to_fit();
    }

    fn hash_name(name: &str) -> u64 {
        let mut hasher = FxHasher::default();
        name.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebinding_returns_the_same_symbol() {
        let mut table = SymbolTable::default();
        let (first, added_first) =
            table.add_or_update_symbol(Name::new("x"), SymbolFlags::INITIALLY_UNBOUND);
        let (second, added_second) =
            table.add_or_update_symbol(Name::new("x"), SymbolFlags::CLASS_MEMBER);

        assert!(added_first);
        assert!(!added_second);
        assert_eq!(first, second);
        assert!(table.symbol(first).is_initially_unbound());
        assert!(table.symbol(first).is_class_member());
    }

    #[test]
    fn lookup_by_name() {
        let mut table = SymbolTable::default();
        table.add_or_update_symbol(Name::new("alpha"), SymbolFlags::empty());
        table.add_or_update_symbol(Name::new("beta"), SymbolFlags::empty());

        assert_eq!(table.symbol_by_name("beta").unwrap().name(), "beta");
        assert!(table.symbol_by_name("gamma").is_none());
        assert_eq!(table.len(), 2);
    }
}
