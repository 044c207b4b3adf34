//! # symtab
//!
//! A flat symbol table built on [`indexmap::IndexMap`].
//!
//! The table assigns each unique name a stable integer index and a tagged
//! [`Symbol`] binding. Names are *interned*: looking up a name that has never
//! been seen inserts an [`Symbol::Undefined`] binding and returns its index.
//! The scanner stores these indices in identifier tokens, so the parser reads
//! and assigns bindings without hashing the name again.
//!
//! Constants and built-in functions are immutable: [`SymTab::assign`] refuses
//! to overwrite them and leaves the binding unchanged.
//!
//! ## Example
//! ```rust
//! # use hoc_calc::{Symbol, SymTab};
//! let mut st = SymTab::new();
//! let i = st.intern("foo");
//! assert!(matches!(st.get(i).unwrap(), Symbol::Undefined));
//! st.assign(i, 42.0).unwrap();
//! assert_eq!(st.get(i).unwrap().as_number(), Some(42.0));
//! assert_eq!(st.intern("foo"), i); // same index, not reinserted
//! ```

use crate::math::{self, MathError, MathResult};
use indexmap::{IndexMap, map::Entry};
use smartstring::alias::String;
use thiserror::Error;

/// Errors that can occur when operating on a [`SymTab`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymTabError {
    /// Attempted to access an invalid index (out of bounds).
    #[error("invalid symbol index {index} (table length {len})")]
    InvalidIndex {
        /// The index that was requested.
        index: usize,
        /// The number of entries currently in the table.
        len: usize,
    },

    /// Attempted to assign to a constant or a built-in function.
    #[error("cannot modify constant/built-in '{name}'")]
    Immutable {
        /// Name of the protected binding.
        name: String,
    },
}

/// A built-in function, tagged by arity.
#[derive(Debug, Clone, Copy)]
pub enum Builtin {
    Nullary(fn() -> MathResult),
    Unary(fn(f64) -> MathResult),
    Binary(fn(f64, f64) -> MathResult),
}

impl Builtin {
    /// Number of arguments the function takes.
    pub fn arity(&self) -> usize {
        match self {
            Builtin::Nullary(_) => 0,
            Builtin::Unary(_) => 1,
            Builtin::Binary(_) => 2,
        }
    }
}

/// A symbol-table binding.
///
/// The tag is fixed when the binding is created; the only transition is
/// `Undefined`/`Variable` → `Variable` through [`SymTab::assign`].
#[derive(Debug, Clone, Copy, Default)]
pub enum Symbol {
    /// Seen but never assigned.
    #[default]
    Undefined,
    /// A user variable.
    Variable(f64),
    /// A named constant such as `pi`.
    Constant(f64),
    /// A built-in function.
    Builtin(Builtin),
}

impl Symbol {
    /// Returns `true` if assignment may replace this binding.
    pub fn is_mutable(&self) -> bool {
        matches!(self, Symbol::Undefined | Symbol::Variable(_))
    }

    /// The numeric value of a variable or constant.
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Symbol::Variable(v) | Symbol::Constant(v) => Some(v),
            Symbol::Undefined | Symbol::Builtin(_) => None,
        }
    }

    /// The arity of a built-in function, or `None` for any other binding.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Symbol::Builtin(b) => Some(b.arity()),
            _ => None,
        }
    }

    /// Invokes a built-in with exactly its arity's worth of arguments.
    ///
    /// Returns `None` when the binding is not a built-in or `args` has the
    /// wrong length.
    ///
    /// ```rust
    /// # use hoc_calc::{SymTab, math::MathError};
    /// let st = SymTab::with_builtins();
    /// let sqrt = st.lookup("sqrt").unwrap();
    /// assert_eq!(sqrt.call(&[9.0]), Some(Ok(3.0)));
    /// assert_eq!(sqrt.call(&[-9.0]), Some(Err(MathError::Domain)));
    /// assert_eq!(sqrt.call(&[1.0, 2.0]), None);
    /// ```
    pub fn call(&self, args: &[f64]) -> Option<Result<f64, MathError>> {
        match (self, args) {
            (Symbol::Builtin(Builtin::Nullary(f)), []) => Some(f()),
            (Symbol::Builtin(Builtin::Unary(f)), [x]) => Some(f(*x)),
            (Symbol::Builtin(Builtin::Binary(f)), [x, y]) => Some(f(*x, *y)),
            _ => None,
        }
    }
}

/// Named constants installed by [`SymTab::with_builtins`].
pub const CONSTANTS: [(&str, f64); 5] = [
    ("pi", std::f64::consts::PI),
    ("e", std::f64::consts::E),
    // Euler-Mascheroni constant
    ("gamma", 0.577_215_664_901_532_860_6),
    // degrees per radian
    ("deg", 57.295_779_513_082_320_876_8),
    // golden ratio
    ("phi", 1.618_033_988_749_894_848_2),
];

/// Name of the variable holding the most recently printed result.
pub const LAST: &str = "last";

/// A symbol table mapping names to [`Symbol`] bindings.
///
/// Each inserted name receives a stable index corresponding to its insertion
/// order. Re-interning the same name returns the existing index.
#[derive(Debug, Default)]
pub struct SymTab {
    tab: IndexMap<String, Symbol>,
}

impl SymTab {
    /// Creates a new, empty symbol table.
    pub fn new() -> Self {
        Self {
            tab: IndexMap::new(),
        }
    }

    /// Creates a table pre-populated with the calculator's constants, built-in
    /// functions and the `last` variable (initially `0`).
    ///
    /// ```rust
    /// # use hoc_calc::{Symbol, SymTab};
    /// let st = SymTab::with_builtins();
    /// assert!(matches!(st.lookup("pi"), Some(Symbol::Constant(_))));
    /// assert_eq!(st.lookup("atan2").and_then(|s| s.arity()), Some(2));
    /// assert_eq!(st.lookup("last").and_then(|s| s.as_number()), Some(0.0));
    /// ```
    pub fn with_builtins() -> Self {
        let mut st = Self::new();
        for (name, value) in CONSTANTS {
            st.install(name, Symbol::Constant(value));
        }

        st.install("rand", Symbol::Builtin(Builtin::Nullary(math::random)));

        let unary: [(&str, fn(f64) -> MathResult); 9] = [
            ("sin", math::sin),
            ("cos", math::cos),
            ("atan", math::atan),
            ("log", math::log),
            ("log10", math::log10),
            ("exp", math::exp),
            ("sqrt", math::sqrt),
            ("int", math::int),
            ("abs", math::abs),
        ];
        for (name, f) in unary {
            st.install(name, Symbol::Builtin(Builtin::Unary(f)));
        }

        st.install("atan2", Symbol::Builtin(Builtin::Binary(math::atan2)));
        st.install(LAST, Symbol::Variable(0.0));
        st
    }

    /// Binds `name` unconditionally, replacing any previous binding.
    fn install(&mut self, name: &str, symbol: Symbol) {
        self.tab.insert(String::from(name), symbol);
    }

    /// Returns the number of entries currently stored in the symbol table.
    ///
    /// # Example
    /// ```rust
    /// # use hoc_calc::SymTab;
    /// let mut symtab = SymTab::new();
    /// assert_eq!(symtab.len(), 0);
    /// symtab.intern("foo");
    /// symtab.intern("baz");
    /// symtab.intern("foo");
    /// assert_eq!(symtab.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.tab.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.tab.is_empty()
    }

    /// Inserts the given name as [`Symbol::Undefined`] if it doesn't exist and
    /// returns its index.
    ///
    /// If the name already exists, this returns the existing index without
    /// modifying the stored binding.
    pub fn intern(&mut self, name: impl AsRef<str>) -> usize {
        match self.tab.entry(String::from(name.as_ref())) {
            Entry::Occupied(o) => o.index(),
            Entry::Vacant(v) => {
                let o = v.insert_entry(Symbol::Undefined);
                o.index()
            }
        }
    }

    /// Returns the binding stored at the given index.
    ///
    /// Returns [`Err`] if the index is out of bounds.
    pub fn get(&self, index: usize) -> Result<&Symbol, SymTabError> {
        self.tab
            .get_index(index)
            .map(|(_, symbol)| symbol)
            .ok_or(SymTabError::InvalidIndex {
                index,
                len: self.tab.len(),
            })
    }

    /// Returns the name stored at the given index.
    pub fn name(&self, index: usize) -> Result<&str, SymTabError> {
        self.tab
            .get_index(index)
            .map(|(name, _)| name.as_str())
            .ok_or(SymTabError::InvalidIndex {
                index,
                len: self.tab.len(),
            })
    }

    /// Looks a name up without interning it.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.tab.get(name)
    }

    /// Assigns `new_value` to the binding at `index`, turning it into a
    /// [`Symbol::Variable`].
    ///
    /// # Errors
    /// - [`SymTabError::Immutable`] if the binding is a constant or built-in;
    ///   the binding is left unchanged.
    /// - [`SymTabError::InvalidIndex`] if the index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use hoc_calc::{SymTab, SymTabError};
    /// let mut st = SymTab::with_builtins();
    /// let pi = st.intern("pi");
    /// assert!(matches!(st.assign(pi, 3.0), Err(SymTabError::Immutable { .. })));
    /// assert_eq!(st.get(pi).unwrap().as_number(), Some(std::f64::consts::PI));
    /// ```
    pub fn assign(&mut self, index: usize, new_value: f64) -> Result<(), SymTabError> {
        let n = self.tab.len();
        let (name, value) = self
            .tab
            .get_index_mut(index)
            .ok_or(SymTabError::InvalidIndex { index, len: n })?;
        if !value.is_mutable() {
            return Err(SymTabError::Immutable { name: name.clone() });
        }
        *value = Symbol::Variable(new_value);
        Ok(())
    }

    /// Iterates over `(name, binding)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.tab.iter().map(|(name, symbol)| (name.as_str(), symbol))
    }
}
