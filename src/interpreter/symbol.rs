use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::ast::Node;

/// A shared handle to a [`Symbol`].
///
/// Trees hold these as non-owning references into the symbol table: cloning
/// a `SymbolRef` is cheap, all clones address the same mutable cell, and
/// dropping a tree only drops its handles, never the symbol itself (the
/// table keeps its own). `Rc<RefCell<…>>` is neither `Send` nor `Sync`, so
/// the single-evaluator-thread discipline is enforced by the compiler.
pub type SymbolRef = Rc<RefCell<Symbol>>;

/// A named mutable storage cell representing a variable or function.
///
/// Every distinct name maps to exactly one `Symbol`, created on first
/// lookup with value `0.0` and no function attached. Assignment mutates
/// `value`; a `let` definition attaches `params` and `func`. Symbols live
/// for the lifetime of their [`SymbolTable`].
pub struct Symbol {
    /// The name this symbol was created under.
    pub name:   String,
    /// The current numeric value.
    pub value:  f64,
    /// The function body, when this symbol has been defined as a function.
    pub func:   Option<Node>,
    /// The parameter symbols of the function, in declaration order.
    pub params: Vec<SymbolRef>,
}

impl std::fmt::Debug for Symbol {
    // A recursive function's body holds a handle back to this symbol, so
    // the derived Debug would not terminate; print a summary instead.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Symbol")
         .field("name", &self.name)
         .field("value", &self.value)
         .field("function", &self.func.is_some())
         .field("params", &self.params.len())
         .finish()
    }
}

/// The mapping from names to [`Symbol`] cells.
///
/// The table is an explicit value rather than process-global state: every
/// embedding (and every test) creates its own and passes it to the parser,
/// which resolves names through [`SymbolTable::lookup`] while building
/// trees. Lookup is amortized O(1) and the table grows without limit.
pub struct SymbolTable {
    symbols: HashMap<String, SymbolRef>,
}

#[allow(clippy::new_without_default)]
impl SymbolTable {
    /// Creates an empty symbol table.
    #[must_use]
    pub fn new() -> Self {
        Self { symbols: HashMap::new(), }
    }

    /// Returns the symbol for `name`, creating it on first use.
    ///
    /// A fresh symbol starts with value `0.0`, no function body, and no
    /// parameters. The same name always yields the same cell.
    ///
    /// ## Example
    /// ```
    /// use std::rc::Rc;
    ///
    /// use numera::interpreter::symbol::SymbolTable;
    ///
    /// let mut table = SymbolTable::new();
    /// let first = table.lookup("x");
    /// let second = table.lookup("x");
    ///
    /// assert!(Rc::ptr_eq(&first, &second));
    /// assert_eq!(first.borrow().value, 0.0);
    /// ```
    pub fn lookup(&mut self, name: &str) -> SymbolRef {
        let symbol = self.symbols.entry(name.to_string()).or_insert_with(|| {
                                                             Rc::new(RefCell::new(Symbol { name:   name.to_string(),
                                                                                           value:  0.0,
                                                                                           func:   None,
                                                                                           params: Vec::new(), }))
                                                         });
        Rc::clone(symbol)
    }

    /// Attaches a parameter list and function body to the symbol for
    /// `name`, replacing any previous definition.
    ///
    /// The previous body subtree, if any, is released when it is
    /// overwritten. Returns the defined symbol.
    ///
    /// ## Example
    /// ```
    /// use numera::{ast::Node, interpreter::symbol::SymbolTable};
    ///
    /// let mut table = SymbolTable::new();
    /// let x = table.lookup("x");
    ///
    /// // let identity(x) = x
    /// let body = Node::variable(table.lookup("x"), 1);
    /// let f = table.define_function("identity", vec![x], body);
    ///
    /// assert!(f.borrow().func.is_some());
    /// assert_eq!(f.borrow().params.len(), 1);
    /// ```
    pub fn define_function(&mut self, name: &str, params: Vec<SymbolRef>, body: Node) -> SymbolRef {
        let symbol = self.lookup(name);
        {
            let mut cell = symbol.borrow_mut();
            cell.params = params;
            cell.func = Some(body);
        }
        symbol
    }
}
