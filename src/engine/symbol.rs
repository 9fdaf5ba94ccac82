use crate::{
    ast::{Position, Selector},
    error::{EngineError, EvalResult},
    kernel::class::{Class, Object},
};

/// Scoped name bindings.
///
/// Two maps back every scope: `local` holds mutable bindings (declarations,
/// loop variables, argument bindings) and `immutable` holds pinned bindings
/// such as `self` and the seeded class names. Both are persistent maps, so
/// [`SymbolTable::clone`] is cheap and a child scope's writes never reach
/// the parent's maps.
///
/// ## Usage
///
/// A table is seeded by the host, cloned at every scope boundary (function
/// entry, `for` entry), and threaded mutably through one pass of the
/// engine. Validation binds classes where evaluation binds values; both are
/// [`Object`]s.
///
/// ## Example
/// ```
/// use lingua::{
///     engine::symbol::SymbolTable,
///     kernel::{class::Object, value::Value},
/// };
///
/// let mut parent = SymbolTable::new();
/// parent.insert("x", Object::Value(Value::Integer(1)));
///
/// let mut child = parent.clone();
/// child.insert("x", Object::Value(Value::Integer(2)));
///
/// assert_eq!(parent.lookup("x"), Some(&Object::Value(Value::Integer(1))));
/// assert_eq!(child.lookup("x"), Some(&Object::Value(Value::Integer(2))));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    local:     im::HashMap<String, Object>,
    immutable: im::HashMap<String, Object>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with the primitive classes pinned under their names.
    ///
    /// The kernel's class singletons are read-only, so they are bound
    /// immutably: programs can name them in type expressions and
    /// constructor calls but never rebind them.
    #[must_use]
    pub fn prelude() -> Self {
        let mut table = Self::new();
        for class in [Class::Boolean,
                      Class::String,
                      Class::Number,
                      Class::Integer,
                      Class::Float,
                      Class::Double,
                      Class::Date,
                      Class::DateTime]
        {
            table.pin(&class.name(), Object::Class(class.clone()));
        }
        table
    }

    /// Declares a new local binding.
    ///
    /// ## Errors
    /// Fails when the name is pinned in `immutable` or already declared in
    /// `local`.
    pub fn declare(&mut self, name: &str, object: Object, position: Position) -> EvalResult<()> {
        if self.immutable.contains_key(name) {
            return Err(EngineError::node(position,
                                         format!("cannot reassign immutable variable {name}")));
        }
        if self.local.contains_key(name) {
            return Err(EngineError::node(position,
                                         format!("cannot redeclare variable {name}")));
        }
        self.local.insert(name.to_string(), object);
        Ok(())
    }

    /// Writes a local binding without the declaration checks.
    ///
    /// Used for loop variables, argument application, and assignment
    /// write-back, where the binding discipline has already been enforced.
    pub fn insert(&mut self, name: &str, object: Object) {
        self.local.insert(name.to_string(), object);
    }

    /// Pins an immutable binding such as `self`.
    pub fn pin(&mut self, name: &str, object: Object) {
        self.immutable.insert(name.to_string(), object);
    }

    /// Looks a name up in `local`, falling back to `immutable`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Object> {
        self.local.get(name).or_else(|| self.immutable.get(name))
    }

    /// Looks a name up in `immutable` only.
    #[must_use]
    pub fn pinned(&self, name: &str) -> Option<&Object> {
        self.immutable.get(name)
    }

    /// Resolves a dotted selector to the object it names.
    ///
    /// The head resolves through the table; each further member follows
    /// `get`/field semantics on the carrier the previous step produced:
    /// classes expose structural fields and static members, values expose
    /// their instance members.
    ///
    /// ## Errors
    /// Fails with a positional error when the head is unbound or an
    /// intermediate carrier has no such member.
    pub fn resolve_selector(&self, selector: &Selector) -> EvalResult<Object> {
        let head = &selector.members[0];
        let mut current =
            self.lookup(head)
                .cloned()
                .ok_or_else(|| {
                    EngineError::node(selector.position, format!("unknown identifier {head}"))
                })?;
        for member in &selector.members[1..] {
            let carrier = match &current {
                Object::Class(class) => class.name(),
                Object::Value(value) => value.class().name(),
            };
            current = current.get(member).ok_or_else(|| {
                                              EngineError::node(selector.position,
                                                                format!("{carrier} has no member {member}"))
                                          })?;
        }
        Ok(current)
    }

    /// Copies back from a child scope every local binding whose name
    /// already exists here.
    ///
    /// Loop bodies run against a clone so their declarations die with the
    /// loop, but assignments to enclosing names must persist; this
    /// reconciles the two after the loop exits.
    pub(crate) fn absorb(&mut self, child: &SymbolTable) {
        for (name, object) in &child.local {
            if self.local.contains_key(name) {
                self.local.insert(name.clone(), object.clone());
            }
        }
    }
}
