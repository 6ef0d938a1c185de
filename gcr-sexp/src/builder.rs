//! Construction of new trees
//!
//! Parsed trees are never edited in place. Changes produce a fresh tree,
//! either from scratch with [`SexpBuilder`] or by copying an existing one
//! through [`with_car`] and [`with_field`].

use crate::error::{GcrError, Result};
use crate::expression::SymbolicExpression;
use crate::lexer::is_delimiter;
use crate::navigator::Navigator;
use crate::node::{display_atom, Node};

/// Fluent builder for a list expression
///
/// ```ignore
/// let key = SexpBuilder::new()
///     .atom("rsa")
///     .field("n", "#00b1#")
///     .field("e", "#010001#")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SexpBuilder {
    elements: Vec<Node>,
}

impl SexpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the direct elements of an existing list
    pub fn from_list(nav: Navigator<'_>) -> Result<Self> {
        let elements = nav
            .node()
            .elements()
            .ok_or_else(|| GcrError::type_mismatch("cannot extend a plain atom"))?;
        Ok(SexpBuilder {
            elements: elements.to_vec(),
        })
    }

    pub fn atom(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.elements.push(Node::atom(bytes.as_ref()));
        self
    }

    /// Append a nested list built by `f`
    pub fn list<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SexpBuilder) -> SexpBuilder,
    {
        self.elements.push(Node::List(f(SexpBuilder::new()).elements));
        self
    }

    /// Append a `(name value)` pair
    pub fn field(self, name: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Self {
        self.list(|l| l.atom(name).atom(value))
    }

    /// Append an existing sub-tree
    pub fn push(mut self, node: Node) -> Self {
        self.elements.push(node);
        self
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Validate atom contents and produce the tree
    pub fn build_node(self) -> Result<Node> {
        let node = Node::List(self.elements);
        validate(&node)?;
        Ok(node)
    }

    pub fn build(self) -> Result<SymbolicExpression> {
        self.build_node().map(SymbolicExpression::from_node)
    }
}

/// Check every atom can be rendered back into canonical text
pub fn validate(node: &Node) -> Result<()> {
    let mut pending = vec![node];
    while let Some(current) = pending.pop() {
        match current {
            Node::Atom(bytes) => validate_atom(bytes)?,
            Node::List(elements) => pending.extend(elements.iter()),
        }
    }
    Ok(())
}

fn validate_atom(bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        return Err(GcrError::format("empty atom", 0));
    }
    match bytes.iter().position(|&b| is_delimiter(b)) {
        Some(offset) => Err(GcrError::format(
            format!(
                "atom {} contains a parenthesis or whitespace",
                display_atom(bytes)
            ),
            offset,
        )),
        None => Ok(()),
    }
}

/// Copy of a list-like `node` with its first element replaced by `bytes`
pub fn with_car(node: &Node, bytes: impl AsRef<[u8]>) -> Result<Node> {
    let mut elements = match node {
        Node::List(elements) if !elements.is_empty() => elements.clone(),
        Node::List(_) => return Err(GcrError::nil("car of nil expression")),
        Node::Atom(_) => return Err(GcrError::type_mismatch("plain atom has no car")),
    };
    let car = Node::atom(bytes.as_ref());
    validate(&car)?;
    elements[0] = car;
    Ok(Node::List(elements))
}

/// Copy of `node` with the value of field `name` set to `value`
///
/// The first `(name value ...)` sub-list has its second element replaced;
/// `(name value)` is appended when no such field exists.
pub fn with_field(node: &Node, name: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<Node> {
    let (name, value) = (name.as_ref(), value.as_ref());
    let mut elements = node
        .elements()
        .ok_or_else(|| GcrError::type_mismatch("plain atom has no fields"))?
        .to_vec();

    let position = elements.iter().position(|child| {
        let nav = Navigator::new(child);
        nav.is_list() && nav.car().map_or(false, |car| car == name)
    });

    match position {
        Some(i) => {
            if let Node::List(field) = &mut elements[i] {
                // `((name))` matches through its flattened car but has no value slot
                if field.len() > 1 {
                    field[1] = Node::atom(value);
                } else {
                    field.push(Node::atom(value));
                }
            }
        }
        None => elements.push(Node::List(vec![Node::atom(name), Node::atom(value)])),
    }

    let node = Node::List(elements);
    validate(&node)?;
    Ok(node)
}
