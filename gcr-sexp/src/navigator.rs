//! Read-only views over a parsed tree
//!
//! A [`Navigator`] borrows one node of a tree and exposes list semantics:
//! positional indexing, iteration, `car`/`cdr`, and named field lookup.
//! Views are `Copy`; the borrow checker ties their lifetime to the tree.

use crate::error::{GcrError, Result};
use crate::expression::SymbolicExpression;
use crate::node::{display_atom, Node, Shape};
use std::fmt;

/// View over one node of an immutable tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Navigator<'a> {
    node: &'a Node,
}

/// Result of `car`, `cdr` and named lookup: raw bytes when the element is
/// atom-like, otherwise a view of the sub-expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element<'a> {
    Bytes(&'a [u8]),
    Expr(Navigator<'a>),
}

impl<'a> Navigator<'a> {
    pub fn new(node: &'a Node) -> Self {
        Navigator { node }
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn shape(&self) -> Shape {
        self.node.shape()
    }

    pub fn is_atom(&self) -> bool {
        self.node.is_atom()
    }

    pub fn is_nil(&self) -> bool {
        self.node.is_nil()
    }

    pub fn is_list(&self) -> bool {
        self.node.is_list()
    }

    pub fn atom_bytes(&self) -> Option<&'a [u8]> {
        self.node.atom_bytes()
    }

    /// Number of direct elements. A plain atom has no element count.
    pub fn len(&self) -> Result<usize> {
        self.elements().map(<[Node]>::len)
    }

    /// The element at `index`, which must lie in `[0, len)`
    pub fn get(&self, index: isize) -> Result<Navigator<'a>> {
        let elements = self.elements()?;
        usize::try_from(index)
            .ok()
            .and_then(|i| elements.get(i))
            .map(Navigator::new)
            .ok_or_else(|| GcrError::out_of_boundary(index, elements.len()))
    }

    /// Direct children in order; atom-like views yield nothing
    pub fn iter(&self) -> Iter<'a> {
        let elements: &'a [Node] = match self.node {
            Node::List(elements) if !self.node.is_atom() => elements.as_slice(),
            _ => &[],
        };
        Iter {
            inner: elements.iter(),
        }
    }

    /// First element of a list-like expression
    pub fn car(&self) -> Result<Element<'a>> {
        let elements = self.list_elements("car")?;
        Ok(Element::of(&elements[0]))
    }

    /// Second element of a list-like expression.
    ///
    /// This is not the Lisp remainder-of-list: `(n #00b1#)` answers the
    /// value `#00b1#`, which is how named fields are read.
    pub fn cdr(&self) -> Result<Element<'a>> {
        let elements = self.list_elements("cdr")?;
        elements
            .get(1)
            .map(Element::of)
            .ok_or_else(|| GcrError::out_of_boundary(1, elements.len()))
    }

    /// Value of the first direct sub-list whose `car` equals `name`
    ///
    /// `(rsa (n #00b1#) (e #03#))` looked up with `n` yields `#00b1#`.
    pub fn lookup(&self, name: impl AsRef<[u8]>) -> Result<Element<'a>> {
        self.field(name)?.cdr()
    }

    /// The first direct sub-list whose `car` equals `name`, as a whole
    ///
    /// `(rsa (n #00b1#) (e #03#))` with `n` yields the view `(n #00b1#)`.
    pub fn field(&self, name: impl AsRef<[u8]>) -> Result<Navigator<'a>> {
        let name = name.as_ref();
        let elements = self.list_elements("named lookup")?;
        elements
            .iter()
            .map(Navigator::new)
            .find(|child| child.is_list() && child.car().map_or(false, |car| car == name))
            .ok_or_else(|| GcrError::nil(format!("no field named {}", display_atom(name))))
    }

    /// Depth-first search for a sub-list (this one included) whose `car`
    /// equals `name`, at any nesting level
    pub fn find(&self, name: impl AsRef<[u8]>) -> Option<Navigator<'a>> {
        let name = name.as_ref();
        let mut pending = vec![*self];
        while let Some(current) = pending.pop() {
            if !current.is_list() {
                continue;
            }
            if current.car().map_or(false, |car| car == name) {
                return Some(current);
            }
            pending.extend(current.iter().rev());
        }
        None
    }

    pub fn size(&self) -> usize {
        self.node.size()
    }

    pub fn to_canonical(&self) -> Vec<u8> {
        self.node.to_canonical()
    }

    /// Copy this sub-tree out into an independently owned expression
    pub fn to_expression(&self) -> SymbolicExpression {
        SymbolicExpression::from_node(self.node.clone())
    }

    fn elements(&self) -> Result<&'a [Node]> {
        self.node.elements().ok_or_else(|| {
            GcrError::type_mismatch(format!(
                "atom {} has no elements",
                display_atom(self.atom_bytes().unwrap_or_default())
            ))
        })
    }

    fn list_elements(&self, operation: &str) -> Result<&'a [Node]> {
        match (self.node.shape(), self.node) {
            (Shape::List, Node::List(elements)) => Ok(elements.as_slice()),
            (Shape::Nil, _) => Err(GcrError::nil(format!("{} of nil expression", operation))),
            _ => Err(GcrError::nil(format!(
                "{} of atom-like expression {}",
                operation, self.node
            ))),
        }
    }
}

impl<'a> Element<'a> {
    fn of(node: &'a Node) -> Self {
        match node.atom_bytes() {
            Some(bytes) => Element::Bytes(bytes),
            None => Element::Expr(Navigator::new(node)),
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Element::Bytes(bytes) => Some(*bytes),
            Element::Expr(_) => None,
        }
    }

    pub fn as_expr(&self) -> Option<Navigator<'a>> {
        match self {
            Element::Bytes(_) => None,
            Element::Expr(nav) => Some(*nav),
        }
    }
}

/// Iterator over the direct children of a [`Navigator`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Navigator<'a>;

    fn next(&mut self) -> Option<Navigator<'a>> {
        self.inner.next().map(Navigator::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Navigator<'a>> {
        self.inner.next_back().map(Navigator::new)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for Navigator<'a> {
    type Item = Navigator<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &Navigator<'a> {
    type Item = Navigator<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl fmt::Display for Navigator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}

impl fmt::Display for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Bytes(bytes) => f.write_str(&display_atom(bytes)),
            Element::Expr(nav) => write!(f, "{}", nav),
        }
    }
}

// Byte comparisons: an atom-like view or element equals its bytes

impl PartialEq<[u8]> for Navigator<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.atom_bytes() == Some(other)
    }
}

impl PartialEq<&[u8]> for Navigator<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        *self == **other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Navigator<'_> {
    fn eq(&self, other: &[u8; N]) -> bool {
        *self == other[..]
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Navigator<'_> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        *self == other[..]
    }
}

impl PartialEq<[u8]> for Element<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        match self {
            Element::Bytes(bytes) => *bytes == other,
            Element::Expr(nav) => *nav == *other,
        }
    }
}

impl PartialEq<&[u8]> for Element<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        *self == **other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Element<'_> {
    fn eq(&self, other: &[u8; N]) -> bool {
        *self == other[..]
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Element<'_> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        *self == other[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::parse;

    #[test]
    fn test_scenario() {
        let tree = parse(b"(a b (c d) ((e f) g h))").unwrap();
        let nav = Navigator::new(&tree);

        assert_eq!(nav.len().unwrap(), 4);
        assert_eq!(nav.car().unwrap(), b"a");
        assert_eq!(nav.cdr().unwrap(), b"b");

        let third = nav.get(2).unwrap();
        assert!(third.is_list());
        assert_eq!(third.len().unwrap(), 2);
        assert_eq!(third.get(0).unwrap(), b"c");

        let nested = nav.get(3).unwrap().get(0).unwrap();
        assert!(nested.is_list());
        assert_eq!(nested.len().unwrap(), 2);
    }

    #[test]
    fn test_out_of_boundary() {
        let tree = parse(b"(a b)").unwrap();
        let nav = Navigator::new(&tree);
        assert_eq!(nav.get(2).unwrap_err().kind(), ErrorKind::SexpOutOfBoundary);
        assert_eq!(nav.get(-1).unwrap_err().kind(), ErrorKind::SexpOutOfBoundary);
    }

    #[test]
    fn test_len_of_plain_atom_is_type_error() {
        let tree = parse(b"(a b)").unwrap();
        let atom = Navigator::new(&tree).get(0).unwrap();
        assert_eq!(atom.len().unwrap_err().kind(), ErrorKind::SexpType);
        assert_eq!(atom.get(0).unwrap_err().kind(), ErrorKind::SexpType);
        assert_eq!(atom.iter().count(), 0);
    }

    #[test]
    fn test_single_atom_list_is_atom_like() {
        let tree = parse(b"(a)").unwrap();
        let nav = Navigator::new(&tree);
        assert!(nav.is_atom());
        assert_eq!(nav, b"a");
        assert_eq!(nav.len().unwrap(), 1);
        assert_eq!(nav.get(0).unwrap(), b"a");
        assert_eq!(nav.iter().count(), 0);
        assert_eq!(nav.car().unwrap_err().kind(), ErrorKind::SexpNil);
    }

    #[test]
    fn test_nil_expression() {
        let tree = parse(b"()").unwrap();
        let nav = Navigator::new(&tree);
        assert!(nav.is_nil());
        assert!(nav.is_atom());
        assert_eq!(nav.len().unwrap(), 0);
        assert_eq!(nav.iter().count(), 0);
        assert_eq!(nav.car().unwrap_err().kind(), ErrorKind::SexpNil);
        assert_eq!(nav.cdr().unwrap_err().kind(), ErrorKind::SexpNil);
        assert_eq!(nav.lookup("n").unwrap_err().kind(), ErrorKind::SexpNil);
        assert_eq!(nav.get(0).unwrap_err().kind(), ErrorKind::SexpOutOfBoundary);
    }

    #[test]
    fn test_car_returns_sub_expression() {
        let tree = parse(b"((x y) z)").unwrap();
        let car = Navigator::new(&tree).car().unwrap();
        let sub = car.as_expr().unwrap();
        assert_eq!(sub.len().unwrap(), 2);
        assert_eq!(car.as_bytes(), None);
    }

    #[test]
    fn test_cdr_of_short_list() {
        let tree = parse(b"((x y))").unwrap();
        let err = Navigator::new(&tree).cdr().unwrap_err();
        assert_eq!(err, GcrError::out_of_boundary(1, 1));
    }

    #[test]
    fn test_named_lookup() {
        let tree = parse(b"(rsa (n 1) (e 2) (flag) (e 3))").unwrap();
        let nav = Navigator::new(&tree);
        assert_eq!(nav.lookup("n").unwrap(), b"1");
        assert_eq!(nav.lookup("e").unwrap(), b"2");
        assert_eq!(nav.field("e").unwrap(), Navigator::new(&tree).get(2).unwrap());
        assert_eq!(nav.lookup("flag").unwrap_err().kind(), ErrorKind::SexpNil);
        assert_eq!(nav.lookup("z").unwrap_err().kind(), ErrorKind::SexpNil);
        assert_eq!(nav.lookup("rsa").unwrap_err().kind(), ErrorKind::SexpNil);
    }

    #[test]
    fn test_find_nested() {
        let tree = parse(b"(public-key (rsa (n #00b1#) (e #03#)))").unwrap();
        let nav = Navigator::new(&tree);
        let rsa = nav.find("rsa").unwrap();
        assert_eq!(rsa.lookup("e").unwrap(), b"#03#");
        assert_eq!(nav.find("n").unwrap().cdr().unwrap(), b"#00b1#");
        assert!(nav.find("dsa").is_none());
    }

    #[test]
    fn test_iteration_is_restartable() {
        let tree = parse(b"(a (b c) d)").unwrap();
        let nav = Navigator::new(&tree);
        let first: Vec<_> = nav.iter().collect();
        let second: Vec<_> = nav.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first[1].get(1).unwrap(), b"c");
    }

    #[test]
    fn test_structural_equality() {
        let left = parse(b"(a (b c))").unwrap();
        let right = parse(b"( a (b\nc) )").unwrap();
        assert_eq!(Navigator::new(&left), Navigator::new(&right));
        assert_ne!(
            Navigator::new(&left).get(1).unwrap(),
            Navigator::new(&right).get(0).unwrap()
        );
    }
}
