//! Owning handle over a parsed tree

use crate::builder;
use crate::error::{GcrError, Result};
use crate::navigator::{Element, Iter, Navigator};
use crate::node::Node;
use crate::parser::{self, ParseOptions};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A parsed canonical S-expression
///
/// Cloning shares the underlying tree. The tree is immutable, so clones
/// and [`Navigator`] views may be read from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolicExpression {
    root: Arc<Node>,
}

impl SymbolicExpression {
    pub fn parse(input: impl AsRef<[u8]>) -> Result<Self> {
        parser::parse(input.as_ref()).map(Self::from_node)
    }

    pub fn parse_with_options(input: impl AsRef<[u8]>, options: ParseOptions) -> Result<Self> {
        parser::parse_with_options(input.as_ref(), options).map(Self::from_node)
    }

    pub fn from_node(node: Node) -> Self {
        SymbolicExpression {
            root: Arc::new(node),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn view(&self) -> Navigator<'_> {
        Navigator::new(&self.root)
    }

    pub fn is_atom(&self) -> bool {
        self.root.is_atom()
    }

    pub fn is_nil(&self) -> bool {
        self.root.is_nil()
    }

    pub fn len(&self) -> Result<usize> {
        self.view().len()
    }

    pub fn get(&self, index: isize) -> Result<Navigator<'_>> {
        self.view().get(index)
    }

    pub fn iter(&self) -> Iter<'_> {
        self.view().iter()
    }

    pub fn car(&self) -> Result<Element<'_>> {
        self.view().car()
    }

    pub fn cdr(&self) -> Result<Element<'_>> {
        self.view().cdr()
    }

    pub fn lookup(&self, name: impl AsRef<[u8]>) -> Result<Element<'_>> {
        self.view().lookup(name)
    }

    pub fn field(&self, name: impl AsRef<[u8]>) -> Result<Navigator<'_>> {
        self.view().field(name)
    }

    pub fn find(&self, name: impl AsRef<[u8]>) -> Option<Navigator<'_>> {
        self.view().find(name)
    }

    pub fn size(&self) -> usize {
        self.root.size()
    }

    pub fn to_canonical(&self) -> Vec<u8> {
        self.root.to_canonical()
    }

    pub fn to_pretty_string(&self) -> String {
        self.root.to_pretty_string(0)
    }

    /// New expression with the first element replaced; `self` is unchanged
    pub fn with_car(&self, bytes: impl AsRef<[u8]>) -> Result<Self> {
        builder::with_car(&self.root, bytes).map(Self::from_node)
    }

    /// New expression with field `name` set to `value`; `self` is unchanged
    pub fn with_field(&self, name: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<Self> {
        builder::with_field(&self.root, name, value).map(Self::from_node)
    }
}

impl<'a> IntoIterator for &'a SymbolicExpression {
    type Item = Navigator<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl FromStr for SymbolicExpression {
    type Err = GcrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&[u8]> for SymbolicExpression {
    type Error = GcrError;

    fn try_from(input: &[u8]) -> Result<Self> {
        Self::parse(input)
    }
}

impl From<Node> for SymbolicExpression {
    fn from(node: Node) -> Self {
        Self::from_node(node)
    }
}

impl fmt::Display for SymbolicExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl Serialize for SymbolicExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::thread;

    #[test]
    fn test_parse_and_delegate() {
        let sexp: SymbolicExpression =
            "(a brown (fox jumping) ((lazy dog) over the))".parse().unwrap();
        assert!(!sexp.is_atom());
        assert_eq!(sexp.len().unwrap(), 4);
        assert_eq!(sexp.car().unwrap(), b"a");
        assert_eq!(sexp.cdr().unwrap(), b"brown");
        assert_eq!(sexp.get(2).unwrap().get(1).unwrap(), b"jumping");
        assert_eq!(sexp.iter().count(), 4);
    }

    #[test]
    fn test_clone_shares_tree() {
        let sexp = SymbolicExpression::parse(b"(rsa (n 1) (e 2))").unwrap();
        let copy = sexp.clone();
        assert!(Arc::ptr_eq(&sexp.root, &copy.root));
        assert_eq!(sexp, copy);
    }

    #[test]
    fn test_concurrent_readers() {
        let sexp = SymbolicExpression::parse(b"(rsa (n #00b1#) (e #03#))").unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sexp = sexp.clone();
                thread::spawn(move || sexp.lookup("n").map(|v| v == b"#00b1#").unwrap_or(false))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn test_with_field_returns_new_tree() {
        let sexp = SymbolicExpression::parse(b"(rsa (n 1) (e 2))").unwrap();
        let updated = sexp.with_field("n", "5").unwrap();
        assert_eq!(updated.lookup("n").unwrap(), b"5");
        assert_eq!(sexp.lookup("n").unwrap(), b"1");
    }

    #[test]
    fn test_detach_sub_expression() {
        let sexp = SymbolicExpression::parse(b"(public-key (rsa (n 1)))").unwrap();
        let rsa = sexp.find("rsa").unwrap().to_expression();
        drop(sexp);
        assert_eq!(rsa.lookup("n").unwrap(), b"1");
        assert_eq!(rsa.to_canonical(), b"(rsa (n 1))".to_vec());
    }

    #[test]
    fn test_try_from_rejects_bare_atom() {
        let err = SymbolicExpression::try_from(&b"a"[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SexpFormat);
    }
}
