//! Node tree for canonical S-expressions

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// Fixed bookkeeping cost charged per node by [`Node::size`]
pub const NODE_OVERHEAD: usize = std::mem::size_of::<Node>();

/// S-expression tree node
///
/// A tree is never mutated after construction. Atom contents never hold
/// parentheses or whitespace, which keeps [`Node::to_canonical`]
/// round-trippable.
///
/// Dropping, [`Node::size`], [`Node::depth`], [`Node::node_count`],
/// [`Node::to_canonical`] and `Display` walk the tree with an explicit
/// stack and accept any depth. `Clone`, equality, hashing, pretty
/// printing and serialization recurse, so callers handling untrusted
/// input should cap nesting with `ParseOptions::max_depth`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// Opaque byte string
    Atom(Vec<u8>),
    /// Ordered children, `List(vec![])` is the nil expression `()`
    List(Vec<Node>),
}

/// Effective shape of a node
///
/// A one-element list whose element is an atom is flattened to `Atom`.
/// Every operation that distinguishes atoms from lists goes through
/// [`Node::shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Nil,
    Atom,
    List,
}

impl Node {
    pub fn atom(bytes: impl Into<Vec<u8>>) -> Self {
        Node::Atom(bytes.into())
    }

    pub fn nil() -> Self {
        Node::List(Vec::new())
    }

    pub fn shape(&self) -> Shape {
        match self {
            Node::Atom(_) => Shape::Atom,
            Node::List(elements) => match elements.as_slice() {
                [] => Shape::Nil,
                [Node::Atom(_)] => Shape::Atom,
                _ => Shape::List,
            },
        }
    }

    /// Atom-like: a plain atom, a single-atom list, or nil
    pub fn is_atom(&self) -> bool {
        self.shape() != Shape::List
    }

    pub fn is_nil(&self) -> bool {
        self.shape() == Shape::Nil
    }

    pub fn is_list(&self) -> bool {
        self.shape() == Shape::List
    }

    /// Bytes of an atom-like node that carries content
    pub fn atom_bytes(&self) -> Option<&[u8]> {
        match self {
            Node::Atom(bytes) => Some(bytes.as_slice()),
            Node::List(elements) => match elements.as_slice() {
                [Node::Atom(bytes)] => Some(bytes.as_slice()),
                _ => None,
            },
        }
    }

    /// Direct children, `None` for a plain atom
    pub fn elements(&self) -> Option<&[Node]> {
        match self {
            Node::Atom(_) => None,
            Node::List(elements) => Some(elements.as_slice()),
        }
    }

    /// Memory footprint: atom bytes plus [`NODE_OVERHEAD`] per node
    pub fn size(&self) -> usize {
        self.descendants()
            .map(|node| match node {
                Node::Atom(bytes) => NODE_OVERHEAD + bytes.len(),
                Node::List(_) => NODE_OVERHEAD,
            })
            .sum()
    }

    /// Nesting depth, 0 for a plain atom
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];
        while let Some((node, level)) = pending.pop() {
            if let Node::List(elements) = node {
                deepest = deepest.max(level + 1);
                pending.extend(elements.iter().map(|child| (child, level + 1)));
            }
        }
        deepest
    }

    pub fn node_count(&self) -> usize {
        self.descendants().count()
    }

    /// This node and everything below it, in pre-order
    fn descendants(&self) -> impl Iterator<Item = &Node> {
        let mut pending = vec![self];
        std::iter::from_fn(move || {
            let node = pending.pop()?;
            if let Node::List(elements) = node {
                pending.extend(elements.iter().rev());
            }
            Some(node)
        })
    }

    /// Render as canonical text that parses back to an equal tree
    pub fn to_canonical(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        for fragment in self.fragments() {
            match fragment {
                Fragment::Atom(bytes) => out.extend_from_slice(bytes),
                Fragment::Open => out.push(b'('),
                Fragment::Space => out.push(b' '),
                Fragment::Close => out.push(b')'),
            }
        }
        out
    }

    fn fragments(&self) -> Fragments<'_> {
        Fragments {
            pending: vec![Step::Node(self)],
        }
    }

    /// Convert to a pretty-printed string with indentation
    pub fn to_pretty_string(&self, indent: usize) -> String {
        match self {
            Node::Atom(bytes) => display_atom(bytes),
            Node::List(elements) => {
                if elements.is_empty() {
                    "()".to_string()
                } else if elements.len() == 1 {
                    format!("({})", elements[0].to_pretty_string(indent))
                } else {
                    let mut result = String::from("(");
                    for (i, element) in elements.iter().enumerate() {
                        if i > 0 {
                            result.push('\n');
                            result.push_str(&" ".repeat(indent + 1));
                        }
                        result.push_str(&element.to_pretty_string(indent + 1));
                    }
                    result.push(')');
                    result
                }
            }
        }
    }
}

fn is_printable(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| b.is_ascii_graphic())
}

/// Printable atoms as text, anything else as `#hex#`
pub(crate) fn display_atom(bytes: &[u8]) -> String {
    if is_printable(bytes) {
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        format!("#{}#", hex::encode(bytes))
    }
}

/// Text pieces of the canonical layout
enum Fragment<'a> {
    Atom(&'a [u8]),
    Open,
    Space,
    Close,
}

enum Step<'a> {
    Node(&'a Node),
    Space,
    Close,
}

/// Walks a tree in rendering order with an explicit stack
struct Fragments<'a> {
    pending: Vec<Step<'a>>,
}

impl<'a> Iterator for Fragments<'a> {
    type Item = Fragment<'a>;

    fn next(&mut self) -> Option<Fragment<'a>> {
        let fragment = match self.pending.pop()? {
            Step::Node(Node::Atom(bytes)) => Fragment::Atom(bytes.as_slice()),
            Step::Node(Node::List(elements)) => {
                self.pending.push(Step::Close);
                for (i, element) in elements.iter().enumerate().rev() {
                    self.pending.push(Step::Node(element));
                    if i > 0 {
                        self.pending.push(Step::Space);
                    }
                }
                Fragment::Open
            }
            Step::Space => Fragment::Space,
            Step::Close => Fragment::Close,
        };
        Some(fragment)
    }
}

/// Children are unlinked onto a work list so dropping a deep tree never
/// recurses more than one level
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = match self {
            Node::List(elements) if elements.iter().any(|e| matches!(e, Node::List(_))) => {
                std::mem::take(elements)
            }
            _ => return,
        };
        while let Some(mut node) = pending.pop() {
            if let Node::List(elements) = &mut node {
                pending.append(elements);
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in self.fragments() {
            match fragment {
                Fragment::Atom(bytes) => f.write_str(&display_atom(bytes))?,
                Fragment::Open => f.write_str("(")?,
                Fragment::Space => f.write_str(" ")?,
                Fragment::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Atom(bytes) => serializer.serialize_str(&display_atom(bytes)),
            Node::List(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
        }
    }
}
