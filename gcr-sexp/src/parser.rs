//! Parser for canonical S-expression text
//!
//! Single pass over the token stream with an explicit stack of open
//! lists, so nesting depth is bounded by memory rather than the call
//! stack. Input must be exactly one parenthesised list; `()` parses to
//! the nil node. Some tree operations still recurse, see [`Node`].

use crate::error::{GcrError, Result};
use crate::lexer::{Lexer, TokenKind};
use crate::node::Node;
use tracing::{debug, trace};

/// Caller-chosen parse limits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum list nesting depth, unlimited when `None`
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

pub struct Parser<'a> {
    input: &'a [u8],
    lexer: Lexer<'a>,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a [u8], options: ParseOptions) -> Self {
        Parser {
            input,
            lexer: Lexer::new(input),
            options,
        }
    }

    pub fn parse(mut self) -> Result<Node> {
        debug!(len = self.input.len(), "parsing s-expression");
        let result = self.parse_expression();
        if let Err(e) = &result {
            debug!(error = %e, "rejected s-expression");
        }
        result
    }

    fn parse_expression(&mut self) -> Result<Node> {
        let first = self
            .lexer
            .next()
            .ok_or_else(|| GcrError::format("empty input", 0))?;

        match first.kind {
            TokenKind::Open => {}
            TokenKind::Atom(_) => {
                return Err(GcrError::format(
                    "expression must be a parenthesised list",
                    first.offset,
                ))
            }
            TokenKind::Close => {
                return Err(GcrError::format("unexpected ')'", first.offset));
            }
            TokenKind::Whitespace => {
                return Err(GcrError::format(
                    "whitespace before expression",
                    first.offset,
                ))
            }
        }

        let mut stack: Vec<Vec<Node>> = Vec::new();
        self.open_list(&mut stack, first.offset)?;
        let mut max_depth = 1;
        // Set after a complete element; the next element needs a separator
        let mut needs_separator = false;

        loop {
            let token = match self.lexer.next() {
                Some(token) => token,
                None => {
                    return Err(GcrError::format(
                        format!("unbalanced parentheses: {} list(s) left open", stack.len()),
                        self.input.len(),
                    ))
                }
            };

            match token.kind {
                TokenKind::Whitespace => needs_separator = false,
                TokenKind::Open => {
                    if needs_separator {
                        return Err(GcrError::format(
                            "missing whitespace between elements",
                            token.offset,
                        ));
                    }
                    self.open_list(&mut stack, token.offset)?;
                    max_depth = max_depth.max(stack.len());
                }
                TokenKind::Atom(bytes) => {
                    if needs_separator {
                        return Err(GcrError::format(
                            "missing whitespace between elements",
                            token.offset,
                        ));
                    }
                    if let Some(current) = stack.last_mut() {
                        current.push(Node::Atom(bytes.to_vec()));
                    }
                    needs_separator = true;
                }
                TokenKind::Close => {
                    let elements = stack.pop().unwrap_or_default();
                    let node = Node::List(elements);
                    match stack.last_mut() {
                        Some(parent) => {
                            parent.push(node);
                            needs_separator = true;
                        }
                        None => {
                            if let Some(trailing) = self.lexer.next() {
                                return Err(GcrError::format(
                                    "trailing data after expression",
                                    trailing.offset,
                                ));
                            }
                            trace!(
                                depth = max_depth,
                                nodes = node.node_count(),
                                "parsed s-expression"
                            );
                            return Ok(node);
                        }
                    }
                }
            }
        }
    }

    fn open_list(&self, stack: &mut Vec<Vec<Node>>, offset: usize) -> Result<()> {
        if let Some(limit) = self.options.max_depth {
            if stack.len() >= limit {
                return Err(GcrError::format(
                    format!("nesting depth exceeds {}", limit),
                    offset,
                ));
            }
        }
        stack.push(Vec::new());
        Ok(())
    }
}

/// Convenience function to parse canonical S-expression text
pub fn parse(input: &[u8]) -> Result<Node> {
    Parser::new(input).parse()
}

pub fn parse_with_options(input: &[u8], options: ParseOptions) -> Result<Node> {
    Parser::with_options(input, options).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn atom(s: &str) -> Node {
        Node::atom(s)
    }

    #[test]
    fn test_parse_flat_list() {
        let node = parse(b"(a b c)").unwrap();
        assert_eq!(node, Node::List(vec![atom("a"), atom("b"), atom("c")]));
    }

    #[test]
    fn test_parse_nested() {
        let node = parse(b"(rsa (n #00b1#) (e #010001#))").unwrap();
        assert_eq!(
            node,
            Node::List(vec![
                atom("rsa"),
                Node::List(vec![atom("n"), atom("#00b1#")]),
                Node::List(vec![atom("e"), atom("#010001#")]),
            ])
        );
    }

    #[test]
    fn test_boundary_whitespace_is_discarded() {
        assert_eq!(parse(b"( a\n\tb  )").unwrap(), parse(b"(a b)").unwrap());
    }

    #[test]
    fn test_nil() {
        assert_eq!(parse(b"()").unwrap(), Node::nil());
        assert_eq!(parse(b"( )").unwrap(), Node::nil());
        assert_eq!(parse(b"(())").unwrap(), Node::List(vec![Node::nil()]));
    }

    #[test]
    fn test_format_errors() {
        let inputs: [&[u8]; 10] = [
            b"",
            b"a",
            b"(a",
            b"((a b)",
            b")",
            b"(a))",
            b"(a) (b)",
            b" (a)",
            b"(a(b))",
            b"((a)(b))",
        ];
        for input in inputs {
            let err = parse(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::SexpFormat, "input {:?}", input);
        }
    }

    #[test]
    fn test_unbalanced_offset_is_end_of_input() {
        let err = parse(b"(a (b c)").unwrap_err();
        assert_eq!(err.offset(), Some(8));
    }

    #[test]
    fn test_max_depth() {
        let options = ParseOptions::default().max_depth(2);
        assert!(parse_with_options(b"(a (b))", options).is_ok());
        let err = parse_with_options(b"(a (b (c)))", options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SexpFormat);
        assert_eq!(err.offset(), Some(6));
    }

    #[test]
    fn test_deep_nesting_without_limit() {
        let depth = 100_000;
        let mut input = vec![b'('; depth];
        input.push(b'x');
        input.extend(std::iter::repeat(b')').take(depth));

        let node = parse(&input).unwrap();
        assert_eq!(node.depth(), depth);
        assert_eq!(node.node_count(), depth + 1);
        assert_eq!(node.size(), (depth + 1) * crate::node::NODE_OVERHEAD + 1);
        drop(node);

        input.truncate(depth + 1);
        let err = parse(&input).unwrap_err();
        assert_eq!(err.offset(), Some(depth + 1));
    }
}
