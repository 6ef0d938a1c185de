use gcr_sexp::{Element, ErrorKind, SymbolicExpression};

const SCENARIO: &[u8] = b"(a b (c d) ((e f) g h))";

#[test]
fn test_scenario_navigation() {
    let sexp = SymbolicExpression::parse(SCENARIO).unwrap();

    assert_eq!(sexp.len().unwrap(), 4);
    assert_eq!(sexp.car().unwrap(), b"a");

    let third = sexp.get(2).unwrap();
    assert!(third.is_list());
    assert_eq!(third.len().unwrap(), 2);
    assert_eq!(third.get(0).unwrap(), b"c");

    let head = sexp.get(3).unwrap().get(0).unwrap();
    assert!(head.is_list());
    assert_eq!(head.len().unwrap(), 2);
}

#[test]
fn test_car_and_cdr_are_bytes_for_atoms() {
    let sexp = SymbolicExpression::parse(b"(a brown (fox jumping) ((lazy dog) over the))").unwrap();

    let car = sexp.car().unwrap();
    let cdr = sexp.cdr().unwrap();
    assert_eq!(car, Element::Bytes(b"a"));
    assert_eq!(cdr.as_bytes(), Some(&b"brown"[..]));

    let fox = sexp.get(2).unwrap();
    assert_eq!(fox.car().unwrap(), b"fox");
    assert_eq!(fox.cdr().unwrap(), b"jumping");

    let lazy = sexp.get(3).unwrap().car().unwrap();
    assert!(lazy.as_expr().is_some());
    assert_eq!(lazy.as_expr().unwrap().cdr().unwrap(), b"dog");
}

#[test]
fn test_iteration_yields_views() {
    let sexp = SymbolicExpression::parse(b"(a brown (fox jumping) ((lazy dog) over the))").unwrap();
    let mut lengths = Vec::new();
    for exp in &sexp {
        lengths.push(exp.iter().count());
    }
    // Plain atoms iterate as empty
    assert_eq!(lengths, vec![0, 0, 2, 3]);
}

#[test]
fn test_named_lookup_on_key() {
    let sexp = SymbolicExpression::parse(b"(rsa (n 1) (e 2))").unwrap();
    assert_eq!(sexp.lookup("n").unwrap(), b"1");
    assert_eq!(sexp.lookup(b"e").unwrap(), b"2");

    let err = sexp.lookup("z").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SexpNil);
    assert!(err.is(ErrorKind::Sexp));
}

#[test]
fn test_named_lookup_returns_sub_expression() {
    let sexp =
        SymbolicExpression::parse(b"(key-data (public-key (ecc (curve Ed25519) (q #3b6a#))))")
            .unwrap();
    let public = sexp.lookup("public-key").unwrap().as_expr().unwrap();
    assert_eq!(public.car().unwrap(), b"ecc");
    assert_eq!(public.lookup("curve").unwrap(), b"Ed25519");
}

#[test]
fn test_single_element_list_flattening() {
    let sexp = SymbolicExpression::parse(b"(a)").unwrap();
    assert!(sexp.is_atom());
    assert_eq!(sexp.view(), b"a");

    let nested = SymbolicExpression::parse(b"((a))").unwrap();
    assert!(!nested.is_atom());
    assert_eq!(nested.car().unwrap(), b"a");
    assert_eq!(nested.cdr().unwrap_err().kind(), ErrorKind::SexpOutOfBoundary);
}

#[test]
fn test_nil_policy() {
    let nil = SymbolicExpression::parse(b"()").unwrap();
    assert!(nil.is_nil());
    assert!(nil.is_atom());
    assert_eq!(nil.len().unwrap(), 0);
    assert_eq!(nil.iter().count(), 0);
    assert_eq!(nil.car().unwrap_err().kind(), ErrorKind::SexpNil);
    assert_eq!(nil.lookup("n").unwrap_err().kind(), ErrorKind::SexpNil);
}

#[test]
fn test_size_is_compositional() {
    let sexp = SymbolicExpression::parse(SCENARIO).unwrap();
    let children: usize = sexp.iter().map(|c| c.size()).sum();
    assert_eq!(sexp.size(), children + gcr_sexp::NODE_OVERHEAD);

    let longer = SymbolicExpression::parse(b"(a b (c d) ((e f) g hhhh))").unwrap();
    assert_eq!(longer.size(), sexp.size() + 3);
}
