//! Basic usage examples for the canonical S-expression library

use gcr_sexp::{ErrorKind, Result, SexpBuilder, SymbolicExpression};

fn main() -> Result<()> {
    // Example 1: Parsing
    println!("=== Example 1: Parsing ===");
    let key = SymbolicExpression::parse(b"(public-key (rsa (n #00b1c3#) (e #010001#)))")?;
    println!("Parsed: {}", key);
    println!("Pretty printed:\n{}", key.to_pretty_string());
    println!("Footprint: {} bytes", key.size());
    println!();

    // Example 2: Positional navigation
    println!("=== Example 2: Navigation ===");
    println!("car: {}", key.car()?);
    let rsa = key.get(1)?;
    println!("algorithm: {}", rsa.car()?);
    for (i, element) in rsa.iter().enumerate() {
        println!("  [{}] {}", i, element);
    }
    println!();

    // Example 3: Named fields
    println!("=== Example 3: Named Fields ===");
    println!("n = {}", rsa.lookup("n")?);
    println!("e = {}", rsa.lookup("e")?);
    match rsa.lookup("d") {
        Err(e) if e.is(ErrorKind::SexpNil) => println!("d is absent: {}", e),
        other => println!("unexpected: {:?}", other),
    }
    println!();

    // Example 4: Building new trees
    println!("=== Example 4: Building ===");
    let built = SexpBuilder::new()
        .atom("data")
        .field("flags", "raw")
        .field("value", "#0badc0de#")
        .build()?;
    println!("Built: {}", built);
    let updated = built.with_field("flags", "pkcs1")?;
    println!("Updated copy: {}", updated);
    println!("Original kept: {}", built);
    println!();

    // Example 5: Rejected input
    println!("=== Example 5: Errors ===");
    for input in ["a", "(a", "", "(a(b))"] {
        match SymbolicExpression::parse(input) {
            Ok(sexp) => println!("{:?} parsed as {}", input, sexp),
            Err(e) => println!("{:?} -> {}: {}", input, e.kind(), e),
        }
    }

    Ok(())
}
