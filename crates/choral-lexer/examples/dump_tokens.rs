use std::io::Read;

use choral_lexer::choral;

fn main() {
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source).unwrap();

    let grammar = choral::grammar();
    println!("=== Tokens ===");
    for tok in grammar.lex(&source) {
        println!("{:?}", tok);
    }
}
