// Use the library crate (whose name is defined in Cargo.toml)
use qlisp::run;

fn main() {
    let input = "eval (head {(+ 1 2) (+ 10 20)})";
    println!("Input:\n{}", input);

    match run(input) {
        Ok(value) => println!("{}", value),
        Err(e) => eprintln!("Parse Error: {}", e),
    }
}
