use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let expression = "-G * t ^ 2 / 2 + v * t";
    let ast = yanbee::parse(expression).expect("Failed to parse");
    println!("Parsed: {}", ast);
    println!("Variables: {:?}", ast.variables());

    for t in 0..5 {
        let context: HashMap<&str, f64> = HashMap::from([("t", t as f64), ("v", 20.0)]);
        match yanbee::evaluate(&ast, &context) {
            Ok(result) => println!("t = {}: {}", t, result),
            Err(err) => println!("t = {}: error: {}", t, err),
        }
    }
}
