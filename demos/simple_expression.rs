use std::collections::HashMap;
use yanbee::Evaluator;

fn main() {
    pretty_env_logger::init();

    let contexts = vec![
        HashMap::from([("price".to_string(), 120.0), ("volume".to_string(), 3000.0)]),
        HashMap::from([("price".to_string(), 80.0), ("volume".to_string(), 6000.0)]),
    ];

    let expression = "price * volume / 1000 - sqrt(volume)";

    let mut evaluator = Evaluator::default();
    for (i, context) in contexts.iter().enumerate() {
        match evaluator.evaluate_expression(expression, context) {
            Ok(result) => println!("Result {}: {}", i, result),
            Err(err) => println!("Error {}: {}", i, err),
        }
    }
}
