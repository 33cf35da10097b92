use std::collections::HashMap;
use yanbee::Evaluator;

fn main() {
    pretty_env_logger::init();

    let contexts: Vec<HashMap<String, f64>> = (0..10)
        .map(|i| HashMap::from([("x".to_string(), i as f64 - 5.0)]))
        .collect();

    let expression = "sqrt(x) + abs(x)";

    let mut evaluator = Evaluator::default();
    let results = evaluator
        .evaluate_batch(expression, &contexts)
        .expect("Failed to parse");
    for (i, result) in results.iter().enumerate() {
        println!("Result {}: {:?}", i, result);
    }
}
