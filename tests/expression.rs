use rand::Rng;
use std::collections::HashMap;
use yanbee::{evaluate_expression, parse, Error, EvalError, Evaluator, LexError, ParseError};

fn no_bindings() -> HashMap<String, f64> {
    HashMap::new()
}

fn eval(input: &str) -> Result<f64, Error> {
    evaluate_expression(input, &no_bindings())
}

#[test]
fn numerals_evaluate_to_their_value() {
    let mut rng = rand::rng();
    for _ in 0..500 {
        let whole: u64 = rng.random_range(0..1_000_000_000);
        let numeral = if rng.random_bool(0.5) {
            format!("{}.{:03}", whole, rng.random_range(0..1000u32))
        } else {
            whole.to_string()
        };
        let expected: f64 = numeral.parse().unwrap();
        assert_eq!(eval(&numeral).unwrap(), expected, "numeral {}", numeral);
    }
    assert_eq!(eval("007").unwrap(), 7.0);
    assert_eq!(eval("0.5").unwrap(), 0.5);
}

#[test]
fn arithmetic_follows_precedence() {
    assert_eq!(eval("2+3*4").unwrap(), 14.0);
    assert_eq!(eval("(2+3)*4").unwrap(), 20.0);
    assert_eq!(eval("2^3^2").unwrap(), 512.0);
    assert_eq!(eval("(2^3)^2").unwrap(), 64.0);
    assert_eq!(eval("1 + 2 * 3 ^ 2 / 6 - 1").unwrap(), 3.0);
}

#[test]
fn unary_minus_chains() {
    assert_eq!(eval("-3").unwrap(), -3.0);
    assert_eq!(eval("- -3").unwrap(), 3.0);
    assert_eq!(eval("--3").unwrap(), eval("- -3").unwrap());
    assert_eq!(eval("---3").unwrap(), -3.0);
    assert_eq!(eval("4 - -3").unwrap(), 7.0);
}

#[test]
fn functions_need_parentheses() {
    assert_eq!(
        eval("sin 0").unwrap_err(),
        Error::Parse(ParseError::ExpectedOpenParen {
            function: "sin".to_string(),
            found: "0".to_string(),
        })
    );
    assert_eq!(eval("sin(0)").unwrap(), 0.0);
    assert_eq!(eval("abs(sign(-3) * 2)").unwrap(), 2.0);
}

#[test]
fn variables_come_from_bindings() {
    let bindings = HashMap::from([("x".to_string(), 4.0)]);
    assert_eq!(evaluate_expression("x+1", &bindings).unwrap(), 5.0);
    assert_eq!(
        eval("x+1").unwrap_err(),
        Error::Eval(EvalError::UndefinedVariable {
            name: "x".to_string()
        })
    );
}

#[test]
fn constants_take_priority_over_bindings() {
    let bindings = HashMap::from([("PI".to_string(), 0.0), ("E".to_string(), 0.0)]);
    assert_eq!(
        evaluate_expression("PI", &bindings).unwrap(),
        std::f64::consts::PI
    );
    assert!(parse("PI + E").unwrap().variables().is_empty());
}

#[test]
fn unbalanced_parentheses_are_rejected() {
    for input in ["(1+2", "1+2)", "((1)", "sin(1", "1)+(2"] {
        assert_eq!(
            eval(input).unwrap_err(),
            Error::Parse(ParseError::UnbalancedParentheses),
            "input {}",
            input
        );
    }
}

#[test]
fn trailing_operators_are_rejected() {
    for input in ["2++", "2+", "2*-", "(3^)"] {
        assert!(
            matches!(
                eval(input),
                Err(Error::Parse(ParseError::MissingOperand { .. }))
            ),
            "input {}",
            input
        );
    }
}

#[test]
fn invalid_characters_are_lex_errors() {
    assert_eq!(
        eval("2 $ 3").unwrap_err(),
        Error::Lex(LexError::InvalidSequence {
            remainder: " $ 3".to_string()
        })
    );
    assert!(matches!(eval("x.y"), Err(Error::Lex(_))));
}

#[test]
fn nan_results_fail() {
    assert_eq!(
        eval("sqrt(0 - 4)").unwrap_err(),
        Error::Eval(EvalError::NotANumber)
    );
}

#[test]
fn parsed_tree_is_reusable() {
    let expression = parse("a * x ^ 2 + b").unwrap();
    let rows: Vec<HashMap<&str, f64>> = (1..=10)
        .map(|x| HashMap::from([("a", 2.0), ("b", 1.0), ("x", x as f64)]))
        .collect();

    let sequential: Vec<f64> = rows
        .iter()
        .map(|row| expression.evaluate(row).unwrap())
        .collect();
    let parallel: Vec<f64> = expression
        .evaluate_batch(&rows)
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(sequential, parallel);
    assert_eq!(sequential[2], 19.0);
    assert_eq!(expression.evaluate(&rows[2]).unwrap(), 19.0);
}

#[test]
fn evaluator_shares_cached_trees_across_threads() {
    let mut evaluator = Evaluator::new(8);
    let tree = evaluator.parse_expression("x / 2").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tree = tree.clone();
            std::thread::spawn(move || {
                let bindings = HashMap::from([("x".to_string(), i as f64 * 2.0)]);
                tree.evaluate(&bindings).unwrap()
            })
        })
        .collect();

    let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(evaluator.cached_len(), 1);
}
