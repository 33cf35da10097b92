/// A named single-argument function, called as `name(expr)`.
#[derive(Debug)]
pub struct Function {
    pub name: &'static str,
    pub func: fn(f64) -> f64,
}

impl Function {
    pub fn apply(&self, argument: f64) -> f64 {
        (self.func)(argument)
    }
}

static FUNCTIONS: [Function; 8] = [
    Function { name: "abs", func: f64::abs },
    Function { name: "sin", func: f64::sin },
    Function { name: "cos", func: f64::cos },
    Function { name: "atan", func: f64::atan },
    Function { name: "exp", func: f64::exp },
    Function { name: "sqrt", func: f64::sqrt },
    Function { name: "tg", func: f64::tan },
    Function { name: "sign", func: sign },
];

/// -1, 0 or 1. Unlike `f64::signum`, zero maps to itself and NaN stays NaN.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

pub fn functions() -> &'static [Function] {
    &FUNCTIONS
}

pub fn lookup_function(name: &str) -> Option<&'static Function> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_function() {
        assert_eq!(lookup_function("abs").unwrap().apply(-2.5), 2.5);
        assert_eq!(lookup_function("sqrt").unwrap().apply(16.0), 4.0);
        assert_eq!(lookup_function("tg").unwrap().apply(0.0), 0.0);
        assert!(lookup_function("tan").is_none());
        assert!(lookup_function("SIN").is_none());
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(12.0), 1.0);
        assert_eq!(sign(-0.5), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert!(sign(f64::NAN).is_nan());
    }
}
