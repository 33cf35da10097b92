/// Priority of every non-operator node. Lower than any operator priority, so an
/// upward walk always stops at a group boundary.
pub const NO_PRIORITY: i32 = -1;

/// A binary operator. `left_prior` is compared against ancestors when the
/// operator extends an existing left operand; `right_prior` is stored on the
/// tree node and is what later operators compare against.
#[derive(Debug)]
pub struct Operator {
    pub token: char,
    pub func: fn(f64, f64) -> f64,
    pub left_prior: i32,
    pub right_prior: i32,
    /// `+` and `-` may appear without a left operand, which then counts as `0`.
    pub can_be_unary: bool,
}

impl Operator {
    /// Applies the operator; a missing left operand is only accepted for
    /// unary-capable operators.
    pub fn apply(&self, left: Option<f64>, right: f64) -> Option<f64> {
        match left {
            Some(left) => Some((self.func)(left, right)),
            None if self.can_be_unary => Some((self.func)(0.0, right)),
            None => None,
        }
    }
}

static OPERATORS: [Operator; 5] = [
    Operator {
        token: '+',
        func: |x, y| x + y,
        left_prior: 0,
        right_prior: 0,
        can_be_unary: true,
    },
    Operator {
        token: '-',
        func: |x, y| x - y,
        left_prior: 0,
        right_prior: 0,
        can_be_unary: true,
    },
    Operator {
        token: '*',
        func: |x, y| x * y,
        left_prior: 1,
        right_prior: 1,
        can_be_unary: false,
    },
    Operator {
        token: '/',
        func: |x, y| x / y,
        left_prior: 1,
        right_prior: 1,
        can_be_unary: false,
    },
    // left_prior > right_prior makes `^` right-associative
    Operator {
        token: '^',
        func: f64::powf,
        left_prior: 3,
        right_prior: 2,
        can_be_unary: false,
    },
];

pub fn operators() -> &'static [Operator] {
    &OPERATORS
}

/// Finds the operator spelled by `token`, which must be a single character.
pub fn lookup_operator(token: &str) -> Option<&'static Operator> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => OPERATORS.iter().find(|op| op.token == c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_operator() {
        let pow = lookup_operator("^").unwrap();
        assert_eq!(pow.left_prior, 3);
        assert_eq!(pow.right_prior, 2);
        assert!(!pow.can_be_unary);
        assert_eq!((pow.func)(2.0, 10.0), 1024.0);

        assert!(lookup_operator("-").unwrap().can_be_unary);
        assert!(lookup_operator("").is_none());
        assert!(lookup_operator("**").is_none());
    }

    #[test]
    fn test_apply_missing_left() {
        let minus = lookup_operator("-").unwrap();
        assert_eq!(minus.apply(None, 3.0), Some(-3.0));
        assert_eq!(minus.apply(Some(10.0), 3.0), Some(7.0));

        let times = lookup_operator("*").unwrap();
        assert_eq!(times.apply(None, 3.0), None);
    }

    #[test]
    fn test_priorities_are_above_sentinel() {
        for op in operators() {
            assert!(op.left_prior > NO_PRIORITY);
            assert!(op.right_prior > NO_PRIORITY);
        }
    }
}
