//! Static symbol tables: the operators, functions and constants the
//! expression language recognizes.
//!
//! Every table is a fixed `static` slice, scanned linearly on lookup. Names are
//! unique within a table, so the first match is the only match.

pub mod constants;
pub mod math;
pub mod operators;

pub use constants::{constants, lookup_constant, Constant};
pub use math::{functions, lookup_function, Function};
pub use operators::{lookup_operator, operators, Operator, NO_PRIORITY};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_have_unique_names() {
        let mut names: Vec<&str> = functions().iter().map(|f| f.name).collect();
        names.extend(constants().iter().map(|c| c.name));
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);

        let mut tokens: Vec<char> = operators().iter().map(|op| op.token).collect();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), operators().len());
    }

    #[test]
    fn test_unknown_names_are_absent() {
        assert!(lookup_function("log").is_none());
        assert!(lookup_constant("pi").is_none());
        assert!(lookup_operator("%").is_none());
    }
}
