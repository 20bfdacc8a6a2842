//! Operator registry.
//!
//! Maps operator lexemes to fixity, precedence, and associativity. The
//! parser installs user `operator` declarations here *before* the operator
//! is first used in an expression; precedence lookups during Pratt parsing
//! consult the same table.

use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorFixity {
    Infix,
    Prefix,
    Postfix,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfixInfo {
    pub precedence: u32,
    pub associativity: Associativity,
}

#[derive(Clone, Copy, Debug, Default)]
struct OperatorEntry {
    infix: Option<InfixInfo>,
    prefix: bool,
    postfix: bool,
}

/// Precedence of the ternary conditional and of assignment.
pub const ASSIGNMENT_PRECEDENCE: u32 = 90;
/// Precedence of `is` / `as`.
pub const CAST_PRECEDENCE: u32 = 132;

#[derive(Clone, Debug, Default)]
pub struct OperatorRegistry {
    entries: FxHashMap<String, OperatorEntry>,
}

impl OperatorRegistry {
    /// An empty registry with no operators at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The default operator table of the language.
    #[must_use]
    pub fn with_builtins() -> Self {
        use Associativity::{Left, None, Right};
        let mut r = Self::new();

        // Assignment and compound assignment
        for op in [
            "=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", "&=", "|=", "&&=", "||=",
        ] {
            r.insert_infix(op, Right, ASSIGNMENT_PRECEDENCE);
        }
        // Arithmetic
        r.insert_infix("+", Left, 140);
        r.insert_infix("-", Left, 140);
        r.insert_infix("*", Left, 150);
        r.insert_infix("/", Left, 150);
        r.insert_infix("%", Left, 150);
        // Overflow arithmetic
        r.insert_infix("&+", Left, 140);
        r.insert_infix("&-", Left, 140);
        r.insert_infix("&*", Left, 150);
        r.insert_infix("&/", Left, 150);
        r.insert_infix("&%", Left, 150);
        // Comparison and identity
        for op in ["==", "!=", "===", "!==", "~=", "<", ">", "<=", ">="] {
            r.insert_infix(op, None, 130);
        }
        // Ranges
        r.insert_infix("..", None, 135);
        r.insert_infix("...", None, 135);
        // Logic
        r.insert_infix("&&", Left, 120);
        r.insert_infix("||", Left, 110);
        // Bitwise
        r.insert_infix("&", Left, 150);
        r.insert_infix("|", Left, 140);
        r.insert_infix("^", Left, 140);
        r.insert_infix("<<", None, 160);
        r.insert_infix(">>", None, 160);
        // Unary
        for op in ["-", "+", "!", "~", "&"] {
            r.insert_prefix(op);
        }
        r.insert_prefix("++");
        r.insert_postfix("++");
        r.insert_prefix("--");
        r.insert_postfix("--");

        r
    }

    fn insert_infix(&mut self, name: &str, associativity: Associativity, precedence: u32) {
        self.entries.entry(name.to_string()).or_default().infix = Some(InfixInfo {
            precedence,
            associativity,
        });
    }

    fn insert_prefix(&mut self, name: &str) {
        self.entries.entry(name.to_string()).or_default().prefix = true;
    }

    fn insert_postfix(&mut self, name: &str) {
        self.entries.entry(name.to_string()).or_default().postfix = true;
    }

    /// Register a user-declared operator. Returns `false` when the operator
    /// already has a declaration for that fixity.
    pub fn register(
        &mut self,
        name: &str,
        fixity: OperatorFixity,
        associativity: Associativity,
        precedence: u32,
    ) -> bool {
        let entry = self.entries.entry(name.to_string()).or_default();
        match fixity {
            OperatorFixity::Infix => {
                if entry.infix.is_some() {
                    return false;
                }
                entry.infix = Some(InfixInfo {
                    precedence,
                    associativity,
                });
            }
            OperatorFixity::Prefix => {
                if entry.prefix {
                    return false;
                }
                entry.prefix = true;
            }
            OperatorFixity::Postfix => {
                if entry.postfix {
                    return false;
                }
                entry.postfix = true;
            }
        }
        true
    }

    #[must_use]
    pub fn lookup_infix(&self, name: &str) -> Option<InfixInfo> {
        self.entries.get(name).and_then(|e| e.infix)
    }

    #[must_use]
    pub fn is_prefix(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|e| e.prefix)
    }

    #[must_use]
    pub fn is_postfix(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|e| e.postfix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_matches_the_documented_precedences() {
        let r = OperatorRegistry::with_builtins();
        assert_eq!(r.lookup_infix("+").unwrap().precedence, 140);
        assert_eq!(r.lookup_infix("*").unwrap().precedence, 150);
        assert_eq!(r.lookup_infix("==").unwrap().precedence, 130);
        assert_eq!(r.lookup_infix("=").unwrap().associativity, Associativity::Right);
        assert_eq!(r.lookup_infix("<<").unwrap().associativity, Associativity::None);
        assert!(r.is_prefix("!"));
        assert!(r.is_postfix("++"));
    }

    #[test]
    fn redefinition_is_rejected_per_fixity() {
        let mut r = OperatorRegistry::with_builtins();
        assert!(!r.register("+", OperatorFixity::Infix, Associativity::Left, 140));
        assert!(r.register("**", OperatorFixity::Infix, Associativity::Right, 160));
        assert!(!r.register("**", OperatorFixity::Infix, Associativity::Right, 160));
        // A new fixity for an existing operator is fine.
        assert!(r.register("**", OperatorFixity::Prefix, Associativity::None, 0));
    }
}
