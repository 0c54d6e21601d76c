use crate::sorts::SmtSort;
use crate::terms::SmtTerm;

/// Print an SmtTerm as SMT-LIB2 format.
pub fn to_smtlib(term: &SmtTerm) -> String {
    match term {
        SmtTerm::Var(name) => name.clone(),
        SmtTerm::IntLit(n) => {
            if *n < 0 {
                format!("(- {})", n.unsigned_abs())
            } else {
                n.to_string()
            }
        }
        SmtTerm::Add(lhs, rhs) => binary("+", lhs, rhs),
        SmtTerm::Sub(lhs, rhs) => binary("-", lhs, rhs),
        SmtTerm::Eq(lhs, rhs) => binary("=", lhs, rhs),
        SmtTerm::Lt(lhs, rhs) => binary("<", lhs, rhs),
        SmtTerm::Le(lhs, rhs) => binary("<=", lhs, rhs),
        SmtTerm::Gt(lhs, rhs) => binary(">", lhs, rhs),
        SmtTerm::Ge(lhs, rhs) => binary(">=", lhs, rhs),
        SmtTerm::And(terms) => nary("and", "true", terms),
        SmtTerm::Or(terms) => nary("or", "false", terms),
        SmtTerm::Not(inner) => format!("(not {})", to_smtlib(inner)),
        SmtTerm::Ite(cond, then, els) => format!(
            "(ite {} {} {})",
            to_smtlib(cond),
            to_smtlib(then),
            to_smtlib(els)
        ),
    }
}

fn binary(op: &str, lhs: &SmtTerm, rhs: &SmtTerm) -> String {
    format!("({op} {} {})", to_smtlib(lhs), to_smtlib(rhs))
}

fn nary(op: &str, empty: &str, terms: &[SmtTerm]) -> String {
    match terms {
        [] => empty.to_string(),
        [single] => to_smtlib(single),
        _ => {
            let inner: Vec<String> = terms.iter().map(to_smtlib).collect();
            format!("({op} {})", inner.join(" "))
        }
    }
}

/// `(declare-fun name () Sort)` for a constant.
pub fn declaration_to_smtlib(name: &str, sort: SmtSort) -> String {
    format!("(declare-fun {name} () {})", sort.smtlib_name())
}
