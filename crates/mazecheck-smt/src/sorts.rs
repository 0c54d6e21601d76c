/// Sorts used by the grid encoding. Positions are the only declared
/// symbols, so every variable is an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmtSort {
    Int,
}

impl SmtSort {
    /// SMT-LIB2 sort symbol.
    pub fn smtlib_name(self) -> &'static str {
        match self {
            SmtSort::Int => "Int",
        }
    }
}

impl std::fmt::Display for SmtSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.smtlib_name())
    }
}
