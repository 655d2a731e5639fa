use std::fmt;

/// A node of a parsed statement. Inner nodes name a clause (`SELECT`,
/// `COLUMNS`, `FROM`, ...); leaves carry user text in `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementNode {
    pub kind: String,
    pub branches: Vec<StatementNode>,
}

impl StatementNode {
    pub fn new(kind: impl Into<String>, branches: Vec<StatementNode>) -> Self {
        StatementNode { kind: kind.into(), branches }
    }

    pub fn leaf(kind: impl Into<String>) -> Self {
        StatementNode::new(kind, Vec::new())
    }

    pub fn first_child(&self) -> Option<&StatementNode> {
        self.branches.first()
    }

    pub fn is_leaf(&self) -> bool {
        self.branches.is_empty()
    }

    /// Case-insensitive kind comparison.
    pub fn is(&self, kind: &str) -> bool {
        self.kind.eq_ignore_ascii_case(kind)
    }

    /// First immediate child of the given kind.
    pub fn branch(&self, kind: &str) -> Option<&StatementNode> {
        self.branches.iter().find(|b| b.is(kind))
    }
}

fn needs_quotes(text: &str) -> bool {
    text.is_empty() || text.chars().any(|c| c.is_whitespace() || c == '(' || c == ')' || c == '"')
}

impl fmt::Display for StatementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            if needs_quotes(&self.kind) {
                let escaped = self.kind.replace('\\', "\\\\").replace('"', "\\\"");
                return write!(f, "\"{}\"", escaped);
            }
            return f.write_str(&self.kind);
        }
        write!(f, "({}", self.kind)?;
        for branch in &self.branches {
            write!(f, " {}", branch)?;
        }
        f.write_str(")")
    }
}
