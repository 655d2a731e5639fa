//! Reader for the parenthesised statement tree notation, e.g.
//! `(SELECT (COLUMNS (COLUMN name)) (FROM (TABLE students)))`.
//! Atoms are bare tokens or double-quoted strings; inside quotes `\"` and
//! `\\` stand for a quote and a backslash.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0, none_of, one_of},
    combinator::{all_consuming, map},
    multi::many0,
    sequence::{delimited, preceded, terminated},
};

use crate::error::{DbError, DbResult};
use crate::sql::tree::StatementNode;

fn is_atom_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')' && c != '"'
}

fn quoted(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        many0(alt((none_of("\\\""), preceded(char('\\'), one_of("\\\""))))),
        char('"'),
    )
    .map(|chars: Vec<char>| chars.into_iter().collect::<String>())
    .parse(input)
}

fn atom(input: &str) -> IResult<&str, String> {
    alt((quoted, map(take_while1(is_atom_char), String::from))).parse(input)
}

fn node(input: &str) -> IResult<&str, StatementNode> {
    preceded(
        multispace0,
        alt((
            map(
                delimited(
                    char('('),
                    (preceded(multispace0, atom), many0(node)),
                    preceded(multispace0, char(')')),
                ),
                |(kind, branches): (String, Vec<StatementNode>)| StatementNode::new(kind, branches),
            ),
            map(atom, StatementNode::leaf),
        )),
    )
    .parse(input)
}

/// Read exactly one statement tree from `input`.
pub fn parse_tree(input: &str) -> DbResult<StatementNode> {
    all_consuming(terminated(node, multispace0))
        .parse(input)
        .map(|(_, tree)| tree)
        .map_err(|e| DbError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_select() {
        let tree = parse_tree(
            "(SELECT (COLUMNS (DISTINCT (COLUMN students.name))) (FROM (TABLE students)))",
        )
        .unwrap();
        assert_eq!(tree.kind, "SELECT");
        assert_eq!(tree.branches.len(), 2);
        let distinct = tree.branch("COLUMNS").and_then(|c| c.first_child()).unwrap();
        assert!(distinct.is("DISTINCT"));
        let leaf = distinct.first_child().and_then(|c| c.first_child()).unwrap();
        assert_eq!(leaf.kind, "students.name");
        assert!(leaf.is_leaf());
    }

    #[test]
    fn quoted_atoms_keep_spaces() {
        let tree = parse_tree("  (VALUES 1 \"Ann Lee\" \"\")\n").unwrap();
        let texts: Vec<_> = tree.branches.iter().map(|b| b.kind.as_str()).collect();
        assert_eq!(texts, vec!["1", "Ann Lee", ""]);
    }

    #[test]
    fn display_reads_back() {
        let text = "(INSERT (TABLE t) (ATTRIBUTES a b) (VALUES 1 \"x y\"))";
        let tree = parse_tree(text).unwrap();
        assert_eq!(tree.to_string(), text);
        assert_eq!(parse_tree(&tree.to_string()).unwrap(), tree);
    }

    #[test]
    fn escaped_quotes_read_back() {
        let tree = parse_tree(r#"(VALUES "say \"hi\"" "a\\b")"#).unwrap();
        let texts: Vec<_> = tree.branches.iter().map(|b| b.kind.as_str()).collect();
        assert_eq!(texts, vec![r#"say "hi""#, r"a\b"]);
        assert_eq!(parse_tree(&tree.to_string()).unwrap(), tree);
    }

    #[test]
    fn rejects_unbalanced_input() {
        assert!(matches!(parse_tree("(SELECT (COLUMNS"), Err(DbError::ParseError(_))));
        assert!(matches!(parse_tree("(DROP (TABLE t)))"), Err(DbError::ParseError(_))));
        assert!(matches!(parse_tree(""), Err(DbError::ParseError(_))));
    }
}
