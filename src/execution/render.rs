use std::io::Write;

use crate::config::{EngineConfig, OverflowPolicy, DEFAULT_CELL_WIDTH};
use crate::error::{DbError, DbResult};
use crate::execution::projection::{ProjectionDescriptor, WILDCARD};
use crate::storage::row::{display_name, ColumnType, ColumnValue, Row};

/// Fixed-width, left-justified text rendering of result rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    pub cell_width: usize,
    pub overflow: OverflowPolicy,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer { cell_width: DEFAULT_CELL_WIDTH, overflow: OverflowPolicy::Grow }
    }
}

impl Renderer {
    pub fn new(cell_width: usize, overflow: OverflowPolicy) -> Self {
        Renderer { cell_width, overflow }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Renderer::new(config.cell_width, config.overflow)
    }

    fn cell(&self, text: &str) -> String {
        match self.overflow {
            OverflowPolicy::Truncate if text.chars().count() > self.cell_width => {
                text.chars().take(self.cell_width).collect()
            }
            _ => format!("{:<width$}", text, width = self.cell_width),
        }
    }

    /// Header line. A wildcard expands to the sample row's fields with any
    /// `table#` qualifier stripped.
    pub fn render_header(&self, sample: &Row, headers: &[String]) -> String {
        if headers.first().is_some_and(|h| h == WILDCARD) {
            return sample
                .schema()
                .field_names()
                .map(|name| self.cell(display_name(name)))
                .collect();
        }
        headers.iter().map(|h| self.cell(h)).collect()
    }

    /// One row line. Each value is rendered according to the type its
    /// schema declares for the field.
    pub fn render_row(&self, row: &Row, columns: &[String]) -> DbResult<String> {
        let wildcard = columns.first().is_some_and(|c| c == WILDCARD);
        let schema = row.schema();
        let fields: Vec<&str> = if wildcard {
            schema.field_names().collect()
        } else {
            columns.iter().map(String::as_str).collect()
        };
        let mut line = String::new();
        for field in fields {
            let text = match (schema.field_type(field)?, row.get(field)?) {
                (ColumnType::Int, ColumnValue::Integer(i)) => i.to_string(),
                (ColumnType::Str20, ColumnValue::Text(s)) => s.clone(),
                (ty, value) => {
                    return Err(DbError::InvalidValue(format!(
                        "field '{}' declared {} holds '{}'",
                        field,
                        ty.as_str(),
                        value
                    )))
                }
            };
            line.push_str(&self.cell(&text));
        }
        Ok(line)
    }

    /// Write the row count, header and rows. Writes nothing for an empty
    /// result, and nothing at all if any row fails to render.
    pub fn print_result<W: Write>(
        &self,
        rows: &[Row],
        projection: &ProjectionDescriptor,
        out: &mut W,
    ) -> DbResult<()> {
        let Some(sample) = rows.first() else {
            return Ok(());
        };
        let lines = rows
            .iter()
            .map(|row| self.render_row(row, &projection.columns))
            .collect::<DbResult<Vec<_>>>()?;
        writeln!(out, "Rows returned: {}", rows.len())?;
        writeln!(out, "{}", self.render_header(sample, &projection.headers))?;
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::row::RowSchema;
    use std::rc::Rc;

    fn student(name: &str, age: i32) -> Row {
        let schema = Rc::new(
            RowSchema::new(vec![("name".into(), ColumnType::Str20), ("age".into(), ColumnType::Int)]).unwrap(),
        );
        Row::new(schema, vec![ColumnValue::Text(name.into()), ColumnValue::Integer(age)]).unwrap()
    }

    fn projection(cols: &[&str]) -> ProjectionDescriptor {
        let cols: Vec<String> = cols.iter().map(|c| c.to_string()).collect();
        ProjectionDescriptor { headers: cols.clone(), columns: cols }
    }

    #[test]
    fn cells_are_padded() {
        let r = Renderer::default();
        let row = student("Ann", 20);
        assert_eq!(
            r.render_header(&row, &["name".into(), "age".into()]),
            "name              age               "
        );
        assert_eq!(
            r.render_row(&row, &["age".into(), "name".into()]).unwrap(),
            "20                Ann               "
        );
    }

    #[test]
    fn overflow_policies() {
        let row = student("Bartholomew", 19);
        let grow = Renderer::new(4, OverflowPolicy::Grow);
        assert_eq!(grow.render_row(&row, &["name".into()]).unwrap(), "Bartholomew");
        let cut = Renderer::new(4, OverflowPolicy::Truncate);
        assert_eq!(cut.render_row(&row, &["name".into(), "age".into()]).unwrap(), "Bart19  ");
    }

    #[test]
    fn wildcard_uses_schema_order() {
        let r = Renderer::new(6, OverflowPolicy::Grow);
        let row = student("Bo", 19);
        assert_eq!(r.render_header(&row, &["*".into()]), "name  age   ");
        assert_eq!(r.render_row(&row, &["*".into()]).unwrap(), "Bo    19    ");
    }

    #[test]
    fn unknown_column_is_an_error() {
        let r = Renderer::default();
        assert!(matches!(
            r.render_row(&student("Bo", 19), &["email".into()]),
            Err(DbError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let schema = Rc::new(RowSchema::new(vec![("age".into(), ColumnType::Int)]).unwrap());
        let row = Row::new(schema, vec![ColumnValue::Text("old".into())]).unwrap();
        assert!(matches!(
            Renderer::default().render_row(&row, &["age".into()]),
            Err(DbError::InvalidValue(_))
        ));
    }

    #[test]
    fn empty_result_prints_nothing() {
        let mut out = Vec::new();
        Renderer::default().print_result(&[], &projection(&["name"]), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn failed_row_prints_no_table() {
        let rows = vec![student("Ann", 20)];
        let mut out = Vec::new();
        let res = Renderer::default().print_result(&rows, &projection(&["name", "email"]), &mut out);
        assert!(matches!(res, Err(DbError::ColumnNotFound(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn printing_is_repeatable() {
        let rows = vec![student("Ann", 20), student("Bo", 19)];
        let p = projection(&["name", "age"]);
        let r = Renderer::default();
        let mut first = Vec::new();
        let mut second = Vec::new();
        r.print_result(&rows, &p, &mut first).unwrap();
        r.print_result(&rows, &p, &mut second).unwrap();
        assert_eq!(first, second);
        let text = String::from_utf8(first).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Rows returned: 2");
        assert_eq!(lines[2], "Ann               20                ");
        assert_eq!(lines[3], "Bo                19                ");
    }
}
