//! Shared helpers for integration tests

#![allow(dead_code)]

use artisan_merge::CraftBatch;
use artisan_merge::import::BatchImporter;
use sqlparser::ast::{Expr, SetExpr, Statement, Value};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;
use uuid::Uuid;

/// Deterministic id generator: 1, 2, 3, ...
pub fn sequential_ids() -> impl FnMut() -> Uuid {
    let mut next = 0u128;
    move || {
        next += 1;
        Uuid::from_u128(next)
    }
}

pub fn batch(source: &str, json: &str) -> CraftBatch {
    BatchImporter::new().import(source, json).unwrap()
}

/// Parse the script and count (DELETE, INSERT) statements
pub fn statement_kinds(sql: &str) -> (usize, usize) {
    let statements = Parser::parse_sql(&GenericDialect {}, sql).expect("emitted SQL must parse");
    let deletes = statements
        .iter()
        .filter(|s| matches!(s, Statement::Delete(_)))
        .count();
    let inserts = statements
        .iter()
        .filter(|s| matches!(s, Statement::Insert(_)))
        .count();
    assert_eq!(deletes + inserts, statements.len(), "unexpected statement kind");
    (deletes, inserts)
}

/// Value tuples of every INSERT statement, in order
///
/// String literals come back un-escaped by the parser; `null` becomes `None`.
pub fn value_rows(sql: &str) -> Vec<Vec<Option<String>>> {
    let statements = Parser::parse_sql(&GenericDialect {}, sql).expect("emitted SQL must parse");

    let mut rows = Vec::new();
    for statement in statements {
        let Statement::Insert(insert) = statement else {
            continue;
        };
        let source = insert.source.expect("INSERT must have a VALUES source");
        let SetExpr::Values(values) = *source.body else {
            panic!("INSERT source is not a VALUES list");
        };
        for tuple in values.rows {
            rows.push(tuple.iter().map(literal).collect());
        }
    }
    rows
}

fn literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Value(v) => match &v.value {
            Value::SingleQuotedString(s) => Some(s.clone()),
            Value::Null => None,
            other => panic!("unexpected literal {:?}", other),
        },
        other => panic!("unexpected expression {:?}", other),
    }
}
