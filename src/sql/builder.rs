//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for an entity's table.

use crate::models::Entity;
use crate::sql::FieldValue;

/// Quote identifier for PostgreSQL (safe: only from code).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: FieldValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn select_column_list<E: Entity>() -> String {
    E::COLUMNS
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row, no ordering.
pub fn select_all<E: Entity>() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", select_column_list::<E>(), quoted(E::TABLE));
    q
}

/// SELECT with `col = $n` per filter, joined by AND. Column names are not checked here.
pub fn select_where<E: Entity, K: AsRef<str>>(filters: &[(K, FieldValue)]) -> QueryBuf {
    let mut q = select_all::<E>();
    let mut where_parts = Vec::with_capacity(filters.len());
    for (col, val) in filters {
        let n = q.push_param(val.clone());
        where_parts.push(format!("{} = ${}", quoted(col.as_ref()), n));
    }
    if !where_parts.is_empty() {
        q.sql.push_str(" WHERE ");
        q.sql.push_str(&where_parts.join(" AND "));
    }
    q
}

/// SELECT by primary key.
pub fn select_by_id<E: Entity>(pk: &str, id: FieldValue) -> QueryBuf {
    select_where::<E, &str>(&[(pk, id)])
}

/// INSERT the given columns and return the stored row, server defaults included.
pub fn insert<E: Entity>(values: Vec<(&'static str, FieldValue)>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = quoted(E::TABLE);
    let returning = select_column_list::<E>();
    if values.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning);
        return q;
    }
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (col, val) in values {
        let n = q.push_param(val);
        cols.push(quoted(col));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table,
        cols.join(", "),
        placeholders.join(", "),
        returning
    );
    q
}

/// UPDATE by primary key: SET only the given columns. The primary key itself is never assigned.
/// Caller must pass at least one non-key column.
pub fn update<E: Entity>(pk: &str, id: FieldValue, values: Vec<(&'static str, FieldValue)>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(values.len());
    for (col, val) in values {
        if col == pk {
            continue;
        }
        let n = q.push_param(val);
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    let id_param = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(E::TABLE),
        sets.join(", "),
        quoted(pk),
        id_param
    );
    q
}

/// DELETE by primary key, returning the removed row.
pub fn delete<E: Entity>(pk: &str, id: FieldValue) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        quoted(E::TABLE),
        quoted(pk),
        n,
        select_column_list::<E>()
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cat;

    #[test]
    fn select_all_has_no_where_or_order() {
        let q = select_all::<Cat>();
        assert_eq!(q.sql, r#"SELECT "id", "name", "age" FROM "cats""#);
        assert!(q.params.is_empty());
    }

    #[test]
    fn filters_are_conjunctive_and_numbered_in_order() {
        let q = select_where::<Cat, &str>(&[
            ("name", FieldValue::from("Tom")),
            ("age", FieldValue::from(3)),
        ]);
        assert_eq!(
            q.sql,
            r#"SELECT "id", "name", "age" FROM "cats" WHERE "name" = $1 AND "age" = $2"#
        );
        assert_eq!(q.params, vec![FieldValue::Text("Tom".into()), FieldValue::Int(3)]);
    }

    #[test]
    fn insert_returns_all_columns() {
        let q = insert::<Cat>(vec![("name", "Tom".into()), ("age", 3.into())]);
        assert_eq!(
            q.sql,
            r#"INSERT INTO "cats" ("name", "age") VALUES ($1, $2) RETURNING "id", "name", "age""#
        );
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn update_skips_primary_key_and_binds_id_last() {
        let q = update::<Cat>("id", 7.into(), vec![("id", 99.into()), ("age", 4.into())]);
        assert_eq!(q.sql, r#"UPDATE "cats" SET "age" = $1 WHERE "id" = $2"#);
        assert_eq!(q.params, vec![FieldValue::Int(4), FieldValue::Int(7)]);
    }

    #[test]
    fn delete_returns_removed_row() {
        let q = delete::<Cat>("id", 1.into());
        assert_eq!(
            q.sql,
            r#"DELETE FROM "cats" WHERE "id" = $1 RETURNING "id", "name", "age""#
        );
    }

    #[test]
    fn identifiers_are_escaped() {
        assert_eq!(quoted(r#"we"ird"#), r#""we""ird""#);
    }
}
