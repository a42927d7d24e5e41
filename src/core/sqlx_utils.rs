use chrono::{DateTime, FixedOffset};
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    Postgres,
};

#[derive(Clone, Debug, PartialEq)]
pub enum SqlxBinds {
    String(String),
    OptionString(Option<String>),
    Int(i32),
    StringArray(Vec<String>),
    OptionStringArray(Option<Vec<String>>),
    DateTimeFixedOffset(DateTime<FixedOffset>),
}

pub fn binds_query_as<'a, T: for<'r> sqlx::FromRow<'r, PgRow>>(
    stmt: &'a str,
    binds: Vec<SqlxBinds>,
) -> QueryAs<'a, Postgres, T, PgArguments> {
    let mut q: QueryAs<'_, Postgres, T, PgArguments> = sqlx::query_as(stmt);
    for bind in binds.into_iter() {
        q = match bind {
            SqlxBinds::String(val) => q.bind(val),
            SqlxBinds::OptionString(val) => q.bind(val),
            SqlxBinds::Int(val) => q.bind(val),
            SqlxBinds::StringArray(val) => q.bind(val),
            SqlxBinds::OptionStringArray(val) => q.bind(val),
            SqlxBinds::DateTimeFixedOffset(val) => q.bind(val),
        };
    }
    q
}

/// Push `bind` and return its positional placeholder (`$n`).
pub fn push_bind(binds: &mut Vec<SqlxBinds>, bind: SqlxBinds) -> String {
    binds.push(bind);
    format!("${}", binds.len())
}

pub fn query_builder(
    select: Option<String>,
    table_name: &str,
    wheres: &[String],
    order_by: Vec<String>,
    limit: Option<u32>,
) -> String {
    // Select
    let mut stmt = "SELECT ".to_string();
    if let Some(val) = select {
        stmt.push_str(&val);
    } else {
        stmt.push('*');
    }

    // From
    stmt.push_str(format!(" FROM {}", table_name).as_str());

    // Where
    if !wheres.is_empty() {
        stmt.push_str(" WHERE ");
        stmt.push_str(&wheres.join(" AND "));
    }

    // order by
    if !order_by.is_empty() {
        stmt.push_str(" ORDER BY ");
        stmt.push_str(&order_by.join(", "));
    }

    // Limit
    if let Some(limit) = limit {
        stmt.push_str(format!(" LIMIT {}", limit).as_str());
    }
    stmt
}
