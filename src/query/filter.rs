use crate::{
    core::sqlx_utils::{push_bind, SqlxBinds},
    schema::profile::FilterOptions,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Clause {
    /// Substring of name or description.
    Search(String),
    /// Substring of city, state or country.
    Location(String),
    /// Every listed interest must be present.
    Interests(Vec<String>),
}

/// Conjunction of the clauses present in a filter set. No clauses matches
/// every profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Predicate {
    pub clauses: Vec<Clause>,
}

pub fn build_predicate(filters: &FilterOptions) -> Predicate {
    let mut clauses: Vec<Clause> = vec![];
    if let Some(term) = filters.search_term.as_ref().filter(|x| !x.is_empty()) {
        clauses.push(Clause::Search(term.clone()));
    }
    if let Some(location) = filters.location.as_ref().filter(|x| !x.is_empty()) {
        clauses.push(Clause::Location(location.clone()));
    }
    if let Some(interests) = filters.interests.as_ref().filter(|x| !x.is_empty()) {
        clauses.push(Clause::Interests(interests.clone()));
    }
    Predicate { clauses }
}

/// Escape LIKE metacharacters so the term is matched literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn ilike_any(columns: &[&str], placeholder: &str) -> String {
    let terms: Vec<String> = columns
        .iter()
        .map(|column| format!("{} ILIKE {} ESCAPE '\\'", column, placeholder))
        .collect();
    format!("({})", terms.join(" OR "))
}

impl Predicate {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Render one WHERE term per clause, pushing the values onto `binds`.
    pub fn to_sql(&self, binds: &mut Vec<SqlxBinds>) -> Vec<String> {
        let mut filters: Vec<String> = vec![];
        for clause in self.clauses.iter() {
            match clause {
                Clause::Search(term) => {
                    let placeholder =
                        push_bind(binds, SqlxBinds::String(format!("%{}%", escape_like(term))));
                    filters.push(ilike_any(&["full_name", "description"], &placeholder));
                }
                Clause::Location(location) => {
                    let placeholder = push_bind(
                        binds,
                        SqlxBinds::String(format!("%{}%", escape_like(location))),
                    );
                    filters.push(ilike_any(&["city", "state", "country"], &placeholder));
                }
                Clause::Interests(interests) => {
                    let placeholder = push_bind(binds, SqlxBinds::StringArray(interests.clone()));
                    filters.push(format!("interests @> {}::text[]", placeholder));
                }
            }
        }
        filters
    }
}
