//! Turns the untyped query parameters of a todo listing into a [TodoQuery]: a conjunction of
//! [TodoPredicate]s plus a single-key [SortSpec].

use crate::domain::todo::Todo;
use crate::domain::todo::driving_ports::TodoError;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const STATUS_KEY: &str = "status";
pub const OWNER_KEY: &str = "owner";
pub const CATEGORY_KEY: &str = "category";
pub const BODY_KEY: &str = "body";
pub const ID_KEY: &str = "_id";

pub const SORT_BY_KEY: &str = "sortby";
pub const SORT_ORDER_KEY: &str = "sortorder";
/// Field used for ordering when no `sortby` parameter is given
pub const DEFAULT_SORT_FIELD: &str = "name";
const DESCENDING_ORDER: &str = "desc";

/// A free-text field of a todo which can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Owner,
    Category,
    Body,
}

impl TextField {
    /// Name of the field as it appears on a stored todo
    pub fn key(&self) -> &'static str {
        match self {
            Self::Owner => OWNER_KEY,
            Self::Category => CATEGORY_KEY,
            Self::Body => BODY_KEY,
        }
    }

    fn value_of<'todo>(&self, todo: &'todo Todo) -> &'todo str {
        match self {
            Self::Owner => &todo.owner,
            Self::Category => &todo.category,
            Self::Body => &todo.body,
        }
    }
}

/// A single condition a todo has to satisfy to show up in a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoPredicate {
    /// The todo's status is exactly this value
    StatusIs(bool),
    /// The field contains `literal`, ignoring case. `literal` is plain text, never a pattern.
    Contains { field: TextField, literal: String },
}

impl TodoPredicate {
    /// Evaluates the predicate against a single todo
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Self::StatusIs(status) => todo.status == *status,
            Self::Contains { field, literal } => field
                .value_of(todo)
                .to_lowercase()
                .contains(&literal.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Orders a listing by a single field. The field name is not checked against the fields
/// a todo actually has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Compares two todos by the sort field. Unknown fields compare as equal, which leaves
    /// the incoming order alone when used with a stable sort.
    pub fn compare(&self, left: &Todo, right: &Todo) -> Ordering {
        let ascending = match self.field.as_str() {
            ID_KEY => left.id.to_string().cmp(&right.id.to_string()),
            STATUS_KEY => left.status.cmp(&right.status),
            OWNER_KEY => left.owner.cmp(&right.owner),
            CATEGORY_KEY => left.category.cmp(&right.category),
            BODY_KEY => left.body.cmp(&right.body),
            _ => Ordering::Equal,
        };

        match self.direction {
            SortDirection::Ascending => ascending,
            SortDirection::Descending => ascending.reverse(),
        }
    }
}

/// A complete listing query: every filter must match, results come back in `sort` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoQuery {
    pub filters: Vec<TodoPredicate>,
    pub sort: SortSpec,
}

impl TodoQuery {
    /// True if the todo satisfies every filter. An empty filter list matches everything.
    pub fn matches(&self, todo: &Todo) -> bool {
        self.filters.iter().all(|filter| filter.matches(todo))
    }
}

/// Builds the filter and sort halves of a listing query from raw query parameters
pub fn build_query(params: &HashMap<String, String>) -> Result<TodoQuery, TodoError> {
    Ok(TodoQuery {
        filters: build_filters(params)?,
        sort: resolve_sort(params),
    })
}

/// Converts recognized query parameters into filter predicates. Parameters this function
/// doesn't know about are ignored.
pub fn build_filters(params: &HashMap<String, String>) -> Result<Vec<TodoPredicate>, TodoError> {
    let mut filters = Vec::new();

    if let Some(raw_status) = params.get(STATUS_KEY) {
        filters.push(TodoPredicate::StatusIs(parse_status(raw_status)?));
    }

    for field in [TextField::Owner, TextField::Category, TextField::Body] {
        if let Some(literal) = params.get(field.key()) {
            filters.push(TodoPredicate::Contains {
                field,
                literal: literal.clone(),
            });
        }
    }

    Ok(filters)
}

/// Picks the sort field and direction. Only the exact text "desc" sorts descending.
pub fn resolve_sort(params: &HashMap<String, String>) -> SortSpec {
    let field = params
        .get(SORT_BY_KEY)
        .map(String::as_str)
        .unwrap_or(DEFAULT_SORT_FIELD);
    let direction = match params.get(SORT_ORDER_KEY).map(String::as_str) {
        Some(DESCENDING_ORDER) => SortDirection::Descending,
        _ => SortDirection::Ascending,
    };

    SortSpec {
        field: field.to_owned(),
        direction,
    }
}

fn parse_status(raw_status: &str) -> Result<bool, TodoError> {
    if raw_status.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw_status.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(TodoError::InvalidParameter {
            parameter: STATUS_KEY.to_owned(),
            value: raw_status.to_owned(),
        })
    }
}
