use crate::domain;
use crate::domain::todo::query::{STATUS_KEY, SortDirection, SortSpec, TodoPredicate, TodoQuery};
use crate::domain::todo::{NewTodo, Todo, TodoId};
use anyhow::{Context, anyhow};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

/// Name of the collection todos are stored in
pub const TODO_COLLECTION: &str = "todos";

#[derive(Debug, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    owner: String,
    status: bool,
    body: String,
    category: String,
}

impl From<TodoDocument> for domain::todo::Todo {
    fn from(value: TodoDocument) -> Self {
        Todo {
            id: TodoId::from(value.id),
            owner: value.owner,
            status: value.status,
            body: value.body,
            category: value.category,
        }
    }
}

/// A todo as it's inserted. The `_id` field is left off so the store assigns one.
#[derive(Debug, Serialize)]
struct NewTodoDocument {
    owner: String,
    status: bool,
    body: String,
    category: String,
}

impl From<&NewTodo> for NewTodoDocument {
    fn from(value: &NewTodo) -> Self {
        NewTodoDocument {
            owner: value.owner.clone(),
            status: value.status,
            body: value.body.clone(),
            category: value.category.clone(),
        }
    }
}

/// Translates listing filters into a MongoDB filter document. Text filters become
/// case-insensitive regular expressions built from the escaped literal, so user input is never
/// interpreted as a pattern.
pub fn filter_document(filters: &[TodoPredicate]) -> Document {
    if filters.is_empty() {
        return doc! {};
    }

    let clauses: Vec<Document> = filters.iter().map(predicate_document).collect();
    doc! { "$and": clauses }
}

fn predicate_document(predicate: &TodoPredicate) -> Document {
    match predicate {
        TodoPredicate::StatusIs(status) => doc! { STATUS_KEY: *status },
        TodoPredicate::Contains { field, literal } => {
            let key = field.key();
            doc! {
                key: {
                    "$regex": regex::escape(literal),
                    "$options": "i",
                }
            }
        }
    }
}

/// Translates a sort specification into a MongoDB sort document
pub fn sort_document(sort: &SortSpec) -> Document {
    let direction = match sort.direction {
        SortDirection::Ascending => 1,
        SortDirection::Descending => -1,
    };
    let key = sort.field.as_str();

    doc! { key: direction }
}

pub struct DbTodoReader {
    todos: Collection<TodoDocument>,
}

impl DbTodoReader {
    pub fn new(db: &Database) -> DbTodoReader {
        DbTodoReader {
            todos: db.collection(TODO_COLLECTION),
        }
    }
}

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn matching_todos(&self, query: &TodoQuery) -> Result<Vec<Todo>, anyhow::Error> {
        let todo_cursor = self
            .todos
            .find(filter_document(&query.filters))
            .sort(sort_document(&query.sort))
            .await
            .context("trying to query todos")?;

        let todos: Vec<Todo> = todo_cursor
            .try_collect::<Vec<TodoDocument>>()
            .await
            .context("trying to read the results of a todo query")?
            .into_iter()
            .map(Todo::from)
            .collect();

        Ok(todos)
    }

    async fn todo_by_id(&self, todo_id: TodoId) -> Result<Option<Todo>, anyhow::Error> {
        let todo = self
            .todos
            .find_one(doc! { "_id": todo_id.object_id() })
            .await
            .context("trying to fetch a todo by ID")?
            .map(Todo::from);

        Ok(todo)
    }
}

pub struct DbTodoWriter {
    todos: Collection<NewTodoDocument>,
}

impl DbTodoWriter {
    pub fn new(db: &Database) -> DbTodoWriter {
        DbTodoWriter {
            todos: db.collection(TODO_COLLECTION),
        }
    }
}

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn insert_todo(&self, new_todo: &NewTodo) -> Result<TodoId, anyhow::Error> {
        let insert_result = self
            .todos
            .insert_one(NewTodoDocument::from(new_todo))
            .await
            .context("trying to insert a new todo into the database")?;

        insert_result
            .inserted_id
            .as_object_id()
            .map(TodoId::from)
            .ok_or_else(|| {
                anyhow!(
                    "database assigned a non-ObjectId identifier: {}",
                    insert_result.inserted_id
                )
            })
    }

    async fn delete_todo(&self, todo_id: TodoId) -> Result<(), anyhow::Error> {
        self.todos
            .delete_one(doc! { "_id": todo_id.object_id() })
            .await
            .context("trying to remove a todo from the database")?;

        Ok(())
    }
}
