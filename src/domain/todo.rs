use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::driving_ports::TodoError;
use crate::domain::todo::validation::CreateTodo;
use anyhow::Context;
use derive_more::Display;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use tracing::info;

pub mod query;
pub mod validation;

/// Identifier the store assigns to a todo when it's inserted
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(ObjectId);

impl TodoId {
    /// Parses a client-supplied identifier, failing if it isn't in the store's ID syntax
    pub fn parse(raw_id: &str) -> Result<TodoId, TodoError> {
        ObjectId::parse_str(raw_id)
            .map(TodoId)
            .map_err(|_| TodoError::InvalidIdentifier(raw_id.to_owned()))
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for TodoId {
    fn from(value: ObjectId) -> Self {
        TodoId(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub owner: String,
    pub status: bool,
    pub body: String,
    pub category: String,
}

/// A validated todo which hasn't been stored yet
#[derive(Debug, Display, PartialEq, Eq)]
#[display("todo for {owner} in category \"{category}\"")]
#[cfg_attr(test, derive(Clone))]
pub struct NewTodo {
    pub owner: String,
    pub status: bool,
    pub body: String,
    pub category: String,
}

pub mod driven_ports {
    use super::*;
    use crate::domain::todo::query::TodoQuery;

    pub trait TodoReader {
        async fn matching_todos(&self, query: &TodoQuery) -> Result<Vec<Todo>, anyhow::Error>;
        async fn todo_by_id(&self, todo_id: TodoId) -> Result<Option<Todo>, anyhow::Error>;
    }

    pub trait TodoWriter {
        async fn insert_todo(&self, new_todo: &NewTodo) -> Result<TodoId, anyhow::Error>;
        async fn delete_todo(&self, todo_id: TodoId) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use thiserror::Error;
    use validator::ValidationErrors;

    #[derive(Debug, Error)]
    pub enum TodoError {
        #[error("query parameter \"{parameter}\" had an unusable value: {value}")]
        InvalidParameter { parameter: String, value: String },
        #[error("\"{0}\" is not a valid todo ID")]
        InvalidIdentifier(String),
        #[error("the requested todo does not exist")]
        NotFound,
        #[error("todo was invalid: {0}")]
        Invalid(#[from] ValidationErrors),
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TodoPort {
        async fn list_todos(
            &self,
            params: &HashMap<String, String>,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<Vec<Todo>, TodoError>;
        async fn todo_by_id(
            &self,
            todo_id: &str,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<Todo, TodoError>;
        async fn create_todo(
            &self,
            todo: CreateTodo,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<TodoId, TodoError>;
        async fn delete_todo(
            &self,
            todo_id: &str,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<(), TodoError>;
    }
}

pub struct TodoService {}

impl driving_ports::TodoPort for TodoService {
    async fn list_todos(
        &self,
        params: &HashMap<String, String>,
        todo_read: &impl TodoReader,
    ) -> Result<Vec<Todo>, TodoError> {
        let todo_query = query::build_query(params)?;
        let todos = todo_read
            .matching_todos(&todo_query)
            .await
            .context("listing todos")?;

        Ok(todos)
    }

    async fn todo_by_id(&self, todo_id: &str, todo_read: &impl TodoReader) -> Result<Todo, TodoError> {
        let todo_id = TodoId::parse(todo_id)?;
        let todo = todo_read
            .todo_by_id(todo_id)
            .await
            .context("fetching a todo by ID")?;

        todo.ok_or(TodoError::NotFound)
    }

    async fn create_todo(
        &self,
        todo: CreateTodo,
        todo_write: &impl TodoWriter,
    ) -> Result<TodoId, TodoError> {
        let new_todo = validation::validate_new_todo(todo)?;
        let created_id = todo_write
            .insert_todo(&new_todo)
            .await
            .context("inserting a new todo")?;
        info!("Created {new_todo} with ID {created_id}");

        Ok(created_id)
    }

    async fn delete_todo(&self, todo_id: &str, todo_write: &impl TodoWriter) -> Result<(), TodoError> {
        let todo_id = TodoId::parse(todo_id)?;
        todo_write
            .delete_todo(todo_id)
            .await
            .context("deleting a todo")?;

        Ok(())
    }
}
