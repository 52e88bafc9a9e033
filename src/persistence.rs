pub mod db_todo_driven_ports;

use mongodb::Database;

/// Data structure which owns clients for connecting to external systems.
/// Allows business logic to be agnostic of the external systems it communicates with
/// so driven adapters can easily be swapped out for other implementations
#[derive(Clone)]
pub struct ExternalConnectivity {
    db: Database,
}

impl ExternalConnectivity {
    /// Accepts the database handle used to reach the todo store. The handle is internally
    /// pooled, so clones of this struct share connections.
    pub fn new(db: Database) -> Self {
        ExternalConnectivity { db }
    }

    /// Builds a reader over the todo collection
    pub fn todo_reader(&self) -> db_todo_driven_ports::DbTodoReader {
        db_todo_driven_ports::DbTodoReader::new(&self.db)
    }

    /// Builds a writer over the todo collection
    pub fn todo_writer(&self) -> db_todo_driven_ports::DbTodoWriter {
        db_todo_driven_ports::DbTodoWriter::new(&self.db)
    }
}
