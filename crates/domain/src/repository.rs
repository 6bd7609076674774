//! Storage port for todos and its in-memory implementation.

use crate::errors::{TodoError, TodoResult};
use crate::identifiers::{TodoId, TodoIdGenerator};
use crate::todo::{NewTodo, Todo, TodoPatch};
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;
use validator::Validate;

/// Todo storage operations used by the HTTP layer
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All todos in insertion order
    async fn list(&self) -> TodoResult<Vec<Todo>>;

    /// A single todo
    async fn get(&self, id: &TodoId) -> TodoResult<Todo>;

    /// Store a new todo under a freshly generated id
    async fn create(&self, data: NewTodo) -> TodoResult<Todo>;

    /// Overwrite the present fields of an existing todo
    async fn update(&self, id: &TodoId, patch: TodoPatch) -> TodoResult<Todo>;

    /// Remove a todo
    async fn delete(&self, id: &TodoId) -> TodoResult<()>;

    /// Number of stored todos
    async fn count(&self) -> TodoResult<usize>;
}

/// Process-local todo store.
///
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    todos: RwLock<IndexMap<TodoId, Todo>>,
    ids: TodoIdGenerator,
}

impl InMemoryTodoRepository {
    /// Create an empty store whose first id is `todo1`
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list(&self) -> TodoResult<Vec<Todo>> {
        Ok(self.todos.read().values().cloned().collect())
    }

    async fn get(&self, id: &TodoId) -> TodoResult<Todo> {
        self.todos
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| TodoError::NotFound(id.clone()))
    }

    async fn create(&self, data: NewTodo) -> TodoResult<Todo> {
        data.validate()?;

        let todo = Todo {
            id: self.ids.next_id(),
            task: data.task,
            comment: data.comment,
        };

        self.todos.write().insert(todo.id.clone(), todo.clone());
        debug!(todo_id = %todo.id, "Todo created");
        Ok(todo)
    }

    async fn update(&self, id: &TodoId, patch: TodoPatch) -> TodoResult<Todo> {
        let mut todos = self.todos.write();
        let todo = todos
            .get_mut(id)
            .ok_or_else(|| TodoError::NotFound(id.clone()))?;

        let changed = todo.apply(patch);
        debug!(todo_id = %id, changed, "Todo updated");
        Ok(todo.clone())
    }

    async fn delete(&self, id: &TodoId) -> TodoResult<()> {
        // shift_remove keeps the remaining entries in insertion order
        match self.todos.write().shift_remove(id) {
            Some(_) => {
                debug!(todo_id = %id, "Todo deleted");
                Ok(())
            }
            None => Err(TodoError::NotFound(id.clone())),
        }
    }

    async fn count(&self) -> TodoResult<usize> {
        Ok(self.todos.read().len())
    }
}
