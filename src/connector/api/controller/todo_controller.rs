use anyhow::Result;

use crate::connector::{validate_title, validate_todo_id};
use crate::Todo;

use super::super::Container;

pub struct TodoController<'a> {
    container: &'a Container,
}

impl<'a> TodoController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(&self) -> Result<String> {
        let todos = self.container.todo_service().find_all().await?;
        Ok(self.format_todo_list(&todos))
    }

    pub async fn create(&self, title: String) -> Result<String> {
        let title = validate_title(Some(title.as_str()))?;
        let todo = self.container.todo_service().create(title).await?;
        Ok(format!("Created todo: {} ({})", todo.title(), todo.id()))
    }

    pub async fn show(&self, id: String) -> Result<String> {
        let id = validate_todo_id(Some(id.as_str()))?;
        let todo = self.container.todo_service().find_one(id).await?;
        Ok(self.format_todo(&todo))
    }

    pub async fn finish(&self, id: String) -> Result<String> {
        let id = validate_todo_id(Some(id.as_str()))?;
        let todo = self.container.todo_service().finish(id).await?;
        Ok(format!("Finished todo: {} ({})", todo.title(), todo.id()))
    }

    pub async fn delete(&self, id: String) -> Result<String> {
        let id = validate_todo_id(Some(id.as_str()))?;
        self.container.todo_service().delete(id).await?;
        Ok("Todo deleted successfully.".to_string())
    }

    fn format_todo(&self, todo: &Todo) -> String {
        format!(
            "{} ({})\n  Status:  {}\n  Created: {}\n",
            todo.title(),
            todo.id(),
            todo.status().as_str(),
            todo.created_at().to_rfc3339()
        )
    }

    fn format_todo_list(&self, todos: &[Todo]) -> String {
        if todos.is_empty() {
            return "No todos.".to_string();
        }

        let mut output = "Todos:\n\n".to_string();
        for todo in todos {
            let mark = if todo.is_finished() { "x" } else { " " };
            output.push_str(&format!("  [{}] {} ({})\n", mark, todo.title(), todo.id()));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::api::ContainerConfig;

    fn memory_container() -> Container {
        Container::new(ContainerConfig {
            data_dir: String::new(),
            memory_storage: true,
            max_unfinished: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_empty() {
        let container = memory_container();
        let controller = TodoController::new(&container);

        assert_eq!(controller.list().await.unwrap(), "No todos.");
    }

    #[tokio::test]
    async fn test_create_then_list_shows_title() {
        let container = memory_container();
        let controller = TodoController::new(&container);

        let created = controller.create("Buy milk".to_string()).await.unwrap();
        assert!(created.starts_with("Created todo: Buy milk"));

        let listing = controller.list().await.unwrap();
        assert!(listing.contains("[ ] Buy milk"));
    }

    #[tokio::test]
    async fn test_create_rejects_long_title() {
        let container = memory_container();
        let controller = TodoController::new(&container);

        let err = controller.create("x".repeat(31)).await.unwrap_err();

        assert!(err.to_string().contains("todoTitle"));
        assert!(container.todo_service().find_all().await.unwrap().is_empty());
    }
}
