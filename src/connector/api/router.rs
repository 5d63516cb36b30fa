use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::TodoController;

pub struct Router<'a> {
    todo_controller: TodoController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            todo_controller: TodoController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::List => self.todo_controller.list().await,
            Commands::Create { title } => self.todo_controller.create(title).await,
            Commands::Show { id } => self.todo_controller.show(id).await,
            Commands::Finish { id } => self.todo_controller.finish(id).await,
            Commands::Delete { id } => self.todo_controller.delete(id).await,
            Commands::Serve { .. } => unreachable!("Serve command is handled separately in main"),
        }
    }
}
