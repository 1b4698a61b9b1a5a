//! `todo` - terminal client for the todo service.
//!
//! # Usage
//!
//! ```bash
//! todo                      # list
//! todo add Buy milk
//! todo done 3
//! todo rename 3 Buy oat milk
//! todo rm 3
//! ```

use clap::Parser;
use todo_client::cli::{Cli, Command, joined};
use todo_client::{ClientConfig, HttpTodoApi, TodosService};
use todo_core::{TodoDraft, TodoId, TodoItem};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = Cli::parse().into_command();

    let config = ClientConfig::from_env();
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let service = TodosService::new(HttpTodoApi::from_config(&config))
        .with_response_wait(config.response_wait);

    service.load().await?;
    run(&service, command).await?;
    service.settle().await?;

    print!("{}", service.page().await);
    Ok(())
}

async fn run(
    service: &TodosService<HttpTodoApi>,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::List => {},
        Command::Add { name } => {
            let todo = service.create_todo(TodoDraft::new(joined(&name))).await?;
            println!("Added #{}", todo.id);
        },
        Command::Done { id } => set_complete(service, id, true).await?,
        Command::Undo { id } => set_complete(service, id, false).await?,
        Command::Rename { id, name } => {
            let todo = find(service, id).await?;
            service.update_todo(todo.renamed(joined(&name))).await?;
        },
        Command::Rm { id } => {
            service.delete_todo(id).await?;
            println!("Deleted #{id}");
        },
    }
    Ok(())
}

async fn set_complete(
    service: &TodosService<HttpTodoApi>,
    id: TodoId,
    complete: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let todo = find(service, id).await?;
    service
        .update_todo(TodoItem {
            is_complete: complete,
            ..todo
        })
        .await?;
    Ok(())
}

async fn find(
    service: &TodosService<HttpTodoApi>,
    id: TodoId,
) -> Result<TodoItem, Box<dyn std::error::Error>> {
    service
        .todos()
        .await
        .into_iter()
        .find(|todo| todo.id == id)
        .ok_or_else(|| format!("Todo item with id {id} not found").into())
}
