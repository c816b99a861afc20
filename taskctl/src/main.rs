mod cli;
mod display;

use clap::Parser;
use cli::{Cli, Commands};
use log::{error, info};
use serde::Serialize;
use taskdeck_api::{AsyncApiClient, ClientResult, StaticLocator};
use taskdeck_models::{Task, TaskDraft, TaskSubmission};

type DynError = Box<dyn std::error::Error + Send + Sync>;
type ApiClient = AsyncApiClient<StaticLocator>;

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), DynError> {
    info!("Using task API at {}", cli.api_url);
    let api = ApiClient::new(StaticLocator::new(cli.api_url.clone()), cli.timeout())?;
    let json = cli.json;

    match cli.command {
        Commands::List => {
            let tasks = api.list_all().await?;
            emit(json, &tasks, || display::task_table(&tasks))?;
        }
        Commands::Get { id } => {
            print_json(&api.get_by_id(&id).await?)?;
        }
        Commands::Search { name } => {
            let tasks = search_or_list(&api, &name).await?;
            emit(json, &tasks, || display::task_table(&tasks))?;
        }
        Commands::Create { fields } => {
            let submission = TaskSubmission::Create(validated(fields.into())?);
            print_json(&api.upsert(&submission).await?)?;
        }
        Commands::Update { id, fields } => {
            let submission = TaskSubmission::Update {
                id,
                draft: validated(fields.into())?,
            };
            print_json(&api.upsert(&submission).await?)?;
        }
        Commands::Delete { id } => {
            api.remove(&id).await?;
            println!("Deleted task {id}");
        }
        Commands::Execute { id } => {
            let task = api.execute(&id).await?;
            if let Some(execution) = task.last_execution() {
                info!(
                    "Task {id} finished with {} in {}",
                    execution.status().label(),
                    execution.formatted_duration()
                );
            }
            print_json(&task)?;
        }
        Commands::Health => {
            let status = api.health_check().await?;
            println!("API is {status:?} at {}", cli.api_url);
        }
    }

    Ok(())
}

/// A blank term means "no filter" and is never sent as a search.
async fn search_or_list(api: &ApiClient, term: &str) -> ClientResult<Vec<Task>> {
    let term = term.trim();
    if term.is_empty() {
        api.list_all().await
    } else {
        api.search_by_name(term).await
    }
}

/// Drafts are checked locally so invalid input never reaches the network.
fn validated(draft: TaskDraft) -> Result<TaskDraft, DynError> {
    draft.validate()?;
    Ok(draft)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), DynError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Listings read as a table unless `--json` asks for the raw form.
fn emit<T: Serialize>(json: bool, value: &T, render: impl FnOnce() -> String) -> Result<(), DynError> {
    if json {
        print_json(value)
    } else {
        print!("{}", render());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn client(base: String) -> ApiClient {
        ApiClient::new(StaticLocator::new(base), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn blank_search_lists_everything() {
        let mut server = Server::new_async().await;
        let list = server
            .mock("GET", "/api/tasks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": "1", "name": "Print date", "owner": "ops", "command": "date"}]"#)
            .expect(2)
            .create_async()
            .await;
        let search = server
            .mock("GET", "/api/tasks/search")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let api = client(server.url());
        assert_eq!(search_or_list(&api, "").await.unwrap().len(), 1);
        assert_eq!(search_or_list(&api, "   ").await.unwrap().len(), 1);

        list.assert_async().await;
        search.assert_async().await;
    }

    #[tokio::test]
    async fn search_term_is_trimmed() {
        let mut server = Server::new_async().await;
        let search = server
            .mock("GET", "/api/tasks/search")
            .match_query(Matcher::UrlEncoded("name".into(), "print".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let tasks = search_or_list(&client(server.url()), "  print ").await.unwrap();
        assert!(tasks.is_empty());
        search.assert_async().await;
    }

    #[test]
    fn invalid_drafts_are_rejected_locally() {
        let err = validated(TaskDraft::new("ab", "ops", "date")).unwrap_err();
        assert!(err.to_string().contains("Name must be at least 3 characters"));
    }

    #[test]
    fn valid_drafts_pass_through() {
        let draft = TaskDraft::new("Print date", "ops", "date");
        assert_eq!(validated(draft.clone()).unwrap(), draft);
    }
}
