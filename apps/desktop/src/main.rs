use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{
    rest::{RestDirectoryService, RestTaskService},
    TaskBoardClient,
};
use shared::{
    domain::{TaskId, UserId},
    protocol::UserSummary,
};
use tokio::io::{AsyncBufReadExt, BufReader};

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    directory_url: Option<String>,
    #[arg(long)]
    task_service_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.directory_url {
        settings.directory_url = url;
    }
    if let Some(url) = args.task_service_url {
        settings.task_service_url = url;
    }

    let client = TaskBoardClient::new_with_services(
        Arc::new(RestDirectoryService::new(settings.directory_url)),
        Arc::new(RestTaskService::new(settings.task_service_url)),
    );
    client.initialize().await?;

    print_users(&client).await;
    print_tasks(&client).await;
    println!("commands: users | tasks | select <user_id> | toggle <task_id> | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("users"), None) => print_users(&client).await,
            (Some("tasks"), None) => print_tasks(&client).await,
            (Some("select"), Some(raw_id)) => match raw_id.parse::<i64>() {
                Ok(id) => {
                    let user = client
                        .users()
                        .await
                        .into_iter()
                        .find(|user| user.user_id == UserId(id))
                        .unwrap_or(UserSummary {
                            user_id: UserId(id),
                            name: format!("user {id}"),
                        });
                    client.select_user(user).await;
                    print_tasks(&client).await;
                }
                Err(_) => println!("select expects a numeric user id"),
            },
            (Some("toggle"), Some(raw_id)) => match raw_id.parse::<i64>() {
                Ok(id) => {
                    // Full replacement record built from the current
                    // snapshot; the core only consumes the finished update.
                    match client
                        .tasks()
                        .await
                        .into_iter()
                        .find(|task| task.task_id == TaskId(id))
                    {
                        Some(mut record) => {
                            record.completed = !record.completed;
                            client.apply_task_update(record).await;
                            print_tasks(&client).await;
                        }
                        None => println!("no task with id {id} in the current list"),
                    }
                }
                Err(_) => println!("toggle expects a numeric task id"),
            },
            (Some("quit") | Some("exit"), None) => break,
            (None, _) => {}
            _ => println!("commands: users | tasks | select <user_id> | toggle <task_id> | quit"),
        }
    }

    Ok(())
}

async fn print_users(client: &TaskBoardClient) {
    let selected = client.selected_user().await;
    for user in client.users().await {
        let marker = if selected.as_ref() == Some(&user) {
            "*"
        } else {
            " "
        };
        println!("{marker} {:>3}  {}", user.user_id.0, user.name);
    }
}

async fn print_tasks(client: &TaskBoardClient) {
    for task in client.tasks().await {
        let mark = if task.completed { "x" } else { " " };
        println!("[{mark}] {:>3}  {}", task.task_id.0, task.title().unwrap_or(""));
    }
    println!("{}", client.progress_summary().await);
}
