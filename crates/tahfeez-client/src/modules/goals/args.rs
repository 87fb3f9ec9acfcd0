use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tahfeez_core::GoalStatus;

#[derive(Args)]
pub struct GoalArgs {
    #[command(subcommand)]
    pub command: GoalCommand,
}

#[derive(Subcommand)]
pub enum GoalCommand {
    #[command(about = "List goals")]
    List(GoalListArgs),
    #[command(about = "List active goals")]
    Active,
    #[command(about = "Show a goal")]
    Get(GoalIdArgs),
    #[command(about = "Create a goal")]
    Create(GoalCreateArgs),
    #[command(about = "Edit a goal")]
    Update(GoalUpdateArgs),
    #[command(about = "Delete a goal")]
    Delete(GoalIdArgs),
    #[command(about = "Mark a goal completed")]
    Complete(GoalIdArgs),
    #[command(about = "Set goal progress (0-100)")]
    Progress(GoalProgressArgs),
}

#[derive(Args)]
pub struct GoalListArgs {
    #[arg(long, help = "active, paused, completed or cancelled")]
    pub status: Option<GoalStatus>,
    #[arg(long)]
    pub scope: Option<u64>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Args)]
pub struct GoalIdArgs {
    pub id: u64,
}

#[derive(Args)]
pub struct GoalCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub scope: Option<u64>,
    #[arg(long, help = "YYYY-MM-DD")]
    pub target_date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct GoalUpdateArgs {
    pub id: u64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub scope: Option<u64>,
    #[arg(long, help = "YYYY-MM-DD")]
    pub target_date: Option<NaiveDate>,
    #[arg(long)]
    pub status: Option<GoalStatus>,
}

#[derive(Args)]
pub struct GoalProgressArgs {
    pub id: u64,
    pub progress: u8,
}
