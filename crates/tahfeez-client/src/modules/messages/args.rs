use clap::{Args, Subcommand};

#[derive(Args)]
pub struct MessageArgs {
    #[command(subcommand)]
    pub command: MessageCommand,
}

#[derive(Subcommand)]
pub enum MessageCommand {
    #[command(about = "List messages")]
    List(MessageListArgs),
    #[command(about = "Today's messages")]
    Daily,
    #[command(about = "List favorite messages")]
    Favorites(MessagePageArgs),
    #[command(about = "Show a message")]
    Get(MessageIdArgs),
    #[command(about = "Delete a message")]
    Delete(MessageIdArgs),
    #[command(about = "Mark a message as read")]
    Read(MessageIdArgs),
    #[command(about = "Rate a message (1-5)")]
    Rate(MessageRateArgs),
    #[command(about = "Add or remove a message from favorites")]
    Favorite(MessageIdArgs),
}

#[derive(Args)]
pub struct MessageListArgs {
    #[arg(long)]
    pub scope: Option<u64>,
    #[arg(long, conflicts_with = "read")]
    pub unread: bool,
    #[arg(long)]
    pub read: bool,
    #[arg(long)]
    pub favorite: bool,
    #[arg(long)]
    pub search: Option<String>,
    #[command(flatten)]
    pub page: MessagePageArgs,
}

#[derive(Args)]
pub struct MessagePageArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Args)]
pub struct MessageIdArgs {
    pub id: u64,
}

#[derive(Args)]
pub struct MessageRateArgs {
    pub id: u64,
    pub rating: u8,
}
