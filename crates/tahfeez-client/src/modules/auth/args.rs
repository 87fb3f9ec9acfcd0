use clap::Args;

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long, short)]
    pub username: Option<String>,
    #[arg(long, help = "Password (prompted when omitted)")]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, help = "Password (prompted twice when omitted)")]
    pub password: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
}

#[derive(Args)]
pub struct StatusArgs {
    #[arg(long, help = "Ask the server whether the stored access token is still valid")]
    pub verify: bool,
}
