use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ScopeArgs {
    #[command(subcommand)]
    pub command: ScopeCommand,
}

#[derive(Subcommand)]
pub enum ScopeCommand {
    #[command(about = "List scopes")]
    List(ScopeListArgs),
    #[command(about = "List scope categories")]
    Categories,
    #[command(about = "Show a scope")]
    Get(CatalogIdArgs),
}

#[derive(Args)]
pub struct ScopeListArgs {
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct PackageArgs {
    #[command(subcommand)]
    pub command: PackageCommand,
}

#[derive(Subcommand)]
pub enum PackageCommand {
    #[command(about = "List packages")]
    List(PackageListArgs),
    #[command(about = "Show a package")]
    Get(CatalogIdArgs),
    #[command(about = "Compare a package with the alternatives")]
    Compare(CatalogIdArgs),
}

#[derive(Args)]
pub struct PackageListArgs {
    #[arg(long, help = "Only featured packages")]
    pub featured: bool,
}

#[derive(Args)]
pub struct CatalogIdArgs {
    pub id: u64,
}
