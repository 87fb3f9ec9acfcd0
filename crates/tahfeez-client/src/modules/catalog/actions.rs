use tahfeez_client::{DataSource, Services};
use tahfeez_core::{LocaleFilter, ScopeFilters};

use crate::cli_args::{PackageArgs, PackageCommand, ScopeArgs, ScopeCommand};
use crate::modules::shared::print_envelope;

pub(crate) async fn handle_scope(args: ScopeArgs, services: &Services) -> anyhow::Result<()> {
    let data = services.data.as_ref();
    match args.command {
        ScopeCommand::List(args) => {
            let filters = ScopeFilters {
                category: args.category,
                language: None,
            };
            print_envelope(data.scopes(filters).await)
        }
        ScopeCommand::Categories => {
            print_envelope(data.scope_categories(LocaleFilter::default()).await)
        }
        ScopeCommand::Get(args) => print_envelope(data.scope(args.id, LocaleFilter::default()).await),
    }
}

pub(crate) async fn handle_package(args: PackageArgs, services: &Services) -> anyhow::Result<()> {
    let data = services.data.as_ref();
    let locale = LocaleFilter::default();
    match args.command {
        PackageCommand::List(args) if args.featured => {
            print_envelope(data.featured_packages(locale).await)
        }
        PackageCommand::List(_) => print_envelope(data.packages(locale).await),
        PackageCommand::Get(args) => print_envelope(data.package(args.id, locale).await),
        PackageCommand::Compare(args) => {
            print_envelope(data.package_comparison(args.id, locale).await)
        }
    }
}
