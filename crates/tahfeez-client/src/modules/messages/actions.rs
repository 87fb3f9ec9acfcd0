use tahfeez_client::{DataSource, Services};
use tahfeez_core::{LocaleFilter, MessageFilters};

use crate::cli_args::{MessageArgs, MessageCommand, MessageListArgs, MessagePageArgs};
use crate::modules::shared::print_envelope;

fn list_filters(args: MessageListArgs) -> MessageFilters {
    let is_read = match (args.read, args.unread) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    MessageFilters {
        scope: args.scope,
        is_read,
        is_favorite: args.favorite.then_some(true),
        search: args.search,
        ..page_filters(args.page)
    }
}

fn page_filters(args: MessagePageArgs) -> MessageFilters {
    MessageFilters {
        page: args.page,
        page_size: args.page_size,
        ..MessageFilters::default()
    }
}

pub(crate) async fn handle_message(args: MessageArgs, services: &Services) -> anyhow::Result<()> {
    let data = services.data.as_ref();
    match args.command {
        MessageCommand::List(args) => print_envelope(data.messages(list_filters(args)).await),
        MessageCommand::Daily => print_envelope(data.daily_messages(LocaleFilter::default()).await),
        MessageCommand::Favorites(args) => {
            print_envelope(data.favorite_messages(page_filters(args)).await)
        }
        MessageCommand::Get(args) => {
            print_envelope(data.message(args.id, LocaleFilter::default()).await)
        }
        MessageCommand::Delete(args) => {
            data.delete_message(args.id)
                .await?
                .into_result()
                .map_err(|error| anyhow::anyhow!(error))?;
            println!("Deleted message {}", args.id);
            Ok(())
        }
        MessageCommand::Read(args) => print_envelope(data.mark_message_read(args.id).await),
        MessageCommand::Rate(args) => {
            print_envelope(data.rate_message(args.id, args.rating).await)
        }
        MessageCommand::Favorite(args) => print_envelope(data.toggle_favorite(args.id).await),
    }
}
