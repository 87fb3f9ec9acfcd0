use tahfeez_client::{DataSource, Services};
use tahfeez_core::{GoalFilters, GoalUpdate, LocaleFilter, NewGoal};

use crate::cli_args::{GoalArgs, GoalCommand};
use crate::modules::shared::print_envelope;

pub(crate) async fn handle_goal(args: GoalArgs, services: &Services) -> anyhow::Result<()> {
    let data = services.data.as_ref();
    match args.command {
        GoalCommand::List(args) => {
            let filters = GoalFilters {
                status: args.status,
                scope: args.scope,
                page: args.page,
                page_size: args.page_size,
                language: None,
            };
            print_envelope(data.goals(filters).await)
        }
        GoalCommand::Active => print_envelope(data.active_goals(LocaleFilter::default()).await),
        GoalCommand::Get(args) => print_envelope(data.goal(args.id).await),
        GoalCommand::Create(args) => {
            let goal = NewGoal {
                title: args.title,
                description: args.description,
                scope: args.scope,
                target_date: args.target_date,
            };
            print_envelope(data.create_goal(goal).await)
        }
        GoalCommand::Update(args) => {
            let update = GoalUpdate {
                title: args.title,
                description: args.description,
                scope: args.scope,
                target_date: args.target_date,
                status: args.status,
            };
            print_envelope(data.update_goal(args.id, update).await)
        }
        GoalCommand::Delete(args) => {
            data.delete_goal(args.id)
                .await?
                .into_result()
                .map_err(|error| anyhow::anyhow!(error))?;
            println!("Deleted goal {}", args.id);
            Ok(())
        }
        GoalCommand::Complete(args) => print_envelope(data.complete_goal(args.id).await),
        GoalCommand::Progress(args) => {
            print_envelope(data.update_goal_progress(args.id, args.progress).await)
        }
    }
}
