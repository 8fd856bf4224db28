use crate::cli::ViewsAction;
use crate::context::CliContext;
use crate::output;
use serde::Serialize;
use timeline_domain::ViewKind;

#[derive(Serialize)]
struct ViewEntry {
    view: String,
    name: String,
    last: bool,
}

pub async fn handle(ctx: &mut CliContext, action: ViewsAction) -> anyhow::Result<()> {
    match action {
        ViewsAction::List => {
            let catalog = &ctx.catalog;
            let entries = catalog
                .views()
                .into_iter()
                .map(|view| ViewEntry {
                    name: catalog.display_name(&view),
                    last: catalog.last_view.as_ref() == Some(&view),
                    view: view.to_string(),
                })
                .collect();
            output::print_list::<ViewEntry>(entries);
        }
        ViewsAction::AddList { id, name } => {
            let added = ctx.catalog.add_list(&id, &name)?;
            ctx.save().await?;
            let view = ViewKind::list(id.trim());
            output::print_data(serde_json::json!({
                "view": view.to_string(),
                "name": ctx.catalog.display_name(&view),
                "added": added,
            }));
        }
        ViewsAction::RemoveList { id } => {
            let entry = ctx.catalog.remove_list(&id)?;
            ctx.save().await?;
            output::print_data(&entry);
        }
        ViewsAction::AddSearch { query } => {
            let added = ctx.catalog.add_search(&query)?;
            ctx.save().await?;
            output::print_data(serde_json::json!({
                "view": ViewKind::search(query.trim()).to_string(),
                "added": added,
            }));
        }
        ViewsAction::RemoveSearch { query } => {
            let removed = ctx.catalog.remove_search(&query)?;
            ctx.save().await?;
            output::print_data(serde_json::json!({ "removed": removed }));
        }
        ViewsAction::SetLast { view } => {
            let view: ViewKind = view.parse()?;
            ctx.catalog.set_last_view(view.clone())?;
            ctx.save().await?;
            output::print_data(serde_json::json!({ "last_view": view.to_string() }));
        }
    }
    Ok(())
}
