//! One function per built-in command.

use crate::command::{Dispatch, DispatchContext};
use crate::output::Output;
use crate::panel::DrillDown;

pub fn help(ctx: &DispatchContext<'_>) -> Dispatch {
    let entries = ctx
        .table
        .descriptors()
        .into_iter()
        .map(|descriptor| descriptor.help_entry())
        .collect();
    Dispatch::Append(Output::Help(entries))
}

pub fn projects(_ctx: &DispatchContext<'_>) -> Dispatch {
    Dispatch::Append(Output::Projects(DrillDown::list()))
}

pub fn contribute(_ctx: &DispatchContext<'_>) -> Dispatch {
    Dispatch::Append(Output::Contribute)
}

pub fn contact(_ctx: &DispatchContext<'_>) -> Dispatch {
    Dispatch::Append(Output::Contact)
}

pub fn team(_ctx: &DispatchContext<'_>) -> Dispatch {
    Dispatch::Append(Output::Team(DrillDown::list()))
}

pub fn colors(_ctx: &DispatchContext<'_>) -> Dispatch {
    Dispatch::Append(Output::Colors)
}

pub fn blog(_ctx: &DispatchContext<'_>) -> Dispatch {
    Dispatch::Append(Output::Blog(DrillDown::list()))
}

pub fn dashboard(ctx: &DispatchContext<'_>) -> Dispatch {
    redirect(ctx)
}

// Same destination as `dashboard`; the site has no separate landing route.
pub fn website(ctx: &DispatchContext<'_>) -> Dispatch {
    redirect(ctx)
}

fn redirect(ctx: &DispatchContext<'_>) -> Dispatch {
    let route = ctx.dashboard_route.to_string();
    Dispatch::Navigate {
        output: Output::Redirect {
            route: route.clone(),
        },
        route,
    }
}

pub fn install(ctx: &DispatchContext<'_>) -> Dispatch {
    Dispatch::Append(Output::Install { os: ctx.os })
}

pub fn exit(_ctx: &DispatchContext<'_>) -> Dispatch {
    Dispatch::Append(Output::Exit)
}

pub fn clear(_ctx: &DispatchContext<'_>) -> Dispatch {
    Dispatch::Clear
}

pub fn sudo(_ctx: &DispatchContext<'_>) -> Dispatch {
    Dispatch::EasterEgg
}

pub fn empty(_ctx: &DispatchContext<'_>) -> Dispatch {
    Dispatch::Append(Output::Empty)
}

pub fn not_found(command: &str) -> Dispatch {
    Dispatch::Append(Output::NotFound {
        command: command.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandTable;
    use crate::content::ContentProvider;
    use crate::platform::Os;

    fn ctx_parts() -> (CommandTable, ContentProvider) {
        (CommandTable::standard(), ContentProvider::bundled().unwrap())
    }

    #[test]
    fn test_help_lists_public_commands() {
        let (table, content) = ctx_parts();
        let ctx = DispatchContext {
            table: &table,
            content: &content,
            os: Os::Linux,
            dashboard_route: "/dashboard",
        };
        let Dispatch::Append(Output::Help(entries)) = help(&ctx) else {
            panic!("help should append a help output");
        };
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[0].name, "help");
        assert_eq!(entries[8].summary, "Show installation commands for your OS");
    }

    #[test]
    fn test_dashboard_and_website_navigate() {
        let (table, content) = ctx_parts();
        let ctx = DispatchContext {
            table: &table,
            content: &content,
            os: Os::Mac,
            dashboard_route: "/home",
        };
        let expected = Dispatch::Navigate {
            route: "/home".into(),
            output: Output::Redirect {
                route: "/home".into(),
            },
        };
        assert_eq!(dashboard(&ctx), expected);
        assert_eq!(website(&ctx), expected);
    }

    #[test]
    fn test_install_uses_context_os() {
        let (table, content) = ctx_parts();
        let ctx = DispatchContext {
            table: &table,
            content: &content,
            os: Os::Windows,
            dashboard_route: "/dashboard",
        };
        assert_eq!(install(&ctx), Dispatch::Append(Output::Install { os: Os::Windows }));
    }

    #[test]
    fn test_panels_start_in_list_view() {
        let (table, content) = ctx_parts();
        let ctx = DispatchContext {
            table: &table,
            content: &content,
            os: Os::Linux,
            dashboard_route: "/dashboard",
        };
        assert_eq!(projects(&ctx), Dispatch::Append(Output::Projects(DrillDown::list())));
        assert_eq!(team(&ctx), Dispatch::Append(Output::Team(DrillDown::list())));
        assert_eq!(blog(&ctx), Dispatch::Append(Output::Blog(DrillDown::list())));
    }

    #[test]
    fn test_side_effect_commands() {
        let (table, content) = ctx_parts();
        let ctx = DispatchContext {
            table: &table,
            content: &content,
            os: Os::Linux,
            dashboard_route: "/dashboard",
        };
        assert_eq!(clear(&ctx), Dispatch::Clear);
        assert_eq!(sudo(&ctx), Dispatch::EasterEgg);
        assert_eq!(empty(&ctx), Dispatch::Append(Output::Empty));
    }
}
