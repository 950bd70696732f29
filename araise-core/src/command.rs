//! Command table for the terminal interpreter
//!
//! Input is normalized (trimmed, lowercased) and matched exactly against the
//! registered names. There is no argument parsing and no prefix matching;
//! anything not in the table falls through to the not-found handler.

use std::collections::BTreeMap;

use crate::content::ContentProvider;
use crate::handlers;
use crate::output::{HelpEntry, Output};
use crate::platform::Os;

/// Whether `help` lists a command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Hidden,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Normalized name the input must equal
    pub name: &'static str,
    /// One-line summary shown by `help`
    pub summary: &'static str,
    pub visibility: Visibility,
}

impl CommandDescriptor {
    pub fn public(name: &'static str, summary: &'static str) -> Self {
        Self {
            name,
            summary,
            visibility: Visibility::Public,
        }
    }

    pub fn hidden(name: &'static str, summary: &'static str) -> Self {
        Self {
            name,
            summary,
            visibility: Visibility::Hidden,
        }
    }

    pub fn help_entry(&self) -> HelpEntry {
        HelpEntry {
            name: self.name,
            summary: self.summary,
        }
    }
}

/// Everything a handler may read while producing its result
pub struct DispatchContext<'a> {
    pub table: &'a CommandTable,
    pub content: &'a ContentProvider,
    pub os: Os,
    /// Route requested by `dashboard` and `website`
    pub dashboard_route: &'a str,
}

/// Result of one handler invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Record the output in history
    Append(Output),
    /// Ask the host to navigate, and record the output
    Navigate { route: String, output: Output },
    /// Wipe history and input
    Clear,
    /// Switch to the easter-egg screen without recording anything
    EasterEgg,
}

pub type Handler = fn(&DispatchContext<'_>) -> Dispatch;

#[derive(Clone)]
struct RegisteredCommand {
    descriptor: CommandDescriptor,
    handler: Handler,
}

/// Mapping from normalized command name to handler
#[derive(Clone, Default)]
pub struct CommandTable {
    commands: BTreeMap<&'static str, RegisteredCommand>,
    /// Registration order, used for help listing
    order: Vec<&'static str>,
}

impl std::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTable")
            .field("commands", &self.order)
            .finish()
    }
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The terminal's built-in commands
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.register(
            CommandDescriptor::public("help", "Display available commands"),
            handlers::help,
        );
        table.register(
            CommandDescriptor::public("projects", "List available projects"),
            handlers::projects,
        );
        table.register(
            CommandDescriptor::public("contribute", "View contribution guidelines"),
            handlers::contribute,
        );
        table.register(
            CommandDescriptor::public("contact", "Display contact information"),
            handlers::contact,
        );
        table.register(
            CommandDescriptor::public("team", "Show team member details"),
            handlers::team,
        );
        table.register(
            CommandDescriptor::public("colors", "Customize terminal theme"),
            handlers::colors,
        );
        table.register(
            CommandDescriptor::public("blog", "Read our latest blog posts"),
            handlers::blog,
        );
        table.register(
            CommandDescriptor::public("dashboard", "Return to Dashboard"),
            handlers::dashboard,
        );
        table.register(
            CommandDescriptor::public("install", "Show installation commands for your OS"),
            handlers::install,
        );
        table.register(
            CommandDescriptor::hidden("website", "Return to the website"),
            handlers::website,
        );
        table.register(
            CommandDescriptor::hidden("exit", "Try to leave"),
            handlers::exit,
        );
        table.register(
            CommandDescriptor::hidden("clear", "Clear the terminal"),
            handlers::clear,
        );
        table.register(
            CommandDescriptor::hidden("sudo", "Do not"),
            handlers::sudo,
        );
        table.register(CommandDescriptor::hidden("", "Empty line"), handlers::empty);
        table
    }

    /// Register or replace a command. Names are stored normalized.
    pub fn register(&mut self, descriptor: CommandDescriptor, handler: Handler) {
        let name = descriptor.name;
        debug_assert_eq!(normalize(name), name, "command names must be normalized");
        if self
            .commands
            .insert(name, RegisteredCommand { descriptor, handler })
            .is_none()
        {
            self.order.push(name);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Handler> {
        self.commands.get(name).map(|registered| registered.handler)
    }

    pub fn descriptor(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name).map(|registered| &registered.descriptor)
    }

    /// Public commands in registration order
    pub fn descriptors(&self) -> Vec<&CommandDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.descriptor(name))
            .filter(|descriptor| descriptor.visibility == Visibility::Public)
            .collect()
    }

    /// Every registered name, hidden ones included
    pub fn names(&self) -> Vec<&'static str> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run the handler for an already-normalized command. Unknown names go to
    /// the not-found handler, so this never fails.
    pub fn dispatch(&self, command: &str, ctx: &DispatchContext<'_>) -> Dispatch {
        match self.lookup(command) {
            Some(handler) => handler(ctx),
            None => handlers::not_found(command),
        }
    }
}

/// Trim surrounding whitespace and lowercase the whole line
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ctx<R>(f: impl FnOnce(&DispatchContext<'_>) -> R) -> R {
        let table = CommandTable::standard();
        let content = ContentProvider::bundled().unwrap();
        let ctx = DispatchContext {
            table: &table,
            content: &content,
            os: Os::Linux,
            dashboard_route: "/dashboard",
        };
        f(&ctx)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  HeLp \t"), "help");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("Projects List"), "projects list");
    }

    #[test]
    fn test_standard_table_contains_every_command() {
        let table = CommandTable::standard();
        for name in [
            "help", "projects", "contribute", "contact", "team", "colors", "blog", "dashboard",
            "website", "install", "exit", "clear", "sudo", "",
        ] {
            assert!(table.lookup(name).is_some(), "missing {name:?}");
        }
        assert_eq!(table.len(), 14);
    }

    #[test]
    fn test_help_order_and_visibility() {
        let table = CommandTable::standard();
        let names: Vec<_> = table.descriptors().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "help", "projects", "contribute", "contact", "team", "colors", "blog",
                "dashboard", "install"
            ]
        );
        assert!(!names.contains(&"sudo"));
    }

    #[test]
    fn test_no_prefix_or_alias_matching() {
        let table = CommandTable::standard();
        assert!(table.lookup("hel").is_none());
        assert!(table.lookup("proj").is_none());
        assert!(table.lookup("HELP").is_none());
    }

    #[test]
    fn test_dispatch_unknown_falls_back() {
        with_ctx(|ctx| {
            let result = ctx.table.dispatch("frobnicate", ctx);
            assert_eq!(
                result,
                Dispatch::Append(Output::NotFound {
                    command: "frobnicate".into()
                })
            );
        });
    }

    #[test]
    fn test_register_replaces_without_duplicating_order() {
        let mut table = CommandTable::standard();
        table.register(
            CommandDescriptor::public("help", "Custom help"),
            handlers::contact,
        );
        assert_eq!(table.len(), 14);
        assert_eq!(table.names().iter().filter(|n| **n == "help").count(), 1);
        assert_eq!(table.descriptor("help").unwrap().summary, "Custom help");
        with_ctx(|ctx| {
            assert_eq!(table.dispatch("help", ctx), Dispatch::Append(Output::Contact));
        });
    }
}
