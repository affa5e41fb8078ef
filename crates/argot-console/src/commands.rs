//! Commands available in the console

use anyhow::anyhow;
use argot_command::{ArgEnum, AutoComplete, BoxError, CommandBuilder, ExecuteEvent, HandlerResult};

use crate::session::Session;

type Event = ExecuteEvent<Session>;

/// Builders for every console command, in help order
pub fn builders() -> Vec<CommandBuilder<Session>> {
    vec![
        help(),
        echo(),
        sum(),
        toggle(),
        mode(),
        complete(),
        exit(),
    ]
}

/// Output verbosity picked with `mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Regular output
    Normal,
    /// Everything
    Verbose,
}

impl ArgEnum for Verbosity {
    fn variants() -> &'static [Self] {
        &[Self::Quiet, Self::Normal, Self::Verbose]
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Self::Quiet => "QUIET",
            Self::Normal => "NORMAL",
            Self::Verbose => "VERBOSE",
        }
    }
}

fn help() -> CommandBuilder<Session> {
    CommandBuilder::with_aliases("help", &["?"])
        .description("Show available commands")
        .args(|root| {
            root.execute("List every command", |event: Event| {
                let session = event.state();
                for command in session.manager().commands() {
                    session.print(format!("{} - {}", command.name(), command.description()));
                }
                async { Ok(()) }
            });

            root.string("command", |scope, name| {
                scope.execute("Show the overloads of a command", move |event: Event| {
                    let session = event.state();
                    let result: HandlerResult = session
                        .manager()
                        .command(&event.value(&name))
                        .map(|command| session.print(command.print_arg_help()))
                        .map_err(BoxError::from);
                    async move { result }
                });
            });
        })
}

fn echo() -> CommandBuilder<Session> {
    CommandBuilder::with_aliases("echo", &["say"])
        .description("Print text back")
        .args(|root| {
            root.greedy("text", |scope, text| {
                scope.execute("Print the text as typed", move |event: Event| {
                    event.state().print(event.value(&text));
                    async { Ok(()) }
                });
            });
        })
}

fn add_ints(a: i32, b: i32) -> anyhow::Result<i32> {
    a.checked_add(b)
        .ok_or_else(|| anyhow!("{a} + {b} does not fit in an Int"))
}

fn sum() -> CommandBuilder<Session> {
    CommandBuilder::with_aliases("sum", &["add"])
        .description("Add two numbers")
        .args(|root| {
            root.int("a", |scope, a| {
                scope.int("b", |scope, b| {
                    scope.execute("Add two integers", move |event: Event| {
                        let result: HandlerResult = add_ints(event.value(&a), event.value(&b))
                            .map(|total| event.state().print(total.to_string()))
                            .map_err(BoxError::from);
                        async move { result }
                    });
                });
            });

            root.double("a", |scope, a| {
                scope.double("b", |scope, b| {
                    scope.execute("Add two decimals", move |event: Event| {
                        let total = event.value(&a) + event.value(&b);
                        event.state().print(total.to_string());
                        async { Ok(()) }
                    });
                });
            });
        })
}

fn toggle() -> CommandBuilder<Session> {
    CommandBuilder::new("toggle")
        .description("Echo a boolean switch")
        .args(|root| {
            root.boolean("flag", |scope, flag| {
                scope.execute("Accepts true/false or on/off", move |event: Event| {
                    let state = if event.value(&flag) { "on" } else { "off" };
                    event.state().print(format!("switch is {state}"));
                    async { Ok(()) }
                });
            });
        })
}

fn mode() -> CommandBuilder<Session> {
    CommandBuilder::new("mode")
        .description("Pick an output verbosity")
        .args(|root| {
            root.enumeration::<Verbosity>("verbosity", |scope, verbosity| {
                scope.execute("QUIET, NORMAL or VERBOSE", move |event: Event| {
                    let verbosity = event.value(&verbosity);
                    event
                        .state()
                        .print(format!("mode set to {}", verbosity.variant_name()));
                    async { Ok(()) }
                });
            });
        })
}

fn complete() -> CommandBuilder<Session> {
    CommandBuilder::new("complete")
        .description("Complete a command name")
        .args(|root| {
            root.string("prefix", |scope, prefix| {
                scope.execute("List names starting with the prefix", move |event: Event| {
                    let session = event.state();
                    let names = session.manager().completions(&event.value(&prefix));
                    if names.is_empty() {
                        session.print("No completions");
                    } else {
                        session.print(names.join(" "));
                    }
                    async { Ok(()) }
                });
            });
        })
}

fn exit() -> CommandBuilder<Session> {
    CommandBuilder::with_aliases("exit", &["quit"])
        .description("Leave the console")
        .args(|root| {
            root.execute_default(|event: Event| {
                event.state().print("Bye");
                event.state().request_exit();
                async { Ok(()) }
            });
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_ints_overflow() {
        assert_eq!(add_ints(2, 3).unwrap(), 5);
        let err = add_ints(i32::MAX, 1).unwrap_err();
        assert!(err.to_string().contains("does not fit"));
    }

    #[test]
    fn test_builder_names_are_unique() {
        let builders = builders();
        let mut names: Vec<_> = builders.iter().map(CommandBuilder::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), builders.len());
    }
}
