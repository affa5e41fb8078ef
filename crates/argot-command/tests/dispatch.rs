//! End-to-end dispatch through the registry: tokenizing, lookup, overload
//! selection and typed value access from handlers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use argot_command::{
    parse_arguments, ArgEnum, Argument, CommandBuilder, CommandError, CommandManager,
    ExecuteEvent,
};
use assert_matches::assert_matches;
use async_trait::async_trait;
use parking_lot::Mutex;

/// Lines recorded by handlers
type Log = Arc<Mutex<Vec<String>>>;

fn record(event: &ExecuteEvent<Log>, line: String) {
    event.state().lock().push(line);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Low,
    High,
}

impl ArgEnum for Level {
    fn variants() -> &'static [Self] {
        &[Self::Low, Self::High]
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::High => "HIGH",
        }
    }
}

/// Unprivileged TCP port
struct PortArg {
    name: String,
}

#[async_trait]
impl Argument for PortArg {
    type Value = u16;

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        "Port"
    }

    async fn convert(&self, token: Option<&str>) -> Option<u16> {
        token?.parse().ok().filter(|port| *port >= 1024)
    }
}

/// String argument that counts how often it converts
struct CountingArg {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Argument for CountingArg {
    type Value = String;

    fn name(&self) -> &str {
        "counted"
    }

    fn type_name(&self) -> &str {
        "String"
    }

    async fn convert(&self, token: Option<&str>) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        token.map(str::to_owned)
    }
}

fn manager() -> CommandManager<Log> {
    let manager = CommandManager::new();

    manager
        .register(&CommandBuilder::new("foo").args(|root| {
            root.int("n", |scope, n| {
                scope.execute("Takes a number", move |event| {
                    record(&event, format!("int {}", event.value(&n)));
                    async { Ok(()) }
                });
            });
        }))
        .unwrap();

    manager
        .register(
            &CommandBuilder::with_aliases("say", &["s", "speak"]).args(|root| {
                root.greedy("msg", |scope, msg| {
                    scope.execute("Say something", move |event| {
                        record(&event, format!("say {}", event.value(&msg)));
                        async { Ok(()) }
                    });
                });
            }),
        )
        .unwrap();

    manager
        .register(&CommandBuilder::new("toggle").args(|root| {
            root.boolean("flag", |scope, flag| {
                scope.execute("Flip a flag", move |event| {
                    record(&event, format!("flag {}", event.value(&flag)));
                    async { Ok(()) }
                });
            });
        }))
        .unwrap();

    manager
        .register(&CommandBuilder::new("level").args(|root| {
            root.enumeration::<Level>("level", |scope, level| {
                scope.execute("Pick a level", move |event| {
                    record(&event, format!("level {:?}", event.value(&level)));
                    async { Ok(()) }
                });
            });
        }))
        .unwrap();

    manager
}

async fn run(manager: &CommandManager<Log>, line: &str) -> Result<Vec<String>, CommandError> {
    let log = Log::default();
    manager.invoke_line(line, Arc::clone(&log)).await?;
    let lines = log.lock().clone();
    Ok(lines)
}

#[tokio::test]
async fn test_every_name_resolves_to_the_same_command() {
    let manager = manager();

    for command in manager.commands() {
        let aliases = command.aliases().iter().map(String::as_str);
        for name in std::iter::once(command.name()).chain(aliases) {
            let resolved = manager.command(name).unwrap();
            assert!(Arc::ptr_eq(&resolved, &command), "{name}");
        }
    }
    assert_eq!(
        run(&manager, "speak hi").await.unwrap(),
        run(&manager, "say hi").await.unwrap()
    );
}

#[tokio::test]
async fn test_declaration_order_decides_between_overlapping_overloads() {
    let manager = CommandManager::new();
    manager
        .register(&CommandBuilder::new("pick").args(|root| {
            root.int("number", |scope, _| {
                scope.execute("first", |event: ExecuteEvent<Log>| {
                    record(&event, "first".into());
                    async { Ok(()) }
                });
            });
            root.string("anything", |scope, _| {
                scope.execute("second", |event: ExecuteEvent<Log>| {
                    record(&event, "second".into());
                    async { Ok(()) }
                });
            });
        }))
        .unwrap();

    for _ in 0..3 {
        assert_eq!(run(&manager, "pick 7").await.unwrap(), vec!["first"]);
    }
    assert_eq!(run(&manager, "pick seven").await.unwrap(), vec!["second"]);
}

#[tokio::test]
async fn test_int_overload_arity() {
    let manager = manager();

    assert_eq!(run(&manager, "foo 5").await.unwrap(), vec!["int 5"]);
    assert_matches!(
        run(&manager, "foo bar").await,
        Err(CommandError::NoMatchingOverload { .. })
    );

    let log = Log::default();
    manager
        .invoke(
            vec!["foo".into(), "5".into(), String::new()],
            Arc::clone(&log),
        )
        .await
        .unwrap();
    assert_eq!(*log.lock(), vec!["int 5"]);
}

#[tokio::test]
async fn test_greedy_joins_remaining_tokens() {
    let manager = manager();
    assert_eq!(
        run(&manager, "say hello world").await.unwrap(),
        vec!["say hello world"]
    );
    assert_eq!(
        run(&manager, r#"s "quoted words" and more"#).await.unwrap(),
        vec!["say quoted words and more"]
    );
}

#[tokio::test]
async fn test_boolean_and_enum_tokens() {
    let manager = manager();

    for (line, expected) in [
        ("toggle true", "flag true"),
        ("toggle ON", "flag true"),
        ("toggle Off", "flag false"),
        ("toggle FALSE", "flag false"),
    ] {
        assert_eq!(run(&manager, line).await.unwrap(), vec![expected], "{line}");
    }
    assert_matches!(
        run(&manager, "toggle yes").await,
        Err(CommandError::NoMatchingOverload { .. })
    );

    assert_eq!(run(&manager, "level high").await.unwrap(), vec!["level High"]);
    assert_matches!(
        run(&manager, "level medium").await,
        Err(CommandError::NoMatchingOverload { .. })
    );
}

#[tokio::test]
async fn test_empty_token_array_is_invalid_input() {
    let manager = manager();
    assert_matches!(
        manager.invoke(Vec::new(), Log::default()).await,
        Err(CommandError::InvalidInput { .. })
    );
}

#[tokio::test]
async fn test_unregister_drops_name_and_aliases() {
    let manager = manager();
    let say = manager.command("s").unwrap();

    assert!(manager.unregister(&say));
    for name in ["say", "s", "speak"] {
        assert_matches!(
            run(&manager, &format!("{name} hi")).await,
            Err(CommandError::CommandNotFound { .. })
        );
    }
    assert!(manager.contains("foo"));
}

#[tokio::test]
async fn test_mismatch_reports_usage() {
    let manager = manager();
    let err = run(&manager, "foo 1 2").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "No matching sub command found for args: \"1 2\""
    );
    let usage = err.usage().unwrap();
    assert_eq!(usage.name, "foo");
    assert_eq!(usage.render(), "foo <n:Int>\n    - Takes a number");
}

#[tokio::test]
async fn test_custom_argument_kind() {
    let manager = CommandManager::new();
    manager
        .register(&CommandBuilder::new("listen").args(|root| {
            root.arg(PortArg { name: "port".into() }, |scope, port| {
                scope.execute("Listen on a port", move |event: ExecuteEvent<Log>| {
                    record(&event, format!("port {}", event.value(&port)));
                    async { Ok(()) }
                });
            });
        }))
        .unwrap();

    assert_eq!(run(&manager, "listen 8080").await.unwrap(), vec!["port 8080"]);
    assert_matches!(
        run(&manager, "listen 80").await,
        Err(CommandError::NoMatchingOverload { .. })
    );
    assert_eq!(
        manager.command("listen").unwrap().print_arg_help(),
        "listen <port:Port>\n    - Listen on a port"
    );
}

#[tokio::test]
async fn test_conversion_runs_again_when_mapping() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counting = CountingArg {
        calls: Arc::clone(&calls),
    };

    let manager: CommandManager = CommandManager::new();
    manager
        .register(&CommandBuilder::new("count").args(|root| {
            root.arg(counting, |scope, _| {
                scope.execute_default(|_event| async { Ok(()) });
            });
        }))
        .unwrap();

    manager.invoke_line("count once", ()).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_tokenizer_contract() {
    assert_eq!(
        parse_arguments(r#"foo "a b" c''d"#).unwrap(),
        vec!["foo", "a b", "c\"d"]
    );
}
