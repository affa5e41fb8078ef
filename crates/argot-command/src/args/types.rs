//! Built-in argument kinds

use async_trait::async_trait;

use super::{eq_ignore_case, ArgKind, Argument};

/// Argument that takes a boolean: `true`/`on` or `false`/`off`, any case
#[derive(Debug, Clone)]
pub struct BooleanArg {
    name: String,
}

impl BooleanArg {
    /// Create a boolean argument
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Argument for BooleanArg {
    type Value = bool;

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        "Boolean"
    }

    async fn convert(&self, token: Option<&str>) -> Option<bool> {
        let token = token?;
        if eq_ignore_case(token, "true") || eq_ignore_case(token, "on") {
            Some(true)
        } else if eq_ignore_case(token, "false") || eq_ignore_case(token, "off") {
            Some(false)
        } else {
            None
        }
    }
}

macro_rules! numeric_arg {
    ($(#[$doc:meta])* $arg:ident, $value:ty, $type_name:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $arg {
            name: String,
        }

        impl $arg {
            #[doc = concat!("Create a new `", $type_name, "` argument")]
            pub fn new(name: impl Into<String>) -> Self {
                Self { name: name.into() }
            }
        }

        #[async_trait]
        impl Argument for $arg {
            type Value = $value;

            fn name(&self) -> &str {
                &self.name
            }

            fn type_name(&self) -> &str {
                $type_name
            }

            async fn convert(&self, token: Option<&str>) -> Option<$value> {
                token?.parse().ok()
            }
        }
    };
}

numeric_arg!(
    /// Argument that takes an `i32`
    IntArg,
    i32,
    "Int"
);
numeric_arg!(
    /// Argument that takes an `i64`
    LongArg,
    i64,
    "Long"
);
numeric_arg!(
    /// Argument that takes an `f32`
    FloatArg,
    f32,
    "Float"
);
numeric_arg!(
    /// Argument that takes an `f64`
    DoubleArg,
    f64,
    "Double"
);

/// Enum whose variants can be matched by name.
///
/// ```
/// use argot_command::ArgEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Mode {
///     Fast,
///     Safe,
/// }
///
/// impl ArgEnum for Mode {
///     fn variants() -> &'static [Self] {
///         &[Self::Fast, Self::Safe]
///     }
///
///     fn variant_name(&self) -> &'static str {
///         match self {
///             Self::Fast => "FAST",
///             Self::Safe => "SAFE",
///         }
///     }
/// }
/// ```
pub trait ArgEnum: Copy + Send + Sync + 'static {
    /// Every variant, in declaration order
    fn variants() -> &'static [Self];

    /// Constant name of a variant
    fn variant_name(&self) -> &'static str;
}

/// Argument that takes a variant of `E`, matched case-insensitively by name
#[derive(Debug, Clone)]
pub struct EnumArg<E: 'static> {
    name: String,
    values: &'static [E],
}

impl<E: ArgEnum> EnumArg<E> {
    /// Create an enum argument
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: E::variants(),
        }
    }
}

#[async_trait]
impl<E: ArgEnum> Argument for EnumArg<E> {
    type Value = E;

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        "Enum"
    }

    async fn convert(&self, token: Option<&str>) -> Option<E> {
        let token = token?;
        self.values
            .iter()
            .copied()
            .find(|value| eq_ignore_case(value.variant_name(), token))
    }
}

/// Argument that must be its name (any case) or one of its aliases (exact case)
#[derive(Debug, Clone)]
pub struct LiteralArg {
    name: String,
    aliases: Vec<String>,
}

impl LiteralArg {
    /// Create a literal argument
    pub fn new(name: impl Into<String>, aliases: &[&str]) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
        }
    }

    /// Aliases of this literal
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn matches(&self, token: &str) -> bool {
        eq_ignore_case(token, &self.name) || self.aliases.iter().any(|alias| alias == token)
    }
}

#[async_trait]
impl Argument for LiteralArg {
    type Value = String;

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        "Literal"
    }

    fn kind(&self) -> ArgKind {
        ArgKind::Literal
    }

    async fn convert(&self, token: Option<&str>) -> Option<String> {
        token.filter(|token| self.matches(token)).map(str::to_owned)
    }

    fn describe(&self) -> String {
        format!("[{}]", self.name)
    }
}

/// Argument that takes any single token
#[derive(Debug, Clone)]
pub struct StringArg {
    name: String,
}

impl StringArg {
    /// Create a string argument
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Argument for StringArg {
    type Value = String;

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        "String"
    }

    async fn convert(&self, token: Option<&str>) -> Option<String> {
        token.map(str::to_owned)
    }
}

/// Argument that takes every remaining token, joined by single spaces
#[derive(Debug, Clone)]
pub struct GreedyStringArg {
    name: String,
}

impl GreedyStringArg {
    /// Create a greedy string argument
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Argument for GreedyStringArg {
    type Value = String;

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        "GreedyString"
    }

    fn kind(&self) -> ArgKind {
        ArgKind::Greedy
    }

    async fn convert(&self, token: Option<&str>) -> Option<String> {
        token.map(str::to_owned)
    }
}
