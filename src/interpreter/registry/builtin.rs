use crate::interpreter::registry::{
    function::FunctionDefinition,
    operator::{Associativity, OperatorDefinition},
};

/// Precedence of `+` and `-`.
pub const ADDITIVE_PRECEDENCE: i32 = 10;
/// Precedence of `*` and `/`.
pub const MULTIPLICATIVE_PRECEDENCE: i32 = 20;
/// Precedence of `^`, the highest among binary operators.
pub const POWER_PRECEDENCE: i32 = 30;
/// Precedence of unary `+` and `-`, the highest overall.
pub const UNARY_PRECEDENCE: i32 = 40;

/// Type alias for builtin function bodies.
type BuiltinFn = fn(&[f64]) -> f64;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides a name, an exact arity and a function pointer over
/// numeric arguments. The macro produces `BUILTIN_TABLE` (internal metadata)
/// and `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of the functions every new registry starts with.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sin"   => { arity: 1, func: |a| a[0].sin() },
    "cos"   => { arity: 1, func: |a| a[0].cos() },
    "tan"   => { arity: 1, func: |a| a[0].tan() },
    "asin"  => { arity: 1, func: |a| a[0].asin() },
    "acos"  => { arity: 1, func: |a| a[0].acos() },
    "atan"  => { arity: 1, func: |a| a[0].atan() },
    "sinh"  => { arity: 1, func: |a| a[0].sinh() },
    "cosh"  => { arity: 1, func: |a| a[0].cosh() },
    "tanh"  => { arity: 1, func: |a| a[0].tanh() },
    "sqrt"  => { arity: 1, func: |a| a[0].sqrt() },
    "abs"   => { arity: 1, func: |a| a[0].abs() },
    "ln"    => { arity: 1, func: |a| a[0].ln() },
    "log10" => { arity: 1, func: |a| a[0].log10() },
    "exp"   => { arity: 1, func: |a| a[0].exp() },
    "floor" => { arity: 1, func: |a| a[0].floor() },
    "ceil"  => { arity: 1, func: |a| a[0].ceil() },
    "round" => { arity: 1, func: |a| a[0].round() },
    "min"   => { arity: 2, func: |a| a[0].min(a[1]) },
    "max"   => { arity: 2, func: |a| a[0].max(a[1]) },
    "avg"   => { arity: 2, func: |a| (a[0] + a[1]) / 2.0 },
    "atan2" => { arity: 2, func: |a| a[0].atan2(a[1]) },
    "hypot" => { arity: 2, func: |a| a[0].hypot(a[1]) },
}

/// Returns the default operator set: `+ - * / ^` and unary `+ -`.
pub fn default_operators() -> Vec<OperatorDefinition> {
    use Associativity::{Left, Right};

    vec![OperatorDefinition::binary("+", ADDITIVE_PRECEDENCE, Left, |a, b| a + b),
         OperatorDefinition::binary("-", ADDITIVE_PRECEDENCE, Left, |a, b| a - b),
         OperatorDefinition::binary("*", MULTIPLICATIVE_PRECEDENCE, Left, |a, b| a * b),
         OperatorDefinition::division("/", MULTIPLICATIVE_PRECEDENCE, Left, |a, b| a / b),
         OperatorDefinition::binary("^", POWER_PRECEDENCE, Right, f64::powf),
         OperatorDefinition::prefix("+", UNARY_PRECEDENCE, |a| a),
         OperatorDefinition::prefix("-", UNARY_PRECEDENCE, |a| -a),]
}

/// Returns the default function set.
pub fn default_functions() -> impl Iterator<Item = FunctionDefinition> {
    BUILTIN_TABLE.iter().map(|def| {
                            let func = def.func;
                            FunctionDefinition::numeric(def.name, def.arity, func)
                        })
}
