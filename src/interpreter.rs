/// The evaluator module executes postfix token sequences.
///
/// The evaluator scans a postfix sequence once, maintaining a stack of
/// operands, resolving variables in a caller-supplied environment and
/// applying registered operators and functions. It is the back end of the
/// interpreter.
///
/// # Responsibilities
/// - Resolves variables and reports unknown ones.
/// - Applies operators and functions with exact operand counts.
/// - Applies the division-by-zero policy.
/// - Rejects sequences that leave anything but a single number.
pub mod evaluator;
/// The lexer module tokenizes source text.
///
/// The lexer reads the raw text and produces tokens for numbers, strings,
/// variables, function names, operators and structural characters. This is
/// the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens.
/// - Matches registered operator symbols longest-first.
/// - Tells unary from binary uses of the same symbol.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The registry module resolves operators and functions.
///
/// The registry maps operator symbols and function names to their precedence,
/// associativity, arity and behavior, and holds the division-by-zero policy.
///
/// # Responsibilities
/// - Provides the default operators, functions and precedence levels.
/// - Accepts new definitions, where the latest one for a key wins.
/// - Reports unknown symbols and names.
pub mod registry;
/// The shunting-yard module reorders infix tokens into postfix order.
///
/// # Responsibilities
/// - Resolves precedence and associativity.
/// - Matches parentheses and argument separators.
/// - Checks function calls against their declared arity.
pub mod shunting_yard;
/// The token module defines the units shared by every stage.
///
/// Tokens are a tagged union; every consumer matches all variants.
pub mod token;
/// The value module defines the operands of the evaluation stack.
pub mod value;
