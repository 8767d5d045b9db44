//! The `arguments!`, `partial!` and `call!` macros.
//!
//! All three share one argument syntax: comma separated positional values,
//! optionally followed by `;` and comma separated `name = value` keywords.
//! `__` (double underscore) is matched as a literal token and stands for the
//! placeholder.

/// Builds an [`Arguments`](crate::Arguments) bundle.
///
/// Positional values are converted with [`Value::from`](crate::Value), so
/// anything with a `From` conversion into [`Value`](crate::Value) can be
/// written directly.
///
/// # Syntax
///
/// - `arguments!()` - empty bundle
/// - `arguments!(1, "two", __)` - positional values, with a placeholder
/// - `arguments!(1, __; scale = 2)` - positional values and keywords
/// - `arguments!(; scale = 2)` - keywords only
///
/// # Examples
///
/// ```
/// use lambars_partial::{Value, arguments};
///
/// let bundle = arguments!(1, __, "three"; verbose = true);
/// assert_eq!(bundle.positional, vec![Value::Int(1), Value::Placeholder, Value::from("three")]);
/// assert_eq!(bundle.keyword("verbose"), Some(&Value::Bool(true)));
/// ```
#[macro_export]
macro_rules! arguments {
    // =========================================================================
    // Positional values (internal)
    // =========================================================================

    (@positional [$($collected:expr),*];) => {
        $crate::Arguments::positional(::std::vec![$($collected),*])
    };

    (@positional [$($collected:expr),*]; ; $($rest:tt)*) => {
        $crate::arguments!(@keywords [$($collected),*]; $($rest)*)
    };

    (@positional [$($collected:expr),*]; __ $(,)?) => {
        $crate::arguments!(@positional [$($collected,)* $crate::Value::Placeholder];)
    };

    (@positional [$($collected:expr),*]; __ , $($rest:tt)+) => {
        $crate::arguments!(@positional [$($collected,)* $crate::Value::Placeholder]; $($rest)+)
    };

    (@positional [$($collected:expr),*]; __ ; $($rest:tt)*) => {
        $crate::arguments!(@keywords [$($collected,)* $crate::Value::Placeholder]; $($rest)*)
    };

    (@positional [$($collected:expr),*]; $argument:expr $(,)?) => {
        $crate::arguments!(@positional [$($collected,)* $crate::Value::from($argument)];)
    };

    (@positional [$($collected:expr),*]; $argument:expr , $($rest:tt)+) => {
        $crate::arguments!(@positional [$($collected,)* $crate::Value::from($argument)]; $($rest)+)
    };

    (@positional [$($collected:expr),*]; $argument:expr ; $($rest:tt)*) => {
        $crate::arguments!(@keywords [$($collected,)* $crate::Value::from($argument)]; $($rest)*)
    };

    // =========================================================================
    // Keywords (internal)
    // =========================================================================

    (@keywords [$($collected:expr),*]; $($name:ident = $value:expr),* $(,)?) => {
        $crate::Arguments::positional(::std::vec![$($collected),*])
            $(.with_keyword(::std::stringify!($name), $value))*
    };

    // =========================================================================
    // Entry points
    // =========================================================================

    () => {
        $crate::Arguments::new()
    };

    ($($tokens:tt)+) => {
        $crate::arguments!(@positional []; $($tokens)+)
    };
}

/// Constructs an [`Applied`](crate::Applied) call.
///
/// `partial!(target, args...)` is
/// [`Applied::construct`](crate::Applied::construct) with the arguments
/// written in [`arguments!`](crate::arguments) syntax. The target may be a
/// [`Function`](crate::Function), an [`Applied`](crate::Applied) call (which
/// is flattened) or any [`Value`](crate::Value).
///
/// # Examples
///
/// ```
/// use lambars_partial::{Function, Value, call, partial};
///
/// let divide = Function::new("divide", |arguments| {
///     let numerator = arguments.require(0)?.as_float().unwrap_or(f64::NAN);
///     let denominator = arguments.require(1)?.as_float().unwrap_or(f64::NAN);
///     Ok(Value::Float(numerator / denominator))
/// });
///
/// let halve = partial!(divide, __, 2).unwrap();
/// assert_eq!(call!(halve, 3).unwrap(), Value::Float(1.5));
/// ```
#[macro_export]
macro_rules! partial {
    ($target:expr $(,)?) => {
        $crate::Applied::construct($target, $crate::Arguments::new())
    };

    ($target:expr ; $($rest:tt)*) => {
        $crate::Applied::construct($target, $crate::arguments!(; $($rest)*))
    };

    ($target:expr , $($rest:tt)+) => {
        $crate::Applied::construct($target, $crate::arguments!($($rest)+))
    };
}

/// Invokes a callable with arguments in [`arguments!`](crate::arguments)
/// syntax.
///
/// Works on anything with a `call(Arguments)` method:
/// [`Function`](crate::Function), [`Applied`](crate::Applied) and
/// [`Value`](crate::Value). Calling an applied call with `__` among the
/// arguments returns a further applied call instead of running the target.
///
/// # Examples
///
/// ```
/// use lambars_partial::{Function, Value, call};
///
/// let scale = Function::new("scale", |arguments| {
///     let value = arguments.require_int(0)?;
///     let factor = arguments.keyword("factor").and_then(Value::as_int).unwrap_or(1);
///     Ok(Value::Int(value * factor))
/// })
/// .partial();
///
/// let triple = call!(scale, __; factor = 3).unwrap();
/// assert_eq!(call!(triple, 5).unwrap(), Value::Int(15));
/// assert_eq!(call!(triple, 5; factor = 4).unwrap(), Value::Int(20));
/// ```
#[macro_export]
macro_rules! call {
    ($callable:expr $(,)?) => {
        $callable.call($crate::Arguments::new())
    };

    ($callable:expr ; $($rest:tt)*) => {
        $callable.call($crate::arguments!(; $($rest)*))
    };

    ($callable:expr , $($rest:tt)+) => {
        $callable.call($crate::arguments!($($rest)+))
    };
}
