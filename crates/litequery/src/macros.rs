//! Macros for building bound argument lists.

/// Builds a `Vec<Value>` of bound arguments from anything convertible into a
/// [`Value`](crate::Value).
///
/// ```
/// use litequery::{args, Value};
///
/// let params = args![1, "soar".to_string(), 2.5, Option::<i64>::None];
/// assert_eq!(params[0], Value::Integer(1));
/// assert_eq!(params[3], Value::Null);
///
/// let none = args![];
/// assert!(none.is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Value::from($value)),+]
    };
}
