//! `sql!`：扫描模板并按名字绑定值的便捷宏。
//!
//! ```
//! use halo_space::{splat, sql};
//!
//! let ids = splat([1_i64, 2, 3]);
//! let q = sql!("select * from t where id in ($(ids...)) and name = $name",
//!     ids = ids,
//!     name = "bob",
//! )
//! .unwrap();
//! assert_eq!(q.compile().0, "select * from t where id in ($1,$2,$3) and name = $4");
//! ```
//!
//! 名字只能是标识符；需要 `user.name` 之类的路径或括号表达式时，
//! 用 `sql_with` 或 `Template::bind` 并以 `Expr::key()` 作为 key。

#[macro_export]
macro_rules! sql {
    ($template:expr $(,)?) => {
        $crate::template::sql_with(
            $template,
            ::std::iter::empty::<(&'static str, $crate::arg::Arg)>(),
        )
    };
    ($template:expr, $($name:ident = $value:expr),+ $(,)?) => {
        $crate::template::sql_with(
            $template,
            [$((::std::stringify!($name), $crate::arg::Arg::from($value))),+],
        )
    };
}
