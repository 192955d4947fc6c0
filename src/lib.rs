//! halo-sql-strings：带 `$` 插值的 SQL 模板。
//!
//! 模板文本中的 `$name` / `$(expr)` 会变成绑定参数，`$(xs...)` 展开成逗号分隔的多个参数，
//! 嵌入的 `Query` 原位拼接；最终编译成占位符 SQL 与有序参数列表交给驱动执行。
//!
//! ```
//! use halo_space::sql;
//!
//! let q = sql!("select * from users where id = $id and name = $name", id = 7, name = "bob").unwrap();
//! let (sql, args) = q.compile();
//! assert_eq!(sql, "select * from users where id = $1 and name = $2");
//! assert_eq!(args.len(), 2);
//! ```

pub mod arg;
pub mod compile;
pub mod expr;
pub mod flatten;
pub mod flavor;
pub mod interpolate;
pub mod macros;
pub mod query;
#[cfg(test)]
mod query_tests;
pub mod scanner;
#[cfg(test)]
mod scanner_tests;
pub(crate) mod string_builder;
pub mod template;
pub mod value;
pub mod valuer;

pub use crate::arg::{Arg, Literal, Param, literal, splat};
pub use crate::expr::{Accessor, Expr, ExprKind, parse_expr};
pub use crate::flavor::{Flavor, InterpolateError};
pub use crate::query::{Element, Query};
pub use crate::scanner::{ScanOptions, Segment, scan};
pub use crate::template::{Bindings, Part, Template, TemplateError, sql_with, sql_with_options};
pub use crate::value::{SqlDateTime, SqlValue};
pub use crate::valuer::{SqlValuer, ValuerError};

/// 便捷命名空间：允许 `use halo_space::sqlstrings::{...}` 形式导入。
pub mod sqlstrings {
    pub use crate::*;
}
