//! Flatten：把嵌套的 `Arg`（Query / Splat）递归展开成只含 Literal 与参数的扁平序列。

use crate::arg::{Arg, Literal, Param};
use crate::query::Element;

/// Splat 成员之间插入的分隔符。
const SPLAT_SEPARATOR: &str = ",";

/// 按从左到右的顺序展开 `arg`，追加到 `out`。
pub(crate) fn flatten_into(arg: Arg, out: &mut Vec<Element>) {
    match arg {
        Arg::Literal(lit) => out.push(Element::Literal(lit)),
        Arg::Value(v) => out.push(Element::Param(Param::Value(v))),
        Arg::Valuer(v) => out.push(Element::Param(Param::Valuer(v))),
        // Query 在构造时已经展开过，直接原位拼接。
        Arg::Query(q) => out.extend(q.into_elements()),
        Arg::Splat(items) => {
            for (i, item) in items.into_iter().enumerate() {
                if i > 0 {
                    out.push(Element::Literal(Literal::new(SPLAT_SEPARATOR)));
                }
                flatten_into(item, out);
            }
        }
    }
}

/// 展开一组原始参数。
pub(crate) fn flatten<I>(args: I) -> Vec<Element>
where
    I: IntoIterator<Item = Arg>,
{
    let mut out = Vec::new();
    for a in args {
        flatten_into(a, &mut out);
    }
    out
}
