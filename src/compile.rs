//! Compile：把展开后的 Query 编译成占位符 SQL 与有序参数列表。

use crate::arg::Param;
use crate::flavor::Flavor;
use crate::query::{Element, Query};
use crate::string_builder::StringBuilder;

struct CompileContext<F> {
    buf: StringBuilder,
    values: Vec<Param>,
    placeholder: F,
}

impl<F> CompileContext<F>
where
    F: FnMut(usize, &mut String),
{
    fn write_element(&mut self, element: &Element) {
        match element {
            Element::Literal(lit) => self.buf.write_str(lit.as_str()),
            Element::Param(p) => self.write_placeholder_and_push(p.clone()),
        }
    }

    fn write_placeholder_and_push(&mut self, param: Param) {
        let idx = self.values.len() + 1;
        (self.placeholder)(idx, self.buf.as_mut_string());
        self.values.push(param);
    }
}

fn compile_elements<F>(elements: &[Element], placeholder: F) -> (String, Vec<Param>)
where
    F: FnMut(usize, &mut String),
{
    let mut ctx = CompileContext {
        buf: StringBuilder::with_capacity(estimate_len(elements)),
        values: Vec::new(),
        placeholder,
    };
    for e in elements {
        ctx.write_element(e);
    }
    (ctx.buf.into_string(), ctx.values)
}

fn estimate_len(elements: &[Element]) -> usize {
    elements
        .iter()
        .map(|e| match e {
            Element::Literal(lit) => lit.as_str().len(),
            Element::Param(_) => 3,
        })
        .sum()
}

impl Query {
    /// 使用默认占位符 `$1, $2, ...` 编译。
    pub fn compile(&self) -> (String, Vec<Param>) {
        self.compile_with_flavor(Flavor::default())
    }

    /// 使用 `flavor` 的占位符风格编译。
    pub fn compile_with_flavor(&self, flavor: Flavor) -> (String, Vec<Param>) {
        compile_elements(self.elements(), |idx, out| {
            flavor.write_placeholder(idx, out)
        })
    }

    /// 使用自定义占位符函数编译，`placeholder` 接收从 1 开始的参数序号。
    ///
    /// ```
    /// use halo_space::sql;
    ///
    /// let q = sql!("select * from t where a = $a and b = $b", a = 1, b = 2).unwrap();
    /// let (sql, args) = q.compile_with(|i| format!(":p{i}"));
    /// assert_eq!(sql, "select * from t where a = :p1 and b = :p2");
    /// assert_eq!(args.len(), 2);
    /// ```
    pub fn compile_with<F>(&self, placeholder: F) -> (String, Vec<Param>)
    where
        F: Fn(usize) -> String,
    {
        compile_elements(self.elements(), |idx, out| out.push_str(&placeholder(idx)))
    }
}
