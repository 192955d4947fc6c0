//! Template：模板的编译期入口与绑定。
//!
//! 模板先被扫描成 `Segment` 序列（此时就会报告引号违规与表达式错误），
//! 再由调用方提供的 `Bindings` 为每个表达式给出值，得到 `Query`。

use crate::arg::{Arg, Literal};
use crate::expr::{Expr, parse_expr};
use crate::query::Query;
use crate::scanner::{ScanOptions, Segment, scan};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error(
        "sql template interpolating `{expr}` into a quoted string is not allowed; \
         bind the whole string as a parameter or escape the marker"
    )]
    QuotingViolation { expr: String, offset: usize },
    #[error("sql template malformed expression at byte {offset}: {reason}")]
    MalformedExpression { offset: usize, reason: String },
    #[error("sql template unsupported construct: {0}")]
    UnsupportedConstruct(String),
    #[error("sql template no value bound for `{0}`")]
    Unbound(String),
}

/// 预先切分好的模板片段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// 原样的 SQL 文本（不会再识别标记与转义）。
    Text(String),
    /// 一个表达式的源码（不含标记）。
    Interp(String),
}

/// 扫描后的模板，可以多次绑定不同的值。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// 以默认（严格）选项扫描模板。
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        Self::parse_with(source, &ScanOptions::default())
    }

    pub fn parse_with(source: &str, options: &ScanOptions) -> Result<Self, TemplateError> {
        Ok(Self {
            segments: scan(source, options)?,
        })
    }

    /// 由预先切分好的片段构造。
    ///
    /// 引号状态跨 `Part::Text` 延续；引号内的 `Part::Interp` 在严格模式下报错，
    /// 宽松模式下按 `标记 + 源码` 作为文本输出。
    pub fn from_parts<I>(parts: I, options: &ScanOptions) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = Part>,
    {
        let mut segments = Vec::new();
        let mut in_quote = false;
        let mut offset = 0usize;

        for part in parts {
            match part {
                Part::Text(text) => {
                    let quotes = text.chars().filter(|&c| c == '\'').count();
                    in_quote ^= quotes % 2 == 1;
                    offset += text.len();
                    if !text.is_empty() {
                        segments.push(Segment::Literal(Literal::new(text)));
                    }
                }
                Part::Interp(source) => {
                    let width = options.marker.len_utf8() + source.len();
                    if in_quote {
                        if !options.allow_markers_in_strings {
                            return Err(TemplateError::QuotingViolation {
                                expr: format!("{}{}", options.marker, source),
                                offset,
                            });
                        }
                        // 引号内不解析，源码原样作为文本。
                        segments.push(Segment::Literal(Literal::new(format!(
                            "{}{}",
                            options.marker, source
                        ))));
                    } else {
                        let expr = parse_interp(&source, offset)?;
                        segments.push(if expr.is_splat() {
                            Segment::Splat(expr)
                        } else {
                            Segment::Expr(expr)
                        });
                    }
                    offset += width;
                }
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// 模板中出现的全部表达式（按出现顺序，含 splat）。
    pub fn expressions(&self) -> impl Iterator<Item = &Expr> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Literal(_) => None,
            Segment::Expr(e) | Segment::Splat(e) => Some(e),
        })
    }

    /// 为每个表达式取值并构造 `Query`。
    pub fn bind<B>(&self, bindings: &B) -> Result<Query, TemplateError>
    where
        B: Bindings + ?Sized,
    {
        let mut args = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            let arg = match segment {
                Segment::Literal(lit) => Arg::Literal(lit.clone()),
                Segment::Expr(expr) => resolve(bindings, expr)?,
                Segment::Splat(expr) => Arg::Splat(resolve(bindings, expr)?.into_splat_items()),
            };
            args.push(arg);
        }
        Ok(Query::new(args))
    }
}

fn resolve<B>(bindings: &B, expr: &Expr) -> Result<Arg, TemplateError>
where
    B: Bindings + ?Sized,
{
    bindings.resolve(expr).ok_or_else(|| {
        debug!(expr = expr.source(), "no value bound for template expression");
        TemplateError::Unbound(expr.source().to_string())
    })
}

/// 预切分片段中的表达式必须恰好是一个完整表达式。
fn parse_interp(source: &str, offset: usize) -> Result<Expr, TemplateError> {
    let (expr, end) = parse_expr(source, 0).map_err(|e| match e {
        TemplateError::MalformedExpression { offset: at, reason } => {
            TemplateError::MalformedExpression {
                offset: offset + at,
                reason,
            }
        }
        other => other,
    })?;
    if end != source.len() {
        return Err(TemplateError::UnsupportedConstruct(format!(
            "`{source}` is not a single expression"
        )));
    }
    Ok(expr)
}

/// 调用方的求值环境：为模板中的表达式给出值。
pub trait Bindings {
    fn resolve(&self, expr: &Expr) -> Option<Arg>;
}

/// 按 `Expr::key()` 查找。
impl<S> Bindings for HashMap<String, Arg, S>
where
    S: std::hash::BuildHasher,
{
    fn resolve(&self, expr: &Expr) -> Option<Arg> {
        self.get(expr.key()).cloned()
    }
}

impl<F> Bindings for F
where
    F: Fn(&Expr) -> Option<Arg>,
{
    fn resolve(&self, expr: &Expr) -> Option<Arg> {
        self(expr)
    }
}

/// 用默认（严格）选项扫描 `source` 并按名字绑定。
pub fn sql_with<I, K>(source: &str, bindings: I) -> Result<Query, TemplateError>
where
    I: IntoIterator<Item = (K, Arg)>,
    K: Into<String>,
{
    sql_with_options(source, &ScanOptions::default(), bindings)
}

/// 同 [`sql_with`]，扫描选项由调用方给出。
pub fn sql_with_options<I, K>(
    source: &str,
    options: &ScanOptions,
    bindings: I,
) -> Result<Query, TemplateError>
where
    I: IntoIterator<Item = (K, Arg)>,
    K: Into<String>,
{
    let map: HashMap<String, Arg> = bindings.into_iter().map(|(k, v)| (k.into(), v)).collect();
    Template::parse_with(source, options)?.bind(&map)
}
