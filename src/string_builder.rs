//! 编译与插值共用的字符串缓冲。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            buf: String::with_capacity(n),
        }
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// 暴露内部 `String`，供按 flavor 写占位符/字面量的函数直接追加。
    pub(crate) fn as_mut_string(&mut self) -> &mut String {
        &mut self.buf
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}
