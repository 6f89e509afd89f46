/// 失败元素的处理策略，供[`CatchSeq::resolve`](crate::CatchSeq::resolve)使用。
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum OnFailure<T> {
    /// 丢弃失败元素，仅保留成功元素的值。
    Drop,
    /// 以给定值替换失败元素，序列长度不变。
    Replace(T),
    /// 遇到首个失败元素时结束序列。
    Stop,
}

impl<T> OnFailure<T> {
    pub fn new_drop() -> Self {
        OnFailure::Drop
    }
    pub fn new_replace(value: T) -> Self {
        OnFailure::Replace(value)
    }
    pub fn new_stop() -> Self {
        OnFailure::Stop
    }
}

impl<T> Default for OnFailure<T> {
    fn default() -> Self {
        OnFailure::Drop
    }
}
