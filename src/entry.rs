use std::fmt::{Display, Formatter};

/// 流水线中单个位置的求值结果。
///
/// 每个元素都携带数据源读取到的原始值`original`，该值在整条流水线中保持不变。
/// 如果生产者需要合法地产生“缺失值”，使用`T = Option<V>`表示。
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Entry<T, O, X> {
    /// 求值成功，`value`为当前转换后的值。
    Success { value: T, original: O },
    /// 求值失败，`error`为首次触发的失败，后续转换不会再作用于此元素。
    Failure { error: X, original: O },
}

impl<T, O, X> Entry<T, O, X> {
    pub fn success(value: T, original: O) -> Self {
        Entry::Success { value, original }
    }
    pub fn failure(error: X, original: O) -> Self {
        Entry::Failure { error, original }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Entry::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Entry::Failure { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Entry::Success { value, .. } => Some(value),
            Entry::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&X> {
        match self {
            Entry::Success { .. } => None,
            Entry::Failure { error, .. } => Some(error),
        }
    }

    pub fn original(&self) -> &O {
        match self {
            Entry::Success { original, .. } | Entry::Failure { original, .. } => original,
        }
    }

    /// 以新值替换成功元素的值，保留原始值。
    ///
    /// 失败元素没有值可替换，仅转换值类型后原样返回。
    pub fn with_value<N>(self, new_value: N) -> Entry<N, O, X> {
        match self {
            Entry::Success { original, .. } => Entry::Success { value: new_value, original },
            Entry::Failure { error, original } => Entry::Failure { error, original },
        }
    }

    /// 转为失败元素，保留原始值。
    pub fn to_failure<N>(self, error: X) -> Entry<N, O, X> {
        Entry::Failure { error, original: self.into_original() }
    }

    /// 对成功元素的值执行可能失败的转换。
    ///
    /// 失败元素短路：`f`不会被调用，错误和原始值原样传递。
    pub fn and_then<N>(self, f: impl FnOnce(T) -> Result<N, X>) -> Entry<N, O, X> {
        match self {
            Entry::Success { value, original } => match f(value) {
                Ok(value) => Entry::Success { value, original },
                Err(error) => Entry::Failure { error, original },
            },
            Entry::Failure { error, original } => Entry::Failure { error, original },
        }
    }

    /// 对成功元素的值执行不会失败的转换，失败元素同样短路。
    pub fn map_value<N>(self, f: impl FnOnce(T) -> N) -> Entry<N, O, X> {
        match self {
            Entry::Success { value, original } => Entry::Success { value: f(value), original },
            Entry::Failure { error, original } => Entry::Failure { error, original },
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Entry::Success { value, .. } => Some(value),
            Entry::Failure { .. } => None,
        }
    }

    pub fn into_failure(self) -> Option<(O, X)> {
        match self {
            Entry::Success { .. } => None,
            Entry::Failure { error, original } => Some((original, error)),
        }
    }

    pub fn into_result(self) -> Result<T, X> {
        match self {
            Entry::Success { value, .. } => Ok(value),
            Entry::Failure { error, .. } => Err(error),
        }
    }

    pub fn into_original(self) -> O {
        match self {
            Entry::Success { original, .. } | Entry::Failure { original, .. } => original,
        }
    }
}

impl<T: Display, O: Display, X: Display> Display for Entry<T, O, X> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Entry::Success { value, original } => write!(f, "ok({value} <- {original})"),
            Entry::Failure { error, original } => write!(f, "err({error} <- {original})"),
        }
    }
}
