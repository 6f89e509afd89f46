use crate::config::OnFailure;
use crate::entry::Entry;
use crate::err::CatchErr;
use crate::op::{Fallible, FilterIter, Filtered, Mapped, OnEachFailure, Pure, log_failure};
use crate::output::{DefaultFailures, Resolve};
use itertools::{Either, Itertools};
use std::fmt::{Debug, Display};
use std::iter::Peekable;

/// 阶段`S`产生的元素类型
pub type EntryOf<S> = Entry<<S as CatchSeq>::Value, <S as CatchSeq>::Orig, <S as CatchSeq>::Err>;

/// 按元素状态过滤时使用的断言
pub type EntryPredicate<S> = fn(&EntryOf<S>) -> bool;

/// 可捕获失败的惰性序列中的一个阶段。
///
/// 阶段本身不可变，只持有上游阶段和转换函数或断言，不持有任何迭代状态。每次调用[`iter`](CatchSeq::iter)
/// 都会得到一个全新的单次迭代器，因此同一个阶段可以被多次、交替地迭代。
///
/// 组合方法按值接收阶段并返回新的阶段；如果需要基于同一个上游构建多条流水线，可以在`&S`上组合，
/// 或者克隆上游阶段。
///
/// ```
/// use catchseq::{CatchSeq, CatchingExt};
///
/// let parsed = vec!["1", "a", "2"].catching().map(|s| s.parse::<i32>());
/// assert_eq!(parsed.drop_failures().collect::<Vec<_>>(), vec![1, 2]);
/// assert_eq!(parsed.default_failures(|| 0).collect::<Vec<_>>(), vec![1, 0, 2]);
/// ```
pub trait CatchSeq {
    /// 当前值的类型
    type Value;
    /// 数据源原始值的类型
    type Orig;
    /// 失败的类型
    type Err;
    type Iter<'a>: Iterator<Item = Entry<Self::Value, Self::Orig, Self::Err>>
    where
        Self: 'a;

    /// 获取一个新的迭代器。
    fn iter(&self) -> Self::Iter<'_>;

    /* **************************************** 组合 **************************************** */

    /// 追加可能失败的转换，`Err`会被转为携带原始值的失败元素。
    fn map<N, F>(self, transform: F) -> Mapped<Self, F, Fallible>
    where
        Self: Sized,
        F: Fn(Self::Value) -> Result<N, Self::Err>,
    {
        Mapped::new(self, transform)
    }

    /// 追加不会失败的转换。
    fn map_ok<N, F>(self, transform: F) -> Mapped<Self, F, Pure>
    where
        Self: Sized,
        F: Fn(Self::Value) -> N,
    {
        Mapped::new(self, transform)
    }

    /// 追加过滤，仅保留`predicate(entry) == keep_when`的元素。
    fn filter<P>(self, predicate: P, keep_when: bool) -> Filtered<Self, P>
    where
        Self: Sized,
        P: Fn(&EntryOf<Self>) -> bool,
    {
        Filtered::new(self, predicate, keep_when)
    }

    fn keep<P>(self, predicate: P) -> Filtered<Self, P>
    where
        Self: Sized,
        P: Fn(&EntryOf<Self>) -> bool,
    {
        self.filter(predicate, true)
    }

    fn reject<P>(self, predicate: P) -> Filtered<Self, P>
    where
        Self: Sized,
        P: Fn(&EntryOf<Self>) -> bool,
    {
        self.filter(predicate, false)
    }

    /// 仅保留成功元素，保留元素结构。
    fn successes(self) -> Filtered<Self, EntryPredicate<Self>>
    where
        Self: Sized,
    {
        self.keep(Entry::is_success as EntryPredicate<Self>)
    }

    /// 仅保留失败元素，保留元素结构。
    fn failures(self) -> Filtered<Self, EntryPredicate<Self>>
    where
        Self: Sized,
    {
        self.keep(Entry::is_failure as EntryPredicate<Self>)
    }

    /// 对每个失败元素调用`observer(original, error)`，不改变序列内容和顺序。
    fn on_each_failure<F>(self, observer: F) -> OnEachFailure<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Orig, &Self::Err),
    {
        OnEachFailure::new(self, observer)
    }

    /// 通过`tracing`以`WARN`级别记录每个失败元素。
    #[allow(clippy::type_complexity)]
    fn log_failures(self) -> OnEachFailure<Self, fn(&Self::Orig, &Self::Err)>
    where
        Self: Sized,
        Self::Orig: Debug,
        Self::Err: Display,
    {
        self.on_each_failure(log_failure::<Self::Orig, Self::Err> as fn(&Self::Orig, &Self::Err))
    }

    /* **************************************** 终结 **************************************** */

    /// 丢弃失败元素，按原顺序产生成功元素的值。
    fn drop_failures(&self) -> impl Iterator<Item = Self::Value> {
        FilterIter::new(self.iter(), Entry::is_failure as EntryPredicate<Self>, false).filter_map(Entry::into_value)
    }

    fn filter_successes(&self) -> impl Iterator<Item = Self::Value> {
        FilterIter::new(self.iter(), Entry::is_success as EntryPredicate<Self>, true).filter_map(Entry::into_value)
    }

    /// 按原顺序产生失败元素的`(original, error)`。
    fn filter_failures(&self) -> impl Iterator<Item = (Self::Orig, Self::Err)> {
        FilterIter::new(self.iter(), Entry::is_failure as EntryPredicate<Self>, true).filter_map(Entry::into_failure)
    }

    /// 以`supplier()`替换失败元素，序列长度不变。
    fn default_failures<F>(&self, supplier: F) -> DefaultFailures<Self::Iter<'_>, F>
    where
        F: FnMut() -> Self::Value,
    {
        DefaultFailures::new(self.iter(), supplier)
    }

    /// 每个元素对应一个`Option`，失败元素为`None`。
    fn to_sequence(&self) -> impl Iterator<Item = Option<Self::Value>> {
        self.iter().map(Entry::into_value)
    }

    /// 仅产生存在的值：跳过失败元素以及值为`None`的成功元素。
    fn to_not_null_sequence<V>(&self) -> impl Iterator<Item = V>
    where
        Self: CatchSeq<Value = Option<V>>,
    {
        self.iter().filter_map(Entry::into_value).flatten()
    }

    fn resolve(&self, policy: OnFailure<Self::Value>) -> Resolve<Self::Iter<'_>, Self::Value>
    where
        Self::Value: Clone,
    {
        Resolve::new(self.iter(), policy)
    }

    /// 一次性消费整个序列，分别收集成功值和失败的`(original, error)`。
    fn partition(&self) -> (Vec<Self::Value>, Vec<(Self::Orig, Self::Err)>) {
        self.iter().partition_map(|entry| match entry {
            Entry::Success { value, .. } => Either::Left(value),
            Entry::Failure { error, original } => Either::Right((original, error)),
        })
    }

    /// 收集全部成功值；遇到首个失败元素即停止拉取并返回[`CatchErr::ElementFailed`]。
    fn try_collect(&self) -> Result<Vec<Self::Value>, CatchErr>
    where
        Self::Orig: Debug,
        Self::Err: Display,
    {
        self.iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                Entry::Success { value, .. } => Ok(value),
                Entry::Failure { error, original } => Err(CatchErr::element_failed(index, &original, &error)),
            })
            .collect()
    }

    /// 可预读的迭代器，预读不会重复执行转换函数。
    fn cursor(&self) -> Peekable<Self::Iter<'_>> {
        self.iter().peekable()
    }
}

impl<S: CatchSeq + ?Sized> CatchSeq for &S {
    type Value = S::Value;
    type Orig = S::Orig;
    type Err = S::Err;
    type Iter<'a>
        = S::Iter<'a>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        (**self).iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{CatchingExt, Source};
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::num::ParseIntError;

    fn parsed(input: Vec<&'static str>) -> impl CatchSeq<Value = i32, Orig = &'static str, Err = ParseIntError> {
        input.catching().map(|s: &str| s.parse::<i32>())
    }

    #[test]
    fn test_drop_failures() {
        assert_eq!(parsed(vec!["1", "a", "2"]).drop_failures().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_default_failures() {
        assert_eq!(parsed(vec!["1", "a", "2"]).default_failures(|| 0).collect::<Vec<_>>(), vec![1, 0, 2]);
    }

    #[test]
    fn test_on_each_failure_scenario() {
        let seen = RefCell::new(Vec::new());
        let stage = parsed(vec!["1", "a", "2"]).on_each_failure(|original, _| seen.borrow_mut().push(*original));
        assert_eq!(stage.drop_failures().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(*seen.borrow(), vec!["a"]);
    }

    #[test]
    fn test_empty_input() {
        let stage = parsed(Vec::new());
        assert!(stage.iter().next().is_none());
        assert_eq!(stage.drop_failures().count(), 0);
        assert_eq!(stage.default_failures(|| 0).count(), 0);
        assert_eq!(stage.filter_successes().count(), 0);
        assert_eq!(stage.filter_failures().count(), 0);
        assert_eq!(stage.to_sequence().count(), 0);
        assert_eq!(stage.resolve(OnFailure::new_replace(0)).count(), 0);
        assert_eq!(stage.partition(), (vec![], vec![]));
        assert_eq!(stage.try_collect(), Ok(vec![]));
        assert!(stage.cursor().peek().is_none());
        assert!(!(&stage).successes().iter().has_next());
        assert!(!(&stage).failures().iter().has_next());
    }

    #[test]
    fn test_pure_pipeline_matches_plain_map() {
        let input = vec![3, 1, 4, 1, 5, 9, 2, 6];
        let f = |v: i32| v * v - 1;
        let stage = input.clone().catching::<()>().map_ok(f);
        assert_eq!(stage.drop_failures().collect::<Vec<_>>(), input.into_iter().map(f).collect::<Vec<_>>());
    }

    #[test]
    fn test_lengths() {
        let stage = parsed(vec!["1", "a", "2", "b", "c", "3"]);
        let total = stage.iter().count();
        let failures = stage.iter().filter(Entry::is_failure).count();
        assert_eq!(stage.default_failures(|| 0).count(), total);
        assert_eq!(stage.to_sequence().count(), total);
        assert_eq!(stage.drop_failures().count(), total - failures);
        assert_eq!(stage.filter_successes().count(), total - failures);
        assert_eq!(stage.filter_failures().count(), failures);
    }

    #[test]
    fn test_original_preserved_through_chain() {
        let input = vec!["10", "x", "30", "40"];
        let stage = input
            .clone()
            .catching()
            .map(|s| s.parse::<i64>())
            .map_ok(|v| v * 2)
            .keep(|entry| entry.value().is_none_or(|v| *v != 60))
            .map(|v| if v > 50 { "".parse::<i64>() } else { Ok(v + 1) });
        let entries = stage.iter().collect::<Vec<_>>();
        assert_eq!(entries.iter().map(Entry::original).copied().collect::<Vec<_>>(), vec!["10", "x", "40"]);
        assert_eq!(entries[0], Entry::success(21, "10"));
        assert!(entries[1].is_failure());
        assert!(entries[2].is_failure());
    }

    #[test]
    fn test_reiterate_identical() {
        let stage = parsed(vec!["1", "a", "2"]).map_ok(|v| v + 1).reject(|entry| entry.value() == Some(&3));
        let mut first = stage.iter();
        let mut second = stage.iter();
        assert_eq!(first.next(), second.next());
        assert_eq!(first.collect::<Vec<_>>(), second.collect::<Vec<_>>());
        assert_eq!(stage.iter().collect::<Vec<_>>(), stage.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_reuse_upstream_by_reference() {
        let base = parsed(vec!["1", "a", "2"]);
        let doubled = (&base).map_ok(|v| v * 2);
        let negated = (&base).map_ok(|v| -v);
        assert_eq!(doubled.drop_failures().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(negated.drop_failures().collect::<Vec<_>>(), vec![-1, -2]);
        assert_eq!(base.drop_failures().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_filter_successes_and_failures() {
        let stage = parsed(vec!["1", "a", "2", "b"]);
        assert_eq!(stage.filter_successes().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(stage.filter_failures().map(|(original, _)| original).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!((&stage).failures().iter().count(), 2);
        assert!((&stage).successes().iter().all(|entry| entry.is_success()));
    }

    #[test]
    fn test_to_sequence() {
        assert_eq!(parsed(vec!["1", "a", "2"]).to_sequence().collect::<Vec<_>>(), vec![Some(1), None, Some(2)]);
    }

    #[test]
    fn test_to_not_null_sequence() {
        let stage = vec!["1", "", "a", "2"]
            .catching()
            .map(|s: &str| if s.is_empty() { Ok(None) } else { s.parse::<i32>().map(Some) });
        assert_eq!(stage.to_sequence().collect::<Vec<_>>(), vec![Some(Some(1)), Some(None), None, Some(Some(2))]);
        assert_eq!(stage.to_not_null_sequence().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_resolve() {
        let stage = parsed(vec!["1", "a", "2", "b", "3"]);
        assert_eq!(stage.resolve(OnFailure::Drop).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(stage.resolve(OnFailure::Replace(-1)).collect::<Vec<_>>(), vec![1, -1, 2, -1, 3]);
        assert_eq!(stage.resolve(OnFailure::Stop).collect::<Vec<_>>(), vec![1]);
        assert_eq!(stage.resolve(OnFailure::default()).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_partition() {
        let (values, failures) = parsed(vec!["x", "1", "a", "2"]).partition();
        assert_eq!(values, vec![1, 2]);
        assert_eq!(failures.into_iter().map(|(original, _)| original).collect::<Vec<_>>(), vec!["x", "a"]);
    }

    #[test]
    fn test_try_collect() {
        assert_eq!(parsed(vec!["1", "2"]).try_collect(), Ok(vec![1, 2]));
        assert_eq!(
            parsed(vec!["1", "a", "2"]).try_collect(),
            Err(CatchErr::ElementFailed {
                index: 1,
                original: String::from("\"a\""),
                error: String::from("invalid digit found in string")
            })
        );
    }

    #[test]
    fn test_try_collect_stops_at_first_failure() {
        let pulled = Cell::new(0);
        let stage = vec!["a", "1", "2"].catching().map(|s| {
            pulled.set(pulled.get() + 1);
            s.parse::<i32>()
        });
        assert!(stage.try_collect().is_err());
        assert_eq!(pulled.get(), 1);
    }

    #[test]
    fn test_cursor_runs_transform_once() {
        let calls = Cell::new(0);
        let stage = (1..=3).catching::<()>().map_ok(|v| {
            calls.set(calls.get() + 1);
            v
        });
        let mut cursor = stage.cursor();
        for _ in 0..3 {
            assert!(cursor.peek().is_some());
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cursor.next(), Some(Entry::success(1, 1)));
        assert_eq!(calls.get(), 1);
        assert_eq!(cursor.count(), 2);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_filter_probe_runs_transform_once() {
        let calls = Cell::new(0);
        let stage = Source::<_, ()>::new(1..=4)
            .map_ok(|v| {
                calls.set(calls.get() + 1);
                v
            })
            .keep(|entry| entry.value().is_some_and(|v| v % 2 == 0));
        let mut iter = stage.iter();
        assert!(iter.has_next());
        assert!(iter.has_next());
        assert_eq!(calls.get(), 2);
        assert_eq!(iter.next(), Some(Entry::success(2, 2)));
        assert_eq!(iter.next(), Some(Entry::success(4, 4)));
        assert!(!iter.has_next());
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_short_circuit_after_filter() {
        let later = Cell::new(0);
        let stage = parsed(vec!["1", "a", "b", "2"]).keep(|_| true).map(|v| {
            later.set(later.get() + 1);
            Ok(v)
        });
        assert_eq!(stage.drop_failures().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(later.get(), 2);
    }
}
