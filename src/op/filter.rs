use crate::entry::Entry;
use crate::err::CatchErr;
use crate::seq::CatchSeq;
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;

/// 过滤阶段：仅保留断言结果等于`keep_when`的元素。
///
/// 断言作用于完整的元素，因此既可以按值过滤，也可以按成功/失败状态过滤。
pub struct Filtered<S, P> {
    upstream: S,
    predicate: P,
    keep_when: bool,
}

impl<S, P> Filtered<S, P> {
    pub(crate) fn new(upstream: S, predicate: P, keep_when: bool) -> Self {
        Filtered { upstream, predicate, keep_when }
    }

    pub fn keep_when(&self) -> bool {
        self.keep_when
    }
}

impl<S: Clone, P: Clone> Clone for Filtered<S, P> {
    fn clone(&self) -> Self {
        Filtered::new(self.upstream.clone(), self.predicate.clone(), self.keep_when)
    }
}

impl<S: Debug, P> Debug for Filtered<S, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filtered")
            .field("upstream", &self.upstream)
            .field("keep_when", &self.keep_when)
            .finish_non_exhaustive()
    }
}

impl<S, P> CatchSeq for Filtered<S, P>
where
    S: CatchSeq,
    P: Fn(&Entry<S::Value, S::Orig, S::Err>) -> bool,
{
    type Value = S::Value;
    type Orig = S::Orig;
    type Err = S::Err;
    type Iter<'a>
        = FilterIter<S::Iter<'a>, &'a P>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        FilterIter::new(self.upstream.iter(), &self.predicate, self.keep_when)
    }
}

/// 前瞻状态，缓存的元素保存在`HaveNext`中。
#[derive(Debug)]
enum Lookahead<E> {
    /// 需要拉取上游才能判断是否还有元素
    Unknown,
    /// 已缓存一个满足条件的元素
    HaveNext(E),
    /// 上游已没有满足条件的元素
    Exhausted,
}

impl<E> Lookahead<E> {
    fn take(&mut self) -> Self {
        std::mem::replace(self, Lookahead::Unknown)
    }
}

/// 过滤迭代器。
///
/// 判断过滤后的序列是否还有元素，可能需要消耗任意多个被丢弃的上游元素，因此最多向前缓存一个元素。
/// 多次调用[`has_next`](FilterIter::has_next)或[`peek`](FilterIter::peek)不会跳过元素，
/// 随后的[`try_next`](FilterIter::try_next)返回的正是已预判的元素。
pub struct FilterIter<I: Iterator, P> {
    upstream: I,
    predicate: P,
    keep_when: bool,
    state: Lookahead<I::Item>,
}

impl<I, P> FilterIter<I, P>
where
    I: Iterator,
    P: Fn(&I::Item) -> bool,
{
    pub fn new(upstream: I, predicate: P, keep_when: bool) -> Self {
        FilterIter { upstream, predicate, keep_when, state: Lookahead::Unknown }
    }

    fn advance(&mut self) {
        for item in self.upstream.by_ref() {
            if (self.predicate)(&item) == self.keep_when {
                self.state = Lookahead::HaveNext(item);
                return;
            }
        }
        self.state = Lookahead::Exhausted;
    }

    fn ensure_known(&mut self) {
        if matches!(self.state, Lookahead::Unknown) {
            self.advance();
        }
    }

    pub fn has_next(&mut self) -> bool {
        self.ensure_known();
        matches!(self.state, Lookahead::HaveNext(_))
    }

    pub fn peek(&mut self) -> Option<&I::Item> {
        self.ensure_known();
        match &self.state {
            Lookahead::HaveNext(item) => Some(item),
            _ => None,
        }
    }

    /// 取出下一个满足条件的元素，没有更多元素时返回[`CatchErr::NoMoreElements`]。
    pub fn try_next(&mut self) -> Result<I::Item, CatchErr> {
        self.ensure_known();
        match self.state.take() {
            Lookahead::HaveNext(item) => Ok(item),
            other => {
                self.state = other;
                Err(CatchErr::NoMoreElements)
            }
        }
    }
}

impl<I, P> Iterator for FilterIter<I, P>
where
    I: Iterator,
    P: Fn(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            Lookahead::Exhausted => (0, Some(0)),
            Lookahead::HaveNext(_) => (1, self.upstream.size_hint().1.and_then(|upper| upper.checked_add(1))),
            Lookahead::Unknown => (0, self.upstream.size_hint().1),
        }
    }
}

impl<I, P> FusedIterator for FilterIter<I, P>
where
    I: Iterator,
    P: Fn(&I::Item) -> bool,
{
}
