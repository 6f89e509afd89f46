use crate::entry::Entry;
use crate::seq::CatchSeq;
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// 数据源：将可重复迭代的普通序列包装为可捕获失败的序列。
///
/// 每次调用[`CatchSeq::iter`]都会克隆内部序列，从头开始产生`Success(x, x)`。
/// 失败类型`X`由后续第一个可失败的转换推断。
pub struct Source<S, X> {
    seq: S,
    _err: PhantomData<fn() -> X>,
}

impl<S, X> Source<S, X>
where
    S: IntoIterator + Clone,
    S::Item: Clone,
{
    pub fn new(seq: S) -> Self {
        Source { seq, _err: PhantomData }
    }
}

impl<S: Clone, X> Clone for Source<S, X> {
    fn clone(&self) -> Self {
        Source { seq: self.seq.clone(), _err: PhantomData }
    }
}

impl<S: Debug, X> Debug for Source<S, X> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source").field("seq", &self.seq).finish()
    }
}

impl<S, X> CatchSeq for Source<S, X>
where
    S: IntoIterator + Clone,
    S::Item: Clone,
{
    type Value = S::Item;
    type Orig = S::Item;
    type Err = X;
    type Iter<'a>
        = SourceIter<S::IntoIter, X>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        SourceIter { iter: self.seq.clone().into_iter(), _err: PhantomData }
    }
}

/// 任意可重复迭代的序列都可以通过`catching()`开始一条可捕获失败的流水线。
pub trait CatchingExt: IntoIterator + Clone + Sized {
    fn catching<X>(self) -> Source<Self, X>
    where
        Self::Item: Clone,
    {
        Source::new(self)
    }
}

impl<S: IntoIterator + Clone> CatchingExt for S {}

pub struct SourceIter<I, X> {
    iter: I,
    _err: PhantomData<fn() -> X>,
}

impl<I, X> Iterator for SourceIter<I, X>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Entry<I::Item, I::Item, X>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|x| Entry::success(x.clone(), x))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, X> FusedIterator for SourceIter<I, X>
where
    I: FusedIterator,
    I::Item: Clone,
{
}
