use crate::entry::Entry;
use crate::seq::CatchSeq;
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// 转换函数返回`Result`，`Err`会被转为失败元素。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Fallible;

/// 转换函数不会失败。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Pure;

/// 转换阶段：对每个成功元素的值执行转换函数。
///
/// 失败元素短路传递，转换函数不会作用于已经失败的元素；转换失败时，失败元素携带的是
/// 数据源的原始值，而不是上一阶段的值。转换函数仅在元素被拉取时执行，且每个元素至多执行一次。
pub struct Mapped<S, F, M> {
    upstream: S,
    transform: F,
    _mode: PhantomData<M>,
}

impl<S, F, M> Mapped<S, F, M> {
    pub(crate) fn new(upstream: S, transform: F) -> Self {
        Mapped { upstream, transform, _mode: PhantomData }
    }
}

impl<S: Clone, F: Clone, M> Clone for Mapped<S, F, M> {
    fn clone(&self) -> Self {
        Mapped::new(self.upstream.clone(), self.transform.clone())
    }
}

impl<S: Debug, F, M> Debug for Mapped<S, F, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapped").field("upstream", &self.upstream).finish_non_exhaustive()
    }
}

impl<S, F, N> CatchSeq for Mapped<S, F, Fallible>
where
    S: CatchSeq,
    F: Fn(S::Value) -> Result<N, S::Err>,
{
    type Value = N;
    type Orig = S::Orig;
    type Err = S::Err;
    type Iter<'a>
        = MapIter<'a, S::Iter<'a>, F, Fallible>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        MapIter { upstream: self.upstream.iter(), transform: &self.transform, _mode: PhantomData }
    }
}

impl<S, F, N> CatchSeq for Mapped<S, F, Pure>
where
    S: CatchSeq,
    F: Fn(S::Value) -> N,
{
    type Value = N;
    type Orig = S::Orig;
    type Err = S::Err;
    type Iter<'a>
        = MapIter<'a, S::Iter<'a>, F, Pure>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        MapIter { upstream: self.upstream.iter(), transform: &self.transform, _mode: PhantomData }
    }
}

pub struct MapIter<'a, I, F, M> {
    upstream: I,
    transform: &'a F,
    _mode: PhantomData<M>,
}

impl<I, F, T, O, X, N> Iterator for MapIter<'_, I, F, Fallible>
where
    I: Iterator<Item = Entry<T, O, X>>,
    F: Fn(T) -> Result<N, X>,
{
    type Item = Entry<N, O, X>;

    fn next(&mut self) -> Option<Self::Item> {
        self.upstream.next().map(|entry| entry.and_then(self.transform))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

impl<I, F, T, O, X, N> Iterator for MapIter<'_, I, F, Pure>
where
    I: Iterator<Item = Entry<T, O, X>>,
    F: Fn(T) -> N,
{
    type Item = Entry<N, O, X>;

    fn next(&mut self) -> Option<Self::Item> {
        self.upstream.next().map(|entry| entry.map_value(self.transform))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

impl<I, F, T, O, X, N> FusedIterator for MapIter<'_, I, F, Fallible>
where
    I: FusedIterator<Item = Entry<T, O, X>>,
    F: Fn(T) -> Result<N, X>,
{
}

impl<I, F, T, O, X, N> FusedIterator for MapIter<'_, I, F, Pure>
where
    I: FusedIterator<Item = Entry<T, O, X>>,
    F: Fn(T) -> N,
{
}
