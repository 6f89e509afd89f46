use crate::entry::Entry;
use crate::seq::CatchSeq;
use std::fmt::{Debug, Display, Formatter};
use std::iter::FusedIterator;
use tracing::warn;

/// 观察阶段：原样传递所有元素，对每个失败元素调用一次`observer(original, error)`。
pub struct OnEachFailure<S, F> {
    upstream: S,
    observer: F,
}

impl<S, F> OnEachFailure<S, F> {
    pub(crate) fn new(upstream: S, observer: F) -> Self {
        OnEachFailure { upstream, observer }
    }
}

impl<S: Clone, F: Clone> Clone for OnEachFailure<S, F> {
    fn clone(&self) -> Self {
        OnEachFailure::new(self.upstream.clone(), self.observer.clone())
    }
}

impl<S: Debug, F> Debug for OnEachFailure<S, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnEachFailure").field("upstream", &self.upstream).finish_non_exhaustive()
    }
}

impl<S, F> CatchSeq for OnEachFailure<S, F>
where
    S: CatchSeq,
    F: Fn(&S::Orig, &S::Err),
{
    type Value = S::Value;
    type Orig = S::Orig;
    type Err = S::Err;
    type Iter<'a>
        = InspectIter<S::Iter<'a>, &'a F>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        InspectIter { upstream: self.upstream.iter(), observer: &self.observer }
    }
}

pub struct InspectIter<I, F> {
    upstream: I,
    observer: F,
}

impl<I, F, T, O, X> Iterator for InspectIter<I, F>
where
    I: Iterator<Item = Entry<T, O, X>>,
    F: Fn(&O, &X),
{
    type Item = Entry<T, O, X>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.upstream.next()?;
        if let Entry::Failure { error, original } = &entry {
            (self.observer)(original, error);
        }
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

impl<I, F, T, O, X> FusedIterator for InspectIter<I, F>
where
    I: FusedIterator<Item = Entry<T, O, X>>,
    F: Fn(&O, &X),
{
}

/// [`CatchSeq::log_failures`]使用的观察者，失败信息交由宿主程序的`tracing`订阅者输出。
pub(crate) fn log_failure<O: Debug, X: Display>(original: &O, error: &X) {
    warn!(original = ?original, error = %error, "element failed");
}
