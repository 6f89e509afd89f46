use crate::config::OnFailure;
use crate::entry::Entry;
use std::iter::FusedIterator;

/// 以`supplier()`的结果替换失败元素，序列长度与上游一致。
pub struct DefaultFailures<I, F> {
    upstream: I,
    supplier: F,
}

impl<I, F> DefaultFailures<I, F> {
    pub(crate) fn new(upstream: I, supplier: F) -> Self {
        DefaultFailures { upstream, supplier }
    }
}

impl<I, F, T, O, X> Iterator for DefaultFailures<I, F>
where
    I: Iterator<Item = Entry<T, O, X>>,
    F: FnMut() -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.upstream.next().map(|entry| match entry {
            Entry::Success { value, .. } => value,
            Entry::Failure { .. } => (self.supplier)(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

/// 按照[`OnFailure`]策略处理失败元素。
pub struct Resolve<I, T> {
    upstream: I,
    policy: OnFailure<T>,
    stopped: bool,
}

impl<I, T> Resolve<I, T> {
    pub(crate) fn new(upstream: I, policy: OnFailure<T>) -> Self {
        Resolve { upstream, policy, stopped: false }
    }
}

impl<I, T, O, X> Iterator for Resolve<I, T>
where
    I: Iterator<Item = Entry<T, O, X>>,
    T: Clone,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped {
            return None;
        }
        loop {
            match self.upstream.next()? {
                Entry::Success { value, .. } => return Some(value),
                Entry::Failure { .. } => match &self.policy {
                    OnFailure::Drop => continue,
                    OnFailure::Replace(value) => return Some(value.clone()),
                    OnFailure::Stop => {
                        self.stopped = true;
                        return None;
                    }
                },
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.stopped {
            return (0, Some(0));
        }
        let (lower, upper) = self.upstream.size_hint();
        match self.policy {
            OnFailure::Replace(_) => (lower, upper),
            OnFailure::Drop | OnFailure::Stop => (0, upper),
        }
    }
}

impl<I, T, O, X> FusedIterator for Resolve<I, T>
where
    I: FusedIterator<Item = Entry<T, O, X>>,
    T: Clone,
{
}
