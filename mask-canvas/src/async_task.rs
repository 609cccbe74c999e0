//! Futures polled once per frame from the UI thread.
//!
//! Nothing wakes the UI when a future makes progress, so callers keep
//! requesting repaints while [`AsyncRefTask::is_pending`] holds.

use std::{
    pin::Pin,
    task::{Context, Poll, Waker},
};

pub use futures::future::BoxFuture;

fn poll_once<T>(future: &mut BoxFuture<'static, T>) -> Poll<T> {
    let mut cx = Context::from_waker(Waker::noop());
    Pin::new(future).poll(&mut cx)
}

/// Keeps the result after completion, e.g. the outcome of the last export
pub enum AsyncRefTask<T> {
    Pending(BoxFuture<'static, T>),
    Ready(T),
}

impl<T> AsyncRefTask<T> {
    pub fn new(b: BoxFuture<'static, T>) -> Self {
        Self::Pending(b)
    }

    pub fn new_ready(r: T) -> Self {
        Self::Ready(r)
    }

    pub fn data(&mut self) -> Option<&mut T> {
        if let AsyncRefTask::Pending(x) = self {
            match poll_once(x) {
                Poll::Ready(r) => *self = Self::Ready(r),
                Poll::Pending => return None,
            }
        }
        match self {
            AsyncRefTask::Ready(x) => Some(x),
            AsyncRefTask::Pending(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AsyncRefTask::Pending(_))
    }
}

/// Hands out its result exactly once
pub struct AsyncTask<T>(BoxFuture<'static, T>);

impl<T> AsyncTask<T> {
    pub fn new(b: BoxFuture<'static, T>) -> Self {
        Self(b)
    }

    pub fn data(&mut self) -> Option<T> {
        match poll_once(&mut self.0) {
            Poll::Ready(r) => {
                #[cfg(debug_assertions)]
                {
                    self.0 = Box::pin(std::future::poll_fn(|_| {
                        panic!("The result of AsyncTask mustn't be used after it returned")
                    }));
                }
                Some(r)
            }
            Poll::Pending => None,
        }
    }
}
