//! Lifecycle of one list fetch
//!
//! A view starts in `Loading` and settles exactly once into either `Ready`
//! (items in server order) or `Error` (the transport or status message,
//! shown verbatim). There is no retry.

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Error(String),
    Ready(Vec<T>),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    /// Settle a pending load.
    ///
    /// Returns `false` (and changes nothing) if this load already settled.
    pub fn finish<R>(&mut self, result: Result<Vec<R>, String>) -> bool
    where
        T: From<R>,
    {
        if !self.is_loading() {
            return false;
        }

        *self = match result {
            Ok(items) => LoadState::Ready(items.into_iter().map(T::from).collect()),
            Err(message) => LoadState::Error(message),
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn items(&self) -> Option<&[T]> {
        match self {
            LoadState::Ready(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn items_mut(&mut self) -> Option<&mut Vec<T>> {
        match self {
            LoadState::Ready(items) => Some(items),
            _ => None,
        }
    }
}
