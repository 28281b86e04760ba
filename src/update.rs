//! Write argument for a slot: a literal replacement or a function of the
//! current value. Tagging the two removes any guessing about whether a value
//! is itself callable.

/// New value for a slot.
pub enum Update<T> {
    /// Replace the current value.
    Literal(T),
    /// Compute the new value from the current one.
    Updater(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Update<T> {
    pub fn with(f: impl FnOnce(&T) -> T + 'static) -> Self {
        Self::Updater(Box::new(f))
    }

    /// Resolve to the literal value to store, given the current one.
    pub fn resolve(self, current: &T) -> T {
        match self {
            Self::Literal(value) => value,
            Self::Updater(f) => f(current),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Self::Literal(value)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Updater(_) => f.write_str("Updater(..)"),
        }
    }
}
