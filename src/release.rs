// Scoped ownership of a resource that must be released if set-up fails.
//
// No web_sys here: host tests include this file directly.

/// Holds `value` and runs `release` on it when dropped, unless the value was
/// taken out with `into_inner` first.
pub struct ReleaseGuard<T> {
    value: Option<T>,
    release: fn(&T),
}

impl<T> ReleaseGuard<T> {
    pub fn new(value: T, release: fn(&T)) -> Self {
        Self {
            value: Some(value),
            release,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Disarm the guard and hand the value to its long-term owner.
    pub fn into_inner(mut self) -> Option<T> {
        self.value.take()
    }
}

impl<T> Drop for ReleaseGuard<T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            (self.release)(&value);
        }
    }
}
