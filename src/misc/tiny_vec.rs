use std::{fmt::Debug, ops::Deref};

/// Fixed-capacity, stack-allocated vector for small `Copy` values.
///
/// Unused slots hold `T::default()` and are never observable through the
/// public API, so two vectors compare equal whenever their live elements do.
#[derive(Clone, Copy)]
pub struct TinyVec<T, const N: usize>
where
    T: Copy + Default,
{
    buf: [T; N],
    len: u8,
}

impl<T, const N: usize> TinyVec<T, N>
where
    T: Copy + Default,
{
    pub fn new() -> Self {
        const { assert!(N <= 255, "TinyVec supports up to 255 elements") }
        TinyVec { buf: [T::default(); N], len: 0 }
    }

    /// Copies at most `N` elements out of `values`.
    pub fn from_slice(values: &[T]) -> Self {
        let mut vec = Self::new();
        for &value in values.iter().take(N) {
            vec.push(value);
        }
        vec
    }

    pub fn push(&mut self, val: T) {
        assert!((self.len as usize) < N, "TinyVec is full");
        self.buf[self.len as usize] = val;
        self.len += 1;
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.buf[self.len as usize])
    }

    /// Removes the first element equal to `val`, keeping the order of the rest.
    pub fn remove_first(&mut self, val: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(pos) = self.iter().position(|x| x == val) else {
            return false;
        };
        let len = self.len as usize;
        self.buf.copy_within(pos + 1..len, pos);
        self.len -= 1;
        self.buf[self.len as usize] = T::default();
        true
    }

    pub fn clear(&mut self) {
        self.buf = [T::default(); N];
        self.len = 0;
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: Copy + Default, const N: usize> Default for TinyVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> Deref for TinyVec<T, N> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.buf[..self.len as usize]
    }
}

impl<T: Copy + Default + PartialEq, const N: usize> PartialEq for TinyVec<T, N> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Copy + Default + Eq, const N: usize> Eq for TinyVec<T, N> {}

impl<T: Copy + Default + Debug, const N: usize> Debug for TinyVec<T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T: Copy + Default, const N: usize> IntoIterator for &'a TinyVec<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
