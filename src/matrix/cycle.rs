//! Cyclic zip over axis lists.
//!
//! Pairs the elements of several lists position by position, wrapping the
//! shorter lists around until the longest one is exhausted. Every value of
//! every axis appears at least once while the output stays as long as the
//! longest axis, unlike a cross product.

/// Iterator returned by [`zip_cycle`].
#[derive(Debug, Clone)]
pub struct ZipCycle<'a, T> {
    axes: Vec<&'a [T]>,
    empty_default: &'a T,
    pos: usize,
    len: usize,
}

impl<'a, T> Iterator for ZipCycle<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }

        let pos = self.pos;
        self.pos += 1;

        Some(
            self.axes
                .iter()
                .map(|axis| cycled(axis, pos).unwrap_or(self.empty_default))
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.pos;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for ZipCycle<'_, T> {}

/// Cyclically zip `axes`; an empty axis contributes `empty_default`.
pub fn zip_cycle<'a, T>(axes: &[&'a [T]], empty_default: &'a T) -> ZipCycle<'a, T> {
    ZipCycle {
        axes: axes.to_vec(),
        empty_default,
        pos: 0,
        len: cycle_len(axes.iter().map(|a| a.len())),
    }
}

/// Two-axis cyclic zip; an empty axis contributes `Default::default()`.
pub fn zip_cycle2<A, B>(a: &[A], b: &[B]) -> Vec<(A, B)>
where
    A: Clone + Default,
    B: Clone + Default,
{
    (0..cycle_len([a.len(), b.len()]))
        .map(|i| (pick(a, i), pick(b, i)))
        .collect()
}

/// Three-axis cyclic zip; an empty axis contributes `Default::default()`.
pub fn zip_cycle3<A, B, C>(a: &[A], b: &[B], c: &[C]) -> Vec<(A, B, C)>
where
    A: Clone + Default,
    B: Clone + Default,
    C: Clone + Default,
{
    (0..cycle_len([a.len(), b.len(), c.len()]))
        .map(|i| (pick(a, i), pick(b, i), pick(c, i)))
        .collect()
}

fn cycle_len(lens: impl IntoIterator<Item = usize>) -> usize {
    lens.into_iter().max().unwrap_or(0)
}

fn cycled<T>(axis: &[T], pos: usize) -> Option<&T> {
    if axis.is_empty() {
        None
    } else {
        axis.get(pos % axis.len())
    }
}

fn pick<T: Clone + Default>(axis: &[T], pos: usize) -> T {
    cycled(axis, pos).cloned().unwrap_or_default()
}
