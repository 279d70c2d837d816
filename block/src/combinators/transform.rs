//! Value mapping over an unchanged byte layout.

use crate::{ByteView, ByteViewMut, Error, ReadBlock, WriteBlock};
use std::marker::PhantomData;

/// Presents the value of `block` as another type.
///
/// `to_outer` maps decoded values, `to_inner` maps values before they are encoded. The byte
/// layout (and therefore the size, fixed or not) is exactly that of the wrapped block.
pub struct Transform<B, F, G, O> {
    block: B,
    to_outer: F,
    to_inner: G,
    _outer: PhantomData<fn(&O) -> O>,
}

impl<B, F, G, O> Transform<B, F, G, O> {
    /// Wraps `block`, mapping values with the given functions.
    ///
    /// Either function may be `()` for a block that is only read or only written.
    pub fn new(block: B, to_outer: F, to_inner: G) -> Self {
        Self {
            block,
            to_outer,
            to_inner,
            _outer: PhantomData,
        }
    }

    /// Returns the wrapped block.
    pub fn inner(&self) -> &B {
        &self.block
    }
}

impl<B: Clone, F: Clone, G: Clone, O> Clone for Transform<B, F, G, O> {
    fn clone(&self) -> Self {
        Self::new(
            self.block.clone(),
            self.to_outer.clone(),
            self.to_inner.clone(),
        )
    }
}

impl<B: std::fmt::Debug, F, G, O> std::fmt::Debug for Transform<B, F, G, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform")
            .field("block", &self.block)
            .finish_non_exhaustive()
    }
}

impl<B, F, G, O> ReadBlock for Transform<B, F, G, O>
where
    B: ReadBlock,
    F: Fn(B::Value) -> O,
{
    type Value = O;

    #[inline]
    fn fixed_size(&self) -> Option<usize> {
        self.block.fixed_size()
    }

    #[inline]
    fn size(&self, view: &ByteView<'_>, offset: usize) -> Result<usize, Error> {
        self.block.size(view, offset)
    }

    #[inline]
    fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<O, Error> {
        self.block.read(view, offset).map(&self.to_outer)
    }
}

impl<B, F, G, O> WriteBlock for Transform<B, F, G, O>
where
    B: WriteBlock,
    G: Fn(&O) -> B::Value,
{
    type Value = O;

    #[inline]
    fn fixed_size(&self) -> Option<usize> {
        self.block.fixed_size()
    }

    #[inline]
    fn size(&self, value: &O) -> Result<usize, Error> {
        if let Some(size) = self.block.fixed_size() {
            return Ok(size);
        }
        self.block.size(&(self.to_inner)(value))
    }

    #[inline]
    fn write(&self, view: &mut ByteViewMut<'_>, offset: usize, value: &O) -> Result<(), Error> {
        self.block.write(view, offset, &(self.to_inner)(value))
    }
}
