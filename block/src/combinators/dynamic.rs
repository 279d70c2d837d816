//! Blocks selected at run time.
//!
//! A selector picks the concrete block that handles a field: read selectors may peek at the
//! buffer (e.g. at a tag or version byte), write selectors inspect the value. Selectors never
//! consume bytes themselves; only the block they return does.
//!
//! When the set of candidates is known statically, return a [Choice] from the selector. Fall
//! back to boxed trait objects (`Box<dyn ReadBlock<Value = V>>`) only when the candidates are
//! genuinely open-ended.

use crate::{ByteView, ByteViewMut, Error, ReadBlock, WriteBlock};
use std::marker::PhantomData;

/// A read block chosen by a selector over the view and offset.
pub struct DynamicRead<S, B> {
    select: S,
    _block: PhantomData<fn() -> B>,
}

impl<S, B> DynamicRead<S, B>
where
    S: Fn(&ByteView<'_>, usize) -> Result<B, Error>,
    B: ReadBlock,
{
    /// Creates a block that defers to the output of `select`.
    pub fn new(select: S) -> Self {
        Self {
            select,
            _block: PhantomData,
        }
    }
}

impl<S, B> ReadBlock for DynamicRead<S, B>
where
    S: Fn(&ByteView<'_>, usize) -> Result<B, Error>,
    B: ReadBlock,
{
    type Value = B::Value;

    fn size(&self, view: &ByteView<'_>, offset: usize) -> Result<usize, Error> {
        (self.select)(view, offset)?.size(view, offset)
    }

    fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<Self::Value, Error> {
        (self.select)(view, offset)?.read(view, offset)
    }
}

/// A write block chosen by a selector over the value.
pub struct DynamicWrite<S, B> {
    select: S,
    _block: PhantomData<fn() -> B>,
}

impl<S, B> DynamicWrite<S, B>
where
    S: Fn(&B::Value) -> B,
    B: WriteBlock,
{
    /// Creates a block that defers to the output of `select`.
    pub fn new(select: S) -> Self {
        Self {
            select,
            _block: PhantomData,
        }
    }
}

impl<S, B> WriteBlock for DynamicWrite<S, B>
where
    S: Fn(&B::Value) -> B,
    B: WriteBlock,
{
    type Value = B::Value;

    fn size(&self, value: &Self::Value) -> Result<usize, Error> {
        (self.select)(value).size(value)
    }

    fn write(
        &self,
        view: &mut ByteViewMut<'_>,
        offset: usize,
        value: &Self::Value,
    ) -> Result<(), Error> {
        (self.select)(value).write(view, offset, value)
    }
}

/// One of two blocks sharing a value type.
///
/// This is the statically typed return value of a selector choosing between two layouts. Nest
/// it (`Choice<A, Choice<B, C>>`) for more candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice<A, B> {
    First(A),
    Second(B),
}

impl<A, B> ReadBlock for Choice<A, B>
where
    A: ReadBlock,
    B: ReadBlock<Value = A::Value>,
{
    type Value = A::Value;

    fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::First(block) => block.fixed_size(),
            Self::Second(block) => block.fixed_size(),
        }
    }

    fn size(&self, view: &ByteView<'_>, offset: usize) -> Result<usize, Error> {
        match self {
            Self::First(block) => block.size(view, offset),
            Self::Second(block) => block.size(view, offset),
        }
    }

    fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<Self::Value, Error> {
        match self {
            Self::First(block) => block.read(view, offset),
            Self::Second(block) => block.read(view, offset),
        }
    }
}

impl<A, B> WriteBlock for Choice<A, B>
where
    A: WriteBlock,
    B: WriteBlock<Value = A::Value>,
{
    type Value = A::Value;

    fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::First(block) => block.fixed_size(),
            Self::Second(block) => block.fixed_size(),
        }
    }

    fn size(&self, value: &Self::Value) -> Result<usize, Error> {
        match self {
            Self::First(block) => block.size(value),
            Self::Second(block) => block.size(value),
        }
    }

    fn write(
        &self,
        view: &mut ByteViewMut<'_>,
        offset: usize,
        value: &Self::Value,
    ) -> Result<(), Error> {
        match self {
            Self::First(block) => block.write(view, offset, value),
            Self::Second(block) => block.write(view, offset, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        combinators::{dynamic, dynamic_read, transform},
        EncodedUint, Sequence, Uint32, Uint32Le, Uint8,
    };

    #[test]
    fn test_choice() {
        let little: Choice<Uint32, Uint32Le> = Choice::Second(Uint32Le);
        let mut buf = [0u8; 4];
        little
            .write(&mut ByteViewMut::new(&mut buf), 0, &1)
            .unwrap();
        assert_eq!(buf, [1, 0, 0, 0]);
        assert_eq!(ReadBlock::fixed_size(&little), Some(4));
        assert_eq!(
            Choice::<Uint32, Uint32Le>::First(Uint32)
                .read(&ByteView::new(&buf), 0)
                .unwrap(),
            0x01000000
        );
    }

    // A version byte followed by a value whose width depends on the version.
    fn versioned() -> impl ReadBlock<Value = (u8, u32)> + WriteBlock<Value = (u8, u32)> {
        dynamic(
            |view: &ByteView<'_>, offset| {
                let version = Uint8.read(view, offset)?;
                Ok(if version == 1 {
                    Choice::First(Sequence((Uint8, transform(Uint8, u32::from, |v: &u32| *v as u8))))
                } else {
                    Choice::Second(Sequence((Uint8, transform(Uint32, |v| v, |v: &u32| *v))))
                })
            },
            |(version, _): &(u8, u32)| {
                if *version == 1 {
                    Choice::First(Sequence((Uint8, transform(Uint8, u32::from, |v: &u32| *v as u8))))
                } else {
                    Choice::Second(Sequence((Uint8, transform(Uint32, |v| v, |v: &u32| *v))))
                }
            },
        )
    }

    #[test]
    fn test_dynamic_static_selector() {
        let block = versioned();

        let mut buf = [0u8; 7];
        let mut view = ByteViewMut::new(&mut buf);
        assert_eq!(WriteBlock::size(&block, &(1, 9)).unwrap(), 2);
        assert_eq!(WriteBlock::size(&block, &(2, 9)).unwrap(), 5);
        block.write(&mut view, 0, &(1, 9)).unwrap();
        block.write(&mut view, 2, &(2, 9)).unwrap();
        assert_eq!(buf, [1, 9, 2, 0, 0, 0, 9]);

        let view = ByteView::new(&buf);
        assert_eq!(ReadBlock::size(&block, &view, 0).unwrap(), 2);
        assert_eq!(ReadBlock::size(&block, &view, 2).unwrap(), 5);
        assert_eq!(block.read(&view, 0).unwrap(), (1, 9));
        assert_eq!(block.read(&view, 2).unwrap(), (2, 9));
    }

    #[test]
    fn test_dynamic_boxed_selector() {
        // The width of the value is announced by the preceding byte.
        let block = dynamic_read(|view: &ByteView<'_>, offset| {
            let selected: Box<dyn ReadBlock<Value = u32>> = match Uint8.read(view, offset)? {
                0 => Box::new(EncodedUint),
                _ => Box::new(Uint32),
            };
            Ok(selected)
        });
        let buf = [0u8, 1, 2, 3];
        let view = ByteView::new(&buf);
        assert_eq!(ReadBlock::size(&block, &view, 0).unwrap(), 1);
        assert_eq!(block.read(&view, 0).unwrap(), 0);
        assert_eq!(ReadBlock::size(&block, &view, 1).unwrap(), 4);
        assert!(block.read(&view, 1).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_dynamic_selector_error() {
        let block = dynamic_read(|view: &ByteView<'_>, offset| {
            Uint8.read(view, offset)?;
            Ok(Uint8)
        });
        let view = ByteView::new(&[0u8; 0]);
        assert!(ReadBlock::size(&block, &view, 0)
            .unwrap_err()
            .is_out_of_range());
    }
}
