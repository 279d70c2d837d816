//! Ordered concatenation of blocks.

use crate::{block::checked_end, ByteView, ByteViewMut, Error, ReadBlock, WriteBlock};
use paste::paste;

/// A fixed-arity sequence of blocks, laid out back to back.
///
/// Wraps a tuple of 1 to 12 blocks of any kind (fixed or variable). The value is the tuple of
/// the member values. Members are resolved strictly left to right: each is sized and decoded at
/// the offset where the previous one ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sequence<T>(pub T);

macro_rules! impl_sequence {
    ($($index:literal),*) => {
        paste! {
            impl<$( [<B $index>]: ReadBlock ),*> ReadBlock for Sequence<( $( [<B $index>], )* )> {
                type Value = ( $( [<B $index>]::Value, )* );

                #[inline]
                fn fixed_size(&self) -> Option<usize> {
                    let mut total = 0usize;
                    $( total = total.checked_add(self.0.$index.fixed_size()?)?; )*
                    Some(total)
                }

                #[inline]
                fn size(&self, view: &ByteView<'_>, offset: usize) -> Result<usize, Error> {
                    let mut cursor = offset;
                    $( cursor = checked_end(cursor, self.0.$index.size(view, cursor)?)?; )*
                    Ok(cursor - offset)
                }

                #[inline]
                #[allow(unused_assignments)]
                fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<Self::Value, Error> {
                    let mut cursor = offset;
                    Ok(( $( {
                        let size = self.0.$index.size(view, cursor)?;
                        let value = self.0.$index.read(view, cursor)?;
                        cursor = checked_end(cursor, size)?;
                        value
                    }, )* ))
                }
            }

            impl<$( [<B $index>]: WriteBlock ),*> WriteBlock for Sequence<( $( [<B $index>], )* )> {
                type Value = ( $( [<B $index>]::Value, )* );

                #[inline]
                fn fixed_size(&self) -> Option<usize> {
                    let mut total = 0usize;
                    $( total = total.checked_add(self.0.$index.fixed_size()?)?; )*
                    Some(total)
                }

                #[inline]
                fn size(&self, value: &Self::Value) -> Result<usize, Error> {
                    let mut total = 0;
                    $( total = checked_end(total, self.0.$index.size(&value.$index)?)?; )*
                    Ok(total)
                }

                #[inline]
                #[allow(unused_assignments)]
                fn write(
                    &self,
                    view: &mut ByteViewMut<'_>,
                    offset: usize,
                    value: &Self::Value,
                ) -> Result<(), Error> {
                    let mut cursor = offset;
                    $(
                        self.0.$index.write(view, cursor, &value.$index)?;
                        cursor = checked_end(cursor, self.0.$index.size(&value.$index)?)?;
                    )*
                    Ok(())
                }
            }
        }
    };
}

// Generate implementations for sequences of 1 through 12 blocks
impl_sequence!(0);
impl_sequence!(0, 1);
impl_sequence!(0, 1, 2);
impl_sequence!(0, 1, 2, 3);
impl_sequence!(0, 1, 2, 3, 4);
impl_sequence!(0, 1, 2, 3, 4, 5);
impl_sequence!(0, 1, 2, 3, 4, 5, 6);
impl_sequence!(0, 1, 2, 3, 4, 5, 6, 7);
impl_sequence!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_sequence!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_sequence!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_sequence!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);

/// A sequence whose arity is only known at run time.
///
/// All members share a value type (use boxed blocks to mix block types). Writing a value list
/// whose length differs from the number of blocks fails with [Error::ArityMismatch].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceOf<B>(pub Vec<B>);

impl<B> SequenceOf<B> {
    fn check_arity<V>(&self, values: &[V]) -> Result<(), Error> {
        if values.len() != self.0.len() {
            return Err(Error::ArityMismatch {
                expected: self.0.len(),
                found: values.len(),
            });
        }
        Ok(())
    }
}

impl<B: ReadBlock> ReadBlock for SequenceOf<B> {
    type Value = Vec<B::Value>;

    fn fixed_size(&self) -> Option<usize> {
        self.0
            .iter()
            .try_fold(0usize, |total, block| total.checked_add(block.fixed_size()?))
    }

    fn size(&self, view: &ByteView<'_>, offset: usize) -> Result<usize, Error> {
        let mut cursor = offset;
        for block in &self.0 {
            cursor = checked_end(cursor, block.size(view, cursor)?)?;
        }
        Ok(cursor - offset)
    }

    fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<Self::Value, Error> {
        let mut cursor = offset;
        let mut values = Vec::with_capacity(self.0.len());
        for block in &self.0 {
            let size = block.size(view, cursor)?;
            values.push(block.read(view, cursor)?);
            cursor = checked_end(cursor, size)?;
        }
        Ok(values)
    }
}

impl<B: WriteBlock> WriteBlock for SequenceOf<B> {
    type Value = Vec<B::Value>;

    fn fixed_size(&self) -> Option<usize> {
        self.0
            .iter()
            .try_fold(0usize, |total, block| total.checked_add(block.fixed_size()?))
    }

    fn size(&self, value: &Self::Value) -> Result<usize, Error> {
        self.check_arity(value)?;
        let mut total = 0;
        for (block, value) in self.0.iter().zip(value) {
            total = checked_end(total, block.size(value)?)?;
        }
        Ok(total)
    }

    fn write(
        &self,
        view: &mut ByteViewMut<'_>,
        offset: usize,
        value: &Self::Value,
    ) -> Result<(), Error> {
        self.check_arity(value)?;
        let mut cursor = offset;
        for (block, value) in self.0.iter().zip(value) {
            block.write(view, cursor, value)?;
            cursor = checked_end(cursor, block.size(value)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EncodedString, EncodedUint, FixedBuffer, Float64, Repeat, Uint16, Uint32, Uint8};
    use bytes::Bytes;

    fn encode<B: WriteBlock>(block: &B, value: &B::Value) -> Vec<u8> {
        let mut buf = vec![0u8; block.size(value).unwrap()];
        block
            .write(&mut ByteViewMut::new(&mut buf), 0, value)
            .unwrap();
        buf
    }

    #[test]
    fn test_sequence_fixed() {
        let block = Sequence((Uint8, Uint16, Uint32));
        assert_eq!(ReadBlock::fixed_size(&block), Some(7));
        assert_eq!(WriteBlock::fixed_size(&block), Some(7));

        let encoded = encode(&block, &(1, 2, 3));
        assert_eq!(encoded, [1, 0, 2, 0, 0, 0, 3]);
        assert_eq!(block.read(&ByteView::new(&encoded), 0).unwrap(), (1, 2, 3));
    }

    #[test]
    fn test_sequence_variable() {
        let block = Sequence((EncodedString, EncodedUint, Float64));
        assert_eq!(ReadBlock::fixed_size(&block), None);

        let value = ("abc".to_string(), 300, 2.5);
        let encoded = encode(&block, &value);
        assert_eq!(encoded.len(), 4 + 3 + 8);

        let view = ByteView::new(&encoded);
        assert_eq!(ReadBlock::size(&block, &view, 0).unwrap(), 15);
        assert_eq!(block.read(&view, 0).unwrap(), value);
    }

    #[test]
    fn test_sequence_single() {
        let block = Sequence((EncodedString,));
        let value = ("x".to_string(),);
        let encoded = encode(&block, &value);
        assert_eq!(encoded, [1, b'x']);
        assert_eq!(block.read(&ByteView::new(&encoded), 0).unwrap(), value);
    }

    #[test]
    fn test_sequence_nested_offset() {
        let block = Sequence((Uint8, Sequence((EncodedString, Uint8))));
        let value = (7, ("hi".to_string(), 9));
        let mut buf = vec![0xAAu8; 10];
        block
            .write(&mut ByteViewMut::new(&mut buf), 3, &value)
            .unwrap();
        assert_eq!(buf[3..8], [7, 2, b'h', b'i', 9]);

        let view = ByteView::new(&buf);
        assert_eq!(ReadBlock::size(&block, &view, 3).unwrap(), 5);
        assert_eq!(block.read(&view, 3).unwrap(), value);
    }

    #[test]
    fn test_sequence_truncated() {
        let block = Sequence((Uint8, EncodedString));
        let view = ByteView::new(&[1, 4, b'a']);
        assert!(block.read(&view, 0).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_sequence_overflowing_size() {
        let block = Sequence((Uint8, Repeat::new(usize::MAX, Uint8)));
        assert_eq!(ReadBlock::fixed_size(&block), None);
        let view = ByteView::new(&[1, 2, 3]);
        assert!(ReadBlock::size(&block, &view, 0)
            .unwrap_err()
            .is_out_of_range());
        assert!(block.read(&view, 0).unwrap_err().is_out_of_range());

        let block = Sequence((FixedBuffer(usize::MAX), Uint8));
        assert_eq!(WriteBlock::fixed_size(&block), None);
        assert!(WriteBlock::size(&block, &(Bytes::new(), 1))
            .unwrap_err()
            .is_out_of_range());
    }

    #[test]
    fn test_sequence_of_overflowing_size() {
        let block = SequenceOf(vec![FixedBuffer(usize::MAX), FixedBuffer(1)]);
        assert_eq!(WriteBlock::fixed_size(&block), None);
        assert!(WriteBlock::size(&block, &vec![Bytes::new(), Bytes::new()])
            .unwrap_err()
            .is_out_of_range());
        let view = ByteView::new(&[0u8; 4]);
        assert!(ReadBlock::size(&block, &view, 0)
            .unwrap_err()
            .is_out_of_range());
    }

    #[test]
    fn test_sequence_of() {
        let blocks: Vec<Box<dyn WriteBlock<Value = u32>>> =
            vec![Box::new(Uint32), Box::new(EncodedUint)];
        let block = SequenceOf(blocks);
        let encoded = encode(&block, &vec![1, 2]);
        assert_eq!(encoded, [0, 0, 0, 1, 2]);
        assert_eq!(WriteBlock::fixed_size(&block), None);

        let readers: Vec<Box<dyn ReadBlock<Value = u32>>> =
            vec![Box::new(Uint32), Box::new(EncodedUint)];
        let reader = SequenceOf(readers);
        assert_eq!(reader.read(&ByteView::new(&encoded), 0).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_sequence_of_arity_mismatch() {
        let block = SequenceOf(vec![Uint8, Uint8]);
        assert_eq!(ReadBlock::fixed_size(&block), Some(2));
        assert_eq!(
            WriteBlock::size(&block, &vec![1, 2, 3]),
            Err(Error::ArityMismatch {
                expected: 2,
                found: 3
            })
        );

        let mut buf = [0u8; 4];
        assert_eq!(
            block.write(&mut ByteViewMut::new(&mut buf), 0, &vec![1]),
            Err(Error::ArityMismatch {
                expected: 2,
                found: 1
            })
        );
    }
}
