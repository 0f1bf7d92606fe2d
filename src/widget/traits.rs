//! Measurement shared by leaf components.

/// A component that knows how much room its view takes.
///
/// Parents use this to lay children out; no layout engine is implied.
pub trait Dimensions {
    /// Display width in terminal columns.
    fn width(&self) -> usize;

    /// Height in rows.
    fn height(&self) -> usize;
}
