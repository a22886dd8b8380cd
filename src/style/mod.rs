//! Visual styles: pens, brushes, paths, pixmaps, scatter markers and line
//! endings.

mod line_ending;
mod path;
mod pen;
mod pixmap;
mod scatter;

pub use line_ending::{LineEnding, LineEndingStyle};
pub use path::{PainterPath, PathElement};
pub use pen::{Brush, BrushStyle, Pen, PenStyle};
pub use pixmap::{scale_size, AspectRatioMode, Pixmap};
pub use scatter::{ScatterShape, ScatterStyle};
