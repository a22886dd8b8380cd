//! Drawing surfaces.
//!
//! Plottables and items draw through the [`DrawingSurface`] trait. Three
//! implementations ship with the crate:
//!
//! - [`RecordingSurface`]: keeps a display list of draw calls
//! - [`RasterSurface`]: software rasterizer into a [`Pixmap`](crate::style::Pixmap)
//! - [`SvgSurface`](crate::output::SvgSurface): vector output

mod raster;
mod recording;
mod surface;

pub use raster::RasterSurface;
pub use recording::{DrawCommand, Recorded, RecordingSurface};
pub use surface::{DrawingSurface, StateStack, SurfaceModes, SurfaceState};
