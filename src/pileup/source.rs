//! The seam between the pileup engine and whatever supplies reads.

use crate::core::read::Read;
use crate::core::window::Window;
use crate::pileup::PileupError;

/// Supplies the reads of one sample overlapping a window.
///
/// Implementations hand reads to `visit` one at a time in file order and
/// stop at the first error `visit` returns.
pub trait AlignmentSource {
    /// Short label for logging (file name, sample id)
    fn label(&self) -> String;

    /// Visit every read on `window.reference` overlapping `[window.start, window.end)`.
    ///
    /// # Errors
    ///
    /// Returns any error raised while reading the source or by `visit`.
    fn visit_reads<F>(&mut self, window: &Window, visit: F) -> Result<(), PileupError>
    where
        F: FnMut(Read) -> Result<(), PileupError>;
}

/// Reads already held in memory, all assumed to be on the window's reference
impl AlignmentSource for Vec<Read> {
    fn label(&self) -> String {
        format!("{} in-memory reads", self.len())
    }

    fn visit_reads<F>(&mut self, window: &Window, mut visit: F) -> Result<(), PileupError>
    where
        F: FnMut(Read) -> Result<(), PileupError>,
    {
        for read in std::mem::take(self) {
            if read.overlaps(window.start, window.end) {
                visit(read)?;
            }
        }
        Ok(())
    }
}
